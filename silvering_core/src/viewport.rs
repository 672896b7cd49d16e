// Copyright 2026 the Silvering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport scaling modes and the surface/presentation transform.
//!
//! A [`Viewport`] maps between *surface* coordinates (the remote pixel
//! grid) and *presentation* coordinates (the local screen area the mirror
//! is painted into). Three interchangeable modes govern the transform:
//!
//! - [`ScaleMode::FitToScreen`] — the whole surface is always visible at
//!   the largest scale that fits; the shorter axis is centered and panning
//!   is disabled.
//! - [`ScaleMode::OneToOne`] — scale fixed at 1, panning enabled; a
//!   surface smaller than the screen is centered.
//! - [`ScaleMode::FreeZoom`] — scale adjustable by gesture between
//!   fit-to-screen and [`MAX_SCALE`], with focus-preserving zoom: the
//!   surface point under the gesture's focal point stays put across the
//!   scale change.
//!
//! All mutation happens from the presentation thread's gesture callbacks;
//! the paint cycle reads the same state from the same thread, so the
//! viewport needs no synchronization of its own.

use kurbo::Point;
use kurbo::common::FloatFuncs as _;

use crate::surface::{SurfaceDimensions, SurfaceRect};

/// Hard upper bound on the zoom scale.
pub const MAX_SCALE: f64 = 4.0;

/// Zoom results inside `(SNAP_LOW, SNAP_HIGH)` snap to exactly 1.0, so a
/// gesture landing near native size settles on the crisp 1:1 rendering.
const SNAP_LOW: f64 = 0.90;
const SNAP_HIGH: f64 = 1.10;

/// Margin kept between the pointer and the viewport edge when panning the
/// viewport to follow it, in surface pixels.
const POINTER_PAN_MARGIN: f64 = 30.0;

/// How the surface is scaled into the presentation area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScaleMode {
    /// Whole surface visible, shorter axis centered, panning disabled.
    #[default]
    FitToScreen,
    /// Native size, panning enabled.
    OneToOne,
    /// Gesture-adjustable scale, panning enabled.
    FreeZoom,
}

/// How raw pointer gestures are interpreted.
///
/// The gesture recognizer itself lives outside this crate; the viewport
/// only carries the compatibility contract between scaling modes and
/// input modes, which is user-facing configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// Relative pointer movement, trackpad style.
    Touchpad,
    /// Absolute pointer, swipe pans the viewport.
    #[default]
    DirectSwipePan,
    /// Absolute pointer, dragging pans the viewport.
    DirectDragPan,
    /// Single-handed variant of direct input.
    SingleHanded,
}

impl ScaleMode {
    /// The input mode selected when entering this scaling mode without an
    /// explicit preference.
    #[must_use]
    pub const fn default_input_mode(self) -> InputMode {
        match self {
            Self::FitToScreen | Self::OneToOne | Self::FreeZoom => InputMode::DirectSwipePan,
        }
    }

    /// Whether `input` is a legal gesture handler in this scaling mode.
    ///
    /// Every combination is currently legal; the predicate stays exhaustive
    /// so a future mode that restricts input shows up here.
    #[must_use]
    pub const fn accepts_input_mode(self, input: InputMode) -> bool {
        match (self, input) {
            (
                Self::FitToScreen | Self::OneToOne | Self::FreeZoom,
                InputMode::Touchpad
                | InputMode::DirectSwipePan
                | InputMode::DirectDragPan
                | InputMode::SingleHanded,
            ) => true,
        }
    }
}

/// The visible window onto the surface: scale, offsets, and mode.
///
/// Offset semantics follow the active mode. In the two panning modes the
/// offset is the surface coordinate at the presentation origin. In
/// fit-to-screen the offset holds the (negative) presentation-pixel
/// overhang of the centered axis; half of it positions the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    screen: SurfaceDimensions,
    surface: SurfaceDimensions,
    mode: ScaleMode,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Viewport {
    /// Creates a viewport for the given presentation area and surface,
    /// starting in `mode`.
    #[must_use]
    pub fn new(screen: SurfaceDimensions, surface: SurfaceDimensions, mode: ScaleMode) -> Self {
        let mut vp = Self {
            screen,
            surface,
            mode,
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        vp.select_mode(mode);
        vp
    }

    /// Current scaling mode.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> ScaleMode {
        self.mode
    }

    /// Current scale factor. Always `> 0`.
    #[inline]
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current offsets. See the type docs for per-mode semantics.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    /// Presentation area dimensions.
    #[inline]
    #[must_use]
    pub fn screen(&self) -> SurfaceDimensions {
        self.screen
    }

    /// Surface dimensions the transform is based on.
    #[inline]
    #[must_use]
    pub fn surface(&self) -> SurfaceDimensions {
        self.surface
    }

    /// The smallest allowed scale: the surface exactly fills the
    /// presentation area on its tighter axis. Zooming out further would
    /// show less than the whole surface could already show.
    #[must_use]
    pub fn minimum_scale(&self) -> f64 {
        if self.surface.width == 0 || self.surface.height == 0 {
            return 1.0;
        }
        let sx = f64::from(self.screen.width) / f64::from(self.surface.width);
        let sy = f64::from(self.screen.height) / f64::from(self.surface.height);
        sx.min(sy)
    }

    /// Whether the current mode allows panning.
    #[inline]
    #[must_use]
    pub fn can_pan(&self) -> bool {
        !matches!(self.mode, ScaleMode::FitToScreen)
    }

    /// Switches scaling mode, recomputing scale and offsets.
    pub fn select_mode(&mut self, mode: ScaleMode) {
        self.mode = mode;
        match mode {
            ScaleMode::FitToScreen => {
                self.scale = self.minimum_scale();
                // Negative overhang of the centered axis, in presentation
                // pixels. The filling axis comes out as 0.
                self.offset_x =
                    -(f64::from(self.screen.width) - self.scale * f64::from(self.surface.width));
                self.offset_y =
                    -(f64::from(self.screen.height) - self.scale * f64::from(self.surface.height));
            }
            ScaleMode::OneToOne => {
                self.scale = 1.0;
                self.offset_x = self.centered_offset_x();
                self.offset_y = self.centered_offset_y();
                self.clamp_pan();
            }
            ScaleMode::FreeZoom => {
                self.scale = self.scale.clamp(self.minimum_scale(), MAX_SCALE);
                self.clamp_pan();
            }
        }
    }

    /// Adjusts the presentation area size (window resize, rotation).
    pub fn screen_resized(&mut self, screen: SurfaceDimensions) {
        self.screen = screen;
        self.select_mode(self.mode);
    }

    /// Adjusts the surface size after a remote resize.
    pub fn surface_resized(&mut self, surface: SurfaceDimensions) {
        self.surface = surface;
        self.select_mode(self.mode);
    }

    /// Applies a multiplicative zoom gesture with focal point
    /// `(fx, fy)` in presentation coordinates.
    ///
    /// Only free-zoom reacts; the other modes have a fixed scale. The new
    /// scale is clamped to `[minimum_scale, MAX_SCALE]` and snapped to 1.0
    /// when it lands close, and the offsets are recomputed so the surface
    /// point under the focal point stays under it.
    pub fn adjust_zoom(&mut self, factor: f64, fx: f64, fy: f64) {
        if !matches!(self.mode, ScaleMode::FreeZoom) || factor.is_nan() || factor <= 0.0 {
            return;
        }
        let mut new_scale = (self.scale * factor).clamp(self.minimum_scale(), MAX_SCALE);
        if new_scale > SNAP_LOW && new_scale < SNAP_HIGH {
            new_scale = 1.0;
        }
        self.offset_x += fx / self.scale - fx / new_scale;
        self.offset_y += fy / self.scale - fy / new_scale;
        self.scale = new_scale;
        self.clamp_pan();
    }

    /// Pans by a presentation-pixel delta. Returns whether the offset
    /// actually moved (panning may be disabled or already at a bound).
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> bool {
        if !self.can_pan() {
            return false;
        }
        let (ox, oy) = (self.offset_x, self.offset_y);
        self.offset_x += dx / self.scale;
        self.offset_y += dy / self.scale;
        self.clamp_pan();
        self.offset_x != ox || self.offset_y != oy
    }

    /// Pans the minimum amount needed to keep the surface point `(x, y)`
    /// inside the visible window with a small margin. Returns whether the
    /// offset moved.
    pub fn pan_to_pointer(&mut self, x: u32, y: u32) -> bool {
        if !self.can_pan() {
            return false;
        }
        let (ox, oy) = (self.offset_x, self.offset_y);
        let (vis_w, vis_h) = self.visible_size();
        let x = f64::from(x);
        let y = f64::from(y);
        if x - POINTER_PAN_MARGIN < self.offset_x {
            self.offset_x = x - POINTER_PAN_MARGIN;
        } else if x + POINTER_PAN_MARGIN > self.offset_x + vis_w {
            self.offset_x = x + POINTER_PAN_MARGIN - vis_w;
        }
        if y - POINTER_PAN_MARGIN < self.offset_y {
            self.offset_y = y - POINTER_PAN_MARGIN;
        } else if y + POINTER_PAN_MARGIN > self.offset_y + vis_h {
            self.offset_y = y + POINTER_PAN_MARGIN - vis_h;
        }
        self.clamp_pan();
        self.offset_x != ox || self.offset_y != oy
    }

    /// Maps a surface coordinate to presentation coordinates.
    #[must_use]
    pub fn surface_to_presentation(&self, x: f64, y: f64) -> Point {
        match self.mode {
            ScaleMode::FitToScreen => {
                // The offset holds the full negative overhang; half of it
                // centers the surface on the slack axis.
                Point::new(
                    x * self.scale - self.offset_x / 2.0,
                    y * self.scale - self.offset_y / 2.0,
                )
            }
            ScaleMode::OneToOne | ScaleMode::FreeZoom => Point::new(
                (x - self.offset_x) * self.scale,
                (y - self.offset_y) * self.scale,
            ),
        }
    }

    /// Maps a presentation coordinate back to surface coordinates, for
    /// hit-testing pointer events.
    #[must_use]
    pub fn presentation_to_surface(&self, px: f64, py: f64) -> Point {
        match self.mode {
            ScaleMode::FitToScreen => Point::new(
                (px + self.offset_x / 2.0) / self.scale,
                (py + self.offset_y / 2.0) / self.scale,
            ),
            ScaleMode::OneToOne | ScaleMode::FreeZoom => Point::new(
                px / self.scale + self.offset_x,
                py / self.scale + self.offset_y,
            ),
        }
    }

    /// The visible sub-rectangle of the surface, clamped independently per
    /// axis so `origin + size` never exceeds surface bounds. Fit-to-screen
    /// always shows everything.
    #[must_use]
    pub fn visible_rect(&self) -> SurfaceRect {
        if matches!(self.mode, ScaleMode::FitToScreen) {
            return SurfaceRect::from_dims(self.surface);
        }
        let (vis_w, vis_h) = self.visible_size();
        let clamp_axis = |offset: f64, visible: f64, surface: u32| -> (u32, u32) {
            let surface = f64::from(surface);
            let origin = offset.clamp(0.0, (surface - visible).max(0.0));
            let size = visible.min(surface - origin).max(0.0);
            #[expect(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "clamped into u32 surface range"
            )]
            let (origin, size) = (origin.floor() as u32, size.ceil() as u32);
            (origin, size)
        };
        let (x, width) = clamp_axis(self.offset_x, vis_w, self.surface.width);
        let (y, height) = clamp_axis(self.offset_y, vis_h, self.surface.height);
        SurfaceRect::new(x, y, width, height)
    }

    /// Size of the visible window in surface pixels at the current scale.
    fn visible_size(&self) -> (f64, f64) {
        (
            f64::from(self.screen.width) / self.scale,
            f64::from(self.screen.height) / self.scale,
        )
    }

    /// Offset that centers a surface axis smaller than the window, for
    /// the panning modes.
    fn centered_offset_x(&self) -> f64 {
        (f64::from(self.surface.width) - f64::from(self.screen.width) / self.scale) / 2.0
    }

    fn centered_offset_y(&self) -> f64 {
        (f64::from(self.surface.height) - f64::from(self.screen.height) / self.scale) / 2.0
    }

    /// Clamps pan offsets to `[0, surface - visible]` per axis, or centers
    /// an axis on which the surface is smaller than the window.
    fn clamp_pan(&mut self) {
        let (vis_w, vis_h) = self.visible_size();
        let max_x = f64::from(self.surface.width) - vis_w;
        let max_y = f64::from(self.surface.height) - vis_h;
        self.offset_x = if max_x < 0.0 {
            self.centered_offset_x()
        } else {
            self.offset_x.clamp(0.0, max_x)
        };
        self.offset_y = if max_y < 0.0 {
            self.centered_offset_y()
        } else {
            self.offset_y.clamp(0.0, max_y)
        };
    }
}
