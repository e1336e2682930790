//! Zoom-window slicing of derived series.
//!
//! The window is described by two percentages held by the caller:
//! `level` is the share of the series currently visible (20-100) and
//! `position` is the scroll offset within the hidden remainder (0-100).
//! Slicing is recomputed on demand; nothing about the current window is
//! cached here.

use serde::{Deserialize, Serialize};
use std::ops::Range;

pub const MIN_ZOOM_LEVEL: f64 = 20.0;
pub const MAX_ZOOM_LEVEL: f64 = 100.0;
pub const MIN_ZOOM_POSITION: f64 = 0.0;
pub const MAX_ZOOM_POSITION: f64 = 100.0;

/// Caller-held zoom state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomWindow {
    level: f64,
    position: f64,
}

impl Default for ZoomWindow {
    fn default() -> Self {
        Self {
            level: MAX_ZOOM_LEVEL,
            position: MIN_ZOOM_POSITION,
        }
    }
}

impl ZoomWindow {
    /// Build a window, clamping both percentages into range
    pub fn new(level: f64, position: f64) -> Self {
        let mut window = Self::default();
        window.set_level(level);
        window.set_position(position);
        window
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn set_level(&mut self, level: f64) {
        self.level = if level.is_finite() {
            level.clamp(MIN_ZOOM_LEVEL, MAX_ZOOM_LEVEL)
        } else {
            MAX_ZOOM_LEVEL
        };
    }

    pub fn set_position(&mut self, position: f64) {
        self.position = if position.is_finite() {
            position.clamp(MIN_ZOOM_POSITION, MAX_ZOOM_POSITION)
        } else {
            MIN_ZOOM_POSITION
        };
    }

    /// Back to the full view, as done whenever a new activity is selected
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_full_view(&self) -> bool {
        self.level >= MAX_ZOOM_LEVEL
    }

    /// Half-open index range visible for a series of `len` points
    pub fn bounds(&self, len: usize) -> Range<usize> {
        if self.is_full_view() {
            return 0..len;
        }

        let visible = ((len as f64 * self.level / 100.0).floor() as usize).min(len);
        let hidden = len - visible;
        let start = ((hidden as f64 * self.position / 100.0).floor() as usize).min(hidden);

        start..start + visible
    }

    /// Visible part of `series`
    pub fn slice<'a, T>(&self, series: &'a [T]) -> &'a [T] {
        &series[self.bounds(series.len())]
    }
}

/// Compute `[start, end)` for a series of `len` points.
///
/// ```text
/// visible = floor(len * level / 100)
/// start   = floor((len - visible) * position / 100)
/// end     = start + visible
/// ```
///
/// Inputs outside their ranges are clamped first.
pub fn window_bounds(len: usize, level: f64, position: f64) -> Range<usize> {
    ZoomWindow::new(level, position).bounds(len)
}

/// Slice a series with explicit percentages
pub fn slice_window<T>(series: &[T], level: f64, position: f64) -> &[T] {
    &series[window_bounds(series.len(), level, position)]
}
