//! Viewport bounds for the 2-D calculator.

use serde::{Deserialize, Serialize};

use crate::request::ZoomLevel;

/// Axis-aligned viewport in math units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MathBounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl MathBounds {
    /// Bounds for a zoom level on the wide 2:1 page layout: the x span
    /// halves per zoom-in step and doubles per zoom-out step, the y span
    /// stays at half of x.
    pub fn for_zoom(zoom: ZoomLevel) -> Self {
        let w = zoom.half_width();
        MathBounds {
            left: -w,
            right: w,
            bottom: -w / 2.0,
            top: w / 2.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }
}

impl Default for MathBounds {
    fn default() -> Self {
        MathBounds::for_zoom(ZoomLevel::default())
    }
}
