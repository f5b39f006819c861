//! Device-pixel viewport rectangles

use serde::{Deserialize, Serialize};

/// How content is fitted into the space available to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportMode {
    /// Use the whole available rectangle, distorting the aspect ratio
    #[default]
    StretchToFill,
    /// Largest centered rectangle with a fixed aspect ratio
    RectangleNoStretch,
    /// Largest centered square
    Square,
}

/// A rectangle in device pixels.
///
/// Origin is the bottom-left corner of the canvas, as for `glViewport`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport covering a whole canvas
    #[inline]
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width over height, 1.0 for an empty viewport
    pub fn aspect_ratio(&self) -> f32 {
        if self.has_area() {
            self.width as f32 / self.height as f32
        } else {
            1.0
        }
    }

    /// Largest rectangle of `ratio` (width / height) centered in `self`
    pub fn fit_ratio(&self, ratio: f32) -> Self {
        if !self.has_area() || !(ratio.is_finite() && ratio > 0.0) {
            return *self;
        }
        let (width, height) = if self.aspect_ratio() > ratio {
            (((self.height as f32) * ratio).round() as u32, self.height)
        } else {
            (self.width, ((self.width as f32) / ratio).round() as u32)
        };
        self.centered(width, height)
    }

    /// A `width` x `height` rectangle centered in `self`
    pub fn centered(&self, width: u32, height: u32) -> Self {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Self {
            x: self.x + ((self.width - width) / 2) as i32,
            y: self.y + ((self.height - height) / 2) as i32,
            width,
            height,
        }
    }

    /// Vertical slice of a canvas between fractional `left` and `right`
    /// bounds (each in `[0, 1]`).
    pub fn column(canvas_width: u32, canvas_height: u32, left: f32, right: f32) -> Self {
        let left = left.clamp(0.0, 1.0);
        let right = right.clamp(left, 1.0);
        let x = (left * canvas_width as f32).round() as i32;
        let x_end = (right * canvas_width as f32).round() as i32;
        Self {
            x,
            y: 0,
            width: (x_end - x).max(0) as u32,
            height: canvas_height,
        }
    }
}
