//! Raster overlay composited over the 3D viewport

use image::{Pixel, Rgba, RgbaImage};
use log::trace;
use plotview_core::{Color, Viewport};

use crate::canvas::DrawableHandle;
use crate::painter::Painter;

/// 2D drawing surface handed to tooltips and overlay renderers.
///
/// Coordinates are device pixels with the origin at the top-left corner of
/// the canvas, y growing downwards.
pub trait Surface2d {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Color used by [`Surface2d::clear_rect`]
    fn set_background(&mut self, color: Color);

    /// Replace a region with the background color
    fn clear_rect(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// Color used by the fill, outline and text operations
    fn set_color(&mut self, color: Color);

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32);

    fn draw_rect(&mut self, x: i32, y: i32, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.fill_rect(x, y, width, 1);
        self.fill_rect(x, y + height as i32 - 1, width, 1);
        self.fill_rect(x, y, 1, height);
        self.fill_rect(x + width as i32 - 1, y, 1, height);
    }

    /// Place a string with its baseline starting at `(x, y)`
    fn draw_string(&mut self, text: &str, x: i32, y: i32);
}

/// A string placed on the overlay; glyphs are rasterized by the painter
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Region {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl Region {
    fn clip(x: i32, y: i32, width: u32, height: u32, bound_w: u32, bound_h: u32) -> Option<Self> {
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + width as i64).min(bound_w as i64);
        let y1 = (y as i64 + height as i64).min(bound_h as i64);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }

    fn union(self, other: Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self {
            x,
            y,
            width: (self.x + self.width).max(other.x + other.width) - x,
            height: (self.y + self.height).max(other.y + other.height) - y,
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x as i32
            && y >= self.y as i32
            && x < (self.x + self.width) as i32
            && y < (self.y + self.height) as i32
    }
}

/// Off-screen layer bound to a canvas drawable.
///
/// It is painted in full-canvas coordinates and always composited over the
/// whole 3D viewport, so a viewport smaller than the canvas shrinks it.
#[derive(Debug)]
pub struct Overlay {
    drawable: DrawableHandle,
    image: RgbaImage,
    texts: Vec<TextRun>,
    dirty: Option<Region>,
}

impl Overlay {
    pub fn new(drawable: DrawableHandle) -> Self {
        Self {
            drawable,
            image: RgbaImage::new(0, 0),
            texts: Vec::new(),
            dirty: None,
        }
    }

    pub fn drawable(&self) -> DrawableHandle {
        self.drawable
    }

    /// Backing raster, sized to the canvas of the last frame
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_some()
    }

    /// Open a 2D context covering `width` x `height` pixels, resizing the
    /// backing raster if the canvas changed size
    pub fn create_graphics(&mut self, width: u32, height: u32) -> Graphics2d<'_> {
        if self.image.dimensions() != (width, height) {
            trace!("resizing overlay raster to {width}x{height}");
            self.image = RgbaImage::new(width, height);
            self.texts.clear();
        }
        Graphics2d {
            image: &mut self.image,
            texts: &mut self.texts,
            color: Color::BLACK,
            background: Color::TRANSPARENT,
        }
    }

    /// Flag a region as needing upload on the next [`Overlay::draw_all`]
    pub fn mark_dirty(&mut self, x: i32, y: i32, width: u32, height: u32) {
        let (w, h) = self.image.dimensions();
        if let Some(region) = Region::clip(x, y, width, height, w, h) {
            self.dirty = Some(match self.dirty {
                Some(d) => d.union(region),
                None => region,
            });
        }
    }

    /// Composite the overlay, stretched over `viewport`.
    ///
    /// Nothing is drawn unless a region was marked dirty.
    pub fn draw_all(&mut self, painter: &mut dyn Painter, viewport: Viewport) {
        if self.dirty.take().is_none() {
            return;
        }
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return;
        }
        painter.draw_image(&self.image, viewport);

        let sx = viewport.width as f32 / width as f32;
        let sy = viewport.height as f32 / height as f32;
        for run in &self.texts {
            let x = viewport.x as f32 + run.x as f32 * sx;
            let y = viewport.y as f32 + (height as f32 - run.y as f32) * sy;
            painter.draw_text(&run.text, x, y, run.color);
        }
    }
}

/// 2D context over an [`Overlay`], released by [`Graphics2d::dispose`] or drop
pub struct Graphics2d<'a> {
    image: &'a mut RgbaImage,
    texts: &'a mut Vec<TextRun>,
    color: Color,
    background: Color,
}

impl Graphics2d<'_> {
    pub fn dispose(self) {}

    fn region(&self, x: i32, y: i32, width: u32, height: u32) -> Option<Region> {
        Region::clip(x, y, width, height, self.image.width(), self.image.height())
    }
}

impl Surface2d for Graphics2d<'_> {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    fn clear_rect(&mut self, x: i32, y: i32, width: u32, height: u32) {
        let Some(r) = self.region(x, y, width, height) else {
            return;
        };
        let background = Rgba(self.background.to_rgba8());
        for py in r.y..r.y + r.height {
            for px in r.x..r.x + r.width {
                self.image.put_pixel(px, py, background);
            }
        }
        if (r.width, r.height) == self.image.dimensions() {
            // Runs anchored off the raster still belong to the surface
            self.texts.clear();
        } else {
            self.texts.retain(|t| !r.contains(t.x, t.y));
        }
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32) {
        let Some(r) = self.region(x, y, width, height) else {
            return;
        };
        let color = Rgba(self.color.to_rgba8());
        for py in r.y..r.y + r.height {
            for px in r.x..r.x + r.width {
                self.image.get_pixel_mut(px, py).blend(&color);
            }
        }
    }

    fn draw_string(&mut self, text: &str, x: i32, y: i32) {
        self.texts.push(TextRun {
            text: text.to_string(),
            x,
            y,
            color: self.color,
        });
    }
}
