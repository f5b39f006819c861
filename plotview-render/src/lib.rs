//! View and camera pipeline for 3D charts
//!
//! This crate turns a scene graph into frames on an abstract painter:
//! - Camera fitting, projection and mouse unprojection
//! - Viewport reconciliation against the canvas
//! - Background images and the axis box
//! - A 2D overlay for tooltips and custom renderers
//!
//! Rendering backends implement [`Painter`] and [`Canvas`]; everything above
//! them is backend independent.

pub mod background;
pub mod camera;
pub mod canvas;
pub mod compositor;
pub mod config;
pub mod context;
pub mod logging;
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
pub mod overlay;
pub mod painter;
pub mod scene;
pub mod tooltip;
pub mod view;
pub mod viewport;

pub use background::BackgroundImage;
pub use camera::*;
pub use canvas::*;
pub use compositor::{Graphics2d, Overlay, Surface2d, TextRun};
pub use config::ViewConfig;
pub use context::CurrentContext;
pub use logging::{init_logging, LoggingConfig};
pub use overlay::*;
pub use painter::*;
pub use scene::*;
pub use tooltip::TextTooltipRenderer;
pub use view::View;
pub use viewport::ViewportReconciler;
