//! Offscreen frame demo for plotview
//!
//! Renders one frame of a small chart against the recording backend and
//! prints what reached the painter, then picks a point under the "mouse".

use std::sync::Arc;

use anyhow::Context;
use image::RgbaImage;
use plotview_core::{BoundingVolume, Coord2d, Coord3d, ViewMode};
use plotview_render::mocks::{
    EventLog, MockAxis, MockCanvas, MockLights, MockSceneGraph, RecordingPainter,
};
use plotview_render::{
    init_logging, LoggingConfig, Scene, TextTooltipRenderer, View, ViewConfig,
};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    println!("plotview offscreen frame");
    println!("========================");

    let bounds = BoundingVolume::new(Coord3d::new(0.0, 0.0, 0.0), Coord3d::new(10.0, 4.0, 2.0));
    let log = EventLog::new();
    let mut scene = Scene::new(Box::new(MockSceneGraph::new(bounds, log.clone())))
        .with_axis(Box::new(MockAxis::new(bounds, log.clone())))
        .with_lights(Box::new(MockLights::new(true, log.clone())));

    let mut painter = RecordingPainter::new(log.clone());
    let canvas = MockCanvas::new(800, 600);

    let mut view = View::new(ViewConfig::default());
    view.set_background_image(RgbaImage::from_pixel(4, 4, image::Rgba([230, 230, 240, 255])));
    view.add_tooltip(Arc::new(TextTooltipRenderer::new(
        "peak z=2.00",
        Coord2d::new(40.0, 40.0),
    )));

    view.render(&mut painter, &canvas, &mut scene)
        .context("free view frame failed")?;
    println!("\nFree view, {} painter events:", log.events().len());
    for event in log.events() {
        println!("  {event:?}");
    }
    println!(
        "rendering radius: {:.3}",
        view.camera().rendering_sphere_radius()
    );

    log.clear();
    view.set_view_mode(ViewMode::Top);
    view.render(&mut painter, &canvas, &mut scene)
        .context("top view frame failed")?;
    println!(
        "\nTop view rendering radius: {:.3}",
        view.camera().rendering_sphere_radius()
    );

    let picked = view
        .project_mouse(&mut painter, &canvas, 400, 300)
        .context("unprojection failed")?;
    println!("model point under canvas center: {picked:?}");

    view.dispose();
    log::info!("demo finished");
    Ok(())
}
