//! Replays a measurement walk-through against an in-memory map view.
//!
//! Usage: `mapmeasure-app [config.json]`

use anyhow::Context;
use mapmeasure::prelude::*;

const CATALOG: &str = r#"{
    "id": "osm",
    "name": "OpenStreetMap",
    "layers": [
        { "id": "osm_base", "tile_url": "https://tile.openstreetmap.org/{z}/{x}/{y}.png", "min_zoom": 0, "max_zoom": 18 },
        { "id": "hillshade", "tile_url": "https://tiles.example.org/hillshade/{z}/{x}/{y}.png", "min_zoom": 5, "max_zoom": 15 }
    ]
}"#;

fn main() -> anyhow::Result<()> {
    mapmeasure::init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => MeasureConfig::from_path(&path)
            .with_context(|| format!("failed to load configuration from {}", path))?,
        None => MeasureConfig::default(),
    };

    let source = MapSource::from_json(CATALOG).context("invalid map source")?;
    let mut layers = LayerSet::new();
    layers.add_persistent(VectorLayer::new("measurements"));

    let view = Viewport::new(GeographicPoint::new(7.05, 46.05), 4.0);
    let mut controller = MeasurementModeController::new(view, config);
    layers.activate_source(&source, controller.view().current_zoom());
    report_layers(&layers);

    controller.handle_command(Command::StartDrawing);
    let line = [(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)];
    if let Some(measurement) = replay(&mut controller, &line)? {
        println!("line: {}", measurement.text);
    }

    controller.handle_command(Command::SetMeasurementMode(MeasurementMode::Area));
    // a 0.1 degree cell around the view centre
    let GeographicPoint { lon, lat } = controller.view().center;
    let square = [
        (lon - 0.05, lat - 0.05),
        (lon + 0.05, lat - 0.05),
        (lon + 0.05, lat + 0.05),
        (lon - 0.05, lat + 0.05),
    ];
    if let Some(measurement) = replay(&mut controller, &square)? {
        println!("area: {}", measurement.text);
    }
    controller.handle_command(Command::StopDrawing);

    for zoom in [3.0, 8.0, 17.0] {
        controller.view_mut().set_zoom(zoom);
        layers.handle_map_event(&MapEvent::ZoomChanged {
            zoom: controller.view().current_zoom(),
        });
        report_layers(&layers);
    }

    println!("{} tooltips pinned", controller.overlays().pinned_count());
    controller.handle_command(Command::ClearDrawing);
    println!("{} tooltips after clear", controller.overlays().len());
    Ok(())
}

/// Clicks through `lon_lat`, moving the pointer to each vertex first, then double-clicks
fn replay(
    controller: &mut MeasurementModeController<Viewport>,
    lon_lat: &[(f64, f64)],
) -> anyhow::Result<Option<Measurement>> {
    for (i, &(lon, lat)) in lon_lat.iter().enumerate() {
        let position = controller.view().project(GeographicPoint::new(lon, lat))?;
        controller.handle_map_event(&MapEvent::PointerMove {
            position,
            dragging: false,
        });

        if i == 0 {
            controller.handle_draw_event(&DrawEvent::Start { position })?;
        } else {
            controller.handle_draw_event(&DrawEvent::MoveVertex { position })?;
            controller.handle_draw_event(&DrawEvent::AddVertex { position })?;
        }

        if let Some(session) = controller.active_session() {
            log::info!("after vertex {}: {}", i + 1, session.text());
        }
    }
    Ok(controller.handle_draw_event(&DrawEvent::Finish)?)
}

fn report_layers(layers: &LayerSet) {
    let shown: Vec<_> = layers
        .layers()
        .iter()
        .filter(|layer| layer.is_visible())
        .map(|layer| layer.id())
        .collect();
    println!("visible layers: {}", shown.join(", "));
}
