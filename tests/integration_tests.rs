use mapmeasure::prelude::*;

/// Integration tests for real user interactions and scenarios
/// These tests drive the measure tool the way a toolbar and a map view would
#[cfg(test)]
mod integration_tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn controller() -> MeasurementModeController<Viewport> {
        MeasurementModeController::new(Viewport::default(), MeasureConfig::default())
    }

    fn at(controller: &MeasurementModeController<Viewport>, lon: f64, lat: f64) -> ProjectedPoint {
        controller
            .view()
            .project(GeographicPoint::new(lon, lat))
            .unwrap()
    }

    /// Draws a polyline click by click, with pointer motion in between
    fn draw_line(
        controller: &mut MeasurementModeController<Viewport>,
        lon_lat: &[(f64, f64)],
    ) -> Option<Measurement> {
        let points: Vec<_> = lon_lat
            .iter()
            .map(|&(lon, lat)| at(controller, lon, lat))
            .collect();

        controller
            .handle_draw_event(&DrawEvent::Start { position: points[0] })
            .unwrap();
        for &position in &points[1..] {
            controller.handle_map_event(&MapEvent::PointerMove {
                position,
                dragging: false,
            });
            controller
                .handle_draw_event(&DrawEvent::MoveVertex { position })
                .unwrap();
            controller
                .handle_draw_event(&DrawEvent::AddVertex { position })
                .unwrap();
        }
        controller.handle_draw_event(&DrawEvent::Finish).unwrap()
    }

    /// The equator-to-two-degrees-north line from the documentation
    #[test]
    fn test_line_along_meridian() {
        println!("🧪 [TEST] Measuring (0,0) → (0,1) → (0,2)");
        init();

        let mut controller = controller();
        controller.handle_command(Command::StartDrawing);
        let measurement = draw_line(&mut controller, &[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]).unwrap();

        assert_eq!(measurement.mode, MeasurementMode::Line);
        assert!((measurement.value - 2.0 * 111_319.49).abs() < 0.1);
        assert_eq!(measurement.text, "222.64 km");

        let pinned = controller.overlays().get(measurement.tooltip).unwrap();
        assert!(pinned.is_pinned());
        assert_eq!(pinned.style_class(), "tooltip tooltip-static");
        assert_eq!(pinned.anchor(), Some(at(&controller, 0.0, 2.0)));
        println!("✅ [TEST] Line measurement passed");
    }

    /// Every complete gesture leaves exactly one pinned tooltip and no live session
    #[test]
    fn test_each_gesture_pins_one_tooltip() {
        init();
        let mut controller = controller();
        controller.start();

        for n in 1..=3 {
            draw_line(&mut controller, &[(0.0, 0.0), (0.5, 0.5)]).unwrap();
            assert_eq!(controller.overlays().pinned_count(), n);
            assert!(controller.active_session().is_none());
        }
        assert_eq!(controller.measurements().len(), 3);
    }

    #[test]
    fn test_cancel_mid_gesture_pins_nothing() {
        init();
        let mut controller = controller();
        controller.start();
        let a = at(&controller, 0.0, 0.0);
        let b = at(&controller, 0.3, 0.3);

        controller
            .handle_draw_event(&DrawEvent::Start { position: a })
            .unwrap();
        controller
            .handle_draw_event(&DrawEvent::MoveVertex { position: b })
            .unwrap();
        assert!(controller.active_session().is_some());

        controller.handle_draw_event(&DrawEvent::Cancel).unwrap();

        assert!(controller.active_session().is_none());
        assert_eq!(controller.overlays().pinned_count(), 0);
        assert!(controller.measurements().is_empty());
    }

    #[test]
    fn test_area_measurement() {
        init();
        let mut controller = controller();
        controller.handle_command(Command::SetMeasurementMode(MeasurementMode::Area));
        controller.handle_command(Command::StartDrawing);

        let measurement = draw_line(
            &mut controller,
            &[(0.0, 0.0), (0.01, 0.0), (0.01, 0.01), (0.0, 0.01)],
        )
        .unwrap();

        // a 0.01° cell at the equator is about 1.24 km²
        assert_eq!(measurement.mode, MeasurementMode::Area);
        assert!((measurement.value - 1_239_140.0).abs() < 1_000.0);
        assert_eq!(measurement.text, "1.24 km²");
    }

    #[test]
    fn test_clear_twice_leaves_no_overlays() {
        init();
        let mut controller = controller();
        controller.start();
        draw_line(&mut controller, &[(0.0, 0.0), (1.0, 0.0)]).unwrap();
        controller.stop();

        controller.clear();
        assert!(controller.overlays().is_empty());
        assert_eq!(controller.view().overlay_count(), 0);

        controller.clear();
        assert!(controller.overlays().is_empty());
        assert_eq!(controller.view().overlay_count(), 0);
    }

    #[test]
    fn test_stop_then_events_are_ignored() {
        init();
        let mut controller = controller();
        controller.start();
        draw_line(&mut controller, &[(0.0, 0.0), (0.0, 0.1)]).unwrap();
        controller.stop();

        assert_eq!(draw_line(&mut controller, &[(1.0, 1.0), (1.0, 1.1)]), None);
        assert_eq!(controller.measurements().len(), 1);
        assert_eq!(controller.overlays().pinned_count(), 1);
    }

    /// Switching base maps and zooming toggles tile layers, never the drawing layer
    #[test]
    fn test_map_source_switch_and_zoom() {
        init();
        let catalog = r#"{
            "id": "hiking",
            "name": "Hiking",
            "layers": [
                { "id": "relief", "tile_url": "https://relief.example/{z}/{x}/{y}.png", "min_zoom": 5, "max_zoom": 10 },
                { "id": "roads", "tile_url": "https://roads.example/{z}/{x}/{y}.png" }
            ]
        }"#;
        let source = MapSource::from_json(catalog).unwrap();

        let mut viewport = Viewport::default();
        let mut layers = LayerSet::new();
        layers.add_persistent(VectorLayer::new("measurements"));

        viewport.set_zoom(10.0);
        layers.activate_source(&source, viewport.current_zoom());
        assert!(layers.get("relief").unwrap().is_visible());

        for (zoom, relief_visible) in [(11.0, false), (4.0, false), (5.0, true), (10.0, true)] {
            viewport.set_zoom(zoom);
            layers.handle_map_event(&MapEvent::ZoomChanged {
                zoom: viewport.current_zoom(),
            });
            assert_eq!(layers.get("relief").unwrap().is_visible(), relief_visible);
            assert!(layers.get("roads").unwrap().is_visible());
            assert!(layers.get("measurements").unwrap().is_visible());
        }
    }

    /// A map view whose projection always fails
    struct BrokenView;

    impl MapView for BrokenView {
        fn current_zoom(&self) -> f64 {
            0.0
        }

        fn projection(&self) -> Crs {
            Crs::WebMercator
        }

        fn projection_transform(
            &self,
            _point: ProjectedPoint,
            from: Crs,
            to: Crs,
        ) -> mapmeasure::Result<ProjectedPoint> {
            Err(MeasureError::Projection(format!("{} -> {}", from, to)))
        }

        fn register_overlay(&mut self, _id: OverlayId) {}

        fn remove_overlay(&mut self, _id: OverlayId) {}
    }

    #[test]
    fn test_projection_errors_propagate() {
        init();
        let mut controller = MeasurementModeController::new(BrokenView, MeasureConfig::default());
        controller.start();

        let result = controller.handle_draw_event(&DrawEvent::Start {
            position: ProjectedPoint::new(0.0, 0.0),
        });
        assert!(matches!(result, Err(MeasureError::Projection(_))));
    }

    #[test]
    fn test_init_logging_can_run_twice() {
        println!("🧪 [TEST] Logger setup is safe to repeat");
        mapmeasure::init_logging();
        mapmeasure::init_logging();
        log::info!("logger installed");
    }
}
