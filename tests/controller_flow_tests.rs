//! Integrationstests fuer den Controller-Fluss:
//! - Initialisierung und Koaleszieren vor Ready
//! - Marker-Abgleich und Routen-Lebenszyklus
//! - Overlay-Invariante, Level-Reset, Fehler-Eindaemmung

use std::time::{Duration, Instant};

use kakao_placemap_sync::{
    search_results_to_markers, AdapterCommand, LatLng, MapController, MapIntent, MapNotification,
    MapOptions, Marker, RecordingAdapter, RoutePoint, RouteResult, RouteStep, SearchResult,
};

fn result(id: &str, name: &str, lat: f64, lng: f64) -> SearchResult {
    SearchResult {
        place_id: id.to_string(),
        place_name: name.to_string(),
        road_address: String::new(),
        road_address_dong: String::new(),
        lot_address: String::new(),
        lat,
        lng,
        phone: String::new(),
        category_group_name: String::new(),
        place_url: String::new(),
        distance: 0.0,
    }
}

fn markers(ids: &[&str]) -> Vec<Marker> {
    let results: Vec<SearchResult> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| result(id, id, 37.5 + i as f64 * 0.01, 127.0))
        .collect();
    search_results_to_markers(&results, None, None)
}

fn route(with_steps: bool) -> RouteResult {
    RouteResult {
        coordinates: vec![
            RoutePoint {
                lat: 37.50,
                lon: 127.00,
            },
            RoutePoint {
                lat: 37.52,
                lon: 127.02,
            },
        ],
        steps: if with_steps {
            vec![RouteStep {
                start_location: RoutePoint {
                    lat: 37.499,
                    lon: 126.999,
                },
                end_location: RoutePoint {
                    lat: 37.521,
                    lon: 127.021,
                },
                distance: 0.0,
                duration: 0.0,
            }]
        } else {
            vec![]
        },
        total_distance: 0.0,
        total_duration: 0.0,
    }
}

fn mounted_controller() -> (MapController<RecordingAdapter>, Instant) {
    let mut controller = MapController::new(RecordingAdapter::new(), MapOptions::default());
    let now = Instant::now();
    controller
        .handle_intent(
            now,
            MapIntent::MapViewMounted {
                center: LatLng::new(37.5665, 126.978),
            },
        )
        .expect("Mount muss durchlaufen");
    controller.adapter_mut().take_commands();
    controller.drain_notifications();
    (controller, now)
}

#[test]
fn mount_twice_creates_the_map_only_once() {
    let mut controller = MapController::new(RecordingAdapter::new(), MapOptions::default());
    let now = Instant::now();
    let center = LatLng::new(37.5665, 126.978);

    controller
        .handle_intent(now, MapIntent::MapViewMounted { center })
        .expect("erster Mount muss durchlaufen");
    assert!(controller.state().is_ready());

    controller
        .handle_intent(now, MapIntent::MapViewMounted { center })
        .expect("zweiter Mount muss ein No-op sein");

    // Genau ein Initialize im Command-Log
    let initializes = controller
        .state()
        .command_log
        .entries()
        .iter()
        .filter(|c| matches!(c, kakao_placemap_sync::MapCommand::Initialize { .. }))
        .count();
    assert_eq!(initializes, 1);
}

#[test]
fn markers_before_ready_coalesce_to_latest_set() {
    let mut controller =
        MapController::new(RecordingAdapter::deferred_ready(), MapOptions::default());
    let now = Instant::now();
    controller
        .handle_intent(
            now,
            MapIntent::MapViewMounted {
                center: LatLng::new(37.5665, 126.978),
            },
        )
        .unwrap();
    assert!(!controller.state().is_ready());

    controller
        .handle_intent(
            now,
            MapIntent::MarkersChanged {
                markers: markers(&["a"]),
            },
        )
        .unwrap();
    controller
        .handle_intent(
            now,
            MapIntent::MarkersChanged {
                markers: markers(&["b"]),
            },
        )
        .unwrap();

    // Vor Ready geht nichts an den Adapter
    assert!(controller.adapter().commands().is_empty());

    controller.handle_intent(now, MapIntent::SdkReady).unwrap();

    let commands = controller.adapter_mut().take_commands();
    let batches: Vec<_> = commands
        .iter()
        .filter_map(|c| match c {
            AdapterCommand::SetClusteredMarkers { markers } => Some(markers),
            _ => None,
        })
        .collect();
    assert_eq!(batches.len(), 1, "genau ein angewendeter Render");
    assert_eq!(batches[0].len(), 1);
    assert_eq!(batches[0][0].id, "b");
}

#[test]
fn center_changes_before_ready_coalesce_to_latest() {
    let mut controller =
        MapController::new(RecordingAdapter::deferred_ready(), MapOptions::default());
    let now = Instant::now();
    controller
        .handle_intent(
            now,
            MapIntent::MapViewMounted {
                center: LatLng::new(37.5665, 126.978),
            },
        )
        .unwrap();

    controller
        .handle_intent(
            now,
            MapIntent::CenterChanged {
                center: LatLng::new(37.50, 127.00),
            },
        )
        .unwrap();
    controller
        .handle_intent(
            now,
            MapIntent::CenterChanged {
                center: LatLng::new(37.51, 127.01),
            },
        )
        .unwrap();

    controller.handle_intent(now, MapIntent::SdkReady).unwrap();

    let centers: Vec<_> = controller
        .adapter_mut()
        .take_commands()
        .into_iter()
        .filter_map(|c| match c {
            AdapterCommand::SetCenter { center } => Some(center),
            _ => None,
        })
        .collect();
    assert_eq!(centers.len(), 1, "nur der neueste Mittelpunkt kommt an");
    assert!(centers[0].approx_eq(LatLng::new(37.51, 127.01), 1e-9));
}

#[test]
fn user_location_marker_is_upserted_not_clustered() {
    let (mut controller, now) = mounted_controller();
    let results = [result("a", "A", 37.5, 127.0)];
    let set = search_results_to_markers(&results, None, Some(LatLng::new(37.51, 127.01)));

    controller
        .handle_intent(now, MapIntent::MarkersChanged { markers: set })
        .unwrap();

    let commands = controller.adapter_mut().take_commands();
    let upserted: Vec<_> = commands
        .iter()
        .filter_map(|c| match c {
            AdapterCommand::UpsertMarker { marker } => Some(marker.id.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(upserted, vec!["user-location"]);

    let clustered: Vec<_> = commands
        .iter()
        .filter_map(|c| match c {
            AdapterCommand::SetClusteredMarkers { markers } => Some(markers),
            _ => None,
        })
        .collect();
    assert_eq!(clustered.len(), 1);
    assert!(clustered[0].iter().all(|m| m.id != "user-location"));
}

#[test]
fn vanished_user_location_removes_its_marker() {
    let (mut controller, now) = mounted_controller();
    let results = [result("a", "A", 37.5, 127.0)];

    let with_user = search_results_to_markers(&results, None, Some(LatLng::new(37.51, 127.01)));
    controller
        .handle_intent(now, MapIntent::MarkersChanged { markers: with_user })
        .unwrap();
    controller.adapter_mut().take_commands();

    let without_user = search_results_to_markers(&results, None, None);
    controller
        .handle_intent(
            now,
            MapIntent::MarkersChanged {
                markers: without_user,
            },
        )
        .unwrap();

    let commands = controller.adapter_mut().take_commands();
    assert!(commands
        .iter()
        .any(|c| matches!(c, AdapterCommand::RemoveMarker { id } if id == "user-location")));
}

#[test]
fn route_b_leaves_no_artifacts_of_route_a() {
    let (mut controller, now) = mounted_controller();

    controller
        .handle_intent(
            now,
            MapIntent::RouteChanged {
                route: Some(route(true)),
            },
        )
        .unwrap();
    controller.adapter_mut().take_commands();

    let mut route_b = route(true);
    route_b.coordinates[0].lat = 38.0;
    controller
        .handle_intent(
            now,
            MapIntent::RouteChanged {
                route: Some(route_b),
            },
        )
        .unwrap();

    let commands = controller.adapter_mut().take_commands();
    // Clear-Sequenz kommt vor dem neuen Zeichnen
    assert!(matches!(commands[0], AdapterCommand::ClearPolyline));
    assert!(matches!(commands[1], AdapterCommand::RemoveMarker { .. }));
    assert!(matches!(commands[2], AdapterCommand::RemoveMarker { .. }));
    let polylines = commands
        .iter()
        .filter(|c| matches!(c, AdapterCommand::DrawPolyline { .. }))
        .count();
    assert_eq!(polylines, 1);
}

#[test]
fn clearing_the_route_only_clears() {
    let (mut controller, now) = mounted_controller();
    controller
        .handle_intent(
            now,
            MapIntent::RouteChanged {
                route: Some(route(true)),
            },
        )
        .unwrap();
    controller.adapter_mut().take_commands();

    controller
        .handle_intent(now, MapIntent::RouteChanged { route: None })
        .unwrap();

    let commands = controller.adapter_mut().take_commands();
    assert!(commands
        .iter()
        .all(|c| !matches!(c, AdapterCommand::DrawPolyline { .. })));
    assert!(commands
        .iter()
        .all(|c| !matches!(c, AdapterCommand::UpsertMarker { .. })));
    assert!(commands
        .iter()
        .any(|c| matches!(c, AdapterCommand::ClearPolyline)));
}

#[test]
fn route_markers_come_from_steps_not_coordinates() {
    let (mut controller, now) = mounted_controller();

    controller
        .handle_intent(
            now,
            MapIntent::RouteChanged {
                route: Some(route(true)),
            },
        )
        .unwrap();

    let commands = controller.adapter_mut().take_commands();
    let upserts: Vec<_> = commands
        .iter()
        .filter_map(|c| match c {
            AdapterCommand::UpsertMarker { marker } => Some(marker),
            _ => None,
        })
        .collect();
    assert_eq!(upserts.len(), 2);

    let start = upserts.iter().find(|m| m.id == "route-start").unwrap();
    let end = upserts.iter().find(|m| m.id == "route-end").unwrap();
    // Abschnitts-Endpunkte, nicht Pfad-Endpunkte
    assert!(start.position.approx_eq(LatLng::new(37.499, 126.999), 1e-9));
    assert!(end.position.approx_eq(LatLng::new(37.521, 127.021), 1e-9));
}

#[test]
fn route_without_steps_draws_polyline_but_no_markers() {
    let (mut controller, now) = mounted_controller();

    controller
        .handle_intent(
            now,
            MapIntent::RouteChanged {
                route: Some(route(false)),
            },
        )
        .unwrap();

    let commands = controller.adapter_mut().take_commands();
    assert!(commands
        .iter()
        .any(|c| matches!(c, AdapterCommand::DrawPolyline { .. })));
    assert!(commands
        .iter()
        .all(|c| !matches!(c, AdapterCommand::UpsertMarker { .. })));
    assert!(commands
        .iter()
        .any(|c| matches!(c, AdapterCommand::FitBounds { .. })));
}

#[test]
fn at_most_one_overlay_is_open_at_any_time() {
    let (mut controller, now) = mounted_controller();
    controller
        .handle_intent(
            now,
            MapIntent::MarkersChanged {
                markers: markers(&["a", "b"]),
            },
        )
        .unwrap();
    controller.adapter_mut().take_commands();

    controller
        .handle_intent(
            now,
            MapIntent::MarkerHoverStarted {
                id: "a".to_string(),
            },
        )
        .unwrap();
    controller
        .handle_intent(
            now,
            MapIntent::MarkerHoverStarted {
                id: "b".to_string(),
            },
        )
        .unwrap();

    let commands = controller.adapter_mut().take_commands();
    // Zweites Hover schliesst das erste Overlay, bevor es oeffnet
    let shows = commands
        .iter()
        .filter(|c| matches!(c, AdapterCommand::ShowOverlay { .. }))
        .count();
    let hides = commands
        .iter()
        .filter(|c| matches!(c, AdapterCommand::HideOverlay { .. }))
        .count();
    assert_eq!(shows, 2);
    assert_eq!(hides, 1);
    assert!(controller.state().open_overlay.is_some());

    controller
        .handle_intent(
            now,
            MapIntent::InfoWindowChanged {
                visible: false,
                place_id: None,
                position: None,
            },
        )
        .unwrap();
    assert!(controller.state().open_overlay.is_none());
}

#[test]
fn click_promotes_hover_overlay_to_persistent() {
    let (mut controller, now) = mounted_controller();
    controller
        .handle_intent(
            now,
            MapIntent::MarkersChanged {
                markers: markers(&["a"]),
            },
        )
        .unwrap();
    controller
        .handle_intent(
            now,
            MapIntent::MarkerHoverStarted {
                id: "a".to_string(),
            },
        )
        .unwrap();
    controller
        .handle_intent(
            now,
            MapIntent::MarkerPressed {
                id: "a".to_string(),
                position: None,
            },
        )
        .unwrap();
    controller.adapter_mut().take_commands();

    // Mouse-out schliesst ein befoerdertes Overlay nicht mehr
    controller
        .handle_intent(
            now,
            MapIntent::MarkerHoverEnded {
                id: "a".to_string(),
            },
        )
        .unwrap();

    assert!(controller.adapter().commands().is_empty());
    assert!(controller.state().open_overlay.is_some());

    let pressed = controller
        .drain_notifications()
        .into_iter()
        .any(|n| matches!(n, MapNotification::MarkerPressed { id, .. } if id == "a"));
    assert!(pressed, "Klick muss den Host erreichen");
}

#[test]
fn level_reset_at_target_issues_no_level_commands_but_resyncs() {
    let (mut controller, now) = mounted_controller();
    controller
        .handle_intent(
            now,
            MapIntent::MarkersChanged {
                markers: markers(&["a"]),
            },
        )
        .unwrap();
    controller.adapter_mut().take_commands();

    // RecordingAdapter steht nach Initialize auf initial_level == Ziel-Level
    controller
        .handle_intent(now, MapIntent::LevelResetRequested)
        .unwrap();

    let commands = controller.adapter_mut().take_commands();
    assert!(commands
        .iter()
        .all(|c| !matches!(c, AdapterCommand::SetLevel { .. })));
    // Re-Sync lief trotzdem
    assert!(commands
        .iter()
        .any(|c| matches!(c, AdapterCommand::ClearMarkers)));

    let complete = controller
        .drain_notifications()
        .into_iter()
        .any(|n| n == MapNotification::ResetLevelComplete);
    assert!(complete);
}

#[test]
fn level_reset_steps_one_level_at_a_time() {
    let (mut controller, mut now) = mounted_controller();
    controller.adapter_mut().override_level(8);

    controller
        .handle_intent(now, MapIntent::LevelResetRequested)
        .unwrap();

    // Erster Schritt sofort
    let first = controller.adapter_mut().take_commands();
    assert!(first
        .iter()
        .any(|c| matches!(c, AdapterCommand::SetLevel { level: 7 })));

    // Restliche Schritte ueber die Timer ausdrehen
    let mut levels = Vec::new();
    while let Some(due) = controller.next_due() {
        now = due + Duration::from_millis(1);
        controller.pump(now).unwrap();
        for c in controller.adapter_mut().take_commands() {
            if let AdapterCommand::SetLevel { level } = c {
                levels.push(level);
            }
        }
    }

    assert_eq!(levels, vec![6, 5, 4]);
    let complete = controller
        .drain_notifications()
        .into_iter()
        .filter(|n| *n == MapNotification::ResetLevelComplete)
        .count();
    assert_eq!(complete, 1);
}

#[test]
fn teardown_aborts_a_running_level_reset() {
    let (mut controller, now) = mounted_controller();
    controller.adapter_mut().override_level(8);

    controller
        .handle_intent(now, MapIntent::LevelResetRequested)
        .unwrap();
    controller
        .handle_intent(now, MapIntent::MapViewUnmounted)
        .unwrap();
    controller.adapter_mut().take_commands();

    controller.pump(now + Duration::from_secs(2)).unwrap();

    assert!(
        controller.adapter().commands().is_empty(),
        "nach Teardown laufen keine Level-Schritte mehr"
    );
}

#[test]
fn idle_reports_are_debounced_to_the_latest_center() {
    let (mut controller, now) = mounted_controller();

    for i in 0..5 {
        controller
            .handle_intent(
                now + Duration::from_millis(i * 50),
                MapIntent::MapIdled {
                    center: LatLng::new(37.5 + i as f64 * 0.01, 127.0),
                    level: None,
                },
            )
            .unwrap();
    }

    controller.pump(now + Duration::from_secs(1)).unwrap();

    let idles: Vec<_> = controller
        .drain_notifications()
        .into_iter()
        .filter_map(|n| match n {
            MapNotification::MapIdle { center } => Some(center),
            _ => None,
        })
        .collect();
    assert_eq!(idles.len(), 1, "eine Meldung fuer fuenf Idle-Events");
    assert!(idles[0].approx_eq(LatLng::new(37.54, 127.0), 1e-9));
}

#[test]
fn adapter_failure_degrades_to_notification_not_panic() {
    let (mut controller, now) = mounted_controller();
    controller.adapter_mut().fail_next_command("SDK weg");

    controller
        .handle_intent(
            now,
            MapIntent::MarkersChanged {
                markers: markers(&["a"]),
            },
        )
        .expect("Adapter-Fehler darf nicht propagieren");

    let unavailable = controller
        .drain_notifications()
        .into_iter()
        .any(|n| matches!(n, MapNotification::MapUnavailable { .. }));
    assert!(unavailable);

    // Pipeline funktioniert danach weiter
    controller
        .handle_intent(
            now,
            MapIntent::MarkersChanged {
                markers: markers(&["b"]),
            },
        )
        .unwrap();
    assert!(!controller.adapter().commands().is_empty());
}

#[test]
fn unchanged_inputs_produce_zero_adapter_commands() {
    let (mut controller, now) = mounted_controller();
    let set = markers(&["a", "b"]);

    controller
        .handle_intent(
            now,
            MapIntent::MarkersChanged {
                markers: set.clone(),
            },
        )
        .unwrap();
    controller.adapter_mut().take_commands();

    controller
        .handle_intent(now, MapIntent::MarkersChanged { markers: set })
        .unwrap();
    controller
        .handle_intent(
            now,
            MapIntent::CenterChanged {
                center: controller.state().center,
            },
        )
        .unwrap();
    controller
        .handle_intent(now, MapIntent::RouteChanged { route: None })
        .unwrap();

    assert!(
        controller.adapter().commands().is_empty(),
        "unveraenderter Soll-Zustand erzeugt keine Befehle"
    );
}
