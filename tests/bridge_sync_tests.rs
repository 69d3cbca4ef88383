//! Integrationstests fuer Controller + Bridge-Adapter:
//! Debounce-Koaleszieren, Vor-Ready-Pufferung, defensives Parsen.

use std::time::{Duration, Instant};

use kakao_placemap_sync::adapter::parse_message;
use kakao_placemap_sync::{
    search_results_to_markers, AdapterError, BridgeMapAdapter, LatLng, MapController, MapIntent,
    MapOptions, Marker, ScriptHost, SearchResult,
};

/// Injektions-Senke, die alle Snippets mitschreibt.
struct MockHost {
    scripts: Vec<String>,
}

impl MockHost {
    fn new() -> Self {
        Self {
            scripts: Vec::new(),
        }
    }
}

impl ScriptHost for MockHost {
    fn inject(&mut self, script: &str) -> Result<(), AdapterError> {
        self.scripts.push(script.to_string());
        Ok(())
    }
}

fn markers(ids: &[&str]) -> Vec<Marker> {
    let results: Vec<SearchResult> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| SearchResult {
            place_id: id.to_string(),
            place_name: id.to_string(),
            road_address: String::new(),
            road_address_dong: String::new(),
            lot_address: String::new(),
            lat: 37.5 + i as f64 * 0.01,
            lng: 127.0,
            phone: String::new(),
            category_group_name: String::new(),
            place_url: String::new(),
            distance: 0.0,
        })
        .collect();
    search_results_to_markers(&results, None, None)
}

fn mounted_bridge_controller() -> (MapController<BridgeMapAdapter<MockHost>>, Instant) {
    let mut controller = MapController::new(
        BridgeMapAdapter::new(MockHost::new()),
        MapOptions::default(),
    );
    let now = Instant::now();
    controller
        .handle_intent(
            now,
            MapIntent::MapViewMounted {
                center: LatLng::new(37.5665, 126.978),
            },
        )
        .expect("Mount muss durchlaufen");
    (controller, now)
}

#[test]
fn mount_injects_bootstrap_and_waits_for_ready() {
    let (controller, _) = mounted_bridge_controller();

    assert!(!controller.state().is_ready());
    let scripts = &controller.adapter().host().scripts;
    assert_eq!(scripts.len(), 1);
    assert!(scripts[0].contains("kakao.maps.load"));
    assert!(scripts[0].contains("map_api_ready"));
}

#[test]
fn map_api_ready_message_flushes_buffered_markers() {
    let (mut controller, now) = mounted_bridge_controller();

    controller
        .handle_intent(
            now,
            MapIntent::MarkersChanged {
                markers: markers(&["a"]),
            },
        )
        .unwrap();

    let before = controller.adapter().host().scripts.len();

    // Nachricht der Karten-Seite durch die volle Parse-Kette schicken
    let intent = parse_message(r#"{"type": "map_api_ready"}"#)
        .expect("muss parsen")
        .into_intent()
        .expect("ergibt Intent");
    controller.handle_intent(now, intent).unwrap();
    assert!(controller.state().is_ready());

    // Debounce-Fenster ausdrehen
    controller
        .pump(now + Duration::from_millis(201))
        .unwrap();

    let flushed = controller.adapter().host().scripts[before..].join("\n");
    assert!(flushed.contains("setClusteredMarkers"));
    assert!(flushed.contains(r#""id":"a""#));
}

#[test]
fn rapid_marker_updates_reach_the_page_exactly_once() {
    let (mut controller, now) = mounted_bridge_controller();
    controller.handle_intent(now, MapIntent::SdkReady).unwrap();
    let before = controller.adapter().host().scripts.len();

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
            now + Duration::from_millis(80),
            MapIntent::MarkersChanged {
                markers: markers(&["b"]),
            },
        )
        .unwrap();

    // Innerhalb des Debounce-Fensters: noch keine Injektion
    assert_eq!(controller.adapter().host().scripts.len(), before);

    controller
        .pump(now + Duration::from_millis(80 + 201))
        .unwrap();

    let flushes = &controller.adapter().host().scripts[before..];
    assert_eq!(flushes.len(), 1, "genau ein angewendeter Render");
    assert!(flushes[0].contains(r#""id":"b""#));
    assert!(!flushes[0].contains(r#""id":"a""#));
}

#[test]
fn unmount_before_flush_cancels_the_injection() {
    let (mut controller, now) = mounted_bridge_controller();
    controller.handle_intent(now, MapIntent::SdkReady).unwrap();
    let before = controller.adapter().host().scripts.len();

    controller
        .handle_intent(
            now,
            MapIntent::MarkersChanged {
                markers: markers(&["a"]),
            },
        )
        .unwrap();
    controller
        .handle_intent(now, MapIntent::MapViewUnmounted)
        .unwrap();

    controller.pump(now + Duration::from_secs(1)).unwrap();

    assert_eq!(
        controller.adapter().host().scripts.len(),
        before,
        "nach Teardown darf nichts mehr injiziert werden"
    );
}

#[test]
fn malformed_message_leaves_state_untouched() {
    let (mut controller, now) = mounted_bridge_controller();
    let scripts_before = controller.adapter().host().scripts.len();

    // Mist auf der Leitung wird beim Parsen verworfen
    assert!(parse_message("{not json").is_none());
    assert!(parse_message(r#"{"type": "marker_press"}"#).is_none());

    assert!(!controller.state().is_ready());
    assert_eq!(controller.adapter().host().scripts.len(), scripts_before);
    assert!(controller.drain_notifications().is_empty());
    let _ = now;
}

#[test]
fn marker_press_message_reaches_the_host() {
    let (mut controller, now) = mounted_bridge_controller();
    controller.handle_intent(now, MapIntent::SdkReady).unwrap();

    let intent = parse_message(
        r#"{"type": "marker_press", "id": "p-7", "latitude": 37.5, "longitude": 127.0}"#,
    )
    .expect("muss parsen")
    .into_intent()
    .expect("ergibt Intent");
    controller.handle_intent(now, intent).unwrap();

    let pressed = controller.drain_notifications().into_iter().any(|n| {
        matches!(
            n,
            kakao_placemap_sync::MapNotification::MarkerPressed { ref id, .. } if id == "p-7"
        )
    });
    assert!(pressed);
}
