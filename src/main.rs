//! PlaceMap Map-Sync Demo.
//!
//! Faehrt eine geskriptete Karten-Session gegen den aufzeichnenden
//! Adapter: Suche, Selektion, Route, Level-Reset. Sichtbar wird die
//! minimale Befehlsfolge, die der Controller an die Adapter-Naht gibt.

use std::time::{Duration, Instant};

use kakao_placemap_sync::{
    search_results_to_markers, LatLng, MapController, MapIntent, MapOptions, RecordingAdapter,
    RoutePoint, RouteResult, RouteStep, SearchResult,
};

fn main() -> anyhow::Result<()> {
    DemoRunner::run()
}

struct DemoRunner;

impl DemoRunner {
    fn run() -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!(
            "PlaceMap Map-Sync Demo v{} startet...",
            env!("CARGO_PKG_VERSION")
        );

        // Optionen aus TOML laden (oder Standardwerte)
        let options = MapOptions::load_from_file(&MapOptions::config_path());

        let mut controller = MapController::new(RecordingAdapter::new(), options);
        let mut now = Instant::now();

        // ── Karte mounten ───────────────────────────────────────────
        let center = LatLng::new(37.5665, 126.978);
        controller.handle_intent(now, MapIntent::MapViewMounted { center })?;
        Self::dump_phase(&mut controller, "Mount");

        // ── Suchtreffer rendern ─────────────────────────────────────
        let results = sample_results();
        let markers = search_results_to_markers(&results, None, Some(center));
        controller.handle_intent(now, MapIntent::MarkersChanged { markers })?;
        Self::dump_phase(&mut controller, "Suchtreffer");

        // ── Treffer selektieren ─────────────────────────────────────
        let markers = search_results_to_markers(&results, Some("p-2"), Some(center));
        controller.handle_intent(now, MapIntent::MarkersChanged { markers })?;
        controller.handle_intent(
            now,
            MapIntent::InfoWindowChanged {
                visible: true,
                place_id: Some("p-2".to_string()),
                position: Some(LatLng::new(results[1].lat, results[1].lng)),
            },
        )?;
        Self::dump_phase(&mut controller, "Selektion");

        // ── Route zeichnen ──────────────────────────────────────────
        controller.handle_intent(
            now,
            MapIntent::RouteChanged {
                route: Some(sample_route(&results)),
            },
        )?;
        Self::dump_phase(&mut controller, "Route");

        // ── Level-Reset (stufenweise) ───────────────────────────────
        controller.handle_intent(
            now,
            MapIntent::MapIdled {
                center,
                level: Some(8),
            },
        )?;
        controller.adapter_mut().override_level(8);
        controller.handle_intent(now, MapIntent::LevelResetRequested)?;
        // Timer ausdrehen, bis der Reset durch ist
        while let Some(due) = controller.next_due() {
            now = due + Duration::from_millis(1);
            controller.pump(now)?;
        }
        Self::dump_phase(&mut controller, "Level-Reset");

        // ── Abbauen ─────────────────────────────────────────────────
        controller.handle_intent(now, MapIntent::MapViewUnmounted)?;
        Self::dump_phase(&mut controller, "Teardown");

        Ok(())
    }

    fn dump_phase(controller: &mut MapController<RecordingAdapter>, phase: &str) {
        for command in controller.adapter_mut().take_commands() {
            log::info!("[{}] -> {:?}", phase, command);
        }
        for notification in controller.drain_notifications() {
            log::info!("[{}] <- {:?}", phase, notification);
        }
    }
}

fn sample_results() -> Vec<SearchResult> {
    vec![
        SearchResult {
            place_id: "p-1".to_string(),
            place_name: "국립중앙박물관".to_string(),
            road_address: "서울 용산구 서빙고로 137".to_string(),
            road_address_dong: "용산동6가".to_string(),
            lot_address: String::new(),
            lat: 37.5240,
            lng: 126.9804,
            phone: "02-2077-9000".to_string(),
            category_group_name: "문화시설".to_string(),
            place_url: "https://place.map.kakao.com/8107613".to_string(),
            distance: 4300.0,
        },
        SearchResult {
            place_id: "p-2".to_string(),
            place_name: "서울시청".to_string(),
            road_address: "서울 중구 세종대로 110".to_string(),
            road_address_dong: "태평로1가".to_string(),
            lot_address: String::new(),
            lat: 37.5663,
            lng: 126.9779,
            phone: "02-120".to_string(),
            category_group_name: "공공기관".to_string(),
            place_url: String::new(),
            distance: 30.0,
        },
    ]
}

fn sample_route(results: &[SearchResult]) -> RouteResult {
    let from = &results[0];
    let to = &results[1];
    RouteResult {
        coordinates: vec![
            RoutePoint {
                lat: from.lat,
                lon: from.lng,
            },
            RoutePoint {
                lat: (from.lat + to.lat) / 2.0,
                lon: (from.lng + to.lng) / 2.0,
            },
            RoutePoint {
                lat: to.lat,
                lon: to.lng,
            },
        ],
        steps: vec![RouteStep {
            start_location: RoutePoint {
                lat: from.lat,
                lon: from.lng,
            },
            end_location: RoutePoint {
                lat: to.lat,
                lon: to.lng,
            },
            distance: 4300.0,
            duration: 780.0,
        }],
        total_distance: 4300.0,
        total_duration: 780.0,
    }
}
