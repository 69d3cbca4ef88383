//! Handler fuer Karten-Lebenszyklus: Erstellen, Ready-Uebergang, Teardown.

use std::time::Instant;

use crate::adapter::MapAdapter;
use crate::app::events::{MapCommand, MapNotification};
use crate::app::scheduler::TimerQueue;
use crate::core::LatLng;
use crate::shared::MapOptions;

use super::{markers, route, view};
use crate::app::state::{MapPhase, MapSyncState};

/// Erstellt die Karte ueber den aktiven Adapter.
///
/// Idempotent: waehrend Ready ist der Aufruf ein No-op. Schlaegt die
/// Erstellung fehl (SDK nicht geladen), wird das gemeldet — einen
/// automatischen Retry gibt es nicht, das Lade-Signal gehoert dem Host.
pub fn initialize(
    state: &mut MapSyncState,
    adapter: &mut dyn MapAdapter,
    options: &MapOptions,
    now: Instant,
    center: LatLng,
) {
    if state.is_ready() {
        log::debug!("Initialize waehrend Ready ignoriert");
        return;
    }

    state.center = center;
    match adapter.initialize(center, options) {
        Ok(true) => mark_ready(state, adapter, options, now),
        Ok(false) => {
            log::info!("Karte erstellt, warte auf asynchrone Bereitschaft");
        }
        Err(e) => {
            log::warn!("Karten-Erstellung fehlgeschlagen: {}", e);
            state.push_notification(MapNotification::MapUnavailable {
                reason: e.to_string(),
            });
        }
    }
}

/// Uebergang nach Ready: vorgemerkte Marker und Route anwenden.
pub fn mark_ready(
    state: &mut MapSyncState,
    adapter: &mut dyn MapAdapter,
    options: &MapOptions,
    now: Instant,
) {
    if state.is_ready() {
        return;
    }
    state.phase = MapPhase::Ready;
    state.level = adapter.level().unwrap_or(options.initial_level);
    adapter.notify_ready();
    log::info!("Karte bereit");

    if let Some(center) = state.pending_center.take() {
        view::apply_center(state, adapter, now, center);
    }
    if let Some(markers) = state.pending_markers.take() {
        markers::apply(state, adapter, now, markers);
    }
    if let Some(pending_route) = state.pending_route.take() {
        route::apply(state, adapter, now, options, pending_route);
    }
}

/// Baut die Karte ab und storniert alles Ausstehende.
pub fn teardown(
    state: &mut MapSyncState,
    adapter: &mut dyn MapAdapter,
    timers: &mut TimerQueue<MapCommand>,
) {
    timers.clear();
    adapter.dispose();
    state.phase = MapPhase::Uninitialized;
    state.applied_markers.clear();
    state.pending_markers = None;
    state.pending_route = None;
    state.pending_center = None;
    state.route = None;
    state.open_overlay = None;
    state.level_reset = None;
    state.idle_timer = None;
    log::info!("Karte abgebaut");
}
