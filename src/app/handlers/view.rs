//! Handler fuer Kartenmittelpunkt, Level-Reset und Idle-Meldungen.

use std::time::{Duration, Instant};

use crate::adapter::{AdapterCommand, MapAdapter};
use crate::app::events::{MapCommand, MapNotification};
use crate::app::scheduler::TimerQueue;
use crate::core::LatLng;
use crate::shared::MapOptions;

use super::{issue, markers};
use crate::app::state::{LevelReset, MapSyncState};

/// Wendet einen neuen Kartenmittelpunkt an.
///
/// Vor Ready wird nur der Spiegel-Zustand aktualisiert — `Initialize`
/// traegt das Zentrum dann selbst.
pub fn apply_center(
    state: &mut MapSyncState,
    adapter: &mut dyn MapAdapter,
    now: Instant,
    center: LatLng,
) {
    state.center = center;
    if !state.is_ready() {
        // Nur der neueste vorgemerkte Mittelpunkt ueberlebt
        state.pending_center = Some(center);
        return;
    }
    issue(state, adapter, now, AdapterCommand::SetCenter { center });
}

/// Startet den stufenweisen Level-Reset.
///
/// Steht die Karte schon auf dem Ziel-Level, wird kein Level-Befehl
/// ausgegeben — der Marker-Re-Sync und die Abschluss-Meldung laufen
/// trotzdem.
pub fn begin_level_reset(
    state: &mut MapSyncState,
    adapter: &mut dyn MapAdapter,
    timers: &mut TimerQueue<MapCommand>,
    options: &MapOptions,
    now: Instant,
    target: i32,
) {
    // Ein neuerer Reset bricht den laufenden ab
    state.level_reset_generation += 1;
    let generation = state.level_reset_generation;
    state.level_reset = None;

    let current = adapter.level().unwrap_or(state.level);
    if current == target {
        log::debug!("Level schon auf Ziel {}, nur Marker-Re-Sync", target);
        markers::resync(state, adapter, now);
        state.push_notification(MapNotification::ResetLevelComplete);
        return;
    }

    state.level_reset = Some(LevelReset { target, generation });
    level_step(state, adapter, timers, options, now, target, generation);
}

/// Ein Schritt der stufenweisen Level-Anpassung.
///
/// Jeder Schritt prueft die Liveness: nur die aktive Reset-Generation
/// darf weiterlaufen, ein Teardown oder neuerer Reset bricht ab.
pub fn level_step(
    state: &mut MapSyncState,
    adapter: &mut dyn MapAdapter,
    timers: &mut TimerQueue<MapCommand>,
    options: &MapOptions,
    now: Instant,
    target: i32,
    generation: u64,
) {
    let live = state
        .level_reset
        .as_ref()
        .is_some_and(|r| r.generation == generation);
    if !live {
        log::debug!("Level-Schritt einer abgeloesten Generation verworfen");
        return;
    }

    let current = adapter.level().unwrap_or(state.level);
    let next = current + (target - current).signum();
    if issue(state, adapter, now, AdapterCommand::SetLevel { level: next }) {
        state.level = next;
    }

    if next == target {
        state.level_reset = None;
        // Marker-Anker koennen nach der Level-Aenderung vom Clusterer
        // abweichen — Re-Sync nach kurzer Beruhigung
        timers.schedule(
            now,
            Duration::from_millis(options.level_step_delay_ms),
            MapCommand::ResyncMarkers,
        );
        state.push_notification(MapNotification::ResetLevelComplete);
    } else {
        timers.schedule(
            now,
            Duration::from_millis(options.level_step_delay_ms),
            MapCommand::LevelStep { target, generation },
        );
    }
}

/// Verbucht ein Idle-Event der Karte und plant die debounced Meldung.
pub fn record_idle(
    state: &mut MapSyncState,
    timers: &mut TimerQueue<MapCommand>,
    options: &MapOptions,
    now: Instant,
    center: LatLng,
    level: Option<i32>,
) {
    state.center = center;
    if let Some(level) = level {
        state.level = level;
    }

    // Schnelle Pan-Folgen koaleszieren zu einer Meldung
    if let Some(handle) = state.idle_timer.take() {
        timers.cancel(handle);
    }
    state.idle_timer = Some(timers.schedule(
        now,
        Duration::from_millis(options.idle_debounce_ms),
        MapCommand::NotifyMapIdle { center },
    ));
}

/// Gibt die debounced Idle-Meldung an den Host.
pub fn notify_idle(state: &mut MapSyncState, center: LatLng) {
    state.idle_timer = None;
    state.push_notification(MapNotification::MapIdle { center });
}
