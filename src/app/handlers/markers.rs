//! Handler fuer den Marker-Abgleich.

use std::time::Instant;

use indexmap::IndexMap;

use crate::adapter::{AdapterCommand, MapAdapter, MarkerDraw};
use crate::core::{Marker, USER_LOCATION_MARKER_ID};
use crate::shared::marker_style::style_for;

use super::issue;
use crate::app::state::MapSyncState;

/// Wendet einen neuen Marker-Satz an.
///
/// Vor Ready wird nur der neueste Satz vorgemerkt (Koaleszieren statt
/// Queuen) und beim Uebergang nach Ready angewendet.
pub fn apply(
    state: &mut MapSyncState,
    adapter: &mut dyn MapAdapter,
    now: Instant,
    markers: Vec<Marker>,
) {
    if !state.is_ready() {
        log::debug!(
            "Karte noch nicht bereit, merke Marker-Satz vor ({} Marker)",
            markers.len()
        );
        state.pending_markers = Some(markers);
        return;
    }
    render(state, adapter, now, markers);
}

/// Wendet den zuletzt gerenderten Marker-Satz erneut an.
///
/// Nach einer Level-Aenderung koennen Marker-Anker vom Clusterer
/// abweichen — der Re-Sync zieht beide wieder zusammen.
pub fn resync(state: &mut MapSyncState, adapter: &mut dyn MapAdapter, now: Instant) {
    let markers: Vec<Marker> = state.applied_markers.values().cloned().collect();
    log::debug!("Re-Sync des Marker-Satzes ({} Marker)", markers.len());
    render(state, adapter, now, markers);
}

/// Rendert einen Marker-Satz: Clusterer leeren, Nutzerstandort direkt
/// setzen, restliche Marker in einem Batch clustern.
fn render(
    state: &mut MapSyncState,
    adapter: &mut dyn MapAdapter,
    now: Instant,
    markers: Vec<Marker>,
) {
    let had_user_marker = state
        .applied_markers
        .contains_key(USER_LOCATION_MARKER_ID);
    let user_marker = markers.iter().find(|m| m.is_user_location()).cloned();

    issue(state, adapter, now, AdapterCommand::ClearMarkers);

    match &user_marker {
        Some(user) => {
            // Nutzerstandort haengt nie im Clusterer
            issue(
                state,
                adapter,
                now,
                AdapterCommand::UpsertMarker {
                    marker: to_draw(user),
                },
            );
        }
        None if had_user_marker => {
            issue(
                state,
                adapter,
                now,
                AdapterCommand::RemoveMarker {
                    id: USER_LOCATION_MARKER_ID.to_string(),
                },
            );
        }
        None => {}
    }

    let clustered: Vec<MarkerDraw> = markers
        .iter()
        .filter(|m| !m.is_user_location())
        .map(to_draw)
        .collect();
    if !clustered.is_empty() {
        issue(
            state,
            adapter,
            now,
            AdapterCommand::SetClusteredMarkers { markers: clustered },
        );
    }

    let mut applied = IndexMap::with_capacity(markers.len());
    for marker in markers {
        applied.insert(marker.id.clone(), marker);
    }
    state.applied_markers = applied;
}

/// Loest Icon und Z-Ordnung fuer einen Marker auf.
fn to_draw(marker: &Marker) -> MarkerDraw {
    MarkerDraw {
        id: marker.id.clone(),
        position: marker.position,
        style: style_for(marker.kind),
        label: marker.label.clone(),
        source: Some(marker.source.clone()),
    }
}
