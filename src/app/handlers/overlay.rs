//! Handler fuer Info-Fenster und Hover-Label.
//!
//! Zentrale Stelle der Ein-Overlay-Invariante: oeffnen schliesst immer
//! zuerst das vorige Overlay, egal wie es geoeffnet wurde.

use std::time::Instant;

use crate::adapter::{AdapterCommand, MapAdapter};
use crate::app::overlay_content;
use crate::core::LatLng;
use crate::shared::options::{Z_HOVER_OVERLAY, Z_INFO_OVERLAY};

use super::issue;
use crate::app::state::{MapSyncState, OpenOverlay, OverlayOrigin};

/// Oeffnet das Info-Fenster fuer einen Ort.
pub fn show_info(
    state: &mut MapSyncState,
    adapter: &mut dyn MapAdapter,
    now: Instant,
    place_id: String,
    position: LatLng,
) {
    close_current(state, adapter, now);

    let Some(marker) = state.applied_markers.get(&place_id).cloned() else {
        log::warn!("Info-Fenster fuer unbekannten Marker {} verworfen", place_id);
        return;
    };

    let html = overlay_content::info_window_html(&marker);
    if issue(
        state,
        adapter,
        now,
        AdapterCommand::ShowOverlay {
            id: place_id.clone(),
            html,
            anchor: position,
            z_index: Z_INFO_OVERLAY,
        },
    ) {
        state.open_overlay = Some(OpenOverlay {
            id: place_id,
            origin: OverlayOrigin::Click,
        });
    }
}

/// Schliesst das Info-Fenster (bzw. jedes offene Overlay).
pub fn hide_info(state: &mut MapSyncState, adapter: &mut dyn MapAdapter, now: Instant) {
    close_current(state, adapter, now);
}

/// Zeigt das Hover-Label eines Markers.
pub fn show_hover(
    state: &mut MapSyncState,
    adapter: &mut dyn MapAdapter,
    now: Instant,
    id: String,
) {
    // Persistentes Klick-Overlay hat Vorrang (Mapping filtert das schon)
    if state
        .open_overlay
        .as_ref()
        .is_some_and(|o| o.origin == OverlayOrigin::Click)
    {
        return;
    }
    close_current(state, adapter, now);

    let Some(marker) = state.applied_markers.get(&id).cloned() else {
        return;
    };

    let html = overlay_content::hover_label_html(&marker.label);
    if issue(
        state,
        adapter,
        now,
        AdapterCommand::ShowOverlay {
            id: id.clone(),
            html,
            anchor: marker.position,
            z_index: Z_HOVER_OVERLAY,
        },
    ) {
        state.open_overlay = Some(OpenOverlay {
            id,
            origin: OverlayOrigin::Hover,
        });
    }
}

/// Schliesst das Hover-Label eines Markers (Mouse-out).
pub fn hide_hover(
    state: &mut MapSyncState,
    adapter: &mut dyn MapAdapter,
    now: Instant,
    id: &str,
) {
    let is_this_hover = state
        .open_overlay
        .as_ref()
        .is_some_and(|o| o.origin == OverlayOrigin::Hover && o.id == id);
    if is_this_hover {
        close_current(state, adapter, now);
    }
}

/// Befoerdert ein offenes Hover-Label zum persistenten Overlay.
///
/// Das Overlay selbst bleibt stehen — nur der Mouse-out schliesst es
/// danach nicht mehr.
pub fn promote_hover(state: &mut MapSyncState, id: &str) {
    if let Some(open) = &mut state.open_overlay {
        if open.origin == OverlayOrigin::Hover && open.id == id {
            open.origin = OverlayOrigin::Click;
        }
    }
}

/// Schliesst das aktuell offene Overlay, falls vorhanden.
fn close_current(state: &mut MapSyncState, adapter: &mut dyn MapAdapter, now: Instant) {
    if let Some(open) = state.open_overlay.take() {
        issue(
            state,
            adapter,
            now,
            AdapterCommand::HideOverlay { id: open.id },
        );
    }
}
