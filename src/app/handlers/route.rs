//! Handler fuer das Zeichnen und Entfernen der Route.

use std::time::Instant;

use crate::adapter::{AdapterCommand, MapAdapter, MarkerDraw, PolylineStyle};
use crate::core::{
    LatLng, MarkerKind, MarkerLabel, RouteResult, ROUTE_END_MARKER_ID, ROUTE_START_MARKER_ID,
};
use crate::shared::marker_style::style_for;
use crate::shared::options::Z_ROUTE_POLYLINE;
use crate::shared::MapOptions;

use super::issue;
use crate::app::state::MapSyncState;

/// Wendet ein Routenergebnis an (oder entfernt die Route bei `None`).
///
/// Die Clear-Sequenz laeuft immer zuerst — unabhaengig davon, ob eine
/// neue Route folgt. So bleibt nach jedem Aufruf garantiert kein
/// Artefakt der vorigen Route stehen.
pub fn apply(
    state: &mut MapSyncState,
    adapter: &mut dyn MapAdapter,
    now: Instant,
    options: &MapOptions,
    route: Option<RouteResult>,
) {
    if !state.is_ready() {
        log::debug!("Karte noch nicht bereit, merke Route vor");
        state.pending_route = Some(route);
        return;
    }

    issue(state, adapter, now, AdapterCommand::ClearPolyline);
    issue(
        state,
        adapter,
        now,
        AdapterCommand::RemoveMarker {
            id: ROUTE_START_MARKER_ID.to_string(),
        },
    );
    issue(
        state,
        adapter,
        now,
        AdapterCommand::RemoveMarker {
            id: ROUTE_END_MARKER_ID.to_string(),
        },
    );

    if let Some(result) = &route {
        if result.has_path() {
            draw(state, adapter, now, options, result);
        }
    }

    state.route = route;
}

/// Zeichnet Polyline, Start-/Ziel-Marker und passt den Viewport ein.
fn draw(
    state: &mut MapSyncState,
    adapter: &mut dyn MapAdapter,
    now: Instant,
    options: &MapOptions,
    result: &RouteResult,
) {
    let path = result.path();
    issue(
        state,
        adapter,
        now,
        AdapterCommand::DrawPolyline {
            path: path.clone(),
            style: PolylineStyle {
                weight: options.route_stroke_weight,
                color: options.route_stroke_color.clone(),
                opacity: options.route_stroke_opacity,
                z_index: Z_ROUTE_POLYLINE,
            },
        },
    );

    // Start/Ziel kommen aus den Abschnitten, nicht aus dem Pfad —
    // ohne Abschnitte gibt es nur die Polyline.
    if let (Some(start), Some(end)) = (result.start_position(), result.end_position()) {
        issue(
            state,
            adapter,
            now,
            AdapterCommand::UpsertMarker {
                marker: route_marker(ROUTE_START_MARKER_ID, start, MarkerKind::RouteStart),
            },
        );
        issue(
            state,
            adapter,
            now,
            AdapterCommand::UpsertMarker {
                marker: route_marker(ROUTE_END_MARKER_ID, end, MarkerKind::RouteEnd),
            },
        );
    }

    issue(state, adapter, now, AdapterCommand::FitBounds { points: path });
}

fn route_marker(id: &str, position: LatLng, kind: MarkerKind) -> MarkerDraw {
    MarkerDraw {
        id: id.to_string(),
        position,
        style: style_for(kind),
        label: MarkerLabel::default(),
        source: None,
    }
}
