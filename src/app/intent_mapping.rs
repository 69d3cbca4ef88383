//! Mapping von Host-/Karten-Intents auf mutierende Map-Commands.
//!
//! Hier passiert der Abgleich: jeder Intent wird gegen den zuletzt
//! angewendeten Zustand gedifft, heraus kommt die minimale Folge
//! ausfuehrbarer Commands. Ein Intent ohne Differenz ergibt eine leere
//! Folge.

use crate::core::Marker;
use crate::shared::options::CENTER_EPSILON_DEG;
use crate::shared::MapOptions;

use super::events::{MapCommand, MapIntent};
use super::state::{MapSyncState, OverlayOrigin};

/// Uebersetzt einen `MapIntent` in eine Sequenz ausfuehrbarer `MapCommand`s.
pub fn map_intent_to_commands(
    state: &MapSyncState,
    options: &MapOptions,
    intent: MapIntent,
) -> Vec<MapCommand> {
    match intent {
        MapIntent::MapViewMounted { center } => {
            if state.is_ready() {
                // Re-Render des Hosts — Karte existiert schon
                vec![]
            } else {
                vec![MapCommand::Initialize { center }]
            }
        }
        MapIntent::SdkReady => {
            if state.is_ready() {
                vec![]
            } else {
                vec![MapCommand::MarkReady]
            }
        }
        MapIntent::CenterChanged { center } => {
            if center.approx_eq(state.center, CENTER_EPSILON_DEG) {
                vec![]
            } else {
                vec![MapCommand::ApplyCenter { center }]
            }
        }
        MapIntent::MarkersChanged { markers } => {
            if same_markers(state, &markers) {
                vec![]
            } else {
                vec![MapCommand::ApplyMarkers { markers }]
            }
        }
        MapIntent::RouteChanged { route } => {
            let current = state.pending_route.as_ref().unwrap_or(&state.route);
            if *current == route {
                vec![]
            } else {
                vec![MapCommand::ApplyRoute { route }]
            }
        }
        MapIntent::InfoWindowChanged {
            visible,
            place_id,
            position,
        } => {
            if visible {
                match (place_id, position) {
                    (Some(place_id), Some(position)) => {
                        let already_open = state.open_overlay.as_ref().is_some_and(|o| {
                            o.id == place_id && o.origin == OverlayOrigin::Click
                        });
                        if already_open {
                            vec![]
                        } else {
                            vec![MapCommand::ShowInfoOverlay { place_id, position }]
                        }
                    }
                    // Sichtbar ohne Ziel — nichts anzuzeigen
                    _ => vec![],
                }
            } else if state.open_overlay.is_some() {
                vec![MapCommand::HideInfoOverlay]
            } else {
                vec![]
            }
        }
        MapIntent::MarkerHoverStarted { id } => match &state.open_overlay {
            // Persistentes Klick-Overlay hat Vorrang vor Hover
            Some(open) if open.origin == OverlayOrigin::Click => vec![],
            Some(open) if open.id == id => vec![],
            _ => vec![MapCommand::ShowHoverOverlay { id }],
        },
        MapIntent::MarkerHoverEnded { id } => match &state.open_overlay {
            Some(open) if open.origin == OverlayOrigin::Hover && open.id == id => {
                vec![MapCommand::HideHoverOverlay { id }]
            }
            _ => vec![],
        },
        MapIntent::MarkerPressed { id, position } => {
            let mut commands = Vec::new();
            let hover_open = state
                .open_overlay
                .as_ref()
                .is_some_and(|o| o.origin == OverlayOrigin::Hover && o.id == id);
            if hover_open {
                commands.push(MapCommand::PromoteHoverOverlay { id: id.clone() });
            }
            commands.push(MapCommand::NotifyMarkerPressed { id, position });
            commands
        }
        MapIntent::MapIdled { center, level } => {
            vec![MapCommand::RecordIdle { center, level }]
        }
        MapIntent::RoutePlaceSelected { place } => {
            vec![MapCommand::NotifyRouteSelected { place }]
        }
        MapIntent::LevelResetRequested => {
            if state.is_ready() {
                vec![MapCommand::BeginLevelReset {
                    target: options.current_location_level,
                }]
            } else {
                vec![]
            }
        }
        MapIntent::MapViewUnmounted => vec![MapCommand::Teardown],
    }
}

/// Entspricht der neue Marker-Satz dem zuletzt gewollten?
///
/// Vor Ready zaehlt der ausstehende Satz, danach der angewendete.
fn same_markers(state: &MapSyncState, markers: &[Marker]) -> bool {
    if let Some(pending) = &state.pending_markers {
        return pending.as_slice() == markers;
    }
    state.applied_markers.len() == markers.len()
        && state
            .applied_markers
            .values()
            .zip(markers.iter())
            .all(|(applied, new)| applied == new)
}
