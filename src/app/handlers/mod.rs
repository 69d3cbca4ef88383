//! Feature-Handler: fuehren Map-Commands auf Zustand und Adapter aus.

pub mod lifecycle;
pub mod markers;
pub mod overlay;
pub mod route;
pub mod view;

use std::time::Instant;

use crate::adapter::{AdapterCommand, MapAdapter};
use crate::app::events::MapNotification;
use crate::app::state::MapSyncState;

/// Gibt einen Befehl an den Adapter und faengt Fehler an der
/// Controller-Grenze.
///
/// Ein fehlgeschlagener Befehl degradiert zum No-op: loggen, den Host
/// ueber "Karte nicht verfuegbar" informieren, Pipeline weiterlaufen
/// lassen. Gibt `true` zurueck, wenn der Befehl angewendet wurde.
pub(crate) fn issue(
    state: &mut MapSyncState,
    adapter: &mut dyn MapAdapter,
    now: Instant,
    command: AdapterCommand,
) -> bool {
    match adapter.apply(now, &command) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Adapter-Befehl verworfen: {}", e);
            state.push_notification(MapNotification::MapUnavailable {
                reason: e.to_string(),
            });
            false
        }
    }
}
