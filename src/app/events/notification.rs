use crate::core::{LatLng, SearchResult};

/// Meldungen des Controllers an den Host.
///
/// Der Host draint sie nach jedem Intent/Pump und verteilt sie an die
/// externen Kollaborateure (Selektions-Store, Routen-Provider, UI).
#[derive(Debug, Clone, PartialEq)]
pub enum MapNotification {
    /// Karte kam zur Ruhe — neuer Mittelpunkt
    MapIdle { center: LatLng },
    /// Marker wurde angeklickt/angetippt
    MarkerPressed {
        id: String,
        position: Option<LatLng>,
    },
    /// Nutzer hat einen Ort als Routen-Start/-Ziel gewaehlt
    RouteSelected { place: SearchResult },
    /// Stufenweiser Level-Reset ist abgeschlossen
    ResetLevelComplete,
    /// Karte nicht verfuegbar — Befehl wurde verworfen
    MapUnavailable { reason: String },
}
