//! Marker-Deskriptoren und die Konvertierung aus Domaenen-Daten.
//!
//! Die Konvertierungsfunktionen sind pur und total: beliebige Eingaben
//! ergeben eine gueltige Marker-Liste, fehlende Felder werden zu
//! Leerstrings, nie zu Fehlern.

use serde::{Deserialize, Serialize};

use super::geo::LatLng;
use super::place::{ParkingLot, SearchResult};

/// Sentinel-ID des Nutzerstandort-Markers.
pub const USER_LOCATION_MARKER_ID: &str = "user-location";
/// Anzeigename des Nutzerstandort-Markers.
pub const USER_LOCATION_TITLE: &str = "내 위치";
/// ID-Praefix fuer Parkplatz-Marker (verhindert Kollisionen mit Orts-IDs).
pub const PARKING_MARKER_PREFIX: &str = "parking-";
/// Sentinel-ID des Routen-Start-Markers.
pub const ROUTE_START_MARKER_ID: &str = "route-start";
/// Sentinel-ID des Routen-Ziel-Markers.
pub const ROUTE_END_MARKER_ID: &str = "route-end";

/// Art eines Markers — steuert Icon, Groesse und Z-Ordnung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerKind {
    /// Aktueller Nutzerstandort (hoechstens einer pro Render-Zyklus)
    UserLocation,
    /// Regulaerer Treffer
    Default,
    /// Aktuell selektierter Treffer
    Selected,
    /// Startpunkt einer Route
    RouteStart,
    /// Zielpunkt einer Route
    RouteEnd,
}

/// Beschriftung fuer Hover- und Klick-Overlays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerLabel {
    /// Haupttitel (Orts- oder Parkplatzname)
    pub title: String,
    /// Untertitel (Kategorie bzw. Gebuehren-Info)
    pub subtitle: String,
}

/// Herkunft eines Markers.
///
/// Haelt die Ursprungs-Daten als Wert — die Deskriptoren werden pro
/// Render-Zyklus neu berechnet und nie persistiert, ein Klick loest
/// Details direkt ueber diese Relation auf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum MarkerSource {
    /// Nutzerstandort ohne Domaenen-Objekt
    UserLocation,
    /// Suchtreffer
    Place(SearchResult),
    /// Parkplatz
    ParkingLot(ParkingLot),
}

/// Render-fertiger Marker-Deskriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Stabile Identitaet innerhalb eines Render-Zyklus
    pub id: String,
    /// Kartenposition
    pub position: LatLng,
    /// Marker-Art
    pub kind: MarkerKind,
    /// Overlay-Beschriftung
    pub label: MarkerLabel,
    /// Ursprungs-Relation fuer Detail-Aufloesung
    pub source: MarkerSource,
}

impl Marker {
    /// Gibt `true` zurueck, wenn dies der Nutzerstandort-Marker ist.
    pub fn is_user_location(&self) -> bool {
        self.kind == MarkerKind::UserLocation
    }
}

/// Baut den Nutzerstandort-Marker.
fn user_location_marker(position: LatLng) -> Marker {
    Marker {
        id: USER_LOCATION_MARKER_ID.to_string(),
        position,
        kind: MarkerKind::UserLocation,
        label: MarkerLabel {
            title: USER_LOCATION_TITLE.to_string(),
            subtitle: String::new(),
        },
        source: MarkerSource::UserLocation,
    }
}

/// Konvertiert Suchtreffer in Marker-Deskriptoren.
///
/// Genau ein `UserLocation`-Marker wenn `user_location` gesetzt ist;
/// jeder Treffer wird zu genau einem Marker, `Selected` genau dann,
/// wenn seine ID `selected_id` entspricht.
pub fn search_results_to_markers(
    results: &[SearchResult],
    selected_id: Option<&str>,
    user_location: Option<LatLng>,
) -> Vec<Marker> {
    let mut markers = Vec::with_capacity(results.len() + 1);

    if let Some(position) = user_location {
        markers.push(user_location_marker(position));
    }

    for result in results {
        let kind = if selected_id == Some(result.place_id.as_str()) {
            MarkerKind::Selected
        } else {
            MarkerKind::Default
        };
        markers.push(Marker {
            id: result.place_id.clone(),
            position: LatLng::new(result.lat, result.lng),
            kind,
            label: MarkerLabel {
                title: result.place_name.clone(),
                subtitle: result.category_group_name.clone(),
            },
            source: MarkerSource::Place(result.clone()),
        });
    }

    markers
}

/// Konvertiert Parkplaetze in Marker-Deskriptoren.
///
/// Parkplatz-IDs werden mit [`PARKING_MARKER_PREFIX`] versehen, damit
/// sie im gemeinsamen Marker-Namensraum eindeutig bleiben.
pub fn parking_lots_to_markers(
    lots: &[ParkingLot],
    selected_id: Option<i64>,
    user_location: Option<LatLng>,
) -> Vec<Marker> {
    let mut markers = Vec::with_capacity(lots.len() + 1);

    if let Some(position) = user_location {
        markers.push(user_location_marker(position));
    }

    for lot in lots {
        let kind = if selected_id == Some(lot.id) {
            MarkerKind::Selected
        } else {
            MarkerKind::Default
        };
        markers.push(Marker {
            id: format!("{}{}", PARKING_MARKER_PREFIX, lot.id),
            position: LatLng::new(lot.lat, lot.lng),
            kind,
            label: MarkerLabel {
                title: lot.parking_lot_name.clone(),
                subtitle: lot.fee_info.clone(),
            },
            source: MarkerSource::ParkingLot(lot.clone()),
        });
    }

    markers
}
