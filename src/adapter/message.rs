//! Eingehende Bridge-Messages (Karte → Host).
//!
//! Die Karten-Seite postet JSON-Objekte mit `type`-Diskriminator.
//! Defensives Parsen: fehlerhaftes JSON und unvollstaendige Payloads
//! werden geloggt und verworfen — nie geworfen.

use serde::Deserialize;

use crate::app::events::MapIntent;
use crate::core::{LatLng, SearchResult};

/// Payload der `route_selected`-Message.
///
/// Die Karten-Seite benennt Koordinaten als `latitude`/`longitude` und
/// die Kategorie als `category` — erst die Konvertierung in
/// [`SearchResult`] glaettet das.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSelectedPayload {
    pub place_id: String,
    pub place_name: String,
    #[serde(default)]
    pub road_address: String,
    #[serde(default)]
    pub lot_address: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub place_url: String,
    #[serde(default)]
    pub distance: f64,
}

impl RouteSelectedPayload {
    /// Konvertiert in den Domaenen-Typ des Such-Providers.
    pub fn into_search_result(self) -> SearchResult {
        SearchResult {
            place_id: self.place_id,
            place_name: self.place_name,
            road_address: self.road_address,
            road_address_dong: String::new(),
            lot_address: self.lot_address,
            lat: self.latitude,
            lng: self.longitude,
            phone: self.phone,
            category_group_name: self.category,
            place_url: self.place_url,
            distance: self.distance,
        }
    }
}

/// Erkannte Message-Typen der Karten-Seite.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeMessage {
    /// SDK in der WebView fertig geladen
    MapApiReady,
    /// Karte kam nach Pan/Zoom zur Ruhe
    MapIdle {
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        level: Option<i32>,
    },
    /// Marker wurde angetippt
    MarkerPress {
        id: String,
        #[serde(default)]
        latitude: Option<f64>,
        #[serde(default)]
        longitude: Option<f64>,
    },
    /// Nutzer hat im Overlay eine Routen-Aktion gewaehlt
    RouteSelected(RouteSelectedPayload),
    /// Fehler auf der Karten-Seite
    Error { message: String },
}

impl BridgeMessage {
    /// Uebersetzt die Message in einen Controller-Intent.
    ///
    /// `error` wird nur geloggt — die Karten-Seite darf den Host nie
    /// zum Absturz bringen.
    pub fn into_intent(self) -> Option<MapIntent> {
        match self {
            BridgeMessage::MapApiReady => Some(MapIntent::SdkReady),
            BridgeMessage::MapIdle {
                latitude,
                longitude,
                level,
            } => Some(MapIntent::MapIdled {
                center: LatLng::new(latitude, longitude),
                level,
            }),
            BridgeMessage::MarkerPress {
                id,
                latitude,
                longitude,
            } => {
                let position = match (latitude, longitude) {
                    (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)),
                    _ => None,
                };
                Some(MapIntent::MarkerPressed { id, position })
            }
            BridgeMessage::RouteSelected(payload) => Some(MapIntent::RoutePlaceSelected {
                place: payload.into_search_result(),
            }),
            BridgeMessage::Error { message } => {
                log::error!("Fehler auf der Karten-Seite: {}", message);
                None
            }
        }
    }
}

/// Parst eine rohe Bridge-Message. `None` bei Mist auf der Leitung.
pub fn parse_message(raw: &str) -> Option<BridgeMessage> {
    match serde_json::from_str::<BridgeMessage>(raw) {
        Ok(message) => Some(message),
        Err(e) => {
            log::warn!("Bridge-Message verworfen: {} (Payload: {:.80})", e, raw);
            None
        }
    }
}
