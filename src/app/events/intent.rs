use crate::core::{LatLng, Marker, RouteResult, SearchResult};

/// Eingaben in den Controller ohne direkte Mutationslogik.
///
/// Deklarative Prop-Aenderungen des Hosts und Events der aktiven
/// Karten-Variante laufen hier zusammen; das Intent->Command-Mapping
/// macht daraus die minimale Befehlsfolge.
#[derive(Debug, Clone)]
pub enum MapIntent {
    /// Karten-View wurde gemountet (Host ruft erst bei geladenem SDK-Signal)
    MapViewMounted { center: LatLng },
    /// SDK meldet Bereitschaft (Bridge: `map_api_ready`)
    SdkReady,
    /// Gewuenschter Kartenmittelpunkt hat sich geaendert
    CenterChanged { center: LatLng },
    /// Upstream-Markerliste hat sich geaendert
    MarkersChanged { markers: Vec<Marker> },
    /// Routenergebnis gesetzt oder entfernt
    RouteChanged { route: Option<RouteResult> },
    /// Info-Fenster-Zustand aus dem Selektions-Store
    InfoWindowChanged {
        visible: bool,
        place_id: Option<String>,
        position: Option<LatLng>,
    },
    /// Maus ist ueber einen Marker gefahren
    MarkerHoverStarted { id: String },
    /// Maus hat einen Marker verlassen
    MarkerHoverEnded { id: String },
    /// Marker wurde angeklickt/angetippt
    MarkerPressed {
        id: String,
        position: Option<LatLng>,
    },
    /// Karte kam nach Pan/Zoom zur Ruhe
    MapIdled {
        center: LatLng,
        level: Option<i32>,
    },
    /// Nutzer hat einen Ort als Routen-Start/-Ziel gewaehlt
    RoutePlaceSelected { place: SearchResult },
    /// Reset des Karten-Levels angefordert
    LevelResetRequested,
    /// Karten-View wird abgebaut
    MapViewUnmounted,
}
