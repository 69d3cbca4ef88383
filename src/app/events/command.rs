use crate::core::{LatLng, Marker, RouteResult, SearchResult};

/// Commands sind mutierende Schritte, die zentral ausgefuehrt werden.
///
/// Jeder Command aktualisiert den Sync-Zustand und gibt die noetigen
/// [`crate::adapter::AdapterCommand`]s an die aktive Karten-Variante.
#[derive(Debug, Clone)]
pub enum MapCommand {
    /// Karte ueber den aktiven Adapter erstellen
    Initialize { center: LatLng },
    /// Uebergang nach Ready: ausstehende Marker/Route anwenden
    MarkReady,
    /// Kartenmittelpunkt anwenden
    ApplyCenter { center: LatLng },
    /// Marker-Satz abgleichen und rendern
    ApplyMarkers { markers: Vec<Marker> },
    /// Route zeichnen bzw. entfernen (Clear passiert immer zuerst)
    ApplyRoute { route: Option<RouteResult> },
    /// Info-Fenster fuer einen Ort oeffnen
    ShowInfoOverlay { place_id: String, position: LatLng },
    /// Info-Fenster schliessen
    HideInfoOverlay,
    /// Hover-Label fuer einen Marker zeigen
    ShowHoverOverlay { id: String },
    /// Hover-Label eines Markers schliessen
    HideHoverOverlay { id: String },
    /// Offenes Hover-Label zum persistenten Overlay befoerdern
    PromoteHoverOverlay { id: String },
    /// Stufenweisen Level-Reset starten
    BeginLevelReset { target: i32 },
    /// Ein Schritt der stufenweisen Level-Anpassung
    LevelStep { target: i32, generation: u64 },
    /// Letzten Marker-Satz erneut anwenden (nach Level-Aenderung)
    ResyncMarkers,
    /// Idle-Event verbuchen und debounced Meldung planen
    RecordIdle {
        center: LatLng,
        level: Option<i32>,
    },
    /// Debounced Idle-Meldung an den Host
    NotifyMapIdle { center: LatLng },
    /// Marker-Klick an den Host melden
    NotifyMarkerPressed {
        id: String,
        position: Option<LatLng>,
    },
    /// Routen-Ortswahl an den Host melden
    NotifyRouteSelected { place: SearchResult },
    /// Karte abbauen, alles Ausstehende stornieren
    Teardown,
}
