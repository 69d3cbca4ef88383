//! Adapter-Schicht: die einzige Naht zwischen Controller und Karte.
//!
//! Der Controller kennt ausschliesslich [`MapAdapter`] und
//! [`AdapterCommand`] — ob die Karte im selben Prozess (Web) oder in
//! einer isolierten WebView (Bridge) lebt, entscheidet allein die beim
//! Konstruieren gewaehlte Implementierung.

pub mod bridge;
pub mod message;
pub mod page;
pub mod recording;
pub mod sdk;
pub mod sim;
pub mod web;

use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{LatLng, MarkerLabel, MarkerSource};
use crate::shared::{MapOptions, MarkerStyle};

pub use bridge::{BridgeMapAdapter, ScriptHost};
pub use message::{parse_message, BridgeMessage};
pub use recording::RecordingAdapter;
pub use sdk::{KakaoMapSdk, SdkHandle};
pub use sim::SimulatedSdk;
pub use web::WebMapAdapter;

/// Render-fertige Marker-Daten fuer die Adapter-Seite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerDraw {
    /// Marker-Identitaet
    pub id: String,
    /// Kartenposition
    pub position: LatLng,
    /// Aufgeloestes Icon inkl. Z-Ordnung
    pub style: MarkerStyle,
    /// Beschriftung fuer Hover-Overlays
    pub label: MarkerLabel,
    /// Ursprungs-Relation (None bei Routen-Markern)
    pub source: Option<MarkerSource>,
}

/// Linien-Stil einer Polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylineStyle {
    /// Linienstaerke in Pixeln
    pub weight: f64,
    /// Linienfarbe als CSS-Farbwert
    pub color: String,
    /// Deckkraft (0.0 bis 1.0)
    pub opacity: f64,
    /// Z-Ordnung (unterhalb der Marker)
    pub z_index: i32,
}

/// Die vollstaendige Befehls-Naht zwischen Controller und Karte.
///
/// Mehr Operationen gibt es nicht — neue Faehigkeiten der Karte muessen
/// hier landen, nicht als Seitentuer an einer Adapter-Implementierung.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterCommand {
    /// Kartenmittelpunkt setzen
    SetCenter { center: LatLng },
    /// Karten-Level setzen
    SetLevel { level: i32 },
    /// Alle geclusterten Marker entfernen
    ClearMarkers,
    /// Einzelnen Marker direkt auf der Karte setzen/ersetzen
    UpsertMarker { marker: MarkerDraw },
    /// Einzelnen Marker entfernen (unbekannte ID = No-op)
    RemoveMarker { id: String },
    /// Geclusterte Marker in einem Batch setzen
    SetClusteredMarkers { markers: Vec<MarkerDraw> },
    /// Routen-Polyline zeichnen
    DrawPolyline {
        path: Vec<LatLng>,
        style: PolylineStyle,
    },
    /// Routen-Polyline entfernen
    ClearPolyline,
    /// Overlay an einem Anker anzeigen
    ShowOverlay {
        id: String,
        html: String,
        anchor: LatLng,
        z_index: i32,
    },
    /// Overlay ausblenden (unbekannte ID = No-op)
    HideOverlay { id: String },
    /// Viewport auf eine Punktmenge einpassen
    FitBounds { points: Vec<LatLng> },
}

/// Fehler der Adapter-Schicht.
///
/// Wird an der Controller-Grenze gefangen und degradiert zum No-op —
/// kein Adapter-Fehler erreicht den Host als Panic oder Propagation.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Karten-SDK (noch) nicht geladen oder Karte nicht erstellt
    #[error("Karten-SDK nicht verfuegbar: {0}")]
    MapUnavailable(String),
    /// Script-Injektion in die WebView fehlgeschlagen
    #[error("Script-Injektion fehlgeschlagen: {0}")]
    Injection(String),
    /// Befehls-Payload liess sich nicht serialisieren
    #[error("Serialisierung fehlgeschlagen: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Gemeinsamer Vertrag beider Karten-Varianten.
pub trait MapAdapter {
    /// Erstellt die Karte. Gibt `true` zurueck, wenn sie sofort
    /// benutzbar ist (Web), `false` wenn die Bereitschaft asynchron
    /// gemeldet wird (Bridge: `map_api_ready`).
    fn initialize(&mut self, center: LatLng, options: &MapOptions) -> Result<bool, AdapterError>;

    /// Meldet die asynchron eingetroffene Bereitschaft der Karte.
    fn notify_ready(&mut self);

    /// Fuehrt einen Befehl aus bzw. plant ihn (Bridge-Debounce).
    fn apply(&mut self, now: Instant, command: &AdapterCommand) -> Result<(), AdapterError>;

    /// Treibt interne Timer voran (Debounce-Flush, Zentrums-Bestaetigung).
    fn pump(&mut self, now: Instant) -> Result<(), AdapterError>;

    /// Aktuelles Karten-Level, sofern bekannt.
    ///
    /// Web liest live aus dem SDK; Bridge liefert den zuletzt per
    /// `map_idle` gemeldeten Stand.
    fn level(&self) -> Option<i32>;

    /// Baut die Karte ab und storniert alles Ausstehende.
    fn dispose(&mut self);
}
