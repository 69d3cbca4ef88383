//! Vendor-Naht zum Kakao-Maps-SDK-Objektgraphen.
//!
//! Der Web-Adapter spricht das SDK ueber diesen Trait an. Die produktive
//! Implementierung bindet die JS-Objekte der gleichen Seite (Map,
//! MarkerClusterer, CustomOverlay, Polyline); [`crate::adapter::sim`]
//! stellt eine In-Memory-Variante fuer Tests und die Demo bereit.
//!
//! Event-Fluss: SDK-Events (Klick, Hover, Idle) werden von der
//! Implementierung an den Host gereicht und dort als `MapIntent` in den
//! Controller gespeist — der Trait selbst traegt keine Callbacks.

use crate::core::LatLng;
use crate::shared::MapOptions;

use super::{AdapterError, MarkerDraw, PolylineStyle};

/// Opakes Handle auf ein SDK-Objekt (Marker, Polyline, Overlay).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SdkHandle(pub u64);

/// Imperative Oberflaeche des Karten-SDKs.
pub trait KakaoMapSdk {
    /// Gibt `true` zurueck, wenn das SDK-Script fertig geladen ist.
    fn is_loaded(&self) -> bool;

    /// Erstellt die Karten-Instanz samt Clusterer.
    fn create_map(&mut self, center: LatLng, options: &MapOptions) -> Result<(), AdapterError>;

    /// Setzt den Kartenmittelpunkt hart.
    fn set_center(&mut self, center: LatLng);

    /// Bewegt die Karte animiert zum Ziel.
    fn pan_to(&mut self, center: LatLng);

    /// Liest den aktuellen Kartenmittelpunkt.
    fn center(&self) -> LatLng;

    /// Setzt das Karten-Level.
    fn set_level(&mut self, level: i32);

    /// Liest das aktuelle Karten-Level.
    fn level(&self) -> i32;

    /// Setzt einen Marker direkt auf die Karte (am Clusterer vorbei).
    fn place_marker(&mut self, draw: &MarkerDraw) -> SdkHandle;

    /// Fuegt Marker in einem Batch in den Clusterer ein.
    fn add_clustered_markers(&mut self, draws: &[MarkerDraw]) -> Vec<SdkHandle>;

    /// Leert den Clusterer.
    fn clear_clusterer(&mut self);

    /// Zeichnet eine Polyline.
    fn draw_polyline(&mut self, path: &[LatLng], style: &PolylineStyle) -> SdkHandle;

    /// Zeigt ein HTML-Overlay an einem Anker.
    fn show_overlay(&mut self, html: &str, anchor: LatLng, z_index: i32) -> SdkHandle;

    /// Entfernt ein einzelnes SDK-Objekt. Unbekannte Handles sind ein No-op.
    fn remove_object(&mut self, handle: SdkHandle);

    /// Passt den Viewport auf eine Punktmenge ein.
    fn fit_bounds(&mut self, points: &[LatLng]);
}
