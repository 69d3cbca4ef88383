//! In-Memory-SDK fuer Tests und die Demo-Binary.
//!
//! Bildet den Objektgraphen des echten SDKs nach (Karte, Clusterer,
//! Einzelobjekte) und kann dessen bekannte Macke nachstellen: ein
//! `set_center` direkt nach dem Erstellen der Karte verpufft.

use indexmap::IndexMap;

use crate::core::LatLng;
use crate::shared::MapOptions;

use super::sdk::{KakaoMapSdk, SdkHandle};
use super::{AdapterError, MarkerDraw, PolylineStyle};

/// Art eines simulierten SDK-Objekts.
#[derive(Debug, Clone, PartialEq)]
pub enum SimObject {
    /// Direkt gesetzter Marker
    Marker(MarkerDraw),
    /// Polyline mit Pfad und Stil
    Polyline {
        path: Vec<LatLng>,
        style: PolylineStyle,
    },
    /// HTML-Overlay
    Overlay {
        html: String,
        anchor: LatLng,
        z_index: i32,
    },
}

/// Simuliertes Karten-SDK.
pub struct SimulatedSdk {
    loaded: bool,
    created: bool,
    center: LatLng,
    level: i32,
    next_handle: u64,
    /// Einzelobjekte direkt auf der Karte
    objects: IndexMap<SdkHandle, SimObject>,
    /// Marker im Clusterer
    clustered: Vec<MarkerDraw>,
    /// Macke des echten SDKs: erster `set_center` nach `create_map` verpufft
    drop_first_set_center: bool,
    set_center_calls: u32,
}

impl SimulatedSdk {
    /// Erstellt ein geladenes SDK ohne Macken.
    pub fn new() -> Self {
        Self {
            loaded: true,
            created: false,
            center: LatLng::new(0.0, 0.0),
            level: 0,
            next_handle: 0,
            objects: IndexMap::new(),
            clustered: Vec::new(),
            drop_first_set_center: false,
            set_center_calls: 0,
        }
    }

    /// Markiert das SDK als (nicht) geladen.
    pub fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded;
    }

    /// Aktiviert die Verschluck-Macke fuer den ersten `set_center`.
    pub fn drop_first_set_center(&mut self) {
        self.drop_first_set_center = true;
    }

    /// Anzahl direkt gesetzter Einzelobjekte.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Anzahl Marker im Clusterer.
    pub fn clustered_count(&self) -> usize {
        self.clustered.len()
    }

    /// Gibt `true` zurueck, wenn eine Polyline auf der Karte liegt.
    pub fn has_polyline(&self) -> bool {
        self.objects
            .values()
            .any(|o| matches!(o, SimObject::Polyline { .. }))
    }

    /// Alle sichtbaren Overlays.
    pub fn overlays(&self) -> Vec<&SimObject> {
        self.objects
            .values()
            .filter(|o| matches!(o, SimObject::Overlay { .. }))
            .collect()
    }

    /// Direkt gesetzte Marker (nicht geclustert).
    pub fn direct_markers(&self) -> Vec<&MarkerDraw> {
        self.objects
            .values()
            .filter_map(|o| match o {
                SimObject::Marker(draw) => Some(draw),
                _ => None,
            })
            .collect()
    }

    /// Anzahl bisheriger `set_center`-Aufrufe.
    pub fn set_center_calls(&self) -> u32 {
        self.set_center_calls
    }

    fn alloc_handle(&mut self) -> SdkHandle {
        self.next_handle += 1;
        SdkHandle(self.next_handle)
    }
}

impl Default for SimulatedSdk {
    fn default() -> Self {
        Self::new()
    }
}

impl KakaoMapSdk for SimulatedSdk {
    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn create_map(&mut self, center: LatLng, options: &MapOptions) -> Result<(), AdapterError> {
        if !self.loaded {
            return Err(AdapterError::MapUnavailable(
                "SDK-Script nicht geladen".to_string(),
            ));
        }
        self.created = true;
        self.center = center;
        self.level = options.initial_level;
        Ok(())
    }

    fn set_center(&mut self, center: LatLng) {
        self.set_center_calls += 1;
        if self.drop_first_set_center && self.set_center_calls == 1 {
            // Race im echten SDK: der erste Aufruf nach create_map verpufft
            return;
        }
        self.center = center;
    }

    fn pan_to(&mut self, center: LatLng) {
        self.center = center;
    }

    fn center(&self) -> LatLng {
        self.center
    }

    fn set_level(&mut self, level: i32) {
        self.level = level;
    }

    fn level(&self) -> i32 {
        self.level
    }

    fn place_marker(&mut self, draw: &MarkerDraw) -> SdkHandle {
        let handle = self.alloc_handle();
        self.objects.insert(handle, SimObject::Marker(draw.clone()));
        handle
    }

    fn add_clustered_markers(&mut self, draws: &[MarkerDraw]) -> Vec<SdkHandle> {
        self.clustered.extend(draws.iter().cloned());
        draws.iter().map(|_| self.alloc_handle()).collect()
    }

    fn clear_clusterer(&mut self) {
        self.clustered.clear();
    }

    fn draw_polyline(&mut self, path: &[LatLng], style: &PolylineStyle) -> SdkHandle {
        let handle = self.alloc_handle();
        self.objects.insert(
            handle,
            SimObject::Polyline {
                path: path.to_vec(),
                style: style.clone(),
            },
        );
        handle
    }

    fn show_overlay(&mut self, html: &str, anchor: LatLng, z_index: i32) -> SdkHandle {
        let handle = self.alloc_handle();
        self.objects.insert(
            handle,
            SimObject::Overlay {
                html: html.to_string(),
                anchor,
                z_index,
            },
        );
        handle
    }

    fn remove_object(&mut self, handle: SdkHandle) {
        self.objects.shift_remove(&handle);
    }

    fn fit_bounds(&mut self, points: &[LatLng]) {
        if let Some(bounds) = crate::core::LatLngBounds::from_points(points) {
            self.center = bounds.center();
        }
    }
}
