//! Web-Variante: direkte imperative Bindung an das Karten-SDK.
//!
//! Alle SDK-Objekte werden als Handles in expliziten Slots gehalten —
//! "noch nicht erstellt" ist ein Zustand des Adapters, keine verteilte
//! Null-Pruefung.
//!
//! Zentrums-Setzen folgt dem Set-then-Confirm-Muster: sofort setzen,
//! nach kurzer Verzoegerung den tatsaechlichen Mittelpunkt pruefen und
//! bei Abweichung mit `pan_to` nachsetzen. Das SDK verschluckt auf
//! frisch erstellten Karten gelegentlich den ersten Zentrums-Aufruf;
//! der Nachsetz-Zyklus ist durch ein Versuchs-Budget begrenzt und gibt
//! danach mit Log-Warnung auf statt endlos zu pollen.

use std::time::{Duration, Instant};

use indexmap::IndexMap;

use crate::app::scheduler::{TimerHandle, TimerQueue};
use crate::core::LatLng;
use crate::shared::options::CENTER_EPSILON_DEG;
use crate::shared::MapOptions;

use super::sdk::{KakaoMapSdk, SdkHandle};
use super::{AdapterCommand, AdapterError, MapAdapter};

/// Geplante Zentrums-Bestaetigung.
#[derive(Debug, Clone, Copy)]
struct CenterConfirm {
    target: LatLng,
    attempt: u32,
}

/// Karten-Adapter fuer die Web-Variante (SDK im selben Prozess).
pub struct WebMapAdapter<S: KakaoMapSdk> {
    sdk: S,
    options: MapOptions,
    created: bool,
    /// Direkt gesetzte Marker (Nutzerstandort, Routen-Marker) nach ID
    direct_markers: IndexMap<String, SdkHandle>,
    /// Handles der aktuell geclusterten Marker
    clustered: Vec<SdkHandle>,
    /// Aktive Routen-Polyline
    polyline: Option<SdkHandle>,
    /// Sichtbare Overlays nach ID
    overlays: IndexMap<String, SdkHandle>,
    confirm_timers: TimerQueue<CenterConfirm>,
    confirm_handle: Option<TimerHandle>,
}

impl<S: KakaoMapSdk> WebMapAdapter<S> {
    /// Erstellt den Adapter ueber einer SDK-Bindung.
    pub fn new(sdk: S) -> Self {
        Self {
            sdk,
            options: MapOptions::default(),
            created: false,
            direct_markers: IndexMap::new(),
            clustered: Vec::new(),
            polyline: None,
            overlays: IndexMap::new(),
            confirm_timers: TimerQueue::new(),
            confirm_handle: None,
        }
    }

    /// Zugriff auf die SDK-Bindung (Tests, Demo).
    pub fn sdk(&self) -> &S {
        &self.sdk
    }

    fn ensure_created(&self) -> Result<(), AdapterError> {
        if self.created {
            Ok(())
        } else {
            Err(AdapterError::MapUnavailable(
                "Karte noch nicht erstellt".to_string(),
            ))
        }
    }

    fn schedule_confirm(&mut self, now: Instant, target: LatLng, attempt: u32) {
        if let Some(handle) = self.confirm_handle.take() {
            self.confirm_timers.cancel(handle);
        }
        let delay = Duration::from_millis(self.options.center_confirm_delay_ms);
        self.confirm_handle =
            Some(self.confirm_timers.schedule(now, delay, CenterConfirm { target, attempt }));
    }
}

impl<S: KakaoMapSdk> MapAdapter for WebMapAdapter<S> {
    fn initialize(&mut self, center: LatLng, options: &MapOptions) -> Result<bool, AdapterError> {
        if !self.sdk.is_loaded() {
            return Err(AdapterError::MapUnavailable(
                "SDK-Script nicht geladen".to_string(),
            ));
        }
        if self.created {
            // Doppelte Erstellung aus Re-Renders abfangen
            return Ok(true);
        }
        self.options = options.clone();
        self.sdk.create_map(center, options)?;
        self.created = true;
        log::info!(
            "Karte erstellt (Level {}, Zentrum {:.5}/{:.5})",
            options.initial_level,
            center.lat,
            center.lng
        );
        Ok(true)
    }

    fn notify_ready(&mut self) {
        // Web-Variante ist nach initialize sofort bereit
    }

    fn apply(&mut self, now: Instant, command: &AdapterCommand) -> Result<(), AdapterError> {
        self.ensure_created()?;

        match command {
            AdapterCommand::SetCenter { center } => {
                self.sdk.set_center(*center);
                self.schedule_confirm(now, *center, 1);
            }
            AdapterCommand::SetLevel { level } => {
                self.sdk.set_level(*level);
            }
            AdapterCommand::ClearMarkers => {
                self.sdk.clear_clusterer();
                self.clustered.clear();
            }
            AdapterCommand::UpsertMarker { marker } => {
                if let Some(old) = self.direct_markers.shift_remove(&marker.id) {
                    self.sdk.remove_object(old);
                }
                let handle = self.sdk.place_marker(marker);
                self.direct_markers.insert(marker.id.clone(), handle);
            }
            AdapterCommand::RemoveMarker { id } => {
                // Unbekannte ID ist ein No-op
                if let Some(handle) = self.direct_markers.shift_remove(id) {
                    self.sdk.remove_object(handle);
                }
            }
            AdapterCommand::SetClusteredMarkers { markers } => {
                self.clustered = self.sdk.add_clustered_markers(markers);
            }
            AdapterCommand::DrawPolyline { path, style } => {
                if let Some(old) = self.polyline.take() {
                    self.sdk.remove_object(old);
                }
                self.polyline = Some(self.sdk.draw_polyline(path, style));
            }
            AdapterCommand::ClearPolyline => {
                if let Some(handle) = self.polyline.take() {
                    self.sdk.remove_object(handle);
                }
            }
            AdapterCommand::ShowOverlay {
                id,
                html,
                anchor,
                z_index,
            } => {
                if let Some(old) = self.overlays.shift_remove(id) {
                    self.sdk.remove_object(old);
                }
                let handle = self.sdk.show_overlay(html, *anchor, *z_index);
                self.overlays.insert(id.clone(), handle);
            }
            AdapterCommand::HideOverlay { id } => {
                if let Some(handle) = self.overlays.shift_remove(id) {
                    self.sdk.remove_object(handle);
                }
            }
            AdapterCommand::FitBounds { points } => {
                self.sdk.fit_bounds(points);
            }
        }

        Ok(())
    }

    fn pump(&mut self, now: Instant) -> Result<(), AdapterError> {
        for confirm in self.confirm_timers.pump(now) {
            self.confirm_handle = None;
            if self
                .sdk
                .center()
                .approx_eq(confirm.target, CENTER_EPSILON_DEG)
            {
                log::debug!(
                    "Zentrum bestaetigt nach {} Versuch(en)",
                    confirm.attempt
                );
                continue;
            }
            if confirm.attempt >= self.options.center_confirm_retries {
                log::warn!(
                    "Zentrum nicht angekommen nach {} Versuchen, gebe auf",
                    confirm.attempt
                );
                continue;
            }
            self.sdk.pan_to(confirm.target);
            self.schedule_confirm(now, confirm.target, confirm.attempt + 1);
        }
        Ok(())
    }

    fn level(&self) -> Option<i32> {
        self.created.then(|| self.sdk.level())
    }

    fn dispose(&mut self) {
        self.confirm_timers.clear();
        self.confirm_handle = None;
        self.direct_markers.clear();
        self.clustered.clear();
        self.polyline = None;
        self.overlays.clear();
        self.created = false;
    }
}
