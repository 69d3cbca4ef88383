//! Bridge-Variante: Karte in einer isolierten WebView.
//!
//! Host → Karte laeuft ueber injizierte JS-Snippets, Karte → Host ueber
//! JSON-Messages (siehe [`crate::adapter::message`]). Synchron in die
//! WebView hineinrufen geht nicht — deshalb werden hochfrequente
//! Befehlsgruppen (Marker-Satz, Route) am Host-Rand debounced: eine
//! ausstehende Injektion wird storniert und ersetzt, sobald innerhalb
//! des Fensters eine neuere eintrifft.
//!
//! Ein "Frame" ist die Skriptfolge einer logischen Aktualisierung.
//! `clearMarkers` bzw. `clearPolyline` eroeffnen einen neuen Frame und
//! verwerfen den alten — so ueberlebt von schnellen aufeinander
//! folgenden Marker-Saetzen genau der letzte.

use std::time::{Duration, Instant};

use crate::app::scheduler::{TimerHandle, TimerQueue};
use crate::core::{LatLng, ROUTE_END_MARKER_ID, ROUTE_START_MARKER_ID};
use crate::shared::MapOptions;

use super::{AdapterCommand, AdapterError, MapAdapter};

/// Senke fuer Skript-Injektionen in die WebView.
pub trait ScriptHost {
    /// Injiziert ein JS-Snippet in die Karten-Seite.
    fn inject(&mut self, script: &str) -> Result<(), AdapterError>;
}

/// Zuordnung eines Befehls zu seiner Debounce-Gruppe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandGroup {
    /// Marker-Frame (koalesziert)
    Markers,
    /// Routen-Frame (koalesziert)
    Route,
    /// Sofort injizieren
    Immediate,
}

/// Karten-Adapter fuer die Bridge-Variante.
pub struct BridgeMapAdapter<H: ScriptHost> {
    host: H,
    options: MapOptions,
    initialized: bool,
    ready: bool,
    disposed: bool,
    /// Skripte des ausstehenden Marker-Frames
    marker_frame: Vec<String>,
    /// Skripte des ausstehenden Routen-Frames
    route_frame: Vec<String>,
    /// Vor Ready aufgelaufene Sofort-Befehle
    pre_ready: Vec<String>,
    flush_timers: TimerQueue<()>,
    flush_handle: Option<TimerHandle>,
    /// Zuletzt per `map_idle` gemeldetes Level
    last_idle_level: Option<i32>,
}

impl<H: ScriptHost> BridgeMapAdapter<H> {
    /// Erstellt den Adapter ueber einer Injektions-Senke.
    pub fn new(host: H) -> Self {
        Self {
            host,
            options: MapOptions::default(),
            initialized: false,
            ready: false,
            disposed: false,
            marker_frame: Vec::new(),
            route_frame: Vec::new(),
            pre_ready: Vec::new(),
            flush_timers: TimerQueue::new(),
            flush_handle: None,
            last_idle_level: None,
        }
    }

    /// Zugriff auf die Injektions-Senke (Tests, Demo).
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Merkt sich das zuletzt per `map_idle` gemeldete Level.
    ///
    /// Die Host-Verdrahtung ruft das beim Eintreffen der Message —
    /// der Adapter selbst sieht den Message-Strom nicht.
    pub fn note_idle(&mut self, level: Option<i32>) {
        if level.is_some() {
            self.last_idle_level = level;
        }
    }

    fn group_for(command: &AdapterCommand) -> CommandGroup {
        match command {
            AdapterCommand::ClearMarkers
            | AdapterCommand::SetClusteredMarkers { .. } => CommandGroup::Markers,
            AdapterCommand::UpsertMarker { marker } => {
                if is_route_marker(&marker.id) {
                    CommandGroup::Route
                } else {
                    CommandGroup::Markers
                }
            }
            AdapterCommand::RemoveMarker { id } => {
                if is_route_marker(id) {
                    CommandGroup::Route
                } else {
                    CommandGroup::Markers
                }
            }
            AdapterCommand::DrawPolyline { .. }
            | AdapterCommand::ClearPolyline
            | AdapterCommand::FitBounds { .. } => CommandGroup::Route,
            AdapterCommand::SetCenter { .. }
            | AdapterCommand::SetLevel { .. }
            | AdapterCommand::ShowOverlay { .. }
            | AdapterCommand::HideOverlay { .. } => CommandGroup::Immediate,
        }
    }

    /// Eroeffnet ein Clear-Befehl einen neuen Frame?
    fn starts_new_frame(command: &AdapterCommand) -> bool {
        matches!(
            command,
            AdapterCommand::ClearMarkers | AdapterCommand::ClearPolyline
        )
    }

    fn reschedule_flush(&mut self, now: Instant) {
        if let Some(handle) = self.flush_handle.take() {
            self.flush_timers.cancel(handle);
        }
        let delay = Duration::from_millis(self.options.bridge_debounce_ms);
        self.flush_handle = Some(self.flush_timers.schedule(now, delay, ()));
    }

    fn flush_frames(&mut self) -> Result<(), AdapterError> {
        self.flush_handle = None;
        if self.marker_frame.is_empty() && self.route_frame.is_empty() {
            return Ok(());
        }
        let mut scripts = Vec::new();
        scripts.append(&mut self.marker_frame);
        scripts.append(&mut self.route_frame);
        let snippet = scripts.join("\n");
        log::debug!("Bridge-Flush: {} Skriptzeile(n)", snippet.lines().count());
        self.host.inject(&snippet)
    }
}

/// Gehoert eine Marker-ID zum Routen-Frame?
fn is_route_marker(id: &str) -> bool {
    id == ROUTE_START_MARKER_ID || id == ROUTE_END_MARKER_ID
}

/// Serialisiert einen Befehl als Aufruf der Seiten-Funktionen.
///
/// Die Guards sitzen in den Seiten-Funktionen selbst; das Snippet
/// prueft zusaetzlich deren Existenz, weil Injektion die Seiten-
/// Initialisierung ueberholen kann.
fn command_script(command: &AdapterCommand) -> Result<String, AdapterError> {
    let call = match command {
        AdapterCommand::SetCenter { center } => {
            format!("setCenter({}, {});", center.lat, center.lng)
        }
        AdapterCommand::SetLevel { level } => format!("setLevel({});", level),
        AdapterCommand::ClearMarkers => "clearMarkers();".to_string(),
        AdapterCommand::UpsertMarker { marker } => {
            format!("upsertMarker({});", serde_json::to_string(marker)?)
        }
        AdapterCommand::RemoveMarker { id } => {
            format!("removeMarker({});", serde_json::to_string(id)?)
        }
        AdapterCommand::SetClusteredMarkers { markers } => {
            format!("setClusteredMarkers({});", serde_json::to_string(markers)?)
        }
        AdapterCommand::DrawPolyline { path, style } => format!(
            "drawPolyline({}, {});",
            serde_json::to_string(path)?,
            serde_json::to_string(style)?
        ),
        AdapterCommand::ClearPolyline => "clearPolyline();".to_string(),
        AdapterCommand::ShowOverlay {
            id,
            html,
            anchor,
            z_index,
        } => format!(
            "showOverlay({}, {}, {}, {}, {});",
            serde_json::to_string(id)?,
            serde_json::to_string(html)?,
            anchor.lat,
            anchor.lng,
            z_index
        ),
        AdapterCommand::HideOverlay { id } => {
            format!("hideOverlay({});", serde_json::to_string(id)?)
        }
        AdapterCommand::FitBounds { points } => {
            format!("fitBounds({});", serde_json::to_string(points)?)
        }
    };

    let function = call
        .split('(')
        .next()
        .unwrap_or_default();
    Ok(format!(
        "if (typeof {function} === 'function') {{ {call} }} true;"
    ))
}

impl<H: ScriptHost> MapAdapter for BridgeMapAdapter<H> {
    fn initialize(&mut self, center: LatLng, options: &MapOptions) -> Result<bool, AdapterError> {
        self.options = options.clone();
        self.disposed = false;
        if self.initialized {
            return Ok(self.ready);
        }

        // Bootstrap: SDK asynchron laden, Karte erstellen, Bereitschaft melden.
        // Mehrfach-Injektion ist gefahrlos (initMap prueft auf bestehende Karte).
        let bootstrap = format!(
            "if (typeof kakao !== 'undefined' && kakao.maps) {{\n\
             \x20 kakao.maps.load(function () {{\n\
             \x20   if (typeof initMap === 'function') {{ initMap({lat}, {lng}, {level}, {max_level}, {cluster_min}); }}\n\
             \x20   window.ReactNativeWebView.postMessage(JSON.stringify({{ type: 'map_api_ready' }}));\n\
             \x20 }});\n\
             }} else {{\n\
             \x20 window.ReactNativeWebView.postMessage(JSON.stringify({{ type: 'error', message: 'Kakao Maps SDK not available' }}));\n\
             }} true;",
            lat = center.lat,
            lng = center.lng,
            level = options.initial_level,
            max_level = options.max_level,
            cluster_min = options.cluster_min_level,
        );
        self.host.inject(&bootstrap)?;
        self.initialized = true;
        log::info!("Bridge-Bootstrap injiziert, warte auf map_api_ready");
        Ok(false)
    }

    fn notify_ready(&mut self) {
        if self.ready || self.disposed {
            return;
        }
        self.ready = true;
        log::info!("Karten-Seite bereit, flushe aufgelaufene Befehle");

        if !self.pre_ready.is_empty() {
            let snippet = std::mem::take(&mut self.pre_ready).join("\n");
            if let Err(e) = self.host.inject(&snippet) {
                log::warn!("Flush der Vor-Ready-Befehle fehlgeschlagen: {}", e);
            }
        }
        if let Some(handle) = self.flush_handle.take() {
            self.flush_timers.cancel(handle);
        }
        if let Err(e) = self.flush_frames() {
            log::warn!("Frame-Flush nach Ready fehlgeschlagen: {}", e);
        }
    }

    fn apply(&mut self, now: Instant, command: &AdapterCommand) -> Result<(), AdapterError> {
        if self.disposed {
            return Err(AdapterError::MapUnavailable(
                "Bridge bereits abgebaut".to_string(),
            ));
        }

        let script = command_script(command)?;
        match Self::group_for(command) {
            CommandGroup::Markers => {
                if Self::starts_new_frame(command) {
                    // Neuer Marker-Satz ersetzt den ausstehenden komplett
                    self.marker_frame.clear();
                }
                self.marker_frame.push(script);
                if self.ready {
                    self.reschedule_flush(now);
                }
            }
            CommandGroup::Route => {
                if Self::starts_new_frame(command) {
                    self.route_frame.clear();
                }
                self.route_frame.push(script);
                if self.ready {
                    self.reschedule_flush(now);
                }
            }
            CommandGroup::Immediate => {
                if self.ready {
                    self.host.inject(&script)?;
                } else {
                    self.pre_ready.push(script);
                }
            }
        }
        Ok(())
    }

    fn pump(&mut self, now: Instant) -> Result<(), AdapterError> {
        if self.disposed {
            return Ok(());
        }
        if !self.flush_timers.pump(now).is_empty() {
            self.flush_frames()?;
        }
        Ok(())
    }

    fn level(&self) -> Option<i32> {
        self.last_idle_level
    }

    fn dispose(&mut self) {
        // Keine Injektion nach Teardown
        self.flush_timers.clear();
        self.flush_handle = None;
        self.marker_frame.clear();
        self.route_frame.clear();
        self.pre_ready.clear();
        self.ready = false;
        self.initialized = false;
        self.disposed = true;
    }
}
