//! Zentrale Konfiguration der Map-Synchronisation.
//!
//! `MapOptions` enthaelt alle zur Laufzeit aenderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Karten-Level ────────────────────────────────────────────────────

/// Start-Level beim Erstellen der Karte (kleiner = naeher dran).
pub const MAP_INITIAL_LEVEL: i32 = 4;
/// Maximal erlaubtes Level der Karte.
pub const MAP_MAX_LEVEL: i32 = 13;
/// Ziel-Level beim Sprung zum Nutzerstandort bzw. Level-Reset.
pub const CURRENT_LOCATION_LEVEL: i32 = 4;
/// Ab diesem Level gruppiert der Clusterer Marker.
pub const CLUSTER_MIN_LEVEL: i32 = 7;
/// Verzoegerung zwischen zwei Schritten der stufenweisen Level-Anpassung.
pub const LEVEL_STEP_DELAY_MS: u64 = 100;

// ── Zentrums-Setzen ────────────────────────────────────────────────

/// Verzoegerung bis zur Bestaetigung eines gesetzten Zentrums.
pub const CENTER_CONFIRM_DELAY_MS: u64 = 50;
/// Maximale Nachsetz-Versuche bevor aufgegeben wird.
pub const CENTER_CONFIRM_RETRIES: u32 = 3;
/// Toleranz in Grad, ab der ein Zentrum als angekommen gilt.
pub const CENTER_EPSILON_DEG: f64 = 1e-6;

// ── Bridge ─────────────────────────────────────────────────────────

/// Debounce-Fenster fuer hochfrequente Bridge-Injektionen (Marker, Route).
pub const BRIDGE_DEBOUNCE_MS: u64 = 200;
/// Debounce-Fenster fuer Idle-Meldungen nach Pan/Zoom.
pub const IDLE_DEBOUNCE_MS: u64 = 300;

// ── Routen-Darstellung ─────────────────────────────────────────────

/// Linienstaerke der Routen-Polyline in Pixeln.
pub const ROUTE_STROKE_WEIGHT: f64 = 5.0;
/// Linienfarbe der Routen-Polyline.
pub const ROUTE_STROKE_COLOR: &str = "#FF385C";
/// Deckkraft der Routen-Polyline.
pub const ROUTE_STROKE_OPACITY: f64 = 0.8;

// ── Z-Ordnung ──────────────────────────────────────────────────────

/// Routen-Polyline (unterhalb aller Marker).
pub const Z_ROUTE_POLYLINE: i32 = 50;
/// Regulaere Treffer-Marker.
pub const Z_MARKER_DEFAULT: i32 = 60;
/// Selektierter Treffer-Marker.
pub const Z_MARKER_SELECTED: i32 = 100;
/// Hover-Label-Overlay (ueber allen Markern).
pub const Z_HOVER_OVERLAY: i32 = 102;
/// Nutzerstandort-Marker.
pub const Z_MARKER_USER: i32 = 150;
/// Start-/Ziel-Marker einer Route.
pub const Z_MARKER_ROUTE: i32 = 200;
/// Info-Fenster-Overlay.
pub const Z_INFO_OVERLAY: i32 = 1000;

/// Alle zur Laufzeit aenderbaren Optionen der Map-Synchronisation.
/// Wird als `kakao_placemap_sync.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
    // ── Level ───────────────────────────────────────────────────
    /// Start-Level beim Erstellen der Karte
    pub initial_level: i32,
    /// Maximal erlaubtes Level
    pub max_level: i32,
    /// Ziel-Level fuer den Level-Reset
    pub current_location_level: i32,
    /// Clusterer-Mindest-Level
    pub cluster_min_level: i32,
    /// Verzoegerung zwischen Level-Schritten in Millisekunden
    #[serde(default = "default_level_step_delay_ms")]
    pub level_step_delay_ms: u64,

    // ── Zentrums-Setzen ─────────────────────────────────────────
    /// Verzoegerung bis zur Zentrums-Bestaetigung in Millisekunden
    #[serde(default = "default_center_confirm_delay_ms")]
    pub center_confirm_delay_ms: u64,
    /// Maximale Nachsetz-Versuche
    #[serde(default = "default_center_confirm_retries")]
    pub center_confirm_retries: u32,

    // ── Bridge ──────────────────────────────────────────────────
    /// Debounce-Fenster fuer Marker-/Routen-Injektionen in Millisekunden
    pub bridge_debounce_ms: u64,
    /// Debounce-Fenster fuer Idle-Meldungen in Millisekunden
    #[serde(default = "default_idle_debounce_ms")]
    pub idle_debounce_ms: u64,

    // ── Route ───────────────────────────────────────────────────
    /// Linienstaerke der Routen-Polyline in Pixeln
    pub route_stroke_weight: f64,
    /// Linienfarbe der Routen-Polyline
    pub route_stroke_color: String,
    /// Deckkraft der Routen-Polyline
    pub route_stroke_opacity: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            initial_level: MAP_INITIAL_LEVEL,
            max_level: MAP_MAX_LEVEL,
            current_location_level: CURRENT_LOCATION_LEVEL,
            cluster_min_level: CLUSTER_MIN_LEVEL,
            level_step_delay_ms: LEVEL_STEP_DELAY_MS,

            center_confirm_delay_ms: CENTER_CONFIRM_DELAY_MS,
            center_confirm_retries: CENTER_CONFIRM_RETRIES,

            bridge_debounce_ms: BRIDGE_DEBOUNCE_MS,
            idle_debounce_ms: IDLE_DEBOUNCE_MS,

            route_stroke_weight: ROUTE_STROKE_WEIGHT,
            route_stroke_color: ROUTE_STROKE_COLOR.to_string(),
            route_stroke_opacity: ROUTE_STROKE_OPACITY,
        }
    }
}

/// Serde-Default fuer `level_step_delay_ms` (Abwaertskompatibilitaet bestehender TOML-Dateien).
fn default_level_step_delay_ms() -> u64 {
    LEVEL_STEP_DELAY_MS
}

/// Serde-Default fuer `center_confirm_delay_ms` (Abwaertskompatibilitaet).
fn default_center_confirm_delay_ms() -> u64 {
    CENTER_CONFIRM_DELAY_MS
}

/// Serde-Default fuer `center_confirm_retries` (Abwaertskompatibilitaet).
fn default_center_confirm_retries() -> u32 {
    CENTER_CONFIRM_RETRIES
}

/// Serde-Default fuer `idle_debounce_ms` (Abwaertskompatibilitaet).
fn default_idle_debounce_ms() -> u64 {
    IDLE_DEBOUNCE_MS
}

impl MapOptions {
    /// Laedt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("kakao_placemap_sync"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("kakao_placemap_sync.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_backfills_defaults() {
        let toml_src = r##"
            initial_level = 5
            max_level = 13
            current_location_level = 4
            cluster_min_level = 7
            bridge_debounce_ms = 250
            route_stroke_weight = 5.0
            route_stroke_color = "#FF385C"
            route_stroke_opacity = 0.8
        "##;

        let opts: MapOptions = toml::from_str(toml_src).expect("Teil-TOML muss parsen");

        assert_eq!(opts.initial_level, 5);
        assert_eq!(opts.bridge_debounce_ms, 250);
        // Serde-Defaults fuer nicht aufgefuehrte Felder
        assert_eq!(opts.level_step_delay_ms, LEVEL_STEP_DELAY_MS);
        assert_eq!(opts.idle_debounce_ms, IDLE_DEBOUNCE_MS);
        assert_eq!(opts.center_confirm_retries, CENTER_CONFIRM_RETRIES);
    }
}
