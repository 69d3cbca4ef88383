//! Visuelle Marker-Konfiguration: Icons, Groessen, Z-Ordnung.
//!
//! Icons werden als SVG-Daten-URIs erzeugt — kein Asset-Hosting noetig,
//! die Karten-SDK-Seite rendert die URIs direkt.

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::core::MarkerKind;
use crate::shared::options::{
    Z_MARKER_DEFAULT, Z_MARKER_ROUTE, Z_MARKER_SELECTED, Z_MARKER_USER,
};

/// Punkt-Marker-Farbe regulaerer Treffer.
const DOT_COLOR_DEFAULT: &str = "#007bff";
/// Punkt-Marker-Farbe des selektierten Treffers.
const DOT_COLOR_SELECTED: &str = "#FF385C";
/// Fuellfarbe des Nutzerstandort-Markers.
const DOT_COLOR_USER: &str = "#3690FF";
/// Fuellfarbe des Routen-Start-Markers.
const DOT_COLOR_ROUTE_START: &str = "#28a745";
/// Fuellfarbe des Routen-Ziel-Markers.
const DOT_COLOR_ROUTE_END: &str = "#dc3545";

/// Aufgeloeste Darstellung eines Markers fuer die Adapter-Seite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Icon als Daten-URI
    pub image: String,
    /// Icon-Breite in Pixeln
    pub width: u32,
    /// Icon-Hoehe in Pixeln
    pub height: u32,
    /// Anker-Versatz vom linken oberen Icon-Rand
    pub offset_x: i32,
    /// Anker-Versatz vom linken oberen Icon-Rand
    pub offset_y: i32,
    /// Z-Ordnung auf der Karte
    pub z_index: i32,
}

/// Erzeugt einen runden Punkt-Marker als SVG-Daten-URI.
///
/// `halo` zeichnet einen halbtransparenten Aussenring (Nutzerstandort).
fn dot_data_uri(size: u32, border_width: u32, fill: &str, halo: bool) -> String {
    let half = size as f64 / 2.0;
    let radius = (size - border_width * 2) as f64 / 2.0;
    let halo_circle = if halo {
        format!(
            r##"<circle cx="{half}" cy="{half}" r="{half}" fill="{fill}" fill-opacity="0.25"/>"##
        )
    } else {
        String::new()
    };
    let inner_radius = if halo { radius * 0.6 } else { radius };
    let svg = format!(
        r##"<svg width="{size}" height="{size}" viewBox="0 0 {size} {size}" xmlns="http://www.w3.org/2000/svg">{halo_circle}<circle cx="{half}" cy="{half}" r="{inner_radius}" fill="{fill}" stroke="#fff" stroke-width="{border_width}"/></svg>"##
    );
    format!(
        "data:image/svg+xml;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(svg)
    )
}

/// Aufgeloeste Darstellung fuer eine Marker-Art.
pub fn style_for(kind: MarkerKind) -> MarkerStyle {
    match kind {
        MarkerKind::UserLocation => MarkerStyle {
            image: dot_data_uri(24, 2, DOT_COLOR_USER, true),
            width: 24,
            height: 24,
            offset_x: 12,
            offset_y: 12,
            z_index: Z_MARKER_USER,
        },
        MarkerKind::Default => MarkerStyle {
            image: dot_data_uri(16, 1, DOT_COLOR_DEFAULT, false),
            width: 16,
            height: 16,
            offset_x: 8,
            offset_y: 8,
            z_index: Z_MARKER_DEFAULT,
        },
        MarkerKind::Selected => MarkerStyle {
            image: dot_data_uri(24, 2, DOT_COLOR_SELECTED, false),
            width: 24,
            height: 24,
            offset_x: 12,
            offset_y: 12,
            z_index: Z_MARKER_SELECTED,
        },
        MarkerKind::RouteStart => MarkerStyle {
            image: dot_data_uri(32, 2, DOT_COLOR_ROUTE_START, false),
            width: 32,
            height: 32,
            offset_x: 16,
            offset_y: 16,
            z_index: Z_MARKER_ROUTE,
        },
        MarkerKind::RouteEnd => MarkerStyle {
            image: dot_data_uri(32, 2, DOT_COLOR_ROUTE_END, false),
            width: 32,
            height: 32,
            offset_x: 16,
            offset_y: 16,
            z_index: Z_MARKER_ROUTE,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icons_are_svg_data_uris() {
        let style = style_for(MarkerKind::Default);

        assert!(style.image.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn selected_marker_is_larger_and_above_default() {
        let default = style_for(MarkerKind::Default);
        let selected = style_for(MarkerKind::Selected);

        assert!(selected.width > default.width);
        assert!(selected.z_index > default.z_index);
    }

    #[test]
    fn route_markers_sit_on_top_of_place_markers() {
        let selected = style_for(MarkerKind::Selected);
        let start = style_for(MarkerKind::RouteStart);
        let end = style_for(MarkerKind::RouteEnd);

        assert!(start.z_index > selected.z_index);
        assert_eq!(start.z_index, end.z_index);
    }
}
