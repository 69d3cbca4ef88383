//! Routenergebnis des externen Routing-Providers.

use serde::{Deserialize, Serialize};

use super::geo::{LatLng, LatLngBounds};

/// Ein Punkt auf dem Routen-Pfad.
///
/// Das Routing-Backend liefert `lon` statt `lng` — die Umbenennung
/// passiert erst bei der Konvertierung nach [`LatLng`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub lat: f64,
    pub lon: f64,
}

impl RoutePoint {
    /// Konvertiert in die Karten-Koordinate.
    pub fn to_lat_lng(self) -> LatLng {
        LatLng::new(self.lat, self.lon)
    }
}

/// Ein Abschnitt der Route mit Start- und Endpunkt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStep {
    /// Startpunkt des Abschnitts
    pub start_location: RoutePoint,
    /// Endpunkt des Abschnitts
    pub end_location: RoutePoint,
    /// Abschnittslaenge in Metern
    #[serde(default)]
    pub distance: f64,
    /// Abschnittsdauer in Sekunden
    #[serde(default)]
    pub duration: f64,
}

/// Ergebnis einer Routenberechnung.
///
/// `coordinates` und `steps` sind unabhaengige Faehigkeiten: ein leerer
/// `steps`-Vektor unterdrueckt nur Start-/Ziel-Marker, nicht die Polyline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    /// Pfad-Punkte in Reihenfolge (leer = nichts zu zeichnen)
    #[serde(default)]
    pub coordinates: Vec<RoutePoint>,
    /// Routen-Abschnitte in Reihenfolge
    #[serde(default)]
    pub steps: Vec<RouteStep>,
    /// Gesamtdistanz in Metern
    #[serde(default)]
    pub total_distance: f64,
    /// Gesamtdauer in Sekunden
    #[serde(default)]
    pub total_duration: f64,
}

impl RouteResult {
    /// Gibt `true` zurueck, wenn eine Polyline zu zeichnen ist.
    pub fn has_path(&self) -> bool {
        !self.coordinates.is_empty()
    }

    /// Pfad als Karten-Koordinaten.
    pub fn path(&self) -> Vec<LatLng> {
        self.coordinates.iter().map(|c| c.to_lat_lng()).collect()
    }

    /// Position des Start-Markers: Startpunkt des ersten Abschnitts.
    ///
    /// Kann vom ersten Pfad-Punkt abweichen (Abschnitte beginnen an
    /// der Zufahrt, der Pfad am Strassen-Snap).
    pub fn start_position(&self) -> Option<LatLng> {
        self.steps.first().map(|s| s.start_location.to_lat_lng())
    }

    /// Position des Ziel-Markers: Endpunkt des letzten Abschnitts.
    pub fn end_position(&self) -> Option<LatLng> {
        self.steps.last().map(|s| s.end_location.to_lat_lng())
    }

    /// Bounding-Box ueber alle Pfad-Punkte.
    pub fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_backend_wire_format() {
        let json = r#"{
            "coordinates": [
                {"lat": 37.50, "lon": 127.00},
                {"lat": 37.51, "lon": 127.01}
            ],
            "steps": [
                {
                    "startLocation": {"lat": 37.499, "lon": 126.999},
                    "endLocation": {"lat": 37.512, "lon": 127.012},
                    "distance": 1500.0,
                    "duration": 300.0
                }
            ],
            "totalDistance": 1500.0,
            "totalDuration": 300.0
        }"#;

        let route: RouteResult = serde_json::from_str(json).expect("Route muss parsen");

        assert!(route.has_path());
        assert_eq!(route.coordinates.len(), 2);
        assert_relative_eq!(route.total_distance, 1500.0);
    }

    #[test]
    fn marker_positions_come_from_steps_not_path() {
        let route = RouteResult {
            coordinates: vec![
                RoutePoint {
                    lat: 37.50,
                    lon: 127.00,
                },
                RoutePoint {
                    lat: 37.51,
                    lon: 127.01,
                },
            ],
            steps: vec![RouteStep {
                start_location: RoutePoint {
                    lat: 37.499,
                    lon: 126.999,
                },
                end_location: RoutePoint {
                    lat: 37.512,
                    lon: 127.012,
                },
                distance: 0.0,
                duration: 0.0,
            }],
            ..Default::default()
        };

        let start = route.start_position().expect("Start-Marker vorhanden");
        let end = route.end_position().expect("Ziel-Marker vorhanden");

        // Abschnitts-Endpunkte, nicht Pfad-Endpunkte
        assert_relative_eq!(start.lat, 37.499);
        assert_relative_eq!(end.lng, 127.012);
    }

    #[test]
    fn empty_steps_mean_no_route_markers() {
        let route = RouteResult {
            coordinates: vec![RoutePoint {
                lat: 37.5,
                lon: 127.0,
            }],
            ..Default::default()
        };

        assert!(route.has_path());
        assert!(route.start_position().is_none());
        assert!(route.end_position().is_none());
    }
}
