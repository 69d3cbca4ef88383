//! Geo-Primitiven: WGS84-Koordinaten und Bounding-Box.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Geografische Koordinate (WGS84, Grad).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Breitengrad
    pub lat: f64,
    /// Laengengrad
    pub lng: f64,
}

impl LatLng {
    /// Erstellt eine Koordinate aus Breiten- und Laengengrad.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Als Vektor fuer Geometrie-Berechnungen (x = lng, y = lat).
    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.lng, self.lat)
    }

    /// Erstellt eine Koordinate aus einem Vektor (x = lng, y = lat).
    pub fn from_vec(v: DVec2) -> Self {
        Self { lat: v.y, lng: v.x }
    }

    /// Euklidischer Abstand in Grad.
    ///
    /// Kein Meter-Abstand — reicht fuer Konvergenz-Checks beim
    /// Zentrums-Setzen, wo nur "nah genug am Ziel" interessiert.
    pub fn degree_distance(self, other: LatLng) -> f64 {
        (self.to_vec() - other.to_vec()).length()
    }

    /// Prueft Gleichheit innerhalb einer Grad-Toleranz.
    pub fn approx_eq(self, other: LatLng, epsilon: f64) -> bool {
        self.degree_distance(other) <= epsilon
    }
}

/// Achsenparallele Bounding-Box ueber Koordinaten.
///
/// Kein Umgang mit Antimeridian-Ueberlauf — die Zielkarte deckt
/// einen zusammenhaengenden Ausschnitt ab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    min: DVec2,
    max: DVec2,
}

impl LatLngBounds {
    /// Bounding-Box ueber eine nicht-leere Punktmenge. `None` bei leerer Eingabe.
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let mut iter = points.iter();
        let first = iter.next()?.to_vec();
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bounds.extend(*p);
        }
        Some(bounds)
    }

    /// Erweitert die Box, so dass sie den Punkt enthaelt.
    pub fn extend(&mut self, p: LatLng) {
        let v = p.to_vec();
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }

    /// Suedwestliche Ecke.
    pub fn south_west(&self) -> LatLng {
        LatLng::from_vec(self.min)
    }

    /// Nordoestliche Ecke.
    pub fn north_east(&self) -> LatLng {
        LatLng::from_vec(self.max)
    }

    /// Mittelpunkt der Box.
    pub fn center(&self) -> LatLng {
        LatLng::from_vec((self.min + self.max) * 0.5)
    }

    /// Prueft, ob ein Punkt innerhalb (inklusive Rand) liegt.
    pub fn contains(&self, p: LatLng) -> bool {
        let v = p.to_vec();
        v.cmpge(self.min).all() && v.cmple(self.max).all()
    }
}
