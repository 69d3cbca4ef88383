//! Domaenen-Typen der externen Such- und Parkplatz-Provider.
//!
//! Die Typen spiegeln das camelCase-Wire-Format der Backend-APIs.
//! Fehlende optionale Felder werden als Leerstrings deserialisiert,
//! nie als Fehler.

use serde::{Deserialize, Serialize};

/// Ein Suchtreffer der Orts-Suche.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Stabile Orts-ID des Anbieters
    pub place_id: String,
    /// Anzeigename des Orts
    pub place_name: String,
    /// Strassenadresse (optional)
    #[serde(default)]
    pub road_address: String,
    /// Verwaltungsbezirk der Strassenadresse (optional)
    #[serde(default)]
    pub road_address_dong: String,
    /// Grundstuecksadresse (optional)
    #[serde(default)]
    pub lot_address: String,
    /// Breitengrad
    pub lat: f64,
    /// Laengengrad
    pub lng: f64,
    /// Telefonnummer (optional)
    #[serde(default)]
    pub phone: String,
    /// Kategorie-Gruppe (optional)
    #[serde(default)]
    pub category_group_name: String,
    /// Detail-URL beim Kartenanbieter (optional)
    #[serde(default)]
    pub place_url: String,
    /// Entfernung vom Suchmittelpunkt in Metern
    #[serde(default)]
    pub distance: f64,
}

/// Ein Parkplatz aus der Umgebungssuche.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingLot {
    /// Numerische Parkplatz-ID
    pub id: i64,
    /// Name des Parkplatzes
    pub parking_lot_name: String,
    /// Strassenadresse (optional)
    #[serde(default)]
    pub road_address: String,
    /// Grundstuecksadresse (optional)
    #[serde(default)]
    pub lot_address: String,
    /// Gebuehren-Kurzinfo (optional)
    #[serde(default)]
    pub fee_info: String,
    /// Breitengrad
    pub lat: f64,
    /// Laengengrad
    pub lng: f64,
    /// Entfernung vom Suchmittelpunkt in Metern
    #[serde(default)]
    pub distance: f64,
}

/// Detail-Datensatz eines Parkplatzes.
///
/// Alle Text-Felder sind optional und degradieren beim Rendern zu `-`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingLotDetail {
    pub id: i64,
    pub parking_lot_name: String,
    #[serde(default)]
    pub road_address: String,
    #[serde(default)]
    pub lot_address: String,
    #[serde(default)]
    pub parking_capacity: String,
    #[serde(default)]
    pub oper_day: String,
    #[serde(default)]
    pub week_open_time: String,
    #[serde(default)]
    pub week_close_time: String,
    #[serde(default)]
    pub sat_open_time: String,
    #[serde(default)]
    pub sat_close_time: String,
    #[serde(default)]
    pub holiday_open_time: String,
    #[serde(default)]
    pub holiday_close_time: String,
    #[serde(default)]
    pub parking_charge_info: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub special_comment: String,
    #[serde(default)]
    pub phone_number: String,
    pub lat: f64,
    pub lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_result_tolerates_missing_optional_fields() {
        let json = r#"{
            "placeId": "p-1",
            "placeName": "Teststelle",
            "lat": 37.5,
            "lng": 127.0
        }"#;

        let result: SearchResult =
            serde_json::from_str(json).expect("minimaler Treffer muss parsen");

        assert_eq!(result.place_id, "p-1");
        assert_eq!(result.road_address, "");
        assert_eq!(result.phone, "");
        assert_eq!(result.distance, 0.0);
    }

    #[test]
    fn parking_lot_parses_camel_case_wire_format() {
        let json = r#"{
            "id": 42,
            "parkingLotName": "시청 주차장",
            "roadAddress": "세종대로 110",
            "feeInfo": "유료",
            "lat": 37.566,
            "lng": 126.978,
            "distance": 120.5
        }"#;

        let lot: ParkingLot = serde_json::from_str(json).expect("Parkplatz muss parsen");

        assert_eq!(lot.id, 42);
        assert_eq!(lot.parking_lot_name, "시청 주차장");
        assert_eq!(lot.lot_address, "");
    }
}
