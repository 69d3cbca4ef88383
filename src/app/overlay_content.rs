//! HTML-Inhalte fuer Hover-Label und Info-Fenster.
//!
//! Fehlende optionale Felder werden als `-` bzw. leer gerendert, nie
//! als Fehler. Die `onclick`-Hooks (`closeInfoWindow`,
//! `selectRouteOption`) stellt die einbettende Seite bereit — die
//! WebView-Seite dieses Repos definiert beide, der Web-Host verdrahtet
//! eigene DOM-Handler.

use crate::core::{Marker, MarkerLabel, MarkerSource, ParkingLotDetail};

/// Rendert einen Wert oder `-` als Fallback.
fn field_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Hover-Label: Name plus Untertitel in einer kleinen Sprechblase.
pub fn hover_label_html(label: &MarkerLabel) -> String {
    format!(
        r#"<div style="position:relative;bottom:15px;background:#fff;border:1px solid #ddd;border-radius:6px;padding:8px 12px;box-shadow:0 2px 8px rgba(0,0,0,0.15);font-size:13px;color:#333;white-space:nowrap;text-align:center;"><span style="font-weight:bold;display:block;">{}</span><span style="font-size:11px;color:#666;">{}</span></div>"#,
        label.title, label.subtitle
    )
}

/// Eine beschriftete Zeile des Info-Fensters.
fn detail_row(label: &str, value: &str) -> String {
    format!(
        r#"<div style="margin-bottom:6px;display:flex;align-items:center;"><span style="min-width:50px;font-weight:500;">{}</span><span style="margin-left:14px;">{}</span></div>"#,
        label,
        field_or_dash(value)
    )
}

/// Info-Fenster fuer einen Marker (Ort oder Parkplatz).
pub fn info_window_html(marker: &Marker) -> String {
    let mut rows = String::new();
    let mut link_row = String::new();

    match &marker.source {
        MarkerSource::Place(place) => {
            let address = if place.road_address.is_empty() {
                place.lot_address.as_str()
            } else {
                place.road_address.as_str()
            };
            rows.push_str(&detail_row("주소", address));
            rows.push_str(&detail_row("전화", &place.phone));
            rows.push_str(&detail_row("카테고리", &place.category_group_name));
            if !place.place_url.is_empty() {
                link_row = format!(
                    r#"<div style="margin-bottom:6px;"><a href="{}" target="_blank" style="color:#007bff;">카카오맵에서 보기</a></div>"#,
                    place.place_url
                );
            }
        }
        MarkerSource::ParkingLot(lot) => {
            let address = if lot.road_address.is_empty() {
                lot.lot_address.as_str()
            } else {
                lot.road_address.as_str()
            };
            rows.push_str(&detail_row("주소", address));
            rows.push_str(&detail_row("요금", &lot.fee_info));
        }
        MarkerSource::UserLocation => {}
    }

    format!(
        r#"<div style="position:relative;background:#fff;border:1px solid #ddd;border-radius:8px;padding:16px;box-shadow:0 2px 8px rgba(0,0,0,0.15);font-size:14px;color:#333;width:340px;"><div style="display:flex;justify-content:space-between;align-items:center;margin-bottom:12px;"><h3 style="margin:0;font-size:18px;font-weight:bold;flex:1;">{title}</h3><button onclick="closeInfoWindow('{id}')" style="background:none;border:none;font-size:25px;color:#666;cursor:pointer;">&times;</button></div><div style="margin-bottom:8px;">{rows}{link_row}</div><div style="text-align:right;"><button onclick='selectRouteOption({route_payload})' style="background:#007bff;color:#fff;border:none;border-radius:5px;padding:6px 12px;font-size:12px;cursor:pointer;">길찾기</button></div></div>"#,
        title = marker.label.title,
        id = marker.id,
        rows = rows,
        link_row = link_row,
        route_payload = route_payload_json(marker),
    )
}

/// JSON-Payload des Routen-Buttons (wird zu `route_selected` gepostet).
fn route_payload_json(marker: &Marker) -> String {
    let payload = match &marker.source {
        MarkerSource::Place(place) => serde_json::json!({
            "placeId": place.place_id,
            "placeName": place.place_name,
            "roadAddress": place.road_address,
            "lotAddress": place.lot_address,
            "latitude": place.lat,
            "longitude": place.lng,
            "phone": place.phone,
            "category": place.category_group_name,
            "placeUrl": place.place_url,
            "distance": place.distance,
        }),
        _ => serde_json::json!({
            "placeId": marker.id,
            "placeName": marker.label.title,
            "latitude": marker.position.lat,
            "longitude": marker.position.lng,
        }),
    };
    payload.to_string()
}

/// Detail-Ansicht eines Parkplatzes (Gebuehren, Zeiten, Kontakt).
pub fn parking_detail_html(detail: &ParkingLotDetail) -> String {
    let week_hours = opening_hours(&detail.week_open_time, &detail.week_close_time);
    let sat_hours = opening_hours(&detail.sat_open_time, &detail.sat_close_time);
    let holiday_hours = opening_hours(&detail.holiday_open_time, &detail.holiday_close_time);

    let mut rows = String::new();
    rows.push_str(&detail_row("주소", &detail.road_address));
    rows.push_str(&detail_row("주차면수", &detail.parking_capacity));
    rows.push_str(&detail_row("운영일", &detail.oper_day));
    rows.push_str(&detail_row("평일", &week_hours));
    rows.push_str(&detail_row("토요일", &sat_hours));
    rows.push_str(&detail_row("공휴일", &holiday_hours));
    rows.push_str(&detail_row("요금", &detail.parking_charge_info));
    rows.push_str(&detail_row("결제수단", &detail.payment_method));
    rows.push_str(&detail_row("전화", &detail.phone_number));

    format!(
        r#"<div style="position:relative;background:#fff;border:1px solid #ddd;border-radius:8px;padding:16px;box-shadow:0 2px 8px rgba(0,0,0,0.15);font-size:14px;color:#333;width:340px;"><h3 style="margin:0 0 12px 0;font-size:18px;font-weight:bold;">{}</h3>{}</div>"#,
        detail.parking_lot_name, rows
    )
}

/// Formatiert ein Oeffnungszeiten-Paar, leere Haelften inklusive.
fn opening_hours(open: &str, close: &str) -> String {
    if open.is_empty() && close.is_empty() {
        String::new()
    } else {
        format!("{} ~ {}", field_or_dash(open), field_or_dash(close))
    }
}
