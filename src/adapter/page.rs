//! HTML-Seite fuer die WebView-Karte (Bridge-Variante).
//!
//! Die Seite definiert pro [`crate::adapter::AdapterCommand`] genau
//! eine JS-Funktion; injizierte Snippets rufen diese Funktionen auf.
//! Jede Funktion prueft selbst, ob die Karte schon existiert —
//! Injektion darf die Initialisierung ueberholen und muss gefahrlos
//! wiederholbar sein. Events gehen als JSON-Messages an den Host.

/// Platzhalter fuer den Kakao-JS-App-Key.
pub const API_KEY_PLACEHOLDER: &str = "KAKAO_MAP_JS_KEY_PLACEHOLDER";

/// Rendert die WebView-Seite mit eingesetztem App-Key.
pub fn render_page(api_key: &str) -> String {
    PAGE_TEMPLATE.replace(API_KEY_PLACEHOLDER, api_key)
}

/// Seiten-Template. Der App-Key wird erst beim Rendern eingesetzt.
pub const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1, user-scalable=no" />
  <style>
    html, body, #map { margin: 0; padding: 0; width: 100%; height: 100%; }
  </style>
  <script src="https://dapi.kakao.com/v2/maps/sdk.js?appkey=KAKAO_MAP_JS_KEY_PLACEHOLDER&autoload=false&libraries=clusterer"></script>
</head>
<body>
  <div id="map"></div>
  <script>
    var map;
    var clusterer;
    var directMarkers = {};      // id -> kakao.maps.Marker (Nutzerstandort, Routen-Marker)
    var clusteredMarkers = [];   // kakao.maps.Marker[]
    var overlays = {};           // id -> kakao.maps.CustomOverlay
    var hoverOverlay = null;
    var routePolyline = null;
    var idleTimeout = null;

    function post(payload) {
      if (window.ReactNativeWebView) {
        window.ReactNativeWebView.postMessage(JSON.stringify(payload));
      }
    }

    function postError(message) {
      post({ type: 'error', message: String(message) });
    }

    function markerImage(style) {
      return new kakao.maps.MarkerImage(
        style.image,
        new kakao.maps.Size(style.width, style.height),
        { offset: new kakao.maps.Point(style.offset_x, style.offset_y) }
      );
    }

    function hoverLabelHtml(label) {
      return '<div style="position:relative;bottom:15px;background:#fff;' +
        'border:1px solid #ddd;border-radius:6px;padding:8px 12px;' +
        'box-shadow:0 2px 8px rgba(0,0,0,0.15);font-size:13px;color:#333;' +
        'white-space:nowrap;text-align:center;">' +
        '<span style="font-weight:bold;display:block;">' + label.title + '</span>' +
        '<span style="font-size:11px;color:#666;">' + label.subtitle + '</span>' +
        '</div>';
    }

    function buildMarker(m) {
      var marker = new kakao.maps.Marker({
        position: new kakao.maps.LatLng(m.position.lat, m.position.lng),
        image: markerImage(m.style),
        zIndex: m.style.z_index
      });

      var labelOverlay = new kakao.maps.CustomOverlay({
        position: new kakao.maps.LatLng(m.position.lat, m.position.lng),
        content: hoverLabelHtml(m.label),
        yAnchor: 1,
        zIndex: 102
      });

      kakao.maps.event.addListener(marker, 'mouseover', function () {
        if (hoverOverlay) { hoverOverlay.setMap(null); }
        labelOverlay.setMap(map);
        hoverOverlay = labelOverlay;
      });
      kakao.maps.event.addListener(marker, 'mouseout', function () {
        if (hoverOverlay === labelOverlay) {
          labelOverlay.setMap(null);
          hoverOverlay = null;
        }
      });
      kakao.maps.event.addListener(marker, 'click', function () {
        post({
          type: 'marker_press',
          id: m.id,
          latitude: m.position.lat,
          longitude: m.position.lng
        });
      });

      return marker;
    }

    function initMap(lat, lng, level, maxLevel, clusterMinLevel) {
      if (map) { return; } // Doppel-Injektion abfangen
      try {
        map = new kakao.maps.Map(document.getElementById('map'), {
          center: new kakao.maps.LatLng(lat, lng),
          level: level,
          maxLevel: maxLevel
        });
        clusterer = new kakao.maps.MarkerClusterer({
          map: map,
          averageCenter: true,
          minLevel: clusterMinLevel
        });
        kakao.maps.event.addListener(map, 'idle', function () {
          if (idleTimeout) { clearTimeout(idleTimeout); }
          idleTimeout = setTimeout(function () {
            var c = map.getCenter();
            post({
              type: 'map_idle',
              latitude: c.getLat(),
              longitude: c.getLng(),
              level: map.getLevel()
            });
          }, 300);
        });
      } catch (e) {
        postError(e);
      }
    }

    function setCenter(lat, lng) {
      if (typeof map === 'undefined' || !map) { return; }
      var target = new kakao.maps.LatLng(lat, lng);
      map.setCenter(target);
      // Frisch erstellte Karten verschlucken gelegentlich den ersten
      // setCenter — kurz danach mit panTo nachsetzen.
      setTimeout(function () { map.panTo(target); }, 50);
    }

    function setLevel(level) {
      if (typeof map === 'undefined' || !map) { return; }
      map.setLevel(level);
    }

    function clearMarkers() {
      if (typeof clusterer === 'undefined' || !clusterer) { return; }
      clusterer.clear();
      clusteredMarkers = [];
    }

    function upsertMarker(m) {
      if (typeof map === 'undefined' || !map) { return; }
      if (directMarkers[m.id]) { directMarkers[m.id].setMap(null); }
      var marker = buildMarker(m);
      marker.setMap(map);
      directMarkers[m.id] = marker;
    }

    function removeMarker(id) {
      if (directMarkers[id]) {
        directMarkers[id].setMap(null);
        delete directMarkers[id];
      }
    }

    function setClusteredMarkers(list) {
      if (typeof clusterer === 'undefined' || !clusterer) { return; }
      var markers = [];
      for (var i = 0; i < list.length; i++) {
        markers.push(buildMarker(list[i]));
      }
      clusteredMarkers = markers;
      clusterer.addMarkers(markers);
    }

    function drawPolyline(path, style) {
      if (typeof map === 'undefined' || !map) { return; }
      if (routePolyline) { routePolyline.setMap(null); }
      var points = [];
      for (var i = 0; i < path.length; i++) {
        points.push(new kakao.maps.LatLng(path[i].lat, path[i].lng));
      }
      routePolyline = new kakao.maps.Polyline({
        map: map,
        path: points,
        strokeWeight: style.weight,
        strokeColor: style.color,
        strokeOpacity: style.opacity,
        strokeStyle: 'solid',
        zIndex: style.z_index
      });
    }

    function clearPolyline() {
      if (routePolyline) {
        routePolyline.setMap(null);
        routePolyline = null;
      }
    }

    function showOverlay(id, html, lat, lng, zIndex) {
      if (typeof map === 'undefined' || !map) { return; }
      if (overlays[id]) { overlays[id].setMap(null); }
      var overlay = new kakao.maps.CustomOverlay({
        position: new kakao.maps.LatLng(lat, lng),
        content: html,
        yAnchor: 1.1,
        zIndex: zIndex
      });
      overlay.setMap(map);
      overlays[id] = overlay;
    }

    function hideOverlay(id) {
      if (overlays[id]) {
        overlays[id].setMap(null);
        delete overlays[id];
      }
    }

    function fitBounds(points) {
      if (typeof map === 'undefined' || !map) { return; }
      if (!points.length) { return; }
      var bounds = new kakao.maps.LatLngBounds();
      for (var i = 0; i < points.length; i++) {
        bounds.extend(new kakao.maps.LatLng(points[i].lat, points[i].lng));
      }
      map.setBounds(bounds);
    }

    // Routen-Aktion aus einem Info-Fenster heraus (Buttons rufen das auf)
    function selectRouteOption(place) {
      post(Object.assign({ type: 'route_selected' }, place));
    }

    // Schliessen-Button eines Info-Fensters
    function closeInfoWindow(id) {
      hideOverlay(id);
    }
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_page_substitutes_api_key() {
        let page = render_page("test-key-123");

        assert!(page.contains("appkey=test-key-123"));
        assert!(!page.contains(API_KEY_PLACEHOLDER));
    }

    #[test]
    fn page_defines_one_function_per_adapter_command() {
        for function in [
            "function setCenter",
            "function setLevel",
            "function clearMarkers",
            "function upsertMarker",
            "function removeMarker",
            "function setClusteredMarkers",
            "function drawPolyline",
            "function clearPolyline",
            "function showOverlay",
            "function hideOverlay",
            "function fitBounds",
        ] {
            assert!(
                PAGE_TEMPLATE.contains(function),
                "Seite definiert {function} nicht"
            );
        }
    }

    #[test]
    fn command_functions_guard_against_missing_map() {
        // Injektion kann die Initialisierung ueberholen
        assert!(PAGE_TEMPLATE.contains("typeof map === 'undefined'"));
    }
}
