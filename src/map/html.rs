//! Embedded page skeleton for the interactive map. The renderer fills the
//! `__*__` placeholders before writing the file.

pub const LEAFLET_PAGE: &str = r##"<!doctype html>
<html lang="pt-BR">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Geomorfologia IBGE</title>
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js"></script>
  <style>
    html, body, #map { height: 100%; margin: 0; }
    .leaflet-tooltip table { border-collapse: collapse; }
    .leaflet-tooltip th { text-align: left; padding-right: 6px; }
  </style>
</head>
<body>
  <div id="map"></div>
  <script>
    var map = L.map('map').setView([__CENTER_LAT__, __CENTER_LON__], __ZOOM__);
    L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
      maxZoom: 19,
      attribution: '&copy; OpenStreetMap contributors'
    }).addTo(map);

    var data = __GEOJSON__;
    var tooltipFields = __TOOLTIP_FIELDS__;

    function esc(value) {
      return String(value)
        .replace(/&/g, '&amp;')
        .replace(/</g, '&lt;')
        .replace(/>/g, '&gt;');
    }

    function fmt(value) {
      if (value === null || value === undefined) return '';
      if (typeof value === 'number') return value.toLocaleString();
      return String(value);
    }

    var overlay = L.geoJSON(data, {
      style: { color: '#000000', weight: 1, fillColor: '#3388ff', fillOpacity: 0.6 },
      onEachFeature: function (feature, layer) {
        var props = feature.properties || {};
        var rows = tooltipFields.map(function (field) {
          return '<tr><th>' + esc(field) + '</th><td>' + esc(fmt(props[field])) + '</td></tr>';
        });
        layer.bindTooltip('<table>' + rows.join('') + '</table>', { sticky: true });
      }
    }).addTo(map);

    var overlays = {};
    overlays[__OVERLAY_NAME__] = overlay;
    L.control.layers(null, overlays, { collapsed: false }).addTo(map);
  </script>
</body>
</html>
"##;
