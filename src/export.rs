//! Standalone HTML export of the current map view.
//!
//! The document pulls Leaflet and the tile layer from the network, embeds
//! every marker as JSON, and also lists each label in a plain table so the
//! measurements stay readable with scripts disabled. It is a one-way
//! snapshot: nothing reads it back.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::config::MapOptions;
use crate::data::projection::Projection;
use crate::error::ExportError;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

#[derive(Serialize)]
struct MapPayload<'a> {
    center: (f64, f64),
    zoom: u8,
    radius: f32,
    fill_opacity: f32,
    tile_url: &'a str,
    tile_attribution: &'a str,
    markers: Vec<MarkerPayload<'a>>,
}

#[derive(Serialize)]
struct MarkerPayload<'a> {
    lat: f64,
    lon: f64,
    color: &'static str,
    label: &'a str,
}

/// Render the projection as a self-contained HTML document.
pub fn render_html(projection: &Projection, options: &MapOptions) -> Result<String, ExportError> {
    let center = projection.center.ok_or(ExportError::NoData)?;

    let payload = MapPayload {
        center,
        zoom: options.zoom_start,
        radius: options.marker_radius,
        fill_opacity: options.fill_opacity,
        tile_url: &options.tile_url,
        tile_attribution: &options.tile_attribution,
        markers: projection
            .markers
            .iter()
            .map(|m| MarkerPayload {
                lat: m.position.0,
                lon: m.position.1,
                color: m.color.css_name(),
                label: &m.label,
            })
            .collect(),
    };
    // Keep a literal "</script>" inside a label from closing the script block.
    let data = serde_json::to_string(&payload)?.replace("</", "<\\/");

    let title = escape_html(&options.title);
    let mut rows = String::new();
    for m in &projection.markers {
        // Writing to a String cannot fail.
        let _ = writeln!(
            rows,
            "      <tr><td><span class=\"swatch\" style=\"background:{}\"></span></td><td>{:.6}</td><td>{:.6}</td><td class=\"label\">{}</td></tr>",
            m.color.hex(),
            m.position.0,
            m.position.1,
            escape_html(&m.label)
        );
    }

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="uk">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="{LEAFLET_CSS}">
  <script src="{LEAFLET_JS}"></script>
  <style>
    body {{ margin: 0; font-family: sans-serif; }}
    #map {{ width: 100%; height: 75vh; }}
    .label, .leaflet-tooltip {{ white-space: pre-line; }}
    .swatch {{ display: inline-block; width: 12px; height: 12px; border-radius: 50%; }}
    table {{ border-collapse: collapse; margin: 8px; }}
    td {{ padding: 2px 8px; border-bottom: 1px solid #ddd; vertical-align: top; }}
  </style>
</head>
<body>
  <div id="map"></div>
  <table id="measurements">
    <tbody>
{rows}    </tbody>
  </table>
  <script id="map-data" type="application/json">{data}</script>
  <script>
    var cfg = JSON.parse(document.getElementById("map-data").textContent);
    var map = L.map("map", {{ center: cfg.center, zoom: cfg.zoom }});
    L.control.scale().addTo(map);
    L.tileLayer(cfg.tile_url, {{ attribution: cfg.tile_attribution }}).addTo(map);
    cfg.markers.forEach(function (m) {{
      L.circleMarker([m.lat, m.lon], {{
        radius: cfg.radius,
        color: m.color,
        fill: true,
        fillColor: m.color,
        fillOpacity: cfg.fill_opacity
      }}).bindTooltip(m.label).addTo(map);
    }});
  </script>
</body>
</html>
"#
    ))
}

/// Render and write the document to `path`.
pub fn write_html(
    path: &Path,
    projection: &Projection,
    options: &MapOptions,
) -> Result<(), ExportError> {
    let html = render_html(projection, options)?;
    std::fs::write(path, html.as_bytes())?;
    log::info!(
        "Exported {} markers to {}",
        projection.markers.len(),
        path.display()
    );
    Ok(())
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
