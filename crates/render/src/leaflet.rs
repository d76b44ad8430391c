//! Leaflet HTML backend.
//!
//! The canvas collects draw commands as JSON; `save_artifact` embeds them in
//! a single HTML page that replays them with Leaflet. Labels and property
//! values are inserted as DOM text, never as markup.

use std::path::Path;

use layers::{MarkerIcon, MarkerSpec, PopupConfig, StyledPolygonCollection};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::info;

use crate::sink::{RenderError, RenderSink};
use crate::view::MapView;

pub const LEAFLET_VERSION: &str = "1.9.4";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>__TITLE__</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@__LEAFLET__/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@__LEAFLET__/dist/leaflet.js"></script>
<style>
html, body { width: 100%; height: 100%; margin: 0; padding: 0; }
#map { position: absolute; top: 0; bottom: 0; left: 0; right: 0; }
.frontmap-glyph { background: transparent; border: none; line-height: 1; }
</style>
</head>
<body>
<div id="map"></div>
<script>
(function () {
  var view = __VIEW__;
  var commands = __COMMANDS__;

  var map = L.map('map', { center: view.center, zoom: view.zoom });
  L.tileLayer(view.tiles.url, {
    attribution: view.tiles.attribution,
    subdomains: view.tiles.subdomains,
    maxZoom: view.tiles.maxZoom
  }).addTo(map);

  function textNode(text) {
    var el = document.createElement('div');
    el.textContent = text;
    return el;
  }

  function glyphIcon(icon, rotation) {
    var el = document.createElement('div');
    el.textContent = icon.glyph;
    el.style.transform = 'rotate(' + rotation + 'deg)';
    el.style.fontSize = icon.fontSize + 'px';
    el.style.color = icon.color;
    return L.divIcon({ html: el, className: 'frontmap-glyph', iconSize: [icon.fontSize, icon.fontSize] });
  }

  function featurePopup(feature, popup) {
    var el = document.createElement('div');
    var props = feature.properties || {};
    popup.fields.forEach(function (field) {
      var value = props[field];
      if (value === undefined || value === null) { return; }
      if (popup.localize && typeof value === 'number') { value = value.toLocaleString(); }
      el.appendChild(textNode(popup.labels ? field + ': ' + value : String(value)));
    });
    return el;
  }

  commands.forEach(function (cmd) {
    if (cmd.kind === 'marker') {
      var options = cmd.icon ? { icon: glyphIcon(cmd.icon, cmd.rotation || 0) } : {};
      L.marker(cmd.position, options).bindPopup(textNode(cmd.label)).addTo(map);
    } else if (cmd.kind === 'geojson') {
      L.geoJSON(cmd.data, {
        name: cmd.name,
        style: function (feature) { return feature.style; },
        onEachFeature: function (feature, layer) {
          var content = featurePopup(feature, cmd.popup);
          if (cmd.popup.sticky) {
            layer.bindTooltip(content, { sticky: true });
          } else {
            layer.bindPopup(content, { maxWidth: cmd.popup.maxWidth });
          }
        }
      }).addTo(map);
    }
  });
})();
</script>
</body>
</html>
"#;

#[derive(Debug, Clone, PartialEq)]
pub struct LeafletCanvas {
    view: MapView,
    commands: Vec<Value>,
}

impl LeafletCanvas {
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }
}

#[derive(Debug, Clone)]
pub struct LeafletSink {
    title: String,
}

impl LeafletSink {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn to_html(&self, canvas: &LeafletCanvas) -> Result<String, RenderError> {
        let tiles = canvas.view.tiles;
        let view = json!({
            "center": canvas.view.center.to_array(),
            "zoom": canvas.view.zoom,
            "tiles": {
                "url": tiles.url_template(),
                "attribution": tiles.attribution(),
                "subdomains": tiles.subdomains(),
                "maxZoom": tiles.max_zoom(),
            }
        });

        Ok(PAGE_TEMPLATE
            .replace("__TITLE__", &escape_html(&self.title))
            .replace("__LEAFLET__", LEAFLET_VERSION)
            .replace("__VIEW__", &script_json(&view)?)
            .replace("__COMMANDS__", &script_json(&canvas.commands)?))
    }
}

impl Default for LeafletSink {
    fn default() -> Self {
        Self::new("frontmap")
    }
}

impl RenderSink for LeafletSink {
    type Canvas = LeafletCanvas;

    fn create_canvas(&self, view: &MapView) -> LeafletCanvas {
        LeafletCanvas {
            view: *view,
            commands: Vec::new(),
        }
    }

    fn add_marker(&self, canvas: &mut LeafletCanvas, marker: &MarkerSpec) -> Result<(), RenderError> {
        let mut cmd = Map::new();
        cmd.insert("kind".to_string(), json!("marker"));
        cmd.insert("position".to_string(), json!(marker.position.to_array()));
        cmd.insert("label".to_string(), json!(marker.label));
        if let Some(rotation) = marker.icon_rotation_deg {
            cmd.insert("rotation".to_string(), json!(rotation));
        }
        if let MarkerIcon::Glyph {
            glyph,
            font_size_px,
            color,
        } = &marker.icon
        {
            cmd.insert(
                "icon".to_string(),
                json!({ "glyph": glyph, "fontSize": font_size_px, "color": color }),
            );
        }
        canvas.commands.push(Value::Object(cmd));
        Ok(())
    }

    fn add_styled_feature_collection(
        &self,
        canvas: &mut LeafletCanvas,
        collection: &StyledPolygonCollection,
        popup: &PopupConfig,
    ) -> Result<(), RenderError> {
        let mut data = collection.to_feature_collection();
        if let Some(features) = data.get_mut("features").and_then(Value::as_array_mut) {
            for (feature, styled) in features.iter_mut().zip(&collection.features) {
                if let Value::Object(obj) = feature {
                    // Foreign member read back by the page's style callback.
                    obj.insert("style".to_string(), to_value(&styled.style)?);
                }
            }
        }

        canvas.commands.push(json!({
            "kind": "geojson",
            "name": collection.name,
            "data": data,
            "popup": {
                "fields": popup.fields,
                "labels": popup.labels,
                "localize": popup.localize,
                "sticky": popup.sticky,
                "maxWidth": popup.max_width,
            },
        }));
        Ok(())
    }

    fn save_artifact(&self, canvas: &LeafletCanvas, path: &Path) -> Result<(), RenderError> {
        let html = self.to_html(canvas)?;
        let io_err = |source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let tmp = path.with_extension("html.tmp");
        let written = std::fs::write(&tmp, html.as_bytes())
            .and_then(|()| std::fs::rename(&tmp, path));
        if let Err(source) = written {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(source));
        }

        info!(
            path = %path.display(),
            commands = canvas.commands.len(),
            bytes = html.len(),
            "map written"
        );
        Ok(())
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, RenderError> {
    serde_json::to_value(value).map_err(|e| RenderError::Encode(e.to_string()))
}

/// JSON that is safe to paste inside a `<script>` element. `<`, `>` and `&`
/// only occur inside JSON strings, where the `\u` escapes are equivalent.
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, RenderError> {
    let text = serde_json::to_string(value).map_err(|e| RenderError::Encode(e.to_string()))?;
    Ok(text
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
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
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::render_scene;
    use crate::view::TileStyle;
    use formats::{GeoFeature, Geometry};
    use foundation::LatLon;
    use layers::{DrawCommand, MapScene};
    use pretty_assertions::assert_eq;

    fn polygon(props: Value) -> GeoFeature {
        GeoFeature::new(
            Geometry::Polygon(vec![vec![
                LatLon::new(50.0, 30.0),
                LatLon::new(50.0, 31.0),
                LatLon::new(51.0, 31.0),
                LatLon::new(50.0, 30.0),
            ]]),
            props.as_object().cloned().unwrap(),
        )
    }

    fn scene() -> MapScene {
        let mut collection = StyledPolygonCollection::default();
        collection.push(polygon(json!({ "name": "Zone", "fill": "#ff0000" })), 0.5);

        let mut plane = MarkerSpec::new(LatLon::new(52.0, 21.0), "abc-CS-Poland");
        plane.icon = MarkerIcon::plane();
        plane.icon_rotation_deg = Some(-45.0);

        MapScene {
            commands: vec![
                DrawCommand::AddMarker(MarkerSpec::new(LatLon::new(50.0, 30.0), "А - B")),
                DrawCommand::AddStyledFeatureCollection {
                    collection,
                    popup: PopupConfig::default(),
                },
                DrawCommand::AddMarker(plane),
            ],
        }
    }

    #[test]
    fn canvas_records_marker_and_collection_commands() {
        let sink = LeafletSink::default();
        let canvas = render_scene(&sink, &MapView::default(), &scene()).expect("render");
        assert_eq!(canvas.command_count(), 3);

        assert_eq!(
            canvas.commands[0],
            json!({ "kind": "marker", "position": [50.0, 30.0], "label": "А - B" })
        );
        assert_eq!(
            canvas.commands[2]["icon"],
            json!({ "glyph": "✈", "fontSize": 24, "color": "#2c54aa" })
        );
        assert_eq!(canvas.commands[2]["rotation"], json!(-45.0));

        let geojson = &canvas.commands[1];
        assert_eq!(geojson["name"], json!("Colored Polygons"));
        assert_eq!(geojson["popup"]["maxWidth"], json!(300));
        assert_eq!(geojson["popup"]["fields"], json!(["name"]));
        assert_eq!(
            geojson["data"]["features"][0]["style"],
            json!({ "fillColor": "#ff0000", "color": "#000000", "weight": 0.5, "fillOpacity": 0.5 })
        );
    }

    #[test]
    fn html_embeds_view_and_commands() {
        let sink = LeafletSink::new("Front & aircraft");
        let view = MapView {
            tiles: TileStyle::OpenStreetMap,
            ..MapView::default()
        };
        let canvas = render_scene(&sink, &view, &scene()).expect("render");
        let html = sink.to_html(&canvas).expect("html");

        assert!(html.contains("<title>Front &amp; aircraft</title>"));
        assert!(html.contains("leaflet@1.9.4/dist/leaflet.js"));
        assert!(html.contains("[49.7377041,32.9794409]"));
        assert!(html.contains("tile.openstreetmap.org"));
        assert!(html.contains("\"label\":\"А - B\""));
        assert!(!html.contains("__COMMANDS__"));
    }

    #[test]
    fn labels_cannot_break_out_of_the_script() {
        let sink = LeafletSink::default();
        let mut canvas = sink.create_canvas(&MapView::default());
        sink.add_marker(
            &mut canvas,
            &MarkerSpec::new(LatLon::new(0.0, 0.0), "</script><b>x</b>"),
        )
        .expect("marker");

        let html = sink.to_html(&canvas).expect("html");

        assert_eq!(html.matches("</script>").count(), 2);
        assert!(html.contains("\\u003c/script\\u003e\\u003cb\\u003ex"));
    }

    #[test]
    fn save_writes_a_single_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out").join("ukraine_map.html");
        let sink = LeafletSink::default();
        let canvas = render_scene(&sink, &MapView::default(), &scene()).expect("render");

        sink.save_artifact(&canvas, &path).expect("save");

        let written = std::fs::read_to_string(&path).expect("read back");
        assert!(written.starts_with("<!DOCTYPE html>"));
        let entries: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn failed_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        // A non-empty directory at the target path makes the final rename fail.
        let path = dir.path().join("ukraine_map.html");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"x").unwrap();
        let sink = LeafletSink::default();
        let canvas = render_scene(&sink, &MapView::default(), &scene()).expect("render");

        let err = sink.save_artifact(&canvas, &path).unwrap_err();

        assert!(matches!(err, RenderError::Io { .. }));
        assert!(!dir.path().join("ukraine_map.html.tmp").exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn collection_command_wraps_the_feature_collection() {
        let mut collection = StyledPolygonCollection::default();
        collection.push(polygon(json!({ "name": "Zone" })), 0.0);
        let sink = LeafletSink::default();
        let mut canvas = sink.create_canvas(&MapView::default());
        sink.add_styled_feature_collection(&mut canvas, &collection, &PopupConfig::default())
            .expect("collection");

        let mut expected = collection.to_feature_collection();
        expected["features"][0]["style"] =
            json!({ "fillColor": "#3388ff", "color": "#000000", "weight": 0.0, "fillOpacity": 0.5 });
        assert_eq!(canvas.commands[0]["data"], expected);
    }
}
