use foundation::LatLon;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(LatLon),
    MultiPoint(Vec<LatLon>),
    LineString(Vec<LatLon>),
    MultiLineString(Vec<Vec<LatLon>>),
    Polygon(Vec<Vec<LatLon>>),
    MultiPolygon(Vec<Vec<Vec<LatLon>>>),
    /// Any other geometry type (e.g. GeometryCollection), kept verbatim so it
    /// can be passed through to the renderer untouched.
    Other { kind: String, raw: Value },
}

impl Geometry {
    pub fn type_name(&self) -> &str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::Other { kind, .. } => kind.as_str(),
        }
    }

    pub fn is_point(&self) -> bool {
        matches!(self, Geometry::Point(_))
    }
}

/// One geojson feature with its property bag.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFeature {
    pub id: Option<Value>,
    pub properties: Map<String, Value>,
    pub geometry: Geometry,
}

impl GeoFeature {
    pub fn new(geometry: Geometry, properties: Map<String, Value>) -> Self {
        Self {
            id: None,
            properties,
            geometry,
        }
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key).filter(|v| !v.is_null())
    }

    /// String property lookup with an explicit default for absent, null or
    /// non-string values.
    pub fn str_property_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.property(key).and_then(Value::as_str).unwrap_or(default)
    }

    pub fn from_geojson_value(value: &Value) -> Result<Self, String> {
        let obj = value
            .as_object()
            .ok_or("feature must be an object".to_string())?;

        if let Some(ty) = obj.get("type").and_then(Value::as_str)
            && ty != "Feature"
        {
            return Err(format!("unexpected feature type: {ty}"));
        }

        let properties = match obj.get("properties") {
            Some(Value::Object(map)) => map.clone(),
            Some(Value::Null) | None => Map::new(),
            Some(_) => return Err("feature properties must be an object".to_string()),
        };

        let geometry_val = obj
            .get("geometry")
            .filter(|g| !g.is_null())
            .ok_or("feature missing geometry".to_string())?;
        let geometry = parse_geometry(geometry_val)?;

        Ok(Self {
            id: obj.get("id").filter(|v| !v.is_null()).cloned(),
            properties,
            geometry,
        })
    }

    /// Re-emits the feature as geojson. Coordinates are normalized to 2D
    /// `[lon, lat]` and members other than `id`, `properties` and `geometry`
    /// are not carried over.
    pub fn to_geojson_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_string(), Value::String("Feature".to_string()));
        if let Some(id) = &self.id {
            obj.insert("id".to_string(), id.clone());
        }
        obj.insert(
            "properties".to_string(),
            Value::Object(self.properties.clone()),
        );
        obj.insert(
            "geometry".to_string(),
            geometry_to_geojson_value(&self.geometry),
        );
        Value::Object(obj)
    }
}

fn geometry_to_geojson_value(geom: &Geometry) -> Value {
    let coords = match geom {
        Geometry::Point(p) => point_coords(p),
        Geometry::MultiPoint(ps) | Geometry::LineString(ps) => line_coords(ps),
        Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => {
            Value::Array(lines.iter().map(|l| line_coords(l)).collect())
        }
        Geometry::MultiPolygon(polys) => Value::Array(
            polys
                .iter()
                .map(|poly| Value::Array(poly.iter().map(|r| line_coords(r)).collect()))
                .collect(),
        ),
        Geometry::Other { raw, .. } => return raw.clone(),
    };

    let mut obj = Map::new();
    obj.insert(
        "type".to_string(),
        Value::String(geom.type_name().to_string()),
    );
    obj.insert("coordinates".to_string(), coords);
    Value::Object(obj)
}

fn point_coords(p: &LatLon) -> Value {
    Value::Array(vec![Value::from(p.lon_deg), Value::from(p.lat_deg)])
}

fn line_coords(ps: &[LatLon]) -> Value {
    Value::Array(ps.iter().map(point_coords).collect())
}

pub fn parse_geometry(value: &Value) -> Result<Geometry, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    let known = matches!(
        ty,
        "Point" | "MultiPoint" | "LineString" | "MultiLineString" | "Polygon" | "MultiPolygon"
    );
    if !known {
        return Ok(Geometry::Other {
            kind: ty.to_string(),
            raw: value.clone(),
        });
    }

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "Point" => Ok(Geometry::Point(parse_point(coords)?)),
        "MultiPoint" => Ok(Geometry::MultiPoint(parse_points(coords)?)),
        "LineString" => Ok(Geometry::LineString(parse_points(coords)?)),
        "MultiLineString" => Ok(Geometry::MultiLineString(parse_rings(coords)?)),
        "Polygon" => Ok(Geometry::Polygon(parse_rings(coords)?)),
        _ => Ok(Geometry::MultiPolygon(parse_multi_polygon(coords)?)),
    }
}

fn parse_point(coords: &Value) -> Result<LatLon, String> {
    let arr = coords
        .as_array()
        .ok_or("Point coordinates must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("Point coordinates must have [lon, lat]".to_string());
    }
    let lon = arr[0]
        .as_f64()
        .ok_or("Point lon must be a number".to_string())?;
    let lat = arr[1]
        .as_f64()
        .ok_or("Point lat must be a number".to_string())?;
    Ok(LatLon::from_lon_lat(lon, lat))
}

fn parse_points(coords: &Value) -> Result<Vec<LatLon>, String> {
    let arr = coords
        .as_array()
        .ok_or("coordinates must be an array".to_string())?;
    arr.iter().map(parse_point).collect()
}

fn parse_rings(coords: &Value) -> Result<Vec<Vec<LatLon>>, String> {
    let rings = coords
        .as_array()
        .ok_or("coordinates must be an array of rings".to_string())?;
    rings.iter().map(parse_points).collect()
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<Vec<Vec<LatLon>>>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    polys.iter().map(parse_rings).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parses_point_in_lon_lat_order() {
        let f = GeoFeature::from_geojson_value(&json!({
            "type": "Feature",
            "properties": { "name": "A///B" },
            "geometry": { "type": "Point", "coordinates": [30.0, 50.0] }
        }))
        .expect("feature");
        assert_eq!(f.geometry, Geometry::Point(LatLon::new(50.0, 30.0)));
        assert_eq!(f.str_property_or("name", ""), "A///B");
    }

    #[test]
    fn unknown_geometry_is_kept_verbatim() {
        let raw = json!({ "type": "GeometryCollection", "geometries": [] });
        let f = GeoFeature::from_geojson_value(&json!({
            "properties": null,
            "geometry": raw.clone()
        }))
        .expect("feature");
        assert_eq!(f.geometry.type_name(), "GeometryCollection");
        assert!(f.properties.is_empty());
        assert_eq!(f.to_geojson_value()["geometry"], raw);
    }

    #[test]
    fn polygon_round_trips_coordinates() {
        let f = GeoFeature::from_geojson_value(&json!({
            "type": "Feature",
            "id": 7,
            "properties": { "fill": "#ff0000" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[30.0, 50.0], [31.0, 50.0], [31.0, 51.0], [30.0, 50.0]]]
            }
        }))
        .expect("feature");
        let out = f.to_geojson_value();
        assert_eq!(out["id"], json!(7));
        assert_eq!(out["geometry"]["type"], json!("Polygon"));
        assert_eq!(out["geometry"]["coordinates"][0][1], json!([31.0, 50.0]));
    }

    #[test]
    fn rejects_malformed_records() {
        assert!(GeoFeature::from_geojson_value(&json!("x")).is_err());
        assert!(GeoFeature::from_geojson_value(&json!({ "properties": {} })).is_err());
        assert!(
            GeoFeature::from_geojson_value(&json!({
                "geometry": { "type": "Point", "coordinates": [1.0] }
            }))
            .is_err()
        );
    }

    #[test]
    fn str_property_or_falls_back_for_null_and_non_strings() {
        let f = GeoFeature::new(
            Geometry::Point(LatLon::new(0.0, 0.0)),
            json!({ "fill": null, "stroke": 5 }).as_object().cloned().unwrap(),
        );
        assert_eq!(f.str_property_or("fill", "#3388ff"), "#3388ff");
        assert_eq!(f.str_property_or("stroke", "#000000"), "#000000");
        assert_eq!(f.str_property_or("absent", "d"), "d");
    }

    #[test]
    fn reemitted_feature_is_two_dimensional() {
        let raw = json!({
            "type": "Feature",
            "bbox": [30.0, 50.0, 31.0, 51.0],
            "properties": {},
            "geometry": { "type": "LineString", "coordinates": [[30.0, 50.0, 120.0], [31.0, 51.0, 80.0]] }
        });
        let f = GeoFeature::from_geojson_value(&raw).expect("feature");
        assert_eq!(
            f.to_geojson_value(),
            json!({
                "type": "Feature",
                "properties": {},
                "geometry": { "type": "LineString", "coordinates": [[30.0, 50.0], [31.0, 51.0]] }
            })
        );
    }
}
