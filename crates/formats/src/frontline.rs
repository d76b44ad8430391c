//! Decoding of the battlefront history document.
//!
//! The endpoint serves `{ "map": { "features": [...] } }`, but the body
//! arrives wrapped in one layer of quoting. [`unwrap_quoted_body`] removes
//! that layer before the JSON is decoded.

use std::borrow::Cow;

use serde_json::Value;

use crate::error::{DecodeError, Decoded, SkippedRecord};
use crate::feature::GeoFeature;
use crate::sanitize::sanitize_value;

pub const FEATURES_PATH: &str = "map.features";

/// Removes one layer of quoting around the document.
///
/// A body that is itself a valid JSON string literal is decoded once, which
/// also resolves escaped inner quotes. Otherwise a single pair of
/// surrounding `"` characters is stripped. Bodies without surrounding quotes
/// are returned trimmed.
pub fn unwrap_quoted_body(body: &str) -> Cow<'_, str> {
    let trimmed = body.trim();
    if trimmed.len() < 2 || !trimmed.starts_with('"') || !trimmed.ends_with('"') {
        return Cow::Borrowed(trimmed);
    }
    match serde_json::from_str::<String>(trimmed) {
        Ok(inner) => Cow::Owned(inner),
        Err(_) => Cow::Borrowed(&trimmed[1..trimmed.len() - 1]),
    }
}

/// Decodes the frontline body into sanitized features, in document order.
///
/// String property values are brace-sanitized before the feature is parsed,
/// so every returned [`GeoFeature`] is already sanitized. Records that are
/// not valid features are reported in `skipped` and do not fail the decode.
pub fn decode_frontline(body: &str) -> Result<Decoded<GeoFeature>, DecodeError> {
    let inner = unwrap_quoted_body(body);
    let mut document: Value = serde_json::from_str(&inner)?;

    let features = document
        .pointer_mut("/map/features")
        .and_then(Value::as_array_mut)
        .ok_or(DecodeError::MissingPath(FEATURES_PATH))?;

    let mut out = Decoded {
        records: Vec::with_capacity(features.len()),
        skipped: Vec::new(),
    };

    for (index, feature) in features.iter_mut().enumerate() {
        if let Some(properties) = feature.get_mut("properties") {
            sanitize_value(properties);
        }
        match GeoFeature::from_geojson_value(feature) {
            Ok(f) => out.records.push(f),
            Err(reason) => out.skipped.push(SkippedRecord { index, reason }),
        }
    }

    Ok(out)
}
