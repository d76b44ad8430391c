//! Decoding of the aircraft state-vector document.
//!
//! Each state vector is a positional JSON array. Only the fields needed to
//! place and label a marker are read.

use foundation::LatLon;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{DecodeError, Decoded, SkippedRecord};

pub const IDX_ICAO24: usize = 0;
pub const IDX_CALLSIGN: usize = 1;
pub const IDX_ORIGIN_COUNTRY: usize = 2;
pub const IDX_LONGITUDE: usize = 5;
pub const IDX_LATITUDE: usize = 6;
pub const IDX_TRUE_TRACK: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AircraftState {
    pub icao24: String,
    pub callsign: String,
    pub origin_country: String,
    pub position: LatLon,
    /// Clockwise from north, degrees.
    pub true_track_deg: f64,
}

/// Top-level response. `states` is `null` when nothing is inside the box.
#[derive(Debug, Deserialize)]
struct StatesResponse {
    #[serde(default)]
    states: Option<Vec<Value>>,
}

impl AircraftState {
    pub fn from_row(row: &Value) -> Result<Self, String> {
        let fields = row
            .as_array()
            .ok_or("state vector must be an array".to_string())?;

        let text = |idx: usize, name: &str| -> Result<String, String> {
            fields
                .get(idx)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| format!("missing {name} (index {idx})"))
        };
        let number = |idx: usize, name: &str| -> Result<f64, String> {
            fields
                .get(idx)
                .and_then(Value::as_f64)
                .ok_or_else(|| format!("missing {name} (index {idx})"))
        };

        let lon = number(IDX_LONGITUDE, "longitude")?;
        let lat = number(IDX_LATITUDE, "latitude")?;

        Ok(Self {
            icao24: text(IDX_ICAO24, "icao24")?,
            callsign: text(IDX_CALLSIGN, "callsign")?,
            origin_country: text(IDX_ORIGIN_COUNTRY, "origin country")?,
            position: LatLon::from_lon_lat(lon, lat),
            true_track_deg: number(IDX_TRUE_TRACK, "true track")?,
        })
    }
}

/// Decodes the state-vector document. Incomplete rows are reported in
/// `skipped`; a missing or null `states` member yields no records.
pub fn decode_states(body: &str) -> Result<Decoded<AircraftState>, DecodeError> {
    let value: Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(DecodeError::UnexpectedShape(
            "aircraft document must be an object".to_string(),
        ));
    }
    let response: StatesResponse = serde_json::from_value(value)
        .map_err(|e| DecodeError::UnexpectedShape(format!("states: {e}")))?;

    let Some(rows) = response.states else {
        return Ok(Decoded::empty());
    };

    let mut out = Decoded {
        records: Vec::with_capacity(rows.len()),
        skipped: Vec::new(),
    };
    for (index, row) in rows.iter().enumerate() {
        match AircraftState::from_row(row) {
            Ok(state) => out.records.push(state),
            Err(reason) => out.skipped.push(SkippedRecord { index, reason }),
        }
    }
    Ok(out)
}
