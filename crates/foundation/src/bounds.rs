/// Axis-aligned lat/lon bounding box in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundsError {
    NotFinite,
    Inverted { axis: &'static str, min: f64, max: f64 },
    OutOfRange { axis: &'static str, value: f64 },
}

impl std::fmt::Display for BoundsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundsError::NotFinite => write!(f, "bounding box values must be finite"),
            BoundsError::Inverted { axis, min, max } => {
                write!(f, "{axis} minimum {min} is greater than maximum {max}")
            }
            BoundsError::OutOfRange { axis, value } => {
                write!(f, "{axis} value {value} is out of range")
            }
        }
    }
}

impl std::error::Error for BoundsError {}

impl GeoBounds {
    pub const fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// Parses `latMin,latMax,lonMin,lonMax`.
    pub fn parse(text: &str) -> Result<Self, String> {
        let parts: Vec<&str> = text.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!(
                "expected latMin,latMax,lonMin,lonMax but got {} values",
                parts.len()
            ));
        }
        let mut values = [0.0f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|e| format!("invalid coordinate {part:?}: {e}"))?;
        }
        let bounds = Self::new(values[0], values[1], values[2], values[3]);
        bounds.validate().map_err(|e| e.to_string())?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<(), BoundsError> {
        let all = [self.lat_min, self.lat_max, self.lon_min, self.lon_max];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(BoundsError::NotFinite);
        }
        for (axis, value, limit) in [
            ("latitude", self.lat_min, 90.0),
            ("latitude", self.lat_max, 90.0),
            ("longitude", self.lon_min, 180.0),
            ("longitude", self.lon_max, 180.0),
        ] {
            if value.abs() > limit {
                return Err(BoundsError::OutOfRange { axis, value });
            }
        }
        if self.lat_min > self.lat_max {
            return Err(BoundsError::Inverted {
                axis: "latitude",
                min: self.lat_min,
                max: self.lat_max,
            });
        }
        if self.lon_min > self.lon_max {
            return Err(BoundsError::Inverted {
                axis: "longitude",
                min: self.lon_min,
                max: self.lon_max,
            });
        }
        Ok(())
    }
}
