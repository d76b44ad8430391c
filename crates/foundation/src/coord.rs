/// A geographic position in decimal degrees, latitude first.
///
/// GeoJSON and most feeds order coordinates as `[lon, lat]`; use
/// [`LatLon::from_lon_lat`] at those boundaries so the swap happens once.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLon {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl LatLon {
    pub const fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    pub const fn from_lon_lat(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    /// `[lat, lon]`, the order Leaflet expects.
    pub fn to_array(self) -> [f64; 2] {
        [self.lat_deg, self.lon_deg]
    }
}
