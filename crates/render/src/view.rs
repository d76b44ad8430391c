use std::fmt;
use std::str::FromStr;

use foundation::LatLon;
use serde::{Deserialize, Serialize};

/// Base map tiles.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileStyle {
    #[default]
    CartodbDarkMatter,
    CartodbPositron,
    OpenStreetMap,
}

const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
const CARTO_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>";

impl TileStyle {
    pub const ALL: [TileStyle; 3] = [
        TileStyle::CartodbDarkMatter,
        TileStyle::CartodbPositron,
        TileStyle::OpenStreetMap,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TileStyle::CartodbDarkMatter => "cartodb-dark-matter",
            TileStyle::CartodbPositron => "cartodb-positron",
            TileStyle::OpenStreetMap => "open-street-map",
        }
    }

    pub fn url_template(self) -> &'static str {
        match self {
            TileStyle::CartodbDarkMatter => {
                "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png"
            }
            TileStyle::CartodbPositron => {
                "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png"
            }
            TileStyle::OpenStreetMap => "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
        }
    }

    pub fn attribution(self) -> &'static str {
        match self {
            TileStyle::CartodbDarkMatter | TileStyle::CartodbPositron => CARTO_ATTRIBUTION,
            TileStyle::OpenStreetMap => OSM_ATTRIBUTION,
        }
    }

    pub fn subdomains(self) -> &'static str {
        match self {
            TileStyle::CartodbDarkMatter | TileStyle::CartodbPositron => "abcd",
            TileStyle::OpenStreetMap => "abc",
        }
    }

    pub fn max_zoom(self) -> u8 {
        match self {
            TileStyle::CartodbDarkMatter | TileStyle::CartodbPositron => 20,
            TileStyle::OpenStreetMap => 19,
        }
    }
}

impl fmt::Display for TileStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TileStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TileStyle::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = TileStyle::ALL.iter().map(|t| t.name()).collect();
                format!("unknown tile style {s:?} (expected one of {})", names.join(", "))
            })
    }
}

/// Initial viewport of the map.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MapView {
    pub center: LatLon,
    pub zoom: u8,
    pub tiles: TileStyle,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: LatLon::new(49.7377041, 32.9794409),
            zoom: 6,
            tiles: TileStyle::default(),
        }
    }
}
