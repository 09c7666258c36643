pub const STORAGE_KEY: &str = "workouts";
pub const DEFAULT_ZOOM: f64 = 13.;
pub const PAN_DURATION_SECS: f64 = 1.;

pub const TILE_URL: &str = "https://tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    pub storage_key: String,
    pub zoom: f64,
    pub pan_duration_secs: f64,
    pub tile_url: String,
    pub tile_attribution: String,
    pub popup_min_width: f64,
    pub popup_max_width: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.into(),
            zoom: DEFAULT_ZOOM,
            pan_duration_secs: PAN_DURATION_SECS,
            tile_url: TILE_URL.into(),
            tile_attribution: TILE_ATTRIBUTION.into(),
            popup_min_width: 100.,
            popup_max_width: 250.,
        }
    }
}
