use std::time::Duration;

use crate::LocalCoord;

const TILE_SERVICE: &str = "https://geoportal.b-cdn.net/wss/service/PZGIK/ORTO/REST";

/// Orthophoto imagery the viewer can display. Only one is shown at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Imagery {
    #[default]
    Standard,
    High,
}

impl Imagery {
    /// Lowest zoom level the tile service provides.
    pub const MIN_TILE_ZOOM: u32 = 13;
    /// Highest zoom level the tile service provides; the engine upscales past it.
    pub const MAX_TILE_ZOOM: u32 = 16;

    /// XYZ tile URL template with `{z}`, `{y}` and `{x}` placeholders.
    pub fn url_template(self) -> String {
        let resolution = match self {
            Imagery::Standard => "StandardResolution",
            Imagery::High => "HighResolution",
        };
        format!("{TILE_SERVICE}/{resolution}/tile/{{z}}/{{y}}/{{x}}")
    }

    /// URL of a single tile. The zoom is clamped to the levels the service
    /// provides.
    ///
    /// ```
    /// use orthoview::Imagery;
    ///
    /// assert_eq!(
    ///     Imagery::High.tile_url(14, 9000, 5000),
    ///     "https://geoportal.b-cdn.net/wss/service/PZGIK/ORTO/REST/HighResolution/tile/14/5000/9000",
    /// );
    /// ```
    pub fn tile_url(self, z: u32, x: u32, y: u32) -> String {
        let z = z.clamp(Imagery::MIN_TILE_ZOOM, Imagery::MAX_TILE_ZOOM);
        self.url_template()
            .replace("{z}", &z.to_string())
            .replace("{y}", &y.to_string())
            .replace("{x}", &x.to_string())
    }

    pub fn toggled(self) -> Imagery {
        match self {
            Imagery::Standard => Imagery::High,
            Imagery::High => Imagery::Standard,
        }
    }
}

/// Startup settings of the viewer. Only the center survives a reload, via
/// the URL path; everything here is the fallback.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewConfig {
    /// Center shown when the URL carries no position.
    pub center: LocalCoord,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom levels reachable by the numbered zoom steps.
    pub zoom_steps: Vec<f64>,
    pub zoom_duration_ms: u64,
    pub imagery: Imagery,
}

impl ViewConfig {
    pub fn zoom_duration(&self) -> Duration {
        Duration::from_millis(self.zoom_duration_ms)
    }
}

impl Default for ViewConfig {
    #[allow(clippy::unreadable_literal)]
    fn default() -> Self {
        Self {
            // Web mercator of (-87.33081, 79.49346), about 21.56E 53.09N once calibrated
            center: LocalCoord::new(-9721621.299764123, 15221861.208254106),
            zoom: 13.,
            min_zoom: 11.,
            max_zoom: 18.,
            zoom_steps: vec![11., 11.87, 12.74, 13.61, 14.48, 15.35, 16.22, 17.1, 18.],
            zoom_duration_ms: 100,
            imagery: Imagery::Standard,
        }
    }
}
