use std::fmt::Display;

use crate::{Error, LocalCoord, Converter};

/// Mean radius of Earth in meters
///
/// <https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius>
const EARTH_MEAN_RADIUS_M: f64 = 6371.0088 * 1000.0;

/// A WGS84 longitude/latitude point in decimal degrees. Longitude comes
/// first, matching the order the projection code works in.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoCoord {
    #[cfg_attr(feature = "serde", serde(alias = "lon"))]
    pub(crate) longitude: f64,
    #[cfg_attr(feature = "serde", serde(alias = "lat"))]
    pub(crate) latitude: f64,
}

impl GeoCoord {
    /// Unchecked constructor. The converter accepts any value, so nothing
    /// is validated here.
    pub fn new(lon: f64, lat: f64) -> GeoCoord {
        Self {
            longitude: lon,
            latitude: lat,
        }
    }

    /// Tries to create a point from a lon/lat pair. First checks if the
    /// values are valid:
    /// * Longitude must be in range [-180,180]
    /// * Latitude must be in range [-90,90]
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] if either longitude or latitude are invalid.
    ///
    /// # Usage
    ///
    /// ```
    /// use orthoview::GeoCoord;
    ///
    /// let coord = GeoCoord::create(21.0122, 52.2297).unwrap();
    ///
    /// assert_eq!(coord.longitude(), 21.0122);
    /// assert_eq!(coord.latitude(), 52.2297);
    ///
    /// assert!(GeoCoord::create(0.0, 100.0).is_err());
    /// assert!(GeoCoord::create(-200.0, 0.0).is_err());
    /// ```
    pub fn create(lon: f64, lat: f64) -> Result<GeoCoord, Error> {
        if !(-180_f64..=180_f64).contains(&lon) {
            Err(Error::InvalidCoord(format!("Longitude {lon} outside of valid range [-180, 180].")))
        } else if !(-90_f64..=90_f64).contains(&lat) {
            Err(Error::InvalidCoord(format!("Latitude {lat} outside of valid range [-90, 90].")))
        } else {
            Ok(GeoCoord::new(lon, lat))
        }
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite()
    }

    /// Returns the distance in meters between two points
    /// using the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
    pub fn haversine(&self, other: &GeoCoord) -> f64 {
        let lat1_r = self.latitude.to_radians();
        let lat2_r = other.latitude.to_radians();

        2.0 * EARTH_MEAN_RADIUS_M * (
            ((other.latitude - self.latitude).to_radians() / 2.0).sin().powi(2) +
            lat1_r.cos() * lat2_r.cos() *
            ((other.longitude - self.longitude).to_radians() / 2.0).sin().powi(2)
        ).sqrt().asin()
    }

    /// Converts to the viewer's LOCAL frame with `converter`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFinite`] if either component is NaN or infinite.
    pub fn to_local(&self, converter: &Converter) -> Result<LocalCoord, Error> {
        converter.to_local(*self)
    }
}

impl From<(f64, f64)> for GeoCoord {
    /// `(longitude, latitude)`
    fn from((lon, lat): (f64, f64)) -> Self {
        GeoCoord::new(lon, lat)
    }
}

impl Display for GeoCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let lon = buf.format(self.longitude);
        let mut buf = ryu::Buffer::new();
        let lat = buf.format(self.latitude);
        write!(
            f,
            "{lon} {lat}",
        )
    }
}
