use std::{fmt::Display, str::FromStr};

use log::debug;

use crate::{Converter, Error, GeoCoord, LocalCoord};

/// The map center as carried in the URL path: `/{lat}/{lon}`, both in
/// degrees with five decimals.
///
/// # Usage
///
/// ```
/// use orthoview::ViewPath;
///
/// let path: ViewPath = "/52.2297/21.0122".parse().unwrap();
///
/// assert_eq!(path.latitude(), 52.2297);
/// assert_eq!(path.longitude(), 21.0122);
/// assert_eq!(path.to_string(), "/52.22970/21.01220");
///
/// assert!("52.2297".parse::<ViewPath>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewPath {
    latitude: f64,
    longitude: f64,
}

impl ViewPath {
    pub fn new(geo: GeoCoord) -> ViewPath {
        Self {
            latitude: geo.latitude(),
            longitude: geo.longitude(),
        }
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn to_geo(&self) -> GeoCoord {
        GeoCoord::new(self.longitude, self.latitude)
    }
}

fn parse_degrees(segment: Option<&str>, name: &str) -> Result<f64, Error> {
    let segment = segment
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::InvalidPath(format!("Missing {name}")))?;

    let value: f64 = segment
        .parse()
        .map_err(|_| Error::InvalidPath(format!("{name} {segment} is not a number")))?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidPath(format!("{name} {segment} is not finite")))
    }
}

impl FromStr for ViewPath {
    type Err = Error;

    /// Accepts the path with or without its leading slash. Segments past
    /// the second are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.strip_prefix('/').unwrap_or(s);
        let mut segments = path.split('/');

        let latitude = parse_degrees(segments.next(), "Latitude")?;
        let longitude = parse_degrees(segments.next(), "Longitude")?;

        Ok(Self { latitude, longitude })
    }
}

impl Display for ViewPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{:.5}/{:.5}", self.latitude, self.longitude)
    }
}

/// Formats the LOCAL map `center` as a URL path.
///
/// # Errors
///
/// Returns [`Error::NonFinite`] if `center` is not finite or lies too far
/// out to convert.
///
/// # Usage
///
/// ```
/// use orthoview::{encode, Converter, GeoCoord};
///
/// let converter = Converter::shared();
/// let center = converter.to_local(GeoCoord::new(21.0122, 52.2297)).unwrap();
///
/// assert_eq!(encode(converter, center).unwrap(), "/52.22970/21.01220");
/// ```
pub fn encode(converter: &Converter, center: LocalCoord) -> Result<String, Error> {
    let geo = converter.to_geographic(center)?;
    Ok(ViewPath::new(geo).to_string())
}

/// Reads a LOCAL map center from a URL path of the form `{lat}/{lon}`.
/// Anything that does not parse yields `None`.
///
/// # Usage
///
/// ```
/// use orthoview::{decode, Converter};
///
/// let converter = Converter::shared();
///
/// assert!(decode(converter, "52.2297/21.0122").is_some());
/// assert!(decode(converter, "").is_none());
/// assert!(decode(converter, "abc/def").is_none());
/// ```
pub fn decode(converter: &Converter, path: &str) -> Option<LocalCoord> {
    if path.is_empty() {
        return None;
    }

    let view_path = match path.parse::<ViewPath>() {
        Ok(view_path) => view_path,
        Err(err) => {
            debug!("Ignoring URL path {path:?}: {err}");
            return None;
        }
    };

    converter.to_local(view_path.to_geo()).ok()
}
