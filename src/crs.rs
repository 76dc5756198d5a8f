use std::{fmt::Display, str::FromStr};

use crate::{
    constants::{GRS80_A, GRS80_F, WGS84_A, WGS84_F},
    Error,
};

/// Reference ellipsoid given by its semi-major axis and flattening.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipsoid {
    pub a: f64,
    pub f: f64,
}

impl Ellipsoid {
    pub const GRS80: Ellipsoid = Ellipsoid { a: GRS80_A, f: GRS80_F };
    pub const WGS84: Ellipsoid = Ellipsoid { a: WGS84_A, f: WGS84_F };

    fn from_name(name: &str) -> Result<Ellipsoid, Error> {
        match name {
            "GRS80" => Ok(Ellipsoid::GRS80),
            "WGS84" => Ok(Ellipsoid::WGS84),
            _ => Err(Error::InvalidDefinition(format!("Unknown ellipsoid {name}"))),
        }
    }

    /// Whether this ellipsoid belongs to the WGS84 datum family. GRS80 and
    /// WGS84 differ by well under a millimeter at ground level.
    pub fn is_wgs84_compatible(&self) -> bool {
        [Ellipsoid::GRS80, Ellipsoid::WGS84].iter().any(|known| {
            (self.a - known.a).abs() < 1e-3 && (self.f - known.f).abs() < 1e-12
        })
    }
}

/// A coordinate reference system, parsed from a proj4-style definition.
///
/// Only the two projections the viewer needs are understood:
/// `+proj=tmerc` and `+proj=longlat`. Datum shifts must be absent or
/// all-zero, so every definition shares the WGS84 datum.
///
/// # Usage
///
/// ```
/// use orthoview::ProjectionDefinition;
///
/// let def: ProjectionDefinition = "+proj=tmerc +lon_0=19 +k=0.9993 +x_0=500000 +y_0=-5300000 +ellps=GRS80"
///     .parse()
///     .unwrap();
///
/// match def {
///     ProjectionDefinition::TransverseMercator(params) => {
///         assert_eq!(params.lon_0, 19.0);
///         assert_eq!(params.k_0, 0.9993);
///     }
///     ProjectionDefinition::LongLat { .. } => unreachable!(),
/// }
///
/// assert!("+proj=tmerc +towgs84=23,-124,-82".parse::<ProjectionDefinition>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectionDefinition {
    TransverseMercator(TmercParams),
    LongLat {
        ellipsoid: Ellipsoid,
    },
}

/// Parameters of a `+proj=tmerc` definition. Angles in degrees, offsets in
/// meters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TmercParams {
    pub lat_0: f64,
    pub lon_0: f64,
    pub k_0: f64,
    pub x_0: f64,
    pub y_0: f64,
    pub ellipsoid: Ellipsoid,
}

impl TmercParams {
    /// The LOCAL system: central meridian 19°, scale 0.9993 on GRS80.
    pub const LOCAL: TmercParams = TmercParams {
        lat_0: 0.,
        lon_0: 19.,
        k_0: 0.9993,
        x_0: 500_000.,
        y_0: -5_300_000.,
        ellipsoid: Ellipsoid::GRS80,
    };
}

impl ProjectionDefinition {
    pub fn ellipsoid(&self) -> Ellipsoid {
        match self {
            ProjectionDefinition::TransverseMercator(TmercParams { ellipsoid, .. })
            | ProjectionDefinition::LongLat { ellipsoid } => *ellipsoid,
        }
    }

    pub fn is_geographic(&self) -> bool {
        matches!(self, ProjectionDefinition::LongLat { .. })
    }
}

fn parse_number(key: &str, value: Option<&str>) -> Result<f64, Error> {
    let value = value
        .ok_or_else(|| Error::InvalidDefinition(format!("Parameter +{key} has no value")))?;

    value
        .parse()
        .map_err(|_| Error::InvalidDefinition(format!("Parameter +{key}={value} is not a number")))
}

fn check_datum_shift(value: Option<&str>) -> Result<(), Error> {
    let value = value
        .ok_or_else(|| Error::InvalidDefinition("Parameter +towgs84 has no value".to_string()))?;

    for term in value.split(',') {
        let term = parse_number("towgs84", Some(term))?;
        if term != 0. {
            return Err(Error::InvalidDefinition(format!(
                "Datum shift +towgs84={value} is not supported"
            )));
        }
    }

    Ok(())
}

impl FromStr for ProjectionDefinition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut proj = None;
        let mut lat_0 = 0.;
        let mut lon_0 = 0.;
        let mut k_0 = 1.;
        let mut x_0 = 0.;
        let mut y_0 = 0.;
        let mut ellipsoid = Ellipsoid::WGS84;
        let mut semi_major = None;
        let mut inverse_flattening = None;

        for token in s.split_whitespace() {
            let token = token.strip_prefix('+').ok_or_else(|| {
                Error::InvalidDefinition(format!("Token {token} does not start with '+'"))
            })?;

            let mut pieces = token.splitn(2, '=');
            let key = pieces.next().unwrap_or_default();
            let value = pieces.next();

            match key {
                "proj" => proj = value,
                "lat_0" => lat_0 = parse_number(key, value)?,
                "lon_0" => lon_0 = parse_number(key, value)?,
                "k" | "k_0" => k_0 = parse_number(key, value)?,
                "x_0" => x_0 = parse_number(key, value)?,
                "y_0" => y_0 = parse_number(key, value)?,
                "ellps" => ellipsoid = Ellipsoid::from_name(value.unwrap_or_default())?,
                "datum" => match value {
                    Some("WGS84") => ellipsoid = Ellipsoid::WGS84,
                    _ => {
                        return Err(Error::InvalidDefinition(format!(
                            "Unknown datum {}",
                            value.unwrap_or_default()
                        )))
                    }
                },
                "a" => semi_major = Some(parse_number(key, value)?),
                "rf" => inverse_flattening = Some(parse_number(key, value)?),
                "towgs84" => check_datum_shift(value)?,
                "units" => {
                    if value != Some("m") {
                        return Err(Error::InvalidDefinition(format!(
                            "Unsupported units {}",
                            value.unwrap_or_default()
                        )));
                    }
                }
                "no_defs" | "type" => {}
                _ => {
                    return Err(Error::InvalidDefinition(format!("Unknown parameter +{key}")));
                }
            }
        }

        if let Some(a) = semi_major {
            ellipsoid.a = a;
        }
        if let Some(rf) = inverse_flattening {
            ellipsoid.f = 1. / rf;
        }

        match proj {
            Some("tmerc") => Ok(ProjectionDefinition::TransverseMercator(TmercParams {
                lat_0,
                lon_0,
                k_0,
                x_0,
                y_0,
                ellipsoid,
            })),
            Some("longlat" | "latlong") => Ok(ProjectionDefinition::LongLat { ellipsoid }),
            Some(other) => Err(Error::UnsupportedProjection(other.to_string())),
            None => Err(Error::InvalidDefinition("Missing +proj parameter".to_string())),
        }
    }
}

impl Display for ProjectionDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectionDefinition::TransverseMercator(TmercParams { lat_0, lon_0, k_0, x_0, y_0, ellipsoid }) => write!(
                f,
                "+proj=tmerc +lat_0={lat_0} +lon_0={lon_0} +k={k_0} +x_0={x_0} +y_0={y_0} +a={} +rf={}",
                ellipsoid.a,
                1. / ellipsoid.f,
            ),
            ProjectionDefinition::LongLat { ellipsoid } => write!(
                f,
                "+proj=longlat +a={} +rf={}",
                ellipsoid.a,
                1. / ellipsoid.f,
            ),
        }
    }
}

/// The two named reference systems the viewer converts between.
///
/// Built once at startup and never mutated; a [`crate::Converter`] takes
/// ownership of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionRegistry {
    pub(crate) local: ProjectionDefinition,
    pub(crate) geographic: ProjectionDefinition,
}

impl ProjectionRegistry {
    /// Registers the LOCAL and GEOGRAPHIC systems.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedProjection`] if `local` is not a transverse
    /// mercator, or if `geographic` is not a longitude/latitude system on a
    /// WGS84-compatible ellipsoid. No datum shift is ever applied between the
    /// two.
    pub fn new(local: ProjectionDefinition, geographic: ProjectionDefinition) -> Result<ProjectionRegistry, Error> {
        if local.is_geographic() {
            return Err(Error::UnsupportedProjection(format!("LOCAL must be projected, got {local}")));
        }
        if !geographic.is_geographic() {
            return Err(Error::UnsupportedProjection(format!("GEOGRAPHIC must be longlat, got {geographic}")));
        }
        if !geographic.ellipsoid().is_wgs84_compatible() {
            return Err(Error::UnsupportedProjection(format!(
                "GEOGRAPHIC must be on the WGS84 datum, got {geographic}"
            )));
        }

        Ok(Self { local, geographic })
    }

    /// Parses both systems from proj4-style definition strings.
    ///
    /// # Errors
    ///
    /// Any parse error of either definition, or the errors of
    /// [`ProjectionRegistry::new`].
    pub fn from_definitions(local: &str, geographic: &str) -> Result<ProjectionRegistry, Error> {
        ProjectionRegistry::new(local.parse()?, geographic.parse()?)
    }

    /// The viewer's standard systems, equivalent to parsing
    /// [`crate::LOCAL_DEFINITION`] and [`crate::GEOGRAPHIC_DEFINITION`].
    pub fn standard() -> ProjectionRegistry {
        Self {
            local: ProjectionDefinition::TransverseMercator(TmercParams::LOCAL),
            geographic: ProjectionDefinition::LongLat { ellipsoid: Ellipsoid::WGS84 },
        }
    }

    pub fn local(&self) -> &ProjectionDefinition {
        &self.local
    }

    pub fn geographic(&self) -> &ProjectionDefinition {
        &self.geographic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{GEOGRAPHIC_DEFINITION, LOCAL_DEFINITION};

    #[test]
    fn parses_standard_definitions() {
        let registry = ProjectionRegistry::from_definitions(LOCAL_DEFINITION, GEOGRAPHIC_DEFINITION).unwrap();

        assert_eq!(registry, ProjectionRegistry::standard());
        assert_eq!(*registry.local(), ProjectionDefinition::TransverseMercator(TmercParams::LOCAL));
        assert_eq!(*registry.geographic(), ProjectionDefinition::LongLat { ellipsoid: Ellipsoid::WGS84 });
    }

    #[test]
    fn rejects_unknown_projection() {
        let err = "+proj=merc +lon_0=0".parse::<ProjectionDefinition>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedProjection(name) if name == "merc"));
    }

    #[test]
    fn rejects_bad_tokens() {
        assert!("proj=tmerc".parse::<ProjectionDefinition>().is_err());
        assert!("+proj=tmerc +k=abc".parse::<ProjectionDefinition>().is_err());
        assert!("+proj=tmerc +ellps=bessel".parse::<ProjectionDefinition>().is_err());
        assert!("+proj=tmerc +units=ft".parse::<ProjectionDefinition>().is_err());
        assert!("+lon_0=19".parse::<ProjectionDefinition>().is_err());
    }

    #[test]
    fn display_parses_back() {
        let def = ProjectionDefinition::TransverseMercator(TmercParams::LOCAL);
        let parsed: ProjectionDefinition = def.to_string().parse().unwrap();

        let (ProjectionDefinition::TransverseMercator(params), ProjectionDefinition::TransverseMercator(expected)) = (parsed, def) else {
            panic!("expected a transverse mercator definition");
        };
        assert_eq!(params.lon_0, expected.lon_0);
        assert_eq!(params.y_0, expected.y_0);
        assert!((params.ellipsoid.f - expected.ellipsoid.f).abs() < 1e-15);
    }

    #[test]
    fn registry_checks_roles() {
        let local: ProjectionDefinition = GEOGRAPHIC_DEFINITION.parse().unwrap();
        let geographic: ProjectionDefinition = LOCAL_DEFINITION.parse().unwrap();

        assert!(ProjectionRegistry::new(local, geographic).is_err());
    }

    #[test]
    fn registry_rejects_foreign_geographic_ellipsoid() {
        let bessel = "+proj=longlat +a=6377397.155 +rf=299.1528128";
        let err = ProjectionRegistry::from_definitions(LOCAL_DEFINITION, bessel).unwrap_err();
        assert!(matches!(err, Error::UnsupportedProjection(_)));

        let grs80 = "+proj=longlat +ellps=GRS80";
        let registry = ProjectionRegistry::from_definitions(LOCAL_DEFINITION, grs80).unwrap();
        assert_eq!(registry.geographic().ellipsoid(), Ellipsoid::GRS80);
    }
}
