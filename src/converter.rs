use lazy_static::lazy_static;
use log::warn;

use crate::{
    constants::{TO_GEOGRAPHIC_OFFSET, TO_GEOGRAPHIC_SCALE, TO_LOCAL_SCALE},
    crs::{ProjectionDefinition, ProjectionRegistry, TmercParams},
    projections::transverse_mercator::TransverseMercator,
    Error, GeoCoord, LocalCoord,
};

lazy_static! {
    static ref SHARED: Converter = Converter::standard();
}

/// Scale and offset layered on top of the standard projection.
///
/// The two directions are not mirror images:
/// `to_geographic` scales before projecting with an unscaled offset, while
/// `to_local` scales after projecting with an offset pre-multiplied by its
/// scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
    pub to_geographic_scale: f64,
    pub to_geographic_offset: [f64; 2],
    pub to_local_scale: f64,
    pub to_local_offset: [f64; 2],
}

impl Calibration {
    pub fn standard() -> Calibration {
        Calibration {
            to_geographic_scale: TO_GEOGRAPHIC_SCALE,
            to_geographic_offset: TO_GEOGRAPHIC_OFFSET,
            to_local_scale: TO_LOCAL_SCALE,
            to_local_offset: [
                TO_GEOGRAPHIC_OFFSET[0] * TO_LOCAL_SCALE,
                TO_GEOGRAPHIC_OFFSET[1] * TO_LOCAL_SCALE,
            ],
        }
    }
}

/// Converts between the LOCAL frame and WGS84 longitude/latitude.
///
/// # Usage
///
/// ```
/// use orthoview::{Converter, LocalCoord};
///
/// let converter = Converter::shared();
///
/// let start = LocalCoord::new(-9_721_621.3, 15_221_861.2);
/// let geo = converter.to_geographic(start).unwrap();
///
/// // The default view lands in central Poland
/// assert!((geo.longitude() - 21.5591).abs() < 1e-3);
/// assert!((geo.latitude() - 53.0874).abs() < 1e-3);
///
/// let back = converter.to_local(geo).unwrap();
/// assert!((back.x() - start.x()).abs() < 1e-3);
/// assert!((back.y() - start.y()).abs() < 1e-3);
/// ```
#[derive(Clone, Debug)]
pub struct Converter {
    registry: ProjectionRegistry,
    calibration: Calibration,
    tm: TransverseMercator,
    lon_0: f64,
    x_0: f64,
    // Northing of the projection origin (lat_0, lon_0), less y_0
    y_origin: f64,
}

impl Converter {
    /// Builds a converter for the systems in `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedProjection`] if the LOCAL system is not a
    /// transverse mercator.
    pub fn new(registry: ProjectionRegistry, calibration: Calibration) -> Result<Converter, Error> {
        match registry.local {
            ProjectionDefinition::TransverseMercator(params) => Ok(Converter::with_tmerc(registry, params, calibration)),
            ProjectionDefinition::LongLat { .. } => Err(Error::UnsupportedProjection(format!(
                "LOCAL must be a transverse mercator, got {}",
                registry.local
            ))),
        }
    }

    fn with_tmerc(registry: ProjectionRegistry, params: TmercParams, calibration: Calibration) -> Converter {
        let tm = TransverseMercator::new(params.ellipsoid, params.k_0);
        let (_, northing_0) = tm.forward(params.lon_0, params.lat_0, params.lon_0);

        Self {
            registry,
            calibration,
            tm,
            lon_0: params.lon_0,
            x_0: params.x_0,
            y_origin: northing_0 - params.y_0,
        }
    }

    /// Converter for the built-in systems and calibration.
    pub fn standard() -> Converter {
        Converter::with_tmerc(ProjectionRegistry::standard(), TmercParams::LOCAL, Calibration::standard())
    }

    /// Process-wide converter, initialized on first use.
    pub fn shared() -> &'static Converter {
        &SHARED
    }

    pub fn registry(&self) -> &ProjectionRegistry {
        &self.registry
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Projected LOCAL grid coordinates to longitude/latitude, without the
    /// calibration layer.
    pub fn unproject(&self, easting: f64, northing: f64) -> GeoCoord {
        let (lat, lon) = self.tm.reverse(self.lon_0, easting - self.x_0, northing + self.y_origin);
        GeoCoord::new(lon, lat)
    }

    /// Longitude/latitude to projected LOCAL grid coordinates, without the
    /// calibration layer.
    pub fn project(&self, geo: GeoCoord) -> (f64, f64) {
        let (x, y) = self.tm.forward(self.lon_0, geo.latitude, geo.longitude);
        (x + self.x_0, y - self.y_origin)
    }

    /// Converts a LOCAL point to longitude/latitude: rescale, then unproject.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFinite`] if either component is NaN or infinite, or
    /// if the point lies so far out that the projection overflows.
    pub fn to_geographic(&self, local: LocalCoord) -> Result<GeoCoord, Error> {
        if !local.is_finite() {
            warn!("Rejecting non-finite LOCAL coordinate {local}");
            return Err(Error::NonFinite(local.to_string()));
        }

        let Calibration { to_geographic_scale: scale, to_geographic_offset: offset, .. } = self.calibration;

        let geo = self.unproject(
            local.x * scale + offset[0],
            local.y * scale + offset[1],
        );

        if !geo.is_finite() {
            warn!("LOCAL coordinate {local} is outside the projection's domain");
            return Err(Error::NonFinite(local.to_string()));
        }

        Ok(geo)
    }

    /// Converts longitude/latitude to a LOCAL point: project, then rescale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFinite`] if either component is NaN or infinite, or
    /// if the projected point does not come out finite.
    pub fn to_local(&self, geo: GeoCoord) -> Result<LocalCoord, Error> {
        if !geo.is_finite() {
            warn!("Rejecting non-finite geographic coordinate {geo}");
            return Err(Error::NonFinite(geo.to_string()));
        }

        let Calibration { to_local_scale: scale, to_local_offset: offset, .. } = self.calibration;
        let (x, y) = self.project(geo);

        let local = LocalCoord::new(
            x * scale - offset[0],
            y * scale - offset[1],
        );

        if !local.is_finite() {
            warn!("Geographic coordinate {geo} is outside the projection's domain");
            return Err(Error::NonFinite(geo.to_string()));
        }

        Ok(local)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Converter::standard()
    }
}

/// Converts a LOCAL `(x, y)` pair to longitude/latitude with the shared
/// converter.
///
/// # Errors
///
/// Returns [`Error::NonFinite`] if either value is NaN or infinite.
pub fn to_geographic(x: f64, y: f64) -> Result<GeoCoord, Error> {
    Converter::shared().to_geographic(LocalCoord::new(x, y))
}

/// Converts a longitude/latitude pair to the LOCAL frame with the shared
/// converter.
///
/// # Errors
///
/// Returns [`Error::NonFinite`] if either value is NaN or infinite.
pub fn to_local(lon: f64, lat: f64) -> Result<LocalCoord, Error> {
    Converter::shared().to_local(GeoCoord::new(lon, lat))
}
