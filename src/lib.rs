#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::module_name_repetitions
)]

use thiserror::Error;

pub mod crs;
pub mod converter;
pub mod config;
#[cfg(feature = "search")]
pub mod search;

pub mod coords {
    pub mod geo;
    pub mod local;
}

pub mod view {
    pub mod controller;
    pub mod path;
}

pub use constants::{GEOGRAPHIC_DEFINITION, LOCAL_DEFINITION};
pub use converter::{to_geographic, to_local, Calibration, Converter};
pub use coords::{geo::GeoCoord, local::LocalCoord};
pub use config::{Imagery, ViewConfig};
pub use crs::{Ellipsoid, ProjectionDefinition, ProjectionRegistry, TmercParams};
pub use view::{
    controller::{MapView, PlaceSearch, UrlHistory, ViewController},
    path::{decode, encode, ViewPath},
};

pub(crate) mod projections {
    pub mod transverse_mercator;
}

pub(crate) mod constants;
pub(crate) mod utility;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Coordinate parameters are not valid: {0}")]
    InvalidCoord(String),
    #[error("Coordinate {0} is not finite")]
    NonFinite(String),
    #[error("Projection definition is invalid: {0}")]
    InvalidDefinition(String),
    #[error("Projection is not supported: {0}")]
    UnsupportedProjection(String),
    #[error("View path is invalid: {0}")]
    InvalidPath(String),
    #[error("Place search failed: {0}")]
    Search(String),
}

trait ThisOrThat {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T;
}

impl ThisOrThat for bool {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T {
        if *self { r#true } else { r#false }
    }
}
