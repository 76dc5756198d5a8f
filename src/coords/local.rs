use std::fmt::Display;

use crate::{Error, GeoCoord, Converter};

/// A point in the viewer's LOCAL frame: a projected grid rescaled to the
/// rendering engine's units. No range invariant applies.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalCoord {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

impl LocalCoord {
    pub fn new(x: f64, y: f64) -> LocalCoord {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Converts to longitude/latitude with `converter`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFinite`] if either component is NaN or infinite.
    pub fn to_geographic(&self, converter: &Converter) -> Result<GeoCoord, Error> {
        converter.to_geographic(*self)
    }
}

impl From<(f64, f64)> for LocalCoord {
    fn from((x, y): (f64, f64)) -> Self {
        LocalCoord::new(x, y)
    }
}

impl Display for LocalCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let x = buf.format(self.x);
        let mut buf = ryu::Buffer::new();
        let y = buf.format(self.y);
        write!(f, "{x} {y}")
    }
}
