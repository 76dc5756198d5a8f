// Semi-major axis a, shared by GRS80 and WGS84
pub(crate) const GRS80_A: f64 = 6_378_137.;
// Flattening
#[allow(clippy::unreadable_literal)]
pub(crate) const GRS80_F: f64 = 1.0 / 298.257222101;

pub(crate) const WGS84_A: f64 = 6_378_137.;
#[allow(clippy::unreadable_literal)]
pub(crate) const WGS84_F: f64 = 1.0 / 298.257223563;

/// Definition of the viewer's LOCAL reference system (PUWG 1992 parameters).
pub const LOCAL_DEFINITION: &str = "+proj=tmerc +lat_0=0 +lon_0=19 +k=0.9993 +x_0=500000 +y_0=-5300000 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs +type=crs";
/// Definition of the GEOGRAPHIC reference system.
pub const GEOGRAPHIC_DEFINITION: &str = "+proj=longlat +datum=WGS84 +no_defs +type=crs";

// Affine rescale applied to LOCAL coordinates before the inverse projection.
#[allow(clippy::unreadable_literal, clippy::excessive_precision)]
pub(crate) const TO_GEOGRAPHIC_SCALE: f64 = 0.0553833918850661411805986223;
#[allow(clippy::unreadable_literal)]
pub(crate) const TO_GEOGRAPHIC_OFFSET: [f64; 2] = [1209745.0812, -259745.172];

// Affine rescale applied to projected coordinates after the forward projection.
// Its offset is TO_GEOGRAPHIC_OFFSET pre-multiplied by this scale.
#[allow(clippy::unreadable_literal, clippy::excessive_precision)]
pub(crate) const TO_LOCAL_SCALE: f64 = 18.055954428996340946249923949044;
