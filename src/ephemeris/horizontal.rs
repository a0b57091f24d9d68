//! Equatorial → horizontal conversion.
//!
//! The hour angle is built from the local mean sidereal time, and the hour-angle unit vector is
//! rotated about the east-west axis by the observer's colatitude. In the resulting frame `x`
//! points to the south point, `y` to the west point and `z` to the zenith, so the azimuth comes
//! out measured from the south, westward.

use nalgebra::{Rotation3, Vector3};

use crate::constants::{Celsius, Degree, HectoPascal, JulianDay, RADEG};
use crate::coordinates::EquatorCoord;
use crate::ephemeris::{GeoPosition, HorizontalPosition};
use crate::time::local_mean_sidereal_time;

/// Apparent altitudes are only corrected down to this true altitude.
const REFRACTION_FLOOR: Degree = -2.0;

/// Rotation taking hour-angle frame vectors into the horizon frame for a latitude (radians).
fn hour_angle_to_horizon(latitude: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), latitude - std::f64::consts::FRAC_PI_2)
}

/// Atmospheric refraction in degrees for a true altitude (Saemundsson).
///
/// Scaled by pressure and temperature; zero pressure means no atmosphere.
pub fn refraction(true_altitude: Degree, pressure: HectoPascal, temperature: Celsius) -> Degree {
    if pressure <= 0.0 || true_altitude < REFRACTION_FLOOR {
        return 0.0;
    }
    let arg = (true_altitude + 10.3 / (true_altitude + 5.11)) * RADEG;
    let arcmin = 1.02 / arg.tan();
    arcmin / 60.0 * (pressure / 1010.0) * (283.0 / (273.0 + temperature))
}

/// Azimuth, true altitude and apparent altitude of an equatorial coordinate.
///
/// Arguments
/// -----------------
/// * `jd`: Julian day (UT) of the observation.
/// * `geopos`: Observer location; the altitude above sea level is ignored at this precision.
/// * `coord`: Right ascension / declination in **degrees**.
/// * `pressure`, `temperature`: Atmosphere used for the apparent altitude; pass `0.0` for none.
///
/// Return
/// ----------
/// * A [`HorizontalPosition`] with azimuth from the south point, westward, in `[0, 360)`.
pub fn equatorial_to_horizontal(
    jd: JulianDay,
    geopos: &GeoPosition,
    coord: &EquatorCoord,
    pressure: HectoPascal,
    temperature: Celsius,
) -> HorizontalPosition {
    let lst = local_mean_sidereal_time(jd, geopos.location.longitude_rad());
    let hour_angle = lst - coord.ra * RADEG;
    let decl = coord.decl * RADEG;

    let hour_angle_vec = Vector3::new(
        decl.cos() * hour_angle.cos(),
        decl.cos() * hour_angle.sin(),
        decl.sin(),
    );
    let horizon_vec = hour_angle_to_horizon(geopos.location.latitude_rad()) * hour_angle_vec;

    let azimuth = horizon_vec.y.atan2(horizon_vec.x).to_degrees().rem_euclid(360.0);
    let true_altitude = horizon_vec.z.clamp(-1.0, 1.0).asin().to_degrees();

    HorizontalPosition {
        azimuth,
        true_altitude,
        apparent_altitude: true_altitude + refraction(true_altitude, pressure, temperature),
    }
}
