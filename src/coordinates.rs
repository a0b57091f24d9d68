//! # Coordinate value types
//!
//! Immutable geometric carriers exchanged with the ephemeris engine:
//!
//! - [`EclCoord`](crate::coordinates::EclCoord) – ecliptic longitude/latitude,
//! - [`EquatorCoord`](crate::coordinates::EquatorCoord) – right ascension/declination,
//! - [`HorCoord`](crate::coordinates::HorCoord) – azimuth/altitude,
//! - [`GeoLocation`](crate::coordinates::GeoLocation) – observer longitude/latitude on Earth.
//!
//! All angles are stored in **degrees**. None of these types perform any astronomical
//! computation; they only normalize and validate their inputs.
//!
//! ## Conventions
//!
//! - Longitudes and right ascensions are normalized to `[0, 360)`.
//! - Geographic longitudes are **east positive** and kept in `[-180, 180]`.
//! - Azimuths are measured from the **south point, increasing westward** (the convention of
//!   the engine's horizontal conversion primitive).

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::astrolog_errors::AstrologError;
use crate::constants::{Degree, Radian};

fn normalize_degrees(angle: Degree) -> Degree {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Ecliptic coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclCoord {
    /// Ecliptic longitude in **degrees**, `[0, 360)`.
    pub longitude: Degree,
    /// Ecliptic latitude in **degrees**.
    pub latitude: Degree,
}

impl EclCoord {
    pub fn new(longitude: Degree, latitude: Degree) -> Self {
        EclCoord {
            longitude: normalize_degrees(longitude),
            latitude,
        }
    }
}

/// Equatorial coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquatorCoord {
    /// Right ascension in **degrees**, `[0, 360)`.
    pub ra: Degree,
    /// Declination in **degrees**.
    pub decl: Degree,
}

impl EquatorCoord {
    pub fn new(ra: Degree, decl: Degree) -> Self {
        EquatorCoord {
            ra: normalize_degrees(ra),
            decl,
        }
    }
}

/// Horizontal coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorCoord {
    /// Azimuth in **degrees** from the south point, westward, `[0, 360)`.
    pub azimuth: Degree,
    /// True (unrefracted) altitude above the horizon in **degrees**.
    pub altitude: Degree,
}

impl HorCoord {
    pub fn new(azimuth: Degree, altitude: Degree) -> Self {
        HorCoord {
            azimuth: normalize_degrees(azimuth),
            altitude,
        }
    }
}

/// Geographic position of an observer.
///
/// Both fields are `NotNan` so a location can be hashed and compared; the constructor rejects
/// NaN and out-of-range values, and deserialization goes through the same constructor.
///
/// Units
/// -----
/// * `longitude`: degrees, east positive, `[-180, 180]`.
/// * `latitude`: degrees, north positive, `[-90, 90]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGeoLocation")]
pub struct GeoLocation {
    longitude: NotNan<f64>,
    latitude: NotNan<f64>,
}

impl GeoLocation {
    /// Build a location from geodetic longitude and latitude.
    ///
    /// Arguments
    /// -----------------
    /// * `longitude`: Degrees east of Greenwich, in `[-180, 180]`.
    /// * `latitude`: Degrees north of the equator, in `[-90, 90]`.
    ///
    /// Errors
    /// ----------
    /// * [`AstrologError::InvalidLocation`] for NaN or out-of-range inputs.
    pub fn new(longitude: Degree, latitude: Degree) -> Result<Self, AstrologError> {
        let longitude = NotNan::new(longitude)?;
        let latitude = NotNan::new(latitude)?;

        if !(-180.0..=180.0).contains(&longitude.into_inner()) {
            return Err(AstrologError::InvalidLocation(format!(
                "longitude {longitude} outside [-180, 180]"
            )));
        }
        if !(-90.0..=90.0).contains(&latitude.into_inner()) {
            return Err(AstrologError::InvalidLocation(format!(
                "latitude {latitude} outside [-90, 90]"
            )));
        }

        Ok(GeoLocation {
            longitude,
            latitude,
        })
    }

    pub fn longitude(&self) -> Degree {
        self.longitude.into_inner()
    }

    pub fn latitude(&self) -> Degree {
        self.latitude.into_inner()
    }

    pub fn longitude_rad(&self) -> Radian {
        self.longitude().to_radians()
    }

    pub fn latitude_rad(&self) -> Radian {
        self.latitude().to_radians()
    }
}

#[derive(Deserialize)]
struct RawGeoLocation {
    longitude: Degree,
    latitude: Degree,
}

impl TryFrom<RawGeoLocation> for GeoLocation {
    type Error = AstrologError;

    fn try_from(raw: RawGeoLocation) -> Result<Self, Self::Error> {
        GeoLocation::new(raw.longitude, raw.latitude)
    }
}

#[cfg(test)]
mod coordinates_test {
    use super::*;

    #[test]
    fn test_longitudes_are_normalized() {
        let ecl = EclCoord::new(-10.0, 1.5);
        assert_eq!(ecl.longitude, 350.0);
        assert_eq!(ecl.latitude, 1.5);

        let eq = EquatorCoord::new(725.0, -20.0);
        assert_eq!(eq.ra, 5.0);

        let hor = HorCoord::new(360.0, 12.0);
        assert_eq!(hor.azimuth, 0.0);
        assert_eq!(hor.altitude, 12.0);
    }

    #[test]
    fn test_geo_location_validation() {
        let paris = GeoLocation::new(2.3522, 48.8566).unwrap();
        assert_eq!(paris.longitude(), 2.3522);
        assert_eq!(paris.latitude(), 48.8566);

        assert_eq!(
            GeoLocation::new(2.0, 91.0),
            Err(AstrologError::InvalidLocation(
                "latitude 91 outside [-90, 90]".to_string()
            ))
        );
        assert!(GeoLocation::new(-181.0, 0.0).is_err());
        assert!(matches!(
            GeoLocation::new(f64::NAN, 0.0),
            Err(AstrologError::InvalidLocation(_))
        ));
    }

    #[test]
    fn test_geo_location_deserialization_is_validated() {
        let paris: GeoLocation =
            serde_json::from_str(r#"{"longitude":2.3522,"latitude":48.8566}"#).unwrap();
        assert_eq!(paris, GeoLocation::new(2.3522, 48.8566).unwrap());

        let out_of_range = r#"{"longitude":500.0,"latitude":-300.0}"#;
        let err = serde_json::from_str::<GeoLocation>(out_of_range)
            .unwrap_err()
            .to_string();
        assert!(err.starts_with("Invalid observer location: longitude 500"), "{err}");

        let bad_latitude = r#"{"longitude":0.0,"latitude":-90.5}"#;
        assert!(serde_json::from_str::<GeoLocation>(bad_latitude).is_err());
    }
}
