//! # Ephemeris engine contract
//!
//! This module defines the boundary between `astrolog` and the ephemeris engine that performs
//! the actual celestial mechanics. `astrolog` never computes a planetary position itself: it
//! prepares the time reference and flags, delegates to an [`EphemerisEngine`](crate::ephemeris::EphemerisEngine),
//! and post-processes the answer.
//!
//! ## Key pieces
//!
//! - [`EphemerisEngine`](crate::ephemeris::EphemerisEngine) – the trait a binding implements
//!   (e.g. a Swiss Ephemeris wrapper). Time conversion and the equatorial → horizontal primitive
//!   have default implementations; the position and event-search calls do not.
//! - [`CalcFlags`](crate::ephemeris::CalcFlags), [`RiseTransFlags`](crate::ephemeris::RiseTransFlags),
//!   [`NodApsFlags`](crate::ephemeris::NodApsFlags) – flag sets using the Swiss Ephemeris numeric values,
//!   so a binding can forward them untouched.
//! - [`EphemerisSource`](crate::ephemeris::EphemerisSource) – which ephemeris data the engine reads,
//!   parsed from strings such as `"swieph:/usr/share/ephe"`.
//! - [`TopocentricSession`](crate::ephemeris::session::TopocentricSession) – the scoped
//!   *configure observer frame, then query* pairing.
//!
//! ## Engine state
//!
//! The topocentric observer frame is mutable state of the engine. Every method that depends on it
//! takes `&mut self`, so the borrow checker prevents two queries from interleaving on one engine
//! value; sharing an engine across threads goes through [`Astrolog`](crate::astrolog::Astrolog),
//! which keeps it behind a mutex.
//!
//! ## See also
//! ------------
//! * [`horizontal::equatorial_to_horizontal`] – Default frame-conversion primitive.
//! * [`crate::transit`] – Day-scoped search built on [`EphemerisEngine::search_transit_event`].

pub mod horizontal;
pub mod session;

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::Deserialize;

use crate::astrolog_errors::{AstrologError, EngineError};
use crate::celestial::catalog::BodyId;
use crate::constants::{Celsius, Degree, FractionalHour, HectoPascal, JulianDay, Meter};
use crate::coordinates::{EquatorCoord, GeoLocation};
use crate::time::{julday, revjul, CalendarDate};

bitflags! {
    /// Computation flags for position calls.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CalcFlags: u32 {
        /// Read a JPL ephemeris file
        const JPLEPH = 1;
        /// Read the Swiss Ephemeris compressed files
        const SWIEPH = 2;
        /// Use the built-in analytical (Moshier) ephemeris
        const MOSEPH = 4;
        /// Also compute speeds
        const SPEED = 256;
        /// Return right ascension / declination instead of ecliptic coordinates
        const EQUATORIAL = 2 * 1024;
        /// Topocentric position for the configured observer frame
        const TOPOCTR = 32 * 1024;
    }
}

bitflags! {
    /// Event selector and modifiers for the rise/transit search.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RiseTransFlags: u32 {
        const RISE = 1;
        const SET = 2;
        /// Upper meridian transit
        const MTRANSIT = 4;
        /// Lower meridian transit
        const ITRANSIT = 8;
        const DISC_CENTER = 256;
        const NO_REFRACTION = 512;
        const CIVIL_TWILIGHT = 1024;
        const NAUTIC_TWILIGHT = 2048;
        const ASTRO_TWILIGHT = 4096;
        const DISC_BOTTOM = 8192;
        const FIXED_DISC_SIZE = 16384;
    }
}

bitflags! {
    /// Method bits for the node/apsides call.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodApsFlags: u32 {
        const MEAN = 1;
        const OSCU = 2;
        const OSCU_BAR = 4;
        /// Return the second (empty) focal point instead of the aphelion
        const FOPOINT = 256;
    }
}

/// Requested output frame of a position call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    Ecliptic,
    Equatorial,
}

impl Frame {
    pub fn calc_flags(self) -> CalcFlags {
        match self {
            Frame::Ecliptic => CalcFlags::empty(),
            Frame::Equatorial => CalcFlags::EQUATORIAL,
        }
    }
}

/// Raw six-slot result of a position call.
///
/// In the ecliptic frame `lon`/`lat` are ecliptic longitude/latitude, in the equatorial frame
/// they hold right ascension/declination. All angles in **degrees**, distance in **AU**,
/// speeds per day.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawPosition {
    pub lon: Degree,
    pub lat: Degree,
    pub distance: f64,
    pub lon_speed: f64,
    pub lat_speed: f64,
    pub distance_speed: f64,
}

impl RawPosition {
    pub fn new(lon: Degree, lat: Degree, distance: f64) -> Self {
        RawPosition {
            lon,
            lat,
            distance,
            ..Default::default()
        }
    }
}

/// Result of the equatorial → horizontal conversion primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalPosition {
    /// Degrees from the south point, westward.
    pub azimuth: Degree,
    pub true_altitude: Degree,
    pub apparent_altitude: Degree,
}

/// Object targeted by a rise/transit search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitTarget<'a> {
    Body(BodyId),
    Star(&'a str),
}

impl fmt::Display for TransitTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitTarget::Body(id) => write!(f, "body {id}"),
            TransitTarget::Star(name) => write!(f, "star {name}"),
        }
    }
}

/// Observer position passed to the engine: location plus altitude above sea level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    pub location: GeoLocation,
    pub altitude: Meter,
}

impl GeoPosition {
    /// Position at sea level.
    pub fn at_sea_level(location: GeoLocation) -> Self {
        GeoPosition {
            location,
            altitude: 0.0,
        }
    }
}

/// Ephemeris data read by the engine.
///
/// Parsed from:
/// - `"swieph"` / `"swieph:<directory>"` – Swiss Ephemeris files (default search path or given directory),
/// - `"moshier"` – built-in analytical ephemeris, no data files,
/// - `"jpl:<file>"` – a JPL DE file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum EphemerisSource {
    #[default]
    SwissFiles,
    SwissFilesAt(String),
    Moshier,
    Jpl(String),
}

impl EphemerisSource {
    /// Ephemeris-selection bit matching this source.
    pub fn calc_flags(&self) -> CalcFlags {
        match self {
            EphemerisSource::SwissFiles | EphemerisSource::SwissFilesAt(_) => CalcFlags::SWIEPH,
            EphemerisSource::Moshier => CalcFlags::MOSEPH,
            EphemerisSource::Jpl(_) => CalcFlags::JPLEPH,
        }
    }
}

impl TryFrom<&str> for EphemerisSource {
    type Error = AstrologError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let (scheme, arg) = match value.split_once(':') {
            Some((scheme, arg)) => (scheme.trim(), Some(arg.trim())),
            None => (value.trim(), None),
        };

        match (scheme.to_ascii_lowercase().as_str(), arg) {
            ("swieph", None) => Ok(EphemerisSource::SwissFiles),
            ("swieph", Some(dir)) if !dir.is_empty() => {
                Ok(EphemerisSource::SwissFilesAt(dir.to_string()))
            }
            ("moshier", None) => Ok(EphemerisSource::Moshier),
            ("jpl", Some(file)) if !file.is_empty() => Ok(EphemerisSource::Jpl(file.to_string())),
            _ => Err(AstrologError::InvalidEphemerisSource(value.to_string())),
        }
    }
}

impl TryFrom<String> for EphemerisSource {
    type Error = AstrologError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        EphemerisSource::try_from(value.as_str())
    }
}

impl FromStr for EphemerisSource {
    type Err = AstrologError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EphemerisSource::try_from(s)
    }
}

impl fmt::Display for EphemerisSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EphemerisSource::SwissFiles => write!(f, "swieph"),
            EphemerisSource::SwissFilesAt(dir) => write!(f, "swieph:{dir}"),
            EphemerisSource::Moshier => write!(f, "moshier"),
            EphemerisSource::Jpl(file) => write!(f, "jpl:{file}"),
        }
    }
}

/// Operations `astrolog` needs from an ephemeris engine.
///
/// A binding implements the position and event-search calls; the calendar conversions and the
/// equatorial → horizontal primitive default to the crate's own implementations and may be
/// overridden to use the engine's.
///
/// Errors are reported as [`EngineError`] and are never retried by callers.
pub trait EphemerisEngine {
    /// Set the topocentric observer frame used by subsequent `TOPOCTR` position calls.
    fn set_topocentric_frame(&mut self, location: &GeoLocation, altitude: Meter);

    /// Select the ephemeris data. Called once when an [`Astrolog`](crate::astrolog::Astrolog) is built.
    fn set_ephemeris_source(&mut self, _source: &EphemerisSource) -> Result<(), EngineError> {
        Ok(())
    }

    /// Julian day (UT) of a calendar day and fractional hour.
    fn julian_day(&self, date: &CalendarDate, hour: FractionalHour) -> JulianDay {
        julday(date, hour)
    }

    /// Calendar day and fractional hour of a Julian day (UT).
    fn reverse_julian_day(&self, jd: JulianDay) -> (CalendarDate, FractionalHour) {
        revjul(jd)
    }

    /// Position of a moving body.
    fn body_position(
        &mut self,
        jd: JulianDay,
        body: BodyId,
        flags: CalcFlags,
    ) -> Result<RawPosition, EngineError>;

    /// Position of a catalog star or deep-space object.
    fn fixed_star_position(
        &mut self,
        designator: &str,
        jd: JulianDay,
        flags: CalcFlags,
    ) -> Result<RawPosition, EngineError>;

    /// Second focal point of the orbit of `body`.
    ///
    /// `method` always carries [`NodApsFlags::FOPOINT`], plus either `OSCU` or `MEAN`.
    fn focal_point_position(
        &mut self,
        jd: JulianDay,
        body: BodyId,
        method: NodApsFlags,
        flags: CalcFlags,
    ) -> Result<RawPosition, EngineError>;

    /// Convert an equatorial coordinate into azimuth and altitudes for an observer.
    fn equatorial_to_horizontal(
        &self,
        jd: JulianDay,
        geopos: &GeoPosition,
        coord: &EquatorCoord,
        pressure: HectoPascal,
        temperature: Celsius,
    ) -> Result<HorizontalPosition, EngineError> {
        Ok(horizontal::equatorial_to_horizontal(
            jd,
            geopos,
            coord,
            pressure,
            temperature,
        ))
    }

    /// Next occurrence of an event on or after `start`.
    ///
    /// Returns `Ok(None)` when the event does not occur (e.g. a circumpolar body never sets).
    #[allow(clippy::too_many_arguments)]
    fn search_transit_event(
        &mut self,
        start: JulianDay,
        target: TransitTarget<'_>,
        event: RiseTransFlags,
        geopos: &GeoPosition,
        pressure: HectoPascal,
        temperature: Celsius,
        flags: CalcFlags,
    ) -> Result<Option<JulianDay>, EngineError>;
}
