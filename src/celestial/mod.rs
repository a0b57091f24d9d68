//! # Celestial objects
//!
//! A [`Celestial`](crate::celestial::Celestial) is a named object whose position can be asked for
//! at any instant and from any observer. Three kinds of objects share the same protocol:
//!
//! | [`ObjectKind`](crate::celestial::ObjectKind) | Engine call | Rise/set/transit |
//! |---|---|---|
//! | `Moving` – planets, Sun, Moon, numbered minor planets | body position | searched |
//! | `FocalPoint` – second (empty) focus of an orbit, "black suns" | node/apsides, focal point variant | never (no disc) |
//! | `Fixed` – stars and deep-space objects, by catalog designator | fixed star position | searched |
//!
//! The protocol is implemented once, as a `match` on the kind, instead of per-type methods.
//!
//! ## Queries
//!
//! Every query is stateless with respect to the object: the observer and the instant are passed
//! in, the engine frame is configured for the observer, and a fresh value is returned.
//!
//! - [`Celestial::ecliptic_coordinate`](crate::celestial::Celestial::ecliptic_coordinate)
//! - [`Celestial::equatorial_coordinate`](crate::celestial::Celestial::equatorial_coordinate)
//! - [`Celestial::horizontal_coordinate`](crate::celestial::Celestial::horizontal_coordinate)
//! - [`Celestial::daily_transits`](crate::celestial::Celestial::daily_transits) and the per-event
//!   accessors in [`crate::transit`].
//!
//! The `*_in` variants run inside an already opened
//! [`TopocentricSession`](crate::ephemeris::session::TopocentricSession); this is how
//! [`Astrolog`](crate::astrolog::Astrolog) applies its configured ephemeris flags.
//!
//! ## Example
//!
//! ```rust,ignore
//! use astrolog::celestial::{named, Celestial};
//!
//! let pluto = Celestial::planet("PLUTO")?;
//! assert!(!pluto.is_fixed() && !pluto.is_focal_point());
//!
//! let ecl = named::SUN.ecliptic_coordinate(&mut engine, &instant, &paris)?;
//! ```

pub mod catalog;
pub mod named;

use std::borrow::Cow;
use std::fmt;

use hifitime::Epoch;

use crate::astrolog_errors::{EngineError, UnknownBodyError};
use crate::celestial::catalog::{body_id_by_name, BodyId};
use crate::constants::JulianDay;
use crate::coordinates::{EclCoord, EquatorCoord, GeoLocation, HorCoord};
use crate::ephemeris::session::TopocentricSession;
use crate::ephemeris::{CalcFlags, EphemerisEngine, Frame, RawPosition, TransitTarget};
use crate::time::instant_to_day_hour;

/// Flags used when no [`Astrolog`](crate::astrolog::Astrolog) configuration is involved.
pub const DEFAULT_CALC_FLAGS: CalcFlags = CalcFlags::SWIEPH;

/// What an object is, and the data the engine needs to locate it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// A physical body moving along its orbit.
    Moving { body: BodyId },
    /// The empty focus of the orbit of `body`, osculating unless `mean`.
    FocalPoint { body: BodyId, mean: bool },
    /// A star or deep-space object identified by its catalog designator.
    Fixed { designator: Cow<'static, str> },
}

/// A named celestial object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Celestial {
    name: Cow<'static, str>,
    kind: ObjectKind,
}

impl Celestial {
    /// Moving body resolved from a catalog name (case-insensitive).
    ///
    /// Errors
    /// ----------
    /// * [`UnknownBodyError`] if the name is not in [`catalog::BODY_CATALOG`].
    pub fn planet(name: &str) -> Result<Celestial, UnknownBodyError> {
        let body = body_id_by_name(name)?;
        Ok(Celestial {
            name: Cow::Owned(name.trim().to_string()),
            kind: ObjectKind::Moving { body },
        })
    }

    /// Moving body with an explicit engine code, e.g. a numbered minor planet.
    pub fn planet_with_code(name: impl Into<Cow<'static, str>>, body: BodyId) -> Celestial {
        Celestial {
            name: name.into(),
            kind: ObjectKind::Moving { body },
        }
    }

    /// Osculating second focal point of the orbit of `body`.
    pub fn black_sun(name: impl Into<Cow<'static, str>>, body: BodyId) -> Celestial {
        Celestial {
            name: name.into(),
            kind: ObjectKind::FocalPoint { body, mean: false },
        }
    }

    /// Star or deep-space object.
    pub fn fixed(
        name: impl Into<Cow<'static, str>>,
        designator: impl Into<Cow<'static, str>>,
    ) -> Celestial {
        Celestial {
            name: name.into(),
            kind: ObjectKind::Fixed {
                designator: designator.into(),
            },
        }
    }

    pub(crate) const fn moving_const(name: &'static str, body: BodyId) -> Celestial {
        Celestial {
            name: Cow::Borrowed(name),
            kind: ObjectKind::Moving { body },
        }
    }

    pub(crate) const fn black_sun_const(name: &'static str, body: BodyId) -> Celestial {
        Celestial {
            name: Cow::Borrowed(name),
            kind: ObjectKind::FocalPoint { body, mean: false },
        }
    }

    /// Select the mean (`true`) or osculating (`false`) focal point.
    ///
    /// Only focal points are affected; other kinds are returned unchanged.
    pub fn with_mean(mut self, mean: bool) -> Celestial {
        if let ObjectKind::FocalPoint { mean: m, .. } = &mut self.kind {
            *m = mean;
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// Engine body code, `None` for fixed objects which are looked up by designator.
    pub fn body_id(&self) -> Option<BodyId> {
        match &self.kind {
            ObjectKind::Moving { body } | ObjectKind::FocalPoint { body, .. } => Some(*body),
            ObjectKind::Fixed { .. } => None,
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self.kind, ObjectKind::Fixed { .. })
    }

    pub fn is_focal_point(&self) -> bool {
        matches!(self.kind, ObjectKind::FocalPoint { .. })
    }

    /// What a rise/transit search targets; `None` for focal points, which have no disc.
    pub fn transit_target(&self) -> Option<TransitTarget<'_>> {
        match &self.kind {
            ObjectKind::Moving { body } => Some(TransitTarget::Body(*body)),
            ObjectKind::Fixed { designator } => Some(TransitTarget::Star(designator)),
            ObjectKind::FocalPoint { .. } => None,
        }
    }

    fn raw_position<E: EphemerisEngine + ?Sized>(
        &self,
        session: &mut TopocentricSession<'_, E>,
        jd: JulianDay,
        frame: Frame,
    ) -> Result<RawPosition, EngineError> {
        match &self.kind {
            ObjectKind::Moving { body } => session.body_position(jd, *body, frame),
            ObjectKind::FocalPoint { body, mean } => {
                session.focal_point_position(jd, *body, *mean, frame)
            }
            ObjectKind::Fixed { designator } => session.fixed_star_position(jd, designator, frame),
        }
    }

    /// Ecliptic coordinate at a Julian day, inside an open session.
    pub fn ecliptic_in<E: EphemerisEngine + ?Sized>(
        &self,
        session: &mut TopocentricSession<'_, E>,
        jd: JulianDay,
    ) -> Result<EclCoord, EngineError> {
        let raw = self.raw_position(session, jd, Frame::Ecliptic)?;
        Ok(EclCoord::new(raw.lon, raw.lat))
    }

    /// Equatorial coordinate at a Julian day, inside an open session.
    pub fn equatorial_in<E: EphemerisEngine + ?Sized>(
        &self,
        session: &mut TopocentricSession<'_, E>,
        jd: JulianDay,
    ) -> Result<EquatorCoord, EngineError> {
        let raw = self.raw_position(session, jd, Frame::Equatorial)?;
        Ok(EquatorCoord::new(raw.lon, raw.lat))
    }

    /// Horizontal coordinate at a Julian day, inside an open session.
    ///
    /// The equatorial position is converted without atmosphere (pressure and temperature zero),
    /// so the returned altitude is the true altitude.
    pub fn horizontal_in<E: EphemerisEngine + ?Sized>(
        &self,
        session: &mut TopocentricSession<'_, E>,
        jd: JulianDay,
    ) -> Result<HorCoord, EngineError> {
        let coord = self.equatorial_in(session, jd)?;
        let geopos = *session.geopos();
        let hor = session
            .engine()
            .equatorial_to_horizontal(jd, &geopos, &coord, 0.0, 0.0)?;
        Ok(HorCoord::new(hor.azimuth, hor.true_altitude))
    }

    /// Topocentric ecliptic coordinate seen from `location` at `instant`.
    ///
    /// Arguments
    /// -----------------
    /// * `engine`: Ephemeris engine; its observer frame is set to `location`.
    /// * `instant`: Civil instant; only the date, hour and minute are used.
    /// * `location`: Observer position.
    ///
    /// Errors
    /// ----------
    /// * [`EngineError`] from the engine, unchanged.
    pub fn ecliptic_coordinate<E: EphemerisEngine + ?Sized>(
        &self,
        engine: &mut E,
        instant: &Epoch,
        location: &GeoLocation,
    ) -> Result<EclCoord, EngineError> {
        let jd = instant_julian_day(engine, instant);
        let mut session = TopocentricSession::open(engine, *location, DEFAULT_CALC_FLAGS);
        self.ecliptic_in(&mut session, jd)
    }

    /// Topocentric equatorial coordinate seen from `location` at `instant`.
    pub fn equatorial_coordinate<E: EphemerisEngine + ?Sized>(
        &self,
        engine: &mut E,
        instant: &Epoch,
        location: &GeoLocation,
    ) -> Result<EquatorCoord, EngineError> {
        let jd = instant_julian_day(engine, instant);
        let mut session = TopocentricSession::open(engine, *location, DEFAULT_CALC_FLAGS);
        self.equatorial_in(&mut session, jd)
    }

    /// Azimuth and true altitude seen from `location` at `instant`.
    pub fn horizontal_coordinate<E: EphemerisEngine + ?Sized>(
        &self,
        engine: &mut E,
        instant: &Epoch,
        location: &GeoLocation,
    ) -> Result<HorCoord, EngineError> {
        let jd = instant_julian_day(engine, instant);
        let mut session = TopocentricSession::open(engine, *location, DEFAULT_CALC_FLAGS);
        self.horizontal_in(&mut session, jd)
    }
}

/// Engine time reference of an instant (hours and minutes only).
pub fn instant_julian_day<E: EphemerisEngine + ?Sized>(engine: &E, instant: &Epoch) -> JulianDay {
    let (date, hour) = instant_to_day_hour(instant);
    engine.julian_day(&date, hour)
}

impl fmt::Display for Celestial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
