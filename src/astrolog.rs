//! # Astrolog: configured, shareable access to an ephemeris engine
//!
//! This module defines the [`Astrolog`](crate::astrolog::Astrolog) façade, which wires together:
//!
//! 1. **An ephemeris engine** – any [`EphemerisEngine`](crate::ephemeris::EphemerisEngine) binding,
//!    owned behind a [`Mutex`](std::sync::Mutex).
//! 2. **Configuration** – [`AstrologConfig`](crate::astrolog::AstrologConfig): which ephemeris data
//!    the engine reads, hence which ephemeris bit accompanies every position and search call.
//!
//! ## Serialization of queries
//!
//! The engine's topocentric observer frame is process-wide state of the engine. Each façade call
//! takes the lock, opens a [`TopocentricSession`](crate::ephemeris::session::TopocentricSession) for
//! its observer, performs all of its engine calls, then releases the lock. Two threads sharing an
//! `Arc<Astrolog<E>>` therefore never see each other's frame.
//!
//! ## Typical usage
//!
//! ```rust,ignore
//! use astrolog::astrolog::{Astrolog, AstrologConfig};
//! use astrolog::celestial::named;
//!
//! let astrolog = Astrolog::from_source(my_engine, "swieph:/usr/share/ephe")?;
//! let ecl = astrolog.ecliptic_coordinate(&named::MOON, &instant, &location)?;
//! let transits = astrolog.daily_transits(&named::SUN, &date, &location)?;
//! ```
//!
//! ## Errors
//!
//! Every method returns [`AstrologError`](crate::astrolog_errors::AstrologError): engine failures
//! as `Engine(_)`, a lock poisoned by a panicking query as `EnginePoisoned`.

use std::sync::{Mutex, MutexGuard};

use hifitime::Epoch;
use serde::Deserialize;
use tracing::debug;

use crate::astrolog_errors::AstrologError;
use crate::celestial::{instant_julian_day, Celestial};
use crate::coordinates::{EclCoord, EquatorCoord, GeoLocation, HorCoord};
use crate::ephemeris::session::TopocentricSession;
use crate::ephemeris::{CalcFlags, EphemerisEngine, EphemerisSource};
use crate::time::{CalendarDate, TimeOfDay};
use crate::transit::{search_daily_transits, search_transit, DailyTransits, TransitKind};

/// Settings of an [`Astrolog`] instance.
///
/// Deserializable, with the source given as a string:
///
/// ```json
/// { "source": "swieph:/usr/share/ephe" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AstrologConfig {
    pub source: EphemerisSource,
}

impl AstrologConfig {
    pub fn calc_flags(&self) -> CalcFlags {
        self.source.calc_flags()
    }
}

#[derive(Debug)]
pub struct Astrolog<E: EphemerisEngine> {
    engine: Mutex<E>,
    config: AstrologConfig,
}

impl<E: EphemerisEngine> Astrolog<E> {
    /// Wrap `engine` and point it at the configured ephemeris source.
    ///
    /// Errors
    /// ----------
    /// * [`AstrologError::Engine`] if the engine rejects the source (e.g. missing data directory).
    pub fn new(mut engine: E, config: AstrologConfig) -> Result<Self, AstrologError> {
        engine.set_ephemeris_source(&config.source)?;
        debug!(source = %config.source, "ephemeris source configured");
        Ok(Astrolog {
            engine: Mutex::new(engine),
            config,
        })
    }

    /// Same as [`Astrolog::new`] with the source parsed from a string such as `"moshier"`.
    pub fn from_source(engine: E, source: &str) -> Result<Self, AstrologError> {
        Astrolog::new(
            engine,
            AstrologConfig {
                source: source.try_into()?,
            },
        )
    }

    pub fn config(&self) -> &AstrologConfig {
        &self.config
    }

    fn lock(&self) -> Result<MutexGuard<'_, E>, AstrologError> {
        self.engine.lock().map_err(|_| AstrologError::EnginePoisoned)
    }

    /// Give the engine back.
    pub fn into_engine(self) -> Result<E, AstrologError> {
        self.engine
            .into_inner()
            .map_err(|_| AstrologError::EnginePoisoned)
    }

    pub fn ecliptic_coordinate(
        &self,
        celestial: &Celestial,
        instant: &Epoch,
        location: &GeoLocation,
    ) -> Result<EclCoord, AstrologError> {
        let mut engine = self.lock()?;
        let jd = instant_julian_day(&*engine, instant);
        let mut session = TopocentricSession::open(&mut *engine, *location, self.calc_flags());
        Ok(celestial.ecliptic_in(&mut session, jd)?)
    }

    pub fn equatorial_coordinate(
        &self,
        celestial: &Celestial,
        instant: &Epoch,
        location: &GeoLocation,
    ) -> Result<EquatorCoord, AstrologError> {
        let mut engine = self.lock()?;
        let jd = instant_julian_day(&*engine, instant);
        let mut session = TopocentricSession::open(&mut *engine, *location, self.calc_flags());
        Ok(celestial.equatorial_in(&mut session, jd)?)
    }

    pub fn horizontal_coordinate(
        &self,
        celestial: &Celestial,
        instant: &Epoch,
        location: &GeoLocation,
    ) -> Result<HorCoord, AstrologError> {
        let mut engine = self.lock()?;
        let jd = instant_julian_day(&*engine, instant);
        let mut session = TopocentricSession::open(&mut *engine, *location, self.calc_flags());
        Ok(celestial.horizontal_in(&mut session, jd)?)
    }

    /// Ecliptic coordinates of several objects for one instant and observer.
    ///
    /// The frame is configured once and the lock is held for the whole batch, so all positions
    /// belong to the same chart.
    pub fn ecliptic_positions(
        &self,
        celestials: &[Celestial],
        instant: &Epoch,
        location: &GeoLocation,
    ) -> Result<Vec<EclCoord>, AstrologError> {
        let mut engine = self.lock()?;
        let jd = instant_julian_day(&*engine, instant);
        let mut session = TopocentricSession::open(&mut *engine, *location, self.calc_flags());
        celestials
            .iter()
            .map(|c| c.ecliptic_in(&mut session, jd).map_err(AstrologError::from))
            .collect()
    }

    pub fn daily_transits(
        &self,
        celestial: &Celestial,
        date: &CalendarDate,
        location: &GeoLocation,
    ) -> Result<DailyTransits, AstrologError> {
        let mut engine = self.lock()?;
        Ok(search_daily_transits(
            &mut *engine,
            celestial,
            date,
            location,
            self.calc_flags(),
        )?)
    }

    /// One event of `celestial` on `date`.
    pub fn transit(
        &self,
        celestial: &Celestial,
        date: &CalendarDate,
        location: &GeoLocation,
        kind: TransitKind,
    ) -> Result<Option<TimeOfDay>, AstrologError> {
        let mut engine = self.lock()?;
        Ok(search_transit(
            &mut *engine,
            celestial,
            date,
            location,
            kind,
            self.calc_flags(),
        )?)
    }

    fn calc_flags(&self) -> CalcFlags {
        self.config.calc_flags()
    }
}
