//! # Daily rise, set and meridian transits
//!
//! Turns the engine's raw "next occurrence" search into a day-scoped answer: for a calendar day
//! and an observer, each of the four events either has a [`TimeOfDay`] on **that** day or is
//! absent.
//!
//! ## Algorithm
//!
//! For each [`TransitKind`](crate::transit::TransitKind):
//!
//! 1. Focal points have no disc: the answer is `None` and the engine is not called.
//! 2. The search starts at 00:00 of the queried day (engine time reference).
//! 3. The engine searches the next occurrence with fixed modifiers: disc center, fixed disc
//!    size, no refraction, astronomical twilight horizon; observer at sea level, pressure and
//!    temperature zero.
//! 4. Not found → `None` (circumpolar or never-rising objects).
//! 5. Found on another calendar day → `None`. The search only looks forward from midnight, so an
//!    event of the queried day can only be missed, never replaced by a neighbouring day's.
//! 6. Otherwise the fractional hour is truncated into hours, minutes and seconds.
//!
//! Engine failures are returned as `Err` and are never folded into `None`.

use std::fmt;

use hifitime::Epoch;
use serde::Serialize;
use tracing::{debug, trace};

use crate::astrolog_errors::EngineError;
use crate::celestial::{Celestial, DEFAULT_CALC_FLAGS};
use crate::coordinates::GeoLocation;
use crate::ephemeris::{CalcFlags, EphemerisEngine, GeoPosition, RiseTransFlags};
use crate::time::{CalendarDate, TimeOfDay};

/// One of the four daily events of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitKind {
    Rise,
    Set,
    /// Upper meridian transit ("mc").
    UpperTransit,
    /// Lower meridian transit ("ic").
    LowerTransit,
}

impl TransitKind {
    pub const ALL: [TransitKind; 4] = [
        TransitKind::Rise,
        TransitKind::Set,
        TransitKind::UpperTransit,
        TransitKind::LowerTransit,
    ];

    /// Short label used in charts.
    pub fn label(self) -> &'static str {
        match self {
            TransitKind::Rise => "rise",
            TransitKind::Set => "set",
            TransitKind::UpperTransit => "mc",
            TransitKind::LowerTransit => "ic",
        }
    }

    /// Event selector bit for the engine search.
    pub fn event_flag(self) -> RiseTransFlags {
        match self {
            TransitKind::Rise => RiseTransFlags::RISE,
            TransitKind::Set => RiseTransFlags::SET,
            TransitKind::UpperTransit => RiseTransFlags::MTRANSIT,
            TransitKind::LowerTransit => RiseTransFlags::ITRANSIT,
        }
    }

    /// Event selector plus the fixed modifiers applied to every search.
    pub fn search_flags(self) -> RiseTransFlags {
        self.event_flag()
            | RiseTransFlags::DISC_CENTER
            | RiseTransFlags::FIXED_DISC_SIZE
            | RiseTransFlags::NO_REFRACTION
            | RiseTransFlags::ASTRO_TWILIGHT
    }
}

impl fmt::Display for TransitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The four events of one calendar day; `None` where the event does not happen that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DailyTransits {
    pub rise: Option<TimeOfDay>,
    pub set: Option<TimeOfDay>,
    #[serde(rename = "mc")]
    pub upper_transit: Option<TimeOfDay>,
    #[serde(rename = "ic")]
    pub lower_transit: Option<TimeOfDay>,
}

impl DailyTransits {
    pub fn get(&self, kind: TransitKind) -> Option<TimeOfDay> {
        match kind {
            TransitKind::Rise => self.rise,
            TransitKind::Set => self.set,
            TransitKind::UpperTransit => self.upper_transit,
            TransitKind::LowerTransit => self.lower_transit,
        }
    }

    fn slot(&mut self, kind: TransitKind) -> &mut Option<TimeOfDay> {
        match kind {
            TransitKind::Rise => &mut self.rise,
            TransitKind::Set => &mut self.set,
            TransitKind::UpperTransit => &mut self.upper_transit,
            TransitKind::LowerTransit => &mut self.lower_transit,
        }
    }

    /// Events in rise, set, mc, ic order.
    pub fn iter(&self) -> impl Iterator<Item = (TransitKind, Option<TimeOfDay>)> + '_ {
        TransitKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

/// Search one event of `celestial` on `date` for an observer at `location`.
///
/// Arguments
/// -----------------
/// * `engine`: Ephemeris engine performing the raw search.
/// * `celestial`: Object searched; focal points short-circuit to `None`.
/// * `date`: Calendar day the event must fall on.
/// * `location`: Observer; searched at sea level without atmosphere.
/// * `kind`: Which event.
/// * `base_flags`: Ephemeris selection; `TOPOCTR` is added.
///
/// Return
/// ----------
/// * `Ok(Some(time))` for an event on `date`, `Ok(None)` when the event does not happen on that
///   day, `Err` when the engine fails.
pub fn search_transit<E: EphemerisEngine + ?Sized>(
    engine: &mut E,
    celestial: &Celestial,
    date: &CalendarDate,
    location: &GeoLocation,
    kind: TransitKind,
    base_flags: CalcFlags,
) -> Result<Option<TimeOfDay>, EngineError> {
    let Some(target) = celestial.transit_target() else {
        trace!(%celestial, %kind, "focal point, no transit search");
        return Ok(None);
    };

    let start = engine.julian_day(date, 0.0);
    let geopos = GeoPosition::at_sea_level(*location);

    trace!(%celestial, %kind, %target, start, "transit search");
    let Some(found) = engine.search_transit_event(
        start,
        target,
        kind.search_flags(),
        &geopos,
        0.0,
        0.0,
        base_flags | CalcFlags::TOPOCTR,
    )?
    else {
        debug!(%celestial, %kind, %date, "no event found");
        return Ok(None);
    };

    let (event_date, hour) = engine.reverse_julian_day(found);
    if event_date != *date {
        debug!(%celestial, %kind, %date, %event_date, "event falls on another day");
        return Ok(None);
    }

    Ok(Some(TimeOfDay::from_fractional_hour(hour)))
}

/// All four events of `celestial` on `date`, each resolved independently.
pub fn search_daily_transits<E: EphemerisEngine + ?Sized>(
    engine: &mut E,
    celestial: &Celestial,
    date: &CalendarDate,
    location: &GeoLocation,
    base_flags: CalcFlags,
) -> Result<DailyTransits, EngineError> {
    let mut transits = DailyTransits::default();
    for kind in TransitKind::ALL {
        *transits.slot(kind) = search_transit(engine, celestial, date, location, kind, base_flags)?;
    }
    Ok(transits)
}

impl Celestial {
    /// Rise, set and both meridian transits on `date`.
    ///
    /// Focal points always return an empty [`DailyTransits`] without calling the engine.
    /// From an instant, use [`Celestial::daily_transits_at`] or [`CalendarDate::from_epoch`].
    pub fn daily_transits<E: EphemerisEngine + ?Sized>(
        &self,
        engine: &mut E,
        date: &CalendarDate,
        location: &GeoLocation,
    ) -> Result<DailyTransits, EngineError> {
        search_daily_transits(engine, self, date, location, DEFAULT_CALC_FLAGS)
    }

    /// Events on the UTC calendar day containing `instant`; its time of day is ignored.
    pub fn daily_transits_at<E: EphemerisEngine + ?Sized>(
        &self,
        engine: &mut E,
        instant: &Epoch,
        location: &GeoLocation,
    ) -> Result<DailyTransits, EngineError> {
        self.daily_transits(engine, &CalendarDate::from_epoch(instant), location)
    }

    pub fn rises<E: EphemerisEngine + ?Sized>(
        &self,
        engine: &mut E,
        date: &CalendarDate,
        location: &GeoLocation,
    ) -> Result<Option<TimeOfDay>, EngineError> {
        search_transit(engine, self, date, location, TransitKind::Rise, DEFAULT_CALC_FLAGS)
    }

    pub fn sets<E: EphemerisEngine + ?Sized>(
        &self,
        engine: &mut E,
        date: &CalendarDate,
        location: &GeoLocation,
    ) -> Result<Option<TimeOfDay>, EngineError> {
        search_transit(engine, self, date, location, TransitKind::Set, DEFAULT_CALC_FLAGS)
    }

    /// Upper meridian transit ("mc").
    pub fn upper_transit<E: EphemerisEngine + ?Sized>(
        &self,
        engine: &mut E,
        date: &CalendarDate,
        location: &GeoLocation,
    ) -> Result<Option<TimeOfDay>, EngineError> {
        search_transit(
            engine,
            self,
            date,
            location,
            TransitKind::UpperTransit,
            DEFAULT_CALC_FLAGS,
        )
    }

    /// Lower meridian transit ("ic").
    pub fn lower_transit<E: EphemerisEngine + ?Sized>(
        &self,
        engine: &mut E,
        date: &CalendarDate,
        location: &GeoLocation,
    ) -> Result<Option<TimeOfDay>, EngineError> {
        search_transit(
            engine,
            self,
            date,
            location,
            TransitKind::LowerTransit,
            DEFAULT_CALC_FLAGS,
        )
    }
}
