//! # Calendar and Julian-day helpers
//!
//! Conversions between civil calendar values and the engine's time reference (Julian Day, UT),
//! plus the day-scoped [`TimeOfDay`](crate::time::TimeOfDay) produced by transit searches.
//!
//! The calendar arithmetic is delegated to [`hifitime`]; the helpers here only fix the
//! conventions used by the rest of the crate:
//!
//! - a calendar day starts at 00:00 and is identified by a validated [`CalendarDate`](crate::time::CalendarDate),
//! - an instant is reduced to `hour + minute / 60` before being turned into a Julian day,
//! - fractional hours are decomposed into h/m/s by **truncation** at every step.

use std::fmt;

use hifitime::{Duration, Epoch, Unit};
use serde::{Deserialize, Serialize};

use crate::astrolog_errors::AstrologError;
use crate::constants::{
    FractionalHour, JulianDay, DPI, JDTOMJD, MJD, SECONDS_PER_DAY, SECONDS_PER_HOUR, T2000,
};

/// A Gregorian calendar day without time-of-day component.
///
/// Deserialization goes through [`CalendarDate::new`], so an impossible day is rejected there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawCalendarDate")]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Build a validated calendar date.
    ///
    /// Errors
    /// ----------
    /// * [`AstrologError::InvalidDate`] if the triple is not a Gregorian date (e.g. 2023-02-29).
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, AstrologError> {
        Epoch::maybe_from_gregorian_utc(year, month, day, 0, 0, 0, 0)
            .map_err(|e| AstrologError::InvalidDate(format!("{year}-{month}-{day}: {e}")))?;
        Ok(CalendarDate { year, month, day })
    }

    /// Calendar day (UTC scale) on which `epoch` falls.
    pub fn from_epoch(epoch: &Epoch) -> Self {
        let (year, month, day, _, _, _, _) = epoch.to_gregorian_utc();
        CalendarDate { year, month, day }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// Epoch at 00:00 of this day.
    pub fn midnight(&self) -> Epoch {
        Epoch::from_gregorian_utc_at_midnight(self.year, self.month, self.day)
    }
}

#[derive(Deserialize)]
struct RawCalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl TryFrom<RawCalendarDate> for CalendarDate {
    type Error = AstrologError;

    fn try_from(raw: RawCalendarDate) -> Result<Self, Self::Error> {
        CalendarDate::new(raw.year, raw.month, raw.day)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Julian day (UT) of `hour` fractional hours after 00:00 on `date`.
pub fn julday(date: &CalendarDate, hour: FractionalHour) -> JulianDay {
    (date.midnight() + Unit::Hour * hour).to_jde_utc_days()
}

/// Calendar day and fractional hour of a Julian day (UT).
///
/// Inverse of [`julday`].
pub fn revjul(jd: JulianDay) -> (CalendarDate, FractionalHour) {
    let epoch = Epoch::from_jde_utc(jd);
    let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();
    let fractional_hour = hour as f64
        + minute as f64 / 60.0
        + (second as f64 + nanos as f64 * 1e-9) / SECONDS_PER_HOUR;
    (CalendarDate { year, month, day }, fractional_hour)
}

/// Split an instant into its calendar day and the fractional hour used for engine queries.
///
/// Only hours and minutes are carried: the seconds of the instant are dropped.
pub fn instant_to_day_hour(instant: &Epoch) -> (CalendarDate, FractionalHour) {
    let (year, month, day, hour, minute, _, _) = instant.to_gregorian_utc();
    (
        CalendarDate { year, month, day },
        hour as f64 + minute as f64 / 60.0,
    )
}

/// Time elapsed since 00:00 of a calendar day, at whole-second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeOfDay {
    /// Decompose a fractional hour into hours, minutes and seconds.
    ///
    /// Every step truncates, so the result never exceeds `hour` and never rolls over
    /// into the next minute or hour.
    ///
    /// Arguments
    /// -----------------
    /// * `hour`: fractional hour in `[0, 24)` as returned by [`revjul`].
    pub fn from_fractional_hour(hour: FractionalHour) -> Self {
        let hours = hour.trunc();
        let minutes = (hour - hours) * 60.0;
        let seconds = (hour - hours - minutes.trunc() / 60.0) * SECONDS_PER_HOUR;

        TimeOfDay {
            hours: hours.clamp(0.0, 23.0) as u8,
            minutes: minutes.trunc().clamp(0.0, 59.0) as u8,
            seconds: seconds.trunc().clamp(0.0, 59.0) as u8,
        }
    }

    /// Fractional hours represented by this time of day.
    pub fn as_fractional_hour(&self) -> FractionalHour {
        self.hours as f64 + self.minutes as f64 / 60.0 + self.seconds as f64 / SECONDS_PER_HOUR
    }

    /// Duration since midnight.
    pub fn as_duration(&self) -> Duration {
        Unit::Hour * i64::from(self.hours)
            + Unit::Minute * i64::from(self.minutes)
            + Unit::Second * i64::from(self.seconds)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// IAU 1982 polynomial for the mean sidereal time at 0h UT1, plus the
/// fractional-day term scaled by the sidereal/solar rate ratio.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
pub fn gmst(tjm: MJD) -> f64 {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    let mut gmst0 = ((C3 * t + C2) * t + C1) * t + C0;
    gmst0 *= DPI / SECONDS_PER_DAY;

    let h = tjm.fract() * DPI;
    (gmst0 + h * RAP).rem_euclid(DPI)
}

/// Local mean sidereal time in radians for a Julian day (UT) and an east-positive longitude.
pub fn local_mean_sidereal_time(jd: JulianDay, longitude_rad: f64) -> f64 {
    (gmst(jd - JDTOMJD) + longitude_rad).rem_euclid(DPI)
}
