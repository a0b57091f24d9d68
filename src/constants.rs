//! # Constants and type definitions for Astrolog
//!
//! This module centralizes the **conversion factors**, **epoch constants**, and **common type
//! aliases** used throughout the `astrolog` crate.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians, days and hours ↔ seconds)
//! - Julian-day epoch constants shared by the time and sidereal-time helpers
//! - Core type aliases used across the crate
//! - The minor-planet code offset used by the engine's body numbering

// -------------------------------------------------------------------------------------------------
// Unit conversions and epochs
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of seconds in one hour
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Offset added to a minor planet catalog number to obtain its engine body code
pub const AST_OFFSET: i32 = 10_000;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Atmospheric pressure in hectopascals (millibars)
pub type HectoPascal = f64;
/// Temperature in degrees Celsius
pub type Celsius = f64;
/// Time of day expressed as fractional hours in `[0, 24)`
pub type FractionalHour = f64;

/// Julian Day number (days, UT)
pub type JulianDay = f64;

/// Modified Julian Date (days)
pub type MJD = f64;
