pub mod astrolog;
pub mod astrolog_errors;
pub mod celestial;
pub mod constants;
pub mod coordinates;
pub mod ephemeris;
pub mod time;
pub mod transit;
