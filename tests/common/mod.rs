#![allow(dead_code)]

use std::collections::HashMap;

use astrolog::astrolog_errors::EngineError;
use astrolog::celestial::catalog::BodyId;
use astrolog::constants::{Celsius, HectoPascal, JulianDay, Meter};
use astrolog::coordinates::GeoLocation;
use astrolog::ephemeris::{
    CalcFlags, EphemerisEngine, EphemerisSource, GeoPosition, NodApsFlags, RawPosition,
    RiseTransFlags, TransitTarget,
};
use astrolog::time::{julday, CalendarDate};
use astrolog::transit::TransitKind;

/// Frame (longitude, latitude) active when a call was made.
pub type FrameAtCall = Option<(f64, f64)>;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetFrame {
        longitude: f64,
        latitude: f64,
        altitude: Meter,
    },
    SetSource(EphemerisSource),
    Body {
        jd: JulianDay,
        body: BodyId,
        flags: CalcFlags,
        frame: FrameAtCall,
    },
    Star {
        designator: String,
        jd: JulianDay,
        flags: CalcFlags,
        frame: FrameAtCall,
    },
    FocalPoint {
        jd: JulianDay,
        body: BodyId,
        method: NodApsFlags,
        flags: CalcFlags,
        frame: FrameAtCall,
    },
    Search {
        start: JulianDay,
        target: Target,
        event: RiseTransFlags,
        longitude: f64,
        latitude: f64,
        altitude: Meter,
        pressure: HectoPascal,
        temperature: Celsius,
        flags: CalcFlags,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Body(BodyId),
    Star(String),
}

/// Recording engine: positions are derived from the active frame so that a query run under
/// another observer's frame is visible in its result.
#[derive(Debug, Default)]
pub struct MockEngine {
    pub calls: Vec<Call>,
    pub frame: Option<GeoLocation>,
    pub answers: HashMap<TransitKind, JulianDay>,
    pub failure: Option<EngineError>,
    pub panic_on_query: bool,
}

impl MockEngine {
    pub fn new() -> Self {
        MockEngine::default()
    }

    pub fn failing(error: EngineError) -> Self {
        MockEngine {
            failure: Some(error),
            ..Default::default()
        }
    }

    /// Script the engine's answer for one event kind; unscripted kinds are "not found".
    pub fn answer(mut self, kind: TransitKind, jd: JulianDay) -> Self {
        self.answers.insert(kind, jd);
        self
    }

    pub fn search_calls(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Search { .. }))
            .collect()
    }

    fn frame_at_call(&self) -> FrameAtCall {
        self.frame.map(|f| (f.longitude(), f.latitude()))
    }

    fn check(&self) -> Result<GeoLocation, EngineError> {
        if self.panic_on_query {
            panic!("engine crashed");
        }
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.frame
            .ok_or_else(|| EngineError::Computation("topocentric frame not set".into()))
    }

    fn kind_of(event: RiseTransFlags) -> TransitKind {
        if event.contains(RiseTransFlags::RISE) {
            TransitKind::Rise
        } else if event.contains(RiseTransFlags::SET) {
            TransitKind::Set
        } else if event.contains(RiseTransFlags::MTRANSIT) {
            TransitKind::UpperTransit
        } else {
            TransitKind::LowerTransit
        }
    }
}

/// Longitude/latitude produced by [`MockEngine`] for an observer and an offset.
pub fn expected_lon_lat(location: &GeoLocation, offset: f64) -> (f64, f64) {
    (
        (location.longitude() + offset).rem_euclid(360.0),
        location.latitude() / 2.0,
    )
}

fn frame_offset(flags: CalcFlags) -> f64 {
    if flags.contains(CalcFlags::EQUATORIAL) {
        100.0
    } else {
        0.0
    }
}

impl EphemerisEngine for MockEngine {
    fn set_topocentric_frame(&mut self, location: &GeoLocation, altitude: Meter) {
        self.calls.push(Call::SetFrame {
            longitude: location.longitude(),
            latitude: location.latitude(),
            altitude,
        });
        self.frame = Some(*location);
    }

    fn set_ephemeris_source(&mut self, source: &EphemerisSource) -> Result<(), EngineError> {
        self.calls.push(Call::SetSource(source.clone()));
        match source {
            EphemerisSource::Jpl(file) if file == "missing.eph" => {
                Err(EngineError::DataFileMissing(file.clone()))
            }
            _ => Ok(()),
        }
    }

    fn body_position(
        &mut self,
        jd: JulianDay,
        body: BodyId,
        flags: CalcFlags,
    ) -> Result<RawPosition, EngineError> {
        self.calls.push(Call::Body {
            jd,
            body,
            flags,
            frame: self.frame_at_call(),
        });
        let frame = self.check()?;
        let (lon, lat) = expected_lon_lat(&frame, body.code() as f64 + frame_offset(flags));
        Ok(RawPosition::new(lon, lat, 1.0))
    }

    fn fixed_star_position(
        &mut self,
        designator: &str,
        jd: JulianDay,
        flags: CalcFlags,
    ) -> Result<RawPosition, EngineError> {
        self.calls.push(Call::Star {
            designator: designator.to_string(),
            jd,
            flags,
            frame: self.frame_at_call(),
        });
        let frame = self.check()?;
        let (lon, lat) = expected_lon_lat(&frame, 50.0 + frame_offset(flags));
        Ok(RawPosition::new(lon, lat, 1.0e6))
    }

    fn focal_point_position(
        &mut self,
        jd: JulianDay,
        body: BodyId,
        method: NodApsFlags,
        flags: CalcFlags,
    ) -> Result<RawPosition, EngineError> {
        self.calls.push(Call::FocalPoint {
            jd,
            body,
            method,
            flags,
            frame: self.frame_at_call(),
        });
        let frame = self.check()?;
        let mean = if method.contains(NodApsFlags::MEAN) { 1.0 } else { 0.0 };
        let (lon, lat) = expected_lon_lat(
            &frame,
            180.0 + body.code() as f64 + mean + frame_offset(flags),
        );
        Ok(RawPosition::new(lon, lat, 2.0))
    }

    fn search_transit_event(
        &mut self,
        start: JulianDay,
        target: TransitTarget<'_>,
        event: RiseTransFlags,
        geopos: &GeoPosition,
        pressure: HectoPascal,
        temperature: Celsius,
        flags: CalcFlags,
    ) -> Result<Option<JulianDay>, EngineError> {
        self.calls.push(Call::Search {
            start,
            target: match target {
                TransitTarget::Body(id) => Target::Body(id),
                TransitTarget::Star(name) => Target::Star(name.to_string()),
            },
            event,
            longitude: geopos.location.longitude(),
            latitude: geopos.location.latitude(),
            altitude: geopos.altitude,
            pressure,
            temperature,
            flags,
        });
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.answers.get(&MockEngine::kind_of(event)).copied())
    }
}

pub fn paris() -> GeoLocation {
    GeoLocation::new(2.3522, 48.8566).unwrap()
}

pub fn tromso() -> GeoLocation {
    GeoLocation::new(18.9553, 69.6492).unwrap()
}

pub fn date(year: i32, month: u8, day: u8) -> CalendarDate {
    CalendarDate::new(year, month, day).unwrap()
}

/// Julian day of `hour` on the given calendar day.
pub fn jd_at(year: i32, month: u8, day: u8, hour: f64) -> JulianDay {
    julday(&date(year, month, day), hour)
}
