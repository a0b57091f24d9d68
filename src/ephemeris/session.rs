//! Scoped topocentric queries.
//!
//! A [`TopocentricSession`] is the only way the celestial protocol reaches an engine: opening it
//! sets the observer frame, and it holds the exclusive borrow of the engine until dropped, so no
//! other query can change the frame between the configuration and the position calls made
//! through the session.

use tracing::{debug, trace};

use crate::astrolog_errors::EngineError;
use crate::celestial::catalog::BodyId;
use crate::constants::JulianDay;
use crate::coordinates::GeoLocation;
use crate::ephemeris::{CalcFlags, EphemerisEngine, Frame, GeoPosition, NodApsFlags, RawPosition};

pub struct TopocentricSession<'e, E: EphemerisEngine + ?Sized> {
    engine: &'e mut E,
    geopos: GeoPosition,
    base_flags: CalcFlags,
}

impl<'e, E: EphemerisEngine + ?Sized> TopocentricSession<'e, E> {
    /// Configure the engine's observer frame for `location` (sea level) and start a session.
    ///
    /// `base_flags` selects the ephemeris data; `TOPOCTR` is always added.
    pub fn open(engine: &'e mut E, location: GeoLocation, base_flags: CalcFlags) -> Self {
        let geopos = GeoPosition::at_sea_level(location);
        debug!(
            longitude = location.longitude(),
            latitude = location.latitude(),
            "set topocentric frame"
        );
        engine.set_topocentric_frame(&geopos.location, geopos.altitude);
        TopocentricSession {
            engine,
            geopos,
            base_flags: base_flags | CalcFlags::TOPOCTR,
        }
    }

    pub fn geopos(&self) -> &GeoPosition {
        &self.geopos
    }

    pub fn flags(&self, frame: Frame) -> CalcFlags {
        self.base_flags | frame.calc_flags()
    }

    pub fn engine(&self) -> &E {
        &*self.engine
    }

    pub fn body_position(
        &mut self,
        jd: JulianDay,
        body: BodyId,
        frame: Frame,
    ) -> Result<RawPosition, EngineError> {
        let flags = self.flags(frame);
        trace!(jd, %body, ?frame, "body position");
        self.engine.body_position(jd, body, flags)
    }

    pub fn fixed_star_position(
        &mut self,
        jd: JulianDay,
        designator: &str,
        frame: Frame,
    ) -> Result<RawPosition, EngineError> {
        let flags = self.flags(frame);
        trace!(jd, designator, ?frame, "fixed star position");
        self.engine.fixed_star_position(designator, jd, flags)
    }

    pub fn focal_point_position(
        &mut self,
        jd: JulianDay,
        body: BodyId,
        mean: bool,
        frame: Frame,
    ) -> Result<RawPosition, EngineError> {
        let method = NodApsFlags::FOPOINT
            | if mean {
                NodApsFlags::MEAN
            } else {
                NodApsFlags::OSCU
            };
        let flags = self.flags(frame);
        trace!(jd, %body, mean, ?frame, "focal point position");
        self.engine.focal_point_position(jd, body, method, flags)
    }
}
