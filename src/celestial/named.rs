//! Well-known objects and the traditional planet groups.

use crate::celestial::catalog::BodyId;
use crate::celestial::Celestial;

pub const SUN: Celestial = Celestial::moving_const("Sun", BodyId::SUN);
pub const MOON: Celestial = Celestial::moving_const("Moon", BodyId::MOON);
pub const MERCURY: Celestial = Celestial::moving_const("Mercury", BodyId::MERCURY);
pub const VENUS: Celestial = Celestial::moving_const("Venus", BodyId::VENUS);
pub const EARTH: Celestial = Celestial::moving_const("Earth", BodyId::EARTH);
pub const MARS: Celestial = Celestial::moving_const("Mars", BodyId::MARS);
pub const JUPITER: Celestial = Celestial::moving_const("Jupiter", BodyId::JUPITER);
pub const SATURN: Celestial = Celestial::moving_const("Saturn", BodyId::SATURN);
pub const URANUS: Celestial = Celestial::moving_const("Uranus", BodyId::URANUS);
pub const NEPTUNE: Celestial = Celestial::moving_const("Neptune", BodyId::NEPTUNE);
pub const PLUTO: Celestial = Celestial::moving_const("Pluto", BodyId::PLUTO);

/// The seven classical planets, in Chaldean weekday order.
pub const SEPTENER: [Celestial; 7] = [SUN, MARS, MOON, MERCURY, JUPITER, VENUS, SATURN];

/// The septener followed by Uranus and Neptune.
pub const NOVILE: [Celestial; 9] = [
    SUN, MARS, MOON, MERCURY, JUPITER, VENUS, SATURN, URANUS, NEPTUNE,
];

/// Second focal points ("black suns") of planetary orbits.
pub mod black_sun {
    use super::*;

    /// Empty focus of the Moon's orbit around the Earth.
    pub const BLACK_EARTH: Celestial = Celestial::black_sun_const("Black Earth", BodyId::MOON);
    pub const MERCURY: Celestial = Celestial::black_sun_const("BS Mercury", BodyId::MERCURY);
    pub const VENUS: Celestial = Celestial::black_sun_const("BS Venus", BodyId::VENUS);
    pub const EARTH: Celestial = Celestial::black_sun_const("BS Earth", BodyId::EARTH);
    pub const MARS: Celestial = Celestial::black_sun_const("BS Mars", BodyId::MARS);
    pub const JUPITER: Celestial = Celestial::black_sun_const("BS Jupiter", BodyId::JUPITER);
    pub const SATURN: Celestial = Celestial::black_sun_const("BS Saturn", BodyId::SATURN);
    pub const URANUS: Celestial = Celestial::black_sun_const("BS Uranus", BodyId::URANUS);
    pub const NEPTUNE: Celestial = Celestial::black_sun_const("BS Neptune", BodyId::NEPTUNE);

    pub const ALL: [Celestial; 9] = [
        BLACK_EARTH, MERCURY, VENUS, EARTH, MARS, JUPITER, SATURN, URANUS, NEPTUNE,
    ];
}
