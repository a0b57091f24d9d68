//! Engine body codes and the canonical name catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::astrolog_errors::UnknownBodyError;
use crate::constants::AST_OFFSET;

/// Numeric body code understood by the ephemeris engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub i32);

impl BodyId {
    pub const SUN: BodyId = BodyId(0);
    pub const MOON: BodyId = BodyId(1);
    pub const MERCURY: BodyId = BodyId(2);
    pub const VENUS: BodyId = BodyId(3);
    pub const MARS: BodyId = BodyId(4);
    pub const JUPITER: BodyId = BodyId(5);
    pub const SATURN: BodyId = BodyId(6);
    pub const URANUS: BodyId = BodyId(7);
    pub const NEPTUNE: BodyId = BodyId(8);
    pub const PLUTO: BodyId = BodyId(9);
    pub const EARTH: BodyId = BodyId(14);

    /// Code of a numbered minor planet.
    pub const fn asteroid(number: i32) -> BodyId {
        BodyId(AST_OFFSET + number)
    }

    pub fn code(self) -> i32 {
        self.0
    }

    pub fn is_asteroid(self) -> bool {
        self.0 > AST_OFFSET
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match BODY_CATALOG.iter().find(|(_, id)| id == self) {
            Some((name, _)) => write!(f, "{name}"),
            None if self.is_asteroid() => write!(f, "asteroid {}", self.0 - AST_OFFSET),
            None => write!(f, "#{}", self.0),
        }
    }
}

/// Canonical names and their engine codes.
pub const BODY_CATALOG: [(&str, BodyId); 14] = [
    ("SUN", BodyId::SUN),
    ("MOON", BodyId::MOON),
    ("MERCURY", BodyId::MERCURY),
    ("VENUS", BodyId::VENUS),
    ("MARS", BodyId::MARS),
    ("EARTH", BodyId::EARTH),
    ("JUPITER", BodyId::JUPITER),
    ("SATURN", BodyId::SATURN),
    ("URANUS", BodyId::URANUS),
    ("NEPTUNE", BodyId::NEPTUNE),
    ("PLUTO", BodyId::PLUTO),
    ("ERIS", BodyId::asteroid(136199)),
    ("SEDNA", BodyId::asteroid(90377)),
    ("QUAOAR", BodyId::asteroid(50000)),
];

/// Resolve a body name (case-insensitive) to its engine code.
///
/// Errors
/// ----------
/// * [`UnknownBodyError`] carrying the name as given when it is not in [`BODY_CATALOG`].
pub fn body_id_by_name(name: &str) -> Result<BodyId, UnknownBodyError> {
    let wanted = name.trim().to_ascii_uppercase();
    BODY_CATALOG
        .iter()
        .find(|(canonical, _)| *canonical == wanted)
        .map(|(_, id)| *id)
        .ok_or_else(|| UnknownBodyError(name.to_string()))
}
