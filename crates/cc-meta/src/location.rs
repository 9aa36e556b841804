//! Mount locations on a chassis.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A slot on a chassis where components are mounted.
///
/// "No location" (an item being picked up, or dropped from storage) is
/// expressed as `Option<ChassisLocation>` rather than a dedicated variant.
///
/// Deserialization accepts everything [`FromStr`] does, so settings may
/// write `"CT"` or `"center torso"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ChassisLocation {
    Head,
    LeftArm,
    LeftTorso,
    CenterTorso,
    RightTorso,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl ChassisLocation {
    /// Every location, in the order the mech lab lays them out.
    pub const ALL: [ChassisLocation; 8] = [
        ChassisLocation::Head,
        ChassisLocation::LeftArm,
        ChassisLocation::LeftTorso,
        ChassisLocation::CenterTorso,
        ChassisLocation::RightTorso,
        ChassisLocation::RightArm,
        ChassisLocation::LeftLeg,
        ChassisLocation::RightLeg,
    ];

    /// Human readable name used in rejection messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ChassisLocation::Head => "Head",
            ChassisLocation::LeftArm => "Left Arm",
            ChassisLocation::LeftTorso => "Left Torso",
            ChassisLocation::CenterTorso => "Center Torso",
            ChassisLocation::RightTorso => "Right Torso",
            ChassisLocation::RightArm => "Right Arm",
            ChassisLocation::LeftLeg => "Left Leg",
            ChassisLocation::RightLeg => "Right Leg",
        }
    }
}

impl fmt::Display for ChassisLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ChassisLocation {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        match compact.as_str() {
            "head" => Ok(ChassisLocation::Head),
            "leftarm" | "la" => Ok(ChassisLocation::LeftArm),
            "lefttorso" | "lt" => Ok(ChassisLocation::LeftTorso),
            "centertorso" | "ct" => Ok(ChassisLocation::CenterTorso),
            "righttorso" | "rt" => Ok(ChassisLocation::RightTorso),
            "rightarm" | "ra" => Ok(ChassisLocation::RightArm),
            "leftleg" | "ll" => Ok(ChassisLocation::LeftLeg),
            "rightleg" | "rl" => Ok(ChassisLocation::RightLeg),
            _ => Err(Error::InvalidLocation {
                location: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ChassisLocation {
    type Error = Error;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}
