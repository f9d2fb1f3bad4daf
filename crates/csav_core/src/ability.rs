use std::fmt;

/// A player ability, identified by its bit position in the unlock mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ability {
    NoAbility,
    DoubleJump,
    Glider,
    Dash,
    WallJump,
    Unknown(u32),
}

impl Ability {
    pub const NO_ABILITY_BIT: u32 = 0;
    pub const DOUBLE_JUMP_BIT: u32 = 1;
    pub const GLIDER_BIT: u32 = 2;
    pub const DASH_BIT: u32 = 3;
    pub const WALL_JUMP_BIT: u32 = 4;

    pub fn from_bit(bit: u32) -> Self {
        match bit {
            Self::NO_ABILITY_BIT => Self::NoAbility,
            Self::DOUBLE_JUMP_BIT => Self::DoubleJump,
            Self::GLIDER_BIT => Self::Glider,
            Self::DASH_BIT => Self::Dash,
            Self::WALL_JUMP_BIT => Self::WallJump,
            other => Self::Unknown(other),
        }
    }

    pub fn bit(&self) -> u32 {
        match *self {
            Self::NoAbility => Self::NO_ABILITY_BIT,
            Self::DoubleJump => Self::DOUBLE_JUMP_BIT,
            Self::Glider => Self::GLIDER_BIT,
            Self::Dash => Self::DASH_BIT,
            Self::WallJump => Self::WALL_JUMP_BIT,
            Self::Unknown(other) => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::NoAbility => "None",
            Self::DoubleJump => "Double Jump",
            Self::Glider => "Glider",
            Self::Dash => "Dash",
            Self::WallJump => "Wall Jump",
            Self::Unknown(_) => "Unknown",
        }
    }

    /// Every ability whose bit is set in `mask`, lowest bit first.
    pub fn from_mask(mask: u32) -> Vec<Self> {
        (0..u32::BITS)
            .filter(|bit| mask & (1 << bit) != 0)
            .map(Self::from_bit)
            .collect()
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Unknown(bit) => write!(f, "Unknown (bit {})", bit),
            _ => f.write_str(self.as_str()),
        }
    }
}
