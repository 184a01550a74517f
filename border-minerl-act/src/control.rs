//! Names of the controls that can be grouped by an [`ActionGroup`](crate::ActionGroup).
use crate::CodecError;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, str::FromStr};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Binary keys of the MineRL action space.
///
/// The string representation is the key used by MineRL, e.g. `pickItem`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, EnumIter, IntoStaticStr,
    Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum Button {
    /// Move forward.
    Forward,
    /// Move backward.
    Back,
    /// Strafe left.
    Left,
    /// Strafe right.
    Right,
    /// Jump.
    Jump,
    /// Sneak.
    Sneak,
    /// Sprint.
    Sprint,
    /// Attack or break a block.
    Attack,
    /// Use the held item or place a block.
    Use,
    /// Drop the held item.
    Drop,
    /// Pick the targeted block into the hotbar.
    #[strum(to_string = "pickItem")]
    PickItem,
    /// Swap items between the main hand and the off hand.
    #[strum(to_string = "swapHand")]
    SwapHand,
    /// Escape key.
    #[strum(to_string = "ESC")]
    Esc,
}

const HOTBAR_PREFIX: &str = "hotbar.";

/// A control which can be a member of an action group.
///
/// `inventory` and `camera` are not controls: the codec handles them outside
/// of the mixed-radix chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Control {
    /// A binary key.
    Button(Button),

    /// Selection of a hotbar slot, 1-based.
    Hotbar(u8),
}

impl Control {
    /// Returns the hotbar control of the given slot.
    pub fn hotbar(slot: u8) -> Self {
        Self::Hotbar(slot)
    }
}

impl From<Button> for Control {
    fn from(button: Button) -> Self {
        Self::Button(button)
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Button(b) => write!(f, "{}", b),
            Self::Hotbar(slot) => write!(f, "{}{}", HOTBAR_PREFIX, slot),
        }
    }
}

impl FromStr for Control {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(slot) = s.strip_prefix(HOTBAR_PREFIX) {
            let slot = slot
                .parse::<u8>()
                .map_err(|_| CodecError::Configuration(format!("invalid hotbar slot in {:?}", s)))?;
            return Ok(Self::Hotbar(slot));
        }
        match s {
            "inventory" | "camera" => Err(CodecError::Configuration(format!(
                "{:?} is handled by the codec and cannot be grouped",
                s
            ))),
            _ => Button::from_str(s)
                .map(Self::Button)
                .map_err(|_| CodecError::Configuration(format!("unknown control {:?}", s))),
        }
    }
}

impl TryFrom<String> for Control {
    type Error = CodecError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Control> for String {
    fn from(control: Control) -> Self {
        control.to_string()
    }
}
