//! Structured action passed to MineRL environments.
use crate::{Button, Control};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// A single timestep of simulator input.
///
/// Field names follow the keys of the MineRL action dictionary.
/// `hotbar` holds the selected slot (1-based), since at most one slot can be
/// pressed at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinerlAction {
    /// Move forward.
    pub forward: bool,
    /// Move backward.
    pub back: bool,
    /// Strafe left.
    pub left: bool,
    /// Strafe right.
    pub right: bool,
    /// Jump.
    pub jump: bool,
    /// Sneak.
    pub sneak: bool,
    /// Sprint.
    pub sprint: bool,
    /// Attack or break a block.
    pub attack: bool,
    /// Use the held item or place a block.
    #[serde(rename = "use")]
    pub use_item: bool,
    /// Drop the held item.
    pub drop: bool,
    /// Pick the targeted block into the hotbar.
    #[serde(rename = "pickItem")]
    pub pick_item: bool,
    /// Swap items between the main hand and the off hand.
    #[serde(rename = "swapHand")]
    pub swap_hand: bool,
    /// Escape key. Ends the episode in BASALT environments.
    #[serde(rename = "ESC")]
    pub esc: bool,
    /// Open the inventory.
    pub inventory: bool,
    /// Selected hotbar slot, 1-based.
    pub hotbar: Option<u8>,

    /// Camera delta `(pitch, yaw)` in degrees.
    pub camera: [f64; 2],
}

impl Default for MinerlAction {
    fn default() -> Self {
        Self::noop()
    }
}

impl MinerlAction {
    /// Returns the action in which no control is active and the camera does not move.
    pub fn noop() -> Self {
        Self {
            forward: false,
            back: false,
            left: false,
            right: false,
            jump: false,
            sneak: false,
            sprint: false,
            attack: false,
            use_item: false,
            drop: false,
            pick_item: false,
            swap_hand: false,
            esc: false,
            inventory: false,
            hotbar: None,
            camera: [0.0, 0.0],
        }
    }

    /// Returns the action that only opens the inventory.
    pub fn inventory_only() -> Self {
        Self {
            inventory: true,
            ..Self::noop()
        }
    }

    fn button(&self, button: Button) -> bool {
        match button {
            Button::Forward => self.forward,
            Button::Back => self.back,
            Button::Left => self.left,
            Button::Right => self.right,
            Button::Jump => self.jump,
            Button::Sneak => self.sneak,
            Button::Sprint => self.sprint,
            Button::Attack => self.attack,
            Button::Use => self.use_item,
            Button::Drop => self.drop,
            Button::PickItem => self.pick_item,
            Button::SwapHand => self.swap_hand,
            Button::Esc => self.esc,
        }
    }

    fn button_mut(&mut self, button: Button) -> &mut bool {
        match button {
            Button::Forward => &mut self.forward,
            Button::Back => &mut self.back,
            Button::Left => &mut self.left,
            Button::Right => &mut self.right,
            Button::Jump => &mut self.jump,
            Button::Sneak => &mut self.sneak,
            Button::Sprint => &mut self.sprint,
            Button::Attack => &mut self.attack,
            Button::Use => &mut self.use_item,
            Button::Drop => &mut self.drop,
            Button::PickItem => &mut self.pick_item,
            Button::SwapHand => &mut self.swap_hand,
            Button::Esc => &mut self.esc,
        }
    }

    /// Returns `true` if the control is active.
    pub fn is_active(&self, control: Control) -> bool {
        match control {
            Control::Button(b) => self.button(b),
            Control::Hotbar(slot) => self.hotbar == Some(slot),
        }
    }

    /// Activates the control.
    ///
    /// Activating a hotbar slot replaces the previously selected one.
    pub fn activate(&mut self, control: Control) {
        match control {
            Control::Button(b) => *self.button_mut(b) = true,
            Control::Hotbar(slot) => self.hotbar = Some(slot),
        }
    }

    /// Returns the active controls, buttons first in [`Button`] order, then the hotbar slot.
    pub fn active_controls(&self) -> Vec<Control> {
        Button::iter()
            .filter(|b| self.button(*b))
            .map(Control::Button)
            .chain(self.hotbar.map(Control::Hotbar))
            .collect()
    }

    /// Returns `true` if the camera moves.
    pub fn camera_moves(&self) -> bool {
        self.camera != [0.0, 0.0]
    }

    /// Returns `true` if nothing is pressed and the camera does not move.
    pub fn is_noop(&self) -> bool {
        *self == Self::noop()
    }
}
