//! Configuration of [`ActionCodec`](crate::ActionCodec).
use crate::{ActionGroup, Button};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Layout of the integers emitted by a policy.
///
/// Let `G` be the number of group combinations and `C = camera_bins^2`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
pub enum ActionLayout {
    /// `main_head` in `[0, 1 + 2G)` and `camera_head` in `[0, C)`.
    ///
    /// `main_head == 0` opens the inventory. Otherwise `main_head - 1` holds
    /// the group digits followed by the camera-enabled digit (`1` = enabled).
    SingleHead,

    /// `main_head` in `[0, G)` holds the group digits; `inventory` and
    /// `camera_enabled` are separate flags; `camera_head` in `[0, C)`.
    SplitHead,

    /// One integer in `[0, 1 + G C)`.
    ///
    /// `0` opens the inventory. Otherwise `id - 1` holds the group digits
    /// followed by a camera digit in `[0, C)`: `0` for no movement, then the
    /// camera cells in order with the center cell left out. Distinct values
    /// decode to distinct actions.
    Flat,
}

impl ActionLayout {
    /// Name of the layout.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SingleHead => "SingleHead",
            Self::SplitHead => "SplitHead",
            Self::Flat => "Flat",
        }
    }
}

impl Default for ActionLayout {
    fn default() -> Self {
        Self::SingleHead
    }
}

/// Configuration of [`ActionCodec`](crate::ActionCodec).
///
/// The default reproduces the action space of the MineRL BASALT wrapper:
/// 10 groups, 9 hotbar slots and an 11x11 camera grid, i.e., a main head of
/// 34561 actions and a camera head of 121 actions.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ActionCodecConfig {
    /// Button groups. The first group is the least significant digit.
    pub groups: Vec<ActionGroup>,

    /// Number of hotbar slots. Hotbar controls must lie in `1..=hotbar_slots`.
    pub hotbar_slots: u8,

    /// Number of camera bins per axis. Must be odd and at least 3.
    pub camera_bins: usize,

    /// Base of the camera response curve.
    pub camera_base: f64,

    /// Layout of the policy outputs.
    pub layout: ActionLayout,
}

impl Default for ActionCodecConfig {
    fn default() -> Self {
        let hotbar_slots = 9;
        Self {
            groups: vec![
                vec![Button::Forward, Button::Back].into(),
                vec![Button::Left, Button::Right].into(),
                vec![Button::Sneak, Button::Sprint].into(),
                ActionGroup::hotbar(hotbar_slots),
                ActionGroup::single(Button::Use),
                ActionGroup::single(Button::Drop),
                ActionGroup::single(Button::Attack),
                ActionGroup::single(Button::Jump),
                ActionGroup::single(Button::PickItem),
                ActionGroup::single(Button::SwapHand),
            ],
            hotbar_slots,
            camera_bins: 11,
            camera_base: 11.0,
            layout: ActionLayout::SingleHead,
        }
    }
}

impl ActionCodecConfig {
    /// Sets the button groups.
    pub fn groups(mut self, v: Vec<ActionGroup>) -> Self {
        self.groups = v;
        self
    }

    /// Sets the number of hotbar slots.
    pub fn hotbar_slots(mut self, v: u8) -> Self {
        self.hotbar_slots = v;
        self
    }

    /// Sets the number of camera bins per axis.
    pub fn camera_bins(mut self, v: usize) -> Self {
        self.camera_bins = v;
        self
    }

    /// Sets the base of the camera response curve.
    pub fn camera_base(mut self, v: f64) -> Self {
        self.camera_base = v;
        self
    }

    /// Sets the layout of the policy outputs.
    pub fn layout(mut self, v: ActionLayout) -> Self {
        self.layout = v;
        self
    }

    /// Loads [`ActionCodecConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        log::info!("Load config of action codec from {}", path_.to_str().unwrap_or("?"));
        Ok(b)
    }

    /// Saves [`ActionCodecConfig`] as YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        log::info!("Save config of action codec into {}", path_.to_str().unwrap_or("?"));
        Ok(())
    }
}
