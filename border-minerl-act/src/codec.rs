//! Conversion between raw policy outputs and [`MinerlAction`].
use crate::{
    ActionCodecConfig, ActionGroup, ActionLayout, ActionSpace, CameraQuantizer, CodecError,
    Control, GroupEncoder, MinerlAction, RawAction,
};
use log::info;

/// Decodes raw policy outputs into [`MinerlAction`] and back.
///
/// The codec is immutable once built and can be shared between threads,
/// e.g., behind an [`Arc`](std::sync::Arc) in vectorized environments.
///
/// Opening the inventory is exclusive with every other control: any raw
/// action selecting the inventory decodes to [`MinerlAction::inventory_only`].
#[derive(Debug, Clone)]
pub struct ActionCodec {
    layout: ActionLayout,
    groups: GroupEncoder,
    camera: CameraQuantizer,
    space: ActionSpace,
}

impl ActionCodec {
    /// Builds a codec, validating the configuration.
    pub fn build(config: &ActionCodecConfig) -> Result<Self, CodecError> {
        for control in config.groups.iter().flat_map(ActionGroup::controls) {
            if let Control::Hotbar(slot) = control {
                if *slot == 0 || *slot > config.hotbar_slots {
                    return Err(CodecError::Configuration(format!(
                        "{} is outside of the hotbar slots 1..={}",
                        control, config.hotbar_slots
                    )));
                }
            }
        }

        let hotbar_groups = config
            .groups
            .iter()
            .filter(|g| g.controls().iter().any(|c| matches!(c, Control::Hotbar(_))))
            .count();
        if hotbar_groups > 1 {
            return Err(CodecError::Configuration(format!(
                "hotbar slots must be in a single group, found them in {} groups",
                hotbar_groups
            )));
        }

        let groups = GroupEncoder::new(config.groups.clone())?;
        let camera = CameraQuantizer::new(config.camera_bins, config.camera_base)?;
        let space = ActionSpace::new(config.layout, groups.cardinality(), camera.n_cells())?;

        info!(
            "Build action codec: layout = {}, heads = {:?}, size = {}",
            config.layout.name(),
            space.nvec(),
            space.size()
        );

        Ok(Self {
            layout: config.layout,
            groups,
            camera,
            space,
        })
    }

    /// Layout of the raw actions.
    pub fn layout(&self) -> ActionLayout {
        self.layout
    }

    /// Encoder of the button groups.
    pub fn groups(&self) -> &GroupEncoder {
        &self.groups
    }

    /// Quantizer of the camera.
    pub fn camera(&self) -> &CameraQuantizer {
        &self.camera
    }

    /// Action space to be used to size the policy outputs.
    pub fn action_space(&self) -> &ActionSpace {
        &self.space
    }

    /// Number of distinct raw actions accepted by [`ActionCodec::decode_action`].
    pub fn space_size(&self) -> usize {
        self.space.size()
    }

    /// Action without any input.
    pub fn noop_action(&self) -> MinerlAction {
        MinerlAction::noop()
    }

    /// Action that only opens the inventory.
    pub fn inventory_action(&self) -> MinerlAction {
        MinerlAction::inventory_only()
    }

    fn check(field: &'static str, value: usize, bound: usize) -> Result<(), CodecError> {
        if value >= bound {
            return Err(CodecError::out_of_range(field, value, bound));
        }
        Ok(())
    }

    fn mismatch(&self, raw: &RawAction) -> CodecError {
        CodecError::LayoutMismatch {
            expected: self.layout.name(),
            found: raw.layout().name(),
        }
    }

    fn group_action(
        &self,
        code: usize,
        camera_cell: Option<usize>,
    ) -> Result<MinerlAction, CodecError> {
        let (selection, _) = self.groups.decode(code);
        let mut act = MinerlAction::noop();
        selection.apply(&mut act);
        if let Some(cell) = camera_cell {
            let (dx, dy) = self.camera.decode_index(cell)?;
            act.camera = [dx, dy];
        }
        Ok(act)
    }

    /// Decodes a raw action.
    ///
    /// Every field is checked against its bound before decoding, including
    /// the camera head when the camera is disabled.
    pub fn decode_action(&self, raw: &RawAction) -> Result<MinerlAction, CodecError> {
        if raw.layout() != self.layout {
            return Err(self.mismatch(raw));
        }
        let g = self.groups.cardinality();
        let n_cells = self.camera.n_cells();

        match *raw {
            RawAction::Flat(id) => {
                Self::check("action", id, self.space_size())?;
                if id == 0 {
                    return Ok(self.inventory_action());
                }
                let code = id - 1;
                let cell = match code / g {
                    0 => None,
                    d if d - 1 < self.camera.center_cell() => Some(d - 1),
                    d => Some(d),
                };
                self.group_action(code % g, cell)
            }
            RawAction::SingleHead {
                main_head,
                camera_head,
            } => {
                Self::check("main_head", main_head, self.space.heads()[0].n)?;
                Self::check("camera_head", camera_head, n_cells)?;
                if main_head == 0 {
                    return Ok(self.inventory_action());
                }
                let code = main_head - 1;
                let camera_enabled = code / g == 1;
                self.group_action(code % g, Some(camera_head).filter(|_| camera_enabled))
            }
            RawAction::SplitHead {
                main_head,
                inventory,
                camera_enabled,
                camera_head,
            } => {
                Self::check("main_head", main_head, g)?;
                Self::check("camera_head", camera_head, n_cells)?;
                if inventory {
                    return Ok(self.inventory_action());
                }
                self.group_action(main_head, Some(camera_head).filter(|_| camera_enabled))
            }
        }
    }

    /// Decodes per-head integers, in the order of [`ActionSpace::heads`].
    pub fn decode_slice(&self, values: &[i64]) -> Result<MinerlAction, CodecError> {
        self.decode_action(&self.space.raw_from_slice(values)?)
    }

    /// Encodes a structured action.
    ///
    /// Camera deltas are snapped to the nearest cell; a delta snapping to the
    /// center cell is encoded as a disabled camera. When the camera is
    /// disabled, `camera_head` is set to `0`, which decoding ignores.
    ///
    /// Fails if the action opens the inventory together with any other input,
    /// activates two controls of a group, or activates a control outside of
    /// the groups.
    pub fn encode_action(&self, act: &MinerlAction) -> Result<RawAction, CodecError> {
        if act.inventory {
            let mut rest = act.clone();
            rest.inventory = false;
            if !rest.is_noop() {
                return Err(CodecError::Unencodable(
                    "inventory cannot be combined with other inputs".into(),
                ));
            }
            return Ok(match self.layout {
                ActionLayout::Flat => RawAction::Flat(0),
                ActionLayout::SingleHead => RawAction::SingleHead {
                    main_head: 0,
                    camera_head: 0,
                },
                ActionLayout::SplitHead => RawAction::SplitHead {
                    main_head: 0,
                    inventory: true,
                    camera_enabled: false,
                    camera_head: 0,
                },
            });
        }

        let code = self.groups.encode_action(act)?;
        let cell = self.camera.encode_index(act.camera[0], act.camera[1]);
        let center_cell = self.camera.center_cell();
        let cell = if cell == center_cell { None } else { Some(cell) };
        let g = self.groups.cardinality();

        Ok(match self.layout {
            ActionLayout::Flat => {
                let digit = cell.map_or(0, |c| if c < center_cell { c + 1 } else { c });
                RawAction::Flat(1 + code + g * digit)
            }
            ActionLayout::SingleHead => RawAction::SingleHead {
                main_head: 1 + code + g * cell.map_or(0, |_| 1),
                camera_head: cell.unwrap_or(0),
            },
            ActionLayout::SplitHead => RawAction::SplitHead {
                main_head: code,
                inventory: false,
                camera_enabled: cell.is_some(),
                camera_head: cell.unwrap_or(0),
            },
        })
    }
}
