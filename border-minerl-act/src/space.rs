//! Policy-facing action space.
use crate::{ActionLayout, CodecError};
use serde::{Deserialize, Serialize};

/// Integers emitted by a policy, one variant per [`ActionLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RawAction {
    /// See [`ActionLayout::Flat`].
    Flat(usize),

    /// See [`ActionLayout::SingleHead`].
    SingleHead {
        /// Inventory, group digits and camera-enabled digit.
        main_head: usize,
        /// Camera cell.
        camera_head: usize,
    },

    /// See [`ActionLayout::SplitHead`].
    SplitHead {
        /// Group digits.
        main_head: usize,
        /// Opens the inventory.
        inventory: bool,
        /// Moves the camera.
        camera_enabled: bool,
        /// Camera cell.
        camera_head: usize,
    },
}

impl RawAction {
    /// Layout of the raw action.
    pub fn layout(&self) -> ActionLayout {
        match self {
            Self::Flat(_) => ActionLayout::Flat,
            Self::SingleHead { .. } => ActionLayout::SingleHead,
            Self::SplitHead { .. } => ActionLayout::SplitHead,
        }
    }

    /// Values of the heads in the order of [`ActionSpace::heads`].
    pub fn to_vec(&self) -> Vec<i64> {
        match *self {
            Self::Flat(id) => vec![id as i64],
            Self::SingleHead {
                main_head,
                camera_head,
            } => vec![main_head as i64, camera_head as i64],
            Self::SplitHead {
                main_head,
                inventory,
                camera_enabled,
                camera_head,
            } => vec![
                main_head as i64,
                inventory as i64,
                camera_enabled as i64,
                camera_head as i64,
            ],
        }
    }
}

/// A discrete head of the policy output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Head {
    /// Name of the head.
    pub name: &'static str,

    /// Number of categories.
    pub n: usize,
}

/// The discrete heads that a policy must emit for a given layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpace {
    layout: ActionLayout,
    heads: Vec<Head>,
}

impl ActionSpace {
    /// Builds the space of a layout from the number of group combinations
    /// and the number of camera cells.
    pub(crate) fn new(
        layout: ActionLayout,
        n_groups: usize,
        n_cells: usize,
    ) -> Result<Self, CodecError> {
        let overflow = || CodecError::Configuration("size of action space overflows".into());
        let heads = match layout {
            ActionLayout::Flat => {
                let n = n_cells
                    .checked_mul(n_groups)
                    .and_then(|n| n.checked_add(1))
                    .ok_or_else(overflow)?;
                vec![Head { name: "action", n }]
            }
            ActionLayout::SingleHead => {
                let n = n_groups
                    .checked_mul(2)
                    .and_then(|n| n.checked_add(1))
                    .ok_or_else(overflow)?;
                vec![
                    Head {
                        name: "main_head",
                        n,
                    },
                    Head {
                        name: "camera_head",
                        n: n_cells,
                    },
                ]
            }
            ActionLayout::SplitHead => vec![
                Head {
                    name: "main_head",
                    n: n_groups,
                },
                Head {
                    name: "inventory",
                    n: 2,
                },
                Head {
                    name: "camera_enabled",
                    n: 2,
                },
                Head {
                    name: "camera_head",
                    n: n_cells,
                },
            ],
        };

        let space = Self { layout, heads };
        space.checked_size().ok_or_else(overflow)?;
        Ok(space)
    }

    fn checked_size(&self) -> Option<usize> {
        self.heads
            .iter()
            .try_fold(1usize, |acc, h| acc.checked_mul(h.n))
    }

    /// Layout of the space.
    pub fn layout(&self) -> ActionLayout {
        self.layout
    }

    /// Heads of the space.
    pub fn heads(&self) -> &[Head] {
        &self.heads
    }

    /// Number of categories of each head.
    pub fn nvec(&self) -> Vec<usize> {
        self.heads.iter().map(|h| h.n).collect()
    }

    /// Number of distinct raw actions, i.e., the product of the head sizes.
    pub fn size(&self) -> usize {
        self.heads.iter().map(|h| h.n).product()
    }

    /// Builds a raw action from per-head values in the order of [`ActionSpace::heads`].
    ///
    /// The number of values and every value are checked against the heads.
    pub fn raw_from_slice(&self, values: &[i64]) -> Result<RawAction, CodecError> {
        if values.len() != self.heads.len() {
            return Err(CodecError::out_of_range(
                "heads",
                values.len(),
                self.heads.len(),
            ));
        }

        let mut v = Vec::with_capacity(values.len());
        for (head, value) in self.heads.iter().zip(values.iter()) {
            if *value < 0 || *value as u64 >= head.n as u64 {
                return Err(CodecError::OutOfRange {
                    field: head.name,
                    value: *value,
                    bound: head.n,
                });
            }
            v.push(*value as usize);
        }

        Ok(match self.layout {
            ActionLayout::Flat => RawAction::Flat(v[0]),
            ActionLayout::SingleHead => RawAction::SingleHead {
                main_head: v[0],
                camera_head: v[1],
            },
            ActionLayout::SplitHead => RawAction::SplitHead {
                main_head: v[0],
                inventory: v[1] == 1,
                camera_enabled: v[2] == 1,
                camera_head: v[3],
            },
        })
    }

    /// Builds the raw action at position `index` of the enumeration of the space,
    /// the first head varying fastest.
    pub fn raw_from_index(&self, mut index: usize) -> Result<RawAction, CodecError> {
        let size = self.size();
        if index >= size {
            return Err(CodecError::out_of_range("index", index, size));
        }
        let mut values = Vec::with_capacity(self.heads.len());
        for head in self.heads.iter() {
            values.push((index % head.n) as i64);
            index /= head.n;
        }
        self.raw_from_slice(&values)
    }

    /// Samples a raw action uniformly.
    pub fn sample(&self, rng: &fastrand::Rng) -> RawAction {
        let n = |i: usize| self.heads[i].n;
        match self.layout {
            ActionLayout::Flat => RawAction::Flat(rng.usize(..n(0))),
            ActionLayout::SingleHead => RawAction::SingleHead {
                main_head: rng.usize(..n(0)),
                camera_head: rng.usize(..n(1)),
            },
            ActionLayout::SplitHead => RawAction::SplitHead {
                main_head: rng.usize(..n(0)),
                inventory: rng.bool(),
                camera_enabled: rng.bool(),
                camera_head: rng.usize(..n(3)),
            },
        }
    }
}
