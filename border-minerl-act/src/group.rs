//! Mutually exclusive button groups and their mixed-radix encoding.
//!
//! Each group of `k` controls contributes a digit of radix `k + 1` to a code,
//! where digit `0` means that no control of the group is active and digit `d`
//! activates the `d`-th control. The first group is the least significant digit.
use crate::{CodecError, Control, MinerlAction};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered set of controls, at most one of which is active in an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionGroup(Vec<Control>);

impl ActionGroup {
    /// Creates a group from its controls. Order determines digit values.
    pub fn new(controls: Vec<Control>) -> Self {
        Self(controls)
    }

    /// Creates a group with a single control, i.e., an on/off key.
    pub fn single(control: impl Into<Control>) -> Self {
        Self(vec![control.into()])
    }

    /// Creates a group of hotbar slots `1..=n_slots`.
    pub fn hotbar(n_slots: u8) -> Self {
        Self((1..=n_slots).map(Control::Hotbar).collect())
    }

    /// Controls in the group.
    pub fn controls(&self) -> &[Control] {
        &self.0
    }

    /// Number of controls in the group.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the group has no control.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Radix of the digit of this group, including the "none" option.
    pub fn radix(&self) -> usize {
        self.0.len() + 1
    }

    fn position(&self, control: Control) -> Option<usize> {
        self.0.iter().position(|c| *c == control)
    }
}

impl<C: Into<Control>> From<Vec<C>> for ActionGroup {
    fn from(controls: Vec<C>) -> Self {
        Self(controls.into_iter().map(Into::into).collect())
    }
}

/// The control selected in each group, in group order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSelection(Vec<Option<Control>>);

impl GroupSelection {
    /// Creates a selection from per-group choices.
    pub fn new(selections: Vec<Option<Control>>) -> Self {
        Self(selections)
    }

    /// Per-group choices.
    pub fn selections(&self) -> &[Option<Control>] {
        &self.0
    }

    /// Activates the selected controls in `act`.
    pub fn apply(&self, act: &mut MinerlAction) {
        for control in self.0.iter().flatten() {
            act.activate(*control);
        }
    }
}

/// Encodes and decodes [`GroupSelection`] to and from a mixed-radix integer.
#[derive(Debug, Clone)]
pub struct GroupEncoder {
    groups: Vec<ActionGroup>,
    cardinality: usize,
}

impl GroupEncoder {
    /// Creates an encoder.
    ///
    /// Fails if the group list is empty, a group is empty, a control appears
    /// twice, or the number of combinations overflows `usize`.
    pub fn new(groups: Vec<ActionGroup>) -> Result<Self, CodecError> {
        if groups.is_empty() {
            return Err(CodecError::Configuration(
                "at least one action group is required".into(),
            ));
        }

        let mut seen = HashSet::new();
        let mut cardinality = 1usize;
        for (i, group) in groups.iter().enumerate() {
            if group.is_empty() {
                return Err(CodecError::Configuration(format!("action group {} is empty", i)));
            }
            for control in group.controls() {
                if !seen.insert(*control) {
                    return Err(CodecError::Configuration(format!(
                        "control {} appears in more than one place",
                        control
                    )));
                }
            }
            cardinality = cardinality.checked_mul(group.radix()).ok_or_else(|| {
                CodecError::Configuration("number of group combinations overflows".into())
            })?;
        }

        Ok(Self {
            groups,
            cardinality,
        })
    }

    /// Groups in digit order.
    pub fn groups(&self) -> &[ActionGroup] {
        &self.groups
    }

    /// Radix of every digit.
    pub fn radices(&self) -> Vec<usize> {
        self.groups.iter().map(ActionGroup::radix).collect()
    }

    /// Number of distinct selections, i.e., the product of the radices.
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    /// Decodes the group digits of `code` and returns the remaining higher-order part.
    ///
    /// The remainder is `code / cardinality()`; callers use it to carry
    /// further digits after the groups.
    pub fn decode(&self, mut code: usize) -> (GroupSelection, usize) {
        let mut selections = Vec::with_capacity(self.groups.len());
        for group in self.groups.iter() {
            let n = group.radix();
            let digit = code % n;
            code /= n;
            selections.push(match digit {
                0 => None,
                d => Some(group.controls()[d - 1]),
            });
        }
        (GroupSelection(selections), code)
    }

    /// Decodes a code which must lie in `[0, cardinality())`.
    pub fn decode_exact(&self, code: usize) -> Result<GroupSelection, CodecError> {
        if code >= self.cardinality {
            return Err(CodecError::out_of_range("group code", code, self.cardinality));
        }
        Ok(self.decode(code).0)
    }

    /// Encodes a selection. The result lies in `[0, cardinality())`.
    pub fn encode(&self, selection: &GroupSelection) -> Result<usize, CodecError> {
        if selection.0.len() != self.groups.len() {
            return Err(CodecError::Unencodable(format!(
                "selection has {} groups, expected {}",
                selection.0.len(),
                self.groups.len()
            )));
        }

        let mut code = 0;
        for (group, choice) in self.groups.iter().zip(selection.0.iter()).rev() {
            let digit = match choice {
                None => 0,
                Some(c) => {
                    group.position(*c).ok_or_else(|| {
                        CodecError::Unencodable(format!("{} is not a member of its group", c))
                    })? + 1
                }
            };
            code = code * group.radix() + digit;
        }
        Ok(code)
    }

    /// Extracts the selection from a structured action.
    ///
    /// Fails if a group has more than one active control, or if an active
    /// control does not belong to any group. `inventory` and `camera` are
    /// not inspected.
    pub fn select(&self, act: &MinerlAction) -> Result<GroupSelection, CodecError> {
        let mut selections = Vec::with_capacity(self.groups.len());
        for group in self.groups.iter() {
            let mut active = group.controls().iter().filter(|c| act.is_active(**c));
            let first = active.next().copied();
            if let Some(second) = active.next() {
                return Err(CodecError::Unencodable(format!(
                    "{} and {} are mutually exclusive",
                    first.map(|c| c.to_string()).unwrap_or_default(),
                    second
                )));
            }
            selections.push(first);
        }

        let grouped: HashSet<Control> = selections.iter().flatten().copied().collect();
        if let Some(c) = act.active_controls().into_iter().find(|c| !grouped.contains(c)) {
            return Err(CodecError::Unencodable(format!("{} is not in any group", c)));
        }

        Ok(GroupSelection(selections))
    }

    /// Shorthand of [`GroupEncoder::select`] followed by [`GroupEncoder::encode`].
    pub fn encode_action(&self, act: &MinerlAction) -> Result<usize, CodecError> {
        self.encode(&self.select(act)?)
    }
}
