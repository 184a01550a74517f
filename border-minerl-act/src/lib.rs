#![warn(missing_docs)]
//! Action-space codec for [MineRL](https://minerl.io) environments.
//!
//! MineRL takes a dictionary of simultaneous inputs at every step: movement
//! keys, hotbar selection, a continuous camera delta and the inventory key.
//! A categorical policy, on the other hand, emits one or a few integers.
//! [`ActionCodec`] maps between the two.
//!
//! * Keys are arranged in [`ActionGroup`]s of mutually exclusive controls.
//!   A group of `k` controls is a digit of radix `k + 1` in a mixed-radix
//!   integer, see [`GroupEncoder`].
//! * The camera delta is quantized on a square grid with a power-law response
//!   curve, see [`CameraQuantizer`].
//! * Opening the inventory is exclusive with every other input.
//!
//! How the integers are laid out is selected with [`ActionLayout`]. The
//! number of categories of each policy head is given by
//! [`ActionCodec::action_space`].
//!
//! ```
//! use border_minerl_act::{ActionCodec, ActionCodecConfig, RawAction};
//!
//! let codec = ActionCodec::build(&ActionCodecConfig::default()).unwrap();
//! assert_eq!(codec.action_space().nvec(), vec![34561, 121]);
//!
//! let act = codec
//!     .decode_action(&RawAction::SingleHead { main_head: 2, camera_head: 0 })
//!     .unwrap();
//! assert!(act.forward);
//! ```
//!
//! [`MinerlActEnv`] applies decoded actions to a [`MinerlTransport`], which
//! is implemented by the user for the simulator at hand.
mod action;
mod camera;
mod codec;
mod config;
mod control;
mod env;
mod error;
mod group;
mod space;
pub use action::MinerlAction;
pub use camera::CameraQuantizer;
pub use codec::ActionCodec;
pub use config::{ActionCodecConfig, ActionLayout};
pub use control::{Button, Control};
pub use env::{MinerlActEnv, MinerlTransport, TransportStep};
pub use error::CodecError;
pub use group::{ActionGroup, GroupEncoder, GroupSelection};
pub use space::{ActionSpace, Head, RawAction};
