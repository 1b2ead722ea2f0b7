//! Keyboard input.
//!
//! The public API does not expose winit types; the runtime translates window
//! events into `InputEvent`s and feeds them through `InputState::apply_event`.

mod frame;
mod state;
mod types;
pub(crate) mod platform;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, Modifiers};
