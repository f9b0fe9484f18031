//! Platform abstraction layer
//!
//! Browser glue for keyboard input. Key events only ever touch the shared
//! [`InputState`](crate::input::InputState); the next simulation step reads it.

#[cfg(target_arch = "wasm32")]
mod keyboard;

#[cfg(target_arch = "wasm32")]
pub use keyboard::KeyboardListeners;
