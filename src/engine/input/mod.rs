// Keyboard input handling
//
// Key events from winit update the held-key set as they arrive; the frame
// loop then polls logical actions once per frame.
//
// - `action`: Logical actions and default key bindings
// - `config`: Remappable source -> action bindings
// - `manager`: Held-key tracking and per-frame queries

pub mod action;
pub mod config;
pub mod manager;

pub use action::Action;
pub use manager::InputManager;
