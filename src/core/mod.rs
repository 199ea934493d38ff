// Shared helpers used by both the engine and the game layer

pub mod math;
