// Engine modules: frame clock, window status, input, physics, renderer

pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
pub mod window;
