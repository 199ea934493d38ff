// Application configuration - compile-time defaults, no file or CLI layer

use crate::engine::game_loop::MAX_DELTA_TIME;
use crate::engine::physics::PhysicsConfig;
use crate::engine::renderer::{ShaderPaths, DEFAULT_HALF_HEIGHT};

/// Window creation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    /// Initial inner size in logical pixels
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "My Window".to_string(),
            width: 1024,
            height: 640,
            resizable: true,
        }
    }
}

/// Circle geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleConfig {
    /// Radius in world units
    pub radius: f32,
    /// Perimeter segments in the triangle fan
    pub segments: u32,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            segments: 1000,
        }
    }
}

/// Everything the application needs to start
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub circle: CircleConfig,
    pub physics: PhysicsConfig,
    pub shaders: ShaderPaths,
    /// World-space half-height visible in the viewport
    pub half_height: f32,
    /// Upper bound on the simulation step (seconds)
    pub max_delta_time: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            circle: CircleConfig::default(),
            physics: PhysicsConfig::default(),
            shaders: ShaderPaths::default(),
            half_height: DEFAULT_HALF_HEIGHT,
            max_delta_time: MAX_DELTA_TIME,
        }
    }
}
