use glam::Vec3;

/// A point mass moving through the viewport
///
/// Only x and y are simulated; z stays at zero so the position can be fed
/// straight into a translation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointMass {
    /// Centre of the body in world units
    pub position: Vec3,
    /// Velocity in world units per second
    pub velocity: Vec3,
}

impl PointMass {
    /// Create a body at rest at `position`
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
        }
    }

    /// Set the initial velocity
    #[cfg(test)]
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Magnitude of the velocity
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Add an instantaneous change in velocity
    pub fn apply_impulse(&mut self, delta_v: Vec3) {
        self.velocity += delta_v;
    }

    /// Zero the velocity, leaving the position untouched
    pub fn stop(&mut self) {
        self.velocity = Vec3::ZERO;
    }
}
