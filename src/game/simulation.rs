// Per-frame simulation of the bouncing circle

use glam::Vec3;

use crate::engine::input::{Action, InputManager};
use crate::engine::physics::{Bounds, CollisionEvent, PhysicsWorld, PointMass};
use crate::engine::window::{Activity, WindowStatus};

/// What happened during one simulation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// The viewport changed shape and the body was slow enough to be stopped
    pub settled: bool,
    /// Walls hit while resolving collisions
    pub collision: CollisionEvent,
}

/// All mutable simulation state, owned by the frame loop
#[derive(Debug, Clone)]
pub struct Simulation {
    world: PhysicsWorld,
    status: WindowStatus,
    /// Viewport bounds seen on the previous step
    bounds: Bounds,
}

impl Simulation {
    pub fn new(world: PhysicsWorld, bounds: Bounds) -> Self {
        Self {
            world,
            status: WindowStatus::new(),
            bounds,
        }
    }

    /// Velocity direction a movement action pushes toward
    ///
    /// Horizontal keys are mirrored: left pushes toward +x, right toward -x.
    pub fn impulse_direction(action: Action) -> Vec3 {
        match action {
            Action::MoveLeft => Vec3::X,
            Action::MoveRight => Vec3::NEG_X,
            Action::MoveUp => Vec3::Y,
            Action::MoveDown => Vec3::NEG_Y,
            Action::Quit => Vec3::ZERO,
        }
    }

    /// Advance the simulation by `dt` seconds against the current viewport
    ///
    /// Order: settle on viewport change, input impulses, integration,
    /// collision resolution. Collisions are resolved even when the window
    /// is frozen or minimized so a resize can never leave the circle outside.
    pub fn step(&mut self, dt: f32, input: &InputManager, bounds: Bounds) -> StepReport {
        let mut settled = false;
        if bounds != self.bounds {
            settled = self.world.settle();
            self.bounds = bounds;
        }

        match self.status.activity() {
            Activity::Running => {
                self.apply_input(input);
                self.world.integrate(dt);
            }
            Activity::Minimized => self.world.halt(),
            Activity::Frozen => {}
        }

        let collision = self.world.resolve_collisions(&self.bounds);
        debug_assert!(
            !self.bounds.fits(self.world.radius())
                || self
                    .bounds
                    .contains_circle(self.world.body().position.truncate(), self.world.radius())
        );

        StepReport {
            settled,
            collision,
        }
    }

    /// Add this frame's directional impulses; at most one per axis
    fn apply_input(&mut self, input: &InputManager) {
        for action in [input.horizontal(), input.vertical()].into_iter().flatten() {
            self.world.push(Self::impulse_direction(action));
        }
    }

    pub fn body(&self) -> &PointMass {
        self.world.body()
    }

    pub fn status(&self) -> &WindowStatus {
        &self.status
    }

    /// Window events write into this
    pub fn status_mut(&mut self) -> &mut WindowStatus {
        &mut self.status
    }
}
