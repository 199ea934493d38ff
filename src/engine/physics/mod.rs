// Hand-rolled point-mass physics: Euler integration, friction and wall bounces

pub mod body;
pub mod collision;
mod world;

pub use body::PointMass;
pub use collision::{Bounds, CollisionEvent};
pub use world::{PhysicsConfig, PhysicsWorld};
