use glam::Vec2;

use super::body::PointMass;

/// Which wall of the viewport a body touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Bottom,
    Top,
}

/// Walls hit during a single resolution pass (at most one per axis)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionEvent {
    pub x: Option<Wall>,
    pub y: Option<Wall>,
}

impl CollisionEvent {
    /// Whether any wall was hit
    pub fn any(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }
}

/// Axis-aligned box centred on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Half-width and half-height in world units
    pub half_extents: Vec2,
}

impl Bounds {
    pub fn new(half_width: f32, half_height: f32) -> Self {
        Self {
            half_extents: Vec2::new(half_width, half_height),
        }
    }

    /// Whether a circle of `radius` can fit between the walls on both axes
    pub fn fits(&self, radius: f32) -> bool {
        self.half_extents.x >= radius && self.half_extents.y >= radius
    }

    /// Whether a circle of `radius` centred at `center` lies fully inside
    pub fn contains_circle(&self, center: Vec2, radius: f32) -> bool {
        center.x - radius >= -self.half_extents.x
            && center.x + radius <= self.half_extents.x
            && center.y - radius >= -self.half_extents.y
            && center.y + radius <= self.half_extents.y
    }

    /// Push a circular body back inside the bounds
    ///
    /// Each axis is handled independently, x first. A component that crossed
    /// a wall is clamped to `wall -/+ radius` and its velocity is multiplied
    /// by `-restitution`. On an axis narrower than the circle the centre is
    /// pinned to 0.
    pub fn resolve(&self, body: &mut PointMass, radius: f32, restitution: f32) -> CollisionEvent {
        let x = resolve_axis(
            &mut body.position.x,
            &mut body.velocity.x,
            self.half_extents.x,
            radius,
            restitution,
        )
        .map(|positive| if positive { Wall::Right } else { Wall::Left });

        let y = resolve_axis(
            &mut body.position.y,
            &mut body.velocity.y,
            self.half_extents.y,
            radius,
            restitution,
        )
        .map(|positive| if positive { Wall::Top } else { Wall::Bottom });

        CollisionEvent { x, y }
    }
}

/// Returns `Some(true)` for the positive wall, `Some(false)` for the negative one
fn resolve_axis(
    position: &mut f32,
    velocity: &mut f32,
    half_extent: f32,
    radius: f32,
    restitution: f32,
) -> Option<bool> {
    if half_extent < radius {
        // No position keeps the edge inside, so stay centred
        if *position == 0.0 && *velocity == 0.0 {
            return None;
        }
        let positive = *position > 0.0 || (*position == 0.0 && *velocity > 0.0);
        *position = 0.0;
        *velocity *= -restitution;
        return Some(positive);
    }

    if *position + radius > half_extent {
        *position = half_extent - radius;
        *velocity *= -restitution;
        Some(true)
    } else if *position - radius < -half_extent {
        *position = -half_extent + radius;
        *velocity *= -restitution;
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;

    const RESTITUTION: f32 = 0.95;

    #[test]
    fn test_right_wall_bounce() {
        let bounds = Bounds::new(8.0, 5.0);
        let mut body = PointMass::at(Vec3::new(8.0, 0.0, 0.0)).with_velocity(Vec3::X);

        let event = bounds.resolve(&mut body, 1.0, RESTITUTION);

        assert_eq!(event.x, Some(Wall::Right));
        assert_eq!(event.y, None);
        assert_eq!(body.position.x, 7.0);
        assert_relative_eq!(body.velocity.x, -0.95, epsilon = 1e-6);
    }

    #[test]
    fn test_left_wall_bounce() {
        let bounds = Bounds::new(8.0, 5.0);
        let mut body =
            PointMass::at(Vec3::new(-7.5, 0.0, 0.0)).with_velocity(Vec3::new(-2.0, 0.0, 0.0));

        let event = bounds.resolve(&mut body, 1.0, RESTITUTION);

        assert_eq!(event.x, Some(Wall::Left));
        assert_eq!(body.position.x, -7.0);
        assert_relative_eq!(body.velocity.x, 1.9, epsilon = 1e-6);
    }

    #[test]
    fn test_floor_bounce() {
        let bounds = Bounds::new(8.0, 5.0);
        let mut body =
            PointMass::at(Vec3::new(0.0, -4.5, 0.0)).with_velocity(Vec3::new(0.0, -4.0, 0.0));

        let event = bounds.resolve(&mut body, 1.0, RESTITUTION);

        assert_eq!(event.y, Some(Wall::Bottom));
        assert_eq!(body.position.y, -4.0);
        assert_relative_eq!(body.velocity.y, 3.8, epsilon = 1e-6);
    }

    #[test]
    fn test_corner_hits_both_axes() {
        let bounds = Bounds::new(8.0, 5.0);
        let mut body =
            PointMass::at(Vec3::new(9.0, 6.0, 0.0)).with_velocity(Vec3::new(1.0, 1.0, 0.0));

        let event = bounds.resolve(&mut body, 1.0, RESTITUTION);

        assert_eq!(event.x, Some(Wall::Right));
        assert_eq!(event.y, Some(Wall::Top));
        assert_eq!(body.position.truncate(), Vec2::new(7.0, 4.0));
        assert_relative_eq!(body.velocity.x, -0.95, epsilon = 1e-6);
        assert_relative_eq!(body.velocity.y, -0.95, epsilon = 1e-6);
    }

    #[test]
    fn test_inside_is_untouched() {
        let bounds = Bounds::new(8.0, 5.0);
        let original = PointMass::at(Vec3::new(1.0, 1.0, 0.0)).with_velocity(Vec3::new(3.0, -2.0, 0.0));
        let mut body = original;

        let event = bounds.resolve(&mut body, 1.0, RESTITUTION);

        assert!(!event.any());
        assert_eq!(body, original);
    }

    #[test]
    fn test_touching_wall_exactly_is_not_a_hit() {
        let bounds = Bounds::new(8.0, 5.0);
        let mut body = PointMass::at(Vec3::new(7.0, 0.0, 0.0)).with_velocity(Vec3::X);

        let event = bounds.resolve(&mut body, 1.0, RESTITUTION);

        assert!(!event.any());
        assert_eq!(body.velocity.x, 1.0);
    }

    #[test]
    fn test_far_outside_ends_up_inside() {
        let bounds = Bounds::new(4.0, 2.5);
        let positions = [
            Vec3::new(100.0, 100.0, 0.0),
            Vec3::new(-100.0, 50.0, 0.0),
            Vec3::new(3.2, -9.0, 0.0),
            Vec3::new(-4.0, 2.5, 0.0),
        ];

        for position in positions {
            let mut body = PointMass::at(position).with_velocity(Vec3::new(5.0, -5.0, 0.0));
            bounds.resolve(&mut body, 0.5, RESTITUTION);
            assert!(bounds.contains_circle(body.position.truncate(), 0.5));
        }
    }

    #[test]
    fn test_axis_narrower_than_circle_centres_body() {
        let bounds = Bounds::new(0.9375, 5.0);
        let mut body =
            PointMass::at(Vec3::new(0.5, 0.0, 0.0)).with_velocity(Vec3::new(2.0, 0.0, 0.0));

        let event = bounds.resolve(&mut body, 1.0, RESTITUTION);

        assert!(!bounds.fits(1.0));
        assert_eq!(event.x, Some(Wall::Right));
        assert_eq!(body.position.x, 0.0);
        assert_relative_eq!(body.velocity.x, -1.9, epsilon = 1e-6);

        // Once centred and at rest there is nothing left to resolve
        let mut resting = PointMass::at(Vec3::ZERO);
        assert!(!bounds.resolve(&mut resting, 1.0, RESTITUTION).any());
    }

    #[test]
    fn test_contains_circle() {
        let bounds = Bounds::new(8.0, 5.0);
        assert!(bounds.contains_circle(Vec2::ZERO, 1.0));
        assert!(bounds.contains_circle(Vec2::new(7.0, 4.0), 1.0));
        assert!(!bounds.contains_circle(Vec2::new(7.5, 0.0), 1.0));
    }
}
