//! Per-particle motion rules
//!
//! Small pure functions so each rule can be checked on its own. The field
//! applies them in a fixed order every frame; see [`super::field`].

use glam::DVec2;

/// Repulsion magnitude at `distance` from the pointer.
///
/// Linear falloff: `strength` at distance 0, exactly 0 at `radius` and beyond.
#[inline]
pub fn pointer_force(distance: f64, radius: f64, strength: f64) -> f64 {
    if distance < radius {
        (radius - distance) / radius * strength
    } else {
        0.0
    }
}

/// Velocity change that pushes a particle at `pos` away from `pointer`.
///
/// Returns `None` when the particle is outside the pointer's reach. A particle
/// sitting exactly on the pointer is pushed along -x (atan2(0, 0) = 0).
pub fn pointer_push(pos: DVec2, pointer: DVec2, radius: f64, strength: f64) -> Option<DVec2> {
    let offset = pointer - pos;
    let distance = offset.length();
    if distance >= radius {
        return None;
    }
    let angle = offset.y.atan2(offset.x);
    let force = pointer_force(distance, radius, strength);
    Some(-DVec2::from_angle(angle) * force)
}

/// Negate each velocity component whose coordinate is outside `[0, extent]`.
///
/// Position is left untouched, so a particle can sit slightly outside for a
/// frame. Returns which axes flipped.
pub fn reflect(pos: DVec2, vel: &mut DVec2, width: f64, height: f64) -> (bool, bool) {
    let flip_x = pos.x < 0.0 || pos.x > width;
    let flip_y = pos.y < 0.0 || pos.y > height;
    if flip_x {
        vel.x = -vel.x;
    }
    if flip_y {
        vel.y = -vel.y;
    }
    (flip_x, flip_y)
}

/// Rescale `vel` to `max_speed` if it is faster, keeping its direction
#[inline]
pub fn clamp_speed(vel: DVec2, max_speed: f64) -> DVec2 {
    let speed = vel.length();
    if speed > max_speed {
        vel / speed * max_speed
    } else {
        vel
    }
}

/// Opacity of the line joining two particles `distance` apart.
///
/// `max_alpha` at distance 0, falling linearly to 0 at `max_distance`.
#[inline]
pub fn link_alpha(distance: f64, max_distance: f64, max_alpha: f64) -> f64 {
    if distance < max_distance {
        (max_distance - distance) / max_distance * max_alpha
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_pointer_force_endpoints() {
        assert_eq!(pointer_force(0.0, POINTER_RADIUS, POINTER_STRENGTH), POINTER_STRENGTH);
        assert_eq!(pointer_force(80.0, POINTER_RADIUS, POINTER_STRENGTH), 0.0);
        assert_eq!(pointer_force(120.0, POINTER_RADIUS, POINTER_STRENGTH), 0.0);
        let half = pointer_force(40.0, POINTER_RADIUS, POINTER_STRENGTH);
        assert!((half - 0.01).abs() < EPS);
    }

    #[test]
    fn test_pointer_push_points_away() {
        let pointer = DVec2::new(100.0, 100.0);

        // Particle to the right of the pointer is pushed further right
        let push = pointer_push(DVec2::new(120.0, 100.0), pointer, 80.0, 0.02).unwrap();
        assert!(push.x > 0.0);
        assert!(push.y.abs() < EPS);
        assert!((push.length() - 0.015).abs() < EPS);

        // Particle above-left is pushed up-left
        let push = pointer_push(DVec2::new(90.0, 90.0), pointer, 80.0, 0.02).unwrap();
        assert!(push.x < 0.0 && push.y < 0.0);
    }

    #[test]
    fn test_pointer_push_out_of_reach() {
        let pointer = DVec2::new(0.0, 0.0);
        assert!(pointer_push(DVec2::new(80.0, 0.0), pointer, 80.0, 0.02).is_none());
        assert!(pointer_push(DVec2::new(60.0, 60.0), pointer, 80.0, 0.02).is_none());
    }

    #[test]
    fn test_pointer_push_on_top_of_pointer() {
        let p = DVec2::new(5.0, 5.0);
        let push = pointer_push(p, p, 80.0, 0.02).unwrap();
        assert!((push.x + 0.02).abs() < EPS);
        assert!(push.y.abs() < EPS);
    }

    #[test]
    fn test_reflect_flips_out_of_bounds_axis_only() {
        let mut vel = DVec2::new(0.3, -0.2);
        let flipped = reflect(DVec2::new(400.5, 50.0), &mut vel, 400.0, 300.0);
        assert_eq!(flipped, (true, false));
        assert_eq!(vel, DVec2::new(-0.3, -0.2));

        let mut vel = DVec2::new(-0.1, -0.2);
        let flipped = reflect(DVec2::new(-0.1, -0.4), &mut vel, 400.0, 300.0);
        assert_eq!(flipped, (true, true));
        assert_eq!(vel, DVec2::new(0.1, 0.2));
    }

    #[test]
    fn test_reflect_edges_are_inside() {
        let mut vel = DVec2::new(0.3, 0.3);
        assert_eq!(reflect(DVec2::new(0.0, 300.0), &mut vel, 400.0, 300.0), (false, false));
        assert_eq!(reflect(DVec2::new(400.0, 0.0), &mut vel, 400.0, 300.0), (false, false));
        assert_eq!(vel, DVec2::new(0.3, 0.3));
    }

    #[test]
    fn test_reflect_rechecks_every_call() {
        // Still outside on the next frame: flips again
        let mut vel = DVec2::new(0.2, 0.0);
        let pos = DVec2::new(-1.0, 10.0);
        reflect(pos, &mut vel, 100.0, 100.0);
        assert_eq!(vel.x, -0.2);
        reflect(pos, &mut vel, 100.0, 100.0);
        assert_eq!(vel.x, 0.2);
    }

    #[test]
    fn test_clamp_speed() {
        let vel = clamp_speed(DVec2::new(3.0, 4.0), 0.5);
        assert!((vel.length() - 0.5).abs() < EPS);
        assert!((vel.x - 0.3).abs() < EPS);
        assert!((vel.y - 0.4).abs() < EPS);

        let slow = DVec2::new(0.1, -0.2);
        assert_eq!(clamp_speed(slow, 0.5), slow);
        assert_eq!(clamp_speed(DVec2::ZERO, 0.5), DVec2::ZERO);
    }

    #[test]
    fn test_link_alpha_endpoints() {
        assert_eq!(link_alpha(0.0, LINK_DISTANCE, LINK_MAX_ALPHA), 0.2);
        assert_eq!(link_alpha(100.0, LINK_DISTANCE, LINK_MAX_ALPHA), 0.0);
        assert_eq!(link_alpha(250.0, LINK_DISTANCE, LINK_MAX_ALPHA), 0.0);
        assert!((link_alpha(50.0, LINK_DISTANCE, LINK_MAX_ALPHA) - 0.1).abs() < EPS);
    }

    proptest! {
        #[test]
        fn clamp_never_exceeds_max(x in -50.0f64..50.0, y in -50.0f64..50.0) {
            let vel = clamp_speed(DVec2::new(x, y), MAX_SPEED);
            prop_assert!(vel.length() <= MAX_SPEED + 1e-12);
        }

        #[test]
        fn clamp_preserves_direction(x in -5.0f64..5.0, y in -5.0f64..5.0) {
            let v = DVec2::new(x, y);
            prop_assume!(v.length() > 1e-6);
            let clamped = clamp_speed(v, MAX_SPEED);
            // Parallel and same orientation
            prop_assert!(v.perp_dot(clamped).abs() < 1e-9);
            prop_assert!(v.dot(clamped) > 0.0);
        }

        #[test]
        fn pointer_force_monotonic(a in 0.0f64..200.0, b in 0.0f64..200.0) {
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            let f_near = pointer_force(near, POINTER_RADIUS, POINTER_STRENGTH);
            let f_far = pointer_force(far, POINTER_RADIUS, POINTER_STRENGTH);
            prop_assert!(f_near >= f_far);
            prop_assert!((0.0..=POINTER_STRENGTH).contains(&f_near));
        }

        #[test]
        fn pointer_force_continuous(d in 0.0f64..100.0) {
            let step = 1e-6;
            let f0 = pointer_force(d, POINTER_RADIUS, POINTER_STRENGTH);
            let f1 = pointer_force(d + step, POINTER_RADIUS, POINTER_STRENGTH);
            prop_assert!((f0 - f1).abs() <= POINTER_STRENGTH / POINTER_RADIUS * step + 1e-12);
        }

        #[test]
        fn link_alpha_linear(d in 0.0f64..100.0) {
            let expected = (100.0 - d) / 100.0 * 0.2;
            prop_assert!((link_alpha(d, LINK_DISTANCE, LINK_MAX_ALPHA) - expected).abs() < 1e-12);
        }
    }
}
