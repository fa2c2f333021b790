//! Pawn movement: pointer-follow steering, keyboard steering & look smoothing
//!
//! Every step is one frame; `direction` is already a per-frame displacement,
//! so a fixed frame rate is assumed

use glam::Vec2;

/// Tunables, fixed for the lifetime of a pawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PawnConfig {
    /// Top speed in pixels per frame
    pub max_speed: f32,
    /// Blend toward the desired velocity each frame
    pub force_acc: f32,
    /// Share of the opposing velocity removed each frame
    pub force_break: f32,
    /// Blend toward the desired heading each frame
    pub rot_dump: f32,
}

impl Default for PawnConfig {
    fn default() -> Self {
        Self {
            max_speed: 7.0,
            force_acc: 0.05,
            force_break: 0.3,
            rot_dump: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PawnState {
    pub position: Vec2,
    /// Displacement applied each frame; scaled by `speed` under keyboard control
    pub direction: Vec2,
    /// Where the pointer last asked the pawn to go
    pub target_position: Vec2,
    /// Keyboard scheme only
    pub speed: f32,
    /// Smoothed unit facing
    pub look: Vec2,
}

impl PawnState {
    /// Motionless at `position`, already at its target, facing down the screen
    pub fn at_rest(position: Vec2) -> Self {
        Self {
            position,
            direction: Vec2::ZERO,
            target_position: position,
            speed: 0.0,
            look: Vec2::Y,
        }
    }
}

/// One frame of pointer-follow steering
///
/// While the pointer is down the target follows it. The aim point subtracts the
/// current displacement, and braking only ever removes velocity that opposes the
/// desired heading
pub fn pointer_step(state: &mut PawnState, config: &PawnConfig, pointer: Vec2, pointer_down: bool) {
    if pointer_down {
        state.target_position = pointer;
    }

    let to_target = state.target_position - (state.position + state.direction);
    let distance = to_target.length();
    let desired = to_target.normalize_or_zero();
    let max_velocity = desired * distance.min(config.max_speed);

    let acceleration = max_velocity - state.direction;
    let brake = state.direction * state.direction.normalize_or_zero().dot(desired).min(0.0);

    state.direction += acceleration * config.force_acc;
    state.direction += brake * config.force_break;
    state.position += state.direction;
}

/// One frame of keyboard steering; `input` is the summed key axes, e.g. `(1, -1)` for D+W
///
/// Speed eases toward `max_speed` while any key is held & back to zero otherwise;
/// the heading eases toward the normalized input
pub fn keyboard_step(state: &mut PawnState, config: &PawnConfig, input: Vec2) {
    let wanted_speed = if input == Vec2::ZERO {
        0.0
    } else {
        config.max_speed
    };
    state.speed += (wanted_speed - state.speed) * config.force_acc;
    state.direction = state
        .direction
        .lerp(input.normalize_or_zero(), config.rot_dump);
    state.position += state.direction * state.speed;
}

/// Blend the facing `look` toward `pointer` as seen from `from`
///
/// A pointer exactly on `from` keeps the previous facing
pub fn smooth_look(look: Vec2, from: Vec2, pointer: Vec2, blend: f32) -> Vec2 {
    let Some(desired) = (pointer - from).try_normalize() else {
        return look;
    };
    look.lerp(desired, blend).try_normalize().unwrap_or(desired)
}

/// Signed angle in degrees from straight down the screen `(0, 1)` to `look`
pub fn heading_degrees(look: Vec2) -> f32 {
    Vec2::Y.perp_dot(look).atan2(Vec2::Y.dot(look)).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn normalize_or_zero_is_unit_or_zero() {
        for v in [vec2(3.0, 4.0), vec2(-1e-3, 2e-3), vec2(1e6, -1e6)] {
            assert!((v.normalize_or_zero().length() - 1.0).abs() < 1e-5);
        }
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
    }

    #[test]
    fn at_rest_on_target_stays_put() {
        let config = PawnConfig::default();
        let mut state = PawnState::at_rest(vec2(256.0, 256.0));
        for _ in 0..10 {
            pointer_step(&mut state, &config, vec2(0.0, 0.0), false);
        }
        assert_eq!(state.position, vec2(256.0, 256.0));
        assert!(state.position.is_finite() && state.direction.is_finite());
    }

    #[test]
    fn pointer_down_drags_the_target() {
        let config = PawnConfig::default();
        let mut state = PawnState::at_rest(vec2(256.0, 256.0));

        pointer_step(&mut state, &config, vec2(300.0, 300.0), true);
        assert_eq!(state.target_position, vec2(300.0, 300.0));

        pointer_step(&mut state, &config, vec2(10.0, 10.0), false);
        assert_eq!(state.target_position, vec2(300.0, 300.0));
    }

    #[test]
    fn converges_on_a_far_target() {
        let config = PawnConfig::default();
        let target = vec2(500.0, -200.0);
        let mut state = PawnState::at_rest(Vec2::ZERO);
        state.target_position = target;

        let mut previous = state.position.distance(target);
        let mut approaching = true;
        for _ in 0..600 {
            pointer_step(&mut state, &config, Vec2::ZERO, false);
            let distance = state.position.distance(target);

            // bounded by top speed plus one acceleration increment
            assert!(state.direction.length() <= config.max_speed * (1.0 + config.force_acc));
            // the aim point leads by the current velocity, so the last couple of
            // pixels wobble instead of shrinking every frame
            if approaching {
                assert!(distance < previous, "{distance} >= {previous}");
                approaching = distance > 2.0;
            }
            previous = distance;
        }
        assert!(previous < 1e-3);
    }

    #[test]
    fn click_then_arrive_without_big_overshoot() {
        let config = PawnConfig::default();
        let target = vec2(300.0, 300.0);
        let mut state = PawnState::at_rest(vec2(256.0, 256.0));
        let approach = (target - state.position).normalize();

        pointer_step(&mut state, &config, target, true);
        let mut max_step = state.direction.length();
        let mut overshoot: f32 = 0.0;
        for _ in 0..300 {
            pointer_step(&mut state, &config, target, false);
            max_step = max_step.max(state.direction.length());
            overshoot = overshoot.max((state.position - target).dot(approach));
        }

        assert_eq!(state.target_position, target);
        assert!(state.position.distance(target) < 1e-3);
        assert!(overshoot <= max_step);
    }

    #[test]
    fn braking_only_opposes_the_desired_heading() {
        let config = PawnConfig {
            force_acc: 0.0,
            ..PawnConfig::default()
        };

        // moving toward the target: no braking, velocity unchanged
        let mut state = PawnState::at_rest(Vec2::ZERO);
        state.direction = vec2(2.0, 0.0);
        state.target_position = vec2(100.0, 0.0);
        pointer_step(&mut state, &config, Vec2::ZERO, false);
        assert_eq!(state.direction, vec2(2.0, 0.0));

        // moving away: 30% of the velocity is removed
        let mut state = PawnState::at_rest(Vec2::ZERO);
        state.direction = vec2(2.0, 0.0);
        state.target_position = vec2(-100.0, 0.0);
        pointer_step(&mut state, &config, Vec2::ZERO, false);
        assert!((state.direction - vec2(1.4, 0.0)).length() < 1e-6);
    }

    #[test]
    fn keyboard_accelerates_then_coasts_to_a_stop() {
        let config = PawnConfig::default();
        let mut state = PawnState::at_rest(vec2(100.0, 100.0));

        for _ in 0..200 {
            keyboard_step(&mut state, &config, vec2(1.0, 0.0));
        }
        assert!(state.speed > 6.9 && state.speed <= config.max_speed);
        assert!((state.direction - vec2(1.0, 0.0)).length() < 1e-3);
        assert!(state.position.x > 100.0);
        assert!((state.position.y - 100.0).abs() < 1e-3);

        let held = state.position;
        for _ in 0..200 {
            keyboard_step(&mut state, &config, Vec2::ZERO);
        }
        assert!(state.speed < 1e-3);
        assert!(state.position.x > held.x);
    }

    #[test]
    fn diagonal_keys_are_normalized() {
        let config = PawnConfig::default();
        let mut state = PawnState::at_rest(Vec2::ZERO);
        for _ in 0..200 {
            keyboard_step(&mut state, &config, vec2(1.0, -1.0));
        }
        assert!((state.direction.length() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn look_turns_toward_pointer() {
        let from = vec2(256.0, 256.0);
        let mut look = Vec2::Y;
        for _ in 0..100 {
            look = smooth_look(look, from, vec2(400.0, 256.0), 0.1);
            assert!((look.length() - 1.0).abs() < 1e-5);
        }
        assert!((look - Vec2::X).length() < 1e-3);
    }

    #[test]
    fn look_keeps_facing_when_pointer_is_on_pawn() {
        let look = vec2(0.6, 0.8);
        let from = vec2(50.0, 50.0);
        assert_eq!(smooth_look(look, from, from, 0.1), look);
    }

    #[test]
    fn look_recovers_from_opposite_facing() {
        // halfway between opposite facings there is no direction left
        let look = smooth_look(Vec2::X, Vec2::ZERO, vec2(-5.0, 0.0), 0.5);
        assert_eq!(look, vec2(-1.0, 0.0));
    }

    #[test]
    fn heading_is_measured_from_down() {
        assert_eq!(heading_degrees(Vec2::Y), 0.0);
        assert!((heading_degrees(vec2(-1.0, 0.0)) - 90.0).abs() < 1e-4);
        assert!((heading_degrees(Vec2::X) + 90.0).abs() < 1e-4);
        assert!((heading_degrees(vec2(0.0, -1.0)).abs() - 180.0).abs() < 1e-4);
    }
}
