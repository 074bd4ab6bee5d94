//! Spring timing
//!
//! Two ways of describing the same damped spring:
//!
//! - [`SpringParameters`]: the perceptual form a user tweaks, a damping
//!   ratio in `(0, 1]` and a response time in seconds, plus the release
//!   velocity
//! - [`SpringConfig`]: the physical form a stepper integrates, mass,
//!   stiffness and damping coefficient
//!
//! [`Spring`] integrates a progress value from 0 to 1. Animated values are
//! interpolated by progress, which is why the initial velocity has to be a
//! *relative* velocity (see [`relative_velocity`]).

use rebound_core::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Progress distance from 1.0 under which a spring may settle
const REST_DELTA: f32 = 1e-3;

/// Progress velocity under which a spring may settle
const REST_VELOCITY: f32 = 1e-3;

/// Largest integration step; longer frames are subdivided
const MAX_STEP: f32 = 1.0 / 240.0;

/// Normalize a raw velocity by the distance left to travel.
///
/// Returns `velocity / (target - current)`, or 0 when there is no distance
/// left. The result is in "fractions of the remaining distance per second",
/// the unit a progress spring's initial velocity is expressed in.
pub fn relative_velocity(velocity: f32, current: f32, target: f32) -> f32 {
    if current == target {
        return 0.0;
    }
    velocity / (target - current)
}

/// [`relative_velocity`] applied per axis
pub fn relative_velocity_vec(velocity: Vec2, current: Vec2, target: Vec2) -> Vec2 {
    Vec2::new(
        relative_velocity(velocity.x, current.x, target.x),
        relative_velocity(velocity.y, current.y, target.y),
    )
}

/// Physical spring coefficients
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Derive coefficients from a damping ratio and a response time.
    ///
    /// `stiffness = (2π / response)²`, `damping = 4π·ratio / response`,
    /// `mass = 1`. Inputs are not validated.
    pub fn from_response(damping_ratio: f32, response: f32) -> Self {
        let stiffness = (2.0 * PI / response).powi(2);
        let damping = 4.0 * PI * damping_ratio / response;
        Self::new(stiffness, damping, 1.0)
    }

    /// The damping ratio these coefficients correspond to (1.0 = critical)
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Whether a stepper can integrate this spring at all
    pub fn is_physical(&self) -> bool {
        self.stiffness.is_finite()
            && self.damping.is_finite()
            && self.mass.is_finite()
            && self.stiffness > 0.0
            && self.mass > 0.0
            && self.damping >= 0.0
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::from_response(1.0, 0.5)
    }
}

/// Perceptual spring description for one release
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringParameters {
    /// Damping ratio, expected in `(0, 1]`
    pub damping: f32,
    /// Response time in seconds, expected `> 0`
    pub response: f32,
    /// Relative velocity per axis
    pub initial_velocity: Vec2,
}

impl SpringParameters {
    pub fn new(damping: f32, response: f32, initial_velocity: Vec2) -> Self {
        Self {
            damping,
            response,
            initial_velocity,
        }
    }

    pub fn config(&self) -> SpringConfig {
        SpringConfig::from_response(self.damping, self.response)
    }
}

/// A pair of progress springs (one per axis) running from 0 toward 1
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    progress: Vec2,
    velocity: Vec2,
    settled: bool,
}

impl Spring {
    pub fn new(config: SpringConfig, initial_velocity: Vec2) -> Self {
        let mut spring = Self {
            config,
            progress: Vec2::ZERO,
            velocity: initial_velocity,
            settled: false,
        };

        if !config.is_physical() || !initial_velocity.is_finite() {
            tracing::warn!(
                ?config,
                ?initial_velocity,
                "spring cannot be integrated, snapping to end"
            );
            spring.settle();
        }

        spring
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn progress(&self) -> Vec2 {
        self.progress
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Value along the segment `from -> to` at the current progress
    pub fn interpolate(&self, from: Vec2, to: Vec2) -> Vec2 {
        if self.settled {
            return to;
        }
        Vec2::new(
            from.x + (to.x - from.x) * self.progress.x,
            from.y + (to.y - from.y) * self.progress.y,
        )
    }

    /// Advance the spring by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if self.settled || !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let steps = (dt / MAX_STEP).ceil().max(1.0) as u32;
        let h = dt / steps as f32;

        for _ in 0..steps {
            let (px, vx) = rk4(&self.config, self.progress.x, self.velocity.x, h);
            let (py, vy) = rk4(&self.config, self.progress.y, self.velocity.y, h);
            self.progress = Vec2::new(px, py);
            self.velocity = Vec2::new(vx, vy);

            if self.at_rest() {
                self.settle();
                return;
            }
        }
    }

    fn at_rest(&self) -> bool {
        (1.0 - self.progress.x).abs() < REST_DELTA
            && (1.0 - self.progress.y).abs() < REST_DELTA
            && self.velocity.x.abs() < REST_VELOCITY
            && self.velocity.y.abs() < REST_VELOCITY
    }

    fn settle(&mut self) {
        self.progress = Vec2::new(1.0, 1.0);
        self.velocity = Vec2::ZERO;
        self.settled = true;
    }
}

/// One RK4 step of `x'' = (-k(x - 1) - c·v) / m`
fn rk4(config: &SpringConfig, x: f32, v: f32, h: f32) -> (f32, f32) {
    let accel =
        |x: f32, v: f32| (-config.stiffness * (x - 1.0) - config.damping * v) / config.mass;

    let k1x = v;
    let k1v = accel(x, v);

    let k2x = v + k1v * h * 0.5;
    let k2v = accel(x + k1x * h * 0.5, v + k1v * h * 0.5);

    let k3x = v + k2v * h * 0.5;
    let k3v = accel(x + k2x * h * 0.5, v + k2v * h * 0.5);

    let k4x = v + k3v * h;
    let k4v = accel(x + k3x * h, v + k3v * h);

    (
        x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x),
        v + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_velocity_zero_distance() {
        assert_eq!(relative_velocity(100.0, 50.0, 50.0), 0.0);
        assert_eq!(relative_velocity(-3000.0, 0.0, 0.0), 0.0);
        assert_eq!(relative_velocity(0.0, -7.5, -7.5), 0.0);
    }

    #[test]
    fn test_relative_velocity_divides_by_remaining_distance() {
        assert_eq!(relative_velocity(100.0, 50.0, 0.0), -2.0);
        assert_eq!(relative_velocity(100.0, 0.0, 50.0), 2.0);
        assert_eq!(relative_velocity(-300.0, 100.0, -50.0), 2.0);
    }

    #[test]
    fn test_relative_velocity_vec_axes_independent() {
        let v = relative_velocity_vec(
            Vec2::new(500.0, 200.0),
            Vec2::new(100.0, 0.0),
            Vec2::ZERO,
        );
        assert_eq!(v, Vec2::new(-5.0, 0.0));
    }

    #[test]
    fn test_from_response_values() {
        let config = SpringConfig::from_response(0.8, 0.4);

        assert!((config.stiffness - 246.74).abs() < 0.01);
        assert!((config.damping - 25.13).abs() < 0.01);
        assert_eq!(config.mass, 1.0);
    }

    #[test]
    fn test_from_response_is_deterministic() {
        let a = SpringConfig::from_response(0.8, 0.4);
        let b = SpringParameters::new(0.8, 0.4, Vec2::new(3.0, -1.0)).config();

        assert_eq!(a.stiffness.to_bits(), b.stiffness.to_bits());
        assert_eq!(a.damping.to_bits(), b.damping.to_bits());
        assert_eq!(a.stiffness.to_bits(), (2.0 * PI / 0.4f32).powi(2).to_bits());
        assert_eq!(a.damping.to_bits(), (4.0 * PI * 0.8f32 / 0.4).to_bits());
    }

    #[test]
    fn test_damping_ratio_recovers_input() {
        for ratio in [0.2, 0.5, 0.8, 1.0] {
            let config = SpringConfig::from_response(ratio, 0.3);
            assert!((config.damping_ratio() - ratio).abs() < 1e-4);
        }
    }

    #[test]
    fn test_spring_settles_exactly() {
        let mut spring = Spring::new(SpringConfig::from_response(0.8, 0.4), Vec2::ZERO);

        for _ in 0..600 {
            spring.step(1.0 / 60.0);
        }

        assert!(spring.is_settled());
        assert_eq!(spring.progress(), Vec2::new(1.0, 1.0));
        let end = spring.interpolate(Vec2::new(40.0, -20.0), Vec2::new(5.0, 5.0));
        assert_eq!(end, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_initial_velocity_carries_momentum() {
        // Negative relative velocity: first moves away from the target
        let mut spring =
            Spring::new(SpringConfig::from_response(1.0, 0.5), Vec2::new(-5.0, 0.0));
        spring.step(1.0 / 120.0);

        assert!(spring.progress().x < 0.0);
        assert!(spring.progress().y > 0.0);
    }

    #[test]
    fn test_underdamped_spring_overshoots() {
        let mut spring = Spring::new(SpringConfig::from_response(0.3, 0.5), Vec2::ZERO);
        let mut max_progress: f32 = 0.0;

        for _ in 0..240 {
            spring.step(1.0 / 120.0);
            max_progress = max_progress.max(spring.progress().x);
        }

        assert!(max_progress > 1.0);
    }

    #[test]
    fn test_non_finite_step_is_ignored() {
        let mut spring = Spring::new(SpringConfig::from_response(0.8, 0.4), Vec2::new(2.0, 0.0));
        spring.step(1.0 / 120.0);
        let progress = spring.progress();

        spring.step(f32::NAN);
        spring.step(f32::INFINITY);
        spring.step(-1.0);

        assert_eq!(spring.progress(), progress);
        assert!(spring.progress().is_finite());
        assert!(spring.velocity().is_finite());
        assert!(!spring.is_settled());
    }

    #[test]
    fn test_non_physical_spring_snaps() {
        let spring = Spring::new(SpringConfig::from_response(0.8, -0.0), Vec2::ZERO);
        assert!(spring.is_settled());

        let spring = Spring::new(SpringConfig::new(-1.0, 1.0, 1.0), Vec2::ZERO);
        assert!(spring.is_settled());
    }
}
