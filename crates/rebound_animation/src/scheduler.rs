//! Animation scheduler
//!
//! Headless [`AnimationDriver`]: owns every running spring and advances
//! them each frame.

use rebound_core::Vec2;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::driver::{
    AnimationDriver, AnimationId, AnimationSample, CompletionCallback, SpringAnimation,
};
use crate::error::{AnimationError, Result};
use crate::spring::Spring;

/// A spring animation owned by the scheduler
struct ActiveAnimation {
    spring: Spring,
    from: Vec2,
    to: Vec2,
    elapsed: f32,
    on_complete: Option<CompletionCallback>,
}

impl ActiveAnimation {
    fn value(&self) -> Vec2 {
        self.spring.interpolate(self.from, self.to)
    }
}

/// The animation scheduler that ticks all active animations
pub struct AnimationScheduler {
    animations: SlotMap<AnimationId, ActiveAnimation>,
    target_fps: u32,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
            target_fps: 120,
        }
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.max(1);
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Length of one frame at the target frame rate, in seconds
    pub fn frame_duration(&self) -> f32 {
        1.0 / self.target_fps as f32
    }

    /// Advance all running animations by `dt` seconds.
    ///
    /// Returns the animations that settled during this tick; their
    /// completion callbacks have already run.
    pub fn tick(&mut self, dt: f32) -> SmallVec<[AnimationId; 4]> {
        if !dt.is_finite() || dt <= 0.0 {
            return SmallVec::new();
        }

        let mut completed: SmallVec<[(AnimationId, Option<CompletionCallback>); 4]> =
            SmallVec::new();

        // Step in whole frames so results don't depend on how dt is sliced
        let frame = self.frame_duration();
        let frames = (dt / frame).round().max(1.0) as u32;
        let step = dt / frames as f32;

        for (id, animation) in self.animations.iter_mut() {
            if animation.spring.is_settled() {
                continue;
            }

            for _ in 0..frames {
                animation.spring.step(step);
                animation.elapsed += step;
                if animation.spring.is_settled() {
                    break;
                }
            }

            tracing::trace!(?id, value = ?animation.value(), "animation tick");

            if animation.spring.is_settled() {
                tracing::debug!(?id, elapsed = animation.elapsed, "animation settled");
                completed.push((id, animation.on_complete.take()));
            }
        }

        completed
            .into_iter()
            .map(|(id, callback)| {
                if let Some(callback) = callback {
                    callback(id);
                }
                id
            })
            .collect()
    }

    /// Check if any animations are still running
    pub fn has_active_animations(&self) -> bool {
        self.animations.iter().any(|(_, a)| !a.spring.is_settled())
    }

    /// Get the number of animations held (running or finished, not released)
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Current value of an animation
    pub fn value(&self, id: AnimationId) -> Result<Vec2> {
        self.animations
            .get(id)
            .map(ActiveAnimation::value)
            .ok_or(AnimationError::UnknownAnimation(id))
    }

    /// Seconds an animation has been running
    pub fn elapsed(&self, id: AnimationId) -> Result<f32> {
        self.animations
            .get(id)
            .map(|a| a.elapsed)
            .ok_or(AnimationError::UnknownAnimation(id))
    }

    /// Access the underlying spring
    pub fn spring(&self, id: AnimationId) -> Result<&Spring> {
        self.animations
            .get(id)
            .map(|a| &a.spring)
            .ok_or(AnimationError::UnknownAnimation(id))
    }

    /// Drop every finished animation
    pub fn release_finished(&mut self) -> usize {
        let before = self.animations.len();
        self.animations.retain(|_, a| !a.spring.is_settled());
        before - self.animations.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationDriver for AnimationScheduler {
    fn start(&mut self, mut animation: SpringAnimation) -> AnimationId {
        let spring = Spring::new(animation.config, animation.initial_velocity);
        let on_complete = animation.take_completion();
        let settled = spring.is_settled();

        let id = self.animations.insert(ActiveAnimation {
            spring,
            from: animation.from,
            to: animation.to,
            elapsed: 0.0,
            on_complete,
        });

        tracing::debug!(
            ?id,
            from = ?animation.from,
            to = ?animation.to,
            stiffness = animation.config.stiffness,
            damping = animation.config.damping,
            "animation started"
        );

        // Springs that cannot be integrated finish immediately
        if settled {
            if let Some(callback) = self.animations.get_mut(id).and_then(|a| a.on_complete.take()) {
                callback(id);
            }
        }

        id
    }

    fn sample(&self, id: AnimationId) -> Option<AnimationSample> {
        self.animations.get(id).map(|a| AnimationSample {
            value: a.value(),
            finished: a.spring.is_settled(),
        })
    }

    fn cancel(&mut self, id: AnimationId) -> bool {
        let cancelled = self.animations.remove(id).is_some();
        if cancelled {
            tracing::debug!(?id, "animation cancelled");
        }
        cancelled
    }

    fn release(&mut self, id: AnimationId) {
        self.animations.remove(id);
    }
}
