//! Animation driver abstraction
//!
//! A driver is whatever actually steps a spring over time: a platform
//! property animator, a compositor, or the headless
//! [`AnimationScheduler`](crate::AnimationScheduler). Callers hand it a
//! [`SpringAnimation`] and poll the animated value by id.

use rebound_core::Vec2;
use slotmap::new_key_type;
use std::fmt;

use crate::spring::{SpringConfig, SpringParameters};

new_key_type! {
    /// Handle to an animation started on a driver
    pub struct AnimationId;
}

/// Called once when an animation settles at its target
pub type CompletionCallback = Box<dyn FnOnce(AnimationId) + Send>;

/// A spring-timed animation of a 2D value from `from` to `to`
pub struct SpringAnimation {
    pub config: SpringConfig,
    /// Relative velocity per axis (fractions of the distance per second)
    pub initial_velocity: Vec2,
    pub from: Vec2,
    pub to: Vec2,
    pub(crate) on_complete: Option<CompletionCallback>,
}

impl SpringAnimation {
    /// Animation timed by perceptual spring parameters
    pub fn new(parameters: &SpringParameters, from: Vec2, to: Vec2) -> Self {
        Self::with_config(parameters.config(), parameters.initial_velocity, from, to)
    }

    pub fn with_config(config: SpringConfig, initial_velocity: Vec2, from: Vec2, to: Vec2) -> Self {
        Self {
            config,
            initial_velocity,
            from,
            to,
            on_complete: None,
        }
    }

    /// Register a completion notification
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(AnimationId) + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Take the completion notification, leaving none behind
    pub fn take_completion(&mut self) -> Option<CompletionCallback> {
        self.on_complete.take()
    }
}

impl fmt::Debug for SpringAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpringAnimation")
            .field("config", &self.config)
            .field("initial_velocity", &self.initial_velocity)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Snapshot of a running (or just finished) animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSample {
    pub value: Vec2,
    /// The animation settled; `value` is exactly the target
    pub finished: bool,
}

/// Something that can run spring animations to completion
pub trait AnimationDriver {
    /// Start an animation; it runs until it settles or is cancelled
    fn start(&mut self, animation: SpringAnimation) -> AnimationId;

    /// Current value, or `None` if the id is unknown or released
    fn sample(&self, id: AnimationId) -> Option<AnimationSample>;

    /// Stop an animation where it is. The completion notification does not
    /// fire. Returns whether the id was known.
    fn cancel(&mut self, id: AnimationId) -> bool;

    /// Forget a finished animation
    fn release(&mut self, id: AnimationId);
}

impl<D: AnimationDriver + ?Sized> AnimationDriver for &mut D {
    fn start(&mut self, animation: SpringAnimation) -> AnimationId {
        (**self).start(animation)
    }

    fn sample(&self, id: AnimationId) -> Option<AnimationSample> {
        (**self).sample(id)
    }

    fn cancel(&mut self, id: AnimationId) -> bool {
        (**self).cancel(id)
    }

    fn release(&mut self, id: AnimationId) {
        (**self).release(id)
    }
}
