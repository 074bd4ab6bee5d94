//! Rebound Animation System
//!
//! Spring timing for drag-release interactions.
//!
//! # Features
//!
//! - **Perceptual Springs**: stiffness and damping derived from a damping
//!   ratio and a response time, with unit mass
//! - **Relative Velocity**: pointer velocity normalized by the distance
//!   still to travel, the initial velocity a spring timing curve expects
//! - **Spring Physics**: RK4-integrated progress springs
//! - **Driver Abstraction**: [`AnimationDriver`] is what a platform animator
//!   provides; [`AnimationScheduler`] is the headless implementation

pub mod driver;
pub mod error;
pub mod scheduler;
pub mod spring;

pub use driver::{
    AnimationDriver, AnimationId, AnimationSample, CompletionCallback, SpringAnimation,
};
pub use error::{AnimationError, Result};
pub use scheduler::AnimationScheduler;
pub use spring::{relative_velocity, relative_velocity_vec, Spring, SpringConfig, SpringParameters};
