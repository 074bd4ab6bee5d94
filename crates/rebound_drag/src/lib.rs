//! Rebound Drag
//!
//! Drag an element 1:1 with the pointer; on release it springs back to
//! rest, carrying the release momentum.
//!
//! # Example
//!
//! ```rust
//! use rebound_animation::AnimationScheduler;
//! use rebound_core::{GestureEvent, GesturePhase, Point2, Rect, Vec2};
//! use rebound_drag::{DragElement, DragMode, DragReleaseAnimator};
//!
//! let mut element = DragElement::new(Rect::new(0.0, 0.0, 100.0, 100.0));
//! let mut animator = DragReleaseAnimator::new(DragMode::Position, &element);
//! let mut scheduler = AnimationScheduler::new();
//!
//! let grab = Point2::new(50.0, 50.0);
//! for (phase, dx) in [
//!     (GesturePhase::Began, 0.0),
//!     (GesturePhase::Changed, 80.0),
//!     (GesturePhase::Ended, 80.0),
//! ] {
//!     let event = GestureEvent::new(
//!         phase,
//!         Vec2::new(dx, 0.0),
//!         Vec2::new(400.0, 0.0),
//!         grab + Vec2::new(dx, 0.0),
//!     );
//!     animator.handle(&event, &mut element, &mut scheduler);
//! }
//!
//! while animator.is_animating() {
//!     scheduler.tick(1.0 / 120.0);
//!     animator.update(&mut scheduler, &mut element);
//! }
//! assert_eq!(element.frame.origin, Point2::new(0.0, 0.0));
//! ```

pub mod animator;
pub mod controls;
pub mod element;
pub mod error;
pub mod overlay;
pub mod state;

pub use animator::{DragReleaseAnimator, DragState};
pub use controls::SpringControls;
pub use element::{DragElement, DragMode};
pub use error::{DragError, Result};
pub use overlay::{format_readout, Marker, VelocityOverlay};
pub use state::{DragPhase, StateTransitions};
