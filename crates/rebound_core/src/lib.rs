//! Rebound Core
//!
//! Foundational primitives shared by the Rebound crates:
//!
//! - **Geometry**: points, vectors, rects and translation transforms
//! - **Gesture Events**: platform-agnostic pan gesture phases and samples
//! - **Pan Recognition**: turns raw pointer samples into gesture events
//!
//! # Example
//!
//! ```rust
//! use rebound_core::gesture::{PanRecognizer, PointerSample};
//! use rebound_core::{GesturePhase, GestureSource, Point2};
//!
//! let mut pan = PanRecognizer::new();
//! pan.handle(PointerSample::down(Point2::new(10.0, 10.0), 0.0));
//! let event = pan
//!     .handle(PointerSample::moved(Point2::new(30.0, 10.0), 16.0))
//!     .unwrap();
//!
//! assert_eq!(event.phase(), GesturePhase::Began);
//! assert_eq!(event.translation().x, 20.0);
//! ```

pub mod events;
pub mod geometry;
pub mod gesture;

pub use events::{GestureEvent, GesturePhase, GestureSource};
pub use geometry::{Point2, Rect, Size, Transform, Vec2};
pub use gesture::{PanRecognizer, PointerSample};
