//! Drag-release spring animator
//!
//! Ties a pan gesture to a [`DragElement`]:
//!
//! - **Begin**: cancel any running spring, remember where the drag started
//! - **Change**: move the element 1:1 with the pointer, no smoothing
//! - **End/Cancel**: turn the release velocity into a relative velocity,
//!   build spring parameters from the controls and let the driver carry the
//!   element back to rest
//!
//! The animator never steps springs itself. Call [`DragReleaseAnimator::update`]
//! once per frame after the driver has ticked to copy the animated value onto
//! the element.

use rebound_animation::{
    relative_velocity_vec, AnimationDriver, AnimationId, SpringAnimation, SpringParameters,
};
use rebound_core::events::event_types;
use rebound_core::{GesturePhase, GestureSource, Point2, Vec2};

use crate::controls::SpringControls;
use crate::element::{DragElement, DragMode};
use crate::overlay::VelocityOverlay;
use crate::state::{DragPhase, StateTransitions};

/// Bookkeeping for the drag in progress
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    pub is_dragging: bool,
    /// Position mode: pointer minus element center at grab time.
    /// Transform mode: the translation the element already had.
    pub initial_offset: Vec2,
    /// Frame origin when the gesture began
    pub start_origin: Point2,
}

pub struct DragReleaseAnimator {
    mode: DragMode,
    rest: Vec2,
    controls: SpringControls,
    state: DragState,
    phase: DragPhase,
    animation: Option<AnimationId>,
    overlay: Option<VelocityOverlay>,
    last_release: Option<SpringParameters>,
}

impl DragReleaseAnimator {
    /// Attach to an element; its current placement becomes the rest target
    pub fn new(mode: DragMode, element: &DragElement) -> Self {
        Self {
            mode,
            rest: mode.rest_value(element),
            controls: SpringControls::default(),
            state: DragState::default(),
            phase: DragPhase::Idle,
            animation: None,
            overlay: None,
            last_release: None,
        }
    }

    pub fn with_controls(mut self, controls: SpringControls) -> Self {
        self.controls = controls;
        self
    }

    /// Show the pointer marker and velocity readout
    pub fn with_debug_overlay(mut self) -> Self {
        self.overlay = Some(VelocityOverlay::new());
        self
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn controls(&self) -> SpringControls {
        self.controls
    }

    pub fn set_controls(&mut self, controls: SpringControls) {
        self.controls = controls;
    }

    pub fn set_damping(&mut self, damping: f32) {
        self.controls.damping = damping;
    }

    pub fn set_response(&mut self, response: f32) {
        self.controls.response = response;
    }

    /// The value the element springs back to
    pub fn rest_target(&self) -> Vec2 {
        self.rest
    }

    /// Re-anchor the rest target, e.g. after a layout change
    pub fn set_rest_target(&mut self, rest: Vec2) {
        self.rest = rest;
    }

    pub fn overlay(&self) -> Option<&VelocityOverlay> {
        self.overlay.as_ref()
    }

    /// Parameters used by the most recent release
    pub fn last_release(&self) -> Option<&SpringParameters> {
        self.last_release.as_ref()
    }

    /// The spring currently carrying the element, if any
    pub fn animation(&self) -> Option<AnimationId> {
        self.animation
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Feed one gesture callback
    pub fn handle<G, D>(&mut self, gesture: &G, element: &mut DragElement, driver: &mut D)
    where
        G: GestureSource + ?Sized,
        D: AnimationDriver + ?Sized,
    {
        let phase = gesture.phase();
        let Some(event) = phase.event_type() else {
            return;
        };
        let Some(next) = self.phase.on_event(event) else {
            tracing::trace!(?phase, state = ?self.phase, "gesture ignored");
            return;
        };

        match phase {
            GesturePhase::Began => self.begin(gesture, element, driver),
            GesturePhase::Changed => self.drag(gesture, element),
            GesturePhase::Ended | GesturePhase::Cancelled => self.release(gesture, element, driver),
            GesturePhase::Possible | GesturePhase::Failed => {}
        }

        self.phase = next;
    }

    /// Copy the driver's animated value onto the element.
    ///
    /// Returns whether a spring is still running. When the spring settles the
    /// element is placed exactly at the rest target.
    pub fn update<D>(&mut self, driver: &mut D, element: &mut DragElement) -> bool
    where
        D: AnimationDriver + ?Sized,
    {
        let Some(id) = self.animation else {
            return false;
        };

        match driver.sample(id) {
            Some(sample) if sample.finished => {
                self.mode.apply(element, self.rest);
                driver.release(id);
                self.finish_animation();
                false
            }
            Some(sample) => {
                self.mode.apply(element, sample.value);
                true
            }
            None => {
                tracing::warn!(?id, "driver dropped the release animation");
                self.finish_animation();
                false
            }
        }
    }

    fn begin<G, D>(&mut self, gesture: &G, element: &DragElement, driver: &mut D)
    where
        G: GestureSource + ?Sized,
        D: AnimationDriver + ?Sized,
    {
        // Replace, never merge: the element stays where the spring left it
        if let Some(id) = self.animation.take() {
            driver.cancel(id);
        }

        let location = gesture.location();
        let initial_offset = match self.mode {
            DragMode::Position => location - element.center(),
            DragMode::Transform => element.transform.translation,
        };

        self.state = DragState {
            is_dragging: true,
            initial_offset,
            start_origin: element.frame.origin,
        };

        if let Some(overlay) = self.overlay.as_mut() {
            overlay.begin(location);
        }

        tracing::trace!(?location, ?initial_offset, "drag began");
    }

    fn drag<G>(&mut self, gesture: &G, element: &mut DragElement)
    where
        G: GestureSource + ?Sized,
    {
        match self.mode {
            DragMode::Position => {
                element.set_center(gesture.location() - self.state.initial_offset);
            }
            DragMode::Transform => {
                element.transform.translation = self.state.initial_offset + gesture.translation();
            }
        }

        if let Some(overlay) = self.overlay.as_mut() {
            let velocity = gesture.velocity();
            let relative = relative_velocity_vec(velocity, self.mode.value(element), self.rest);
            overlay.track(gesture.location());
            overlay.update_readout(velocity, relative);
        }
    }

    fn release<G, D>(&mut self, gesture: &G, element: &DragElement, driver: &mut D)
    where
        G: GestureSource + ?Sized,
        D: AnimationDriver + ?Sized,
    {
        let current = self.mode.value(element);
        let velocity = gesture.velocity();
        let relative = relative_velocity_vec(velocity, current, self.rest);
        let parameters = self.controls.parameters(relative);

        self.animation = Some(driver.start(SpringAnimation::new(&parameters, current, self.rest)));
        self.last_release = Some(parameters);
        self.state = DragState::default();

        if let Some(overlay) = self.overlay.as_mut() {
            overlay.update_readout(velocity, relative);
            overlay.clear();
        }

        tracing::debug!(
            ?velocity,
            ?relative,
            damping = parameters.damping,
            response = parameters.response,
            "drag released"
        );
    }

    fn finish_animation(&mut self) {
        self.animation = None;
        if let Some(next) = self.phase.on_event(event_types::ANIMATION_END) {
            self.phase = next;
        }
    }
}
