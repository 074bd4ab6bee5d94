//! Drag interaction states

use rebound_core::events::{event_types, EventType};

/// A state enum that knows its own transitions
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + std::fmt::Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// Where a draggable element is in its interaction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Following the pointer 1:1
    Dragging,
    /// Released; a spring is carrying it back to rest
    Settling,
}

impl StateTransitions for DragPhase {
    fn on_event(&self, event: EventType) -> Option<Self> {
        match (self, event) {
            // A new gesture always wins, including over a running spring
            (_, event_types::DRAG_BEGIN) => Some(DragPhase::Dragging),
            (DragPhase::Dragging, event_types::DRAG) => Some(DragPhase::Dragging),
            (DragPhase::Dragging, event_types::DRAG_END) => Some(DragPhase::Settling),
            (DragPhase::Settling, event_types::ANIMATION_END) => Some(DragPhase::Idle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let phase = DragPhase::Idle;
        let phase = phase.on_event(event_types::DRAG_BEGIN).unwrap();
        assert_eq!(phase, DragPhase::Dragging);
        let phase = phase.on_event(event_types::DRAG).unwrap();
        let phase = phase.on_event(event_types::DRAG_END).unwrap();
        assert_eq!(phase, DragPhase::Settling);
        let phase = phase.on_event(event_types::ANIMATION_END).unwrap();
        assert_eq!(phase, DragPhase::Idle);
    }

    #[test]
    fn test_begin_interrupts_settling() {
        assert_eq!(
            DragPhase::Settling.on_event(event_types::DRAG_BEGIN),
            Some(DragPhase::Dragging)
        );
        assert_eq!(
            DragPhase::Dragging.on_event(event_types::DRAG_BEGIN),
            Some(DragPhase::Dragging)
        );
    }

    #[test]
    fn test_stray_events_ignored() {
        assert_eq!(DragPhase::Idle.on_event(event_types::DRAG), None);
        assert_eq!(DragPhase::Idle.on_event(event_types::DRAG_END), None);
        assert_eq!(DragPhase::Settling.on_event(event_types::DRAG), None);
        assert_eq!(DragPhase::Dragging.on_event(event_types::ANIMATION_END), None);
        assert_eq!(DragPhase::Idle.on_event(event_types::ANIMATION_END), None);
    }
}
