//! Externally owned spring controls
//!
//! The damping and response values are owned by whatever UI exposes them
//! (sliders, a config file). The animator reads them at release time and
//! never validates them; [`SpringControls::validated`] is for config layers
//! that want to reject bad input up front.

use rebound_animation::SpringParameters;
use rebound_core::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{DragError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringControls {
    /// Damping ratio, normally in `(0, 1]`
    #[serde(default = "default_damping")]
    pub damping: f32,
    /// Response time in seconds, normally `> 0`
    #[serde(default = "default_response")]
    pub response: f32,
}

fn default_damping() -> f32 {
    0.8
}

fn default_response() -> f32 {
    0.4
}

impl Default for SpringControls {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            response: default_response(),
        }
    }
}

impl SpringControls {
    pub fn new(damping: f32, response: f32) -> Self {
        Self { damping, response }
    }

    /// Spring parameters for a release with the given relative velocity
    pub fn parameters(&self, initial_velocity: Vec2) -> SpringParameters {
        SpringParameters::new(self.damping, self.response, initial_velocity)
    }

    /// Check both values are inside their documented ranges
    pub fn validated(self) -> Result<Self> {
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(DragError::InvalidDamping(self.damping));
        }
        if !(self.response > 0.0 && self.response.is_finite()) {
            return Err(DragError::InvalidResponse(self.response));
        }
        Ok(self)
    }
}
