//! Stress alert state machine.
//!
//! Transitions are pure: `transition` takes the current state and an input
//! and returns the next state plus the effects the dashboard must apply.
//! Guarded inputs (raise while alerting, dismiss while calm) yield no effects.

use crate::types::{AlertState, DisplayMood};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertInput {
    /// Scheduler tick or explicit trigger.
    Raise,
    /// Auto-dismiss timer or explicit dismiss.
    Dismiss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertEffect {
    /// Publish the display mood for the new state.
    Publish(DisplayMood),
    /// Arm the one-shot auto-dismiss task.
    ArmAutoDismiss,
    /// Cancel a still-pending auto-dismiss task.
    CancelAutoDismiss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertTransition {
    pub state: AlertState,
    pub effects: Vec<AlertEffect>,
}

impl AlertTransition {
    fn unchanged(state: AlertState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.effects.is_empty()
    }
}

pub fn transition(state: AlertState, input: AlertInput) -> AlertTransition {
    match (state, input) {
        (AlertState::Calm, AlertInput::Raise) => AlertTransition {
            state: AlertState::Alerting,
            effects: vec![
                AlertEffect::Publish(DisplayMood::Stress),
                AlertEffect::ArmAutoDismiss,
            ],
        },
        (AlertState::Alerting, AlertInput::Dismiss) => AlertTransition {
            state: AlertState::Calm,
            effects: vec![
                AlertEffect::CancelAutoDismiss,
                AlertEffect::Publish(DisplayMood::Calm),
            ],
        },
        (AlertState::Alerting, AlertInput::Raise) | (AlertState::Calm, AlertInput::Dismiss) => {
            AlertTransition::unchanged(state)
        }
    }
}
