//! Narration of the repair workflow.
//!
//! Core operations never print. They hand a [`ShopEvent`] to an
//! [`EventSink`], and the sink decides where the line goes: `tracing`
//! in production, the console in the CLI, a `Vec` in tests.

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use super::vehicle::VehicleStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ShopEvent {
    OrderCreated {
        client: String,
        model: String,
    },
    OrderRejected {
        client: String,
        reason: String,
    },
    RepairStarted {
        mechanic: String,
        model: String,
    },
    RepairSucceeded {
        mechanic: String,
        model: String,
    },
    RepairFailed {
        mechanic: String,
        model: String,
    },
    DomainError {
        message: String,
    },
    FinalStatusReported {
        vin: String,
        status: VehicleStatus,
    },
}

impl ShopEvent {
    /// Failures and rejections; everything else is ordinary progress.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ShopEvent::OrderRejected { .. }
                | ShopEvent::RepairFailed { .. }
                | ShopEvent::DomainError { .. }
        )
    }
}

impl fmt::Display for ShopEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShopEvent::OrderCreated { client, model } => {
                write!(f, "{client} created a repair order for {model}")
            }
            ShopEvent::OrderRejected { client, reason } => {
                write!(f, "[error] client {client}: {reason}")
            }
            ShopEvent::RepairStarted { mechanic, model } => {
                write!(f, "{mechanic} started repairing {model}")
            }
            ShopEvent::RepairSucceeded { mechanic, model } => {
                write!(f, "{mechanic} successfully repaired {model}")
            }
            ShopEvent::RepairFailed { mechanic, model } => {
                write!(f, "{mechanic} reported that {model} cannot be repaired")
            }
            ShopEvent::DomainError { message } => write!(f, "exception: {message}"),
            ShopEvent::FinalStatusReported { vin, status } => {
                write!(f, "vehicle {vin} status after repair attempt: {status}")
            }
        }
    }
}

pub trait EventSink {
    fn emit(&mut self, event: ShopEvent);
}

/// Routes every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: ShopEvent) {
        if event.is_failure() {
            warn!(?event, "{event}");
        } else {
            info!(?event, "{event}");
        }
    }
}

/// Keeps every event in memory.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<ShopEvent>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded events matching `pred`.
    pub fn count(&self, pred: impl Fn(&ShopEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

#[cfg(test)]
impl EventSink for RecordingSink {
    fn emit(&mut self, event: ShopEvent) {
        self.events.push(event);
    }
}
