use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::error::ShopError;

/// Vehicle identification number. Never empty, never padded with whitespace.
///
/// The string is kept exactly as given; no normalization takes place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vin(String);

impl Vin {
    pub fn new(raw: &str) -> Result<Self, ShopError> {
        if raw.is_empty() || raw.trim() != raw {
            return Err(ShopError::InvalidVin(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a vehicle is in the repair lifecycle.
///
/// Every vehicle flows through: WAITING → REPAIRING → FIXED | CANNOT_FIX
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    Waiting,
    Repairing,
    Fixed,
    CannotFix,
}

impl VehicleStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, VehicleStatus::Fixed | VehicleStatus::CannotFix)
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleStatus::Waiting => write!(f, "WAITING"),
            VehicleStatus::Repairing => write!(f, "REPAIRING"),
            VehicleStatus::Fixed => write!(f, "FIXED"),
            VehicleStatus::CannotFix => write!(f, "CANNOT_FIX"),
        }
    }
}

/// A car brought into the shop.
///
/// The vehicle only holds data. Sequencing of status changes is driven by
/// the work order and the repair actor; `transition` accepts any status.
/// Equality and hashing look at the VIN only, compared as the exact
/// string, so the same physical car stays the same map key across status
/// changes.
#[derive(Debug, Clone)]
pub struct Vehicle {
    vin: Vin,
    model: String,
    status: VehicleStatus,
    status_history: Vec<VehicleStatus>,
}

impl Vehicle {
    pub fn new(vin: &str, model: impl Into<String>) -> Result<Self, ShopError> {
        Ok(Self {
            vin: Vin::new(vin)?,
            model: model.into(),
            status: VehicleStatus::Waiting,
            status_history: Vec::new(),
        })
    }

    pub fn vin(&self) -> &Vin {
        &self.vin
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn status(&self) -> VehicleStatus {
        self.status
    }

    /// Statuses the vehicle has left, oldest first.
    pub fn status_history(&self) -> &[VehicleStatus] {
        &self.status_history
    }

    pub(super) fn transition(&mut self, next: VehicleStatus) {
        self.status_history.push(self.status);
        self.status = next;
    }
}

impl PartialEq for Vehicle {
    fn eq(&self, other: &Self) -> bool {
        self.vin == other.vin
    }
}

impl Eq for Vehicle {}

impl Hash for Vehicle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vin.hash(state);
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (VIN: {}), status: {}", self.model, self.vin, self.status)
    }
}
