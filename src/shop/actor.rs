use crate::error::ShopError;

use super::events::{EventSink, ShopEvent};
use super::resolver::{OutcomeResolver, RandomResolver, RepairOutcome};
use super::vehicle::{Vehicle, VehicleStatus};

/// Someone who brings a vehicle in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub name: String,
}

impl Client {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Anything able to attempt a repair.
///
/// After `repair` returns, the vehicle is in a terminal status: `Ok` means
/// it was fixed, `Err(ShopError::CannotRepair)` means it is condemned.
pub trait RepairActor {
    fn name(&self) -> &str;

    fn repair(&mut self, vehicle: &mut Vehicle, sink: &mut dyn EventSink)
    -> Result<(), ShopError>;
}

/// A mechanic with their own source of repair verdicts.
#[derive(Debug, Clone)]
pub struct Mechanic<R = RandomResolver> {
    name: String,
    resolver: R,
}

impl<R: OutcomeResolver> Mechanic<R> {
    pub fn new(name: impl Into<String>, resolver: R) -> Self {
        Self {
            name: name.into(),
            resolver,
        }
    }
}

impl<R: OutcomeResolver> RepairActor for Mechanic<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn repair(
        &mut self,
        vehicle: &mut Vehicle,
        sink: &mut dyn EventSink,
    ) -> Result<(), ShopError> {
        sink.emit(ShopEvent::RepairStarted {
            mechanic: self.name.clone(),
            model: vehicle.model().to_string(),
        });
        vehicle.transition(VehicleStatus::Repairing);

        let outcome = self.resolver.resolve();
        vehicle.transition(outcome.status());

        match outcome {
            RepairOutcome::Fixed => {
                sink.emit(ShopEvent::RepairSucceeded {
                    mechanic: self.name.clone(),
                    model: vehicle.model().to_string(),
                });
                Ok(())
            }
            RepairOutcome::CannotFix => {
                sink.emit(ShopEvent::RepairFailed {
                    mechanic: self.name.clone(),
                    model: vehicle.model().to_string(),
                });
                Err(ShopError::CannotRepair {
                    model: vehicle.model().to_string(),
                })
            }
        }
    }
}
