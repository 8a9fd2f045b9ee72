use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::ShopError;

use super::actor::{Client, RepairActor};
use super::events::{EventSink, ShopEvent};
use super::resolver::RepairOutcome;
use super::vehicle::{Vehicle, VehicleStatus};

/// A one-shot request binding a client, a vehicle and a repair actor.
///
/// The order holds the only mutable borrow of its vehicle, so a vehicle can
/// have at most one repair in flight. `process` consumes the order.
pub struct WorkOrder<'a> {
    client: &'a Client,
    vehicle: &'a mut Vehicle,
    mechanic: &'a mut dyn RepairActor,
}

/// Open a work order. Condemned vehicles are turned away.
pub fn create_order<'a>(
    client: &'a Client,
    vehicle: &'a mut Vehicle,
    mechanic: &'a mut dyn RepairActor,
    sink: &mut dyn EventSink,
) -> Result<WorkOrder<'a>, ShopError> {
    if vehicle.status() == VehicleStatus::CannotFix {
        let err = ShopError::VehicleUnrepairable {
            model: vehicle.model().to_string(),
        };
        sink.emit(ShopEvent::OrderRejected {
            client: client.name.clone(),
            reason: err.to_string(),
        });
        return Err(err);
    }

    sink.emit(ShopEvent::OrderCreated {
        client: client.name.clone(),
        model: vehicle.model().to_string(),
    });
    Ok(WorkOrder {
        client,
        vehicle,
        mechanic,
    })
}

impl WorkOrder<'_> {
    /// Run the repair and report the vehicle's final status.
    ///
    /// A `CannotRepair` failure is narrated and folded into the report.
    /// Any other error, including an actor that leaves the vehicle in a
    /// non-terminal status, is returned to the caller. The final status is
    /// reported exactly once on every path.
    pub fn process(self, sink: &mut dyn EventSink) -> Result<OrderReport, ShopError> {
        let started_at = Utc::now();
        debug!(
            vin = %self.vehicle.vin(),
            mechanic = self.mechanic.name(),
            "processing work order"
        );

        let attempt = self.mechanic.repair(self.vehicle, sink);
        let verdict = match attempt {
            Ok(()) => Ok((RepairOutcome::Fixed, None)),
            Err(err @ ShopError::CannotRepair { .. }) => {
                sink.emit(ShopEvent::DomainError {
                    message: err.to_string(),
                });
                Ok((RepairOutcome::CannotFix, Some(err.to_string())))
            }
            Err(other) => Err(other),
        };

        let final_status = self.vehicle.status();
        sink.emit(ShopEvent::FinalStatusReported {
            vin: self.vehicle.vin().to_string(),
            status: final_status,
        });

        let (outcome, failure) = verdict?;
        if !final_status.is_terminal() {
            return Err(ShopError::RepairIncomplete {
                model: self.vehicle.model().to_string(),
                status: final_status,
            });
        }

        let completed_at = Utc::now();
        Ok(OrderReport {
            client: self.client.name.clone(),
            mechanic: self.mechanic.name().to_string(),
            vin: self.vehicle.vin().to_string(),
            model: self.vehicle.model().to_string(),
            outcome,
            failure,
            final_status,
            status_history: self.vehicle.status_history().to_vec(),
            started_at,
            completed_at,
            duration_ms: (completed_at - started_at).num_milliseconds(),
        })
    }
}

/// Record of one processed work order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderReport {
    pub client: String,
    pub mechanic: String,
    pub vin: String,
    pub model: String,
    pub outcome: RepairOutcome,
    pub failure: Option<String>,
    pub final_status: VehicleStatus,
    pub status_history: Vec<VehicleStatus>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::actor::Mechanic;
    use crate::shop::events::RecordingSink;
    use crate::shop::resolver::FixedResolver;

    fn final_reports(sink: &RecordingSink) -> usize {
        sink.count(|e| matches!(e, ShopEvent::FinalStatusReported { .. }))
    }

    /// Fails with something other than `CannotRepair`.
    struct BrokenActor;

    impl RepairActor for BrokenActor {
        fn name(&self) -> &str {
            "Broken"
        }

        fn repair(
            &mut self,
            _vehicle: &mut Vehicle,
            _sink: &mut dyn EventSink,
        ) -> Result<(), ShopError> {
            Err(ShopError::InvalidVin(String::new()))
        }
    }

    /// Reports success without touching the vehicle.
    struct IdleActor;

    impl RepairActor for IdleActor {
        fn name(&self) -> &str {
            "Idle"
        }

        fn repair(
            &mut self,
            _vehicle: &mut Vehicle,
            _sink: &mut dyn EventSink,
        ) -> Result<(), ShopError> {
            Ok(())
        }
    }

    #[test]
    fn actor_leaving_vehicle_unfinished_is_an_error() {
        let client = Client::new("Anna");
        let mut car = Vehicle::new("VIN0001", "Toyota").unwrap();
        let mut actor = IdleActor;
        let mut sink = RecordingSink::new();

        let order = create_order(&client, &mut car, &mut actor, &mut sink).unwrap();
        let err = order.process(&mut sink).unwrap_err();

        assert_eq!(
            err,
            ShopError::RepairIncomplete {
                model: "Toyota".into(),
                status: VehicleStatus::Waiting
            }
        );
        assert!(!err.is_domain_outcome());
        assert_eq!(final_reports(&sink), 1);
        assert_eq!(car.status(), VehicleStatus::Waiting);
    }

    #[test]
    fn fixed_repair_completes_cleanly() {
        let client = Client::new("Anna");
        let mut car = Vehicle::new("VIN0001", "Toyota").unwrap();
        let mut mechanic = Mechanic::new("Ivan", FixedResolver(RepairOutcome::Fixed));
        let mut sink = RecordingSink::new();

        let order = create_order(&client, &mut car, &mut mechanic, &mut sink).unwrap();
        let report = order.process(&mut sink).unwrap();

        assert_eq!(report.outcome, RepairOutcome::Fixed);
        assert_eq!(report.final_status, VehicleStatus::Fixed);
        assert!(report.failure.is_none());
        assert_eq!(report.client, "Anna");
        assert_eq!(report.mechanic, "Ivan");
        assert_eq!(car.status(), VehicleStatus::Fixed);
        assert_eq!(final_reports(&sink), 1);
        assert_eq!(sink.count(ShopEvent::is_failure), 0);
    }

    #[test]
    fn cannot_fix_is_captured_and_reported_once() {
        let client = Client::new("Boris");
        let mut car = Vehicle::new("VIN0002", "Ford").unwrap();
        let mut mechanic = Mechanic::new("Oleg", FixedResolver(RepairOutcome::CannotFix));
        let mut sink = RecordingSink::new();

        let order = create_order(&client, &mut car, &mut mechanic, &mut sink).unwrap();
        let report = order.process(&mut sink).unwrap();

        assert_eq!(report.outcome, RepairOutcome::CannotFix);
        assert_eq!(report.failure.as_deref(), Some("vehicle Ford is beyond repair"));
        assert_eq!(car.status(), VehicleStatus::CannotFix);
        assert_eq!(final_reports(&sink), 1);
        assert_eq!(
            sink.events.last(),
            Some(&ShopEvent::FinalStatusReported {
                vin: "VIN0002".into(),
                status: VehicleStatus::CannotFix
            })
        );
    }

    #[test]
    fn event_sequence_for_failed_repair() {
        let client = Client::new("Boris");
        let mut car = Vehicle::new("VIN0002", "Ford").unwrap();
        let mut mechanic = Mechanic::new("Oleg", FixedResolver(RepairOutcome::CannotFix));
        let mut sink = RecordingSink::new();

        create_order(&client, &mut car, &mut mechanic, &mut sink)
            .unwrap()
            .process(&mut sink)
            .unwrap();

        let kinds: Vec<&str> = sink
            .events
            .iter()
            .map(|e| match e {
                ShopEvent::OrderCreated { .. } => "created",
                ShopEvent::OrderRejected { .. } => "rejected",
                ShopEvent::RepairStarted { .. } => "started",
                ShopEvent::RepairSucceeded { .. } => "succeeded",
                ShopEvent::RepairFailed { .. } => "failed",
                ShopEvent::DomainError { .. } => "error",
                ShopEvent::FinalStatusReported { .. } => "final",
            })
            .collect();
        assert_eq!(kinds, vec!["created", "started", "failed", "error", "final"]);
    }

    #[test]
    fn condemned_vehicle_is_rejected_on_second_order() {
        let client = Client::new("Victoria");
        let mut car = Vehicle::new("VIN0003", "Lada").unwrap();
        let mut mechanic = Mechanic::new("Ivan", FixedResolver(RepairOutcome::CannotFix));
        let mut sink = RecordingSink::new();

        create_order(&client, &mut car, &mut mechanic, &mut sink)
            .unwrap()
            .process(&mut sink)
            .unwrap();

        let second = create_order(&client, &mut car, &mut mechanic, &mut sink);
        assert_eq!(
            second.err(),
            Some(ShopError::VehicleUnrepairable {
                model: "Lada".into()
            })
        );
        assert!(matches!(
            sink.events.last(),
            Some(ShopEvent::OrderRejected { client, .. }) if client == "Victoria"
        ));
    }

    #[test]
    fn orders_allowed_for_non_condemned_statuses() {
        let client = Client::new("Anna");
        let mut mechanic = Mechanic::new("Ivan", FixedResolver(RepairOutcome::Fixed));
        let mut sink = RecordingSink::new();

        for status in [
            VehicleStatus::Waiting,
            VehicleStatus::Repairing,
            VehicleStatus::Fixed,
        ] {
            let mut car = Vehicle::new("VIN0001", "Toyota").unwrap();
            if status != VehicleStatus::Waiting {
                car.transition(status);
            }
            let order = create_order(&client, &mut car, &mut mechanic, &mut sink).unwrap();
            assert_eq!(order.vehicle.status(), status);
            assert_eq!(order.client.name, "Anna");
        }
    }

    #[test]
    fn unexpected_error_propagates_after_final_status() {
        let client = Client::new("Anna");
        let mut car = Vehicle::new("VIN0001", "Toyota").unwrap();
        let mut actor = BrokenActor;
        let mut sink = RecordingSink::new();

        let order = create_order(&client, &mut car, &mut actor, &mut sink).unwrap();
        let err = order.process(&mut sink).unwrap_err();

        assert_eq!(err, ShopError::InvalidVin(String::new()));
        assert_eq!(final_reports(&sink), 1);
        assert_eq!(sink.count(|e| matches!(e, ShopEvent::DomainError { .. })), 0);
    }

    #[test]
    fn report_serializes_statuses() {
        let client = Client::new("Anna");
        let mut car = Vehicle::new("VIN0001", "Toyota").unwrap();
        let mut mechanic = Mechanic::new("Ivan", FixedResolver(RepairOutcome::Fixed));
        let mut sink = RecordingSink::new();

        let report = create_order(&client, &mut car, &mut mechanic, &mut sink)
            .unwrap()
            .process(&mut sink)
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["final_status"], "FIXED");
        assert_eq!(json["status_history"][0], "WAITING");
        assert!(report.duration_ms >= 0);
    }
}
