use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ShopError;
use crate::shop::{
    Client, EventSink, OrderReport, RepairActor, Roster, Vehicle, VehicleStatus, create_order,
};

/// What happened to one client's request.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RequestOutcome {
    Completed(OrderReport),
    Rejected { client: String, reason: String },
}

/// Mixed into the seed of the pairing generator so it never shares a
/// stream with the mechanics' resolvers.
const PAIRING_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// Pairs clients with vehicles and mechanics and drives each work order to completion.
pub struct Workshop {
    pub roster: Roster,
    rng: StdRng,
}

impl Workshop {
    pub fn new(roster: Roster, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ PAIRING_STREAM),
            None => StdRng::from_os_rng(),
        };
        Self { roster, rng }
    }

    /// Give every client one repair request on a random vehicle with a random mechanic.
    ///
    /// Domain failures are recorded and the loop moves on to the next client.
    /// Anything else aborts the run.
    pub fn run(&mut self, sink: &mut dyn EventSink) -> Result<Vec<RequestOutcome>, ShopError> {
        let Roster {
            clients,
            mechanics,
            vehicles,
        } = &mut self.roster;
        if mechanics.is_empty() || vehicles.is_empty() {
            return Err(ShopError::Config("roster has no mechanics or vehicles".into()));
        }

        let mut outcomes = Vec::with_capacity(clients.len());
        for client in clients.iter() {
            let vi = self.rng.random_range(0..vehicles.len());
            let mi = self.rng.random_range(0..mechanics.len());
            debug!(client = %client.name, vehicle = vi, mechanic = mi, "assigned request");

            let outcome = submit(client, &mut vehicles[vi], &mut *mechanics[mi], sink)?;
            outcomes.push(outcome);
        }

        info!(
            requests = outcomes.len(),
            fixed = count_status(&outcomes, VehicleStatus::Fixed),
            condemned = count_status(&outcomes, VehicleStatus::CannotFix),
            "workshop run finished"
        );
        Ok(outcomes)
    }

    /// Handle a single request for the vehicle with `vin`.
    ///
    /// A vehicle already on the roster keeps its status; an unknown VIN
    /// is added as a new waiting vehicle. Without a mechanic name one is
    /// picked at random.
    pub fn repair_one(
        &mut self,
        client: &Client,
        vin: &str,
        model: &str,
        mechanic: Option<&str>,
        sink: &mut dyn EventSink,
    ) -> Result<RequestOutcome, ShopError> {
        let incoming = Vehicle::new(vin, model)?;
        let known = self.roster.vehicles.iter().position(|v| *v == incoming);
        let vi = match known {
            Some(i) => i,
            None => {
                self.roster.vehicles.push(incoming);
                self.roster.vehicles.len() - 1
            }
        };

        let mi = match mechanic {
            Some(name) => self
                .roster
                .mechanics
                .iter()
                .position(|m| m.name() == name)
                .ok_or_else(|| ShopError::Config(format!("unknown mechanic: {name}")))?,
            None if self.roster.mechanics.is_empty() => {
                return Err(ShopError::Config("roster has no mechanics".into()));
            }
            None => self.rng.random_range(0..self.roster.mechanics.len()),
        };

        submit(
            client,
            &mut self.roster.vehicles[vi],
            &mut *self.roster.mechanics[mi],
            sink,
        )
    }
}

fn submit(
    client: &Client,
    vehicle: &mut Vehicle,
    mechanic: &mut dyn RepairActor,
    sink: &mut dyn EventSink,
) -> Result<RequestOutcome, ShopError> {
    match create_order(client, vehicle, mechanic, sink) {
        Ok(order) => Ok(RequestOutcome::Completed(order.process(sink)?)),
        Err(err) if err.is_domain_outcome() => Ok(RequestOutcome::Rejected {
            client: client.name.clone(),
            reason: err.to_string(),
        }),
        Err(err) => Err(err),
    }
}

fn count_status(outcomes: &[RequestOutcome], status: VehicleStatus) -> usize {
    outcomes
        .iter()
        .filter(|o| matches!(o, RequestOutcome::Completed(r) if r.final_status == status))
        .count()
}
