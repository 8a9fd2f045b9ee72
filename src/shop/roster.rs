use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::ShopConfig;
use crate::error::ShopError;

use super::actor::{Client, Mechanic, RepairActor};
use super::resolver::RandomResolver;
use super::vehicle::{Vehicle, VehicleStatus};

/// The people and cars a workshop run starts with.
pub struct Roster {
    pub clients: Vec<Client>,
    pub mechanics: Vec<Box<dyn RepairActor>>,
    pub vehicles: Vec<Vehicle>,
}

impl Roster {
    /// Build the roster described by `config`.
    ///
    /// With a configured seed, every mechanic gets its own generator drawn
    /// from a master `StdRng`; without one, each draws from OS entropy.
    /// Vehicles marked `condemned` start out as `CannotFix`.
    pub fn from_config(config: &ShopConfig) -> Result<Self, ShopError> {
        if config.clients.is_empty() {
            return Err(ShopError::Config("at least one client is required".into()));
        }
        if config.mechanics.is_empty() {
            return Err(ShopError::Config("at least one mechanic is required".into()));
        }
        if config.vehicles.is_empty() {
            return Err(ShopError::Config("at least one vehicle is required".into()));
        }

        let clients = config.clients.iter().map(Client::new).collect();

        let mut master = config.seed.map(StdRng::seed_from_u64);
        let mechanics = config
            .mechanics
            .iter()
            .map(|name| {
                let resolver = match master.as_mut() {
                    Some(master) => RandomResolver::with_rng(StdRng::from_rng(master)),
                    None => RandomResolver::from_entropy(),
                };
                Box::new(Mechanic::new(name, resolver)) as Box<dyn RepairActor>
            })
            .collect();

        let mut seen = HashSet::new();
        let mut vehicles = Vec::with_capacity(config.vehicles.len());
        for entry in &config.vehicles {
            let mut vehicle = Vehicle::new(&entry.vin, &entry.model)?;
            if !seen.insert(vehicle.vin().clone()) {
                return Err(ShopError::Config(format!(
                    "duplicate VIN: {}",
                    vehicle.vin()
                )));
            }
            if entry.condemned {
                vehicle.transition(VehicleStatus::CannotFix);
            }
            vehicles.push(vehicle);
        }

        Ok(Self {
            clients,
            mechanics,
            vehicles,
        })
    }
}
