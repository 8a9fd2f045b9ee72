mod actor;
mod events;
mod order;
mod resolver;
mod roster;
mod vehicle;

pub use actor::{Client, RepairActor};
#[cfg(test)]
pub use actor::Mechanic;
#[cfg(test)]
pub use events::RecordingSink;
pub use events::{EventSink, ShopEvent, TracingSink};
pub use order::{OrderReport, create_order};
pub use roster::Roster;
pub use vehicle::{Vehicle, VehicleStatus};
#[cfg(test)]
pub use resolver::{FixedResolver, RepairOutcome};
