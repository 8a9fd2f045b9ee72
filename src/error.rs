use thiserror::Error;

use crate::shop::VehicleStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("vehicle {model} cannot be repaired")]
    VehicleUnrepairable { model: String },

    #[error("vehicle {model} is beyond repair")]
    CannotRepair { model: String },

    #[error("repair of {model} ended with status {status}")]
    RepairIncomplete { model: String, status: VehicleStatus },

    #[error("invalid VIN: {0:?}")]
    InvalidVin(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl ShopError {
    /// Expected outcomes of the repair workflow. The driver keeps going after
    /// these; everything else is a precondition violation.
    pub fn is_domain_outcome(&self) -> bool {
        matches!(
            self,
            ShopError::VehicleUnrepairable { .. } | ShopError::CannotRepair { .. }
        )
    }
}
