//! Shop configuration loaded from `repair-shop.toml`.
//!
//! [`ShopConfig`] holds the sample roster and the optional random seed.
//! Fields missing from the file fall back to the built-in sample shop.
//! The `REPAIR_SHOP_SEED` environment variable takes precedence over the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILE: &str = "repair-shop.toml";
pub const SEED_ENV: &str = "REPAIR_SHOP_SEED";

/// Top-level configuration loaded from `repair-shop.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopConfig {
    /// Seed for every random source. Unset means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_clients")]
    pub clients: Vec<String>,

    #[serde(default = "default_mechanics")]
    pub mechanics: Vec<String>,

    #[serde(default = "default_vehicles")]
    pub vehicles: Vec<VehicleEntry>,
}

/// A vehicle as listed in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VehicleEntry {
    pub vin: String,
    pub model: String,
    /// Already written off before the run starts.
    #[serde(default)]
    pub condemned: bool,
}

impl VehicleEntry {
    pub fn new(vin: &str, model: &str) -> Self {
        Self {
            vin: vin.to_string(),
            model: model.to_string(),
            condemned: false,
        }
    }
}

fn default_clients() -> Vec<String> {
    ["Анна", "Борис", "Виктория"].map(String::from).to_vec()
}

fn default_mechanics() -> Vec<String> {
    ["Иван", "Олег"].map(String::from).to_vec()
}

fn default_vehicles() -> Vec<VehicleEntry> {
    vec![
        VehicleEntry::new("VIN0001", "Toyota"),
        VehicleEntry::new("VIN0002", "Ford"),
        VehicleEntry {
            condemned: true,
            ..VehicleEntry::new("VIN0003", "Lada")
        },
    ]
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            seed: None,
            clients: default_clients(),
            mechanics: default_mechanics(),
            vehicles: default_vehicles(),
        }
    }
}

impl ShopConfig {
    /// Loads `repair-shop.toml` from the current directory.
    /// Uses defaults if the file does not exist.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(Path::new(CONFIG_FILE))?;
        config.apply_env(std::env::var(SEED_ENV).ok())?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = toml::from_str::<ShopConfig>(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    fn apply_env(&mut self, seed: Option<String>) -> Result<()> {
        if let Some(raw) = seed
            && !raw.trim().is_empty()
        {
            let seed = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{SEED_ENV} must be an unsigned integer, got {raw:?}"))?;
            self.seed = Some(seed);
        }
        Ok(())
    }
}
