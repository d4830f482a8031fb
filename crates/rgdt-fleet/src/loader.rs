//! JSON fleet loader.
//!
//! # Format
//!
//! ```json
//! {
//!   "bots":     [ { "location": 1, "capacity": 2 } ],
//!   "packages": [ { "source": 1, "destination": 3 } ],
//!   "config":   { "bot_speed_kmph": 40.0 }
//! }
//! ```
//!
//! Bot and package ids are assigned from 0 in list order.  `"config"` is
//! optional, and any field missing from it keeps its default.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use rgdt_core::{BotId, NodeId, PackageId, SimConfig};

use crate::{Bot, FleetError, FleetResult, Package};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FleetFile {
    bots:     Vec<BotRecord>,
    packages: Vec<PackageRecord>,
    #[serde(default)]
    config:   Option<SimConfig>,
}

#[derive(Debug, Deserialize)]
struct BotRecord {
    location: NodeId,
    capacity: u32,
}

#[derive(Debug, Deserialize)]
struct PackageRecord {
    source:      NodeId,
    destination: NodeId,
}

/// Initial bots and packages, with an optional configuration override.
#[derive(Clone, Debug, PartialEq)]
pub struct Fleet {
    pub bots:     Vec<Bot>,
    pub packages: Vec<Package>,
    pub config:   Option<SimConfig>,
}

impl Fleet {
    /// The file's configuration if it has one, otherwise `fallback`.
    pub fn config_or(&self, fallback: SimConfig) -> SimConfig {
        self.config.clone().unwrap_or(fallback)
    }
}

/// Load a fleet description from a JSON file.
pub fn load_fleet_json(path: &Path) -> FleetResult<Fleet> {
    let file = File::open(path)?;
    load_fleet_reader(BufReader::new(file))
}

/// Load a fleet description from any reader.
pub fn load_fleet_reader<R: Read>(reader: R) -> FleetResult<Fleet> {
    let raw: FleetFile = serde_json::from_reader(reader).map_err(parse_err)?;
    into_fleet(raw)
}

/// Load a fleet description from an in-memory JSON string.
pub fn load_fleet_str(json: &str) -> FleetResult<Fleet> {
    let raw: FleetFile = serde_json::from_str(json).map_err(parse_err)?;
    into_fleet(raw)
}

fn into_fleet(raw: FleetFile) -> FleetResult<Fleet> {
    let mut bots = Vec::with_capacity(raw.bots.len());
    for (i, b) in raw.bots.into_iter().enumerate() {
        let id = BotId::try_from(i).map_err(|_| FleetError::Parse("too many bots".into()))?;
        if b.capacity == 0 {
            return Err(FleetError::Parse(format!("{id} has zero capacity")));
        }
        bots.push(Bot::new(id, b.location, b.capacity));
    }

    let mut packages = Vec::with_capacity(raw.packages.len());
    for (i, p) in raw.packages.into_iter().enumerate() {
        let id = PackageId::try_from(i).map_err(|_| FleetError::Parse("too many packages".into()))?;
        packages.push(Package::new(id, p.source, p.destination));
    }

    if let Some(cfg) = &raw.config {
        cfg.validate()?;
    }

    Ok(Fleet { bots, packages, config: raw.config })
}

fn parse_err(e: serde_json::Error) -> FleetError {
    FleetError::Parse(e.to_string())
}
