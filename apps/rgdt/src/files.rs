//! Scenario files on disk: `<name>.xml` holds the road network and
//! `<name>.json` holds bots, packages and an optional config override.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use rgdt_core::SimConfig;
use rgdt_fleet::{Fleet, load_fleet_json};
use rgdt_spatial::RoadNetwork;
use rgdt_spatial::xml::load_network_xml;

/// Everything needed to build a `Sim`.
#[derive(Debug)]
pub struct LoadedScenario {
    pub config:  SimConfig,
    pub network: RoadNetwork,
    pub fleet:   Fleet,
}

/// `base` with `ext` appended, keeping any dots already in the name.
pub fn sibling(base: &Path, ext: &str) -> PathBuf {
    let mut s: OsString = base.as_os_str().to_owned();
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

/// Load `<base>.json` then `<base>.xml`.
///
/// The fleet file is read first because its config sets the bot speed the
/// way costs are derived from.
pub fn load(base: &Path) -> Result<LoadedScenario> {
    let json = sibling(base, "json");
    let xml  = sibling(base, "xml");
    for path in [&xml, &json] {
        if !path.exists() {
            bail!("scenario {} has no {} file", base.display(), path.display());
        }
    }

    let fleet = load_fleet_json(&json).with_context(|| format!("loading {}", json.display()))?;
    let config = fleet.config_or(SimConfig::default());
    config.validate()?;

    let network = load_network_xml(&xml, config.bot_speed_kmph)
        .with_context(|| format!("loading {}", xml.display()))?;

    Ok(LoadedScenario { config, network, fleet })
}
