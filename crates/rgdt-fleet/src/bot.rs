//! Delivery bot state.

use tracing::debug;

use rgdt_core::{BotId, CoreError, NodeId, PackageId, SimConfig};

use crate::{FleetError, FleetResult, Package};

/// A delivery bot.
///
/// `carrying` never holds more than `capacity` ids; [`Bot::load`] refuses
/// to exceed it.
#[derive(Clone, Debug, PartialEq)]
pub struct Bot {
    pub id:       BotId,
    /// Node the bot currently stands on.
    pub location: NodeId,
    /// Maximum number of packages carried at once.
    pub capacity: u32,
    /// Packages on board, in pick-up order.
    pub carrying: Vec<PackageId>,
    /// Travel plus delivery handling time so far, in hours.
    pub accumulated_cost: f64,
    pub num_deliveries:   u32,
}

impl Bot {
    pub fn new(id: BotId, location: NodeId, capacity: u32) -> Self {
        Self {
            id,
            location,
            capacity,
            carrying: Vec::with_capacity(capacity as usize),
            accumulated_cost: 0.0,
            num_deliveries:   0,
        }
    }

    #[inline]
    pub fn has_capacity(&self) -> bool {
        (self.carrying.len() as u32) < self.capacity
    }

    #[inline]
    pub fn spare_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.carrying.len() as u32)
    }

    /// Put `package` on board.
    pub fn load(&mut self, package: PackageId) -> FleetResult<()> {
        if !self.has_capacity() {
            return Err(FleetError::CapacityExceeded { bot: self.id, capacity: self.capacity });
        }
        self.carrying.push(package);
        debug_assert!(self.carrying.len() as u32 <= self.capacity);
        Ok(())
    }

    /// Take `package` off board.  Returns `false` if it was not carried.
    pub fn unload(&mut self, package: PackageId) -> bool {
        match self.carrying.iter().position(|&p| p == package) {
            Some(i) => {
                self.carrying.remove(i);
                true
            }
            None => false,
        }
    }

    /// Deliver every carried package whose destination is the current node.
    ///
    /// Each delivery increments `num_deliveries` and adds the configured
    /// handling time to `accumulated_cost`.
    pub fn drop_off(&mut self, packages: &mut [Package], config: &SimConfig) -> FleetResult<Vec<PackageId>> {
        let here = self.location;
        let mut due = Vec::new();
        for &id in &self.carrying {
            if package_mut(packages, id)?.destination == here {
                due.push(id);
            }
        }

        for &id in &due {
            package_mut(packages, id)?.deliver(self.id)?;
            self.unload(id);
            self.num_deliveries += 1;
            self.accumulated_cost += config.delivery_time_hours;
            debug!(bot = %self.id, package = %id, node = %here, "delivered");
        }
        Ok(due)
    }

    /// Load every package at the current node that is unclaimed or claimed by
    /// this bot, in package order, while capacity remains.
    pub fn pick_up(&mut self, packages: &mut [Package]) -> FleetResult<Vec<PackageId>> {
        let here = self.location;
        let mut loaded = Vec::new();
        for pkg in packages.iter_mut() {
            if !self.has_capacity() {
                break;
            }
            if pkg.source == here && pkg.is_available_to(self.id) {
                pkg.pick_up(self.id)?;
                self.load(pkg.id)?;
                loaded.push(pkg.id);
                debug!(bot = %self.id, package = %pkg.id, node = %here, "picked up");
            }
        }
        Ok(loaded)
    }

    /// Final statistics for reporting.
    pub fn stats(&self, config: &SimConfig) -> BotStats {
        BotStats {
            bot:              self.id,
            location:         self.location,
            accumulated_cost: self.accumulated_cost,
            deliveries:       self.num_deliveries,
            distance_km:      config.travelled_km(self.accumulated_cost, self.num_deliveries),
        }
    }
}

/// Per-bot summary exposed to reporting layers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BotStats {
    pub bot:              BotId,
    pub location:         NodeId,
    /// Hours.
    pub accumulated_cost: f64,
    pub deliveries:       u32,
    /// `(accumulated_cost − delivery_time × deliveries) × speed`.
    pub distance_km:      f64,
}

/// Resolve a package id against the id-indexed package list.
pub(crate) fn package_mut(packages: &mut [Package], id: PackageId) -> FleetResult<&mut Package> {
    packages
        .get_mut(id.index())
        .ok_or(FleetError::Core(CoreError::PackageNotFound(id)))
}
