//! Package lifecycle.
//!
//! ```text
//! Unmoved ──claim──▶ Claimed ──pick_up──▶ PickedUp ──deliver──▶ Delivered
//!    └──────────────pick_up─────────────────▲
//! ```
//!
//! States are ordered and transitions only ever move forward.  A package
//! never leaves the scenario; delivered packages stay in the list for the
//! final accounting.

use rgdt_core::{BotId, NodeId, PackageId};

use crate::{FleetError, FleetResult};

/// Where a package is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PackageState {
    /// Waiting at its source, not reserved by anyone.
    Unmoved,
    /// Waiting at its source, reserved by the bot in `claimed_by`.
    Claimed,
    /// On board the bot in `claimed_by`.
    PickedUp,
    /// Dropped at its destination.  Terminal.
    Delivered,
}

impl PackageState {
    pub fn as_str(self) -> &'static str {
        match self {
            PackageState::Unmoved   => "unmoved",
            PackageState::Claimed   => "claimed",
            PackageState::PickedUp  => "picked_up",
            PackageState::Delivered => "delivered",
        }
    }
}

impl std::fmt::Display for PackageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A delivery job from `source` to `destination`.
#[derive(Clone, Debug, PartialEq)]
pub struct Package {
    pub id:          PackageId,
    pub source:      NodeId,
    pub destination: NodeId,
    pub state:       PackageState,
    /// The bot that claimed (and later carries) this package.
    pub claimed_by:  Option<BotId>,
}

impl Package {
    /// A fresh, unclaimed package.
    pub fn new(id: PackageId, source: NodeId, destination: NodeId) -> Self {
        Self { id, source, destination, state: PackageState::Unmoved, claimed_by: None }
    }

    #[inline]
    pub fn is_delivered(&self) -> bool {
        self.state == PackageState::Delivered
    }

    /// `true` if `bot` may still go and collect this package: it is either
    /// unclaimed or already claimed by `bot`.
    #[inline]
    pub fn is_available_to(&self, bot: BotId) -> bool {
        match self.state {
            PackageState::Unmoved => true,
            PackageState::Claimed => self.claimed_by == Some(bot),
            _ => false,
        }
    }

    /// `true` if `bot` has this package on board.
    #[inline]
    pub fn is_carried_by(&self, bot: BotId) -> bool {
        self.state == PackageState::PickedUp && self.claimed_by == Some(bot)
    }

    /// Reserve an unmoved package for `bot`.
    pub fn claim(&mut self, bot: BotId) -> FleetResult<()> {
        if self.state != PackageState::Unmoved {
            return Err(self.illegal(bot, PackageState::Claimed));
        }
        self.state = PackageState::Claimed;
        self.claimed_by = Some(bot);
        Ok(())
    }

    /// Load onto `bot`.  Allowed from `Unmoved`, or from `Claimed` by `bot`.
    pub fn pick_up(&mut self, bot: BotId) -> FleetResult<()> {
        if !self.is_available_to(bot) {
            return Err(self.illegal(bot, PackageState::PickedUp));
        }
        self.state = PackageState::PickedUp;
        self.claimed_by = Some(bot);
        Ok(())
    }

    /// Drop off at the destination.  Only the carrying bot may deliver.
    pub fn deliver(&mut self, bot: BotId) -> FleetResult<()> {
        if !self.is_carried_by(bot) {
            return Err(self.illegal(bot, PackageState::Delivered));
        }
        self.state = PackageState::Delivered;
        Ok(())
    }

    fn illegal(&self, bot: BotId, to: PackageState) -> FleetError {
        FleetError::IllegalTransition { package: self.id, bot, from: self.state, to }
    }
}
