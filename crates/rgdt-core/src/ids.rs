//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.
//!
//! Two flavours exist:
//!
//! - **External** ids (`NodeId`, `WayId`) are whatever integer the road-network
//!   source assigned.  They are sparse and are never used as `Vec` indices.
//! - **Dense** ids (`BotId`, `PackageId`) are assigned sequentially from 0 in
//!   definition order, so `id.index()` addresses the scenario's flat `Vec`s.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> $name {
                $name(raw)
            }
        }
    };
}

/// Add `Vec`-index helpers to a typed ID whose values are assigned densely.
macro_rules! dense_id {
    ($name:ident, $inner:ty) => {
        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identifier of a road-network node, as given by the graph source.
    pub struct NodeId(u64);
}

typed_id! {
    /// Identifier of an undirected road segment ("way").
    pub struct WayId(u64);
}

typed_id! {
    /// Index of a bot in the scenario's bot list (definition order).
    pub struct BotId(u32);
}

typed_id! {
    /// Index of a package in the scenario's package list (definition order).
    pub struct PackageId(u32);
}

dense_id!(BotId, u32);
dense_id!(PackageId, u32);
