// SPDX-License-Identifier: MIT OR Apache-2.0
//! Identifiers for nodes, ports and connections.
//!
//! Every identifier is a random v4 UUID written to documents as its hyphenated
//! string (the `sID` fields).

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! scene_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

scene_id! {
    /// Unique identifier for a node
    NodeId
}

scene_id! {
    /// Unique identifier for a port
    PortId
}

scene_id! {
    /// Unique identifier for a connection
    ConnectionId
}

/// Correlation id shared by a node and all of its ports (`nodeInstanceID`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Exclusive upper bound of generated instance ids
    pub const RANGE: u32 = 1_000_000;

    /// Draw a random instance id in `0..RANGE`
    pub fn random() -> Self {
        Self(rand::random_range(0..Self::RANGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(NodeId::new(), NodeId::new());
        assert_ne!(PortId::new(), PortId::new());
    }

    #[test]
    fn test_id_serializes_as_string() {
        let id = ConnectionId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }

    #[test]
    fn test_instance_id_range() {
        for _ in 0..100 {
            assert!(InstanceId::random().0 < InstanceId::RANGE);
        }
    }
}
