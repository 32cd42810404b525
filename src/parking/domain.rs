use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

static SLOT_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static FLOOR_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static TICKET_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static SYSTEM_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_id(sequence: &AtomicU64, prefix: &str) -> String {
    let id = sequence.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id:06}")
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $sequence:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub(crate) fn generate() -> Self {
                Self(next_id(&$sequence, $prefix))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier!(
    /// Identifier of a single parking bay.
    SlotId,
    SLOT_SEQUENCE,
    "slot"
);
identifier!(
    /// Identifier of a floor.
    FloorId,
    FLOOR_SEQUENCE,
    "floor"
);
identifier!(
    /// Identifier minted by the ticket registry.
    TicketId,
    TICKET_SEQUENCE,
    "ticket"
);
identifier!(SystemId, SYSTEM_SEQUENCE, "lot");

/// Size class of a slot, and of the vehicle asking for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotType {
    Small,
    Medium,
    Large,
}

impl SlotType {
    pub const ALL: [SlotType; 3] = [SlotType::Small, SlotType::Medium, SlotType::Large];

    pub fn label(self) -> &'static str {
        match self {
            SlotType::Small => "small",
            SlotType::Medium => "medium",
            SlotType::Large => "large",
        }
    }
}

/// Occupancy of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotState {
    Empty,
    Filled,
}

impl SlotState {
    pub fn label(self) -> &'static str {
        match self {
            SlotState::Empty => "empty",
            SlotState::Filled => "filled",
        }
    }
}

/// Proof of an active assignment. The slot type is copied at issue time so
/// pricing never has to reach back into the floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub vehicle_id: String,
    pub slot_id: SlotId,
    pub slot_type: SlotType,
    pub issued_at: DateTime<Utc>,
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id: {}, vehicle: {} issued at {}",
            self.id,
            self.vehicle_id,
            self.issued_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}
