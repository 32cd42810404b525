//! Slot allocation, ticketing and pricing for a multi-floor parking lot.
//!
//! [`ParkingSystem`] is the entry point: it owns the registered floors, books
//! vehicles first-fit across them and prices each stay with the active
//! [`ChargeStrategy`] on the way out. Tickets live in the process-wide
//! [`TicketRegistry`].

pub mod charge;
pub mod domain;
pub mod floor;
pub mod slot;
pub mod system;
pub mod tickets;

#[cfg(test)]
mod tests;

pub use charge::{ChargeStrategy, DynamicChargeStrategy, FixedChargeStrategy};
pub use domain::{FloorId, SlotId, SlotState, SlotType, SystemId, Ticket, TicketId};
pub use floor::ParkingFloor;
pub use slot::ParkingSlot;
pub use system::ParkingSystem;
pub use tickets::{TicketError, TicketRegistry};
