use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::domain::{SlotId, SlotType, Ticket, TicketId};

static REGISTRY: OnceLock<TicketRegistry> = OnceLock::new();

/// Process-wide authority over ticket existence. Nothing else stores tickets.
#[derive(Debug)]
pub struct TicketRegistry {
    tickets: Mutex<HashMap<TicketId, Ticket>>,
}

/// Error raised when a ticket is not (or no longer) registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketError {
    #[error("ticket {0} not found")]
    NotFound(TicketId),
}

impl TicketRegistry {
    /// The one registry, built on first access.
    pub fn instance() -> &'static TicketRegistry {
        REGISTRY.get_or_init(Self::new)
    }

    fn new() -> Self {
        Self {
            tickets: Mutex::new(HashMap::new()),
        }
    }

    pub fn create_ticket(
        &self,
        vehicle_id: &str,
        slot_id: &SlotId,
        slot_type: SlotType,
        issued_at: DateTime<Utc>,
    ) -> Ticket {
        let ticket = Ticket {
            id: TicketId::generate(),
            vehicle_id: vehicle_id.to_string(),
            slot_id: slot_id.clone(),
            slot_type,
            issued_at,
        };

        let mut guard = self.tickets.lock().expect("ticket registry mutex poisoned");
        guard.insert(ticket.id.clone(), ticket.clone());
        debug!(ticket = %ticket.id, slot = %ticket.slot_id, "ticket issued");
        ticket
    }

    /// Remove the ticket, returning the registry's copy. Invalidating a ticket
    /// twice fails the second time, as does presenting a ticket whose fields
    /// differ from what was issued under that id.
    pub fn invalidate_ticket(&self, ticket: &Ticket) -> Result<Ticket, TicketError> {
        let mut guard = self.tickets.lock().expect("ticket registry mutex poisoned");
        match guard.get(&ticket.id) {
            Some(stored) if stored == ticket => {}
            _ => return Err(TicketError::NotFound(ticket.id.clone())),
        }
        guard
            .remove(&ticket.id)
            .ok_or_else(|| TicketError::NotFound(ticket.id.clone()))
    }

    pub fn get(&self, id: &TicketId) -> Option<Ticket> {
        let guard = self.tickets.lock().expect("ticket registry mutex poisoned");
        guard.get(id).cloned()
    }

    pub fn active_count(&self) -> usize {
        self.tickets
            .lock()
            .expect("ticket registry mutex poisoned")
            .len()
    }
}
