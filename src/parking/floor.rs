use std::sync::Mutex;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::debug;

use super::domain::{FloorId, SlotId, SlotState, SlotType, Ticket, TicketId};
use super::slot::ParkingSlot;
use super::tickets::TicketRegistry;
use crate::logger::logger;

/// A group of slots managed as a unit. The floor is the only writer of its
/// slots' state; the slot map keeps insertion order so first-fit is stable.
#[derive(Debug)]
pub struct ParkingFloor {
    id: FloorId,
    slots: Mutex<IndexMap<SlotId, ParkingSlot>>,
}

impl ParkingFloor {
    pub fn new() -> Self {
        Self {
            id: FloorId::generate(),
            slots: Mutex::new(IndexMap::new()),
        }
    }

    pub fn id(&self) -> &FloorId {
        &self.id
    }

    /// Register a slot. Slot ids are generated, so a collision means the
    /// caller has broken an invariant and this panics.
    pub fn add_slot(&self, slot: ParkingSlot) -> SlotId {
        let slot_id = slot.id().clone();
        let mut guard = self.slots.lock().expect("floor mutex poisoned");
        assert!(
            !guard.contains_key(&slot_id),
            "slot {slot_id} registered twice on floor {}",
            self.id
        );
        guard.insert(slot_id.clone(), slot);
        slot_id
    }

    /// First-fit booking: the earliest-added empty slot of `slot_type` is
    /// filled and a ticket minted for it.
    pub fn book_slot(
        &self,
        slot_type: SlotType,
        vehicle_id: &str,
        issued_at: DateTime<Utc>,
    ) -> Option<Ticket> {
        let booked = {
            let mut guard = self.slots.lock().expect("floor mutex poisoned");
            guard
                .values_mut()
                .find(|slot| slot.is_free_for(slot_type))
                .map(|slot| {
                    let ticket = TicketRegistry::instance().create_ticket(
                        vehicle_id,
                        slot.id(),
                        slot_type,
                        issued_at,
                    );
                    slot.occupy(ticket.id.clone());
                    ticket
                })
        };

        match &booked {
            Some(ticket) => {
                debug!(floor = %self.id, slot = %ticket.slot_id, vehicle_id, "slot booked")
            }
            None => logger().log(&format!(
                "No {} slot available on floor {}",
                slot_type.label(),
                self.id
            )),
        }
        booked
    }

    /// Empty a filled slot. Unknown ids and slots that are already empty
    /// return false, so two racing releases cannot both succeed.
    pub fn release_slot(&self, slot_id: &SlotId) -> bool {
        let mut guard = self.slots.lock().expect("floor mutex poisoned");
        match guard.get_mut(slot_id) {
            Some(slot) if slot.get_state() == SlotState::Filled => {
                slot.set_state(SlotState::Empty);
                debug!(
                    floor = %self.id,
                    slot = %slot_id,
                    state = slot.get_state().label(),
                    "slot released"
                );
                true
            }
            _ => false,
        }
    }

    /// Empty the slot only if it is still held under `ticket_id`. A ticket
    /// whose slot was released and booked again cannot empty it.
    pub fn release_slot_for(&self, slot_id: &SlotId, ticket_id: &TicketId) -> bool {
        let mut guard = self.slots.lock().expect("floor mutex poisoned");
        match guard.get_mut(slot_id) {
            Some(slot) if slot.occupant() == Some(ticket_id) => {
                slot.set_state(SlotState::Empty);
                true
            }
            _ => false,
        }
    }

    pub fn contains_slot(&self, slot_id: &SlotId) -> bool {
        self.slots
            .lock()
            .expect("floor mutex poisoned")
            .contains_key(slot_id)
    }

    pub fn slot_state(&self, slot_id: &SlotId) -> Option<SlotState> {
        self.slots
            .lock()
            .expect("floor mutex poisoned")
            .get(slot_id)
            .map(ParkingSlot::get_state)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.lock().expect("floor mutex poisoned").len()
    }

    pub fn available_slots(&self, slot_type: SlotType) -> usize {
        self.slots
            .lock()
            .expect("floor mutex poisoned")
            .values()
            .filter(|slot| slot.is_free_for(slot_type))
            .count()
    }
}

impl Default for ParkingFloor {
    fn default() -> Self {
        Self::new()
    }
}
