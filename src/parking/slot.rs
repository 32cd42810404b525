use super::domain::{SlotId, SlotState, SlotType, TicketId};

/// A single physical bay. Its state is only ever changed by the owning
/// [`ParkingFloor`](super::ParkingFloor) while it holds the floor lock.
///
/// A filled slot remembers the ticket it was booked under, if any, so a
/// ticket can only release the booking it was issued for.
#[derive(Debug)]
pub struct ParkingSlot {
    id: SlotId,
    slot_type: SlotType,
    state: SlotState,
    occupant: Option<TicketId>,
}

impl ParkingSlot {
    pub fn new(slot_type: SlotType) -> Self {
        Self {
            id: SlotId::generate(),
            slot_type,
            state: SlotState::Empty,
            occupant: None,
        }
    }

    pub fn id(&self) -> &SlotId {
        &self.id
    }

    pub fn get_type(&self) -> SlotType {
        self.slot_type
    }

    pub fn get_state(&self) -> SlotState {
        self.state
    }

    /// Emptying a slot also forgets its occupant.
    pub fn set_state(&mut self, state: SlotState) {
        self.state = state;
        if state == SlotState::Empty {
            self.occupant = None;
        }
    }

    pub fn occupant(&self) -> Option<&TicketId> {
        self.occupant.as_ref()
    }

    pub(crate) fn occupy(&mut self, ticket_id: TicketId) {
        self.state = SlotState::Filled;
        self.occupant = Some(ticket_id);
    }

    pub fn is_free_for(&self, slot_type: SlotType) -> bool {
        self.slot_type == slot_type && self.state == SlotState::Empty
    }
}
