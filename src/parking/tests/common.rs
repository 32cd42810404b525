use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::parking::domain::{SlotId, SlotType, Ticket, TicketId};
use crate::parking::floor::ParkingFloor;
use crate::parking::slot::ParkingSlot;

pub(super) fn issued_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 2, 10, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn hours_after(start: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
    start + Duration::hours(hours)
}

/// Floor populated in the given order, returning the slot ids alongside it.
pub(super) fn floor_with(layout: &[SlotType]) -> (ParkingFloor, Vec<SlotId>) {
    let floor = ParkingFloor::new();
    let ids = layout
        .iter()
        .map(|slot_type| floor.add_slot(ParkingSlot::new(*slot_type)))
        .collect();
    (floor, ids)
}

/// A ticket that was never registered anywhere.
pub(super) fn detached_ticket(slot_type: SlotType, issued_at: DateTime<Utc>) -> Ticket {
    Ticket {
        id: TicketId("ticket-detached".to_string()),
        vehicle_id: "KL07XX0000".to_string(),
        slot_id: SlotId("slot-detached".to_string()),
        slot_type,
        issued_at,
    }
}
