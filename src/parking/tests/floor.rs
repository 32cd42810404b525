use super::common::*;
use crate::parking::domain::{SlotId, SlotState, SlotType};
use crate::parking::slot::ParkingSlot;
use crate::parking::tickets::TicketRegistry;

#[test]
fn booking_fills_first_matching_slot_and_issues_ticket() {
    let (floor, ids) = floor_with(&[SlotType::Small, SlotType::Medium, SlotType::Medium]);

    let ticket = floor
        .book_slot(SlotType::Medium, "AP27PEK9409", issued_at())
        .expect("medium slot available");

    assert_eq!(ticket.slot_id, ids[1]);
    assert_eq!(ticket.slot_type, SlotType::Medium);
    assert_eq!(ticket.vehicle_id, "AP27PEK9409");
    assert_eq!(floor.slot_state(&ids[1]), Some(SlotState::Filled));
    assert_eq!(floor.slot_state(&ids[2]), Some(SlotState::Empty));
    assert_eq!(floor.slot_state(&ids[0]), Some(SlotState::Empty));
    assert_eq!(
        TicketRegistry::instance().get(&ticket.id),
        Some(ticket.clone())
    );
}

#[test]
fn booking_moves_on_to_next_free_slot() {
    let (floor, ids) = floor_with(&[SlotType::Large, SlotType::Large]);

    let first = floor
        .book_slot(SlotType::Large, "A", issued_at())
        .expect("first large");
    let second = floor
        .book_slot(SlotType::Large, "B", issued_at())
        .expect("second large");

    assert_eq!(first.slot_id, ids[0]);
    assert_eq!(second.slot_id, ids[1]);
    assert_ne!(first.id, second.id);
}

#[test]
fn full_floor_returns_none_and_changes_nothing() {
    let (floor, ids) = floor_with(&[SlotType::Small]);
    floor
        .book_slot(SlotType::Small, "A", issued_at())
        .expect("only slot");

    assert!(floor.book_slot(SlotType::Small, "B", issued_at()).is_none());
    assert!(floor.book_slot(SlotType::Large, "C", issued_at()).is_none());
    assert_eq!(floor.slot_state(&ids[0]), Some(SlotState::Filled));
    assert_eq!(floor.available_slots(SlotType::Small), 0);
}

#[test]
fn release_returns_slot_to_empty_once() {
    let (floor, ids) = floor_with(&[SlotType::Medium]);
    floor
        .book_slot(SlotType::Medium, "A", issued_at())
        .expect("slot available");

    assert!(floor.release_slot(&ids[0]));
    assert_eq!(floor.slot_state(&ids[0]), Some(SlotState::Empty));
    assert!(
        !floor.release_slot(&ids[0]),
        "releasing an empty slot must not succeed"
    );
}

#[test]
fn release_of_foreign_slot_is_false() {
    let (floor, _) = floor_with(&[SlotType::Medium]);

    assert!(!floor.release_slot(&SlotId("slot-elsewhere".to_string())));
}

#[test]
fn released_slot_is_reused() {
    let (floor, ids) = floor_with(&[SlotType::Small]);
    let first = floor
        .book_slot(SlotType::Small, "A", issued_at())
        .expect("slot available");
    assert!(floor.release_slot(&first.slot_id));

    let second = floor
        .book_slot(SlotType::Small, "B", issued_at())
        .expect("slot free again");

    assert_eq!(second.slot_id, ids[0]);
    assert_ne!(second.id, first.id);
}

#[test]
fn counts_reflect_layout() {
    let (floor, ids) = floor_with(&[SlotType::Small, SlotType::Small, SlotType::Large]);

    assert_eq!(floor.slot_count(), 3);
    assert_eq!(floor.available_slots(SlotType::Small), 2);
    assert_eq!(floor.available_slots(SlotType::Medium), 0);
    assert!(floor.contains_slot(&ids[2]));
}

#[test]
fn floors_get_distinct_ids() {
    let (first, _) = floor_with(&[]);
    let (second, _) = floor_with(&[]);

    assert_ne!(first.id(), second.id());
}

#[test]
fn slot_added_after_creation_is_bookable() {
    let (floor, _) = floor_with(&[]);
    let slot_id = floor.add_slot(ParkingSlot::new(SlotType::Large));

    let ticket = floor
        .book_slot(SlotType::Large, "A", issued_at())
        .expect("new slot available");
    assert_eq!(ticket.slot_id, slot_id);
}

#[test]
fn release_for_ticket_requires_current_occupant() {
    let (floor, ids) = floor_with(&[SlotType::Medium]);
    let first = floor
        .book_slot(SlotType::Medium, "A", issued_at())
        .expect("slot available");
    assert!(floor.release_slot(&ids[0]));
    let second = floor
        .book_slot(SlotType::Medium, "B", issued_at())
        .expect("slot free again");

    assert!(!floor.release_slot_for(&ids[0], &first.id));
    assert_eq!(floor.slot_state(&ids[0]), Some(SlotState::Filled));

    assert!(floor.release_slot_for(&ids[0], &second.id));
    assert_eq!(floor.slot_state(&ids[0]), Some(SlotState::Empty));
    assert!(!floor.release_slot_for(&ids[0], &second.id));
}
