use std::sync::{Arc, Mutex, OnceLock, RwLock};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::{debug, warn};

use super::charge::{ChargeStrategy, FixedChargeStrategy};
use super::domain::{FloorId, SlotId, SlotState, SlotType, SystemId, Ticket};
use super::floor::ParkingFloor;
use super::tickets::TicketRegistry;
use crate::error::ParkingError;
use crate::logger::logger;

static SYSTEM: OnceLock<ParkingSystem> = OnceLock::new();

/// Process-wide coordinator owning every registered floor and the active
/// charge policy.
///
/// Parking holds `booking` for the whole scan across floors, so concurrent
/// callers can never race for the same slot. Unparking does not take it:
/// the ticket registry decides which caller wins a given ticket and the
/// owning floor's lock covers the slot release.
pub struct ParkingSystem {
    id: SystemId,
    floors: RwLock<IndexMap<FloorId, ParkingFloor>>,
    charge_strategy: RwLock<Arc<dyn ChargeStrategy>>,
    booking: Mutex<()>,
}

impl ParkingSystem {
    /// The one parking system, built on first access. Starts with a fixed
    /// hourly rate of 20.
    pub fn instance() -> &'static ParkingSystem {
        SYSTEM.get_or_init(Self::new)
    }

    /// Detached instance for this module's own tests; everything else goes
    /// through [`ParkingSystem::instance`].
    pub(super) fn new() -> Self {
        Self {
            id: SystemId::generate(),
            floors: RwLock::new(IndexMap::new()),
            charge_strategy: RwLock::new(Arc::new(FixedChargeStrategy::default())),
            booking: Mutex::new(()),
        }
    }

    pub fn id(&self) -> &SystemId {
        &self.id
    }

    /// Take ownership of a floor. Floors are scanned in registration order.
    pub fn add_floor(&self, floor: ParkingFloor) -> FloorId {
        let floor_id = floor.id().clone();
        let mut guard = self.floors.write().expect("floor map lock poisoned");
        assert!(
            !guard.contains_key(&floor_id),
            "floor {floor_id} registered twice"
        );
        debug!(
            system = %self.id,
            floor = %floor_id,
            slots = floor.slot_count(),
            "floor registered"
        );
        guard.insert(floor_id.clone(), floor);
        floor_id
    }

    /// Swap the pricing policy. Applies to every later unpark, including
    /// tickets issued before the swap.
    pub fn set_charge_strategy(&self, strategy: Arc<dyn ChargeStrategy>) {
        let mut guard = self
            .charge_strategy
            .write()
            .expect("charge strategy lock poisoned");
        debug!(from = guard.name(), to = strategy.name(), "charge strategy replaced");
        *guard = strategy;
    }

    pub fn charge_strategy_name(&self) -> &'static str {
        self.charge_strategy
            .read()
            .expect("charge strategy lock poisoned")
            .name()
    }

    pub fn park_vehicle(
        &self,
        slot_type: SlotType,
        vehicle_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Ticket, ParkingError> {
        let booked = {
            let _booking = self.booking.lock().expect("booking mutex poisoned");
            let floors = self.floors.read().expect("floor map lock poisoned");
            floors
                .values()
                .find_map(|floor| floor.book_slot(slot_type, vehicle_id, now))
        };

        booked.ok_or_else(|| {
            logger().log(&format!(
                "No {} slot available for vehicle {vehicle_id}",
                slot_type.label()
            ));
            ParkingError::SlotUnavailable { slot_type }
        })
    }

    /// Release the ticket's slot and return the fee owed at `now`.
    pub fn unpark_vehicle(
        &self,
        ticket: &Ticket,
        now: DateTime<Utc>,
    ) -> Result<f64, ParkingError> {
        let issued = match self.redeem(ticket) {
            Ok(issued) => issued,
            Err(reason) => {
                logger().log(&format!("Invalid ticket {}: {reason}", ticket.id));
                return Err(ParkingError::InvalidTicket {
                    ticket_id: ticket.id.clone(),
                });
            }
        };
        logger().log(&format!("Successfully released slot {}", issued.slot_id));

        let strategy = Arc::clone(
            &self
                .charge_strategy
                .read()
                .expect("charge strategy lock poisoned"),
        );
        Ok(strategy.calculate_charge(&issued, now))
    }

    /// Invalidate the ticket and empty its slot. The registry picks a single
    /// winner per ticket; the slot is only emptied while it is still held
    /// under that ticket.
    fn redeem(&self, ticket: &Ticket) -> Result<Ticket, String> {
        let floors = self.floors.read().expect("floor map lock poisoned");
        let floor = floors
            .values()
            .find(|floor| floor.contains_slot(&ticket.slot_id))
            .ok_or_else(|| format!("slot {} is not on any floor", ticket.slot_id))?;

        let issued = TicketRegistry::instance()
            .invalidate_ticket(ticket)
            .map_err(|err| err.to_string())?;

        if !floor.release_slot_for(&issued.slot_id, &issued.id) {
            warn!(
                ticket = %issued.id,
                slot = %issued.slot_id,
                "slot is no longer held under this ticket"
            );
            return Err(format!("slot {} is no longer held under it", issued.slot_id));
        }
        Ok(issued)
    }

    pub fn floor_count(&self) -> usize {
        self.floors.read().expect("floor map lock poisoned").len()
    }

    /// Empty slots of `slot_type` across all floors.
    pub fn available_slots(&self, slot_type: SlotType) -> usize {
        self.floors
            .read()
            .expect("floor map lock poisoned")
            .values()
            .map(|floor| floor.available_slots(slot_type))
            .sum()
    }

    pub fn slot_state(&self, slot_id: &SlotId) -> Option<SlotState> {
        self.floors
            .read()
            .expect("floor map lock poisoned")
            .values()
            .find_map(|floor| floor.slot_state(slot_id))
    }
}
