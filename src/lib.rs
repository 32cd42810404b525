//! In-process parking lot service.
//!
//! Vehicles are assigned to typed slots across registered floors, receive a
//! [`Ticket`](parking::Ticket) recording the assignment, and are charged by the
//! active [`ChargeStrategy`](parking::ChargeStrategy) when they leave.

pub mod config;
pub mod error;
pub mod logger;
pub mod parking;
pub mod telemetry;

use config::AppConfig;
use error::AppError;
use parking::ParkingSystem;
use tracing::info;

/// Install telemetry, apply the configured charge strategy and hand back the
/// process-wide [`ParkingSystem`].
pub fn bootstrap(config: &AppConfig) -> Result<&'static ParkingSystem, AppError> {
    telemetry::init(&config.telemetry)?;

    let system = ParkingSystem::instance();
    system.set_charge_strategy(config.charge.build_strategy());

    info!(
        ?config.environment,
        system = %system.id(),
        strategy = system.charge_strategy_name(),
        "parking system ready"
    );
    Ok(system)
}
