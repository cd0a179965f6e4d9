//! Domain models shared between services
//!
//! Entity structs plus their Create/Update payloads, in the same file per
//! entity. Database derives (`sqlx::FromRow`, `sqlx::Type`) are behind the
//! `db` feature so non-server consumers stay lightweight.

pub mod booking;
pub mod order;
pub mod role;
pub mod schedule;

pub use booking::{
    Booking, BookingCreate, BookingStatus, BookingStatusUpdate, DELIVERY_STATUSES, PICKUP_STATUSES,
};
pub use order::{Order, OrderAssign, OrderCreate};
pub use role::Role;
pub use schedule::{
    Schedule, ScheduleCreate, ScheduleFilter, ScheduleKind, ScheduleSetStatus, ScheduleStatus,
    SlotAvailability,
};
