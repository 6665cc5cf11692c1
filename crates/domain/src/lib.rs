//! Domain entities and invariants.

#![forbid(unsafe_code)]

pub mod access;
mod board;
mod load;
mod permission;
mod principal;
mod role;
mod truck;

pub use board::BoardRecord;
pub use load::{LOAD_RATE_MAX, Load, LoadDraft, LoadStatus, TrailerType};
pub use permission::Permission;
pub use principal::Principal;
pub use role::Role;
pub use truck::{Truck, TruckDraft, TruckStatus};
