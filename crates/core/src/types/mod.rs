//! Core types for Gadget Grove.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod status;

pub use email::{Email, EmailError};
pub use id::{ItemId, OrderId, UserId};
pub use money::{Currency, Money};
pub use status::{DeliveryZone, OrderStatus, PaymentMethod, Role};
