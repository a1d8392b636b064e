//! Domain models for the storefront.

pub mod item;
pub mod order;
pub mod session;
pub mod user;

pub use item::{AddOutcome, ItemList, LineItem, ListKind, ListScope};
pub use order::{CustomerDetails, Order, OrderTotals, PaymentDetails};
pub use session::{CurrentUser, session_keys};
pub use user::User;
