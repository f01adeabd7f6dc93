//! Shared wire types for vitrine (products and frame messages).

pub mod frame;
pub mod product;

pub use frame::{Envelope, Notification, NotificationStatus, ParentMessage, WidgetMessage};
pub use product::Product;
