//! Rating a restaurant, a menu item or a delivery person goes through one
//! flow; each module only mounts a handler naming its target type.

mod service;
pub mod types;

pub use service::service;
