pub mod auth;
pub mod contact;
pub mod delivery_person;
pub mod menu_item;
pub mod notification;
pub mod order;
pub mod payment;
pub mod restaurant;
pub mod review;
pub mod user;

mod router;
pub use router::get_router;
