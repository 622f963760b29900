pub mod repository;
pub mod service;

mod routes;
pub use routes::get_router;
