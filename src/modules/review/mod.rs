pub mod rate;
pub mod repository;
pub mod service;
