mod handler;

pub use handler::handler;
