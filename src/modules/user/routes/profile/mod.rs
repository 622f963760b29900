pub mod get;
pub mod update;
pub mod update_picture;
