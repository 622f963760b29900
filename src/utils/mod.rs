pub mod aadhaar;
pub mod database;
pub mod json;
pub mod pagination;
pub mod password;
pub mod storage;
pub mod text_enum;
pub mod token;
pub mod validation;
