pub mod delete;
pub mod health;
pub mod static_file;
pub mod upload;
