pub mod base_url;
pub mod storage_key;
pub mod upload;
