pub mod download;
pub mod request;
