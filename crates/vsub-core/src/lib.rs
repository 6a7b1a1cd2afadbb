pub mod api;
pub mod config;
pub mod download;
pub mod error;
pub mod http;
pub mod logging;
pub mod metadata;
pub mod selector;
pub mod url_model;

pub use error::{Result, VsubError};
