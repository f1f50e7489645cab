pub mod config;
pub mod models;
pub mod utils;

pub use crate::config::*;
pub use models::token::{AccessToken, Credentials, TokenResponse};
pub use crate::utils::*;
