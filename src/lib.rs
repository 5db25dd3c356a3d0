pub mod api;
pub mod canonical;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod render;
pub mod services;
pub mod trading;
pub mod validation;

pub use error::{Error, Result};
