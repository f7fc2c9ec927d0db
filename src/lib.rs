#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

pub mod configuration;
pub mod domain;
pub mod infrastructure;

pub use configuration::Config;
pub use configuration::ConfigKey;
pub use domain::models::*;
pub use domain::services::*;
