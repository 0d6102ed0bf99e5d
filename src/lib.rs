pub mod client;
pub mod core;

pub use client::GsgClient;
pub use core::config::GatewayConfig;
pub use core::errors::GatewayError;
pub use core::types::{ParamSet, ParamValue};
