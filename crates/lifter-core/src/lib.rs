//! Client library for the Lifter weightlifting competition API.
//!
//! - [`api::LifterClient`]: typed requests for athletes, competitions,
//!   sessions and lifts
//! - [`auth::TokenManager`]: verify-before-refresh bearer token lifecycle
//! - [`validation`]: lift sequence rules, field allow-lists and date formats,
//!   all checked before anything is sent
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use lifter_core::{LifterClient, validation::validate_lifts};
//!
//! let client = LifterClient::connect("https://api.lifter.shivan.xyz", "v1", None).await?;
//! let page = client.athletes(1).await?;
//! println!("{} athletes", page.count);
//!
//! validate_lifts([("LIFT", 100), ("NOLIFT", 105), ("LIFT", 105)])?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod validation;

pub use api::{ApiError, LifterClient};
pub use config::Config;
