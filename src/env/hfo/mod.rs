//! Half-Field-Offense soccer, played from the goalie's side.
//!
//! The simulator runs as a child process; [`goalie::SoccerGoalieEnv`] owns it
//! together with the client connection and exposes it through [`Env`](super::base::Env).

pub mod action;
pub mod client;
pub mod config;
pub mod goalie;
#[cfg(feature = "libhfo")]
pub mod native;
pub mod server;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{Action, HybridAction};
pub use client::{ClientError, ConnectOptions, FeatureSet, HfoClient};
pub use config::{HfoPaths, ServerConfig};
pub use goalie::SoccerGoalieEnv;
pub use status::Status;
