use std::path::PathBuf;

use thiserror::Error;

use crate::env::hfo::{action::Action, status::Status};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server is not accepting players yet. Startup retries on this.
    #[error("server not ready")]
    NotReady,
    #[error("not connected to a server")]
    NotConnected,
    #[error("unknown status code {0}")]
    UnknownStatus(i32),
    #[error("invalid connection option: {0}")]
    InvalidOption(String),
    #[error("client failure: {0}")]
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureSet {
    #[default]
    LowLevel,
    HighLevel,
}

impl FeatureSet {
    pub fn code(&self) -> i32 {
        match self {
            FeatureSet::LowLevel => 0,
            FeatureSet::HighLevel => 1,
        }
    }
}

/// How a player identifies itself when joining the server.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectOptions {
    pub feature_set: FeatureSet,
    pub config_dir: PathBuf,
    pub server_port: u16,
    pub server_addr: String,
    pub team_name: String,
    pub play_goalie: bool,
    pub record_dir: String,
}

impl ConnectOptions {
    /// The defending goalie on the right-hand team.
    pub fn goalie(config_dir: PathBuf, server_port: u16) -> Self {
        Self {
            feature_set: FeatureSet::LowLevel,
            config_dir,
            server_port,
            server_addr: "localhost".to_string(),
            team_name: "base_right".to_string(),
            play_goalie: true,
            record_dir: String::new(),
        }
    }
}

/// A player's connection to a running HFO server.
///
/// Calls block until the server answers. `act` queues a command for the
/// current tick and `step` advances the game by one tick.
pub trait HfoClient {
    fn connect(&mut self, options: &ConnectOptions) -> Result<(), ClientError>;

    /// Length of the observation vector for the connected feature set.
    fn state_size(&self) -> Result<usize, ClientError>;

    fn state(&mut self) -> Result<Vec<f32>, ClientError>;

    fn act(&mut self, action: Action) -> Result<(), ClientError>;

    fn step(&mut self) -> Result<Status, ClientError>;
}
