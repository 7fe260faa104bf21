use std::{collections::HashMap, process::ExitStatus, time::Duration};

use thiserror::Error;

use crate::{common::spaces::Space, env::hfo::client::ClientError};

#[derive(Debug, Clone, PartialEq)]
pub enum InfoData {
    String(String),
}

pub type ResetOptions = HashMap<String, InfoData>;
pub type Info = HashMap<String, InfoData>;

#[derive(Clone, Debug)]
pub struct EnvObservation<O> {
    pub obs: O,
    pub reward: f32,
    pub terminated: bool,
    pub truncated: bool,
    pub info: Info,
}

impl<O> EnvObservation<O> {
    pub fn done(&self) -> bool {
        self.terminated | self.truncated
    }
}

#[derive(Clone, Debug, Copy, PartialEq)]
pub struct RewardRange {
    pub low: f32,
    pub high: f32,
}

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Human,
}

impl RenderMode {
    pub fn name(&self) -> &'static str {
        match self {
            RenderMode::Human => "human",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metadata {
    pub render_modes: Vec<&'static str>,
}

#[derive(Debug, Error)]
pub enum EnvError {
    /// The simulator stopped answering. Agents should treat this as a
    /// signal to exit rather than keep stepping.
    #[error("HFO server down!")]
    ServerDown,
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server exited during startup ({0})")]
    ServerExited(ExitStatus),
    #[error("server was not ready after {0:?}")]
    StartupTimeout(Duration),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub trait Env<O, A> {
    fn step(&mut self, action: &A) -> Result<EnvObservation<O>, EnvError>;
    fn reset(&mut self, seed: Option<u64>, options: Option<ResetOptions>) -> Result<O, EnvError>;
    fn action_space(&self) -> Box<dyn Space<A>>;
    fn observation_space(&self) -> Box<dyn Space<O>>;
    fn reward_range(&self) -> RewardRange;
    fn render(&mut self, mode: RenderMode, close: bool) -> Result<(), EnvError>;
    fn renderable(&self) -> bool;
    fn close(&mut self);
    fn metadata(&self) -> Metadata;
}
