use std::{collections::HashMap, thread, time::Instant};

use tracing::{debug, info, warn};

use crate::{
    common::spaces::{BoxSpace, HybridActionSpace, Space},
    env::{
        base::{
            Env, EnvError, EnvObservation, Info, InfoData, Metadata, RenderMode, ResetOptions,
            RewardRange,
        },
        hfo::{
            action::{Action, HybridAction},
            client::{ClientError, ConnectOptions, HfoClient},
            config::ServerConfig,
            server::{find_free_port, ManagedProcess},
            status::Status,
        },
    },
};

/// HFO played as the goalie of the defending team.
///
/// Owns the simulator process and the player's connection to it. Both are
/// acquired in [`SoccerGoalieEnv::launch`] and released together, either by
/// [`Env::close`] or when the environment is dropped.
pub struct SoccerGoalieEnv<C: HfoClient> {
    client: C,
    server: Option<ManagedProcess>,
    viewer: Option<ManagedProcess>,
    config: ServerConfig,
    port: u16,
    connected: bool,
    state_size: usize,
    status: Status,
}

#[cfg(feature = "libhfo")]
impl SoccerGoalieEnv<crate::env::hfo::native::NativeClient> {
    pub fn new(config: ServerConfig) -> Result<Self, EnvError> {
        Self::launch(config, crate::env::hfo::native::NativeClient::new()?)
    }
}

impl<C: HfoClient> SoccerGoalieEnv<C> {
    /// Starts a server for `config` and connects `client` to it as the goalie.
    pub fn launch(config: ServerConfig, client: C) -> Result<Self, EnvError> {
        let port = match config.port {
            Some(port) => port,
            None => find_free_port()?,
        };
        let server =
            ManagedProcess::spawn(&config.paths.server_binary, &config.server_args(port))?;

        let mut env = Self {
            client,
            server: Some(server),
            viewer: None,
            config,
            port,
            connected: false,
            state_size: 0,
            status: Status::InGame,
        };

        // `server` is killed by `ManagedProcess::drop` if any of this fails
        env.connect()?;
        env.connected = true;
        env.state_size = env.client.state_size()?;
        info!(
            "Connected to HFO on port {}, state size = {}",
            env.port, env.state_size
        );

        Ok(env)
    }

    /// Retries the connection until the server accepts it, the server dies,
    /// or the startup timeout runs out.
    fn connect(&mut self) -> Result<(), EnvError> {
        let options = ConnectOptions::goalie(self.config.paths.config_dir.clone(), self.port);
        let timeout = self.config.startup_timeout();
        let started = Instant::now();

        loop {
            if let Some(server) = self.server.as_mut() {
                if let Some(status) = server.exited()? {
                    return Err(EnvError::ServerExited(status));
                }
            }

            match self.client.connect(&options) {
                Ok(()) => return Ok(()),
                Err(e) if started.elapsed() >= timeout => {
                    warn!("giving up on HFO server after {:?}: {}", timeout, e);
                    return Err(EnvError::StartupTimeout(timeout));
                }
                Err(ClientError::NotReady) => {}
                Err(e) => debug!("connect to port {} failed: {}", self.port, e),
            }

            thread::sleep(self.config.connect_retry_interval());
        }
    }

    fn take_action(&mut self, action: &HybridAction) -> Result<(), EnvError> {
        let action = match action.decode() {
            Some(a) => a,
            None => {
                warn!("Unrecognized action {}", action.kind);
                Action::NoOp
            }
        };
        self.client.act(action)?;
        Ok(())
    }

    /// Issues a no-op and advances one tick.
    fn idle(&mut self) -> Result<Status, EnvError> {
        self.client.act(Action::NoOp)?;
        self.status = self.client.step()?;
        if self.status == Status::ServerDown {
            return Err(EnvError::ServerDown);
        }
        Ok(self.status)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state_size(&self) -> usize {
        self.state_size
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn server_pid(&self) -> Option<u32> {
        self.server.as_ref().map(ManagedProcess::pid)
    }

    pub fn viewer_pid(&self) -> Option<u32> {
        self.viewer.as_ref().map(ManagedProcess::pid)
    }
}

impl<C: HfoClient> Env<Vec<f32>, HybridAction> for SoccerGoalieEnv<C> {
    fn step(&mut self, action: &HybridAction) -> Result<EnvObservation<Vec<f32>>, EnvError> {
        self.take_action(action)?;
        self.status = self.client.step()?;

        let reward = self.status.reward();
        let obs = self.client.state()?;
        let terminated = self.status.is_episode_over();

        let mut info: Info = HashMap::new();
        info.insert(
            "status".to_string(),
            InfoData::String(self.status.name().to_string()),
        );

        Ok(EnvObservation {
            obs,
            reward,
            terminated,
            truncated: false,
            info,
        })
    }

    /// Repeats no-ops until the current episode ends and the next one begins.
    fn reset(
        &mut self,
        seed: Option<u64>,
        _options: Option<ResetOptions>,
    ) -> Result<Vec<f32>, EnvError> {
        if let Some(seed) = seed {
            debug!(
                "ignoring reset seed {}; the server was seeded with {}",
                seed, self.config.seed
            );
        }

        if self.status == Status::ServerDown {
            return Err(EnvError::ServerDown);
        }

        while self.status == Status::InGame {
            self.idle()?;
        }
        while self.status != Status::InGame {
            self.idle()?;
        }

        Ok(self.client.state()?)
    }

    fn action_space(&self) -> Box<dyn Space<HybridAction>> {
        Box::new(HybridActionSpace::default())
    }

    fn observation_space(&self) -> Box<dyn Space<Vec<f32>>> {
        Box::new(BoxSpace::uniform(self.state_size, -1.0, 1.0))
    }

    fn reward_range(&self) -> RewardRange {
        RewardRange {
            low: -1.0,
            high: 1.0,
        }
    }

    /// Opens the soccerwindow viewer on the running game, or kills it when
    /// `close` is set.
    fn render(&mut self, _mode: RenderMode, close: bool) -> Result<(), EnvError> {
        if close {
            if let Some(mut viewer) = self.viewer.take() {
                if let Err(e) = viewer.kill() {
                    debug!("could not kill viewer: {}", e);
                }
            }
        } else if self.viewer.is_none() {
            self.viewer = Some(ManagedProcess::spawn(
                &self.config.paths.viewer_binary,
                &ServerConfig::viewer_args(self.port),
            )?);
        }

        Ok(())
    }

    fn renderable(&self) -> bool {
        true
    }

    fn close(&mut self) {
        if let Some(mut server) = self.server.take() {
            if let Err(e) = server.kill() {
                debug!("could not kill HFO server: {}", e);
            }
        }
    }

    fn metadata(&self) -> Metadata {
        Metadata {
            render_modes: vec![RenderMode::Human.name()],
        }
    }
}

impl<C: HfoClient> SoccerGoalieEnv<C> {
    /// Asks the server to quit, then kills it and any viewer.
    fn teardown(&mut self) {
        // let the server shut down on its own before killing it
        if self.connected && self.server.is_some() {
            let quit = self
                .client
                .act(Action::Quit)
                .and_then(|_| self.client.step());
            if let Err(e) = quit {
                debug!("quit request failed: {}", e);
            }
        }

        self.close();
        self.render(RenderMode::Human, true).ok();
    }
}

impl<C: HfoClient> Drop for SoccerGoalieEnv<C> {
    fn drop(&mut self) {
        self.teardown();
    }
}
