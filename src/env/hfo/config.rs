use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

/// Locations of the HFO binaries inside an install tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HfoPaths {
    pub server_binary: PathBuf,
    pub viewer_binary: PathBuf,
    pub config_dir: PathBuf,
}

impl HfoPaths {
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let bin = root.as_ref().join("bin");
        Self {
            server_binary: bin.join("HFO"),
            viewer_binary: bin.join("soccerwindow2"),
            config_dir: bin.join("teams").join("base").join("config").join("formations-dt"),
        }
    }
}

impl Default for HfoPaths {
    /// Rooted at `$HFO_ROOT`, or `./HFO` when unset.
    fn default() -> Self {
        let root = std::env::var_os("HFO_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("HFO"));
        Self::from_root(root)
    }
}

/// Server launch settings. Defaults describe the goalie scenario: one
/// controlled defender against a single offensive bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Episodes end after this many frames.
    pub frames_per_trial: u32,
    /// Episodes end if the ball is untouched for this many frames.
    pub untouched_time: Option<u32>,
    pub offense_agents: u32,
    pub defense_agents: u32,
    pub offense_npcs: u32,
    pub defense_npcs: u32,
    /// Turning this off runs the server in real time.
    pub sync_mode: bool,
    /// Fixed server port. A free one is picked when unset.
    pub port: Option<u16>,
    /// Player given the ball at the start of each episode.
    pub offense_on_ball: i32,
    /// Noise-free perception.
    pub fullstate: bool,
    pub seed: i64,
    /// Ball start position along the field, in `[0, 1]`.
    pub ball_x_min: f32,
    pub ball_x_max: f32,
    pub verbose: bool,
    /// Write `*.rcg` game logs to `log_dir`.
    pub log_game: bool,
    pub log_dir: PathBuf,
    pub paths: HfoPaths,
    pub startup_timeout_ms: u64,
    pub connect_retry_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            frames_per_trial: 500,
            untouched_time: None,
            offense_agents: 0,
            defense_agents: 1,
            offense_npcs: 1,
            defense_npcs: 0,
            sync_mode: true,
            port: None,
            offense_on_ball: 1,
            fullstate: true,
            seed: -1,
            ball_x_min: 0.6,
            ball_x_max: 0.6,
            verbose: false,
            log_game: false,
            log_dir: PathBuf::from("log"),
            paths: HfoPaths::default(),
            startup_timeout_ms: 30_000,
            connect_retry_ms: 500,
        }
    }
}

impl ServerConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn startup_timeout(&self) -> Duration {
        Duration::from_millis(self.startup_timeout_ms)
    }

    pub fn connect_retry_interval(&self) -> Duration {
        Duration::from_millis(self.connect_retry_ms)
    }

    /// Arguments for the server binary, listening on `port`.
    pub fn server_args(&self, port: u16) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "--headless".into(),
            "--frames-per-trial".into(),
            self.frames_per_trial.to_string(),
            "--offense-agents".into(),
            self.offense_agents.to_string(),
            "--defense-agents".into(),
            self.defense_agents.to_string(),
            "--offense-npcs".into(),
            self.offense_npcs.to_string(),
            "--defense-npcs".into(),
            self.defense_npcs.to_string(),
            "--port".into(),
            port.to_string(),
            "--offense-on-ball".into(),
            self.offense_on_ball.to_string(),
            "--seed".into(),
            self.seed.to_string(),
            "--ball-x-min".into(),
            format!("{:.6}", self.ball_x_min),
            "--ball-x-max".into(),
            format!("{:.6}", self.ball_x_max),
            "--log-dir".into(),
            self.log_dir.display().to_string(),
        ];

        if let Some(untouched) = self.untouched_time {
            args.push("--untouched-time".into());
            args.push(untouched.to_string());
        }
        if !self.sync_mode {
            args.push("--no-sync".into());
        }
        if self.fullstate {
            args.push("--fullstate".into());
        }
        if self.verbose {
            args.push("--verbose".into());
        }
        if !self.log_game {
            args.push("--no-logging".into());
        }

        args
    }

    pub fn viewer_args(port: u16) -> Vec<String> {
        vec!["--connect".into(), "--port".into(), port.to_string()]
    }
}
