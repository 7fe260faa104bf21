use std::{collections::VecDeque, path::Path};

use crate::env::hfo::{
    action::Action,
    client::{ClientError, ConnectOptions, HfoClient},
    status::Status,
};

/// In-memory client replaying a fixed sequence of statuses.
///
/// Once the script runs out every tick reports `fallback`.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    pub state_size: usize,
    pub statuses: VecDeque<Status>,
    pub fallback: Option<Status>,
    /// Connect attempts that report `NotReady` before one succeeds.
    pub not_ready_for: usize,
    pub connects: Vec<ConnectOptions>,
    pub connect_attempts: usize,
    pub actions: Vec<Action>,
    pub ticks: usize,
}

impl ScriptedClient {
    pub fn new(state_size: usize, statuses: &[Status]) -> Self {
        Self {
            state_size,
            statuses: statuses.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn noops(&self) -> usize {
        self.actions.iter().filter(|a| **a == Action::NoOp).count()
    }
}

impl HfoClient for ScriptedClient {
    fn connect(&mut self, options: &ConnectOptions) -> Result<(), ClientError> {
        self.connect_attempts += 1;
        if self.connect_attempts <= self.not_ready_for {
            return Err(ClientError::NotReady);
        }
        self.connects.push(options.clone());
        Ok(())
    }

    fn state_size(&self) -> Result<usize, ClientError> {
        Ok(self.state_size)
    }

    fn state(&mut self) -> Result<Vec<f32>, ClientError> {
        Ok((0..self.state_size)
            .map(|i| (self.ticks + i) as f32 % 2.0 - 1.0)
            .collect())
    }

    fn act(&mut self, action: Action) -> Result<(), ClientError> {
        self.actions.push(action);
        Ok(())
    }

    fn step(&mut self) -> Result<Status, ClientError> {
        self.ticks += 1;
        Ok(self
            .statuses
            .pop_front()
            .unwrap_or(self.fallback.unwrap_or(Status::InGame)))
    }
}

/// A stand-in server binary: a shell script that ignores its arguments
/// and sleeps until killed. Written once per test process.
#[cfg(unix)]
pub fn fake_server_binary() -> &'static Path {
    use std::{os::unix::fs::PermissionsExt, path::PathBuf, sync::OnceLock};

    static BINARY: OnceLock<PathBuf> = OnceLock::new();

    BINARY.get_or_init(|| {
        let mut path = std::env::temp_dir();
        path.push(format!("gym_soccer_fake_hfo_{}.sh", std::process::id()));
        std::fs::write(&path, "#!/bin/sh\nexec sleep 60\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    })
}

/// A stand-in server binary that exits straight away.
#[cfg(unix)]
pub fn crashing_server_binary() -> &'static Path {
    Path::new("/bin/false")
}
