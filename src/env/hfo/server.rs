use std::{
    io::ErrorKind,
    net::{TcpListener, UdpSocket},
    path::Path,
    process::{Child, Command, ExitStatus, Stdio},
};

use tracing::{debug, info};

use crate::env::base::EnvError;

/// Asks the OS for a free port. Nothing stops another process from taking
/// it before the server binds it.
pub fn find_free_port() -> Result<u16, std::io::Error> {
    let listener = TcpListener::bind(("0.0.0.0", 0))?;
    Ok(listener.local_addr()?.port())
}

/// Whether something already holds the UDP `port` on this host. rcssserver
/// accepts players over UDP, so this flips once the server is listening.
///
/// The check binds the port itself for an instant. A server that starts
/// binding inside that window fails to start and surfaces as
/// `EnvError::ServerExited` from the connect loop.
pub fn udp_port_bound(port: u16) -> bool {
    match UdpSocket::bind(("0.0.0.0", port)) {
        Ok(_) => false,
        Err(e) => e.kind() == ErrorKind::AddrInUse,
    }
}

/// A child process that is killed and reaped when dropped.
#[derive(Debug)]
pub struct ManagedProcess {
    name: String,
    child: Child,
}

impl ManagedProcess {
    pub fn spawn(program: &Path, args: &[String]) -> Result<Self, EnvError> {
        let name = program.display().to_string();
        info!("Starting {} with command: {} {}", name, name, args.join(" "));

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| EnvError::Spawn {
                program: name.clone(),
                source,
            })?;

        Ok(Self { name, child })
    }

    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// The exit status, if the process has already exited.
    pub fn exited(&mut self) -> Result<Option<ExitStatus>, std::io::Error> {
        self.child.try_wait()
    }

    /// Sends SIGKILL and reaps the process. Does nothing once it has exited.
    pub fn kill(&mut self) -> Result<(), std::io::Error> {
        if self.child.try_wait()?.is_some() {
            return Ok(());
        }
        self.child.kill()?;
        self.child.wait()?;
        Ok(())
    }
}

impl Drop for ManagedProcess {
    fn drop(&mut self) {
        if let Err(e) = self.kill() {
            debug!("could not kill {} (pid {}): {}", self.name, self.pid(), e);
        }
    }
}
