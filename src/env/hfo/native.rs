//! Player client backed by HFO's C interface (`libhfo_c`).

use std::{
    ffi::{c_char, c_float, c_int, c_void, CString},
    ptr::NonNull,
};

use tracing::debug;

use crate::env::hfo::{
    action::Action,
    client::{ClientError, ConnectOptions, HfoClient},
    server::udp_port_bound,
    status::Status,
};

#[link(name = "hfo_c")]
extern "C" {
    fn HFO_new() -> *mut c_void;
    fn HFO_del(hfo: *mut c_void);
    fn connectToServer(
        hfo: *mut c_void,
        feature_set: c_int,
        config_dir: *mut c_char,
        server_port: c_int,
        server_addr: *mut c_char,
        team_name: *mut c_char,
        play_goalie: bool,
        record_dir: *mut c_char,
    );
    fn getStateSize(hfo: *mut c_void) -> c_int;
    fn getState(hfo: *mut c_void, state_data: *mut c_float);
    fn act(hfo: *mut c_void, action: c_int, params: *mut c_float);
    fn step(hfo: *mut c_void) -> c_int;
}

fn c_string(value: &str) -> Result<CString, ClientError> {
    CString::new(value).map_err(|_| ClientError::InvalidOption(value.to_string()))
}

pub struct NativeClient {
    handle: NonNull<c_void>,
    connected: bool,
}

impl NativeClient {
    pub fn new() -> Result<Self, ClientError> {
        // SAFETY: HFO_new has no preconditions; a null return is handled below.
        let raw = unsafe { HFO_new() };
        let handle = NonNull::new(raw)
            .ok_or_else(|| ClientError::Other("HFO_new returned null".to_string()))?;

        Ok(Self {
            handle,
            connected: false,
        })
    }

    fn connected_handle(&self) -> Result<*mut c_void, ClientError> {
        if self.connected {
            Ok(self.handle.as_ptr())
        } else {
            Err(ClientError::NotConnected)
        }
    }
}

impl HfoClient for NativeClient {
    fn connect(&mut self, options: &ConnectOptions) -> Result<(), ClientError> {
        // libhfo exits the whole process when the server is missing, so only
        // hand over once the server holds its player port
        if !udp_port_bound(options.server_port) {
            return Err(ClientError::NotReady);
        }

        let config_dir = c_string(&options.config_dir.display().to_string())?;
        let server_addr = c_string(&options.server_addr)?;
        let team_name = c_string(&options.team_name)?;
        let record_dir = c_string(&options.record_dir)?;

        debug!(
            "connecting to {}:{} as {}",
            options.server_addr, options.server_port, options.team_name
        );

        // SAFETY: the handle is live and every string outlives the call; the
        // library copies what it keeps.
        unsafe {
            connectToServer(
                self.handle.as_ptr(),
                options.feature_set.code(),
                config_dir.as_ptr() as *mut c_char,
                c_int::from(options.server_port),
                server_addr.as_ptr() as *mut c_char,
                team_name.as_ptr() as *mut c_char,
                options.play_goalie,
                record_dir.as_ptr() as *mut c_char,
            );
        }

        self.connected = true;
        Ok(())
    }

    fn state_size(&self) -> Result<usize, ClientError> {
        let handle = self.connected_handle()?;
        // SAFETY: handle is live and connected.
        let size = unsafe { getStateSize(handle) };
        usize::try_from(size).map_err(|_| ClientError::Other(format!("invalid state size {size}")))
    }

    fn state(&mut self) -> Result<Vec<f32>, ClientError> {
        let mut state = vec![0.0; self.state_size()?];
        // SAFETY: the buffer holds exactly getStateSize floats.
        unsafe { getState(self.connected_handle()?, state.as_mut_ptr()) };
        Ok(state)
    }

    fn act(&mut self, action: Action) -> Result<(), ClientError> {
        let handle = self.connected_handle()?;
        let mut params = action.params();
        // SAFETY: params holds the number of parameters the action takes.
        unsafe { act(handle, action.code(), params.as_mut_ptr()) };
        Ok(())
    }

    fn step(&mut self) -> Result<Status, ClientError> {
        let handle = self.connected_handle()?;
        // SAFETY: handle is live and connected.
        let code = unsafe { step(handle) };
        Status::from_code(code)
    }
}

impl Drop for NativeClient {
    fn drop(&mut self) {
        // SAFETY: the handle came from HFO_new and is freed exactly once.
        unsafe { HFO_del(self.handle.as_ptr()) };
    }
}
