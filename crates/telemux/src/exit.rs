use std::fmt;

use telemux_uplink::UplinkError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn uplink_error(context: &str, err: UplinkError) -> CliError {
    let code = match err {
        UplinkError::Transport(_) => TRANSPORT_ERROR,
        UplinkError::ReservedChannel
        | UplinkError::InvalidPayloadSize { .. }
        | UplinkError::RegistryFull { .. }
        | UplinkError::NoChannels => USAGE,
        UplinkError::Frame(_) => FAILURE,
        UplinkError::Spawn(_) => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}
