pub mod args;
pub mod config;

use std::fmt::{Display, Error, Formatter};

use crate::i2c::linux::SessionError;
use crate::i2c::{registers, I2CTransport, TransportError};

pub const DEFAULT_BUS: u32 = 3;
pub const DEFAULT_ADDRESS: u16 = 0x38;

pub const EXIT_OK: i32 = 0;
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_DEVICE: i32 = -1;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub bus: u32,
    pub address: u16,
    pub read: Option<u8>,
    pub write: Option<u8>,
    pub value: Option<u8>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            bus: DEFAULT_BUS,
            address: DEFAULT_ADDRESS,
            read: None,
            write: None,
            value: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operation {
    Read { register: u8 },
    Write { register: u8, value: u8 },
    Noop,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RequestConflict {
    ReadAndWrite,
    MissingWriteAddress,
    MissingWriteValue,
}

impl Display for RequestConflict {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            RequestConflict::ReadAndWrite => write!(f, "Received both read and write"),
            RequestConflict::MissingWriteAddress => write!(f, "Didn't receive write address"),
            RequestConflict::MissingWriteValue => write!(f, "Didn't receive write value"),
        }
    }
}

impl Config {
    /// The single transaction this request asks for, or why it can't run.
    pub fn operation(&self) -> Result<Operation, RequestConflict> {
        match (self.read, self.write, self.value) {
            (Some(_), Some(_), _) => Err(RequestConflict::ReadAndWrite),
            (_, None, Some(_)) => Err(RequestConflict::MissingWriteAddress),
            (_, Some(_), None) => Err(RequestConflict::MissingWriteValue),
            (Some(register), None, None) => Ok(Operation::Read { register }),
            (None, Some(register), Some(value)) => Ok(Operation::Write { register, value }),
            (None, None, None) => Ok(Operation::Noop),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    Read { register: u8, value: u8 },
    Written { register: u8, value: u8 },
    Conflict(RequestConflict),
    Noop,
}

impl Outcome {
    /// The line printed to stdout for a completed transaction.
    pub fn report(&self) -> Option<String> {
        match self {
            Outcome::Read { value, .. } => Some(format!("[read_register]: {:02x}", value)),
            Outcome::Written { register, value } => {
                Some(format!("[write_register]: {:02x} = {:02x}", register, value))
            }
            Outcome::Conflict(_) | Outcome::Noop => None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum RunError {
    Session(SessionError),
    Transport(TransportError),
}

impl Display for RunError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            RunError::Session(err) => write!(f, "{}", err),
            RunError::Transport(err) => write!(f, "{}", err),
        }
    }
}

impl From<SessionError> for RunError {
    fn from(err: SessionError) -> RunError {
        RunError::Session(err)
    }
}

impl From<TransportError> for RunError {
    fn from(err: TransportError) -> RunError {
        RunError::Transport(err)
    }
}

/// Validate the request and run at most one transaction on `transport`.
pub fn dispatch<T: I2CTransport>(config: &Config, transport: &mut T) -> Result<Outcome, TransportError> {
    let operation = match config.operation() {
        Ok(operation) => operation,
        Err(conflict) => {
            debug!(target: "main", "Skipping transfer: {:?}", conflict);
            return Ok(Outcome::Conflict(conflict));
        }
    };

    match operation {
        Operation::Read { register } => {
            let value = transport.read_reg(register)?;
            info!(target: "main", "Read {:#04x} from {}", value, registers::describe(register));
            Ok(Outcome::Read { register, value })
        }
        Operation::Write { register, value } => {
            transport.write_reg(register, value)?;
            info!(target: "main", "Wrote {:#04x} to {}", value, registers::describe(register));
            Ok(Outcome::Written { register, value })
        }
        Operation::Noop => {
            warn!(target: "main", "No read or write requested");
            Ok(Outcome::Noop)
        }
    }
}

/// Open the device, bind the address, then dispatch. Whatever `open`
/// returns is dropped before this returns, on every path.
pub fn execute<T, F>(config: &Config, open: F) -> Result<Outcome, RunError>
where
    T: I2CTransport,
    F: FnOnce(u32, u16) -> Result<T, SessionError>,
{
    let mut transport = open(config.bus, config.address)?;

    Ok(dispatch(config, &mut transport)?)
}

/// The line printed to stdout for this run, if any. Results, request
/// conflicts and device open/bind failures go to stdout; transfer errors are
/// already logged where they happen.
pub fn report_line(result: &Result<Outcome, RunError>) -> Option<String> {
    match result {
        Ok(Outcome::Conflict(conflict)) => Some(format!("[main]: {}", conflict)),
        Ok(outcome) => outcome.report(),
        Err(RunError::Session(err)) => Some(format!("[main]: {}", err)),
        Err(RunError::Transport(_)) => None,
    }
}

pub fn exit_code(result: &Result<Outcome, RunError>) -> i32 {
    match result {
        Ok(_) => EXIT_OK,
        Err(_) => EXIT_DEVICE,
    }
}
