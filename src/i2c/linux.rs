use i2cdev::core::{I2CMessage, I2CTransfer};
use i2cdev::linux::{LinuxI2CBus, LinuxI2CError, LinuxI2CMessage};

use std::fmt::{Display, Error, Formatter};
use std::os::unix::io::AsRawFd;

use super::registers;
use super::{I2CTransport, TransportError};

// I2C_SLAVE_FORCE from <linux/i2c-dev.h>. Binds the address even when a
// kernel driver already claims it.
nix::ioctl_write_int_bad!(i2c_slave_force, 0x0706);

#[derive(Debug, PartialEq)]
pub enum SessionError {
    Open { path: String, reason: String },
    Bind { address: u16, reason: String },
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            SessionError::Open { path, reason } => write!(f, "Couldn't open {}: {}", path, reason),
            SessionError::Bind { address, reason } => {
                write!(f, "Couldn't set slave addr {:#04x}: {}", address, reason)
            }
        }
    }
}

/// Negative errno for a failed transfer, the way the kernel reports it.
fn error_code(err: &LinuxI2CError) -> i32 {
    match err {
        LinuxI2CError::Nix(errno) => -(*errno as i32),
        LinuxI2CError::Io(io_err) => io_err.raw_os_error().map(|code| -code).unwrap_or(-1),
    }
}

fn transfer_error(op: &'static str, err: &LinuxI2CError) -> TransportError {
    let message = format!("Error {}: {}", error_code(err), err);
    error!(target: op, "{}", message);
    TransportError::new(op, message)
}

pub fn device_path(bus: u32) -> String {
    format!("/dev/i2c-{}", bus)
}

/// One invocation's binding to the touch controller. The bus handle is
/// closed when the session is dropped.
pub struct Session {
    bus: LinuxI2CBus,
    bus_number: u32,
    address: u16,
    // Identification registers are not read by any command yet
    #[allow(dead_code)]
    pub chip_id: Option<u8>,
    #[allow(dead_code)]
    pub firmware_version: Option<u8>,
}

impl Session {
    pub fn open(bus_number: u32, address: u16) -> Result<Session, SessionError> {
        let path = device_path(bus_number);

        debug!(target: "open", "Opening {}", path);
        let bus = LinuxI2CBus::new(&path).map_err(|err| SessionError::Open {
            path: path.clone(),
            reason: err.to_string(),
        })?;

        debug!(target: "open", "Setting addr to {:#04x}", address);
        // An error here drops `bus`, which closes the device again
        let bound = unsafe { i2c_slave_force(bus.as_raw_fd(), i32::from(address)) };
        bound.map_err(|err| SessionError::Bind {
            address,
            reason: err.to_string(),
        })?;

        Ok(Session {
            bus,
            bus_number,
            address,
            chip_id: None,
            firmware_version: None,
        })
    }
}

impl I2CTransport for Session {
    fn write_read(&mut self, wrbuf: &[u8], rdlen: usize) -> Result<Vec<u8>, TransportError> {
        let mut rdbuf = vec![0u8; rdlen];

        if let Some(regnum) = wrbuf.first() {
            debug!(
                target: "i2c_read",
                "Reading {} byte(s) from {}",
                rdlen,
                registers::describe(*regnum)
            );
        }

        let result = if wrbuf.is_empty() {
            let mut msgs = [LinuxI2CMessage::read(&mut rdbuf[..]).with_address(self.address)];
            self.bus.transfer(&mut msgs)
        } else {
            let mut msgs = [
                LinuxI2CMessage::write(wrbuf).with_address(self.address),
                LinuxI2CMessage::read(&mut rdbuf[..]).with_address(self.address),
            ];
            self.bus.transfer(&mut msgs)
        };

        match result {
            Ok(_) => Ok(rdbuf),
            Err(err) => Err(transfer_error("i2c_read", &err)),
        }
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), TransportError> {
        if let Some(regnum) = buf.first() {
            debug!(target: "i2c_write", "Writing {:?} to {}", &buf[1..], registers::describe(*regnum));
        }

        let mut msgs = [LinuxI2CMessage::write(buf).with_address(self.address)];

        match self.bus.transfer(&mut msgs) {
            Ok(_) => Ok(()),
            Err(err) => Err(transfer_error("i2c_write", &err)),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!(target: "close", "Closing {}", device_path(self.bus_number));
    }
}

#[cfg(test)]
mod tests {
    use super::{device_path, transfer_error, Session, SessionError};
    use i2cdev::linux::LinuxI2CError;

    use std::io;

    #[test]
    fn test_device_path() {
        assert!(device_path(3) == "/dev/i2c-3");
        assert!(device_path(12) == "/dev/i2c-12");
    }

    #[test]
    fn test_open_missing_bus() {
        match Session::open(4242, 0x38) {
            Err(SessionError::Open { path, .. }) => assert!(path == "/dev/i2c-4242"),
            _ => panic!("Expected open failure"),
        }
    }

    #[test]
    fn test_transfer_error_carries_errno() {
        let err = LinuxI2CError::Io(io::Error::from_raw_os_error(121));

        let transport_err = transfer_error("i2c_read", &err);

        assert!(transport_err.op() == "i2c_read");
        assert!(transport_err.to_string().starts_with("i2c_read failed: Error -121: "));
    }

    #[test]
    fn test_error_messages() {
        let open = SessionError::Open {
            path: String::from("/dev/i2c-3"),
            reason: String::from("No such file or directory"),
        };
        let bind = SessionError::Bind {
            address: 0x38,
            reason: String::from("EBUSY"),
        };

        assert!(open.to_string() == "Couldn't open /dev/i2c-3: No such file or directory");
        assert!(bind.to_string() == "Couldn't set slave addr 0x38: EBUSY");
    }
}
