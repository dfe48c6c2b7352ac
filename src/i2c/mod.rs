pub mod linux;
pub mod registers;

use std::fmt::{Display, Error, Formatter};

#[derive(Debug, PartialEq)]
pub struct TransportError {
    op: &'static str,
    message: String,
}

impl TransportError {
    pub fn new(op: &'static str, message: String) -> TransportError {
        TransportError { op, message }
    }

    pub fn op(&self) -> &'static str {
        self.op
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "{} failed: {}", self.op, self.message)
    }
}

/// Raw transfers against a device that is already open and bound to its
/// slave address.
pub trait I2CTransport {
    /// Write `wrbuf` and then read `rdlen` bytes as one combined transfer.
    /// An empty `wrbuf` issues the read message on its own.
    fn write_read(&mut self, wrbuf: &[u8], rdlen: usize) -> Result<Vec<u8>, TransportError>;

    fn write(&mut self, buf: &[u8]) -> Result<(), TransportError>;

    fn write_reg(&mut self, regnum: u8, value: u8) -> Result<(), TransportError> {
        self.write(&[regnum, value])
    }

    fn read_reg(&mut self, regnum: u8) -> Result<u8, TransportError> {
        let data = self.write_read(&[regnum], 1)?;
        data.first().cloned().ok_or_else(|| {
            TransportError::new("i2c_read", format!("No data for register {:#04x}", regnum))
        })
    }
}

impl<'a, T: I2CTransport + ?Sized> I2CTransport for &'a mut T {
    fn write_read(&mut self, wrbuf: &[u8], rdlen: usize) -> Result<Vec<u8>, TransportError> {
        (**self).write_read(wrbuf, rdlen)
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), TransportError> {
        (**self).write(buf)
    }
}

#[cfg(test)]
pub mod mock {
    use super::{I2CTransport, TransportError};

    use std::collections::VecDeque;

    /// One bus transaction as the kernel would see it.
    #[derive(Clone, Debug, PartialEq)]
    pub enum Transfer {
        WriteRead { wrbuf: Vec<u8>, rdlen: usize },
        Write { buf: Vec<u8> },
    }

    /// Records every transfer and plays back scripted read data.
    pub struct RecordingTransport {
        pub transfers: Vec<Transfer>,
        pub read_data: VecDeque<u8>,
        pub fail: bool,
    }

    impl RecordingTransport {
        pub fn new() -> RecordingTransport {
            RecordingTransport {
                transfers: Vec::new(),
                read_data: VecDeque::new(),
                fail: false,
            }
        }

        pub fn with_read_data(data: &[u8]) -> RecordingTransport {
            RecordingTransport {
                read_data: data.iter().cloned().collect(),
                ..RecordingTransport::new()
            }
        }

        pub fn failing() -> RecordingTransport {
            RecordingTransport {
                fail: true,
                ..RecordingTransport::new()
            }
        }
    }

    impl I2CTransport for RecordingTransport {
        fn write_read(&mut self, wrbuf: &[u8], rdlen: usize) -> Result<Vec<u8>, TransportError> {
            self.transfers.push(Transfer::WriteRead {
                wrbuf: wrbuf.to_vec(),
                rdlen,
            });

            if self.fail {
                return Err(TransportError::new("i2c_read", String::from("Error -121")));
            }

            Ok((0..rdlen)
                .map(|_| self.read_data.pop_front().unwrap_or(0))
                .collect())
        }

        fn write(&mut self, buf: &[u8]) -> Result<(), TransportError> {
            self.transfers.push(Transfer::Write { buf: buf.to_vec() });

            if self.fail {
                Err(TransportError::new("i2c_write", String::from("Error -121")))
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{RecordingTransport, Transfer};
    use super::I2CTransport;

    #[test]
    fn test_write_reg_sends_index_then_value() {
        let mut transport = RecordingTransport::new();

        assert!(transport.write_reg(0x88, 0x06).is_ok());
        assert!(
            transport.transfers
                == vec![Transfer::Write {
                    buf: vec![0x88, 0x06]
                }]
        );
    }

    #[test]
    fn test_read_reg_is_one_combined_transfer() {
        let mut transport = RecordingTransport::with_read_data(&[0x5a]);

        assert!(transport.read_reg(0xa6) == Ok(0x5a));
        assert!(
            transport.transfers
                == vec![Transfer::WriteRead {
                    wrbuf: vec![0xa6],
                    rdlen: 1
                }]
        );
    }

    #[test]
    fn test_read_reg_propagates_failure() {
        let mut transport = RecordingTransport::failing();

        let err = transport.read_reg(0x80).unwrap_err();
        assert!(err.op() == "i2c_read");
        assert!(transport.transfers.len() == 1);
    }
}
