//! # Printer Transport Layer
//!
//! Where print-job bytes go once they are built. The rendering pipeline
//! never touches a device; callers hand its output to a [`Transport`].
//!
//! ## Available Transports
//!
//! - [`BluetoothTransport`]: Bluetooth RFCOMM TTY (Linux), chunked writes
//! - [`HexWriter`]: hex text to any `io::Write`, for hosts that expect a
//!   hex string instead of raw bytes
//! - [`MemoryTransport`]: keeps every byte, for tests and previews

pub mod bluetooth;
pub mod memory;

pub use bluetooth::BluetoothTransport;
pub use memory::{HexWriter, MemoryTransport};

use crate::codec::hex::from_hex;
use crate::error::Result;

/// A byte sink connected to a printer.
pub trait Transport {
    /// Send `data`, returning once it has been handed to the device.
    fn write_all(&mut self, data: &[u8]) -> Result<()>;

    /// Send a hex-encoded payload. Whitespace in `payload` is ignored;
    /// anything else that is not a hex digit fails before a byte is sent.
    fn write_hex(&mut self, payload: &str) -> Result<()> {
        let bytes = from_hex(payload)?;
        self.write_all(&bytes)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        (**self).write_all(data)
    }

    fn write_hex(&mut self, payload: &str) -> Result<()> {
        (**self).write_hex(payload)
    }
}
