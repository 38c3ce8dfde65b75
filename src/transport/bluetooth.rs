//! # Bluetooth RFCOMM Transport
//!
//! Sends print jobs to a Bluetooth receipt printer over the Serial Port
//! Profile. The printer must already be paired and bound to an RFCOMM
//! device node:
//!
//! ```bash
//! $ bluetoothctl pair 00:11:62:XX:XX:XX
//! $ sudo rfcomm bind 0 00:11:62:XX:XX:XX
//! # creates /dev/rfcomm0
//! ```
//!
//! ## TTY Configuration
//!
//! The device is switched to raw mode so raster bytes reach the printer
//! untouched: no CR/LF translation, no XON/XOFF (0x11 and 0x13 are common
//! in bitmap data), 8 data bits, no echo, non-canonical.
//!
//! ## Chunked Writes
//!
//! Cheap printers have receive buffers of a few kilobytes. Writes are split
//! into `chunk_size` pieces with a short pause after each one.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::io::AsRawFd;
use std::path::Path;
use std::thread;
use std::time::Duration;

use super::Transport;
use crate::error::{BluberryError, Result};

/// Default RFCOMM device path
pub const DEFAULT_DEVICE: &str = "/dev/rfcomm0";

/// Bytes per write.
pub const CHUNK_SIZE: usize = 4096;

/// Pause between chunks.
const CHUNK_DELAY_MS: u64 = 2;

/// RFCOMM printer connection.
pub struct BluetoothTransport {
    file: File,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl BluetoothTransport {
    /// Open `device` for writing and put it in raw mode.
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self> {
        let path = device.as_ref();

        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            BluberryError::Transport(format!("Failed to open {}: {}", path.display(), e))
        })?;
        configure_tty_raw(file.as_raw_fd())?;

        log::info!("opened printer at {}", path.display());
        Ok(Self {
            file,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        })
    }

    /// Bytes per write; printers with small receive buffers want less.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }
}

impl Transport for BluetoothTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        write_chunked(&mut self.file, data, self.chunk_size, self.chunk_delay)?;
        log::info!("sent {} bytes to printer", data.len());
        Ok(())
    }
}

/// Write `data` in pieces of at most `chunk_size` bytes, sleeping `delay`
/// after each piece when there is more to come, then flush.
fn write_chunked<W: Write>(
    writer: &mut W,
    data: &[u8],
    chunk_size: usize,
    delay: Duration,
) -> Result<()> {
    let mut chunks = data.chunks(chunk_size.max(1)).peekable();
    while let Some(chunk) = chunks.next() {
        writer
            .write_all(chunk)
            .map_err(|e| BluberryError::Transport(format!("Write failed: {}", e)))?;
        if chunks.peek().is_some() && !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    writer
        .flush()
        .map_err(|e| BluberryError::Transport(format!("Flush failed: {}", e)))
}

#[cfg(unix)]
fn configure_tty_raw(fd: i32) -> Result<()> {
    use std::mem::MaybeUninit;

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(BluberryError::Transport(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(BluberryError::Transport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_fd: i32) -> Result<()> {
    Ok(())
}
