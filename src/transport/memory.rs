//! In-process transports.

use std::io::Write;

use super::Transport;
use crate::codec::hex::{HexCase, to_hex};
use crate::error::{BluberryError, Result};

/// Collects everything written to it.
#[derive(Debug, Default, Clone)]
pub struct MemoryTransport {
    data: Vec<u8>,
    writes: usize,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// All bytes received so far, in order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of `write_all` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl Transport for MemoryTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.data.extend_from_slice(data);
        self.writes += 1;
        Ok(())
    }
}

/// Writes each payload as one line of hex text.
///
/// For hosts that take a hex string and do the byte conversion
/// themselves, e.g. a mobile plugin reading a pipe.
#[derive(Debug)]
pub struct HexWriter<W: Write> {
    inner: W,
    case: HexCase,
}

impl<W: Write> HexWriter<W> {
    pub fn new(inner: W, case: HexCase) -> Self {
        Self { inner, case }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Transport for HexWriter<W> {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let line = to_hex(data, self.case);
        writeln!(self.inner, "{}", line)
            .and_then(|_| self.inner.flush())
            .map_err(|e| BluberryError::Transport(format!("Hex write failed: {}", e)))
    }
}
