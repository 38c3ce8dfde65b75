//! Text-safe encodings for printer payloads.

pub mod hex;

pub use self::hex::{HexCase, from_hex, to_hex};
