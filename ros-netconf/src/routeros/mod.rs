//! MikroTik RouterOS API transport.

pub mod client;
pub mod codec;

pub use client::{ConnectError, Credentials, RouterOsSession};
pub use codec::CodecError;
