pub mod client;
pub mod protocol;
pub mod transport;

pub use client::DaemonClient;
pub use protocol::{Command, Endian, Parameter, Reply, ReplyStatus};
pub use transport::{Transport, UnixTransport, RECEIVE_LIMIT};
