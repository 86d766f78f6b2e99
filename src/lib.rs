//! A greeter and a shared key-value store served over tarpc.

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod shared_types;
pub mod store;

pub use client::KvClient;
pub use config::{ClientConfig, ServerConfig};
pub use error::{Error, Result};
pub use server::KvServer;
pub use shared_types::*;
pub use store::KvStore;
