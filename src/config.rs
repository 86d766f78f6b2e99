use crate::{Error, Result};
use clap::{Args, Parser};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 50051;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
/// Largest request frame the server accepts, matching the codec default.
pub const DEFAULT_MAX_FRAME_LENGTH: usize = 8 * 1024 * 1024;

fn default_client_addr() -> String {
    format!("localhost:{}", DEFAULT_PORT)
}

/// Listening options for `kv-server`.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "kv-server", version, about = "Greeter and key-value RPC server")]
pub struct ServerConfig {
    /// IP address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub address: IpAddr,
    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Maximum number of clients connected at once
    #[arg(long, default_value_t = 10)]
    pub max_connections: usize,
    /// Largest frame in bytes; a peer announcing a bigger one is dropped
    #[arg(long, default_value_t = DEFAULT_MAX_FRAME_LENGTH)]
    pub max_frame_length: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_connections: 10,
            max_frame_length: DEFAULT_MAX_FRAME_LENGTH,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_connections == 0 {
            return Err(Error::Config("max-connections must be at least 1".into()));
        }
        if self.max_frame_length == 0 {
            return Err(Error::Config("max-frame-length must be at least 1".into()));
        }
        Ok(())
    }
}

/// Where the client connects and how long each call may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub addr: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientArgs::default().into()
    }
}

/// Connection flags shared by client command lines.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ClientArgs {
    /// Server address
    #[arg(long, default_value_t = default_client_addr())]
    pub addr: String,
    /// Per-call deadline in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl Default for ClientArgs {
    fn default() -> Self {
        ClientArgs {
            addr: default_client_addr(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl From<ClientArgs> for ClientConfig {
    fn from(args: ClientArgs) -> Self {
        ClientConfig {
            addr: args.addr,
            timeout: Duration::from_secs(args.timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_defaults() {
        let config = ServerConfig::try_parse_from(["kv-server"]).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:50051");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn server_overrides() {
        let config = ServerConfig::try_parse_from([
            "kv-server",
            "--address",
            "::1",
            "--port",
            "8080",
            "--max-connections",
            "3",
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "[::1]:8080");
        assert_eq!(config.max_connections, 3);
        assert_eq!(config.max_frame_length, DEFAULT_MAX_FRAME_LENGTH);
    }

    #[test]
    fn zero_frame_length_is_rejected() {
        let config = ServerConfig::try_parse_from(["kv-server", "--max-frame-length", "0"]).unwrap();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[derive(Parser, Debug)]
    struct ClientCli {
        #[command(flatten)]
        connection: ClientArgs,
    }

    #[test]
    fn client_flags_default_to_client_config() {
        let cli = ClientCli::try_parse_from(["kv-client"]).unwrap();
        let config = ClientConfig::from(cli.connection);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.addr, "localhost:50051");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn client_flags_override() {
        let cli =
            ClientCli::try_parse_from(["kv-client", "--addr", "10.0.0.1:9000", "--timeout", "1"])
                .unwrap();
        let config = ClientConfig::from(cli.connection);
        assert_eq!(config.addr, "10.0.0.1:9000");
        assert_eq!(config.timeout, Duration::from_secs(1));
    }

    #[test]
    fn zero_connections_is_rejected() {
        let config = ServerConfig {
            max_connections: 0,
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn bad_port_does_not_parse() {
        assert!(ServerConfig::try_parse_from(["kv-server", "--port", "70000"]).is_err());
    }
}
