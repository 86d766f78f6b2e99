use crate::config::ServerConfig;
use crate::shared_types::*;
use crate::store::KvStore;
use crate::Result;
use futures::future::{self, Future};
use futures_util::StreamExt;
use slog::{debug, info, warn, Logger};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tarpc::context;
use tarpc::server::{self, Channel};
use tarpc::tokio_serde::formats::Json;

const GREETING_PREFIX: &str = "Hello ";

#[derive(Clone)]
pub struct KvServer {
    store: Arc<KvStore>,
    logger: Logger,
    // Connection counter
    connection_count: Arc<AtomicUsize>,
    // Maximum allowed concurrent connections
    max_connections: usize,
    max_frame_length: usize,
}

impl KvServer {
    pub fn new(config: &ServerConfig, logger: Logger) -> Self {
        KvServer {
            store: Arc::new(KvStore::new()),
            logger,
            connection_count: Arc::new(AtomicUsize::new(0)),
            max_connections: config.max_connections,
            max_frame_length: config.max_frame_length,
        }
    }

    /// Bind `addr` and return the bound address with the future that serves
    /// every incoming connection. The future never completes on its own.
    pub async fn bind(
        self,
        addr: SocketAddr,
    ) -> Result<(SocketAddr, impl Future<Output = ()> + Send)> {
        let mut listener = tarpc::serde_transport::tcp::listen(&addr, Json::default).await?;
        listener.config_mut().max_frame_length(self.max_frame_length);
        let local_addr = listener.local_addr();

        info!(self.logger, "server listening";
            "addr" => %local_addr,
            "max_connections" => self.max_connections);

        let serving = listener
            // Ignore accept errors.
            .filter_map(|r| future::ready(r.ok()))
            .map(server::BaseChannel::with_defaults)
            .for_each(move |channel| {
                let server = self.clone();
                async move {
                    let peer_addr = match channel.transport().peer_addr() {
                        Ok(addr) => addr.to_string(),
                        Err(_) => "unknown".to_owned(),
                    };

                    let current_count = server.connection_count.load(Ordering::SeqCst);
                    if current_count >= server.max_connections {
                        warn!(server.logger, "connection limit reached, rejecting";
                            "peer" => &peer_addr,
                            "active" => current_count);
                        return;
                    }

                    let count = server.connection_count.fetch_add(1, Ordering::SeqCst) + 1;
                    info!(server.logger, "new connection";
                        "peer" => &peer_addr,
                        "active" => count);

                    let counter = server.connection_count.clone();
                    let logger = server.logger.clone();

                    let fut = channel.execute(server.serve());

                    tokio::spawn(async move {
                        fut.await;

                        let remaining = counter.fetch_sub(1, Ordering::SeqCst) - 1;
                        info!(logger, "client disconnected";
                            "peer" => &peer_addr,
                            "active" => remaining);
                    });
                }
            });

        Ok((local_addr, serving))
    }

    /// Bind the configured address and serve until the process exits.
    pub async fn run(config: &ServerConfig, logger: Logger) -> Result<()> {
        config.validate()?;
        let (_, serving) = KvServer::new(config, logger).bind(config.socket_addr()).await?;
        serving.await;
        Ok(())
    }
}

impl KeyValueService for KvServer {
    type GreetFut = future::Ready<GreetResponse>;
    type SetValueFut = future::Ready<std::result::Result<KeyValueResponse, InvalidOperation>>;
    type GetValueFut = future::Ready<std::result::Result<KeyValueResponse, InvalidOperation>>;

    fn greet(self, _: context::Context, req: GreetRequest) -> Self::GreetFut {
        future::ready(GreetResponse {
            message: format!("{}{}", GREETING_PREFIX, req.name),
        })
    }

    fn set_value(self, _: context::Context, req: SetRequest) -> Self::SetValueFut {
        let SetRequest { key, value } = req;
        let result = match self.store.set(key.clone(), value.clone()) {
            Ok(()) => {
                info!(self.logger, "set"; "key" => &key, "value" => &value);
                Ok(KeyValueResponse { value: None })
            }
            Err(e) => {
                warn!(self.logger, "rejected set"; "key" => &key, "error" => %e);
                Err(e)
            }
        };
        future::ready(result)
    }

    fn get_value(self, _: context::Context, req: GetRequest) -> Self::GetValueFut {
        debug!(self.logger, "get"; "key" => &req.key);
        let result = self
            .store
            .get(&req.key)
            .map(|value| KeyValueResponse { value: Some(value) });
        future::ready(result)
    }
}
