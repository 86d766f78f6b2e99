use crate::config::ClientConfig;
use crate::shared_types::*;
use crate::{Error, Result};
use slog::{debug, error, info, Logger};
use std::time::{Duration, SystemTime};
use tarpc::tokio_serde::formats::Json;
use tarpc::{client, context};

/// Returned by [`KvClient::say_hello`] when the call fails.
pub const RPC_FAILED: &str = "RPC failed";
/// Returned by [`KvClient::get_key`] when the call fails.
pub const NOT_FOUND: &str = "not found";

/// Client stub over a single connection to the server.
///
/// `greet`, `set` and `get` return structured errors. `say_hello`, `set_key`
/// and `get_key` keep the sentinel-string behaviour for callers that only
/// want a printable answer.
#[derive(Clone)]
pub struct KvClient {
    inner: KeyValueServiceClient,
    timeout: Duration,
    logger: Logger,
}

impl KvClient {
    pub async fn connect(config: &ClientConfig, logger: Logger) -> Result<Self> {
        debug!(logger, "connecting"; "addr" => &config.addr);
        let transport =
            tarpc::serde_transport::tcp::connect(config.addr.clone(), Json::default).await?;
        info!(logger, "connected"; "addr" => &config.addr);

        let inner = KeyValueServiceClient::new(client::Config::default(), transport).spawn();
        Ok(KvClient {
            inner,
            timeout: config.timeout,
            logger,
        })
    }

    fn context(&self) -> context::Context {
        let mut ctx = context::current();
        ctx.deadline = SystemTime::now() + self.timeout;
        ctx
    }

    pub async fn greet(&self, name: &str) -> Result<String> {
        let resp = self
            .inner
            .greet(
                self.context(),
                GreetRequest {
                    name: name.to_owned(),
                },
            )
            .await?;
        Ok(resp.message)
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner
            .set_value(
                self.context(),
                SetRequest {
                    key: key.to_owned(),
                    value: value.to_owned(),
                },
            )
            .await??;
        Ok(())
    }

    /// An absent key comes back as [`Error::KeyNotFound`].
    pub async fn get(&self, key: &str) -> Result<String> {
        let resp = self
            .inner
            .get_value(
                self.context(),
                GetRequest {
                    key: key.to_owned(),
                },
            )
            .await??;
        resp.value.ok_or_else(|| Error::KeyNotFound(key.to_owned()))
    }

    pub async fn say_hello(&self, name: &str) -> String {
        match self.greet(name).await {
            Ok(message) => message,
            Err(e) => {
                error!(self.logger, "greet failed"; "error" => %e);
                RPC_FAILED.to_owned()
            }
        }
    }

    /// Fire-and-forget: the outcome is only logged.
    pub async fn set_key(&self, key: &str, value: &str) {
        if let Err(e) = self.set(key, value).await {
            debug!(self.logger, "set failed"; "key" => key, "error" => %e);
        }
    }

    pub async fn get_key(&self, key: &str) -> String {
        match self.get(key).await {
            Ok(value) => value,
            Err(e) => {
                debug!(self.logger, "get failed"; "key" => key, "error" => %e);
                NOT_FOUND.to_owned()
            }
        }
    }
}
