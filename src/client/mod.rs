//! Client context: the request executor the dApp talks to the chain through
//!
//! The kit never performs network I/O itself. The app injects a
//! `RequestExecutor` (RPC client, mock, wasm fetch bridge) plus its network
//! table; `DappKit::client()` hands it back to query/mutate helpers.

use crate::error::{DappKitError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Executes one named request. Retries, if any, belong to the implementation.
#[async_trait(?Send)]
pub trait RequestExecutor {
    async fn execute(&self, method: &str, params: Value) -> Result<Value>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub id: String,
    pub name: String,
    pub url: String,
}

impl NetworkConfig {
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), url: url.into() }
    }
}

/// Network table keyed by id. Later entries with the same id win.
pub fn create_network_config(networks: impl IntoIterator<Item = NetworkConfig>) -> BTreeMap<String, NetworkConfig> {
    networks.into_iter().map(|n| (n.id.clone(), n)).collect()
}

#[derive(Clone)]
pub struct ClientContext {
    network: Rc<RefCell<String>>,
    networks: BTreeMap<String, NetworkConfig>,
    executor: Rc<dyn RequestExecutor>,
}

impl ClientContext {
    pub fn new(network: impl Into<String>, executor: Rc<dyn RequestExecutor>) -> Self {
        Self { network: Rc::new(RefCell::new(network.into())), networks: BTreeMap::new(), executor }
    }

    pub fn with_networks(mut self, networks: BTreeMap<String, NetworkConfig>) -> Self {
        self.networks = networks;
        self
    }

    pub fn network(&self) -> String {
        self.network.borrow().clone()
    }

    pub fn networks(&self) -> &BTreeMap<String, NetworkConfig> {
        &self.networks
    }

    pub fn current_network(&self) -> Option<NetworkConfig> {
        self.networks.get(self.network.borrow().as_str()).cloned()
    }

    /// Switch the active network. Fails if `id` is not in the network table.
    pub fn select_network(&self, id: &str) -> Result<()> {
        if !self.networks.contains_key(id) {
            return Err(DappKitError::Client(format!("unknown network: {}", id)));
        }
        *self.network.borrow_mut() = id.to_string();
        tracing::info!(network = id, "client: network selected");
        Ok(())
    }

    pub fn executor(&self) -> Rc<dyn RequestExecutor> {
        self.executor.clone()
    }

    pub async fn query<P, R>(&self, method: &str, params: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let value = self.executor.execute(method, serde_json::to_value(params)?).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn mutate<P, R>(&self, method: &str, params: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        tracing::debug!(method, network = %self.network.borrow(), "client: mutate");
        self.query(method, params).await
    }
}
