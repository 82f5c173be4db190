// ops/src/state.rs

// --- Imports ---
use crate::config::Config;
use ethers::{
    prelude::*,
    types::{Address, Chain},
};
use eyre::{Result, WrapErr};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Signer-backed client every state-changing command goes through.
pub type OpsClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Per-invocation state: configuration plus the connected signer.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub client: Arc<OpsClient>,
    pub chain_id: u64,
    /// `None` when the chain id is not one `ethers` knows by name.
    pub chain: Option<Chain>,
}

impl AppState {
    /// Connects to `config.rpc_url` and binds the configured key to the node's chain id.
    #[instrument(skip_all, level = "debug")]
    pub async fn connect(config: Config) -> Result<Self> {
        let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
            .wrap_err_with(|| format!("Invalid RPC_URL: {}", config.rpc_url))?;
        let chain_id = provider
            .get_chainid()
            .await
            .wrap_err("Failed to fetch chain id from RPC")?
            .as_u64();
        let wallet = config
            .private_key
            .parse::<LocalWallet>()
            .wrap_err("PRIVATE_KEY is not a valid secp256k1 key")?
            .with_chain_id(chain_id);
        let client = Arc::new(SignerMiddleware::new(provider, wallet));
        let chain = Chain::try_from(chain_id).ok();
        if chain.is_none() {
            warn!(chain_id, "Connected to an unnamed chain");
        }
        info!(chain_id, signer = ?client.address(), "Provider & client setup complete");
        Ok(Self { config, client, chain_id, chain })
    }

    pub fn signer_address(&self) -> Address {
        self.client.address()
    }

    /// Human-readable network name ("sepolia", "mainnet", or "chain-<id>").
    pub fn network_name(&self) -> String {
        network_name(self.chain, self.chain_id)
    }
}

pub fn network_name(chain: Option<Chain>, chain_id: u64) -> String {
    match chain {
        Some(chain) => chain.to_string(),
        None => format!("chain-{}", chain_id),
    }
}

// END OF FILE: ops/src/state.rs
