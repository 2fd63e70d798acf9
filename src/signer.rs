use crate::errors::{RelayerClientException, Result};
use crate::http_helpers::rpc_request;
use crate::utils::{strip_hex_prefix, to_hex_string};
use alloy::signers::local::PrivateKeySigner;
use alloy_primitives::{Address, B256, U256};
use alloy_signer::{Signer as AlloySigner, SignerSync};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

/// Holds the EOA key for the lifetime of the client. Read-only after
/// construction, so it can be shared across threads.
pub struct Signer {
    wallet: PrivateKeySigner,
    chain_id: u64,
    rpc_url: Option<String>,
}

impl Signer {
    pub fn new(private_key: &str, chain_id: u64) -> Result<Self> {
        let mut wallet = PrivateKeySigner::from_str(private_key).map_err(|e| {
            RelayerClientException::invalid_input(format!("Invalid private key: {}", e))
        })?;
        wallet.set_chain_id(Some(chain_id));

        Ok(Signer {
            wallet,
            chain_id,
            rpc_url: None,
        })
    }

    /// Enables `eth_estimateGas` against the given JSON-RPC endpoint.
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = Some(rpc_url.into());
        self
    }

    pub fn address(&self) -> Address {
        AlloySigner::address(&self.wallet)
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Signs the hash as-is, without any message prefix.
    pub fn sign(&self, message_hash: &[u8; 32]) -> Result<String> {
        let sig = self
            .wallet
            .sign_hash_sync(&B256::from(*message_hash))
            .map_err(|e| RelayerClientException::SignatureFormat(format!("Signing failed: {}", e)))?;
        Ok(to_hex_string(&sig.as_bytes()))
    }

    /// Signs `keccak256("\x19Ethereum Signed Message:\n32" ++ hash)`.
    pub fn sign_eip191(&self, message_hash: &[u8; 32]) -> Result<String> {
        let sig = self.wallet.sign_message_sync(message_hash).map_err(|e| {
            RelayerClientException::SignatureFormat(format!("EIP191 signing failed: {}", e))
        })?;
        Ok(to_hex_string(&sig.as_bytes()))
    }

    /// Calls `eth_estimateGas` on the configured RPC endpoint. Every failure
    /// mode is reported as `NetworkDegraded`.
    pub fn estimate_gas(&self, from: &Address, to: &Address, data: &str) -> Result<U256> {
        let rpc_url = self.rpc_url.as_deref().ok_or_else(|| {
            RelayerClientException::NetworkDegraded("no RPC URL configured".to_string())
        })?;

        let params = json!([{
            "from": from.to_string(),
            "to": to.to_string(),
            "data": data,
        }]);
        let result = rpc_request(rpc_url, "eth_estimateGas", params)
            .map_err(|e| RelayerClientException::NetworkDegraded(e.to_string()))?;

        let quantity = result.as_str().ok_or_else(|| {
            RelayerClientException::NetworkDegraded(format!(
                "unexpected eth_estimateGas result: {}",
                result
            ))
        })?;
        U256::from_str_radix(strip_hex_prefix(quantity), 16).map_err(|e| {
            RelayerClientException::NetworkDegraded(format!(
                "invalid gas quantity {:?}: {}",
                quantity, e
            ))
        })
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("address", &self.address())
            .field("chain_id", &self.chain_id)
            .field("rpc_url", &self.rpc_url)
            .finish()
    }
}
