use crate::auth::BuilderConfig;
use crate::builder::{
    build_proxy_transaction_request, build_safe_create_transaction_request,
    build_safe_transaction_request, derive, derive_proxy,
};
use crate::config::ContractConfig;
use crate::constants::ZERO_ADDRESS;
use crate::encode::encode_proxy_transaction_data;
use crate::endpoints::{
    GET_DEPLOYED, GET_NONCE, GET_RELAY_PAYLOAD, GET_TRANSACTION, GET_TRANSACTIONS,
    SUBMIT_TRANSACTION,
};
use crate::errors::{RelayerClientException, Result};
use crate::http_helpers::{get, post, GET, POST};
use crate::models::{
    DeployedPayload, NoncePayload, ProxyTransaction, ProxyTransactionArgs, RelayPayload, RelayerTransactionState, RelayerTxType,
    SafeCreateTransactionArgs, SafeTransaction, SafeTransactionArgs, SubmitTransactionResponse,
    TransactionRequest, TransactionType,
};
use crate::response::ClientRelayerTransactionResponse;
use crate::signer::Signer;
use crate::utils::parse_address;
use alloy_primitives::Address;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::thread;
use std::time::Duration;
use url::Url;

/// Relay service operations the request builders are submitted through.
pub trait RelayService {
    fn submit_transaction(&self, request: &TransactionRequest) -> Result<SubmitTransactionResponse>;

    fn get_transaction(&self, transaction_id: &str) -> Result<Value>;

    fn get_nonce(&self, signer_address: &Address, signer_type: TransactionType) -> Result<String>;

    fn get_deployed(&self, safe_address: &Address) -> Result<bool>;
}

#[derive(Debug)]
pub struct RelayClient {
    relayer_url: String,
    chain_id: u64,
    contract_config: ContractConfig,
    tx_type: RelayerTxType,
    signer: Option<Signer>,
    builder_config: Option<BuilderConfig>,
}

impl RelayClient {
    pub fn new(
        relayer_url: &str,
        chain_id: u64,
        private_key: Option<&str>,
        builder_config: Option<BuilderConfig>,
    ) -> Result<Self> {
        let relayer_url = relayer_url.strip_suffix('/').unwrap_or(relayer_url);
        Url::parse(relayer_url).map_err(|e| {
            RelayerClientException::invalid_input(format!("invalid relayer url {:?}: {}", relayer_url, e))
        })?;

        let contract_config = ContractConfig::for_chain(chain_id)?;
        let signer = private_key
            .map(|pk| Signer::new(pk, chain_id))
            .transpose()?;

        Ok(RelayClient {
            relayer_url: relayer_url.to_string(),
            chain_id,
            contract_config,
            tx_type: RelayerTxType::default(),
            signer,
            builder_config,
        })
    }

    pub fn with_tx_type(mut self, tx_type: RelayerTxType) -> Self {
        self.tx_type = tx_type;
        self
    }

    /// Enables gas estimation for PROXY requests.
    pub fn with_rpc_url(mut self, rpc_url: &str) -> Self {
        self.signer = self.signer.map(|s| s.with_rpc_url(rpc_url));
        self
    }

    pub fn relayer_url(&self) -> &str {
        &self.relayer_url
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn get_relay_payload(
        &self,
        signer_address: &Address,
        signer_type: TransactionType,
    ) -> Result<RelayPayload> {
        let url = format!(
            "{}{}?address={}&type={}",
            self.relayer_url, GET_RELAY_PAYLOAD, signer_address, signer_type
        );
        parse_payload(get(&url, None)?, "relay payload")
    }

    pub fn get_transactions(&self) -> Result<Value> {
        let headers = self
            .builder_config
            .as_ref()
            .map(|b| b.headers(GET, GET_TRANSACTIONS, None))
            .transpose()?;
        let url = format!("{}{}", self.relayer_url, GET_TRANSACTIONS);
        Ok(get(&url, headers)?)
    }

    pub fn execute(
        &self,
        transactions: &[SafeTransaction],
        metadata: Option<&str>,
    ) -> Result<ClientRelayerTransactionResponse<'_>> {
        let signer = self.assert_signer_needed()?;
        self.assert_builder_creds_needed()?;

        let txn_request = match self.tx_type {
            RelayerTxType::Safe => self.build_safe_request(signer, transactions, metadata)?,
            RelayerTxType::Proxy => self.build_proxy_request(signer, transactions, metadata)?,
        };

        let resp = self.submit_transaction(&txn_request)?;
        Ok(ClientRelayerTransactionResponse::new(
            resp.transaction_id,
            resp.transaction_hash,
            self,
        ))
    }

    fn build_safe_request(
        &self,
        signer: &Signer,
        transactions: &[SafeTransaction],
        metadata: Option<&str>,
    ) -> Result<TransactionRequest> {
        let safe_address = self.get_expected_safe()?;
        if !self.get_deployed(&safe_address)? {
            return Err(RelayerClientException::invalid_input(format!(
                "expected safe {} is not deployed",
                safe_address
            )));
        }

        let from_address = signer.address();
        let nonce = self.get_nonce(&from_address, TransactionType::Safe)?;
        log::debug!("safe nonce for {} is {}", from_address, nonce);

        let args = SafeTransactionArgs {
            from_address,
            nonce,
            chain_id: self.chain_id,
            transactions: transactions.to_vec(),
        };
        build_safe_transaction_request(signer, &args, &self.contract_config, metadata)
    }

    fn build_proxy_request(
        &self,
        signer: &Signer,
        transactions: &[SafeTransaction],
        metadata: Option<&str>,
    ) -> Result<TransactionRequest> {
        let from_address = signer.address();
        let relay_payload = self.get_relay_payload(&from_address, TransactionType::Proxy)?;

        let calls: Vec<ProxyTransaction> = transactions.iter().map(ProxyTransaction::from).collect();
        let args = ProxyTransactionArgs {
            from_address,
            nonce: relay_payload.nonce,
            gas_price: "0".to_string(),
            gas_limit: None,
            data: encode_proxy_transaction_data(&calls)?,
            relay: parse_address(&relay_payload.address)?,
        };
        build_proxy_transaction_request(signer, &args, &self.contract_config, metadata)
    }

    pub fn deploy(&self) -> Result<ClientRelayerTransactionResponse<'_>> {
        let signer = self.assert_signer_needed()?;
        self.assert_builder_creds_needed()?;

        let safe_address = self.get_expected_safe()?;
        if self.get_deployed(&safe_address)? {
            return Err(RelayerClientException::invalid_input(format!(
                "safe {} is already deployed!",
                safe_address
            )));
        }

        let args = SafeCreateTransactionArgs {
            from_address: signer.address(),
            chain_id: self.chain_id,
            payment_token: ZERO_ADDRESS,
            payment: "0".to_string(),
            payment_receiver: ZERO_ADDRESS,
        };
        let txn_request =
            build_safe_create_transaction_request(signer, &args, &self.contract_config)?;

        let resp = self.submit_transaction(&txn_request)?;
        Ok(ClientRelayerTransactionResponse::new(
            resp.transaction_id,
            resp.transaction_hash,
            self,
        ))
    }

    /// Polls until the transaction reaches one of `states`. Returns `None`
    /// when it hits `fail_state` or `max_polls` runs out.
    pub fn poll_until_state(
        &self,
        transaction_id: &str,
        states: &[RelayerTransactionState],
        fail_state: Option<RelayerTransactionState>,
        max_polls: Option<usize>,
        poll_frequency: Option<u64>,
    ) -> Result<Option<Value>> {
        let poll_limit = max_polls.unwrap_or(10);
        let poll_frequency_ms = poll_frequency.unwrap_or(2000).max(1000);

        log::info!(
            "Waiting for transaction {} matching states: {:?}...",
            transaction_id,
            states
        );

        for _ in 0..poll_limit {
            let transactions = self.get_transaction(transaction_id)?;
            let txn = transactions.as_array().and_then(|txns| txns.first());

            if let Some(txn) = txn {
                let state = txn
                    .get("state")
                    .and_then(Value::as_str)
                    .and_then(|s| s.parse::<RelayerTransactionState>().ok());

                if let Some(state) = state {
                    if states.contains(&state) {
                        return Ok(Some(txn.clone()));
                    }
                    if fail_state == Some(state) {
                        let txn_hash = txn
                            .get("transactionHash")
                            .and_then(Value::as_str)
                            .unwrap_or("unknown");
                        log::warn!(
                            "txn {} failed onchain, transaction_hash: {}!",
                            transaction_id,
                            txn_hash
                        );
                        return Ok(None);
                    }
                }
            }

            thread::sleep(Duration::from_millis(poll_frequency_ms));
        }

        log::warn!(
            "Transaction {} not found or not in given states, timing out!",
            transaction_id
        );
        Ok(None)
    }

    fn post_request(&self, request_path: &str, body: &TransactionRequest) -> Result<Value> {
        let body = serde_json::to_string(body).map_err(|e| {
            RelayerClientException::invalid_input(format!("Failed to serialize request: {}", e))
        })?;
        let builder_headers = self.generate_builder_headers(POST, request_path, Some(&body))?;
        let url = format!("{}{}", self.relayer_url, request_path);

        Ok(post(&url, Some(builder_headers), Some(body))?)
    }

    fn generate_builder_headers(
        &self,
        method: &str,
        request_path: &str,
        body: Option<&str>,
    ) -> Result<HeaderMap> {
        self.assert_builder_creds_needed()?
            .headers(method, request_path, body)
    }

    pub fn get_expected_safe(&self) -> Result<Address> {
        let signer = self.assert_signer_needed()?;
        derive(&signer.address(), &self.contract_config.safe_factory)
    }

    pub fn get_expected_proxy(&self) -> Result<Address> {
        let signer = self.assert_signer_needed()?;
        let (proxy_factory, _) = self.contract_config.proxy_contracts()?;
        derive_proxy(&signer.address(), &proxy_factory)
    }

    fn assert_signer_needed(&self) -> Result<&Signer> {
        self.signer.as_ref().ok_or_else(|| {
            RelayerClientException::missing_capability("signer is required for this endpoint")
        })
    }

    fn assert_builder_creds_needed(&self) -> Result<&BuilderConfig> {
        self.builder_config.as_ref().ok_or_else(|| {
            RelayerClientException::missing_capability(
                "builder credentials are required for this endpoint",
            )
        })
    }
}

impl RelayService for RelayClient {
    fn submit_transaction(&self, request: &TransactionRequest) -> Result<SubmitTransactionResponse> {
        log::info!(
            "submitting {} transaction from {} via {}",
            request.transaction_type,
            request.from_address,
            request.proxy
        );
        let resp = self.post_request(SUBMIT_TRANSACTION, request)?;
        parse_payload(resp, "submit response")
    }

    fn get_transaction(&self, transaction_id: &str) -> Result<Value> {
        let url = format!(
            "{}{}?id={}",
            self.relayer_url, GET_TRANSACTION, transaction_id
        );
        Ok(get(&url, None)?)
    }

    fn get_nonce(&self, signer_address: &Address, signer_type: TransactionType) -> Result<String> {
        let url = format!(
            "{}{}?address={}&type={}",
            self.relayer_url, GET_NONCE, signer_address, signer_type
        );
        let payload: NoncePayload = parse_payload(get(&url, None)?, "nonce payload")?;
        Ok(payload.nonce)
    }

    fn get_deployed(&self, safe_address: &Address) -> Result<bool> {
        let url = format!(
            "{}{}?address={}",
            self.relayer_url, GET_DEPLOYED, safe_address
        );
        let payload: DeployedPayload = parse_payload(get(&url, None)?, "deployed payload")?;
        Ok(payload.deployed)
    }
}

fn parse_payload<T: DeserializeOwned>(payload: Value, what: &str) -> Result<T> {
    serde_json::from_value(payload).map_err(|e| {
        RelayerClientException::invalid_input(format!("invalid {} received: {}", what, e))
    })
}
