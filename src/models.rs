use alloy_primitives::{Address, U256};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Call = 0,
    DelegateCall = 1,
}

impl OperationType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Call kind understood by the proxy wallet's `proxy(...)` entrypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallType {
    Invalid = 0,
    Call = 1,
    DelegateCall = 2,
}

impl CallType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<OperationType> for CallType {
    fn from(op: OperationType) -> Self {
        match op {
            OperationType::Call => CallType::Call,
            OperationType::DelegateCall => CallType::DelegateCall,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeTransaction {
    pub to: Address,
    pub operation: OperationType,
    pub data: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTransaction {
    pub to: Address,
    pub type_code: CallType,
    pub data: String,
    pub value: String,
}

impl From<&SafeTransaction> for ProxyTransaction {
    fn from(tx: &SafeTransaction) -> Self {
        ProxyTransaction {
            to: tx.to,
            type_code: tx.operation.into(),
            data: tx.data.clone(),
            value: tx.value.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "SAFE")]
    Safe,
    #[serde(rename = "SAFE-CREATE")]
    SafeCreate,
    #[serde(rename = "PROXY")]
    Proxy,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Safe => "SAFE",
            TransactionType::SafeCreate => "SAFE-CREATE",
            TransactionType::Proxy => "PROXY",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wallet kind a client submits for: a Safe, or a legacy RelayHub proxy wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelayerTxType {
    #[default]
    Safe,
    Proxy,
}

/// Signature parameters submitted alongside a request. Each transaction type
/// carries only its own fields; serializes as a flat camelCase object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SignatureParams {
    #[serde(rename_all = "camelCase")]
    Safe {
        gas_price: String,
        operation: String,
        safe_txn_gas: String,
        base_gas: String,
        gas_token: String,
        refund_receiver: String,
    },
    #[serde(rename_all = "camelCase")]
    SafeCreate {
        payment_token: String,
        payment: String,
        payment_receiver: String,
    },
    #[serde(rename_all = "camelCase")]
    Proxy {
        gas_price: String,
        gas_limit: String,
        relayer_fee: String,
        relay_hub: String,
        relay: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRequest {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(rename = "from")]
    pub from_address: String,
    pub to: String,
    #[serde(rename = "proxyWallet")]
    pub proxy: String,
    pub data: String,
    pub signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "signatureParams")]
    pub signature_params: SignatureParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SafeTransactionArgs {
    pub from_address: Address,
    pub nonce: String,
    pub chain_id: u64,
    pub transactions: Vec<SafeTransaction>,
}

#[derive(Debug, Clone)]
pub struct SafeCreateTransactionArgs {
    pub from_address: Address,
    pub chain_id: u64,
    pub payment_token: Address,
    pub payment: String,
    pub payment_receiver: Address,
}

#[derive(Debug, Clone)]
pub struct ProxyTransactionArgs {
    pub from_address: Address,
    pub nonce: String,
    pub gas_price: String,
    /// `None` or `"0"` means "estimate, or fall back to the default".
    pub gas_limit: Option<String>,
    pub data: String,
    pub relay: Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayerTransactionState {
    #[serde(rename = "STATE_NEW")]
    StateNew,
    #[serde(rename = "STATE_EXECUTED")]
    StateExecuted,
    #[serde(rename = "STATE_MINED")]
    StateMined,
    #[serde(rename = "STATE_INVALID")]
    StateInvalid,
    #[serde(rename = "STATE_CONFIRMED")]
    StateConfirmed,
    #[serde(rename = "STATE_FAILED")]
    StateFailed,
}

impl RelayerTransactionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayerTransactionState::StateNew => "STATE_NEW",
            RelayerTransactionState::StateExecuted => "STATE_EXECUTED",
            RelayerTransactionState::StateMined => "STATE_MINED",
            RelayerTransactionState::StateInvalid => "STATE_INVALID",
            RelayerTransactionState::StateConfirmed => "STATE_CONFIRMED",
            RelayerTransactionState::StateFailed => "STATE_FAILED",
        }
    }
}

impl FromStr for RelayerTransactionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STATE_NEW" => Ok(RelayerTransactionState::StateNew),
            "STATE_EXECUTED" => Ok(RelayerTransactionState::StateExecuted),
            "STATE_MINED" => Ok(RelayerTransactionState::StateMined),
            "STATE_INVALID" => Ok(RelayerTransactionState::StateInvalid),
            "STATE_CONFIRMED" => Ok(RelayerTransactionState::StateConfirmed),
            "STATE_FAILED" => Ok(RelayerTransactionState::StateFailed),
            other => Err(format!("unknown relayer transaction state: {}", other)),
        }
    }
}

/// The relayer reports nonces either as a decimal string or a JSON number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) if n.is_u64() => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected nonce as string or unsigned number, got {}",
            other
        ))),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoncePayload {
    #[serde(deserialize_with = "string_or_number")]
    pub nonce: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeployedPayload {
    pub deployed: bool,
}

/// Relay address and RelayHub nonce handed out by the relayer for PROXY
/// transactions.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayPayload {
    pub address: String,
    #[serde(deserialize_with = "string_or_number")]
    pub nonce: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitTransactionResponse {
    #[serde(rename = "transactionID")]
    pub transaction_id: Option<String>,
    #[serde(rename = "transactionHash")]
    pub transaction_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSig {
    pub r: U256,
    pub s: U256,
    pub v: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(params: SignatureParams) -> TransactionRequest {
        TransactionRequest {
            transaction_type: TransactionType::SafeCreate,
            from_address: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string(),
            to: "0xaacFeEa03eb1561C4e67d661e40682Bd20E3541b".to_string(),
            proxy: "0x6d8c4e9aDF5748Af82Dabe2C6225207770d6B4fa".to_string(),
            data: "0x".to_string(),
            signature: "0x00".to_string(),
            value: None,
            signature_params: params,
            nonce: None,
            metadata: None,
        }
    }

    #[test]
    fn safe_create_request_omits_unset_fields() {
        let req = request(SignatureParams::SafeCreate {
            payment_token: "0x0000000000000000000000000000000000000000".to_string(),
            payment: "0".to_string(),
            payment_receiver: "0x0000000000000000000000000000000000000000".to_string(),
        });
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "SAFE-CREATE",
                "from": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
                "to": "0xaacFeEa03eb1561C4e67d661e40682Bd20E3541b",
                "proxyWallet": "0x6d8c4e9aDF5748Af82Dabe2C6225207770d6B4fa",
                "data": "0x",
                "signature": "0x00",
                "signatureParams": {
                    "paymentToken": "0x0000000000000000000000000000000000000000",
                    "payment": "0",
                    "paymentReceiver": "0x0000000000000000000000000000000000000000"
                }
            })
        );
    }

    #[test]
    fn signature_params_variants_use_camel_case_keys() {
        let safe = serde_json::to_value(SignatureParams::Safe {
            gas_price: "0".to_string(),
            operation: "1".to_string(),
            safe_txn_gas: "0".to_string(),
            base_gas: "0".to_string(),
            gas_token: "0x0".to_string(),
            refund_receiver: "0x0".to_string(),
        })
        .unwrap();
        let keys: Vec<_> = safe.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys.len(),
            6,
            "unexpected safe signature params: {:?}",
            keys
        );
        assert!(safe.get("safeTxnGas").is_some());
        assert!(safe.get("refundReceiver").is_some());

        let proxy = serde_json::to_value(SignatureParams::Proxy {
            gas_price: "0".to_string(),
            gas_limit: "10000000".to_string(),
            relayer_fee: "0".to_string(),
            relay_hub: "0xhub".to_string(),
            relay: "0xrelay".to_string(),
        })
        .unwrap();
        assert_eq!(
            proxy,
            json!({
                "gasPrice": "0",
                "gasLimit": "10000000",
                "relayerFee": "0",
                "relayHub": "0xhub",
                "relay": "0xrelay"
            })
        );
    }

    #[test]
    fn relayer_state_round_trips_through_str() {
        for state in [
            RelayerTransactionState::StateNew,
            RelayerTransactionState::StateMined,
            RelayerTransactionState::StateFailed,
        ] {
            assert_eq!(state.as_str().parse::<RelayerTransactionState>(), Ok(state));
        }
        assert!("MINED".parse::<RelayerTransactionState>().is_err());
    }

    #[test]
    fn nonces_accept_string_or_number() {
        let payload: NoncePayload = serde_json::from_value(json!({"nonce": "12"})).unwrap();
        assert_eq!(payload.nonce, "12");
        let payload: NoncePayload = serde_json::from_value(json!({"nonce": 12})).unwrap();
        assert_eq!(payload.nonce, "12");
        assert!(serde_json::from_value::<NoncePayload>(json!({"nonce": null})).is_err());
        assert!(serde_json::from_value::<NoncePayload>(json!({"nonce": -1})).is_err());
        assert!(serde_json::from_value::<NoncePayload>(json!({})).is_err());

        let relay: RelayPayload = serde_json::from_value(json!({
            "address": "0x7ea5da79d8a3c7d2a05fd4e9b0cddce0dd3c5a1f",
            "nonce": 31
        }))
        .unwrap();
        assert_eq!(relay.nonce, "31");
    }

    #[test]
    fn deployed_flag_is_required() {
        let payload: DeployedPayload =
            serde_json::from_value(json!({"deployed": true})).unwrap();
        assert!(payload.deployed);
        assert!(serde_json::from_value::<DeployedPayload>(json!({})).is_err());
        assert!(serde_json::from_value::<DeployedPayload>(json!({"deployed": "yes"})).is_err());
    }

    #[test]
    fn safe_operation_maps_to_proxy_call_type() {
        assert_eq!(CallType::from(OperationType::Call).as_u8(), 1);
        assert_eq!(CallType::from(OperationType::DelegateCall).as_u8(), 2);
    }
}
