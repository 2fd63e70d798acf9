use crate::constants::MULTISEND_SELECTOR;
use crate::errors::{RelayerClientException, Result};
use crate::models::{OperationType, SafeTransaction};
use crate::utils::{decode_hex, parse_u256, to_hex_string};
use alloy::sol;
use alloy::sol_types::SolCall;
use alloy_primitives::{Address, U256};

sol! {
    function multiSend(bytes transactions);
}

/// Packs one sub-transaction the way `MultiSend` unpacks it:
/// - operation: 1 byte
/// - to: 20 bytes
/// - value: 32 bytes big-endian
/// - data length: 32 bytes big-endian
/// - data: raw bytes, no padding
fn encode_packed(operation: u8, to: &Address, value: U256, data: &[u8], out: &mut Vec<u8>) {
    out.push(operation);
    out.extend_from_slice(to.as_slice());
    out.extend_from_slice(&value.to_be_bytes::<32>());
    out.extend_from_slice(&U256::from(data.len()).to_be_bytes::<32>());
    out.extend_from_slice(data);
}

/// Collapses `txns` into a single `multiSend(bytes)` delegate call against
/// `safe_multisend_address`. Sub-transactions keep their input order.
pub fn create_safe_multisend_transaction(
    txns: &[SafeTransaction],
    safe_multisend_address: &Address,
) -> Result<SafeTransaction> {
    if txns.is_empty() {
        return Err(RelayerClientException::invalid_input(
            "at least one transaction is required",
        ));
    }

    let mut packed = Vec::new();
    for tx in txns {
        let data = decode_hex(&tx.data)?;
        let value = parse_u256(&tx.value, "value")?;
        encode_packed(tx.operation.as_u8(), &tx.to, value, &data, &mut packed);
    }

    let mut full_data = MULTISEND_SELECTOR.to_vec();
    multiSendCall {
        transactions: packed.into(),
    }
    .abi_encode_raw(&mut full_data);

    Ok(SafeTransaction {
        to: *safe_multisend_address,
        operation: OperationType::DelegateCall,
        data: to_hex_string(&full_data),
        value: "0".to_string(),
    })
}
