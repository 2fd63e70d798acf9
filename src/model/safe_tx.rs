use crate::model::base::eip712_domain;
use alloy::sol;
use alloy::sol_types::SolStruct;
use alloy_primitives::{Address, B256};

sol! {
    #[derive(Debug)]
    struct SafeTx {
        address to;
        uint256 value;
        bytes data;
        uint8 operation;
        uint256 safeTxGas;
        uint256 baseGas;
        uint256 gasPrice;
        address gasToken;
        address refundReceiver;
        uint256 nonce;
    }
}

/// Hash the Safe at `safe` checks owner signatures against. The domain is
/// unnamed.
pub fn safe_tx_signing_hash(tx: &SafeTx, chain_id: u64, safe: &Address) -> B256 {
    tx.eip712_signing_hash(&eip712_domain(None, chain_id, *safe))
}
