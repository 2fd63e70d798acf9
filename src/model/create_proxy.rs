use crate::constants::SAFE_FACTORY_NAME;
use crate::model::base::eip712_domain;
use alloy::sol;
use alloy::sol_types::SolStruct;
use alloy_primitives::{Address, B256};

sol! {
    #[derive(Debug)]
    struct CreateProxy {
        address paymentToken;
        uint256 payment;
        address paymentReceiver;
    }
}

/// Hash the Safe factory at `safe_factory` verifies before deploying a Safe.
pub fn create_proxy_signing_hash(
    create_proxy: &CreateProxy,
    chain_id: u64,
    safe_factory: &Address,
) -> B256 {
    create_proxy.eip712_signing_hash(&eip712_domain(
        Some(SAFE_FACTORY_NAME),
        chain_id,
        *safe_factory,
    ))
}
