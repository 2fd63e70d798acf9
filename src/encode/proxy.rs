use crate::errors::Result;
use crate::models::ProxyTransaction;
use crate::utils::{decode_hex, parse_u256, to_hex_string};
use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
    struct ProxyCall {
        uint8 typeCode;
        address to;
        uint256 value;
        bytes data;
    }

    function proxy(ProxyCall[] calls);
}

/// Encodes a `proxy((uint8,address,uint256,bytes)[])` call batching `txns`.
pub fn encode_proxy_transaction_data(txns: &[ProxyTransaction]) -> Result<String> {
    let calls = txns
        .iter()
        .map(|txn| {
            Ok(ProxyCall {
                typeCode: txn.type_code.as_u8(),
                to: txn.to,
                value: parse_u256(&txn.value, "value")?,
                data: decode_hex(&txn.data)?.into(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(to_hex_string(&proxyCall { calls }.abi_encode()))
}
