use alloy::sol_types::Eip712Domain;
use alloy_primitives::{Address, U256};
use std::borrow::Cow;

/// Domain with only `chainId` and `verifyingContract`, plus `name` when given.
pub fn eip712_domain(
    name: Option<&'static str>,
    chain_id: u64,
    verifying_contract: Address,
) -> Eip712Domain {
    Eip712Domain {
        name: name.map(Cow::Borrowed),
        chain_id: Some(U256::from(chain_id)),
        verifying_contract: Some(verifying_contract),
        ..Eip712Domain::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256, keccak256};

    #[test]
    fn unnamed_domain_matches_safe_contract() {
        let domain = eip712_domain(
            None,
            137,
            address!("0xd93B25cb943D14d0d34FBaF01Fc93a0f8b5F6E47"),
        );
        assert_eq!(
            domain.encode_type(),
            "EIP712Domain(uint256 chainId,address verifyingContract)"
        );
        assert_eq!(
            domain.type_hash(),
            b256!("0x47e79534a245952e8b16893a336b85a3d9ea9fa8c573f3d803afb92a79469218")
        );
    }

    #[test]
    fn named_domain_hashes_name() {
        let verifying_contract = address!("0xaacFeEa03eb1561C4e67d661e40682Bd20E3541b");
        let domain = eip712_domain(Some("Polymarket Contract Proxy Factory"), 137, verifying_contract);
        assert_eq!(
            domain.encode_type(),
            "EIP712Domain(string name,uint256 chainId,address verifyingContract)"
        );

        let mut encoded = domain.type_hash().to_vec();
        encoded.extend_from_slice(keccak256("Polymarket Contract Proxy Factory").as_slice());
        encoded.extend_from_slice(&U256::from(137u64).to_be_bytes::<32>());
        encoded.extend_from_slice(verifying_contract.into_word().as_slice());
        assert_eq!(domain.separator(), keccak256(&encoded));
    }
}
