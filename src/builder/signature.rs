use crate::errors::{RelayerClientException, Result};
use crate::models::SplitSig;
use crate::utils::{decode_hex, to_hex_string};
use alloy_primitives::U256;

/// Splits a 65-byte `r ++ s ++ v` signature and maps `v` into the Safe
/// `eth_sign` range: 0/1 become 31/32, 27/28 become 31/32.
pub fn split_signature(sig_hex: &str) -> Result<SplitSig> {
    let sig = decode_hex(sig_hex)
        .map_err(|e| RelayerClientException::SignatureFormat(e.to_string()))?;

    if sig.len() != 65 {
        return Err(RelayerClientException::SignatureFormat(format!(
            "Invalid signature length: expected 65 bytes, got {}",
            sig.len()
        )));
    }

    let r = U256::from_be_slice(&sig[0..32]);
    let s = U256::from_be_slice(&sig[32..64]);
    let v = match sig[64] {
        v @ (0 | 1) => v + 31,
        v @ (27 | 28) => v + 4,
        v => {
            return Err(RelayerClientException::SignatureFormat(format!(
                "Invalid signature 'v' (expected 0,1,27,28), got {}",
                v
            )))
        }
    };

    Ok(SplitSig { r, s, v })
}

/// Tightly packs `(uint256 r, uint256 s, uint8 v)`.
pub fn pack_signature(sig: &SplitSig) -> String {
    let mut packed = Vec::with_capacity(65);
    packed.extend_from_slice(&sig.r.to_be_bytes::<32>());
    packed.extend_from_slice(&sig.s.to_be_bytes::<32>());
    packed.push(sig.v);
    to_hex_string(&packed)
}

pub fn split_and_pack_sig(sig_hex: &str) -> Result<String> {
    Ok(pack_signature(&split_signature(sig_hex)?))
}
