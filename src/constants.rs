use alloy_primitives::Address;

pub const ZERO_ADDRESS: Address = Address::ZERO;

pub const SAFE_INIT_CODE_HASH: &str =
    "0x2bce2127ff07fb632d16c8347c4ebf501f4841168bed00d9e6ef715ddb6fcecf";

pub const PROXY_INIT_CODE_HASH: &str =
    "0xd21df8dc65880a8606f09fe0ce3df9b8869287ab0b058be05aa9e8af6330a00b";

/// EIP-712 domain name of the safe factory, used for SAFE-CREATE signatures.
pub const SAFE_FACTORY_NAME: &str = "Polymarket Contract Proxy Factory";

/// keccak256("multiSend(bytes)")[..4]
pub const MULTISEND_SELECTOR: [u8; 4] = [0x8d, 0x80, 0xff, 0x0a];

/// RelayHub struct hash prefix.
pub const RELAY_HUB_PREFIX: &[u8] = b"rlx:";

pub const DEFAULT_GAS_LIMIT: u64 = 10_000_000;
