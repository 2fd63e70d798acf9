pub mod base;
pub mod create_proxy;
pub mod safe_tx;

pub use base::eip712_domain;
pub use create_proxy::{create_proxy_signing_hash, CreateProxy};
pub use safe_tx::{safe_tx_signing_hash, SafeTx};
