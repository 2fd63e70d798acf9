pub mod proxy;
pub mod safe;

pub use proxy::encode_proxy_transaction_data;
pub use safe::create_safe_multisend_transaction;
