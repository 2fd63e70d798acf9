pub mod create;
pub mod derive;
pub mod proxy;
pub mod safe;
pub mod signature;

pub use create::build_safe_create_transaction_request;
pub use derive::{derive, derive_proxy, get_create2_address};
pub use proxy::build_proxy_transaction_request;
pub use safe::{aggregate_transaction, build_safe_transaction_request};
pub use signature::{pack_signature, split_and_pack_sig, split_signature};
