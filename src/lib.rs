pub mod auth;
pub mod builder;
pub mod client;
pub mod config;
pub mod constants;
pub mod encode;
pub mod endpoints;
pub mod errors;
pub mod http_helpers;
pub mod model;
pub mod models;
pub mod response;
pub mod signer;
pub mod utils;

pub use auth::BuilderConfig;
pub use client::{RelayClient, RelayService};
pub use config::ContractConfig;
pub use errors::{RelayerApiException, RelayerClientException};
pub use models::{
    OperationType, ProxyTransaction, RelayerTransactionState, RelayerTxType, SafeTransaction,
    SignatureParams, TransactionRequest, TransactionType,
};
pub use response::ClientRelayerTransactionResponse;
pub use signer::Signer;
