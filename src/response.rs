use crate::client::{RelayClient, RelayService};
use crate::errors::{RelayerClientException, Result};
use crate::models::RelayerTransactionState;
use serde_json::Value;
use std::fmt::{Debug, Formatter};

const WAIT_MAX_POLLS: usize = 30;
const WAIT_POLL_FREQUENCY_MS: u64 = 2000;

/// Handle returned from a submission; borrows the client it was sent through.
pub struct ClientRelayerTransactionResponse<'a> {
    pub transaction_id: Option<String>,
    pub transaction_hash: Option<String>,
    client: &'a RelayClient,
}

impl<'a> ClientRelayerTransactionResponse<'a> {
    pub fn new(
        transaction_id: Option<String>,
        transaction_hash: Option<String>,
        client: &'a RelayClient,
    ) -> Self {
        ClientRelayerTransactionResponse {
            transaction_id,
            transaction_hash,
            client,
        }
    }

    pub fn hash(&self) -> Option<&str> {
        self.transaction_hash.as_deref()
    }

    pub fn get_transaction(&self) -> Result<Value> {
        let id = self
            .transaction_id
            .as_deref()
            .ok_or_else(|| RelayerClientException::invalid_input("No transaction ID"))?;
        self.client.get_transaction(id)
    }

    /// Blocks until the transaction is mined or confirmed. `None` if it failed
    /// or never settled.
    pub fn wait(&self) -> Result<Option<Value>> {
        let Some(transaction_id) = self.transaction_id.as_deref() else {
            return Ok(None);
        };

        self.client.poll_until_state(
            transaction_id,
            &[
                RelayerTransactionState::StateMined,
                RelayerTransactionState::StateConfirmed,
            ],
            Some(RelayerTransactionState::StateFailed),
            Some(WAIT_MAX_POLLS),
            Some(WAIT_POLL_FREQUENCY_MS),
        )
    }
}

impl Debug for ClientRelayerTransactionResponse<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientRelayerTransactionResponse")
            .field("transaction_id", &self.transaction_id)
            .field("transaction_hash", &self.transaction_hash)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_id_short_circuits() {
        let client = RelayClient::new("https://relayer.example", 137, None, None).unwrap();
        let resp = ClientRelayerTransactionResponse::new(None, Some("0xabc".to_string()), &client);

        assert_eq!(resp.hash(), Some("0xabc"));
        assert!(resp.wait().unwrap().is_none());
        assert!(matches!(
            resp.get_transaction(),
            Err(RelayerClientException::InvalidInput(_))
        ));
    }
}
