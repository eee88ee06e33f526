use crate::{SolkitTx, TxParams, TxResult, TxStatus};
use tracing::debug;

/// Drive every transaction in `transactions` to a terminal status.
///
/// Each round performs one `send` + `confirm` pass over every member that is
/// still pending, then sleeps `sleep_between_retry` from `params`. There is
/// no outer deadline: the batch resolves when the last member does, governed
/// entirely by each member's own timeout budget.
///
/// The returned statuses are index-aligned with the input slice regardless
/// of which member terminated first.
pub fn wait_for_batch(transactions: &mut [SolkitTx], params: &TxParams) -> TxResult<Vec<TxStatus>> {
    loop {
        let mut terminal_count = 0;
        let mut results = Vec::with_capacity(transactions.len());

        for tx in transactions.iter_mut() {
            tx.send()?;
            let status = tx.confirm();
            if status.is_terminal() {
                terminal_count += 1;
            }
            results.push(status);
        }

        if terminal_count >= transactions.len() {
            return Ok(results);
        }
        debug!(
            terminal = terminal_count,
            total = transactions.len(),
            "batch still settling"
        );

        if !params.sleep_between_retry.is_zero() {
            std::thread::sleep(params.sleep_between_retry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{blockhash_mock, mock_connection, signed_legacy_tx};
    use crate::ImportMode;
    use solana_sdk::signature::Keypair;
    use std::time::Duration;

    fn timeout_tx() -> SolkitTx {
        let payer = Keypair::new();
        let bytes = bincode::serialize(&signed_legacy_tx(&payer)).unwrap();
        let connection = mock_connection(vec![blockhash_mock(0)]);
        let params = TxParams {
            max_seconds_per_tx: Some(0),
            sleep_between_retry: Duration::ZERO,
            ..TxParams::default()
        };
        let mut tx = SolkitTx::new(connection, payer, params);
        tx.from_bytes(&bytes, ImportMode::Auto).unwrap();
        tx
    }

    #[test]
    fn test_empty_batch_resolves_immediately() {
        let results = wait_for_batch(&mut [], &TxParams::default()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_results_are_index_aligned() {
        let mut transactions = vec![timeout_tx(), timeout_tx(), timeout_tx()];
        let params = TxParams {
            sleep_between_retry: Duration::ZERO,
            ..TxParams::default()
        };

        let results = wait_for_batch(&mut transactions, &params).unwrap();
        assert_eq!(results.len(), 3);
        for (tx, status) in transactions.iter().zip(&results) {
            assert_eq!(tx.status(), *status);
            assert_eq!(*status, TxStatus::Timeout);
        }
    }
}
