use crate::{ClientError, ClientResult};
use solana_client::rpc_client::RpcClient;
use solana_sdk::{account::Account, commitment_config::CommitmentConfig, pubkey::Pubkey};

/// `getMultipleAccounts` caps the request at 100 pubkeys.
pub const ACCOUNT_FETCH_CHUNK_SIZE: usize = 100;

/// Fetch many accounts, chunked to the RPC limit. The result is
/// index-aligned with `pubkeys`; absent accounts come back as `None`.
///
/// When `required_owner` is given, any present account owned by another
/// program fails the whole fetch.
pub fn fetch_accounts(
    connection: &RpcClient,
    pubkeys: &[Pubkey],
    required_owner: Option<&Pubkey>,
    commitment: Option<CommitmentConfig>,
) -> ClientResult<Vec<Option<Account>>> {
    let commitment = commitment.unwrap_or_else(|| connection.commitment());
    let mut results = Vec::with_capacity(pubkeys.len());

    for chunk in pubkeys.chunks(ACCOUNT_FETCH_CHUNK_SIZE) {
        let accounts = connection
            .get_multiple_accounts_with_commitment(chunk, commitment)?
            .value;

        if let Some(expected) = required_owner {
            for (pubkey, account) in chunk.iter().zip(&accounts) {
                if let Some(account) = account {
                    if account.owner != *expected {
                        return Err(ClientError::AccountOwnerMismatch {
                            account: *pubkey,
                            expected: *expected,
                            actual: account.owner,
                        });
                    }
                }
            }
        }
        results.extend(accounts);
    }

    Ok(results)
}

/// Single-account variant of [`fetch_accounts`].
pub fn fetch_account(
    connection: &RpcClient,
    pubkey: &Pubkey,
    required_owner: Option<&Pubkey>,
    commitment: Option<CommitmentConfig>,
) -> ClientResult<Option<Account>> {
    let mut accounts = fetch_accounts(connection, &[*pubkey], required_owner, commitment)?;
    Ok(accounts.pop().flatten())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_makes_no_rpc_call() {
        // A "fails" mock connection errors on every request; an empty
        // pubkey list must never reach it.
        let connection = RpcClient::new_mock("fails".to_string());
        let accounts = fetch_accounts(&connection, &[], None, None).unwrap();
        assert!(accounts.is_empty());
    }
}
