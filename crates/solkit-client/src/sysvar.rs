use crate::{fetch_account, ClientError, ClientResult};
use borsh::{BorshDeserialize, BorshSerialize};
use solana_client::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solkit_sdk::SYSVAR_CLOCK_PUBKEY;

/// The clock sysvar: network time markers exposed as an ordinary account.
#[derive(BorshDeserialize, BorshSerialize, Debug, Clone, PartialEq, Eq)]
pub struct SysvarClock {
    pub slot: u64,
    pub epoch_start_timestamp: i64,
    pub epoch: u64,
    pub leader_schedule_epoch: u64,
    pub unix_timestamp: i64,
}

impl SysvarClock {
    /// Fetch and decode the clock account; `None` when the node does not
    /// return it.
    pub fn fetch(
        connection: &RpcClient,
        commitment: Option<CommitmentConfig>,
    ) -> ClientResult<Option<Self>> {
        let account = fetch_account(connection, &SYSVAR_CLOCK_PUBKEY, None, commitment)?;
        account.map(|account| Self::decode(&account.data)).transpose()
    }

    pub fn decode(data: &[u8]) -> ClientResult<Self> {
        borsh::from_slice(data)
            .map_err(|e| ClientError::InvalidAccountData(format!("clock sysvar: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_layout() {
        // Five little-endian fields: slot, epoch_start_timestamp, epoch,
        // leader_schedule_epoch, unix_timestamp.
        let mut data = Vec::new();
        data.extend_from_slice(&250_000_000u64.to_le_bytes());
        data.extend_from_slice(&1_700_000_000i64.to_le_bytes());
        data.extend_from_slice(&580u64.to_le_bytes());
        data.extend_from_slice(&581u64.to_le_bytes());
        data.extend_from_slice(&1_700_123_456i64.to_le_bytes());

        let clock = SysvarClock::decode(&data).unwrap();
        assert_eq!(clock.slot, 250_000_000);
        assert_eq!(clock.epoch_start_timestamp, 1_700_000_000);
        assert_eq!(clock.epoch, 580);
        assert_eq!(clock.leader_schedule_epoch, 581);
        assert_eq!(clock.unix_timestamp, 1_700_123_456);
    }

    #[test]
    fn test_truncated_data_is_rejected() {
        assert!(matches!(
            SysvarClock::decode(&[0u8; 12]),
            Err(ClientError::InvalidAccountData(_))
        ));
    }
}
