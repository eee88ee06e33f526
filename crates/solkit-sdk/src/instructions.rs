use crate::{SdkError, SdkResult, NATIVE_MINT};
use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    compute_budget::ComputeBudgetInstruction, instruction::Instruction, pubkey::Pubkey,
    system_instruction,
};
use tracing::debug;

/// An associated token account address, paired with the instruction that
/// creates it when (and only when) it does not exist on chain yet.
///
/// Creating an ATA takes 138 bytes per instruction; a follow-up SPL
/// transfer from the same sender takes 74. Callers chunking instructions
/// into transactions care about both numbers.
#[derive(Debug)]
pub struct AtaInstruction {
    pub pubkey: Pubkey,
    pub ix: Option<Instruction>,
}

/// Derive the associated token account address for `owner` and `token_mint`.
pub fn get_ata(token_mint: &Pubkey, owner: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address(owner, token_mint)
}

/// Build the instruction creating the ATA of `owner` for `token_mint`,
/// funded by `payer`.
pub fn create_ata_ix(token_mint: &Pubkey, owner: &Pubkey, payer: &Pubkey) -> Instruction {
    spl_associated_token_account::instruction::create_associated_token_account(
        payer,
        owner,
        token_mint,
        &spl_token::id(),
    )
}

/// Resolve `owner`'s ATA for `token_mint`, attaching a creation instruction
/// when the account is missing on chain. `payer` defaults to `owner`.
///
/// The off-curve check runs on the canonical owner pubkey. Off-curve owners
/// (PDAs) are legal unless the caller opts out with
/// `allow_owner_off_curve = false`.
pub fn get_or_create_ata_ix(
    connection: &RpcClient,
    token_mint: &Pubkey,
    owner: &Pubkey,
    payer: Option<&Pubkey>,
    allow_owner_off_curve: bool,
) -> SdkResult<AtaInstruction> {
    if !allow_owner_off_curve && !owner.is_on_curve() {
        return Err(SdkError::OwnerOffCurve(*owner));
    }

    let ata_address = get_ata(token_mint, owner);
    let account = connection
        .get_account_with_commitment(&ata_address, connection.commitment())?
        .value;

    debug!(ata = %ata_address, exists = account.is_some(), "resolved ATA");

    Ok(AtaInstruction {
        pubkey: ata_address,
        ix: account
            .is_none()
            .then(|| create_ata_ix(token_mint, owner, payer.unwrap_or(owner))),
    })
}

/// `transfer_checked` with explicit token program, mint and decimals.
/// Transferring SPL tokens takes 114 bytes per instruction, 50 for each
/// follow-up from the same sender.
pub fn transfer_token_checked_ix(
    token_program_id: &Pubkey,
    token_mint: &Pubkey,
    decimals: u8,
    sender_wallet: &Pubkey,
    sender_ata: &Pubkey,
    receiver_ata: &Pubkey,
    amount: u64,
) -> SdkResult<Instruction> {
    Ok(spl_token::instruction::transfer_checked(
        token_program_id,
        sender_ata,
        token_mint,
        receiver_ata,
        sender_wallet,
        &[],
        amount,
        decimals,
    )?)
}

/// Instructions wrapping `lamports` of native SOL into `owner`'s wSOL ATA:
/// optional ATA creation, a system transfer, then `sync_native`.
pub fn wrap_sol_ixs(
    connection: &RpcClient,
    lamports: u64,
    owner: &Pubkey,
    payer: Option<&Pubkey>,
) -> SdkResult<Vec<Instruction>> {
    let wsol_ata = get_or_create_ata_ix(connection, &NATIVE_MINT, owner, payer, true)?;

    let mut ixs = Vec::with_capacity(3);
    if let Some(create_ix) = wsol_ata.ix {
        ixs.push(create_ix);
    }
    ixs.push(system_instruction::transfer(owner, &wsol_ata.pubkey, lamports));
    ixs.push(spl_token::instruction::sync_native(
        &spl_token::id(),
        &wsol_ata.pubkey,
    )?);
    Ok(ixs)
}

/// Close `owner`'s wSOL ATA, returning the wrapped lamports to `owner`.
pub fn unwrap_sol_ix(owner: &Pubkey, allow_owner_off_curve: bool) -> SdkResult<Instruction> {
    if !allow_owner_off_curve && !owner.is_on_curve() {
        return Err(SdkError::OwnerOffCurve(*owner));
    }

    let wsol_ata = get_ata(&NATIVE_MINT, owner);
    Ok(spl_token::instruction::close_account(
        &spl_token::id(),
        &wsol_ata,
        owner,
        owner,
        &[],
    )?)
}

/// Raise the compute unit limit (default cap is 1.4M units).
pub fn compute_budget_ix(units: u32) -> Instruction {
    ComputeBudgetInstruction::set_compute_unit_limit(units)
}

/// Set the priority fee in micro-lamports per compute unit.
pub fn compute_price_ix(micro_lamports: u64) -> Instruction {
    ComputeBudgetInstruction::set_compute_unit_price(micro_lamports)
}
