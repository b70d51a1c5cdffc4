//! Nullable ledger — an in-memory ledger with real application semantics.
//!
//! The double enforces what the protocol's correctness arguments lean on:
//! strictly increasing sequence numbers, fee consumption, per-class
//! signature-weight thresholds over the live signer set (master key,
//! Ed25519 signers, one-time pre-authorized hash signers), trustline
//! creation/limits/authorization, issuer mint/burn, 1:1 offer crossing and
//! transaction time bounds. Rejections use the same `RejectReason` values
//! as the HTTP client so error-classification logic is exercised too.

use crate::NullClock;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tessera_client::{
    AccountRecord, BalanceRecord, ClientError, LedgerClient, OfferRecord, RejectReason,
    SubmitResult,
};
use tessera_crypto::{derive_account_id, verify_signature};
use tessera_tx::manage_offer::{ManageOfferOp, NEW_OFFER};
use tessera_tx::{Operation, Transaction, TransactionEnvelope};
use tessera_types::{
    AccountFlags, AccountId, Amount, Asset, Price, PublicKey, SequenceNumber, Signer, SignerKey,
    Thresholds, TxHash,
};

#[derive(Clone, Debug)]
struct TrustLine {
    balance: Amount,
    limit: Amount,
    authorized: bool,
}

#[derive(Clone, Debug)]
struct LedgerAccount {
    sequence: SequenceNumber,
    master_weight: u8,
    thresholds: Thresholds,
    flags: AccountFlags,
    signers: Vec<Signer>,
    native: Amount,
    lines: HashMap<Asset, TrustLine>,
}

impl LedgerAccount {
    fn funded(native: Amount) -> Self {
        Self {
            sequence: SequenceNumber::new(0),
            master_weight: 1,
            thresholds: Thresholds::default(),
            flags: AccountFlags::NONE,
            signers: Vec::new(),
            native,
            lines: HashMap::new(),
        }
    }
}

#[derive(Clone, Debug)]
struct OfferEntry {
    id: u64,
    seller: AccountId,
    selling: Asset,
    buying: Asset,
    amount: Amount,
    price: Price,
}

#[derive(Clone)]
struct Inner {
    accounts: HashMap<AccountId, LedgerAccount>,
    book: Vec<OfferEntry>,
    next_offer_id: u64,
    ledger_index: u64,
}

/// The in-memory ledger double.
pub struct NullLedger {
    network: tessera_types::NetworkId,
    clock: NullClock,
    inner: Mutex<Inner>,
}

impl NullLedger {
    pub fn new(network: tessera_types::NetworkId) -> Self {
        Self {
            network,
            clock: NullClock::new(0),
            inner: Mutex::new(Inner {
                accounts: HashMap::new(),
                book: Vec::new(),
                next_offer_id: 1,
                ledger_index: 1,
            }),
        }
    }

    /// The controllable clock that time-bound checks read.
    pub fn clock(&self) -> &NullClock {
        &self.clock
    }

    /// Friendbot analog: create an account with a native starting balance.
    pub fn create_funded_account(&self, id: &AccountId, native: Amount) {
        let mut inner = self.inner.lock().expect("ledger lock");
        inner
            .accounts
            .insert(id.clone(), LedgerAccount::funded(native));
    }

    fn account_record(id: &AccountId, account: &LedgerAccount) -> AccountRecord {
        let mut balances = vec![BalanceRecord {
            asset: Asset::Native,
            balance: account.native,
            limit: Amount::new(u64::MAX),
            authorized: true,
        }];
        let mut lines: Vec<_> = account.lines.iter().collect();
        lines.sort_by_key(|(asset, _)| asset.to_string());
        balances.extend(lines.into_iter().map(|(asset, line)| BalanceRecord {
            asset: asset.clone(),
            balance: line.balance,
            limit: line.limit,
            authorized: line.authorized,
        }));
        AccountRecord {
            id: id.clone(),
            sequence: account.sequence,
            master_weight: account.master_weight,
            thresholds: account.thresholds,
            flags: account.flags,
            signers: account.signers.clone(),
            balances,
        }
    }
}

/// Summed weight of valid, distinct signatures plus any matching
/// pre-authorized hash signer. Returns the weight and the matched pre-auth
/// key (to be removed after use).
fn signing_weight(
    source_id: &AccountId,
    account: &LedgerAccount,
    envelope: &TransactionEnvelope,
    hash: &TxHash,
) -> (u32, Option<SignerKey>) {
    let mut weight: u32 = 0;
    let mut seen: HashSet<PublicKey> = HashSet::new();

    for sig in &envelope.signatures {
        if !verify_signature(hash.as_bytes(), &sig.signature, &sig.signer) {
            continue;
        }
        if !seen.insert(sig.signer) {
            continue;
        }
        if &derive_account_id(&sig.signer) == source_id {
            weight += u32::from(account.master_weight);
            continue;
        }
        if let Some(signer) = account
            .signers
            .iter()
            .find(|s| s.key == SignerKey::Ed25519(sig.signer))
        {
            weight += u32::from(signer.weight);
        }
    }

    let mut used_pre_auth = None;
    for signer in &account.signers {
        if let SignerKey::PreAuthTx(h) = &signer.key {
            if h == hash {
                weight += u32::from(signer.weight);
                used_pre_auth = Some(signer.key.clone());
                break;
            }
        }
    }

    (weight, used_pre_auth)
}

/// Move `amount` of `asset` from one account to another, honoring issuer
/// mint/burn and trustline constraints. Runs on scratch state; failures
/// abort the whole transaction's operations.
fn settle(
    inner: &mut Inner,
    from: &AccountId,
    to: &AccountId,
    asset: &Asset,
    amount: Amount,
) -> Result<(), RejectReason> {
    match asset {
        Asset::Native => {
            {
                let src = inner
                    .accounts
                    .get_mut(from)
                    .ok_or(RejectReason::AccountNotFound)?;
                src.native = src
                    .native
                    .checked_sub(amount)
                    .ok_or(RejectReason::Underfunded)?;
            }
            let dst = inner
                .accounts
                .get_mut(to)
                .ok_or(RejectReason::DestinationNotFound)?;
            dst.native = dst
                .native
                .checked_add(amount)
                .ok_or_else(|| RejectReason::Other("native balance overflow".into()))?;
        }
        Asset::Credit { issuer, .. } => {
            if from != issuer {
                let src = inner
                    .accounts
                    .get_mut(from)
                    .ok_or(RejectReason::AccountNotFound)?;
                let line = src.lines.get_mut(asset).ok_or(RejectReason::NoTrustline)?;
                if !line.authorized {
                    return Err(RejectReason::NotAuthorized);
                }
                line.balance = line
                    .balance
                    .checked_sub(amount)
                    .ok_or(RejectReason::Underfunded)?;
            }
            if to != issuer {
                let dst = inner
                    .accounts
                    .get_mut(to)
                    .ok_or(RejectReason::DestinationNotFound)?;
                let line = dst.lines.get_mut(asset).ok_or(RejectReason::NoTrustline)?;
                if !line.authorized {
                    return Err(RejectReason::NotAuthorized);
                }
                let new_balance = line
                    .balance
                    .checked_add(amount)
                    .ok_or(RejectReason::LineFull)?;
                if new_balance > line.limit {
                    return Err(RejectReason::LineFull);
                }
                line.balance = new_balance;
            }
            // issuer → issuer would be a self-payment; both sides are no-ops
        }
    }
    Ok(())
}

fn apply_set_options(
    account: &mut LedgerAccount,
    op: &tessera_tx::set_options::SetOptionsOp,
) -> Result<(), RejectReason> {
    if let Some(mw) = op.master_weight {
        account.master_weight = mw;
    }
    if let Some(thresholds) = op.thresholds {
        account.thresholds = thresholds;
    }
    account.flags = account.flags.apply(op.set_flags, op.clear_flags);
    if let Some(signer) = &op.signer {
        account.signers.retain(|s| s.key != signer.key);
        if signer.weight > 0 {
            account.signers.push(signer.clone());
        }
    }
    Ok(())
}

fn apply_change_trust(
    inner: &mut Inner,
    source: &AccountId,
    op: &tessera_tx::change_trust::ChangeTrustOp,
) -> Result<(), RejectReason> {
    let Asset::Credit { issuer, .. } = &op.asset else {
        return Err(RejectReason::Other("cannot trust the native asset".into()));
    };
    let auth_required = inner
        .accounts
        .get(issuer)
        .ok_or(RejectReason::NoIssuer)?
        .flags
        .auth_required;

    let account = inner
        .accounts
        .get_mut(source)
        .ok_or(RejectReason::AccountNotFound)?;

    if op.limit.is_zero() {
        if let Some(line) = account.lines.get(&op.asset) {
            if !line.balance.is_zero() {
                return Err(RejectReason::TrustlineInUse);
            }
            account.lines.remove(&op.asset);
        }
        return Ok(());
    }

    match account.lines.get_mut(&op.asset) {
        Some(line) => {
            if op.limit < line.balance {
                return Err(RejectReason::TrustlineInUse);
            }
            line.limit = op.limit;
        }
        None => {
            account.lines.insert(
                op.asset.clone(),
                TrustLine {
                    balance: Amount::ZERO,
                    limit: op.limit,
                    authorized: !auth_required,
                },
            );
        }
    }
    Ok(())
}

fn apply_allow_trust(
    inner: &mut Inner,
    source: &AccountId,
    op: &tessera_tx::allow_trust::AllowTrustOp,
) -> Result<(), RejectReason> {
    let issuer_flags = inner
        .accounts
        .get(source)
        .ok_or(RejectReason::AccountNotFound)?
        .flags;
    if !issuer_flags.auth_required {
        return Err(RejectReason::AuthNotRequired);
    }
    if !op.authorize && !issuer_flags.auth_revocable {
        return Err(RejectReason::AuthNotRevocable);
    }

    let asset = Asset::credit(op.asset_code.clone(), source.clone());
    let trustor = inner
        .accounts
        .get_mut(&op.trustor)
        .ok_or(RejectReason::DestinationNotFound)?;
    let line = trustor
        .lines
        .get_mut(&asset)
        .ok_or(RejectReason::NoTrustline)?;
    line.authorized = op.authorize;

    // Revocation pulls the trustor's offers involving the asset off the book.
    if !op.authorize {
        let trustor_id = op.trustor.clone();
        inner
            .book
            .retain(|o| !(o.seller == trustor_id && (o.selling == asset || o.buying == asset)));
    }
    Ok(())
}

fn check_can_sell(
    inner: &Inner,
    source: &AccountId,
    asset: &Asset,
    amount: Amount,
) -> Result<(), RejectReason> {
    let account = inner
        .accounts
        .get(source)
        .ok_or(RejectReason::AccountNotFound)?;
    match asset {
        Asset::Native => {
            if account.native < amount {
                return Err(RejectReason::Underfunded);
            }
        }
        Asset::Credit { issuer, .. } if issuer == source => {}
        Asset::Credit { .. } => {
            let line = account.lines.get(asset).ok_or(RejectReason::NoTrustline)?;
            if !line.authorized {
                return Err(RejectReason::NotAuthorized);
            }
            if line.balance < amount {
                return Err(RejectReason::Underfunded);
            }
        }
    }
    Ok(())
}

fn check_can_buy(inner: &Inner, source: &AccountId, asset: &Asset) -> Result<(), RejectReason> {
    match asset {
        Asset::Native => Ok(()),
        Asset::Credit { issuer, .. } if issuer == source => Ok(()),
        Asset::Credit { .. } => {
            let account = inner
                .accounts
                .get(source)
                .ok_or(RejectReason::AccountNotFound)?;
            let line = account.lines.get(asset).ok_or(RejectReason::NoTrustline)?;
            if !line.authorized {
                return Err(RejectReason::NotAuthorized);
            }
            Ok(())
        }
    }
}

fn apply_manage_offer(
    inner: &mut Inner,
    source: &AccountId,
    op: &ManageOfferOp,
) -> Result<(), RejectReason> {
    let offer_id;
    if op.offer_id != NEW_OFFER {
        let pos = inner
            .book
            .iter()
            .position(|o| o.id == op.offer_id && &o.seller == source)
            .ok_or(RejectReason::OfferNotFound)?;
        inner.book.remove(pos);
        if op.is_cancel() {
            return Ok(());
        }
        offer_id = op.offer_id;
    } else {
        if op.is_cancel() {
            return Err(RejectReason::OfferNotFound);
        }
        offer_id = inner.next_offer_id;
        inner.next_offer_id += 1;
    }

    check_can_sell(inner, source, &op.selling, op.amount)?;
    check_can_buy(inner, source, &op.buying)?;

    // The protocol only ever quotes 1:1; offers at other prices rest on the
    // book unmatched.
    let mut remaining = op.amount;
    if op.price == Price::ONE {
        while !remaining.is_zero() {
            let Some(pos) = inner.book.iter().position(|o| {
                o.selling == op.buying
                    && o.buying == op.selling
                    && op.price.crosses(&o.price)
                    && &o.seller != source
            }) else {
                break;
            };
            let counter = inner.book[pos].clone();
            let trade = remaining.min(counter.amount);

            settle(inner, source, &counter.seller, &op.selling, trade)?;
            settle(inner, &counter.seller, source, &op.buying, trade)?;

            let left = counter.amount - trade;
            if left.is_zero() {
                inner.book.remove(pos);
            } else {
                inner.book[pos].amount = left;
            }
            remaining = remaining - trade;
        }
    }

    if !remaining.is_zero() {
        inner.book.push(OfferEntry {
            id: offer_id,
            seller: source.clone(),
            selling: op.selling.clone(),
            buying: op.buying.clone(),
            amount: remaining,
            price: op.price,
        });
    }
    Ok(())
}

fn apply_operation(
    inner: &mut Inner,
    source: &AccountId,
    op: &Operation,
) -> Result<(), RejectReason> {
    match op {
        Operation::SetOptions(so) => {
            let account = inner
                .accounts
                .get_mut(source)
                .ok_or(RejectReason::AccountNotFound)?;
            apply_set_options(account, so)
        }
        Operation::ChangeTrust(ct) => apply_change_trust(inner, source, ct),
        Operation::AllowTrust(at) => apply_allow_trust(inner, source, at),
        Operation::Payment(p) => {
            if !inner.accounts.contains_key(&p.destination) {
                return Err(RejectReason::DestinationNotFound);
            }
            settle(inner, source, &p.destination, &p.asset, p.amount)
        }
        Operation::ManageOffer(mo) => apply_manage_offer(inner, source, mo),
    }
}

/// Pre-application validity checks; returns the matched pre-auth key.
fn check_validity(
    inner: &Inner,
    tx: &Transaction,
    envelope: &TransactionEnvelope,
    hash: &TxHash,
    now: tessera_types::Timestamp,
) -> Result<Option<SignerKey>, RejectReason> {
    let account = inner
        .accounts
        .get(&tx.source)
        .ok_or(RejectReason::AccountNotFound)?;

    if let Some(bounds) = &tx.time_bounds {
        if now < bounds.min_time {
            return Err(RejectReason::TooEarly);
        }
        if let Some(max) = bounds.max_time {
            if now > max {
                return Err(RejectReason::TooLate);
            }
        }
    }

    if tx.sequence != account.sequence.next() {
        return Err(RejectReason::BadSequence {
            current: account.sequence.value(),
            submitted: tx.sequence.value(),
        });
    }

    if account.native < tx.fee {
        return Err(RejectReason::InsufficientFee);
    }

    let needed = tx
        .max_threshold_level()
        .required_weight(&account.thresholds)
        .max(1);
    let (have, used_pre_auth) = signing_weight(&tx.source, account, envelope, hash);
    if have < u32::from(needed) {
        return Err(RejectReason::BadAuth { needed, have });
    }

    Ok(used_pre_auth)
}

#[async_trait]
impl LedgerClient for NullLedger {
    async fn load_account(&self, id: &AccountId) -> Result<AccountRecord, ClientError> {
        let inner = self.inner.lock().expect("ledger lock");
        let account = inner
            .accounts
            .get(id)
            .ok_or(ClientError::Rejected(RejectReason::AccountNotFound))?;
        Ok(NullLedger::account_record(id, account))
    }

    async fn submit(&self, envelope: &TransactionEnvelope) -> Result<SubmitResult, ClientError> {
        let hash = envelope
            .hash(self.network)
            .map_err(|e| ClientError::Encode(e.to_string()))?;
        let tx = &envelope.tx;
        let now = self.clock.now();

        let mut inner = self.inner.lock().expect("ledger lock");

        let used_pre_auth = check_validity(&inner, tx, envelope, &hash, now)
            .map_err(ClientError::Rejected)?;

        // Validity passed: sequence and fee are consumed whether or not the
        // operations succeed, and a matched pre-auth signer is spent.
        {
            let account = inner
                .accounts
                .get_mut(&tx.source)
                .expect("source checked above");
            account.sequence = account.sequence.next();
            account.native = account.native.saturating_sub(tx.fee);
            if let Some(key) = &used_pre_auth {
                account.signers.retain(|s| &s.key != key);
            }
        }

        let mut scratch = inner.clone();
        for op in &tx.operations {
            apply_operation(&mut scratch, &tx.source, op).map_err(ClientError::Rejected)?;
        }

        scratch.ledger_index += 1;
        let ledger = scratch.ledger_index;
        *inner = scratch;
        Ok(SubmitResult { hash, ledger })
    }

    async fn offers(&self, id: &AccountId) -> Result<Vec<OfferRecord>, ClientError> {
        let inner = self.inner.lock().expect("ledger lock");
        Ok(inner
            .book
            .iter()
            .filter(|o| &o.seller == id)
            .map(|o| OfferRecord {
                id: o.id,
                seller: o.seller.clone(),
                selling: o.selling.clone(),
                buying: o.buying.clone(),
                amount: o.amount,
                price: o.price,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_crypto::keypair_from_seed;
    use tessera_tx::change_trust::ChangeTrustOp;
    use tessera_tx::payment::PaymentOp;
    use tessera_tx::TransactionBuilder;
    use tessera_types::{AssetCode, KeyPair, NetworkId};

    const NET: NetworkId = NetworkId::Dev;

    fn keys(seed: u8) -> (KeyPair, AccountId) {
        let kp = keypair_from_seed(&[seed; 32]);
        let id = derive_account_id(&kp.public);
        (kp, id)
    }

    fn funded(ledger: &NullLedger, seed: u8) -> (KeyPair, AccountId) {
        let (kp, id) = keys(seed);
        ledger.create_funded_account(&id, Amount::new(1_000_000));
        (kp, id)
    }

    async fn sign_and_submit(
        ledger: &NullLedger,
        tx: Transaction,
        signers: &[&KeyPair],
    ) -> Result<SubmitResult, ClientError> {
        let mut env = TransactionEnvelope::new(tx);
        for kp in signers {
            env.sign(NET, kp).unwrap();
        }
        ledger.submit(&env).await
    }

    #[tokio::test]
    async fn payment_without_trustline_rejected() {
        let ledger = NullLedger::new(NET);
        let (issuer_kp, issuer_id) = funded(&ledger, 1);
        let (_, dest_id) = funded(&ledger, 2);
        let asset = Asset::credit(AssetCode::new("VOTE").unwrap(), issuer_id.clone());

        let tx = TransactionBuilder::new(issuer_id.clone(), SequenceNumber::new(0))
            .add_operation(Operation::Payment(PaymentOp::new(
                dest_id,
                asset,
                Amount::ONE,
            )))
            .build()
            .unwrap();

        let err = sign_and_submit(&ledger, tx, &[&issuer_kp]).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Rejected(RejectReason::NoTrustline)
        ));

        // Sequence and fee were still consumed.
        let account = ledger.load_account(&issuer_id).await.unwrap();
        assert_eq!(account.sequence, SequenceNumber::new(1));
        assert_eq!(
            account.balance_of(&Asset::Native).unwrap().balance,
            Amount::new(1_000_000 - tessera_tx::BASE_FEE)
        );
    }

    #[tokio::test]
    async fn issuer_mints_into_trustline() {
        let ledger = NullLedger::new(NET);
        let (issuer_kp, issuer_id) = funded(&ledger, 1);
        let (holder_kp, holder_id) = funded(&ledger, 2);
        let asset = Asset::credit(AssetCode::new("VOTE").unwrap(), issuer_id.clone());

        let trust = TransactionBuilder::new(holder_id.clone(), SequenceNumber::new(0))
            .add_operation(Operation::ChangeTrust(ChangeTrustOp::new(
                asset.clone(),
                Amount::new(10),
            )))
            .build()
            .unwrap();
        sign_and_submit(&ledger, trust, &[&holder_kp]).await.unwrap();

        let pay = TransactionBuilder::new(issuer_id.clone(), SequenceNumber::new(0))
            .add_operation(Operation::Payment(PaymentOp::new(
                holder_id.clone(),
                asset.clone(),
                Amount::new(7),
            )))
            .build()
            .unwrap();
        sign_and_submit(&ledger, pay, &[&issuer_kp]).await.unwrap();

        let holder = ledger.load_account(&holder_id).await.unwrap();
        assert_eq!(holder.balance_of(&asset).unwrap().balance, Amount::new(7));
    }

    #[tokio::test]
    async fn stale_sequence_rejected_with_race_reason() {
        let ledger = NullLedger::new(NET);
        let (kp, id) = funded(&ledger, 3);
        let asset = Asset::credit(AssetCode::new("X").unwrap(), id.clone());

        let tx = TransactionBuilder::new(id.clone(), SequenceNumber::new(5))
            .add_operation(Operation::ChangeTrust(ChangeTrustOp::new(
                asset,
                Amount::ONE,
            )))
            .build()
            .unwrap();
        let err = sign_and_submit(&ledger, tx, &[&kp]).await.unwrap_err();
        assert!(err.is_sequence_race());
    }

    #[tokio::test]
    async fn unsigned_envelope_never_passes_threshold_zero() {
        let ledger = NullLedger::new(NET);
        let (_, id) = funded(&ledger, 4);
        let (_, other_id) = funded(&ledger, 5);
        let asset = Asset::credit(AssetCode::new("X").unwrap(), other_id);

        let tx = TransactionBuilder::new(id, SequenceNumber::new(0))
            .add_operation(Operation::ChangeTrust(ChangeTrustOp::new(
                asset,
                Amount::ONE,
            )))
            .build()
            .unwrap();
        let err = sign_and_submit(&ledger, tx, &[]).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Rejected(RejectReason::BadAuth { .. })
        ));
    }

    #[tokio::test]
    async fn one_to_one_offers_cross() {
        let ledger = NullLedger::new(NET);
        let (issuer_kp, issuer_id) = funded(&ledger, 6);
        let (alice_kp, alice_id) = funded(&ledger, 7);
        let (bob_kp, bob_id) = funded(&ledger, 8);
        let apples = Asset::credit(AssetCode::new("APPLE").unwrap(), issuer_id.clone());
        let pears = Asset::credit(AssetCode::new("PEAR").unwrap(), issuer_id.clone());

        for (kp, id) in [(&alice_kp, &alice_id), (&bob_kp, &bob_id)] {
            let tx = TransactionBuilder::new(id.clone(), SequenceNumber::new(0))
                .add_operation(Operation::ChangeTrust(ChangeTrustOp::new(
                    apples.clone(),
                    Amount::new(100),
                )))
                .add_operation(Operation::ChangeTrust(ChangeTrustOp::new(
                    pears.clone(),
                    Amount::new(100),
                )))
                .build()
                .unwrap();
            sign_and_submit(&ledger, tx, &[kp]).await.unwrap();
        }

        let seed_tx = TransactionBuilder::new(issuer_id.clone(), SequenceNumber::new(0))
            .add_operation(Operation::Payment(PaymentOp::new(
                alice_id.clone(),
                apples.clone(),
                Amount::new(5),
            )))
            .add_operation(Operation::Payment(PaymentOp::new(
                bob_id.clone(),
                pears.clone(),
                Amount::new(5),
            )))
            .build()
            .unwrap();
        sign_and_submit(&ledger, seed_tx, &[&issuer_kp]).await.unwrap();

        // Alice offers 3 apples for pears; Bob crosses with 2 pears.
        let alice_offer = TransactionBuilder::new(alice_id.clone(), SequenceNumber::new(1))
            .add_operation(Operation::ManageOffer(ManageOfferOp::create(
                apples.clone(),
                pears.clone(),
                Amount::new(3),
                Price::ONE,
            )))
            .build()
            .unwrap();
        sign_and_submit(&ledger, alice_offer, &[&alice_kp]).await.unwrap();

        let bob_offer = TransactionBuilder::new(bob_id.clone(), SequenceNumber::new(1))
            .add_operation(Operation::ManageOffer(ManageOfferOp::create(
                pears.clone(),
                apples.clone(),
                Amount::new(2),
                Price::ONE,
            )))
            .build()
            .unwrap();
        sign_and_submit(&ledger, bob_offer, &[&bob_kp]).await.unwrap();

        let alice = ledger.load_account(&alice_id).await.unwrap();
        assert_eq!(alice.balance_of(&apples).unwrap().balance, Amount::new(3));
        assert_eq!(alice.balance_of(&pears).unwrap().balance, Amount::new(2));

        // Alice's offer remains with 1 apple left; Bob's is fully consumed.
        let alice_offers = ledger.offers(&alice_id).await.unwrap();
        assert_eq!(alice_offers.len(), 1);
        assert_eq!(alice_offers[0].amount, Amount::ONE);
        assert!(ledger.offers(&bob_id).await.unwrap().is_empty());
    }
}
