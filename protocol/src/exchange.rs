//! Ballot exchange engine: offers as votes.
//!
//! A voter's standing offer selling 1 ballot for 1 candidate receipt at
//! price 1 *is* their live vote. Replacing it changes the vote, canceling
//! it retracts the vote, and a crossing against the collection account's
//! counter-offer executes it. This is a commitment exchange, not trading:
//! every protocol offer is integral and priced exactly 1:1.

use crate::submit::submit_with_rebuild;
use crate::ProtocolError;
use tessera_client::{LedgerClient, OfferRecord, SubmitResult};
use tessera_tx::change_trust::ChangeTrustOp;
use tessera_tx::manage_offer::ManageOfferOp;
use tessera_tx::{Operation, TransactionBuilder};
use tessera_types::{AccountId, Amount, Asset, KeyPair, NetworkId, Price};

use crate::registry::Identity;

/// Limit of the receipt trustline `place_vote` opens for a voter: one
/// ballot can only ever convert into one receipt.
const VOTER_RECEIPT_LIMIT: Amount = Amount::ONE;

pub struct BallotExchange<'a, C> {
    client: &'a C,
    network: NetworkId,
}

impl<'a, C: LedgerClient> BallotExchange<'a, C> {
    pub fn new(client: &'a C, network: NetworkId) -> Self {
        Self { client, network }
    }

    /// The account's open offer selling `selling`, if any.
    pub async fn find_open_offer(
        &self,
        account: &AccountId,
        selling: &Asset,
    ) -> Result<Option<OfferRecord>, ProtocolError> {
        let offers = self
            .client
            .offers(account)
            .await
            .map_err(ProtocolError::classify)?;
        Ok(offers.into_iter().find(|o| &o.selling == selling))
    }

    /// Cast (or change) a vote: offer 1 ballot for 1 unit of the chosen
    /// candidate's receipt at price 1.
    ///
    /// At most one live vote per voter: an existing open ballot-selling
    /// offer is replaced in place, never duplicated. The voter's receipt
    /// trustline is opened in the same transaction if it does not exist
    /// yet.
    pub async fn place_vote(
        &self,
        voter: &Identity,
        ballot: &Asset,
        receipt: &Asset,
    ) -> Result<SubmitResult, ProtocolError> {
        let existing = self.find_open_offer(&voter.account_id, ballot).await?;
        let offer = match &existing {
            Some(open) => ManageOfferOp::replace(
                open.id,
                ballot.clone(),
                receipt.clone(),
                Amount::ONE,
                Price::ONE,
            ),
            None => ManageOfferOp::create(ballot.clone(), receipt.clone(), Amount::ONE, Price::ONE),
        };

        tracing::info!(
            voter = %voter.name,
            receipt = %receipt,
            replacing = existing.is_some(),
            "placing vote offer"
        );
        submit_with_rebuild(
            self.client,
            self.network,
            &voter.account_id,
            &[&voter.keys],
            |record| {
                let mut builder =
                    TransactionBuilder::new(voter.account_id.clone(), record.sequence);
                if record.balance_of(receipt).is_none() {
                    builder = builder.add_operation(Operation::ChangeTrust(ChangeTrustOp::new(
                        receipt.clone(),
                        VOTER_RECEIPT_LIMIT,
                    )));
                }
                builder.add_operation(Operation::ManageOffer(offer.clone())).build()
            },
        )
        .await
    }

    /// Retract the voter's live vote, if one is open. Returns `None` when
    /// there was nothing to retract.
    pub async fn retract_vote(
        &self,
        voter: &Identity,
        ballot: &Asset,
    ) -> Result<Option<SubmitResult>, ProtocolError> {
        let Some(open) = self.find_open_offer(&voter.account_id, ballot).await? else {
            return Ok(None);
        };

        tracing::info!(voter = %voter.name, offer = open.id, "retracting vote offer");
        let cancel = ManageOfferOp::cancel(open.id, open.selling, open.buying, open.price);
        let result = submit_with_rebuild(
            self.client,
            self.network,
            &voter.account_id,
            &[&voter.keys],
            |record| {
                TransactionBuilder::new(voter.account_id.clone(), record.sequence)
                    .add_operation(Operation::ManageOffer(cancel.clone()))
                    .build()
            },
        )
        .await?;
        Ok(Some(result))
    }

    /// The collection account posts one standing counter-offer per
    /// candidate: selling `amount_each` receipts, buying ballots, price 1.
    /// Voter offers cross against these automatically.
    pub async fn create_collection_offers(
        &self,
        collector_id: &AccountId,
        committee_keys: &[&KeyPair],
        ballot: &Asset,
        receipts: &[Asset],
        amount_each: Amount,
    ) -> Result<SubmitResult, ProtocolError> {
        tracing::info!(candidates = receipts.len(), "posting collection offers");
        submit_with_rebuild(self.client, self.network, collector_id, committee_keys, |record| {
            let mut builder = TransactionBuilder::new(collector_id.clone(), record.sequence);
            for receipt in receipts {
                builder = builder.add_operation(Operation::ManageOffer(ManageOfferOp::create(
                    receipt.clone(),
                    ballot.clone(),
                    amount_each,
                    Price::ONE,
                )));
            }
            builder.build()
        })
        .await
    }
}
