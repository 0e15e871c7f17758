//! # Card Ledger — The Single Mutation Gateway
//!
//! `CardLedger` holds every card record and is the only place ledger
//! state changes. Operations are serialized by `&mut self`; within one
//! operation, every check precedes every write, so a rejected call
//! leaves no partial state.
//!
//! ## Admission
//!
//! Mint and confidential transfer admit ciphertext handles only together
//! with a proof binding the exact ordered batch to the calling principal
//! and this ledger's address. Admitted proofs are consumed: the digest
//! is recorded and a replay fails.
//!
//! ## Transfer Channels
//!
//! Two validation paths share one post-condition (reassign owner, clear
//! the approval slot, append an event):
//!
//! ```text
//! transfer (confidential) ── proof + owner/approved check ──┐
//!                                                           ├──▶ finish_transfer
//! transfer_from (standard) ── owner/approved/operator check ┘
//! ```
//!
//! Only the confidential path refreshes the encrypted owner shadow and
//! the decryption grants.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use veilcard_core::{Address, ContentDigest, Timestamp, TokenId};
use veilcard_fhe::{CiphertextHandle, ConfidentialCompute, InputProof};

use crate::card::{AttributeBundle, Card};
use crate::error::RegistryError;
use crate::event::{ChannelKind, EventRecord, LedgerEvent};

/// What a transfer path carries into the shared post-condition.
enum TransferChannel {
    /// Plaintext path: nothing beyond the reassignment.
    Standard,
    /// Confidential path: the handle that becomes the new owner shadow.
    Confidential {
        new_owner_assertion: CiphertextHandle,
    },
}

impl TransferChannel {
    fn kind(&self) -> ChannelKind {
        match self {
            Self::Standard => ChannelKind::Standard,
            Self::Confidential { .. } => ChannelKind::Confidential,
        }
    }
}

/// The authoritative card registry state.
#[derive(Debug, Serialize, Deserialize)]
pub struct CardLedger {
    /// This registry's address; proofs must be bound to it.
    address: Address,
    /// Arena of card records, indexed by token id.
    cards: BTreeMap<TokenId, Card>,
    /// Owner address → number of cards owned. Kept equal to the count of
    /// records whose owner matches.
    balances: BTreeMap<Address, u64>,
    /// Owner → operators granted blanket transfer rights.
    operator_approvals: BTreeMap<Address, BTreeSet<Address>>,
    /// Digests of every admitted proof. Proofs are single-use.
    spent_proofs: BTreeSet<ContentDigest>,
    /// Append-only mutation log.
    events: Vec<EventRecord>,
}

impl CardLedger {
    /// Create an empty ledger with the given registry address.
    pub fn new(address: Address) -> Self {
        Self {
            address,
            cards: BTreeMap::new(),
            balances: BTreeMap::new(),
            operator_approvals: BTreeMap::new(),
            spent_proofs: BTreeSet::new(),
            events: Vec::new(),
        }
    }

    /// The registry address proofs must target.
    pub fn address(&self) -> Address {
        self.address
    }

    // ─── Mint ────────────────────────────────────────────────────────

    /// Mint a new card.
    ///
    /// The five handles must arrive in admission order — level, hp,
    /// attack, defense, owner assertion — and `proof` must bind exactly
    /// that batch to `caller` and this registry.
    ///
    /// The plaintext owner is set to `caller` regardless of what the
    /// owner-assertion ciphertext contains; the assertion handle is
    /// stored as the shadow without being decrypted or compared.
    ///
    /// On success the caller is granted decryption access to all five
    /// handles.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidMetadata`] for an empty name or image
    /// URI, [`RegistryError::InvalidProof`] for a proof that does not
    /// bind the batch or was already consumed.
    #[allow(clippy::too_many_arguments)]
    pub fn mint_card(
        &mut self,
        caller: Address,
        name: &str,
        image_uri: &str,
        level: CiphertextHandle,
        hp: CiphertextHandle,
        attack: CiphertextHandle,
        defense: CiphertextHandle,
        owner_assertion: CiphertextHandle,
        proof: &InputProof,
        coproc: &mut dyn ConfidentialCompute,
    ) -> Result<TokenId, RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::InvalidMetadata { field: "name" });
        }
        if image_uri.trim().is_empty() {
            return Err(RegistryError::InvalidMetadata { field: "image_uri" });
        }

        let batch = [level, hp, attack, defense, owner_assertion];
        self.require_fresh_proof(proof, caller, &batch)?;

        // Grants are the last fallible step; the state writes below
        // cannot fail.
        for handle in &batch {
            coproc
                .allow(handle, caller)
                .map_err(|_| RegistryError::InvalidProof)?;
        }

        let token_id = TokenId(self.total_supply() + 1);
        self.spent_proofs.insert(proof.digest());
        self.cards.insert(
            token_id,
            Card {
                name: name.to_string(),
                image_uri: image_uri.to_string(),
                attributes: AttributeBundle {
                    level,
                    hp,
                    attack,
                    defense,
                },
                owner: caller,
                encrypted_owner: owner_assertion,
                approved: None,
                minted_at: Timestamp::now(),
            },
        );
        *self.balances.entry(caller).or_insert(0) += 1;
        self.record(LedgerEvent::CardMinted {
            token_id,
            owner: caller,
        });

        Ok(token_id)
    }

    // ─── Transfers ───────────────────────────────────────────────────

    /// Transfer a card through the confidential channel.
    ///
    /// The two handles must arrive in admission order — current-owner
    /// assertion, new-owner assertion — and `proof` must bind exactly
    /// that batch to `caller` and this registry. The second handle
    /// becomes the new owner shadow; the ledger does not decrypt either
    /// assertion, so shadow consistency rests on the caller building the
    /// batch from the same `to` it passes here.
    ///
    /// On success the destination is granted decryption access to the
    /// four attribute handles and the new shadow.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`], [`RegistryError::InvalidProof`],
    /// [`RegistryError::NotAuthorized`] unless the caller is the owner
    /// or the approved operator, [`RegistryError::InvalidDestination`]
    /// for the zero address.
    pub fn transfer(
        &mut self,
        caller: Address,
        token_id: TokenId,
        to: Address,
        current_owner_assertion: CiphertextHandle,
        new_owner_assertion: CiphertextHandle,
        proof: &InputProof,
        coproc: &mut dyn ConfidentialCompute,
    ) -> Result<(), RegistryError> {
        let card = self.card(token_id)?;
        let owner = card.owner;
        let approved = card.approved;
        let attributes = card.attributes;

        let batch = [current_owner_assertion, new_owner_assertion];
        self.require_fresh_proof(proof, caller, &batch)?;

        if caller != owner && approved != Some(caller) {
            return Err(RegistryError::NotAuthorized { token_id, caller });
        }
        if to.is_zero() {
            return Err(RegistryError::InvalidDestination);
        }

        // Grants are the last fallible step.
        for handle in attributes.as_ordered().iter() {
            coproc
                .allow(handle, to)
                .map_err(|_| RegistryError::InvalidProof)?;
        }
        coproc
            .allow(&new_owner_assertion, to)
            .map_err(|_| RegistryError::InvalidProof)?;

        self.spent_proofs.insert(proof.digest());
        self.finish_transfer(
            token_id,
            owner,
            to,
            TransferChannel::Confidential {
                new_owner_assertion,
            },
        );
        Ok(())
    }

    /// Transfer a card through the standard plaintext channel.
    ///
    /// This path touches neither the encrypted owner shadow nor the
    /// decryption grants — both go stale until the next confidential
    /// transfer.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`], [`RegistryError::NotAuthorized`]
    /// unless `from` is the owner and the caller is `from`, the approved
    /// operator, or a global operator of `from`,
    /// [`RegistryError::InvalidDestination`] for the zero address.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        token_id: TokenId,
    ) -> Result<(), RegistryError> {
        let card = self.card(token_id)?;
        if card.owner != from {
            return Err(RegistryError::NotAuthorized { token_id, caller });
        }
        let authorized = caller == from
            || card.approved == Some(caller)
            || self.is_approved_for_all(from, caller);
        if !authorized {
            return Err(RegistryError::NotAuthorized { token_id, caller });
        }
        if to.is_zero() {
            return Err(RegistryError::InvalidDestination);
        }

        self.finish_transfer(token_id, from, to, TransferChannel::Standard);
        Ok(())
    }

    /// Shared transfer post-condition: reassign the owner, clear the
    /// approval slot, refresh the shadow on the confidential path, and
    /// append the event.
    fn finish_transfer(
        &mut self,
        token_id: TokenId,
        from: Address,
        to: Address,
        channel: TransferChannel,
    ) {
        let kind = channel.kind();
        // The card was checked by the caller; the entry exists.
        if let Some(card) = self.cards.get_mut(&token_id) {
            card.owner = to;
            card.approved = None;
            if let TransferChannel::Confidential {
                new_owner_assertion,
            } = channel
            {
                card.encrypted_owner = new_owner_assertion;
            }
        }
        self.debit_balance(from);
        *self.balances.entry(to).or_insert(0) += 1;
        self.record(LedgerEvent::CardTransferred {
            token_id,
            from,
            to,
            channel: kind,
        });
    }

    // ─── Approvals ───────────────────────────────────────────────────

    /// Set the single-slot approval for a card.
    ///
    /// The caller must be the owner or the currently approved operator.
    /// Approving the zero address clears the slot.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`], [`RegistryError::NotAuthorized`].
    pub fn approve(
        &mut self,
        caller: Address,
        operator: Address,
        token_id: TokenId,
    ) -> Result<(), RegistryError> {
        let card = self.card(token_id)?;
        let owner = card.owner;
        if caller != owner && card.approved != Some(caller) {
            return Err(RegistryError::NotAuthorized { token_id, caller });
        }

        let slot = if operator.is_zero() {
            None
        } else {
            Some(operator)
        };
        if let Some(card) = self.cards.get_mut(&token_id) {
            card.approved = slot;
        }
        self.record(LedgerEvent::Approval {
            token_id,
            owner,
            operator: slot,
        });
        Ok(())
    }

    /// Grant or revoke blanket transfer rights over all of the caller's
    /// cards, present and future.
    pub fn set_approval_for_all(&mut self, caller: Address, operator: Address, approved: bool) {
        let grants = self.operator_approvals.entry(caller).or_default();
        if approved {
            grants.insert(operator);
        } else {
            grants.remove(&operator);
        }
        self.record(LedgerEvent::ApprovalForAll {
            owner: caller,
            operator,
            approved,
        });
    }

    // ─── Queries ─────────────────────────────────────────────────────

    /// The current plaintext owner of a card.
    pub fn owner_of(&self, token_id: TokenId) -> Result<Address, RegistryError> {
        Ok(self.card(token_id)?.owner)
    }

    /// Number of cards owned by an address.
    pub fn balance_of(&self, owner: Address) -> u64 {
        self.balances.get(&owner).copied().unwrap_or(0)
    }

    /// Number of cards ever minted.
    pub fn total_supply(&self) -> u64 {
        self.cards.len() as u64
    }

    /// The approved operator for a card, if any.
    pub fn get_approved(&self, token_id: TokenId) -> Result<Option<Address>, RegistryError> {
        Ok(self.card(token_id)?.approved)
    }

    /// Whether `operator` holds blanket transfer rights over `owner`'s
    /// cards.
    pub fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.operator_approvals
            .get(&owner)
            .is_some_and(|grants| grants.contains(&operator))
    }

    /// Full card record: plaintext metadata and ciphertext handles,
    /// verbatim. No decryption happens here or anywhere else in the
    /// ledger.
    pub fn get_card(&self, token_id: TokenId) -> Result<&Card, RegistryError> {
        self.card(token_id)
    }

    /// Token ids owned by an address, in mint order.
    pub fn tokens_of(&self, owner: Address) -> Vec<TokenId> {
        self.cards
            .iter()
            .filter(|(_, card)| card.owner == owner)
            .map(|(id, _)| *id)
            .collect()
    }

    /// The append-only mutation log, in admission order.
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    // ─── Internal helpers ────────────────────────────────────────────

    fn card(&self, token_id: TokenId) -> Result<&Card, RegistryError> {
        self.cards
            .get(&token_id)
            .ok_or(RegistryError::NotFound(token_id))
    }

    /// Proof must bind exactly this (caller, batch) against this ledger,
    /// and must not have been consumed before.
    fn require_fresh_proof(
        &self,
        proof: &InputProof,
        caller: Address,
        handles: &[CiphertextHandle],
    ) -> Result<(), RegistryError> {
        if !proof.covers(self.address, caller, handles) {
            return Err(RegistryError::InvalidProof);
        }
        if self.spent_proofs.contains(&proof.digest()) {
            return Err(RegistryError::InvalidProof);
        }
        Ok(())
    }

    fn debit_balance(&mut self, owner: Address) {
        if let Some(balance) = self.balances.get_mut(&owner) {
            *balance = balance.saturating_sub(1);
            if *balance == 0 {
                self.balances.remove(&owner);
            }
        }
    }

    fn record(&mut self, event: LedgerEvent) {
        self.events.push(EventRecord::now(event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veilcard_fhe::{EncryptedInputBuilder, FheError, MockCoprocessor};

    struct Harness {
        ledger: CardLedger,
        coproc: MockCoprocessor,
    }

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    fn alice() -> Address {
        addr(0xa1)
    }
    fn bob() -> Address {
        addr(0xb2)
    }
    fn carol() -> Address {
        addr(0xc3)
    }
    fn mallory() -> Address {
        addr(0xee)
    }

    fn harness() -> Harness {
        Harness {
            ledger: CardLedger::new(addr(0x10)),
            coproc: MockCoprocessor::new(),
        }
    }

    /// Build a five-value mint batch and mint in one step.
    fn mint(
        h: &mut Harness,
        caller: Address,
        name: &str,
        stats: (u32, u32, u32, u32),
    ) -> Result<TokenId, RegistryError> {
        let input = EncryptedInputBuilder::new(h.ledger.address(), caller)
            .add_u32(stats.0)
            .add_u32(stats.1)
            .add_u32(stats.2)
            .add_u32(stats.3)
            .add_address(caller)
            .encrypt(&mut h.coproc)
            .expect("batch build should succeed");
        h.ledger.mint_card(
            caller,
            name,
            "https://example.com/card.png",
            input.handles[0],
            input.handles[1],
            input.handles[2],
            input.handles[3],
            input.handles[4],
            &input.proof,
            &mut h.coproc,
        )
    }

    fn mint_pikachu(h: &mut Harness, caller: Address) -> TokenId {
        mint(h, caller, "Pikachu", (50, 120, 80, 60)).expect("mint should succeed")
    }

    /// Build a two-assertion transfer batch and transfer in one step.
    fn confidential_transfer(
        h: &mut Harness,
        caller: Address,
        token_id: TokenId,
        current_owner: Address,
        to: Address,
    ) -> Result<(), RegistryError> {
        let input = EncryptedInputBuilder::new(h.ledger.address(), caller)
            .add_address(current_owner)
            .add_address(to)
            .encrypt(&mut h.coproc)
            .expect("batch build should succeed");
        h.ledger.transfer(
            caller,
            token_id,
            to,
            input.handles[0],
            input.handles[1],
            &input.proof,
            &mut h.coproc,
        )
    }

    // ── Mint ─────────────────────────────────────────────────────────

    #[test]
    fn test_mint_assigns_ownership_and_supply() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        assert_eq!(id, TokenId(1));
        assert_eq!(h.ledger.owner_of(id).unwrap(), alice());
        assert_eq!(h.ledger.balance_of(alice()), 1);
        assert_eq!(h.ledger.total_supply(), 1);
    }

    #[test]
    fn test_mint_ids_increment_from_one() {
        let mut h = harness();
        assert_eq!(mint_pikachu(&mut h, alice()), TokenId(1));
        assert_eq!(mint_pikachu(&mut h, bob()), TokenId(2));
        assert_eq!(mint_pikachu(&mut h, alice()), TokenId(3));
        assert_eq!(h.ledger.balance_of(alice()), 2);
        assert_eq!(h.ledger.balance_of(bob()), 1);
    }

    #[test]
    fn test_mint_records_event() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        assert_eq!(
            h.ledger.events().last().map(|r| &r.event),
            Some(&LedgerEvent::CardMinted {
                token_id: id,
                owner: alice()
            })
        );
    }

    #[test]
    fn test_mint_rejects_empty_metadata() {
        let mut h = harness();
        assert_eq!(
            mint(&mut h, alice(), "", (1, 2, 3, 4)),
            Err(RegistryError::InvalidMetadata { field: "name" })
        );
        assert_eq!(h.ledger.total_supply(), 0);
    }

    #[test]
    fn test_mint_rejects_proof_for_other_caller() {
        let mut h = harness();
        let input = EncryptedInputBuilder::new(h.ledger.address(), alice())
            .add_u32(1)
            .add_u32(2)
            .add_u32(3)
            .add_u32(4)
            .add_address(alice())
            .encrypt(&mut h.coproc)
            .unwrap();
        // Mallory replays Alice's batch under her own name.
        let result = h.ledger.mint_card(
            mallory(),
            "Stolen",
            "https://example.com/x.png",
            input.handles[0],
            input.handles[1],
            input.handles[2],
            input.handles[3],
            input.handles[4],
            &input.proof,
            &mut h.coproc,
        );
        assert_eq!(result, Err(RegistryError::InvalidProof));
        assert_eq!(h.ledger.total_supply(), 0);
    }

    #[test]
    fn test_mint_rejects_reordered_handles() {
        let mut h = harness();
        let input = EncryptedInputBuilder::new(h.ledger.address(), alice())
            .add_u32(50)
            .add_u32(120)
            .add_u32(80)
            .add_u32(60)
            .add_address(alice())
            .encrypt(&mut h.coproc)
            .unwrap();
        // hp and level swapped relative to the proven batch order.
        let result = h.ledger.mint_card(
            alice(),
            "Pikachu",
            "https://example.com/pikachu.png",
            input.handles[1],
            input.handles[0],
            input.handles[2],
            input.handles[3],
            input.handles[4],
            &input.proof,
            &mut h.coproc,
        );
        assert_eq!(result, Err(RegistryError::InvalidProof));
    }

    #[test]
    fn test_mint_proof_is_single_use() {
        let mut h = harness();
        let input = EncryptedInputBuilder::new(h.ledger.address(), alice())
            .add_u32(50)
            .add_u32(120)
            .add_u32(80)
            .add_u32(60)
            .add_address(alice())
            .encrypt(&mut h.coproc)
            .unwrap();
        let mint_with = |ledger: &mut CardLedger, coproc: &mut MockCoprocessor| {
            ledger.mint_card(
                alice(),
                "Pikachu",
                "https://example.com/pikachu.png",
                input.handles[0],
                input.handles[1],
                input.handles[2],
                input.handles[3],
                input.handles[4],
                &input.proof,
                coproc,
            )
        };
        assert!(mint_with(&mut h.ledger, &mut h.coproc).is_ok());
        assert_eq!(
            mint_with(&mut h.ledger, &mut h.coproc),
            Err(RegistryError::InvalidProof)
        );
        assert_eq!(h.ledger.total_supply(), 1);
    }

    #[test]
    fn mint_stores_owner_assertion_without_checking() {
        // The assertion ciphertext encrypts Bob, but Alice mints: the
        // plaintext owner is the caller, and the unchecked assertion is
        // stored as the shadow verbatim.
        let mut h = harness();
        let input = EncryptedInputBuilder::new(h.ledger.address(), alice())
            .add_u32(50)
            .add_u32(120)
            .add_u32(80)
            .add_u32(60)
            .add_address(bob())
            .encrypt(&mut h.coproc)
            .unwrap();
        let id = h
            .ledger
            .mint_card(
                alice(),
                "Pikachu",
                "https://example.com/pikachu.png",
                input.handles[0],
                input.handles[1],
                input.handles[2],
                input.handles[3],
                input.handles[4],
                &input.proof,
                &mut h.coproc,
            )
            .unwrap();
        assert_eq!(h.ledger.owner_of(id).unwrap(), alice());
        let shadow = h.ledger.get_card(id).unwrap().encrypted_owner;
        assert_eq!(h.coproc.decrypt_address(&shadow, alice()).unwrap(), bob());
    }

    // ── Decryption authorization ─────────────────────────────────────

    #[test]
    fn test_minter_decrypts_exact_stats() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        let card = h.ledger.get_card(id).unwrap();
        let stats: Vec<u32> = card
            .attributes
            .as_ordered()
            .iter()
            .map(|handle| h.coproc.decrypt_u32(handle, alice()).unwrap())
            .collect();
        assert_eq!(stats, vec![50, 120, 80, 60]);
        let shadow = card.encrypted_owner;
        assert_eq!(h.coproc.decrypt_address(&shadow, alice()).unwrap(), alice());
    }

    #[test]
    fn test_non_owner_decryption_denied() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        let level = h.ledger.get_card(id).unwrap().attributes.level;
        assert!(matches!(
            h.coproc.decrypt_u32(&level, mallory()),
            Err(FheError::DecryptionDenied { .. })
        ));
    }

    #[test]
    fn test_get_card_returns_handles_verbatim() {
        let mut h = harness();
        let input = EncryptedInputBuilder::new(h.ledger.address(), alice())
            .add_u32(50)
            .add_u32(120)
            .add_u32(80)
            .add_u32(60)
            .add_address(alice())
            .encrypt(&mut h.coproc)
            .unwrap();
        let id = h
            .ledger
            .mint_card(
                alice(),
                "Pikachu",
                "https://example.com/pikachu.png",
                input.handles[0],
                input.handles[1],
                input.handles[2],
                input.handles[3],
                input.handles[4],
                &input.proof,
                &mut h.coproc,
            )
            .unwrap();
        let card = h.ledger.get_card(id).unwrap();
        assert_eq!(card.name, "Pikachu");
        assert_eq!(card.image_uri, "https://example.com/pikachu.png");
        assert_eq!(card.attributes.as_ordered().to_vec(), &input.handles[..4]);
        assert_eq!(card.encrypted_owner, input.handles[4]);
    }

    // ── Confidential transfer ────────────────────────────────────────

    #[test]
    fn test_confidential_transfer_moves_ownership() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        confidential_transfer(&mut h, alice(), id, alice(), bob()).unwrap();
        assert_eq!(h.ledger.owner_of(id).unwrap(), bob());
        assert_eq!(h.ledger.balance_of(alice()), 0);
        assert_eq!(h.ledger.balance_of(bob()), 1);
        assert_eq!(h.ledger.get_approved(id).unwrap(), None);
    }

    #[test]
    fn test_confidential_transfer_refreshes_shadow() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        let old_shadow = h.ledger.get_card(id).unwrap().encrypted_owner;
        confidential_transfer(&mut h, alice(), id, alice(), bob()).unwrap();
        let new_shadow = h.ledger.get_card(id).unwrap().encrypted_owner;
        assert_ne!(old_shadow, new_shadow);
        assert_eq!(h.coproc.decrypt_address(&new_shadow, bob()).unwrap(), bob());
    }

    #[test]
    fn test_confidential_transfer_grants_stats_to_destination() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        confidential_transfer(&mut h, alice(), id, alice(), bob()).unwrap();
        let card = h.ledger.get_card(id).unwrap();
        assert_eq!(h.coproc.decrypt_u32(&card.attributes.level, bob()).unwrap(), 50);
        assert_eq!(h.coproc.decrypt_u32(&card.attributes.hp, bob()).unwrap(), 120);
    }

    #[test]
    fn test_confidential_transfer_by_stranger_denied() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        let result = confidential_transfer(&mut h, mallory(), id, alice(), mallory());
        assert_eq!(
            result,
            Err(RegistryError::NotAuthorized {
                token_id: id,
                caller: mallory()
            })
        );
        assert_eq!(h.ledger.owner_of(id).unwrap(), alice());
    }

    #[test]
    fn test_confidential_transfer_by_approved_operator() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        h.ledger.approve(alice(), bob(), id).unwrap();
        confidential_transfer(&mut h, bob(), id, alice(), carol()).unwrap();
        assert_eq!(h.ledger.owner_of(id).unwrap(), carol());
    }

    #[test]
    fn test_confidential_transfer_proof_is_single_use() {
        let mut h = harness();
        let id1 = mint_pikachu(&mut h, alice());
        let id2 = mint_pikachu(&mut h, alice());
        let input = EncryptedInputBuilder::new(h.ledger.address(), alice())
            .add_address(alice())
            .add_address(bob())
            .encrypt(&mut h.coproc)
            .unwrap();
        h.ledger
            .transfer(
                alice(),
                id1,
                bob(),
                input.handles[0],
                input.handles[1],
                &input.proof,
                &mut h.coproc,
            )
            .unwrap();
        // Same batch replayed against a second card.
        let result = h.ledger.transfer(
            alice(),
            id2,
            bob(),
            input.handles[0],
            input.handles[1],
            &input.proof,
            &mut h.coproc,
        );
        assert_eq!(result, Err(RegistryError::InvalidProof));
        assert_eq!(h.ledger.owner_of(id2).unwrap(), alice());
    }

    #[test]
    fn test_confidential_transfer_to_zero_rejected() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        let result = confidential_transfer(&mut h, alice(), id, alice(), Address::ZERO);
        assert_eq!(result, Err(RegistryError::InvalidDestination));
        assert_eq!(h.ledger.owner_of(id).unwrap(), alice());
    }

    #[test]
    fn test_transfer_missing_card() {
        let mut h = harness();
        let result = confidential_transfer(&mut h, alice(), TokenId(99), alice(), bob());
        assert_eq!(result, Err(RegistryError::NotFound(TokenId(99))));
    }

    // ── Standard transfer channel ────────────────────────────────────

    #[test]
    fn test_transfer_from_by_owner() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        h.ledger.transfer_from(alice(), alice(), bob(), id).unwrap();
        assert_eq!(h.ledger.owner_of(id).unwrap(), bob());
        assert_eq!(h.ledger.balance_of(alice()), 0);
        assert_eq!(h.ledger.balance_of(bob()), 1);
    }

    #[test]
    fn test_transfer_from_by_approved_operator() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        h.ledger.approve(alice(), bob(), id).unwrap();
        h.ledger.transfer_from(bob(), alice(), carol(), id).unwrap();
        assert_eq!(h.ledger.owner_of(id).unwrap(), carol());
    }

    #[test]
    fn test_transfer_from_by_global_operator() {
        let mut h = harness();
        let id1 = mint_pikachu(&mut h, alice());
        let id2 = mint_pikachu(&mut h, alice());
        h.ledger.set_approval_for_all(alice(), bob(), true);
        h.ledger.transfer_from(bob(), alice(), carol(), id1).unwrap();
        h.ledger.transfer_from(bob(), alice(), carol(), id2).unwrap();
        assert_eq!(h.ledger.balance_of(carol()), 2);
    }

    #[test]
    fn test_transfer_from_by_stranger_denied() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        let result = h.ledger.transfer_from(mallory(), alice(), mallory(), id);
        assert_eq!(
            result,
            Err(RegistryError::NotAuthorized {
                token_id: id,
                caller: mallory()
            })
        );
        assert_eq!(h.ledger.owner_of(id).unwrap(), alice());
    }

    #[test]
    fn test_transfer_from_wrong_from_denied() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        let result = h.ledger.transfer_from(bob(), bob(), carol(), id);
        assert!(matches!(result, Err(RegistryError::NotAuthorized { .. })));
    }

    #[test]
    fn test_revoked_global_operator_denied() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        h.ledger.set_approval_for_all(alice(), bob(), true);
        h.ledger.set_approval_for_all(alice(), bob(), false);
        assert!(!h.ledger.is_approved_for_all(alice(), bob()));
        let result = h.ledger.transfer_from(bob(), alice(), carol(), id);
        assert!(matches!(result, Err(RegistryError::NotAuthorized { .. })));
    }

    #[test]
    fn standard_transfer_leaves_shadow_stale() {
        // The plaintext channel moves the card; the confidential shadow
        // and the decryption grants stay where they were.
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        let shadow_before = h.ledger.get_card(id).unwrap().encrypted_owner;
        h.ledger.transfer_from(alice(), alice(), bob(), id).unwrap();

        let card = h.ledger.get_card(id).unwrap();
        assert_eq!(card.encrypted_owner, shadow_before);
        // The stale shadow still decrypts to Alice — for Alice.
        assert_eq!(
            h.coproc
                .decrypt_address(&card.encrypted_owner, alice())
                .unwrap(),
            alice()
        );
        // The new owner holds no decryption rights yet.
        assert!(matches!(
            h.coproc.decrypt_u32(&card.attributes.level, bob()),
            Err(FheError::DecryptionDenied { .. })
        ));
        // A confidential transfer brings the shadow back in sync.
        confidential_transfer(&mut h, bob(), id, bob(), carol()).unwrap();
        let refreshed = h.ledger.get_card(id).unwrap().encrypted_owner;
        assert_eq!(
            h.coproc.decrypt_address(&refreshed, carol()).unwrap(),
            carol()
        );
    }

    // ── Approvals ────────────────────────────────────────────────────

    #[test]
    fn test_approve_sets_single_slot() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        h.ledger.approve(alice(), bob(), id).unwrap();
        assert_eq!(h.ledger.get_approved(id).unwrap(), Some(bob()));
        h.ledger.approve(alice(), carol(), id).unwrap();
        assert_eq!(h.ledger.get_approved(id).unwrap(), Some(carol()));
    }

    #[test]
    fn test_approve_zero_clears_slot() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        h.ledger.approve(alice(), bob(), id).unwrap();
        h.ledger.approve(alice(), Address::ZERO, id).unwrap();
        assert_eq!(h.ledger.get_approved(id).unwrap(), None);
    }

    #[test]
    fn test_approve_by_stranger_denied() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        let result = h.ledger.approve(mallory(), mallory(), id);
        assert!(matches!(result, Err(RegistryError::NotAuthorized { .. })));
    }

    #[test]
    fn test_no_stale_approval_after_transfer() {
        let mut h = harness();
        let id = mint_pikachu(&mut h, alice());
        h.ledger.approve(alice(), bob(), id).unwrap();
        confidential_transfer(&mut h, alice(), id, alice(), carol()).unwrap();
        assert_eq!(h.ledger.get_approved(id).unwrap(), None);
        // Bob's old approval must not let him move Carol's card.
        let result = h.ledger.transfer_from(bob(), carol(), bob(), id);
        assert!(matches!(result, Err(RegistryError::NotAuthorized { .. })));
    }

    // ── Queries ──────────────────────────────────────────────────────

    #[test]
    fn test_queries_on_missing_card() {
        let h = harness();
        assert_eq!(
            h.ledger.owner_of(TokenId(99)),
            Err(RegistryError::NotFound(TokenId(99)))
        );
        assert_eq!(
            h.ledger.get_card(TokenId(99)).err(),
            Some(RegistryError::NotFound(TokenId(99)))
        );
        assert_eq!(
            h.ledger.get_approved(TokenId(99)),
            Err(RegistryError::NotFound(TokenId(99)))
        );
    }

    #[test]
    fn test_tokens_of_lists_in_mint_order() {
        let mut h = harness();
        let id1 = mint_pikachu(&mut h, alice());
        let _id2 = mint_pikachu(&mut h, bob());
        let id3 = mint_pikachu(&mut h, alice());
        assert_eq!(h.ledger.tokens_of(alice()), vec![id1, id3]);
    }

    #[test]
    fn test_balance_of_unknown_address_is_zero() {
        let h = harness();
        assert_eq!(h.ledger.balance_of(mallory()), 0);
    }

    // ── Full scenario ────────────────────────────────────────────────

    #[test]
    fn test_pikachu_lifecycle() {
        let mut h = harness();

        let id = mint_pikachu(&mut h, alice());
        assert_eq!(h.ledger.total_supply(), 1);
        assert_eq!(h.ledger.balance_of(alice()), 1);
        assert_eq!(h.ledger.get_card(id).unwrap().name, "Pikachu");

        confidential_transfer(&mut h, alice(), id, alice(), bob()).unwrap();
        assert_eq!(h.ledger.owner_of(id).unwrap(), bob());
        assert_eq!(h.ledger.balance_of(alice()), 0);
        assert_eq!(h.ledger.balance_of(bob()), 1);

        let id2 = mint(&mut h, alice(), "Charmander", (39, 100, 52, 43)).unwrap();
        h.ledger.approve(alice(), bob(), id2).unwrap();
        h.ledger.transfer_from(bob(), alice(), carol(), id2).unwrap();
        assert_eq!(h.ledger.owner_of(id2).unwrap(), carol());

        let channels: Vec<ChannelKind> = h
            .ledger
            .events()
            .iter()
            .filter_map(|r| match r.event {
                LedgerEvent::CardTransferred { channel, .. } => Some(channel),
                _ => None,
            })
            .collect();
        assert_eq!(channels, vec![ChannelKind::Confidential, ChannelKind::Standard]);
    }

    // ── Accounting invariant ─────────────────────────────────────────

    proptest::proptest! {
        /// Under any interleaving of mints and owner-initiated
        /// transfers, per-address balances equal the card counts and
        /// supply equals the arena size.
        #[test]
        fn prop_balances_match_ownership(ops in proptest::collection::vec((0u8..3, 0u8..3), 1..40)) {
            let mut h = harness();
            let actors = [alice(), bob(), carol()];
            for (i, (a, b)) in ops.into_iter().enumerate() {
                let minter = actors[a as usize];
                let dest = actors[b as usize];
                if i % 2 == 0 {
                    mint(&mut h, minter, "Card", (1, 2, 3, 4)).unwrap();
                } else if let Some(&id) = h.ledger.tokens_of(minter).first() {
                    if !dest.is_zero() && dest != minter {
                        confidential_transfer(&mut h, minter, id, minter, dest).unwrap();
                    }
                }
            }
            let total: u64 = actors.iter().map(|a| h.ledger.balance_of(*a)).sum();
            proptest::prop_assert_eq!(total, h.ledger.total_supply());
            for actor in actors {
                proptest::prop_assert_eq!(
                    h.ledger.balance_of(actor),
                    h.ledger.tokens_of(actor).len() as u64
                );
            }
        }
    }
}
