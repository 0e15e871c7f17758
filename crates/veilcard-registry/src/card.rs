//! # Card Records
//!
//! The per-card state held by the ledger. Metadata and the attribute
//! bundle are write-once at mint; only the ownership and approval fields
//! change afterwards.

use serde::{Deserialize, Serialize};
use veilcard_core::{Address, Timestamp};
use veilcard_fhe::CiphertextHandle;

/// The four encrypted stats of a card, in their fixed admission order.
///
/// Handle position is the sole identifier of which stat a ciphertext
/// represents — there is no accompanying tag. The bundle is never
/// reordered after mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeBundle {
    /// Encrypted level.
    pub level: CiphertextHandle,
    /// Encrypted hit points.
    pub hp: CiphertextHandle,
    /// Encrypted attack stat.
    pub attack: CiphertextHandle,
    /// Encrypted defense stat.
    pub defense: CiphertextHandle,
}

impl AttributeBundle {
    /// The bundle in admission order: level, hp, attack, defense.
    pub fn as_ordered(&self) -> [CiphertextHandle; 4] {
        [self.level, self.hp, self.attack, self.defense]
    }
}

/// A card record.
///
/// `owner` is the canonical plaintext channel used for every
/// authorization check and enumeration. `encrypted_owner` is the
/// confidential shadow of the same principal, refreshed on confidential
/// transfers only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Display name. Immutable after mint, non-empty.
    pub name: String,
    /// Artwork location. Immutable after mint, non-empty.
    pub image_uri: String,
    /// Encrypted stats in fixed order. Write-once.
    pub attributes: AttributeBundle,
    /// Canonical plaintext owner.
    pub owner: Address,
    /// Ciphertext shadow of the current owner.
    pub encrypted_owner: CiphertextHandle,
    /// Single-slot operator approval. Cleared on every transfer.
    pub approved: Option<Address>,
    /// When the card was minted.
    pub minted_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(byte: u8) -> CiphertextHandle {
        CiphertextHandle::from_bytes([byte; 32])
    }

    #[test]
    fn test_bundle_order_is_level_hp_attack_defense() {
        let bundle = AttributeBundle {
            level: handle(1),
            hp: handle(2),
            attack: handle(3),
            defense: handle(4),
        };
        assert_eq!(
            bundle.as_ordered(),
            [handle(1), handle(2), handle(3), handle(4)]
        );
    }

    #[test]
    fn test_card_serde_roundtrip() {
        let card = Card {
            name: "Pikachu".to_string(),
            image_uri: "https://example.com/pikachu.png".to_string(),
            attributes: AttributeBundle {
                level: handle(1),
                hp: handle(2),
                attack: handle(3),
                defense: handle(4),
            },
            owner: Address::from_bytes([7; 20]),
            encrypted_owner: handle(5),
            approved: None,
            minted_at: Timestamp::parse("2026-08-07T00:00:00Z").unwrap(),
        };
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
