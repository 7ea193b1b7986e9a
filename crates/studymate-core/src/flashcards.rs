//! Flashcard model and flip-state paging.

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::InvalidInputError;
use crate::quiz::strip_code_fence;

/// A single flashcard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    /// Question or concept.
    pub front: String,
    /// Answer or explanation.
    pub back: String,
}

#[derive(Deserialize)]
struct GeneratedCards {
    flashcards: Vec<Flashcard>,
}

/// Parse the generation endpoint's payload into a card list.
///
/// Same carrier format as quizzes: JSON inside a string field, possibly
/// fenced.
pub fn cards_from_generated(raw: &str) -> Result<Vec<Flashcard>> {
    let body = strip_code_fence(raw.trim());
    let parsed: GeneratedCards =
        serde_json::from_str(body).map_err(|e| InvalidInputError::GeneratedContent {
            reason: e.to_string(),
        })?;

    if parsed.flashcards.is_empty() {
        return Err(InvalidInputError::GeneratedContent {
            reason: "no flashcards generated".to_string(),
        }
        .into());
    }

    Ok(parsed.flashcards)
}

/// Flip-state paging over a set of flashcards.
///
/// Tracks the current card and whether it is showing its back. Moving to
/// a neighboring card always lands on the front.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Flashcard>,
    index: usize,
    flipped: bool,
}

impl Deck {
    /// Build a deck from a non-empty card list.
    pub fn new(cards: Vec<Flashcard>) -> Result<Self> {
        if cards.is_empty() {
            return Err(InvalidInputError::GeneratedContent {
                reason: "deck has no cards".to_string(),
            }
            .into());
        }
        Ok(Self {
            cards,
            index: 0,
            flipped: false,
        })
    }

    /// The card currently shown.
    pub fn current(&self) -> &Flashcard {
        &self.cards[self.index]
    }

    /// Whether the current card shows its back.
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Toggle the current card between front and back.
    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Advance to the next card. Returns `false` at the end of the deck.
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.cards.len() {
            self.index += 1;
            self.flipped = false;
            true
        } else {
            false
        }
    }

    /// Go back to the previous card. Returns `false` at the start.
    pub fn prev(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            self.flipped = false;
            true
        } else {
            false
        }
    }

    /// Zero-based index of the current card.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Number of cards in the deck.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Decks are never empty; present for completeness.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
