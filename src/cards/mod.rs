//! Card system: card values and deck construction.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier unique within one deck
//! - `Color`, `Pattern`: The two channels a pair shares
//! - `Card`: Appearance plus face-up/matched state
//! - `DeckBuilder`: Shuffled, paired deck for a difficulty
//!
//! ## Filler Cards
//!
//! When the grid has one cell more than the pairs need, the deck can carry
//! a single `Neutral` filler card that never matches.

pub mod card;
pub mod deck;

pub use card::{pattern_label, Card, CardId, Color, Pattern};
pub use deck::DeckBuilder;
