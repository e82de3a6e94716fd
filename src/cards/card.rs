//! Cards: identity, appearance, and flip state.
//!
//! A card's appearance is a `Color` plus an optional `Pattern`. The pattern
//! is a second, color-independent channel for players who cannot rely on
//! color. The filler card uses the `Neutral` color and no pattern; it never
//! matches anything.

use serde::{Deserialize, Serialize};

/// Unique card identifier within a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card face color.
///
/// Every pair gets its own palette color, so color alone identifies a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Pink,
    Mint,
    Cyan,
    Indigo,
    Brown,
    Teal,
    Lime,
    Magenta,
    Navy,
    Maroon,
    Olive,
    Coral,
    Gold,
    Silver,
    Lavender,
    Turquoise,
    Crimson,
    Beige,
    /// Sentinel for the filler card. Not part of the palette.
    Neutral,
}

impl Color {
    /// Colors handed out to pairs, in assignment order.
    pub const PALETTE: [Color; 24] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
        Color::Pink,
        Color::Mint,
        Color::Cyan,
        Color::Indigo,
        Color::Brown,
        Color::Teal,
        Color::Lime,
        Color::Magenta,
        Color::Navy,
        Color::Maroon,
        Color::Olive,
        Color::Coral,
        Color::Gold,
        Color::Silver,
        Color::Lavender,
        Color::Turquoise,
        Color::Crimson,
        Color::Beige,
    ];

    /// Palette color for pair `index`, cycling.
    #[must_use]
    pub const fn for_index(index: usize) -> Color {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Purple => "Purple",
            Color::Orange => "Orange",
            Color::Pink => "Pink",
            Color::Mint => "Mint",
            Color::Cyan => "Cyan",
            Color::Indigo => "Indigo",
            Color::Brown => "Brown",
            Color::Teal => "Teal",
            Color::Lime => "Lime",
            Color::Magenta => "Magenta",
            Color::Navy => "Navy",
            Color::Maroon => "Maroon",
            Color::Olive => "Olive",
            Color::Coral => "Coral",
            Color::Gold => "Gold",
            Color::Silver => "Silver",
            Color::Lavender => "Lavender",
            Color::Turquoise => "Turquoise",
            Color::Crimson => "Crimson",
            Color::Beige => "Beige",
            Color::Neutral => "Neutral",
        }
    }
}

/// Symbol drawn on a card face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Circle,
    Square,
    Triangle,
    Star,
    Heart,
    Diamond,
    Cross,
    Hexagon,
    Pentagon,
    Oval,
}

impl Pattern {
    pub const ALL: [Pattern; 10] = [
        Pattern::Circle,
        Pattern::Square,
        Pattern::Triangle,
        Pattern::Star,
        Pattern::Heart,
        Pattern::Diamond,
        Pattern::Cross,
        Pattern::Hexagon,
        Pattern::Pentagon,
        Pattern::Oval,
    ];

    /// Pattern for pair `index`, cycling.
    #[must_use]
    pub const fn for_index(index: usize) -> Pattern {
        Self::ALL[index % Self::ALL.len()]
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Pattern::Circle => "Circle",
            Pattern::Square => "Square",
            Pattern::Triangle => "Triangle",
            Pattern::Star => "Star",
            Pattern::Heart => "Heart",
            Pattern::Diamond => "Diamond",
            Pattern::Cross => "Cross",
            Pattern::Hexagon => "Hexagon",
            Pattern::Pentagon => "Pentagon",
            Pattern::Oval => "Oval",
        }
    }
}

/// Spoken name of an optional pattern. Cards without one read as "Blank".
#[must_use]
pub fn pattern_label(pattern: Option<Pattern>) -> &'static str {
    pattern.map_or("Blank", Pattern::name)
}

/// A card on the table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub color: Color,
    pub pattern: Option<Pattern>,
    pub face_up: bool,
    pub matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(id: CardId, color: Color, pattern: Pattern) -> Self {
        Self {
            id,
            color,
            pattern: Some(pattern),
            face_up: false,
            matched: false,
        }
    }

    /// Create the grid filler card.
    #[must_use]
    pub fn filler(id: CardId) -> Self {
        Self {
            id,
            color: Color::Neutral,
            pattern: None,
            face_up: false,
            matched: false,
        }
    }

    #[must_use]
    pub fn is_filler(&self) -> bool {
        self.color == Color::Neutral
    }

    /// The appearance two cards of a pair share.
    #[must_use]
    pub fn identity(&self) -> (Color, Option<Pattern>) {
        (self.color, self.pattern)
    }

    /// Check whether this card pairs with `other`: same color, neither
    /// the filler.
    #[must_use]
    pub fn matches(&self, other: &Card) -> bool {
        !self.is_filler() && !other.is_filler() && self.color == other.color
    }

    #[must_use]
    pub fn pattern_name(&self) -> &'static str {
        pattern_label(self.pattern)
    }

    /// Screen-reader label for the card's current state.
    #[must_use]
    pub fn accessibility_label(&self) -> String {
        if self.matched {
            format!("Matched {} card", self.pattern_name())
        } else if self.face_up {
            format!("{} card, face up", self.pattern_name())
        } else {
            "Face down card".to_string()
        }
    }

    /// Screen-reader hint describing what activating the card does.
    #[must_use]
    pub fn accessibility_hint(&self) -> &'static str {
        if self.matched {
            "This card has been matched"
        } else if self.face_up {
            "This card is currently showing"
        } else {
            "Double tap to reveal this card"
        }
    }
}
