/// A draw was attempted after every card had been discarded.
///
/// This is a configuration problem: provision more cards, or play fewer
/// rounds or cards per turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeckExhausted;

impl std::error::Error for DeckExhausted {}

impl std::fmt::Display for DeckExhausted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tried to draw a card, but every card has been discarded already")
    }
}

/// The game needs more cards than the deck holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotEnoughCards {
    pub needed: usize,
    pub available: usize,
}

impl std::error::Error for NotEnoughCards {}

impl std::fmt::Display for NotEnoughCards {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "The game needs {} cards, but the deck only has {}",
            self.needed, self.available
        )
    }
}

/// The error type for loading the card table. Line numbers start at 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MalformedCard {
    MissingHeader,
    MissingColumn { column: &'static str },
    MissingField { line: usize, column: &'static str },
    EmptyField { line: usize, column: &'static str },
    InvalidId { line: usize, value: String },
    DuplicateId { line: usize, id: u32 },
    UnterminatedQuote { line: usize },
}

impl std::error::Error for MalformedCard {}

impl std::fmt::Display for MalformedCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedCard::MissingHeader => write!(f, "The card table is empty, expected a header row"),
            MalformedCard::MissingColumn { column } =>
                write!(f, "The card table has no '{}' column", column),
            MalformedCard::MissingField { line, column } =>
                write!(f, "Line {} has no value for the '{}' column", line, column),
            MalformedCard::EmptyField { line, column } =>
                write!(f, "Line {} has an empty '{}' value", line, column),
            MalformedCard::InvalidId { line, value } =>
                write!(f, "Line {} has an ID that is not a non-negative integer: '{}'", line, value),
            MalformedCard::DuplicateId { line, id } =>
                write!(f, "Line {} reuses the ID {}", line, id),
            MalformedCard::UnterminatedQuote { line } =>
                write!(f, "Line {} has a quoted field that is never closed", line),
        }
    }
}
