use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::MalformedCard;

/// Number of forbidden words printed on every card.
pub const FORBIDDEN_PER_CARD: usize = 4;

const ID_COLUMN: &str = "ID";
const TARGET_COLUMN: &str = "target";
const FORBIDDEN_COLUMNS: [&str; FORBIDDEN_PER_CARD] =
    ["forbidden_1", "forbidden_2", "forbidden_3", "forbidden_4"];

/// A word card: the word to guess and the words a hint may not use.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: u32,
    pub target: String,
    pub forbidden: [String; FORBIDDEN_PER_CARD],
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (forbidden: {})", self.target, self.forbidden.join(", "))
    }
}

/// Parses a card table.
///
/// The first non-blank record is a header naming the `ID`, `target` and
/// `forbidden_1` to `forbidden_4` columns in any order. Other columns are
/// ignored. Fields may be enclosed in double quotes, with `""` standing for
/// a literal quote. Quoted fields may span several lines; errors report the
/// line on which the offending record starts.
pub fn parse_cards(text: &str) -> Result<Vec<Card>, MalformedCard> {
    let mut records = split_records(text.trim_start_matches('\u{feff}'))?.into_iter();

    let (_, header) = records.next().ok_or(MalformedCard::MissingHeader)?;
    let column_idx = |column: &'static str| {
        header
            .iter()
            .position(|name| name == column)
            .ok_or(MalformedCard::MissingColumn { column })
    };
    let id_idx = column_idx(ID_COLUMN)?;
    let target_idx = column_idx(TARGET_COLUMN)?;
    let mut forbidden_idx = [0; FORBIDDEN_PER_CARD];
    for (idx, column) in forbidden_idx.iter_mut().zip(FORBIDDEN_COLUMNS) {
        *idx = column_idx(column)?;
    }

    let mut seen_ids = BTreeSet::new();
    let mut cards = Vec::new();
    for (line, fields) in records {
        let field = |idx: usize, column: &'static str| -> Result<String, MalformedCard> {
            let value = fields
                .get(idx)
                .ok_or(MalformedCard::MissingField { line, column })?;
            if value.is_empty() {
                return Err(MalformedCard::EmptyField { line, column });
            }
            Ok(value.clone())
        };

        let raw_id = field(id_idx, ID_COLUMN)?;
        let id = raw_id
            .parse::<u32>()
            .map_err(|_| MalformedCard::InvalidId { line, value: raw_id })?;
        if !seen_ids.insert(id) {
            return Err(MalformedCard::DuplicateId { line, id });
        }
        let target = field(target_idx, TARGET_COLUMN)?;
        let forbidden = [
            field(forbidden_idx[0], FORBIDDEN_COLUMNS[0])?,
            field(forbidden_idx[1], FORBIDDEN_COLUMNS[1])?,
            field(forbidden_idx[2], FORBIDDEN_COLUMNS[2])?,
            field(forbidden_idx[3], FORBIDDEN_COLUMNS[3])?,
        ];
        cards.push(Card {
            id,
            target,
            forbidden,
        });
    }
    Ok(cards)
}

/// Reads and parses a card table from disk.
pub fn load_cards(path: &Path) -> anyhow::Result<Vec<Card>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read cards from '{}'", path.display()))?;
    let cards = parse_cards(&text)
        .with_context(|| format!("Malformed card table '{}'", path.display()))?;
    Ok(cards)
}

/// Splits CSV text into records of trimmed fields, each tagged with the
/// line it starts on. Blank lines are dropped.
fn split_records(text: &str) -> Result<Vec<(usize, Vec<String>)>, MalformedCard> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut line = 1;
    let mut record_line = 1;

    let mut finish_record =
        |fields: &mut Vec<String>, current: &mut String, quoted: bool, at: usize| {
            fields.push(std::mem::take(current).trim().to_owned());
            let blank = !quoted && fields.len() == 1 && fields[0].is_empty();
            if blank {
                fields.clear();
            } else {
                records.push((at, std::mem::take(fields)));
            }
        };

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            ('"', false) if current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
                quoted = true;
            }
            (',', false) => fields.push(std::mem::take(&mut current).trim().to_owned()),
            ('\n', false) => {
                finish_record(&mut fields, &mut current, quoted, record_line);
                quoted = false;
                line += 1;
                record_line = line;
            }
            ('\n', true) => {
                current.push('\n');
                line += 1;
            }
            (c, _) => current.push(c),
        }
    }
    if in_quotes {
        return Err(MalformedCard::UnterminatedQuote { line: record_line });
    }
    finish_record(&mut fields, &mut current, quoted, record_line);
    Ok(records)
}
