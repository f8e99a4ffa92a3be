use quickcheck::{Arbitrary, Gen};

use crate::Card;

/// A short lowercase token over a small alphabet, so that
/// generated pairs share letters often enough to be interesting.
#[derive(Clone, Debug)]
pub struct Token(pub String);

const ALPHABET: [char; 9] = ['a', 'e', 'o', 'l', 'p', 'r', 's', 'n', 'ñ'];

impl Arbitrary for Token {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 9;
        let token = (0..len)
            .map(|_| *g.choose(&ALPHABET).unwrap())
            .collect();
        Token(token)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let chars: Vec<char> = self.0.chars().collect();
        Box::new((0..chars.len()).map(move |skip| {
            Token(
                chars
                    .iter()
                    .enumerate()
                    .filter_map(|(i, &c)| (i != skip).then_some(c))
                    .collect(),
            )
        }))
    }
}

/// Cards with IDs `0..n` and distinct targets.
pub fn numbered_cards(n: u32) -> Vec<Card> {
    (0..n)
        .map(|id| Card {
            id,
            target: format!("palabra{id}"),
            forbidden: [
                String::from("uno"),
                String::from("dos"),
                String::from("tres"),
                String::from("cuatro"),
            ],
        })
        .collect()
}
