use rand::seq::SliceRandom;
use rand::Rng;
use taboo::{check_hint, normalize, Annotator, Card, StopwordAnnotator};
use taboo_bot_utils::Bot;
use tracing::debug;

/// Said when the lexicon has nothing left to offer.
pub const NO_IDEA: &str = "no sé";

/// What a single hint tells about the target word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Clue {
    Length(usize),
    Prefix(String),
    Suffix(String),
    /// Free text, reduced to its normalized content words.
    Words(Vec<String>),
}

impl Clue {
    /// Understands the hints from [`hint_ladder`]. Anything else is free text.
    pub fn parse(hint: &str) -> Self {
        let tokens: Vec<String> = hint.split_whitespace().map(normalize).collect();
        let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
        match tokens.as_slice() {
            ["tiene", n, "letras" | "letra"] => match n.parse() {
                Ok(n) => Clue::Length(n),
                Err(_) => Clue::free_text(hint),
            },
            ["empieza", "por", "la", "letra", letter] => Clue::Prefix(String::from(*letter)),
            ["termina", "en", "la", "letra", letter] => Clue::Suffix(String::from(*letter)),
            ["empieza", "por", prefix] => Clue::Prefix(String::from(*prefix)),
            _ => Clue::free_text(hint),
        }
    }

    fn free_text(hint: &str) -> Self {
        let words = StopwordAnnotator
            .main_words(hint)
            .iter()
            .map(|word| normalize(word))
            .collect();
        Clue::Words(words)
    }

    /// Whether a normalized word is compatible with this clue.
    pub fn admits(&self, word: &str) -> bool {
        match self {
            Clue::Length(n) => word.chars().count() == *n,
            Clue::Prefix(prefix) => word.starts_with(prefix.as_str()),
            Clue::Suffix(suffix) => word.ends_with(suffix.as_str()),
            Clue::Words(_) => true,
        }
    }

    /// How many content words of the clue are related to the card.
    pub fn relevance(&self, card: &Card) -> usize {
        match self {
            Clue::Words(words) => words
                .iter()
                .filter(|word| check_hint(&card.target, &card.forbidden, &[word.as_str()]).is_some())
                .count(),
            _ => 0,
        }
    }
}

/// Hints for `target` from least to most revealing.
///
/// They only talk about spelling, so the ones that come too close to the
/// target or a forbidden word are left out.
pub fn hint_ladder(target: &str, forbidden: &[String]) -> Vec<String> {
    let word = normalize(target);
    let letters: Vec<char> = word.chars().collect();
    let (Some(first), Some(last)) = (letters.first(), letters.last()) else {
        return Vec::new();
    };

    let mut ladder = vec![
        format!("Tiene {} letras", letters.len()),
        format!("Empieza por la letra {}", first),
        format!("Termina en la letra {}", last),
    ];
    let longest_prefix = letters.len().saturating_sub(2).min(3);
    for len in 2..=longest_prefix {
        let prefix: String = letters[..len].iter().collect();
        ladder.push(format!("Empieza por {}", prefix));
    }

    // Every token counts here, stopwords included
    ladder.retain(|hint| {
        let tokens: Vec<&str> = hint.split_whitespace().collect();
        check_hint(target, forbidden, &tokens).is_none()
    });
    ladder
}

/// An oracle that only knows the words on the cards.
pub struct LexiconBot<R> {
    cards: Vec<Card>,
    rng: R,
}

impl<R: Rng> LexiconBot<R> {
    pub fn new(cards: Vec<Card>, rng: R) -> Self {
        Self { cards, rng }
    }

    /// The next rung of the ladder, or the last one once they run out.
    pub fn next_hint(&self, target: &str, forbidden: &[String], previous_hints: &[String]) -> String {
        let ladder = hint_ladder(target, forbidden);
        ladder
            .get(previous_hints.len())
            .or(ladder.last())
            .cloned()
            .unwrap_or_else(|| String::from(NO_IDEA))
    }

    /// Picks the most relevant card that fits every clue and was not
    /// guessed yet. Ties are broken at random.
    pub fn best_guess(&mut self, hints: &[String], previous_guesses: &[String]) -> String {
        let clues: Vec<Clue> = hints.iter().map(|hint| Clue::parse(hint)).collect();
        let guessed: Vec<String> = previous_guesses.iter().map(|g| normalize(g)).collect();

        let candidates: Vec<(&Card, usize)> = self
            .cards
            .iter()
            .filter(|card| {
                let word = normalize(&card.target);
                !guessed.contains(&word) && clues.iter().all(|clue| clue.admits(&word))
            })
            .map(|card| (card, clues.iter().map(|clue| clue.relevance(card)).sum()))
            .collect();

        let Some(best) = candidates.iter().map(|&(_, relevance)| relevance).max() else {
            return String::from(NO_IDEA);
        };
        let best_cards: Vec<&Card> = candidates
            .iter()
            .filter(|&&(_, relevance)| relevance == best)
            .map(|&(card, _)| card)
            .collect();
        best_cards
            .choose(&mut self.rng)
            .map(|card| card.target.clone())
            .unwrap_or_else(|| String::from(NO_IDEA))
    }
}

impl<R: Rng> Bot for LexiconBot<R> {
    fn new_game(&mut self, model: &str) {
        debug!(model, "New game, ignoring the model");
    }

    fn give_hint(&mut self, target: &str, forbidden: &[String], previous_hints: &[String]) -> String {
        let hint = self.next_hint(target, forbidden, previous_hints);
        debug!(target, %hint, "Giving hint");
        hint
    }

    fn guess(&mut self, hints: &[String], previous_guesses: &[String]) -> String {
        let guess = self.best_guess(hints, previous_guesses);
        debug!(%guess, "Guessing");
        guess
    }

    fn judge_guess(&mut self, target: &str, guess: &str) -> bool {
        same_word(target, guess)
    }
}

/// Exact match up to case and accents.
pub fn same_word(target: &str, guess: &str) -> bool {
    normalize(target.trim()) == normalize(guess.trim())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use taboo::parse_cards;

    use super::*;

    const CARDS: &str = "\
ID,target,forbidden_1,forbidden_2,forbidden_3,forbidden_4
1,perro,ladrar,mascota,hueso,cola
2,gato,maullar,felino,ratón,bigotes
3,pato,pluma,agua,graznar,ave
4,camión,carga,ruedas,conductor,carretera
";

    fn bot() -> LexiconBot<StdRng> {
        LexiconBot::new(parse_cards(CARDS).unwrap(), StdRng::seed_from_u64(3))
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|&item| String::from(item)).collect()
    }

    #[test]
    fn ladder_goes_from_length_to_prefixes() {
        let ladder = hint_ladder("camión", &strings(&["carga", "ruedas", "conductor", "carretera"]));
        assert_eq!(
            ladder,
            strings(&[
                "Tiene 6 letras",
                "Empieza por la letra c",
                "Termina en la letra n",
                "Empieza por ca",
                "Empieza por cam",
            ])
        );
    }

    #[test]
    fn ladder_skips_revealing_hints() {
        // "t" is one edit away from "té"
        let ladder = hint_ladder("té", &strings(&["hoja", "taza", "infusión", "caliente"]));
        assert_eq!(ladder, strings(&["Tiene 2 letras"]));
        assert!(hint_ladder("", &[]).is_empty());
    }

    #[test]
    fn hints_run_down_the_ladder() {
        let bot = bot();
        let forbidden = strings(&["ladrar", "mascota", "hueso", "cola"]);
        assert_eq!(bot.next_hint("perro", &forbidden, &[]), "Tiene 5 letras");
        let previous = strings(&["a", "b", "c", "d", "e", "f", "g"]);
        assert_eq!(bot.next_hint("perro", &forbidden, &previous), "Empieza por per");
    }

    #[test]
    fn parses_its_own_hints() {
        assert_eq!(Clue::parse("Tiene 5 letras"), Clue::Length(5));
        assert_eq!(Clue::parse("Empieza por la letra G"), Clue::Prefix(String::from("g")));
        assert_eq!(Clue::parse("Termina en la letra ó"), Clue::Suffix(String::from("o")));
        assert_eq!(Clue::parse("empieza por cam"), Clue::Prefix(String::from("cam")));
        assert_eq!(
            Clue::parse("Es un animal que ladra"),
            Clue::Words(strings(&["animal", "ladra"]))
        );
        assert_eq!(
            Clue::parse("Tiene muchas letras"),
            Clue::Words(strings(&["tiene", "letras"]))
        );
    }

    #[test]
    fn guesses_from_spelling_clues() {
        let mut bot = bot();
        let hints = strings(&["Tiene 4 letras", "Empieza por la letra g"]);
        assert_eq!(bot.best_guess(&hints, &[]), "gato");
    }

    #[test]
    fn guesses_from_related_words() {
        let mut bot = bot();
        assert_eq!(bot.best_guess(&strings(&["un animal que ladra"]), &[]), "perro");
        assert_eq!(
            bot.best_guess(&strings(&["tiene ruedas y lleva carga"]), &[]),
            "camión"
        );
    }

    #[test]
    fn never_repeats_a_guess() {
        let mut bot = bot();
        let hints = strings(&["Tiene 4 letras", "Termina en la letra o"]);
        let first = bot.best_guess(&hints, &[]);
        assert!(first == "gato" || first == "pato");
        let second = bot.best_guess(&hints, &[first.clone()]);
        assert!(second == "gato" || second == "pato");
        assert_ne!(first, second);
        assert_eq!(bot.best_guess(&hints, &strings(&["gato", "pato"])), NO_IDEA);
    }

    #[test]
    fn judges_up_to_case_and_accents() {
        assert!(same_word("camión", " Camion "));
        assert!(!same_word("perro", "perros"));
    }

    #[test]
    fn speaks_the_protocol() {
        let mut bot = bot();
        let requests = [
            r#"{"type":"NewGame","model":"none"}"#,
            r#"{"type":"GiveHint","target":"gato","forbidden":["maullar","felino","ratón","bigotes"],"previous_hints":[]}"#,
            r#"{"type":"JudgeGuess","target":"camión","guess":"CAMION"}"#,
            r#"{"type":"Bye"}"#,
        ]
        .join("\n");
        let mut output = Vec::new();
        bot.serve(requests.as_bytes(), &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "[]\n{\"text\":\"Tiene 4 letras\"}\n{\"correct\":true}\n"
        );
    }
}
