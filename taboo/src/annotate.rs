use crate::normalize;

/// Extracts the content words of a sentence.
///
/// Implementations drop determiners, prepositions, conjunctions,
/// auxiliaries, pronouns, adverbs and punctuation. The returned words are
/// opaque to the matcher, which normalizes them itself.
pub trait Annotator {
    fn main_words(&mut self, sentence: &str) -> Vec<String>;
}

/// Function words that never carry the meaning of a hint, in normalized form.
static SPANISH_STOPWORDS: &[&str] = &[
    // determiners
    "el", "la", "los", "las", "lo", "un", "una", "unos", "unas", "este", "esta", "estos", "estas",
    "ese", "esa", "esos", "esas", "aquel", "aquella", "aquellos", "aquellas", "mi", "mis", "tu",
    "tus", "su", "sus", "nuestro", "nuestra", "nuestros", "nuestras", "cada", "todo", "toda",
    "todos", "todas", "algun", "alguna", "algunos", "algunas", "ningun", "ninguna", "otro", "otra",
    "otros", "otras", "mucho", "mucha", "muchos", "muchas", "poco", "poca", "pocos", "pocas",
    // prepositions and contractions
    "a", "al", "ante", "bajo", "con", "contra", "de", "del", "desde", "durante", "en", "entre",
    "hacia", "hasta", "mediante", "para", "por", "segun", "sin", "sobre", "tras",
    // conjunctions
    "y", "e", "ni", "o", "u", "pero", "sino", "que", "porque", "pues", "si", "aunque", "como",
    "cuando", "donde", "mientras",
    // pronouns
    "yo", "me", "te", "se", "nos", "os", "le", "les", "ella", "ellas", "ellos", "usted",
    "ustedes", "nosotros", "nosotras", "vosotros", "vosotras", "esto", "eso", "aquello", "cual",
    "cuales", "quien", "quienes", "algo", "alguien", "nada", "nadie",
    // auxiliaries
    "es", "son", "era", "eran", "fue", "fueron", "ser", "sera", "estar", "estan", "estaba", "ha",
    "han", "he", "has", "hay", "habia", "haber", "puede", "pueden",
    // adverbs
    "no", "muy", "mas", "menos", "ya", "tambien", "tampoco", "siempre", "nunca", "aqui", "alli",
    "ahi", "bien", "mal", "solo", "casi", "tan", "tanto", "asi", "luego", "antes", "despues",
];

/// An [`Annotator`] that needs no language model.
///
/// Splits on whitespace, trims surrounding punctuation and filters out a
/// fixed list of Spanish function words.
#[derive(Clone, Copy, Debug, Default)]
pub struct StopwordAnnotator;

impl Annotator for StopwordAnnotator {
    fn main_words(&mut self, sentence: &str) -> Vec<String> {
        sentence
            .split_whitespace()
            .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|token| {
                let normalized = normalize(token);
                !normalized.is_empty() && !SPANISH_STOPWORDS.contains(&normalized.as_str())
            })
            .map(String::from)
            .collect()
    }
}
