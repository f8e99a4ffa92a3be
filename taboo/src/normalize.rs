use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Reduces a token to the form used for all word comparisons.
///
/// The token is lowercased, decomposed (NFD) so that accents become separate
/// combining marks, and everything that is not a letter or digit is dropped.
/// `"Canción!"` and `"cancion"` both become `"cancion"`, and `"Ñandú"`
/// becomes `"nandu"`.
pub fn normalize(token: &str) -> String {
    token
        .to_lowercase()
        .nfd()
        .filter(|&c| !is_combining_mark(c) && c.is_alphanumeric())
        .collect()
}
