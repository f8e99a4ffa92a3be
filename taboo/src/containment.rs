use std::cmp::Ordering;

/// Shortest token that can be considered contained in another one.
const MIN_CONTAINED_LEN: usize = 4;

/// Whether one normalized token looks like a derivative of the other.
///
/// The check is symmetric. With `smaller` being the shorter token:
/// - three chars or fewer never count,
/// - exactly four chars must appear verbatim inside the longer token,
/// - longer tokens may differ in their final char, so `smaller` minus its
///   last char must appear inside the longer token.
pub fn is_contained(w1: &str, w2: &str) -> bool {
    let (len1, len2) = (w1.chars().count(), w2.chars().count());
    match len1.cmp(&len2) {
        Ordering::Less => contained_in(w1, len1, w2),
        Ordering::Greater => contained_in(w2, len2, w1),
        // Either token may play the larger one
        Ordering::Equal => contained_in(w1, len1, w2) || contained_in(w2, len2, w1),
    }
}

fn contained_in(smaller: &str, len: usize, larger: &str) -> bool {
    if len < MIN_CONTAINED_LEN {
        false
    } else if len == MIN_CONTAINED_LEN {
        larger.contains(smaller)
    } else {
        // len > 4, so there is a last char to drop
        let stem_end = smaller.char_indices().last().map_or(0, |(idx, _)| idx);
        larger.contains(&smaller[..stem_end])
    }
}
