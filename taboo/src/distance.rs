/// The Levenshtein distance between two tokens, counted in `char`s.
///
/// Fills the full `(len(a) + 1) × (len(b) + 1)` table bottom-up, so every
/// call costs `O(len(a) · len(b))` time and nothing is cached between calls.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let width = b.len() + 1;

    // table[i * width + j] is the distance between a[i..] and b[j..]
    let mut table = vec![0usize; (a.len() + 1) * width];
    for i in (0..=a.len()).rev() {
        for j in (0..=b.len()).rev() {
            table[i * width + j] = if i == a.len() || j == b.len() {
                (a.len() - i) + (b.len() - j)
            } else if a[i] == b[j] {
                table[(i + 1) * width + (j + 1)]
            } else {
                let insert = table[i * width + (j + 1)];
                let delete = table[(i + 1) * width + j];
                let replace = table[(i + 1) * width + (j + 1)];
                1 + insert.min(delete).min(replace)
            };
        }
    }
    table[0]
}
