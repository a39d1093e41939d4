use crate::foundation::math::Rng64;

/// Glyphs a scrambled position cycles through.
pub const SCRAMBLE_GLYPHS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%&*";

/// Iterations between one position settling and the next.
pub(crate) const ITERATIONS_PER_CHAR: u32 = 3;

fn is_bracket(c: char) -> bool {
    matches!(c, '[' | ']')
}

/// Whether position `index` of the target shows its final character at `iteration`.
pub fn is_settled(c: char, index: usize, iteration: u32) -> bool {
    is_bracket(c) || u64::from(iteration) > index as u64 * u64::from(ITERATIONS_PER_CHAR)
}

/// One frame of the left-to-right decrypt effect.
///
/// Brackets are always shown verbatim. Every other unsettled position draws a glyph from
/// `alphabet`; an empty alphabet leaves it unscrambled.
pub(crate) fn decrypt_frame(
    target: &str,
    iteration: u32,
    rng: &mut Rng64,
    alphabet: &[char],
) -> String {
    target
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if is_settled(c, i, iteration) || alphabet.is_empty() {
                c
            } else {
                alphabet[rng.next_index(alphabet.len())]
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/intro/decrypt.rs"]
mod tests;
