//! Glyph pools and random substitution
//!
//! Whitespace is never substituted by any pool.

use rand::Rng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

/// Characters that are passed through unscrambled
#[inline]
pub fn is_passthrough(ch: char) -> bool {
    ch.is_whitespace()
}

/// A fixed alphabet of scramble glyphs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphPool {
    glyphs: Vec<char>,
}

impl GlyphPool {
    pub fn new(alphabet: &str) -> Self {
        Self {
            glyphs: alphabet.chars().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Random glyph from the pool, or `fallback` when the pool is empty
    pub fn pick(&self, rng: &mut Pcg32, fallback: char) -> char {
        if self.glyphs.is_empty() {
            return fallback;
        }
        self.glyphs[rng.random_range(0..self.glyphs.len())]
    }
}

/// Fill every hidden, non-whitespace cell with a fresh glyph from `pool`.
///
/// `out` is overwritten entirely; revealed and whitespace cells get the source char.
pub fn scramble_fixed(
    source: &[char],
    revealed: &[bool],
    pool: &GlyphPool,
    rng: &mut Pcg32,
    out: &mut Vec<char>,
) {
    out.clear();
    out.extend(source.iter().zip(revealed).map(|(&ch, &shown)| {
        if shown || is_passthrough(ch) {
            ch
        } else {
            pool.pick(rng, ch)
        }
    }));
}

/// Shuffle the hidden, non-whitespace source chars among their own positions.
///
/// The set of glyphs on screen stays a permutation of the hidden text.
pub fn scramble_shuffled(source: &[char], revealed: &[bool], rng: &mut Pcg32, out: &mut Vec<char>) {
    let mut bag: Vec<char> = source
        .iter()
        .zip(revealed)
        .filter(|&(&ch, &shown)| !shown && !is_passthrough(ch))
        .map(|(&ch, _)| ch)
        .collect();
    bag.shuffle(rng);

    let mut bag = bag.into_iter();
    out.clear();
    out.extend(source.iter().zip(revealed).map(|(&ch, &shown)| {
        if shown || is_passthrough(ch) {
            ch
        } else {
            bag.next().unwrap_or(ch)
        }
    }));
}
