//! Seeded ad positions for listing-page feeds.
//!
//! Listing pages insert ads between feed items. Positions must be stable for
//! a given seed (so reloads within the same day don't reshuffle the feed)
//! while looking randomized across seeds. The seed string is hashed with
//! 32-bit FNV-1a into the state of a linear congruential generator, which
//! then walks forward in bounded gaps.

use std::collections::BTreeSet;

const FNV_OFFSET_BASIS: u32 = 0x811c9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

// Numerical Recipes LCG constants.
const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;

fn fnv1a(seed: &str) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in seed.as_bytes() {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

fn lcg_next(state: &mut u32) -> u32 {
    *state = state.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT);
    // High bits have the better statistical properties.
    *state >> 16
}

/// Generate strictly increasing ad insertion indices for a feed of `total`
/// items.
///
/// The first ad lands in `[min_gap - 1, max_gap - 1]`; each later ad follows
/// the previous by a gap in `[min_gap, max_gap]`. Generation stops at `total`
/// or after `max_count` ads (default `max(1, total / 6)`). Identical inputs
/// always produce the identical set.
pub fn generate_positions(
    total: usize,
    seed: &str,
    min_gap: usize,
    max_gap: usize,
    max_count: Option<usize>,
) -> BTreeSet<usize> {
    let mut positions = BTreeSet::new();

    if total == 0 || min_gap == 0 || max_gap < min_gap {
        return positions;
    }

    let max_count = max_count.unwrap_or_else(|| std::cmp::max(1, total / 6));
    let gap_span = (max_gap - min_gap + 1) as u32;

    let mut state = fnv1a(seed);
    let mut index = (min_gap - 1) + lcg_next(&mut state) as usize % gap_span as usize;

    while index < total && positions.len() < max_count {
        positions.insert(index);
        index += min_gap + lcg_next(&mut state) as usize % gap_span as usize;
    }

    positions
}
