use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Deterministic RNG for one seat's private deck.
///
/// Implementation detail:
/// - Derives a per-seat 64-bit seed as `seed ^ (section << 56)`.
/// - Uses PCG 64-bit generator (rand_pcg::Pcg64) for reproducible shuffles.
#[inline]
pub fn rng_for_seat(seed: u64, section: u8) -> Pcg64 {
    let derived: u64 = seed ^ (u64::from(section) << 56);
    Pcg64::seed_from_u64(derived)
}

/// Deterministic RNG for a (seed, game_id) pair, used by automated players.
#[inline]
pub fn rng_for_game(seed: u64, game_id: u64) -> Pcg64 {
    let derived: u64 = seed ^ game_id.rotate_left(32) ^ 0x9E37_79B9_7F4A_7C15;
    Pcg64::seed_from_u64(derived)
}
