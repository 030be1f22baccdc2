//! Deterministic per-candidate question ordering.
//!
//! The seed is a polynomial rolling hash of the candidate's normalized
//! email; the permutation comes from a small LCG driving a Fisher–Yates
//! pass. No per-candidate order state is stored anywhere: the same email
//! over the same question list reproduces the same ordering on every fetch.

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233280;

/// Derives the shuffle seed from a candidate email.
///
/// Lower-cases and trims the email, folds its UTF-16 code units into a
/// 32-bit signed hash (`h = h * 31 + unit`, wrapping — the classic
/// `(h << 5) - h` string hash), then takes the absolute value.
pub fn seed_for_email(email: &str) -> u32 {
    let normalized = email.trim().to_lowercase();
    let mut hash: i32 = 0;
    for unit in normalized.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs()
}

/// Fisher–Yates shuffle driven by the LCG, walking from the last index down
/// to 1. Integer arithmetic throughout, so the permutation is identical on
/// every platform for a given seed.
pub fn shuffle_with_seed<T>(items: &mut [T], seed: u32) {
    let mut state = u64::from(seed);
    for i in (1..items.len()).rev() {
        state = (state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        // Scale the generator output uniformly into [0, i].
        let j = (state * (i as u64 + 1) / LCG_MODULUS) as usize;
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_known_values() {
        assert_eq!(seed_for_email("a@x.com"), 2_133_068_396);
        assert_eq!(seed_for_email("b@x.com"), 1_274_395_219);
        assert_eq!(seed_for_email("alice@example.com"), 2_145_772_861);
    }

    #[test]
    fn test_seed_normalizes_case_and_whitespace() {
        assert_eq!(
            seed_for_email("  ALICE@Example.COM "),
            seed_for_email("alice@example.com")
        );
    }

    #[test]
    fn test_shuffle_known_permutations() {
        let mut a = [1, 2, 3, 4, 5, 6, 7, 8];
        shuffle_with_seed(&mut a, seed_for_email("a@x.com"));
        assert_eq!(a, [1, 7, 3, 4, 6, 5, 2, 8]);

        let mut b = [1, 2, 3, 4, 5, 6, 7, 8];
        shuffle_with_seed(&mut b, seed_for_email("b@x.com"));
        assert_eq!(b, [4, 2, 3, 8, 6, 5, 7, 1]);
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let mut first: Vec<u32> = (0..50).collect();
        let mut second: Vec<u32> = (0..50).collect();
        shuffle_with_seed(&mut first, 12345);
        shuffle_with_seed(&mut second, 12345);
        assert_eq!(first, second);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut items: Vec<u32> = (0..100).collect();
        shuffle_with_seed(&mut items, seed_for_email("someone@somewhere.org"));
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..100).collect::<Vec<u32>>());
    }

    #[test]
    fn test_different_seeds_give_different_orders() {
        let mut a: Vec<u32> = (0..50).collect();
        let mut b: Vec<u32> = (0..50).collect();
        shuffle_with_seed(&mut a, seed_for_email("a@x.com"));
        shuffle_with_seed(&mut b, seed_for_email("b@x.com"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_shuffle_tolerates_trivial_inputs() {
        let mut empty: [u32; 0] = [];
        shuffle_with_seed(&mut empty, 42);

        let mut single = [9];
        shuffle_with_seed(&mut single, 42);
        assert_eq!(single, [9]);
    }
}
