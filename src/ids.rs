use rand::seq::SliceRandom;
use rand::thread_rng;

/// Length of a paste identifier.
pub const ID_LENGTH: usize = 10;

/// URL-safe alphabet, 64 symbols.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Generate a fresh paste identifier.
///
/// Collisions are possible in principle and surface as an insert conflict at
/// the store layer.
pub fn generate() -> String {
    let mut rng = thread_rng();
    (0..ID_LENGTH)
        .map(|_| *ALPHABET.choose(&mut rng).unwrap() as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn has_fixed_length() {
        for _ in 0..100 {
            assert_eq!(generate().len(), ID_LENGTH);
        }
    }

    #[test]
    fn stays_in_the_url_safe_alphabet() {
        for _ in 0..100 {
            let id = generate();
            assert!(id.bytes().all(|b| ALPHABET.contains(&b)), "bad id: {id}");
        }
    }

    #[test]
    fn does_not_repeat_in_practice() {
        let ids: HashSet<String> = (0..1000).map(|_| generate()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
