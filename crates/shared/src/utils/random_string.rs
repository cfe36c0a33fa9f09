use anyhow::Result;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, TryRngCore};

const CHARACTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const DIGITS: &[u8] = b"0123456789";

fn seeded_rng() -> Result<StdRng> {
    let mut seed = [0u8; 32];
    OsRng.try_fill_bytes(&mut seed)?;
    Ok(StdRng::from_seed(seed))
}

fn pick(alphabet: &[u8], length: usize) -> Result<String> {
    let mut rng = seeded_rng()?;

    let s = (0..length)
        .map(|_| {
            let idx = rng.random_range(0..alphabet.len());
            alphabet[idx] as char
        })
        .collect();

    Ok(s)
}

/// Lowercase alphanumeric string, used for slug suffixes.
pub fn generate_random_string(length: usize) -> Result<String> {
    pick(CHARACTERS, length)
}

pub fn generate_random_digits(length: usize) -> Result<String> {
    pick(DIGITS, length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_only_contain_numbers() {
        let s = generate_random_digits(4).unwrap();
        assert_eq!(s.len(), 4);
        assert!(s.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn string_is_lowercase_alphanumeric() {
        let s = generate_random_string(12).unwrap();
        assert_eq!(s.len(), 12);
        assert!(
            s.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }
}
