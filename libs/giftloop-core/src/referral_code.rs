use rand::Rng;

/// Characters that survive being read aloud or retyped: no 0/O, no 1/I.
pub const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub const DEFAULT_LENGTH: usize = 6;

pub fn generate() -> String {
    generate_with_len(DEFAULT_LENGTH)
}

pub fn generate_with_len(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

pub fn is_well_formed(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| ALPHABET.contains(&b))
}
