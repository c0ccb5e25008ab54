//! Human-readable code generation
//!
//! Activation and account codes use a 32-symbol alphabet without the
//! easily confused `I`, `O`, `0` and `1`.

use rand::Rng;

/// Code alphabet
pub const CODE_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Activation code length
pub const ACTIVATION_CODE_LEN: usize = 12;

/// Random part of an account code
pub const ACCOUNT_CODE_LEN: usize = 8;

pub const ACCOUNT_CODE_PREFIX: &str = "AC-";

/// Random code of `len` alphabet symbols
pub fn random_code(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Draw codes until one is not taken
fn unique<F>(generate: impl Fn() -> String, exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    loop {
        let code = generate();
        if !exists(&code) {
            return code;
        }
        tracing::debug!("Generated code collided, retrying");
    }
}

/// Fresh activation code, regenerated while `exists` reports a collision
pub fn activation_code(exists: impl Fn(&str) -> bool) -> String {
    unique(|| random_code(ACTIVATION_CODE_LEN), exists)
}

/// Fresh `AC-XXXXXXXX` account code, regenerated while `exists` reports a collision
pub fn account_code(exists: impl Fn(&str) -> bool) -> String {
    unique(
        || format!("{}{}", ACCOUNT_CODE_PREFIX, random_code(ACCOUNT_CODE_LEN)),
        exists,
    )
}

/// Random price in 10 000..=100 000, step 10 000
pub fn random_seed_price() -> i64 {
    rand::thread_rng().gen_range(1..=10) * 10_000
}
