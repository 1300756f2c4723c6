use rand::distributions::Uniform;
use rand::rngs::OsRng;
use rand::Rng;

const STATE_LENGTH: usize = 32;

/// Opaque value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    generate_secure_alphanumeric_string(STATE_LENGTH)
}

fn generate_secure_alphanumeric_string(len: usize) -> String {
    const CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    OsRng
        .sample_iter(Uniform::from(0..CHARS.len()))
        .map(|idx| CHARS[idx] as char)
        .take(len)
        .collect()
}
