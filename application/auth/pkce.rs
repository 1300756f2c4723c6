//! Proof Key for Code Exchange (RFC 7636), `S256` only.
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

pub const CODE_CHALLENGE_METHOD: &str = "S256";

const VERIFIER_BYTES: usize = 96;
const MAX_VERIFIER_LENGTH: usize = 128;

#[derive(Clone, Debug)]
pub struct PkceChallenge {
    pub verifier: String,
    pub challenge: String,
}

pub fn generate_pkce() -> PkceChallenge {
    let mut bytes = [0u8; VERIFIER_BYTES];
    OsRng.fill_bytes(&mut bytes);

    let mut verifier = URL_SAFE_NO_PAD.encode(bytes);
    verifier.truncate(MAX_VERIFIER_LENGTH);
    let challenge = code_challenge(&verifier);

    PkceChallenge {
        verifier,
        challenge,
    }
}

fn code_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

pub fn verify_pkce(verifier: &str, challenge: &str) -> bool {
    code_challenge(verifier) == challenge
}
