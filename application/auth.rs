mod middleware;
mod pending;
mod pkce;
mod token;

pub use middleware::{rate_limit, RateLimiter};
pub use pending::{PendingAuthorization, PendingAuthorizations};
pub use pkce::{generate_pkce, verify_pkce, PkceChallenge, CODE_CHALLENGE_METHOD};
pub use token::generate_state;
