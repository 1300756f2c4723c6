mod base;
pub mod postgres;

use std::sync::Arc;

pub use base::{PostRepository, Repository, TokenRepository};
pub use postgres::PostgresRepository;

pub type DynRepository = Arc<dyn Repository>;
