mod post;
mod token;

pub use post::PostRepository;
pub use token::TokenRepository;

pub trait Repository: TokenRepository + PostRepository + Send + Sync + 'static {}

impl<T> Repository for T where T: TokenRepository + PostRepository + Send + Sync + 'static {}
