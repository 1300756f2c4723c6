pub mod draft;
pub mod platform;
pub mod post;
pub mod token;
