pub mod agent;
pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod content;
pub mod error;
pub mod llm;
pub mod models;
pub mod publisher;
pub mod repository;
pub mod search;
pub mod social;
