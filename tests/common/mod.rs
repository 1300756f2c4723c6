#![allow(dead_code)]

pub mod fakes;
pub mod memory_repository;
pub mod setup;
