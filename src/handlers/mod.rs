// src/handlers/mod.rs

pub mod docs;
pub mod quiz;
