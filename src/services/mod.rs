// src/services/mod.rs

pub mod exam;
pub mod grading;
pub mod results;
