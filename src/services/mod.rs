// src/services/mod.rs

pub mod csv_parser;
pub mod upload;
pub mod validation;
