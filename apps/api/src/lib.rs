//! Programme CP Sur-Mesure: questionnaire-driven revision program generation.
//!
//! Library crate shared by the two binaries: `api` (the HTTP service) and
//! `cli` (the terminal front-end that renders and exports the result).

pub mod config;
pub mod errors;
pub mod export;
pub mod form;
pub mod generation;
pub mod llm_client;
pub mod models;
pub mod render;
pub mod routes;
pub mod state;
