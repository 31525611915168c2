//! Terminal Pokédex for the original 151, backed by PokéAPI.
//!
//! [`PokedexClient`] fetches, normalizes and memoizes the roster, per-entry
//! records and sprites; the binary drives it from a single presentation loop.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;
pub mod state;

pub use domain::error::PokedexError;
pub use domain::model::{ImageBytes, RecordDetail, RosterEntry};
pub use domain::traits::Fetcher;
pub use infrastructure::network::client::PokedexClient;
