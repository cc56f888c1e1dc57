//! Core types and trait definitions for the Rankscope SEO dashboard.
//!
//! This crate is deliberately free of runtime and storage dependencies.
//! Backends implement the store traits in [`store`]; front-ends depend on
//! those traits, not on any concrete backend.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod competitor;
pub mod domain;
pub mod effects;
pub mod error;
pub mod keyword;
pub mod metrics;
pub mod store;

pub use error::{Error, Result};
