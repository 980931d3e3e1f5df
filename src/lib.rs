//! Estimark - repair estimating engine.
//!
//! Turns parsed inspection/scope documents into candidate repair tasks with
//! page-anchored citations, resolves unit pricing from rate cards or scraped
//! sources, and computes labor hours and line item costs.

pub mod cli;
pub mod config;
pub mod extraction;
pub mod math;
pub mod models;
pub mod pricing;
pub mod questions;
pub mod server;
