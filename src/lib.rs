// ABOUTME: Root module for coded-tools - tools an agent runtime can invoke for
// ABOUTME: news scraping, sentiment, market research, evaluation, and retrieval.

pub mod apollo;
pub mod config;
pub mod error;
pub mod http;
pub mod news;
pub mod prelude;
pub mod rag;
pub mod sentiment;
pub mod tool;
pub mod tools;

pub use error::{Error, Result};
