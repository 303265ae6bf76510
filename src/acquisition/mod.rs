//! HTTP acquisition layer for brochure PDFs.
//!
//! One client, sequential requests. Candidate URLs come from the resolver;
//! the index probe supplements them with links scraped from the park's
//! brochure index page.

pub mod http_client;
pub mod index_probe;
