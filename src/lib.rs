//! Crawl visit browser (crawlview)
//!
//! TUI front end for a web-crawl inspection backend: search a domain's visit
//! history page by page, then open a visit to see its DNS, content, SMTP and
//! fingerprint crawl results.
//!
//! Follows a Pure Core / Impure Shell split: `model`, `state` and
//! `view_state` are pure; `backend`, `view`, `config` and `logging` do I/O.

pub mod backend;
pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;
pub mod view_state;

#[cfg(test)]
mod test_harness;
