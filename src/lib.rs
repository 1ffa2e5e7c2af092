pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod refine;
pub mod types;

#[cfg(test)]
mod test_support;
