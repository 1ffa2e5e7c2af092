pub mod bargain;
pub mod geo;
pub mod search;

pub use search::{classify, select};
