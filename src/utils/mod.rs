pub mod chain_normalizer;
pub mod string_utils;
pub mod time_utils;

pub use chain_normalizer::normalize_chain;
pub use time_utils::*;
