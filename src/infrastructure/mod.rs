pub mod http;
pub mod logging;

pub use http::{join_segments, ApiClient};
