pub mod iso_download;
pub mod validation_api;

pub use iso_download::{DownloadLink, IsoLinkBuilder};
pub use validation_api::{HttpValidationApi, ValidationApi};
