mod decoder;
mod request;

pub use decoder::Utf8StreamDecoder;
pub use request::{FetchFailure, FetchOutcome, RequestFetcher, ACCEPT_HTML};
