pub mod http;
pub mod source;
pub mod types;

pub use http::{DEFAULT_ENDPOINT, HttpMessageSource, phone_query_url};
pub use source::{FetchError, MessageSource};
pub use types::{FeedResponse, WireRecord};
