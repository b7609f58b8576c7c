pub mod error;
pub mod geo;
pub mod models;
pub mod storage;
pub mod types;

pub use error::Error;
pub use geo::Geocoder;
pub use models::{RawReport, ReportGenerator, ReportPrompt, ReportStyle};
pub use storage::ReportArchive;
pub use types::{CategoryCounts, Coordinates, LocationRequest, NewsArticle, ParseResult};

pub type Result<T> = std::result::Result<T, Error>;
