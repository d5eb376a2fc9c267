//! Temporal indexing: timestamp series and the dimension values derived from them.
//!
//! All calendar arithmetic happens in UTC so that hourly series never see
//! daylight-saving duplicates or gaps.

mod indexer;
mod series;

pub use indexer::{MAX_WEEK, TemporalIndexer, derive_from_timestamp, week_of_year};
pub use series::{DateTimeSeries, parse_timestamp};
