//! Input handling around the merger.
//!
//! - [`delimited`]: splits raw text into a header row and data records
//! - [`source`]: decides which files are accepted and reads them to completion
//! - [`observability`]: observer hooks for merged, empty, rejected and failed inputs
//!
//! Most callers should go through [`crate::session::MergeSession`], which combines all three with
//! a [`crate::merger::TableMerger`].

pub mod delimited;
pub mod observability;
pub mod source;

pub use delimited::{ParsedTable, parse_delimited};
pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionSeverity, MergeObserver, StdErrObserver,
    TracingObserver,
};
pub use source::{InputFormat, accept_path, accept_source, read_source};
