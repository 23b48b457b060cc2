//! Record hydration and field mapping for remote issue trackers.
//!
//! A record is created from a type tag plus either a bare identifier or an
//! already-fetched raw payload. The identifier path hydrates the record
//! through a per-type fetch strategy; the payload path maps the nested raw
//! structure into a flat, strongly-typed record. Mapping is pure and
//! tolerant: missing paths become unset fields, never errors.
//!
//! The crate owns no caching, pagination, retries or persistence. Transport
//! lives behind [`HydrateStrategy`]; [`remote::JiraFetcher`] is the supplied
//! implementation for Jira's issue-read endpoint.

pub mod error;
pub mod factory;
pub mod model;
pub mod record;
pub mod remote;
pub mod util;

pub use error::{Error, Result};
pub use factory::{RecordFactory, RecordMapper};
pub use model::{Issue, IssueFields};
pub use record::Record;
pub use remote::{HydrateStrategy, JiraFetcher, StubHydrate};
