use std::any::Any;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Common contract for every remote record type.
///
/// A record starts with an identifier only, gains a raw payload either
/// through [`Record::hydrate`] or by being built from a payload directly,
/// and becomes mapped through [`Record::from_data`]. Mapping is pure and
/// never mutates a record in place, so a half-populated record is never
/// observable.
#[async_trait]
pub trait Record: Send + Sync {
    /// Short tag this record type is registered under.
    fn record_type(&self) -> &'static str;

    fn id(&self) -> &str;

    /// Raw remote payload, present once hydrated or supplied at construction.
    fn raw_data(&self) -> Option<&Value>;

    /// Fetch raw data through the bound strategy and store it on the record.
    /// A stub strategy produces nothing and leaves the record untouched.
    async fn hydrate(&mut self) -> Result<()>;

    /// Map a raw payload into a new, fully populated record of the same
    /// concrete type. `self` is consulted only for its strategy binding.
    fn from_data(&self, raw: &Value) -> Box<dyn Record>;

    /// Every currently-set field as name/value pairs, in declaration order.
    /// Fields that were never set are omitted.
    fn export(&self) -> Vec<(&'static str, String)>;

    /// Human-readable listing of the set fields, one per line.
    fn dump(&self) -> String {
        self.export()
            .into_iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn as_any(&self) -> &dyn Any;
}

impl std::fmt::Debug for dyn Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Record")
            .field("record_type", &self.record_type())
            .field("id", &self.id())
            .finish()
    }
}
