use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::issue::Issue;
use crate::record::Record;
use crate::remote::{HydrateStrategy, StubHydrate};

/// Reusable mapping closure bound to one record type, for runs of payloads.
pub type RecordMapper = Box<dyn Fn(&Value) -> Box<dyn Record> + Send + Sync>;

/// The closed set of registered record types. Adding a type means a new
/// variant here plus constructor arms in the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Tag {
    Issue,
}

impl Tag {
    fn resolve(tag: &str) -> Result<Self> {
        match tag {
            Issue::TAG => Ok(Tag::Issue),
            _ => Err(Error::UnknownRecordType(tag.to_string())),
        }
    }
}

/// Builds concrete records from a type tag plus either an identifier or an
/// already-fetched raw payload.
pub struct RecordFactory {
    strategies: HashMap<Tag, Arc<dyn HydrateStrategy>>,
}

impl RecordFactory {
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Bind a fetch strategy for a tag. Tags left unbound fall back to the
    /// warn-only stub.
    pub fn bind_strategy(&mut self, tag: &str, strategy: Arc<dyn HydrateStrategy>) -> Result<()> {
        let tag = Tag::resolve(tag)?;
        self.strategies.insert(tag, strategy);
        Ok(())
    }

    fn strategy_for(&self, tag: Tag) -> Arc<dyn HydrateStrategy> {
        self.strategies
            .get(&tag)
            .cloned()
            .unwrap_or_else(|| Arc::new(StubHydrate))
    }

    /// Build a record from its identifier and hydrate it.
    ///
    /// The returned record carries raw data (when the strategy produced any)
    /// but its fields are not yet mapped; callers chain
    /// [`Record::from_data`] on the raw result for the field pass.
    pub async fn create_from_id(&self, tag: &str, id: &str) -> Result<Box<dyn Record>> {
        let tag = Tag::resolve(tag)?;
        let mut record: Box<dyn Record> = match tag {
            Tag::Issue => Box::new(Issue::new(id, self.strategy_for(tag))?),
        };
        record.hydrate().await?;
        Ok(record)
    }

    /// Map a raw payload straight into a fully populated record.
    pub fn create_from_data(&self, tag: &str, raw: &Value) -> Result<Box<dyn Record>> {
        Ok(self.record_mapper(tag)?(raw))
    }

    /// A mapping closure bound to `tag`, for batch ingestion of payloads.
    pub fn record_mapper(&self, tag: &str) -> Result<RecordMapper> {
        let tag = Tag::resolve(tag)?;
        let strategy = self.strategy_for(tag);
        Ok(match tag {
            Tag::Issue => {
                Box::new(move |raw| Box::new(Issue::from_value(raw, strategy.clone())))
            }
        })
    }
}

impl Default for RecordFactory {
    fn default() -> Self {
        Self::new()
    }
}
