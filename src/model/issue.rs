use std::any::Any;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::record::Record;
use crate::remote::HydrateStrategy;
use crate::util::{path, status};

/// The flat field set mapped out of a raw issue payload.
///
/// `id` (the human key, e.g. "EX-1") lives on [`Issue`] itself; `issue_id`
/// here is the tracker's internal numeric id. The two are distinct and must
/// not be conflated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Component names joined with ", "; empty when the issue has none.
    #[serde(default)]
    pub components: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duedate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

/// One remote tracker issue: identifier, optional raw payload, and the
/// mapped flat fields.
pub struct Issue {
    id: String,
    raw: Option<Value>,
    strategy: Arc<dyn HydrateStrategy>,
    pub fields: IssueFields,
}

impl Issue {
    pub const TAG: &'static str = "issue";

    /// An unmapped issue known only by its key or internal id.
    pub fn new(id: impl Into<String>, strategy: Arc<dyn HydrateStrategy>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::InvalidArgument(
                "record id must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id,
            raw: None,
            strategy,
            fields: IssueFields::default(),
        })
    }

    /// Map a raw payload into a fully populated issue. Missing paths leave
    /// the corresponding field unset; this never fails.
    pub fn from_value(raw: &Value, strategy: Arc<dyn HydrateStrategy>) -> Self {
        let components = path::get(raw, &["fields", "components"])
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|c| path::get_str(c, &["name"]))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();

        // Old-style payloads carry `name`, newer ones only `displayName`.
        let person = |role: &str| {
            path::get_str(raw, &["fields", role, "name"])
                .or_else(|| path::get_str(raw, &["fields", role, "displayName"]))
        };

        let fields = IssueFields {
            assignee: person("assignee"),
            components,
            created: path::get_str(raw, &["fields", "created"]),
            description: path::get_str(raw, &["fields", "description"]),
            duedate: path::get_str(raw, &["fields", "duedate"]),
            // headline deliberately reads the same path as summary; see DESIGN.md
            headline: path::get_str(raw, &["fields", "summary"]),
            issue_id: path::get_str(raw, &["id"]),
            priority: path::get_str(raw, &["fields", "priority", "name"]),
            project_key: path::get_str(raw, &["fields", "project", "key"]),
            reporter: person("reporter"),
            resolution: path::get_str(raw, &["fields", "resolution", "name"]),
            start_date: path::get_str(raw, &["fields", "startDate"]),
            status: path::get_str(raw, &["fields", "status", "name"]).map(|s| status::decode(&s)),
            summary: path::get_str(raw, &["fields", "summary"]),
            issue_type: path::get_str(raw, &["fields", "issuetype", "name"]),
            updated: path::get_str(raw, &["fields", "updated"]),
        };

        Self {
            id: path::get_str(raw, &["key"]).unwrap_or_default(),
            raw: Some(raw.clone()),
            strategy,
            fields,
        }
    }
}

#[async_trait]
impl Record for Issue {
    fn record_type(&self) -> &'static str {
        Self::TAG
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn raw_data(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    async fn hydrate(&mut self) -> Result<()> {
        let raw = self
            .strategy
            .fetch_raw(&self.id)
            .await
            .map_err(|source| Error::Hydrate {
                id: self.id.clone(),
                source,
            })?;
        if let Some(raw) = raw {
            self.raw = Some(raw);
        }
        Ok(())
    }

    fn from_data(&self, raw: &Value) -> Box<dyn Record> {
        Box::new(Self::from_value(raw, self.strategy.clone()))
    }

    fn export(&self) -> Vec<(&'static str, String)> {
        let f = &self.fields;
        let pairs = [
            ("id", (!self.id.is_empty()).then(|| self.id.clone())),
            ("assignee", f.assignee.clone()),
            (
                "components",
                (!f.components.is_empty()).then(|| f.components.clone()),
            ),
            ("created", f.created.clone()),
            ("description", f.description.clone()),
            ("duedate", f.duedate.clone()),
            ("headline", f.headline.clone()),
            ("issue_id", f.issue_id.clone()),
            ("priority", f.priority.clone()),
            ("project_key", f.project_key.clone()),
            ("reporter", f.reporter.clone()),
            ("resolution", f.resolution.clone()),
            ("start_date", f.start_date.clone()),
            ("status", f.status.clone()),
            ("summary", f.summary.clone()),
            ("type", f.issue_type.clone()),
            ("updated", f.updated.clone()),
        ];
        pairs
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Issue")
            .field("id", &self.id)
            .field("fields", &self.fields)
            .field("raw", &self.raw.is_some())
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::remote::StubHydrate;

    fn stub() -> Arc<dyn HydrateStrategy> {
        Arc::new(StubHydrate)
    }

    fn sample_payload() -> Value {
        json!({
            "key": "EX-1",
            "id": "10000",
            "fields": {
                "summary": "Fix the flux capacitor",
                "description": "It stopped fluxing.",
                "assignee": {"name": "mmcfly"},
                "reporter": {"displayName": "Emmett Brown"},
                "priority": {"name": "High"},
                "project": {"key": "EX"},
                "status": {"name": "In%20Progress"},
                "issuetype": {"name": "Bug"},
                "components": [{"name": "engine"}, {"name": "dash"}],
                "created": "2015-10-21T07:28:00.000+0000",
                "updated": "2015-10-26T01:21:00.000+0000",
                "duedate": "2015-11-05",
                "resolution": {"name": "Unresolved"}
            }
        })
    }

    #[test]
    fn maps_all_fields() {
        let issue = Issue::from_value(&sample_payload(), stub());
        assert_eq!(issue.id(), "EX-1");
        assert_eq!(issue.fields.issue_id.as_deref(), Some("10000"));
        assert_eq!(issue.fields.summary.as_deref(), Some("Fix the flux capacitor"));
        assert_eq!(issue.fields.description.as_deref(), Some("It stopped fluxing."));
        assert_eq!(issue.fields.assignee.as_deref(), Some("mmcfly"));
        assert_eq!(issue.fields.reporter.as_deref(), Some("Emmett Brown"));
        assert_eq!(issue.fields.priority.as_deref(), Some("High"));
        assert_eq!(issue.fields.project_key.as_deref(), Some("EX"));
        assert_eq!(issue.fields.status.as_deref(), Some("In Progress"));
        assert_eq!(issue.fields.issue_type.as_deref(), Some("Bug"));
        assert_eq!(issue.fields.components, "engine, dash");
        assert_eq!(issue.fields.duedate.as_deref(), Some("2015-11-05"));
        assert_eq!(issue.fields.resolution.as_deref(), Some("Unresolved"));
        assert!(issue.raw_data().is_some());
    }

    #[test]
    fn key_and_internal_id_stay_distinct() {
        let issue = Issue::from_value(&sample_payload(), stub());
        assert_ne!(issue.id(), issue.fields.issue_id.as_deref().unwrap());
    }

    #[test]
    fn headline_mirrors_summary() {
        let issue = Issue::from_value(&sample_payload(), stub());
        assert_eq!(issue.fields.headline, issue.fields.summary);
    }

    #[test]
    fn mapping_is_deterministic() {
        let raw = sample_payload();
        let a = Issue::from_value(&raw, stub());
        let b = Issue::from_value(&raw, stub());
        assert_eq!(a.fields, b.fields);
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn missing_paths_leave_fields_unset() {
        let issue = Issue::from_value(&json!({"key": "EX-2"}), stub());
        assert_eq!(issue.id(), "EX-2");
        assert_eq!(issue.fields, IssueFields::default());
    }

    #[test]
    fn components_flatten_to_joined_names() {
        let mk = |components: Value| {
            Issue::from_value(&json!({"key": "EX-1", "fields": {"components": components}}), stub())
        };
        assert_eq!(mk(json!([])).fields.components, "");
        assert_eq!(mk(json!([{"name": "A"}])).fields.components, "A");
        assert_eq!(mk(json!([{"name": "A"}, {"name": "B"}])).fields.components, "A, B");
    }

    #[test]
    fn numeric_internal_id_is_stringified() {
        let issue = Issue::from_value(&json!({"key": "EX-1", "id": 10000}), stub());
        assert_eq!(issue.fields.issue_id.as_deref(), Some("10000"));
    }

    #[test]
    fn empty_id_is_rejected() {
        let err = Issue::new("", stub()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn dump_skips_unset_fields() {
        let issue = Issue::from_value(
            &json!({"key": "EX-1", "fields": {"summary": "Test"}}),
            stub(),
        );
        let dump = issue.dump();
        assert!(dump.contains("id: EX-1"));
        assert!(dump.contains("summary: Test"));
        assert!(dump.contains("headline: Test"));
        assert!(!dump.contains("duedate"));
        assert!(!dump.contains("components"));
    }

    #[test]
    fn from_data_does_not_mutate_the_receiver() {
        let issue = Issue::new("EX-9", stub()).unwrap();
        let mapped = issue.from_data(&sample_payload());
        assert_eq!(issue.id(), "EX-9");
        assert!(issue.raw_data().is_none());
        assert_eq!(mapped.id(), "EX-1");
    }
}
