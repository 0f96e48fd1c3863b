//! Catalog and session script files.
//!
//! Both are JSON. A catalog lists rows of titles:
//!
//! ```json
//! { "rows": [ { "id": 0, "title": "Trending Now",
//!               "items": [ { "id": 42, "media_type": "movie", "title": "Heat" } ] } ] }
//! ```
//!
//! A script lists input messages, each applied `wait_ms` after the previous
//! one:
//!
//! ```json
//! { "steps": [ { "wait_ms": 0,   "message": { "type": "navigate", "row": 0, "direction": "next" } },
//!              { "wait_ms": 500, "message": { "type": "tick" } } ] }
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use cinerow_core::CatalogMessage;
use cinerow_model::{MediaItem, RowId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowSpec {
    pub id: RowId,
    pub title: String,
    pub items: Vec<MediaItem>,
}

impl RowSpec {
    pub fn shared_items(&self) -> Vec<Arc<MediaItem>> {
        self.items.iter().cloned().map(Arc::new).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    pub rows: Vec<RowSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub wait_ms: u64,
    pub message: CatalogMessage,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
    /// Keep firing timers this long after the last step.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

fn default_settle_ms() -> u64 {
    2_000
}

impl CatalogFile {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let catalog: CatalogFile =
            serde_json::from_str(raw).context("parse catalog JSON")?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog {}", path.display()))?;
        Self::parse(&raw)
            .with_context(|| format!("load catalog {}", path.display()))
    }

    fn validate(&self) -> anyhow::Result<()> {
        let mut seen = std::collections::HashSet::new();
        for row in &self.rows {
            if !seen.insert(row.id) {
                bail!("row {} appears twice", row.id);
            }
            if let Some(item) =
                row.items.iter().find(|item| item.title.trim().is_empty())
            {
                bail!("{} in {} has an empty title", item.key(), row.id);
            }
        }
        Ok(())
    }
}

impl Script {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("parse script JSON")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read script {}", path.display()))?;
        Self::parse(&raw)
            .with_context(|| format!("load script {}", path.display()))
    }

    /// Total scripted time, settle period excluded.
    pub fn duration_ms(&self) -> u64 {
        self.steps.iter().map(|step| step.wait_ms).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinerow_core::slider::Direction;

    #[test]
    fn parses_catalog_rows() {
        let catalog = CatalogFile::parse(
            r#"{"rows":[{"id":3,"title":"Top Picks","items":[
                {"id":42,"media_type":"movie","title":"Heat","liked":true},
                {"id":7,"media_type":"tv","title":"Severance"}]}]}"#,
        )
        .unwrap();
        let row = &catalog.rows[0];
        assert_eq!(row.id, RowId(3));
        assert_eq!(row.items[0].key(), "movie-42");
        assert!(row.items[0].flags.liked);
        assert_eq!(row.items[1].key(), "show-7");
    }

    #[test]
    fn rejects_duplicate_rows() {
        let err = CatalogFile::parse(
            r#"{"rows":[{"id":1,"title":"A","items":[]},{"id":1,"title":"B","items":[]}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("appears twice"));
    }

    #[test]
    fn parses_script_with_defaults() {
        let script = Script::parse(
            r#"{"steps":[
                {"message":{"type":"navigate","row":0,"direction":"next"}},
                {"wait_ms":800,"message":{"type":"tick"}}]}"#,
        )
        .unwrap();
        assert_eq!(script.steps[0].wait_ms, 0);
        assert_eq!(script.steps[0].message, CatalogMessage::Navigate {
            row: RowId(0),
            direction: Direction::Next,
        });
        assert_eq!(script.duration_ms(), 800);
        assert_eq!(script.settle_ms, 2_000);
    }
}
