use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::domain::ResultAggregate;

pub const RESULTS_FILE_NAME: &str = "lottery_results.json";

pub fn results_path(output_dir: &Path) -> PathBuf {
    output_dir.join(RESULTS_FILE_NAME)
}

/// Pretty-printed with two-space indentation; non-ascii text is written as
/// utf-8, not escaped.
pub fn render_results(aggregate: &ResultAggregate) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(aggregate)
}

pub async fn save_results(output_dir: &Path, aggregate: &ResultAggregate) -> anyhow::Result<PathBuf> {
    let document = render_results(aggregate).context("Failed to serialize lottery results")?;

    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let path = results_path(output_dir);
    tokio::fs::write(&path, document.as_bytes())
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use crate::domain::DrawRecord;

    use super::*;

    #[test]
    fn empty_sites_render_as_indented_document() {
        let mut aggregate = ResultAggregate::new();
        aggregate.insert("loteka", vec![]);
        aggregate.insert("real", vec![]);

        assert_eq!(
            render_results(&aggregate).unwrap(),
            "{\n  \"loteka\": [],\n  \"real\": []\n}"
        );
    }

    #[test]
    fn non_ascii_is_kept_verbatim() {
        let mut aggregate = ResultAggregate::new();
        aggregate.insert(
            "nacional",
            vec![DrawRecord::new().with_field("game", "Juega+ Pegá+")],
        );

        let document = render_results(&aggregate).unwrap();

        assert!(document.contains("Juega+ Pegá+"));
        assert!(!document.contains("\\u"));
    }

    #[tokio::test]
    async fn saved_document_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut aggregate = ResultAggregate::new();
        aggregate.insert("test", vec![]);

        let path = save_results(dir.path(), &aggregate).await.unwrap();

        assert_eq!(path, dir.path().join(RESULTS_FILE_NAME));
        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, serde_json::json!({"test": []}));
    }

    #[tokio::test]
    async fn unwritable_output_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "file in the way").unwrap();

        let result = save_results(&blocker, &ResultAggregate::new()).await;

        assert!(result.is_err());
    }
}
