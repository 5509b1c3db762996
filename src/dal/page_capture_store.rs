use std::path::{Path, PathBuf};

pub fn capture_path(output_dir: &Path, site_id: &str) -> PathBuf {
    output_dir.join(format!("{}_page.html", site_id))
}

/// Writes the response body exactly as received, replacing any capture left
/// by an earlier run.
pub async fn save_page_capture(
    output_dir: &Path,
    site_id: &str,
    body: &str,
) -> Result<PathBuf, std::io::Error> {
    tokio::fs::create_dir_all(output_dir).await?;
    let path = capture_path(output_dir, site_id);
    tokio::fs::write(&path, body.as_bytes()).await?;
    Ok(path)
}
