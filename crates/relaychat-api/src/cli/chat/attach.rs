//! Loading a local file as a pending attachment.

use std::path::{Path, PathBuf};

use relaychat_types::chat::Attachment;

/// MIME type for an image path, judged by extension.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    Some(match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => return None,
    })
}

/// Expand a leading `~/` to the home directory.
fn expand_home(raw: &str) -> PathBuf {
    match (raw.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(raw),
    }
}

/// Read and base64-encode the file at `raw_path`.
pub async fn load_attachment(raw_path: &str) -> anyhow::Result<Attachment> {
    let path = expand_home(raw_path);
    let mime = mime_for_path(&path).ok_or_else(|| {
        anyhow::anyhow!(
            "unsupported file type for {} (expected png, jpg, gif, webp, heic)",
            path.display()
        )
    })?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?;

    Ok(Attachment::from_bytes(&bytes, mime))
}
