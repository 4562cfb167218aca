use std::path::Path;

use anyhow::Result;
use tokio::fs;

pub async fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

pub fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_resolve_against_base() {
        let base = Path::new("/etc/events");
        assert_eq!(resolve_path(base, "data.json"), "/etc/events/data.json");
        assert_eq!(resolve_path(base, "/var/data.json"), "/var/data.json");
        assert_eq!(resolve_path(base, "  "), "");
    }
}
