use anyhow::{anyhow, Result};

pub fn validate_webhook_url(value: &str) -> Result<()> {
    let trimmed = value.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(anyhow!("notification webhook url must be http(s): {}", trimmed));
    }
    Ok(())
}

pub fn validate_template_name(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("notification template is empty"));
    }
    if !value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' || ch == '.')
    {
        return Err(anyhow!("invalid notification template '{}'", value));
    }
    Ok(())
}
