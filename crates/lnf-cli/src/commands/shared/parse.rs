use std::path::Path;

use chrono::NaiveDate;
use lnf_engine::ImageUpload;
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

pub fn parse_optional_enum<T>(raw: Option<&str>, field: &str) -> anyhow::Result<Option<T>>
where
    T: DeserializeOwned,
{
    raw.map(|value| parse_enum(value, field)).transpose()
}

pub fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|error| anyhow::anyhow!("invalid date '{raw}' (expected YYYY-MM-DD): {error}"))
}

/// Read an image file from disk into an upload.
pub async fn read_image(path: &str) -> anyhow::Result<ImageUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|error| anyhow::anyhow!("failed to read image '{path}': {error}"))?;
    let filename = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
        .to_string();
    Ok(ImageUpload { bytes, filename })
}
