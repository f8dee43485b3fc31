//! Thin I/O around the pipeline: fetching and decoding the playlist,
//! listing logo files, loading the channel table, writing catalogs.

use crate::errors::CatalogError;
use crate::logos::LogoFile;
use crate::matches::MatchRecord;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

const LOGO_EXTENSION: &str = "png";

/// Windows-1252 code points for bytes 0x80..=0x9F; `None` marks undefined bytes
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

fn decode_windows_1252(bytes: &[u8]) -> Result<String, CatalogError> {
    let mut out = String::with_capacity(bytes.len());
    for (offset, &byte) in bytes.iter().enumerate() {
        let ch = match byte {
            0x80..=0x9F => CP1252_HIGH[(byte - 0x80) as usize]
                .ok_or(CatalogError::Encoding { offset, byte })?,
            _ => byte as char,
        };
        out.push(ch);
    }
    Ok(out)
}

/// Decode playlist bytes: UTF-8 first, Windows-1252 as the legacy retry.
pub fn decode_playlist(bytes: &[u8]) -> Result<String, CatalogError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(e) => {
            tracing::warn!(
                valid_up_to = e.valid_up_to(),
                "playlist is not UTF-8, retrying as Windows-1252"
            );
            decode_windows_1252(bytes)
        }
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Read the playlist from a URL or a local path and decode it.
pub async fn fetch_playlist(source: &str, timeout: Duration) -> Result<String, CatalogError> {
    let bytes = if is_remote(source) {
        let fetch_err = |e: reqwest::Error| CatalogError::Fetch {
            source_url: source.to_string(),
            message: e.to_string(),
        };
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(fetch_err)?;
        let res = client
            .get(source)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(fetch_err)?;
        res.bytes().await.map_err(fetch_err)?.to_vec()
    } else {
        tokio::fs::read(source)
            .await
            .map_err(|e| CatalogError::io(source, e))?
    };
    tracing::info!(source, bytes = bytes.len(), "playlist loaded");
    decode_playlist(&bytes)
}

/// List `<dir>/<league>/<team>.png` files as logo URLs under `base_url`.
///
/// A missing directory yields an empty listing. Output is sorted by league
/// then team so index order does not depend on the filesystem.
pub fn scan_logo_dir(dir: &Path, base_url: &str) -> Result<Vec<LogoFile>, CatalogError> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "logo directory not found");
        return Ok(Vec::new());
    }

    let base = base_url.trim_end_matches('/');
    let mut files = Vec::new();
    for league in fs::read_dir(dir).map_err(|e| CatalogError::io(dir, e))? {
        let league = league.map_err(|e| CatalogError::io(dir, e))?;
        let league_path = league.path();
        if !league_path.is_dir() {
            continue;
        }
        let league_name = league.file_name().to_string_lossy().into_owned();

        for logo in fs::read_dir(&league_path).map_err(|e| CatalogError::io(&league_path, e))? {
            let logo_path = logo.map_err(|e| CatalogError::io(&league_path, e))?.path();
            if logo_path.extension().and_then(|e| e.to_str()) != Some(LOGO_EXTENSION) {
                continue;
            }
            let (Some(team), Some(file_name)) = (
                logo_path.file_stem().and_then(|s| s.to_str()),
                logo_path.file_name().and_then(|s| s.to_str()),
            ) else {
                continue;
            };
            files.push(LogoFile {
                league: league_name.clone(),
                team: team.to_string(),
                url: format!(
                    "{}/{}/{}",
                    base,
                    urlencoding::encode(&league_name),
                    urlencoding::encode(file_name)
                ),
            });
        }
    }

    files.sort_by(|a, b| a.league.cmp(&b.league).then_with(|| a.team.cmp(&b.team)));
    tracing::info!(count = files.len(), "logos listed");
    Ok(files)
}

/// Load the stream id -> channel name table. Missing or unreadable files
/// give an empty table; every stream then gets a synthesized label.
pub fn load_channel_map(path: &Path) -> HashMap<String, String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "channel map unavailable");
            return HashMap::new();
        }
    };
    match serde_json::from_str::<HashMap<String, String>>(&content) {
        Ok(map) => {
            tracing::info!(count = map.len(), "channel names loaded");
            map
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "channel map is not a JSON object of strings");
            HashMap::new()
        }
    }
}

/// Write records as a pretty JSON array, creating parent directories.
pub fn write_catalog(path: &Path, records: &[MatchRecord]) -> Result<(), CatalogError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| CatalogError::io(dir, e))?;
    }
    let json = serde_json::to_string_pretty(records).map_err(|e| CatalogError::json(path, e))?;
    fs::write(path, json).map_err(|e| CatalogError::io(path, e))?;
    tracing::info!(path = %path.display(), matches = records.len(), "catalog written");
    Ok(())
}
