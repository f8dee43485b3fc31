//! Playlist entry parsing.
//!
//! Grammar of one entry (two consecutive lines):
//!
//! ```text
//! #EXTINF:-1 tvg-logo="<url>" group-title="<ignored>",<HH:MM> <title>
//! <scheme><stream-id>
//! ```
//!
//! `<title>` is split on the literal `" - "`: first segment is the
//! competition, second the home team, everything after is rejoined as the
//! away team. A title with a single segment is all home team.
//!
//! Nothing here returns an error. A record that does not fit the grammar
//! becomes [`ParseOutcome::Skipped`] and the scan moves on.

use crate::errors::MalformedEntry;
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

pub const EXTINF_PREFIX: &str = "#EXTINF:";
pub const DEFAULT_STREAM_SCHEME: &str = "acestream://";
pub const DEFAULT_LOGO_URL: &str = "https://i.ibb.co/2vhFM7h/soccer-ball-variant.png";

const TITLE_SEPARATOR: &str = " - ";

static LOGO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"tvg-logo="([^"]+)""#).expect("logo pattern is valid"));

// First comma followed by HH:MM starts the title
static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*(\d{2}:\d{2})\s+(.+)$").expect("title pattern is valid"));

/// Settings the parser needs from the outside
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistFormat {
    /// Prefix of the line following each metadata line, e.g. `acestream://`
    pub stream_scheme: String,
    /// Logo used when the metadata line carries no `tvg-logo`
    pub default_logo: String,
}

impl Default for PlaylistFormat {
    fn default() -> Self {
        Self {
            stream_scheme: DEFAULT_STREAM_SCHEME.to_string(),
            default_logo: DEFAULT_LOGO_URL.to_string(),
        }
    }
}

impl PlaylistFormat {
    /// Full URI for a bare stream id
    pub fn stream_uri(&self, stream_id: &str) -> String {
        format!("{}{}", self.stream_scheme, stream_id)
    }
}

/// One playlist record before aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub time: String,
    pub competition: String,
    pub home_team: String,
    pub away_team: String,
    pub stream_id: String,
    /// `tvg-logo` of the record, or the format's default logo
    pub default_logo_hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Parsed(RawEntry),
    Skipped(MalformedEntry),
}

impl ParseOutcome {
    pub fn entry(self) -> Option<RawEntry> {
        match self {
            ParseOutcome::Parsed(entry) => Some(entry),
            ParseOutcome::Skipped(_) => None,
        }
    }
}

/// Title segments after the time token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleParts {
    pub competition: String,
    pub home_team: String,
    pub away_team: String,
}

/// Split a title into competition, home and away.
pub fn split_title(title: &str) -> TitleParts {
    let segments: Vec<&str> = title.split(TITLE_SEPARATOR).collect();
    match segments.as_slice() {
        [] | [_] => TitleParts {
            competition: String::new(),
            home_team: title.trim().to_string(),
            away_team: String::new(),
        },
        [competition, home, rest @ ..] => TitleParts {
            competition: competition.trim().to_string(),
            home_team: home.trim().to_string(),
            away_team: rest.join(TITLE_SEPARATOR).trim().to_string(),
        },
    }
}

/// Parse one metadata line and the line that follows it.
pub fn parse_entry(meta: &str, next: Option<&str>, format: &PlaylistFormat) -> ParseOutcome {
    let meta = meta.trim();
    if !meta.starts_with(EXTINF_PREFIX) {
        return ParseOutcome::Skipped(MalformedEntry::NotMetadata);
    }

    let default_logo_hint = LOGO_RE
        .captures(meta)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| format.default_logo.clone());

    let Some(caps) = TITLE_RE.captures(meta) else {
        return ParseOutcome::Skipped(MalformedEntry::MissingTime);
    };
    let (Some(time), Some(title)) = (caps.get(1), caps.get(2)) else {
        return ParseOutcome::Skipped(MalformedEntry::MissingTime);
    };
    let time = time.as_str();
    if NaiveTime::parse_from_str(time, "%H:%M").is_err() {
        return ParseOutcome::Skipped(MalformedEntry::InvalidTime);
    }

    let Some(next) = next else {
        return ParseOutcome::Skipped(MalformedEntry::MissingStreamLine);
    };
    let Some(stream_id) = next.trim().strip_prefix(format.stream_scheme.as_str()) else {
        return ParseOutcome::Skipped(MalformedEntry::NotStreamLine);
    };
    let stream_id = stream_id.trim();
    if stream_id.is_empty() {
        return ParseOutcome::Skipped(MalformedEntry::EmptyStreamId);
    }

    let parts = split_title(title.as_str());
    ParseOutcome::Parsed(RawEntry {
        time: time.to_string(),
        competition: parts.competition,
        home_team: parts.home_team,
        away_team: parts.away_team,
        stream_id: stream_id.to_string(),
        default_logo_hint,
    })
}

/// A dropped record and where it was
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedEntry {
    /// 1-based line number of the metadata line
    pub line: usize,
    pub reason: MalformedEntry,
}

#[derive(Debug, Clone, Default)]
pub struct PlaylistScan {
    pub entries: Vec<RawEntry>,
    pub skipped: Vec<SkippedEntry>,
}

/// Parse every `#EXTINF` record of a playlist, in input order.
pub fn scan_playlist(text: &str, format: &PlaylistFormat) -> PlaylistScan {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines: Vec<&str> = text.lines().collect();
    let mut scan = PlaylistScan::default();

    for (idx, line) in lines.iter().enumerate() {
        if !line.trim_start().starts_with(EXTINF_PREFIX) {
            continue;
        }
        match parse_entry(line, lines.get(idx + 1).copied(), format) {
            ParseOutcome::Parsed(entry) => scan.entries.push(entry),
            ParseOutcome::Skipped(reason) => {
                tracing::debug!(line = idx + 1, %reason, "skipping playlist entry");
                scan.skipped.push(SkippedEntry {
                    line: idx + 1,
                    reason,
                });
            }
        }
    }

    scan
}

#[cfg(test)]
mod tests {
    use super::*;

    const META: &str = r#"#EXTINF:-1 tvg-logo="https://img.test/liga.png" group-title="Eventos",21:00 LaLiga - Real Madrid - Barcelona"#;

    fn parse(meta: &str, next: Option<&str>) -> ParseOutcome {
        parse_entry(meta, next, &PlaylistFormat::default())
    }

    #[test]
    fn test_parse_full_entry() {
        let entry = parse(META, Some("acestream://abc123")).entry().unwrap();
        assert_eq!(entry.time, "21:00");
        assert_eq!(entry.competition, "LaLiga");
        assert_eq!(entry.home_team, "Real Madrid");
        assert_eq!(entry.away_team, "Barcelona");
        assert_eq!(entry.stream_id, "abc123");
        assert_eq!(entry.default_logo_hint, "https://img.test/liga.png");
    }

    #[test]
    fn test_missing_logo_uses_default() {
        let meta = "#EXTINF:-1 group-title=\"x\",18:30 Serie A - Roma - Lazio";
        let entry = parse(meta, Some("acestream://id")).entry().unwrap();
        assert_eq!(entry.default_logo_hint, DEFAULT_LOGO_URL);

        let meta = "#EXTINF:-1 tvg-logo=\"\",18:30 Serie A - Roma - Lazio";
        let entry = parse(meta, Some("acestream://id")).entry().unwrap();
        assert_eq!(entry.default_logo_hint, DEFAULT_LOGO_URL);
    }

    #[test]
    fn test_away_team_keeps_separator() {
        let parts = split_title("Copa - Home FC - Away - B");
        assert_eq!(parts.competition, "Copa");
        assert_eq!(parts.home_team, "Home FC");
        assert_eq!(parts.away_team, "Away - B");
    }

    #[test]
    fn test_short_titles() {
        let parts = split_title("MotoGP Gran Premio");
        assert_eq!(parts.competition, "");
        assert_eq!(parts.home_team, "MotoGP Gran Premio");
        assert_eq!(parts.away_team, "");

        let parts = split_title("NBA - Lakers");
        assert_eq!(parts.competition, "NBA");
        assert_eq!(parts.home_team, "Lakers");
        assert_eq!(parts.away_team, "");
    }

    #[test]
    fn test_hyphenated_names_not_split() {
        let parts = split_title("Ligue 1 - Paris Saint-Germain - Stade Brestois 29");
        assert_eq!(parts.home_team, "Paris Saint-Germain");
        assert_eq!(parts.away_team, "Stade Brestois 29");
    }

    #[test]
    fn test_skip_reasons() {
        assert_eq!(
            parse("acestream://abc", None),
            ParseOutcome::Skipped(MalformedEntry::NotMetadata)
        );
        assert_eq!(
            parse("#EXTINF:-1,LaLiga - A - B", Some("acestream://x")),
            ParseOutcome::Skipped(MalformedEntry::MissingTime)
        );
        assert_eq!(
            parse("#EXTINF:-1,25:99 LaLiga - A - B", Some("acestream://x")),
            ParseOutcome::Skipped(MalformedEntry::InvalidTime)
        );
        assert_eq!(parse(META, None), ParseOutcome::Skipped(MalformedEntry::MissingStreamLine));
        assert_eq!(
            parse(META, Some("http://example.com/stream")),
            ParseOutcome::Skipped(MalformedEntry::NotStreamLine)
        );
        assert_eq!(
            parse(META, Some("acestream://  ")),
            ParseOutcome::Skipped(MalformedEntry::EmptyStreamId)
        );
    }

    #[test]
    fn test_custom_scheme() {
        let format = PlaylistFormat {
            stream_scheme: "sop://".to_string(),
            ..Default::default()
        };
        let entry = parse_entry(META, Some("sop://broker:3912/1"), &format).entry().unwrap();
        assert_eq!(entry.stream_id, "broker:3912/1");
        assert_eq!(format.stream_uri(&entry.stream_id), "sop://broker:3912/1");
    }

    #[test]
    fn test_scan_drops_dangling_metadata() {
        let text = format!(
            "\u{feff}#EXTM3U\n{}\nacestream://aaa\n{}\n",
            META, META
        );
        let scan = scan_playlist(&text, &PlaylistFormat::default());
        assert_eq!(scan.entries.len(), 1);
        assert_eq!(scan.skipped.len(), 1);
        assert_eq!(scan.skipped[0].line, 4);
        assert_eq!(scan.skipped[0].reason, MalformedEntry::MissingStreamLine);
    }

    #[test]
    fn test_scan_metadata_followed_by_metadata() {
        let text = format!("{}\n{}\nacestream://bbb\n", META, META);
        let scan = scan_playlist(&text, &PlaylistFormat::default());
        assert_eq!(scan.entries.len(), 1);
        assert_eq!(scan.entries[0].stream_id, "bbb");
        assert_eq!(scan.skipped[0].reason, MalformedEntry::NotStreamLine);
    }
}
