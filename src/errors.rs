use std::path::PathBuf;
use thiserror::Error;

/// Why a playlist record was dropped by the entry parser.
///
/// These never leave the parser as errors; they are reported alongside the
/// entries that did parse so callers can log or count them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MalformedEntry {
    /// Line does not start with the `#EXTINF:` marker
    #[error("line is not an #EXTINF metadata line")]
    NotMetadata,

    /// Title carries no leading HH:MM token
    #[error("title has no HH:MM time token")]
    MissingTime,

    /// HH:MM token is present but out of range (e.g. 25:70)
    #[error("time token is not a valid wall-clock time")]
    InvalidTime,

    /// Metadata line is the last line of the playlist
    #[error("metadata line has no following stream line")]
    MissingStreamLine,

    /// Following line does not use the stream scheme
    #[error("following line is not a stream URI")]
    NotStreamLine,

    /// Stream URI has nothing after the scheme prefix
    #[error("stream URI carries an empty id")]
    EmptyStreamId,
}

/// Failures that stop a catalog run
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Playlist bytes are neither UTF-8 nor Windows-1252
    #[error("playlist is not decodable: byte 0x{byte:02X} at offset {offset} is undefined in Windows-1252")]
    Encoding { offset: usize, byte: u8 },

    /// Remote playlist could not be retrieved
    #[error("failed to fetch {source_url}: {message}")]
    Fetch { source_url: String, message: String },

    /// Local file access failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON file could not be read or written
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration is unusable
    #[error("configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        CatalogError::Json {
            path: path.into(),
            source,
        }
    }

    /// Get detailed diagnostic information about the error
    pub fn diagnostics(&self) -> String {
        match self {
            CatalogError::Encoding { offset, byte } => {
                format!(
                    "Encoding Error\nOffset: {}\nByte: 0x{:02X}\nSuggestion: Re-export the playlist as UTF-8",
                    offset, byte
                )
            }
            CatalogError::Fetch {
                source_url,
                message,
            } => {
                format!(
                    "Fetch Failed\nSource: {}\nError: {}\nSuggestion: Check the playlist URL or pass a local file with --playlist",
                    source_url, message
                )
            }
            CatalogError::Io { path, source } => {
                format!(
                    "I/O Error\nPath: {}\nError: {}\nSuggestion: Check that the path exists and is readable",
                    path.display(),
                    source
                )
            }
            CatalogError::Json { path, source } => {
                format!(
                    "JSON Error\nPath: {}\nError: {}\nSuggestion: Validate the file with a JSON linter",
                    path.display(),
                    source
                )
            }
            CatalogError::Config(message) => {
                format!(
                    "Configuration Error\nMessage: {}\nSuggestion: Fix or remove the config file",
                    message
                )
            }
        }
    }
}
