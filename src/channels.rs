use std::collections::HashMap;

/// How many leading characters of an unmapped stream id go into its label
const FALLBACK_ID_CHARS: usize = 8;

/// Stream id -> broadcast channel display name
#[derive(Debug, Clone, Default)]
pub struct ChannelResolver {
    names: HashMap<String, String>,
}

impl ChannelResolver {
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    /// Mapped channel name, or `"Stream <first 8 chars of id>"`
    pub fn resolve(&self, stream_id: &str) -> String {
        match self.names.get(stream_id) {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => {
                let short: String = stream_id.chars().take(FALLBACK_ID_CHARS).collect();
                format!("Stream {}", short)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapped_channel() {
        let mut names = HashMap::new();
        names.insert("abc123".to_string(), "M+ LaLiga".to_string());
        let resolver = ChannelResolver::new(names);
        assert_eq!(resolver.resolve("abc123"), "M+ LaLiga");
    }

    #[test]
    fn test_unmapped_channel_label() {
        let resolver = ChannelResolver::default();
        assert_eq!(
            resolver.resolve("0123456789abcdef0123456789abcdef01234567"),
            "Stream 01234567"
        );
        assert_eq!(resolver.resolve("abc"), "Stream abc");
    }

    #[test]
    fn test_blank_mapping_falls_back() {
        let mut names = HashMap::new();
        names.insert("deadbeefcafe".to_string(), "  ".to_string());
        let resolver = ChannelResolver::new(names);
        assert_eq!(resolver.resolve("deadbeefcafe"), "Stream deadbeef");
    }
}
