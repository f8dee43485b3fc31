//! Playlist text in, two match catalogs out. No I/O happens here.

use crate::channels::ChannelResolver;
use crate::competition::CompetitionFilter;
use crate::logos::{LeagueTable, LogoFile, LogoIndex, LogoResolver};
use crate::matches::{Catalogs, MatchAggregator, Resolvers};
use crate::normalize::AliasTable;
use crate::parser::{scan_playlist, PlaylistFormat};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Everything the pipeline looks up, built once per run
#[derive(Debug, Clone, Default)]
pub struct Lookups {
    pub logos: LogoResolver,
    pub channels: ChannelResolver,
    pub filter: CompetitionFilter,
    pub format: PlaylistFormat,
}

impl Lookups {
    /// Built-in alias, league and denylist tables over the given listing
    pub fn builtin(logo_files: &[LogoFile], channel_names: HashMap<String, String>) -> Self {
        Self {
            logos: LogoResolver::new(
                LogoIndex::new(logo_files),
                AliasTable::builtin(),
                LeagueTable::builtin(),
            ),
            channels: ChannelResolver::new(channel_names),
            filter: CompetitionFilter::builtin(),
            format: PlaylistFormat::default(),
        }
    }

    fn resolvers(&self) -> Resolvers<'_> {
        Resolvers {
            logos: &self.logos,
            channels: &self.channels,
            filter: &self.filter,
            format: &self.format,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub entries_parsed: usize,
    pub entries_skipped: usize,
    pub primary_matches: usize,
    pub secondary_matches: usize,
    pub total_links: usize,
    pub logos_from_index: usize,
    pub logos_fallback: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogRun {
    pub catalogs: Catalogs,
    pub stats: CatalogStats,
}

/// Parse, aggregate and partition one playlist.
pub fn build_catalogs(playlist: &str, lookups: &Lookups, date: NaiveDate) -> CatalogRun {
    let scan = scan_playlist(playlist, &lookups.format);

    let mut aggregator =
        MatchAggregator::new(lookups.resolvers(), date.format("%Y-%m-%d").to_string());
    aggregator.extend(&scan.entries);
    let (catalogs, fold) = aggregator.finish();

    let stats = CatalogStats {
        entries_parsed: scan.entries.len(),
        entries_skipped: scan.skipped.len(),
        primary_matches: catalogs.primary.len(),
        secondary_matches: catalogs.secondary.len(),
        total_links: catalogs.total_links(),
        logos_from_index: fold.logos_from_index,
        logos_fallback: fold.logos_fallback,
    };

    tracing::info!(
        parsed = stats.entries_parsed,
        skipped = stats.entries_skipped,
        primary = stats.primary_matches,
        secondary = stats.secondary_matches,
        links = stats.total_links,
        "catalogs built"
    );
    tracing::info!(
        from_index = stats.logos_from_index,
        fallback = stats.logos_fallback,
        "team logos resolved"
    );

    CatalogRun { catalogs, stats }
}
