//! Folding raw playlist entries into one record per match.
//!
//! Entries are keyed on the raw `(time, home_team, away_team)` triple as
//! parsed. Spelling variants of the same fixture ("Real Madrid" vs
//! "R. Madrid") therefore stay separate records. The catalog a record lands
//! in is decided by its first entry's competition and never revisited.

use crate::channels::ChannelResolver;
use crate::competition::CompetitionFilter;
use crate::logos::{LogoResolver, LogoSource};
use crate::parser::{PlaylistFormat, RawEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity of one logical match
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchKey {
    pub time: String,
    pub home_team: String,
    pub away_team: String,
}

impl MatchKey {
    pub fn of(entry: &RawEntry) -> Self {
        Self {
            time: entry.time.clone(),
            home_team: entry.home_team.clone(),
            away_team: entry.away_team.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamLink {
    pub channel_name: String,
    #[serde(rename = "acestream_id")]
    pub stream_id: String,
}

/// One match with every stream that carries it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub time: String,
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub home_logo: String,
    pub away_logo: String,
    pub competition: String,
    pub channels: Vec<String>,
    pub links: Vec<StreamLink>,
    #[serde(rename = "link")]
    pub primary_link: String,
}

/// Which output partition a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub primary: Vec<MatchRecord>,
    pub secondary: Vec<MatchRecord>,
}

impl Catalogs {
    pub fn total_matches(&self) -> usize {
        self.primary.len() + self.secondary.len()
    }

    pub fn total_links(&self) -> usize {
        self.primary
            .iter()
            .chain(self.secondary.iter())
            .map(|m| m.links.len())
            .sum()
    }
}

/// Counters gathered while folding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldStats {
    pub entries: usize,
    pub logos_from_index: usize,
    pub logos_fallback: usize,
}

/// Lookup tables the aggregator consults, all read-only
#[derive(Debug, Clone, Copy)]
pub struct Resolvers<'a> {
    pub logos: &'a LogoResolver,
    pub channels: &'a ChannelResolver,
    pub filter: &'a CompetitionFilter,
    pub format: &'a PlaylistFormat,
}

pub struct MatchAggregator<'a> {
    resolvers: Resolvers<'a>,
    date: String,
    slots: HashMap<MatchKey, (Catalog, usize)>,
    catalogs: Catalogs,
    stats: FoldStats,
}

impl<'a> MatchAggregator<'a> {
    /// `date` is stamped on every record (the run date, not parsed input)
    pub fn new(resolvers: Resolvers<'a>, date: impl Into<String>) -> Self {
        Self {
            resolvers,
            date: date.into(),
            slots: HashMap::new(),
            catalogs: Catalogs::default(),
            stats: FoldStats::default(),
        }
    }

    pub fn push(&mut self, entry: &RawEntry) {
        self.stats.entries += 1;
        let key = MatchKey::of(entry);

        let (catalog, idx) = match self.slots.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.open_record(entry);
                self.slots.insert(key, slot);
                slot
            }
        };

        let channel_name = self.resolvers.channels.resolve(&entry.stream_id);
        let record = match catalog {
            Catalog::Primary => &mut self.catalogs.primary[idx],
            Catalog::Secondary => &mut self.catalogs.secondary[idx],
        };
        record.channels.push(channel_name.clone());
        record.links.push(StreamLink {
            channel_name,
            stream_id: entry.stream_id.clone(),
        });
    }

    pub fn extend<'e, I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = &'e RawEntry>,
    {
        for entry in entries {
            self.push(entry);
        }
    }

    /// Allocate an empty record for a first-seen key and return its slot
    fn open_record(&mut self, entry: &RawEntry) -> (Catalog, usize) {
        let catalog = if self.resolvers.filter.is_excluded(&entry.competition) {
            Catalog::Secondary
        } else {
            Catalog::Primary
        };

        let home_logo = self.logo_for(&entry.home_team, entry);
        let away_logo = self.logo_for(&entry.away_team, entry);

        let record = MatchRecord {
            time: entry.time.clone(),
            date: self.date.clone(),
            home_team: entry.home_team.clone(),
            away_team: entry.away_team.clone(),
            home_logo,
            away_logo,
            competition: entry.competition.clone(),
            channels: Vec::new(),
            links: Vec::new(),
            primary_link: self.resolvers.format.stream_uri(&entry.stream_id),
        };

        let list = match catalog {
            Catalog::Primary => &mut self.catalogs.primary,
            Catalog::Secondary => &mut self.catalogs.secondary,
        };
        list.push(record);
        (catalog, list.len() - 1)
    }

    fn logo_for(&mut self, team: &str, entry: &RawEntry) -> String {
        let found = self
            .resolvers
            .logos
            .resolve_detailed(team, &entry.competition, &entry.default_logo_hint);
        match found.source {
            LogoSource::Fallback => self.stats.logos_fallback += 1,
            _ => self.stats.logos_from_index += 1,
        }
        found.url
    }

    pub fn stats(&self) -> FoldStats {
        self.stats
    }

    /// Both catalogs in first-seen order
    pub fn finish(self) -> (Catalogs, FoldStats) {
        (self.catalogs, self.stats)
    }
}
