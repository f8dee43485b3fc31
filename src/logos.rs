//! Team logo lookup.
//!
//! [`LogoIndex`] is built once from the logo listing and never mutated.
//! [`LogoResolver`] walks a fixed sequence of stages and stops at the first
//! hit; when every stage misses it hands back the caller's fallback URL.

use crate::normalize::{normalize, normalize_text, AliasTable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Words too common to identify a team on their own
const GENERIC_WORDS: &[&str] = &["madrid", "united", "city", "real", "club", "liga"];

/// Keyword stage ignores tokens this short or shorter
const MIN_KEYWORD_LEN: usize = 3;

/// Competition fragment -> logo league folder. First matching fragment wins.
pub const DEFAULT_LEAGUE_FOLDERS: &[(&str, &str)] = &[
    ("primera", "Spain - LaLiga"),
    ("laliga", "Spain - LaLiga"),
    ("la liga", "Spain - LaLiga"),
    ("liga portugal", "Portugal - Liga Portugal"),
    ("primeira liga", "Portugal - Liga Portugal"),
    ("premier liga", "Russia - Premier Liga"),
    ("chance liga", "Czech Republic - Chance Liga"),
    ("superliga", "Denmark - Superliga"),
    ("liga", "Spain - LaLiga"),
    ("segunda", "Spain - LaLiga"),
    ("premier league", "England - Premier League"),
    ("premier", "England - Premier League"),
    ("epl", "England - Premier League"),
    ("ligue 1", "France - Ligue 1"),
    ("ligue1", "France - Ligue 1"),
    ("serie a", "Italy - Serie A"),
    ("seriea", "Italy - Serie A"),
    ("calcio", "Italy - Serie A"),
    ("bundesliga", "Germany - Bundesliga"),
    ("eredivisie", "Netherlands - Eredivisie"),
    ("jupiler", "Belgium - Jupiler Pro League"),
    ("super lig", "Türkiye - Süper Lig"),
    ("süper lig", "Türkiye - Süper Lig"),
    ("scottish", "Scotland - Scottish Premiership"),
    ("super league", "Greece - Super League 1"),
    ("upl", "Ukraine - Premier Liga"),
    ("austria", "Austria - Bundesliga"),
    ("swiss", "Switzerland - Super League"),
    ("ekstraklasa", "Poland - PKO BP Ekstraklasa"),
    ("allsvenskan", "Sweden - Allsvenskan"),
    ("eliteserien", "Norway - Eliteserien"),
    ("hnl", "Croatia - SuperSport HNL"),
    ("serbia", "Serbia - Super liga Srbije"),
    ("efbet", "Bulgaria - efbet Liga"),
    ("ligat", "Israel - Ligat ha'Al"),
];

/// One logo file from the external listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoFile {
    /// League folder name, e.g. "Spain - LaLiga"
    pub league: String,
    /// Filename without extension; treated as the team display name
    pub team: String,
    pub url: String,
}

#[derive(Debug, Clone)]
struct LogoEntry {
    key: String,
    league: String,
    url: String,
}

/// Normalized team name -> logo URL, in listing order.
///
/// Duplicate keys keep the first listing entry.
#[derive(Debug, Clone, Default)]
pub struct LogoIndex {
    entries: Vec<LogoEntry>,
    by_key: HashMap<String, usize>,
}

impl LogoIndex {
    pub fn new(files: &[LogoFile]) -> Self {
        let mut index = Self::default();
        for file in files {
            let key = normalize_text(&file.team);
            if key.is_empty() || index.by_key.contains_key(&key) {
                continue;
            }
            index.by_key.insert(key.clone(), index.entries.len());
            index.entries.push(LogoEntry {
                key,
                league: file.league.clone(),
                url: file.url.clone(),
            });
        }
        index
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.by_key
            .get(key)
            .map(|&idx| self.entries[idx].url.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of `league` first, then the rest, each group in listing order
    fn candidates<'a>(&'a self, league: Option<&'a str>) -> impl Iterator<Item = &'a LogoEntry> + 'a {
        let preferred = self
            .entries
            .iter()
            .filter(move |e| league.is_some_and(|l| e.league == l));
        let rest = self
            .entries
            .iter()
            .filter(move |e| !league.is_some_and(|l| e.league == l));
        preferred.chain(rest)
    }
}

/// Competition name fragment -> logo league folder
#[derive(Debug, Clone, Default)]
pub struct LeagueTable {
    folders: Vec<(String, String)>,
}

impl LeagueTable {
    pub fn builtin() -> Self {
        Self::from_pairs(DEFAULT_LEAGUE_FOLDERS.iter().copied())
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = Self::default();
        for (fragment, folder) in pairs {
            table.push(fragment, folder);
        }
        table
    }

    /// Add a mapping ahead of the existing ones so overrides take precedence.
    pub fn prepend(&mut self, fragment: &str, folder: &str) {
        let fragment = fragment.trim().to_lowercase();
        if !fragment.is_empty() {
            self.folders.insert(0, (fragment, folder.to_string()));
        }
    }

    fn push(&mut self, fragment: &str, folder: &str) {
        let fragment = fragment.trim().to_lowercase();
        if !fragment.is_empty() {
            self.folders.push((fragment, folder.to_string()));
        }
    }

    /// League folder for a competition string, if any fragment matches
    pub fn folder_for(&self, competition: &str) -> Option<&str> {
        let comp = competition.trim().to_lowercase();
        if comp.is_empty() {
            return None;
        }
        self.folders
            .iter()
            .find(|(fragment, _)| comp.contains(fragment.as_str()))
            .map(|(_, folder)| folder.as_str())
    }
}

/// Which stage produced a logo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoSource {
    Alias,
    Exact,
    Substring,
    Keyword,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoMatch {
    pub url: String,
    pub source: LogoSource,
}

impl LogoMatch {
    fn found(url: &str, source: LogoSource) -> Self {
        Self {
            url: url.to_string(),
            source,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == LogoSource::Fallback
    }
}

/// Read-only logo lookup over an index, alias table and league table
#[derive(Debug, Clone, Default)]
pub struct LogoResolver {
    index: LogoIndex,
    aliases: AliasTable,
    leagues: LeagueTable,
}

impl LogoResolver {
    pub fn new(index: LogoIndex, aliases: AliasTable, leagues: LeagueTable) -> Self {
        Self {
            index,
            aliases,
            leagues,
        }
    }

    pub fn index(&self) -> &LogoIndex {
        &self.index
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Logo URL for `team`, or `fallback` when nothing matches
    pub fn resolve(&self, team: &str, competition_hint: &str, fallback: &str) -> String {
        self.resolve_detailed(team, competition_hint, fallback).url
    }

    pub fn resolve_detailed(&self, team: &str, competition_hint: &str, fallback: &str) -> LogoMatch {
        let generic = normalize_text(team);
        if generic.is_empty() {
            return LogoMatch::found(fallback, LogoSource::Fallback);
        }

        // 1. alias target present in the index
        if let Some(canonical) = self.aliases.lookup(team) {
            if let Some(url) = self.index.get(&normalize_text(canonical)) {
                tracing::trace!(team, canonical, "logo via alias");
                return LogoMatch::found(url, LogoSource::Alias);
            }
        }

        // 2. exact folded name
        if let Some(url) = self.index.get(&generic) {
            tracing::trace!(team, "logo via exact key");
            return LogoMatch::found(url, LogoSource::Exact);
        }

        let name = normalize(team, &self.aliases);
        let league = self.leagues.folder_for(competition_hint);

        // 3. either side contains the other
        if let Some(entry) = self
            .index
            .candidates(league)
            .find(|e| e.key.contains(name.as_str()) || name.contains(e.key.as_str()))
        {
            tracing::trace!(team, key = %entry.key, "logo via substring");
            return LogoMatch::found(&entry.url, LogoSource::Substring);
        }

        // 4. significant words only
        for word in significant_words(&name) {
            if let Some(entry) = self.index.candidates(league).find(|e| e.key.contains(word)) {
                tracing::trace!(team, word, key = %entry.key, "logo via keyword");
                return LogoMatch::found(&entry.url, LogoSource::Keyword);
            }
        }

        LogoMatch::found(fallback, LogoSource::Fallback)
    }
}

/// Tokens long and specific enough to identify a team
fn significant_words(name: &str) -> impl Iterator<Item = &str> {
    name.split(|c: char| c.is_whitespace() || c == '-')
        .filter(|w| w.chars().count() > MIN_KEYWORD_LEN)
        .filter(|w| !GENERIC_WORDS.contains(w))
}
