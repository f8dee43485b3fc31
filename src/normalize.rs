//! Team-name canonicalization.
//!
//! Two tiers: a hand-curated alias table consulted first, then a generic
//! fold (strip diacritics, lowercase, trim, collapse inner whitespace).
//! Both produce keys comparable against [`crate::logos::LogoIndex`] keys.

use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Built-in aliases: common or abbreviated spelling -> canonical team name.
/// Canonical names match the logo filenames they are meant to hit.
pub const DEFAULT_TEAM_ALIASES: &[(&str, &str)] = &[
    // Spain - LaLiga
    ("barcelona", "FC Barcelona"),
    ("barça", "FC Barcelona"),
    ("barca", "FC Barcelona"),
    ("real madrid", "Real Madrid"),
    ("madrid", "Real Madrid"),
    ("celta", "Celta de Vigo"),
    ("atletico", "Atlético de Madrid"),
    ("atletico madrid", "Atlético de Madrid"),
    ("atlético", "Atlético de Madrid"),
    ("athletic", "Athletic Bilbao"),
    ("athletic bilbao", "Athletic Bilbao"),
    ("athletic club", "Athletic Bilbao"),
    ("betis", "Real Betis Balompié"),
    ("real betis", "Real Betis Balompié"),
    ("sevilla", "Sevilla FC"),
    ("valencia", "Valencia CF"),
    ("villarreal", "Villarreal CF"),
    ("getafe", "Getafe CF"),
    ("osasuna", "CA Osasuna"),
    ("mallorca", "RCD Mallorca"),
    ("girona", "Girona FC"),
    ("alaves", "Deportivo Alavés"),
    ("alavés", "Deportivo Alavés"),
    ("espanyol", "RCD Espanyol Barcelona"),
    ("real sociedad", "Real Sociedad"),
    ("sociedad", "Real Sociedad"),
    ("real oviedo", "Real Oviedo"),
    ("rayo", "Rayo Vallecano"),
    ("rayo vallecano", "Rayo Vallecano"),
    ("levante", "Levante UD"),
    ("elche", "Elche CF"),
    // England - Premier League
    ("arsenal", "Arsenal FC"),
    ("manchester utd", "Manchester United"),
    ("manchester utd.", "Manchester United"),
    ("man utd", "Manchester United"),
    ("man united", "Manchester United"),
    ("manchester united", "Manchester United"),
    ("liverpool", "Liverpool FC"),
    ("chelsea", "Chelsea FC"),
    ("man city", "Manchester City"),
    ("manchester city", "Manchester City"),
    ("tottenham", "Tottenham Hotspur"),
    ("spurs", "Tottenham Hotspur"),
    ("west ham", "West Ham United"),
    ("newcastle", "Newcastle United"),
    ("everton", "Everton FC"),
    ("aston villa", "Aston Villa"),
    ("brighton", "Brighton & Hove Albion"),
    ("crystal palace", "Crystal Palace"),
    ("brentford", "Brentford FC"),
    ("fulham", "Fulham FC"),
    ("wolves", "Wolverhampton Wanderers"),
    ("wolverhampton", "Wolverhampton Wanderers"),
    ("bournemouth", "AFC Bournemouth"),
    ("nottingham", "Nottingham Forest"),
    ("nottingham forest", "Nottingham Forest"),
    ("leeds", "Leeds United"),
    ("burnley", "Burnley FC"),
    ("sunderland", "Sunderland AFC"),
    // France - Ligue 1
    ("psg", "Paris Saint-Germain"),
    ("paris", "Paris Saint-Germain"),
    ("paris saint-germain", "Paris Saint-Germain"),
    ("marseille", "Olympique Marseille"),
    ("om", "Olympique Marseille"),
    ("lyon", "Olympique Lyon"),
    ("ol", "Olympique Lyon"),
    ("monaco", "AS Monaco"),
    ("lille", "LOSC Lille"),
    ("lens", "RC Lens"),
    ("rennes", "Stade Rennais FC"),
    ("nice", "OGC Nice"),
    ("nantes", "FC Nantes"),
    ("strasbourg", "RC Strasbourg Alsace"),
    ("brest", "Stade Brestois 29"),
    ("toulouse", "FC Toulouse"),
    ("lorient", "FC Lorient"),
    ("auxerre", "AJ Auxerre"),
    ("angers", "Angers SCO"),
    ("metz", "FC Metz"),
    ("le havre", "Le Havre AC"),
    // Italy - Serie A
    ("milan", "AC Milan"),
    ("ac milan", "AC Milan"),
    ("inter", "Inter Milan"),
    ("inter milan", "Inter Milan"),
    ("internazionale", "Inter Milan"),
    ("juventus", "Juventus FC"),
    ("juve", "Juventus FC"),
    ("roma", "AS Roma"),
    ("lazio", "SS Lazio"),
    ("napoli", "SSC Napoli"),
    ("atalanta", "Atalanta BC"),
    ("fiorentina", "ACF Fiorentina"),
    ("bologna", "Bologna FC 1909"),
    ("torino", "Torino FC"),
    ("udinese", "Udinese Calcio"),
    ("sassuolo", "US Sassuolo"),
    ("lecce", "US Lecce"),
    ("verona", "Hellas Verona"),
    ("cagliari", "Cagliari Calcio"),
    ("genoa", "Genoa CFC"),
    ("parma", "Parma Calcio 1913"),
    ("como", "Como 1907"),
    ("cremonese", "US Cremonese"),
    // Germany - Bundesliga
    ("bayern", "Bayern Munich"),
    ("bayern munich", "Bayern Munich"),
    ("bayern münchen", "Bayern Munich"),
    ("dortmund", "Borussia Dortmund"),
    ("borussia dortmund", "Borussia Dortmund"),
    ("bvb", "Borussia Dortmund"),
    ("leipzig", "RB Leipzig"),
    ("rb leipzig", "RB Leipzig"),
    ("leverkusen", "Bayer 04 Leverkusen"),
    ("bayer leverkusen", "Bayer 04 Leverkusen"),
    ("frankfurt", "Eintracht Frankfurt"),
    ("eintracht frankfurt", "Eintracht Frankfurt"),
    ("union berlin", "1.FC Union Berlin"),
    ("freiburg", "SC Freiburg"),
    ("wolfsburg", "VfL Wolfsburg"),
    ("stuttgart", "VfB Stuttgart"),
    ("gladbach", "Borussia Mönchengladbach"),
    ("mönchengladbach", "Borussia Mönchengladbach"),
    ("monchengladbach", "Borussia Mönchengladbach"),
    ("koln", "1.FC Köln"),
    ("köln", "1.FC Köln"),
    ("cologne", "1.FC Köln"),
    ("mainz", "1.FSV Mainz 05"),
    ("hoffenheim", "TSG 1899 Hoffenheim"),
    ("bremen", "SV Werder Bremen"),
    ("werder", "SV Werder Bremen"),
    ("werder bremen", "SV Werder Bremen"),
    ("augsburg", "FC Augsburg"),
    ("heidenheim", "1.FC Heidenheim 1846"),
    ("st. pauli", "FC St. Pauli"),
    ("st pauli", "FC St. Pauli"),
    // Portugal - Liga Portugal
    ("porto", "FC Porto"),
    ("fc porto", "FC Porto"),
    ("benfica", "SL Benfica"),
    ("sporting", "Sporting CP"),
    ("sporting lisbon", "Sporting CP"),
    ("sporting cp", "Sporting CP"),
    ("braga", "SC Braga"),
    ("guimaraes", "Vitória Guimarães SC"),
    ("vitoria guimaraes", "Vitória Guimarães SC"),
    ("famalicao", "FC Famalicão"),
    ("gil vicente", "Gil Vicente FC"),
    ("arouca", "FC Arouca"),
    ("estoril", "GD Estoril Praia"),
    ("casa pia", "Casa Pia AC"),
    ("estrela", "CF Estrela Amadora"),
    ("santa clara", "CD Santa Clara"),
    ("nacional", "CD Nacional"),
    ("rio ave", "Rio Ave FC"),
    ("moreirense", "Moreirense FC"),
    ("tondela", "CD Tondela"),
    ("alverca", "FC Alverca"),
];

/// Fold a string to its generic comparison form.
///
/// Decomposes (NFD), drops combining marks, lowercases, trims and collapses
/// runs of whitespace to a single space. Total and idempotent.
pub fn normalize_text(raw: &str) -> String {
    let folded: String = raw
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lookup key for alias matching: lowercased and trimmed, accents kept.
fn alias_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Alternate spelling -> canonical team name.
///
/// Every alias is reachable both by its lowercased spelling and by its
/// folded form, so "Bayern München" and "bayern munchen" hit the same entry.
/// Lowercased spellings take precedence over folded ones on collision.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    exact: HashMap<String, String>,
    folded: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table populated with [`DEFAULT_TEAM_ALIASES`]
    pub fn builtin() -> Self {
        Self::from_pairs(DEFAULT_TEAM_ALIASES.iter().copied())
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = Self::new();
        for (alias, canonical) in pairs {
            table.insert(alias, canonical);
        }
        table
    }

    /// Add or replace an alias. Later inserts of the same spelling win.
    pub fn insert(&mut self, alias: &str, canonical: &str) {
        let key = alias_key(alias);
        if key.is_empty() {
            return;
        }
        self.folded.insert(normalize_text(&key), canonical.to_string());
        self.exact.insert(key, canonical.to_string());
    }

    /// Canonical name for `raw`, if it is a known alias
    pub fn lookup(&self, raw: &str) -> Option<&str> {
        let key = alias_key(raw);
        if let Some(canonical) = self.exact.get(&key) {
            return Some(canonical.as_str());
        }
        self.folded.get(&normalize_text(&key)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}

/// Canonical comparison key for a team name.
///
/// Alias first (on the lowercased raw spelling), then the generic fold.
pub fn normalize(raw: &str, aliases: &AliasTable) -> String {
    match aliases.lookup(raw) {
        Some(canonical) => normalize_text(canonical),
        None => normalize_text(raw),
    }
}
