/// Competitions routed to the secondary catalog by default
pub const DEFAULT_EXCLUDED_COMPETITIONS: &[&str] = &[
    "Liga Fem",
    "1RFEF",
    "Segunda",
    "ACB",
    "EHF Europeo",
    "Liga Nacional Juvenil",
    "Liga Guerreras",
    "2RFEF",
    "Las Carreras",
    "Open Australia WTA",
];

/// Case-insensitive substring denylist over competition names
#[derive(Debug, Clone, Default)]
pub struct CompetitionFilter {
    fragments: Vec<String>,
}

impl CompetitionFilter {
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fragments = fragments
            .into_iter()
            .map(|f| f.as_ref().trim().to_lowercase())
            .filter(|f| !f.is_empty())
            .collect();
        Self { fragments }
    }

    pub fn builtin() -> Self {
        Self::new(DEFAULT_EXCLUDED_COMPETITIONS)
    }

    /// True when any denylisted fragment occurs in `competition`.
    /// An empty competition is never excluded.
    pub fn is_excluded(&self, competition: &str) -> bool {
        let comp = competition.to_lowercase();
        if comp.trim().is_empty() {
            return false;
        }
        self.fragments.iter().any(|f| comp.contains(f.as_str()))
    }
}
