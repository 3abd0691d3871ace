/// A candidate phone identifier as supplied by the user: trimmed, non-empty.
///
/// No digit or country-code validation happens here; the directory is the
/// source of truth for what counts as a reachable account.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PhoneNumber(pub String);

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a single registration lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Registered,
    NotRegistered,
    /// The lookup itself failed; carries the failure message for the report.
    LookupError(String),
}

/// One directory hit for a queried identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRecord {
    pub jid: String,
    pub number: Option<String>,
}

/// Ordered per-identifier verdicts plus aggregate counters.
///
/// Verdicts keep the input order of the identifier list. Lookup errors count
/// toward neither counter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub verdicts: Vec<(PhoneNumber, Verdict)>,
    pub registered: u32,
    pub not_registered: u32,
}
