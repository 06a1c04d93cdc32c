use crate::hosts::Record;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Exactly one record matched; the select box can be skipped.
    Auto(String),
    /// Candidates to offer in the select box, in load order.
    Ambiguous(Vec<Record>),
}

/// Narrows `records` by a case-insensitive substring of name or host.
///
/// A single match resolves directly. No match falls back to the full list so
/// the user can keep searching in the select box.
pub fn resolve(query: &str, records: &[Record]) -> MatchOutcome {
    if query.is_empty() {
        return MatchOutcome::Ambiguous(records.to_vec());
    }

    let needle = query.to_lowercase();
    let matches: Vec<&Record> = records.iter().filter(|r| r.matches_query(&needle)).collect();

    match matches.as_slice() {
        [only] => MatchOutcome::Auto(only.host().to_string()),
        [] => MatchOutcome::Ambiguous(records.to_vec()),
        _ => MatchOutcome::Ambiguous(matches.into_iter().cloned().collect()),
    }
}
