//! Vote tallying across the local like-list and imported ones.

use serde::Serialize;
use std::collections::HashMap;

use crate::candidate::NameCandidate;

/// A candidate liked by more than one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match<'a> {
    pub candidate: &'a NameCandidate,
    pub votes: usize,
}

/// Counts every occurrence of each id across all like-lists.
///
/// Duplicates are counted: importing the same vote code twice counts it twice.
pub fn vote_counts<'a>(local: &'a [String], imported: &'a [Vec<String>]) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for id in local.iter().chain(imported.iter().flatten()) {
        *counts.entry(id.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Candidates with more than one vote, most voted first.
///
/// There are no matches until at least one like-list has been imported.
/// Ties keep the order of `candidates`.
pub fn find_matches<'a>(
    candidates: &'a [NameCandidate],
    local: &[String],
    imported: &[Vec<String>],
) -> Vec<Match<'a>> {
    if imported.is_empty() {
        return Vec::new();
    }

    let counts = vote_counts(local, imported);
    let mut matches: Vec<Match<'a>> = candidates
        .iter()
        .filter_map(|candidate| {
            let votes = counts.get(candidate.id.as_str()).copied().unwrap_or(0);
            (votes > 1).then_some(Match { candidate, votes })
        })
        .collect();

    // sort_by is stable
    matches.sort_by(|a, b| b.votes.cmp(&a.votes));
    matches
}
