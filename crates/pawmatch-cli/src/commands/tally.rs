use anyhow::{Context, Result};
use pawmatch_application::MatchSummary;
use pawmatch_core::{codec, matching};

use super::view;

/// Computes matches without an interactive session.
pub fn run(session: &str, mine: Option<&str>, votes: &[String]) -> Result<()> {
    let session = codec::decode_session(session)
        .context("Invalid session code")?;

    let local = match mine {
        Some(token) => {
            codec::decode_votes(token)
                .context("Invalid vote code in --mine")?
                .likes
        }
        None => Vec::new(),
    };

    let imported = votes
        .iter()
        .enumerate()
        .map(|(i, token)| {
            codec::decode_votes(token)
                .map(|payload| payload.likes)
                .with_context(|| format!("Invalid vote code #{}", i + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    let summaries: Vec<MatchSummary> = matching::find_matches(&session.names, &local, &imported)
        .into_iter()
        .map(|m| MatchSummary {
            candidate: m.candidate.clone(),
            votes: m.votes,
        })
        .collect();

    view::title();
    println!(
        "{} {} ({} nombres)",
        session.species.emoji(),
        session.species.label(),
        session.names.len()
    );
    view::matches(&summaries, imported.len());
    Ok(())
}
