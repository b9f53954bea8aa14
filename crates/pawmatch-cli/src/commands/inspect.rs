use anyhow::{Context, Result};
use pawmatch_core::codec;

use super::view;

/// Prints what a pasted code contains.
pub fn run(token: &str) -> Result<()> {
    let value = codec::decode_value(token).map_err(|e| anyhow::anyhow!(e.user_message()))?;

    if let Ok(session) = codec::decode_session(token) {
        view::info(&format!(
            "Código de partida: {} nombres para {}",
            session.names.len(),
            session.species.label()
        ));
    } else if let Ok(votes) = codec::decode_votes(token) {
        view::info(&format!("Código de votos: {} me gusta", votes.likes.len()));
    } else {
        view::error("El código no es de partida ni de votos.");
    }

    let pretty = serde_json::to_string_pretty(&value).context("Failed to format decoded code")?;
    println!("{pretty}");
    Ok(())
}
