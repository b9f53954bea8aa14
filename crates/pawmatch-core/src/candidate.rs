//! Candidate names and the species they are generated for.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::error::PawError;

/// The kind of pet being named.
///
/// Serialized by its English variant name (`"Dog"`), which is also the form
/// embedded in session tokens.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Species {
    #[default]
    Dog,
    Cat,
    Hamster,
    Bird,
    Rabbit,
    Reptile,
    Other,
}

impl Species {
    /// Spanish label shown on the species picker.
    pub fn label(&self) -> &'static str {
        match self {
            Species::Dog => "Perro",
            Species::Cat => "Gato",
            Species::Hamster => "Hámster",
            Species::Bird => "Pájaro",
            Species::Rabbit => "Conejo",
            Species::Reptile => "Reptil",
            Species::Other => "Otro",
        }
    }

    /// Spanish noun used inside the generation prompt.
    pub fn prompt_noun(&self) -> &'static str {
        match self {
            Species::Dog => "perro",
            Species::Cat => "gato",
            Species::Hamster => "hámster",
            Species::Bird => "pájaro",
            Species::Rabbit => "conejo",
            Species::Reptile => "reptil",
            Species::Other => "mascota",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Species::Dog => "🐶",
            Species::Cat => "🐱",
            Species::Hamster => "🐹",
            Species::Bird => "🐦",
            Species::Rabbit => "🐰",
            Species::Reptile => "🦎",
            Species::Other => "🐾",
        }
    }
}

impl FromStr for Species {
    type Err = PawError;

    /// Accepts the English name or the Spanish label, ignoring case and accents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = fold(s.trim());
        Species::iter()
            .find(|species| {
                fold(&species.to_string()) == wanted
                    || fold(species.label()) == wanted
                    || fold(species.prompt_noun()) == wanted
            })
            .ok_or_else(|| PawError::config(format!("Unknown species: '{}'", s.trim())))
    }
}

fn fold(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            other => other,
        })
        .collect()
}

/// A single name option presented for a like/dislike decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCandidate {
    /// Unique within one generated batch; the join key for vote matching.
    pub id: String,
    pub name: String,
    pub meaning: String,
    pub tags: Vec<String>,
}

/// An entry as returned by the name generator, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedName {
    pub name: String,
    pub meaning: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl GeneratedName {
    pub fn new(name: impl Into<String>, meaning: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            name: name.into(),
            meaning: meaning.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn into_candidate(self, id: String) -> NameCandidate {
        NameCandidate {
            id,
            name: self.name,
            meaning: self.meaning,
            tags: self.tags,
        }
    }
}
