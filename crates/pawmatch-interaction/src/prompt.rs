//! Prompt rendering for name generation.

use minijinja::{Environment, context};
use pawmatch_core::{PawError, Result, Species};
use serde_json::{Value, json};

/// Number of names requested per batch.
pub const NAMES_PER_BATCH: usize = 100;

const NAMES_TEMPLATE: &str = r#"Genera una lista de {{ count }} nombres diversos, populares y creativos para un {{ species }}.
IMPORTANTE: Todo el contenido debe estar en ESPAÑOL.
Incluye el nombre, un 'meaning' (significado) corto y encantador o la razón de su popularidad, y 2-3 'tags' (etiquetas) que describan su estilo (ej: {% for tag in example_tags %}"{{ tag }}"{% if not loop.last %}, {% endif %}{% endfor %})."#;

const EXAMPLE_TAGS: [&str; 3] = ["tierno", "rudo", "clásico"];

/// Renders the Spanish generation prompt for `species`.
pub fn render_names_prompt(species: Species) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("names", NAMES_TEMPLATE)
        .map_err(|e| PawError::generation(format!("Invalid prompt template: {e}")))?;

    let template = env
        .get_template("names")
        .map_err(|e| PawError::generation(format!("Missing prompt template: {e}")))?;

    template
        .render(context! {
            count => NAMES_PER_BATCH,
            species => species.prompt_noun(),
            example_tags => EXAMPLE_TAGS,
        })
        .map_err(|e| PawError::generation(format!("Failed to render prompt: {e}")))
}

/// Structured-output schema: `{ names: [{ name, meaning, tags[] }] }`.
pub fn names_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "names": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "meaning": { "type": "STRING", "description": "Significado en español" },
                        "tags": {
                            "type": "ARRAY",
                            "items": { "type": "STRING", "description": "Etiqueta en español" }
                        }
                    },
                    "required": ["name", "meaning", "tags"]
                }
            }
        },
        "required": ["names"]
    })
}
