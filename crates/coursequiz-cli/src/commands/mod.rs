//! Subcommand implementations.

pub mod init;
pub mod take;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use coursequiz_core::model::QuizDefinition;
use coursequiz_core::parser::{decode_element, decode_quiz};

/// Read a quiz file holding either raw quiz content or a whole course element.
pub(crate) fn load_quiz(path: &Path) -> Result<QuizDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz: {}", path.display()))?;

    let is_element = serde_json::from_str::<Value>(&content)
        .ok()
        .is_some_and(|root| root.get("type").is_some() && root.get("questions").is_none());

    let definition = if is_element {
        decode_element(&content).map(|(_, definition)| definition)
    } else {
        decode_quiz(&content)
    };
    definition.with_context(|| format!("failed to decode quiz: {}", path.display()))
}
