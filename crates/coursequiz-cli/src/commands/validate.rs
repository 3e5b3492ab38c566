//! The `coursequiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use coursequiz_core::parser::validate_quiz;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let quiz = super::load_quiz(&quiz_path)?;
    println!("Quiz: {} questions", quiz.len());

    let warnings = validate_quiz(&quiz);
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Quiz is valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
