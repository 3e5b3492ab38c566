//! The `coursequiz init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    let example_path = Path::new("quiz.json");
    if example_path.exists() {
        println!("quiz.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quiz.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: coursequiz validate --quiz quiz.json");
    println!("  2. Run: coursequiz take --quiz quiz.json");

    Ok(())
}

const EXAMPLE_QUIZ: &str = r#"{
  "questions": [
    {
      "id": "capital",
      "questionType": "multipleChoice",
      "question": "What is the capital of France?",
      "options": ["Berlin", "Madrid", "Paris", "Rome"],
      "correctAnswer": 2
    },
    {
      "id": "sun",
      "questionType": "trueFalse",
      "question": "The Sun is a star.",
      "options": ["True", "False"],
      "correctAnswer": 0
    },
    {
      "id": "primes",
      "questionType": "multiSelect",
      "question": "Which of these numbers are prime?",
      "options": ["2", "4", "5", "9"],
      "correctAnswers": [0, 2]
    },
    {
      "id": "countries",
      "questionType": "matching",
      "question": "Match each country to its capital.",
      "pairs": [
        { "left": "Japan", "right": "Tokyo" },
        { "left": "Kenya", "right": "Nairobi" },
        { "left": "Peru", "right": "Lima" }
      ]
    },
    {
      "id": "photosynthesis",
      "questionType": "fillInBlank",
      "question": "Plants turn light into chemical energy through ____.",
      "correctText": "photosynthesis",
      "caseSensitive": false
    },
    {
      "id": "planets",
      "questionType": "ordering",
      "question": "Order these planets by distance from the Sun.",
      "correctOrder": ["Mercury", "Venus", "Earth", "Mars"]
    }
  ]
}
"#;
