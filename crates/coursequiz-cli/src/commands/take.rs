//! The `coursequiz take` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use coursequiz_core::error::QuizError;
use coursequiz_core::evaluator::Grade;
use coursequiz_core::model::{AnswerState, Question, QuestionKind};
use coursequiz_core::recorder::{Action, Direction, Recorded};
use coursequiz_core::report::Completion;
use coursequiz_core::session::{QuizController, Transition};
use coursequiz_core::shuffle::{DisplayShuffle, RngShuffler};
use coursequiz_core::traits::{RestartReason, SessionObserver, Shuffler};

use crate::config::load_config_from;

/// Console session observer.
struct ConsoleObserver;

impl SessionObserver for ConsoleObserver {
    fn on_question_entered(&self, index: usize, question: &Question) {
        eprintln!("  Entered: #{} {} ({})", index + 1, question.id, question.kind);
    }

    fn on_completed(&self, completion: &Completion) {
        eprintln!(
            "  Done: attempt {} scored {}%",
            completion.attempt_id,
            completion.score()
        );
    }

    fn on_restarted(&self, reason: RestartReason) {
        let label = match reason {
            RestartReason::Retake => "retake",
            RestartReason::Reentry => "reentry",
        };
        eprintln!("  Restarted: {label}");
    }
}

/// A parsed line of learner input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Record(Action),
    /// Match a left item to the right item at a displayed position.
    PairDisplayed { left: usize, position: usize },
    Next,
    Previous,
    Retake,
    Reenter,
    Quit,
}

pub fn execute(
    quiz_path: PathBuf,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let quiz = super::load_quiz(&quiz_path)?;

    let shuffler = match seed.or(config.seed) {
        Some(seed) => RngShuffler::seeded(seed),
        None => RngShuffler::from_entropy(),
    };
    let mut controller =
        QuizController::with_options(quiz, shuffler, config.session, Box::new(ConsoleObserver))
            .context("failed to start quiz session")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut controller, stdin.lock(), &mut stdout.lock(), json)
}

/// Drive a session from line-oriented input until EOF or `quit`.
fn run_session<S: Shuffler, R: BufRead, W: Write>(
    controller: &mut QuizController<S>,
    input: R,
    out: &mut W,
    json: bool,
) -> Result<()> {
    print_question(controller, out)?;

    for line in input.lines() {
        let line = line.context("failed to read command")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "Invalid command: {e}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Record(action) => {
                let result = controller.record(action);
                report_recorded(controller, result, out)?;
            }
            Command::PairDisplayed { left, position } => {
                let result = controller.pair_displayed(left, position);
                report_recorded(controller, result, out)?;
            }
            Command::Next => match controller.next()? {
                Transition::Moved { .. } => print_question(controller, out)?,
                Transition::Completed(completion) => print_completion(&completion, out, json)?,
                Transition::Blocked => writeln!(out, "Answer the question first.")?,
                _ => writeln!(out, "Quiz is complete. Use 'retake' to start over.")?,
            },
            Command::Previous => match controller.previous() {
                Transition::Moved { .. } => print_question(controller, out)?,
                _ => writeln!(out, "Cannot go back from here.")?,
            },
            Command::Retake => match controller.retake() {
                Transition::Restarted => {
                    writeln!(out, "Starting over.")?;
                    print_question(controller, out)?;
                }
                _ => writeln!(out, "Finish the quiz before retaking it.")?,
            },
            Command::Reenter => {
                controller.on_reentry();
                writeln!(out, "Starting over.")?;
                print_question(controller, out)?;
            }
        }
    }

    if !controller.is_completed() {
        writeln!(
            out,
            "\nQuiz not completed: {}/{} answered.",
            controller.answered_count()?,
            controller.len()
        )?;
    }
    Ok(())
}

fn parse_command(line: &str) -> Result<Command> {
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let command = match verb {
        "select" => Command::Record(Action::Select(position(rest)?)),
        "toggle" => Command::Record(Action::Toggle(position(rest)?)),
        "pair" => {
            let mut args = rest.split_whitespace();
            let left = position(args.next().unwrap_or_default())?;
            let right = position(args.next().unwrap_or_default())?;
            Command::PairDisplayed {
                left,
                position: right,
            }
        }
        "reset" => Command::Record(Action::ResetMatching),
        "text" => Command::Record(Action::SetText(rest.to_string())),
        "up" => Command::Record(Action::Move {
            index: position(rest)?,
            direction: Direction::Up,
        }),
        "down" => Command::Record(Action::Move {
            index: position(rest)?,
            direction: Direction::Down,
        }),
        "next" => Command::Next,
        "prev" => Command::Previous,
        "retake" => Command::Retake,
        "reenter" => Command::Reenter,
        "quit" => Command::Quit,
        other => anyhow::bail!("unknown command '{other}'"),
    };
    Ok(command)
}

/// Parse a 1-based position into an index.
fn position(arg: &str) -> Result<usize> {
    let arg = arg.trim();
    let n: usize = arg
        .parse()
        .with_context(|| format!("expected a number, got '{arg}'"))?;
    anyhow::ensure!(n >= 1, "positions start at 1");
    Ok(n - 1)
}

fn report_recorded<S: Shuffler, W: Write>(
    controller: &QuizController<S>,
    result: Result<Recorded, QuizError>,
    out: &mut W,
) -> Result<()> {
    match result {
        Ok(Recorded::Applied) => print_question(controller, out)?,
        Ok(Recorded::Unchanged) => writeln!(out, "Nothing to move.")?,
        Ok(Recorded::Locked) => writeln!(out, "This question is already answered.")?,
        Err(e @ QuizError::InvalidAction { .. }) => writeln!(out, "Invalid action: {e}")?,
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn print_question<S: Shuffler, W: Write>(controller: &QuizController<S>, out: &mut W) -> Result<()> {
    let question = controller.current_question();
    writeln!(
        out,
        "\nQuestion {}/{} [{}]: {}",
        controller.current_index() + 1,
        controller.len(),
        question.kind,
        question.prompt
    )?;

    match (&question.kind, controller.current_answer()) {
        (
            QuestionKind::MultipleChoice { options, .. } | QuestionKind::TrueFalse { options, .. },
            AnswerState::Choice { selected },
        ) => {
            for (i, option) in options.iter().enumerate() {
                let marker = if *selected == Some(i) { "*" } else { " " };
                writeln!(out, "  {marker} {}. {option}", i + 1)?;
            }
        }
        (QuestionKind::MultiSelect { options, .. }, AnswerState::MultiSelect { selected }) => {
            for (i, option) in options.iter().enumerate() {
                let marker = if selected.contains(&i) { "x" } else { " " };
                writeln!(out, "  [{marker}] {}. {option}", i + 1)?;
            }
        }
        (QuestionKind::Matching { pairs }, AnswerState::Matching { pairs: mapping }) => {
            for (i, pair) in pairs.iter().enumerate() {
                let matched = mapping
                    .get(&i)
                    .and_then(|right| pairs.get(*right))
                    .map(|p| p.right.as_str())
                    .unwrap_or("?");
                writeln!(out, "  {}. {} -> {matched}", i + 1, pair.left)?;
            }
            if let Some(DisplayShuffle::Matching(entries)) = controller.current_display() {
                writeln!(out, "  Right column:")?;
                for (position, entry) in entries.iter().enumerate() {
                    writeln!(out, "    {}. {}", position + 1, entry.right)?;
                }
            }
        }
        (QuestionKind::FillInBlank { .. }, AnswerState::FillInBlank { text }) => {
            writeln!(out, "  Answer: {}", text.as_deref().unwrap_or("(none)"))?;
        }
        (QuestionKind::Ordering { .. }, AnswerState::Ordering { order, .. }) => {
            for (i, item) in order.iter().flatten().enumerate() {
                writeln!(out, "  {}. {item}", i + 1)?;
            }
        }
        _ => {}
    }

    match controller.current_feedback()? {
        Some(true) => writeln!(out, "Correct!")?,
        Some(false) => writeln!(out, "Incorrect")?,
        None => {}
    }
    Ok(())
}

fn print_completion<W: Write>(completion: &Completion, out: &mut W, json: bool) -> Result<()> {
    let summary = &completion.summary;
    writeln!(out, "\nQuiz complete!")?;
    writeln!(out, "Score: {}%", summary.score)?;
    writeln!(out, "Correct: {}/{}", summary.correct, summary.total)?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Kind", "Result"]);
    for (i, outcome) in completion.questions.iter().enumerate() {
        let result = match outcome.grade {
            Grade::Correct => "correct",
            Grade::Incorrect => "incorrect",
            Grade::Unanswered => "unanswered",
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&outcome.id),
            Cell::new(&outcome.kind),
            Cell::new(result),
        ]);
    }
    writeln!(out, "{table}")?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(completion)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursequiz_core::mock::ScriptedShuffler;
    use coursequiz_core::parser::decode_quiz;

    const QUIZ: &str = r#"{"questions": [
        {"id": "capital", "questionType": "multipleChoice", "question": "Capital of France?",
         "options": ["Berlin", "Madrid", "Paris", "Rome"], "correctAnswer": 2},
        {"id": "match", "questionType": "matching", "question": "Match",
         "pairs": [{"left": "1", "right": "one"}, {"left": "2", "right": "two"}, {"left": "3", "right": "three"}]}
    ]}"#;

    fn run(input: &str, permutations: Vec<Vec<usize>>) -> String {
        let quiz = decode_quiz(QUIZ).unwrap();
        let mut controller = QuizController::new(quiz, ScriptedShuffler::new(permutations)).unwrap();
        let mut out = Vec::new();
        run_session(&mut controller, input.as_bytes(), &mut out, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_commands() {
        assert_eq!(
            parse_command("select 3").unwrap(),
            Command::Record(Action::Select(2))
        );
        assert_eq!(
            parse_command("pair 1 2").unwrap(),
            Command::PairDisplayed {
                left: 0,
                position: 1
            }
        );
        assert_eq!(
            parse_command("text New York").unwrap(),
            Command::Record(Action::SetText("New York".into()))
        );
        assert_eq!(
            parse_command("text").unwrap(),
            Command::Record(Action::SetText(String::new()))
        );
        assert_eq!(
            parse_command("down 1").unwrap(),
            Command::Record(Action::Move {
                index: 0,
                direction: Direction::Down
            })
        );
        assert_eq!(parse_command("prev").unwrap(), Command::Previous);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(parse_command("select 0").is_err());
        assert!(parse_command("select x").is_err());
        assert!(parse_command("pair 1").is_err());
        assert!(parse_command("jump 2").is_err());
    }

    #[test]
    fn full_run_reaches_completion() {
        // Right column shows originals 2, 0, 1.
        let out = run(
            "select 3\nnext\npair 1 2\npair 2 3\npair 3 1\nnext\n",
            vec![vec![2, 0, 1]],
        );
        assert!(out.contains("Right column:\n    1. three\n    2. one\n    3. two"));
        assert!(out.contains("Correct!"));
        assert!(out.contains("Score: 100%"));
        assert!(out.contains("Correct: 2/2"));
    }

    #[test]
    fn blocked_and_invalid_input_keep_the_session_going() {
        let out = run("next\nselect 9\nbogus\nselect 1\nnext\nquit\n", vec![]);
        assert!(out.contains("Answer the question first."));
        assert!(out.contains("Invalid action:"));
        assert!(out.contains("Invalid command: unknown command 'bogus'"));
        assert!(out.contains("Incorrect"));
        assert!(out.contains("Quiz not completed: 1/2 answered."));
    }

    #[test]
    fn answered_question_is_locked() {
        let out = run("select 1\nselect 3\n", vec![]);
        assert!(out.contains("This question is already answered."));
    }
}
