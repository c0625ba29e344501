mod args;
mod error;

use args::{Args, Show, USAGE};
use log::debug;
use rustyline::{error::ReadlineError, DefaultEditor};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::{fs, io::{self, IsTerminal, Read}, process::ExitCode};
use tutor::{explain_with_error, options::TutorOptions, Explanation, TutorOptionsBuilder};

/// The environment variable that sets the log level.
const LOG_ENV: &str = "MATH_TUTOR_LOG";

/// Installs the logger on stderr, at the level given by [`LOG_ENV`] or `warn`.
fn init_logger() {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

/// Renders the explanation, leaving out the parts the user did not ask for.
fn render(explanation: &Explanation, show: Show) -> String {
    let mut sections = Vec::new();
    if show != Show::Answer {
        let steps = explanation.steps.iter()
            .map(|step| {
                if step.hint.is_empty() {
                    step.description.clone()
                } else {
                    format!("{}\nHint: {}", step.description, step.hint)
                }
            })
            .collect::<Vec<_>>();
        sections.push(steps.join("\n\n"));
    }
    if show != Show::Hints {
        sections.push(explanation.solution_display.clone());
    }
    sections.join("\n\n")
}

/// Explains the given system and prints the result. A parse error additionally gets a report on
/// stderr pointing at the text that could not be parsed.
fn run(input: &str, options: &TutorOptions, show: Show) {
    let (explanation, err) = explain_with_error(input, options);
    if let Some(err) = err {
        error::report_to_stderr(&err);
    }
    println!("{}", render(&explanation, show));
}

/// Reads equations one line at a time. A blank line ends the system and solves it.
fn interactive(options: &TutorOptions, show: Show) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;
    let mut system = String::new();

    loop {
        let prompt = if system.is_empty() { "> " } else { ". " };
        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(err) => return Err(err),
        };

        if line.trim().is_empty() {
            if !system.is_empty() {
                debug!("solving system:\n{}", system);
                run(&system, options, show);
                system.clear();
            }
            continue;
        }

        rl.add_history_entry(&line)?;
        system.push_str(&line);
        system.push('\n');
    }

    if !system.is_empty() {
        run(&system, options, show);
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logger();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}\n{}", err, USAGE);
            return ExitCode::from(2);
        },
    };
    let options = TutorOptionsBuilder::new().real_only(args.real_only).build();

    if let Some(filename) = &args.file {
        // solve the system in the file
        match fs::read_to_string(filename) {
            Ok(input) => run(&input, &options, args.show),
            Err(err) => {
                eprintln!("could not read `{}`: {}", filename, err);
                return ExitCode::FAILURE;
            },
        }
    } else if !io::stdin().is_terminal() {
        // read the system from stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("could not read stdin: {}", err);
            return ExitCode::FAILURE;
        }
        run(&input, &options, args.show);
    } else if let Err(err) = interactive(&options, args.show) {
        eprintln!("{}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tutor::Step;
    use super::*;

    fn explanation() -> Explanation {
        Explanation {
            steps: vec![
                Step { description: "Factored: 2*x - 8 → 2*(x - 4) = 0".to_string(), hint: "factor".to_string() },
                Step { description: "Error: oops".to_string(), hint: String::new() },
            ],
            solution_display: "Solution 1:\nx = 4.000".to_string(),
        }
    }

    #[test]
    fn render_both() {
        assert_eq!(
            render(&explanation(), Show::Both),
            "Factored: 2*x - 8 → 2*(x - 4) = 0\nHint: factor\n\nError: oops\n\nSolution 1:\nx = 4.000",
        );
    }

    #[test]
    fn render_parts() {
        assert_eq!(render(&explanation(), Show::Answer), "Solution 1:\nx = 4.000");
        assert!(!render(&explanation(), Show::Hints).contains("Solution"));
    }
}
