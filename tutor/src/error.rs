use std::fmt::{self, Display, Formatter};
use tutor_error::Error;

/// Errors that stop the tutor from explaining a system of equations.
#[derive(Debug)]
pub enum TutorError {
    /// One side of an equation is not a valid expression.
    Parse {
        /// The line the equation is on, starting from 1.
        line: usize,

        /// The text that was parsed. The spans of `error` point into it.
        source_text: String,

        /// The error reported by the parser.
        error: Error,
    },

    /// The algebra engine failed while simplifying, factoring, or solving.
    Algebra(Error),
}

impl Display for TutorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { line, source_text, error } => {
                write!(f, "could not parse `{}` on line {}: {}", source_text.trim(), line, error)
            },
            Self::Algebra(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for TutorError {}

impl From<Error> for TutorError {
    fn from(error: Error) -> Self {
        Self::Algebra(error)
    }
}

#[cfg(test)]
mod tests {
    use super::super::equation::Equation;

    #[test]
    fn parse_error_names_line_and_text() {
        let err = Equation::parse(2, "2*x = (3").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("could not parse `(3` on line 2: "));
    }
}
