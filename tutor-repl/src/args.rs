use std::fmt::{self, Display, Formatter};

pub const USAGE: &str = "usage: math-tutor [--complex] [--answer | --hints] [FILE]";

/// Which parts of the explanation to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Show {
    /// The steps with their hints, then the solutions.
    #[default]
    Both,

    /// Only the solutions.
    Answer,

    /// Only the steps with their hints.
    Hints,
}

/// Command line arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// Hide solutions with a nonzero imaginary part. Turned off with `--complex`.
    pub real_only: bool,

    pub show: Show,

    /// The file to read the system from. Read from stdin or interactively if not given.
    pub file: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self { real_only: true, show: Show::Both, file: None }
    }
}

/// An argument that was not understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    UnknownFlag(String),
    ConflictingFlags,
    ExtraFile(String),
}

impl Display for ArgsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFlag(flag) => write!(f, "unknown flag `{}`", flag),
            Self::ConflictingFlags => write!(f, "`--answer` and `--hints` can't be used together"),
            Self::ExtraFile(file) => write!(f, "unexpected argument `{}`", file),
        }
    }
}

impl Args {
    /// Parses the arguments, excluding the program name.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        for arg in args {
            match arg.as_str() {
                "--complex" => parsed.real_only = false,
                "--answer" | "--hints" => {
                    let show = if arg == "--answer" { Show::Answer } else { Show::Hints };
                    if parsed.show != Show::Both && parsed.show != show {
                        return Err(ArgsError::ConflictingFlags);
                    }
                    parsed.show = show;
                },
                flag if flag.starts_with("--") => return Err(ArgsError::UnknownFlag(arg)),
                _ if parsed.file.is_some() => return Err(ArgsError::ExtraFile(arg)),
                _ => parsed.file = Some(arg),
            }
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn defaults() {
        assert_eq!(parse(&[]), Ok(Args::default()));
    }

    #[test]
    fn flags_and_file() {
        assert_eq!(parse(&["--complex", "--hints", "system.txt"]), Ok(Args {
            real_only: false,
            show: Show::Hints,
            file: Some("system.txt".to_string()),
        }));
    }

    #[test]
    fn bad_arguments() {
        assert_eq!(parse(&["--answer", "--hints"]), Err(ArgsError::ConflictingFlags));
        assert_eq!(parse(&["--real"]), Err(ArgsError::UnknownFlag("--real".to_string())));
        assert_eq!(parse(&["a.txt", "b.txt"]), Err(ArgsError::ExtraFile("b.txt".to_string())));
    }
}
