use ariadne::Source;
use tutor::error::TutorError;

/// Reports a parse error to stderr, highlighting the text that could not be parsed.
///
/// Other errors are only shown through the error step of the explanation, since they don't
/// point into the input.
///
/// The `ariadne` crate's `Report` type has no `Display` implementation, so this uses its
/// `eprint` method instead.
pub fn report_to_stderr(err: &TutorError) {
    if let TutorError::Parse { line, source_text, error } = err {
        let src_id = format!("line {}", line);
        let report = error.build_report(&src_id);
        if report.eprint((src_id.as_str(), Source::from(source_text))).is_err() {
            eprintln!("{}", err);
        }
    }
}
