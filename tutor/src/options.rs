use tutor_compute::numerical::fmt::{FormatOptions, FormatOptionsBuilder, Scientific};
use tutor_compute::symbolic::solve::SolveBudget;

/// Options controlling how a system is solved and displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct TutorOptions {
    /// If true, solutions with a nonzero imaginary part are hidden behind the placeholder.
    ///
    /// The default is `false`.
    pub real_only: bool,

    /// The number of significant digits numbers are displayed with.
    ///
    /// The default is `4`.
    pub significant_digits: usize,

    /// The token displayed for a variable without a value.
    ///
    /// The default is `__`.
    pub placeholder: String,

    /// The limits the solver works within.
    pub budget: SolveBudget,
}

impl Default for TutorOptions {
    fn default() -> Self {
        Self {
            real_only: false,
            significant_digits: 4,
            placeholder: "__".to_string(),
            budget: SolveBudget::default(),
        }
    }
}

impl TutorOptions {
    /// Wraps the given [`TutorOptions`] into a builder for further customization.
    pub fn into_builder(self) -> TutorOptionsBuilder {
        TutorOptionsBuilder(self)
    }

    /// Returns the options used to format numbers in solutions.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptionsBuilder::new()
            .precision(Some(self.significant_digits))
            .scientific(Scientific::E)
            .build()
    }
}

/// Helper struct to build a [`TutorOptions`] struct.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TutorOptionsBuilder(TutorOptions);

impl TutorOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether only real solutions are shown. See [`TutorOptions::real_only`].
    pub fn real_only(mut self, real_only: bool) -> Self {
        self.0.real_only = real_only;
        self
    }

    /// Sets the number of significant digits. See [`TutorOptions::significant_digits`].
    pub fn significant_digits(mut self, digits: usize) -> Self {
        self.0.significant_digits = digits;
        self
    }

    /// Sets the placeholder token. See [`TutorOptions::placeholder`].
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.0.placeholder = placeholder.into();
        self
    }

    /// Sets the solver limits.
    pub fn budget(mut self, budget: SolveBudget) -> Self {
        self.0.budget = budget;
        self
    }

    /// Builds the [`TutorOptions`] struct.
    pub fn build(self) -> TutorOptions {
        self.0
    }
}
