//! Build configuration.

use crossgrid_core::{PLACEHOLDER_CLUE, ValidationPolicy};

/// Which letter survives when two candidates disagree on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum ConflictPolicy {
    /// The later-processed candidate overwrites the cell.
    #[default]
    LastWins,
    /// The cell keeps the first letter written to it.
    FirstWins,
}

/// Policy constants for reconstruction and the build pipeline.
///
/// # Examples
///
/// ```
/// use crossgrid_builder::{BuildPolicy, ConflictPolicy};
/// use crossgrid_core::ValidationPolicy;
///
/// let policy = BuildPolicy::default()
///     .min_answer_len(3)
///     .conflict_policy(ConflictPolicy::FirstWins)
///     .validation(ValidationPolicy::default().min_entries(6));
/// assert_eq!(policy.answer_len(), 3);
/// assert_eq!(policy.validation_policy().effective_min_answer_len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPolicy {
    validation: ValidationPolicy,
    min_answer_len: usize,
    conflict: ConflictPolicy,
    min_candidates: usize,
    dedupe_keys: bool,
    default_size: usize,
    default_title: String,
    default_language: String,
    placeholder_clue: String,
}

impl Default for BuildPolicy {
    fn default() -> Self {
        Self {
            validation: ValidationPolicy::default(),
            min_answer_len: 2,
            conflict: ConflictPolicy::LastWins,
            min_candidates: 1,
            dedupe_keys: true,
            default_size: 9,
            default_title: "Crossword".to_owned(),
            default_language: "en".to_owned(),
            placeholder_clue: PLACEHOLDER_CLUE.to_owned(),
        }
    }
}

impl BuildPolicy {
    /// Sets the validation thresholds. The answer length of `validation` is replaced
    /// by this policy's.
    #[must_use]
    pub fn validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation.min_answer_len(self.min_answer_len);
        self
    }

    /// Sets the minimum normalized answer length, for both reconstruction and
    /// validation. Values below 2 behave as 2.
    #[must_use]
    pub fn min_answer_len(mut self, len: usize) -> Self {
        self.min_answer_len = len.max(2);
        self.validation = self.validation.min_answer_len(self.min_answer_len);
        self
    }

    /// Sets the conflict policy.
    #[must_use]
    pub fn conflict_policy(mut self, conflict: ConflictPolicy) -> Self {
        self.conflict = conflict;
        self
    }

    /// Sets how many candidates must survive filtering.
    #[must_use]
    pub fn min_candidates(mut self, count: usize) -> Self {
        self.min_candidates = count;
        self
    }

    /// Sets whether later candidates repeating an advisory `(number, direction)` are
    /// dropped.
    #[must_use]
    pub fn dedupe_keys(mut self, dedupe: bool) -> Self {
        self.dedupe_keys = dedupe;
        self
    }

    /// Sets the size used when the candidate declares none.
    #[must_use]
    pub fn default_size(mut self, size: usize) -> Self {
        self.default_size = size;
        self
    }

    /// Sets the title used when the candidate has neither title nor theme.
    #[must_use]
    pub fn default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// Sets the language used when the candidate declares none.
    #[must_use]
    pub fn default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Sets the clue attached to entries no candidate clue matches.
    #[must_use]
    pub fn placeholder_clue(mut self, clue: impl Into<String>) -> Self {
        self.placeholder_clue = clue.into();
        self
    }

    /// Validation thresholds.
    #[must_use]
    pub fn validation_policy(&self) -> &ValidationPolicy {
        &self.validation
    }

    /// Minimum normalized answer length.
    #[must_use]
    pub fn answer_len(&self) -> usize {
        self.min_answer_len
    }

    /// Conflict policy.
    #[must_use]
    pub fn conflict(&self) -> ConflictPolicy {
        self.conflict
    }

    /// Required surviving candidates.
    #[must_use]
    pub fn required_candidates(&self) -> usize {
        self.min_candidates
    }

    /// Whether duplicate advisory keys are dropped.
    #[must_use]
    pub fn dedupes_keys(&self) -> bool {
        self.dedupe_keys
    }

    /// Fallback size, clamped into the validation range.
    #[must_use]
    pub fn fallback_size(&self) -> usize {
        self.validation.clamp_size(self.default_size)
    }

    /// Fallback title.
    #[must_use]
    pub fn fallback_title(&self) -> &str {
        &self.default_title
    }

    /// Fallback language.
    #[must_use]
    pub fn fallback_language(&self) -> &str {
        &self.default_language
    }

    /// Placeholder clue text.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder_clue
    }
}
