//! The candidate-to-crossword pipeline: resolve the header, reconstruct, validate.

use crossgrid_core::{Crossword, Meta, ValidationError, letters::Alphabet, validate};
use serde_json::Value;

use crate::{BuildPolicy, Candidate, Reconstruction, Report, reconstruct};

/// Why a candidate could not become a crossword.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum BuildError {
    /// No entry could be derived from the surviving candidates.
    #[display("no usable entries after reconstruction")]
    Degenerate,
    /// Too few candidates survived filtering.
    #[display("only {found} candidate entries survived, at least {required} required")]
    TooFewCandidates {
        /// Surviving candidates.
        found: usize,
        /// Required by policy.
        required: usize,
    },
    /// The reconstructed crossword failed validation.
    #[display("reconstructed crossword is invalid: {_0}")]
    #[from]
    Invalid(ValidationError),
}

/// A built crossword together with the reconstruction report.
#[derive(Debug, Clone, PartialEq)]
pub struct Build {
    /// The validated crossword.
    pub crossword: Crossword,
    /// What happened to the candidates.
    pub report: Report,
}

/// Resolves the target size: declared size, else grid rows, else the policy default,
/// clamped into the policy's size range.
#[must_use]
pub fn resolve_size(candidate: &Candidate, policy: &BuildPolicy) -> usize {
    candidate
        .size
        .or_else(|| candidate.grid_rows())
        .map_or_else(|| policy.fallback_size(), |size| policy.validation_policy().clamp_size(size))
}

/// Resolves the title: candidate title, else `"Crossword: <theme>"`, else the policy
/// default.
#[must_use]
pub fn resolve_title(candidate: &Candidate, policy: &BuildPolicy) -> String {
    match (&candidate.title, &candidate.theme) {
        (Some(title), _) => title.clone(),
        (None, Some(theme)) => format!("Crossword: {theme}"),
        (None, None) => policy.fallback_title().to_owned(),
    }
}

/// Builds a validated crossword from an untrusted candidate.
///
/// # Errors
///
/// Returns [`BuildError`] when reconstruction is degenerate, too few candidates
/// survive, or the result fails validation.
pub fn build_crossword(
    candidate: &Candidate,
    policy: &BuildPolicy,
) -> Result<Crossword, BuildError> {
    build_with_report(candidate, policy).map(|build| build.crossword)
}

/// Like [`build_crossword`], also returning the reconstruction report.
///
/// The crossword's `meta` is the candidate's meta object, plus a `needs_review` list
/// of `"<number>-<direction>"` keys when placeholder clues were used.
///
/// # Errors
///
/// See [`build_crossword`].
///
/// # Examples
///
/// ```
/// use crossgrid_builder::{BuildPolicy, Candidate, build_with_report};
/// use crossgrid_core::ValidationPolicy;
///
/// let candidate = Candidate::from_json_str(r#"{
///     "theme": "mate",
///     "language": "es",
///     "entries": [
///         {"number": 1, "row": 0, "col": 0, "direction": "across", "answer": "MATE", "clue": "Infusión"},
///         {"number": 1, "row": 0, "col": 0, "direction": "down", "answer": "MATE", "clue": "Bebida"},
///         {"number": 9, "row": 7, "col": 7, "direction": "across", "answer": "ABCDE", "clue": "Fuera"}
///     ]
/// }"#).unwrap();
/// let policy = BuildPolicy::default().validation(ValidationPolicy::default().min_entries(2));
///
/// let build = build_with_report(&candidate, &policy).unwrap();
/// assert_eq!(build.crossword.title(), "Crossword: mate");
/// assert_eq!(build.crossword.entries().len(), 2);
/// assert_eq!(build.report.total_dropped(), 1);
/// ```
pub fn build_with_report(candidate: &Candidate, policy: &BuildPolicy) -> Result<Build, BuildError> {
    let size = resolve_size(candidate, policy);
    let title = resolve_title(candidate, policy);
    let language = candidate
        .language
        .clone()
        .unwrap_or_else(|| policy.fallback_language().to_owned());

    let Reconstruction {
        grid,
        entries,
        report,
    } = reconstruct(&candidate.entries, size, Alphabet::for_language(&language), policy);
    log::info!(
        "reconstructed {size}x{size} grid: {} entries from {} candidates \
         ({} dropped, {} conflicts)",
        entries.len(),
        report.accepted,
        report.total_dropped(),
        report.conflicts
    );

    if entries.is_empty() {
        return Err(BuildError::Degenerate);
    }
    if report.accepted < policy.required_candidates() {
        return Err(BuildError::TooFewCandidates {
            found: report.accepted,
            required: policy.required_candidates(),
        });
    }

    let mut meta = candidate.meta.clone().unwrap_or_default();
    if !report.needs_review.is_empty() {
        let keys = report
            .needs_review
            .iter()
            .map(|key| Value::String(key.to_string()))
            .collect();
        meta.insert("needs_review".to_owned(), Value::Array(keys));
    }

    let crossword = Crossword::new(title, language, grid, entries);
    let crossword = if meta.is_empty() {
        crossword
    } else {
        crossword.with_meta(meta)
    };
    validate(&crossword, policy.validation_policy())?;
    Ok(Build { crossword, report })
}

/// Reads the `needs_review` keys back out of a crossword's meta.
#[must_use]
pub fn needs_review(meta: Option<&Meta>) -> Vec<String> {
    meta.and_then(|meta| meta.get("needs_review"))
        .and_then(Value::as_array)
        .map(|keys| keys.iter().filter_map(Value::as_str).map(str::to_owned).collect())
        .unwrap_or_default()
}
