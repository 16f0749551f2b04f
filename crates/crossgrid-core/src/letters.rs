//! Letter classification and answer/clue normalization.
//!
//! Untrusted answers arrive with mixed case, accents, spaces and punctuation. The
//! canonical form is uppercase letters only, with diacritics folded away unless the
//! caller asks to keep them.

/// A language-aware letter predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Alphabet {
    /// `A`–`Z` only.
    Latin,
    /// `A`–`Z` plus `Á É Í Ó Ú Ü Ñ`.
    Spanish,
    /// Any alphabetic character.
    #[default]
    Unicode,
}

impl Alphabet {
    /// Picks the alphabet for a language tag such as `"es"` or `"en-US"`.
    #[must_use]
    pub fn for_language(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("es") {
            Alphabet::Spanish
        } else if primary.eq_ignore_ascii_case("en") {
            Alphabet::Latin
        } else {
            Alphabet::Unicode
        }
    }

    /// Returns `true` if `ch` (in either case) is a letter of this alphabet.
    #[must_use]
    pub fn is_letter(self, ch: char) -> bool {
        match self {
            Alphabet::Latin => ch.is_ascii_alphabetic(),
            Alphabet::Spanish => {
                ch.is_ascii_alphabetic()
                    || matches!(upper(ch), 'Á' | 'É' | 'Í' | 'Ó' | 'Ú' | 'Ü' | 'Ñ')
            }
            Alphabet::Unicode => ch.is_alphabetic(),
        }
    }
}

/// Whether normalization folds accented letters to their base letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum DiacriticPolicy {
    /// `Ñ → N`, `é → e`.
    #[default]
    Strip,
    /// Leave accented letters as they are.
    Keep,
}

/// Uppercases a single character, keeping it unchanged when the uppercase form is
/// more than one character (e.g. `ß`).
#[must_use]
pub fn upper(ch: char) -> char {
    let mut it = ch.to_uppercase();
    match (it.next(), it.next()) {
        (Some(up), None) => up,
        _ => ch,
    }
}

/// Folds an accented Latin letter to its base letter, preserving case.
///
/// Covers Latin-1 Supplement and Latin Extended-A. Other characters are returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use crossgrid_core::letters::fold_diacritics;
///
/// assert_eq!(fold_diacritics('Ñ'), 'N');
/// assert_eq!(fold_diacritics('é'), 'e');
/// assert_eq!(fold_diacritics('ß'), 'ß');
/// ```
#[must_use]
pub fn fold_diacritics(ch: char) -> char {
    if ch.is_ascii() {
        return ch;
    }
    let up = upper(ch);
    let folded = fold_upper(up);
    if folded == up {
        ch
    } else if ch.is_lowercase() {
        folded.to_ascii_lowercase()
    } else {
        folded
    }
}

fn fold_upper(ch: char) -> char {
    match ch {
        'À'..='Å' | 'Ā' | 'Ă' | 'Ą' => 'A',
        'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => 'C',
        'Ď' | 'Đ' => 'D',
        'È'..='Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => 'E',
        'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => 'G',
        'Ĥ' | 'Ħ' => 'H',
        'Ì'..='Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => 'I',
        'Ĵ' => 'J',
        'Ķ' => 'K',
        'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' => 'L',
        'Ñ' | 'Ń' | 'Ņ' | 'Ň' => 'N',
        'Ò'..='Ö' | 'Ø' | 'Ō' | 'Ŏ' | 'Ő' => 'O',
        'Ŕ' | 'Ŗ' | 'Ř' => 'R',
        'Ś' | 'Ŝ' | 'Ş' | 'Š' => 'S',
        'Ţ' | 'Ť' | 'Ŧ' => 'T',
        'Ù'..='Ü' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => 'U',
        'Ŵ' => 'W',
        'Ý' | 'Ÿ' | 'Ŷ' => 'Y',
        'Ź' | 'Ż' | 'Ž' => 'Z',
        _ => ch,
    }
}

/// Returns the canonical cell letter for one typed or stored character.
///
/// `None` if `ch` is not a letter of `alphabet` (checked before folding, so `Ñ` is
/// accepted by [`Alphabet::Spanish`] and rejected by [`Alphabet::Latin`]).
#[must_use]
pub fn canonical_letter(ch: char, alphabet: Alphabet, policy: DiacriticPolicy) -> Option<char> {
    if !alphabet.is_letter(ch) {
        return None;
    }
    let ch = match policy {
        DiacriticPolicy::Strip => fold_diacritics(ch),
        DiacriticPolicy::Keep => ch,
    };
    Some(upper(ch))
}

/// Normalizes a raw answer: folds diacritics (per `policy`), drops every non-letter,
/// uppercases.
///
/// # Examples
///
/// ```
/// use crossgrid_core::letters::{DiacriticPolicy, normalize_answer};
///
/// assert_eq!(normalize_answer("Año nuevo!", DiacriticPolicy::Strip), "ANONUEVO");
/// assert_eq!(normalize_answer("Año", DiacriticPolicy::Keep), "AÑO");
/// ```
#[must_use]
pub fn normalize_answer(raw: &str, policy: DiacriticPolicy) -> String {
    raw.chars()
        .map(|ch| match policy {
            DiacriticPolicy::Strip => fold_diacritics(ch),
            DiacriticPolicy::Keep => ch,
        })
        .filter(|ch| ch.is_alphabetic())
        .map(upper)
        .collect()
}

/// Trims a clue and strips a leading advisory number such as `"12. "` or `"3) "`.
///
/// The prefix is kept if nothing would remain after it.
#[must_use]
pub fn clean_clue(raw: &str) -> String {
    let trimmed = raw.trim();
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    if (1..=3).contains(&digits) {
        let rest = &trimmed[digits..];
        if let Some(rest) = rest.strip_prefix(['.', ')']) {
            let rest = rest.trim_start();
            if !rest.is_empty() {
                return rest.to_owned();
            }
        }
    }
    trimmed.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_for_language() {
        assert_eq!(Alphabet::for_language("es"), Alphabet::Spanish);
        assert_eq!(Alphabet::for_language("es-AR"), Alphabet::Spanish);
        assert_eq!(Alphabet::for_language("EN"), Alphabet::Latin);
        assert_eq!(Alphabet::for_language("fi"), Alphabet::Unicode);
        assert_eq!(Alphabet::for_language(""), Alphabet::Unicode);
    }

    #[test]
    fn test_alphabet_letters() {
        assert!(Alphabet::Latin.is_letter('q'));
        assert!(!Alphabet::Latin.is_letter('ñ'));
        assert!(Alphabet::Spanish.is_letter('ñ'));
        assert!(Alphabet::Spanish.is_letter('Ü'));
        assert!(!Alphabet::Spanish.is_letter('ø'));
        assert!(Alphabet::Unicode.is_letter('ø'));
        assert!(!Alphabet::Unicode.is_letter('3'));
    }

    #[test]
    fn test_fold_diacritics_preserves_case() {
        assert_eq!(fold_diacritics('á'), 'a');
        assert_eq!(fold_diacritics('Ü'), 'U');
        assert_eq!(fold_diacritics('ç'), 'c');
        assert_eq!(fold_diacritics('ł'), 'l');
        assert_eq!(fold_diacritics('Ж'), 'Ж');
    }

    #[test]
    fn test_canonical_letter() {
        assert_eq!(
            canonical_letter('é', Alphabet::Spanish, DiacriticPolicy::Strip),
            Some('E')
        );
        assert_eq!(
            canonical_letter('ñ', Alphabet::Spanish, DiacriticPolicy::Keep),
            Some('Ñ')
        );
        assert_eq!(
            canonical_letter('ñ', Alphabet::Latin, DiacriticPolicy::Strip),
            None
        );
        assert_eq!(
            canonical_letter('-', Alphabet::Unicode, DiacriticPolicy::Strip),
            None
        );
    }

    #[test]
    fn test_normalize_answer() {
        assert_eq!(normalize_answer("  Río de la Plata ", DiacriticPolicy::Strip), "RIODELAPLATA");
        assert_eq!(normalize_answer("pingüino", DiacriticPolicy::Strip), "PINGUINO");
        assert_eq!(normalize_answer("T-REX 2", DiacriticPolicy::Strip), "TREX");
        assert_eq!(normalize_answer("123", DiacriticPolicy::Strip), "");
    }

    #[test]
    fn test_clean_clue() {
        assert_eq!(clean_clue("1. País de América del Sur."), "País de América del Sur.");
        assert_eq!(clean_clue(" 12) Capital "), "Capital");
        assert_eq!(clean_clue("1984 novel"), "1984 novel");
        assert_eq!(clean_clue("7."), "7.");
        assert_eq!(clean_clue("  plain  "), "plain");
    }
}
