//! Arabic-aware text normalization and fuzzy matching.
//!
//! Autocomplete suggestions come back from the server with diacritics and
//! hamza forms that differ from what the user typed. [`normalize`] folds those
//! differences away for comparisons, and [`fuzzy_match`] finds the span of the
//! *original* text that corresponds to a query so it can be highlighted.

use regex::RegexBuilder;

/// Characters that may appear between any two matched letters without
/// breaking a match: harakat, Quranic marks, tatweel and standalone hamza.
const GAP: &str = r"[\x{064B}-\x{065F}\x{0670}\x{06D6}-\x{06ED}\x{0640}\x{0621}]*";

/// Byte span of a match inside the haystack passed to [`fuzzy_match`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub index: usize,
    pub length: usize,
}

impl MatchSpan {
    pub fn end(&self) -> usize {
        self.index + self.length
    }
}

/// A suggestion split around its highlighted span.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Highlighted {
    pub before: String,
    pub matched: String,
    pub after: String,
}

impl Highlighted {
    /// Whole text, nothing emphasised.
    pub fn plain(text: &str) -> Self {
        Self {
            before: text.to_string(),
            ..Self::default()
        }
    }

    pub fn has_match(&self) -> bool {
        !self.matched.is_empty()
    }
}

fn is_diacritic(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{06D6}'..='\u{06ED}' | '\u{0640}')
}

fn fold(c: char) -> Option<char> {
    match c {
        'إ' | 'أ' | 'آ' | 'ٱ' => Some('ا'),
        'ؤ' => Some('و'),
        'ئ' | 'ى' => Some('ي'),
        'ء' => None,
        c if is_diacritic(c) => None,
        c => Some(c),
    }
}

/// Lower-case, strip diacritics and tatweel, fold hamza carriers, drop
/// standalone hamza and collapse whitespace.
pub fn normalize(text: &str) -> String {
    let folded: String = text.to_lowercase().chars().filter_map(fold).collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn char_class(c: char) -> String {
    match c {
        'ا' => "[اأإآٱ]".to_string(),
        'و' => "[وؤ]".to_string(),
        'ي' => "[يئى]".to_string(),
        c => regex::escape(c.encode_utf8(&mut [0; 4])),
    }
}

fn build_pattern(needle: &str) -> String {
    let mut pattern = String::new();
    let mut previous_was_letter = false;
    for c in needle.chars() {
        if c.is_whitespace() {
            pattern.push_str(r"\s+");
            previous_was_letter = false;
            continue;
        }
        if previous_was_letter {
            pattern.push_str(GAP);
        }
        pattern.push_str(&char_class(c));
        previous_was_letter = true;
    }
    pattern
}

/// Locate `needle_raw` inside `haystack`, tolerating diacritics, tatweel and
/// hamza variants. Offsets are bytes into `haystack` and always fall on char
/// boundaries.
pub fn fuzzy_match(haystack: &str, needle_raw: &str) -> Option<MatchSpan> {
    let needle = normalize(needle_raw);
    if needle.is_empty() {
        return None;
    }

    let regex = RegexBuilder::new(&build_pattern(&needle))
        .case_insensitive(true)
        .build()
        .ok()?;

    regex.find(haystack).map(|m| MatchSpan {
        index: m.start(),
        length: m.len(),
    })
}

/// Split `text` around the fuzzy match of `query`. Text without a match is
/// returned whole in `before`.
pub fn highlight(text: &str, query: &str) -> Highlighted {
    match fuzzy_match(text, query) {
        Some(span) => Highlighted {
            before: text[..span.index].to_string(),
            matched: text[span.index..span.end()].to_string(),
            after: text[span.end()..].to_string(),
        },
        None => Highlighted::plain(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hamza_forms_fold_to_bare_alif() {
        assert_eq!(normalize("إسلامبولي"), normalize("اسلامبولي"));
        assert_eq!(normalize("أآٱإ"), "اااا");
        assert_eq!(normalize("مسؤول"), "مسوول");
        assert_eq!(normalize("مسائل"), "مسايل");
        assert_eq!(normalize("مستشفى"), "مستشفي");
    }

    #[test]
    fn strips_diacritics_tatweel_and_standalone_hamza() {
        assert_eq!(normalize("مُحَمَّد"), "محمد");
        assert_eq!(normalize("كتــاب"), "كتاب");
        assert_eq!(normalize("سماء"), "سما");
    }

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(normalize("  Solar   ENERGY\t\nReport "), "solar energy report");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn fuzzy_match_covers_hamza_variant() {
        let haystack = "إعلام";
        let span = fuzzy_match(haystack, "اعلام").expect("match");
        assert_eq!(span.index, 0);
        assert_eq!(span.length, haystack.len());
    }

    #[test]
    fn fuzzy_match_spans_diacritics_in_haystack() {
        let haystack = "اسم مُحَمَّد الكامل";
        let span = fuzzy_match(haystack, "محمد").expect("match");
        assert_eq!(&haystack[span.index..span.end()], "مُحَمَّد");
    }

    #[test]
    fn fuzzy_match_is_case_insensitive_on_original_text() {
        let span = fuzzy_match("Global Solar Atlas", "solar atlas").expect("match");
        assert_eq!(span, MatchSpan { index: 7, length: 11 });
    }

    #[test]
    fn fuzzy_match_treats_regex_metacharacters_literally() {
        assert_eq!(fuzzy_match("c++ guide", "c++").map(|s| s.index), Some(0));
        assert!(fuzzy_match("anything", "(").is_none());
    }

    #[test]
    fn fuzzy_match_none_for_empty_or_missing() {
        assert!(fuzzy_match("solar", "").is_none());
        assert!(fuzzy_match("solar", "  ").is_none());
        assert!(fuzzy_match("solar", "wind").is_none());
    }

    #[test]
    fn highlight_splits_around_match() {
        let parts = highlight("renewable solar energy", "Solar");
        assert_eq!(parts.before, "renewable ");
        assert_eq!(parts.matched, "solar");
        assert_eq!(parts.after, " energy");

        let plain = highlight("wind farms", "solar");
        assert!(!plain.has_match());
        assert_eq!(plain.before, "wind farms");
    }
}
