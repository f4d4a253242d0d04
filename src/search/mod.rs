//! Search functionality.
//!
//! The page highlights matches; this module tracks what the user typed,
//! whether the search bar is shown, and which match is current.

/// Highlighting stops after this many matches.
pub const MATCH_LIMIT: usize = 25;

/// Characters with a meaning in a JavaScript regular expression.
const PATTERN_SYNTAX: &[char] = &[
    '\\', '^', '$', '.', '*', '+', '?', '(', ')', '[', ']', '{', '}', '|', '/',
];

/// A regular expression source that matches `query` literally.
///
/// The page compiles it case-insensitively and runs it over the original
/// text, so match offsets always point into the text being highlighted.
pub fn literal_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len());
    for c in query.chars() {
        if PATTERN_SYNTAX.contains(&c) {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern
}

/// Position within the highlighted matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCursor {
    current: usize,
    total: usize,
}

impl MatchCursor {
    /// A cursor on the first of `total` matches, or `None` when nothing matched.
    pub fn new(total: usize) -> Option<Self> {
        (total > 0).then(|| Self {
            current: 0,
            total: total.min(MATCH_LIMIT),
        })
    }

    pub const fn current(self) -> usize {
        self.current
    }

    pub const fn total(self) -> usize {
        self.total
    }

    /// Advance to the next match, wrapping to the first.
    pub const fn next(self) -> Self {
        Self {
            current: (self.current + 1) % self.total,
            total: self.total,
        }
    }

    /// Step back to the previous match, wrapping to the last.
    pub const fn previous(self) -> Self {
        Self {
            current: (self.current + self.total - 1) % self.total,
            total: self.total,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchState {
    query: String,
    visible: bool,
    cursor: Option<MatchCursor>,
}

impl SearchState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub const fn cursor(&self) -> Option<MatchCursor> {
        self.cursor
    }

    /// A search is active once the page has reported at least one match.
    pub const fn is_active(&self) -> bool {
        self.cursor.is_some()
    }

    pub const fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the bar and forget the query and matches.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Replace the query; matches from the old query no longer apply.
    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.cursor = None;
    }

    /// Record the match count the page reported for `query`.
    ///
    /// Results for a query the user has since changed are ignored.
    pub fn apply_result(&mut self, query: &str, total: usize) -> bool {
        if query != self.query {
            return false;
        }
        self.cursor = MatchCursor::new(total);
        true
    }

    pub fn next_match(&mut self) -> Option<usize> {
        let cursor = self.cursor?.next();
        self.cursor = Some(cursor);
        Some(cursor.current())
    }

    pub fn previous_match(&mut self) -> Option<usize> {
        let cursor = self.cursor?.previous();
        self.cursor = Some(cursor);
        Some(cursor.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_matches_means_no_cursor() {
        assert!(MatchCursor::new(0).is_none());
    }

    #[test]
    fn test_cursor_total_is_capped() {
        let cursor = MatchCursor::new(400).unwrap();
        assert_eq!(cursor.total(), MATCH_LIMIT);
    }

    #[test]
    fn test_next_wraps_to_first() {
        let cursor = MatchCursor::new(3).unwrap().next().next().next();
        assert_eq!(cursor.current(), 0);
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let cursor = MatchCursor::new(3).unwrap().previous();
        assert_eq!(cursor.current(), 2);
    }

    #[test]
    fn test_navigation_is_noop_without_matches() {
        let mut state = SearchState::default();
        assert_eq!(state.next_match(), None);
        assert_eq!(state.previous_match(), None);
        assert!(!state.is_active());
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut state = SearchState::default();
        state.set_query("hel".to_string());
        state.set_query("hello".to_string());
        assert!(!state.apply_result("hel", 4));
        assert!(state.cursor().is_none());
        assert!(state.apply_result("hello", 2));
        assert_eq!(state.cursor().map(MatchCursor::total), Some(2));
    }

    #[test]
    fn test_new_query_resets_cursor() {
        let mut state = SearchState::default();
        state.set_query("a".to_string());
        state.apply_result("a", 5);
        state.next_match();
        state.set_query("ab".to_string());
        assert!(state.cursor().is_none());
    }

    #[test]
    fn test_close_clears_everything() {
        let mut state = SearchState::default();
        state.show();
        state.set_query("x".to_string());
        state.apply_result("x", 1);
        state.close();
        assert_eq!(state, SearchState::default());
    }

    fn page_matcher(query: &str) -> regex::Regex {
        regex::RegexBuilder::new(&literal_pattern(query))
            .case_insensitive(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_pattern_matches_any_case() {
        let matcher = page_matcher("HELLO");
        let found: Vec<_> = matcher
            .find_iter("hello Hello HELLO")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["hello", "Hello", "HELLO"]);
    }

    #[test]
    fn test_pattern_offsets_refer_to_original_text() {
        // Lowercasing "İ" changes the string length.
        let text = "İstanbul hello";
        let m = page_matcher("hello").find(text).unwrap();
        assert_eq!(&text[m.range()], "hello");
    }

    #[test]
    fn test_pattern_escapes_regex_syntax() {
        assert_eq!(literal_pattern("a.b"), "a\\.b");
        let matcher = page_matcher("(1+1)*[x]|$^/");
        assert!(matcher.is_match("is (1+1)*[x]|$^/ two"));
        assert!(!page_matcher("a.b").is_match("axb"));
        assert!(page_matcher("c:\\dir").is_match("C:\\DIR"));
    }

    #[test]
    fn test_many_matches_are_capped() {
        let text = "e ".repeat(100);
        let total = page_matcher("E").find_iter(&text).count();
        assert_eq!(total, 100);
        assert_eq!(MatchCursor::new(total).map(MatchCursor::total), Some(MATCH_LIMIT));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn pattern_matches_query_literally(query in "\\PC{1,12}") {
                let matcher = page_matcher(&query);
                let haystack = format!("<{query}>");
                let found = matcher.find(&haystack);
                prop_assert!(found.is_some());
            }

            #[test]
            fn cursor_stays_in_bounds(total in 1..200usize, steps in proptest::collection::vec(any::<bool>(), 0..100)) {
                let mut cursor = MatchCursor::new(total).unwrap();
                for forward in steps {
                    cursor = if forward { cursor.next() } else { cursor.previous() };
                    prop_assert!(cursor.current() < cursor.total());
                    prop_assert!(cursor.total() <= MATCH_LIMIT);
                }
            }

            #[test]
            fn next_then_previous_is_identity(total in 1..200usize, start in 0..50usize) {
                let mut cursor = MatchCursor::new(total).unwrap();
                for _ in 0..start {
                    cursor = cursor.next();
                }
                prop_assert_eq!(cursor.next().previous(), cursor);
            }
        }
    }
}
