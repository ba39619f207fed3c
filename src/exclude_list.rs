//! Exclusion lists and path resolution.
//!
//! An [`ExcludeList`] is the parsed form of one exclusion file. Any number of lists feed an
//! [`ExclusionResolver`], which answers the only question that matters in the end: given a
//! path, is it [`Included`](Verdict::Included) or [`Excluded`](Verdict::Excluded)?

use crate::pattern::{ExcludeFlag, ExcludePattern, InvalidPattern};
use crate::wildmatch::{check_syntax, wildmatch, MatchFlag};

/// The patterns of one exclusion source, in file order.
#[derive(Clone, Debug, Default)]
pub struct ExcludeList {
    source: String,
    patterns: Vec<ExcludePattern>,
}

impl ExcludeList {
    /// An empty list. `source` is a label for log messages, typically the file name.
    pub fn new<S: Into<String>>(source: S) -> Self {
        Self {
            source: source.into(),
            patterns: Vec::new(),
        }
    }

    /// Parse exclusion file content, line by line.
    ///
    /// Blank lines and `#` comments are skipped. A pattern's rank is its 1-based line
    /// number, so ranks stay meaningful for log messages even when lines are skipped.
    /// Syntactically broken glob patterns are kept (they simply never match), but warned
    /// about once here rather than silently at every match attempt.
    pub fn from_lines<'a, S, I>(source: S, lines: I, rank_group: u32) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = &'a str>,
    {
        let mut list = Self::new(source);
        for (lineno, line) in lines.into_iter().enumerate() {
            let rank = lineno as u32 + 1;
            match ExcludePattern::new(line, rank, rank_group) {
                Ok(pattern) => {
                    if let Err(err) = check_syntax(pattern.text()) {
                        log::warn!(
                            "{}:{rank}: unmatchable pattern {:?}: {err}",
                            list.source,
                            pattern.text(),
                        );
                    }
                    list.patterns.push(pattern);
                }
                Err(InvalidPattern::Empty | InvalidPattern::Comment) => (),
            }
        }
        list
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn patterns(&self) -> &[ExcludePattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn push(&mut self, pattern: ExcludePattern) {
        self.patterns.push(pattern);
    }

    /// Append another list's patterns, keeping their ranks.
    pub fn extend_from(&mut self, other: &ExcludeList) {
        self.patterns.extend_from_slice(&other.patterns);
    }

    /// Move the whole list to another rank group.
    pub fn set_rank_group(&mut self, rank_group: u32) {
        for pattern in &mut self.patterns {
            pattern.set_rank_group(rank_group);
        }
    }
}

/// The resolver's answer for a path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    Included,
    Excluded,
}

/// Resolves paths against the combined patterns of several exclusion lists.
///
/// Paths are expected to be relative to the directory the exclusion files describe, using
/// `/` as separator and without a leading slash. Patterns may carry a leading slash; it
/// anchors them at that same root.
#[derive(Clone, Debug)]
pub struct ExclusionResolver {
    patterns: Vec<ExcludePattern>,
    flags: MatchFlag,
}

impl ExclusionResolver {
    /// Combine multiple lists into one resolver.
    ///
    /// The patterns are ordered by `(rank_group, rank)` ascending. When several patterns
    /// match a path, the last one in that order decides, so later groups override earlier
    /// ones the way a repository's own exclusion file overrides a global one.
    pub fn new<I>(lists: I) -> Self
    where
        I: IntoIterator<Item = ExcludeList>,
    {
        let mut patterns: Vec<ExcludePattern> = lists
            .into_iter()
            .flat_map(|list| list.patterns)
            .collect();
        patterns.sort_by_key(|p| (p.rank_group(), p.rank()));
        Self {
            patterns,
            flags: MatchFlag::PATHNAME,
        }
    }

    /// Toggle ascii-case-insensitive matching, for use on case-insensitive file systems.
    pub fn case_insensitive(mut self, value: bool) -> Self {
        self.flags.set(MatchFlag::CASEFOLD, value);
        self
    }

    /// Decide whether `path` is excluded.
    ///
    /// `is_directory` enables the patterns with a trailing slash. An excluded directory
    /// takes everything inside it down with it, even paths a negation pattern would
    /// otherwise re-include, so every ancestor directory is checked first.
    pub fn resolve(&self, path: &str, is_directory: bool) -> Verdict {
        let bytes = path.as_bytes();
        for slash in memchr::memchr_iter(b'/', bytes) {
            if slash == 0 {
                continue;
            }
            if self.decide(&path[..slash], true) == Some(Verdict::Excluded) {
                return Verdict::Excluded;
            }
        }
        self.decide(path, is_directory).unwrap_or(Verdict::Included)
    }

    /// The verdict of the last matching pattern for this exact path, if any.
    fn decide(&self, path: &str, is_directory: bool) -> Option<Verdict> {
        for pattern in self.patterns.iter().rev() {
            if pattern.flags().contains(ExcludeFlag::MUST_BE_DIRECTORY) && !is_directory {
                continue;
            }
            if self.pattern_matches(pattern, path) {
                return Some(if pattern.flags().contains(ExcludeFlag::NEGATION) {
                    Verdict::Included
                } else {
                    Verdict::Excluded
                });
            }
        }
        None
    }

    fn pattern_matches(&self, pattern: &ExcludePattern, path: &str) -> bool {
        let casefold = self.flags.contains(MatchFlag::CASEFOLD);

        // A pattern without slashes matches the base name at any depth.
        let candidate = if pattern.flags().contains(ExcludeFlag::NO_DIRECTORY) {
            match path.rsplit_once('/') {
                Some((_, base)) => base,
                None => path,
            }
        } else {
            path
        };
        let candidate = candidate.as_bytes();

        // The leading slash only anchors the pattern, it is not part of a relative path.
        let mut text = pattern.text().as_bytes();
        let mut literal_len = pattern.no_wildcard_len();
        if let Some(stripped) = text.strip_prefix(b"/") {
            text = stripped;
            literal_len = literal_len.saturating_sub(1);
        }

        if pattern.flags().contains(ExcludeFlag::ENDS_WITH) {
            let suffix = &text[1..];
            if suffix.len() > candidate.len() {
                return false;
            }
            let tail = &candidate[candidate.len() - suffix.len()..];
            return if casefold {
                tail.eq_ignore_ascii_case(suffix)
            } else {
                tail == suffix
            };
        }

        // Compare the literal prefix first, which rejects most candidates without
        // running the glob matcher.
        if literal_len > 0 {
            if candidate.len() < literal_len {
                return false;
            }
            let head = &candidate[..literal_len];
            let prefix = &text[..literal_len];
            let equal = if casefold {
                head.eq_ignore_ascii_case(prefix)
            } else {
                head == prefix
            };
            if !equal {
                return false;
            }
        }

        wildmatch(text, candidate, self.flags).is_match()
    }
}

#[cfg(test)]
fn resolver(lines: &[&str]) -> ExclusionResolver {
    ExclusionResolver::new([ExcludeList::from_lines(".gitignore", lines.iter().copied(), 0)])
}

#[test]
fn list_parsing() {
    let list = ExcludeList::from_lines(
        ".gitignore",
        ["# build output", "", "target/", "*.log", "!important.log"],
        0,
    );
    assert_eq!(list.source(), ".gitignore");
    let ranks: Vec<u32> = list.patterns().iter().map(|p| p.rank()).collect();
    assert_eq!(ranks, [3, 4, 5]);

    let empty = ExcludeList::from_lines("empty", ["# only", "", "   "], 0);
    assert!(empty.is_empty());
}

#[test]
fn basic_resolution() {
    let r = resolver(&["*.log", "target/"]);
    assert_eq!(r.resolve("build.log", false), Verdict::Excluded);
    assert_eq!(r.resolve("src/main.rs", false), Verdict::Included);
    // base name matching applies at any depth
    assert_eq!(r.resolve("sub/dir/build.log", false), Verdict::Excluded);
    // directory-only patterns do not catch plain files
    assert_eq!(r.resolve("target", false), Verdict::Included);
    assert_eq!(r.resolve("target", true), Verdict::Excluded);
    // and being slash-free, they apply at any depth
    assert_eq!(r.resolve("a/b/target", true), Verdict::Excluded);
}

#[test]
fn last_match_wins() {
    let r = resolver(&["*.log", "!important.log"]);
    assert_eq!(r.resolve("debug.log", false), Verdict::Excluded);
    assert_eq!(r.resolve("important.log", false), Verdict::Included);

    // order matters: the negation is overridden by a later exclusion
    let r = resolver(&["!important.log", "*.log"]);
    assert_eq!(r.resolve("important.log", false), Verdict::Excluded);
}

#[test]
fn excluded_ancestors_override_negations() {
    let r = resolver(&["target/", "!important.log"]);
    // the negation cannot rescue a file inside an excluded directory
    assert_eq!(r.resolve("target/important.log", false), Verdict::Excluded);
    assert_eq!(r.resolve("target/debug/foo", false), Verdict::Excluded);
    assert_eq!(r.resolve("important.log", false), Verdict::Included);
    // with no excluded ancestor, the negation applies at depth as usual
    assert_eq!(r.resolve("src/important.log", false), Verdict::Included);
}

#[test]
fn anchored_patterns() {
    let r = resolver(&["/todo.txt", "doc/*.html"]);
    assert_eq!(r.resolve("todo.txt", false), Verdict::Excluded);
    assert_eq!(r.resolve("sub/todo.txt", false), Verdict::Included);
    assert_eq!(r.resolve("doc/index.html", false), Verdict::Excluded);
    // a single star does not cross directories
    assert_eq!(r.resolve("doc/api/index.html", false), Verdict::Included);
    // patterns with a slash are anchored even without a leading one
    assert_eq!(r.resolve("sub/doc/index.html", false), Verdict::Included);
}

#[test]
fn double_star_patterns() {
    let r = resolver(&["**/node_modules/", "build/**"]);
    assert_eq!(r.resolve("node_modules", true), Verdict::Excluded);
    assert_eq!(r.resolve("a/b/node_modules", true), Verdict::Excluded);
    assert_eq!(r.resolve("build/out/app.js", false), Verdict::Excluded);
}

#[test]
fn rank_groups_order_lists() {
    let global = ExcludeList::from_lines("global", ["*.tmp"], 0);
    let local = ExcludeList::from_lines("local", ["!keep.tmp"], 1);
    // construction order does not matter, only the rank groups do
    let r = ExclusionResolver::new([local, global]);
    assert_eq!(r.resolve("scratch.tmp", false), Verdict::Excluded);
    assert_eq!(r.resolve("keep.tmp", false), Verdict::Included);
}

#[test]
fn case_sensitivity() {
    let r = resolver(&["*.LOG"]);
    assert_eq!(r.resolve("build.log", false), Verdict::Included);

    let r = resolver(&["*.LOG"]).case_insensitive(true);
    assert_eq!(r.resolve("build.log", false), Verdict::Excluded);
    assert_eq!(r.resolve("Build.Log", false), Verdict::Excluded);

    let r = resolver(&["/Makefile", "doc/[A-Z]*"]).case_insensitive(true);
    assert_eq!(r.resolve("makefile", false), Verdict::Excluded);
    assert_eq!(r.resolve("doc/readme", false), Verdict::Excluded);
}

#[test]
fn malformed_patterns_never_match() {
    let r = resolver(&["foo[ab", "a**b", "*.log"]);
    assert_eq!(r.resolve("fooa", false), Verdict::Included);
    assert_eq!(r.resolve("ab", false), Verdict::Included);
    assert_eq!(r.resolve("axxb", false), Verdict::Included);
    // the surrounding list still works
    assert_eq!(r.resolve("x.log", false), Verdict::Excluded);
}

#[test]
fn ends_with_fast_path() {
    let r = resolver(&["*.orig"]);
    assert_eq!(r.resolve("a.orig", false), Verdict::Excluded);
    assert_eq!(r.resolve("deep/b.orig", false), Verdict::Excluded);
    assert_eq!(r.resolve("orig", false), Verdict::Included);
    assert_eq!(r.resolve(".orig", false), Verdict::Excluded);
}

#[test]
fn merged_lists_keep_rank_order() {
    let mut merged = ExcludeList::new("merged");
    merged.extend_from(&ExcludeList::from_lines("a", ["*.log"], 0));
    let mut late = ExcludeList::from_lines("b", ["!x.log"], 0);
    late.set_rank_group(1);
    merged.extend_from(&late);
    let r = ExclusionResolver::new([merged]);
    assert_eq!(r.resolve("x.log", false), Verdict::Included);
    assert_eq!(r.resolve("y.log", false), Verdict::Excluded);
}
