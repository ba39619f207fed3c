//! Exclusion patterns as found in `.gitignore` style files.

use bitflags::bitflags;

use crate::wildmatch::is_glob_special;

bitflags! {
    /// Properties derived from a pattern's syntax, used to pick the cheapest matching
    /// strategy and to interpret a match.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ExcludeFlag: u8 {
        /// The pattern contains no slash, so it is matched against the base name of a path
        /// at any directory depth.
        const NO_DIRECTORY = 0x01;

        /// The pattern is a `*` followed by a plain literal, so matching reduces to a
        /// suffix comparison.
        const ENDS_WITH = 0x04;

        /// The pattern ended with a slash and only applies to directories.
        const MUST_BE_DIRECTORY = 0x08;

        /// The pattern started with a `!` and re-includes paths a previous pattern
        /// excluded.
        const NEGATION = 0x10;
    }
}

/// Lines which do not form a pattern at all.
///
/// These are not errors when reading a whole file, where such lines are simply skipped,
/// but they are rejected when handed to [`ExcludePattern::new`] directly.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum InvalidPattern {
    #[error("empty pattern")]
    Empty,

    #[error("pattern is a comment")]
    Comment,
}

/// A single analyzed exclusion pattern.
///
/// The line's `!` prefix and trailing slash are stripped off into [`ExcludeFlag`]s, and the
/// remaining text is scanned once for glob metacharacters so that matching can start with a
/// literal prefix comparison.
#[derive(Clone, Debug)]
pub struct ExcludePattern {
    text: String,
    flags: ExcludeFlag,
    no_wildcard_len: usize,
    rank: u32,
    rank_group: u32,
}

impl ExcludePattern {
    /// Analyze one line of an exclusion file.
    ///
    /// `rank` orders patterns within their source and `rank_group` orders the sources
    /// themselves; resolution considers patterns in ascending `(rank_group, rank)` order
    /// with later patterns overriding earlier ones.
    pub fn new(line: &str, rank: u32, rank_group: u32) -> Result<Self, InvalidPattern> {
        let line = line.trim();
        if line.is_empty() {
            return Err(InvalidPattern::Empty);
        }
        if line.starts_with('#') {
            return Err(InvalidPattern::Comment);
        }

        let mut flags = ExcludeFlag::default();

        let line = match line.strip_prefix('!') {
            Some(rest) => {
                flags |= ExcludeFlag::NEGATION;
                rest
            }
            None => line,
        };
        let line = match line.strip_suffix('/') {
            Some(rest) => {
                flags |= ExcludeFlag::MUST_BE_DIRECTORY;
                rest
            }
            None => line,
        };
        if line.is_empty() {
            return Err(InvalidPattern::Empty);
        }

        if !line.contains('/') {
            flags |= ExcludeFlag::NO_DIRECTORY;
        }

        let bytes = line.as_bytes();
        let no_wildcard_len = bytes
            .iter()
            .position(|&b| is_glob_special(b))
            .unwrap_or(bytes.len());

        if bytes[0] == b'*' && bytes[1..].iter().all(|&b| !is_glob_special(b)) {
            flags |= ExcludeFlag::ENDS_WITH;
        }

        Ok(Self {
            text: line.to_owned(),
            flags,
            no_wildcard_len,
            rank,
            rank_group,
        })
    }

    /// The pattern text with `!` and the trailing slash stripped.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn flags(&self) -> ExcludeFlag {
        self.flags
    }

    /// Length of the literal prefix before the first glob metacharacter. Equal to the text
    /// length for fully literal patterns.
    pub fn no_wildcard_len(&self) -> usize {
        self.no_wildcard_len
    }

    pub fn contains_wildcards(&self) -> bool {
        self.no_wildcard_len != self.text.len()
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn rank_group(&self) -> u32 {
        self.rank_group
    }

    pub fn set_rank(&mut self, rank: u32) {
        self.rank = rank;
    }

    pub fn set_rank_group(&mut self, rank_group: u32) {
        self.rank_group = rank_group;
    }
}

#[test]
fn pattern_analysis() {
    let pat = ExcludePattern::new("*.log", 1, 0).unwrap();
    assert_eq!(pat.text(), "*.log");
    assert_eq!(
        pat.flags(),
        ExcludeFlag::NO_DIRECTORY | ExcludeFlag::ENDS_WITH
    );
    assert_eq!(pat.no_wildcard_len(), 0);
    assert!(pat.contains_wildcards());

    let pat = ExcludePattern::new("!important.log", 3, 0).unwrap();
    assert_eq!(pat.text(), "important.log");
    assert_eq!(
        pat.flags(),
        ExcludeFlag::NEGATION | ExcludeFlag::NO_DIRECTORY
    );
    assert_eq!(pat.no_wildcard_len(), "important.log".len());
    assert!(!pat.contains_wildcards());
    assert_eq!(pat.rank(), 3);

    let pat = ExcludePattern::new("build/", 1, 0).unwrap();
    assert_eq!(pat.text(), "build");
    assert_eq!(
        pat.flags(),
        ExcludeFlag::MUST_BE_DIRECTORY | ExcludeFlag::NO_DIRECTORY
    );

    let pat = ExcludePattern::new("doc/*.html", 1, 0).unwrap();
    assert_eq!(pat.text(), "doc/*.html");
    assert_eq!(pat.flags(), ExcludeFlag::empty());
    assert_eq!(pat.no_wildcard_len(), 4);

    // a leading slash anchors to the root but stays part of the text
    let pat = ExcludePattern::new("/todo.txt", 1, 0).unwrap();
    assert_eq!(pat.text(), "/todo.txt");
    assert_eq!(pat.flags(), ExcludeFlag::empty());

    // a slash in the tail suppresses neither flag analysis nor the suffix strategy
    let pat = ExcludePattern::new("*obj/res", 1, 0).unwrap();
    assert_eq!(pat.flags(), ExcludeFlag::ENDS_WITH);

    let pat = ExcludePattern::new("*.[oa]", 1, 0).unwrap();
    assert_eq!(pat.flags(), ExcludeFlag::NO_DIRECTORY);
    assert_eq!(pat.no_wildcard_len(), 0);

    // surrounding whitespace is not significant
    let pat = ExcludePattern::new("  target/  ", 1, 0).unwrap();
    assert_eq!(pat.text(), "target");
    assert!(pat.flags().contains(ExcludeFlag::MUST_BE_DIRECTORY));
}

#[test]
fn reparsing_normalized_text_is_stable() {
    // the stored text must analyze the same way again, minus the stripped markers
    for line in ["!build/", "*.log", "/anchored/path", "deep/**/x?[ab]", "!*.bak"] {
        let first = ExcludePattern::new(line, 1, 0).unwrap();
        let again = ExcludePattern::new(first.text(), 1, 0).unwrap();
        assert_eq!(again.text(), first.text());
        assert_eq!(
            again.flags(),
            first.flags() & !(ExcludeFlag::NEGATION | ExcludeFlag::MUST_BE_DIRECTORY),
            "line={line:?}"
        );
        assert_eq!(again.no_wildcard_len(), first.no_wildcard_len());
    }
}

#[test]
fn pattern_rejects_non_patterns() {
    assert!(matches!(
        ExcludePattern::new("", 1, 0),
        Err(InvalidPattern::Empty)
    ));
    assert!(matches!(
        ExcludePattern::new("   ", 1, 0),
        Err(InvalidPattern::Empty)
    ));
    assert!(matches!(
        ExcludePattern::new("# comment", 1, 0),
        Err(InvalidPattern::Comment)
    ));
    // nothing left after stripping the prefix and suffix
    assert!(matches!(
        ExcludePattern::new("!/", 1, 0),
        Err(InvalidPattern::Empty)
    ));
    assert!(matches!(
        ExcludePattern::new("!", 1, 0),
        Err(InvalidPattern::Empty)
    ));
}
