//! This implements the pattern matching algorithm found in git's `wildmatch.c`

use bitflags::bitflags;

bitflags! {
    /// Flags affecting how a pattern should match.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct MatchFlag: u8 {
        /// Ignore upper/lower case on pattern and text. Note that this only affects ascii
        /// characters. We do not normalize/casefold unicode here. If you need this, case-fold
        /// your input strings and patterns first.
        const CASEFOLD = 0x01;

        /// The text is a path name, meaning that `*`, `?` and character classes do not match
        /// slashes. Only explicit slashes and `**` can match slashes.
        const PATHNAME = 0x02;
    }
}

/// Outcome of matching one pattern against one text.
///
/// A malformed pattern is not an ordinary non-match: callers resolving a whole pattern list
/// should treat it as "never matches", but may want to surface it separately (see
/// [`check_syntax`]).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchOutcome {
    Match,
    NoMatch,
    Malformed,
}

impl MatchOutcome {
    #[inline]
    pub fn is_match(self) -> bool {
        self == MatchOutcome::Match
    }
}

/// Ways a glob pattern can be syntactically broken.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum MalformedGlob {
    #[error("trailing backslash in pattern")]
    TrailingBackslash,

    #[error("unclosed character class in pattern, starting at byte {0}")]
    UnclosedClass(usize),

    #[error("unknown named character class in pattern, starting at byte {0}")]
    UnknownClassName(usize),

    #[error("`**` not delimited by slashes in pattern, at byte {0}")]
    UndelimitedStarStar(usize),
}

/// Internal result of the recursive scan. `NoMatch` lets an enclosing `*` keep trying other
/// positions, `AbortAll` means the text ran out and no star position can help, and
/// `AbortToStarStar` gives up on a plain `*` so that only an enclosing directory-level `**`
/// retries. `AbortMalformed` is sticky and surfaces as [`MatchOutcome::Malformed`].
enum WmResult {
    Match,
    NoMatch,
    AbortAll,
    AbortToStarStar,
    AbortMalformed,
}

/// Nested `*` retries recurse once per remaining wildcard, so the depth is bounded by the
/// pattern length. The ceiling turns pathological patterns into `Malformed` instead of
/// exhausting the stack.
const MAX_RECURSION: u32 = 1024;

/// The characters which start glob syntax: `*`, `?`, `[` and the escape character.
#[inline]
pub(crate) fn is_glob_special(ch: u8) -> bool {
    matches!(ch, b'*' | b'?' | b'[' | b'\\')
}

/// Byte at `i`, with NUL standing in for "past the end". Patterns are lines of text and never
/// contain a real NUL.
#[inline]
fn at(bytes: &[u8], i: usize) -> u8 {
    bytes.get(i).copied().unwrap_or(0)
}

#[inline]
fn fold(ch: u8, flags: MatchFlag) -> u8 {
    if flags.contains(MatchFlag::CASEFOLD) {
        ch.to_ascii_lowercase()
    } else {
        ch
    }
}

/// Match `text` against a shell glob `pattern` supporting `?`, `\`, `[...]`, `*` and `**`.
pub fn wildmatch<P, T>(pattern: P, text: T, flags: MatchFlag) -> MatchOutcome
where
    P: AsRef<[u8]>,
    T: AsRef<[u8]>,
{
    match dowild(pattern.as_ref(), text.as_ref(), flags, 0) {
        WmResult::Match => MatchOutcome::Match,
        WmResult::AbortMalformed => MatchOutcome::Malformed,
        WmResult::NoMatch | WmResult::AbortAll | WmResult::AbortToStarStar => MatchOutcome::NoMatch,
    }
}

// Port of git's dowild(), using index cursors over byte slices instead of pointer walking.
fn dowild(pattern: &[u8], text: &[u8], flags: MatchFlag, depth: u32) -> WmResult {
    if depth > MAX_RECURSION {
        return WmResult::AbortMalformed;
    }

    let mut p = 0;
    let mut t = 0;

    while p < pattern.len() {
        let p_ch = fold(pattern[p], flags);
        if t == text.len() && p_ch != b'*' {
            // A dangling escape is broken even when there is no text left to match it
            // against.
            if p_ch == b'\\' && p + 1 == pattern.len() {
                return WmResult::AbortMalformed;
            }
            return WmResult::AbortAll;
        }
        let t_ch = fold(at(text, t), flags);

        match p_ch {
            b'\\' => {
                // Literal match with the following character.
                p += 1;
                if p == pattern.len() {
                    return WmResult::AbortMalformed;
                }
                if t_ch != fold(pattern[p], flags) {
                    return WmResult::NoMatch;
                }
            }
            b'?' => {
                // Match anything but '/'.
                if flags.contains(MatchFlag::PATHNAME) && t_ch == b'/' {
                    return WmResult::NoMatch;
                }
            }
            b'*' => {
                let star_start = p;
                p += 1;
                let match_slash;
                if at(pattern, p) == b'*' {
                    p += 1;
                    // swallow following stars as well:
                    while at(pattern, p) == b'*' {
                        p += 1;
                    }
                    if !flags.contains(MatchFlag::PATHNAME) {
                        // without PATHNAME, '*' == '**'
                        match_slash = true;
                    } else if (star_start == 0 || pattern[star_start - 1] == b'/')
                        && (p == pattern.len()
                            || pattern[p] == b'/'
                            || (pattern[p] == b'\\' && at(pattern, p + 1) == b'/'))
                    {
                        // Assuming we already matched `foo/` and are at `**/`, first try
                        // letting it match nothing, so that `foo/**/bar` can match both
                        // `foo/bar` and `foo/a/bar`.
                        if at(pattern, p) == b'/' {
                            if let WmResult::Match =
                                dowild(&pattern[p + 1..], &text[t..], flags, depth + 1)
                            {
                                return WmResult::Match;
                            }
                        }
                        match_slash = true;
                    } else {
                        // git doesn't allow `**` attached to anything other than slashes, so
                        // only `**`, `.../**`, `.../**/...` and `**/...` are valid.
                        return WmResult::AbortMalformed;
                    }
                } else {
                    match_slash = !flags.contains(MatchFlag::PATHNAME);
                }

                if p == pattern.len() {
                    // Trailing `**` matches everything. Trailing `*` matches only if there
                    // are no more slash characters.
                    if !match_slash && memchr::memchr(b'/', &text[t..]).is_some() {
                        return WmResult::NoMatch;
                    }
                    return WmResult::Match;
                } else if !match_slash && pattern[p] == b'/' {
                    // One asterisk followed by a slash with PATHNAME matches the rest of the
                    // current directory. The slash itself is consumed below.
                    match memchr::memchr(b'/', &text[t..]) {
                        Some(off) => t += off,
                        None => return WmResult::AbortAll,
                    }
                } else {
                    loop {
                        if t == text.len() {
                            return WmResult::AbortAll;
                        }

                        // Try to advance faster when the star run is followed by a literal:
                        // the text before the literal must belong to the star, so jump to its
                        // next occurrence. A plain `*` must not look past the first slash.
                        if !is_glob_special(pattern[p]) {
                            let p_lit = fold(pattern[p], flags);
                            loop {
                                if t == text.len() {
                                    return WmResult::NoMatch;
                                }
                                let t_ch = text[t];
                                if !match_slash && t_ch == b'/' {
                                    break;
                                }
                                if fold(t_ch, flags) == p_lit {
                                    break;
                                }
                                t += 1;
                            }
                            if fold(text[t], flags) != p_lit {
                                return WmResult::NoMatch;
                            }
                        }

                        match dowild(&pattern[p..], &text[t..], flags, depth + 1) {
                            WmResult::NoMatch => {
                                if !match_slash && text[t] == b'/' {
                                    return WmResult::AbortToStarStar;
                                }
                            }
                            WmResult::AbortToStarStar if match_slash => (), // continue from here
                            other => return other,
                        }

                        t += 1;
                    }
                }
            }
            b'[' => {
                p += 1;
                let mut p_ch = at(pattern, p);
                if p_ch == b'^' {
                    p_ch = b'!';
                }
                let negated = p_ch == b'!';
                if negated {
                    // Inverted character class.
                    p += 1;
                    p_ch = at(pattern, p);
                }
                let mut prev_ch = 0u8;
                let mut matched = false;
                // The first class character is a member even if it is `]`.
                loop {
                    if p_ch == 0 {
                        // `]` never found.
                        return WmResult::AbortMalformed;
                    }
                    if p_ch == b'\\' {
                        p += 1;
                        p_ch = at(pattern, p);
                        if p_ch == 0 {
                            return WmResult::AbortMalformed;
                        }
                        if t_ch == p_ch {
                            matched = true;
                        }
                    } else if p_ch == b'-'
                        && prev_ch != 0
                        && at(pattern, p + 1) != 0
                        && at(pattern, p + 1) != b']'
                    {
                        p += 1;
                        p_ch = at(pattern, p);
                        if p_ch == b'\\' {
                            p += 1;
                            p_ch = at(pattern, p);
                            if p_ch == 0 {
                                return WmResult::AbortMalformed;
                            }
                        }
                        if t_ch <= p_ch && t_ch >= prev_ch {
                            matched = true;
                        } else if flags.contains(MatchFlag::CASEFOLD) && t_ch.is_ascii_lowercase()
                        {
                            let t_up = t_ch.to_ascii_uppercase();
                            if t_up <= p_ch && t_up >= prev_ch {
                                matched = true;
                            }
                        }
                        // a range end cannot start another range
                        p_ch = 0;
                    } else if p_ch == b'[' && at(pattern, p + 1) == b':' {
                        p += 2;
                        let s = p;
                        loop {
                            p_ch = at(pattern, p);
                            if p_ch == 0 {
                                return WmResult::AbortMalformed;
                            }
                            if p_ch == b']' {
                                break;
                            }
                            p += 1;
                        }
                        if p == s || pattern[p - 1] != b':' {
                            // Didn't find `:]`, so treat `[` like a normal member and rescan
                            // the rest of the class from the `:`.
                            p = s - 2;
                            p_ch = b'[';
                            if t_ch == p_ch {
                                matched = true;
                            }
                        } else {
                            // C-locale classification on bytes, on purpose: unicode-aware
                            // classes would disagree with git for punctuation and whitespace.
                            let hit = match &pattern[s..p - 1] {
                                b"alnum" => t_ch.is_ascii_alphanumeric(),
                                b"alpha" => t_ch.is_ascii_alphabetic(),
                                b"blank" => t_ch == b' ' || t_ch == b'\t',
                                b"cntrl" => t_ch.is_ascii_control(),
                                b"digit" => t_ch.is_ascii_digit(),
                                b"graph" => t_ch.is_ascii_graphic(),
                                b"lower" => t_ch.is_ascii_lowercase(),
                                b"print" => t_ch.is_ascii_graphic() || t_ch == b' ',
                                b"punct" => t_ch.is_ascii_punctuation(),
                                b"space" => t_ch == b' ' || (0x09..=0x0d).contains(&t_ch),
                                b"upper" => {
                                    t_ch.is_ascii_uppercase()
                                        || (flags.contains(MatchFlag::CASEFOLD)
                                            && t_ch.is_ascii_lowercase())
                                }
                                b"xdigit" => t_ch.is_ascii_hexdigit(),
                                _ => return WmResult::AbortMalformed,
                            };
                            if hit {
                                matched = true;
                            }
                            p_ch = 0;
                        }
                    } else if t_ch == p_ch {
                        matched = true;
                    }

                    prev_ch = p_ch;
                    p += 1;
                    p_ch = at(pattern, p);
                    if p_ch == b']' {
                        break;
                    }
                }
                if matched == negated
                    || (flags.contains(MatchFlag::PATHNAME) && t_ch == b'/')
                {
                    return WmResult::NoMatch;
                }
            }
            _ => {
                if t_ch != p_ch {
                    return WmResult::NoMatch;
                }
            }
        }

        t += 1;
        p += 1;
    }

    if t == text.len() {
        WmResult::Match
    } else {
        WmResult::NoMatch
    }
}

/// Check a pattern for well-formedness without matching it against a text.
///
/// This finds the problems [`wildmatch`] reports as [`MatchOutcome::Malformed`]: a dangling
/// escape, a character class whose `]` is missing, a `[:name:]` class that doesn't exist, or
/// a `**` not delimited by slashes (which only [`MatchFlag::PATHNAME`] matching rejects, the
/// mode path resolution always uses). A broken pattern can never match anything, so
/// exclusion lists degrade to over-inclusion; this lets loaders warn about it once instead.
pub fn check_syntax<P: AsRef<[u8]>>(pattern: P) -> Result<(), MalformedGlob> {
    let pattern = pattern.as_ref();
    let mut p = 0;
    while p < pattern.len() {
        match pattern[p] {
            b'*' => {
                let start = p;
                while at(pattern, p + 1) == b'*' {
                    p += 1;
                }
                if p > start {
                    let next = p + 1;
                    let delimited = (start == 0 || pattern[start - 1] == b'/')
                        && (next == pattern.len()
                            || pattern[next] == b'/'
                            || (pattern[next] == b'\\' && at(pattern, next + 1) == b'/'));
                    if !delimited {
                        return Err(MalformedGlob::UndelimitedStarStar(start));
                    }
                }
            }
            b'\\' => {
                p += 1;
                if p == pattern.len() {
                    return Err(MalformedGlob::TrailingBackslash);
                }
            }
            b'[' => {
                let begin = p;
                p += 1;
                if matches!(at(pattern, p), b'!' | b'^') {
                    p += 1;
                }
                let mut first = true;
                loop {
                    match pattern.get(p).copied() {
                        None => return Err(MalformedGlob::UnclosedClass(begin)),
                        Some(b']') if !first => break,
                        Some(b'\\') => {
                            p += 1;
                            if p == pattern.len() {
                                return Err(MalformedGlob::TrailingBackslash);
                            }
                        }
                        Some(b'[') if at(pattern, p + 1) == b':' => {
                            match memchr::memchr(b']', &pattern[p + 2..]) {
                                None => return Err(MalformedGlob::UnclosedClass(begin)),
                                Some(off) => {
                                    let end = p + 2 + off;
                                    if end > p + 2 && pattern[end - 1] == b':' {
                                        if !matches!(
                                            &pattern[p + 2..end - 1],
                                            b"alnum"
                                                | b"alpha"
                                                | b"blank"
                                                | b"cntrl"
                                                | b"digit"
                                                | b"graph"
                                                | b"lower"
                                                | b"print"
                                                | b"punct"
                                                | b"space"
                                                | b"upper"
                                                | b"xdigit"
                                        ) {
                                            return Err(MalformedGlob::UnknownClassName(p));
                                        }
                                        p = end;
                                    }
                                    // otherwise the bytes count as plain members
                                }
                            }
                        }
                        Some(_) => (),
                    }
                    p += 1;
                    first = false;
                }
            }
            _ => (),
        }
        p += 1;
    }
    Ok(())
}

/// Runs the matcher in the same four flag combinations as git's wildmatch test suite and
/// renders the results as e.g. `"1 0 1 0"` (PATHNAME, PATHNAME|CASEFOLD, none, CASEFOLD).
#[cfg(test)]
fn match_variants(text: &str, pattern: &str) -> String {
    [
        MatchFlag::PATHNAME,
        MatchFlag::PATHNAME | MatchFlag::CASEFOLD,
        MatchFlag::empty(),
        MatchFlag::CASEFOLD,
    ]
    .iter()
    .map(|&flags| {
        if wildmatch(pattern, text, flags).is_match() {
            "1"
        } else {
            "0"
        }
    })
    .collect::<Vec<_>>()
    .join(" ")
}

// The corpus below is git's wildmatch conformance suite (t3070). Expected columns are
// PATHNAME, PATHNAME|CASEFOLD, plain, CASEFOLD.
#[test]
fn wildmatch_basic() {
    let cases: &[(&str, &str, &str)] = &[
        ("foo", "foo", "1 1 1 1"),
        ("foo", "bar", "0 0 0 0"),
        ("", "", "1 1 1 1"),
        ("foo", "???", "1 1 1 1"),
        ("foo", "??", "0 0 0 0"),
        ("foo", "*", "1 1 1 1"),
        ("foo", "f*", "1 1 1 1"),
        ("foo", "*f", "0 0 0 0"),
        ("foo", "*foo*", "1 1 1 1"),
        ("foobar", "*ob*a*r*", "1 1 1 1"),
        ("aaaaaaabababab", "*ab", "1 1 1 1"),
        ("foo*", "foo*", "1 1 1 1"),
        ("foobar", r"foo\*bar", "0 0 0 0"),
        (r"f\oo", r"f\\oo", "1 1 1 1"),
        ("ball", "*[al]?", "1 1 1 1"),
        ("ten", "[ten]", "0 0 0 0"),
        ("ten", "**[!te]", "0 0 1 1"),
        ("ten", "**[!ten]", "0 0 0 0"),
        ("ten", "t[a-g]n", "1 1 1 1"),
        ("ten", "t[!a-g]n", "0 0 0 0"),
        ("ton", "t[!a-g]n", "1 1 1 1"),
        ("ton", "t[^a-g]n", "1 1 1 1"),
        ("a]b", "a[]]b", "1 1 1 1"),
        ("a-b", "a[]-]b", "1 1 1 1"),
        ("a]b", "a[]-]b", "1 1 1 1"),
        ("aab", "a[]-]b", "0 0 0 0"),
        ("aab", "a[]a-]b", "1 1 1 1"),
        ("]", "]", "1 1 1 1"),
    ];
    for &(text, pattern, expect) in cases {
        assert_eq!(
            match_variants(text, pattern),
            expect,
            "text={text:?} pattern={pattern:?}"
        );
    }
}

#[test]
fn wildmatch_slashes() {
    let cases: &[(&str, &str, &str)] = &[
        ("foo/baz/bar", "foo*bar", "0 0 1 1"),
        ("foo/baz/bar", "foo**bar", "0 0 1 1"),
        ("foobazbar", "foo**bar", "0 0 1 1"),
        ("foo/baz/bar", "foo/**/bar", "1 1 1 1"),
        ("foo/baz/bar", "foo/**/**/bar", "1 1 0 0"),
        ("foo/b/a/z/bar", "foo/**/bar", "1 1 1 1"),
        ("foo/b/a/z/bar", "foo/**/**/bar", "1 1 1 1"),
        ("foo/bar", "foo/**/bar", "1 1 0 0"),
        ("foo/bar", "foo/**/**/bar", "1 1 0 0"),
        ("foo/bar", "foo?bar", "0 0 1 1"),
        ("foo/bar", "foo[/]bar", "0 0 1 1"),
        ("foo/bar", "foo[^a-z]bar", "0 0 1 1"),
        ("foo/bar", "f[^eiu][^eiu][^eiu][^eiu][^eiu]r", "0 0 1 1"),
        ("foo-bar", "f[^eiu][^eiu][^eiu][^eiu][^eiu]r", "1 1 1 1"),
        ("foo", "**/foo", "1 1 0 0"),
        ("/foo", "**/foo", "1 1 1 1"),
        ("bar/baz/foo", "**/foo", "1 1 1 1"),
        ("bar/baz/foo", "*/foo", "0 0 1 1"),
        ("foo/bar/baz", "**/bar*", "0 0 1 1"),
        ("deep/foo/bar/baz", "**/bar/*", "1 1 1 1"),
        ("deep/foo/bar/baz/", "**/bar/*", "0 0 1 1"),
        ("deep/foo/bar/baz/", "**/bar/**", "1 1 1 1"),
        ("deep/foo/bar", "**/bar/*", "0 0 0 0"),
        ("deep/foo/bar/", "**/bar/**", "1 1 1 1"),
        ("foo/bar/baz", "**/bar**", "0 0 1 1"),
        ("foo/bar/baz/x", "*/bar/**", "1 1 1 1"),
        ("deep/foo/bar/baz/x", "*/bar/**", "0 0 1 1"),
        ("deep/foo/bar/baz/x", "**/bar/*/*", "1 1 1 1"),
    ];
    for &(text, pattern, expect) in cases {
        assert_eq!(
            match_variants(text, pattern),
            expect,
            "text={text:?} pattern={pattern:?}"
        );
    }
}

#[test]
fn wildmatch_various() {
    let cases: &[(&str, &str, &str)] = &[
        ("acrt", "a[c-c]st", "0 0 0 0"),
        ("acrt", "a[c-c]rt", "1 1 1 1"),
        ("]", "[!]-]", "0 0 0 0"),
        ("a", "[!]-]", "1 1 1 1"),
        ("", r"\", "0 0 0 0"),
        // a trailing escape is malformed, so `\` cannot even match itself
        (r"\", r"\", "0 0 0 0"),
        (r"/\", r"*/\", "0 0 0 0"),
        (r"/\", r"*/\\", "1 1 1 1"),
        ("foo", "foo", "1 1 1 1"),
        ("@foo", "@foo", "1 1 1 1"),
        ("foo", "@foo", "0 0 0 0"),
        ("[ab]", r"\[ab]", "1 1 1 1"),
        ("[ab]", "[[]ab]", "1 1 1 1"),
        ("[ab]", "[[:]ab]", "1 1 1 1"),
        ("[ab]", "[[::]ab]", "0 0 0 0"),
        ("[ab]", "[[:digit]ab]", "1 1 1 1"),
        ("[ab]", r"[\[:]ab]", "1 1 1 1"),
        ("?a?b", r"\??\?b", "1 1 1 1"),
        ("abc", r"\a\b\c", "1 1 1 1"),
        ("foo", "", "0 0 0 0"),
        ("foo/bar/baz/to", "**/t[o]", "1 1 1 1"),
    ];
    for &(text, pattern, expect) in cases {
        assert_eq!(
            match_variants(text, pattern),
            expect,
            "text={text:?} pattern={pattern:?}"
        );
    }
}

#[test]
fn wildmatch_character_classes() {
    let cases: &[(&str, &str, &str)] = &[
        ("a1B", "[[:alpha:]][[:digit:]][[:upper:]]", "1 1 1 1"),
        ("a", "[[:digit:][:upper:][:space:]]", "0 1 0 1"),
        ("A", "[[:digit:][:upper:][:space:]]", "1 1 1 1"),
        ("1", "[[:digit:][:upper:][:space:]]", "1 1 1 1"),
        ("1", "[[:digit:][:upper:][:spaci:]]", "0 0 0 0"),
        (" ", "[[:digit:][:upper:][:space:]]", "1 1 1 1"),
        (".", "[[:digit:][:upper:][:space:]]", "0 0 0 0"),
        (".", "[[:digit:][:punct:][:space:]]", "1 1 1 1"),
        ("5", "[[:xdigit:]]", "1 1 1 1"),
        ("f", "[[:xdigit:]]", "1 1 1 1"),
        ("D", "[[:xdigit:]]", "1 1 1 1"),
        (
            "_",
            "[[:alnum:][:alpha:][:blank:][:cntrl:][:digit:][:graph:][:lower:][:print:][:punct:][:space:][:upper:][:xdigit:]]",
            "1 1 1 1",
        ),
        (
            ".",
            "[^[:alnum:][:alpha:][:blank:][:cntrl:][:digit:][:lower:][:space:][:upper:][:xdigit:]]",
            "1 1 1 1",
        ),
        ("5", "[a-c[:digit:]x-z]", "1 1 1 1"),
        ("b", "[a-c[:digit:]x-z]", "1 1 1 1"),
        ("y", "[a-c[:digit:]x-z]", "1 1 1 1"),
        ("q", "[a-c[:digit:]x-z]", "0 0 0 0"),
    ];
    for &(text, pattern, expect) in cases {
        assert_eq!(
            match_variants(text, pattern),
            expect,
            "text={text:?} pattern={pattern:?}"
        );
    }
}

#[test]
fn wildmatch_malformed_and_edge_classes() {
    let cases: &[(&str, &str, &str)] = &[
        ("]", r"[\\-^]", "1 1 1 1"),
        ("[", r"[\\-^]", "0 0 0 0"),
        ("-", r"[\-_]", "1 1 1 1"),
        ("]", r"[\]]", "1 1 1 1"),
        (r"\]", r"[\]]", "0 0 0 0"),
        (r"\", r"[\]]", "0 0 0 0"),
        ("ab", "a[]b", "0 0 0 0"),
        ("a[]b", "a[]b", "0 0 0 0"),
        ("ab[", "ab[", "0 0 0 0"),
        ("ab", "[!", "0 0 0 0"),
        ("ab", "[-", "0 0 0 0"),
        ("-", "[-]", "1 1 1 1"),
        ("-", "[a-", "0 0 0 0"),
        ("-", "[!a-", "0 0 0 0"),
        ("-", "[--A]", "1 1 1 1"),
        ("5", "[--A]", "1 1 1 1"),
        (" ", "[ --]", "1 1 1 1"),
        ("$", "[ --]", "1 1 1 1"),
        ("-", "[ --]", "1 1 1 1"),
        ("0", "[ --]", "0 0 0 0"),
        ("-", "[---]", "1 1 1 1"),
        ("-", "[------]", "1 1 1 1"),
        ("j", "[a-e-n]", "0 0 0 0"),
        ("-", "[a-e-n]", "1 1 1 1"),
        ("a", "[!------]", "1 1 1 1"),
        ("[", "[]-a]", "0 0 0 0"),
        ("^", "[]-a]", "1 1 1 1"),
        ("^", "[!]-a]", "0 0 0 0"),
        ("[", "[!]-a]", "1 1 1 1"),
        ("^", "[a^bc]", "1 1 1 1"),
        ("-b]", "[a-]b]", "1 1 1 1"),
        (r"\", r"[\]", "0 0 0 0"),
        (r"\", r"[\\]", "1 1 1 1"),
        (r"\", r"[!\\]", "0 0 0 0"),
        ("G", r"[A-\\]", "1 1 1 1"),
        ("aaabbb", "b*a", "0 0 0 0"),
        ("aabcaa", "*ba*", "0 0 0 0"),
        (",", "[,]", "1 1 1 1"),
        (",", r"[\\,]", "1 1 1 1"),
        (r"\", r"[\\,]", "1 1 1 1"),
        ("-", "[,-.]", "1 1 1 1"),
        ("+", "[,-.]", "0 0 0 0"),
        ("-.]", "[,-.]", "0 0 0 0"),
        ("2", r"[\1-\3]", "1 1 1 1"),
        ("3", r"[\1-\3]", "1 1 1 1"),
        ("4", r"[\1-\3]", "0 0 0 0"),
        (r"\", r"[[-\]]", "1 1 1 1"),
        ("[", r"[[-\]]", "1 1 1 1"),
        ("]", r"[[-\]]", "1 1 1 1"),
        ("-", r"[[-\]]", "0 0 0 0"),
    ];
    for &(text, pattern, expect) in cases {
        assert_eq!(
            match_variants(text, pattern),
            expect,
            "text={text:?} pattern={pattern:?}"
        );
    }
}

#[test]
fn wildmatch_recursion() {
    let cases: &[(&str, &str, &str)] = &[
        (
            "-adobe-courier-bold-o-normal--12-120-75-75-m-70-iso8859-1",
            "-*-*-*-*-*-*-12-*-*-*-m-*-*-*",
            "1 1 1 1",
        ),
        (
            "-adobe-courier-bold-o-normal--12-120-75-75-X-70-iso8859-1",
            "-*-*-*-*-*-*-12-*-*-*-m-*-*-*",
            "0 0 0 0",
        ),
        (
            "-adobe-courier-bold-o-normal--12-120-75-75-/-70-iso8859-1",
            "-*-*-*-*-*-*-12-*-*-*-m-*-*-*",
            "0 0 0 0",
        ),
        (
            "XXX/adobe/courier/bold/o/normal//12/120/75/75/m/70/iso8859/1",
            "XXX/*/*/*/*/*/*/12/*/*/*/m/*/*/*",
            "1 1 1 1",
        ),
        (
            "XXX/adobe/courier/bold/o/normal//12/120/75/75/X/70/iso8859/1",
            "XXX/*/*/*/*/*/*/12/*/*/*/m/*/*/*",
            "0 0 0 0",
        ),
        (
            "abcd/abcdefg/abcdefghijk/abcdefghijklmnop.txt",
            "**/*a*b*g*n*t",
            "1 1 1 1",
        ),
        (
            "abcd/abcdefg/abcdefghijk/abcdefghijklmnop.txtz",
            "**/*a*b*g*n*t",
            "0 0 0 0",
        ),
        ("foo", "*/*/*", "0 0 0 0"),
        ("foo/bar", "*/*/*", "0 0 0 0"),
        ("foo/bba/arr", "*/*/*", "1 1 1 1"),
        ("foo/bb/aa/rr", "*/*/*", "0 0 1 1"),
        ("foo/bb/aa/rr", "**/**/**", "1 1 1 1"),
        ("abcXdefXghi", "*X*i", "1 1 1 1"),
        ("ab/cXd/efXg/hi", "*X*i", "0 0 1 1"),
        ("ab/cXd/efXg/hi", "*/*X*/*/*i", "1 1 1 1"),
        ("ab/cXd/efXg/hi", "**/*X*/**/*i", "1 1 1 1"),
    ];
    for &(text, pattern, expect) in cases {
        assert_eq!(
            match_variants(text, pattern),
            expect,
            "text={text:?} pattern={pattern:?}"
        );
    }
}

#[test]
fn wildmatch_pathmatch() {
    let cases: &[(&str, &str, &str)] = &[
        ("foo", "fo", "0 0 0 0"),
        ("foo/bar", "foo/bar", "1 1 1 1"),
        ("foo/bar", "foo/*", "1 1 1 1"),
        ("foo/bba/arr", "foo/*", "0 0 1 1"),
        ("foo/bba/arr", "foo/**", "1 1 1 1"),
        ("foo/bba/arr", "foo*", "0 0 1 1"),
        ("foo/bba/arr", "foo**", "0 0 1 1"),
        ("foo/bba/arr", "foo/*arr", "0 0 1 1"),
        ("foo/bba/arr", "foo/**arr", "0 0 1 1"),
        ("foo/bba/arr", "foo/*z", "0 0 0 0"),
        ("foo/bba/arr", "foo/**z", "0 0 0 0"),
        ("foo/bar", "foo?bar", "0 0 1 1"),
        ("foo/bar", "foo[/]bar", "0 0 1 1"),
        ("foo/bar", "foo[^a-z]bar", "0 0 1 1"),
        ("ab/cXd/efXg/hi", "*Xg*i", "0 0 1 1"),
    ];
    for &(text, pattern, expect) in cases {
        assert_eq!(
            match_variants(text, pattern),
            expect,
            "text={text:?} pattern={pattern:?}"
        );
    }
}

#[test]
fn wildmatch_casefold() {
    let cases: &[(&str, &str, &str)] = &[
        ("a", "[A-Z]", "0 1 0 1"),
        ("A", "[A-Z]", "1 1 1 1"),
        ("A", "[a-z]", "0 1 0 1"),
        ("a", "[a-z]", "1 1 1 1"),
        ("a", "[[:upper:]]", "0 1 0 1"),
        ("A", "[[:upper:]]", "1 1 1 1"),
        ("A", "[[:lower:]]", "0 1 0 1"),
        ("a", "[[:lower:]]", "1 1 1 1"),
        ("A", "[B-Za]", "0 1 0 1"),
        ("a", "[B-Za]", "1 1 1 1"),
        ("A", "[B-a]", "0 1 0 1"),
        ("a", "[B-a]", "1 1 1 1"),
        ("z", "[Z-y]", "0 1 0 1"),
        ("Z", "[Z-y]", "1 1 1 1"),
        ("FOO", "foo", "0 1 0 1"),
    ];
    for &(text, pattern, expect) in cases {
        assert_eq!(
            match_variants(text, pattern),
            expect,
            "text={text:?} pattern={pattern:?}"
        );
    }
}

#[test]
fn lone_stars() {
    for text in ["", "foo", "foo/bar", "a/b/c"] {
        // `**` matches everything, `*` everything within one path segment
        assert!(wildmatch("**", text, MatchFlag::PATHNAME).is_match());
        assert!(wildmatch("**", text, MatchFlag::empty()).is_match());
        assert!(wildmatch("*", text, MatchFlag::empty()).is_match());
        assert_eq!(
            wildmatch("*", text, MatchFlag::PATHNAME).is_match(),
            !text.contains('/'),
            "text={text:?}"
        );
    }
}

#[test]
fn malformed_patterns_are_reported() {
    // a trailing backslash is broken whether the text still has characters or not
    assert_eq!(wildmatch(r"foo\", "foo", MatchFlag::PATHNAME), MatchOutcome::Malformed);
    assert_eq!(wildmatch(r"foo\", "fooX", MatchFlag::PATHNAME), MatchOutcome::Malformed);
    assert_eq!(wildmatch(r"\", "", MatchFlag::PATHNAME), MatchOutcome::Malformed);
    assert_eq!(wildmatch(r"\", "", MatchFlag::empty()), MatchOutcome::Malformed);
    assert_eq!(wildmatch("foo[ab", "fooa", MatchFlag::PATHNAME), MatchOutcome::Malformed);
    assert_eq!(wildmatch("a**b", "ab", MatchFlag::PATHNAME), MatchOutcome::Malformed);
    // without PATHNAME, `**` is just `*`
    assert_eq!(wildmatch("a**b", "ab", MatchFlag::empty()), MatchOutcome::Match);

    assert_eq!(check_syntax("*.log"), Ok(()));
    assert_eq!(check_syntax("**"), Ok(()));
    assert_eq!(check_syntax("**/bar"), Ok(()));
    assert_eq!(check_syntax("foo/**"), Ok(()));
    assert_eq!(check_syntax("foo/**/bar"), Ok(()));
    assert_eq!(check_syntax("a[b-d]e"), Ok(()));
    assert_eq!(check_syntax("a[]]b"), Ok(()));
    assert_eq!(check_syntax("[[:digit:]]"), Ok(()));
    assert_eq!(check_syntax("[[:digit]ab]"), Ok(()));
    assert_eq!(check_syntax(r"foo\"), Err(MalformedGlob::TrailingBackslash));
    assert_eq!(check_syntax("foo[ab"), Err(MalformedGlob::UnclosedClass(3)));
    assert_eq!(check_syntax("a[]b"), Err(MalformedGlob::UnclosedClass(1)));
    assert_eq!(
        check_syntax("[[:spaci:]]"),
        Err(MalformedGlob::UnknownClassName(1))
    );
    // `**` stuck to anything but a slash never matches a path, so it is flagged too
    assert_eq!(
        check_syntax("a**b"),
        Err(MalformedGlob::UndelimitedStarStar(1))
    );
    assert_eq!(
        check_syntax("**foo"),
        Err(MalformedGlob::UndelimitedStarStar(0))
    );
    assert_eq!(
        check_syntax("foo/**bar"),
        Err(MalformedGlob::UndelimitedStarStar(4))
    );
}

#[test]
fn recursion_ceiling_is_malformed_not_a_crash() {
    // every `*a` pair nests one level deeper, so this exceeds the ceiling
    let pattern = "*a".repeat(1500);
    let text = "a".repeat(2000);
    assert_eq!(
        wildmatch(&pattern, &text, MatchFlag::PATHNAME),
        MatchOutcome::Malformed
    );
}
