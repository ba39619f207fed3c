//! Exclusion file pattern matching.
//!
//! This implements `git`'s glob matching from `wildmatch.c` along with the `.gitignore`
//! style pattern semantics built on top of it: negation with `!`, directory-only patterns
//! with a trailing slash, base name matching for patterns without slashes, and the rule
//! that an excluded directory excludes everything inside it.
//!
//! The usual entry point is [`ExcludeList`] for parsing a file's lines, combined into an
//! [`ExclusionResolver`] to get a [`Verdict`] per path:
//!
//! ```
//! # use dotignore::*;
//! let gitignore = ExcludeList::from_lines(
//!     ".gitignore",
//!     [
//!         "# build output",
//!         "target/",
//!         "*.log",
//!         "!important.log",
//!     ],
//!     0,
//! );
//!
//! let resolver = ExclusionResolver::new([gitignore]);
//!
//! assert_eq!(resolver.resolve("src/main.rs", false), Verdict::Included);
//! assert_eq!(resolver.resolve("debug.log", false), Verdict::Excluded);
//! assert_eq!(resolver.resolve("important.log", false), Verdict::Included);
//! assert_eq!(resolver.resolve("target", true), Verdict::Excluded);
//!
//! // negations do not reach into excluded directories:
//! assert_eq!(resolver.resolve("target/important.log", false), Verdict::Excluded);
//! ```
//!
//! The underlying glob matcher is available directly as [`wildmatch()`] for matching a
//! single pattern against a single text.

mod exclude_list;
mod pattern;
mod wildmatch;

#[doc(inline)]
pub use exclude_list::{ExcludeList, ExclusionResolver, Verdict};

#[doc(inline)]
pub use pattern::{ExcludeFlag, ExcludePattern, InvalidPattern};

#[doc(inline)]
pub use wildmatch::{check_syntax, wildmatch, MalformedGlob, MatchFlag, MatchOutcome};
