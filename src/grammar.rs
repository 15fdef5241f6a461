//! The dbkey grammar used to split an interwiki dbkey into its language, wiki,
//! and article parts.
//!
//! A farm dbkey has the form:
//!
//! ```text
//! [subprefix_]lang.wiki:Article_path
//! ^^^^^^^^^^^ ^^^^ ^^^^ ^^^^^^^^^^^^
//!   optional   opt  req   optional
//! ```
//!
//! Separators after the subprefix and before the article are any run of
//! underscores and colons.

use regex::{Regex, RegexBuilder};

/// The result of a successful decomposition.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchResult<'a> {
    /// The language code, lowercased. Empty if the dbkey had no language
    /// segment.
    pub language: String,
    /// The wiki key, lowercased. Never empty.
    pub wiki: String,
    /// The remainder of the dbkey after the wiki key and separator. Not case
    /// normalised.
    pub article: &'a str,
}

/// A compiled dbkey grammar for one subprefix.
#[derive(Clone, Debug)]
pub struct Grammar {
    /// The anchored pattern.
    pattern: Regex,
}

impl Grammar {
    /// Compiles the grammar for the given literal `subprefix`. An empty
    /// subprefix produces a grammar with no subprefix segment at all.
    pub fn new(subprefix: &str) -> Result<Self, regex::Error> {
        let subprefix = if subprefix.is_empty() {
            String::new()
        } else {
            format!("{}[_:]+", regex::escape(subprefix))
        };

        let pattern = RegexBuilder::new(&format!(
            r"^{subprefix}(?:((?-u:[a-z\-]){{2,12}})\.)?((?-u:[a-z0-9\-]){{1,50}})(?:[_:]+(.*))?$"
        ))
        .case_insensitive(true)
        .build()?;

        Ok(Self { pattern })
    }

    /// Decomposes `db_key` into its language, wiki, and article parts.
    ///
    /// Returns `None` if `db_key` is empty or does not match the grammar.
    pub fn decompose<'a>(&self, db_key: &'a str) -> Option<MatchResult<'a>> {
        if db_key.is_empty() {
            return None;
        }

        let captures = self.pattern.captures(db_key)?;
        let language = captures
            .get(1)
            .map_or_else(String::new, |m| m.as_str().to_ascii_lowercase());
        let wiki = captures.get(2)?.as_str().to_ascii_lowercase();
        let article = captures.get(3).map_or("", |m| m.as_str());

        Some(MatchResult {
            language,
            wiki,
            article,
        })
    }
}

/// Decomposes `db_key` using a one-off grammar for `subprefix`.
///
/// Rules compile their grammar once when they are loaded; this is for callers
/// that only have a subprefix string.
pub fn decompose<'a>(db_key: &'a str, subprefix: &str) -> Option<MatchResult<'a>> {
    match Grammar::new(subprefix) {
        Ok(grammar) => grammar.decompose(db_key),
        Err(err) => {
            log::warn!("could not compile grammar for subprefix '{subprefix}': {err}");
            None
        }
    }
}
