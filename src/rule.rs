//! Farm interwiki rules and single-rule resolution.

use crate::{
    exists::{KnownWikis, WikiExists},
    grammar::Grammar,
    title::Title,
    url,
};
use regex::Regex;
use std::sync::{Arc, LazyLock};

/// A rule loading error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The grammar for the rule’s subprefix failed to compile.
    #[error("{0}: bad subprefix: {1}")]
    Grammar(String, #[source] regex::Error),

    /// The rule has no interwiki prefix.
    #[error("{0}: missing interwiki prefix")]
    MissingInterwiki(String),

    /// The rule has no URL template.
    #[error("{0}: missing url template")]
    MissingUrl(String),
}

/// The raw configuration of one farm interwiki rule, as written in a rule
/// file.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct RuleSource {
    /// The interwiki prefix this rule applies to.
    pub interwiki: String,

    /// A literal prefix which must appear in front of the language and wiki
    /// key.
    #[serde(default)]
    pub subprefix: String,

    /// Whether the rule is skipped when the request asks for raw or rendered
    /// output.
    #[serde(default, rename = "baseTransOnly")]
    pub base_trans_only: bool,

    /// The URL template for titles without a language. `$1` is the article
    /// and `$2` is the wiki key.
    pub url: String,

    /// The URL template for titles with a language. As `url`, plus `$3` for
    /// the language code.
    #[serde(default, rename = "urlInt")]
    pub url_int: Option<String>,

    /// The template for the database identifier of a wiki without a language.
    #[serde(default)]
    pub dbname: Option<String>,

    /// The template for the database identifier of a wiki with a language.
    #[serde(default, rename = "dbnameInt")]
    pub dbname_int: Option<String>,
}

/// Why a rule did not rewrite a title.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decline {
    /// The rule is disabled for raw and rendered output.
    TransclusionOnly,
    /// The dbkey did not match the rule’s grammar.
    NoMatch,
    /// The sub-wiki does not exist.
    NotFound,
    /// The title has a language but the rule has no language URL template.
    NoLanguageTemplate,
}

impl core::fmt::Display for Decline {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Decline::TransclusionOnly => "transclusion only",
            Decline::NoMatch => "no match",
            Decline::NotFound => "wiki not found",
            Decline::NoLanguageTemplate => "no language url template",
        })
    }
}

/// The outcome of resolving a title against a rule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    /// The title was rewritten to this URL.
    Rewritten(String),
    /// The rule declined to rewrite the title.
    Declined(Decline),
}

impl Resolution {
    /// Returns the rewritten URL, if there is one.
    pub fn into_url(self) -> Option<String> {
        match self {
            Resolution::Rewritten(url) => Some(url),
            Resolution::Declined(_) => None,
        }
    }
}

/// A validated farm interwiki rule.
pub struct Rule {
    /// The compiled dbkey grammar.
    grammar: Grammar,
    /// The farm name, used in diagnostics.
    name: String,
    /// Rule configuration.
    source: RuleSource,
    /// An existence check replacing the default one.
    wiki_exists: Option<Arc<dyn WikiExists>>,
}

impl core::fmt::Debug for Rule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("wiki_exists", &self.wiki_exists.is_some())
            .finish_non_exhaustive()
    }
}

impl core::ops::Deref for Rule {
    type Target = RuleSource;

    fn deref(&self) -> &Self::Target {
        &self.source
    }
}

impl Rule {
    /// Validates a rule and compiles its grammar.
    pub fn new(name: impl Into<String>, source: RuleSource) -> Result<Self, Error> {
        let name = name.into();

        if source.interwiki.is_empty() {
            return Err(Error::MissingInterwiki(name));
        }

        if source.url.is_empty() {
            return Err(Error::MissingUrl(name));
        }

        if source.interwiki != source.interwiki.trim().to_lowercase() {
            log::warn!(
                "{name}: interwiki prefix '{}' is not lowercase; only exact prefixes will match",
                source.interwiki
            );
        }

        if !source.url.contains("$1") {
            log::warn!("{name}: url template has no $1; every article will share a url");
        }

        if let Some(url_int) = &source.url_int
            && !url_int.contains("$3")
        {
            log::warn!("{name}: urlInt template has no $3; languages will be dropped");
        }

        let grammar = match Grammar::new(&source.subprefix) {
            Ok(grammar) => grammar,
            Err(err) => return Err(Error::Grammar(name, err)),
        };

        Ok(Self {
            grammar,
            name,
            source,
            wiki_exists: None,
        })
    }

    /// Replaces the default existence check for this rule.
    #[must_use]
    pub fn with_wiki_exists(mut self, wiki_exists: Arc<dyn WikiExists>) -> Self {
        self.wiki_exists = Some(wiki_exists);
        self
    }

    /// The farm name of the rule.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves `title` using this rule. The caller is responsible for
    /// checking that the title’s interwiki prefix is the rule’s prefix.
    pub fn resolve(&self, title: &Title, query: &str, known: &KnownWikis) -> Resolution {
        let resolution = self.resolve_inner(title, query, known);
        match &resolution {
            Resolution::Rewritten(url) => log::debug!("{}: {title} -> {url}", self.name),
            Resolution::Declined(reason) => log::trace!("{}: {title}: {reason}", self.name),
        }
        resolution
    }

    /// Resolves `title` without logging the outcome.
    fn resolve_inner(&self, title: &Title, query: &str, known: &KnownWikis) -> Resolution {
        if self.base_trans_only && is_raw_or_render(query) {
            return Resolution::Declined(Decline::TransclusionOnly);
        }

        let Some(m) = self.grammar.decompose(title.db_key()) else {
            return Resolution::Declined(Decline::NoMatch);
        };

        let exists = match &self.wiki_exists {
            Some(wiki_exists) => wiki_exists.wiki_exists(self, &m.wiki, &m.language),
            None => known.wiki_exists(self, &m.wiki, &m.language),
        };
        if !exists {
            return Resolution::Declined(Decline::NotFound);
        }

        url::build(self, &m, title.namespace(), query).map_or(
            Resolution::Declined(Decline::NoLanguageTemplate),
            Resolution::Rewritten,
        )
    }
}

/// Returns true if the query string requests raw or rendered page output.
fn is_raw_or_render(query: &str) -> bool {
    static RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)(?:^|&)action=(?:render|raw)(?:&|$)").unwrap()
    });
    RE.is_match(query)
}
