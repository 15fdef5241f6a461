//! Interwiki dispatcher configuration.
//!
//! Rules are configured per farm as a JSON object which maps each farm name to
//! its rule. The order of the object is the order that rules are tried in.
//!
//! ```json
//! {
//!     "acme": {
//!         "interwiki": "acme",
//!         "url": "https://$2.acme.example/wiki/$1",
//!         "urlInt": "https://$2.acme.example/$3/wiki/$1",
//!         "dbname": "$2wiki",
//!         "dbnameInt": "$3$2wiki"
//!     }
//! }
//! ```
//!
//! The known wikis are read from a dblist, which is a text file with one
//! database identifier per line.

use crate::{
    exists::KnownWikis,
    rule::{self, Rule, RuleSource},
};
use indexmap::IndexMap;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

/// The result type for configuration operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors that may occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred reading a configuration file.
    #[error("{1}: I/O error: {0}")]
    Io(#[source] std::io::Error, PathBuf),

    /// The rule file is not valid JSON, or a rule is missing a required field.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A rule is invalid.
    #[error(transparent)]
    Rule(#[from] rule::Error),
}

/// An ordered list of validated rules.
#[derive(Debug, Default)]
pub struct RuleSet(Vec<Rule>);

impl core::ops::Deref for RuleSet {
    type Target = [Rule];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl RuleSet {
    /// Validates a list of farm rules, in order.
    pub fn new<I, S>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, RuleSource)>,
        S: Into<String>,
    {
        let rules = sources
            .into_iter()
            .map(|(name, source)| Rule::new(name, source))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashMap::new();
        for rule in &rules {
            if let Some(first) = seen.insert(rule.interwiki.as_str(), rule.name()) {
                log::warn!(
                    "{}: interwiki '{}' is already used by {first}; this rule will never be used",
                    rule.name(),
                    rule.interwiki
                );
                seen.insert(rule.interwiki.as_str(), first);
            }
        }

        Ok(Self(rules))
    }

    /// Loads rules from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let sources = serde_json::from_str::<IndexMap<String, RuleSource>>(json)?;
        Self::new(sources)
    }

    /// Loads rules from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| Error::Io(err, path.into()))?;
        let rules = Self::from_json(&json)?;
        log::info!("loaded {} interwiki rules from {}", rules.len(), path.display());
        Ok(rules)
    }
}

impl KnownWikis {
    /// Parses a dblist.
    ///
    /// Lines are trimmed. Empty lines and lines starting with `#` are ignored.
    pub fn from_dblist(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    /// Loads a dblist file.
    pub fn from_dblist_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| Error::Io(err, path.into()))?;
        let known = Self::from_dblist(&text);
        log::info!("loaded {} known wikis from {}", known.len(), path.display());
        Ok(known)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_kept() {
        let rules = RuleSet::from_json(
            r#"{
                "zeta": { "interwiki": "z", "url": "https://$2.z.example/$1" },
                "alpha": {
                    "interwiki": "a",
                    "subprefix": "fb",
                    "baseTransOnly": true,
                    "url": "https://$2.a.example/$1",
                    "urlInt": "https://$2.a.example/$3/$1",
                    "dbname": "$2wiki",
                    "dbnameInt": "$3$2wiki",
                    "wikiExistsCallback": "ignored"
                }
            }"#,
        )
        .unwrap();

        let names = rules.iter().map(Rule::name).collect::<Vec<_>>();
        assert_eq!(names, ["zeta", "alpha"]);

        let alpha = &rules[1];
        assert_eq!(alpha.interwiki, "a");
        assert_eq!(alpha.subprefix, "fb");
        assert!(alpha.base_trans_only);
        assert_eq!(alpha.url_int.as_deref(), Some("https://$2.a.example/$3/$1"));
        assert_eq!(alpha.dbname.as_deref(), Some("$2wiki"));
        assert_eq!(alpha.dbname_int.as_deref(), Some("$3$2wiki"));

        let zeta = &rules[0];
        assert_eq!(zeta.subprefix, "");
        assert!(!zeta.base_trans_only);
        assert_eq!(zeta.url_int, None);
        assert_eq!(zeta.dbname, None);
    }

    #[test]
    fn missing_url() {
        let err = RuleSet::from_json(r#"{ "acme": { "interwiki": "acme" } }"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)), "{err}");

        let err =
            RuleSet::from_json(r#"{ "acme": { "interwiki": "acme", "url": "" } }"#).unwrap_err();
        assert!(matches!(err, Error::Rule(rule::Error::MissingUrl(ref name)) if name == "acme"));
        assert_eq!(err.to_string(), "acme: missing url template");
    }

    #[test]
    fn bad_json() {
        assert!(matches!(
            RuleSet::from_json("[]").unwrap_err(),
            Error::Json(_)
        ));
    }

    #[test]
    fn duplicate_interwiki() {
        let _ = env_logger::try_init();
        let rules = RuleSet::from_json(
            r#"{
                "first": { "interwiki": "farm", "url": "https://one.example/$1" },
                "second": { "interwiki": "farm", "url": "https://two.example/$1" }
            }"#,
        )
        .unwrap();
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn missing_file() {
        let err = RuleSet::from_file("/nonexistent/rules.json").unwrap_err();
        assert!(matches!(err, Error::Io(_, ref path) if path == Path::new("/nonexistent/rules.json")));
    }

    #[test]
    fn dblist() {
        let known = KnownWikis::from_dblist("# farm wikis\nacmewiki\n\n  enotherwiki  \r\n#oldwiki\n");
        assert_eq!(known.len(), 2);
        assert!(known.contains("acmewiki"));
        assert!(known.contains("enotherwiki"));
        assert!(!known.contains("oldwiki"));
    }
}
