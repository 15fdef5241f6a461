//! Checks for whether a sub-wiki of a farm exists.

use crate::rule::Rule;
use std::collections::HashSet;

/// A predicate which reports whether a farm sub-wiki exists.
///
/// [`KnownWikis`] is the default implementation. A rule can carry its own
/// implementation, which replaces the default for that rule.
pub trait WikiExists: Send + Sync {
    /// Returns true if the sub-wiki with the given lowercased `wiki` key and
    /// `language` code (empty if there is none) exists in the farm of `rule`.
    fn wiki_exists(&self, rule: &Rule, wiki: &str, language: &str) -> bool;
}

impl<F> WikiExists for F
where
    F: Fn(&Rule, &str, &str) -> bool + Send + Sync,
{
    fn wiki_exists(&self, rule: &Rule, wiki: &str, language: &str) -> bool {
        self(rule, wiki, language)
    }
}

/// The set of database identifiers of sub-wikis known to exist.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KnownWikis(HashSet<String>);

impl KnownWikis {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `db_name` is a known database identifier.
    pub fn contains(&self, db_name: &str) -> bool {
        self.0.contains(db_name)
    }

    /// Adds a database identifier to the set.
    pub fn insert(&mut self, db_name: impl Into<String>) -> bool {
        self.0.insert(db_name.into())
    }

    /// The number of known identifiers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no known identifiers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for KnownWikis {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl WikiExists for KnownWikis {
    /// Expands the rule’s `dbname` (or `dbnameInt`, when there is a language)
    /// template and checks whether the result is a known identifier. A rule
    /// without the template is assumed to point to existing wikis.
    fn wiki_exists(&self, rule: &Rule, wiki: &str, language: &str) -> bool {
        let template = if language.is_empty() {
            rule.dbname.as_deref()
        } else {
            rule.dbname_int.as_deref()
        };

        template.is_none_or(|template| {
            let db_name = template.replace("$2", wiki).replace("$3", language);
            let exists = self.contains(&db_name);
            if !exists {
                log::trace!("{}: unknown database '{db_name}'", rule.name());
            }
            exists
        })
    }
}
