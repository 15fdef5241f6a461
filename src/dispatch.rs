//! Dispatching interwiki titles to farm rules.

use crate::{config::RuleSet, exists::KnownWikis, rule::Rule, title::Title};
use arc_cell::ArcCell;
use std::sync::Arc;

/// Resolves `title` to an external URL using the first rule in `rules` whose
/// interwiki prefix is the title’s prefix.
///
/// Only that one rule is ever tried. Returns `None` if there is no such rule
/// or if it declines, in which case the caller should generate its normal
/// link.
pub fn resolve(title: &Title, query: &str, rules: &[Rule], known: &KnownWikis) -> Option<String> {
    let interwiki = title.interwiki();
    rules
        .iter()
        .find(|rule| rule.interwiki == interwiki)
        .and_then(|rule| rule.resolve(title, query, known).into_url())
}

/// A reloadable rule list.
///
/// Each resolution runs against a snapshot of the rule list, so a concurrent
/// reload never exposes a partially updated list.
pub struct Dispatcher {
    /// The current rule list.
    rules: ArcCell<RuleSet>,
}

impl Dispatcher {
    /// Creates a new dispatcher with the given rules.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules: ArcCell::new(Arc::new(rules)),
        }
    }

    /// Replaces the rule list, returning the old one.
    pub fn reload(&self, rules: RuleSet) -> Arc<RuleSet> {
        log::info!("reloaded {} interwiki rules", rules.len());
        self.rules.set(Arc::new(rules))
    }

    /// Resolves `title` to an external URL using the current rule list.
    pub fn resolve(&self, title: &Title, query: &str, known: &KnownWikis) -> Option<String> {
        resolve(title, query, &self.rules(), known)
    }

    /// Returns the current rule list.
    pub fn rules(&self) -> Arc<RuleSet> {
        self.rules.get()
    }
}

impl core::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("rules", &self.rules())
            .finish()
    }
}
