//! Rewrites links to pages on other wikis of a wiki farm into external URLs.
//!
//! A farm interwiki title carries the sub-wiki that it points to in its
//! dbkey:
//!
//! ```text
//! farm:fb_en.acme:Main_Page
//! ^^^^ ^^ ^^ ^^^^ ^^^^^^^^^
//!  |   |  |   |   article
//!  |   |  |   wiki key
//!  |   |  language (optional)
//!  |   subprefix (per rule, optional)
//!  interwiki prefix
//! ```
//!
//! Each farm has a [`Rule`] which describes how to decompose such a dbkey,
//! how to check that the sub-wiki exists, and how to build its URL. The
//! [`resolve`] function (or a [`Dispatcher`], which supports reloading)
//! picks the rule for a title’s interwiki prefix and returns the rewritten
//! URL, or `None` if the title should be linked normally.

pub mod config;
pub mod dispatch;
pub mod exists;
pub mod grammar;
pub mod rule;
pub mod title;
pub mod url;

#[cfg(test)]
mod tests;

pub use config::RuleSet;
pub use dispatch::{Dispatcher, resolve};
pub use exists::{KnownWikis, WikiExists};
pub use grammar::{Grammar, MatchResult, decompose};
pub use rule::{Decline, Resolution, Rule, RuleSource};
pub use title::Title;
