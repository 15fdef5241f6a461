//! URL template expansion for rewritten interwiki links.

use crate::{grammar::MatchResult, rule::Rule};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Builds the external URL for a decomposed title.
///
/// The template is the rule’s `url` when there is no language, or its
/// `urlInt` when there is one. Returns `None` if the title has a language but
/// the rule has no `urlInt`.
///
/// ```text
/// https://$2.example.org/$3/wiki/$1
///         ^^             ^^      ^^
///        wiki         language  namespace:article, encoded
/// ```
pub fn build(rule: &Rule, m: &MatchResult<'_>, namespace: &str, query: &str) -> Option<String> {
    let url = if m.language.is_empty() {
        rule.url.clone()
    } else {
        rule.url_int.as_deref()?.replace("$3", &m.language)
    };
    let url = url.replace("$2", &m.wiki);

    let url = if namespace.is_empty() {
        url.replace("$1", &url_encode(m.article).to_string())
    } else {
        let article = format!("{namespace}:{}", m.article);
        url.replace("$1", &url_encode(&article).to_string())
    };

    Some(append_query(url, query))
}

/// Appends a query string to a URL, keeping any fragment at the end.
///
/// An empty query leaves the URL unchanged.
pub fn append_query(mut url: String, query: &str) -> String {
    if query.is_empty() {
        return url;
    }

    let fragment = url.find('#').map(|index| url.split_off(index));
    url.push(if url.contains('?') { '&' } else { '?' });
    url += query;
    if let Some(fragment) = fragment {
        url.push_str(&fragment);
    }
    url
}

/// Percent-encodes an article path.
///
/// A space is encoded as `%20`, not the `+` produced by form-style encoding
/// such as PHP’s `urlencode`.
#[inline]
pub fn url_encode(input: &str) -> percent_encoding::PercentEncode<'_> {
    percent_encoding::utf8_percent_encode(input, &ALPHABET)
}

/// The alphabet of characters to percent-encode when encoding article paths.
/// Path delimiters and sub-delimiters which are safe in a path are left alone.
const ALPHABET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b';')
    .remove(b'@')
    .remove(b'$')
    .remove(b'!')
    .remove(b'*')
    .remove(b'(')
    .remove(b')')
    .remove(b',')
    .remove(b'/')
    .remove(b'~')
    .remove(b':');
