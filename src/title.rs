//! Types and functions for interwiki title strings.

use std::borrow::Cow;

/// A title which has already been classified as belonging to an interwiki.
#[derive(Clone, Debug, Eq)]
pub struct Title {
    /// The location of the interwiki delimiter in the title.
    ///
    /// ```text
    /// Interwiki:Namespace:Db_key
    ///          ^
    /// ```
    iw_delimiter: usize,

    /// The location of the namespace delimiter in the title, if one exists.
    ///
    /// ```text
    /// Interwiki:Namespace:Db_key
    ///                    ^
    /// ```
    ns_delimiter: Option<usize>,

    /// The full title text.
    text: String,
}

impl PartialEq for Title {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Title {
    /// Creates a title from an already-classified interwiki prefix, namespace
    /// text, and dbkey.
    ///
    /// All three parts are stored exactly as given. Callers holding raw user
    /// input should use [`Title::new`] instead.
    pub fn from_parts(interwiki: &str, namespace: &str, db_key: &str) -> Self {
        let mut text = String::with_capacity(interwiki.len() + namespace.len() + db_key.len() + 2);
        text.push_str(interwiki);
        text.push(':');
        let iw_delimiter = interwiki.len();

        let ns_delimiter = (!namespace.is_empty()).then(|| {
            text.push_str(namespace);
            text.push(':');
            text.len() - 1
        });

        text.push_str(db_key);

        Self {
            iw_delimiter,
            ns_delimiter,
            text,
        }
    }

    /// Creates a new [`Title`] from `interwiki:rest` text, with the given
    /// namespace text.
    ///
    /// Everything before the first colon is taken as the interwiki prefix,
    /// which is trimmed and lowercased. Text without any colon has an empty
    /// prefix, which no rule matches. The namespace and key are normalised
    /// into dbkey form.
    pub fn new(text: &str, namespace: &str) -> Self {
        let (interwiki, db_key) = text.split_once(':').unwrap_or(("", text));
        Self::from_parts(
            &interwiki.trim().to_lowercase(),
            &db_key_normalize(namespace),
            &db_key_normalize(db_key),
        )
    }

    /// The title interwiki prefix.
    ///
    /// ```text
    /// Interwiki:Namespace:Db_key
    /// ^^^^^^^^^
    /// ```
    pub fn interwiki(&self) -> &str {
        &self.text[..self.iw_delimiter]
    }

    /// The namespace text, or an empty string if there is none.
    ///
    /// ```text
    /// Interwiki:Namespace:Db_key
    ///           ^^^^^^^^^
    /// ```
    pub fn namespace(&self) -> &str {
        self.ns_delimiter
            .map_or("", |end_at| &self.text[self.iw_delimiter + 1..end_at])
    }

    /// The dbkey, which is everything after the interwiki prefix and
    /// namespace.
    ///
    /// ```text
    /// Interwiki:Namespace:Db_key
    ///                     ^^^^^^
    /// ```
    pub fn db_key(&self) -> &str {
        let start_at = self.ns_delimiter.unwrap_or(self.iw_delimiter) + 1;
        &self.text[start_at..]
    }

    /// The full text of the title.
    ///
    /// ```text
    /// Interwiki:Namespace:Db_key
    /// ^^^^^^^^^^^^^^^^^^^^^^^^^^
    /// ```
    pub fn full_text(&self) -> &str {
        &self.text
    }
}

impl core::fmt::Display for Title {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Returns true if the given character `c` is a bidirectional text control
/// character.
fn bidi(c: char) -> bool {
    ('\u{200e}'..='\u{200f}').contains(&c) || ('\u{202a}'..='\u{202e}').contains(&c)
}

/// Normalises title text into dbkey form by converting runs of whitespace and
/// underscores to a single underscore.
///
/// Leading and trailing whitespace is trimmed, and bidi markers are dropped.
pub fn db_key_normalize(text: &str) -> Cow<'_, str> {
    let trimmed = text.trim_matches(trimmable);
    let is_clean = {
        let mut last_was_space = false;
        trimmed.chars().all(|c| {
            let ok = !bidi(c) && (c == '_' || !c.is_whitespace()) && !(last_was_space && c == '_');
            last_was_space = c == '_';
            ok
        })
    };

    if is_clean {
        return Cow::Borrowed(trimmed);
    }

    let mut out = String::with_capacity(trimmed.len());
    let mut iter = trimmed.chars().peekable();
    while let Some(c) = iter.next() {
        if bidi(c) {
            continue;
        } else if spacelike(c) {
            while iter.next_if(|c| trimmable(*c)).is_some() {}
            out.push('_');
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Returns true if the character `c` is considered like whitespace in title
/// text.
fn spacelike(c: char) -> bool {
    c == '_' || c.is_whitespace()
}

/// Returns true if the character `c` is trimmable in title text.
fn trimmable(c: char) -> bool {
    bidi(c) || spacelike(c)
}
