//! Ordered, duplicate-permitting list of strings.
//!
//! Backs every list a target carries: flags, libraries, sources, objects,
//! and the tokens of a [`Command`](crate::util::process::Command).

use std::fmt;
use std::ops::Index;
use std::slice;

use crate::util::errors::{BuildError, BuildResult};

/// An ordered sequence of strings.
///
/// Indices stay stable between mutations except [`StringList::remove_at`],
/// which shifts every later element down by one. The list never deduplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringList {
    items: Vec<String>,
}

impl StringList {
    /// Create an empty list.
    pub fn new() -> Self {
        StringList { items: Vec::new() }
    }

    /// Append an item at the end.
    pub fn push(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// Remove the item at `index`, shifting later items down.
    ///
    /// Leaves the list untouched when `index` is out of range.
    pub fn remove_at(&mut self, index: usize) -> BuildResult<String> {
        if index >= self.items.len() {
            return Err(BuildError::InvalidIndex {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Index of the first item equal to `item`.
    pub fn find(&self, item: &str) -> Option<usize> {
        self.items.iter().position(|s| s == item)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.find(item).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }
}

impl Index<usize> for StringList {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.items[index]
    }
}

impl<S: Into<String>> FromIterator<S> for StringList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        StringList {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for StringList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a StringList {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for StringList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl fmt::Display for StringList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.items.join(" "))
    }
}
