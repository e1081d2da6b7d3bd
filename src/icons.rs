// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Static registry mapping language names to icon references.
//!
//! The built-in registry is compiled from `icons.yaml`. Operators may load a
//! replacement document with the same shape:
//!
//! ```yaml
//! icons:
//!   Rust: https://example.com/rust.svg
//! ```
//!
//! Lookups are exact and case-sensitive; names follow GitHub's language
//! labels. Languages without an entry fall back to generated badges.

use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

use crate::error::{self, Error};

const BUILTIN_ICONS: &str = include_str!("icons.yaml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IconDocument {
    #[serde(default)]
    icons: HashMap<String, String>
}

/// Immutable mapping from language name to icon URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconRegistry {
    icons: HashMap<String, String>
}

impl IconRegistry {
    /// Returns the registry shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] or [`Error::Validation`] if the embedded
    /// document is malformed.
    ///
    /// # Example
    ///
    /// ```
    /// use lang_carousel::IconRegistry;
    ///
    /// let registry = IconRegistry::builtin()?;
    /// assert!(registry.contains("Rust"));
    /// assert!(!registry.contains("Brainfuck"));
    /// # Ok::<(), lang_carousel::Error>(())
    /// ```
    pub fn builtin() -> Result<Self, Error> {
        Self::from_yaml(BUILTIN_ICONS)
    }

    /// Parses a registry from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when the document cannot be decoded and
    /// [`Error::Validation`] when a language name or icon reference is blank.
    pub fn from_yaml(contents: &str) -> Result<Self, Error> {
        let document: IconDocument = serde_yaml::from_str(contents)?;
        let mut icons = HashMap::with_capacity(document.icons.len());

        for (language, icon) in document.icons {
            if language.trim().is_empty() {
                return Err(Error::validation("icon registry contains a blank language name"));
            }
            let icon = icon.trim();
            if icon.is_empty() {
                return Err(Error::validation(format!(
                    "icon reference for '{language}' cannot be empty"
                )));
            }
            icons.insert(language, icon.to_owned());
        }

        Ok(Self {
            icons
        })
    }

    /// Icon reference for `language`, if registered.
    pub fn icon_for(&self, language: &str) -> Option<&str> {
        self.icons.get(language).map(String::as_str)
    }

    /// Returns `true` when `language` renders as an icon.
    pub fn contains(&self, language: &str) -> bool {
        self.icons.contains_key(language)
    }

    /// Number of registered languages.
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Returns `true` when no language is registered.
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

impl<L, I> FromIterator<(L, I)> for IconRegistry
where
    L: Into<String>,
    I: Into<String>
{
    fn from_iter<T: IntoIterator<Item = (L, I)>>(iter: T) -> Self {
        Self {
            icons: iter
                .into_iter()
                .map(|(language, icon)| (language.into(), icon.into()))
                .collect()
        }
    }
}

/// Loads a registry document from `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read, in addition to the
/// errors documented on [`IconRegistry::from_yaml`].
pub fn load_icon_registry(path: &Path) -> Result<IconRegistry, Error> {
    let contents = fs::read_to_string(path).map_err(|source| error::io_error(path, source))?;
    IconRegistry::from_yaml(&contents)
}
