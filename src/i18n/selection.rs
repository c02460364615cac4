//! Source file selection
//!
//! A [`FileSelection`] decides which source documents make up a language
//! table and, through their short codes, which cache group the compiled
//! table belongs to.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use once_cell::sync::Lazy;
use regex::Regex;
use crate::utils::errors::{LexiconError, Result};

static CUSTOM_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]{1,64}$").expect("valid category name pattern"));

const CUSTOM_PREFIX: &str = "custom:";

/// A named category of source documents, one `<name>.yml` per language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileCategory {
    Dictionary,
    Messages,
    Sitemap,
    Misc,
    Custom { name: String },
}

impl FileCategory {
    /// Create a custom category.
    ///
    /// The name becomes both a file name and part of the cache group id, so
    /// it is restricted to 1-64 lowercase ASCII letters and digits and may
    /// not shadow a built-in category.
    pub fn custom(name: &str) -> Result<Self> {
        let name = name.trim().to_lowercase();
        if !CUSTOM_NAME.is_match(&name) {
            return Err(LexiconError::Config(format!("Invalid file category name: {:?}", name)));
        }
        if builtin(&name).is_some() {
            return Err(LexiconError::Config(format!(
                "File category name {:?} is reserved for the built-in category",
                name
            )));
        }
        Ok(FileCategory::Custom { name })
    }

    /// File stem of the source document.
    pub fn name(&self) -> &str {
        match self {
            FileCategory::Dictionary => "dictionary",
            FileCategory::Messages => "messages",
            FileCategory::Sitemap => "sitemap",
            FileCategory::Misc => "misc",
            FileCategory::Custom { name } => name,
        }
    }

    /// Segment contributed to the group id.
    ///
    /// Built-ins use fixed three-letter codes. A custom category contributes
    /// `x`, its name length as two digits, then its name, e.g. `x08glossary`.
    /// No built-in code starts with `x`, so a group id splits back into its
    /// categories in exactly one way.
    pub fn code(&self) -> Cow<'_, str> {
        match self {
            FileCategory::Dictionary => Cow::Borrowed("dkn"),
            FileCategory::Messages => Cow::Borrowed("msg"),
            FileCategory::Sitemap => Cow::Borrowed("smp"),
            FileCategory::Misc => Cow::Borrowed("msc"),
            FileCategory::Custom { name } => Cow::Owned(format!("x{:02}{}", name.len(), name)),
        }
    }

    /// Source document file name, e.g. `dictionary.yml`.
    pub fn file_name(&self) -> String {
        format!("{}.yml", self.name())
    }
}

fn builtin(name: &str) -> Option<FileCategory> {
    match name {
        "dictionary" => Some(FileCategory::Dictionary),
        "messages" => Some(FileCategory::Messages),
        "sitemap" => Some(FileCategory::Sitemap),
        "misc" => Some(FileCategory::Misc),
        _ => None,
    }
}

impl FromStr for FileCategory {
    type Err = LexiconError;

    /// Parses a built-in name or `custom:<name>`.
    fn from_str(value: &str) -> Result<Self> {
        let normalized = value.trim().to_lowercase();
        if let Some(category) = builtin(&normalized) {
            return Ok(category);
        }
        match normalized.strip_prefix(CUSTOM_PREFIX) {
            Some(name) => FileCategory::custom(name),
            None => Err(LexiconError::Config(format!(
                "Unknown file category {:?} (use dictionary, messages, sitemap, misc or custom:<name>)",
                value
            ))),
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Ordered set of selected file categories.
///
/// Selecting a category twice keeps it at its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSelection {
    categories: Vec<FileCategory>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection of every built-in category.
    pub fn all() -> Self {
        Self::new().dictionary().messages().sitemap().misc()
    }

    /// Parse category names as found in configuration.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for name in names {
            selection.insert(name.as_ref().parse()?);
        }
        Ok(selection)
    }

    pub fn insert(&mut self, category: FileCategory) {
        if !self.categories.iter().any(|c| c.name() == category.name()) {
            self.categories.push(category);
        }
    }

    pub fn with(mut self, category: FileCategory) -> Self {
        self.insert(category);
        self
    }

    pub fn dictionary(self) -> Self {
        self.with(FileCategory::Dictionary)
    }

    pub fn messages(self) -> Self {
        self.with(FileCategory::Messages)
    }

    pub fn sitemap(self) -> Self {
        self.with(FileCategory::Sitemap)
    }

    pub fn misc(self) -> Self {
        self.with(FileCategory::Misc)
    }

    pub fn categories(&self) -> &[FileCategory] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Cache group id: concatenated category codes in selection order.
    pub fn group_id(&self) -> String {
        self.categories.iter().map(|category| category.code()).collect()
    }
}
