use {crate::*, std::collections::BTreeMap};

/// Key / value pairs of a single `.ini` config section, ordered by key.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct IniSection(BTreeMap<String, String>);

impl IniSection {
    /// Returns the raw (maybe empty) string value at `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns an iterator over the keys in the section, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns an iterator over the key / value pairs in the section, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the previous value, if any.
    pub(crate) fn insert(&mut self, key: String, value: String) -> Option<String> {
        self.0.insert(key, value)
    }
}

/// Section name -> key -> value table built by one parse pass over an `.ini` source.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct IniTable(BTreeMap<String, IniSection>);

impl IniTable {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the raw (maybe empty) string value at `key` in `section`, if any.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|section| section.get(key))
    }

    /// Same as [`get`](#method.get), but returns an error describing the missing section or key.
    pub fn lookup(&self, section: &str, key: &str) -> Result<&str, ConfigError> {
        let values = self
            .section(section)
            .ok_or_else(|| ConfigError::SectionNotFound(section.to_owned()))?;

        values.get(key).ok_or_else(|| ConfigError::KeyNotFound {
            section: section.to_owned(),
            key: key.to_owned(),
            suggestions: values.keys().map(str::to_owned).collect(),
        })
    }

    pub fn section(&self, section: &str) -> Option<&IniSection> {
        self.0.get(section)
    }

    pub fn contains_section(&self, section: &str) -> bool {
        self.0.contains_key(section)
    }

    /// Returns an iterator over the sections, sorted by name.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &IniSection)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of sections.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Adds an empty section named `section` if it does not exist yet.
    pub(crate) fn add_section(&mut self, section: &str) {
        if !self.0.contains_key(section) {
            self.0.insert(section.to_owned(), IniSection::default());
        }
    }

    pub(crate) fn section_mut(&mut self, section: &str) -> Option<&mut IniSection> {
        self.0.get_mut(section)
    }
}
