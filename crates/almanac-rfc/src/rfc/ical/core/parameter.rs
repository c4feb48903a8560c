//! iCalendar property parameters (RFC 5545 §3.2).

/// Parameter that records floating (local) time on a property value.
///
/// Internal bookkeeping only: the content-line renderer never emits it.
pub const LOCAL_TIME_MARKER: &str = "X-ALMANAC-LOCALTIME";

/// A single iCalendar parameter.
///
/// Parameters can have multiple values (e.g., `MEMBER="a","b"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values in order of appearance.
    pub values: Vec<String>,
}

impl Parameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether the parameter has the specified value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }

    /// Returns whether this parameter is internal bookkeeping that never renders.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.name == LOCAL_TIME_MARKER
    }

    /// Creates a TZID parameter.
    #[must_use]
    pub fn tzid(value: impl Into<String>) -> Self {
        Self::new(names::TZID, value)
    }

    /// Creates a VALUE parameter specifying the value type.
    #[must_use]
    pub fn value_type(type_name: impl Into<String>) -> Self {
        Self::new(names::VALUE, type_name)
    }

    /// Creates a LANGUAGE parameter.
    #[must_use]
    pub fn language(tag: impl Into<String>) -> Self {
        Self::new(names::LANGUAGE, tag)
    }
}

/// Insertion-ordered parameter set keyed by case-insensitive name.
///
/// Order is kept for byte-stable re-serialization. Equality ignores both the
/// order of parameters and the order of values within a parameter.
#[derive(Debug, Clone, Default)]
pub struct Parameters(Vec<Parameter>);

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.0.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.get(name)?.value()
    }

    /// Adds a parameter value.
    ///
    /// With `replace` the parameter is overwritten in place (keeping its
    /// position); otherwise the value is appended to an existing multi-value
    /// parameter, skipping exact duplicates.
    pub fn add(&mut self, name: &str, value: impl Into<String>, replace: bool) {
        let value = value.into();
        match self.0.iter_mut().find(|p| p.name.eq_ignore_ascii_case(name)) {
            Some(existing) if replace => existing.values = vec![value],
            Some(existing) => {
                if !existing.values.contains(&value) {
                    existing.values.push(value);
                }
            }
            None => self.0.push(Parameter::new(name, value)),
        }
    }

    /// Adds a parameter only if no parameter with that name exists yet.
    pub fn add_if_absent(&mut self, name: &str, value: impl Into<String>) {
        if !self.has_key(name) {
            self.0.push(Parameter::new(name, value));
        }
    }

    /// Inserts a whole parameter. A repeated name keeps its first position
    /// and gains the new values after the ones it already holds.
    pub fn merge(&mut self, param: Parameter) {
        if let Some(existing) = self.0.iter_mut().find(|p| p.name == param.name) {
            existing.values.extend(param.values);
        } else {
            self.0.push(param);
        }
    }

    /// Removes a parameter.
    ///
    /// With no `values` the whole parameter goes. Otherwise only the listed
    /// values (case-insensitive) are dropped, and the parameter is removed
    /// once it has none left.
    pub fn remove(&mut self, name: &str, values: &[&str]) {
        if values.is_empty() {
            self.0.retain(|p| !p.name.eq_ignore_ascii_case(name));
            return;
        }
        for param in self
            .0
            .iter_mut()
            .filter(|p| p.name.eq_ignore_ascii_case(name))
        {
            param
                .values
                .retain(|v| !values.iter().any(|r| v.eq_ignore_ascii_case(r)));
        }
        self.0
            .retain(|p| !(p.name.eq_ignore_ascii_case(name) && p.values.is_empty()));
    }

    #[must_use]
    pub fn has_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns whether parameter `key` carries `value` (case-insensitive).
    #[must_use]
    pub fn has_value(&self, key: &str, value: &str) -> bool {
        self.get(key).is_some_and(|p| p.has_value(value))
    }

    /// Returns whether the VALUE parameter is `kind`.
    #[must_use]
    pub fn is_value_kind(&self, kind: &str) -> bool {
        self.has_value(names::VALUE, kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.0.iter()
    }

    /// Iterates the parameters that render on the wire.
    pub fn renderable(&self) -> impl Iterator<Item = &Parameter> {
        self.0.iter().filter(|p| !p.is_internal())
    }
}

impl PartialEq for Parameters {
    fn eq(&self, other: &Self) -> bool {
        let mine: Vec<&Parameter> = self.renderable().collect();
        let theirs: Vec<&Parameter> = other.renderable().collect();
        let local_matches = self.has_key(LOCAL_TIME_MARKER) == other.has_key(LOCAL_TIME_MARKER);
        local_matches
            && mine.len() == theirs.len()
            && mine
                .iter()
                .all(|p| other.get(&p.name).is_some_and(|o| sorted_values(p) == sorted_values(o)))
    }
}

fn sorted_values(param: &Parameter) -> Vec<&str> {
    let mut values: Vec<&str> = param.values.iter().map(String::as_str).collect();
    values.sort_unstable();
    values
}

impl From<Vec<Parameter>> for Parameters {
    fn from(params: Vec<Parameter>) -> Self {
        Self(params)
    }
}

impl FromIterator<Parameter> for Parameters {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Common parameter names and values as constants.
pub mod names {
    pub const DISPLAY: &str = "DISPLAY";
    pub const ENCODING: &str = "ENCODING";
    pub const LANGUAGE: &str = "LANGUAGE";
    pub const TZID: &str = "TZID";
    pub const VALUE: &str = "VALUE";

    // VALUE kinds
    pub const BINARY: &str = "BINARY";
    pub const DATE: &str = "DATE";
    pub const DATE_TIME: &str = "DATE-TIME";
    pub const TEXT: &str = "TEXT";
    pub const URI: &str = "URI";

    pub const BASE64: &str = "BASE64";
    pub const BADGE: &str = "BADGE";
}
