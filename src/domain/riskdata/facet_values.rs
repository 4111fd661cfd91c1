use std::collections::HashSet;

/// Distinct values of a column, kept in order of first occurrence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FacetValues {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl FacetValues {
    /// Returns `true` when the value was not present yet.
    pub fn insert(&mut self, value: &str) -> bool {
        if self.seen.contains(value) {
            return false;
        }
        self.seen.insert(value.to_string());
        self.ordered.push(value.to_string());
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.seen.contains(value)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for FacetValues {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut values = FacetValues::default();
        for value in iter {
            values.insert(value);
        }
        values
    }
}
