use super::definition::{FilterDefinition, FilterSpec};
use crate::errors::Result;

/// Ordered list of every loaded filter
///
/// Entries are only ever appended, and each receives the next `load_order`
/// value. Once loading is done the registry is shared read-only by the
/// matching engine and the output router.
#[derive(Debug, Default)]
pub struct FilterRegistry {
    filters: Vec<FilterDefinition>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `spec` and append it, returning the new entry
    pub fn register(&mut self, spec: FilterSpec) -> Result<&FilterDefinition> {
        let load_order = self.filters.len();
        let definition = FilterDefinition::from_spec(spec, load_order)?;
        tracing::debug!(
            "Registered filter #{} '{}' /{}/",
            load_order,
            definition.name,
            definition.pattern.as_str()
        );
        self.filters.push(definition);
        Ok(&self.filters[load_order])
    }

    /// Compile every spec before appending any of them
    pub fn extend(&mut self, specs: Vec<FilterSpec>) -> Result<usize> {
        let base = self.filters.len();
        let compiled = specs
            .into_iter()
            .enumerate()
            .map(|(offset, spec)| FilterDefinition::from_spec(spec, base + offset))
            .collect::<Result<Vec<_>>>()?;

        let added = compiled.len();
        for definition in &compiled {
            tracing::debug!(
                "Registered filter #{} '{}' /{}/",
                definition.load_order,
                definition.name,
                definition.pattern.as_str()
            );
        }
        self.filters.extend(compiled);
        Ok(added)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterDefinition> {
        self.filters.iter()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Names shared by more than one definition, in first-seen order
    pub fn shared_names(&self) -> Vec<&str> {
        let mut shared: Vec<&str> = Vec::new();
        for (index, filter) in self.filters.iter().enumerate() {
            let name = filter.name.as_str();
            let repeated = self.filters[..index].iter().any(|f| f.name == name);
            if repeated && !shared.contains(&name) {
                shared.push(name);
            }
        }
        shared
    }
}

impl<'a> IntoIterator for &'a FilterRegistry {
    type Item = &'a FilterDefinition;
    type IntoIter = std::slice::Iter<'a, FilterDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}
