//! Immutable description of one generation run

use serde::Serialize;

use super::attribute::AttributeSet;
use super::method::CustomMethod;
use super::naming::EntityNames;

/// Everything the generators need, fixed once collection is over
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRun {
    entity: EntityNames,
    attributes: AttributeSet,
    methods: Vec<CustomMethod>,
}

impl GenerationRun {
    /// Freeze the collected inputs
    #[must_use]
    pub const fn new(
        entity: EntityNames,
        attributes: AttributeSet,
        methods: Vec<CustomMethod>,
    ) -> Self {
        Self {
            entity,
            attributes,
            methods,
        }
    }

    /// Entity names
    #[must_use]
    pub const fn entity(&self) -> &EntityNames {
        &self.entity
    }

    /// Attributes in insertion order
    #[must_use]
    pub const fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Custom methods in collection order
    #[must_use]
    pub fn methods(&self) -> &[CustomMethod] {
        &self.methods
    }

    /// Custom methods the service layer exposes
    pub fn service_methods(&self) -> impl Iterator<Item = &CustomMethod> {
        self.methods.iter().filter(|method| method.implement_in_service)
    }

    /// Same run under a different entity name
    #[must_use]
    pub fn renamed(&self, entity: EntityNames) -> Self {
        Self {
            entity,
            attributes: self.attributes.clone(),
            methods: self.methods.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::method::ReturnType;

    #[test]
    fn test_service_methods_filter() {
        let run = GenerationRun::new(
            EntityNames::new("Post").unwrap(),
            AttributeSet::new(),
            vec![
                CustomMethod::new("published", ReturnType::Collection, "", true),
                CustomMethod::new("purge", ReturnType::Void, "", false),
            ],
        );
        let names: Vec<_> = run.service_methods().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["published"]);
        assert_eq!(run.methods().len(), 2);
    }

    #[test]
    fn test_renamed_keeps_inputs() {
        let attributes = AttributeSet::parse_all(&["title:string"]).unwrap();
        let run = GenerationRun::new(EntityNames::new("Post").unwrap(), attributes, vec![]);
        let renamed = run.renamed(EntityNames::new("Article").unwrap());
        assert_eq!(renamed.entity().table, "articles");
        assert_eq!(renamed.attributes().names(), vec!["title"]);
    }
}
