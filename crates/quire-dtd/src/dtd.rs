use std::collections::HashMap;
use std::sync::Arc;

use crate::element::Element;
use crate::entity::Entity;
use crate::error::DtdError;

/// A registry of element and entity declarations with one document element.
///
/// Element names are looked up ASCII case-insensitively, entity names
/// exactly. Build a `Dtd` with [`add_element`](Self::add_element) and
/// [`add_entity`](Self::add_entity), check it once with
/// [`validate`](Self::validate), then share it (typically as `Arc<Dtd>`)
/// between parsers; nothing mutates it while parsing.
#[derive(Debug, Clone, Default)]
pub struct Dtd {
    root: String,
    elements: HashMap<String, Arc<Element>>,
    entities: HashMap<String, Entity>,
}

impl Dtd {
    /// Create an empty DTD whose document element is `root`.
    #[must_use]
    pub fn new(root: &str) -> Self {
        Self {
            root: root.trim().to_ascii_uppercase(),
            elements: HashMap::new(),
            entities: HashMap::new(),
        }
    }

    /// Register an element, replacing any previous declaration of the same
    /// name. Returns the replaced declaration.
    pub fn add_element(&mut self, element: Element) -> Option<Arc<Element>> {
        self.elements
            .insert(element.name().to_string(), Arc::new(element))
    }

    /// Register an entity, replacing any previous entity of the same name.
    /// Returns the replaced entity.
    pub fn add_entity(&mut self, entity: Entity) -> Option<Entity> {
        self.entities.insert(entity.name().to_string(), entity)
    }

    /// Look up an element by tag name, ignoring ASCII case.
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&Arc<Element>> {
        if name.bytes().any(|b| b.is_ascii_lowercase()) {
            self.elements.get(&name.to_ascii_uppercase())
        } else {
            self.elements.get(name)
        }
    }

    /// Look up an entity by its exact name.
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// The upper-case name of the document element.
    #[must_use]
    pub fn root_name(&self) -> &str {
        &self.root
    }

    /// The document element's declaration, if it has been registered.
    #[must_use]
    pub fn root_element(&self) -> Option<&Arc<Element>> {
        self.elements.get(&self.root)
    }

    /// All registered elements, in no particular order.
    pub fn elements(&self) -> impl Iterator<Item = &Arc<Element>> {
        self.elements.values()
    }

    /// All registered entities, in no particular order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Number of registered elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Number of registered entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Check that the root element and every name referenced from a content
    /// model, inclusion or exclusion are registered.
    ///
    /// Elements are scanned in name order, so the reported violation is the
    /// same on every run.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), DtdError> {
        if self.root_element().is_none() {
            return Err(DtdError::UndefinedRoot(self.root.clone()));
        }

        let mut names: Vec<&String> = self.elements.keys().collect();
        names.sort();

        for name in names {
            let element = &self.elements[name];
            for (role, referenced) in element.references() {
                if !self.elements.contains_key(referenced) {
                    return Err(DtdError::UndefinedReference {
                        element: element.name().to_string(),
                        referenced: referenced.to_string(),
                        role,
                    });
                }
            }
        }
        Ok(())
    }

    /// Whether [`validate`](Self::validate) succeeds.
    #[must_use]
    pub fn is_valid_dtd(&self) -> bool {
        self.validate().is_ok()
    }
}
