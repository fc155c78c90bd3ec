//! Per-file binding tracker.
//!
//! Maps a variable name to the type it was declared with and the type most
//! recently inferred for it. Names are not scoped: one entry per name, and
//! the last declaration wins.

use rustc_hash::FxHashMap;

use crate::types::{Annotation, SemanticType};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    /// Annotation the name was declared with, or the type inferred for its
    /// initializer when none was written. Never changes after declaration.
    pub declared_type: SemanticType,
    /// Type of the value most recently assigned without a mismatch
    pub inferred_type: SemanticType,
    pub is_complex: bool,
}

impl Binding {
    pub fn new(name: impl Into<String>, declared: &Annotation, inferred_type: SemanticType) -> Self {
        Binding {
            name: name.into(),
            declared_type: declared.semantic_type(),
            inferred_type,
            is_complex: declared.is_complex,
        }
    }

    /// The declared type as an annotation, the context for re-checking
    /// assignments.
    pub fn declared_annotation(&self) -> Annotation {
        Annotation::parse(self.declared_type.as_str())
    }
}

#[derive(Debug, Default)]
pub struct BindingTracker {
    bindings: FxHashMap<String, Binding>,
}

impl BindingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a binding, replacing any earlier one with the same name.
    pub fn declare(&mut self, binding: Binding) {
        self.bindings.insert(binding.name.clone(), binding);
    }

    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn is_tracked(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Update the inferred type after a successful assignment.
    pub fn refresh(&mut self, name: &str, inferred_type: SemanticType) {
        if let Some(binding) = self.bindings.get_mut(name) {
            binding.inferred_type = inferred_type;
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
