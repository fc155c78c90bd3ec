//! Function signatures read from JSDoc `@param` and `@returns` tags.

use rustc_hash::FxHashMap;

use crate::annotations::FunctionTags;
use crate::types::SemanticType;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamSignature {
    pub name: String,
    /// Lower-cased type text from the tag
    pub declared_type: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: String,
    pub params: Vec<ParamSignature>,
    pub return_type: Option<SemanticType>,
}

impl FunctionSignature {
    pub fn from_tags(name: impl Into<String>, tags: FunctionTags) -> Self {
        FunctionSignature {
            name: name.into(),
            params: tags
                .params
                .into_iter()
                .map(|(name, declared_type)| ParamSignature {
                    name,
                    declared_type,
                })
                .collect(),
            return_type: tags.returns.as_deref().map(SemanticType::from_declared),
        }
    }
}

/// Signatures of the functions declared in one file, keyed by name.
#[derive(Debug, Default)]
pub struct SignatureRegistry {
    signatures: FxHashMap<String, FunctionSignature>,
}

impl SignatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a signature. A later function with the same name replaces
    /// the earlier one.
    pub fn register(&mut self, signature: FunctionSignature) {
        self.signatures.insert(signature.name.clone(), signature);
    }

    pub fn get(&self, name: &str) -> Option<&FunctionSignature> {
        self.signatures.get(name)
    }

    pub fn return_type(&self, name: &str) -> Option<&SemanticType> {
        self.get(name)?.return_type.as_ref()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
