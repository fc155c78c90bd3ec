//! Type compatibility.
//!
//! Three rules, chosen by the shape of the declared type:
//! - a plain name matches by equality;
//! - `T[]` accepts an array whose first element is a `T` literal;
//! - `A|B|...` accepts any member.
//!
//! Other composites (`Map<K, V>`, `A&B`) never match.

use jstype_parser::{NodeData, NodeIndex};

use crate::context::CheckerContext;
use crate::infer::literal_element_type;
use crate::types::{Annotation, SemanticType};

/// Whether `inferred` satisfies `declared` for the value at `value`.
pub fn is_compatible(
    ctx: &CheckerContext<'_>,
    declared: &Annotation,
    inferred: &SemanticType,
    value: NodeIndex,
) -> bool {
    if !declared.is_complex {
        return declared.declared_type == inferred.as_str();
    }

    if let Some(element_type) = declared.array_element_type() {
        return array_matches(ctx, declared, element_type, inferred, value);
    }

    if declared.declared_type.contains('|') {
        return declared
            .declared_type
            .split('|')
            .any(|member| member.trim() == inferred.as_str());
    }

    false
}

fn array_matches(
    ctx: &CheckerContext<'_>,
    declared: &Annotation,
    element_type: &str,
    inferred: &SemanticType,
    value: NodeIndex,
) -> bool {
    if *inferred != SemanticType::Array && inferred.as_str() != declared.declared_type {
        return false;
    }

    let arena = ctx.arena();
    let Some(NodeData::ArrayLiteralExpression(array)) =
        arena.get(arena.skip_parentheses(value)).map(|n| &n.data)
    else {
        // Identifiers and calls carrying an array type have no elements to
        // look at.
        return true;
    };

    // Only the first element is inspected.
    match array.elements.first() {
        None => true,
        Some(&first) => literal_element_type(ctx, first).as_str() == element_type,
    }
}

#[cfg(test)]
#[path = "tests/compat_tests.rs"]
mod tests;
