//! Type inference over expression shapes.

use jstype_parser::{NodeData, NodeIndex};
use jstype_scanner::SyntaxKind;

use crate::context::CheckerContext;
use crate::types::{Annotation, SemanticType};

/// Infer the runtime shape of `expr`.
///
/// `declared` is the annotation the value is checked against, if any. An
/// array literal checked against an array-suffixed annotation echoes that
/// annotation back instead of the plain `array`.
pub fn infer_expression(
    ctx: &CheckerContext<'_>,
    expr: NodeIndex,
    declared: Option<&Annotation>,
) -> SemanticType {
    let arena = ctx.arena();
    let expr = arena.skip_parentheses(expr);
    let Some(node) = arena.get(expr) else {
        return SemanticType::Unknown;
    };

    match &node.data {
        NodeData::CallExpression(call) => {
            let callee = arena.skip_parentheses(call.expression);
            arena
                .get(callee)
                .filter(|n| matches!(n.data, NodeData::Identifier(_)))
                .and_then(|_| arena.get_identifier_text(callee))
                .and_then(|name| ctx.signatures.return_type(name))
                .cloned()
                .unwrap_or(SemanticType::Unknown)
        }
        NodeData::StringLiteral(_)
        | NodeData::NoSubstitutionTemplateLiteral(_)
        | NodeData::TemplateExpression(_) => SemanticType::String,
        NodeData::NumericLiteral(_) => SemanticType::Number,
        NodeData::TrueKeyword | NodeData::FalseKeyword => SemanticType::Boolean,
        NodeData::NullKeyword => SemanticType::Null,
        NodeData::ObjectLiteralExpression(_) => SemanticType::Object,
        NodeData::ArrayLiteralExpression(_) => declared
            .filter(|a| a.is_complex && a.array_element_type().is_some())
            .map_or(SemanticType::Array, |a| {
                SemanticType::Complex(a.declared_type.clone())
            }),
        NodeData::FunctionExpression(_) | NodeData::ArrowFunction(_) => SemanticType::Function,
        NodeData::Identifier(ident) => ctx
            .bindings
            .lookup(&ident.escaped_text)
            .map_or(SemanticType::Reference, |binding| binding.inferred_type.clone()),
        NodeData::PrefixUnaryExpression(unary) if unary.operator == SyntaxKind::VoidKeyword => {
            SemanticType::Undefined
        }
        _ => SemanticType::Unknown,
    }
}

/// Type of an array element as seen by the first-element check: only
/// literal shapes count.
pub fn literal_element_type(ctx: &CheckerContext<'_>, element: NodeIndex) -> SemanticType {
    match ctx.arena().get(element).map(|n| &n.data) {
        Some(NodeData::StringLiteral(_)) => SemanticType::String,
        Some(NodeData::NumericLiteral(_)) => SemanticType::Number,
        Some(NodeData::TrueKeyword | NodeData::FalseKeyword) => SemanticType::Boolean,
        _ => SemanticType::Unknown,
    }
}

/// Source value shown next to a mismatch: the text of a literal or the
/// name of an identifier.
pub fn display_value(ctx: &CheckerContext<'_>, expr: NodeIndex) -> Option<String> {
    let arena = ctx.arena();
    let expr = arena.skip_parentheses(expr);
    match &arena.get(expr)?.data {
        NodeData::StringLiteral(lit) | NodeData::NumericLiteral(lit) => Some(lit.text.clone()),
        NodeData::TrueKeyword => Some("true".to_string()),
        NodeData::FalseKeyword => Some("false".to_string()),
        NodeData::Identifier(ident) => Some(ident.escaped_text.clone()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/infer_tests.rs"]
mod tests;
