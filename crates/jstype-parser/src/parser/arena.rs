//! Node arena for AST storage.

use super::base::NodeIndex;
use super::node::{Node, NodeData};
use serde::Serialize;
use smallvec::SmallVec;

/// Arena-based storage for AST nodes.
/// Nodes are stored contiguously and referenced by index.
#[derive(Debug, Default, Serialize)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena { nodes: Vec::new() }
    }

    /// Add a node to the arena and return its index
    pub fn add(&mut self, pos: u32, end: u32, data: NodeData) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(Node { pos, end, data });
        NodeIndex(index)
    }

    /// Get a node by index
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get a mutable node by index
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    /// Text of an `Identifier` or `PrivateIdentifier` node.
    pub fn get_identifier_text(&self, index: NodeIndex) -> Option<&str> {
        match &self.get(index)?.data {
            NodeData::Identifier(ident) | NodeData::PrivateIdentifier(ident) => {
                Some(&ident.escaped_text)
            }
            _ => None,
        }
    }

    /// Skip any number of parentheses around an expression.
    pub fn skip_parentheses(&self, mut index: NodeIndex) -> NodeIndex {
        while let Some(Node {
            data: NodeData::ParenthesizedExpression(paren),
            ..
        }) = self.get(index)
        {
            index = paren.expression;
        }
        index
    }

    /// Direct children of a node, in source order.
    pub fn children(&self, index: NodeIndex) -> SmallVec<[NodeIndex; 4]> {
        let mut out = SmallVec::new();
        let Some(node) = self.get(index) else {
            return out;
        };

        let mut push = |child: NodeIndex| {
            if child.is_some() {
                out.push(child);
            }
        };

        match &node.data {
            NodeData::SourceFile(data) => data.statements.iter().copied().for_each(push),
            NodeData::VariableStatement(data) => data.declarations.iter().copied().for_each(push),
            NodeData::VariableDeclaration(data) => {
                push(data.name);
                push(data.initializer);
            }
            NodeData::FunctionDeclaration(data)
            | NodeData::FunctionExpression(data)
            | NodeData::ArrowFunction(data) => {
                push(data.name);
                data.parameters.iter().copied().for_each(&mut push);
                push(data.body);
            }
            NodeData::ClassDeclaration(data) | NodeData::ClassExpression(data) => {
                push(data.name);
                push(data.heritage);
                data.members.iter().copied().for_each(push);
            }
            NodeData::Block(data) | NodeData::StaticBlock(data) => {
                data.statements.iter().copied().for_each(push)
            }
            NodeData::ExpressionStatement(data) => push(data.expression),
            NodeData::IfStatement(data) => {
                push(data.expression);
                push(data.then_statement);
                push(data.else_statement);
            }
            NodeData::ForStatement(data) => {
                push(data.initializer);
                push(data.condition);
                push(data.incrementor);
                push(data.statement);
            }
            NodeData::ForInOfStatement(data) => {
                push(data.initializer);
                push(data.expression);
                push(data.statement);
            }
            NodeData::WhileStatement(data) => {
                push(data.condition);
                push(data.statement);
            }
            NodeData::DoStatement(data) => {
                push(data.statement);
                push(data.condition);
            }
            NodeData::ReturnStatement(data) | NodeData::ThrowStatement(data) => {
                push(data.expression)
            }
            NodeData::BreakStatement(data) | NodeData::ContinueStatement(data) => push(data.label),
            NodeData::TryStatement(data) => {
                push(data.try_block);
                push(data.catch_clause);
                push(data.finally_block);
            }
            NodeData::CatchClause(data) => {
                push(data.variable);
                push(data.block);
            }
            NodeData::SwitchStatement(data) => {
                push(data.expression);
                data.clauses.iter().copied().for_each(push);
            }
            NodeData::CaseClause(data) => {
                push(data.expression);
                data.statements.iter().copied().for_each(push);
            }
            NodeData::LabeledStatement(data) => {
                push(data.label);
                push(data.statement);
            }
            NodeData::ImportDeclaration(data) => {
                data.bindings.iter().copied().for_each(&mut push);
                push(data.module_specifier);
            }
            NodeData::ExportDeclaration(data) => {
                push(data.declaration);
                data.specifiers.iter().copied().for_each(&mut push);
                push(data.module_specifier);
            }
            NodeData::ImportSpecifier(data)
            | NodeData::ExportSpecifier(data)
            | NodeData::NamespaceImport(data) => {
                push(data.property_name);
                push(data.name);
            }
            NodeData::MethodDeclaration(data) => {
                push(data.name);
                push(data.function);
            }
            NodeData::PropertyDeclaration(data) => {
                push(data.name);
                push(data.initializer);
            }
            NodeData::Parameter(data) => {
                push(data.name);
                push(data.initializer);
            }
            NodeData::ObjectBindingPattern(data) | NodeData::ArrayBindingPattern(data) => {
                data.elements.iter().copied().for_each(push)
            }
            NodeData::BindingElement(data) => {
                push(data.property_name);
                push(data.name);
                push(data.initializer);
            }
            NodeData::TemplateExpression(data) => data.spans.iter().copied().for_each(push),
            NodeData::TaggedTemplateExpression(data) => {
                push(data.tag);
                push(data.template);
            }
            NodeData::ArrayLiteralExpression(data) | NodeData::ObjectLiteralExpression(data) => {
                data.elements.iter().copied().for_each(push)
            }
            NodeData::PropertyAssignment(data) => {
                push(data.name);
                push(data.initializer);
            }
            NodeData::ShorthandPropertyAssignment(data) => {
                push(data.name);
                push(data.initializer);
            }
            NodeData::ComputedPropertyName(data) => push(data.expression),
            NodeData::SpreadElement(data) => push(data.expression),
            NodeData::CallExpression(data) | NodeData::NewExpression(data) => {
                push(data.expression);
                data.arguments.iter().copied().for_each(&mut push);
            }
            NodeData::PropertyAccessExpression(data) | NodeData::ElementAccessExpression(data) => {
                push(data.expression);
                push(data.name_or_argument);
            }
            NodeData::AssignmentExpression(data) | NodeData::BinaryExpression(data) => {
                push(data.left);
                push(data.right);
            }
            NodeData::PrefixUnaryExpression(data) | NodeData::PostfixUnaryExpression(data) => {
                push(data.operand)
            }
            NodeData::AwaitExpression(data) | NodeData::ParenthesizedExpression(data) => {
                push(data.expression)
            }
            NodeData::YieldExpression(data) => push(data.expression),
            NodeData::ConditionalExpression(data) => {
                push(data.condition);
                push(data.when_true);
                push(data.when_false);
            }
            NodeData::MetaProperty(data) => push(data.name),
            NodeData::JsxElement(data) => {
                push(data.tag_name);
                data.attributes.iter().copied().for_each(&mut push);
                data.children.iter().copied().for_each(&mut push);
            }
            NodeData::JsxFragment(data) => data.children.iter().copied().for_each(push),
            NodeData::JsxAttribute(data) => {
                push(data.name);
                push(data.initializer);
            }
            NodeData::JsxSpreadAttribute(data) => push(data.expression),
            NodeData::JsxExpression(data) => push(data.expression),
            NodeData::JsxNamespacedName(data) => {
                push(data.namespace);
                push(data.name);
            }
            NodeData::EmptyStatement
            | NodeData::DebuggerStatement
            | NodeData::Identifier(_)
            | NodeData::PrivateIdentifier(_)
            | NodeData::StringLiteral(_)
            | NodeData::NumericLiteral(_)
            | NodeData::BigIntLiteral(_)
            | NodeData::RegularExpressionLiteral(_)
            | NodeData::NoSubstitutionTemplateLiteral(_)
            | NodeData::TrueKeyword
            | NodeData::FalseKeyword
            | NodeData::NullKeyword
            | NodeData::ThisKeyword
            | NodeData::SuperKeyword
            | NodeData::OmittedExpression
            | NodeData::JsxText(_)
            | NodeData::ImportKeyword => {}
        }
        out
    }
}
