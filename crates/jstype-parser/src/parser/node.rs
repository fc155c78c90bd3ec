//! AST node types.
//!
//! Every node is a `Node` header (source span) plus a `NodeData` variant.
//! The set of variants is closed: consumers match on it exhaustively or
//! fall back explicitly.

use super::base::{NodeIndex, NodeList};
use jstype_scanner::SyntaxKind;
use serde::Serialize;

/// A node: byte span of its tokens (trivia excluded) plus its data.
#[derive(Clone, Debug, Serialize)]
pub struct Node {
    /// Start of the node's first token
    pub pos: u32,
    /// End of the node's last token
    pub end: u32,
    pub data: NodeData,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MethodKind {
    Method,
    Getter,
    Setter,
    Constructor,
}

// =============================================================================
// Data pools
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct SourceFileData {
    pub statements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct IdentifierData {
    pub escaped_text: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct LiteralData {
    /// Cooked text for strings, raw text otherwise
    pub text: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct TemplateExprData {
    pub head: String,
    /// Substitution expressions, in order
    pub spans: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct TaggedTemplateData {
    pub tag: NodeIndex,
    pub template: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct VariableData {
    pub kind: VariableKind,
    pub declarations: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct VariableDeclarationData {
    /// Identifier or binding pattern
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct FunctionData {
    /// `NONE` for anonymous functions and arrows
    pub name: NodeIndex,
    pub parameters: NodeList,
    /// Block, or an expression for concise arrow bodies
    pub body: NodeIndex,
    pub is_async: bool,
    pub is_generator: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParameterData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
    pub is_rest: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ClassData {
    pub name: NodeIndex,
    pub heritage: NodeIndex,
    pub members: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct MethodDeclData {
    pub name: NodeIndex,
    pub kind: MethodKind,
    pub is_static: bool,
    /// A `FunctionExpression` node holding parameters and body
    pub function: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct PropertyDeclData {
    pub name: NodeIndex,
    pub is_static: bool,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct IfStatementData {
    pub expression: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ForData {
    pub initializer: NodeIndex,
    pub condition: NodeIndex,
    pub incrementor: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ForInOfData {
    pub is_of: bool,
    pub is_await: bool,
    pub initializer: NodeIndex,
    pub expression: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoopData {
    pub condition: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReturnData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct JumpData {
    pub label: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct TryData {
    pub try_block: NodeIndex,
    pub catch_clause: NodeIndex,
    pub finally_block: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct CatchClauseData {
    pub variable: NodeIndex,
    pub block: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct SwitchData {
    pub expression: NodeIndex,
    pub clauses: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct CaseClauseData {
    /// `NONE` for `default:`
    pub expression: NodeIndex,
    pub statements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct LabeledData {
    pub label: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ImportDeclData {
    /// Default binding, namespace binding and named specifiers
    pub bindings: NodeList,
    pub module_specifier: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExportDeclData {
    /// Exported declaration or default expression
    pub declaration: NodeIndex,
    pub specifiers: NodeList,
    pub module_specifier: NodeIndex,
    pub is_default: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct SpecifierData {
    pub property_name: NodeIndex,
    pub name: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct BindingPatternData {
    pub elements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct BindingElementData {
    pub property_name: NodeIndex,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
    pub is_rest: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct LiteralExprData {
    pub elements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct PropertyAssignmentData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ShorthandPropertyData {
    pub name: NodeIndex,
    /// Default value in a destructuring target (`{ a = 1 } = o`)
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ComputedPropertyData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct SpreadData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub arguments: NodeList,
    pub optional: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    /// Property name node or element expression
    pub name_or_argument: NodeIndex,
    pub optional: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: SyntaxKind,
    pub right: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct UnaryExprData {
    pub operator: SyntaxKind,
    pub operand: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParenthesizedData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct YieldData {
    pub expression: NodeIndex,
    pub delegate: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct MetaPropertyData {
    pub keyword: SyntaxKind,
    pub name: NodeIndex,
}

// =============================================================================
// JSX
// =============================================================================

/// `<tag attrs>children</tag>` or `<tag attrs />`
#[derive(Clone, Debug, Serialize)]
pub struct JsxElementData {
    /// Identifier, `a.b` access or `ns:name`
    pub tag_name: NodeIndex,
    pub attributes: NodeList,
    pub children: NodeList,
    pub self_closing: bool,
}

/// `<>children</>`
#[derive(Clone, Debug, Serialize)]
pub struct JsxFragmentData {
    pub children: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct JsxAttributeData {
    pub name: NodeIndex,
    /// String literal, `{expression}` or element; NONE for a bare name
    pub initializer: NodeIndex,
}

/// `{expression}` in an attribute or among children; `{...expression}`
/// in children when `dot_dot_dot_token` is set
#[derive(Clone, Debug, Serialize)]
pub struct JsxExpressionData {
    pub dot_dot_dot_token: bool,
    /// NONE for an empty `{}` child
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct JsxNamespacedNameData {
    pub namespace: NodeIndex,
    pub name: NodeIndex,
}

// =============================================================================
// Node data
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub enum NodeData {
    SourceFile(SourceFileData),

    // Statements
    VariableStatement(VariableData),
    VariableDeclaration(VariableDeclarationData),
    FunctionDeclaration(FunctionData),
    ClassDeclaration(ClassData),
    Block(BlockData),
    ExpressionStatement(ExprStatementData),
    IfStatement(IfStatementData),
    ForStatement(ForData),
    ForInOfStatement(ForInOfData),
    WhileStatement(LoopData),
    DoStatement(LoopData),
    ReturnStatement(ReturnData),
    ThrowStatement(ReturnData),
    BreakStatement(JumpData),
    ContinueStatement(JumpData),
    TryStatement(TryData),
    CatchClause(CatchClauseData),
    SwitchStatement(SwitchData),
    CaseClause(CaseClauseData),
    LabeledStatement(LabeledData),
    ImportDeclaration(ImportDeclData),
    ExportDeclaration(ExportDeclData),
    ImportSpecifier(SpecifierData),
    ExportSpecifier(SpecifierData),
    NamespaceImport(SpecifierData),
    EmptyStatement,
    DebuggerStatement,

    // Class members
    MethodDeclaration(MethodDeclData),
    PropertyDeclaration(PropertyDeclData),
    StaticBlock(BlockData),

    // Bindings
    Parameter(ParameterData),
    ObjectBindingPattern(BindingPatternData),
    ArrayBindingPattern(BindingPatternData),
    BindingElement(BindingElementData),

    // Names and literals
    Identifier(IdentifierData),
    PrivateIdentifier(IdentifierData),
    StringLiteral(LiteralData),
    NumericLiteral(LiteralData),
    BigIntLiteral(LiteralData),
    RegularExpressionLiteral(LiteralData),
    NoSubstitutionTemplateLiteral(LiteralData),
    TemplateExpression(TemplateExprData),
    TaggedTemplateExpression(TaggedTemplateData),
    TrueKeyword,
    FalseKeyword,
    NullKeyword,
    ThisKeyword,
    SuperKeyword,

    // Expressions
    ArrayLiteralExpression(LiteralExprData),
    ObjectLiteralExpression(LiteralExprData),
    PropertyAssignment(PropertyAssignmentData),
    ShorthandPropertyAssignment(ShorthandPropertyData),
    ComputedPropertyName(ComputedPropertyData),
    SpreadElement(SpreadData),
    OmittedExpression,
    FunctionExpression(FunctionData),
    ArrowFunction(FunctionData),
    ClassExpression(ClassData),
    CallExpression(CallExprData),
    NewExpression(CallExprData),
    PropertyAccessExpression(AccessExprData),
    ElementAccessExpression(AccessExprData),
    /// Assignment operators (`=`, `+=`, ...) on `left`
    AssignmentExpression(BinaryExprData),
    /// Every other binary operator, including the comma operator
    BinaryExpression(BinaryExprData),
    /// `!x`, `-x`, `typeof x`, `void x`, `delete x`, `++x`, ...
    PrefixUnaryExpression(UnaryExprData),
    PostfixUnaryExpression(UnaryExprData),
    AwaitExpression(ParenthesizedData),
    YieldExpression(YieldData),
    ConditionalExpression(ConditionalExprData),
    ParenthesizedExpression(ParenthesizedData),
    MetaProperty(MetaPropertyData),
    /// `import` in `import(...)` calls
    ImportKeyword,

    // JSX
    JsxElement(JsxElementData),
    JsxFragment(JsxFragmentData),
    JsxAttribute(JsxAttributeData),
    JsxSpreadAttribute(SpreadData),
    JsxExpression(JsxExpressionData),
    /// Raw text between tags
    JsxText(LiteralData),
    JsxNamespacedName(JsxNamespacedNameData),
}

impl NodeData {
    /// Short human-readable kind name, used in logs and test failures.
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeData::SourceFile(_) => "SourceFile",
            NodeData::VariableStatement(_) => "VariableStatement",
            NodeData::VariableDeclaration(_) => "VariableDeclaration",
            NodeData::FunctionDeclaration(_) => "FunctionDeclaration",
            NodeData::ClassDeclaration(_) => "ClassDeclaration",
            NodeData::Block(_) => "Block",
            NodeData::ExpressionStatement(_) => "ExpressionStatement",
            NodeData::IfStatement(_) => "IfStatement",
            NodeData::ForStatement(_) => "ForStatement",
            NodeData::ForInOfStatement(_) => "ForInOfStatement",
            NodeData::WhileStatement(_) => "WhileStatement",
            NodeData::DoStatement(_) => "DoStatement",
            NodeData::ReturnStatement(_) => "ReturnStatement",
            NodeData::ThrowStatement(_) => "ThrowStatement",
            NodeData::BreakStatement(_) => "BreakStatement",
            NodeData::ContinueStatement(_) => "ContinueStatement",
            NodeData::TryStatement(_) => "TryStatement",
            NodeData::CatchClause(_) => "CatchClause",
            NodeData::SwitchStatement(_) => "SwitchStatement",
            NodeData::CaseClause(_) => "CaseClause",
            NodeData::LabeledStatement(_) => "LabeledStatement",
            NodeData::ImportDeclaration(_) => "ImportDeclaration",
            NodeData::ExportDeclaration(_) => "ExportDeclaration",
            NodeData::ImportSpecifier(_) => "ImportSpecifier",
            NodeData::ExportSpecifier(_) => "ExportSpecifier",
            NodeData::NamespaceImport(_) => "NamespaceImport",
            NodeData::EmptyStatement => "EmptyStatement",
            NodeData::DebuggerStatement => "DebuggerStatement",
            NodeData::MethodDeclaration(_) => "MethodDeclaration",
            NodeData::PropertyDeclaration(_) => "PropertyDeclaration",
            NodeData::StaticBlock(_) => "StaticBlock",
            NodeData::Parameter(_) => "Parameter",
            NodeData::ObjectBindingPattern(_) => "ObjectBindingPattern",
            NodeData::ArrayBindingPattern(_) => "ArrayBindingPattern",
            NodeData::BindingElement(_) => "BindingElement",
            NodeData::Identifier(_) => "Identifier",
            NodeData::PrivateIdentifier(_) => "PrivateIdentifier",
            NodeData::StringLiteral(_) => "StringLiteral",
            NodeData::NumericLiteral(_) => "NumericLiteral",
            NodeData::BigIntLiteral(_) => "BigIntLiteral",
            NodeData::RegularExpressionLiteral(_) => "RegularExpressionLiteral",
            NodeData::NoSubstitutionTemplateLiteral(_) => "NoSubstitutionTemplateLiteral",
            NodeData::TemplateExpression(_) => "TemplateExpression",
            NodeData::TaggedTemplateExpression(_) => "TaggedTemplateExpression",
            NodeData::TrueKeyword => "TrueKeyword",
            NodeData::FalseKeyword => "FalseKeyword",
            NodeData::NullKeyword => "NullKeyword",
            NodeData::ThisKeyword => "ThisKeyword",
            NodeData::SuperKeyword => "SuperKeyword",
            NodeData::ArrayLiteralExpression(_) => "ArrayLiteralExpression",
            NodeData::ObjectLiteralExpression(_) => "ObjectLiteralExpression",
            NodeData::PropertyAssignment(_) => "PropertyAssignment",
            NodeData::ShorthandPropertyAssignment(_) => "ShorthandPropertyAssignment",
            NodeData::ComputedPropertyName(_) => "ComputedPropertyName",
            NodeData::SpreadElement(_) => "SpreadElement",
            NodeData::OmittedExpression => "OmittedExpression",
            NodeData::FunctionExpression(_) => "FunctionExpression",
            NodeData::ArrowFunction(_) => "ArrowFunction",
            NodeData::ClassExpression(_) => "ClassExpression",
            NodeData::CallExpression(_) => "CallExpression",
            NodeData::NewExpression(_) => "NewExpression",
            NodeData::PropertyAccessExpression(_) => "PropertyAccessExpression",
            NodeData::ElementAccessExpression(_) => "ElementAccessExpression",
            NodeData::AssignmentExpression(_) => "AssignmentExpression",
            NodeData::BinaryExpression(_) => "BinaryExpression",
            NodeData::PrefixUnaryExpression(_) => "PrefixUnaryExpression",
            NodeData::PostfixUnaryExpression(_) => "PostfixUnaryExpression",
            NodeData::AwaitExpression(_) => "AwaitExpression",
            NodeData::YieldExpression(_) => "YieldExpression",
            NodeData::ConditionalExpression(_) => "ConditionalExpression",
            NodeData::ParenthesizedExpression(_) => "ParenthesizedExpression",
            NodeData::MetaProperty(_) => "MetaProperty",
            NodeData::ImportKeyword => "ImportKeyword",
            NodeData::JsxElement(_) => "JsxElement",
            NodeData::JsxFragment(_) => "JsxFragment",
            NodeData::JsxAttribute(_) => "JsxAttribute",
            NodeData::JsxSpreadAttribute(_) => "JsxSpreadAttribute",
            NodeData::JsxExpression(_) => "JsxExpression",
            NodeData::JsxText(_) => "JsxText",
            NodeData::JsxNamespacedName(_) => "JsxNamespacedName",
        }
    }
}
