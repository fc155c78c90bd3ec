//! Token kinds produced by the scanner.

use serde::Serialize;

#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateHead,
    TemplateMiddle,
    TemplateTail,

    // Names
    Identifier,
    PrivateIdentifier,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    QuestionQuestionToken,
    ColonToken,
    AtToken,

    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    AmpersandAmpersandEqualsToken,
    BarBarEqualsToken,
    QuestionQuestionEqualsToken,

    // JSX
    LessThanSlashToken,
    JsxText,

    // Reserved words
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,

    // Contextual keywords
    AsKeyword,
    AsyncKeyword,
    AwaitKeyword,
    FromKeyword,
    GetKeyword,
    LetKeyword,
    OfKeyword,
    SetKeyword,
    StaticKeyword,
    YieldKeyword,
}

impl SyntaxKind {
    /// Map identifier text to its keyword kind, if it is one.
    pub fn keyword_from_text(text: &str) -> Option<SyntaxKind> {
        let kind = match text {
            "break" => SyntaxKind::BreakKeyword,
            "case" => SyntaxKind::CaseKeyword,
            "catch" => SyntaxKind::CatchKeyword,
            "class" => SyntaxKind::ClassKeyword,
            "const" => SyntaxKind::ConstKeyword,
            "continue" => SyntaxKind::ContinueKeyword,
            "debugger" => SyntaxKind::DebuggerKeyword,
            "default" => SyntaxKind::DefaultKeyword,
            "delete" => SyntaxKind::DeleteKeyword,
            "do" => SyntaxKind::DoKeyword,
            "else" => SyntaxKind::ElseKeyword,
            "export" => SyntaxKind::ExportKeyword,
            "extends" => SyntaxKind::ExtendsKeyword,
            "false" => SyntaxKind::FalseKeyword,
            "finally" => SyntaxKind::FinallyKeyword,
            "for" => SyntaxKind::ForKeyword,
            "function" => SyntaxKind::FunctionKeyword,
            "if" => SyntaxKind::IfKeyword,
            "import" => SyntaxKind::ImportKeyword,
            "in" => SyntaxKind::InKeyword,
            "instanceof" => SyntaxKind::InstanceOfKeyword,
            "new" => SyntaxKind::NewKeyword,
            "null" => SyntaxKind::NullKeyword,
            "return" => SyntaxKind::ReturnKeyword,
            "super" => SyntaxKind::SuperKeyword,
            "switch" => SyntaxKind::SwitchKeyword,
            "this" => SyntaxKind::ThisKeyword,
            "throw" => SyntaxKind::ThrowKeyword,
            "true" => SyntaxKind::TrueKeyword,
            "try" => SyntaxKind::TryKeyword,
            "typeof" => SyntaxKind::TypeOfKeyword,
            "var" => SyntaxKind::VarKeyword,
            "void" => SyntaxKind::VoidKeyword,
            "while" => SyntaxKind::WhileKeyword,
            "with" => SyntaxKind::WithKeyword,
            "as" => SyntaxKind::AsKeyword,
            "async" => SyntaxKind::AsyncKeyword,
            "await" => SyntaxKind::AwaitKeyword,
            "from" => SyntaxKind::FromKeyword,
            "get" => SyntaxKind::GetKeyword,
            "let" => SyntaxKind::LetKeyword,
            "of" => SyntaxKind::OfKeyword,
            "set" => SyntaxKind::SetKeyword,
            "static" => SyntaxKind::StaticKeyword,
            "yield" => SyntaxKind::YieldKeyword,
            _ => return None,
        };
        Some(kind)
    }

    /// Keywords that can never be used as a binding or reference name.
    pub fn is_reserved_word(self) -> bool {
        (self as u16) >= (SyntaxKind::BreakKeyword as u16)
            && (self as u16) <= (SyntaxKind::WithKeyword as u16)
    }

    /// Keywords that only have meaning in certain positions and are
    /// otherwise ordinary identifiers.
    pub fn is_contextual_keyword(self) -> bool {
        (self as u16) >= (SyntaxKind::AsKeyword as u16)
            && (self as u16) <= (SyntaxKind::YieldKeyword as u16)
    }

    pub fn is_keyword(self) -> bool {
        self.is_reserved_word() || self.is_contextual_keyword()
    }

    /// Identifier or any keyword (valid as a property name).
    pub fn is_identifier_or_keyword(self) -> bool {
        self == SyntaxKind::Identifier || self.is_keyword()
    }

    pub fn is_assignment_operator(self) -> bool {
        (self as u16) >= (SyntaxKind::EqualsToken as u16)
            && (self as u16) <= (SyntaxKind::QuestionQuestionEqualsToken as u16)
    }

    pub fn is_literal(self) -> bool {
        (self as u16) >= (SyntaxKind::NumericLiteral as u16)
            && (self as u16) <= (SyntaxKind::TemplateTail as u16)
    }

    /// Binary operator precedence, higher binds tighter. `0` means the
    /// token is not a binary operator.
    ///
    /// `in` is reported here; callers that parse a `for` initializer must
    /// exclude it themselves.
    pub fn binary_precedence(self) -> u8 {
        match self {
            SyntaxKind::QuestionQuestionToken => 1,
            SyntaxKind::BarBarToken => 2,
            SyntaxKind::AmpersandAmpersandToken => 3,
            SyntaxKind::BarToken => 4,
            SyntaxKind::CaretToken => 5,
            SyntaxKind::AmpersandToken => 6,
            SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::EqualsEqualsEqualsToken
            | SyntaxKind::ExclamationEqualsEqualsToken => 7,
            SyntaxKind::LessThanToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanEqualsToken
            | SyntaxKind::InstanceOfKeyword
            | SyntaxKind::InKeyword => 8,
            SyntaxKind::LessThanLessThanToken
            | SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => 9,
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => 10,
            SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 11,
            SyntaxKind::AsteriskAsteriskToken => 12,
            _ => 0,
        }
    }

    /// Source text of punctuation and keyword tokens, for messages.
    pub fn text(self) -> &'static str {
        match self {
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::DotToken => ".",
            SyntaxKind::DotDotDotToken => "...",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::QuestionDotToken => "?.",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::LessThanEqualsToken => "<=",
            SyntaxKind::GreaterThanEqualsToken => ">=",
            SyntaxKind::EqualsEqualsToken => "==",
            SyntaxKind::ExclamationEqualsToken => "!=",
            SyntaxKind::EqualsEqualsEqualsToken => "===",
            SyntaxKind::ExclamationEqualsEqualsToken => "!==",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::AsteriskAsteriskToken => "**",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::PlusPlusToken => "++",
            SyntaxKind::MinusMinusToken => "--",
            SyntaxKind::LessThanLessThanToken => "<<",
            SyntaxKind::GreaterThanGreaterThanToken => ">>",
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => ">>>",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::BarToken => "|",
            SyntaxKind::CaretToken => "^",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::TildeToken => "~",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::BarBarToken => "||",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::QuestionQuestionToken => "??",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::AtToken => "@",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::PlusEqualsToken => "+=",
            SyntaxKind::MinusEqualsToken => "-=",
            SyntaxKind::AsteriskEqualsToken => "*=",
            SyntaxKind::AsteriskAsteriskEqualsToken => "**=",
            SyntaxKind::SlashEqualsToken => "/=",
            SyntaxKind::PercentEqualsToken => "%=",
            SyntaxKind::LessThanLessThanEqualsToken => "<<=",
            SyntaxKind::GreaterThanGreaterThanEqualsToken => ">>=",
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            SyntaxKind::AmpersandEqualsToken => "&=",
            SyntaxKind::BarEqualsToken => "|=",
            SyntaxKind::CaretEqualsToken => "^=",
            SyntaxKind::AmpersandAmpersandEqualsToken => "&&=",
            SyntaxKind::BarBarEqualsToken => "||=",
            SyntaxKind::QuestionQuestionEqualsToken => "??=",
            SyntaxKind::LessThanSlashToken => "</",
            SyntaxKind::JsxText => "JSX text",
            SyntaxKind::BreakKeyword => "break",
            SyntaxKind::CaseKeyword => "case",
            SyntaxKind::CatchKeyword => "catch",
            SyntaxKind::ClassKeyword => "class",
            SyntaxKind::ConstKeyword => "const",
            SyntaxKind::ContinueKeyword => "continue",
            SyntaxKind::DebuggerKeyword => "debugger",
            SyntaxKind::DefaultKeyword => "default",
            SyntaxKind::DeleteKeyword => "delete",
            SyntaxKind::DoKeyword => "do",
            SyntaxKind::ElseKeyword => "else",
            SyntaxKind::ExportKeyword => "export",
            SyntaxKind::ExtendsKeyword => "extends",
            SyntaxKind::FalseKeyword => "false",
            SyntaxKind::FinallyKeyword => "finally",
            SyntaxKind::ForKeyword => "for",
            SyntaxKind::FunctionKeyword => "function",
            SyntaxKind::IfKeyword => "if",
            SyntaxKind::ImportKeyword => "import",
            SyntaxKind::InKeyword => "in",
            SyntaxKind::InstanceOfKeyword => "instanceof",
            SyntaxKind::NewKeyword => "new",
            SyntaxKind::NullKeyword => "null",
            SyntaxKind::ReturnKeyword => "return",
            SyntaxKind::SuperKeyword => "super",
            SyntaxKind::SwitchKeyword => "switch",
            SyntaxKind::ThisKeyword => "this",
            SyntaxKind::ThrowKeyword => "throw",
            SyntaxKind::TrueKeyword => "true",
            SyntaxKind::TryKeyword => "try",
            SyntaxKind::TypeOfKeyword => "typeof",
            SyntaxKind::VarKeyword => "var",
            SyntaxKind::VoidKeyword => "void",
            SyntaxKind::WhileKeyword => "while",
            SyntaxKind::WithKeyword => "with",
            SyntaxKind::AsKeyword => "as",
            SyntaxKind::AsyncKeyword => "async",
            SyntaxKind::AwaitKeyword => "await",
            SyntaxKind::FromKeyword => "from",
            SyntaxKind::GetKeyword => "get",
            SyntaxKind::LetKeyword => "let",
            SyntaxKind::OfKeyword => "of",
            SyntaxKind::SetKeyword => "set",
            SyntaxKind::StaticKeyword => "static",
            SyntaxKind::YieldKeyword => "yield",
            SyntaxKind::EndOfFileToken => "end of file",
            SyntaxKind::Identifier | SyntaxKind::PrivateIdentifier => "identifier",
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => "numeric literal",
            SyntaxKind::StringLiteral => "string literal",
            SyntaxKind::RegularExpressionLiteral => "regular expression",
            SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead
            | SyntaxKind::TemplateMiddle
            | SyntaxKind::TemplateTail => "template literal",
            SyntaxKind::Unknown => "unknown token",
        }
    }
}
