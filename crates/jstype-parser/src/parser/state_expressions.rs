//! Parser state - expression parsing methods

use super::base::{NodeIndex, NodeList};
use super::node::{
    AccessExprData, BinaryExprData, CallExprData, ComputedPropertyData, ConditionalExprData,
    FunctionData, IdentifierData, LiteralData, LiteralExprData, MetaPropertyData, MethodKind,
    NodeData, ParameterData, ParenthesizedData, PropertyAssignmentData, ShorthandPropertyData,
    SpreadData, TaggedTemplateData, TemplateExprData, UnaryExprData, YieldData,
};
use super::state::{
    CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_GENERATOR, ParserState,
};
use jstype_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Parse Methods - Core Expressions
    // =========================================================================

    /// Parse an expression, including the comma operator.
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut left = self.parse_assignment_expression();
        while left.is_some() && self.is_token(SyntaxKind::CommaToken) {
            self.next_token();
            let right = self.parse_assignment_expression();
            left = self.finish_node(
                start,
                NodeData::BinaryExpression(BinaryExprData {
                    left,
                    operator_token: SyntaxKind::CommaToken,
                    right,
                }),
            );
        }
        left
    }

    /// `parse_expression` with `in` re-enabled as an operator.
    pub(crate) fn parse_expression_allow_in(&mut self) -> NodeIndex {
        self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_expression())
    }

    fn parse_assignment_expression_allow_in(&mut self) -> NodeIndex {
        self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
            p.parse_assignment_expression()
        })
    }

    /// Parse an assignment expression: arrows, `yield`, conditionals and
    /// assignments.
    pub(crate) fn parse_assignment_expression(&mut self) -> NodeIndex {
        self.with_recursion_guard(Self::parse_assignment_expression_inner)
    }

    fn parse_assignment_expression_inner(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::YieldKeyword) && self.in_generator_context() {
            return self.parse_yield_expression();
        }
        if let Some(arrow) = self.try_parse_arrow_function() {
            return arrow;
        }

        let start = self.token_pos();
        let expr = self.parse_binary_expression(1);
        if expr.is_none() {
            return expr;
        }

        if self.is_token(SyntaxKind::QuestionToken) {
            self.next_token();
            let when_true = self.parse_assignment_expression_allow_in();
            self.parse_expected(SyntaxKind::ColonToken);
            let when_false = self.parse_assignment_expression();
            return self.finish_node(
                start,
                NodeData::ConditionalExpression(ConditionalExprData {
                    condition: expr,
                    when_true,
                    when_false,
                }),
            );
        }

        let operator = self.token();
        if operator.is_assignment_operator() {
            if !self.is_valid_assignment_target(expr, operator == SyntaxKind::EqualsToken) {
                let pos = self.arena.get(expr).map_or(start, |n| n.pos);
                self.parse_error_at(pos, 0, "Invalid left-hand side in assignment expression.");
            }
            self.next_token();
            let right = self.parse_assignment_expression();
            return self.finish_node(
                start,
                NodeData::AssignmentExpression(BinaryExprData {
                    left: expr,
                    operator_token: operator,
                    right,
                }),
            );
        }

        expr
    }

    fn is_valid_assignment_target(&self, index: NodeIndex, allow_pattern: bool) -> bool {
        match self.arena.get(index).map(|n| &n.data) {
            Some(NodeData::Identifier(_))
            | Some(NodeData::PropertyAccessExpression(_))
            | Some(NodeData::ElementAccessExpression(_)) => true,
            Some(NodeData::ObjectLiteralExpression(_))
            | Some(NodeData::ArrayLiteralExpression(_)) => allow_pattern,
            Some(NodeData::ParenthesizedExpression(paren)) => {
                self.is_valid_assignment_target(paren.expression, false)
            }
            _ => false,
        }
    }

    fn parse_yield_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let delegate = !self.has_preceding_line_break()
            && self.parse_optional(SyntaxKind::AsteriskToken);
        let expression = if !delegate
            && (self.has_preceding_line_break()
                || matches!(
                    self.token(),
                    SyntaxKind::CloseParenToken
                        | SyntaxKind::CloseBracketToken
                        | SyntaxKind::CloseBraceToken
                        | SyntaxKind::CommaToken
                        | SyntaxKind::SemicolonToken
                        | SyntaxKind::ColonToken
                        | SyntaxKind::EndOfFileToken
                )) {
            NodeIndex::NONE
        } else {
            self.parse_assignment_expression()
        };
        self.finish_node(
            start,
            NodeData::YieldExpression(YieldData {
                expression,
                delegate,
            }),
        )
    }

    /// Parse binary operators at or above `min_precedence`.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let start = self.token_pos();
        let mut left = self.parse_unary_expression();
        if left.is_none() {
            return left;
        }
        loop {
            let operator = self.token();
            let precedence = operator.binary_precedence();
            if precedence == 0 || precedence < min_precedence {
                break;
            }
            if operator == SyntaxKind::InKeyword && self.in_disallow_in_context() {
                break;
            }
            self.next_token();
            // `**` is right-associative
            let next_min = if operator == SyntaxKind::AsteriskAsteriskToken {
                precedence
            } else {
                precedence + 1
            };
            let right = self.parse_binary_expression(next_min);
            left = self.finish_node(
                start,
                NodeData::BinaryExpression(BinaryExprData {
                    left,
                    operator_token: operator,
                    right,
                }),
            );
        }
        left
    }

    fn parse_unary_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken => {
                let operator = self.token();
                self.next_token();
                let operand = self.with_recursion_guard(Self::parse_unary_expression);
                self.finish_node(
                    start,
                    NodeData::PrefixUnaryExpression(UnaryExprData { operator, operand }),
                )
            }
            SyntaxKind::AwaitKeyword if self.in_async_context() => {
                self.next_token();
                let expression = self.parse_unary_expression();
                self.finish_node(
                    start,
                    NodeData::AwaitExpression(ParenthesizedData { expression }),
                )
            }
            _ => {
                let expression = self.parse_left_hand_side_expression();
                if expression.is_some()
                    && matches!(
                        self.token(),
                        SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
                    )
                    && !self.has_preceding_line_break()
                {
                    let operator = self.token();
                    self.next_token();
                    return self.finish_node(
                        start,
                        NodeData::PostfixUnaryExpression(UnaryExprData {
                            operator,
                            operand: expression,
                        }),
                    );
                }
                expression
            }
        }
    }

    // =========================================================================
    // Member, call and new expressions
    // =========================================================================

    pub(crate) fn parse_left_hand_side_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = match self.token() {
            SyntaxKind::NewKeyword => self.parse_new_expression(),
            SyntaxKind::SuperKeyword => {
                self.next_token();
                self.finish_node(start, NodeData::SuperKeyword)
            }
            SyntaxKind::ImportKeyword => self.parse_import_expression(),
            _ => self.parse_primary_expression(),
        };
        if expression.is_none() {
            return expression;
        }
        self.parse_member_and_call_rest(start, expression, true)
    }

    /// `import(...)` or `import.meta`.
    fn parse_import_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        if self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name();
            return self.finish_node(
                start,
                NodeData::MetaProperty(MetaPropertyData {
                    keyword: SyntaxKind::ImportKeyword,
                    name,
                }),
            );
        }
        if !self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_error_at_current_token("'(' expected.");
        }
        self.finish_node(start, NodeData::ImportKeyword)
    }

    fn parse_new_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();

        if self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name();
            return self.finish_node(
                start,
                NodeData::MetaProperty(MetaPropertyData {
                    keyword: SyntaxKind::NewKeyword,
                    name,
                }),
            );
        }

        let callee_start = self.token_pos();
        let callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        if callee.is_none() {
            return callee;
        }
        let expression = self.parse_member_and_call_rest(callee_start, callee, false);

        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_arguments()
        } else {
            NodeList::new()
        };
        self.finish_node(
            start,
            NodeData::NewExpression(CallExprData {
                expression,
                arguments,
                optional: false,
            }),
        )
    }

    /// Property access, element access, calls and tagged templates
    /// following `expression`.
    fn parse_member_and_call_rest(
        &mut self,
        start: u32,
        mut expression: NodeIndex,
        allow_calls: bool,
    ) -> NodeIndex {
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = self.parse_member_name();
                    expression = self.finish_node(
                        start,
                        NodeData::PropertyAccessExpression(AccessExprData {
                            expression,
                            name_or_argument: name,
                            optional: false,
                        }),
                    );
                }
                SyntaxKind::QuestionDotToken if allow_calls => {
                    self.next_token();
                    expression = match self.token() {
                        SyntaxKind::OpenParenToken => {
                            let arguments = self.parse_arguments();
                            self.finish_node(
                                start,
                                NodeData::CallExpression(CallExprData {
                                    expression,
                                    arguments,
                                    optional: true,
                                }),
                            )
                        }
                        SyntaxKind::OpenBracketToken => {
                            let argument = self.parse_element_access_argument();
                            self.finish_node(
                                start,
                                NodeData::ElementAccessExpression(AccessExprData {
                                    expression,
                                    name_or_argument: argument,
                                    optional: true,
                                }),
                            )
                        }
                        _ => {
                            let name = self.parse_member_name();
                            self.finish_node(
                                start,
                                NodeData::PropertyAccessExpression(AccessExprData {
                                    expression,
                                    name_or_argument: name,
                                    optional: true,
                                }),
                            )
                        }
                    };
                }
                SyntaxKind::OpenBracketToken => {
                    let argument = self.parse_element_access_argument();
                    expression = self.finish_node(
                        start,
                        NodeData::ElementAccessExpression(AccessExprData {
                            expression,
                            name_or_argument: argument,
                            optional: false,
                        }),
                    );
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    let arguments = self.parse_arguments();
                    expression = self.finish_node(
                        start,
                        NodeData::CallExpression(CallExprData {
                            expression,
                            arguments,
                            optional: false,
                        }),
                    );
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    let template = self.parse_template_literal();
                    expression = self.finish_node(
                        start,
                        NodeData::TaggedTemplateExpression(TaggedTemplateData {
                            tag: expression,
                            template,
                        }),
                    );
                }
                _ => return expression,
            }
        }
    }

    /// Name after `.` or `?.`: any identifier, keyword or `#private` name.
    fn parse_member_name(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::PrivateIdentifier) {
            return self.parse_private_identifier();
        }
        if self.token().is_identifier_or_keyword() {
            return self.parse_identifier_name();
        }
        self.parse_error_at_current_token("Identifier expected.");
        NodeIndex::NONE
    }

    fn parse_private_identifier(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let escaped_text = self.scanner.token_text().to_string();
        self.next_token();
        self.finish_node(
            start,
            NodeData::PrivateIdentifier(IdentifierData { escaped_text }),
        )
    }

    fn parse_element_access_argument(&mut self) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let argument = self.parse_expression_allow_in();
        self.parse_expected(SyntaxKind::CloseBracketToken);
        argument
    }

    /// `( arg, ...spread )`
    fn parse_arguments(&mut self) -> NodeList {
        let mut arguments = NodeList::new();
        self.parse_expected(SyntaxKind::OpenParenToken);
        self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
            while !p.is_token(SyntaxKind::CloseParenToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                let argument = p.parse_spread_or_assignment_expression();
                if argument.is_none() {
                    break;
                }
                arguments.push(argument);
                if !p.is_token(SyntaxKind::CloseParenToken)
                    && !p.parse_expected(SyntaxKind::CommaToken)
                {
                    break;
                }
            }
        });
        self.parse_expected(SyntaxKind::CloseParenToken);
        arguments
    }

    fn parse_spread_or_assignment_expression(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::DotDotDotToken) {
            let start = self.token_pos();
            self.next_token();
            let expression = self.parse_assignment_expression();
            return self.finish_node(start, NodeData::SpreadElement(SpreadData { expression }));
        }
        self.parse_assignment_expression()
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::NumericLiteral => {
                let text = self.scanner.token_text().to_string();
                self.next_token();
                self.finish_node(start, NodeData::NumericLiteral(LiteralData { text }))
            }
            SyntaxKind::BigIntLiteral => {
                let text = self.scanner.token_text().to_string();
                self.next_token();
                self.finish_node(start, NodeData::BigIntLiteral(LiteralData { text }))
            }
            SyntaxKind::StringLiteral => self.parse_string_literal(),
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                self.parse_template_literal()
            }
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.rescan_slash_token();
                let text = self.scanner.token_text().to_string();
                self.next_token();
                self.finish_node(
                    start,
                    NodeData::RegularExpressionLiteral(LiteralData { text }),
                )
            }
            SyntaxKind::TrueKeyword => self.parse_keyword_node(NodeData::TrueKeyword),
            SyntaxKind::FalseKeyword => self.parse_keyword_node(NodeData::FalseKeyword),
            SyntaxKind::NullKeyword => self.parse_keyword_node(NodeData::NullKeyword),
            SyntaxKind::ThisKeyword => self.parse_keyword_node(NodeData::ThisKeyword),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal_expression(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal_expression(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(start, false),
            SyntaxKind::AsyncKeyword if self.look_ahead_is_async_function() => {
                self.next_token();
                self.parse_function_expression(start, true)
            }
            SyntaxKind::ClassKeyword => self.parse_class(start, true, true),
            SyntaxKind::LessThanToken => self.parse_jsx_element_or_fragment(false),
            SyntaxKind::PrivateIdentifier
                if self.look_ahead_next(|next| next == SyntaxKind::InKeyword) =>
            {
                self.parse_private_identifier()
            }
            _ if self.is_identifier() => self.parse_identifier_name(),
            _ => {
                self.parse_error_at_current_token("Expression expected.");
                NodeIndex::NONE
            }
        }
    }

    fn parse_keyword_node(&mut self, data: NodeData) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.finish_node(start, data)
    }

    fn parse_parenthesized_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = self.parse_expression_allow_in();
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.finish_node(
            start,
            NodeData::ParenthesizedExpression(ParenthesizedData { expression }),
        )
    }

    fn parse_function_expression(&mut self, start: u32, is_async: bool) -> NodeIndex {
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);
        // The name of a function expression is bound inside its own context.
        let name = if self.token() == SyntaxKind::Identifier
            || (self.token().is_contextual_keyword()
                && !(is_generator && self.is_token(SyntaxKind::YieldKeyword))
                && !(is_async && self.is_token(SyntaxKind::AwaitKeyword)))
        {
            self.parse_identifier_name()
        } else {
            NodeIndex::NONE
        };
        let data = self.parse_function_rest(name, is_async, is_generator);
        self.finish_node(start, NodeData::FunctionExpression(data))
    }

    /// Template literal starting at the current backtick token.
    fn parse_template_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if self.is_token(SyntaxKind::NoSubstitutionTemplateLiteral) {
            let text = self.scanner.token_value().to_string();
            self.next_token();
            return self.finish_node(
                start,
                NodeData::NoSubstitutionTemplateLiteral(LiteralData { text }),
            );
        }

        let head = self.scanner.token_value().to_string();
        self.next_token();
        let mut spans = NodeList::new();
        loop {
            let expression = self.parse_expression_allow_in();
            if expression.is_some() {
                spans.push(expression);
            }
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.parse_error_at_current_token("'}' expected.");
                break;
            }
            let continuation = self.rescan_template_token();
            self.next_token();
            if continuation != SyntaxKind::TemplateMiddle {
                break;
            }
        }
        self.finish_node(
            start,
            NodeData::TemplateExpression(TemplateExprData { head, spans }),
        )
    }

    // =========================================================================
    // Array and object literals
    // =========================================================================

    fn parse_array_literal_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let mut elements = NodeList::new();
        self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
            while !p.is_token(SyntaxKind::CloseBracketToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                if p.is_token(SyntaxKind::CommaToken) {
                    let pos = p.token_pos();
                    elements.push(p.arena.add(pos, pos, NodeData::OmittedExpression));
                    p.next_token();
                    continue;
                }
                let element = p.parse_spread_or_assignment_expression();
                if element.is_none() {
                    break;
                }
                elements.push(element);
                if !p.is_token(SyntaxKind::CloseBracketToken)
                    && !p.parse_expected(SyntaxKind::CommaToken)
                {
                    break;
                }
            }
        });
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(
            start,
            NodeData::ArrayLiteralExpression(LiteralExprData { elements }),
        )
    }

    pub(crate) fn parse_object_literal_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut elements = NodeList::new();
        self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
            while !p.is_token(SyntaxKind::CloseBraceToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                let element = p.parse_object_literal_element();
                if element.is_none() {
                    break;
                }
                elements.push(element);
                if !p.is_token(SyntaxKind::CloseBraceToken)
                    && !p.parse_expected(SyntaxKind::CommaToken)
                {
                    break;
                }
            }
        });
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(
            start,
            NodeData::ObjectLiteralExpression(LiteralExprData { elements }),
        )
    }

    fn parse_object_literal_element(&mut self) -> NodeIndex {
        let start = self.token_pos();

        if self.is_token(SyntaxKind::DotDotDotToken) {
            self.next_token();
            let expression = self.parse_assignment_expression();
            return self.finish_node(start, NodeData::SpreadElement(SpreadData { expression }));
        }

        let has_modifier = self.is_token(SyntaxKind::AsteriskToken)
            || (matches!(
                self.token(),
                SyntaxKind::AsyncKeyword | SyntaxKind::GetKeyword | SyntaxKind::SetKeyword
            ) && self.look_ahead_next(|next| {
                !matches!(
                    next,
                    SyntaxKind::OpenParenToken
                        | SyntaxKind::ColonToken
                        | SyntaxKind::CommaToken
                        | SyntaxKind::EqualsToken
                        | SyntaxKind::CloseBraceToken
                )
            }));
        if has_modifier {
            return self.parse_method_or_property(start, false, false);
        }

        let is_shorthand_candidate = self.is_identifier();
        let name = self.parse_property_name();
        if name.is_none() {
            return name;
        }

        match self.token() {
            SyntaxKind::OpenParenToken => {
                self.parse_method_rest(start, name, MethodKind::Method, false, false, false)
            }
            SyntaxKind::ColonToken => {
                self.next_token();
                let initializer = self.parse_assignment_expression();
                self.finish_node(
                    start,
                    NodeData::PropertyAssignment(PropertyAssignmentData { name, initializer }),
                )
            }
            _ => {
                if !is_shorthand_candidate {
                    self.parse_error_at_current_token("':' expected.");
                }
                // `{ a = 1 }` is only valid as a destructuring target
                let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                    self.parse_assignment_expression()
                } else {
                    NodeIndex::NONE
                };
                self.finish_node(
                    start,
                    NodeData::ShorthandPropertyAssignment(ShorthandPropertyData {
                        name,
                        initializer,
                    }),
                )
            }
        }
    }

    /// Property name: identifier or keyword, string, number, `#private`
    /// or `[computed]`.
    pub(crate) fn parse_property_name(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::StringLiteral => self.parse_string_literal(),
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                let text = self.scanner.token_text().to_string();
                self.next_token();
                self.finish_node(start, NodeData::NumericLiteral(LiteralData { text }))
            }
            SyntaxKind::PrivateIdentifier => self.parse_private_identifier(),
            SyntaxKind::OpenBracketToken => {
                self.next_token();
                let expression = self.parse_assignment_expression_allow_in();
                self.parse_expected(SyntaxKind::CloseBracketToken);
                self.finish_node(
                    start,
                    NodeData::ComputedPropertyName(ComputedPropertyData { expression }),
                )
            }
            kind if kind.is_identifier_or_keyword() => self.parse_identifier_name(),
            _ => {
                self.parse_error_at_current_token("Property assignment expected.");
                NodeIndex::NONE
            }
        }
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    /// Parse an arrow function if one starts here; otherwise consume nothing.
    fn try_parse_arrow_function(&mut self) -> Option<NodeIndex> {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::OpenParenToken => self.try_parse_parenthesized_arrow_function(start, false),
            SyntaxKind::AsyncKeyword => {
                if self.look_ahead_is_async_simple_arrow() {
                    self.next_token();
                    return Some(self.parse_simple_arrow_function(start, true));
                }
                if self.look_ahead_next_on_same_line(|next| next == SyntaxKind::OpenParenToken) {
                    let snapshot = self.snapshot();
                    self.next_token();
                    if let Some(arrow) = self.try_parse_parenthesized_arrow_function(start, true) {
                        return Some(arrow);
                    }
                    // `async(...)` is a call
                    self.restore(snapshot);
                }
                if self.look_ahead_is_simple_arrow_function() {
                    return Some(self.parse_simple_arrow_function(start, false));
                }
                None
            }
            _ if self.is_identifier() && self.look_ahead_is_simple_arrow_function() => {
                Some(self.parse_simple_arrow_function(start, false))
            }
            _ => None,
        }
    }

    /// Look ahead to see if identifier is followed by `=>` on the same line
    fn look_ahead_is_simple_arrow_function(&mut self) -> bool {
        self.look_ahead_next_on_same_line(|next| next == SyntaxKind::EqualsGreaterThanToken)
    }

    /// Look ahead to see if we have `async x =>`
    fn look_ahead_is_async_simple_arrow(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if p.has_preceding_line_break() || !p.is_identifier() {
                return false;
            }
            p.next_token();
            p.is_token(SyntaxKind::EqualsGreaterThanToken) && !p.has_preceding_line_break()
        })
    }

    /// `x => body`, with the identifier as the current token.
    fn parse_simple_arrow_function(&mut self, start: u32, is_async: bool) -> NodeIndex {
        let param_start = self.token_pos();
        let name = self.parse_identifier_name();
        let parameter = self.finish_node(
            param_start,
            NodeData::Parameter(ParameterData {
                name,
                initializer: NodeIndex::NONE,
                is_rest: false,
            }),
        );
        self.parse_arrow_function_rest(start, vec![parameter], is_async)
    }

    /// Speculatively parse `( params ) =>`. On failure nothing is consumed.
    fn try_parse_parenthesized_arrow_function(
        &mut self,
        start: u32,
        is_async: bool,
    ) -> Option<NodeIndex> {
        let snapshot = self.snapshot();
        let (set, clear) = if is_async {
            (CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN)
        } else {
            (0, CONTEXT_FLAG_DISALLOW_IN)
        };
        let parameters = self.with_context(set, clear, |p| p.parse_parameters());
        if self.has_new_errors_since(&snapshot)
            || !self.is_token(SyntaxKind::EqualsGreaterThanToken)
            || self.has_preceding_line_break()
        {
            self.restore(snapshot);
            return None;
        }
        Some(self.parse_arrow_function_rest(start, parameters, is_async))
    }

    /// `=> body` after the parameters.
    fn parse_arrow_function_rest(
        &mut self,
        start: u32,
        parameters: NodeList,
        is_async: bool,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let set = if is_async { CONTEXT_FLAG_ASYNC } else { 0 };
        let clear = if is_async {
            CONTEXT_FLAG_GENERATOR
        } else {
            CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR
        };
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.with_context(set, clear | CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_block())
        } else {
            self.with_context(set, clear, |p| p.parse_assignment_expression())
        };
        self.finish_node(
            start,
            NodeData::ArrowFunction(FunctionData {
                name: NodeIndex::NONE,
                parameters,
                body,
                is_async,
                is_generator: false,
            }),
        )
    }
}
