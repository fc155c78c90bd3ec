//! Parser state - statement and declaration parsing methods

use super::base::{NodeIndex, NodeList};
use super::node::{
    BindingElementData, BindingPatternData, BlockData, CaseClauseData, CatchClauseData, ClassData,
    ExportDeclData, ExprStatementData, ForData, ForInOfData, FunctionData, IfStatementData,
    ImportDeclData, JumpData, LabeledData, LiteralData, LoopData, MethodDeclData, MethodKind,
    NodeData, ParameterData, PropertyDeclData, ReturnData, SourceFileData, SpecifierData,
    SwitchData, TryData, VariableData, VariableDeclarationData, VariableKind,
};
use super::state::{
    CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_GENERATOR, ParserState,
};
use jstype_scanner::SyntaxKind;
use tracing::trace;

impl ParserState {
    // =========================================================================
    // Source file and statement lists
    // =========================================================================

    /// Parse a source file. Module code: top-level `await` is allowed.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        trace!(file = %self.file_name, "parse_source_file");
        self.context_flags = CONTEXT_FLAG_ASYNC;
        self.next_token();

        let mut statements = NodeList::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let before = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            if self.token_pos() == before && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.parse_error_at_current_token("Declaration or statement expected.");
                self.next_token();
            }
        }

        let end = self.scanner.source_text().len() as u32;
        self.arena
            .add(0, end, NodeData::SourceFile(SourceFileData { statements }))
    }

    /// Statements up to (not including) the closing `}`.
    fn parse_statement_list(&mut self) -> NodeList {
        let mut statements = NodeList::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            if self.token_pos() == before {
                self.parse_error_at_current_token("Declaration or statement expected.");
                self.next_token();
            }
        }
        statements
    }

    /// Statements of a `case`/`default` clause.
    fn parse_case_statement_list(&mut self) -> NodeList {
        let mut statements = NodeList::new();
        while !matches!(
            self.token(),
            SyntaxKind::CaseKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::EndOfFileToken
        ) {
            let before = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            if self.token_pos() == before {
                self.parse_error_at_current_token("Declaration or statement expected.");
                self.next_token();
            }
        }
        statements
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        self.with_recursion_guard(Self::parse_statement_inner)
    }

    fn parse_statement_inner(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                let start = self.token_pos();
                self.next_token();
                self.finish_node(start, NodeData::EmptyStatement)
            }
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => self.parse_variable_statement(),
            SyntaxKind::LetKeyword if self.look_ahead_is_let_declaration() => {
                self.parse_variable_statement()
            }
            SyntaxKind::FunctionKeyword => {
                let start = self.token_pos();
                self.parse_function_declaration(start, false, false)
            }
            SyntaxKind::AsyncKeyword if self.look_ahead_is_async_function() => {
                let start = self.token_pos();
                self.next_token();
                self.parse_function_declaration(start, true, false)
            }
            SyntaxKind::ClassKeyword => {
                let start = self.token_pos();
                self.parse_class(start, false, false)
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::BreakKeyword | SyntaxKind::ContinueKeyword => {
                self.parse_break_or_continue_statement()
            }
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::DebuggerKeyword => {
                let start = self.token_pos();
                self.next_token();
                self.parse_semicolon();
                self.finish_node(start, NodeData::DebuggerStatement)
            }
            SyntaxKind::ImportKeyword
                if !self.look_ahead_next(|next| {
                    matches!(next, SyntaxKind::OpenParenToken | SyntaxKind::DotToken)
                }) =>
            {
                self.parse_import_declaration()
            }
            SyntaxKind::ExportKeyword => self.parse_export_declaration(),
            SyntaxKind::WithKeyword => {
                self.parse_error_at_current_token(
                    "'with' statements are not allowed in strict mode.",
                );
                self.next_token();
                NodeIndex::NONE
            }
            _ if self.is_identifier() && self.look_ahead_is_labeled_statement() => {
                self.parse_labeled_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// Look ahead to see if `let` starts a declaration rather than naming a variable.
    fn look_ahead_is_let_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_identifier()
                || p.is_token(SyntaxKind::OpenBracketToken)
                || p.is_token(SyntaxKind::OpenBraceToken)
        })
    }

    /// Look ahead to see if we have "async function" on one line
    pub(crate) fn look_ahead_is_async_function(&mut self) -> bool {
        self.look_ahead_next_on_same_line(|next| next == SyntaxKind::FunctionKeyword)
    }

    /// Look ahead to see if we have "identifier :" (labeled statement)
    fn look_ahead_is_labeled_statement(&mut self) -> bool {
        self.look_ahead_next(|next| next == SyntaxKind::ColonToken)
    }

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statement_list();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(start, NodeData::Block(BlockData { statements }))
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = self.parse_expression();
        if expression.is_none() {
            return NodeIndex::NONE;
        }
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::ExpressionStatement(ExprStatementData { expression }),
        )
    }

    fn parse_labeled_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let label = self.parse_identifier();
        self.parse_expected(SyntaxKind::ColonToken);
        let statement = self.parse_statement();
        self.finish_node(
            start,
            NodeData::LabeledStatement(LabeledData { label, statement }),
        )
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression_allow_in();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let then_statement = self.parse_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_statement()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(
            start,
            NodeData::IfStatement(IfStatementData {
                expression,
                then_statement,
                else_statement,
            }),
        )
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression_allow_in();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        self.finish_node(
            start,
            NodeData::WhileStatement(LoopData {
                condition,
                statement,
            }),
        )
    }

    fn parse_do_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let statement = self.parse_statement();
        self.parse_expected(SyntaxKind::WhileKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression_allow_in();
        self.parse_expected(SyntaxKind::CloseParenToken);
        // The semicolon after do-while is always optional
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.finish_node(
            start,
            NodeData::DoStatement(LoopData {
                condition,
                statement,
            }),
        )
    }

    /// `for (;;)`, `for (x in o)`, `for (x of xs)` and `for await (x of xs)`.
    fn parse_for_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let is_await =
            self.in_async_context() && self.parse_optional(SyntaxKind::AwaitKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);

        let initializer = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.with_context(CONTEXT_FLAG_DISALLOW_IN, 0, |p| {
                let is_declaration = match p.token() {
                    SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => true,
                    SyntaxKind::LetKeyword => p.look_ahead_is_let_declaration(),
                    _ => false,
                };
                if is_declaration {
                    p.parse_variable_declaration_list_node()
                } else {
                    p.parse_expression()
                }
            })
        };

        if self.is_token(SyntaxKind::OfKeyword) || self.is_token(SyntaxKind::InKeyword) {
            let is_of = self.is_token(SyntaxKind::OfKeyword);
            self.next_token();
            let expression = if is_of {
                self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
                    p.parse_assignment_expression()
                })
            } else {
                self.parse_expression_allow_in()
            };
            self.parse_expected(SyntaxKind::CloseParenToken);
            let statement = self.parse_statement();
            return self.finish_node(
                start,
                NodeData::ForInOfStatement(ForInOfData {
                    is_of,
                    is_await,
                    initializer,
                    expression,
                    statement,
                }),
            );
        }

        self.parse_expected(SyntaxKind::SemicolonToken);
        let condition = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression_allow_in()
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let incrementor = if self.is_token(SyntaxKind::CloseParenToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression_allow_in()
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        self.finish_node(
            start,
            NodeData::ForStatement(ForData {
                initializer,
                condition,
                incrementor,
                statement,
            }),
        )
    }

    fn parse_return_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = if self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.parse_expression_allow_in()
        };
        self.parse_semicolon();
        self.finish_node(start, NodeData::ReturnStatement(ReturnData { expression }))
    }

    fn parse_throw_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        if self.has_preceding_line_break() {
            self.parse_error_at_current_token("Line break not permitted here.");
        }
        let expression = self.parse_expression_allow_in();
        self.parse_semicolon();
        self.finish_node(start, NodeData::ThrowStatement(ReturnData { expression }))
    }

    fn parse_break_or_continue_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let is_break = self.is_token(SyntaxKind::BreakKeyword);
        self.next_token();
        let label = if !self.has_preceding_line_break() && self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        let data = JumpData { label };
        if is_break {
            self.finish_node(start, NodeData::BreakStatement(data))
        } else {
            self.finish_node(start, NodeData::ContinueStatement(data))
        }
    }

    fn parse_try_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let try_block = self.parse_block();

        let catch_clause = if self.is_token(SyntaxKind::CatchKeyword) {
            let catch_start = self.token_pos();
            self.next_token();
            let variable = if self.parse_optional(SyntaxKind::OpenParenToken) {
                let variable = self.parse_binding_name();
                self.parse_expected(SyntaxKind::CloseParenToken);
                variable
            } else {
                NodeIndex::NONE
            };
            let block = self.parse_block();
            self.finish_node(
                catch_start,
                NodeData::CatchClause(CatchClauseData { variable, block }),
            )
        } else {
            NodeIndex::NONE
        };

        let finally_block = if self.parse_optional(SyntaxKind::FinallyKeyword) {
            self.parse_block()
        } else {
            NodeIndex::NONE
        };

        if catch_clause.is_none() && finally_block.is_none() {
            self.parse_error_at_current_token("'catch' or 'finally' expected.");
        }

        self.finish_node(
            start,
            NodeData::TryStatement(TryData {
                try_block,
                catch_clause,
                finally_block,
            }),
        )
    }

    fn parse_switch_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression_allow_in();
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut clauses = NodeList::new();
        loop {
            let clause_start = self.token_pos();
            let expression = match self.token() {
                SyntaxKind::CaseKeyword => {
                    self.next_token();
                    self.parse_expression_allow_in()
                }
                SyntaxKind::DefaultKeyword => {
                    self.next_token();
                    NodeIndex::NONE
                }
                _ => break,
            };
            self.parse_expected(SyntaxKind::ColonToken);
            let statements = self.parse_case_statement_list();
            clauses.push(self.finish_node(
                clause_start,
                NodeData::CaseClause(CaseClauseData {
                    expression,
                    statements,
                }),
            ));
        }

        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(
            start,
            NodeData::SwitchStatement(SwitchData {
                expression,
                clauses,
            }),
        )
    }

    // =========================================================================
    // Variable declarations
    // =========================================================================

    fn variable_kind(&self) -> VariableKind {
        match self.token() {
            SyntaxKind::LetKeyword => VariableKind::Let,
            SyntaxKind::ConstKeyword => VariableKind::Const,
            _ => VariableKind::Var,
        }
    }

    fn parse_variable_statement(&mut self) -> NodeIndex {
        let node = self.parse_variable_declaration_list_node();
        self.parse_semicolon();
        // Widen the statement over its semicolon.
        let end = self.prev_token_end();
        if let Some(statement) = self.arena.get_mut(node) {
            statement.end = end;
        }
        node
    }

    /// `var`/`let`/`const` followed by declarators, without the terminator.
    /// Shared with `for` initializers.
    fn parse_variable_declaration_list_node(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let kind = self.variable_kind();
        self.next_token();

        let mut declarations = NodeList::new();
        loop {
            declarations.push(self.parse_variable_declaration());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }

        self.finish_node(
            start,
            NodeData::VariableStatement(VariableData { kind, declarations }),
        )
    }

    fn parse_variable_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let name = self.parse_binding_name();
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(
            start,
            NodeData::VariableDeclaration(VariableDeclarationData { name, initializer }),
        )
    }

    // =========================================================================
    // Binding patterns
    // =========================================================================

    /// Identifier, `[...]` or `{...}` binding target.
    pub(crate) fn parse_binding_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBracketToken => {
                self.with_recursion_guard(Self::parse_array_binding_pattern)
            }
            SyntaxKind::OpenBraceToken => {
                self.with_recursion_guard(Self::parse_object_binding_pattern)
            }
            _ => self.parse_identifier(),
        }
    }

    fn parse_array_binding_pattern(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let mut elements = NodeList::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.is_token(SyntaxKind::CommaToken) {
                let pos = self.token_pos();
                elements.push(self.arena.add(pos, pos, NodeData::OmittedExpression));
                self.next_token();
                continue;
            }
            let element_start = self.token_pos();
            let is_rest = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            let initializer = self.parse_binding_initializer();
            elements.push(self.finish_node(
                element_start,
                NodeData::BindingElement(BindingElementData {
                    property_name: NodeIndex::NONE,
                    name,
                    initializer,
                    is_rest,
                }),
            ));
            if !self.is_token(SyntaxKind::CloseBracketToken)
                && !self.parse_expected(SyntaxKind::CommaToken)
            {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(
            start,
            NodeData::ArrayBindingPattern(BindingPatternData { elements }),
        )
    }

    fn parse_object_binding_pattern(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let mut elements = NodeList::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let element_start = self.token_pos();
            let element = if self.parse_optional(SyntaxKind::DotDotDotToken) {
                let name = self.parse_identifier();
                BindingElementData {
                    property_name: NodeIndex::NONE,
                    name,
                    initializer: NodeIndex::NONE,
                    is_rest: true,
                }
            } else {
                let is_shorthand_candidate = self.is_identifier();
                let property = self.parse_property_name();
                if self.parse_optional(SyntaxKind::ColonToken) {
                    let name = self.parse_binding_name();
                    let initializer = self.parse_binding_initializer();
                    BindingElementData {
                        property_name: property,
                        name,
                        initializer,
                        is_rest: false,
                    }
                } else {
                    if !is_shorthand_candidate {
                        self.parse_error_at_current_token("':' expected.");
                    }
                    let initializer = self.parse_binding_initializer();
                    BindingElementData {
                        property_name: NodeIndex::NONE,
                        name: property,
                        initializer,
                        is_rest: false,
                    }
                }
            };
            elements.push(self.finish_node(element_start, NodeData::BindingElement(element)));
            if !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.parse_expected(SyntaxKind::CommaToken)
            {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(
            start,
            NodeData::ObjectBindingPattern(BindingPatternData { elements }),
        )
    }

    fn parse_binding_initializer(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::EqualsToken) {
            self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
                p.parse_assignment_expression()
            })
        } else {
            NodeIndex::NONE
        }
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// `function` declaration; `start` covers any `async`/`export` prefix
    /// the caller consumed. Anonymous declarations are only legal after
    /// `export default`.
    pub(crate) fn parse_function_declaration(
        &mut self,
        start: u32,
        is_async: bool,
        allow_anonymous: bool,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            if !allow_anonymous {
                self.parse_error_at_current_token("Identifier expected.");
            }
            NodeIndex::NONE
        };
        let data = self.parse_function_rest(name, is_async, is_generator);
        self.finish_node(start, NodeData::FunctionDeclaration(data))
    }

    /// Parameters and body of a function, method or accessor.
    pub(crate) fn parse_function_rest(
        &mut self,
        name: NodeIndex,
        is_async: bool,
        is_generator: bool,
    ) -> FunctionData {
        let mut set = 0;
        let mut clear = CONTEXT_FLAG_DISALLOW_IN;
        if is_async {
            set |= CONTEXT_FLAG_ASYNC;
        } else {
            clear |= CONTEXT_FLAG_ASYNC;
        }
        if is_generator {
            set |= CONTEXT_FLAG_GENERATOR;
        } else {
            clear |= CONTEXT_FLAG_GENERATOR;
        }

        self.with_context(set, clear, |p| {
            let parameters = p.parse_parameters();
            let body = p.parse_block();
            FunctionData {
                name,
                parameters,
                body,
                is_async,
                is_generator,
            }
        })
    }

    /// `( param, param = default, ...rest )`
    pub(crate) fn parse_parameters(&mut self) -> NodeList {
        let mut parameters = NodeList::new();
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return parameters;
        }
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let is_rest = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            if name.is_none() {
                break;
            }
            let initializer = self.parse_binding_initializer();
            parameters.push(self.finish_node(
                start,
                NodeData::Parameter(ParameterData {
                    name,
                    initializer,
                    is_rest,
                }),
            ));
            if !self.is_token(SyntaxKind::CloseParenToken)
                && !self.parse_expected(SyntaxKind::CommaToken)
            {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        parameters
    }

    // =========================================================================
    // Classes
    // =========================================================================

    /// Class declaration or expression starting at the `class` keyword.
    pub(crate) fn parse_class(
        &mut self,
        start: u32,
        is_expression: bool,
        allow_anonymous: bool,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::ClassKeyword);
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            if !is_expression && !allow_anonymous {
                self.parse_error_at_current_token("Identifier expected.");
            }
            NodeIndex::NONE
        };
        let heritage = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            self.parse_left_hand_side_expression()
        } else {
            NodeIndex::NONE
        };

        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut members = NodeList::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                continue;
            }
            let before = self.token_pos();
            let member = self.parse_class_member();
            if member.is_some() {
                members.push(member);
            }
            if self.token_pos() == before {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);

        let data = ClassData {
            name,
            heritage,
            members,
        };
        if is_expression {
            self.finish_node(start, NodeData::ClassExpression(data))
        } else {
            self.finish_node(start, NodeData::ClassDeclaration(data))
        }
    }

    /// Whether the current contextual keyword is a modifier (followed by a
    /// member name) rather than the member's own name.
    fn look_ahead_is_member_modifier(&mut self) -> bool {
        self.look_ahead_next(|next| {
            !matches!(
                next,
                SyntaxKind::OpenParenToken
                    | SyntaxKind::EqualsToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::ColonToken
                    | SyntaxKind::CommaToken
                    | SyntaxKind::EndOfFileToken
            )
        })
    }

    fn parse_class_member(&mut self) -> NodeIndex {
        let start = self.token_pos();

        if self.is_token(SyntaxKind::StaticKeyword)
            && self.look_ahead_next(|next| next == SyntaxKind::OpenBraceToken)
        {
            self.next_token();
            self.parse_expected(SyntaxKind::OpenBraceToken);
            let statements =
                self.with_context(0, CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR, |p| {
                    p.parse_statement_list()
                });
            self.parse_expected(SyntaxKind::CloseBraceToken);
            return self.finish_node(start, NodeData::StaticBlock(BlockData { statements }));
        }

        let is_static =
            self.is_token(SyntaxKind::StaticKeyword) && self.look_ahead_is_member_modifier();
        if is_static {
            self.next_token();
        }

        self.parse_method_or_property(start, is_static, true)
    }

    /// Object literal or class member with a function body, or a class field.
    /// Returns `NONE` after reporting when the member has no name.
    pub(crate) fn parse_method_or_property(
        &mut self,
        start: u32,
        is_static: bool,
        in_class: bool,
    ) -> NodeIndex {
        let is_async = self.is_token(SyntaxKind::AsyncKeyword)
            && self.look_ahead_is_member_modifier()
            && self.look_ahead_next_on_same_line(|_| true);
        if is_async {
            self.next_token();
        }
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);

        let mut kind = MethodKind::Method;
        if !is_async
            && !is_generator
            && matches!(self.token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
            && self.look_ahead_is_member_modifier()
        {
            kind = if self.is_token(SyntaxKind::GetKeyword) {
                MethodKind::Getter
            } else {
                MethodKind::Setter
            };
            self.next_token();
        }

        let name = self.parse_property_name();
        if name.is_none() {
            return NodeIndex::NONE;
        }

        if self.is_token(SyntaxKind::OpenParenToken) {
            if in_class
                && kind == MethodKind::Method
                && !is_static
                && self.arena.get_identifier_text(name) == Some("constructor")
            {
                kind = MethodKind::Constructor;
            }
            return self.parse_method_rest(start, name, kind, is_static, is_async, is_generator);
        }

        if !in_class || is_async || is_generator || kind != MethodKind::Method {
            self.parse_error_at_current_token("'(' expected.");
            return NodeIndex::NONE;
        }

        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.with_context(0, CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR, |p| {
                p.parse_assignment_expression()
            })
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::PropertyDeclaration(PropertyDeclData {
                name,
                is_static,
                initializer,
            }),
        )
    }

    /// Parameters and body of a method whose name has been parsed.
    pub(crate) fn parse_method_rest(
        &mut self,
        start: u32,
        name: NodeIndex,
        kind: MethodKind,
        is_static: bool,
        is_async: bool,
        is_generator: bool,
    ) -> NodeIndex {
        let function_start = self.token_pos();
        let data = self.parse_function_rest(NodeIndex::NONE, is_async, is_generator);
        let function = self.finish_node(function_start, NodeData::FunctionExpression(data));
        self.finish_node(
            start,
            NodeData::MethodDeclaration(MethodDeclData {
                name,
                kind,
                is_static,
                function,
            }),
        )
    }

    // =========================================================================
    // Modules
    // =========================================================================

    fn parse_module_specifier(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::StringLiteral) {
            self.parse_string_literal()
        } else {
            self.parse_error_at_current_token("String literal expected.");
            NodeIndex::NONE
        }
    }

    pub(crate) fn parse_string_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let text = self.scanner.token_value().to_string();
        self.next_token();
        self.finish_node(start, NodeData::StringLiteral(LiteralData { text }))
    }

    /// `with { type: "json" }` after a module specifier; parsed and dropped.
    fn parse_import_attributes(&mut self) {
        if self.is_token(SyntaxKind::WithKeyword) && !self.has_preceding_line_break() {
            self.next_token();
            self.parse_object_literal_expression();
        }
    }

    /// Name in an import/export specifier: identifier, keyword or string.
    fn parse_module_export_name(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::StringLiteral) {
            self.parse_string_literal()
        } else if self.token().is_identifier_or_keyword() {
            self.parse_identifier_name()
        } else {
            self.parse_error_at_current_token("Identifier expected.");
            NodeIndex::NONE
        }
    }

    /// `{ a, b as c }` for imports and exports.
    fn parse_named_specifiers(&mut self, is_export: bool) -> NodeList {
        let mut specifiers = NodeList::new();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let first = self.parse_module_export_name();
            if first.is_none() {
                break;
            }
            let (property_name, name) = if self.parse_optional(SyntaxKind::AsKeyword) {
                (first, self.parse_module_export_name())
            } else {
                (NodeIndex::NONE, first)
            };
            let data = SpecifierData {
                property_name,
                name,
            };
            specifiers.push(if is_export {
                self.finish_node(start, NodeData::ExportSpecifier(data))
            } else {
                self.finish_node(start, NodeData::ImportSpecifier(data))
            });
            if !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.parse_expected(SyntaxKind::CommaToken)
            {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        specifiers
    }

    fn parse_namespace_import(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::AsteriskToken);
        self.parse_expected(SyntaxKind::AsKeyword);
        let name = self.parse_identifier();
        self.finish_node(
            start,
            NodeData::NamespaceImport(SpecifierData {
                property_name: NodeIndex::NONE,
                name,
            }),
        )
    }

    fn parse_import_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();

        let mut bindings = NodeList::new();
        if !self.is_token(SyntaxKind::StringLiteral) {
            if self.is_identifier() {
                let default_start = self.token_pos();
                let name = self.parse_identifier();
                bindings.push(self.finish_node(
                    default_start,
                    NodeData::ImportSpecifier(SpecifierData {
                        property_name: NodeIndex::NONE,
                        name,
                    }),
                ));
                self.parse_optional(SyntaxKind::CommaToken);
            }
            if self.is_token(SyntaxKind::AsteriskToken) {
                bindings.push(self.parse_namespace_import());
            } else if self.is_token(SyntaxKind::OpenBraceToken) {
                bindings.extend(self.parse_named_specifiers(false));
            }
            self.parse_expected(SyntaxKind::FromKeyword);
        }

        let module_specifier = self.parse_module_specifier();
        self.parse_import_attributes();
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::ImportDeclaration(ImportDeclData {
                bindings,
                module_specifier,
            }),
        )
    }

    fn parse_export_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();

        let mut data = ExportDeclData {
            declaration: NodeIndex::NONE,
            specifiers: NodeList::new(),
            module_specifier: NodeIndex::NONE,
            is_default: false,
        };

        match self.token() {
            SyntaxKind::DefaultKeyword => {
                data.is_default = true;
                self.next_token();
                let declaration_start = self.token_pos();
                data.declaration = match self.token() {
                    SyntaxKind::FunctionKeyword => {
                        self.parse_function_declaration(declaration_start, false, true)
                    }
                    SyntaxKind::AsyncKeyword if self.look_ahead_is_async_function() => {
                        self.next_token();
                        self.parse_function_declaration(declaration_start, true, true)
                    }
                    SyntaxKind::ClassKeyword => self.parse_class(declaration_start, false, true),
                    _ => {
                        let expression = self.parse_assignment_expression();
                        self.parse_semicolon();
                        expression
                    }
                };
            }
            SyntaxKind::AsteriskToken => {
                let namespace_start = self.token_pos();
                self.next_token();
                if self.parse_optional(SyntaxKind::AsKeyword) {
                    let name = self.parse_module_export_name();
                    data.specifiers.push(self.finish_node(
                        namespace_start,
                        NodeData::NamespaceImport(SpecifierData {
                            property_name: NodeIndex::NONE,
                            name,
                        }),
                    ));
                }
                self.parse_expected(SyntaxKind::FromKeyword);
                data.module_specifier = self.parse_module_specifier();
                self.parse_import_attributes();
                self.parse_semicolon();
            }
            SyntaxKind::OpenBraceToken => {
                data.specifiers = self.parse_named_specifiers(true);
                if self.parse_optional(SyntaxKind::FromKeyword) {
                    data.module_specifier = self.parse_module_specifier();
                    self.parse_import_attributes();
                }
                self.parse_semicolon();
            }
            SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword => {
                data.declaration = self.parse_statement();
            }
            SyntaxKind::AsyncKeyword if self.look_ahead_is_async_function() => {
                data.declaration = self.parse_statement();
            }
            _ => {
                self.parse_error_at_current_token("Declaration or statement expected.");
            }
        }

        self.finish_node(start, NodeData::ExportDeclaration(data))
    }
}
