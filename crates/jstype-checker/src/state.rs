//! # CheckerState
//!
//! Drives checking of one parsed file in two passes:
//!
//! 1. `collect_signatures` walks the whole tree and registers the `@param`
//!    and `@returns` tags of every named function, so calls that appear
//!    before a function's declaration still see its signature.
//! 2. `check_statements` walks the tree again in source order (pre-order,
//!    depth first) and checks variable declarations, assignments and call
//!    arguments, updating the binding tracker as it goes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let parsed = jstype_parser::parse("app.js", source);
//! let outcome = CheckerState::new(&parsed, &options).check_source_file();
//! ```

use jstype_parser::parser::node::{BinaryExprData, CallExprData, VariableDeclarationData};
use jstype_parser::{NodeArena, NodeData, NodeIndex, ParsedSource};
use jstype_scanner::SyntaxKind;
use tracing::{debug, trace};

use crate::annotations::{FunctionTags, function_tags, inline_annotation, type_tag_annotation};
use crate::bindings::Binding;
use crate::compat::is_compatible;
use crate::context::{CheckerContext, CheckerOptions};
use crate::infer::{display_value, infer_expression};
use crate::outcome::{FileOutcome, MismatchKind};
use crate::signatures::FunctionSignature;
use crate::types::{Annotation, SemanticType};

pub struct CheckerState<'a> {
    pub ctx: CheckerContext<'a>,
}

impl<'a> CheckerState<'a> {
    pub fn new(parsed: &'a ParsedSource, options: &'a CheckerOptions) -> Self {
        CheckerState {
            ctx: CheckerContext::new(parsed, options),
        }
    }

    /// Run both passes and produce the file's outcome.
    pub fn check_source_file(mut self) -> FileOutcome {
        if self.ctx.skip.file_skipped {
            debug!(file = %self.ctx.parsed.file_name, "file skipped by directive");
            return FileOutcome::Skipped;
        }

        self.collect_signatures();
        self.check_statements();

        debug!(
            file = %self.ctx.parsed.file_name,
            checks = self.ctx.checks_performed,
            mismatches = self.ctx.mismatches.len(),
            "file checked"
        );
        FileOutcome::Checked {
            mismatches: self.ctx.mismatches,
            checks_performed: self.ctx.checks_performed,
        }
    }

    // =========================================================================
    // Pass 1: function signatures
    // =========================================================================

    /// Register every named function that carries `@param` or `@returns`
    /// tags. Skip directives do not apply to this pass.
    pub fn collect_signatures(&mut self) {
        let arena = self.ctx.arena();
        for node in preorder(arena, self.ctx.parsed.root) {
            let Some(data) = arena.get(node).map(|n| &n.data) else {
                continue;
            };
            match data {
                NodeData::FunctionDeclaration(func) => {
                    let Some(name) = arena.get_identifier_text(func.name) else {
                        continue;
                    };
                    let comments = self.ctx.function_comments(node);
                    self.register_signature(name, function_tags(self.ctx.parsed, &comments));
                }
                NodeData::VariableDeclaration(decl)
                    if is_function_value(arena, decl.initializer) =>
                {
                    let Some(name) = arena.get_identifier_text(decl.name) else {
                        continue;
                    };
                    let comments = self.ctx.declarator_comments(node);
                    self.register_signature(name, function_tags(self.ctx.parsed, &comments));
                }
                _ => {}
            }
        }
    }

    fn register_signature(&mut self, name: &str, tags: FunctionTags) {
        if tags.is_empty() {
            return;
        }
        let signature = FunctionSignature::from_tags(name, tags);
        debug!(
            function = name,
            params = signature.params.len(),
            returns = signature.return_type.as_ref().map(SemanticType::as_str),
            "registered signature"
        );
        self.ctx.signatures.register(signature);
    }

    // =========================================================================
    // Pass 2: declarations, assignments and calls
    // =========================================================================

    pub fn check_statements(&mut self) {
        let arena = self.ctx.arena();
        for node in preorder(arena, self.ctx.parsed.root) {
            let Some(data) = arena.get(node).map(|n| &n.data) else {
                continue;
            };
            match data {
                NodeData::VariableDeclaration(decl) => {
                    self.check_variable_declaration(node, decl)
                }
                NodeData::AssignmentExpression(assignment) => {
                    self.check_assignment(node, assignment)
                }
                NodeData::CallExpression(call) => self.check_call_arguments(node, call),
                _ => {}
            }
        }
    }

    fn check_variable_declaration(&mut self, node: NodeIndex, decl: &VariableDeclarationData) {
        if decl.initializer.is_none() {
            return;
        }
        let arena = self.ctx.arena();
        // Destructuring targets have no single name to track.
        let Some(name) = arena.get_identifier_text(decl.name) else {
            return;
        };
        if self.ctx.is_suppressed(node) {
            trace!(name, "declaration after skip-remaining");
            return;
        }

        let annotation = inline_annotation(self.ctx.parsed, node).or_else(|| {
            type_tag_annotation(self.ctx.parsed, &self.ctx.declarator_comments(node))
        });

        match annotation {
            Some(annotation) => {
                let (inferred, _) = self.check_value(
                    node,
                    MismatchKind::Declaration,
                    name,
                    &annotation,
                    decl.initializer,
                );
                self.ctx
                    .bindings
                    .declare(Binding::new(name, &annotation, inferred));
            }
            None if self.ctx.options.infer => {
                let inferred = infer_expression(&self.ctx, decl.initializer, None);
                trace!(name, inferred = %inferred, "tracking unannotated declaration");
                let declared = Annotation::parse(inferred.as_str());
                self.ctx
                    .bindings
                    .declare(Binding::new(name, &declared, inferred));
            }
            None => trace!(name, "no annotation"),
        }
    }

    fn check_assignment(&mut self, node: NodeIndex, assignment: &BinaryExprData) {
        // Compound assignments keep whatever type the operator produces.
        if assignment.operator_token != SyntaxKind::EqualsToken {
            return;
        }
        let arena = self.ctx.arena();
        let target = arena.skip_parentheses(assignment.left);
        let Some(NodeData::Identifier(ident)) = arena.get(target).map(|n| &n.data) else {
            return;
        };
        let name = ident.escaped_text.as_str();
        if self.ctx.is_suppressed(node) {
            trace!(name, "assignment after skip-remaining");
            return;
        }

        let tracked = self
            .ctx
            .bindings
            .lookup(name)
            .map(Binding::declared_annotation);
        if let Some(declared) = tracked {
            let (inferred, matched) = self.check_value(
                node,
                MismatchKind::Assignment,
                name,
                &declared,
                assignment.right,
            );
            if matched {
                self.ctx.bindings.refresh(name, inferred);
            }
        } else if let Some(annotation) = inline_annotation(self.ctx.parsed, node) {
            let (inferred, _) = self.check_value(
                node,
                MismatchKind::Assignment,
                name,
                &annotation,
                assignment.right,
            );
            self.ctx
                .bindings
                .declare(Binding::new(name, &annotation, inferred));
        }
    }

    /// Check each argument of a call to a function with `@param` tags.
    ///
    /// Every declared parameter counts as a check; missing arguments are not
    /// reported and extra arguments are ignored.
    fn check_call_arguments(&mut self, node: NodeIndex, call: &CallExprData) {
        let arena = self.ctx.arena();
        let callee = arena.skip_parentheses(call.expression);
        let Some(NodeData::Identifier(ident)) = arena.get(callee).map(|n| &n.data) else {
            return;
        };
        let Some(signature) = self
            .ctx
            .signatures
            .get(&ident.escaped_text)
            .filter(|signature| !signature.params.is_empty())
            .cloned()
        else {
            return;
        };
        if self.ctx.is_suppressed(node) {
            trace!(function = %signature.name, "call after skip-remaining");
            return;
        }

        self.ctx.checks_performed += signature.params.len();
        for (param, &argument) in signature.params.iter().zip(&call.arguments) {
            let inferred = infer_expression(&self.ctx, argument, None);
            let matched = inferred.as_str() == param.declared_type;
            debug!(
                function = %signature.name,
                param = %param.name,
                expected = %param.declared_type,
                found = %inferred,
                matched,
                "checked argument"
            );
            if !matched {
                let value = display_value(&self.ctx, argument);
                self.ctx.report_mismatch(
                    argument,
                    MismatchKind::Argument,
                    &param.name,
                    &param.declared_type,
                    inferred.as_str(),
                    value,
                );
            }
        }
    }

    /// Infer `value`, match it against `annotation`, and report a mismatch
    /// at `site` on failure. Counts as one check.
    fn check_value(
        &mut self,
        site: NodeIndex,
        kind: MismatchKind,
        subject: &str,
        annotation: &Annotation,
        value: NodeIndex,
    ) -> (SemanticType, bool) {
        self.ctx.checks_performed += 1;
        let inferred = infer_expression(&self.ctx, value, Some(annotation));
        let matched = is_compatible(&self.ctx, annotation, &inferred, value);
        debug!(
            subject,
            kind = kind.label(),
            expected = %annotation.declared_type,
            found = %inferred,
            matched,
            "checked value"
        );
        if !matched {
            let shown = display_value(&self.ctx, value);
            self.ctx.report_mismatch(
                site,
                kind,
                subject,
                &annotation.declared_type,
                inferred.as_str(),
                shown,
            );
        }
        (inferred, matched)
    }
}

/// Whether `value` (parentheses skipped) is a function or arrow expression.
fn is_function_value(arena: &NodeArena, value: NodeIndex) -> bool {
    matches!(
        arena.get(arena.skip_parentheses(value)).map(|n| &n.data),
        Some(NodeData::FunctionExpression(_) | NodeData::ArrowFunction(_))
    )
}

/// Nodes under `root` in pre-order, children in source order.
fn preorder(arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
    let mut order = Vec::with_capacity(arena.len());
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        order.push(node);
        stack.extend(arena.children(node).into_iter().rev());
    }
    order
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
