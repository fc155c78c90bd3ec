//! Parser state - JSX elements, fragments and attributes.
//!
//! Tags and attributes are read with the ordinary scanner. Element children
//! switch it to `scan_jsx_token`, so text between tags is a single token.
//! Every consumed `>` is re-scanned first, which splits `>>` and `>=`.

use super::base::{NodeIndex, NodeList};
use super::node::{
    AccessExprData, JsxAttributeData, JsxElementData, JsxExpressionData, JsxFragmentData,
    JsxNamespacedNameData, LiteralData, NodeData, SpreadData,
};
use super::state::ParserState;
use jstype_scanner::SyntaxKind;

impl ParserState {
    /// Parse `<tag ...>...</tag>`, `<tag ... />` or `<>...</>` at the
    /// current `<`. `in_children` means the element is itself a child, so
    /// the token after its final `>` is scanned as JSX text.
    pub(crate) fn parse_jsx_element_or_fragment(&mut self, in_children: bool) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();

        if self.scanner.rescan_greater_than_token() == SyntaxKind::GreaterThanToken {
            self.next_jsx_child_token();
            let children = self.parse_jsx_children();
            self.parse_jsx_closing_tag(None, in_children);
            return self.finish_node(start, NodeData::JsxFragment(JsxFragmentData { children }));
        }

        let tag_name = self.parse_jsx_tag_name();
        let attributes = self.parse_jsx_attributes();

        if self.parse_optional(SyntaxKind::SlashToken) {
            self.parse_jsx_greater_than(in_children);
            return self.finish_node(
                start,
                NodeData::JsxElement(JsxElementData {
                    tag_name,
                    attributes,
                    children: NodeList::new(),
                    self_closing: true,
                }),
            );
        }

        self.parse_jsx_greater_than(true);
        let children = self.parse_jsx_children();
        let open_tag = self.jsx_tag_text(tag_name);
        self.parse_jsx_closing_tag(Some(&open_tag), in_children);
        self.finish_node(
            start,
            NodeData::JsxElement(JsxElementData {
                tag_name,
                attributes,
                children,
                self_closing: false,
            }),
        )
    }

    /// `div`, `my-element`, `Foo.Bar` or `svg:rect`.
    fn parse_jsx_tag_name(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut tag = self.parse_jsx_name();
        while tag.is_some() && self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_jsx_identifier();
            tag = self.finish_node(
                start,
                NodeData::PropertyAccessExpression(AccessExprData {
                    expression: tag,
                    name_or_argument: name,
                    optional: false,
                }),
            );
        }
        tag
    }

    /// Identifier with dashes, optionally `namespace:name`.
    fn parse_jsx_name(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let name = self.parse_jsx_identifier();
        if name.is_none() || !self.parse_optional(SyntaxKind::ColonToken) {
            return name;
        }
        let local = self.parse_jsx_identifier();
        self.finish_node(
            start,
            NodeData::JsxNamespacedName(JsxNamespacedNameData {
                namespace: name,
                name: local,
            }),
        )
    }

    fn parse_jsx_identifier(&mut self) -> NodeIndex {
        if !self.token().is_identifier_or_keyword() {
            self.parse_error_at_current_token("Identifier expected.");
            return NodeIndex::NONE;
        }
        self.scanner.scan_jsx_identifier();
        self.parse_identifier_name()
    }

    fn parse_jsx_attributes(&mut self) -> NodeList {
        let mut attributes = NodeList::new();
        loop {
            let start = self.token_pos();
            match self.token() {
                SyntaxKind::OpenBraceToken => {
                    self.next_token();
                    self.parse_expected(SyntaxKind::DotDotDotToken);
                    let expression = self.parse_assignment_expression();
                    self.parse_expected(SyntaxKind::CloseBraceToken);
                    attributes.push(self.finish_node(
                        start,
                        NodeData::JsxSpreadAttribute(SpreadData { expression }),
                    ));
                }
                kind if kind.is_identifier_or_keyword() => {
                    let name = self.parse_jsx_name();
                    let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                        self.parse_jsx_attribute_value()
                    } else {
                        NodeIndex::NONE
                    };
                    attributes.push(self.finish_node(
                        start,
                        NodeData::JsxAttribute(JsxAttributeData { name, initializer }),
                    ));
                }
                _ => break,
            }
        }
        attributes
    }

    fn parse_jsx_attribute_value(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::StringLiteral => {
                self.scanner.rescan_jsx_attribute_value();
                self.parse_string_literal()
            }
            SyntaxKind::OpenBraceToken => self.parse_jsx_expression(false),
            SyntaxKind::LessThanToken => {
                self.with_recursion_guard(|p| p.parse_jsx_element_or_fragment(false))
            }
            _ => {
                self.parse_error_at_current_token(
                    "JSX value should be either an expression or a quoted JSX text.",
                );
                NodeIndex::NONE
            }
        }
    }

    /// Text, `{expression}` and nested elements up to `</` or end of file.
    fn parse_jsx_children(&mut self) -> NodeList {
        let mut children = NodeList::new();
        loop {
            let start = self.token_pos();
            match self.token() {
                SyntaxKind::JsxText => {
                    let text = self.scanner.token_value().to_string();
                    self.next_jsx_child_token();
                    children.push(self.finish_node(start, NodeData::JsxText(LiteralData { text })));
                }
                SyntaxKind::OpenBraceToken => children.push(self.parse_jsx_expression(true)),
                SyntaxKind::LessThanToken => {
                    let child =
                        self.with_recursion_guard(|p| p.parse_jsx_element_or_fragment(true));
                    if child.is_none() {
                        break;
                    }
                    children.push(child);
                }
                _ => break,
            }
        }
        children
    }

    /// `{expression}` at the current `{`. Children may be empty (`{}`,
    /// `{/* note */}`) or spread (`{...items}`); attributes may not.
    fn parse_jsx_expression(&mut self, in_children: bool) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let dot_dot_dot_token = in_children && self.parse_optional(SyntaxKind::DotDotDotToken);
        let expression = if self.is_token(SyntaxKind::CloseBraceToken) {
            if !in_children {
                self.parse_error_at_current_token(
                    "JSX attributes must only be assigned a non-empty expression.",
                );
            }
            NodeIndex::NONE
        } else {
            self.parse_expression_allow_in()
        };

        if !in_children {
            self.parse_expected(SyntaxKind::CloseBraceToken);
        } else if self.is_token(SyntaxKind::CloseBraceToken) {
            self.next_jsx_child_token();
        } else {
            self.parse_error_at_current_token("'}' expected.");
        }
        self.finish_node(
            start,
            NodeData::JsxExpression(JsxExpressionData {
                dot_dot_dot_token,
                expression,
            }),
        )
    }

    /// `</tag>` or `</>`; `open_tag` is the opening tag's source text, or
    /// `None` for a fragment.
    fn parse_jsx_closing_tag(&mut self, open_tag: Option<&str>, in_children: bool) {
        let missing_message = match open_tag {
            Some(tag) => format!("Expected corresponding JSX closing tag for '{tag}'."),
            None => "Expected corresponding closing tag for JSX fragment.".to_string(),
        };
        if !self.is_token(SyntaxKind::LessThanSlashToken) {
            self.parse_error_at_current_token(&missing_message);
            return;
        }
        self.next_token();

        if open_tag.is_some() {
            let close = self.parse_jsx_tag_name();
            let close_span = self.arena.get(close).map(|node| (node.pos, node.end));
            if let Some((pos, end)) = close_span
                && Some(self.jsx_tag_text(close).as_str()) != open_tag
            {
                self.parse_error_at(pos, end - pos, &missing_message);
            }
        } else if self.scanner.rescan_greater_than_token() != SyntaxKind::GreaterThanToken {
            self.parse_error_at_current_token(&missing_message);
        }
        self.parse_jsx_greater_than(in_children);
    }

    /// Consume the `>` ending a tag, then scan the next token as a child
    /// when the tag is followed by element content.
    fn parse_jsx_greater_than(&mut self, followed_by_children: bool) {
        if self.scanner.rescan_greater_than_token() != SyntaxKind::GreaterThanToken {
            self.parse_error_at_current_token("'>' expected.");
            return;
        }
        if followed_by_children {
            self.next_jsx_child_token();
        } else {
            self.next_token();
        }
    }

    /// Source text of a tag name node, for matching closing tags.
    fn jsx_tag_text(&self, tag: NodeIndex) -> String {
        self.arena
            .get(tag)
            .and_then(|node| {
                self.scanner
                    .source_text()
                    .get(node.pos as usize..node.end as usize)
            })
            .unwrap_or_default()
            .to_string()
    }
}
