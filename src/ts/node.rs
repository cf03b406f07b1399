//! Declaration view over a tree-sitter C/C++ tree.
//!
//! Tree-sitter groups all declarators of `Span a, b;` under one `declaration`
//! node with a shared `type` field. A compiler front end reports one variable
//! declaration per declarator instead, so this view splits them: every
//! variable declarator becomes its own [`NodeKind::VariableDeclaration`] node
//! carrying the shared type.

use crate::extract::{NodeKind, SourcePosition, SourceRange, SyntaxNode};
use crate::ts::parser::ParsedSource;
use tree_sitter::{Node, Point};

/// Literal kinds whose spelling is a single token.
const ATOMIC_TOKENS: &[&str] = &[
    "string_literal",
    "raw_string_literal",
    "char_literal",
    "system_lib_string",
];

#[derive(Debug, Clone, Copy)]
enum Role<'t> {
    Plain,
    Variable {
        ty: Option<Node<'t>>,
        /// Initializer recorded beside the declarator rather than inside it,
        /// as in `if (Span s = make())` or `static Span s = ...;` members.
        initializer: Option<Node<'t>>,
    },
}

/// A node of the declaration view, borrowing the parsed source.
#[derive(Debug, Clone, Copy)]
pub struct CppNode<'t> {
    node: Node<'t>,
    parsed: &'t ParsedSource,
    role: Role<'t>,
}

/// Where a node declares variables and which field holds a detached initializer.
struct DeclarationContext<'t> {
    ty: Option<Node<'t>>,
    detached_field: Option<&'static str>,
}

/// Declarator chain summary: the declared name and the wrappers around it.
struct DeclaratorShape<'t> {
    name: Option<Node<'t>>,
    innermost_wrapper: Option<&'static str>,
    indirect: bool,
}

impl<'t> CppNode<'t> {
    pub(crate) fn root(parsed: &'t ParsedSource) -> Self {
        Self {
            node: parsed.tree.root_node(),
            parsed,
            role: Role::Plain,
        }
    }

    fn plain(&self, node: Node<'t>) -> Self {
        Self {
            node,
            parsed: self.parsed,
            role: Role::Plain,
        }
    }

    fn declaration_context(&self) -> Option<DeclarationContext<'t>> {
        let ty = self.node.child_by_field_name("type");
        match self.node.kind() {
            "declaration" => Some(DeclarationContext {
                ty,
                detached_field: Some("value"),
            }),
            "for_range_loop" => Some(DeclarationContext {
                ty,
                detached_field: None,
            }),
            "field_declaration" if self.is_static_member() => Some(DeclarationContext {
                ty,
                detached_field: Some("default_value"),
            }),
            _ => None,
        }
    }

    fn is_static_member(&self) -> bool {
        let mut cursor = self.node.walk();
        let is_static = self.node.named_children(&mut cursor).any(|child| {
            child.kind() == "storage_class_specifier" && text_of(self.parsed, child) == "static"
        });
        is_static
    }

    fn plain_children(&self) -> Vec<Self> {
        let mut fields: Vec<(Option<&'static str>, Node<'t>)> = Vec::new();
        let mut cursor = self.node.walk();
        if cursor.goto_first_child() {
            loop {
                let child = cursor.node();
                if child.is_named() {
                    fields.push((cursor.field_name(), child));
                }
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }

        let context = match self.role {
            Role::Plain => self.declaration_context(),
            Role::Variable { .. } => None,
        };
        let Some(context) = context else {
            return fields.into_iter().map(|(_, child)| self.plain(child)).collect();
        };

        // A detached initializer belongs to the declarator right before it.
        let mut children: Vec<Self> = Vec::with_capacity(fields.len());
        let mut open_declarator: Option<usize> = None;
        for (field, child) in fields {
            if field.is_some() && field == context.detached_field {
                if let Some(index) = open_declarator.take() {
                    if let Role::Variable { initializer, .. } = &mut children[index].role {
                        *initializer = Some(child);
                        continue;
                    }
                }
                children.push(self.plain(child));
            } else if field == Some("declarator") && is_variable_declarator(child) {
                open_declarator = Some(children.len());
                children.push(Self {
                    node: child,
                    parsed: self.parsed,
                    role: Role::Variable {
                        ty: context.ty,
                        initializer: None,
                    },
                });
            } else {
                if child.kind() != "comment" {
                    open_declarator = None;
                }
                children.push(self.plain(child));
            }
        }
        children
    }

    /// Expression a variable is initialized from, wherever the grammar put it.
    fn initializer_value(&self) -> Option<Node<'t>> {
        match self.role {
            Role::Variable {
                initializer: Some(initializer),
                ..
            } => Some(initializer),
            Role::Variable { .. } if self.node.kind() == "init_declarator" => {
                self.node.child_by_field_name("value")
            }
            _ => None,
        }
    }

    fn position(&self, byte: usize, point: Point) -> SourcePosition {
        SourcePosition {
            file: self.parsed.path.clone(),
            line: point.row + 1,
            column: point.column + 1,
            offset: byte,
        }
    }
}

impl<'t> SyntaxNode for CppNode<'t> {
    fn kind(&self) -> NodeKind {
        if let Role::Variable { .. } = self.role {
            return NodeKind::VariableDeclaration;
        }
        match self.node.kind() {
            "translation_unit" => NodeKind::TranslationUnit,
            "string_literal" | "raw_string_literal" | "concatenated_string" => {
                NodeKind::StringLiteral
            }
            _ => NodeKind::Other,
        }
    }

    fn display_name(&self) -> String {
        match self.role {
            Role::Variable { .. } => declarator_shape(self.node)
                .name
                .map(|name| unqualified_name(self.parsed, name))
                .unwrap_or_default(),
            Role::Plain => String::new(),
        }
    }

    fn type_declaration_name(&self) -> Option<String> {
        let Role::Variable { ty, .. } = self.role else {
            return None;
        };
        if declarator_shape(self.node).indirect {
            return None;
        }
        let ty = ty?;
        if matches!(ty.kind(), "placeholder_type_specifier" | "auto") {
            let constructed = self
                .initializer_value()
                .and_then(|value| constructed_type_name(self.parsed, value));
            if constructed.is_some() {
                return constructed;
            }
        }
        type_display_name(self.parsed, ty)
    }

    fn children(&self) -> Vec<Self> {
        match self.role {
            Role::Plain => self.plain_children(),
            Role::Variable { initializer, .. } => {
                let mut children = self.plain_children();
                if let Some(initializer) = initializer {
                    children.push(self.plain(initializer));
                }
                children
            }
        }
    }

    fn source_range(&self) -> SourceRange {
        let (start, end) = match self.role {
            Role::Plain => (self.node, self.node),
            Role::Variable { ty, initializer } => {
                (ty.unwrap_or(self.node), initializer.unwrap_or(self.node))
            }
        };
        SourceRange {
            start: self.position(start.start_byte(), start.start_position()),
            end: self.position(end.end_byte(), end.end_position()),
        }
    }

    fn tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        match self.role {
            Role::Plain if self.node.kind() == "concatenated_string" => {
                let mut cursor = self.node.walk();
                for piece in self.node.named_children(&mut cursor) {
                    tokens.push(text_of(self.parsed, piece).to_string());
                }
            }
            Role::Plain => leaf_tokens(self.parsed, self.node, &mut tokens),
            Role::Variable { ty, initializer } => {
                if let Some(ty) = ty {
                    leaf_tokens(self.parsed, ty, &mut tokens);
                }
                leaf_tokens(self.parsed, self.node, &mut tokens);
                if let Some(initializer) = initializer {
                    leaf_tokens(self.parsed, initializer, &mut tokens);
                }
            }
        }
        tokens
    }
}

fn text_of<'t>(parsed: &'t ParsedSource, node: Node<'_>) -> &'t str {
    &parsed.source[node.byte_range()]
}

/// Follow the declarator chain down to the declared name.
fn declarator_shape(declarator: Node<'_>) -> DeclaratorShape<'_> {
    let mut current = declarator;
    let mut innermost_wrapper = None;
    let mut indirect = false;

    loop {
        let kind = current.kind();
        match kind {
            "init_declarator" | "attributed_declarator" | "parenthesized_declarator" => {}
            "pointer_declarator" | "reference_declarator" | "array_declarator"
            | "function_declarator" => {
                innermost_wrapper = Some(kind);
                indirect = true;
            }
            _ => {
                return DeclaratorShape {
                    name: Some(current),
                    innermost_wrapper,
                    indirect,
                }
            }
        }

        match inner_declarator(current) {
            Some(inner) => current = inner,
            None => {
                return DeclaratorShape {
                    name: None,
                    innermost_wrapper,
                    indirect,
                }
            }
        }
    }
}

fn inner_declarator(node: Node<'_>) -> Option<Node<'_>> {
    node.child_by_field_name("declarator")
        .or_else(|| node.named_child(0))
}

/// A declarator names a variable unless the name is directly a function's.
fn is_variable_declarator(declarator: Node<'_>) -> bool {
    declarator_shape(declarator).innermost_wrapper != Some("function_declarator")
}

/// Declared name without any `scope::` qualification.
fn unqualified_name(parsed: &ParsedSource, name: Node<'_>) -> String {
    let mut current = name;
    while current.kind() == "qualified_identifier" {
        match current.child_by_field_name("name") {
            Some(inner) => current = inner,
            None => break,
        }
    }
    match current.kind() {
        "structured_binding_declarator" => String::new(),
        _ => text_of(parsed, current).to_string(),
    }
}

/// Display name of the declaration a type specifier refers to.
///
/// Mirrors how a compiler names the declaration itself: unqualified, tag
/// keywords dropped, template arguments kept.
fn type_display_name(parsed: &ParsedSource, ty: Node<'_>) -> Option<String> {
    match ty.kind() {
        "qualified_identifier" => type_display_name(parsed, ty.child_by_field_name("name")?),
        "struct_specifier" | "class_specifier" | "union_specifier" | "enum_specifier" => {
            type_display_name(parsed, ty.child_by_field_name("name")?)
        }
        "template_type" | "template_function" => {
            let name = type_display_name(parsed, ty.child_by_field_name("name")?)?;
            let arguments = ty
                .child_by_field_name("arguments")
                .map(|args| spell_compact(parsed, args))
                .unwrap_or_default();
            Some(format!("{name}{arguments}"))
        }
        _ => Some(spell_compact(parsed, ty)),
    }
}

/// Type named by a direct construction: `Span("x")`, `ns::Span("x")` or `Span{"x"}`.
///
/// Used for `auto` variables. Any other initializer leaves the type undeduced.
fn constructed_type_name(parsed: &ParsedSource, value: Node<'_>) -> Option<String> {
    match value.kind() {
        "call_expression" => {
            let callee = value.child_by_field_name("function")?;
            match callee.kind() {
                "identifier" | "qualified_identifier" | "template_function" => {
                    type_display_name(parsed, callee)
                }
                _ => None,
            }
        }
        "compound_literal_expression" => {
            type_display_name(parsed, value.child_by_field_name("type")?)
        }
        _ => None,
    }
}

/// Join a node's tokens, keeping a space only between two word tokens.
fn spell_compact(parsed: &ParsedSource, node: Node<'_>) -> String {
    let mut tokens = Vec::new();
    leaf_tokens(parsed, node, &mut tokens);

    let mut spelled = String::new();
    for token in tokens {
        let joins_words = spelled.chars().last().is_some_and(is_word_char)
            && token.chars().next().is_some_and(is_word_char);
        if joins_words {
            spelled.push(' ');
        }
        spelled.push_str(&token);
    }
    spelled
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Spelled leaf tokens under `node`, literals kept whole.
fn leaf_tokens(parsed: &ParsedSource, node: Node<'_>, out: &mut Vec<String>) {
    let mut cursor = node.walk();

    loop {
        let current = cursor.node();
        let atomic = ATOMIC_TOKENS.contains(&current.kind());

        if !atomic && cursor.goto_first_child() {
            continue;
        }

        let text = text_of(parsed, current);
        let is_leaf = atomic || current.child_count() == 0;
        if is_leaf && !text.is_empty() && current.kind() != "comment" {
            out.push(text.to_string());
        }

        loop {
            if cursor.node() == node {
                return;
            }
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}
