use crate::extract::literal::find_string_literal;
use crate::extract::model::{NodeKind, SpanDescription, SyntaxNode};
use serde::Deserialize;

/// Type name matched when nothing else is configured.
pub const DEFAULT_TYPE_NAME: &str = "Span";

/// What to do with the children of a declaration whose type does not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Descent {
    /// Keep walking below every declaration.
    #[default]
    Always,
    /// Skip the subtree of a non-matching declaration.
    StopAtMismatch,
}

/// Walks a syntax tree and records every variable declaration of the target type.
#[derive(Debug, Clone)]
pub struct SpanCollector {
    type_name: String,
    descent: Descent,
}

impl SpanCollector {
    pub fn new(type_name: impl Into<String>, descent: Descent) -> Self {
        Self {
            type_name: type_name.into(),
            descent,
        }
    }

    /// Append one entry per matching declaration to `out`, in pre-order.
    ///
    /// Type names are compared with exact string equality: `ns::Span` or
    /// `Span<int>` do not match `Span` unless the front end reports the bare name.
    pub fn collect<N: SyntaxNode>(&self, root: N, out: &mut Vec<SpanDescription>) {
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            if node.kind() == NodeKind::VariableDeclaration {
                if self.matches(&node) {
                    out.push(SpanDescription {
                        variable_name: node.display_name(),
                        message_description: find_string_literal(&node),
                    });
                } else if self.descent == Descent::StopAtMismatch {
                    continue;
                }
            }

            let mut children = node.children();
            children.reverse();
            stack.extend(children);
        }
    }

    fn matches<N: SyntaxNode>(&self, node: &N) -> bool {
        node.type_declaration_name().as_deref() == Some(self.type_name.as_str())
    }
}

impl Default for SpanCollector {
    fn default() -> Self {
        Self::new(DEFAULT_TYPE_NAME, Descent::default())
    }
}
