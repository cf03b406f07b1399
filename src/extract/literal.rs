use crate::extract::model::{MessageDescription, NodeKind, SyntaxNode};

/// Find the first string literal under `node` in pre-order, `node` included.
///
/// Later literals never influence the result. Returns `None` once the subtree
/// is exhausted without a literal.
pub fn find_string_literal<N: SyntaxNode>(node: &N) -> Option<MessageDescription> {
    if node.kind() == NodeKind::StringLiteral {
        return Some(describe_literal(node));
    }

    let mut stack: Vec<N> = node.children();
    stack.reverse();

    while let Some(current) = stack.pop() {
        if current.kind() == NodeKind::StringLiteral {
            return Some(describe_literal(&current));
        }
        let mut children = current.children();
        children.reverse();
        stack.extend(children);
    }

    None
}

fn describe_literal<N: SyntaxNode>(node: &N) -> MessageDescription {
    let message = node
        .tokens()
        .first()
        .map(|token| unquote(token).to_string())
        .unwrap_or_default();

    MessageDescription {
        source_range: node.source_range(),
        message,
    }
}

/// Strip exactly one leading and one trailing `"` from a literal spelling.
///
/// Encoding prefixes (`L`, `u`, `U`, `u8`) are dropped with the opening quote.
/// Raw literals (`R"delim(...)delim"`) lose their delimiters as well. Escape
/// sequences are left as spelled. A spelling without both quotes comes back
/// unchanged.
pub fn unquote(spelling: &str) -> &str {
    let Some(open) = spelling.find('"') else {
        return spelling;
    };
    let prefix = &spelling[..open];
    if !is_encoding_prefix(prefix) {
        return spelling;
    }

    let Some(body) = spelling[open + 1..].strip_suffix('"') else {
        return spelling;
    };

    if prefix.ends_with('R') {
        if let Some(raw) = strip_raw_delimiters(body) {
            return raw;
        }
    }

    body
}

fn is_encoding_prefix(prefix: &str) -> bool {
    matches!(
        prefix,
        "" | "L" | "u" | "U" | "u8" | "R" | "LR" | "uR" | "UR" | "u8R"
    )
}

fn strip_raw_delimiters(body: &str) -> Option<&str> {
    let open = body.find('(')?;
    let delimiter = &body[..open];
    let inner = body[open + 1..].strip_suffix(delimiter)?;
    inner.strip_suffix(')')
}
