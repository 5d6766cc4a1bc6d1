//! Equation tree → LaTeX conversion.

use crate::error::{Error, Result};
use crate::ir::{DocTree, NodeId, NodeKind};

use super::escape::latex_sanitize;

/// Convert an equation or equation function node to LaTeX.
///
/// Children are visited left to right:
/// - a function contributes `code{` followed by its own rendering, which
///   closes with `}`;
/// - an argument separator closes the current argument with `}{`;
/// - a symbol contributes its code and a space;
/// - text contributes its LaTeX-escaped content and a space.
///
/// The result is not trimmed; callers trim before wrapping it in `$`.
pub fn render_equation(tree: &DocTree, id: NodeId) -> String {
    let mut equation = String::new();

    for child_id in tree.children(id) {
        let Some(child) = tree.node(child_id) else {
            continue;
        };

        match child.kind {
            NodeKind::EquationFunction => {
                equation.push_str(tree.attributes.code(child_id).unwrap_or(""));
                equation.push('{');
                equation.push_str(&render_equation(tree, child_id));
            }
            NodeKind::EquationArgumentSeparator => {
                trim_in_place(&mut equation);
                equation.push_str("}{");
            }
            NodeKind::EquationSymbol => {
                equation.push_str(tree.attributes.code(child_id).unwrap_or(""));
                equation.push(' ');
            }
            NodeKind::Text => {
                equation.push_str(&latex_sanitize(tree.text(child.text)));
                equation.push(' ');
            }
            kind => log::trace!("ignoring {kind:?} inside equation"),
        }
    }

    if tree.node(id).is_some_and(|n| n.kind == NodeKind::EquationFunction) {
        trim_in_place(&mut equation);
        equation.push('}');
    }

    equation
}

/// Find the equation enclosing `id` and render it as inline math.
///
/// Starts at `id` itself and walks up through the parents, so any node
/// inside an equation (or the equation node) can be passed.
///
/// # Examples
///
/// ```
/// use mdmaker::ir::{DocTree, NodeKind};
/// use mdmaker::markdown::equation_at;
///
/// let mut tree = DocTree::default();
/// let para = tree.add_paragraph(tree.root(), 0);
/// let eq = tree.add(para, NodeKind::Equation);
/// let sym = tree.add_equation_part(eq, NodeKind::EquationSymbol, "\\pi");
///
/// assert_eq!(equation_at(&tree, sym).unwrap(), "$\\pi$");
/// assert!(equation_at(&tree, para).is_err());
/// ```
pub fn equation_at(tree: &DocTree, id: NodeId) -> Result<String> {
    if tree.node(id).is_none() {
        return Err(Error::InvalidNode(id));
    }

    let equation = tree
        .ancestors(id)
        .find(|&ancestor| tree.node(ancestor).is_some_and(|n| n.kind == NodeKind::Equation))
        .ok_or(Error::NoEquation)?;

    Ok(format!("${}$", render_equation(tree, equation).trim()))
}

fn trim_in_place(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}
