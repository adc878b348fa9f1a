use crate::combination::{Block, CombinationKind};
use crate::{GroupOperand, GroupStep, PatternGroup};
use itertools::Itertools;
use rdf_algebra_model::{Prefix, RdfTerm};
use std::fmt;

impl PatternGroup {
    /// Renders the group as a SPARQL group graph pattern. Groups with a service endpoint are
    /// wrapped in `SERVICE`.
    pub fn to_sparql(&self, prefixes: &[Prefix]) -> String {
        let body = self.body_to_sparql(prefixes);
        match &self.service {
            Some(endpoint) => format!(
                "SERVICE {} {body}",
                RdfTerm::from(endpoint.clone()).to_sparql(prefixes)
            ),
            None => body,
        }
    }

    /// Renders the query sent to a remote endpoint when the group is evaluated as a service.
    pub fn service_query(&self, prefixes: &[Prefix]) -> String {
        format!(
            "{}SELECT * WHERE {}",
            prefix_declarations(prefixes),
            self.body_to_sparql(prefixes)
        )
    }

    fn body_to_sparql(&self, prefixes: &[Prefix]) -> String {
        let mut parts = Vec::new();
        for step in self.plan() {
            match step {
                GroupStep::Combine(block) => {
                    parts.push(render_block(&block, |operand| render_operand(operand, prefixes)));
                }
                GroupStep::Extend(bind) => parts.push(format!(
                    "BIND({} AS {})",
                    bind.expression.to_sparql(prefixes),
                    bind.variable
                )),
            }
        }
        for filter in self.filters() {
            parts.push(format!("FILTER({})", filter.to_sparql(prefixes)));
        }
        if parts.is_empty() {
            "{ }".to_owned()
        } else {
            format!("{{ {} }}", parts.join(" "))
        }
    }
}

fn render_operand(operand: &GroupOperand, prefixes: &[Prefix]) -> String {
    match operand {
        GroupOperand::Pattern(pattern) => pattern.to_sparql(prefixes),
        GroupOperand::Path(path) => path.to_sparql(prefixes),
        GroupOperand::Values(values) => values.to_sparql(prefixes),
    }
}

/// Renders a block: unioned items joined with `UNION`, wrapped in `OPTIONAL` or `MINUS`
/// according to the block's kind.
pub(crate) fn render_block<T>(
    block: &Block<'_, T>,
    render_item: impl Fn(&T) -> String,
) -> String {
    let rendered = block
        .items
        .iter()
        .map(|item| render_item(item))
        .collect::<Vec<_>>();
    let content = match rendered.as_slice() {
        [single] => wrap_braces(single),
        items => format!(
            "{{ {} }}",
            items.iter().map(|item| wrap_braces(item)).join(" UNION ")
        ),
    };
    match block.kind {
        CombinationKind::Join if rendered.len() == 1 => rendered.concat(),
        CombinationKind::Join => content,
        CombinationKind::LeftJoin => format!("OPTIONAL {content}"),
        CombinationKind::Minus => format!("MINUS {content}"),
    }
}

pub(crate) fn prefix_declarations(prefixes: &[Prefix]) -> String {
    prefixes
        .iter()
        .map(|prefix| {
            format!(
                "PREFIX {}: <{}>\n",
                prefix.prefix(),
                prefix.namespace().as_str()
            )
        })
        .collect()
}

fn wrap_braces(content: &str) -> String {
    if content.starts_with('{') && content.ends_with('}') {
        content.to_owned()
    } else {
        format!("{{ {content} }}")
    }
}

impl fmt::Display for PatternGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sparql(&[]))
    }
}
