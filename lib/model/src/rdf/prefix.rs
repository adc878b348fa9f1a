use oxrdf::NamedNode;

/// A namespace prefix used when rendering terms as SPARQL text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Prefix {
    prefix: String,
    namespace: NamedNode,
}

impl Prefix {
    pub fn new(prefix: impl Into<String>, namespace: NamedNode) -> Self {
        Self {
            prefix: prefix.into(),
            namespace,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn namespace(&self) -> &NamedNode {
        &self.namespace
    }
}

/// Renders `iri` as a prefixed name if one of `prefixes` covers it, otherwise as `<iri>`.
///
/// The longest matching namespace wins. Local names that cannot be written as a prefixed
/// name fall back to the full IRI.
pub fn render_iri(iri: &str, prefixes: &[Prefix]) -> String {
    prefixes
        .iter()
        .filter_map(|prefix| {
            let local = iri.strip_prefix(prefix.namespace.as_str())?;
            is_local_name(local).then_some((prefix, local))
        })
        .max_by_key(|(prefix, _)| prefix.namespace.as_str().len())
        .map_or_else(
            || format!("<{iri}>"),
            |(prefix, local)| format!("{}:{local}", prefix.prefix),
        )
}

fn is_local_name(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        None => true,
        Some(first) if first.is_alphanumeric() || first == '_' => {
            !local.ends_with('.')
                && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        }
        Some(_) => false,
    }
}
