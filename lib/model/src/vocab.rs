pub use oxrdf::vocab::{rdf, rdfs, xsd};

/// Vocabulary introduced by RDF 1.2 that is not yet part of [oxrdf].
pub mod rdf_ext {
    use oxrdf::NamedNodeRef;

    /// The datatype of language-tagged strings with a base direction.
    pub const DIR_LANG_STRING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#dirLangString");
}
