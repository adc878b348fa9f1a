use crate::rdf::literal::PlainLiteral;
use crate::{RdfTerm, TermParseError};
use oxrdf::{BlankNode, NamedNode};
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

/// Parses the canonical string form of a term.
///
/// Supported forms are `<iri>`, `_:id`, `"lexical"`, `"lexical"@tag`, `"lexical"@tag--ltr`, and
/// `"lexical"^^<datatype>`. Literal values use the N-Triples escape sequences.
impl FromStr for RdfTerm {
    type Err = TermParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let mut chars = input.char_indices().peekable();
        let term = match chars.next() {
            Some((_, '<')) => RdfTerm::Resource(NamedNode::new(read_iri(&mut chars)?)?),
            Some((_, '_')) => {
                expect(&mut chars, ':')?;
                let id: String = chars.by_ref().map(|(_, c)| c).collect();
                RdfTerm::BlankNode(BlankNode::new(id)?)
            }
            Some((_, '"')) => read_literal(&mut chars)?,
            Some((position, found)) => {
                return Err(TermParseError::UnexpectedChar { found, position })
            }
            None => return Err(TermParseError::UnexpectedEnd),
        };
        match chars.next() {
            None => Ok(term),
            Some((position, found)) => Err(TermParseError::UnexpectedChar { found, position }),
        }
    }
}

fn expect(chars: &mut Peekable<CharIndices<'_>>, expected: char) -> Result<(), TermParseError> {
    match chars.next() {
        Some((_, c)) if c == expected => Ok(()),
        Some((position, found)) => Err(TermParseError::UnexpectedChar { found, position }),
        None => Err(TermParseError::UnexpectedEnd),
    }
}

fn read_iri(chars: &mut Peekable<CharIndices<'_>>) -> Result<String, TermParseError> {
    let mut iri = String::new();
    loop {
        match chars.next() {
            Some((_, '>')) => return Ok(iri),
            Some((_, c)) => iri.push(c),
            None => return Err(TermParseError::UnexpectedEnd),
        }
    }
}

fn read_literal(chars: &mut Peekable<CharIndices<'_>>) -> Result<RdfTerm, TermParseError> {
    let mut value = String::new();
    loop {
        match chars.next() {
            Some((_, '"')) => break,
            Some((_, '\\')) => value.push(read_escape(chars)?),
            Some((_, c)) => value.push(c),
            None => return Err(TermParseError::UnexpectedEnd),
        }
    }

    match chars.peek() {
        Some((_, '@')) => {
            chars.next();
            let tag: String = chars.by_ref().map(|(_, c)| c).collect();
            Ok(RdfTerm::PlainLiteral(PlainLiteral::new_language_tagged(
                value, &tag,
            )?))
        }
        Some((_, '^')) => {
            chars.next();
            expect(chars, '^')?;
            expect(chars, '<')?;
            let datatype = NamedNode::new(read_iri(chars)?)?;
            Ok(RdfTerm::typed_literal(value, datatype))
        }
        _ => Ok(RdfTerm::simple_literal(value)),
    }
}

fn read_escape(chars: &mut Peekable<CharIndices<'_>>) -> Result<char, TermParseError> {
    let (_, c) = chars.next().ok_or(TermParseError::UnexpectedEnd)?;
    match c {
        't' => Ok('\t'),
        'b' => Ok('\u{8}'),
        'n' => Ok('\n'),
        'r' => Ok('\r'),
        'f' => Ok('\u{C}'),
        '"' => Ok('"'),
        '\'' => Ok('\''),
        '\\' => Ok('\\'),
        'u' => read_code_point(chars, 4),
        'U' => read_code_point(chars, 8),
        other => Err(TermParseError::InvalidEscape(other.to_string())),
    }
}

fn read_code_point(
    chars: &mut Peekable<CharIndices<'_>>,
    len: usize,
) -> Result<char, TermParseError> {
    let hex: String = chars.by_ref().take(len).map(|(_, c)| c).collect();
    if hex.chars().count() != len {
        return Err(TermParseError::UnexpectedEnd);
    }
    u32::from_str_radix(&hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or(TermParseError::InvalidEscape(hex))
}
