mod apply;

use crate::builtin::{compile_pattern, is_valid_language_range};
use crate::{ComparisonFlavor, Expression};
use rdf_algebra_model::{
    ConstructionError, NamedNode, Pattern, Prefix, RdfTerm, TermPattern, Values, Variable,
};
use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A filter that decides whether a row is kept.
///
/// Filters are immutable trees. All validation happens in the constructors of the leaf types
/// ([SubPattern], [LanguageRange], [RegexFilter], [InList]), so a built tree can always be applied.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Filter {
    Bound(Variable),
    IsUri(Variable),
    IsLiteral(Variable),
    IsNumeric(Variable),
    /// Checks the (possibly implicit) datatype of a literal.
    Datatype(Variable, NamedNode),
    LangMatches(Variable, LanguageRange),
    /// Matches against the canonical form of the term, including quotes, language tag, and
    /// datatype.
    Regex(Variable, RegexFilter),
    SameTerm(TermPattern, TermPattern),
    In(Variable, InList),
    Comparison(ComparisonFlavor, TermPattern, TermPattern),
    And(Box<Filter>, Box<Filter>),
    Or(Box<Filter>, Box<Filter>),
    Not(Box<Filter>),
    Exists(SubPattern),
    NotExists(SubPattern),
    Expression(Expression),
    Values(Values),
}

impl Filter {
    pub fn comparison(
        flavor: ComparisonFlavor,
        lhs: impl Into<TermPattern>,
        rhs: impl Into<TermPattern>,
    ) -> Self {
        Filter::Comparison(flavor, lhs.into(), rhs.into())
    }

    pub fn same_term(lhs: impl Into<TermPattern>, rhs: impl Into<TermPattern>) -> Self {
        Filter::SameTerm(lhs.into(), rhs.into())
    }

    pub fn lang_matches(variable: Variable, range: &str) -> Result<Self, ConstructionError> {
        Ok(Filter::LangMatches(variable, LanguageRange::new(range)?))
    }

    pub fn regex(
        variable: Variable,
        pattern: &str,
        flags: Option<&str>,
    ) -> Result<Self, ConstructionError> {
        Ok(Filter::Regex(variable, RegexFilter::new(pattern, flags)?))
    }

    pub fn exists(pattern: Pattern) -> Result<Self, ConstructionError> {
        Ok(Filter::Exists(SubPattern::new(pattern)?))
    }

    pub fn not_exists(pattern: Pattern) -> Result<Self, ConstructionError> {
        Ok(Filter::NotExists(SubPattern::new(pattern)?))
    }

    #[must_use]
    pub fn and(self, other: Filter) -> Self {
        Filter::And(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn or(self, other: Filter) -> Self {
        Filter::Or(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn negate(self) -> Self {
        Filter::Not(Box::new(self))
    }

    /// Returns the patterns of all `EXISTS` and `NOT EXISTS` filters in the tree.
    pub fn sub_patterns(&self) -> Vec<&Pattern> {
        let mut result = Vec::new();
        self.collect_sub_patterns(&mut result);
        result
    }

    fn collect_sub_patterns<'a>(&'a self, result: &mut Vec<&'a Pattern>) {
        match self {
            Filter::Exists(pattern) | Filter::NotExists(pattern) => {
                result.push(pattern.pattern());
            }
            Filter::And(lhs, rhs) | Filter::Or(lhs, rhs) => {
                lhs.collect_sub_patterns(result);
                rhs.collect_sub_patterns(result);
            }
            Filter::Not(inner) => inner.collect_sub_patterns(result),
            _ => {}
        }
    }

    /// Renders the filter as the condition of a SPARQL `FILTER`.
    ///
    /// [Filter::Regex] renders over `STR`, which exposes only the lexical form. [Filter::Values]
    /// renders as a disjunction over its tuples in which an unbound variable matches anything, so
    /// a missing value passes remotely even though it fails locally.
    pub fn to_sparql(&self, prefixes: &[Prefix]) -> String {
        match self {
            Filter::Bound(variable) => format!("BOUND({variable})"),
            Filter::IsUri(variable) => format!("isIRI({variable})"),
            Filter::IsLiteral(variable) => format!("isLITERAL({variable})"),
            Filter::IsNumeric(variable) => format!("isNUMERIC({variable})"),
            Filter::Datatype(variable, datatype) => format!(
                "(DATATYPE({variable}) = {})",
                RdfTerm::from(datatype.clone()).to_sparql(prefixes)
            ),
            Filter::LangMatches(variable, range) => {
                format!(
                    "langMatches(LANG({variable}), {})",
                    RdfTerm::simple_literal(range.as_str())
                )
            }
            Filter::Regex(variable, regex) => {
                let pattern = RdfTerm::simple_literal(regex.pattern());
                match regex.flags() {
                    "" => format!("REGEX(STR({variable}), {pattern})"),
                    flags => format!(
                        "REGEX(STR({variable}), {pattern}, {})",
                        RdfTerm::simple_literal(flags)
                    ),
                }
            }
            Filter::SameTerm(lhs, rhs) => format!(
                "sameTerm({}, {})",
                lhs.to_sparql(prefixes),
                rhs.to_sparql(prefixes)
            ),
            Filter::In(variable, members) => {
                let members = members
                    .members()
                    .iter()
                    .map(|member| {
                        member
                            .as_ref()
                            .map_or_else(|| "UNDEF".to_owned(), |term| term.to_sparql(prefixes))
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("({variable} IN ({members}))")
            }
            Filter::Comparison(flavor, lhs, rhs) => format!(
                "({} {flavor} {})",
                lhs.to_sparql(prefixes),
                rhs.to_sparql(prefixes)
            ),
            Filter::And(lhs, rhs) => format!(
                "({} && {})",
                lhs.to_sparql(prefixes),
                rhs.to_sparql(prefixes)
            ),
            Filter::Or(lhs, rhs) => format!(
                "({} || {})",
                lhs.to_sparql(prefixes),
                rhs.to_sparql(prefixes)
            ),
            Filter::Not(inner) => format!("(!{})", inner.to_sparql(prefixes)),
            Filter::Exists(pattern) => {
                format!("EXISTS {{ {} }}", pattern.pattern().to_sparql(prefixes))
            }
            Filter::NotExists(pattern) => {
                format!("NOT EXISTS {{ {} }}", pattern.pattern().to_sparql(prefixes))
            }
            Filter::Expression(expression) => expression.to_sparql(prefixes),
            Filter::Values(values) => values_condition(values, prefixes),
        }
    }
}

fn values_condition(values: &Values, prefixes: &[Prefix]) -> String {
    let variables = values.variables().collect::<Vec<_>>();
    if values.max_bindings_length() == 0 {
        let unbound = variables
            .iter()
            .map(|variable| format!("!BOUND({variable})"))
            .collect::<Vec<_>>();
        return format!("({})", unbound.join(" && "));
    }

    let tuples = (0..values.max_bindings_length())
        .map(|index| {
            let conditions = variables
                .iter()
                .enumerate()
                .filter_map(|(column, variable)| {
                    let term = values.binding(column, index)?;
                    Some(format!(
                        "(!BOUND({variable}) || sameTerm({variable}, {}))",
                        term.to_sparql(prefixes)
                    ))
                })
                .collect::<Vec<_>>();
            match conditions.as_slice() {
                [] => "true".to_owned(),
                [single] => single.clone(),
                _ => format!("({})", conditions.join(" && ")),
            }
        })
        .collect::<Vec<_>>();
    format!("({})", tuples.join(" || "))
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sparql(&[]))
    }
}

/// The pattern of an `EXISTS` or `NOT EXISTS` filter. Ground patterns are rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubPattern(Pattern);

impl SubPattern {
    pub fn new(pattern: Pattern) -> Result<Self, ConstructionError> {
        if pattern.is_ground() {
            return Err(ConstructionError::GroundSubPattern(pattern.to_string()));
        }
        Ok(Self(pattern))
    }

    pub fn pattern(&self) -> &Pattern {
        &self.0
    }
}

/// A basic language range: `*`, the empty range, or a well-formed language tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LanguageRange(String);

impl LanguageRange {
    pub fn new(range: &str) -> Result<Self, ConstructionError> {
        if !is_valid_language_range(range) {
            return Err(ConstructionError::InvalidLanguageTag(range.to_owned()));
        }
        Ok(Self(range.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A compiled regular expression together with its source pattern and flags.
#[derive(Clone, Debug)]
pub struct RegexFilter {
    pattern: String,
    flags: String,
    regex: Regex,
}

impl RegexFilter {
    pub fn new(pattern: &str, flags: Option<&str>) -> Result<Self, ConstructionError> {
        let regex = compile_pattern(pattern, flags)
            .ok_or_else(|| ConstructionError::InvalidRegex(pattern.to_owned()))?;
        Ok(Self {
            pattern: pattern.to_owned(),
            flags: flags.unwrap_or_default().to_owned(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for RegexFilter {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.flags == other.flags
    }
}

impl Eq for RegexFilter {}

impl Hash for RegexFilter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pattern.hash(state);
        self.flags.hash(state);
    }
}

/// The members of an `IN` filter.
///
/// `None` is an `UNDEF` member. It is kept, but never matches a value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct InList {
    members: Vec<Option<RdfTerm>>,
}

impl InList {
    /// Creates the list from terms. Duplicates are dropped.
    pub fn new(members: impl IntoIterator<Item = Option<RdfTerm>>) -> Self {
        let mut result = Vec::new();
        for member in members {
            if !result.contains(&member) {
                result.push(member);
            }
        }
        Self { members: result }
    }

    /// Creates the list from canonical term strings. Members that cannot be parsed are dropped.
    pub fn parse<'a>(members: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        Self::new(members.into_iter().filter_map(|member| match member {
            Some(member) => RdfTerm::from_str(member).ok().map(Some),
            None => Some(None),
        }))
    }

    pub fn members(&self) -> &[Option<RdfTerm>] {
        &self.members
    }

    pub fn contains(&self, term: &RdfTerm) -> bool {
        self.members
            .iter()
            .any(|member| member.as_ref() == Some(term))
    }
}
