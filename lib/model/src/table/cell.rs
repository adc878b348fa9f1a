use crate::RdfTerm;

/// The content of a single variable in a [BindingRow](crate::BindingRow).
///
/// A row distinguishes between a variable that is not part of its schema at all and a variable
/// whose column exists but carries no value for this row (e.g., after an unmatched OPTIONAL).
/// Filters treat these two cases differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell<'row> {
    /// The variable is not a column of the row.
    NoColumn,
    /// The column exists, but the row has no value.
    NoValue,
    /// The column is bound to a term.
    Value(&'row RdfTerm),
}

impl<'row> Cell<'row> {
    /// Returns the bound term, if any.
    pub fn term(self) -> Option<&'row RdfTerm> {
        match self {
            Cell::Value(term) => Some(term),
            Cell::NoColumn | Cell::NoValue => None,
        }
    }

    pub fn is_column_present(self) -> bool {
        !matches!(self, Cell::NoColumn)
    }

    pub fn is_bound(self) -> bool {
        matches!(self, Cell::Value(_))
    }
}

impl<'row> From<Option<&'row Option<RdfTerm>>> for Cell<'row> {
    fn from(value: Option<&'row Option<RdfTerm>>) -> Self {
        match value {
            None => Cell::NoColumn,
            Some(None) => Cell::NoValue,
            Some(Some(term)) => Cell::Value(term),
        }
    }
}
