mod binding_table;
mod cell;
mod row;

pub use binding_table::BindingTable;
pub use cell::Cell;
pub use row::BindingRow;
