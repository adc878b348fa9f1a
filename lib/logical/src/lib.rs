//! Logical descriptions of queries: property paths, pattern groups, aggregators, and queries.
//!
//! The types in this crate are validated when they are built. Evaluating them is the concern of
//! the engine.

mod aggregator;
mod combination;
mod group;
mod paths;
mod query;

pub use aggregator::{AggregateFunction, Aggregator, Having};
pub use combination::{plan_blocks, Block, CombinationKind, JoinFlags};
pub use group::{Bind, GroupMember, GroupOperand, GroupStep, PatternGroup};
pub use paths::{PathStep, PathStepGroup, PropertyPath};
pub use query::{AskQuery, SelectQuery};
