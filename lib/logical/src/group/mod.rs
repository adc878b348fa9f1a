mod render;

pub(crate) use render::{prefix_declarations, render_block};

use crate::combination::{plan_blocks, Block, JoinFlags};
use crate::PropertyPath;
use rdf_algebra_functions::{Expression, Filter};
use rdf_algebra_model::{
    is_reserved_variable, ConstructionError, NamedNode, Pattern, Values, Variable,
};

/// Binds the result of an expression to a fresh variable (`BIND`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Bind {
    pub variable: Variable,
    pub expression: Expression,
}

/// A member that produces a table which is combined with the running result.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupOperand {
    Pattern(Pattern),
    Path(PropertyPath),
    Values(Values),
}

impl GroupOperand {
    pub fn variables(&self) -> Vec<&Variable> {
        match self {
            GroupOperand::Pattern(pattern) => pattern.variables(),
            GroupOperand::Path(path) => path.variables(),
            GroupOperand::Values(values) => values.variables().collect(),
        }
    }
}

impl JoinFlags for GroupOperand {
    fn is_optional(&self) -> bool {
        match self {
            GroupOperand::Pattern(pattern) => pattern.is_optional(),
            GroupOperand::Path(path) => path.is_optional(),
            GroupOperand::Values(_) => false,
        }
    }

    fn is_join_as_union(&self) -> bool {
        match self {
            GroupOperand::Pattern(pattern) => pattern.is_join_as_union(),
            GroupOperand::Path(path) => path.is_join_as_union(),
            GroupOperand::Values(_) => false,
        }
    }

    fn is_join_as_minus(&self) -> bool {
        match self {
            GroupOperand::Pattern(pattern) => pattern.is_join_as_minus(),
            GroupOperand::Path(path) => path.is_join_as_minus(),
            GroupOperand::Values(_) => false,
        }
    }
}

/// A member of a [PatternGroup].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupMember {
    Operand(GroupOperand),
    Bind(Bind),
    Filter(Filter),
}

impl GroupMember {
    /// The variables produced by the member. Filters produce none.
    pub fn variables(&self) -> Vec<&Variable> {
        match self {
            GroupMember::Operand(operand) => operand.variables(),
            GroupMember::Bind(bind) => vec![&bind.variable],
            GroupMember::Filter(_) => Vec::new(),
        }
    }
}

/// One step of evaluating the non-filter members of a group.
#[derive(Debug)]
pub enum GroupStep<'group> {
    /// Evaluate the members of the block and combine them with the running result.
    Combine(Block<'group, GroupOperand>),
    /// Extend the running result with a binding.
    Extend(&'group Bind),
}

/// A bracketed block of patterns, paths, values, binds, and filters.
///
/// The group-level flags decide how the group combines with the groups before it, following the
/// same protocol as the members inside a group. A group with a service endpoint is evaluated by
/// that endpoint instead of the local data source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PatternGroup {
    members: Vec<GroupMember>,
    optional: bool,
    join_as_union: bool,
    join_as_minus: bool,
    service: Option<NamedNode>,
}

impl PatternGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pattern(mut self, pattern: Pattern) -> Result<Self, ConstructionError> {
        check_not_reserved(pattern.variables())?;
        self.members.push(GroupMember::Operand(GroupOperand::Pattern(pattern)));
        Ok(self)
    }

    /// Adds a property path. Paths without steps are rejected.
    pub fn add_path(mut self, path: PropertyPath) -> Result<Self, ConstructionError> {
        path.compile()?;
        self.members.push(GroupMember::Operand(GroupOperand::Path(path)));
        Ok(self)
    }

    pub fn add_values(mut self, values: Values) -> Result<Self, ConstructionError> {
        check_not_reserved(values.variables())?;
        self.members.push(GroupMember::Operand(GroupOperand::Values(values)));
        Ok(self)
    }

    /// Adds a binding. The variable must not be produced by any member added before.
    pub fn add_bind(
        mut self,
        variable: Variable,
        expression: Expression,
    ) -> Result<Self, ConstructionError> {
        check_not_reserved([&variable])?;
        if self.variables().contains(&&variable) {
            return Err(ConstructionError::VariableAlreadyBound(variable.to_string()));
        }
        self.members
            .push(GroupMember::Bind(Bind { variable, expression }));
        Ok(self)
    }

    #[must_use]
    pub fn add_filter(mut self, filter: Filter) -> Self {
        self.members.push(GroupMember::Filter(filter));
        self
    }

    #[must_use]
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Marks the group to be unioned with the next group. Clears `join_as_minus`.
    #[must_use]
    pub fn with_join_as_union(mut self, join_as_union: bool) -> Self {
        self.join_as_union = join_as_union;
        if join_as_union {
            self.join_as_minus = false;
        }
        self
    }

    /// Marks the next group to be subtracted from the result. Clears `join_as_union`.
    #[must_use]
    pub fn with_join_as_minus(mut self, join_as_minus: bool) -> Self {
        self.join_as_minus = join_as_minus;
        if join_as_minus {
            self.join_as_union = false;
        }
        self
    }

    /// Delegates the evaluation of the group to a remote endpoint.
    #[must_use]
    pub fn with_service(mut self, endpoint: NamedNode) -> Self {
        self.service = Some(endpoint);
        self
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn service(&self) -> Option<&NamedNode> {
        self.service.as_ref()
    }

    /// The distinct variables of all non-filter members, in order of appearance.
    pub fn variables(&self) -> Vec<&Variable> {
        let mut result = Vec::new();
        for variable in self.members.iter().flat_map(GroupMember::variables) {
            if !result.contains(&variable) {
                result.push(variable);
            }
        }
        result
    }

    /// The filters of the group, in declaration order.
    pub fn filters(&self) -> impl Iterator<Item = &Filter> {
        self.members.iter().filter_map(|member| match member {
            GroupMember::Filter(filter) => Some(filter),
            _ => None,
        })
    }

    /// Plans the evaluation of the non-filter members.
    ///
    /// Binds split the members into segments. Within a segment, members are grouped into
    /// blocks by [plan_blocks].
    pub fn plan(&self) -> Vec<GroupStep<'_>> {
        let mut steps = Vec::new();
        let mut segment = Vec::new();
        for member in &self.members {
            match member {
                GroupMember::Filter(_) => {}
                GroupMember::Bind(bind) => {
                    steps.extend(
                        plan_blocks(segment.drain(..)).into_iter().map(GroupStep::Combine),
                    );
                    steps.push(GroupStep::Extend(bind));
                }
                GroupMember::Operand(operand) => segment.push(operand),
            }
        }
        steps.extend(plan_blocks(segment).into_iter().map(GroupStep::Combine));
        steps
    }
}

impl JoinFlags for PatternGroup {
    fn is_optional(&self) -> bool {
        self.optional
    }

    fn is_join_as_union(&self) -> bool {
        self.join_as_union
    }

    fn is_join_as_minus(&self) -> bool {
        self.join_as_minus
    }
}

fn check_not_reserved<'a>(
    variables: impl IntoIterator<Item = &'a Variable>,
) -> Result<(), ConstructionError> {
    match variables.into_iter().find(|v| is_reserved_variable(v)) {
        Some(variable) => Err(ConstructionError::ReservedVariable(variable.to_string())),
        None => Ok(()),
    }
}
