use rdf_algebra_model::Pattern;

/// The flags that decide how an item combines with the items before it.
///
/// Implemented by the members of a group and by groups themselves, which follow the same
/// protocol one level up.
pub trait JoinFlags {
    fn is_optional(&self) -> bool;
    fn is_join_as_union(&self) -> bool;
    fn is_join_as_minus(&self) -> bool;
}

impl JoinFlags for Pattern {
    fn is_optional(&self) -> bool {
        Pattern::is_optional(self)
    }

    fn is_join_as_union(&self) -> bool {
        Pattern::is_join_as_union(self)
    }

    fn is_join_as_minus(&self) -> bool {
        Pattern::is_join_as_minus(self)
    }
}

/// How a block is combined with the running result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombinationKind {
    /// Natural join on the shared variables.
    Join,
    /// Left outer join: rows without a partner are kept.
    LeftJoin,
    /// Removes the rows that have a compatible partner in the block.
    Minus,
}

/// A run of items that are unioned and then combined with the running result.
#[derive(Debug, PartialEq, Eq)]
pub struct Block<'item, T> {
    pub kind: CombinationKind,
    pub items: Vec<&'item T>,
}

/// Splits `items` into [Block]s.
///
/// A block extends while its current item carries `join_as_union`. A block is subtracted if the
/// item preceding it carries `join_as_minus`, left-joined if its first item is optional, and
/// joined otherwise.
pub fn plan_blocks<'item, T: JoinFlags>(
    items: impl IntoIterator<Item = &'item T>,
) -> Vec<Block<'item, T>> {
    let mut blocks: Vec<Block<'item, T>> = Vec::new();
    let mut previous: Option<&'item T> = None;

    for item in items {
        let extends_union = previous.is_some_and(JoinFlags::is_join_as_union);
        match blocks.last_mut() {
            Some(block) if extends_union => block.items.push(item),
            _ => {
                let kind = if previous.is_some_and(JoinFlags::is_join_as_minus) {
                    CombinationKind::Minus
                } else if item.is_optional() {
                    CombinationKind::LeftJoin
                } else {
                    CombinationKind::Join
                };
                blocks.push(Block {
                    kind,
                    items: vec![item],
                });
            }
        }
        previous = Some(item);
    }
    blocks
}
