//! Condition tree processing
//!
//! Turns condition trees into boolean nodes. The compiler only depends on
//! [`ConditionExpression`], so hosts can plug in their own tree shapes.

use crate::compiler::CompilerOptions;
use crate::error::Result;
use crate::operators::build_operator;
use crate::resolver::SegmentResolver;
use rulex_core::condition::{
    ConditionGroup, ConditionParser, ConditionTree, GroupBranch, LeafCondition,
};
use rulex_runtime::Node;

/// What a condition node needs to build itself
pub struct BuildContext<'a> {
    pub resolver: SegmentResolver<'a>,
    /// Node standing for the evaluation target
    pub context: Node,
    pub options: &'a CompilerOptions,
}

/// A node of a condition tree that can produce a boolean node
pub trait ConditionExpression: Send + Sync {
    fn process(&self, ctx: &BuildContext<'_>) -> Result<Node>;
}

impl ConditionExpression for LeafCondition {
    fn process(&self, ctx: &BuildContext<'_>) -> Result<Node> {
        let left = ctx.resolver.resolve_path(ctx.context.clone(), &self.left)?;
        build_operator(self.operator, left, &self.right, ctx.options)
    }
}

impl ConditionExpression for ConditionGroup {
    fn process(&self, ctx: &BuildContext<'_>) -> Result<Node> {
        let mut parts = Vec::new();
        for (branch, items) in self.branches() {
            let children = items
                .iter()
                .map(|item| item.process(ctx))
                .collect::<Result<Vec<_>>>()?;
            parts.push(match branch {
                GroupBranch::All => Node::all(children),
                GroupBranch::Any => Node::any(children),
                GroupBranch::Not => Node::not(Node::all(children)),
            });
        }

        Ok(match parts.len() {
            0 => Node::boolean(true),
            1 => parts.remove(0),
            _ => Node::all(parts),
        })
    }
}

impl ConditionExpression for ConditionTree {
    fn process(&self, ctx: &BuildContext<'_>) -> Result<Node> {
        match self {
            ConditionTree::Leaf(leaf) => leaf.process(ctx),
            ConditionTree::Group(group) => group.process(ctx),
            ConditionTree::Simple(text) => ConditionParser::new().parse_condition(text)?.process(ctx),
        }
    }
}
