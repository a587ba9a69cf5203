//! Immutable grammar schema: sequences, branches, groups.
//!
//! A grammar is built once per command definition through the builder
//! types here, validated, and then shared read-only across every parse.
//! Nodes live in an arena indexed by [`NodeId`] and a sequence is an
//! ordered list of node indices, so the grammar stays a finite, acyclic,
//! indexable structure with no recursive ownership.

use crate::dispatch::DispatchId;
use crate::error::{GrammarError, MSG_INVALID, MSG_MANDATORY};
use crate::spec::ArgumentSpec;

/// Index of a node in the grammar arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

/// One node of a grammar path.
#[derive(Clone, Debug)]
pub enum Node {
    /// A single argument spec.
    Spec(ArgumentSpec),
    /// Sibling branches sharing fallback messages.
    Group(Group),
}

/// An ordered list of nodes defining one grammar path.
#[derive(Clone, Debug, Default)]
pub struct Sequence {
    pub(crate) nodes: Vec<NodeId>,
}

/// A sequence tagged with the identifier to dispatch to on success.
#[derive(Clone, Debug)]
pub struct Branch {
    pub(crate) dispatch: DispatchId,
    pub(crate) sequence: Sequence,
}

impl Branch {
    /// The identifier this branch dispatches to.
    #[must_use]
    pub fn dispatch(&self) -> &DispatchId {
        &self.dispatch
    }
}

/// Ordered sibling branches with overridable failure messages.
#[derive(Clone, Debug)]
pub struct Group {
    pub(crate) branches: Vec<Branch>,
    pub(crate) msg_error: String,
    pub(crate) msg_mandatory: String,
}

/// A compiled, immutable grammar for one command definition.
///
/// Compiled once when the command is registered; parsing never mutates
/// it, so a single grammar is shared across any number of concurrent
/// sessions without locking.
#[derive(Clone, Debug)]
pub struct Grammar {
    pub(crate) arena: Vec<Node>,
    pub(crate) root: Sequence,
    pub(crate) default_dispatch: DispatchId,
}

impl Grammar {
    /// Compiles a builder into an immutable grammar.
    ///
    /// `default_dispatch` is selected when the matched path carries no
    /// branch of its own (a grammar without groups).
    ///
    /// # Errors
    ///
    /// Rejects duplicate destination names along one grammar path,
    /// groups without branches, and sequences with more than one group.
    pub fn compile(
        default_dispatch: impl Into<DispatchId>,
        root: SequenceBuilder,
    ) -> Result<Self, GrammarError> {
        let mut arena = Vec::new();
        let mut seen = Vec::new();
        let root = flatten(&mut arena, root, &mut seen)?;
        Ok(Self {
            arena,
            root,
            default_dispatch: default_dispatch.into(),
        })
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.arena[id.0]
    }

    /// All dispatch identifiers this grammar can select, in declaration
    /// order.
    ///
    /// When a sequence contains a group, the selected branch supplies
    /// the identifier, so the enclosing fallback is unreachable and is
    /// not reported.
    #[must_use]
    pub fn dispatch_ids(&self) -> Vec<DispatchId> {
        let mut ids = Vec::new();
        self.collect_ids(&self.root, &self.default_dispatch, &mut ids);
        ids
    }

    fn collect_ids(&self, seq: &Sequence, fallback: &DispatchId, ids: &mut Vec<DispatchId>) {
        let group = seq.nodes.iter().find_map(|id| match self.node(*id) {
            Node::Group(group) => Some(group),
            Node::Spec(_) => None,
        });
        match group {
            None => {
                if !ids.contains(fallback) {
                    ids.push(fallback.clone());
                }
            }
            Some(group) => {
                for branch in &group.branches {
                    self.collect_ids(&branch.sequence, &branch.dispatch, ids);
                }
            }
        }
    }

    /// Whether the sequence demands input: any required spec counts,
    /// even one carrying a default.
    pub(crate) fn sequence_requires_input(&self, seq: &Sequence) -> bool {
        seq.nodes.iter().any(|id| match self.node(*id) {
            Node::Spec(spec) => spec.is_required(),
            Node::Group(group) => group
                .branches
                .iter()
                .all(|branch| self.sequence_requires_input(&branch.sequence)),
        })
    }

    /// Renders a one-line usage string for this grammar.
    #[must_use]
    pub fn usage(&self) -> String {
        self.render_sequence(&self.root)
    }

    fn render_sequence(&self, seq: &Sequence) -> String {
        seq.nodes
            .iter()
            .map(|id| match self.node(*id) {
                Node::Spec(spec) => spec.format(),
                Node::Group(group) => {
                    if group.branches.len() == 1 {
                        self.render_sequence(&group.branches[0].sequence)
                    } else {
                        group
                            .branches
                            .iter()
                            .map(|branch| {
                                format!("({})", self.render_sequence(&branch.sequence))
                            })
                            .collect::<Vec<_>>()
                            .join(" | ")
                    }
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug)]
enum DraftNode {
    Spec(ArgumentSpec),
    Group(GroupBuilder),
}

/// Builder for one grammar path.
#[derive(Debug, Default)]
pub struct SequenceBuilder {
    nodes: Vec<DraftNode>,
}

impl SequenceBuilder {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an argument spec.
    #[must_use]
    pub fn add_argument(mut self, spec: ArgumentSpec) -> Self {
        self.nodes.push(DraftNode::Spec(spec));
        self
    }

    /// Appends a group of alternative branches.
    #[must_use]
    pub fn add_group(mut self, group: GroupBuilder) -> Self {
        self.nodes.push(DraftNode::Group(group));
        self
    }
}

/// Builder for a group of alternative branches.
#[derive(Debug, Default)]
pub struct GroupBuilder {
    branches: Vec<(DispatchId, SequenceBuilder)>,
    msg_error: Option<String>,
    msg_mandatory: Option<String>,
}

impl GroupBuilder {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a branch dispatching to `id`. Branch order is selection
    /// order for equal-length matches.
    #[must_use]
    pub fn add_branch(mut self, id: impl Into<DispatchId>, sequence: SequenceBuilder) -> Self {
        self.branches.push((id.into(), sequence));
        self
    }

    /// Overrides the message shown when no branch matches.
    #[must_use]
    pub fn with_msg_error(mut self, message: impl Into<String>) -> Self {
        self.msg_error = Some(message.into());
        self
    }

    /// Overrides the message shown when the input is empty but every
    /// branch needs something.
    #[must_use]
    pub fn with_msg_mandatory(mut self, message: impl Into<String>) -> Self {
        self.msg_mandatory = Some(message.into());
        self
    }
}

fn flatten(
    arena: &mut Vec<Node>,
    builder: SequenceBuilder,
    seen: &mut Vec<String>,
) -> Result<Sequence, GrammarError> {
    // A sequence's own destinations are visible to every branch nested
    // under it, whether the spec comes before or after the group.
    for draft in &builder.nodes {
        if let DraftNode::Spec(spec) = draft {
            if spec.kind().binds() {
                if seen.iter().any(|dest| dest == spec.dest()) {
                    return Err(GrammarError::DuplicateDestination {
                        dest: spec.dest().to_string(),
                    });
                }
                seen.push(spec.dest().to_string());
            }
        }
    }

    let mut nodes = Vec::new();
    let mut groups = 0;
    for draft in builder.nodes {
        match draft {
            DraftNode::Spec(spec) => {
                let id = NodeId(arena.len());
                arena.push(Node::Spec(spec));
                nodes.push(id);
            }
            DraftNode::Group(group) => {
                groups += 1;
                if groups > 1 {
                    return Err(GrammarError::MultipleGroups);
                }
                if group.branches.is_empty() {
                    return Err(GrammarError::EmptyGroup);
                }
                let mut branches = Vec::new();
                for (dispatch, sub) in group.branches {
                    // Sibling branches may reuse destination names; only
                    // names inherited from enclosing sequences collide.
                    let mark = seen.len();
                    let sequence = flatten(arena, sub, seen)?;
                    seen.truncate(mark);
                    branches.push(Branch { dispatch, sequence });
                }
                let id = NodeId(arena.len());
                arena.push(Node::Group(Group {
                    branches,
                    msg_error: group
                        .msg_error
                        .unwrap_or_else(|| MSG_INVALID.to_string()),
                    msg_mandatory: group
                        .msg_mandatory
                        .unwrap_or_else(|| MSG_MANDATORY.to_string()),
                }));
                nodes.push(id);
            }
        }
    }
    Ok(Sequence { nodes })
}
