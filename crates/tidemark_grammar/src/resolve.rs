//! Sequence resolution and branch selection.
//!
//! Resolution runs in two passes over a sequence's nodes: anchors first
//! (shapes whose span is self-delimiting), then fills (shapes that
//! consume whatever the anchors left), each pass in declaration order.
//! Every node resolves inside the window between its already-resolved
//! neighbors, so a grammar like `<times> d <size>` anchors on the
//! literal `d` and each number receives exactly the gap beside it.
//!
//! A sequence is a full match only when every required node resolved
//! and no non-space character of its assigned span is left uncovered.
//! Groups try each branch against the same window and keep the full
//! match that covers the most input, first declared winning ties.

use crate::cursor::{Cursor, Span};
use crate::dispatch::DispatchId;
use crate::error::{FailureKind, MSG_INVALID};
use crate::outcome::Value;
use crate::schema::{Grammar, Group, Node, Sequence};
use crate::spec::{ArgumentSpec, Phase};

/// A fully resolved sequence.
#[derive(Clone, Debug)]
pub(crate) struct SequenceMatch {
    /// Bound values in declaration order.
    pub bindings: Vec<(String, Value)>,
    /// Dispatch selected by the innermost matched branch, if any.
    pub dispatch: Option<DispatchId>,
    /// Bytes covered by resolved spans.
    pub consumed: usize,
}

/// A sequence that did not fully match its assigned span.
#[derive(Clone, Debug)]
pub(crate) struct SequenceFailure {
    pub kind: FailureKind,
    pub message: String,
    pub consumed: usize,
}

/// Resolution state of one node.
#[derive(Clone, Debug)]
enum Slot {
    Pending,
    Bound { span: Span, value: Option<Value> },
    Defaulted { value: Option<Value> },
    Group { span: Span, matched: SequenceMatch },
    Missed(SequenceFailure),
}

impl Slot {
    fn span(&self) -> Option<Span> {
        match self {
            Self::Bound { span, .. } | Self::Group { span, .. } => Some(*span),
            _ => None,
        }
    }
}

/// Resolves a sequence against `text[begin..end]`.
pub(crate) fn resolve_sequence(
    grammar: &Grammar,
    seq: &Sequence,
    text: &str,
    begin: usize,
    end: usize,
) -> Result<SequenceMatch, SequenceFailure> {
    let mut slots: Vec<Slot> = vec![Slot::Pending; seq.nodes.len()];

    for phase in [Phase::Anchor, Phase::Fill] {
        for (i, node_id) in seq.nodes.iter().enumerate() {
            match grammar.node(*node_id) {
                Node::Spec(spec) if spec.kind().phase() == phase => {
                    let (w_begin, w_end) = carve_window(&slots, i, text, begin, end);
                    slots[i] = if w_begin >= w_end {
                        resolve_absent(spec)
                    } else {
                        let mut cursor = Cursor::over(text, w_begin, w_end);
                        match spec.resolve(&mut cursor) {
                            Some((span, value)) => Slot::Bound { span, value },
                            None => resolve_miss(spec),
                        }
                    };
                }
                Node::Group(group) if phase == Phase::Fill => {
                    let (w_begin, w_end) = carve_window(&slots, i, text, begin, end);
                    slots[i] = match resolve_group(grammar, group, text, w_begin, w_end) {
                        Ok(matched) => Slot::Group {
                            span: Span::new(w_begin, w_end),
                            matched,
                        },
                        Err(failure) => Slot::Missed(failure),
                    };
                }
                _ => {}
            }
        }
    }

    // The first failed node wins, in declaration order; partial
    // bindings are never committed.
    let consumed = consumed_so_far(&slots);
    for slot in &slots {
        if let Slot::Missed(failure) = slot {
            let mut failure = failure.clone();
            failure.consumed = failure.consumed.max(consumed);
            return Err(failure);
        }
    }

    // Entirely-parsed check: leftover text is a failure, not a shorter
    // match.
    check_coverage(&slots, text, begin, end, consumed)?;

    // Bindings follow declaration order even though resolution order
    // did not.
    let mut bindings = Vec::new();
    let mut dispatch = None;
    let mut consumed = 0;
    for (slot, node_id) in slots.into_iter().zip(&seq.nodes) {
        match slot {
            Slot::Bound { span, value } => {
                consumed += span.len();
                if let (Node::Spec(spec), Some(value)) = (grammar.node(*node_id), value) {
                    bindings.push((spec.dest().to_string(), value));
                }
            }
            Slot::Defaulted { value } => {
                if let (Node::Spec(spec), Some(value)) = (grammar.node(*node_id), value) {
                    bindings.push((spec.dest().to_string(), value));
                }
            }
            Slot::Group { matched, .. } => {
                consumed += matched.consumed;
                bindings.extend(matched.bindings);
                dispatch = matched.dispatch;
            }
            Slot::Pending | Slot::Missed(_) => {}
        }
    }

    Ok(SequenceMatch {
        bindings,
        dispatch,
        consumed,
    })
}

/// Resolves a group against `text[begin..end]`.
///
/// Every branch is attempted independently from the same window; only
/// branches consuming the whole window count as matches.
pub(crate) fn resolve_group(
    grammar: &Grammar,
    group: &Group,
    text: &str,
    begin: usize,
    end: usize,
) -> Result<SequenceMatch, SequenceFailure> {
    if begin >= end
        && group
            .branches
            .iter()
            .all(|branch| grammar.sequence_requires_input(&branch.sequence))
    {
        return Err(SequenceFailure {
            kind: FailureKind::MissingArgument,
            message: group.msg_mandatory.clone(),
            consumed: 0,
        });
    }

    let mut best: Option<SequenceMatch> = None;
    let mut deepest = 0;
    for branch in &group.branches {
        match resolve_sequence(grammar, &branch.sequence, text, begin, end) {
            Ok(mut matched) => {
                // The innermost matched branch supplies the dispatch.
                if matched.dispatch.is_none() {
                    matched.dispatch = Some(branch.dispatch.clone());
                }
                let better = match &best {
                    None => true,
                    // Strictly greater consumed length wins; equal
                    // lengths keep the first-declared branch.
                    Some(current) => matched.consumed > current.consumed,
                };
                if better {
                    best = Some(matched);
                }
            }
            Err(failure) => deepest = deepest.max(failure.consumed),
        }
    }

    best.ok_or_else(|| SequenceFailure {
        kind: FailureKind::Syntax,
        message: group.msg_error.clone(),
        consumed: deepest,
    })
}

/// Carves the window node `i` may resolve in: after the last resolved
/// span before it, before the first resolved span after it, with
/// surrounding whitespace trimmed.
fn carve_window(slots: &[Slot], i: usize, text: &str, begin: usize, end: usize) -> (usize, usize) {
    let mut w_begin = begin;
    for slot in &slots[..i] {
        if let Some(span) = slot.span() {
            w_begin = span.end;
        }
    }
    let mut w_end = end;
    for slot in &slots[i + 1..] {
        if let Some(span) = slot.span() {
            w_end = span.begin;
            break;
        }
    }
    if w_begin >= w_end {
        return (w_begin, w_begin);
    }
    let window = &text[w_begin..w_end];
    let leading = window.len() - window.trim_start().len();
    let trailing = window.trim_end().len();
    (w_begin + leading, w_begin + trailing)
}

/// Outcome for a spec whose window is empty.
fn resolve_absent(spec: &ArgumentSpec) -> Slot {
    if let Some(default) = &spec.default {
        Slot::Defaulted {
            value: Some(default.clone()),
        }
    } else if spec.required {
        Slot::Missed(SequenceFailure {
            kind: FailureKind::MissingArgument,
            message: spec.failure_message(),
            consumed: 0,
        })
    } else {
        Slot::Defaulted { value: None }
    }
}

/// Outcome for a spec whose window had data of the wrong shape.
fn resolve_miss(spec: &ArgumentSpec) -> Slot {
    if let Some(default) = &spec.default {
        Slot::Defaulted {
            value: Some(default.clone()),
        }
    } else if spec.required {
        Slot::Missed(SequenceFailure {
            kind: FailureKind::Syntax,
            message: spec.failure_message(),
            consumed: 0,
        })
    } else {
        Slot::Defaulted { value: None }
    }
}

fn consumed_so_far(slots: &[Slot]) -> usize {
    slots
        .iter()
        .map(|slot| match slot {
            Slot::Bound { span, .. } => span.len(),
            Slot::Group { matched, .. } => matched.consumed,
            _ => 0,
        })
        .sum()
}

/// Fails with `ExtraInput` if any non-space character of the span is
/// not covered by a resolved span.
fn check_coverage(
    slots: &[Slot],
    text: &str,
    begin: usize,
    end: usize,
    consumed: usize,
) -> Result<(), SequenceFailure> {
    let spans: Vec<Span> = slots.iter().filter_map(Slot::span).collect();
    for (offset, ch) in text[begin..end.min(text.len())].char_indices() {
        if ch.is_whitespace() {
            continue;
        }
        let pos = begin + offset;
        if !spans.iter().any(|span| span.contains(pos)) {
            return Err(SequenceFailure {
                kind: FailureKind::ExtraInput,
                message: MSG_INVALID.to_string(),
                consumed,
            });
        }
    }
    Ok(())
}
