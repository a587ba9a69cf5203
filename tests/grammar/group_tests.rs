//! Group branch selection tests.
//!
//! Every branch is tried against the same window; only full matches
//! compete, the one covering the most input wins, and equal-length
//! matches fall to the branch declared first.

use tidemark_grammar::{
    ArgumentSpec, CommandParser, FailureKind, Grammar, GroupBuilder, Match, ParseOutcome,
    SequenceBuilder,
};

fn dice_parser() -> CommandParser {
    let group = GroupBuilder::new()
        .add_branch(
            "roll-single",
            SequenceBuilder::new().add_argument(ArgumentSpec::number("size")),
        )
        .add_branch(
            "roll-multi",
            SequenceBuilder::new()
                .add_argument(ArgumentSpec::number("times"))
                .add_argument(ArgumentSpec::symbols("d"))
                .add_argument(ArgumentSpec::number("size")),
        );
    let grammar = Grammar::compile("roll", SequenceBuilder::new().add_group(group)).unwrap();
    CommandParser::new("roll", grammar)
}

fn expect_match(parser: &CommandParser, input: &str) -> Match {
    match parser.parse(input) {
        ParseOutcome::Matched(matched) => matched,
        ParseOutcome::Failed(failure) => {
            panic!("expected {input:?} to match, got: {}", failure.message)
        }
    }
}

fn expect_failure(parser: &CommandParser, input: &str) -> tidemark_grammar::Failure {
    match parser.parse(input) {
        ParseOutcome::Failed(failure) => failure,
        ParseOutcome::Matched(_) => panic!("expected {input:?} to fail"),
    }
}

#[test]
fn single_number_selects_first_branch() {
    let matched = expect_match(&dice_parser(), "6");
    assert_eq!(matched.dispatch.as_str(), "roll-single");
    assert_eq!(matched.bindings.number("size"), Some(6));
}

#[test]
fn dice_notation_selects_second_branch() {
    let matched = expect_match(&dice_parser(), "3d6");
    assert_eq!(matched.dispatch.as_str(), "roll-multi");
    assert_eq!(matched.bindings.number("times"), Some(3));
    assert_eq!(matched.bindings.number("size"), Some(6));
}

#[test]
fn spaced_dice_notation_still_matches() {
    let matched = expect_match(&dice_parser(), "3 d 6");
    assert_eq!(matched.dispatch.as_str(), "roll-multi");
}

#[test]
fn partial_match_does_not_win() {
    // The first branch parses "5" but leaves "d10x130" over, and the
    // second chokes on "10x130"; neither is a full match.
    let failure = expect_failure(&dice_parser(), "5d10x130");
    assert_eq!(failure.kind, FailureKind::Syntax);
    assert_eq!(failure.message, "Invalid syntax.");
}

#[test]
fn empty_input_when_every_branch_needs_some() {
    let failure = expect_failure(&dice_parser(), "");
    assert_eq!(failure.kind, FailureKind::MissingArgument);
    assert_eq!(failure.message, "You have to specify something.");
}

#[test]
fn longest_full_match_wins() {
    let group = GroupBuilder::new()
        .add_branch(
            "two-words",
            SequenceBuilder::new()
                .add_argument(ArgumentSpec::word("first"))
                .add_argument(ArgumentSpec::word("second")),
        )
        .add_branch(
            "free-text",
            SequenceBuilder::new().add_argument(ArgumentSpec::remainder("text")),
        );
    let grammar = Grammar::compile("say", SequenceBuilder::new().add_group(group)).unwrap();
    let parser = CommandParser::new("say", grammar);

    // Both branches fully match "to  bob", but the remainder's span
    // covers the gap between the words too.
    let matched = expect_match(&parser, "to  bob");
    assert_eq!(matched.dispatch.as_str(), "free-text");
    assert_eq!(matched.bindings.text("text"), Some("to  bob"));
}

#[test]
fn equal_length_matches_fall_to_declaration_order() {
    let group = GroupBuilder::new()
        .add_branch(
            "as-number",
            SequenceBuilder::new().add_argument(ArgumentSpec::number("value")),
        )
        .add_branch(
            "as-word",
            SequenceBuilder::new().add_argument(ArgumentSpec::word("value")),
        );
    let grammar = Grammar::compile("set", SequenceBuilder::new().add_group(group)).unwrap();
    let parser = CommandParser::new("set", grammar);

    // "7" satisfies both branches over the same span.
    let matched = expect_match(&parser, "7");
    assert_eq!(matched.dispatch.as_str(), "as-number");

    // Only the word branch accepts non-digits.
    let matched = expect_match(&parser, "high");
    assert_eq!(matched.dispatch.as_str(), "as-word");
}

#[test]
fn pipe_separated_pair_selects_its_own_branch() {
    let group = GroupBuilder::new()
        .add_branch(
            "set-one",
            SequenceBuilder::new().add_argument(ArgumentSpec::number("value")),
        )
        .add_branch(
            "set-pair",
            SequenceBuilder::new()
                .add_argument(ArgumentSpec::number("low"))
                .add_argument(ArgumentSpec::symbols("|"))
                .add_argument(ArgumentSpec::number("high")),
        );
    let grammar = Grammar::compile("set", SequenceBuilder::new().add_group(group)).unwrap();
    let parser = CommandParser::new("set", grammar);

    let matched = expect_match(&parser, "152");
    assert_eq!(matched.dispatch.as_str(), "set-one");
    assert_eq!(matched.bindings.number("value"), Some(152));

    let matched = expect_match(&parser, "15|12");
    assert_eq!(matched.dispatch.as_str(), "set-pair");
    assert_eq!(matched.bindings.number("low"), Some(15));
    assert_eq!(matched.bindings.number("high"), Some(12));
}

#[test]
fn group_messages_can_be_overridden() {
    let group = GroupBuilder::new()
        .add_branch(
            "roll-single",
            SequenceBuilder::new().add_argument(ArgumentSpec::number("size")),
        )
        .with_msg_error("That is not a dice expression.")
        .with_msg_mandatory("Roll what?");
    let grammar = Grammar::compile("roll", SequenceBuilder::new().add_group(group)).unwrap();
    let parser = CommandParser::new("roll", grammar);

    assert_eq!(
        expect_failure(&parser, "banana").message,
        "That is not a dice expression."
    );
    assert_eq!(expect_failure(&parser, "").message, "Roll what?");
}

#[test]
fn branch_with_optional_argument_accepts_empty_input() {
    let group = GroupBuilder::new()
        .add_branch(
            "look-around",
            SequenceBuilder::new().add_argument(ArgumentSpec::word("target").optional()),
        )
        .add_branch(
            "look-at",
            SequenceBuilder::new()
                .add_argument(ArgumentSpec::keyword("at"))
                .add_argument(ArgumentSpec::word("target")),
        );
    let grammar = Grammar::compile("look", SequenceBuilder::new().add_group(group)).unwrap();
    let parser = CommandParser::new("look", grammar);

    // Not every branch needs input, so empty input matches instead of
    // asking for something.
    let matched = expect_match(&parser, "");
    assert_eq!(matched.dispatch.as_str(), "look-around");

    let matched = expect_match(&parser, "at mirror");
    assert_eq!(matched.dispatch.as_str(), "look-at");
    assert_eq!(matched.bindings.text("target"), Some("mirror"));
}

#[test]
fn required_spec_with_default_still_demands_input() {
    use tidemark_grammar::Value;

    // Required counts toward the empty-input check even with a default.
    let group = GroupBuilder::new().add_branch(
        "drink",
        SequenceBuilder::new()
            .add_argument(ArgumentSpec::number("sips").with_default(Value::Number(1))),
    );
    let grammar = Grammar::compile("drink", SequenceBuilder::new().add_group(group)).unwrap();
    let parser = CommandParser::new("drink", grammar);

    let failure = expect_failure(&parser, "");
    assert_eq!(failure.kind, FailureKind::MissingArgument);
    assert_eq!(failure.message, "You have to specify something.");

    let matched = expect_match(&parser, "3");
    assert_eq!(matched.bindings.number("sips"), Some(3));
}

#[test]
fn nested_group_dispatches_to_innermost_branch() {
    let inner = GroupBuilder::new()
        .add_branch(
            "give-coins",
            SequenceBuilder::new()
                .add_argument(ArgumentSpec::number("amount"))
                .add_argument(ArgumentSpec::keyword("coins")),
        )
        .add_branch(
            "give-object",
            SequenceBuilder::new().add_argument(ArgumentSpec::word("object")),
        );
    let outer = GroupBuilder::new().add_branch(
        "give",
        SequenceBuilder::new()
            .add_group(inner)
            .add_argument(ArgumentSpec::keyword("to"))
            .add_argument(ArgumentSpec::word("target")),
    );
    let grammar = Grammar::compile("give", SequenceBuilder::new().add_group(outer)).unwrap();
    let parser = CommandParser::new("give", grammar);

    let matched = expect_match(&parser, "5 coins to bob");
    assert_eq!(matched.dispatch.as_str(), "give-coins");
    assert_eq!(matched.bindings.number("amount"), Some(5));
    assert_eq!(matched.bindings.text("target"), Some("bob"));

    let matched = expect_match(&parser, "sword to bob");
    assert_eq!(matched.dispatch.as_str(), "give-object");
    assert_eq!(matched.bindings.text("object"), Some("sword"));
}

#[test]
fn group_after_fixed_prefix() {
    let group = GroupBuilder::new()
        .add_branch(
            "page-number",
            SequenceBuilder::new().add_argument(ArgumentSpec::number("page")),
        )
        .add_branch(
            "page-name",
            SequenceBuilder::new().add_argument(ArgumentSpec::word("chapter")),
        );
    let grammar = Grammar::compile(
        "read",
        SequenceBuilder::new()
            .add_argument(ArgumentSpec::word("book"))
            .add_group(group),
    )
    .unwrap();
    let parser = CommandParser::new("read", grammar);

    let matched = expect_match(&parser, "tome 52");
    assert_eq!(matched.dispatch.as_str(), "page-number");
    assert_eq!(matched.bindings.text("book"), Some("tome"));
    assert_eq!(matched.bindings.number("page"), Some(52));
}
