//! Property tests for the grammar engine.

use proptest::prelude::*;
use tidemark_grammar::{
    ArgumentSpec, CommandParser, Grammar, GroupBuilder, ParseOutcome, SequenceBuilder,
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

proptest! {
    #[test]
    fn arbitrary_input_never_panics(input in "\\PC{0,60}") {
        let outcome = dice_parser().parse(&input);
        if let ParseOutcome::Failed(failure) = outcome {
            prop_assert!(!failure.message.is_empty());
        }
    }

    #[test]
    fn dice_notation_always_selects_the_multi_branch(
        times in 1_i64..10_000,
        size in 1_i64..10_000,
    ) {
        let input = format!("{times}d{size}");
        let ParseOutcome::Matched(matched) = dice_parser().parse(&input) else {
            panic!("{input:?} did not match");
        };
        prop_assert_eq!(matched.dispatch.as_str(), "roll-multi");
        prop_assert_eq!(matched.bindings.number("times"), Some(times));
        prop_assert_eq!(matched.bindings.number("size"), Some(size));
    }

    #[test]
    fn plain_numbers_always_select_the_single_branch(size in 1_i64..1_000_000) {
        let input = size.to_string();
        let ParseOutcome::Matched(matched) = dice_parser().parse(&input) else {
            panic!("{input:?} did not match");
        };
        prop_assert_eq!(matched.dispatch.as_str(), "roll-single");
        prop_assert_eq!(matched.bindings.number("size"), Some(size));
    }

    #[test]
    fn matched_consumption_never_exceeds_input(input in "[0-9d ]{0,20}") {
        if let ParseOutcome::Matched(matched) = dice_parser().parse(&input) {
            prop_assert!(matched.consumed <= input.len());
        }
    }

    #[test]
    fn remainder_echoes_trimmed_input(input in "[a-z0-9 ]{0,30}") {
        let grammar = Grammar::compile(
            "say",
            SequenceBuilder::new().add_argument(ArgumentSpec::remainder("text")),
        )
        .unwrap();
        let parser = CommandParser::new("say", grammar);
        match parser.parse(&input) {
            ParseOutcome::Matched(matched) => {
                prop_assert_eq!(matched.bindings.text("text"), Some(input.trim()));
            }
            ParseOutcome::Failed(_) => {
                prop_assert!(input.trim().is_empty());
            }
        }
    }
}
