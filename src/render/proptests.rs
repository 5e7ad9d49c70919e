//! Property-based tests for block parsing
//!
//! - Parsing never panics and always yields at least one block
//! - Every letter of the input survives, in order
//! - Pipe text without a rule row never becomes a table

use super::*;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Lines biased toward the shapes model replies actually use
fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{0,20}",
        "\\|[a-z |]{0,20}",
        " *\\|( *[a-z]{0,4} *\\|){1,4}",
        Just("|---|---|".to_string()),
        Just("| :-- | --: |".to_string()),
        "[a-z *`]{0,20}",
        "\\*\\*[a-z ]{0,8}\\*\\*",
        "`[a-z]{0,8}`",
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(arb_line(), 0..12).prop_map(|lines| lines.join("\n"))
}

/// Lines with pipes and colons that can never form a rule row
///
/// Every line carries a letter, and a rule row holds none.
fn arb_ruleless_text() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-z |:*`]{0,10}[a-z][a-z |:*`]{0,10}", 1..10)
        .prop_map(|lines| lines.join("\n"))
}

fn letters(text: &str) -> String {
    text.chars().filter(char::is_ascii_alphanumeric).collect()
}

fn block_letters(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .map(|block| letters(&block.visible_text()))
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn parsing_is_total(text in any::<String>()) {
        let blocks = parse_blocks(&text);
        prop_assert!(!blocks.is_empty());
    }

    #[test]
    fn letters_are_preserved_in_order(text in arb_text()) {
        let blocks = parse_blocks(&text);
        prop_assert_eq!(block_letters(&blocks), letters(&text));
    }

    #[test]
    fn no_rule_row_means_no_table(text in arb_ruleless_text()) {
        let blocks = parse_blocks(&text);
        let all_paragraphs = blocks
            .iter()
            .all(|block| matches!(block, ContentBlock::Paragraph { .. }));
        prop_assert!(all_paragraphs);
    }

    #[test]
    fn paragraphs_never_hold_adjacent_plain_runs(text in arb_text()) {
        for block in parse_blocks(&text) {
            if let ContentBlock::Paragraph { runs } = block {
                for pair in runs.windows(2) {
                    let both_plain =
                        matches!(pair[0], Run::Plain(_)) && matches!(pair[1], Run::Plain(_));
                    prop_assert!(!both_plain);
                }
            }
        }
    }

    #[test]
    fn parsing_is_deterministic(text in arb_text()) {
        prop_assert_eq!(parse_blocks(&text), parse_blocks(&text));
    }

    #[test]
    fn table_blocks_never_follow_each_other(text in arb_text()) {
        let blocks = parse_blocks(&text);
        for pair in blocks.windows(2) {
            let both_tables = matches!(pair[0], ContentBlock::Table { .. })
                && matches!(pair[1], ContentBlock::Table { .. });
            prop_assert!(!both_tables);
        }
    }
}
