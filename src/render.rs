//! Structured rendering of model output
//!
//! Turns loosely formatted reply text into paragraphs and tables that the
//! UI can display and edit. Parsing is total: malformed table-like input
//! falls back to paragraph text, never to an error.

mod inline;
mod table;

#[cfg(test)]
mod proptests;

pub use inline::{tokenize, Run};

use crate::session::Message;
use serde::Serialize;

/// A renderable unit of message content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Paragraph {
        runs: Vec<Run>,
    },
    Table {
        /// Empty when the table has no header row
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl ContentBlock {
    /// All visible text of the block, in reading order
    pub fn visible_text(&self) -> String {
        match self {
            ContentBlock::Paragraph { runs } => runs.iter().map(Run::text).collect(),
            ContentBlock::Table { header, rows } => header
                .iter()
                .chain(rows.iter().flatten())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Parse raw message text into content blocks
///
/// A line whose trimmed form starts with `|` is a table candidate. Runs of
/// candidates only become a table when they contain a rule row; otherwise
/// they are kept as paragraph text.
pub fn parse_blocks(text: &str) -> Vec<ContentBlock> {
    let mut builder = BlockBuilder::default();

    for line in text.split('\n') {
        if line.trim_start().starts_with('|') {
            builder.flush_text();
            builder.table_lines.push(line);
        } else {
            builder.flush_table();
            builder.text_lines.push(line);
        }
    }

    builder.flush_table();
    builder.flush_text();
    builder.blocks
}

/// Parse a stored message for display
///
/// User messages are shown without their language context annotation.
pub fn render_message(message: &Message) -> Vec<ContentBlock> {
    parse_blocks(message.display_text())
}

#[derive(Default)]
struct BlockBuilder<'a> {
    blocks: Vec<ContentBlock>,
    text_lines: Vec<&'a str>,
    table_lines: Vec<&'a str>,
}

impl BlockBuilder<'_> {
    fn flush_text(&mut self) {
        if self.text_lines.is_empty() {
            return;
        }
        let joined = self.text_lines.join("\n");
        self.text_lines.clear();
        self.blocks.push(ContentBlock::Paragraph {
            runs: tokenize(&joined),
        });
    }

    fn flush_table(&mut self) {
        if self.table_lines.is_empty() {
            return;
        }

        let Some(separator) = self
            .table_lines
            .iter()
            .position(|line| table::is_separator_row(line))
        else {
            // Pipe-prefixed prose becomes its own paragraph
            self.text_lines.append(&mut self.table_lines);
            self.flush_text();
            return;
        };

        let mut rows: Vec<Vec<String>> = self
            .table_lines
            .iter()
            .map(|line| table::split_cells(line))
            .collect();
        self.table_lines.clear();

        let after: Vec<Vec<String>> = rows.split_off(separator + 1);
        rows.pop(); // the rule row itself
        let before = rows;

        let has_header = before.iter().flatten().any(|cell| !cell.is_empty());
        let mut before = before.into_iter();
        let (header, mut body) = if has_header {
            let header = before.next().unwrap_or_default();
            (header, before.collect::<Vec<_>>())
        } else {
            (Vec::new(), Vec::new())
        };
        body.extend(after);

        self.blocks.push(ContentBlock::Table { header, rows: body });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{annotate, find_language};

    fn cells(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn paragraph(text: &str) -> ContentBlock {
        ContentBlock::Paragraph {
            runs: tokenize(text),
        }
    }

    #[test]
    fn pipe_prose_without_rule_row_is_a_paragraph() {
        let blocks = parse_blocks("a | b\nc | d");
        assert_eq!(blocks, vec![paragraph("a | b\nc | d")]);
    }

    #[test]
    fn pipe_prefixed_lines_without_rule_row_stay_text() {
        let blocks = parse_blocks("| not a table\n| still not");
        assert_eq!(blocks, vec![paragraph("| not a table\n| still not")]);
    }

    #[test]
    fn well_formed_table() {
        let blocks = parse_blocks("| A | B |\n|---|---|\n| 1 | 2 |");
        assert_eq!(
            blocks,
            vec![ContentBlock::Table {
                header: cells(&["A", "B"]),
                rows: vec![cells(&["1", "2"])],
            }]
        );
    }

    #[test]
    fn table_between_paragraphs_keeps_order() {
        let text = "Bảng so sánh:\n| Tác giả | Dân tộc |\n|---|---|\n| Lục Mạnh Cường | Tày |\nHết.";
        let blocks = parse_blocks(text);
        assert_eq!(
            blocks,
            vec![
                paragraph("Bảng so sánh:"),
                ContentBlock::Table {
                    header: cells(&["Tác giả", "Dân tộc"]),
                    rows: vec![cells(&["Lục Mạnh Cường", "Tày"])],
                },
                paragraph("Hết."),
            ]
        );
    }

    #[test]
    fn separator_first_means_no_header() {
        let blocks = parse_blocks("|---|---|\n| 1 | 2 |\n| 3 | 4 |");
        assert_eq!(
            blocks,
            vec![ContentBlock::Table {
                header: vec![],
                rows: vec![cells(&["1", "2"]), cells(&["3", "4"])],
            }]
        );
    }

    #[test]
    fn lone_separator_is_an_empty_table() {
        let blocks = parse_blocks("|---|---|");
        assert_eq!(
            blocks,
            vec![ContentBlock::Table {
                header: vec![],
                rows: vec![],
            }]
        );
    }

    #[test]
    fn blank_header_row_is_dropped() {
        let blocks = parse_blocks("|| |\n|---|---|\n| 1 | 2 |");
        assert_eq!(
            blocks,
            vec![ContentBlock::Table {
                header: vec![],
                rows: vec![cells(&["1", "2"])],
            }]
        );
    }

    #[test]
    fn colon_and_blank_rule_rows_make_tables() {
        for rule in ["| : | : |", "|   |   |"] {
            let text = format!("| A | B |\n{rule}\n| 1 | 2 |");
            assert_eq!(
                parse_blocks(&text),
                vec![ContentBlock::Table {
                    header: cells(&["A", "B"]),
                    rows: vec![cells(&["1", "2"])],
                }],
                "rule row {rule:?}"
            );
        }
    }

    #[test]
    fn extra_rows_before_separator_lead_the_body() {
        let blocks = parse_blocks("| A | B |\n| C | D |\n|---|---|\n| 1 | 2 |");
        assert_eq!(
            blocks,
            vec![ContentBlock::Table {
                header: cells(&["A", "B"]),
                rows: vec![cells(&["C", "D"]), cells(&["1", "2"])],
            }]
        );
    }

    #[test]
    fn rejected_table_lines_form_their_own_paragraph() {
        let blocks = parse_blocks("intro\n| a | b\nafter");
        assert_eq!(
            blocks,
            vec![paragraph("intro"), paragraph("| a | b"), paragraph("after")]
        );
    }

    #[test]
    fn unpaired_markers_render_verbatim() {
        let blocks = parse_blocks("use ` and * freely **");
        assert_eq!(
            blocks,
            vec![ContentBlock::Paragraph {
                runs: vec![Run::Plain("use ` and * freely **".to_string())],
            }]
        );
    }

    #[test]
    fn empty_input_is_one_empty_paragraph() {
        assert_eq!(parse_blocks(""), vec![ContentBlock::Paragraph { runs: vec![] }]);
    }

    #[test]
    fn cells_keep_inline_markers_verbatim() {
        let blocks = parse_blocks("| **A** |\n|---|\n| `x` |");
        assert_eq!(
            blocks,
            vec![ContentBlock::Table {
                header: cells(&["**A**"]),
                rows: vec![cells(&["`x`"])],
            }]
        );
    }

    #[test]
    fn indented_table_lines_are_recognized() {
        let blocks = parse_blocks("  | A | B |\n  |---|---|\n  | 1 | 2 |");
        assert!(matches!(blocks.as_slice(), [ContentBlock::Table { .. }]));
    }

    #[test]
    fn render_message_strips_annotation_from_user_text() {
        let language = find_language("tay").unwrap();
        let message = Message::user(annotate("**Then** là gì?", language));
        assert_eq!(
            render_message(&message),
            vec![ContentBlock::Paragraph {
                runs: vec![Run::Bold("Then".to_string()), Run::Plain(" là gì?".to_string())],
            }]
        );
    }

    #[test]
    fn visible_text_of_table() {
        let block = ContentBlock::Table {
            header: cells(&["A"]),
            rows: vec![cells(&["1", "2"])],
        };
        assert_eq!(block.visible_text(), "A 1 2");
    }
}
