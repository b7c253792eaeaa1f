//! End-to-end layout and rendering scenarios.

use gridpick::ansi::visible_len;
use gridpick::layout::{Column, sample_ideal_widths, solve_widths};
use gridpick::style::Attr;
use gridpick::table::{RenderOptions, Segment, render_table};
use gridpick::wrap::wrap_visible;

fn line_text(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

/// Scenario A: two min-10 columns (rigid + wrap) at terminal width 40
/// with gap 2. The solved widths sum to the 38-cell budget and the wrap
/// column absorbs all leftover space.
#[test]
fn scenario_a_wrap_column_absorbs_leftover() {
    let columns = vec![
        Column::new("Cmd").min_width(10).no_wrap(),
        Column::new("Desc").min_width(10),
    ];
    let rows: Vec<Vec<String>> = vec![
        vec!["ls".into(), "list".into()],
        vec!["pwd".into(), "print dir".into()],
        vec!["id".into(), "identity".into()],
    ];

    let ideal = sample_ideal_widths(&columns, &rows);
    let widths = solve_widths(40, 2, &columns, &ideal);

    assert!(widths.iter().sum::<usize>() <= 38);
    assert_eq!(widths[0], 10);
    assert_eq!(widths[1], 28);
}

/// Scenario B: a 40-character single token in a width-10 wrap column is
/// emitted as exactly one over-long line, never broken mid-word.
#[test]
fn scenario_b_overlong_token_single_line() {
    let token = "a_very_long_single_token_without_spaces";

    let lines = wrap_visible(token, 10);
    assert_eq!(lines.len(), 1);
    assert_eq!(visible_len(&lines[0]), token.len());
}

#[test]
fn scenario_b_overlong_token_through_renderer() {
    let token = "a_very_long_single_token_without_spaces";
    let columns = vec![
        Column::new("A").min_width(10).max_width(10),
        Column::new("B").min_width(10),
    ];
    let rows: Vec<Vec<String>> = vec![vec![token.into(), "short".into()]];

    let frame = render_table(&rows, &columns, 24, &RenderOptions::default());
    assert_eq!(frame.layout.row_heights, vec![1]);
    assert!(line_text(&frame.lines[0]).contains(token));
}

/// Highlight forces the highlight attribute regardless of hook output.
#[test]
fn highlight_overrides_style_hooks() {
    let columns = vec![
        Column::new("A").min_width(4).no_wrap(),
        Column::new("B").min_width(4),
    ];
    let rows: Vec<Vec<String>> = vec![
        vec!["one".into(), "first".into()],
        vec!["two".into(), "second".into()],
    ];
    let cell_hook = |_: usize, _: usize, _: &str| Attr::ALERT | Attr::BOLD;
    let line_hook = |_: usize, _: usize, _: usize, _: &str| Attr::NOTE;
    let opts = RenderOptions {
        highlight_row: Some(1),
        cell_style: Some(&cell_hook),
        line_style: Some(&line_hook),
        ..RenderOptions::default()
    };

    let frame = render_table(&rows, &columns, 30, &opts);

    for segment in frame.lines[1].iter().filter(|s| !s.text.trim().is_empty()) {
        assert_eq!(segment.attr, Attr::HIGHLIGHT);
    }
    // The non-highlighted row still combines its hook styles.
    let styled = &frame.lines[0][0];
    assert_eq!(styled.attr, Attr::ALERT | Attr::BOLD | Attr::NOTE);
}

/// Layout degrades gracefully when the minimums cannot fit: widths fall
/// back to the minimums and rendering proceeds.
#[test]
fn impossible_layout_degrades_to_minimums() {
    let columns = vec![
        Column::new("A").min_width(30).no_wrap(),
        Column::new("B").min_width(30).no_wrap(),
    ];
    let rows: Vec<Vec<String>> = vec![vec!["left".into(), "right".into()]];

    let frame = render_table(&rows, &columns, 20, &RenderOptions::default());
    assert_eq!(frame.layout.widths, vec![30, 30]);
    assert_eq!(frame.lines.len(), 1);
}

/// Styled cell content passes its escapes through while the visible
/// geometry stays column-aligned.
#[test]
fn styled_cells_keep_alignment() {
    let columns = vec![
        Column::new("A").min_width(8).no_wrap(),
        Column::new("B").min_width(8).no_wrap(),
    ];
    let rows: Vec<Vec<String>> = vec![vec![
        "\x1b[32mok\x1b[0m".into(),
        "plain".into(),
    ]];

    let frame = render_table(&rows, &columns, 20, &RenderOptions::default());
    let first_cell = &frame.lines[0][0].text;
    assert!(first_cell.contains("\x1b[32m"));
    assert_eq!(visible_len(first_cell), frame.layout.widths[0]);
}

/// A taller-than-viewport table clips without touching layout metadata.
#[test]
fn viewport_clipping_preserves_metadata() {
    let columns = vec![Column::new("A").min_width(4).max_width(8)];
    let rows: Vec<Vec<String>> = (0..10)
        .map(|i| vec![format!("row number {i} with some words")])
        .collect();
    let opts = RenderOptions {
        max_height: 5,
        ..RenderOptions::default()
    };

    let frame = render_table(&rows, &columns, 10, &opts);
    assert_eq!(frame.lines.len(), 5);
    assert_eq!(frame.layout.row_heights.len(), 10);
    assert!(frame.layout.total_height >= 10);
}
