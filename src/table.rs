//! Table rendering: wrapped cells + solved widths -> styled display lines.
//!
//! Rendering is pure: it produces lines of [`Segment`]s plus the
//! [`Layout`] metadata and leaves cursor positioning and writing to the
//! caller. That keeps every layout rule testable without a terminal.

use std::panic::{AssertUnwindSafe, catch_unwind};

use log::debug;

use crate::ansi::{crop_visible, ljust_visible};
use crate::layout::{Column, Layout, sample_ideal_widths, solve_widths};
use crate::style::Attr;
use crate::wrap::wrap_visible;

/// One run of text drawn with a single attribute set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub attr: Attr,
}

impl Segment {
    #[must_use]
    pub fn new(text: impl Into<String>, attr: Attr) -> Self {
        Self {
            text: text.into(),
            attr,
        }
    }
}

/// Style hook queried once per rendered cell: `(row, col, cell_text)`.
pub type CellStyleFn<'a> = &'a dyn Fn(usize, usize, &str) -> Attr;

/// Style hook queried once per display line of a cell:
/// `(row, col, line_index, line_text)`.
pub type LineStyleFn<'a> = &'a dyn Fn(usize, usize, usize, &str) -> Attr;

/// Per-frame rendering inputs beyond the data itself.
pub struct RenderOptions<'a> {
    /// Cells between adjacent columns.
    pub gap: usize,
    /// Maximum number of display lines to emit; clipping may stop
    /// mid-row.
    pub max_height: usize,
    /// Row drawn with the forced highlight attribute.
    pub highlight_row: Option<usize>,
    /// Draw an aligned header line above the rows.
    pub show_header: bool,
    /// Base attribute for ordinary cells.
    pub base_attr: Attr,
    /// Attribute for the header line.
    pub header_attr: Attr,
    /// Attribute forced onto the highlighted row.
    pub highlight_attr: Attr,
    /// Best-effort per-cell style hook.
    pub cell_style: Option<CellStyleFn<'a>>,
    /// Best-effort per-line style hook.
    pub line_style: Option<LineStyleFn<'a>>,
}

impl Default for RenderOptions<'_> {
    fn default() -> Self {
        Self {
            gap: 2,
            max_height: usize::MAX,
            highlight_row: None,
            show_header: false,
            base_attr: Attr::empty(),
            header_attr: Attr::DIM.union(Attr::BOLD),
            highlight_attr: Attr::HIGHLIGHT,
            cell_style: None,
            line_style: None,
        }
    }
}

/// A rendered frame: display lines plus layout metadata.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Styled display lines, top to bottom, clipped to `max_height`.
    pub lines: Vec<Vec<Segment>>,
    /// Layout metadata for the full (unclipped) content.
    pub layout: Layout,
}

/// Hooks are advisory: a panicking hook contributes no style.
fn hook_attr(f: impl FnOnce() -> Attr) -> Attr {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| {
        debug!("style hook panicked; treating as unstyled");
        Attr::empty()
    })
}

/// Lay out and style `rows` into display lines.
///
/// Per-row height is the maximum wrapped-line count across the row's
/// cells; crop-only columns always contribute height 1. Emission stops
/// the instant the next line would exceed `max_height`, even mid-row.
#[must_use]
pub fn render_table<R, C>(
    rows: &[R],
    columns: &[Column],
    term_width: usize,
    opts: &RenderOptions,
) -> Frame
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let ncols = columns.len();
    let ideal = sample_ideal_widths(columns, rows);
    let widths = solve_widths(term_width, opts.gap, columns, &ideal);

    let mut col_starts = Vec::with_capacity(ncols);
    let mut x = 0;
    for &w in &widths {
        col_starts.push(x);
        x += w + opts.gap;
    }
    if col_starts.last().copied().unwrap_or(0) + widths.last().copied().unwrap_or(0) > term_width {
        debug!("layout overflows terminal width {term_width}; clipping at right edge");
    }

    // Wrap or crop every cell up front; heights fall out of that.
    let mut wrapped: Vec<Vec<Vec<String>>> = Vec::with_capacity(rows.len());
    let mut row_heights = Vec::with_capacity(rows.len());
    for row in rows {
        let cells = row.as_ref();
        debug_assert_eq!(cells.len(), ncols, "row width != column count");
        let mut lines_per_col = Vec::with_capacity(ncols);
        let mut height = 1;
        for (j, col) in columns.iter().enumerate() {
            let cell = cells.get(j).map_or("", AsRef::as_ref);
            let lines = if col.wrap {
                wrap_visible(cell, widths[j])
            } else {
                // Crop columns stay single-line: only the first logical
                // line of a multi-line cell is shown.
                let first = cell.split('\n').next().unwrap_or("");
                vec![crop_visible(first, widths[j], col.ellipsis)]
            };
            height = height.max(lines.len());
            lines_per_col.push(lines);
        }
        wrapped.push(lines_per_col);
        row_heights.push(height);
    }

    let total_height = row_heights.iter().sum();
    let layout = Layout {
        widths: widths.clone(),
        col_starts,
        row_heights: row_heights.clone(),
        total_height,
    };

    let mut lines: Vec<Vec<Segment>> = Vec::new();

    if opts.show_header && ncols > 0 && lines.len() < opts.max_height {
        let mut segments = Vec::with_capacity(ncols * 2);
        for (j, col) in columns.iter().enumerate() {
            if j > 0 {
                segments.push(Segment::new(" ".repeat(opts.gap), Attr::empty()));
            }
            let text = ljust_visible(&crop_visible(&col.header, widths[j], false), widths[j]);
            segments.push(Segment::new(text, opts.header_attr));
        }
        lines.push(segments);
    }

    'rows: for (i, (lines_per_col, &height)) in wrapped.iter().zip(&row_heights).enumerate() {
        let is_highlight = opts.highlight_row == Some(i);

        // Cell-level hooks fire once per cell, not once per line.
        let cell_attrs: Vec<Attr> = (0..ncols)
            .map(|j| match (is_highlight, opts.cell_style) {
                (false, Some(hook)) => {
                    let full = lines_per_col[j].join("\n");
                    hook_attr(|| hook(i, j, &full))
                }
                _ => Attr::empty(),
            })
            .collect();

        for k in 0..height {
            if lines.len() >= opts.max_height {
                break 'rows;
            }
            let mut segments = Vec::with_capacity(ncols * 2);
            for j in 0..ncols {
                if j > 0 {
                    segments.push(Segment::new(" ".repeat(opts.gap), Attr::empty()));
                }
                let raw = lines_per_col[j].get(k).map_or("", String::as_str);
                let text = if columns[j].wrap {
                    ljust_visible(raw, widths[j])
                } else {
                    ljust_visible(&crop_visible(raw, widths[j], columns[j].ellipsis), widths[j])
                };
                let attr = if is_highlight {
                    opts.highlight_attr
                } else {
                    let line_attr = match opts.line_style {
                        Some(hook) => hook_attr(|| hook(i, j, k, raw)),
                        None => Attr::empty(),
                    };
                    opts.base_attr | cell_attrs[j] | line_attr
                };
                segments.push(Segment::new(text, attr));
            }
            lines.push(segments);
        }
    }

    Frame { lines, layout }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::visible_len;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("Command").min_width(10).no_wrap(),
            Column::new("Description").min_width(10),
        ]
    }

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec!["ls -la".into(), "list files with details".into()],
            vec!["du -sh .".into(), "disk usage of the current directory".into()],
        ]
    }

    fn line_text(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_layout_metadata() {
        let frame = render_table(&rows(), &columns(), 40, &RenderOptions::default());
        assert_eq!(frame.layout.widths.iter().sum::<usize>(), 38);
        assert_eq!(frame.layout.col_starts, vec![0, 12]);
        assert_eq!(frame.layout.row_heights.len(), 2);
        assert_eq!(
            frame.layout.total_height,
            frame.layout.row_heights.iter().sum::<usize>()
        );
    }

    #[test]
    fn test_lines_fit_terminal_width() {
        let frame = render_table(&rows(), &columns(), 40, &RenderOptions::default());
        for line in &frame.lines {
            assert!(visible_len(&line_text(line)) <= 40);
        }
    }

    #[test]
    fn test_wrapped_row_height() {
        let rows: Vec<Vec<String>> =
            vec![vec!["cmd".into(), "a b c d e f g h i j k l m n".into()]];
        let cols = vec![
            Column::new("C").min_width(4).no_wrap(),
            Column::new("D").min_width(4).max_width(6),
        ];
        let frame = render_table(&rows, &cols, 14, &RenderOptions::default());
        assert!(frame.layout.row_heights[0] > 1);
        assert_eq!(frame.lines.len(), frame.layout.row_heights[0]);
    }

    #[test]
    fn test_crop_column_contributes_height_one() {
        // Multi-line content in a no-wrap column is cropped to one line.
        let rows: Vec<Vec<String>> = vec![vec!["first\nsecond\nthird".into(), "x".into()]];
        let cols = vec![
            Column::new("A").min_width(20).no_wrap(),
            Column::new("B").min_width(4),
        ];
        let frame = render_table(&rows, &cols, 40, &RenderOptions::default());
        assert_eq!(frame.layout.row_heights, vec![1]);
    }

    #[test]
    fn test_header_line_rendered_and_aligned() {
        let opts = RenderOptions {
            show_header: true,
            ..RenderOptions::default()
        };
        let frame = render_table(&rows(), &columns(), 40, &opts);
        let header = line_text(&frame.lines[0]);
        assert!(header.starts_with("Command"));
        assert!(header.contains("Description"));
        assert_eq!(frame.lines[0][0].attr, Attr::DIM | Attr::BOLD);
        // Header is not part of row content height.
        assert_eq!(frame.lines.len(), 1 + frame.layout.total_height);
    }

    #[test]
    fn test_clipping_stops_mid_row() {
        let rows: Vec<Vec<String>> = vec![
            vec!["a".into(), "one two three four five six seven".into()],
            vec!["b".into(), "never drawn".into()],
        ];
        let cols = vec![
            Column::new("A").min_width(2).no_wrap(),
            Column::new("B").min_width(4).max_width(6),
        ];
        let opts = RenderOptions {
            max_height: 3,
            ..RenderOptions::default()
        };
        let frame = render_table(&rows, &cols, 12, &opts);
        assert_eq!(frame.lines.len(), 3);
        assert!(frame.layout.total_height > 3);
        assert!(!frame.lines.iter().any(|l| line_text(l).contains("never")));
    }

    #[test]
    fn test_highlight_overrides_hooks() {
        let loud = |_: usize, _: usize, _: &str| Attr::ALERT | Attr::UNDERLINE;
        let opts = RenderOptions {
            highlight_row: Some(0),
            cell_style: Some(&loud),
            ..RenderOptions::default()
        };
        let frame = render_table(&rows(), &columns(), 40, &opts);
        for segment in &frame.lines[0] {
            if !segment.text.trim().is_empty() {
                assert_eq!(segment.attr, Attr::HIGHLIGHT);
            }
        }
    }

    #[test]
    fn test_hooks_combine_with_or() {
        let cell = |_: usize, _: usize, _: &str| Attr::ACCENT;
        let line = |_: usize, _: usize, _: usize, _: &str| Attr::DIM;
        let opts = RenderOptions {
            base_attr: Attr::BOLD,
            cell_style: Some(&cell),
            line_style: Some(&line),
            ..RenderOptions::default()
        };
        let frame = render_table(&rows(), &columns(), 40, &opts);
        assert_eq!(frame.lines[0][0].attr, Attr::BOLD | Attr::ACCENT | Attr::DIM);
    }

    #[test]
    fn test_panicking_hook_is_isolated() {
        let bad = |_: usize, _: usize, _: &str| -> Attr { panic!("caller bug") };
        let opts = RenderOptions {
            cell_style: Some(&bad),
            ..RenderOptions::default()
        };
        let frame = render_table(&rows(), &columns(), 40, &opts);
        assert_eq!(frame.lines[0][0].attr, Attr::empty());
    }

    #[test]
    fn test_empty_rows() {
        let rows: Vec<Vec<String>> = Vec::new();
        let frame = render_table(&rows, &columns(), 40, &RenderOptions::default());
        assert!(frame.lines.is_empty());
        assert_eq!(frame.layout.total_height, 0);
    }
}
