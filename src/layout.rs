//! Column constraints and the column-width solver.
//!
//! The solver takes a terminal width budget, an inter-column gap and the
//! per-column constraints, and produces one width per column. When the
//! sampled content fits the budget, wrap-capable columns grow round-robin
//! to absorb the leftover; when it does not, columns receive proportional
//! floor shares that are then repaired one cell at a time until the total
//! matches the budget, never pushing a column outside its bounds.

use log::trace;
use num_rational::Ratio;
use smallvec::SmallVec;

use crate::ansi::visible_len;

/// Sampled content widths are capped so one pathological cell cannot
/// dominate the layout.
const SAMPLE_CEILING: usize = 200;

/// Bound on the rounding-remainder repair loop.
const REPAIR_ITER_CAP: usize = 10_000;

/// Static layout constraints for one displayed column.
#[derive(Debug, Clone)]
pub struct Column {
    /// Header label; participates in width sampling and the header row.
    pub header: String,
    /// Width floor, always respected. At least 1.
    pub min_width: usize,
    /// Width ceiling; unlimited when absent.
    pub max_width: Option<usize>,
    /// Wrap-capable columns may span multiple display lines and absorb
    /// or relinquish layout slack; others are cropped to one line.
    pub wrap: bool,
    /// Cropped text ends in a one-cell `…` instead of a hard cut.
    pub ellipsis: bool,
}

impl Column {
    /// Create a wrap-capable column with the default minimum width of 8.
    #[must_use]
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            min_width: 8,
            max_width: None,
            wrap: true,
            ellipsis: true,
        }
    }

    /// Set the minimum width (floored at 1).
    #[must_use]
    pub fn min_width(mut self, width: usize) -> Self {
        self.min_width = width.max(1);
        self
    }

    /// Set the maximum width (floored at the minimum width).
    #[must_use]
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width.max(self.min_width));
        self
    }

    /// Crop this column to a single line instead of wrapping.
    #[must_use]
    pub fn no_wrap(mut self) -> Self {
        self.wrap = false;
        self
    }

    /// Enable or disable the ellipsis marker on cropped text.
    #[must_use]
    pub fn ellipsis(mut self, ellipsis: bool) -> Self {
        self.ellipsis = ellipsis;
        self
    }

    fn cap(&self) -> usize {
        self.max_width.unwrap_or(usize::MAX)
    }
}

/// Derived output of one render pass. Recomputed every frame, never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Resolved width per column.
    pub widths: Vec<usize>,
    /// Horizontal start offset per column.
    pub col_starts: Vec<usize>,
    /// Resolved height per row (max wrapped-line count across its cells).
    pub row_heights: Vec<usize>,
    /// Total vertical height of the full content, before clipping.
    pub total_height: usize,
}

/// The widest visible line of a cell, capped at the sanity ceiling.
fn cell_sample(cell: &str) -> usize {
    cell.split('\n')
        .map(visible_len)
        .max()
        .unwrap_or(0)
        .min(SAMPLE_CEILING)
}

/// Ideal width per column: the maximum visible width across the header
/// and every cell in that column, clamped into the column's bounds.
#[must_use]
pub fn sample_ideal_widths<R, C>(columns: &[Column], rows: &[R]) -> Vec<usize>
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    columns
        .iter()
        .enumerate()
        .map(|(j, col)| {
            let mut sample = visible_len(&col.header).min(SAMPLE_CEILING);
            for row in rows {
                if let Some(cell) = row.as_ref().get(j) {
                    sample = sample.max(cell_sample(cell.as_ref()));
                }
            }
            sample.max(col.min_width).min(col.cap())
        })
        .collect()
}

/// Solve per-column widths for a terminal width budget.
///
/// Every returned width lies within its column's declared bounds. When
/// the column minimums alone exceed the budget the discrepancy is left
/// unresolved and rendering clips at the right edge.
#[must_use]
pub fn solve_widths(
    term_width: usize,
    gap: usize,
    columns: &[Column],
    ideal: &[usize],
) -> Vec<usize> {
    let ncols = columns.len();
    if ncols == 0 {
        return Vec::new();
    }
    debug_assert_eq!(ncols, ideal.len());

    let budget = term_width.saturating_sub(gap * (ncols - 1)).max(1);
    let sum_ideal: usize = ideal.iter().sum::<usize>().max(1);

    let widths = if sum_ideal <= budget {
        grow_into_budget(budget, columns, ideal)
    } else {
        shrink_into_budget(budget, sum_ideal, columns, ideal)
    };

    trace!("solved widths {widths:?} for budget {budget} (gap {gap})");
    widths
}

/// Content fits: grant ideal widths, then let wrap-capable columns absorb
/// the leftover round-robin, each capped at its own maximum.
fn grow_into_budget(budget: usize, columns: &[Column], ideal: &[usize]) -> Vec<usize> {
    let mut widths: Vec<usize> = ideal
        .iter()
        .zip(columns)
        .map(|(&w, col)| w.min(col.cap()))
        .collect();
    let mut leftover = budget.saturating_sub(widths.iter().sum());

    let wrap_cols: SmallVec<[usize; 8]> = columns
        .iter()
        .enumerate()
        .filter(|(_, col)| col.wrap)
        .map(|(j, _)| j)
        .collect();

    let mut k = 0;
    while leftover > 0 && !wrap_cols.is_empty() {
        let j = wrap_cols[k % wrap_cols.len()];
        let add = leftover.min(columns[j].cap().saturating_sub(widths[j]));
        if add == 0 {
            k += 1;
            if k > 3 * wrap_cols.len() {
                break;
            }
            continue;
        }
        widths[j] += add;
        leftover -= add;
        k += 1;
    }

    widths
}

/// Content exceeds the budget: proportional floor shares, floored at each
/// minimum, then a bounded ±1 round-robin repair until the total matches
/// the budget exactly.
fn shrink_into_budget(
    budget: usize,
    sum_ideal: usize,
    columns: &[Column],
    ideal: &[usize],
) -> Vec<usize> {
    let share_of = |w: usize| (Ratio::from_integer(budget) * Ratio::new(w, sum_ideal)).to_integer();
    let mut widths: Vec<usize> = columns
        .iter()
        .zip(ideal)
        .map(|(col, &w)| share_of(w).max(col.min_width))
        .collect();

    let wrap_cols: SmallVec<[usize; 8]> = columns
        .iter()
        .enumerate()
        .filter(|(_, col)| col.wrap)
        .map(|(j, _)| j)
        .collect();
    let all_cols: SmallVec<[usize; 8]> = (0..columns.len()).collect();

    // Wrap-capable columns soak up the remainder first; once none of
    // them can move, any column becomes eligible. A remainder that
    // survives both passes is left unresolved (minimums exceed budget).
    let mut diff = budget as isize - widths.iter().sum::<usize>() as isize;
    diff = repair(&mut widths, columns, &wrap_cols, diff);
    diff = repair(&mut widths, columns, &all_cols, diff);
    if diff != 0 {
        trace!("width repair left {diff} cells unresolved");
    }

    widths
}

/// Apply ±1 adjustments round-robin over `candidates` until `diff` is
/// zero or a full cycle makes no progress. Returns the remaining diff.
fn repair(widths: &mut [usize], columns: &[Column], candidates: &[usize], mut diff: isize) -> isize {
    if candidates.is_empty() {
        return diff;
    }

    let mut j = 0;
    let mut stalled = 0;
    while diff != 0 && stalled < candidates.len() && j <= REPAIR_ITER_CAP {
        let step: isize = if diff > 0 { 1 } else { -1 };
        let idx = candidates[j % candidates.len()];
        let next = widths[idx] as isize + step;
        if next >= columns[idx].min_width as isize && next <= cap_isize(&columns[idx]) {
            widths[idx] = next as usize;
            diff -= step;
            stalled = 0;
        } else {
            stalled += 1;
        }
        j += 1;
    }

    diff
}

fn cap_isize(col: &Column) -> isize {
    col.max_width.map_or(isize::MAX, |m| m as isize)
}
