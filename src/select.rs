//! Interactive row/sub-menu selection over the table renderer.
//!
//! [`GridSelect`] owns one blocking interactive session: it draws the
//! table, reads key events in raw mode and walks a two-state machine
//! (`Rows`, then an optional per-row `Submenu` grid) until the user
//! confirms or quits. The machine itself is pure: [`GridSelect::handle_key`]
//! takes no terminal, so navigation rules can be exercised headlessly.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::queue;
use crossterm::style::{PrintStyledContent, StyledContent};
use crossterm::terminal::{Clear, ClearType};
use log::debug;

use crate::ansi::crop_visible;
use crate::layout::Column;
use crate::style::{Attr, Theme};
use crate::table::{CellStyleFn, LineStyleFn, RenderOptions, render_table};
use crate::terminal::{self, RawModeGuard};

/// Terminal result of one interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A row was confirmed directly (no sub-menu for it).
    Row(usize),
    /// A sub-menu item was confirmed for a row.
    MenuItem { row: usize, item: usize },
    /// The user quit without selecting.
    Quit,
}

/// Errors returned by [`GridSelect::run`].
#[derive(Debug)]
pub enum SelectError {
    /// Selection requires an interactive terminal.
    NotInteractive,
    /// I/O error while drawing or reading input.
    Io(io::Error),
}

impl std::fmt::Display for SelectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInteractive => write!(f, "selection requires an interactive terminal"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SelectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::NotInteractive => None,
        }
    }
}

impl From<io::Error> for SelectError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Interaction mode. `Submenu` materializes the row's menu items for the
/// duration of the visit; cancelling discards them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Rows,
    Submenu { items: Vec<String>, selected: usize },
}

/// Mutable interaction state for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectState {
    /// Highlighted row index, clamped to `[0, row_count - 1]`.
    pub row: usize,
    /// Current interaction mode.
    pub mode: Mode,
}

impl SelectState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            row: 0,
            mode: Mode::Rows,
        }
    }
}

impl Default for SelectState {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one interactive grid-selection session.
///
/// Row data, column specs and style hooks stay caller-owned and
/// read-only; the session owns only its transient state and is consumed
/// by [`run`](Self::run).
pub struct GridSelect<'a> {
    rows: &'a [Vec<String>],
    columns: &'a [Column],
    menu_provider: Option<&'a dyn Fn(usize) -> Vec<String>>,
    submenu_cols: usize,
    title: Option<String>,
    cell_style: Option<CellStyleFn<'a>>,
    line_style: Option<LineStyleFn<'a>>,
    theme: Theme,
}

impl<'a> GridSelect<'a> {
    #[must_use]
    pub fn new(rows: &'a [Vec<String>], columns: &'a [Column]) -> Self {
        Self {
            rows,
            columns,
            menu_provider: None,
            submenu_cols: 3,
            title: None,
            cell_style: None,
            line_style: None,
            theme: Theme::detect(),
        }
    }

    /// Provide the per-row action menu. Invoked lazily, at most once per
    /// `Rows -> Submenu` transition; an empty result means "this row has
    /// no sub-menu" and confirms the row directly.
    #[must_use]
    pub fn menu_provider(mut self, provider: &'a dyn Fn(usize) -> Vec<String>) -> Self {
        self.menu_provider = Some(provider);
        self
    }

    /// Number of sub-menu grid columns; also the vertical navigation
    /// stride. Floored at 1.
    #[must_use]
    pub fn submenu_cols(mut self, cols: usize) -> Self {
        self.submenu_cols = cols.max(1);
        self
    }

    /// Decorative title drawn once per frame above the table.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Best-effort per-cell style hook.
    #[must_use]
    pub fn cell_style(mut self, hook: CellStyleFn<'a>) -> Self {
        self.cell_style = Some(hook);
        self
    }

    /// Best-effort per-line style hook.
    #[must_use]
    pub fn line_style(mut self, hook: LineStyleFn<'a>) -> Self {
        self.line_style = Some(hook);
        self
    }

    /// Override the detected theme.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Feed one key event through the state machine.
    ///
    /// Returns the terminal [`Outcome`] when the event ends the session.
    /// Row navigation clamps; sub-menu left/right wraps around; sub-menu
    /// up/down strides by the grid column count and clamps. Ctrl-C is
    /// equivalent to quit in either mode.
    pub fn handle_key(&self, state: &mut SelectState, key: KeyEvent) -> Option<Outcome> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Outcome::Quit);
        }

        match &mut state.mode {
            Mode::Rows => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    state.row = state.row.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    state.row = (state.row + 1).min(self.rows.len().saturating_sub(1));
                }
                KeyCode::Enter => {
                    let items = self
                        .menu_provider
                        .map(|provider| provider(state.row))
                        .unwrap_or_default();
                    if items.is_empty() {
                        return Some(Outcome::Row(state.row));
                    }
                    debug!("entering submenu for row {} ({} items)", state.row, items.len());
                    state.mode = Mode::Submenu { items, selected: 0 };
                }
                KeyCode::Esc | KeyCode::Char('q') => return Some(Outcome::Quit),
                _ => {}
            },
            Mode::Submenu { items, selected } => match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    *selected = (*selected + items.len() - 1) % items.len();
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    *selected = (*selected + 1) % items.len();
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    *selected = selected.saturating_sub(self.submenu_cols);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    *selected = (*selected + self.submenu_cols).min(items.len() - 1);
                }
                KeyCode::Enter => {
                    return Some(Outcome::MenuItem {
                        row: state.row,
                        item: *selected,
                    });
                }
                KeyCode::Esc | KeyCode::Char('q') => {
                    debug!("leaving submenu for row {}", state.row);
                    state.mode = Mode::Rows;
                }
                _ => {}
            },
        }

        None
    }

    /// Run the interactive session to completion.
    ///
    /// Blocks until the user confirms or quits. Raw mode, the alternate
    /// screen and cursor visibility are restored on every exit path.
    pub fn run(self) -> Result<Outcome, SelectError> {
        if self.rows.is_empty() {
            return Ok(Outcome::Quit);
        }
        if !terminal::is_terminal() {
            return Err(SelectError::NotInteractive);
        }

        let guard = RawModeGuard::acquire()?;
        let outcome = self.event_loop();
        drop(guard);
        outcome
    }

    fn event_loop(&self) -> Result<Outcome, SelectError> {
        let mut state = SelectState::new();
        let mut out = io::stdout();

        loop {
            self.draw(&mut out, &state)?;
            let event = match event::read() {
                Ok(event) => event,
                // An interrupted wait counts as quitting.
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                    return Ok(Outcome::Quit);
                }
                Err(err) => return Err(err.into()),
            };
            match event {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let Some(outcome) = self.handle_key(&mut state, key) {
                        debug!("selection finished: {outcome:?}");
                        return Ok(outcome);
                    }
                }
                // A resize only triggers a redraw at the current state.
                Event::Resize(..) => {}
                _ => {}
            }
        }
    }

    fn draw(&self, out: &mut impl Write, state: &SelectState) -> io::Result<()> {
        let (width, height) = terminal::get_terminal_size().unwrap_or((100, 24));
        queue!(out, Clear(ClearType::All))?;

        let mut y = 0;
        if let Some(title) = &self.title {
            self.put(out, 0, y, &crop_visible(title, width, false), Attr::BOLD)?;
            y += 1;
        }

        let table_max_h = height.saturating_sub(y + 3).max(3);
        let opts = RenderOptions {
            gap: 2,
            max_height: table_max_h,
            highlight_row: matches!(state.mode, Mode::Rows).then_some(state.row),
            show_header: true,
            base_attr: Attr::empty(),
            header_attr: Attr::DIM | Attr::BOLD,
            highlight_attr: Attr::HIGHLIGHT,
            cell_style: self.cell_style,
            line_style: self.line_style,
        };
        let frame = render_table(self.rows, self.columns, width, &opts);
        for line in &frame.lines {
            queue!(out, MoveTo(0, cast(y)))?;
            for segment in line {
                let styled =
                    StyledContent::new(self.theme.content_style(segment.attr), &segment.text);
                queue!(out, PrintStyledContent(styled))?;
            }
            y += 1;
        }

        if let Mode::Submenu { items, selected } = &state.mode {
            self.put(out, 0, y, " Select action (←/→, Enter, Esc):", Attr::DIM)?;
            y += 1;

            let cols = self.submenu_cols;
            let gap = 3;
            let cell_w = (width.saturating_sub((cols - 1) * gap) / cols).max(8);
            let grid_rows = items.len().div_ceil(cols);
            for r in 0..grid_rows {
                let mut x = 0;
                for c in 0..cols {
                    let idx = r * cols + c;
                    if idx >= items.len() {
                        break;
                    }
                    let label = crop_visible(&format!("[ {} ]", items[idx]), cell_w, true);
                    let attr = if idx == *selected {
                        Attr::HIGHLIGHT
                    } else {
                        Attr::empty()
                    };
                    self.put(out, x, y, &label, attr)?;
                    x += cell_w + gap;
                }
                y += 1;
            }
        }

        let help = " ↑/↓ move • Enter select • q/Esc quit • submenu: ←/→ move, Enter";
        self.put(
            out,
            0,
            height.saturating_sub(1),
            &crop_visible(help, width, false),
            Attr::DIM,
        )?;

        out.flush()
    }

    fn put(&self, out: &mut impl Write, x: usize, y: usize, text: &str, attr: Attr) -> io::Result<()> {
        queue!(out, MoveTo(cast(x), cast(y)))?;
        let styled = StyledContent::new(self.theme.content_style(attr), text);
        queue!(out, PrintStyledContent(styled))?;
        Ok(())
    }
}

fn cast(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
