//! # gridpick
//!
//! A terminal table layout and interactive selection widget.
//!
//! `gridpick` lays tabular data out into a fixed-width viewport (solving
//! per-column widths under a budget, wrapping or cropping cell text while
//! leaving embedded SGR escapes intact) and runs a two-level keyboard
//! selection over the result: pick a row, then optionally pick an action
//! from that row's sub-menu.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gridpick::prelude::*;
//!
//! let columns = vec![
//!     Column::new("Command").min_width(36).no_wrap(),
//!     Column::new("Description").min_width(24),
//! ];
//! let rows = vec![
//!     vec!["cargo build".to_string(), "compile the crate".to_string()],
//!     vec!["cargo doc --open".to_string(), "build and open docs".to_string()],
//! ];
//! let menu = |_row: usize| vec!["Run".to_string(), "Back".to_string()];
//!
//! match GridSelect::new(&rows, &columns)
//!     .title(" Pick a command ")
//!     .menu_provider(&menu)
//!     .submenu_cols(2)
//!     .run()?
//! {
//!     Outcome::Row(row) => println!("row {row}"),
//!     Outcome::MenuItem { row, item } => println!("row {row}, action {item}"),
//!     Outcome::Quit => {}
//! }
//! # Ok::<(), gridpick::SelectError>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Column**: per-column layout constraints (bounds, wrap, ellipsis)
//! - **Layout**: solved widths, offsets and heights for one render pass
//! - **Attr / Theme**: style tokens and their terminal resolution
//! - **GridSelect**: the blocking interactive selection session

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]

pub mod ansi;
pub mod layout;
pub mod select;
pub mod spinner;
pub mod style;
pub mod table;
pub mod terminal;
pub mod wrap;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::ansi::{crop_visible, ljust_visible, strip_ansi, visible_len};
    pub use crate::layout::{Column, Layout};
    pub use crate::select::{GridSelect, Mode, Outcome, SelectError, SelectState};
    pub use crate::spinner::{Spinner, with_spinner};
    pub use crate::style::{Attr, Theme};
    pub use crate::table::{Frame, RenderOptions, Segment, render_table};
    pub use crate::wrap::wrap_visible;
}

// Re-export key types at crate root
pub use layout::{Column, Layout};
pub use select::{GridSelect, Outcome, SelectError};
pub use style::{Attr, Theme};
pub use table::{Frame, RenderOptions, render_table};
