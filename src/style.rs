//! Attribute flags and the session styling backend.
//!
//! Style hooks and the renderer exchange [`Attr`] values, a small
//! bitflags set combined with bitwise OR. A [`Theme`] owns the mapping
//! from color slots to concrete terminal colors, resolved once at
//! session start, so no backend-specific style identifiers leak into
//! table or selection code.

use bitflags::bitflags;
use crossterm::style::{Attribute, Color, ContentStyle};

use crate::terminal;

bitflags! {
    /// Display attributes for one styled write.
    ///
    /// The low bits are text decorations; the high bits are semantic
    /// color slots resolved by the active [`Theme`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attr: u16 {
        /// Bold text.
        const BOLD      = 1 << 0;
        /// Dim/faint text.
        const DIM       = 1 << 1;
        /// Reverse video.
        const REVERSE   = 1 << 2;
        /// Underlined text.
        const UNDERLINE = 1 << 3;
        /// Accent color slot (cyan by default).
        const ACCENT    = 1 << 4;
        /// Success color slot (green by default).
        const OK        = 1 << 5;
        /// Alert color slot (red by default).
        const ALERT     = 1 << 6;
        /// Note color slot (magenta by default).
        const NOTE      = 1 << 7;
    }
}

impl Attr {
    /// The style forced onto the highlighted row, overriding hook output.
    pub const HIGHLIGHT: Self = Self::REVERSE.union(Self::BOLD);
}

/// Maps attribute flags to concrete terminal styling.
///
/// Built once per interactive session; color slots collapse to plain
/// text when colors are disabled (`NO_COLOR`, dumb or non-tty output).
#[derive(Debug, Clone)]
pub struct Theme {
    colors: bool,
    accent: Color,
    ok: Color,
    alert: Color,
    note: Color,
}

impl Theme {
    /// Build a theme with the default palette.
    #[must_use]
    pub fn new(colors: bool) -> Self {
        Self {
            colors,
            accent: Color::Cyan,
            ok: Color::Green,
            alert: Color::Red,
            note: Color::Magenta,
        }
    }

    /// Build a theme from the detected terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        Self::new(terminal::colors_enabled())
    }

    /// Whether color slots resolve to real colors.
    #[must_use]
    pub const fn colors_enabled(&self) -> bool {
        self.colors
    }

    /// Resolve an attribute set into the style for the next write.
    #[must_use]
    pub fn content_style(&self, attr: Attr) -> ContentStyle {
        let mut style = ContentStyle::new();

        if attr.contains(Attr::BOLD) {
            style.attributes = style.attributes.with(Attribute::Bold);
        }
        if attr.contains(Attr::DIM) {
            style.attributes = style.attributes.with(Attribute::Dim);
        }
        if attr.contains(Attr::REVERSE) {
            style.attributes = style.attributes.with(Attribute::Reverse);
        }
        if attr.contains(Attr::UNDERLINE) {
            style.attributes = style.attributes.with(Attribute::Underlined);
        }

        if self.colors {
            style.foreground_color = self.slot_color(attr);
        }

        style
    }

    /// First color slot present, in declaration order.
    fn slot_color(&self, attr: Attr) -> Option<Color> {
        if attr.contains(Attr::ACCENT) {
            Some(self.accent)
        } else if attr.contains(Attr::OK) {
            Some(self.ok)
        } else if attr.contains(Attr::ALERT) {
            Some(self.alert)
        } else if attr.contains(Attr::NOTE) {
            Some(self.note)
        } else {
            None
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(true)
    }
}
