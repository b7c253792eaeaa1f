//! Interactive demo: pick a command, then an action for it.
//!
//! Run with `cargo run --example picker` in a real terminal.

use gridpick::prelude::*;

fn main() {
    let columns = vec![
        Column::new("Command").min_width(30).no_wrap(),
        Column::new("Status").min_width(6).max_width(12).no_wrap(),
        Column::new("Description").min_width(20),
    ];

    let rows: Vec<Vec<String>> = vec![
        vec![
            "cargo build --release".into(),
            "✓✓".into(),
            "compile the crate with optimizations enabled".into(),
        ],
        vec![
            "rg TODO --glob '*.rs'".into(),
            "✗ rg".into(),
            "search the tree for open follow-ups".into(),
        ],
        vec![
            "du -sh target/".into(),
            "✓✓".into(),
            "show how much disk the build artifacts use".into(),
        ],
    ];

    // Commands in accent, status colored by its marker.
    let cell_style = |_row: usize, col: usize, text: &str| -> Attr {
        match col {
            0 => Attr::ACCENT,
            1 if text.starts_with('✓') => Attr::OK,
            1 => Attr::ALERT | Attr::BOLD,
            2 => Attr::DIM,
            _ => Attr::empty(),
        }
    };

    let menu = |_row: usize| -> Vec<String> {
        vec!["Run".into(), "Explain".into(), "Back".into()]
    };

    let outcome = GridSelect::new(&rows, &columns)
        .title(" Suggested commands ")
        .menu_provider(&menu)
        .submenu_cols(3)
        .cell_style(&cell_style)
        .run();

    match outcome {
        Ok(Outcome::Row(row)) => println!("selected row {row}: {}", rows[row][0]),
        Ok(Outcome::MenuItem { row, item }) => {
            println!("row {row} ({}), action {item}", rows[row][0]);
        }
        Ok(Outcome::Quit) => println!("no selection"),
        Err(err) => eprintln!("error: {err}"),
    }
}
