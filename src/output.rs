use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::view::{render, Notice, NoticeLevel, ViewState};

static OUTPUT_JSON: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_json_output(json: bool) {
    OUTPUT_JSON.store(json, Ordering::Relaxed);
}

pub fn is_json_output() -> bool {
    OUTPUT_JSON.load(Ordering::Relaxed)
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print the user list or its JSON form depending on output mode
pub fn print_view(state: &ViewState) {
    if is_json_output() {
        println!(
            "{}",
            serde_json::to_string_pretty(&render::json(state)).unwrap_or_default()
        );
    } else {
        println!("{}", render::table(state));
    }
}

/// Print a table or JSON depending on output mode
pub fn print_table<T, R, F>(items: &[T], to_row: F)
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if is_json_output() {
        println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }
}

/// Print a message (suppressed with --quiet, wrapped in an object for JSON)
pub fn print_message(message: &str) {
    if is_quiet() {
        return;
    }
    if is_json_output() {
        println!("{}", serde_json::json!({ "message": message }));
    } else {
        println!("{message}");
    }
}

/// Show controller notices on stderr so they never mix with table/JSON output.
/// Info notices honour --quiet; warnings and errors always show.
pub fn print_notices(notices: &[Notice]) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Info if !is_quiet() => eprintln!("{}", notice.message),
            NoticeLevel::Info => {}
            NoticeLevel::Warning => eprintln!("{} {}", "warning:".yellow().bold(), notice.message),
            NoticeLevel::Error => eprintln!("{} {}", "error:".red().bold(), notice.message),
        }
    }
}
