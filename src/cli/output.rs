//! Output formatting for CLI reports

use crate::{menace::TableStats, session::Tally};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(40));
    println!("{title}");
    println!("{}", "=".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

fn percent(part: usize, total: usize) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", part as f64 * 100.0 / total as f64)
}

pub fn print_tally(tally: &Tally) {
    let total = tally.total();
    print_kv("Games", &format_number(total));
    print_kv(
        "Crosses won",
        &format!("{} ({})", tally.cross_wins, percent(tally.cross_wins, total)),
    );
    print_kv(
        "Naughts won",
        &format!("{} ({})", tally.naught_wins, percent(tally.naught_wins, total)),
    );
    print_kv(
        "Draws",
        &format!("{} ({})", tally.draws, percent(tally.draws, total)),
    );
}

pub fn print_table_stats(stats: &TableStats, save_count: u64) {
    print_kv("Configurations", &format_number(stats.entries));
    print_kv("Total weight", &format_number(stats.total_weight));
    print_kv("Trained entries", &format_number(stats.trained_entries));
    print_kv("Save count", &save_count.to_string());
}
