use std::collections::HashSet;

use colored::Colorize;
use comfy_table::{Cell, Color, Table};

use crate::types::ForwardEntry;

pub fn print_forwards(entries: &[ForwardEntry]) {
    print_forwards_inner(entries, &HashSet::new())
}

#[cfg(feature = "watch")]
pub fn print_forwards_watch(entries: &[ForwardEntry], new_entries: &HashSet<&ForwardEntry>) {
    print_forwards_inner(entries, new_entries)
}

fn print_forwards_inner(entries: &[ForwardEntry], new_entries: &HashSet<&ForwardEntry>) {
    if entries.is_empty() {
        println!("{}", "No forwarded ports".yellow());
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["HOST PORT", "DEVICE PORT", "SERIAL"]);

    for entry in entries {
        let is_new = new_entries.contains(entry);
        let row_color = if is_new { Color::Green } else { Color::Reset };

        table.add_row(vec![
            Cell::new(entry.host_port).fg(if is_new { Color::Green } else { Color::Cyan }),
            Cell::new(&entry.device_port).fg(row_color),
            Cell::new(&entry.serial).fg(row_color),
        ]);
    }

    println!("{table}");

    let count_str = entries.len().to_string();
    if new_entries.is_empty() {
        println!("\n{} forward(s)", count_str.green());
    } else {
        println!(
            "\n{} forward(s) ({} new)",
            count_str.green(),
            new_entries.len().to_string().green().bold()
        );
    }
}
