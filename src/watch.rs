use std::collections::HashSet;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::output::{json, table};
use crate::ports;
use crate::proxy::AdbProxy;
use crate::types::ForwardEntry;

pub struct WatchOptions {
    pub interval: Duration,
    pub json: bool,
}

pub fn run(proxy: &AdbProxy, options: WatchOptions) -> Result<()> {
    let mut previous: HashSet<ForwardEntry> = HashSet::new();

    loop {
        clear_screen();

        let entries = ports::list_forwards(proxy).context("Failed to list adb forwards")?;

        if options.json {
            json::print_forwards(&entries);
        } else {
            let new_entries: HashSet<&ForwardEntry> = entries
                .iter()
                .filter(|e| !previous.contains(*e))
                .collect();

            table::print_forwards_watch(&entries, &new_entries);
        }

        print_watch_status(&options);
        io::stdout().flush()?;

        previous = entries.into_iter().collect();
        thread::sleep(options.interval);
    }
}

fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}

fn print_watch_status(options: &WatchOptions) {
    use colored::Colorize;
    println!(
        "\n{} adb forwards (every {:.1}s, Ctrl+C to exit)",
        "Watching".dimmed(),
        options.interval.as_secs_f64()
    );
}
