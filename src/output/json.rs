use crate::types::ForwardEntry;

pub fn print_forwards(entries: &[ForwardEntry]) {
    let json = serde_json::to_string_pretty(entries).expect("Failed to serialize to JSON");
    println!("{json}");
}
