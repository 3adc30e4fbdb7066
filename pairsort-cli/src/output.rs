/// Output formatting: terminal table, JSON, and the ranked-list file.
///
/// IDs are indices into the name table, so every function here takes the
/// final ranking plus `names` and resolves display text by index.
use pairsort_core::{ItemId, Mode};
use serde::Serialize;
use std::path::Path;

use crate::bail;

#[derive(Serialize)]
struct JsonRankedItem {
    rank: usize,
    name: String,
}

#[derive(Serialize)]
struct JsonOutput {
    items: Vec<JsonRankedItem>,
    total_items: usize,
    comparisons: usize,
    mode: String,
}

/// Print the final ranking as a formatted terminal table.
pub fn print_table(ranking: &[ItemId], names: &[String], comparisons: usize) {
    // Find the widest item name for padding
    let name_width = ranking.iter()
        .map(|&id| names[id as usize].len())
        .max()
        .unwrap_or(4)
        .max(4); // at least "Item"

    println!(" # | {:<name_width$}", "Item");
    println!("---|-{}", "-".repeat(name_width));

    for (i, &id) in ranking.iter().enumerate() {
        println!("{:>2} | {:<name_width$}", i + 1, names[id as usize]);
    }

    println!("\n{} items ranked ({} comparisons answered)", ranking.len(), comparisons);
}

/// Print the final ranking as JSON.
pub fn print_json(ranking: &[ItemId], names: &[String], comparisons: usize, mode: Mode) {
    let items: Vec<JsonRankedItem> = ranking
        .iter()
        .enumerate()
        .map(|(i, &id)| JsonRankedItem {
            rank: i + 1,
            name: names[id as usize].clone(),
        })
        .collect();

    let output = JsonOutput {
        items,
        total_items: ranking.len(),
        comparisons,
        mode: match mode {
            Mode::Full => "full".to_string(),
            Mode::Partial => "partial".to_string(),
        },
    };

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

/// Write the final ranking to a file, one item per line: the format
/// `merge --ranked` reads back.
pub fn write_ranking(path: &Path, ranking: &[ItemId], names: &[String]) {
    let mut content = ranking
        .iter()
        .map(|&id| names[id as usize].as_str())
        .collect::<Vec<_>>()
        .join("\n");
    content.push('\n');

    std::fs::write(path, content)
        .unwrap_or_else(|e| bail(format!("Failed to write ranking to {}: {e}", path.display())));
}
