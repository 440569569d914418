/// Output formatting: terminal table and JSON.
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq)]
struct JsonRankedItem {
    rank: usize,
    name: String,
}

#[derive(Debug, Serialize)]
struct JsonOutput {
    items: Vec<JsonRankedItem>,
    comparisons: usize,
    max_comparisons: usize,
}

/// Render the final ranking as a numbered table.
pub fn format_table(ranked: &[String], comparisons: usize, max_comparisons: usize) -> String {
    let rank_width = ranked.len().to_string().len().max(1);
    let name_width = ranked.iter().map(|n| n.chars().count()).max().unwrap_or(4).max(4); // at least "Item"

    let mut out = String::new();
    out.push_str(&format!("{:>rank_width$} | {:<name_width$}\n", "#", "Item"));
    out.push_str(&format!("{}-|-{}\n", "-".repeat(rank_width), "-".repeat(name_width)));

    for (i, name) in ranked.iter().enumerate() {
        out.push_str(&format!("{:>rank_width$} | {}\n", i + 1, name));
    }

    out.push_str(&format!(
        "\n{} items ranked with {} comparisons (worst case {})\n",
        ranked.len(),
        comparisons,
        max_comparisons,
    ));
    out
}

/// Render the final ranking as pretty JSON.
pub fn format_json(ranked: &[String], comparisons: usize, max_comparisons: usize) -> Result<String, String> {
    let items = ranked
        .iter()
        .enumerate()
        .map(|(i, name)| JsonRankedItem { rank: i + 1, name: name.clone() })
        .collect();

    let output = JsonOutput { items, comparisons, max_comparisons };
    serde_json::to_string_pretty(&output).map_err(|e| format!("Failed to serialize ranking: {e}"))
}
