use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print `label: value` rows with the labels padded to a common width.
pub fn print_fields(rows: &[(&str, String)]) {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in rows {
        println!("{:width$}  {}", format!("{label}:"), value, width = width + 1);
    }
}

/// Print a heading followed by a bulleted list, skipping empty lists.
pub fn print_list(heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{heading}:");
    for item in items {
        println!("  - {item}");
    }
}
