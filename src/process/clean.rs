// src/process/clean.rs

use std::collections::HashSet;

/// Drop every whitespace character from a header.
///
/// Some reports write `Settlement Date`, others `SettlementDate`.
pub fn normalize_column_name(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Make cleaned names unique. A repeated name gets `.1`, `.2`, ... appended,
/// skipping any suffix already taken, so `Quantity,Quan tity` keeps both
/// columns as `Quantity` and `Quantity.1`.
pub fn dedupe_column_names(names: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = names.iter().cloned().collect();
    let mut seen: HashSet<String> = HashSet::with_capacity(names.len());
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let unique = if seen.contains(&name) {
            let mut n = 1usize;
            let mut candidate = format!("{name}.{n}");
            while taken.contains(&candidate) {
                n += 1;
                candidate = format!("{name}.{n}");
            }
            taken.insert(candidate.clone());
            candidate
        } else {
            name
        };
        seen.insert(unique.clone());
        out.push(unique);
    }
    out
}

/// Empty CSV fields become nulls; everything else is kept verbatim.
pub fn cell_value(raw: Option<&str>) -> Option<String> {
    raw.filter(|v| !v.is_empty()).map(str::to_string)
}

/// A settlement date is missing when the cell is null or only whitespace.
pub fn is_missing(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
