//! Rendering of collected results.
//!
//! Two renderings are provided: a colorized table for terminals and a single
//! JSON document for scripting. Colors are chosen per [`ScaleUnit`] and carry
//! no meaning beyond the unit they stand for.

use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::{
    collector::{Collection, EntryFailure},
    entry::{EntryKind, SizeResult},
    utils::{ScaleUnit, scale},
};

/// Top-level JSON output emitted when `--json` is active.
#[derive(Serialize, Debug)]
pub struct JsonOutput {
    /// Measured entries, in sorted order.
    pub results: Vec<JsonSizeEntry>,

    /// Entries that could not be measured.
    pub failures: Vec<JsonFailure>,

    /// Warnings raised while measuring (unreadable paths counted as 0 bytes).
    pub warnings: Vec<String>,

    /// Aggregated summary statistics.
    pub summary: JsonSummary,
}

/// A single measured entry in the JSON output.
#[derive(Serialize, Debug)]
pub struct JsonSizeEntry {
    /// `"file"` or `"directory"`.
    #[serde(rename = "type")]
    pub kind: EntryKind,

    /// Base name of the entry.
    pub name: String,

    /// Path as supplied.
    pub path: String,

    /// Total size in bytes.
    pub byte_size: u64,

    /// Size converted into `scale_unit`, two decimals.
    pub scaled_value: f64,

    /// `"KB"`, `"MB"` or `"GB"`.
    pub scale_unit: ScaleUnit,

    /// Human-readable size (e.g. `"4.20 MB"`).
    pub size_formatted: String,
}

/// A failed entry in the JSON output.
#[derive(Serialize, Debug)]
pub struct JsonFailure {
    /// Path as supplied.
    pub path: String,

    /// Error kind (`"not_found"`, `"permission_denied"`, `"listing_failed"`).
    pub kind: &'static str,

    /// Error message.
    pub message: String,
}

/// Aggregated summary across all measured entries.
#[derive(Serialize, Debug)]
pub struct JsonSummary {
    /// Number of entries measured successfully.
    pub measured: usize,

    /// Number of entries that failed.
    pub failed: usize,

    /// Number of warnings.
    pub warnings: usize,

    /// Sum of all measured sizes in bytes.
    pub total_size: u64,

    /// Human-readable formatted total size.
    pub total_size_formatted: String,
}

impl JsonOutput {
    /// Build the JSON document for a collection.
    #[must_use]
    pub fn from_collection(collection: &Collection) -> Self {
        let total_size = collection.total_size();

        Self {
            results: collection
                .results
                .iter()
                .map(JsonSizeEntry::from_result)
                .collect(),
            failures: collection
                .failures
                .iter()
                .map(JsonFailure::from_failure)
                .collect(),
            warnings: collection.warnings.iter().map(ToString::to_string).collect(),
            summary: JsonSummary {
                measured: collection.results.len(),
                failed: collection.failures.len(),
                warnings: collection.warnings.len(),
                total_size,
                total_size_formatted: scale(total_size).to_string(),
            },
        }
    }
}

impl JsonSizeEntry {
    /// Convert a [`SizeResult`] into a JSON entry.
    #[must_use]
    pub fn from_result(result: &SizeResult) -> Self {
        let scaled = result.scaled();

        Self {
            kind: result.kind(),
            name: result.name().to_string(),
            path: result.path().display().to_string(),
            byte_size: result.byte_size(),
            scaled_value: scaled.value(),
            scale_unit: scaled.unit(),
            size_formatted: scaled.to_string(),
        }
    }
}

impl JsonFailure {
    /// Convert an [`EntryFailure`] into a JSON failure.
    #[must_use]
    pub fn from_failure(failure: &EntryFailure) -> Self {
        Self {
            path: failure.path.display().to_string(),
            kind: failure.error.kind(),
            message: failure.error.to_string(),
        }
    }
}

/// Apply the color associated with a unit.
fn colorize_for_unit(text: &str, unit: ScaleUnit) -> ColoredString {
    match unit {
        ScaleUnit::Kb => text.green(),
        ScaleUnit::Mb => text.yellow(),
        ScaleUnit::Gb => text.red(),
    }
}

/// Render results as a table with `Type`, `Name` and `Size` columns.
///
/// Columns are padded on the plain text before colors are applied, so the
/// layout is the same with and without color.
#[must_use]
pub fn render_table(results: &[SizeResult]) -> String {
    const HEADERS: [&str; 3] = ["Type", "Name", "Size"];

    let rows: Vec<(String, String, String, ScaleUnit)> = results
        .iter()
        .map(|r| {
            let scaled = r.scaled();
            (
                r.kind().to_string(),
                r.name().to_string(),
                scaled.to_string(),
                scaled.unit(),
            )
        })
        .collect();

    let type_width = rows
        .iter()
        .map(|row| row.0.chars().count())
        .chain([HEADERS[0].len()])
        .max()
        .unwrap_or_default();
    let name_width = rows
        .iter()
        .map(|row| row.1.chars().count())
        .chain([HEADERS[1].len()])
        .max()
        .unwrap_or_default();
    let size_width = rows
        .iter()
        .map(|row| row.2.len())
        .chain([HEADERS[2].len()])
        .max()
        .unwrap_or_default();

    let mut out = format!(
        "{}  {}  {}\n",
        format!("{:<type_width$}", HEADERS[0]).bold(),
        format!("{:<name_width$}", HEADERS[1]).bold(),
        format!("{:>size_width$}", HEADERS[2]).bold()
    );
    out.push_str(&format!(
        "{}  {}  {}\n",
        "-".repeat(type_width),
        "-".repeat(name_width),
        "-".repeat(size_width)
    ));

    for (kind, name, size, unit) in &rows {
        let padded_size = format!("{size:>size_width$}");
        out.push_str(&format!(
            "{kind:<type_width$}  {name:<name_width$}  {}\n",
            colorize_for_unit(&padded_size, *unit)
        ));
    }

    out
}

/// Print a collection in human-readable form.
///
/// Results go to stdout as a table followed by the total; failures go to
/// stderr in red.
pub fn print_collection(collection: &Collection) {
    if collection.results.is_empty() {
        println!("{}", "No entries measured.".yellow());
    } else {
        print!("{}", render_table(&collection.results));
        println!(
            "\n{} {}",
            "Total:".bold(),
            scale(collection.total_size()).to_string().bright_white()
        );
    }

    for failure in &collection.failures {
        eprintln!("{} {}", "Error:".red(), failure.error);
    }
}
