//! Integration tests for dirsize
//!
//! These tests create temporary file structures and measure them through the
//! real filesystem, exercising the aggregator, collector and output layers
//! together.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use dirsize::aggregator::Aggregator;
use dirsize::collector::Collector;
use dirsize::entry::{Entry, EntryKind};
use dirsize::error::{CollectError, MeasureError};
use dirsize::filesystem::DiskFileSystem;
use dirsize::output::JsonOutput;
use dirsize::progress::SilentReporter;
use dirsize::utils::{GIB, MIB, ScaleUnit};
use dirsize::{ListingErrorPolicy, ScanOptions, SortDirection, SortProperty, SortRequest};

/// Helper function to create a temporary directory structure for testing
fn create_test_directory() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a file of exactly `len` bytes.
///
/// Large files are created sparse, so they take no real disk space.
fn create_file(path: &Path, len: u64) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    let file = File::create(path).expect("Failed to create file");
    file.set_len(len).expect("Failed to set file length");
    path.to_path_buf()
}

/// Helper function to create a directory
fn create_dir(path: &Path) -> PathBuf {
    fs::create_dir_all(path).expect("Failed to create directory");
    path.to_path_buf()
}

fn collector(listing_errors: ListingErrorPolicy) -> Collector<DiskFileSystem> {
    let options = ScanOptions {
        verbose: false,
        listing_errors,
    };
    Collector::new(Aggregator::new(DiskFileSystem, options))
}

fn sort_by(property: SortProperty, direction: SortDirection) -> SortRequest {
    SortRequest::new(property, direction)
}

#[test]
fn test_directory_size_is_sum_of_nested_files() {
    let temp_dir = create_test_directory();
    let base = temp_dir.path();

    let project = create_dir(&base.join("project"));
    create_file(&project.join("a.bin"), 1000);
    create_file(&project.join("src").join("b.bin"), 2000);
    create_file(&project.join("src").join("deep").join("c.bin"), 3000);

    let collection = collector(ListingErrorPolicy::Warn)
        .collect(
            &[Entry::from(project)],
            &SortRequest::default(),
            &mut SilentReporter,
        )
        .unwrap();

    assert_eq!(collection.results.len(), 1);
    let result = &collection.results[0];
    assert_eq!(result.kind(), EntryKind::Directory);
    assert_eq!(result.name(), "project");
    assert_eq!(result.byte_size(), 6000);
    assert_eq!(result.scaled().to_string(), "5.86 KB");
    assert!(collection.warnings.is_empty());
}

#[test]
fn test_empty_directory_measures_zero() {
    let temp_dir = create_test_directory();
    let empty = create_dir(&temp_dir.path().join("empty"));

    let collection = collector(ListingErrorPolicy::Warn)
        .collect(
            &[Entry::from(empty)],
            &SortRequest::default(),
            &mut SilentReporter,
        )
        .unwrap();

    let result = &collection.results[0];
    assert_eq!(result.kind(), EntryKind::Directory);
    assert_eq!(result.byte_size(), 0);
    assert_eq!(result.scaled().to_string(), "0.00 KB");
}

#[test]
fn test_one_mebibyte_directory_is_reported_in_kilobytes() {
    let temp_dir = create_test_directory();
    let dir = create_dir(&temp_dir.path().join("data"));
    create_file(&dir.join("blob"), MIB);
    create_dir(&dir.join("empty_subdir"));

    let collection = collector(ListingErrorPolicy::Warn)
        .collect(
            &[Entry::from(dir)],
            &SortRequest::default(),
            &mut SilentReporter,
        )
        .unwrap();

    let scaled = collection.results[0].scaled();
    assert_eq!(collection.results[0].byte_size(), MIB);
    assert_eq!(scaled.unit(), ScaleUnit::Kb);
    assert_eq!(scaled.to_string(), "1024.00 KB");
}

#[test]
fn test_files_sorted_by_size_descending() {
    let temp_dir = create_test_directory();
    let base = temp_dir.path();

    let small = create_file(&base.join("small.txt"), 500);
    let medium = create_file(&base.join("medium.bin"), 2 * MIB + 1);
    let large = create_file(&base.join("large.img"), 3 * GIB + 1);

    let entries = vec![Entry::from(small), Entry::from(large), Entry::from(medium)];
    let collection = collector(ListingErrorPolicy::Warn)
        .collect(
            &entries,
            &sort_by(SortProperty::Size, SortDirection::Descending),
            &mut SilentReporter,
        )
        .unwrap();

    let sizes: Vec<String> = collection
        .results
        .iter()
        .map(|r| r.scaled().to_string())
        .collect();
    assert_eq!(sizes, vec!["3.00 GB", "2.00 MB", "0.49 KB"]);

    let names: Vec<&str> = collection.results.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["large.img", "medium.bin", "small.txt"]);
}

#[test]
fn test_sort_by_name_ignores_case() {
    let temp_dir = create_test_directory();
    let base = temp_dir.path();

    let entries: Vec<Entry> = ["banana", "Apple", "cherry"]
        .iter()
        .map(|name| Entry::from(create_file(&base.join(name), 10)))
        .collect();

    let collection = collector(ListingErrorPolicy::Warn)
        .collect(
            &entries,
            &sort_by(SortProperty::Name, SortDirection::Ascending),
            &mut SilentReporter,
        )
        .unwrap();

    let names: Vec<&str> = collection.results.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["Apple", "banana", "cherry"]);
}

#[test]
fn test_missing_entry_is_recorded_and_others_measured() {
    let temp_dir = create_test_directory();
    let base = temp_dir.path();

    let present = create_file(&base.join("present.txt"), 42);
    let missing = base.join("missing.txt");

    let entries = vec![Entry::from(missing.clone()), Entry::from(present)];
    let collection = collector(ListingErrorPolicy::Warn)
        .collect(&entries, &SortRequest::default(), &mut SilentReporter)
        .unwrap();

    assert_eq!(collection.results.len(), 1);
    assert_eq!(collection.results[0].name(), "present.txt");

    assert!(collection.has_failures());
    assert_eq!(collection.failures.len(), 1);
    assert_eq!(collection.failures[0].path, missing);
    assert!(matches!(
        collection.failures[0].error,
        MeasureError::NotFound { .. }
    ));
}

#[test]
fn test_nested_entries_measure_like_flat_entries() {
    let temp_dir = create_test_directory();
    let base = temp_dir.path();

    let a = create_file(&base.join("a"), 300);
    let b = create_file(&base.join("b"), 100);
    let c = create_dir(&base.join("c"));
    create_file(&c.join("inner"), 200);

    let flat = vec![
        Entry::from(a.clone()),
        Entry::from(b.clone()),
        Entry::from(c.clone()),
    ];
    let nested = vec![
        Entry::from(vec![Entry::from(a)]),
        Entry::from(vec![Entry::from(b), Entry::from(vec![Entry::from(c)])]),
    ];

    let request = sort_by(SortProperty::Size, SortDirection::Ascending);
    let collector = collector(ListingErrorPolicy::Warn);
    let from_flat = collector
        .collect(&flat, &request, &mut SilentReporter)
        .unwrap();
    let from_nested = collector
        .collect(&nested, &request, &mut SilentReporter)
        .unwrap();

    assert_eq!(from_flat.results, from_nested.results);
    let names: Vec<&str> = from_nested.results.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["b", "c", "a"]);
}

#[test]
fn test_both_directions_rejected_before_measuring() {
    let temp_dir = create_test_directory();
    let file = create_file(&temp_dir.path().join("file"), 1);

    let request = SortRequest {
        property: SortProperty::Size,
        ascending: true,
        descending: true,
    };
    let result = collector(ListingErrorPolicy::Warn).collect(
        &[Entry::from(file)],
        &request,
        &mut SilentReporter,
    );

    assert!(matches!(result, Err(CollectError::InvalidArgument(_))));
}

#[test]
fn test_empty_input_produces_empty_collection() {
    let entries: Vec<Entry> = Vec::new();
    let collection = collector(ListingErrorPolicy::Warn)
        .collect(&entries, &SortRequest::default(), &mut SilentReporter)
        .unwrap();

    assert!(collection.is_empty());
    assert_eq!(collection.total_size(), 0);
}

#[test]
fn test_json_output_for_real_directory() {
    let temp_dir = create_test_directory();
    let base = temp_dir.path();

    let dir = create_dir(&base.join("logs"));
    create_file(&dir.join("today.log"), 2048);
    let missing = base.join("gone");

    let entries = vec![Entry::from(dir), Entry::from(missing)];
    let collection = collector(ListingErrorPolicy::Warn)
        .collect(&entries, &SortRequest::default(), &mut SilentReporter)
        .unwrap();

    let json = serde_json::to_value(JsonOutput::from_collection(&collection)).unwrap();

    assert_eq!(json["results"][0]["type"], "directory");
    assert_eq!(json["results"][0]["name"], "logs");
    assert_eq!(json["results"][0]["byte_size"], 2048);
    assert_eq!(json["results"][0]["size_formatted"], "2.00 KB");
    assert_eq!(json["failures"][0]["kind"], "not_found");
    assert_eq!(json["summary"]["measured"], 1);
    assert_eq!(json["summary"]["failed"], 1);
}

#[cfg(unix)]
mod unreadable {
    use std::os::unix::fs::PermissionsExt;

    use super::*;

    /// Make `dir` unreadable; returns `false` if permissions are not
    /// enforced (e.g. when running as root).
    fn lock(dir: &Path) -> bool {
        fs::set_permissions(dir, fs::Permissions::from_mode(0o000))
            .expect("Failed to change permissions");
        let enforced = fs::read_dir(dir).is_err();
        if !enforced {
            eprintln!("skipping: directory permissions are not enforced for this user");
        }
        enforced
    }

    fn unlock(dir: &Path) {
        fs::set_permissions(dir, fs::Permissions::from_mode(0o755))
            .expect("Failed to restore permissions");
    }

    #[test]
    fn test_unreadable_subdirectory_counts_zero_with_warning() {
        let temp_dir = create_test_directory();
        let root = create_dir(&temp_dir.path().join("root"));
        create_file(&root.join("visible"), 100);
        let private = create_dir(&root.join("private"));
        create_file(&private.join("hidden"), 5000);

        if !lock(&private) {
            unlock(&private);
            return;
        }

        let collection = collector(ListingErrorPolicy::Warn).collect(
            &[Entry::from(root)],
            &SortRequest::default(),
            &mut SilentReporter,
        );
        unlock(&private);
        let collection = collection.unwrap();

        assert_eq!(collection.results.len(), 1);
        assert_eq!(collection.results[0].byte_size(), 100);
        assert_eq!(collection.warnings.len(), 1);
        assert!(!collection.has_failures());
    }

    #[test]
    fn test_unreadable_subdirectory_fails_entry_when_strict() {
        let temp_dir = create_test_directory();
        let root = create_dir(&temp_dir.path().join("root"));
        create_file(&root.join("visible"), 100);
        let private = create_dir(&root.join("private"));

        if !lock(&private) {
            unlock(&private);
            return;
        }

        let collection = collector(ListingErrorPolicy::Fail).collect(
            &[Entry::from(root)],
            &SortRequest::default(),
            &mut SilentReporter,
        );
        unlock(&private);
        let collection = collection.unwrap();

        assert!(collection.results.is_empty());
        assert_eq!(collection.failures.len(), 1);
        assert!(matches!(
            collection.failures[0].error,
            MeasureError::PermissionDenied { .. }
        ));
    }
}
