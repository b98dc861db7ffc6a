use batchrename_core::{build_plan, Error, RenameConfig};
use std::fs;
use tempfile::TempDir;

fn touch(dir: &TempDir, name: &str) {
    fs::write(dir.path().join(name), name).unwrap();
}

#[test]
fn test_plan_is_sorted_and_deterministic() {
    let temp = TempDir::new().unwrap();
    touch(&temp, "c.txt");
    touch(&temp, "a.txt");
    touch(&temp, "b.txt");

    let config = RenameConfig::new(temp.path());
    let plan = build_plan(&config).unwrap();

    let names: Vec<_> = plan
        .records
        .iter()
        .map(|r| r.original_name.as_str())
        .collect();
    assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);

    // Idempotent against an unchanged directory
    let again = build_plan(&config).unwrap();
    assert_eq!(again.records.len(), plan.records.len());
    for (a, b) in plan.records.iter().zip(again.records.iter()) {
        assert_eq!(a.original_name, b.original_name);
        assert_eq!(a.new_name, b.new_name);
        assert_eq!(a.original_path, b.original_path);
    }
}

#[test]
fn test_plan_skips_subdirectories() {
    let temp = TempDir::new().unwrap();
    touch(&temp, "a.txt");
    fs::create_dir(temp.path().join("nested")).unwrap();
    fs::write(temp.path().join("nested").join("b.txt"), "b").unwrap();

    let config = RenameConfig::new(temp.path());
    let plan = build_plan(&config).unwrap();

    assert_eq!(plan.records.len(), 1);
    assert_eq!(plan.records[0].original_name, "a.txt");
}

#[test]
fn test_numbering_sequence() {
    let temp = TempDir::new().unwrap();
    touch(&temp, "a.txt");
    touch(&temp, "b.txt");
    touch(&temp, "c.txt");

    let mut config = RenameConfig::new(temp.path());
    config.numbering = true;
    config.numbering_start = 5;
    config.numbering_padding = 3;

    let plan = build_plan(&config).unwrap();
    let names: Vec<_> = plan.records.iter().map(|r| r.new_name.as_str()).collect();
    assert_eq!(names, ["a005.txt", "b006.txt", "c007.txt"]);
}

#[test]
fn test_regex_substitution_on_stem_only() {
    let temp = TempDir::new().unwrap();
    touch(&temp, "IMG_001.jpg");

    let mut config = RenameConfig::new(temp.path());
    config.regex_pattern = Some("^IMG_".to_string());
    config.regex_replacement = Some("Photo_".to_string());

    let plan = build_plan(&config).unwrap();
    assert_eq!(plan.records[0].new_name, "Photo_001.jpg");
}

#[test]
fn test_regex_emptying_stem_fails() {
    let temp = TempDir::new().unwrap();
    touch(&temp, "x.txt");

    let mut config = RenameConfig::new(temp.path());
    config.regex_pattern = Some("^x$".to_string());
    config.regex_replacement = Some(String::new());

    let err = build_plan(&config).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_extension_filter() {
    let temp = TempDir::new().unwrap();
    touch(&temp, "a.txt");
    touch(&temp, "b.jpg");
    touch(&temp, "c.TXT");

    let mut config = RenameConfig::new(temp.path());
    config.extensions = Some(vec![".txt".to_string()]);

    let plan = build_plan(&config).unwrap();
    let names: Vec<_> = plan
        .records
        .iter()
        .map(|r| r.original_name.as_str())
        .collect();
    // Case-insensitive match keeps c.TXT, extension preserved unmodified
    assert_eq!(names, ["a.txt", "c.TXT"]);
}

#[test]
fn test_no_matching_files_is_not_found() {
    let temp = TempDir::new().unwrap();
    touch(&temp, "a.jpg");

    let mut config = RenameConfig::new(temp.path());
    config.extensions = Some(vec![".txt".to_string()]);

    let err = build_plan(&config).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn test_empty_directory_is_not_found() {
    let temp = TempDir::new().unwrap();
    let config = RenameConfig::new(temp.path());
    let err = build_plan(&config).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn test_paths_are_absolute_and_rooted_in_directory() {
    let temp = TempDir::new().unwrap();
    touch(&temp, "a.txt");

    let mut config = RenameConfig::new(temp.path());
    config.prefix = "pre_".to_string();

    let plan = build_plan(&config).unwrap();
    let record = &plan.records[0];
    assert!(record.original_path.is_absolute());
    assert!(record.new_path.is_absolute());
    assert_eq!(record.new_path.parent().unwrap(), plan.directory);
    assert_eq!(record.new_path.file_name().unwrap(), "pre_a.txt");
}

#[test]
fn test_rules_compose_in_fixed_order() {
    let temp = TempDir::new().unwrap();
    touch(&temp, "IMG_vacation.jpg");

    let mut config = RenameConfig::new(temp.path());
    config.regex_pattern = Some("^IMG_".to_string());
    config.regex_replacement = Some(String::new());
    config.prefix = "trip-".to_string();
    config.suffix = "-final".to_string();
    config.numbering = true;
    config.numbering_start = 1;
    config.numbering_padding = 2;

    let plan = build_plan(&config).unwrap();
    // regex first, then prefix, suffix, numbering
    assert_eq!(plan.records[0].new_name, "trip-vacation-final01.jpg");
}

#[test]
fn test_timestamp_token_has_no_spaces() {
    let temp = TempDir::new().unwrap();
    touch(&temp, "a.txt");

    let mut config = RenameConfig::new(temp.path());
    config.timestamp = true;
    config.timestamp_format = "%Y %m %d".to_string();

    let plan = build_plan(&config).unwrap();
    let new_name = &plan.records[0].new_name;
    assert!(!new_name.contains(' '), "spaces must become underscores: {new_name}");
    assert!(new_name.starts_with('a'));
    assert!(new_name.ends_with(".txt"));
}
