use convention_directory::{
    DirectoryWalker, IgnoreFile, MatchPatternSet, PatternMatcher, IGNORE_FILE_NAME,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn discovered_ignore_file_is_anchored_at_its_directory() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    let service = project.join("services/orders");
    fs::create_dir_all(service.join("build")).unwrap();
    fs::create_dir_all(service.join("src")).unwrap();
    fs::write(project.join(IGNORE_FILE_NAME), "# build output\nbuild/\n/top.yml\n").unwrap();

    let ignore = IgnoreFile::discover(&service).unwrap().unwrap();
    assert_eq!(ignore.root(), project.as_path());
    assert_eq!(ignore.patterns(), &["build/".to_string(), "/top.yml".to_string()]);

    let matcher = PatternMatcher::new(
        &ignore.into_pattern_set(),
        &MatchPatternSet::new(&service, ["*.yml"]),
    )
    .unwrap();

    assert!(matcher.is_ignored(&service.join("build"), true));
    assert!(!matcher.is_resource_file(&service.join("build/out.yml")));
    assert!(matcher.is_resource_file(&service.join("src/fn.yml")));
    assert!(matcher.is_ignored(&project.join("top.yml"), false));
    assert!(!matcher.is_ignored(&service.join("top.yml"), false));
}

#[test]
fn listing_reports_logical_paths() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("src/nested")).unwrap();
    fs::write(temp.path().join("src/b.yml"), "b: 1").unwrap();
    fs::write(temp.path().join("src/a.yml"), "a: 1").unwrap();

    let entries = DirectoryWalker::new(temp.path()).list(Path::new("./src")).unwrap();
    let paths: Vec<String> = entries
        .iter()
        .map(|e| e.path.to_string_lossy().into_owned())
        .collect();
    assert_eq!(paths, vec!["./src/a.yml", "./src/b.yml", "./src/nested"]);
    assert!(entries[2].is_dir);
}
