use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builds `<tmp>/bin/image-extractor` so the program resolves
/// `<tmp>/input` and `<tmp>/output`.
fn project_with_binary() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let bin_dir = temp_dir.path().join("bin");
    fs::create_dir_all(&bin_dir).unwrap();

    let program = bin_dir.join(format!("image-extractor{}", std::env::consts::EXE_SUFFIX));
    fs::copy(cargo_bin("image-extractor"), &program).unwrap();

    (temp_dir, program)
}

fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn output_names(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(root.join("output"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn extracts_images_with_folder_prefixes() {
    let (project, program) = project_with_binary();
    let root = project.path();
    write_file(&root.join("input/catA/x.png"), "a");
    write_file(&root.join("input/catB/x.png"), "b");
    write_file(&root.join("input/catB/readme.txt"), "not an image");

    Command::new(&program)
        .arg("--no-progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing folder: catA"))
        .stdout(predicate::str::contains("x.png → catB_x.png"))
        .stdout(predicate::str::contains("Total images extracted: 2"));

    assert_eq!(output_names(root), vec!["catA_x.png", "catB_x.png"]);
}

#[test]
fn missing_input_exits_with_failure() {
    let (project, program) = project_with_binary();

    Command::new(&program)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Input directory not found"))
        .stdout(predicate::str::contains("Process failed!"));

    assert!(!project.path().join("input").exists());
}

#[test]
fn empty_input_succeeds_with_zero_total() {
    let (project, program) = project_with_binary();
    fs::create_dir_all(project.path().join("input/nothing_here")).unwrap();

    Command::new(&program)
        .assert()
        .success()
        .stdout(predicate::str::contains("No images found in nothing_here"))
        .stdout(predicate::str::contains("Total images extracted: 0"))
        .stdout(predicate::str::contains("No images were found in any subdirectories."));
}

#[test]
fn uppercase_extensions_are_extracted() {
    let (project, program) = project_with_binary();
    let root = project.path();
    write_file(&root.join("input/holiday/PHOTO.JPG"), "jpeg");

    Command::new(&program).arg("-q").assert().success();

    assert_eq!(output_names(root), vec!["holiday_PHOTO.JPG"]);
}

#[test]
fn json_output_ends_with_report() {
    let (project, program) = project_with_binary();
    write_file(&project.path().join("input/catA/x.webp"), "webp");

    Command::new(&program)
        .args(["--output-format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\":\"file_copied\""))
        .stdout(predicate::str::contains("\"total_extracted\": 1"));
}

#[test]
fn positional_arguments_are_rejected() {
    let (_project, program) = project_with_binary();

    Command::new(&program).arg("somewhere").assert().failure();
}

#[test]
fn generate_config_writes_into_project_root() {
    let (project, program) = project_with_binary();

    Command::new(&program)
        .arg("--generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated sample configuration file"));

    let content = fs::read_to_string(project.path().join("image-extractor.toml")).unwrap();
    assert!(content.contains("[display]"));
}

#[test]
fn invalid_config_mode_fails() {
    let (project, program) = project_with_binary();
    fs::create_dir_all(project.path().join("input")).unwrap();
    fs::write(
        project.path().join("image-extractor.toml"),
        "[display]\nmode = \"xml\"\n",
    )
    .unwrap();

    Command::new(&program)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Unknown output mode"));
}

#[cfg(unix)]
#[test]
fn failed_copy_is_logged_on_stdout_and_run_succeeds() {
    let (project, program) = project_with_binary();
    let root = project.path();
    write_file(&root.join("input/catA/good.png"), "png");
    std::os::unix::fs::symlink(root.join("nowhere.png"), root.join("input/catA/dead.png"))
        .unwrap();

    Command::new(&program)
        .arg("--no-progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to copy dead.png"))
        .stdout(predicate::str::contains("Extracted 1 images from catA"))
        .stdout(predicate::str::contains("Failed copies: 1"))
        .stdout(predicate::str::contains("Warnings:").not());

    assert_eq!(output_names(root), vec!["catA_good.png"]);
}
