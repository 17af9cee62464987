//! End-to-end tests against the built binary: exit codes and stream routing

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn write_zip(path: &Path, files: &[(&str, &[u8])]) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, content) in files {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content).unwrap();
        }
    }
    zip.finish().unwrap();
}

fn write_sample(path: &Path) {
    write_zip(
        path,
        &[
            ("assets/a.txt", b"hi"),
            ("assets/sub/", b""),
            ("other/b.txt", b"nope"),
        ],
    );
}

fn zipdump(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_zipdump"))
        .args(args)
        .output()
        .expect("failed to run zipdump")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_extracts_prefix_subtree() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("client.jar");
    let output = temp_dir.path().join("dump/client");
    write_sample(&input);

    let result = zipdump(&["-input", path_arg(&input), "-output", path_arg(&output)]);

    assert_eq!(result.status.code(), Some(0));
    assert_eq!(fs::read_to_string(output.join("assets/a.txt")).unwrap(), "hi");
    assert!(output.join("assets/sub").is_dir());
    assert!(!output.join("other").exists());

    let stdout = String::from_utf8(result.stdout).unwrap();
    assert_eq!(stdout, "Reading directory \"assets/sub/\"\n");
    assert!(result.stderr.is_empty());
}

#[test]
fn test_dir_flag_writes_no_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("client.jar");
    let output = temp_dir.path().join("out");
    write_sample(&input);

    let result = zipdump(&[
        "-input",
        path_arg(&input),
        "-output",
        path_arg(&output),
        "-dir",
    ]);

    assert_eq!(result.status.code(), Some(0));
    assert!(output.join("assets/sub").is_dir());
    assert!(!output.join("assets/a.txt").exists());
}

#[test]
fn test_missing_archive_exits_with_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("missing.jar");
    let output = temp_dir.path().join("out");

    let result = zipdump(&[
        format!("-input={}", path_arg(&input)).as_str(),
        format!("-output={}", path_arg(&output)).as_str(),
    ]);

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8(result.stderr).unwrap();
    assert!(stderr.contains("missing.jar"), "{stderr}");
    assert_eq!(stderr.lines().count(), 1, "{stderr}");
    assert!(stderr.starts_with("error: Failed to open archive: "), "{stderr}");

    // Only the output root itself was created
    assert!(output.is_dir());
    assert_eq!(fs::read_dir(&output).unwrap().count(), 0);
}

#[test]
fn test_uncreatable_output_exits_with_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("client.jar");
    write_sample(&input);
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "file in the way").unwrap();

    let result = zipdump(&[
        "-input",
        path_arg(&input),
        "-output",
        path_arg(&blocker.join("out")),
    ]);

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8(result.stderr).unwrap();
    assert_eq!(stderr.lines().count(), 1, "{stderr}");
    assert!(stderr.starts_with("error: Failed to create output directory"), "{stderr}");
}

#[test]
fn test_corrupt_entry_keeps_exit_code_zero() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("client.jar");
    write_zip(
        &input,
        &[
            ("assets/one.txt", b"first"),
            ("assets/two.txt", b"second"),
            ("assets/three.txt", b"third"),
        ],
    );

    // Break the second local file header; the central directory still lists it
    let mut data = fs::read(&input).unwrap();
    let offset = data
        .windows(4)
        .enumerate()
        .filter(|(_, w)| *w == b"PK\x03\x04")
        .map(|(i, _)| i)
        .nth(1)
        .unwrap();
    data[offset] = b'X';
    fs::write(&input, &data).unwrap();

    let output = temp_dir.path().join("out");
    let result = zipdump(&["-input", path_arg(&input), "-output", path_arg(&output)]);

    assert_eq!(result.status.code(), Some(0));
    assert_eq!(fs::read_to_string(output.join("assets/one.txt")).unwrap(), "first");
    assert_eq!(fs::read_to_string(output.join("assets/three.txt")).unwrap(), "third");

    let stderr = String::from_utf8(result.stderr).unwrap();
    assert_eq!(stderr.lines().count(), 1, "{stderr}");
    assert!(stderr.contains("assets/two.txt"), "{stderr}");
}

#[test]
fn test_verbose_prints_summary() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("client.jar");
    let output = temp_dir.path().join("out");
    write_sample(&input);

    let result = zipdump(&[
        "--input",
        path_arg(&input),
        "--output",
        path_arg(&output),
        "-v",
    ]);

    assert_eq!(result.status.code(), Some(0));
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.contains("Saving file"), "{stdout}");
    assert!(stdout.contains("Extracted 1 files (2B), 1 directories"), "{stdout}");
}

#[test]
fn test_invalid_flag_is_usage_error() {
    let result = zipdump(&["-bogus"]);
    assert_eq!(result.status.code(), Some(2));
}
