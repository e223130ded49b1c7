use std::path::Path;
use std::process::{Command, Output};

fn ox_find(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ox-find"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("spawn ox-find")
}

fn sample(dir: &Path, text: &str) -> std::path::PathBuf {
    let path = dir.join("sample.txt");
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn prints_substituted_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample(dir.path(), "aXbXc\nX\n");
    let out = ox_find(dir.path(), &[path.to_str().unwrap(), "--expr", "%s/X/YY/g"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "aYYbYYc\nYY\n");
    assert_eq!(String::from_utf8_lossy(&out.stderr).trim(), "3 substitutions");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "aXbXc\nX\n");
}

#[test]
fn in_place_rewrites_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample(dir.path(), "one\r\ntwo one\r\n");
    let out = ox_find(
        dir.path(),
        &[path.to_str().unwrap(), "--expr", "%s/one/1/g", "--in-place"],
    );
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "1\r\ntwo 1\r\n");
}

#[test]
fn current_line_scope_follows_line_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample(dir.path(), "x\nx\nx\n");
    let out = ox_find(
        dir.path(),
        &[path.to_str().unwrap(), "--line", "2", "--expr", "s/x/y/"],
    );
    assert_eq!(String::from_utf8_lossy(&out.stdout), "x\ny\nx\n");
}

#[test]
fn errors_exit_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample(dir.path(), "abc\n");
    let out = ox_find(dir.path(), &[path.to_str().unwrap(), "--expr", "5,%s/a/b/"]);
    assert!(!out.status.success());
    assert!(
        String::from_utf8_lossy(&out.stderr)
            .contains("cannot provide both '%' and an ending line number")
    );
    assert_eq!(String::from_utf8_lossy(&out.stdout), "abc\n");
}

#[test]
fn not_found_is_informational() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample(dir.path(), "abc\n");
    let out = ox_find(dir.path(), &[path.to_str().unwrap(), "--find", "zzz"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stderr).trim(), "pattern not found");
}

#[test]
fn missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = ox_find(dir.path(), &["absent.txt"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("cannot open absent.txt"));
}

#[test]
fn highlight_plain_uses_reverse_video() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample(dir.path(), "a fox\n");
    std::fs::write(dir.path().join("ox-find.toml"), "[render]\nstyled = false\n").unwrap();
    let out = ox_find(
        dir.path(),
        &[path.to_str().unwrap(), "--find", "fox", "--highlight"],
    );
    assert!(out.status.success());
    let s = String::from_utf8_lossy(&out.stdout);
    assert!(s.starts_with("a \x1b[7m"), "got {s:?}");
}
