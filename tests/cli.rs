mod common;

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn cobertify(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cobertify"))
        .args(args)
        .output()
        .unwrap()
}

fn fixture_arg(name: &str) -> String {
    common::fixture(name).to_str().unwrap().to_string()
}

#[test]
fn no_arguments_is_usage_error() {
    let out = cobertify(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));
}

#[test]
fn single_argument_is_usage_error() {
    let input = fixture_arg("scenario_jacoco.xml");
    let out = cobertify(&[&input]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));
}

#[test]
fn converts_file_to_stdout() {
    let input = fixture_arg("sample_jacoco.xml");
    let out = cobertify(&[&input, "0.8.11"]);
    assert!(out.status.success());

    let xml = String::from_utf8(out.stdout).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\"?>\n<coverage "));
    assert!(xml.contains(r#"version="0.8.11""#));
    assert!(xml.contains("<source>.</source>"));
    assert!(xml.contains(r#"<package name="com.example""#));
}

#[test]
fn source_roots_are_listed_in_order() {
    let input = fixture_arg("scenario_jacoco.xml");
    let out = cobertify(&[&input, "1.0", "src/main/java", "src/gen/java"]);
    assert!(out.status.success());

    let xml = String::from_utf8(out.stdout).unwrap();
    let main = xml.find("<source>src/main/java</source>").unwrap();
    let gen = xml.find("<source>src/gen/java</source>").unwrap();
    assert!(main < gen);
    assert!(!xml.contains("<source>.</source>"));
}

#[test]
fn hyphenated_source_root_is_kept_verbatim() {
    let input = fixture_arg("scenario_jacoco.xml");
    let out = cobertify(&[&input, "1.0", "src", "-generated"]);
    assert!(out.status.success());

    let xml = String::from_utf8(out.stdout).unwrap();
    assert!(xml.contains("<source>src</source>"));
    assert!(xml.contains("<source>-generated</source>"));
}

#[test]
fn empty_version_omits_totals() {
    let input = fixture_arg("sample_jacoco.xml");
    let out = cobertify(&[&input, ""]);
    assert!(out.status.success());

    let xml = String::from_utf8(out.stdout).unwrap();
    let root = xml.lines().nth(1).unwrap();
    assert!(root.starts_with("<coverage "));
    assert!(!root.contains(" version="));
    assert!(!xml.contains("lines-covered"));
}

#[test]
fn reads_standard_input() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_cobertify"))
        .args(["-", "1.0"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(include_bytes!("fixtures/scenario_jacoco.xml"))
        .unwrap();
    let out = child.wait_with_output().unwrap();

    assert!(out.status.success());
    let xml = String::from_utf8(out.stdout).unwrap();
    assert!(xml.contains(r#"condition-coverage="50% (1/2)""#));
}

#[test]
fn malformed_input_fails_without_output() {
    let input = fixture_arg("malformed_jacoco.xml");
    let out = cobertify(&[&input, "1.0"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Error"));
}

#[test]
fn missing_input_file_fails() {
    let out = cobertify(&["/nonexistent/jacoco.xml", "1.0"]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("cobertura.xml");
    let input = fixture_arg("scenario_jacoco.xml");

    let out = cobertify(&["--output", target.to_str().unwrap(), &input, "1.0"]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());

    let xml = std::fs::read_to_string(&target).unwrap();
    assert!(xml.contains(r#"<class name="com.example.Foo" filename="com/example/Foo.java""#));
}

#[test]
fn help_exits_successfully() {
    let out = cobertify(&["--help"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("JaCoCo"));
}
