use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

const EN: &str = r#"{
  "greet": "hi",
  "bye": "later",
  "group": {
    "_context": "Shown on the settings page",
    "a": "x",
    "b": "y"
  }
}
"#;

#[test]
fn test_missing_then_unused() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en.json", EN),
        ("src/app.ts", "$translate(\"greet\");\n$translate(\"group.a\");\n"),
    ])?;

    let missing = test.run(&["missing"])?;
    assert_eq!(missing.code, Some(0), "stderr: {}", missing.stderr);

    let out = test.run(&["unused", "locales/en.json"])?;

    assert_eq!(out.code, Some(1), "stderr: {}", out.stderr);
    assert!(
        out.stdout
            .contains(r#"error: The key "bye" is not used in any file  unused-key"#)
    );
    assert!(out.stdout.contains("--> locales/en.json:3:1"));
    assert!(out.stdout.contains(r#"The key "group.b" is not used"#));
    assert!(!out.stdout.contains("_context"));
    assert!(!out.stdout.contains(r#""greet""#));
    assert!(out.stdout.contains("2 problems (2 errors, 0 warnings)"));
    Ok(())
}

#[test]
fn test_unused_without_missing_pass_fails() -> Result<()> {
    let test = CliTest::with_files(&[("locales/en.json", EN)])?;

    let out = test.run(&["unused"])?;

    assert_eq!(out.code, Some(2));
    assert!(out.stdout.is_empty());
    assert!(out.stderr.starts_with("Error: "));
    assert!(out.stderr.contains("needs a fresh usage ledger"));
    Ok(())
}

#[test]
fn test_stale_ledger_fails() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en.json", EN),
        ("tmp/all-translate-calls.txt", "1000\ngreet\nbye\n"),
    ])?;

    let out = test.run(&["unused"])?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("missing-key check"));
    Ok(())
}

#[test]
fn test_unknown_target_yields_nothing() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en.json", EN),
        ("other/en.json", EN),
        ("src/app.ts", "$translate(\"greet\");\n"),
    ])?;

    test.run(&["missing"])?;
    let out = test.run(&["unused", "other/en.json"])?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    Ok(())
}

#[test]
fn test_custom_ledger_path() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en.json", r#"{ "greet": "hi" }"#),
        ("src/app.ts", "$translate(\"greet\");\n"),
    ])?;

    test.run(&["missing", "--ledger", ".cache/calls.txt"])?;
    assert!(test.root().join(".cache/calls.txt").exists());

    let out = test.run(&["unused", "--ledger", ".cache/calls.txt"])?;
    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("Checked 1 locale file - no issues found"));
    Ok(())
}
