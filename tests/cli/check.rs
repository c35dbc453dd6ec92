use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

#[test]
fn test_check_runs_both_passes() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "locales/en.json",
            r#"{
  "greet": "hi",
  "bye": "later"
}
"#,
        ),
        ("src/app.ts", "$translate(\"greet\");\n$translate(\"farewell\");\n"),
    ])?;

    let out = test.run(&["check"])?;

    assert_eq!(out.code, Some(1), "stderr: {}", out.stderr);
    assert!(out.stdout.contains(r#"The key "farewell" is missing in locales/en.json"#));
    assert!(out.stdout.contains(r#"The key "bye" is not used in any file"#));
    assert!(out.stdout.contains("2 problems (2 errors, 0 warnings)"));
    Ok(())
}

#[test]
fn test_check_clean_project() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en.json", r#"{ "greet": "hi" }"#),
        ("locales/fr.json", r#"{ "greet": "salut" }"#),
        ("src/app.tsx", "export const A = () => <p>{$translate(\"greet\")}</p>;\n"),
    ])?;

    let out = test.run(&["check"])?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(
        out.stdout
            .contains("Checked 1 source file, 2 locale files - no issues found")
    );
    Ok(())
}

#[test]
fn test_check_ignores_keys_from_earlier_run() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en.json", r#"{ "greet": "hi", "bye": "later" }"#),
        ("src/app.ts", "$translate(\"greet\");\n"),
    ])?;

    // An earlier pass saw "bye"; check starts its own pass.
    test.write_file("src/old.ts", "$translate(\"bye\");\n")?;
    test.run(&["missing"])?;
    std::fs::remove_file(test.root().join("src/old.ts"))?;

    let out = test.run(&["check"])?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains(r#"The key "bye" is not used in any file"#));
    Ok(())
}

#[test]
fn test_check_without_calls_reports_every_key() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en.json", r#"{ "a": "x", "b": { "c": "y" } }"#),
        ("src/app.ts", "export const x = 1;\n"),
    ])?;

    let out = test.run(&["check"])?;

    assert_eq!(out.code, Some(1), "stderr: {}", out.stderr);
    assert!(out.stdout.contains(r#"The key "a" is not used"#));
    assert!(out.stdout.contains(r#"The key "b.c" is not used"#));
    Ok(())
}

#[test]
fn test_verbose_notes() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en.json", r#"{ "greet": "hi" }"#),
        ("src/app.ts", "$translate(\"greet\");\n$translate(key);\n"),
    ])?;

    let out = test.run(&["check", "-v"])?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stderr.contains("note: Using config"));
    assert!(out.stderr.contains("note: Loaded 1 locale file"));
    assert!(out.stderr.contains("Skipped 1 call(s) with a non-literal key"));
    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let out = test.run(&["--help"])?;

    assert_eq!(out.code, Some(0));
    for command in ["missing", "unused", "check", "init"] {
        assert!(out.stdout.contains(command));
    }
    Ok(())
}
