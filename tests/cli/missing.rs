use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

const EN: &str = r#"{
  "greet": "hi",
  "nav": {
    "home": "Home"
  }
}
"#;

#[test]
fn test_all_keys_resolve() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en.json", EN),
        (
            "src/app.ts",
            r#"const a = $translate("greet");
const b = $translate("nav.home");
"#,
        ),
    ])?;

    let out = test.run(&["missing"])?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("no issues found"));
    Ok(())
}

#[test]
fn test_reports_missing_key_per_locale() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en.json", EN),
        ("locales/fr.json", r#"{ "greet": "salut", "farewell": "adieu" }"#),
        ("src/app.ts", "const a = $translate(\"farewell\");\n"),
    ])?;

    let out = test.run(&["missing"])?;

    assert_eq!(out.code, Some(1));
    assert!(
        out.stdout
            .contains(r#"error: The key "farewell" is missing in locales/en.json  missing-key"#)
    );
    assert!(!out.stdout.contains("locales/fr.json"));
    assert!(out.stdout.contains("--> src/app.ts:1:11"));
    assert!(out.stdout.contains("1 problem (1 error, 0 warnings)"));
    Ok(())
}

#[test]
fn test_records_every_literal_key() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en.json", EN),
        (
            "src/app.ts",
            r#"$translate("greet");
$translate("nope");
$translate(`nav.home`);
$translate(dynamicKey);
"#,
        ),
    ])?;

    test.run(&["missing"])?;

    let ledger = test.read_file("tmp/all-translate-calls.txt")?;
    let keys: Vec<&str> = ledger.lines().skip(1).collect();
    assert_eq!(keys, vec!["greet", "nope", "nav.home"]);
    assert!(ledger.lines().next().is_some_and(|l| l.parse::<i64>().is_ok()));
    Ok(())
}

#[test]
fn test_only_configured_functions_are_checked() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en.json", EN),
        ("src/app.ts", "t(\"absent\");\nobj.$translate(\"absent\");\n"),
    ])?;

    let out = test.run(&["missing"])?;

    assert_eq!(out.code, Some(0));
    Ok(())
}

#[test]
fn test_explicit_files() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en.json", EN),
        ("src/a.ts", "$translate(\"a.missing\");\n"),
        ("src/b.ts", "$translate(\"b.missing\");\n"),
    ])?;

    let out = test.run(&["missing", "src/b.ts"])?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("b.missing"));
    assert!(!out.stdout.contains("a.missing"));
    Ok(())
}

#[test]
fn test_events_file() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en.json", EN),
        (
            "events.json",
            r#"[
  { "key": "greet", "file": "src/App.svelte", "line": 3, "col": 5 },
  { "key": "farewell", "file": "src/App.svelte", "line": 7, "col": 9 },
  { "key": null, "file": "src/Other.svelte", "line": 1, "col": 1 }
]"#,
        ),
    ])?;

    let out = test.run(&["missing", "--events", "events.json"])?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains(r#"The key "farewell" is missing in locales/en.json"#));
    assert!(out.stdout.contains("--> src/App.svelte:7:9"));

    let ledger = test.read_file("tmp/all-translate-calls.txt")?;
    assert_eq!(ledger.lines().skip(1).collect::<Vec<_>>(), vec!["greet", "farewell"]);
    Ok(())
}

#[test]
fn test_unparsable_source_is_a_warning() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en.json", EN),
        ("src/broken.ts", "const = ;\n"),
        ("src/ok.ts", "$translate(\"greet\");\n"),
    ])?;

    let out = test.run(&["missing"])?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("warning:"));
    assert!(out.stdout.contains("parse-error"));
    assert!(out.stdout.contains("--> src/broken.ts"));
    Ok(())
}

#[test]
fn test_malformed_locale_aborts() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en.json", "{ \"greet\": "),
        ("src/app.ts", "$translate(\"greet\");\n"),
    ])?;

    let out = test.run(&["missing"])?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("Failed to parse locale file"));
    assert!(!test.root().join("tmp/all-translate-calls.txt").exists());
    Ok(())
}
