use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let out = test.run(&["init"])?;

    assert_eq!(out.code, Some(0));
    assert_eq!(out.stdout, "✓ Created .translatecheckrc.json\n");

    let content = test.read_file(".translatecheckrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["locales"], "src/lib/i18n/locales/*.json");
    assert_eq!(parsed["ledgerPath"], "./tmp/all-translate-calls.txt");
    assert_eq!(parsed["freshnessWindowMs"], 15000);
    assert_eq!(parsed["functions"][0], "$translate");
    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".translatecheckrc.json", "{}")?;

    let out = test.run(&["init"])?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("already exists"));
    assert_eq!(test.read_file(".translatecheckrc.json")?, "{}");
    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.run(&["init"])?;

    test.write_file("src/lib/i18n/locales/en.json", r#"{ "title": "Hi" }"#)?;
    test.write_file(
        "src/routes/page.ts",
        "export const title = $translate(\"title\");\n",
    )?;

    let out = test.run(&["check"])?;
    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    Ok(())
}
