use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Created .langkeyrc.json"));

    let content = test.read_file(".langkeyrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["cacheTtlMs"], 30000);
    assert_eq!(parsed["fallbackFileName"], "en.json");
    assert_eq!(parsed["translationPaths"][0], "src/locales/en.json");
    assert!(content.contains("  "), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".langkeyrc.json", "{}")?;

    let output = test.run(&["init"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: .langkeyrc.json already exists"));
    assert_eq!(test.read_file(".langkeyrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.run(&["init"])?;
    test.write_file("src/locales/en.json", r#"{"greeting": "Hello"}"#)?;

    let output = test.run(&["keys"])?;
    assert!(
        output.status.success(),
        "keys should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
