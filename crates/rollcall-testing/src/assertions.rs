//! Assertions over `--format json` output.

use anyhow::{Context, Result};
use serde_json::Value;

/// Assert that a `show` result lists exactly these classes, in order.
pub fn assert_class_names(json: &Value, expected: &[&str]) -> Result<()> {
    let classes = json["content"]["classes"]
        .as_array()
        .context("Expected 'content.classes' array in JSON")?;

    let names: Vec<&str> = classes
        .iter()
        .filter_map(|class| class["name"].as_str())
        .collect();

    if names != expected {
        anyhow::bail!("Expected classes {:?}, got {:?}", expected, names);
    }
    Ok(())
}

/// Find one student row in a `show` result.
pub fn student_row<'a>(json: &'a Value, class: &str, student: &str) -> Result<&'a Value> {
    let classes = json["content"]["classes"]
        .as_array()
        .context("Expected 'content.classes' array in JSON")?;

    let block = classes
        .iter()
        .find(|c| c["name"] == class)
        .with_context(|| format!("Class {} not in output", class))?;

    block["students"]
        .as_array()
        .context("Expected 'students' array")?
        .iter()
        .find(|s| s["name"] == student)
        .with_context(|| format!("Student {} not in class {}", student, class))
}

/// Assert whether a command result reports a change.
pub fn assert_changed(json: &Value, expected: bool) -> Result<()> {
    let changed = json["content"]["changed"]
        .as_bool()
        .context("Expected 'content.changed' boolean in JSON")?;

    if changed != expected {
        anyhow::bail!(
            "Expected changed={} but got {} (reason: {})",
            expected,
            changed,
            json["content"]["reason"]
        );
    }
    Ok(())
}
