use anyhow::Result;

use super::RegexScripts;
use crate::domain::models::Placement;
use crate::domain::models::RegexScript;
use crate::domain::models::TextTransform;
use crate::infrastructure::transforms::TransformManager;

#[test]
fn it_applies_scripts_at_matching_placement() -> Result<()> {
    let scripts = RegexScripts::new(&[RegexScript::new(
        "Strip citations",
        r"\s*\[\d+\]",
        "",
        vec![Placement::Reasoning],
    )])?;

    let res = scripts.apply("Rust was released in 2015 [1].", Placement::Reasoning);
    assert_eq!(res, "Rust was released in 2015.");

    return Ok(());
}

#[test]
fn it_skips_scripts_at_other_placements() -> Result<()> {
    let scripts = RegexScripts::new(&[RegexScript::new(
        "Strip citations",
        r"\s*\[\d+\]",
        "",
        vec![Placement::Reasoning],
    )])?;

    let res = scripts.apply("Rust was released in 2015 [1].", Placement::AiOutput);
    assert_eq!(res, "Rust was released in 2015 [1].");

    return Ok(());
}

#[test]
fn it_applies_scripts_in_order_with_group_references() -> Result<()> {
    let scripts = RegexScripts::new(&[
        RegexScript::new(
            "Swap",
            r"(\w+)@(\w+)",
            "$2@$1",
            vec![Placement::Reasoning],
        ),
        RegexScript::new("Shout", "b@a", "B@A", vec![Placement::Reasoning]),
    ])?;

    assert_eq!(scripts.apply("a@b", Placement::Reasoning), "B@A");

    return Ok(());
}

#[test]
fn it_leaves_out_disabled_scripts() -> Result<()> {
    let mut disabled = RegexScript::new("Drop", ".*", "", vec![Placement::Reasoning]);
    disabled.disabled = true;

    let scripts = RegexScripts::new(&[disabled])?;
    assert!(scripts.is_empty());
    assert_eq!(scripts.apply("kept", Placement::Reasoning), "kept");

    return Ok(());
}

#[test]
fn it_fails_on_invalid_patterns() {
    let res = RegexScripts::new(&[RegexScript::new(
        "Broken",
        "(unclosed",
        "",
        vec![Placement::Reasoning],
    )]);

    let err = res.err().unwrap();
    assert!(err
        .to_string()
        .starts_with("Regex script 'Broken' has an invalid pattern"));
}

#[test]
fn it_gets_noop_without_enabled_scripts() -> Result<()> {
    let transform = TransformManager::get(&[])?;
    assert_eq!(transform.apply("[1] text", Placement::Reasoning), "[1] text");

    return Ok(());
}

#[test]
fn it_gets_regex_scripts_from_manager() -> Result<()> {
    let transform = TransformManager::get(&[RegexScript::new(
        "Upper",
        "think",
        "THINK",
        vec![Placement::Reasoning],
    )])?;

    assert_eq!(
        transform.apply("let me think", Placement::Reasoning),
        "let me THINK"
    );

    return Ok(());
}
