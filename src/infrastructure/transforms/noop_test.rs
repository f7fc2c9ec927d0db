use super::NoopTransform;
use crate::domain::models::Placement;
use crate::domain::models::TextTransform;

#[test]
fn it_returns_text_unchanged() {
    let res = NoopTransform::default().apply("  <think>as is</think> ", Placement::Reasoning);
    assert_eq!(res, "  <think>as is</think> ");
}

#[test]
fn it_ignores_placement() {
    let transform = NoopTransform::default();
    assert_eq!(transform.apply("hello", Placement::UserInput), "hello");
    assert_eq!(transform.apply("hello", Placement::AiOutput), "hello");
}
