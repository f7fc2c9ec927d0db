/// A model reply that opens with an inline `<think>` block, as emitted by
/// DeepSeek-R1 style models.
pub fn inline_reasoning_fixture() -> &'static str {
    return r#"<think>
The user wants a way to print numbers in Rust.
A for loop over an inclusive range covers it.
</think>
Here's how to print in Rust.

```rust
fn print_numbers() {
    for i in 0..=10 {
        println!("{i}");
    }
}
```

That's it!"#;
}

/// The same reply as `inline_reasoning_fixture`, cut into the chunks a
/// streaming backend would deliver. The closing tag is split across chunks on
/// purpose.
pub fn streamed_reasoning_fixture() -> Vec<&'static str> {
    return vec![
        "<think>\n",
        "The user wants a way to print numbers in Rust.\n",
        "A for loop over an inclusive range covers it.\n</th",
        "ink>\nHere's how to print in Rust.",
        "\n\nThat's it!",
    ];
}
