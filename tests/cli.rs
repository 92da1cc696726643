//! CLI Exit Code Contract
//!
//! 0 on success, 1 on unreadable input, 2 on validation failure.

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mealorder-cli"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch mealorder-cli")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn cli_order_success_exits_zero() {
    let output = run(&["order", "--payload", r#"{"mealType": "Lunch", "codes": [1, 2, 2, 3]}"#]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_json(&output)["order"], "Salad, Chips(2), Soda");
}

#[test]
fn cli_validation_failure_exits_two() {
    let output = run(&["order", "--payload", r#"{"mealType": "Breakfast", "codes": [1, 2, 4]}"#]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        stdout_json(&output)["violations"][0],
        "Dessert can only be ordered with Dinner and is required of a Dinner order"
    );

    let output = run(&["validate", "--payload", r#"{"mealType": "Dinner", "codes": [1, 2]}"#]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout_json(&output)["valid"], false);
}

#[test]
fn cli_null_meal_type_is_a_validation_failure() {
    let output = run(&["order", "--payload", r#"{"mealType": null, "codes": [1, 2]}"#]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout_json(&output)["violations"][0], "Meal Type must be specified");
}

#[test]
fn cli_malformed_payload_exits_one() {
    let output = run(&["order", "--payload", "not json"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output)["success"], false);

    let output = run(&["--catalog", "/nonexistent/catalog.json", "menu"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn cli_menu_lists_every_meal() {
    let output = run(&["menu"]);
    assert_eq!(output.status.code(), Some(0));
    let menus = stdout_json(&output);
    assert_eq!(menus.as_array().map(Vec::len), Some(3));
    assert_eq!(menus[2]["dessert"], "Cake");
}
