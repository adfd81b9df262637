mod common;
use common::*;
use lox::lang::ErrorCode;
use lox::mach::{Outcome, Runtime, Val};

#[test]
fn test_arithmetic() {
    assert_eq!(eval_number("1 + 2 * 3"), 7.0);
    assert_eq!(eval_number("(1 + 2) * 3"), 9.0);
    assert_eq!(eval_number("1.5 / 2 * 3"), 2.25);
    assert_eq!(eval_number("10 / 4"), 2.5);
    assert_eq!(eval_number("-(-3)"), 3.0);
    let n = eval_number("((50 + (-1.2)) - 1.2) / 2 * 6");
    assert!((n - 139.8).abs() < 1e-9);
}

#[test]
fn test_comparison() {
    assert_eq!(eval_bool("1 < 2"), true);
    assert_eq!(eval_bool("2 <= 2"), true);
    assert_eq!(eval_bool("3 > 4"), false);
    assert_eq!(eval_bool("4 >= 5"), false);
    assert_eq!(eval_bool("1 < 2 == true"), true);
}

#[test]
fn test_equality_is_structural() {
    assert_eq!(eval_bool("1 == 1"), true);
    assert_eq!(eval_bool("1 != 2"), true);
    assert_eq!(eval_bool("\"a\" == \"a\""), true);
    assert_eq!(eval_bool("\"a\" == \"b\""), false);
    // Distinct tags never compare equal across type.
    assert_eq!(eval_bool("nil == false"), false);
    assert_eq!(eval_bool("0 == false"), false);
    assert_eq!(eval_bool("\"1\" == 1"), false);
}

#[test]
fn test_falsey_rule() {
    assert_eq!(eval_bool("!nil"), true);
    assert_eq!(eval_bool("!false"), true);
    assert_eq!(eval_bool("!true"), false);
    assert_eq!(eval_bool("!0"), false);
    assert_eq!(eval_bool("!\"\""), false);
    assert_eq!(eval_bool("!!nil"), false);
}

#[test]
fn test_literals() {
    assert_eq!(eval_val("nil"), Val::Nil);
    assert_eq!(eval_val("true"), Val::Bool(true));
    assert_eq!(eval_val("\"hi\""), Val::string("hi"));
}

#[test]
fn test_string_concatenation() {
    assert_eq!(eval_val("\"ab\" + \"cd\""), Val::string("abcd"));
    assert_eq!(eval_val("\"a\" + \"b\" + \"c\""), Val::string("abc"));
    assert_eq!(eval_val("\"\" + \"\""), Val::string(""));
}

#[test]
fn test_string_number_addition_does_not_coerce() {
    for source in &["\"a\" + 1", "1 + \"a\"", "\"1\" + 1"] {
        match eval(source) {
            Outcome::RuntimeError(error) => assert_eq!(error.code(), ErrorCode::TypeMismatch),
            outcome => panic!("expected a runtime error from {:?}: {:?}", source, outcome),
        }
    }
}

#[test]
fn test_type_errors() {
    for source in &["-nil", "-\"a\"", "1 < \"a\"", "true * 2", "nil / nil", "true - false"] {
        match eval(source) {
            Outcome::RuntimeError(error) => assert_eq!(error.code(), ErrorCode::TypeMismatch),
            outcome => panic!("expected a runtime error from {:?}: {:?}", source, outcome),
        }
    }
    // Equality never type-errors.
    assert_eq!(eval_bool("nil == 1"), false);
}

#[test]
fn test_runtime_error_line() {
    match eval("1 +\ntrue") {
        Outcome::RuntimeError(error) => assert_eq!(error.line_number(), Some(2)),
        outcome => panic!("expected a runtime error: {:?}", outcome),
    }
}

#[test]
fn test_compile_error_runs_nothing() {
    match eval("\"abc") {
        Outcome::CompileError(errors) => assert_eq!(errors.len(), 1),
        outcome => panic!("expected a compile error: {:?}", outcome),
    }
}

#[test]
fn test_runtime_is_reusable() {
    let mut runtime = Runtime::default();
    match runtime.interpret("1 + 2") {
        Outcome::Ok(val) => assert_eq!(val, Val::Number(3.0)),
        outcome => panic!("{:?}", outcome),
    }
    // A runtime error resets the stack; the next cycle is clean.
    match runtime.interpret("1 + nil") {
        Outcome::RuntimeError(_) => {}
        outcome => panic!("{:?}", outcome),
    }
    match runtime.interpret("2 * 2") {
        Outcome::Ok(val) => assert_eq!(val, Val::Number(4.0)),
        outcome => panic!("{:?}", outcome),
    }
}
