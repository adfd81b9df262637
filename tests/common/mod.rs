use lox::mach::{Outcome, Runtime, Val};

pub fn eval(source: &str) -> Outcome {
    Runtime::default().interpret(source)
}

pub fn eval_val(source: &str) -> Val {
    match eval(source) {
        Outcome::Ok(val) => val,
        outcome => panic!("expected a value from {:?}: {:?}", source, outcome),
    }
}

pub fn eval_number(source: &str) -> f64 {
    match eval_val(source) {
        Val::Number(n) => n,
        val => panic!("expected a number from {:?}: {:?}", source, val),
    }
}

pub fn eval_bool(source: &str) -> bool {
    match eval_val(source) {
        Val::Bool(b) => b,
        val => panic!("expected a boolean from {:?}: {:?}", source, val),
    }
}
