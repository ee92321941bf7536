use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;
use strmath_rs::{evaluate, Number};

fn env_or(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Random integer expression over `+ - *`, optionally parenthesized.
fn random_expression(rng: &mut StdRng, complexity: usize) -> String {
    if complexity == 0 {
        return rng.random_range(0..100).to_string();
    }
    let left_complexity = rng.random_range(0..complexity);
    let left = random_expression(rng, left_complexity);
    let right_complexity = rng.random_range(0..complexity);
    let right = random_expression(rng, right_complexity);
    let operator = ["+", "-", "*"][rng.random_range(0..3)];
    let expression = format!("{} {} {}", left, operator, right);
    if rng.random_bool(0.4) {
        format!("({})", expression)
    } else {
        expression
    }
}

#[test]
fn test_matches_reference_evaluators() {
    let amount = env_or("TEST_EXPRESSIONS_AMOUNT", 100);
    let complexity = env_or("MAX_EXPRESSION_COMPLEXITY", 3);
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..amount {
        let expression = random_expression(&mut rng, complexity);
        let result = evaluate(&expression);

        match evalexpr::eval(&expression) {
            Ok(evalexpr::Value::Int(expected)) => {
                assert_eq!(result, Ok(Number::Int(expected)), "{expression}");
            }
            other => panic!("evalexpr rejected {expression}: {other:?}"),
        }

        let expected = meval::eval_str(&expression).unwrap();
        match result {
            Ok(value) => assert_eq!(value.as_f64(), expected, "{expression}"),
            Err(e) => panic!("{expression}: {e}"),
        }
    }
}

/// Random expression over `+ - * /` and small powers, with its value and the
/// largest magnitude any sub-expression reaches.
fn random_float_expression(rng: &mut StdRng, complexity: usize, peak: &mut f64) -> (String, f64) {
    let (expression, value) = if complexity == 0 {
        let leaf: i32 = rng.random_range(1..20);
        if rng.random_bool(0.3) {
            let exponent = rng.random_range(0..4);
            (format!("{} ** {}", leaf, exponent), f64::from(leaf).powi(exponent))
        } else {
            (leaf.to_string(), f64::from(leaf))
        }
    } else {
        let left_complexity = rng.random_range(0..complexity);
        let (left, a) = random_float_expression(rng, left_complexity, peak);
        let right_complexity = rng.random_range(0..complexity);
        let (right, b) = random_float_expression(rng, right_complexity, peak);
        match rng.random_range(0..5) {
            0 => (format!("{} + ({})", left, right), a + b),
            1 => (format!("{} - ({})", left, right), a - b),
            2 => (format!("({}) * ({})", left, right), a * b),
            3 if b != 0.0 => (format!("({}) / ({})", left, right), a / b),
            _ => {
                let exponent = rng.random_range(0..3);
                (format!("({}) ** {}", left, exponent), a.powi(exponent))
            }
        }
    };
    *peak = peak.max(value.abs());
    (expression, value)
}

#[test]
fn test_matches_meval_with_division_and_powers() {
    let amount = env_or("TEST_EXPRESSIONS_AMOUNT", 100);
    let complexity = env_or("MAX_EXPRESSION_COMPLEXITY", 3);
    let mut rng = StdRng::seed_from_u64(7);

    let mut compared = 0;
    while compared < amount {
        let mut peak = 0.0_f64;
        let (expression, _) = random_float_expression(&mut rng, complexity, &mut peak);
        // past 2^53 exact integers and floats legitimately drift apart
        if peak > 1e15 {
            continue;
        }
        compared += 1;

        let expected = meval::eval_str(expression.replace("**", "^")).unwrap();
        match evaluate(&expression) {
            Ok(value) => assert!(
                (value.as_f64() - expected).abs() <= 1e-9 * expected.abs().max(1.0),
                "{expression}: {value} != {expected}"
            ),
            Err(e) => panic!("{expression}: {e}"),
        }
    }
}

#[test]
fn test_matches_meval_with_division() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..env_or("TEST_EXPRESSIONS_AMOUNT", 100) {
        let a = rng.random_range(1..1000);
        let b = rng.random_range(1..1000);
        let c = rng.random_range(1..50);
        let expression = format!("({} + {}) / {} * {}", a, b, c, a);

        let expected = meval::eval_str(&expression).unwrap();
        match evaluate(&expression) {
            Ok(Number::Float(value)) => {
                assert!((value - expected).abs() <= expected.abs() * 1e-12, "{expression}")
            }
            other => panic!("{expression}: {other:?}"),
        }
    }
}
