use super::{FunctionTable, RANGE_ERROR};
use crate::ast::Number;
use strmath_macros::strmath_fn;

pub fn register(table: &mut FunctionTable) {
    table.register_function("factorial", factorial);
    table.register_function("gcd", gcd);
    table.register_function("lcm", lcm);
    table.register_function("isqrt", isqrt);
    table.register_function("comb", comb);
    table.register_function("perm", perm);
}

/// Product of `low..=high`, promoted to float once it leaves `i64`.
fn product(low: i64, high: i64) -> Result<Number, String> {
    let mut exact = Some(1i64);
    let mut approx = 1.0_f64;
    for factor in low..=high {
        exact = exact.and_then(|acc| acc.checked_mul(factor));
        approx *= factor as f64;
        if exact.is_none() && approx.is_infinite() {
            return Err(RANGE_ERROR.to_string());
        }
    }
    match exact {
        Some(value) => Ok(Number::Int(value)),
        None if approx.is_finite() => Ok(Number::Float(approx)),
        None => Err(RANGE_ERROR.to_string()),
    }
}

fn non_negative(fn_name: &str, value: i64) -> Result<i64, String> {
    if value < 0 {
        Err(format!("{}() not defined for negative values", fn_name))
    } else {
        Ok(value)
    }
}

#[strmath_fn]
fn factorial(n: i64) -> Result<Number, String> {
    let n = non_negative("factorial", n)?;
    product(2, n)
}

fn gcd_pair(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn unsigned_to_number(value: u64) -> Number {
    i64::try_from(value).map_or(Number::Float(value as f64), Number::Int)
}

#[strmath_fn]
fn gcd(values: Vec<i64>) -> Result<Number, String> {
    let result = values
        .iter()
        .fold(0u64, |acc, v| gcd_pair(acc, v.unsigned_abs()));
    Ok(unsigned_to_number(result))
}

#[strmath_fn]
fn lcm(values: Vec<i64>) -> Result<Number, String> {
    let mut result = 1u64;
    for value in values {
        let value = value.unsigned_abs();
        if value == 0 {
            return Ok(Number::Int(0));
        }
        let step = value / gcd_pair(result, value);
        result = result.checked_mul(step).ok_or_else(|| RANGE_ERROR.to_string())?;
    }
    Ok(unsigned_to_number(result))
}

/// Floor of the exact square root.
#[strmath_fn]
fn isqrt(n: i64) -> Result<Number, String> {
    if n < 0 {
        return Err("isqrt() argument must be nonnegative".to_string());
    }
    let mut root = (n as f64).sqrt() as i64;
    while root.checked_mul(root).map_or(true, |square| square > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|square| square <= n) {
        root += 1;
    }
    Ok(Number::Int(root))
}

#[strmath_fn]
fn comb(n: i64, k: i64) -> Result<Number, String> {
    let n = non_negative("comb", n)?;
    let k = non_negative("comb", k)?;
    if k > n {
        return Ok(Number::Int(0));
    }

    let k = k.min(n - k);
    let mut exact = Some(1i128);
    let mut approx = 1.0_f64;
    for i in 1..=k {
        let factor = (n - k + i) as i128;
        // each intermediate product is itself a binomial coefficient
        exact = exact
            .and_then(|acc| acc.checked_mul(factor))
            .map(|acc| acc / i as i128);
        approx = approx * factor as f64 / i as f64;
        if exact.is_none() && approx.is_infinite() {
            return Err(RANGE_ERROR.to_string());
        }
    }
    match exact.and_then(|value| i64::try_from(value).ok()) {
        Some(value) => Ok(Number::Int(value)),
        None if approx.is_finite() => Ok(Number::Float(approx.round())),
        None => Err(RANGE_ERROR.to_string()),
    }
}

/// Ordered selections of `k` out of `n`; `perm(n)` is `n!`.
#[strmath_fn]
fn perm(n: i64, k: Option<i64>) -> Result<Number, String> {
    let n = non_negative("perm", n)?;
    let k = match k {
        Some(k) => non_negative("perm", k)?,
        None => n,
    };
    if k > n {
        return Ok(Number::Int(0));
    }
    product(n - k + 1, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(&[Number::Int(0)]), Ok(Number::Int(1)));
        assert_eq!(factorial(&[Number::Int(5)]), Ok(Number::Int(120)));
        assert_eq!(factorial(&[Number::Int(20)]), Ok(Number::Int(2432902008176640000)));
        assert!(!factorial(&[Number::Int(25)]).unwrap().is_int());
        assert!(factorial(&[Number::Int(-1)]).is_err());
        assert!(factorial(&[Number::Float(5.0)]).is_err());
        assert!(factorial(&[Number::Int(1000)]).is_err());
    }

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(&[Number::Int(12), Number::Int(18)]), Ok(Number::Int(6)));
        assert_eq!(
            gcd(&[Number::Int(-12), Number::Int(18), Number::Int(8)]),
            Ok(Number::Int(2))
        );
        assert_eq!(gcd(&[]), Ok(Number::Int(0)));
        assert_eq!(lcm(&[Number::Int(4), Number::Int(6)]), Ok(Number::Int(12)));
        assert_eq!(lcm(&[Number::Int(4), Number::Int(0)]), Ok(Number::Int(0)));
        assert_eq!(lcm(&[]), Ok(Number::Int(1)));
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(&[Number::Int(15)]), Ok(Number::Int(3)));
        assert_eq!(isqrt(&[Number::Int(16)]), Ok(Number::Int(4)));
        assert_eq!(isqrt(&[Number::Int(i64::MAX)]), Ok(Number::Int(3037000499)));
        assert!(isqrt(&[Number::Int(-4)]).is_err());
    }

    #[test]
    fn test_comb_perm() {
        assert_eq!(comb(&[Number::Int(5), Number::Int(2)]), Ok(Number::Int(10)));
        assert_eq!(comb(&[Number::Int(2), Number::Int(5)]), Ok(Number::Int(0)));
        assert_eq!(comb(&[Number::Int(60), Number::Int(30)]), Ok(Number::Int(118264581564861424)));
        assert_eq!(perm(&[Number::Int(5), Number::Int(2)]), Ok(Number::Int(20)));
        assert_eq!(perm(&[Number::Int(4)]), Ok(Number::Int(24)));
        assert!(comb(&[Number::Int(-1), Number::Int(0)]).is_err());
    }

    #[test]
    fn test_huge_arguments_overflow_early() {
        let huge = Number::Int(i64::MAX);
        assert_eq!(factorial(&[huge]), Err(RANGE_ERROR.to_string()));
        assert_eq!(perm(&[huge]), Err(RANGE_ERROR.to_string()));
        assert_eq!(
            perm(&[huge, Number::Int(1_000_000_000)]),
            Err(RANGE_ERROR.to_string())
        );
        assert_eq!(
            comb(&[Number::Int(3_000_000_000), Number::Int(1_500_000_000)]),
            Err(RANGE_ERROR.to_string())
        );
    }
}
