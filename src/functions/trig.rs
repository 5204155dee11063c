//! Trigonometric functions. Angles are in radians; use `deg2rad` to convert.

use super::FunctionTable;
use crate::error::FunctionError;

pub fn register(table: &mut FunctionTable) {
    table.register_function("cos", |x| Ok(x.cos()));
    table.register_function("sin", |x| Ok(x.sin()));
    table.register_function("tan", |x| Ok(x.tan()));
    table.register_function("cosec", cosec);
    table.register_function("sec", sec);
    table.register_function("cot", cot);
    table.register_function("acos", acos);
    table.register_function("asin", asin);
    table.register_function("atan", |x| Ok(x.atan()));
}

fn reciprocal(value: f64) -> Result<f64, FunctionError> {
    if value == 0.0 {
        return Err(FunctionError::Domain);
    }
    Ok(1.0 / value)
}

fn cosec(x: f64) -> Result<f64, FunctionError> {
    reciprocal(x.sin())
}

fn sec(x: f64) -> Result<f64, FunctionError> {
    reciprocal(x.cos())
}

fn cot(x: f64) -> Result<f64, FunctionError> {
    reciprocal(x.tan())
}

fn acos(x: f64) -> Result<f64, FunctionError> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(FunctionError::Domain);
    }
    Ok(x.acos())
}

fn asin(x: f64) -> Result<f64, FunctionError> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(FunctionError::Domain);
    }
    Ok(x.asin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reciprocals_reject_zero() {
        assert_eq!(cosec(0.0), Err(FunctionError::Domain));
        assert_eq!(cot(0.0), Err(FunctionError::Domain));
        assert_eq!(sec(0.0), Ok(1.0));
    }

    #[test]
    fn test_inverse_domain() {
        assert_eq!(asin(1.0), Ok(std::f64::consts::FRAC_PI_2));
        assert_eq!(acos(1.0), Ok(0.0));
        assert_eq!(asin(1.5), Err(FunctionError::Domain));
        assert_eq!(acos(-2.0), Err(FunctionError::Domain));
    }

    #[test]
    fn test_registered_closures() {
        let mut table = FunctionTable::empty();
        register(&mut table);
        assert_eq!(table.get("sin").unwrap()(0.0), Ok(0.0));
        assert_eq!(table.get("cos").unwrap()(0.0), Ok(1.0));
        assert_eq!(table.get("atan").unwrap()(0.0), Ok(0.0));
        assert_eq!(table.names().count(), 9);
    }
}
