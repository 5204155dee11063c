use super::FunctionTable;
use crate::error::FunctionError;

pub fn register(table: &mut FunctionTable) {
    table.register_function("sqrt", sqrt);
    table.register_function("log10", log10);
    table.register_function("log2", log2);
}

fn sqrt(x: f64) -> Result<f64, FunctionError> {
    if x < 0.0 {
        return Err(FunctionError::Domain);
    }
    Ok(x.sqrt())
}

fn log10(x: f64) -> Result<f64, FunctionError> {
    if x <= 0.0 {
        return Err(FunctionError::Domain);
    }
    Ok(x.log10())
}

fn log2(x: f64) -> Result<f64, FunctionError> {
    if x <= 0.0 {
        return Err(FunctionError::Domain);
    }
    Ok(x.log2())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt() {
        assert_eq!(sqrt(16.0), Ok(4.0));
        assert_eq!(sqrt(0.0), Ok(0.0));
        assert_eq!(sqrt(-1.0), Err(FunctionError::Domain));
    }

    #[test]
    fn test_logarithms() {
        assert_eq!(log10(1000.0), Ok(3.0));
        assert_eq!(log2(8.0), Ok(3.0));
        assert_eq!(log10(0.0), Err(FunctionError::Domain));
        assert_eq!(log2(-4.0), Err(FunctionError::Domain));
    }
}
