use decicalc::Calculator;

fn main() {
    pretty_env_logger::init();

    let expressions: Vec<String> = (1..=10)
        .map(|i| format!("({i} * deg2rad) + 1 / {i}"))
        .collect();

    let calculator = Calculator::new();
    let results = calculator.evaluate_batch(&expressions);
    for (i, (expression, result)) in expressions.iter().zip(results).enumerate() {
        match result {
            Ok(value) => println!("Result {}: {} = {}", i, expression, value),
            Err(err) => println!("Result {}: {} failed: {}", i, expression, err),
        }
    }
}
