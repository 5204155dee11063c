use decicalc::evaluate;

fn main() {
    pretty_env_logger::init();

    let expressions = ["2 + 3 * 4", "-5 + 2", "sqrt(16) / 3", "2 ^ 3 ^ 2", "10 / 0"];

    for expression in expressions {
        match evaluate(expression) {
            Ok(value) => println!("{expression} = {value}"),
            Err(diagnostics) => {
                println!("{expression} failed:");
                for message in diagnostics.messages() {
                    println!("  {message}");
                }
            }
        }
    }
}
