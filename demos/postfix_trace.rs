use decicalc::{evaluate_postfix, format_lex_errors, format_tokens, Calculator};

fn main() {
    pretty_env_logger::init();

    let calculator = Calculator::new();
    let expression = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "-pi * (2 + 3) ^ 2".to_string());

    let tokens = calculator.lex(&expression);
    println!("tokens:  {}", format_tokens(&tokens));
    let lex_errors = format_lex_errors(&tokens);
    if !lex_errors.is_empty() {
        for message in lex_errors {
            println!("TOKEN ERROR: {message}");
        }
        return;
    }

    let postfix = match calculator.compile_tokens(&tokens) {
        Ok(postfix) => postfix,
        Err(err) => {
            println!("Error: {err}");
            return;
        }
    };
    println!("postfix: {}", format_tokens(&postfix));

    match evaluate_postfix(&postfix, calculator.functions()) {
        Ok(value) => println!("value:   {value}"),
        Err(errors) => {
            for error in errors {
                println!("Error: {error}");
            }
        }
    }
}
