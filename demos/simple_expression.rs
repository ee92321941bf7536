use log::debug;
use strmath_rs::{evaluate, evaluate_batch};

fn main() {
    pretty_env_logger::init();

    let expressions = [
        "2 + 3 * 4",
        "(2 + 3) * 4",
        "2 ** 3 ** 2",
        "10 // 3",
        "factorial(5)",
        "sqrt(4) ** 2",
        "sin(30) ** 2 + cos(30) ** 2",
        "(50 + log(10 * 49)) // 5",
        "pow(20, 3) + sqrt(25 ** 2)",
        "(2 + 3",
        "2 / 0",
    ];

    // pass expressions on the command line to evaluate them instead
    let from_args: Vec<String> = std::env::args().skip(1).collect();
    if !from_args.is_empty() {
        for (expression, result) in from_args.iter().zip(evaluate_batch(&from_args)) {
            match result {
                Ok(value) => println!("{} = {}", expression, value),
                Err(err) => println!("{} -> error: {}", expression, err),
            }
        }
        return;
    }

    for expression in expressions {
        let result = evaluate(expression);
        debug!("{expression:?} => {result:?}");
        match result {
            Ok(value) => println!("{:<30} = {}", expression, value),
            Err(err) => println!("{:<30} -> error: {}", expression, err),
        }
    }
}
