use curry::{EvaluationConfig, EvaluationContext};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => EvaluationConfig::load(path)?,
        None => EvaluationConfig::default(),
    };

    let program = vec![
        "let add = func a' func b' a + b",
        "add(3)(4)",
        "let fact = func n' if n == 0 then 1 else n * fact(n - 1)",
        "fact(10)",
        "fact = 5",
        "let x = 1 / 0",
    ];

    let mut context = EvaluationContext::with_config(config);
    for (lineno, line) in program.into_iter().enumerate() {
        match context.evaluate_str(line) {
            Ok(Some(value)) => println!("{}: {}", lineno, value),
            Ok(None) => {}
            Err(err) => println!("{}: {}", lineno, err),
        }
    }

    println!("{}", context.environment());
    Ok(())
}
