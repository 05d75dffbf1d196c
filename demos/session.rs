use curry::{parse, CurryError, Environment, Node, DEFAULT_MAX_DEPTH};

fn main() {
    let programs = vec![
        "let inc = func x' x + 1",
        "let x = 41",
        "inc(x)",
        "x",
    ].into_iter()
        .map(|line| parse(line).map(|node| (line, node)))
        .collect::<Result<Vec<(&str, Node)>, CurryError>>()
        .unwrap();

    let mut environment = Environment::new();
    for (source, node) in &programs {
        match node.evaluate(&mut environment, DEFAULT_MAX_DEPTH) {
            Ok(value) => println!("{}: {}", source, value),
            Err(err) => println!("{}: {}", source, err)
        }
    }
}
