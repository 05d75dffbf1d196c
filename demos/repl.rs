use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt};
use curry::EvaluationContext;

async fn query(stdout: &mut io::Stdout, lines: &mut io::Lines<io::BufReader<io::Stdin>>) -> io::Result<Option<String>> {
    stdout.write_all("> ".as_bytes()).await?;
    stdout.flush().await?;
    lines.next_line().await
}

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let mut context = EvaluationContext::new();
    let mut lines = io::BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        tokio::select! {
            line = query(&mut stdout, &mut lines) => match line? {
                Some(line) => match context.evaluate_str(&line) {
                    Ok(Some(value)) => println!("{}", value),
                    Ok(None) => {}
                    Err(err) => println!("{}", err),
                },
                None => break,
            },
            // An interrupt abandons the current prompt but not the session
            _ = tokio::signal::ctrl_c() => println!(),
        }
    }

    println!();
    Ok(())
}
