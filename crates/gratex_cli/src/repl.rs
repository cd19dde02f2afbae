//! Interactive translation loop.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use gratex_latex::{escape_for_embedding, translate};

/// Translation plus the escaped form shown on the `JS:` line.
fn translated(line: &str) -> (String, String) {
    let latex = translate(line);
    let escaped = escape_for_embedding(&latex);
    (latex, escaped)
}

pub fn run() -> Result<()> {
    println!("GraTeX expression translator");
    println!("Type an expression ('y = sinx', 'x>=2', ...); quit to leave.");

    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;

                if matches!(line, "quit" | "exit" | "q") {
                    println!("Goodbye!");
                    break;
                }

                let (latex, escaped) = translated(line);
                println!("LaTeX: {latex}");
                println!("JS:    {escaped}");
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
