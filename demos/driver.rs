use std::error::Error;

use avl_engine::AvlTree;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn join(values: &[&i32]) -> String {
    values
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> Result<(), Box<dyn Error>> {
    TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let mut tree = AvlTree::new();

    println!("Inserting 10, 20, 30, 40, 50, 25");
    for value in [10, 20, 30, 40, 50, 25] {
        tree.insert(value);
    }
    tree.print()?;

    for value in [30, 35] {
        let answer = if tree.contains(&value) { "yes" } else { "no" };
        println!("Contains {}: {}", value, answer);
    }
    println!();

    println!("Removing 30");
    tree.remove(&30);
    tree.print()?;

    println!("In-order traversal: {}", join(&tree.in_order()));
    println!();

    println!("Inserting 15, 5, 35");
    for value in [15, 5, 35] {
        tree.insert(value);
    }
    tree.print()?;

    println!("Pre-order traversal: {}", join(&tree.pre_order()));
    println!("Post-order traversal: {}", join(&tree.post_order()));

    tree.validate()?;
    Ok(())
}
