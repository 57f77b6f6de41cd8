//! Signal compatibility command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use patchbay_core::{KNOWN_SIGNALS, display_color, is_compatible};

#[derive(Args)]
pub struct CompatArgs {
    /// Output signal type
    #[arg(value_name = "OUTPUT", required_unless_present = "matrix")]
    output: Option<String>,

    /// Input signal type
    #[arg(value_name = "INPUT", required_unless_present = "matrix")]
    input: Option<String>,

    /// Print the full compatibility matrix of known signal types
    #[arg(long, conflicts_with_all = ["output", "input"])]
    matrix: bool,
}

pub fn run(args: CompatArgs) -> anyhow::Result<()> {
    if args.matrix {
        print_matrix();
        return Ok(());
    }

    let (Some(output), Some(input)) = (args.output, args.input) else {
        anyhow::bail!("OUTPUT and INPUT are required without --matrix");
    };

    let verdict = if is_compatible(&output, &input) {
        "compatible"
    } else {
        "incompatible"
    };
    println!(
        "{} ({}) -> {} ({}): {}",
        output,
        display_color(&output),
        input,
        display_color(&input),
        verdict
    );
    Ok(())
}

fn print_matrix() {
    let width = KNOWN_SIGNALS.iter().map(|s| s.len()).max().unwrap_or(0);

    println!("Rows are outputs, columns are inputs.");
    println!();
    print!("{:width$}", "", width = width + 2);
    for input in KNOWN_SIGNALS {
        print!(" {:>width$}", input, width = width);
    }
    println!();

    for output in KNOWN_SIGNALS {
        print!("{:width$}  ", output, width = width);
        for input in KNOWN_SIGNALS {
            let mark = if is_compatible(output, input) { "yes" } else { "-" };
            print!(" {:>width$}", mark, width = width);
        }
        println!();
    }
}
