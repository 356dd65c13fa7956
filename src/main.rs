use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use unicode_variants::{CodePointRange, compile_with, initialize};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text to compile into a pattern
    #[arg(value_name = "NEEDLE", required = true)]
    needles: Vec<String>,

    /// Code points to scan, as LOW-HIGH (decimal, U+XXXX or 0xXXXX); repeatable
    #[arg(short = 'r', long = "range", value_name = "RANGE")]
    ranges: Vec<CodePointRange>,

    /// Wrap each pattern in ^...$
    #[arg(short = 'a', long)]
    anchored: bool,

    /// Print variant table statistics to stderr
    #[arg(short = 's', long)]
    stats: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let ranges = (!args.ranges.is_empty()).then_some(args.ranges.as_slice());
    let table = initialize(ranges)?;

    if args.stats {
        eprintln!(
            "{} folded forms, {} multi-character",
            table.len(),
            table.multi_char_key_count()
        );
    }

    for needle in &args.needles {
        let pattern = compile_with(table, needle);
        if args.anchored {
            println!("^(?:{pattern})$");
        } else {
            println!("{pattern}");
        }
    }
    Ok(())
}
