use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use counting_avl::WordCount;
use log::info;

#[derive(Parser)]
#[command(name = "wordcount")]
#[command(about = "Counts how often each word occurs in a text file")]
struct Args {
    /// Text file to read words from
    file: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut word_count = WordCount::new();
    match word_count.read_file(&args.file) {
        Ok(num_words) => info!(
            "read {} words, {} distinct, from {}",
            num_words,
            word_count.words().len(),
            args.file.display()
        ),
        Err(err) => {
            eprintln!("failed to read {}: {}", args.file.display(), err);
            return ExitCode::FAILURE;
        }
    }

    let mut out = BufWriter::new(io::stdout().lock());
    if let Err(err) = word_count.display(&mut out).and_then(|()| out.flush()) {
        eprintln!("failed to write word counts: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
