use clap::Parser;
use diff_highlight::{
    CompareResponse, Config, FileContent, Highlights, StyledBuffer, align_with, generate_execution_id, plan_with,
    read_file, refresh, similarity,
};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Highlight the differences between two text files
#[derive(Parser, Debug)]
#[command(name = "diff-highlight")]
#[command(version = "0.1.0")]
#[command(about = "Line-by-line character diff with highlighted additions, deletions and modifications", long_about = None)]
struct Args {
    /// Original text file
    #[arg(short, long)]
    left: PathBuf,

    /// Text file to compare against the original
    #[arg(short, long)]
    right: PathBuf,

    /// Output structured JSON instead of highlighted text
    #[arg(short, long)]
    json: bool,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (defaults to .diff-highlight.toml in the current or home directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Execution id reported in JSON output ("auto" generates one)
    #[arg(long, default_value = "auto")]
    execution_id: String,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    let left = read_file(&args.left)?;
    let right = read_file(&args.right)?;

    let highlights = plan_with(&left.document(), &right.document(), config.align);
    let left_chars: Vec<char> = left.content.chars().collect();
    let right_chars: Vec<char> = right.content.chars().collect();
    let ratio = similarity(&align_with(&left_chars, &right_chars, config.align));

    log::info!(
        "compared {} and {}: {} range(s), similarity {:.4}",
        left.path,
        right.path,
        highlights.len(),
        ratio
    );

    let output = if args.json {
        let execution_id = if args.execution_id == "auto" {
            generate_execution_id()
        } else {
            args.execution_id.clone()
        };
        let response = CompareResponse::new(execution_id, &left, &right, &highlights, ratio);
        serde_json::to_string_pretty(&response)?
    } else {
        render_text(&left, &right, &highlights, ratio, &config, !args.no_color)
    };

    match &args.output {
        Some(path) => fs::write(path, &output)
            .map_err(|e| format!("Failed to write output to '{}': {}", path.display(), e))?,
        None => println!("{}", output),
    }

    Ok(())
}

/// Human-readable summary followed by both highlighted documents
fn render_text(
    left: &FileContent,
    right: &FileContent,
    highlights: &Highlights,
    ratio: f64,
    config: &Config,
    color: bool,
) -> String {
    let mut left_buffer = StyledBuffer::new(left.document());
    let mut right_buffer = StyledBuffer::new(right.document());
    refresh(&mut left_buffer, &highlights.left);
    refresh(&mut right_buffer, &highlights.right);

    format!(
        "{} left range(s), {} right range(s), similarity {:.2}%\n--- left: {}\n{}+++ right: {}\n{}",
        highlights.left.len(),
        highlights.right.len(),
        ratio * 100.0,
        left.path,
        left_buffer.render(&config.palette, color),
        right.path,
        right_buffer.render(&config.palette, color),
    )
}
