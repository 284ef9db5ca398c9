//! The `process` command: convert one URL or a file of URLs to JSON.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::fetch::FetchClient;
use crate::pipeline::{bulk_process, process_url, ProcessOptions, UrlOutcome};
use crate::utils::fs::ensure_directory;
use crate::utils::url::validate_url;

use super::{EXIT_ERROR_GENERAL, EXIT_ERROR_PROCESSING, EXIT_SUCCESS};

/// Default directory for output files.
const DEFAULT_OUTPUT_DIR: &str = "fetched_jsons";

#[derive(Args)]
pub struct ProcessArgs {
    /// Single URL to process
    #[arg(short, long)]
    url: Option<String>,

    /// File containing URLs (one per line)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Custom output filename (without extension), single URL only
    #[arg(short, long)]
    output: Option<String>,

    /// Directory to save output files
    #[arg(short = 'd', long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Preserve HTML style tags in extracted text
    #[arg(long)]
    preserve_styles: bool,

    /// Nest extracted content into sections by heading level
    #[arg(long)]
    sections: bool,

    /// Timeout in seconds per URL
    #[arg(short, long, default_value = "60")]
    timeout: u64,

    /// Maximum number of concurrent URL processing tasks
    #[arg(short = 'c', long, default_value = "5")]
    max_concurrent: usize,
}

/// Run the process command. Returns the exit code.
pub async fn cmd_process(args: ProcessArgs) -> anyhow::Result<i32> {
    println!(
        "{} v{} - {}",
        style("web2json").bold().cyan(),
        env!("CARGO_PKG_VERSION"),
        style("web page to structured JSON converter").italic()
    );

    if args.output.is_some() && args.url.is_none() {
        print_error("Custom output filename (--output) can only be used with a single URL (--url)");
        return Ok(EXIT_ERROR_GENERAL);
    }
    if args.timeout == 0 {
        print_error("Timeout must be a positive number");
        return Ok(EXIT_ERROR_GENERAL);
    }
    if args.max_concurrent == 0 {
        print_error("Maximum concurrent tasks must be a positive number");
        return Ok(EXIT_ERROR_GENERAL);
    }

    if let Err(e) = ensure_directory(&args.output_dir) {
        print_error(&format!("Error creating output directory: {e}"));
        return Ok(EXIT_ERROR_GENERAL);
    }
    println!(
        "Output directory: {}",
        style(args.output_dir.display()).blue()
    );

    let opts = ProcessOptions {
        preserve_styles: args.preserve_styles,
        organize_sections: args.sections,
        timeout: Duration::from_secs(args.timeout),
    };
    let client = FetchClient::new(opts.timeout)?;

    match (args.url, args.file) {
        (Some(_), Some(_)) => {
            print_error("Cannot specify both URL and file");
            Ok(EXIT_ERROR_GENERAL)
        }
        (Some(url), None) => {
            process_single(client, &url, args.output.as_deref(), &args.output_dir, opts).await
        }
        (None, Some(file)) => {
            process_file(client, &file, &args.output_dir, opts, args.max_concurrent).await
        }
        (None, None) => {
            print_error("You must specify either a URL (--url) or a file containing URLs (--file)");
            Ok(EXIT_ERROR_GENERAL)
        }
    }
}

async fn process_single(
    client: FetchClient,
    url: &str,
    output: Option<&str>,
    output_dir: &std::path::Path,
    opts: ProcessOptions,
) -> anyhow::Result<i32> {
    if !validate_url(url) {
        print_error(&format!("Invalid URL: {url}"));
        return Ok(EXIT_ERROR_PROCESSING);
    }

    println!("Processing: {}", style(url).blue());
    println!(
        "Operation timeout: {} seconds",
        style(opts.timeout.as_secs()).blue()
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed}]")
            .expect("valid template"),
    );
    pb.set_message("Fetching and processing content...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let outcome = process_url(&client, url, output, output_dir, &opts).await;
    pb.finish_and_clear();

    match &outcome.error {
        None => {
            println!("{} Processed {url}", style("✓").green());
            if let Some(path) = &outcome.output_path {
                println!("Output saved to: {}", style(path.display()).blue());
            }
            println!(
                "Total processing time: {} seconds",
                style(format!("{:.2}", outcome.duration.as_secs_f64())).blue()
            );
            if let Some(stages) = outcome.stages {
                println!(
                    "  fetch {:.2}s, extract {:.2}s, export {:.2}s",
                    stages.fetch.as_secs_f64(),
                    stages.extract.as_secs_f64(),
                    stages.export.as_secs_f64()
                );
            }
            if !outcome.content_stats.is_empty() {
                let stats: Vec<String> = outcome
                    .content_stats
                    .iter()
                    .map(|(kind, count)| format!("{kind}: {count}"))
                    .collect();
                println!("Content items: {}", stats.join(", "));
            }
            Ok(EXIT_SUCCESS)
        }
        Some(error) => {
            print_error(error);
            Ok(EXIT_ERROR_PROCESSING)
        }
    }
}

async fn process_file(
    client: FetchClient,
    file: &std::path::Path,
    output_dir: &std::path::Path,
    opts: ProcessOptions,
    max_concurrent: usize,
) -> anyhow::Result<i32> {
    if !file.exists() {
        print_error(&format!("File not found: {}", file.display()));
        return Ok(EXIT_ERROR_GENERAL);
    }

    let urls = read_url_file(file)?;
    if urls.is_empty() {
        println!(
            "{} No URLs found in {}",
            style("!").yellow(),
            file.display()
        );
        return Ok(EXIT_ERROR_GENERAL);
    }

    println!(
        "Found {} URLs in {}",
        style(urls.len()).blue(),
        file.display()
    );
    println!(
        "Processing with up to {} concurrent tasks, {} second timeout per URL",
        style(max_concurrent).blue(),
        style(opts.timeout.as_secs()).blue()
    );

    let pb = ProgressBar::new(urls.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let results = bulk_process(
        client,
        urls,
        output_dir.to_path_buf(),
        opts,
        max_concurrent,
        Some(pb.clone()),
    )
    .await;
    pb.finish_and_clear();

    print_summary(&results);

    if results.iter().any(|r| !r.is_success()) {
        Ok(EXIT_ERROR_PROCESSING)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Read a URL list file: one URL per line, blank lines skipped.
fn read_url_file(file: &std::path::Path) -> anyhow::Result<Vec<String>> {
    let bytes = std::fs::read(file)?;
    let content = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            warn!("File was not UTF-8 encoded, decoding lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

fn print_summary(results: &[UrlOutcome]) {
    let success_count = results.iter().filter(|r| r.is_success()).count();
    let failure_count = results.len() - success_count;

    println!();
    println!(
        "{} Total: {}  Successful: {}  Failed: {}",
        style("Summary").bold(),
        results.len(),
        style(success_count).green(),
        style(failure_count).red()
    );

    if success_count > 0 {
        println!("\n{}", style("Successfully processed:").green().bold());
        for result in results.iter().filter(|r| r.is_success()) {
            let path = result
                .output_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            println!(
                "  {} -> {} ({:.2}s)",
                style(&result.url).blue(),
                path,
                result.duration.as_secs_f64()
            );
        }
    }

    if failure_count > 0 {
        println!("\n{}", style("Failed:").red().bold());
        for result in results.iter().filter(|r| !r.is_success()) {
            println!(
                "  {}: {}",
                style(&result.url).blue(),
                style(result.error.as_deref().unwrap_or("unknown error")).red()
            );
        }
    }
}

fn print_error(message: &str) {
    eprintln!("{} {message}", style("Error:").red().bold());
}
