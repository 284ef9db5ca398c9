//! Processing pipeline: fetch, parse, extract, export.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use indicatif::ProgressBar;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use crate::error::Web2JsonError;
use crate::export::{export_document, resolve_output_path};
use crate::extract::{extract_content, ExtractOptions};
use crate::fetch::FetchClient;
use crate::models::{Document, Metadata};
use crate::parse::{extract_meta_tags, extract_title, parse_document};
use crate::utils::url::validate_url;

/// Settings shared by every URL in a run.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub preserve_styles: bool,
    pub organize_sections: bool,
    pub timeout: Duration,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            preserve_styles: false,
            organize_sections: false,
            timeout: Duration::from_secs(crate::fetch::DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ProcessOptions {
    fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            preserve_styles: self.preserve_styles,
            organize_sections: self.organize_sections,
        }
    }
}

/// Per-stage wall-clock timings for one URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageTimings {
    pub fetch: Duration,
    pub extract: Duration,
    pub export: Duration,
}

/// The result of processing one URL.
#[derive(Debug)]
pub struct UrlOutcome {
    pub url: String,
    pub output_path: Option<PathBuf>,
    pub duration: Duration,
    pub stages: Option<StageTimings>,
    pub content_stats: BTreeMap<&'static str, usize>,
    pub error: Option<String>,
}

impl UrlOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    fn failure(url: &str, duration: Duration, error: impl ToString) -> Self {
        Self {
            url: url.to_string(),
            output_path: None,
            duration,
            stages: None,
            content_stats: BTreeMap::new(),
            error: Some(error.to_string()),
        }
    }
}

/// Process a single URL end to end, writing its JSON document to disk.
pub async fn process_url(
    client: &FetchClient,
    url: &str,
    output_name: Option<&str>,
    output_dir: &Path,
    opts: &ProcessOptions,
) -> UrlOutcome {
    info!("Processing URL: {url}");
    let started = Instant::now();

    // The client enforces a per-request timeout; this guards the whole
    // pipeline for one URL, parsing included.
    let run = tokio::time::timeout(
        opts.timeout,
        run_stages(client, url, output_name, output_dir, opts),
    );

    match run.await.unwrap_or_else(|_| {
        Err(Web2JsonError::Fetch(format!(
            "Operation timed out after {} seconds",
            opts.timeout.as_secs()
        )))
    }) {
        Ok((output_path, stages, content_stats)) => UrlOutcome {
            url: url.to_string(),
            output_path: Some(output_path),
            duration: started.elapsed(),
            stages: Some(stages),
            content_stats,
            error: None,
        },
        Err(e) => {
            error!("Error processing {url}: {e}");
            UrlOutcome::failure(url, started.elapsed(), e)
        }
    }
}

async fn run_stages(
    client: &FetchClient,
    url: &str,
    output_name: Option<&str>,
    output_dir: &Path,
    opts: &ProcessOptions,
) -> Result<(PathBuf, StageTimings, BTreeMap<&'static str, usize>), Web2JsonError> {
    if !validate_url(url) {
        return Err(Web2JsonError::InvalidUrl(url.to_string()));
    }

    let mut stages = StageTimings::default();

    let t = Instant::now();
    let html = client.fetch_text(url).await?;
    stages.fetch = t.elapsed();

    // scraper's DOM is not Send, so parse and extract stay inside one
    // blocking task and only the extracted data crosses back.
    let t = Instant::now();
    let extract_opts = opts.extract_options();
    let (title, meta, content) = tokio::task::spawn_blocking(move || {
        let doc = parse_document(&html);
        let title = extract_title(&doc);
        let meta = extract_meta_tags(&doc);
        let content = extract_content(&doc, extract_opts);
        (title, meta, content)
    })
    .await
    .map_err(|e| Web2JsonError::Extract(format!("extraction task failed: {e}")))?;
    stages.extract = t.elapsed();
    debug!("Extracted {} items from {url}", content.len());

    let metadata = Metadata::new(url, opts.preserve_styles).with_meta(meta);
    let document = Document::new(title, content, metadata);
    let content_stats = document.content_stats();

    let t = Instant::now();
    let output_path = resolve_output_path(url, output_name, output_dir)?;
    let output_path = export_document(&document, &output_path)?;
    stages.export = t.elapsed();

    Ok((output_path, stages, content_stats))
}

/// Process many URLs with bounded concurrency.
///
/// Every input URL gets exactly one outcome, in input order. A failing URL
/// never aborts the batch. The progress bar, when given, ticks once per
/// completed URL.
pub async fn bulk_process(
    client: FetchClient,
    urls: Vec<String>,
    output_dir: PathBuf,
    opts: ProcessOptions,
    max_concurrent: usize,
    progress: Option<ProgressBar>,
) -> Vec<UrlOutcome> {
    info!(
        "Processing {} URLs with concurrency {max_concurrent}",
        urls.len()
    );

    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let output_dir = Arc::new(output_dir);
    let opts = Arc::new(opts);

    let mut handles = Vec::with_capacity(urls.len());
    for url in &urls {
        let url = url.clone();
        let client = client.clone();
        let semaphore = semaphore.clone();
        let output_dir = output_dir.clone();
        let opts = opts.clone();
        let progress = progress.clone();

        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire()
                .await
                .expect("semaphore closed unexpectedly");
            let outcome = process_url(&client, &url, None, &output_dir, &opts).await;
            if let Some(pb) = progress {
                pb.inc(1);
            }
            outcome
        }));
    }

    let mut results = Vec::with_capacity(urls.len());
    for (handle, url) in handles.into_iter().zip(urls.iter()) {
        match handle.await {
            Ok(outcome) => results.push(outcome),
            Err(e) => {
                error!("Task for {url} panicked: {e}");
                results.push(UrlOutcome::failure(
                    url,
                    Duration::ZERO,
                    format!("Task execution error: {e}"),
                ));
            }
        }
    }

    let success_count = results.iter().filter(|r| r.is_success()).count();
    info!(
        "Processed {}/{} URLs successfully",
        success_count,
        results.len()
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_fails_fast() {
        let client = FetchClient::new(Duration::from_secs(5)).unwrap();
        let tmp = tempfile::tempdir().unwrap();
        let outcome =
            process_url(&client, "ftp://nope", None, tmp.path(), &ProcessOptions::default()).await;
        assert!(!outcome.is_success());
        assert!(outcome.error.unwrap().contains("Invalid URL"));
    }

    #[tokio::test]
    async fn test_bulk_accounts_for_every_url() {
        let client = FetchClient::new(Duration::from_secs(5)).unwrap();
        let tmp = tempfile::tempdir().unwrap();
        let urls = vec!["not-a-url".to_string(), "also bad".to_string()];
        let results = bulk_process(
            client,
            urls.clone(),
            tmp.path().to_path_buf(),
            ProcessOptions::default(),
            2,
            None,
        )
        .await;
        assert_eq!(results.len(), 2);
        let returned: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(returned, vec!["not-a-url", "also bad"]);
        assert!(results.iter().all(|r| !r.is_success()));
    }
}
