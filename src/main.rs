// Snapshot embedding CLI
//
// Reads an HTML file, inlines every image it references as a data URL and
// writes the self-contained document to stdout.
//
// Usage: kodegen-snapshot <input.html> [base-url] [options.json]

use anyhow::{Context, Result, bail};
use kodegen_tools_snapshot::{EmbedOptions, HttpImageEmbedder};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        bail!("usage: kodegen-snapshot <input.html> [base-url] [options.json]");
    };
    let base_url = args.next();
    let options_path = args.next();

    let mut builder = match options_path {
        Some(path) => EmbedOptions::from_json_file(&path)?.to_builder(),
        None => EmbedOptions::builder(),
    };
    if let Some(base) = base_url {
        builder = builder.base_url(base);
    }
    let options = builder.build()?;

    let html = tokio::fs::read_to_string(&input)
        .await
        .with_context(|| format!("Failed to read {input}"))?;

    log::info!("Embedding images of {input}");
    let snapshot = HttpImageEmbedder::default()
        .embed_html_document(&html, &options)
        .await
        .with_context(|| format!("Failed to embed images of {input}"))?;

    println!("{snapshot}");
    Ok(())
}
