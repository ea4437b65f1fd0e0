use clap::Parser;
use sieve::{Context, ContextOptions, Error, Found, HostNode, TemplatePatch, XmlDocument, XmlNode};
use std::fs;
use std::path::PathBuf;

/// Query an XML document with pseudo-selector extended selectors.
#[derive(Parser, Debug)]
#[command(name = "sieve", version)]
struct Cli {
    /// The XML document to query.
    file: PathBuf,

    /// Alternative selectors, tried in order.
    #[arg(required = true)]
    selectors: Vec<String>,

    /// Print every match instead of the first one.
    #[arg(long)]
    all: bool,

    /// With --all, take at most one match per alternative.
    #[arg(long, requires = "all")]
    first_only: bool,

    /// Pseudo-selector prefix token.
    #[arg(long)]
    prefix: Option<String>,

    /// Pseudo-selector suffix token.
    #[arg(long)]
    suffix: Option<String>,

    /// Pseudo-selector value delimiter.
    #[arg(long)]
    wrapper: Option<String>,

    /// Print the alternative that produced each match.
    #[arg(long)]
    provenance: bool,
}

fn describe(found: &Found<'_, XmlNode<'_>>) -> String {
    let text = found.text_content();
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let snippet: String = text.chars().take(60).collect();
    let mut line = format!("<{}> \"{}\"", found.tag_name(), snippet);
    if let Some(selector) = found.selector() {
        line.push_str(&format!("  <- {}", selector));
    }
    line
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.file)?;
    let doc = XmlDocument::parse(&text).map_err(|e| Error::Document(e.to_string()))?;

    let mut ctx = Context::with_options(ContextOptions {
        record_provenance: cli.provenance,
    });
    ctx.configure(TemplatePatch {
        prefix: cli.prefix,
        suffix: cli.suffix,
        value_wrapper: cli.wrapper,
    });

    let session = ctx.session(doc.root());
    let found = if cli.all {
        session.query_all_with(cli.selectors, !cli.first_only)?
    } else {
        session.query(cli.selectors)?.into_iter().collect()
    };

    if found.is_empty() {
        log::info!("No element matched");
    }
    for f in &found {
        println!("{}", describe(f));
    }
    Ok(())
}
