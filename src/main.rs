//! bindery - HTML book publisher

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use bindery::XrefPolicy;
use bindery::publish::{PublishOptions, publish};

#[derive(Parser)]
#[command(name = "bindery")]
#[command(version, about = "Assembles a multi-chapter HTML book into publishable pages", long_about = None)]
#[command(after_help = "EXAMPLES:
    bindery book _site/book                     Publish a book
    bindery book _site/book --fragments extra   Splice banner/comments/analytics fragments
    bindery book _site/book --strict-xrefs      Fail on dangling cross-references")]
struct Cli {
    /// Book source directory (atlas.json, chapter HTML, book.html)
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Destination directory for rewritten pages
    #[arg(value_name = "DEST")]
    dest: PathBuf,

    /// Directory with boilerplate fragments (banner.html, comments.html,
    /// analytics.html)
    #[arg(long, value_name = "DIR")]
    fragments: Option<PathBuf>,

    /// Fail on cross-references that resolve to no chapter
    #[arg(long)]
    strict_xrefs: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let opts = PublishOptions {
        source: cli.source,
        dest: cli.dest,
        fragments: cli.fragments,
        xref_policy: if cli.strict_xrefs {
            XrefPolicy::Strict
        } else {
            XrefPolicy::Permissive
        },
    };

    match publish(&opts) {
        Ok(report) => {
            if !cli.quiet {
                for page in &report.pages {
                    println!("wrote {}", page.display());
                }
                println!("{} pages published", report.pages.len());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
