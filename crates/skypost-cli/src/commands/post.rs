//! Post command implementation.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use skypost::{PostBuilder, Segment};

use crate::credfile;
use crate::output;

#[derive(Args, Debug)]
pub struct PostArgs {
    /// Credentials file (ATP_HOST / ATP_USERNAME / ATP_PASSWORD)
    #[arg(long)]
    pub credfile: PathBuf,

    /// Plain text segment (repeatable, posted in order)
    #[arg(long)]
    pub text: Vec<String>,

    /// Display text for a trailing hyperlink
    #[arg(long, requires = "link_url")]
    pub link_text: Option<String>,

    /// Target URL for the trailing hyperlink
    #[arg(long, requires = "link_text")]
    pub link_url: Option<String>,

    /// JPEG image to attach (repeatable, max 4)
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,

    /// Alt text for the attached images, paired by position
    #[arg(long = "alt")]
    pub alts: Vec<String>,
}

pub async fn run(args: PostArgs) -> Result<()> {
    let login = credfile::load(&args.credfile)?;

    let mut builder = PostBuilder::new();
    for text in &args.text {
        builder.add_segment(Segment::plain(text));
    }
    if let (Some(text), Some(url)) = (args.link_text, args.link_url) {
        builder.add_segment(Segment::link(text, url));
    }

    for (n, path) in args.images.iter().enumerate() {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        let alt = args.alts.get(n).cloned().unwrap_or_default();
        builder
            .add_image(bytes, alt)
            .with_context(|| format!("Could not attach {}", path.display()))?;
    }

    eprintln!("{}", "Posting...".dimmed());

    let post = builder
        .post(&login)
        .await
        .context("Failed to publish post")?;

    output::success("Posted");
    output::field("URI", &post.uri);
    output::field("CID", &post.cid);

    Ok(())
}
