use std::fmt::{Display, Formatter};

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::bootstrap::bootstrap_cmd;
use crate::new_content::new_cmd;

mod bootstrap;
mod decompress;
mod new_content;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Creates a new blog post or case study
    New(NewArgs),
    /// Bootstraps a new site: templates, sample content and configuration
    Bootstrap(BootstrapArgs),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct NewArgs {
    /// Kind of content to create
    kind: ContentKind,

    /// Title of the new entry. The file name is derived from it
    #[arg(short, long)]
    title: String,

    /// Content generation options
    #[arg(short, long, value_enum, default_value_t = ContentOutput::Stdout)]
    output: ContentOutput,

    /// Directory the file is written to when the output is a file
    #[arg(short, long, default_value = ".")]
    dir: String,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct BootstrapArgs {
    /// Directory where the new site will be generated
    #[arg(short, long)]
    out_dir: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ContentKind {
    Blog,
    CaseStudies,
}

#[derive(Clone, Debug, ValueEnum)]
enum ContentOutput {
    /// Writes the new content to the stdout
    Stdout,
    /// Writes the new content to `<slug>.md`
    File,
}

impl Display for ContentOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentOutput::Stdout => write!(f, "stdout"),
            ContentOutput::File => write!(f, "file"),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args {
        Args::New(args) => new_cmd(args),
        Args::Bootstrap(args) => bootstrap_cmd(args),
    }
}
