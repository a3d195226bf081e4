use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use spdlog::{info, warn};

use cloudforge::config::Config;
use cloudforge::content::heading_index::{Article, TocEntry};
use cloudforge::content::repository::{BlogRepository, CaseStudyRepository};
use cloudforge::logger::configure_logger;
use cloudforge::site_builder::SiteBuilder;
use cloudforge::text_utils::format_display_date;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "cloudforge.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Renders the whole site
    Build {
        /// Output directory. Defaults to paths.output_dir
        #[arg(short, long)]
        out_dir: Option<String>,
    },
    /// Lists every entry of a content kind, newest first
    List {
        kind: Kind,
        /// Prints the entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Prints the slugs that have a detail page
    Paths { kind: Kind },
    /// Prints the table of contents of one entry
    Toc { kind: Kind, slug: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Blog,
    CaseStudies,
}

impl Kind {
    fn name(&self) -> &'static str {
        match self {
            Kind::Blog => "blog",
            Kind::CaseStudies => "case-studies",
        }
    }
}

struct ListLine<'a> {
    slug: &'a str,
    title: &'a str,
    date: &'a str,
}

fn print_lines(lines: &[ListLine]) {
    for line in lines {
        let date = if line.date.is_empty() { "-".to_string() } else { format_display_date(line.date) };
        println!("{}\t{}\t{}", line.slug, date, line.title);
    }
}

fn list_cmd(config: &Config, kind: Kind, json: bool) -> Result<()> {
    match kind {
        Kind::Blog => {
            let posts = BlogRepository::new(&config.paths.blog_dir).list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else {
                let lines: Vec<_> = posts.iter().map(|p| ListLine { slug: &p.slug, title: &p.title, date: &p.date }).collect();
                print_lines(&lines);
            }
        }
        Kind::CaseStudies => {
            let studies = CaseStudyRepository::new(&config.paths.case_studies_dir).list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&studies)?);
            } else {
                let lines: Vec<_> = studies.iter().map(|s| ListLine { slug: &s.slug, title: &s.title, date: &s.date }).collect();
                print_lines(&lines);
            }
        }
    }
    Ok(())
}

fn paths_cmd(config: &Config, kind: Kind) -> Result<()> {
    let slugs = match kind {
        Kind::Blog => BlogRepository::new(&config.paths.blog_dir).paths()?,
        Kind::CaseStudies => CaseStudyRepository::new(&config.paths.case_studies_dir).paths()?,
    };
    for slug in slugs {
        println!("{}", slug);
    }
    Ok(())
}

fn format_toc(toc: &[TocEntry]) -> String {
    toc.iter()
        .map(|e| {
            let indent = if e.level.is_sub() { "  " } else { "" };
            format!("{}{} (#{})\n", indent, e.label, e.id)
        })
        .collect()
}

fn toc_cmd(config: &Config, kind: Kind, slug: &str) -> Result<()> {
    let content_html = match kind {
        Kind::Blog => BlogRepository::new(&config.paths.blog_dir).get(slug)?.map(|p| p.content_html),
        Kind::CaseStudies => CaseStudyRepository::new(&config.paths.case_studies_dir).get(slug)?.map(|s| s.content_html),
    };

    let Some(content_html) = content_html else {
        bail!("No {} entry with slug {}", kind.name(), slug);
    };

    print!("{}", format_toc(&Article::from_html(&content_html).toc));
    Ok(())
}

fn build_cmd(config: &Config, out_dir: Option<String>) -> Result<()> {
    let out_dir = out_dir.map(PathBuf::from).unwrap_or_else(|| config.paths.output_dir.clone());

    info!("Building site into {}", out_dir.display());
    let report = SiteBuilder::new(config, &out_dir).build()?;
    info!(
        "Done: {} pages, {} blog posts, {} case studies, {} public files",
        report.pages, report.blog_posts, report.case_studies, report.assets
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let config = open_config(config_path)?;

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    match args.command {
        Command::Build { out_dir } => build_cmd(&config, out_dir),
        Command::List { kind, json } => list_cmd(&config, kind, json),
        Command::Paths { kind } => paths_cmd(&config, kind),
        Command::Toc { kind, slug } => toc_cmd(&config, kind, &slug),
    }
}
