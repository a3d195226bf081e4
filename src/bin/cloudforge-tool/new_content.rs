use std::fmt::Write;
use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;

use cloudforge::text_utils::slugify;

use crate::{ContentKind, ContentOutput, NewArgs};

fn yaml_quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

fn render_blog(title: &str, date: &str) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf, "title: {}", yaml_quote(title));
    let _ = writeln!(&mut buf, "date: \"{}\"", date);
    let _ = writeln!(&mut buf, "excerpt: \"\"");
    let _ = writeln!(&mut buf, "tags: []");
    let _ = writeln!(&mut buf, "metaDescription: \"\"");
    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "Open with the problem this post solves.");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "## Background");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "## The Fix");
    buf
}

fn render_case_study(title: &str, slug: &str, date: &str) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf, "title: {}", yaml_quote(title));
    let _ = writeln!(&mut buf, "slug: {}", slug);
    let _ = writeln!(&mut buf, "date: \"{}\"", date);
    let _ = writeln!(&mut buf, "client: \"\"");
    let _ = writeln!(&mut buf, "industry: \"\"");
    let _ = writeln!(&mut buf, "excerpt: \"\"");
    let _ = writeln!(&mut buf, "tags: []");
    let _ = writeln!(&mut buf, "results:");
    let _ = writeln!(&mut buf, "  - metric: \"\"");
    let _ = writeln!(&mut buf, "    outcome: \"\"");
    let _ = writeln!(&mut buf, "architecture: []");
    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "## The Challenge");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "## The Solution");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "## The Results");
    buf
}

fn render_content(kind: ContentKind, title: &str, slug: &str, date: &str) -> String {
    match kind {
        ContentKind::Blog => render_blog(title, date),
        ContentKind::CaseStudies => render_case_study(title, slug, date),
    }
}

pub fn new_cmd(args: NewArgs) -> Result<()> {
    let slug = slugify(&args.title);
    if slug.is_empty() {
        bail!("Title {:?} has no characters usable in a file name", args.title);
    }

    let date = Local::now().format("%Y-%m-%d").to_string();
    let content = render_content(args.kind, &args.title, &slug, &date);

    match args.output {
        ContentOutput::Stdout => print!("{}", content),
        ContentOutput::File => {
            use std::io::Write;
            let file_path: PathBuf = PathBuf::from(&args.dir).join(format!("{}.md", slug));
            println!("Creating file {}", file_path.display());
            let mut file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&file_path)
                .with_context(|| format!("Creating {}", file_path.display()))?;
            file.write_all(content.as_bytes())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use cloudforge::content::blog::BlogMeta;
    use cloudforge::content::case_study::CaseStudyMeta;
    use cloudforge::content::frontmatter::split_frontmatter;

    use super::*;

    #[test]
    fn test_blog_skeleton_parses() {
        let title = r#"Cutting "NAT" Costs: Ação"#;
        let slug = slugify(title);
        let text = render_content(ContentKind::Blog, title, &slug, "2026-03-01");

        let (fm, body) = split_frontmatter(&text).unwrap();
        let meta = BlogMeta::from_frontmatter(&fm, &slug, body);
        assert_eq!(meta.title, title);
        assert_eq!(meta.slug, "cutting-nat-costs-acao");
        assert_eq!(meta.date, "2026-03-01");
        assert!(meta.tags.is_empty());
        assert!(body.contains("## Background"));
    }

    #[test]
    fn test_case_study_skeleton_parses() {
        let text = render_content(ContentKind::CaseStudies, "Retail on GKE", "retail-on-gke", "2026-03-01");

        let (fm, _) = split_frontmatter(&text).unwrap();
        let meta = CaseStudyMeta::from_frontmatter(&fm, "whatever");
        assert_eq!(meta.slug, "retail-on-gke");
        assert_eq!(meta.title, "Retail on GKE");
        assert_eq!(meta.client, "");
        assert_eq!(meta.results.len(), 1);
        assert!(meta.architecture.is_empty());
    }

    #[test]
    fn test_file_output_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let args = || NewArgs {
            kind: ContentKind::Blog,
            title: "Hello World".to_string(),
            output: ContentOutput::File,
            dir: dir.path().display().to_string(),
        };

        new_cmd(args()).unwrap();
        assert!(dir.path().join("hello-world.md").is_file());
        assert!(new_cmd(args()).is_err());
    }

    #[test]
    fn test_unusable_title() {
        let args = NewArgs {
            kind: ContentKind::Blog,
            title: "!!!".to_string(),
            output: ContentOutput::Stdout,
            dir: ".".to_string(),
        };
        assert!(new_cmd(args).is_err());
    }
}
