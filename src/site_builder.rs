use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use spdlog::{info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::content::repository::{BlogRepository, CaseStudyRepository};
use crate::view::article_renderer::ArticleRenderer;
use crate::view::list_renderer::ListRenderer;
use crate::view::page_renderer::{PageRenderer, PageSources};
use crate::view::sitemap_renderer::{blog_entry, case_study_entry, static_entries, Sitemap};
use crate::view::{
    read_template, SiteView, BLOG_LIST_TPL, BLOG_POST_TPL, CASE_STUDY_LIST_TPL, CASE_STUDY_TPL, FREE_REVIEW_TPL,
    INDEX_TPL, NOT_FOUND_TPL, SERVICES_TPL,
};

const SITEMAP_FILE: &str = "sitemap.xml";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    /// Html pages written, detail pages included.
    pub pages: usize,
    pub blog_posts: usize,
    pub case_studies: usize,
    /// Files copied from the public directory.
    pub assets: usize,
}

struct TemplateSources {
    index: String,
    services: String,
    free_review: String,
    blog_list: String,
    blog_post: String,
    case_study_list: String,
    case_study: String,
    not_found: String,
}

impl TemplateSources {
    fn load(tpl_dir: &Path) -> Result<TemplateSources> {
        let load = |name: &str| read_template(tpl_dir, name).with_context(|| format!("Loading template {}", name));
        Ok(TemplateSources {
            index: load(INDEX_TPL)?,
            services: load(SERVICES_TPL)?,
            free_review: load(FREE_REVIEW_TPL)?,
            blog_list: load(BLOG_LIST_TPL)?,
            blog_post: load(BLOG_POST_TPL)?,
            case_study_list: load(CASE_STUDY_LIST_TPL)?,
            case_study: load(CASE_STUDY_TPL)?,
            not_found: load(NOT_FOUND_TPL)?,
        })
    }
}

/// Renders the whole site into an output directory.
pub struct SiteBuilder<'a> {
    config: &'a Config,
    out_dir: PathBuf,
    build_date: NaiveDate,
}

impl<'a> SiteBuilder<'a> {
    pub fn new(config: &'a Config, out_dir: impl Into<PathBuf>) -> SiteBuilder<'a> {
        SiteBuilder {
            config,
            out_dir: out_dir.into(),
            build_date: Utc::now().date_naive(),
        }
    }

    /// Date used for the sitemap `lastmod` and the footer year.
    pub fn with_build_date(mut self, build_date: NaiveDate) -> SiteBuilder<'a> {
        self.build_date = build_date;
        self
    }

    pub fn build(&self) -> Result<BuildReport> {
        let paths = &self.config.paths;
        let blog_repo = BlogRepository::new(&paths.blog_dir);
        let case_repo = CaseStudyRepository::new(&paths.case_studies_dir);

        // Cards only link to slugs that get a page of their own.
        let blog_paths = blog_repo.paths()?;
        let case_paths = case_repo.paths()?;
        let posts = retain_published(blog_repo.list()?, &blog_paths, |post| &post.slug);
        let tags = blog_repo.tags()?;
        let studies = retain_published(case_repo.list()?, &case_paths, |study| &study.slug);

        let sources = TemplateSources::load(&paths.template_dir)?;
        let page_renderer = PageRenderer::new(self.config, &PageSources {
            index: &sources.index,
            services: &sources.services,
            free_review: &sources.free_review,
            not_found: &sources.not_found,
        })?;
        let list_renderer = ListRenderer::new(&sources.blog_list, &sources.case_study_list)?;
        let article_renderer = ArticleRenderer::new(&sources.blog_post, &sources.case_study)?;

        let site = SiteView::new(self.config, self.build_date);
        let mut report = BuildReport::default();
        let mut sitemap_entries = static_entries();

        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("Creating output directory {}", self.out_dir.display()))?;

        self.write_page(&mut report, "index.html", &page_renderer.render_home(&site, &studies, &posts))?;
        self.write_page(&mut report, "services/index.html", &page_renderer.render_services(&site))?;
        self.write_page(&mut report, "free-review/index.html", &page_renderer.render_free_review(&site))?;
        self.write_page(&mut report, "404.html", &page_renderer.render_not_found(&site))?;
        info!("Wrote static pages to {}", self.out_dir.display());

        self.write_page(&mut report, "case-studies/index.html", &list_renderer.render_case_studies(&site, &studies))?;
        for slug in case_paths {
            let Some(study) = case_repo.get(&slug)? else {
                warn!("Case study {} disappeared while building, skipping it", slug);
                continue;
            };
            let html = article_renderer.render_case_study(&site, &study);
            self.write_page(&mut report, &format!("case-studies/{}/index.html", slug), &html)?;
            sitemap_entries.push(case_study_entry(&slug));
            report.case_studies += 1;
        }
        info!("Wrote {} case studies", report.case_studies);

        self.write_page(&mut report, "blog/index.html", &list_renderer.render_blog(&site, &posts, &tags))?;
        for slug in blog_paths {
            let Some(post) = blog_repo.get(&slug)? else {
                warn!("Blog post {} disappeared while building, skipping it", slug);
                continue;
            };
            let html = article_renderer.render_post(&site, &post);
            self.write_page(&mut report, &format!("blog/{}/index.html", slug), &html)?;
            sitemap_entries.push(blog_entry(&slug));
            report.blog_posts += 1;
        }
        info!("Wrote {} blog posts", report.blog_posts);

        let sitemap = Sitemap {
            base_url: &self.config.site.url,
            last_modified: self.build_date,
        };
        let xml = sitemap.render(&sitemap_entries).context("Rendering sitemap")?;
        let sitemap_path = self.out_dir.join(SITEMAP_FILE);
        fs::write(&sitemap_path, xml).with_context(|| format!("Writing {}", sitemap_path.display()))?;
        info!("Wrote sitemap with {} urls", sitemap_entries.len());

        report.assets = copy_public_dir(&paths.public_dir, &self.out_dir)?;

        Ok(report)
    }

    fn write_page(&self, report: &mut BuildReport, rel_path: &str, html: &str) -> Result<()> {
        let full_path = self.out_dir.join(rel_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("Creating directory {}", parent.display()))?;
        }
        fs::write(&full_path, html).with_context(|| format!("Writing page {}", full_path.display()))?;
        report.pages += 1;
        Ok(())
    }
}

fn retain_published<T>(items: Vec<T>, published: &[String], slug: impl Fn(&T) -> &String) -> Vec<T> {
    let published: HashSet<&String> = published.iter().collect();
    items.into_iter().filter(|item| published.contains(slug(item))).collect()
}

/// Copies every file under `public_dir` into `out_dir`, keeping the relative
/// layout. A missing public directory copies nothing.
fn copy_public_dir(public_dir: &Path, out_dir: &Path) -> Result<usize> {
    if !public_dir.is_dir() {
        info!("No public directory at {}, nothing to copy", public_dir.display());
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(public_dir) {
        let entry = entry.with_context(|| format!("Walking public directory {}", public_dir.display()))?;
        let rel_path = entry.path().strip_prefix(public_dir)?;
        let target = out_dir.join(rel_path);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).with_context(|| format!("Creating directory {}", target.display()))?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Copying {} to {}", entry.path().display(), target.display()))?;
            copied += 1;
        }
    }

    info!("Copied {} public files", copied);
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::config::parse_config;
    use crate::test_data::{BLOG_POST_MD, CASE_STUDY_MD};

    use super::*;

    fn write(root: &Path, rel: &str, text: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    fn site_fixture() -> (TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        write(root, "templates/index.tpl", "home:{{#latest_posts}}{{link}};{{/latest_posts}}");
        write(root, "templates/services.tpl", "services");
        write(root, "templates/free_review.tpl", "{{#free_review}}{{duration}}{{/free_review}}");
        write(root, "templates/blog_list.tpl", "{{#tags}}{{tag}},{{/tags}}|{{#post_list}}{{link}};{{/post_list}}");
        write(root, "templates/blog_post.tpl", "{{title}}|{{#toc}}{{id}};{{/toc}}|{{{content}}}");
        write(root, "templates/case_study_list.tpl", "{{#study_list}}{{client}}>{{link}};{{/study_list}}");
        write(root, "templates/case_study.tpl", "{{title}}|{{client}}");
        write(root, "templates/not_found.tpl", "missing");

        write(root, "content/blog/zero-downtime.md", BLOG_POST_MD);
        write(root, "content/blog/one.md", "---\nslug: same\n---\nOne");
        write(root, "content/blog/two.md", "---\nslug: same\n---\nTwo");
        write(root, "content/case-studies/fintech.md", CASE_STUDY_MD);

        write(root, "public/style.css", "body {}");
        write(root, "public/images/logo.svg", "<svg/>");

        let cfg = format!(r#"
[site]
url = "https://example.com"

[paths]
template_dir = "{0}/templates"
public_dir = "{0}/public"
blog_dir = "{0}/content/blog"
case_studies_dir = "{0}/content/case-studies"
output_dir = "{0}/dist"
"#, root.display());
        let config = parse_config(&cfg).unwrap();
        (dir, config)
    }

    #[test]
    fn test_build_site() {
        let (dir, config) = site_fixture();
        let out_dir = dir.path().join("dist");
        let report = SiteBuilder::new(&config, &out_dir)
            .with_build_date(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
            .build()
            .unwrap();

        assert_eq!(report, BuildReport { pages: 8, blog_posts: 1, case_studies: 1, assets: 2 });

        let read = |rel: &str| fs::read_to_string(out_dir.join(rel)).unwrap();
        assert_eq!(read("index.html"), "home:/blog/zero-downtime;");
        assert_eq!(read("services/index.html"), "services");
        assert_eq!(read("free-review/index.html"), "30 min");
        assert_eq!(read("404.html"), "missing");
        assert_eq!(read("blog/index.html"), "aws,kubernetes,|/blog/zero-downtime;");
        assert_eq!(read("case-studies/index.html"), "Series B Fintech>/case-studies/fintech-aws-migration;");
        assert_eq!(read("case-studies/fintech-aws-migration/index.html"), "Fintech Platform Migration to AWS|Series B Fintech");

        let post = read("blog/zero-downtime/index.html");
        assert!(post.starts_with("Zero-Downtime Deploys on EKS|getting-started;readiness-timing;rolling-out;|"));
        assert!(post.contains(r#"<h2 id="getting-started">Getting Started</h2>"#));
        assert!(post.contains(r#"<div class="callout">Watch the surge settings.</div>"#));

        assert!(!out_dir.join("blog/same").exists());
        assert_eq!(read("style.css"), "body {}");
        assert_eq!(read("images/logo.svg"), "<svg/>");

        let sitemap = read("sitemap.xml");
        assert!(sitemap.contains("<loc>https://example.com/blog/zero-downtime</loc>"));
        assert!(sitemap.contains("<loc>https://example.com/case-studies/fintech-aws-migration</loc>"));
        assert!(!sitemap.contains("/blog/same"));
        assert_eq!(sitemap.matches("<url>").count(), 7);
        assert!(sitemap.contains("<lastmod>2026-03-01</lastmod>"));
    }

    #[test]
    fn test_listing_links_resolve_to_pages() {
        let (dir, config) = site_fixture();
        write(dir.path(), "content/case-studies/retail.md", "---\nslug: shared\nclient: Retail\n---\n");
        write(dir.path(), "content/case-studies/telco.md", "---\nslug: shared\nclient: Telco\n---\n");
        let out_dir = dir.path().join("dist");
        SiteBuilder::new(&config, &out_dir).build().unwrap();

        for page in ["index.html", "blog/index.html", "case-studies/index.html"] {
            let html = fs::read_to_string(out_dir.join(page)).unwrap();
            let links: Vec<&str> = html
                .split(|c| c == ':' || c == ';' || c == '|' || c == '>')
                .filter(|part| part.starts_with("/blog/") || part.starts_with("/case-studies/"))
                .collect();
            for link in links {
                let target = out_dir.join(link.trim_start_matches('/')).join("index.html");
                assert!(target.is_file(), "{} links to missing page {}", page, link);
            }
        }
        assert!(!out_dir.join("case-studies/shared").exists());
        let studies = fs::read_to_string(out_dir.join("case-studies/index.html")).unwrap();
        assert!(!studies.contains("Retail") && !studies.contains("Telco"));
    }

    #[test]
    fn test_unsafe_slug_fails_without_writing() {
        let (dir, config) = site_fixture();
        write(dir.path(), "content/blog/escape.md", "---\nslug: ../../escaped\n---\nOut");
        let out_dir = dir.path().join("dist");

        let err = SiteBuilder::new(&config, &out_dir).build().unwrap_err();
        assert!(format!("{:#}", err).contains("escape.md"));
        assert!(!dir.path().join("escaped").exists());
        assert!(!out_dir.join("index.html").exists());
    }

    #[test]
    fn test_missing_template_fails() {
        let (dir, config) = site_fixture();
        fs::remove_file(dir.path().join("templates/case_study.tpl")).unwrap();

        let err = SiteBuilder::new(&config, dir.path().join("dist")).build().unwrap_err();
        assert!(format!("{:#}", err).contains("case_study.tpl"));
    }

    #[test]
    fn test_malformed_frontmatter_fails() {
        let (dir, config) = site_fixture();
        write(dir.path(), "content/blog/broken.md", "---\ntitle: never closed\n");

        let err = SiteBuilder::new(&config, dir.path().join("dist")).build().unwrap_err();
        assert!(format!("{:#}", err).contains("broken.md"));
    }

    #[test]
    fn test_missing_public_dir_copies_nothing() {
        let (dir, config) = site_fixture();
        fs::remove_dir_all(dir.path().join("public")).unwrap();

        let report = SiteBuilder::new(&config, dir.path().join("dist")).build().unwrap();
        assert_eq!(report.assets, 0);
        assert_eq!(report.pages, 8);
    }
}
