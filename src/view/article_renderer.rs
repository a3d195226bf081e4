use std::io;

use crate::content::blog::BlogPost;
use crate::content::case_study::CaseStudy;
use crate::content::heading_index::{Article, TocEntry};
use crate::text_utils::format_display_date;
use crate::view::list_renderer::{result_items, ResultItem};
use crate::view::{view_tags, PageTemplate, SiteView, ViewTag};

#[derive(ramhorns::Content)]
struct TocItem<'a> {
    id: &'a str,
    label: &'a str,
    level: u8,
    is_sub: bool,
}

fn toc_items(toc: &[TocEntry]) -> Vec<TocItem<'_>> {
    toc.iter()
        .map(|e| TocItem {
            id: &e.id,
            label: &e.label,
            level: e.level.number(),
            is_sub: e.level.is_sub(),
        })
        .collect()
}

#[derive(ramhorns::Content)]
struct BlogPostPage<'a> {
    site: &'a SiteView<'a>,
    title: &'a str,
    slug: &'a str,
    date: String,
    read_time: u32,
    excerpt: &'a str,
    meta_description: &'a str,
    has_cover_image: bool,
    cover_image: &'a str,
    tags: Vec<ViewTag<'a>>,
    toc: Vec<TocItem<'a>>,
    has_toc: bool,
    content: &'a str,
}

#[derive(ramhorns::Content)]
struct ArchitectureItem<'a> {
    line: &'a str,
}

#[derive(ramhorns::Content)]
struct CaseStudyPage<'a> {
    site: &'a SiteView<'a>,
    title: &'a str,
    slug: &'a str,
    client: &'a str,
    industry: &'a str,
    date: String,
    excerpt: &'a str,
    tags: Vec<ViewTag<'a>>,
    results: Vec<ResultItem<'a>>,
    has_results: bool,
    architecture: Vec<ArchitectureItem<'a>>,
    has_architecture: bool,
    toc: Vec<TocItem<'a>>,
    has_toc: bool,
    content: &'a str,
}

/// Renders single blog posts and case studies. The body gets heading ids
/// injected and the table of contents is built from the same html.
pub struct ArticleRenderer<'a> {
    post_template: PageTemplate<'a>,
    case_study_template: PageTemplate<'a>,
}

impl<'a> ArticleRenderer<'a> {
    pub fn new(post_tpl_src: &'a str, case_study_tpl_src: &'a str) -> io::Result<ArticleRenderer<'a>> {
        Ok(ArticleRenderer {
            post_template: PageTemplate::new("blog post", post_tpl_src)?,
            case_study_template: PageTemplate::new("case study", case_study_tpl_src)?,
        })
    }

    pub fn render_post(&self, site: &SiteView, post: &BlogPost) -> String {
        let article = Article::from_html(&post.content_html);
        let meta = &post.meta;
        let cover_image = meta.cover_image.as_deref().unwrap_or("");
        let meta_description = meta.meta_description.as_deref().unwrap_or(&meta.excerpt);
        let toc = toc_items(&article.toc);

        self.post_template.render(&BlogPostPage {
            site,
            title: &meta.title,
            slug: &meta.slug,
            date: format_display_date(&meta.date),
            read_time: meta.read_time,
            excerpt: &meta.excerpt,
            meta_description,
            has_cover_image: !cover_image.is_empty(),
            cover_image,
            tags: view_tags(&meta.tags),
            has_toc: !toc.is_empty(),
            toc,
            content: &article.html,
        })
    }

    pub fn render_case_study(&self, site: &SiteView, study: &CaseStudy) -> String {
        let article = Article::from_html(&study.content_html);
        let meta = &study.meta;
        let results = result_items(&meta.results);
        let architecture: Vec<_> = meta.architecture.iter().map(|l| ArchitectureItem { line: l.as_str() }).collect();
        let toc = toc_items(&article.toc);

        self.case_study_template.render(&CaseStudyPage {
            site,
            title: &meta.title,
            slug: &meta.slug,
            client: &meta.client,
            industry: &meta.industry,
            date: format_display_date(&meta.date),
            excerpt: &meta.excerpt,
            tags: view_tags(&meta.tags),
            has_results: !results.is_empty(),
            results,
            has_architecture: !architecture.is_empty(),
            architecture,
            has_toc: !toc.is_empty(),
            toc,
            content: &article.html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::blog::BlogMeta;
    use crate::content::case_study::{CaseStudyMeta, CaseStudyResult};
    use crate::view::test_support::{build_date, test_config};

    const POST_TPL: &str = r##"
TITLE=[{{title}}]
DATE=[{{date}}]
READ=[{{read_time}}]
DESC=[{{meta_description}}]
TAGS=[{{#tags}}({{tag}}){{/tags}}]
TOC=[{{#toc}}<a href="#{{id}}" class="{{#is_sub}}sub{{/is_sub}}{{^is_sub}}top{{/is_sub}}">{{label}}</a>{{/toc}}]
CONTENT=[{{{content}}}]"##;

    const STUDY_TPL: &str = "{{client}}|{{date}}|{{#results}}{{metric}}:{{outcome}};{{/results}}|{{#architecture}}{{line}};{{/architecture}}|{{#toc}}{{id}};{{/toc}}{{^has_toc}}no-toc{{/has_toc}}|{{{content}}}";

    #[test]
    fn test_render_post() {
        let config = test_config();
        let site = SiteView::new(&config, build_date());
        let renderer = ArticleRenderer::new(POST_TPL, STUDY_TPL).unwrap();

        let post = BlogPost {
            meta: BlogMeta {
                title: "<Deploys>".to_string(),
                slug: "deploys".to_string(),
                date: "2025-06-15".to_string(),
                excerpt: "Short".to_string(),
                tags: vec!["aws".to_string()],
                read_time: 6,
                meta_description: None,
                cover_image: None,
            },
            content_html: "<h2>Getting Started</h2>\n<p>Hi</p>\n<h3>Readiness timing</h3>".to_string(),
        };

        let out = renderer.render_post(&site, &post);
        assert_eq!(out, r##"
TITLE=[&lt;Deploys&gt;]
DATE=[June 15, 2025]
READ=[6]
DESC=[Short]
TAGS=[(aws)]
TOC=[<a href="#getting-started" class="top">Getting Started</a><a href="#readiness-timing" class="sub">Readiness timing</a>]
CONTENT=[<h2 id="getting-started">Getting Started</h2>
<p>Hi</p>
<h3 id="readiness-timing">Readiness timing</h3>]"##);
    }

    #[test]
    fn test_render_case_study() {
        let config = test_config();
        let site = SiteView::new(&config, build_date());
        let renderer = ArticleRenderer::new(POST_TPL, STUDY_TPL).unwrap();

        let study = CaseStudy {
            meta: CaseStudyMeta {
                title: "Migration".to_string(),
                slug: "migration".to_string(),
                excerpt: String::new(),
                client: "Confidential".to_string(),
                industry: String::new(),
                date: "sometime".to_string(),
                tags: vec![],
                results: vec![CaseStudyResult { metric: "3x".to_string(), outcome: "faster".to_string() }],
                architecture: vec!["EKS".to_string(), "RDS".to_string()],
            },
            content_html: "<p>No headings</p>".to_string(),
        };

        let out = renderer.render_case_study(&site, &study);
        assert_eq!(out, "Confidential|sometime|3x:faster;|EKS;RDS;|no-toc|<p>No headings</p>");
    }
}
