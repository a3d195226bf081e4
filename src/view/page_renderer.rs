use std::io;

use crate::config::{Config, Service};
use crate::content::blog::BlogMeta;
use crate::content::case_study::CaseStudyMeta;
use crate::icons::Icon;
use crate::view::list_renderer::{PostItem, StudyItem};
use crate::view::{PageTemplate, SiteView};

/// How many recent posts the home page shows.
pub const LATEST_POST_COUNT: usize = 3;

#[derive(ramhorns::Content)]
struct ServiceItem<'a> {
    icon_svg: String,
    icon: &'static str,
    title: &'a str,
    description: &'a str,
}

fn service_items(services: &[Service]) -> Vec<ServiceItem<'_>> {
    services
        .iter()
        .map(|s| {
            let icon = Icon::from_key(&s.icon);
            ServiceItem {
                icon_svg: icon.svg(),
                icon: icon.key(),
                title: &s.title,
                description: &s.description,
            }
        })
        .collect()
}

#[derive(ramhorns::Content)]
struct OwnerView<'a> {
    name: &'a str,
    title: &'a str,
    experience: &'a str,
    experience_label: &'a str,
    bio: &'a str,
    linkedin: &'a str,
}

impl<'a> OwnerView<'a> {
    fn new(config: &'a Config) -> OwnerView<'a> {
        let owner = &config.owner;
        OwnerView {
            name: &owner.name,
            title: &owner.title,
            experience: &owner.experience,
            experience_label: &owner.experience_label,
            bio: &owner.bio,
            linkedin: &owner.linkedin,
        }
    }
}

#[derive(ramhorns::Content)]
struct Bullet<'a> {
    text: &'a str,
}

#[derive(ramhorns::Content)]
struct FreeReviewView<'a> {
    href: &'a str,
    calendly_url: &'a str,
    duration: &'a str,
    headline: &'a str,
    subtext: &'a str,
    bullets: Vec<Bullet<'a>>,
    closing_note: &'a str,
}

impl<'a> FreeReviewView<'a> {
    fn new(config: &'a Config) -> FreeReviewView<'a> {
        let review = &config.free_review;
        FreeReviewView {
            href: &review.href,
            calendly_url: &review.calendly_url,
            duration: &review.duration,
            headline: &review.headline,
            subtext: &review.subtext,
            bullets: review.bullets.iter().map(|b| Bullet { text: b.as_str() }).collect(),
            closing_note: &review.closing_note,
        }
    }
}

#[derive(ramhorns::Content)]
struct HomePage<'a> {
    site: &'a SiteView<'a>,
    owner: OwnerView<'a>,
    services: Vec<ServiceItem<'a>>,
    free_review: FreeReviewView<'a>,
    has_featured: bool,
    featured: Vec<StudyItem<'a>>,
    latest_posts: Vec<PostItem<'a>>,
    has_posts: bool,
}

#[derive(ramhorns::Content)]
struct ServicesPage<'a> {
    site: &'a SiteView<'a>,
    owner: OwnerView<'a>,
    services: Vec<ServiceItem<'a>>,
    free_review: FreeReviewView<'a>,
}

#[derive(ramhorns::Content)]
struct FreeReviewPage<'a> {
    site: &'a SiteView<'a>,
    free_review: FreeReviewView<'a>,
}

#[derive(ramhorns::Content)]
struct NotFoundPage<'a> {
    site: &'a SiteView<'a>,
}

/// Renders the pages that are built from configuration rather than content
/// files: home, services, free review and the not found page.
pub struct PageRenderer<'a> {
    config: &'a Config,
    index_template: PageTemplate<'a>,
    services_template: PageTemplate<'a>,
    free_review_template: PageTemplate<'a>,
    not_found_template: PageTemplate<'a>,
}

pub struct PageSources<'a> {
    pub index: &'a str,
    pub services: &'a str,
    pub free_review: &'a str,
    pub not_found: &'a str,
}

impl<'a> PageRenderer<'a> {
    pub fn new(config: &'a Config, sources: &PageSources<'a>) -> io::Result<PageRenderer<'a>> {
        Ok(PageRenderer {
            config,
            index_template: PageTemplate::new("index", sources.index)?,
            services_template: PageTemplate::new("services", sources.services)?,
            free_review_template: PageTemplate::new("free review", sources.free_review)?,
            not_found_template: PageTemplate::new("not found", sources.not_found)?,
        })
    }

    /// `studies` and `posts` are expected newest first. The newest case
    /// study is featured, the first few posts are shown as latest.
    pub fn render_home(&self, site: &SiteView, studies: &[CaseStudyMeta], posts: &[BlogMeta]) -> String {
        let featured: Vec<_> = studies.iter().take(1).map(StudyItem::new).collect();
        let latest_posts: Vec<_> = posts.iter().take(LATEST_POST_COUNT).map(PostItem::new).collect();

        self.index_template.render(&HomePage {
            site,
            owner: OwnerView::new(self.config),
            services: service_items(&self.config.services),
            free_review: FreeReviewView::new(self.config),
            has_featured: !featured.is_empty(),
            featured,
            has_posts: !latest_posts.is_empty(),
            latest_posts,
        })
    }

    pub fn render_services(&self, site: &SiteView) -> String {
        self.services_template.render(&ServicesPage {
            site,
            owner: OwnerView::new(self.config),
            services: service_items(&self.config.services),
            free_review: FreeReviewView::new(self.config),
        })
    }

    pub fn render_free_review(&self, site: &SiteView) -> String {
        self.free_review_template.render(&FreeReviewPage {
            site,
            free_review: FreeReviewView::new(self.config),
        })
    }

    pub fn render_not_found(&self, site: &SiteView) -> String {
        self.not_found_template.render(&NotFoundPage { site })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::test_support::{build_date, test_config};

    const INDEX: &str = "{{#featured}}F={{link}}{{/featured}}{{^has_featured}}no-featured{{/has_featured}}|{{#latest_posts}}[{{link}}]{{/latest_posts}}|{{#services}}({{icon}}){{/services}}";
    const SERVICES: &str = "{{#services}}{{{icon_svg}}}{{title}};{{/services}}{{#owner}}{{experience}}{{/owner}}";
    const FREE_REVIEW: &str = "{{#free_review}}{{headline}}|{{#bullets}}-{{text}}{{/bullets}}|{{calendly_url}}{{/free_review}}";
    const NOT_FOUND: &str = "{{#site}}404 {{name}}{{/site}}";

    fn sources() -> PageSources<'static> {
        PageSources { index: INDEX, services: SERVICES, free_review: FREE_REVIEW, not_found: NOT_FOUND }
    }

    fn post(slug: &str) -> BlogMeta {
        BlogMeta {
            title: slug.to_string(),
            slug: slug.to_string(),
            date: String::new(),
            excerpt: String::new(),
            tags: vec![],
            read_time: 1,
            meta_description: None,
            cover_image: None,
        }
    }

    fn study(slug: &str) -> CaseStudyMeta {
        CaseStudyMeta {
            title: slug.to_string(),
            slug: slug.to_string(),
            excerpt: String::new(),
            client: String::new(),
            industry: String::new(),
            date: String::new(),
            tags: vec![],
            results: vec![],
            architecture: vec![],
        }
    }

    #[test]
    fn test_render_home() {
        let config = test_config();
        let site = SiteView::new(&config, build_date());
        let renderer = PageRenderer::new(&config, &sources()).unwrap();

        let posts: Vec<_> = ["a", "b", "c", "d"].into_iter().map(post).collect();
        let studies = vec![study("first"), study("second")];
        let out = renderer.render_home(&site, &studies, &posts);
        assert_eq!(
            out,
            "F=/case-studies/first|[/blog/a][/blog/b][/blog/c]|(server)(box)(git-branch)(code)(bar-chart)(shield-check)"
        );

        let out = renderer.render_home(&site, &[], &[]);
        assert!(out.starts_with("no-featured||"));
    }

    #[test]
    fn test_render_services_unknown_icon() {
        let mut config = test_config();
        config.services = vec![Service {
            icon: "rocket".to_string(),
            title: "Launch".to_string(),
            description: "Go".to_string(),
        }];
        let site = SiteView::new(&config, build_date());
        let renderer = PageRenderer::new(&config, &sources()).unwrap();

        let out = renderer.render_services(&site);
        assert_eq!(out, format!("{}Launch;3+", Icon::Cloud.svg()));
    }

    #[test]
    fn test_render_free_review_and_not_found() {
        let config = test_config();
        let site = SiteView::new(&config, build_date());
        let renderer = PageRenderer::new(&config, &sources()).unwrap();

        let out = renderer.render_free_review(&site);
        assert!(out.starts_with("Get a Free 30-Minute Cloud Infrastructure Review|-Architecture risk assessment-"));
        assert!(out.ends_with("|https://calendly.com/cloudforgeops/30min"));

        assert_eq!(renderer.render_not_found(&site), "404 CloudForgeOps");
    }

    #[test]
    fn test_invalid_template_is_rejected() {
        let config = test_config();
        let sources = PageSources { index: "{{#broken}}", ..sources() };
        assert!(PageRenderer::new(&config, &sources).is_err());
    }
}
