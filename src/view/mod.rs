use std::io;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use ramhorns::{Content, Template};

use crate::config::Config;

pub mod article_renderer;
pub mod list_renderer;
pub mod page_renderer;
pub mod sitemap_renderer;

pub const INDEX_TPL: &str = "index.tpl";
pub const SERVICES_TPL: &str = "services.tpl";
pub const FREE_REVIEW_TPL: &str = "free_review.tpl";
pub const BLOG_LIST_TPL: &str = "blog_list.tpl";
pub const BLOG_POST_TPL: &str = "blog_post.tpl";
pub const CASE_STUDY_LIST_TPL: &str = "case_study_list.tpl";
pub const CASE_STUDY_TPL: &str = "case_study.tpl";
pub const NOT_FOUND_TPL: &str = "not_found.tpl";

pub fn read_template(tpl_dir: &Path, file_name: &str) -> io::Result<String> {
    let full_path = tpl_dir.join(file_name);
    std::fs::read_to_string(&full_path).map_err(|e| {
        io::Error::new(e.kind(), format!("Error loading template {}: {}", full_path.display(), e))
    })
}

/// A parsed page template.
pub struct PageTemplate<'a> {
    name: String,
    template: Template<'a>,
}

impl<'a> PageTemplate<'a> {
    pub fn new(name: &str, tpl_src: &'a str) -> io::Result<PageTemplate<'a>> {
        let template = match Template::new(tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing template {}: {}", name, e)));
            }
        };

        Ok(PageTemplate {
            name: name.to_string(),
            template,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn render<C: Content>(&self, content: &C) -> String {
        self.template.render(content)
    }
}

/// Site-wide values every template can reach through `{{#site}}`.
#[derive(Content)]
pub struct SiteView<'a> {
    pub name: &'a str,
    pub tagline: &'a str,
    pub description: &'a str,
    pub url: &'a str,
    pub og_image: &'a str,
    pub contact_email: &'a str,
    pub github: &'a str,
    pub linkedin: &'a str,
    pub owner_name: &'a str,
    pub owner_title: &'a str,
    pub free_review_href: &'a str,
    pub free_review_duration: &'a str,
    pub year: i32,
}

impl<'a> SiteView<'a> {
    pub fn new(config: &'a Config, build_date: NaiveDate) -> SiteView<'a> {
        SiteView {
            name: &config.site.name,
            tagline: &config.site.tagline,
            description: &config.site.description,
            url: config.site.url.trim_end_matches('/'),
            og_image: &config.site.og_image,
            contact_email: &config.contact.email,
            github: &config.social.github,
            linkedin: &config.social.linkedin,
            owner_name: &config.owner.name,
            owner_title: &config.owner.title,
            free_review_href: &config.free_review.href,
            free_review_duration: &config.free_review.duration,
            year: build_date.year(),
        }
    }
}

#[derive(Content)]
pub struct ViewTag<'a> {
    pub tag: &'a str,
}

pub fn view_tags(tags: &[String]) -> Vec<ViewTag<'_>> {
    tags.iter().map(|t| ViewTag { tag: t.as_str() }).collect()
}
