use std::io;

use crate::content::blog::BlogMeta;
use crate::content::case_study::{CaseStudyMeta, CaseStudyResult};
use crate::text_utils::format_display_date;
use crate::view::{view_tags, PageTemplate, SiteView, ViewTag};

#[derive(ramhorns::Content)]
struct BlogListPage<'a> {
    site: &'a SiteView<'a>,
    post_list: Vec<PostItem<'a>>,
    tags: Vec<ViewTag<'a>>,
    has_posts: bool,
}

#[derive(ramhorns::Content)]
pub(crate) struct PostItem<'a> {
    pub link: String,
    pub title: &'a str,
    pub date: String,
    pub excerpt: &'a str,
    pub read_time: u32,
    pub tags: Vec<ViewTag<'a>>,
    pub has_cover_image: bool,
    pub cover_image: &'a str,
}

impl<'a> PostItem<'a> {
    pub(crate) fn new(meta: &'a BlogMeta) -> PostItem<'a> {
        let cover_image = meta.cover_image.as_deref().unwrap_or("");
        PostItem {
            link: format!("/blog/{}", meta.slug),
            title: &meta.title,
            date: format_display_date(&meta.date),
            excerpt: &meta.excerpt,
            read_time: meta.read_time,
            tags: view_tags(&meta.tags),
            has_cover_image: !cover_image.is_empty(),
            cover_image,
        }
    }
}

#[derive(ramhorns::Content)]
struct CaseStudyListPage<'a> {
    site: &'a SiteView<'a>,
    study_list: Vec<StudyItem<'a>>,
    has_studies: bool,
}

#[derive(ramhorns::Content)]
pub(crate) struct StudyItem<'a> {
    pub link: String,
    pub title: &'a str,
    pub client: &'a str,
    pub industry: &'a str,
    pub date: String,
    pub excerpt: &'a str,
    pub tags: Vec<ViewTag<'a>>,
    pub results: Vec<ResultItem<'a>>,
}

impl<'a> StudyItem<'a> {
    pub(crate) fn new(meta: &'a CaseStudyMeta) -> StudyItem<'a> {
        StudyItem {
            link: format!("/case-studies/{}", meta.slug),
            title: &meta.title,
            client: &meta.client,
            industry: &meta.industry,
            date: format_display_date(&meta.date),
            excerpt: &meta.excerpt,
            tags: view_tags(&meta.tags),
            results: result_items(&meta.results),
        }
    }
}

#[derive(ramhorns::Content)]
pub(crate) struct ResultItem<'a> {
    pub metric: &'a str,
    pub outcome: &'a str,
}

pub(crate) fn result_items(results: &[CaseStudyResult]) -> Vec<ResultItem<'_>> {
    results
        .iter()
        .map(|r| ResultItem { metric: &r.metric, outcome: &r.outcome })
        .collect()
}

pub struct ListRenderer<'a> {
    blog_template: PageTemplate<'a>,
    case_study_template: PageTemplate<'a>,
}

impl<'a> ListRenderer<'a> {
    pub fn new(blog_tpl_src: &'a str, case_study_tpl_src: &'a str) -> io::Result<ListRenderer<'a>> {
        Ok(ListRenderer {
            blog_template: PageTemplate::new("blog list", blog_tpl_src)?,
            case_study_template: PageTemplate::new("case study list", case_study_tpl_src)?,
        })
    }

    /// `posts` are expected newest first, `tags` sorted and unique.
    pub fn render_blog(&self, site: &SiteView, posts: &[BlogMeta], tags: &[String]) -> String {
        let post_list: Vec<_> = posts.iter().map(PostItem::new).collect();

        self.blog_template.render(&BlogListPage {
            site,
            has_posts: !post_list.is_empty(),
            post_list,
            tags: view_tags(tags),
        })
    }

    pub fn render_case_studies(&self, site: &SiteView, studies: &[CaseStudyMeta]) -> String {
        let study_list: Vec<_> = studies.iter().map(StudyItem::new).collect();

        self.case_study_template.render(&CaseStudyListPage {
            site,
            has_studies: !study_list.is_empty(),
            study_list,
        })
    }
}
