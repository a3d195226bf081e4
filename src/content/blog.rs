use serde::Serialize;

use crate::content::frontmatter::Frontmatter;
use crate::content::repository::ContentKind;
use crate::text_utils::estimate_read_time;

/// Frontmatter of a blog post, with every default applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogMeta {
    pub title: String,
    pub slug: String,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub read_time: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(flatten)]
    pub meta: BlogMeta,
    pub content_html: String,
}

impl BlogMeta {
    pub fn from_frontmatter(fm: &Frontmatter, file_slug: &str, body: &str) -> BlogMeta {
        BlogMeta {
            title: fm.get_string("title").unwrap_or_else(|| file_slug.to_string()),
            slug: fm.get_non_blank("slug").unwrap_or_else(|| file_slug.to_string()),
            date: fm.get_string("date").unwrap_or_default(),
            excerpt: fm.get_string("excerpt").unwrap_or_default(),
            tags: fm.get_string_list("tags"),
            read_time: fm
                .get_positive_int("readTime")
                .unwrap_or_else(|| estimate_read_time(body)),
            meta_description: fm.get_string("metaDescription"),
            cover_image: fm.get_string("coverImage"),
        }
    }
}

pub struct Blog;

impl ContentKind for Blog {
    type Meta = BlogMeta;
    type Item = BlogPost;

    const NAME: &'static str = "blog";

    fn normalize(fm: &Frontmatter, file_slug: &str, body: &str) -> BlogMeta {
        BlogMeta::from_frontmatter(fm, file_slug, body)
    }

    fn slug(meta: &BlogMeta) -> &str {
        &meta.slug
    }

    fn date(meta: &BlogMeta) -> &str {
        &meta.date
    }

    fn with_html(meta: BlogMeta, content_html: String) -> BlogPost {
        BlogPost { meta, content_html }
    }
}

#[cfg(test)]
mod tests {
    use crate::content::frontmatter::split_frontmatter;
    use crate::test_data::BLOG_POST_MD;

    use super::*;

    #[test]
    fn test_defaults_from_empty_frontmatter() {
        let meta = BlogMeta::from_frontmatter(&Frontmatter::empty(), "hello-world", "");
        assert_eq!(meta, BlogMeta {
            title: "hello-world".to_string(),
            slug: "hello-world".to_string(),
            date: "".to_string(),
            excerpt: "".to_string(),
            tags: vec![],
            read_time: 1,
            meta_description: None,
            cover_image: None,
        });
    }

    #[test]
    fn test_full_frontmatter() {
        let (fm, body) = split_frontmatter(BLOG_POST_MD).unwrap();
        let meta = BlogMeta::from_frontmatter(&fm, "zero-downtime", body);
        assert_eq!(meta.title, "Zero-Downtime Deploys on EKS");
        assert_eq!(meta.slug, "zero-downtime");
        assert_eq!(meta.date, "2025-06-15");
        assert_eq!(meta.tags, ["kubernetes", "aws"]);
        assert_eq!(meta.read_time, 1);
        assert_eq!(meta.meta_description.as_deref(), Some("How to ship to EKS without dropping requests."));
        assert_eq!(meta.cover_image, None);
    }

    #[test]
    fn test_read_time_from_word_count() {
        let body = vec!["cloud"; 400].join(" ");
        let meta = BlogMeta::from_frontmatter(&Frontmatter::empty(), "long", &body);
        assert_eq!(meta.read_time, 2);
    }

    #[test]
    fn test_explicit_read_time_wins() {
        let (fm, body) = split_frontmatter("---\nreadTime: 9\n---\nshort").unwrap();
        let meta = BlogMeta::from_frontmatter(&fm, "post", body);
        assert_eq!(meta.read_time, 9);

        let (fm, body) = split_frontmatter("---\nreadTime: soon\n---\nshort").unwrap();
        let meta = BlogMeta::from_frontmatter(&fm, "post", body);
        assert_eq!(meta.read_time, 1);
    }

    #[test]
    fn test_non_sequence_tags() {
        for header in ["tags: devops", "tags: ~", "tags: {a: b}", ""] {
            let text = format!("---\n{}\n---\nbody", header);
            let (fm, body) = split_frontmatter(&text).unwrap();
            let meta = BlogMeta::from_frontmatter(&fm, "post", body);
            assert!(meta.tags.is_empty(), "tags should be empty for `{}`", header);
        }
    }

    #[test]
    fn test_explicit_slug() {
        let (fm, body) = split_frontmatter("---\nslug: bar\n---\n").unwrap();
        let meta = BlogMeta::from_frontmatter(&fm, "foo", body);
        assert_eq!(meta.slug, "bar");
        assert_eq!(meta.title, "foo");

        let (fm, body) = split_frontmatter("---\nslug: '  '\n---\n").unwrap();
        let meta = BlogMeta::from_frontmatter(&fm, "foo", body);
        assert_eq!(meta.slug, "foo");
    }

    #[test]
    fn test_serialize_camel_case() {
        let meta = BlogMeta::from_frontmatter(&Frontmatter::empty(), "p", "");
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["readTime"], 1);
        assert!(json.get("coverImage").is_none());
    }
}
