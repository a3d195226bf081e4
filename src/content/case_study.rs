use serde::Serialize;
use serde_yaml_ng::Value;

use crate::content::frontmatter::{scalar_to_string, Frontmatter};
use crate::content::repository::ContentKind;

pub const UNDISCLOSED_CLIENT: &str = "Confidential";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseStudyResult {
    pub metric: String,
    pub outcome: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseStudyMeta {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub client: String,
    pub industry: String,
    pub date: String,
    pub tags: Vec<String>,
    pub results: Vec<CaseStudyResult>,
    pub architecture: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    #[serde(flatten)]
    pub meta: CaseStudyMeta,
    pub content_html: String,
}

impl CaseStudyMeta {
    pub fn from_frontmatter(fm: &Frontmatter, file_slug: &str) -> CaseStudyMeta {
        CaseStudyMeta {
            title: fm.get_string("title").unwrap_or_else(|| file_slug.to_string()),
            slug: fm.get_non_blank("slug").unwrap_or_else(|| file_slug.to_string()),
            excerpt: fm.get_string("excerpt").unwrap_or_default(),
            client: fm.get_string("client").unwrap_or_else(|| UNDISCLOSED_CLIENT.to_string()),
            industry: fm.get_string("industry").unwrap_or_default(),
            date: fm.get_string("date").unwrap_or_default(),
            tags: fm.get_string_list("tags"),
            results: Self::results(fm),
            architecture: fm.get_string_list("architecture"),
        }
    }

    fn results(fm: &Frontmatter) -> Vec<CaseStudyResult> {
        let Some(seq) = fm.get_sequence("results") else {
            return vec![];
        };

        seq.iter()
            .filter(|item| item.is_mapping())
            .map(|item| CaseStudyResult {
                metric: Self::field(item, "metric"),
                outcome: Self::field(item, "outcome"),
            })
            .collect()
    }

    fn field(item: &Value, key: &str) -> String {
        item.get(key).and_then(scalar_to_string).unwrap_or_default()
    }
}

pub struct CaseStudies;

impl ContentKind for CaseStudies {
    type Meta = CaseStudyMeta;
    type Item = CaseStudy;

    const NAME: &'static str = "case-studies";

    fn normalize(fm: &Frontmatter, file_slug: &str, _body: &str) -> CaseStudyMeta {
        CaseStudyMeta::from_frontmatter(fm, file_slug)
    }

    fn slug(meta: &CaseStudyMeta) -> &str {
        &meta.slug
    }

    fn date(meta: &CaseStudyMeta) -> &str {
        &meta.date
    }

    fn with_html(meta: CaseStudyMeta, content_html: String) -> CaseStudy {
        CaseStudy { meta, content_html }
    }
}
