use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use spdlog::{debug, warn};

use crate::content::blog::Blog;
use crate::content::case_study::CaseStudies;
use crate::content::content_file::{retrieve_files, ContentFile};
use crate::content::frontmatter::{split_frontmatter, Frontmatter};
use crate::content::markdown_renderer::render_markdown;
use crate::content::{ContentError, ContentResult};
use crate::text_utils::{is_url_safe_slug, parse_content_date};

/// A content kind: its field schema and how its records are assembled.
pub trait ContentKind {
    /// Frontmatter-only record, used by listings.
    type Meta: Clone;
    /// Record with the rendered body, used by detail pages.
    type Item;

    const NAME: &'static str;

    fn normalize(fm: &Frontmatter, file_slug: &str, body: &str) -> Self::Meta;
    fn slug(meta: &Self::Meta) -> &str;
    fn date(meta: &Self::Meta) -> &str;
    fn with_html(meta: Self::Meta, content_html: String) -> Self::Item;
}

struct Entry<K: ContentKind> {
    meta: K::Meta,
    file: ContentFile,
    body_start: usize,
}

impl<K: ContentKind> Entry<K> {
    fn body(&self) -> &str {
        &self.file.raw_content[self.body_start..]
    }
}

/// Read-only view over one directory of markdown files.
///
/// Every call re-reads the directory; nothing is cached between calls.
pub struct ContentRepository<K: ContentKind> {
    root_dir: PathBuf,
    kind: PhantomData<K>,
}

pub type BlogRepository = ContentRepository<Blog>;
pub type CaseStudyRepository = ContentRepository<CaseStudies>;

impl<K: ContentKind> ContentRepository<K> {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        ContentRepository {
            root_dir: root_dir.into(),
            kind: PhantomData,
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn load_entries(&self) -> ContentResult<Vec<Entry<K>>> {
        let files = retrieve_files(&self.root_dir)?;
        let mut entries = Vec::with_capacity(files.len());

        for file_path in files {
            let file = ContentFile::from_file(file_path)?;
            let (meta, body_start) = {
                let (fm, body) = split_frontmatter(&file.raw_content).map_err(|reason| ContentError::Frontmatter {
                    path: file.file_path.clone(),
                    reason,
                })?;
                let body_start = file.raw_content.len() - body.len();
                (K::normalize(&fm, &file.file_slug, body), body_start)
            };
            let slug = K::slug(&meta);
            if !is_url_safe_slug(slug) {
                return Err(ContentError::Frontmatter {
                    path: file.file_path.clone(),
                    reason: format!("slug {:?} is not URL safe", slug),
                });
            }
            entries.push(Entry { meta, file, body_start });
        }

        debug!("Loaded {} {} entries from {}", entries.len(), K::NAME, self.root_dir.display());
        Ok(entries)
    }

    fn slug_counts(entries: &[Entry<K>]) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for entry in entries {
            *counts.entry(K::slug(&entry.meta)).or_insert(0) += 1;
        }
        counts
    }

    /// Every item's frontmatter, newest first. Items without a valid date
    /// come last, in file name order.
    pub fn list(&self) -> ContentResult<Vec<K::Meta>> {
        let mut metas: Vec<K::Meta> = self.load_entries()?.into_iter().map(|e| e.meta).collect();
        metas.sort_by(|a, b| compare_dates_desc(K::date(a), K::date(b)));
        Ok(metas)
    }

    /// The item whose effective slug is `slug`, with its body rendered.
    ///
    /// `Ok(None)` when no file carries the slug, or when more than one does.
    pub fn get(&self, slug: &str) -> ContentResult<Option<K::Item>> {
        let entries = self.load_entries()?;
        let mut matches: Vec<Entry<K>> = entries.into_iter().filter(|e| K::slug(&e.meta) == slug).collect();

        if matches.len() > 1 {
            let files: Vec<_> = matches.iter().map(|e| e.file.file_path.display().to_string()).collect();
            warn!("Slug {} is claimed by several {} files, refusing to serve it: {}", slug, K::NAME, files.join(", "));
            return Ok(None);
        }

        let Some(entry) = matches.pop() else {
            return Ok(None);
        };

        let content_html = render_markdown(entry.body()).map_err(|reason| ContentError::Markdown {
            path: entry.file.file_path.clone(),
            reason,
        })?;

        Ok(Some(K::with_html(entry.meta, content_html)))
    }

    /// Slugs of every item resolvable by [`Self::get`], in file name order.
    pub fn paths(&self) -> ContentResult<Vec<String>> {
        let entries = self.load_entries()?;
        let counts = Self::slug_counts(&entries);

        let mut slugs = vec![];
        let mut reported = BTreeSet::new();
        for entry in entries.iter() {
            let slug = K::slug(&entry.meta);
            if counts.get(slug).copied().unwrap_or(0) > 1 {
                if reported.insert(slug) {
                    warn!("Skipping {} slug {}: it is used by more than one file", K::NAME, slug);
                }
                continue;
            }
            slugs.push(slug.to_string());
        }

        Ok(slugs)
    }
}

impl BlogRepository {
    /// Every distinct tag across all posts, sorted alphabetically.
    pub fn tags(&self) -> ContentResult<Vec<String>> {
        let tags: BTreeSet<String> = self.list()?.into_iter().flat_map(|meta| meta.tags).collect();
        Ok(tags.into_iter().collect())
    }
}

fn compare_dates_desc(a: &str, b: &str) -> Ordering {
    match (parse_content_date(a), parse_content_date(b)) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
