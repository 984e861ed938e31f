//! Blog post types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_AUTHOR: &str = "AI Assistant";
pub const DEFAULT_READ_TIME: i32 = 5;

/// A published (or draft) article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub author: String,
    pub featured: bool,
    pub published: bool,
    /// Estimated minutes to read
    pub read_time: i32,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Case-insensitive substring match over title, excerpt, content and tags.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.excerpt.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Blog post creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub read_time: Option<i32>,
    #[serde(default)]
    pub seo_title: Option<String>,
    #[serde(default)]
    pub seo_description: Option<String>,
}

impl NewBlogPost {
    /// Materialize the record, filling in column defaults.
    pub fn into_post(self, id: String, now: DateTime<Utc>) -> BlogPost {
        let seo_title = self.seo_title.unwrap_or_else(|| self.title.clone());
        let seo_description = self.seo_description.unwrap_or_else(|| self.excerpt.clone());

        BlogPost {
            id,
            title: self.title,
            slug: self.slug,
            excerpt: self.excerpt,
            content: self.content,
            category: self.category,
            tags: self.tags.unwrap_or_default(),
            author: self.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            featured: self.featured.unwrap_or(false),
            published: self.published.unwrap_or(true),
            read_time: self.read_time.unwrap_or(DEFAULT_READ_TIME),
            seo_title: Some(seo_title),
            seo_description: Some(seo_description),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a blog post; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub author: Option<String>,
    pub featured: Option<bool>,
    pub published: Option<bool>,
    pub read_time: Option<i32>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

impl BlogPostPatch {
    pub fn apply(self, post: &mut BlogPost, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(slug) = self.slug {
            post.slug = slug;
        }
        if let Some(excerpt) = self.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(category) = self.category {
            post.category = category;
        }
        if let Some(tags) = self.tags {
            post.tags = tags;
        }
        if let Some(author) = self.author {
            post.author = author;
        }
        if let Some(featured) = self.featured {
            post.featured = featured;
        }
        if let Some(published) = self.published {
            post.published = published;
        }
        if let Some(read_time) = self.read_time {
            post.read_time = read_time;
        }
        if self.seo_title.is_some() {
            post.seo_title = self.seo_title;
        }
        if self.seo_description.is_some() {
            post.seo_description = self.seo_description;
        }
        post.updated_at = now;
    }
}

/// Body of `POST /api/ai/generate-blog`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateBlogRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub category: String,
}

/// Article returned by the generative model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedBlogContent {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub tags: Vec<String>,
}
