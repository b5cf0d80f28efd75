//! Card rendering for a single article.
//!
//! [`Card::from_article`] is a pure mapping with no error conditions of its
//! own; [`Card::to_markdown`] lays the card out as a Markdown block.

use crate::models::Article;
use crate::utils::short_date;
use std::fmt::Write;

/// Shown in place of a missing author.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

/// Outbound link opened in a new browsing context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub target: &'static str,
    pub rel: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Omitted entirely when the article has no image.
    pub image: Option<Image>,
    pub title: String,
    pub description: String,
    pub author: String,
    pub source: String,
    /// Publish date, date portion only.
    pub published: String,
    pub link: Link,
}

impl Card {
    pub fn from_article(article: &Article) -> Self {
        Self {
            image: article.image().map(|src| Image {
                src: src.to_string(),
                alt: article.title.clone(),
            }),
            title: article.title.clone(),
            description: article.description.clone().unwrap_or_default(),
            author: article.author().unwrap_or(UNKNOWN_AUTHOR).to_string(),
            source: article.source.name.clone(),
            published: short_date(&article.published_at),
            link: Link {
                href: article.url.clone(),
                target: "_blank",
                rel: "noopener noreferrer",
            },
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        if let Some(image) = &self.image {
            writeln!(md, "![{}]({})\n", image.alt, image.src).unwrap();
        }
        writeln!(md, "### {}\n", self.title).unwrap();
        if !self.description.is_empty() {
            writeln!(md, "{}\n", self.description).unwrap();
        }
        writeln!(
            md,
            "<small>Author: {}</small> · <small>Source: {}</small>\n",
            self.author, self.source
        ).unwrap();
        writeln!(md, "<small>Published: {}</small>\n", self.published).unwrap();
        writeln!(
            md,
            "<a href=\"{}\" target=\"{}\" rel=\"{}\">Read more</a>",
            self.link.href, self.link.target, self.link.rel
        ).unwrap();
        md
    }
}

/// Render one article as a Markdown card.
pub fn render_card(article: &Article) -> String {
    Card::from_article(article).to_markdown()
}
