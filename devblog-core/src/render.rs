//! View models for the post feed.
//!
//! The browser layer turns these into markup; everything that decides *what*
//! is shown (defaults, truncation, read-more outcome, link validity) lives here.

use crate::models::{Post, PostId};

pub const FEED_HEADING: &str = "Latest Posts";
pub const NO_POSTS_MESSAGE: &str = "No blog posts found.";
pub const ELLIPSIS: &str = "...";

/// Link values left over from the post template; treated as "no link".
pub const PLACEHOLDER_LINKS: [&str; 2] = ["https://yourlink.com", "yourlink.com"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub text: String,
    pub truncated: bool,
}

/// Cuts `content` down to `budget` words.
///
/// Content within budget is returned verbatim. Longer content becomes the
/// first `budget` words joined by single spaces, followed by [`ELLIPSIS`].
pub fn preview(content: &str, budget: usize) -> Preview {
    if !exceeds_budget(content, budget) {
        return Preview {
            text: content.to_string(),
            truncated: false,
        };
    }

    let mut text = content
        .split_whitespace()
        .take(budget)
        .collect::<Vec<_>>()
        .join(" ");
    text.push_str(ELLIPSIS);
    Preview {
        text,
        truncated: true,
    }
}

fn exceeds_budget(content: &str, budget: usize) -> bool {
    content.split_whitespace().nth(budget).is_some()
}

/// What follows the preview of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMore {
    /// Content was cut; open the detail view for this id.
    Button { id: Option<PostId> },
    /// Short content, but the post is marked as draft / coming soon.
    ComingSoon,
    /// The preview already shows everything.
    Nothing,
}

pub fn read_more(post: &Post, budget: usize) -> ReadMore {
    let content = post.display_content();
    if exceeds_budget(content, budget) {
        ReadMore::Button { id: post.id }
    } else if post.is_unpublished() {
        ReadMore::ComingSoon
    } else {
        ReadMore::Nothing
    }
}

/// External link of the post, if it is a real one.
pub fn link_target(post: &Post) -> Option<&str> {
    post.link
        .as_deref()
        .filter(|link| is_real_link(link))
}

pub fn is_real_link(link: &str) -> bool {
    !link.trim().is_empty() && !PLACEHOLDER_LINKS.contains(&link)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub id: Option<PostId>,
    pub title: String,
    pub date: String,
    pub author: Option<String>,
    pub preview: Preview,
    pub tags: Vec<String>,
    pub read_more: ReadMore,
    pub link: Option<String>,
}

impl PostCard {
    pub fn from_post(post: &Post, budget: usize) -> Self {
        Self {
            id: post.id,
            title: post.display_title().to_string(),
            date: post.display_date().to_string(),
            author: post.display_author().map(str::to_string),
            preview: preview(post.display_content(), budget),
            tags: post.tags.clone(),
            read_more: read_more(post, budget),
            link: link_target(post).map(str::to_string),
        }
    }
}

/// Full content of the feed container below its heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    Empty { message: &'static str },
    Posts(Vec<PostCard>),
}

impl Feed {
    pub fn heading(&self) -> &'static str {
        FEED_HEADING
    }

    pub fn cards(&self) -> &[PostCard] {
        match self {
            Feed::Empty { .. } => &[],
            Feed::Posts(cards) => cards,
        }
    }
}

/// Rebuilds the whole feed from the current posts.
pub fn render_feed(posts: &[Post], budget: usize) -> Feed {
    if posts.is_empty() {
        return Feed::Empty {
            message: NO_POSTS_MESSAGE,
        };
    }
    Feed::Posts(
        posts
            .iter()
            .map(|post| PostCard::from_post(post, budget))
            .collect(),
    )
}
