use async_trait::async_trait;
use serde_json::Value;

use crate::config::{BlogConfig, FallbackPolicy};
use crate::error::LoadError;
use crate::models::{Post, PostId};
use crate::notice::Notice;

/// Hints shown in the inline error panel; the data file is edited by hand.
pub const JSON_AUTHORING_HINTS: [&str; 3] = [
    "Missing commas between objects",
    "Line breaks in the middle of strings",
    "Unclosed quotes or brackets",
];

/// Where the raw posts document comes from.
#[async_trait(?Send)]
pub trait PostSource {
    async fn fetch_text(&self) -> Result<String, LoadError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub message: String,
    pub hints: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Remote,
    Sample,
    Failed(LoadFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub posts: Vec<Post>,
    pub origin: Origin,
    pub notice: Option<Notice>,
}

/// Decodes the posts document.
///
/// Only malformed JSON is an error. A well-formed document that is not an
/// array has no posts. Array elements that are not objects are skipped;
/// unusable fields inside a post fall back to their defaults.
pub fn parse_posts(text: &str) -> Result<Vec<Post>, LoadError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(items) = value else {
        log::warn!("Posts document is not a JSON array, showing no posts");
        return Ok(Vec::new());
    };

    let total = items.len();
    let posts: Vec<Post> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Post>(item) {
            Ok(post) => Some(post),
            Err(e) => {
                log::warn!("Skipping post #{}: {}", index, e);
                None
            }
        })
        .collect();

    if posts.len() < total {
        log::warn!("Loaded {} of {} posts", posts.len(), total);
    }
    Ok(posts)
}

/// Fetches and parses once; every failure goes down the configured fallback.
pub async fn load<S: PostSource + ?Sized>(source: &S, config: &BlogConfig) -> LoadOutcome {
    let result = match source.fetch_text().await {
        Ok(text) => {
            log::debug!("Raw JSON response: {}", text);
            parse_posts(&text)
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(posts) => {
            log::info!("Loaded {} posts from {}", posts.len(), config.data_url);
            LoadOutcome {
                posts,
                origin: Origin::Remote,
                notice: None,
            }
        }
        Err(e) => {
            log::error!("Error fetching blog posts: {}", e);
            fallback(e, config.fallback)
        }
    }
}

fn fallback(error: LoadError, policy: FallbackPolicy) -> LoadOutcome {
    match policy {
        FallbackPolicy::SampleData => LoadOutcome {
            posts: sample_posts(),
            origin: Origin::Sample,
            notice: Some(Notice::warning(
                "Showing sample posts",
                format!("Could not load the blog data ({error}). Sample posts are shown instead."),
            )),
        },
        FallbackPolicy::ErrorPanel => LoadOutcome {
            posts: Vec::new(),
            origin: Origin::Failed(LoadFailure {
                message: error.to_string(),
                hints: &JSON_AUTHORING_HINTS,
            }),
            notice: None,
        },
    }
}

fn sample(id: i64, title: &str, date: &str, content: &str, tags: &[&str]) -> Post {
    Post {
        id: Some(PostId::new(id)),
        title: Some(title.to_string()),
        author: Some("Dev Blog".to_string()),
        date: Some(date.to_string()),
        content: Some(content.to_string()),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..Post::default()
    }
}

/// Built-in posts used when the remote data is unavailable.
pub fn sample_posts() -> Vec<Post> {
    vec![
        sample(
            1,
            "Welcome to the Dev Blog",
            "2024-01-15",
            "This blog collects notes from day to day development work: small wins, \
             dead ends, tools that turned out to be worth learning and a few that were not. \
             Posts are kept in a plain JSON file so anyone can add one with nothing more than \
             a text editor, which keeps the whole thing easy to run and easy to move somewhere else.",
            &["welcome", "meta"],
        ),
        Post {
            link: Some("https://developer.mozilla.org/en-US/docs/Web/API/Fetch_API".to_string()),
            ..sample(
                2,
                "Fetching JSON in the browser",
                "2024-02-02",
                "A short note on loading a static JSON file and what to do when it fails.",
                &["javascript", "fetch"],
            )
        },
        Post {
            status: Some("coming-soon".to_string()),
            ..sample(
                3,
                "Rewriting the front-end",
                "2024-03-01",
                "Draft notes, full article coming soon.",
                &["rust", "wasm"],
            )
        },
        Post {
            id: Some(PostId::new(4)),
            title: Some("Quick tip".to_string()),
            content: Some("Validate your JSON before you commit it.".to_string()),
            ..Post::default()
        },
    ]
}
