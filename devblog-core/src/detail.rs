use crate::models::{Post, PostId};
use crate::store::PostStore;

pub const NOT_FOUND_TITLE: &str = "Post not found";

/// Untruncated post shown in the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetail {
    pub id: PostId,
    pub title: String,
    pub date: String,
    pub author: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    Found(PostDetail),
    NotFound { requested: String },
}

impl DetailView {
    pub fn title(&self) -> &str {
        match self {
            DetailView::Found(detail) => &detail.title,
            DetailView::NotFound { .. } => NOT_FOUND_TITLE,
        }
    }
}

impl PostDetail {
    fn new(id: PostId, post: &Post) -> Self {
        Self {
            id,
            title: post.display_title().to_string(),
            date: post.display_date().to_string(),
            author: post.display_author().map(str::to_string),
            content: post.display_content().to_string(),
            tags: post.tags.clone(),
            link: crate::render::link_target(post).map(str::to_string),
        }
    }
}

pub fn detail_by_id(store: &PostStore, id: PostId) -> DetailView {
    match store.find(id) {
        Some(post) => DetailView::Found(PostDetail::new(id, post)),
        None => {
            log::warn!("Post {} requested but not in store", id);
            DetailView::NotFound {
                requested: id.to_string(),
            }
        }
    }
}

/// Looks up a post from an id taken off the URL.
pub fn detail_for(store: &PostStore, raw_id: &str) -> DetailView {
    match raw_id.parse::<PostId>() {
        Ok(id) => detail_by_id(store, id),
        Err(e) => {
            log::warn!("{}", e);
            DetailView::NotFound {
                requested: raw_id.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> PostStore {
        PostStore::from_posts(vec![Post {
            id: Some(PostId::new(42)),
            title: Some("Deep dive".into()),
            content: Some("one two three four five".into()),
            link: Some("https://yourlink.com".into()),
            ..Post::default()
        }])
    }

    #[test]
    fn string_id_matches_numeric_id() {
        match detail_for(&store(), " 42") {
            DetailView::Found(detail) => {
                assert_eq!(detail.title, "Deep dive");
                assert_eq!(detail.content, "one two three four five");
                assert_eq!(detail.link, None);
            }
            other => panic!("expected post, got {other:?}"),
        }
    }

    #[test]
    fn missing_id_renders_not_found() {
        let view = detail_for(&store(), "7");
        assert_eq!(
            view,
            DetailView::NotFound {
                requested: "7".into()
            }
        );
        assert_eq!(view.title(), NOT_FOUND_TITLE);
    }

    #[test]
    fn garbage_id_renders_not_found() {
        assert!(matches!(
            detail_for(&store(), "abc"),
            DetailView::NotFound { .. }
        ));
        assert!(matches!(
            detail_for(&PostStore::new(), ""),
            DetailView::NotFound { .. }
        ));
    }
}
