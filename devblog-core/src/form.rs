use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::models::Post;
use crate::store::{IdGenerator, PostStore};

/// Manual steps shown after a submission, since nothing is saved server-side.
pub const SAVE_INSTRUCTIONS: [&str; 4] = [
    "Copy the JSON below.",
    "Open blog-entries.json in the devBlogData repository and click the edit (pencil) button.",
    "Paste the JSON as the first entry of the array and add a comma after it.",
    "Commit the change. The post shows up for everyone on the next page load.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Author,
    Content,
    Tags,
    Link,
}

impl Field {
    pub const REQUIRED: [Field; 3] = [Field::Title, Field::Author, Field::Content];

    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Author => "Author",
            Field::Content => "Content",
            Field::Tags => "Tags",
            Field::Link => "Link",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw values of the add-post form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub author: String,
    pub content: String,
    pub tags: String,
    pub link: String,
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub post: Post,
    pub json: String,
    pub instructions: &'static [&'static str],
}

impl PostForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Content => &self.content,
            Field::Tags => &self.tags,
            Field::Link => &self.link,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Author => &mut self.author,
            Field::Content => &mut self.content,
            Field::Tags => &mut self.tags,
            Field::Link => &mut self.link,
        };
        *slot = value;
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match Field::REQUIRED
            .into_iter()
            .find(|field| self.value(*field).trim().is_empty())
        {
            Some(field) => Err(ValidationError::MissingField(field)),
            None => Ok(()),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validates, prepends the new post to `store` and resets the form.
    ///
    /// On a validation error neither the store nor the form is touched.
    pub fn submit(
        &mut self,
        store: &mut PostStore,
        ids: &mut IdGenerator,
        now: DateTime<Utc>,
    ) -> Result<Submission, ValidationError> {
        self.validate()?;

        let link = self.link.trim();
        let post = Post {
            id: Some(ids.next_id(now)),
            title: Some(self.title.trim().to_string()),
            author: Some(self.author.trim().to_string()),
            date: Some(now.format("%Y-%m-%d").to_string()),
            content: Some(self.content.trim().to_string()),
            tags: parse_tags(&self.tags),
            link: (!link.is_empty()).then(|| link.to_string()),
            status: None,
            coming_soon: None,
        };

        let json = serde_json::to_string_pretty(&post).unwrap_or_else(|e| {
            log::error!("Failed to serialize new post: {}", e);
            String::new()
        });
        log::info!("New post {:?} added locally", post.title);

        store.prepend(post.clone());
        self.clear();

        Ok(Submission {
            post,
            json,
            instructions: &SAVE_INSTRUCTIONS,
        })
    }
}

/// Splits a comma separated tag list, dropping blank entries.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostId;
    use crate::render::render_feed;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 23, 30, 0).unwrap()
    }

    fn filled() -> PostForm {
        PostForm {
            title: " My post ".into(),
            author: "Sam".into(),
            content: "Body text".into(),
            tags: "rust, ,wasm,, yew ".into(),
            link: "  ".into(),
        }
    }

    fn existing_store() -> PostStore {
        PostStore::from_posts(vec![Post {
            id: Some(PostId::new(1)),
            title: Some("Older".into()),
            ..Post::default()
        }])
    }

    #[test]
    fn tags_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(parse_tags("rust, ,wasm,, yew "), ["rust", "wasm", "yew"]);
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn empty_title_is_rejected_without_touching_store() {
        let mut store = existing_store();
        let before = store.clone();
        let mut form = PostForm {
            title: "   ".into(),
            ..filled()
        };
        let snapshot = form.clone();

        let err = form
            .submit(&mut store, &mut IdGenerator::new(), now())
            .unwrap_err();

        assert_eq!(err, ValidationError::MissingField(Field::Title));
        assert_eq!(err.to_string(), "Title is required");
        assert_eq!(store, before);
        assert_eq!(form, snapshot);
    }

    #[test]
    fn first_missing_field_is_reported() {
        let form = PostForm {
            author: String::new(),
            content: String::new(),
            ..filled()
        };
        assert_eq!(form.validate().unwrap_err().field(), Field::Author);

        let form = PostForm {
            content: "\n\t".into(),
            ..filled()
        };
        assert_eq!(form.validate().unwrap_err().field(), Field::Content);
    }

    #[test]
    fn valid_submission_prepends_and_clears_form() {
        let mut store = existing_store();
        let mut ids = IdGenerator::seeded_from(&store);
        let mut form = filled();

        let submission = form.submit(&mut store, &mut ids, now()).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.posts()[0], submission.post);
        assert_eq!(form, PostForm::default());

        let post = &submission.post;
        assert_eq!(post.title.as_deref(), Some("My post"));
        assert_eq!(post.date.as_deref(), Some("2024-03-09"));
        assert_eq!(post.tags, ["rust", "wasm", "yew"]);
        assert_eq!(post.link, None);
        assert_eq!(post.id.map(PostId::get), Some(now().timestamp_millis()));

        let feed = render_feed(store.posts(), 30);
        assert_eq!(feed.cards()[0].title, "My post");
    }

    #[test]
    fn submission_json_round_trips_the_post() {
        let mut store = PostStore::new();
        let submission = filled()
            .submit(&mut store, &mut IdGenerator::new(), now())
            .unwrap();

        let parsed: Post = serde_json::from_str(&submission.json).unwrap();
        assert_eq!(parsed, submission.post);
        assert_eq!(submission.instructions.len(), SAVE_INSTRUCTIONS.len());
    }

    #[test]
    fn scheme_less_link_is_stored_as_typed() {
        let mut store = PostStore::new();
        let mut form = PostForm {
            link: " yourlink.com ".into(),
            ..filled()
        };

        let submission = form
            .submit(&mut store, &mut IdGenerator::new(), now())
            .unwrap();

        assert_eq!(submission.post.link.as_deref(), Some("yourlink.com"));
        let feed = render_feed(store.posts(), 30);
        assert_eq!(feed.cards()[0].link, None);

        let mut form = PostForm {
            link: "example.com/notes".into(),
            ..filled()
        };
        let submission = form
            .submit(&mut store, &mut IdGenerator::new(), now())
            .unwrap();
        assert_eq!(submission.post.link.as_deref(), Some("example.com/notes"));
    }

    #[test]
    fn rapid_submissions_get_distinct_ids() {
        let mut store = PostStore::new();
        let mut ids = IdGenerator::new();

        let a = filled().submit(&mut store, &mut ids, now()).unwrap();
        let b = filled().submit(&mut store, &mut ids, now()).unwrap();

        assert_ne!(a.post.id, b.post.id);
        assert_eq!(store.posts()[0].id, b.post.id);
    }
}
