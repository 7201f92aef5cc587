use chrono::{DateTime, Utc};

use crate::config::BlogConfig;
use crate::detail::{detail_for, DetailView};
use crate::error::ValidationError;
use crate::form::{PostForm, Submission};
use crate::loader::{LoadFailure, LoadOutcome, Origin};
use crate::notice::Notice;
use crate::render::{render_feed, Feed};
use crate::store::{IdGenerator, PostStore};

/// Page-session state: the posts, the id generator, the add-post form and
/// the outcome of the initial load.
#[derive(Debug, Clone)]
pub struct Session {
    config: BlogConfig,
    store: PostStore,
    ids: IdGenerator,
    pub form: PostForm,
    loading: bool,
    load_failure: Option<LoadFailure>,
}

impl Session {
    pub fn new(config: BlogConfig) -> Self {
        Self {
            config,
            store: PostStore::new(),
            ids: IdGenerator::new(),
            form: PostForm::default(),
            loading: true,
            load_failure: None,
        }
    }

    pub fn config(&self) -> &BlogConfig {
        &self.config
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn load_failure(&self) -> Option<&LoadFailure> {
        self.load_failure.as_ref()
    }

    /// Takes in the loader result. Posts submitted while the fetch was in
    /// flight stay at the front; returns the notice to show, if any.
    pub fn apply_load(&mut self, outcome: LoadOutcome) -> Option<Notice> {
        self.store.populate(outcome.posts);
        self.ids.observe(&self.store);
        if let Origin::Failed(failure) = outcome.origin {
            self.load_failure = Some(failure);
        }
        self.loading = false;
        outcome.notice
    }

    /// Submits the form. A successful post replaces the load error panel,
    /// since the feed now has something to show.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<Submission, ValidationError> {
        let submission = self.form.submit(&mut self.store, &mut self.ids, now)?;
        self.load_failure = None;
        Ok(submission)
    }

    pub fn feed(&self) -> Feed {
        render_feed(self.store.posts(), self.config.preview_words)
    }

    pub fn detail(&self, raw_id: &str) -> DetailView {
        detail_for(&self.store, raw_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FallbackPolicy;
    use crate::error::LoadError;
    use crate::loader::{load, sample_posts, PostSource};
    use async_trait::async_trait;
    use chrono::TimeZone;

    struct Failing;

    #[async_trait(?Send)]
    impl PostSource for Failing {
        async fn fetch_text(&self) -> Result<String, LoadError> {
            Err(LoadError::Http(500))
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
    }

    fn fill(session: &mut Session, title: &str) {
        session.form = PostForm {
            title: title.into(),
            author: "Kim".into(),
            content: "Written before the feed arrived".into(),
            ..PostForm::default()
        };
    }

    #[test]
    fn post_submitted_before_load_survives_it() {
        let mut session = Session::new(BlogConfig::default());
        fill(&mut session, "Early bird");
        let submission = session.submit(now()).unwrap();
        let early_id = submission.post.id.unwrap();

        let notice = session.apply_load(LoadOutcome {
            posts: sample_posts(),
            origin: Origin::Remote,
            notice: None,
        });

        assert!(notice.is_none());
        assert!(!session.is_loading());
        assert_eq!(session.store().len(), sample_posts().len() + 1);
        assert_eq!(session.feed().cards()[0].title, "Early bird");
        assert!(matches!(
            session.detail(&early_id.to_string()),
            DetailView::Found(_)
        ));

        fill(&mut session, "Second");
        let next = session.submit(now()).unwrap();
        assert!(next.post.id.unwrap() > early_id);
    }

    #[tokio::test]
    async fn submission_clears_error_panel() {
        let config = BlogConfig {
            fallback: FallbackPolicy::ErrorPanel,
            ..BlogConfig::default()
        };
        let outcome = load(&Failing, &config).await;
        let mut session = Session::new(config);
        session.apply_load(outcome);
        assert!(session.load_failure().is_some());

        fill(&mut session, "Fresh");
        session.submit(now()).unwrap();

        assert!(session.load_failure().is_none());
        assert_eq!(session.feed().cards()[0].title, "Fresh");
    }

    #[tokio::test]
    async fn rejected_submission_keeps_error_panel() {
        let config = BlogConfig {
            fallback: FallbackPolicy::ErrorPanel,
            ..BlogConfig::default()
        };
        let mut session = Session::new(config.clone());
        session.apply_load(load(&Failing, &config).await);

        assert!(session.submit(now()).is_err());
        assert!(session.load_failure().is_some());
        assert!(session.store().is_empty());
    }

    #[tokio::test]
    async fn failed_load_notifies_exactly_once() {
        let config = BlogConfig::default();
        let mut session = Session::new(config.clone());
        let notices: Vec<_> = session
            .apply_load(load(&Failing, &config).await)
            .into_iter()
            .collect();

        assert_eq!(notices.len(), 1);
        assert_eq!(session.feed().cards().len(), sample_posts().len());
    }
}
