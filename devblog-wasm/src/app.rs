use crate::api::HttpSource;
use crate::clipboard::{alert_manual_copy, BrowserClipboard};
use crate::config::page_config;
use chrono::Utc;
use devblog_core::clipboard::{copy_text, CopyButton, CopyMethod};
use devblog_core::detail::{DetailView, PostDetail};
use devblog_core::form::{Field, Submission};
use devblog_core::loader::{self, LoadFailure, LoadOutcome};
use devblog_core::render::{Feed, PostCard, ReadMore};
use devblog_core::{ClipboardError, Notice, PostId, Session};
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;
use yew_router::scope_ext::LocationHandle;

#[derive(Debug, Clone, PartialEq, Routable)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/post/:id")]
    Post { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub enum Msg {
    // Loading
    PostsLoaded(LoadOutcome),

    // Add-post form
    UpdateField(Field, String),
    Submit,
    CloseSaveDialog,
    CopyJson,
    CopyFinished(Result<CopyMethod, ClipboardError>),
    ResetCopyButton,

    // Detail view
    OpenDetail(PostId),
    CloseDetail,
    RouteChanged,

    // Toasts
    DismissToast(u32),
}

struct Toast {
    id: u32,
    notice: Notice,
}

#[function_component(Root)]
pub fn root() -> Html {
    html! {
        <HashRouter>
            <App />
        </HashRouter>
    }
}

pub struct App {
    // Posts, form and load state
    session: Session,

    // Save dialog
    saved: Option<Submission>,
    copy_button: CopyButton,

    // UI state
    toasts: Vec<Toast>,
    next_toast_id: u32,
    _location: Option<LocationHandle>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = page_config();

        let source = HttpSource::new(&config);
        let load_config = config.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let outcome = loader::load(&source, &load_config).await;
            link.send_message(Msg::PostsLoaded(outcome));
        });

        let location = ctx
            .link()
            .add_location_listener(ctx.link().callback(|_| Msg::RouteChanged));

        Self {
            session: Session::new(config),
            saved: None,
            copy_button: CopyButton::Idle,
            toasts: Vec::new(),
            next_toast_id: 0,
            _location: location,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::PostsLoaded(outcome) => {
                if let Some(notice) = self.session.apply_load(outcome) {
                    self.push_toast(ctx, notice);
                }
                true
            }

            Msg::UpdateField(field, value) => {
                self.session.form.set(field, value);
                true
            }

            Msg::Submit => {
                match self.session.submit(Utc::now()) {
                    Ok(submission) => {
                        self.push_toast(
                            ctx,
                            Notice::success(
                                "Post added",
                                "The post is only visible in this session until you add it to the data file.",
                            ),
                        );
                        self.saved = Some(submission);
                        self.copy_button = CopyButton::Idle;
                    }
                    Err(e) => {
                        log::warn!("Post rejected: {}", e);
                        self.push_toast(ctx, Notice::error("Missing field", e.to_string()));
                    }
                }
                true
            }

            Msg::CloseSaveDialog => {
                self.saved = None;
                true
            }

            Msg::CopyJson => {
                if let Some(saved) = &self.saved {
                    let json = saved.json.clone();
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        let result = copy_text(&BrowserClipboard, &json).await;
                        link.send_message(Msg::CopyFinished(result));
                    });
                }
                false
            }

            Msg::CopyFinished(result) => {
                if result.is_err() {
                    alert_manual_copy();
                }
                let feedback_ms = self.session.config().copy_feedback_ms;
                let (state, revert_after) = CopyButton::after_copy(&result, feedback_ms);
                self.copy_button = state;
                if let Some(delay_ms) = revert_after {
                    let link = ctx.link().clone();
                    Timeout::new(delay_ms, move || {
                        link.send_message(Msg::ResetCopyButton)
                    })
                    .forget();
                }
                true
            }

            Msg::ResetCopyButton => {
                self.copy_button = CopyButton::Idle;
                true
            }

            Msg::OpenDetail(id) => {
                if let Some(navigator) = ctx.link().navigator() {
                    navigator.push(&Route::Post { id: id.to_string() });
                }
                false
            }

            Msg::CloseDetail => {
                if let Some(navigator) = ctx.link().navigator() {
                    navigator.push(&Route::Home);
                }
                false
            }

            Msg::RouteChanged => true,

            Msg::DismissToast(id) => {
                self.toasts.retain(|t| t.id != id);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container py-4">
                <header class="mb-4">
                    <h1>{ "Dev Blog" }</h1>
                </header>

                { self.view_toasts(ctx) }

                <div class="row">
                    <div class="col-lg-8">
                        { self.view_feed(ctx) }
                    </div>
                    <div class="col-lg-4">
                        { self.view_form(ctx) }
                    </div>
                </div>

                { self.view_detail_modal(ctx) }
                { self.view_save_modal(ctx) }
            </div>
        }
    }
}

impl App {
    fn push_toast(&mut self, ctx: &Context<Self>, notice: Notice) {
        let id = self.next_toast_id;
        self.next_toast_id = self.next_toast_id.wrapping_add(1);
        self.toasts.push(Toast { id, notice });

        let link = ctx.link().clone();
        Timeout::new(self.session.config().toast_duration_ms, move || {
            link.send_message(Msg::DismissToast(id))
        })
        .forget();
    }

    fn view_toasts(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="toast-stack position-fixed top-0 end-0 p-3">
                { for self.toasts.iter().map(|toast| {
                    let id = toast.id;
                    let class = classes!("toast", "show", toast.notice.severity.css_class());
                    html! {
                        <div class={class} role="status">
                            <div class="toast-header">
                                <strong class="me-auto">{ &toast.notice.title }</strong>
                                <button
                                    type="button"
                                    class="btn-close"
                                    onclick={ctx.link().callback(move |_| Msg::DismissToast(id))}
                                />
                            </div>
                            <div class="toast-body">{ &toast.notice.message }</div>
                        </div>
                    }
                }) }
            </div>
        }
    }

    fn view_feed(&self, ctx: &Context<Self>) -> Html {
        let feed = self.session.feed();

        let body = if self.session.is_loading() && self.session.store().is_empty() {
            html! { <p class="text-muted">{ "Loading posts..." }</p> }
        } else if let Some(failure) = self.session.load_failure() {
            self.view_load_failure(failure)
        } else {
            match &feed {
                Feed::Empty { message } => html! { <p class="text-info">{ *message }</p> },
                Feed::Posts(cards) => html! {
                    <>{ for cards.iter().map(|card| self.view_card(card, ctx)) }</>
                },
            }
        };

        html! {
            <section id="post-list">
                <h2>{ feed.heading() }</h2>
                { body }
            </section>
        }
    }

    fn view_load_failure(&self, failure: &LoadFailure) -> Html {
        html! {
            <div class="alert alert-danger">
                <h4>{ "Failed to load blog posts" }</h4>
                <p><strong>{ "Error: " }</strong>{ &failure.message }</p>
                <p>
                    <strong>{ "Suggestion: " }</strong>
                    { "Check the JSON file for syntax errors. Common issues:" }
                </p>
                <ul>
                    { for failure.hints.iter().map(|hint| html! { <li>{ *hint }</li> }) }
                </ul>
            </div>
        }
    }

    fn view_card(&self, card: &PostCard, ctx: &Context<Self>) -> Html {
        let author = match &card.author {
            Some(author) => html! {
                <>
                    <span class="mx-2">{ "•" }</span>
                    <i class="bi bi-person"></i>{ " " }{ author }
                </>
            },
            None => html! {},
        };

        html! {
            <div class="post p-3 mb-4 border rounded bg-white shadow-sm">
                <h3>{ &card.title }</h3>
                <div class="mb-2">
                    <small class="text-muted">
                        <i class="bi bi-calendar3"></i>{ " " }{ &card.date }
                        { author }
                    </small>
                </div>
                <p>{ &card.preview.text }</p>
                { view_tags(&card.tags) }
                <div class="d-flex gap-2 align-items-center">
                    { self.view_read_more(card.read_more, ctx) }
                    { view_link(card.link.as_deref()) }
                </div>
            </div>
        }
    }

    fn view_read_more(&self, read_more: ReadMore, ctx: &Context<Self>) -> Html {
        match read_more {
            ReadMore::Button { id: Some(id) } => html! {
                <button
                    type="button"
                    class="btn btn-sm btn-primary"
                    onclick={ctx.link().callback(move |_| Msg::OpenDetail(id))}
                >
                    <i class="bi bi-book"></i>{ " Read more" }
                </button>
            },
            ReadMore::Button { id: None } => html! {
                <button type="button" class="btn btn-sm btn-primary" disabled=true
                    title="This post has no id, so it cannot be opened">
                    { "Read more" }
                </button>
            },
            ReadMore::ComingSoon => html! {
                <small class="text-muted">
                    <i class="bi bi-info-circle"></i>{ " Full article coming soon" }
                </small>
            },
            ReadMore::Nothing => html! {},
        }
    }

    fn view_form(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <section class="card p-3">
                <h2 class="h4">{ "Add a Post" }</h2>
                <form id="new-post-form" {onsubmit}>
                    { self.view_input(ctx, Field::Title, "text") }
                    { self.view_input(ctx, Field::Author, "text") }
                    <div class="mb-3">
                        <label class="form-label" for="content">{ Field::Content.label() }</label>
                        <textarea
                            id="content"
                            class="form-control"
                            rows="6"
                            value={self.session.form.content.clone()}
                            oninput={ctx.link().callback(|e: InputEvent| {
                                let input: HtmlTextAreaElement = e.target_unchecked_into();
                                Msg::UpdateField(Field::Content, input.value())
                            })}
                        />
                    </div>
                    { self.view_input(ctx, Field::Tags, "text") }
                    { self.view_input(ctx, Field::Link, "text") }
                    <button type="submit" class="btn btn-success">{ "Add Post" }</button>
                </form>
            </section>
        }
    }

    fn view_input(&self, ctx: &Context<Self>, field: Field, kind: &'static str) -> Html {
        let id = field.label().to_lowercase();
        let placeholder = match field {
            Field::Tags => "rust, wasm, notes",
            Field::Link => "https://",
            _ => "",
        };

        html! {
            <div class="mb-3">
                <label class="form-label" for={id.clone()}>{ field.label() }</label>
                <input
                    id={id}
                    type={kind}
                    class="form-control"
                    {placeholder}
                    value={self.session.form.value(field).to_string()}
                    oninput={ctx.link().callback(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::UpdateField(field, input.value())
                    })}
                />
            </div>
        }
    }

    fn view_detail_modal(&self, ctx: &Context<Self>) -> Html {
        let Some(Route::Post { id }) = ctx.link().route::<Route>() else {
            return html! {};
        };
        // Посты ещё не загружены: не показываем "not found" раньше времени
        if self.session.is_loading() {
            return html! {};
        }

        let view = self.session.detail(&id);
        let body = match &view {
            DetailView::Found(detail) => view_detail(detail),
            DetailView::NotFound { requested } => html! {
                <div class="alert alert-warning mb-0">
                    { format!("No post with id \"{}\" was found.", requested) }
                </div>
            },
        };

        view_modal(
            view.title(),
            body,
            ctx.link().callback(|_| Msg::CloseDetail),
            html! {},
        )
    }

    fn view_save_modal(&self, ctx: &Context<Self>) -> Html {
        let Some(saved) = &self.saved else {
            return html! {};
        };

        let body = html! {
            <>
                <p>
                    { "This post is not saved to the server (there is no backend). \
                       To publish it, add it to the data file by hand:" }
                </p>
                <ol>
                    { for saved.instructions.iter().map(|step| html! { <li>{ *step }</li> }) }
                </ol>
                <pre class="bg-light p-2 border rounded"><code>{ &saved.json }</code></pre>
            </>
        };

        let footer = html! {
            <button
                type="button"
                class={self.copy_button.css_class()}
                onclick={ctx.link().callback(|_| Msg::CopyJson)}
            >
                { self.copy_button.label() }
            </button>
        };

        view_modal(
            "Save your post",
            body,
            ctx.link().callback(|_| Msg::CloseSaveDialog),
            footer,
        )
    }
}

fn view_tags(tags: &[String]) -> Html {
    if tags.is_empty() {
        return html! {};
    }
    html! {
        <div class="mb-2">
            { for tags.iter().map(|tag| html! {
                <span class="badge bg-secondary me-1">{ tag }</span>
            }) }
        </div>
    }
}

fn view_link(link: Option<&str>) -> Html {
    match link {
        Some(href) => html! {
            <a href={href.to_string()} target="_blank" rel="noopener noreferrer"
                class="btn btn-sm btn-outline-primary">
                <i class="bi bi-box-arrow-up-right"></i>{ " Visit link" }
            </a>
        },
        None => html! {},
    }
}

fn view_detail(detail: &PostDetail) -> Html {
    let author = detail
        .author
        .as_ref()
        .map(|author| format!(" • {}", author))
        .unwrap_or_default();

    html! {
        <>
            <p class="text-muted">
                <small>{ format!("{}{}", detail.date, author) }</small>
            </p>
            <div class="post-content" style="white-space: pre-wrap;">{ &detail.content }</div>
            <div class="mt-3">{ view_tags(&detail.tags) }</div>
            { view_link(detail.link.as_deref()) }
        </>
    }
}

fn view_modal(title: &str, body: Html, on_close: Callback<MouseEvent>, footer: Html) -> Html {
    html! {
        <>
            <div class="modal d-block" tabindex="-1" role="dialog">
                <div class="modal-dialog modal-lg modal-dialog-scrollable">
                    <div class="modal-content">
                        <div class="modal-header">
                            <h5 class="modal-title">{ title.to_string() }</h5>
                            <button type="button" class="btn-close" onclick={on_close.clone()} />
                        </div>
                        <div class="modal-body">{ body }</div>
                        <div class="modal-footer">
                            { footer }
                            <button type="button" class="btn btn-secondary" onclick={on_close}>
                                { "Close" }
                            </button>
                        </div>
                    </div>
                </div>
            </div>
            <div class="modal-backdrop show"></div>
        </>
    }
}
