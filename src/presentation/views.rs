use askama::Template;
use thiserror::Error;

use crate::application::page::PageState;
use crate::application::posts::PostsPage;
use crate::application::users::UsersPage;
use crate::presentation::table::Table;

pub const OPTIMISTIC_NOTE: &str =
    "Note: JSONPlaceholder accepts writes but does not persist. UI updates are optimistic.";
pub const USERS_LOADING: &str = "Loading users…";
pub const POSTS_LOADING: &str = "Loading posts…";

#[derive(Debug, Error)]
#[error("{context}: {source}")]
pub struct RenderError {
    context: &'static str,
    #[source]
    source: askama::Error,
}

fn render<T: Template>(context: &'static str, template: &T) -> Result<String, RenderError> {
    template
        .render()
        .map_err(|source| RenderError { context, source })
}

#[derive(Clone)]
pub struct NavCardView {
    pub title: String,
    pub route: String,
    pub blurb: String,
}

#[derive(Clone)]
pub struct HomeView {
    pub brand: String,
    pub title: String,
    pub tagline: String,
    pub cards: Vec<NavCardView>,
    pub footer: String,
}

impl Default for HomeView {
    fn default() -> Self {
        Self {
            brand: "placeholder-admin".to_string(),
            title: "Clean, Minimal Admin".to_string(),
            tagline: "Explore Users and Posts of the JSONPlaceholder API and how posts relate to their authors.".to_string(),
            cards: vec![
                NavCardView {
                    title: "Users".to_string(),
                    route: "/users".to_string(),
                    blurb: "Inspect user records including id, name, username, and email."
                        .to_string(),
                },
                NavCardView {
                    title: "Posts".to_string(),
                    route: "/posts".to_string(),
                    blurb: "Browse posts and their relation to users via userId.".to_string(),
                },
            ],
            footer: "Data from JSONPlaceholder (https://jsonplaceholder.typicode.com/)"
                .to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "home.txt")]
pub struct HomeTemplate {
    pub view: HomeView,
}

/// Full-page loading or error message.
#[derive(Template)]
#[template(path = "message.txt")]
pub struct MessageTemplate {
    pub alert: bool,
    pub message: String,
}

#[derive(Clone)]
pub struct UsersListView {
    pub heading: String,
    pub count: usize,
    pub query: String,
    pub table: Vec<String>,
    pub footer: String,
}

#[derive(Template)]
#[template(path = "users.txt")]
pub struct UsersTemplate {
    pub view: UsersListView,
}

#[derive(Clone)]
pub struct PostsListView {
    pub heading: String,
    pub count: usize,
    pub query: String,
    pub editing: Option<i64>,
    pub form_user: String,
    pub form_title: String,
    pub submit_label: String,
    pub table: Vec<String>,
    pub footer: String,
}

#[derive(Template)]
#[template(path = "posts.txt")]
pub struct PostsTemplate {
    pub view: PostsListView,
}

pub fn render_home() -> Result<String, RenderError> {
    render(
        "presentation::views::render_home",
        &HomeTemplate {
            view: HomeView::default(),
        },
    )
}

fn render_state_message<T>(
    state: &PageState<T>,
    loading: &str,
) -> Option<Result<String, RenderError>> {
    let template = match state {
        PageState::Loading => MessageTemplate {
            alert: false,
            message: loading.to_string(),
        },
        PageState::Failed(err) => MessageTemplate {
            alert: true,
            message: err.message().to_string(),
        },
        PageState::Ready(_) => return None,
    };
    Some(render("presentation::views::render_state_message", &template))
}

pub fn users_list_view(page: &UsersPage) -> UsersListView {
    let rows = page.filtered();
    let mut table = Table::new(["ID", "Name", "Username", "Email"]);
    for user in &rows {
        table.push_row(vec![
            user.id.to_string(),
            user.name.clone(),
            user.username.clone(),
            user.email.clone(),
        ]);
    }

    UsersListView {
        heading: "Users".to_string(),
        count: rows.len(),
        query: page.query().as_str().to_string(),
        table: table.lines(),
        footer: OPTIMISTIC_NOTE.to_string(),
    }
}

pub fn render_users(page: &UsersPage) -> Result<String, RenderError> {
    if let Some(message) = render_state_message(page.state(), USERS_LOADING) {
        return message;
    }
    render(
        "presentation::views::render_users",
        &UsersTemplate {
            view: users_list_view(page),
        },
    )
}

/// `"{id} — {name}"` label used for authors in the table and the selector.
pub fn author_label(page: &PostsPage, user_id: i64) -> String {
    format!("{user_id} — {}", page.user_name(user_id))
}

/// Selector entries for every loaded user, in cache order.
pub fn author_options(page: &PostsPage) -> Vec<String> {
    page.users()
        .map(|users| {
            users
                .iter()
                .map(|user| format!("{} — {}", user.id, user.name))
                .collect()
        })
        .unwrap_or_default()
}

pub fn posts_list_view(page: &PostsPage) -> PostsListView {
    let rows = page.filtered();
    let mut table = Table::new(["ID", "Title", "User"]);
    for post in &rows {
        table.push_row(vec![
            post.id.to_string(),
            post.title.clone(),
            author_label(page, post.user_id),
        ]);
    }

    let form = page.form();
    PostsListView {
        heading: "Posts".to_string(),
        count: rows.len(),
        query: page.query().as_str().to_string(),
        editing: page.editing(),
        form_user: author_label(page, form.user_id),
        form_title: form.title.clone(),
        submit_label: if page.editing().is_some() {
            "Update"
        } else {
            "Create"
        }
        .to_string(),
        table: table.lines(),
        footer: OPTIMISTIC_NOTE.to_string(),
    }
}

pub fn render_posts(page: &PostsPage) -> Result<String, RenderError> {
    if let Some(message) = render_state_message(page.state(), POSTS_LOADING) {
        return message;
    }
    render(
        "presentation::views::render_posts",
        &PostsTemplate {
            view: posts_list_view(page),
        },
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::repos::{ApiError, ResourceKind};
    use crate::application::testing::{FakeApi, post, user};

    #[test]
    fn home_lists_both_routes() {
        let out = render_home().expect("render");
        assert!(out.contains("open /users"));
        assert!(out.contains("open /posts"));
        assert!(out.contains("jsonplaceholder.typicode.com"));
    }

    #[tokio::test]
    async fn users_view_shows_loading_then_table() {
        let api = Arc::new(FakeApi::new(
            &[user(1, "Leanne Graham"), user(2, "Ervin Howell")],
            &[],
        ));
        let mut page = UsersPage::new(api);
        assert_eq!(render_users(&page).expect("render").trim(), USERS_LOADING);

        page.mount().await;
        page.set_query("ervin");
        let out = render_users(&page).expect("render");

        assert!(out.contains("[Count: 1]"));
        assert!(out.contains("Search: \"ervin\""));
        assert!(out.contains("Ervin Howell"));
        assert!(!out.contains("Leanne Graham"));
        assert!(out.contains(OPTIMISTIC_NOTE));
    }

    #[tokio::test]
    async fn failed_load_renders_only_the_error() {
        let api = Arc::new(
            FakeApi::new(&[], &[])
                .failing_list(ResourceKind::Posts, ApiError::status(500, "Internal Server Error")),
        );
        let mut page = PostsPage::new(api);
        page.mount().await;

        let out = render_posts(&page).expect("render");
        assert_eq!(out.trim(), "! Posts: 500 Internal Server Error");
    }

    #[tokio::test]
    async fn posts_view_resolves_authors() {
        let api = Arc::new(FakeApi::new(
            &[user(1, "Leanne Graham")],
            &[post(2, 9999, "orphan"), post(1, 1, "owned")],
        ));
        let mut page = PostsPage::new(api);
        page.mount().await;

        let view = posts_list_view(&page);
        assert_eq!(view.count, 2);
        assert_eq!(view.submit_label, "Create");
        assert!(view.table[2].ends_with("9999 — User 9999"));
        assert!(view.table[3].ends_with("1 — Leanne Graham"));
        assert_eq!(author_options(&page), vec!["1 — Leanne Graham"]);

        assert!(page.start_edit(1));
        let out = render_posts(&page).expect("render");
        assert!(out.contains("Editing post 1"));
        assert!(out.contains("[Update]"));
    }
}
