//! Interactive session: one view at a time, driven by input lines.

use std::io;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, info};

use crate::application::dialogs::Dialogs;
use crate::application::page::Mutation;
use crate::application::posts::PostsPage;
use crate::application::repos::ResourceApi;
use crate::application::users::UsersPage;
use crate::presentation::views::{
    POSTS_LOADING, USERS_LOADING, author_options, render_home, render_posts, render_users,
};

use super::command::{ConsoleCommand, HELP};
use super::router::Route;
use super::terminal::{CANCEL_INPUT, Terminal};

/// The mounted view. Navigating drops the previous one together with its
/// caches.
enum View {
    Home,
    Users(UsersPage),
    Posts(PostsPage),
}

impl View {
    fn route(&self) -> Route {
        match self {
            Self::Home => Route::Home,
            Self::Users(_) => Route::Users,
            Self::Posts(_) => Route::Posts,
        }
    }
}

pub struct Console<R, W> {
    api: Arc<dyn ResourceApi>,
    term: Terminal<R, W>,
    view: View,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(api: Arc<dyn ResourceApi>, term: Terminal<R, W>) -> Self {
        Self {
            api,
            term,
            view: View::Home,
        }
    }

    pub fn into_terminal(self) -> Terminal<R, W> {
        self.term
    }

    /// Open `route`, then process commands until `quit` or end of input.
    pub async fn run(&mut self, route: Route) -> io::Result<()> {
        self.open(route).await?;
        self.term
            .write_line("Type `help` for the list of commands.")
            .await?;

        loop {
            self.term.write(&format!("{}> ", self.view.route())).await?;
            let Some(line) = self.term.read_line().await? else {
                break;
            };
            match ConsoleCommand::parse(&line) {
                Ok(ConsoleCommand::Quit) => break,
                Ok(command) => self.dispatch(command).await?,
                Err(err) => self.term.write_line(&err.to_string()).await?,
            }
        }
        self.term.write_line("").await
    }

    async fn dispatch(&mut self, command: ConsoleCommand) -> io::Result<()> {
        debug!(?command, route = %self.view.route(), "console command");
        match command {
            ConsoleCommand::Open(route) => self.open(route).await,
            ConsoleCommand::List => self.show().await,
            ConsoleCommand::Search(text) => {
                match &mut self.view {
                    View::Users(page) => page.set_query(text),
                    View::Posts(page) => page.set_query(text),
                    View::Home => return self.unavailable("search").await,
                }
                self.show().await
            }
            ConsoleCommand::Clear => {
                match &mut self.view {
                    View::Users(page) => page.set_query(""),
                    View::Posts(page) => page.set_query(""),
                    View::Home => return self.unavailable("clear").await,
                }
                self.show().await
            }
            ConsoleCommand::Create => self.create().await,
            ConsoleCommand::Edit(id) => self.edit(id).await,
            ConsoleCommand::Delete(id) => self.delete(id).await,
            ConsoleCommand::Cancel => match &mut self.view {
                View::Posts(page) => {
                    page.cancel_edit();
                    self.show().await
                }
                _ => self.unavailable("cancel").await,
            },
            ConsoleCommand::Help => self.term.write_line(HELP).await,
            ConsoleCommand::Empty | ConsoleCommand::Quit => Ok(()),
        }
    }

    async fn open(&mut self, route: Route) -> io::Result<()> {
        info!(%route, "open view");
        match route {
            Route::Home => self.view = View::Home,
            Route::Users => {
                self.term.write_line(USERS_LOADING).await?;
                let mut page = UsersPage::new(self.api.clone());
                page.mount().await;
                self.view = View::Users(page);
            }
            Route::Posts => {
                self.term.write_line(POSTS_LOADING).await?;
                let mut page = PostsPage::new(self.api.clone());
                page.mount().await;
                self.view = View::Posts(page);
            }
        }
        self.show().await
    }

    async fn show(&mut self) -> io::Result<()> {
        let rendered = match &self.view {
            View::Home => render_home(),
            View::Users(page) => render_users(page),
            View::Posts(page) => render_posts(page),
        };
        let text = rendered.map_err(io::Error::other)?;
        self.term.write(&text).await
    }

    async fn create(&mut self) -> io::Result<()> {
        let outcome = match &mut self.view {
            View::Users(page) => {
                let form = page.form().clone();
                let (Some(name), Some(username), Some(email)) = (
                    self.term.prompt("Full name", &form.name).await,
                    self.term.prompt("Username", &form.username).await,
                    self.term.prompt("Email address", &form.email).await,
                ) else {
                    return self.report(&Mutation::Cancelled).await;
                };
                let form = page.form_mut();
                form.name = name;
                form.username = username;
                form.email = email;
                page.create(&mut self.term).await
            }
            View::Posts(page) => {
                page.cancel_edit();
                match fill_post_form(&mut self.term, page).await? {
                    true => page.submit(&mut self.term).await,
                    false => Mutation::Cancelled,
                }
            }
            View::Home => return self.unavailable("create").await,
        };
        self.report(&outcome).await
    }

    async fn edit(&mut self, id: i64) -> io::Result<()> {
        let outcome = match &mut self.view {
            View::Users(page) => page.edit(id, &mut self.term).await,
            View::Posts(page) => {
                if !page.start_edit(id) {
                    Mutation::NotFound(id)
                } else if fill_post_form(&mut self.term, page).await? {
                    page.submit(&mut self.term).await
                } else {
                    Mutation::Cancelled
                }
            }
            View::Home => return self.unavailable("edit").await,
        };
        self.report(&outcome).await
    }

    async fn delete(&mut self, id: i64) -> io::Result<()> {
        let outcome = match &mut self.view {
            View::Users(page) => page.delete(id, &mut self.term).await,
            View::Posts(page) => page.delete(id, &mut self.term).await,
            View::Home => return self.unavailable("delete").await,
        };
        self.report(&outcome).await
    }

    async fn report(&mut self, outcome: &Mutation) -> io::Result<()> {
        if outcome.changed_cache() {
            return self.show().await;
        }
        match outcome {
            // the alert has already been shown
            Mutation::Applied | Mutation::Failed { .. } => Ok(()),
            Mutation::Invalid(err) => self.term.write_line(&err.to_string()).await,
            Mutation::Cancelled => self.term.write_line("cancelled").await,
            Mutation::NotFound(id) => self.term.write_line(&format!("no record with id {id}")).await,
            Mutation::NotLoaded => self.term.write_line("the list is not loaded").await,
        }
    }

    async fn unavailable(&mut self, command: &str) -> io::Result<()> {
        self.term
            .write_line(&format!(
                "`{command}` is not available on {}",
                self.view.route()
            ))
            .await
    }
}

/// Ask for author and title, pre-filled from the current form. Returns
/// `false` when the operator cancelled.
async fn fill_post_form<R, W>(term: &mut Terminal<R, W>, page: &mut PostsPage) -> io::Result<bool>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let options = author_options(page);
    if !options.is_empty() {
        term.write_line(&format!("authors: {}", options.join(", ")))
            .await?;
    }

    let form = page.form().clone();
    let Some(user_id) = term.prompt("Author id", &form.user_id.to_string()).await else {
        return Ok(false);
    };
    let Ok(user_id) = user_id.parse::<i64>() else {
        term.write_line(&format!("invalid author id `{user_id}` (type {CANCEL_INPUT} to cancel)"))
            .await?;
        return Ok(false);
    };
    let Some(title) = term.prompt("Post title", &form.title).await else {
        return Ok(false);
    };

    let form = page.form_mut();
    form.user_id = user_id;
    form.title = title;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use tokio::io::BufReader;

    use super::*;
    use crate::application::testing::{FakeApi, post, user};

    async fn run_script(api: Arc<FakeApi>, route: Route, script: &'static str) -> String {
        let term = Terminal::new(BufReader::new(script.as_bytes()), Vec::new());
        let mut console = Console::new(api, term);
        console.run(route).await.expect("console run");
        String::from_utf8(console.into_terminal().into_output()).expect("utf-8")
    }

    fn api() -> Arc<FakeApi> {
        Arc::new(FakeApi::new(
            &[user(1, "Leanne Graham"), user(2, "Ervin Howell")],
            &[post(1, 1, "sunt aut facere"), post(2, 2, "qui est esse")],
        ))
    }

    #[tokio::test]
    async fn navigation_remounts_views() {
        let api = api();
        let out = run_script(api.clone(), Route::Home, "open /users\nopen /posts\nopen /users\nquit\n").await;

        assert!(out.contains("Clean, Minimal Admin"));
        assert!(out.contains("Loading users…"));
        assert!(out.contains("Loading posts…"));
        // every visit fetches again; nothing survives navigation
        let user_fetches = api.calls().iter().filter(|c| *c == "GET /users").count();
        assert_eq!(user_fetches, 3);
    }

    #[tokio::test]
    async fn create_post_through_prompts() {
        let api = api();
        let out = run_script(api.clone(), Route::Posts, "create\n2\nfresh title\nquit\n").await;

        assert!(out.contains("authors: 1 — Leanne Graham, 2 — Ervin Howell"));
        assert!(out.contains("[Count: 3]"));
        assert!(out.contains("3   fresh title"));
        assert!(api.calls().contains(&"POST /posts".to_string()));
    }

    #[tokio::test]
    async fn edit_post_keeps_defaults() {
        let api = api();
        let out = run_script(api.clone(), Route::Posts, "edit 2\n\nrenamed\nquit\n").await;

        assert!(out.contains("Author id [2]: "));
        assert!(out.contains("renamed"));
        assert!(api.calls().contains(&"PUT /posts/2".to_string()));
        assert_eq!(
            api.bodies().last(),
            Some(&serde_json::json!({"userId": 2, "title": "renamed"}))
        );
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let api = api();
        let out = run_script(api.clone(), Route::Posts, "delete 1\nn\nquit\n").await;

        assert!(out.contains("Delete this post? [y/N] "));
        assert!(out.contains("cancelled"));
        assert!(!api.calls().iter().any(|c| c.starts_with("DELETE")));
    }

    #[tokio::test]
    async fn search_and_bad_input_are_reported() {
        let api = api();
        let out = run_script(
            api,
            Route::Users,
            "search ervin\nedit nope\ncreate\nAda\n\n!\nfly\n",
        )
        .await;

        assert!(out.contains("[Count: 1]"));
        assert!(out.contains("invalid id `nope`"));
        assert!(out.contains("cancelled"));
        assert!(out.contains("unknown command `fly`"));
    }
}
