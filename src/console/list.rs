//! One-shot `users` and `posts` commands: load, filter, print, exit.

use std::io::Write;
use std::sync::Arc;

use serde::Serialize;

use crate::application::error::AppError;
use crate::application::page::PageState;
use crate::application::posts::PostsPage;
use crate::application::repos::ResourceApi;
use crate::application::users::UsersPage;
use crate::config::ListArgs;
use crate::presentation::views::{render_posts, render_users};

pub async fn list_users<W: Write>(
    api: Arc<dyn ResourceApi>,
    args: &ListArgs,
    out: &mut W,
) -> Result<(), AppError> {
    let mut page = UsersPage::new(api);
    page.mount().await;
    if let Some(search) = &args.search {
        page.set_query(search.as_str());
    }

    if let PageState::Failed(err) = page.state() {
        return Err(err.clone().into());
    }
    if args.json {
        return print_json(out, &page.filtered());
    }
    let text = render_users(&page).map_err(|err| AppError::Render(err.to_string()))?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

pub async fn list_posts<W: Write>(
    api: Arc<dyn ResourceApi>,
    args: &ListArgs,
    out: &mut W,
) -> Result<(), AppError> {
    let mut page = PostsPage::new(api);
    page.mount().await;
    if let Some(search) = &args.search {
        page.set_query(search.as_str());
    }

    if let PageState::Failed(err) = page.state() {
        return Err(err.clone().into());
    }
    if args.json {
        return print_json(out, &page.filtered());
    }
    let text = render_posts(&page).map_err(|err| AppError::Render(err.to_string()))?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Render(err.to_string()))?;
    writeln!(out, "{rendered}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::repos::{ApiError, ResourceKind};
    use crate::application::testing::{FakeApi, post, user};

    #[tokio::test]
    async fn users_json_respects_search() {
        let api = Arc::new(FakeApi::new(
            &[user(1, "Leanne Graham"), user(2, "Ervin Howell")],
            &[],
        ));
        let args = ListArgs {
            search: Some("LEANNE".to_string()),
            json: true,
        };
        let mut out = Vec::new();
        list_users(api, &args, &mut out).await.expect("list users");

        let value: serde_json::Value = serde_json::from_slice(&out).expect("json output");
        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["name"], "Leanne Graham");
    }

    #[tokio::test]
    async fn posts_table_is_printed() {
        let api = Arc::new(FakeApi::new(
            &[user(1, "Leanne Graham")],
            &[post(1, 1, "sunt aut facere")],
        ));
        let mut out = Vec::new();
        list_posts(api, &ListArgs::default(), &mut out)
            .await
            .expect("list posts");

        let text = String::from_utf8(out).expect("utf-8");
        assert!(text.contains("Posts  [Count: 1]"));
        assert!(text.contains("1 — Leanne Graham"));
    }

    #[tokio::test]
    async fn load_failure_is_returned() {
        let api = Arc::new(
            FakeApi::new(&[], &[])
                .failing_list(ResourceKind::Users, ApiError::status(503, "Service Unavailable")),
        );
        let mut out = Vec::new();
        let err = list_posts(api, &ListArgs::default(), &mut out)
            .await
            .expect_err("users failed");

        assert_eq!(
            err.to_string(),
            "failed to load view: Users: 503 Service Unavailable"
        );
        assert!(out.is_empty());
    }
}
