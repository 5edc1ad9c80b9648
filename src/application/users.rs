//! Users view: list, search, create, and local-only edit/delete.

use std::sync::Arc;

use placeholder_admin_types::CreateUserRequest;
use tracing::{debug, info, warn};

use crate::application::cache::ListCache;
use crate::application::dialogs::Dialogs;
use crate::application::error::{LoadError, WriteError};
use crate::application::filter::{Query, filter_view};
use crate::application::page::{Mutation, PageState};
use crate::application::repos::{ResourceApi, ResourceKind, fetch_all, to_payload};
use crate::domain::entities::User;
use crate::domain::error::ensure_present;

pub const CREATE_FAILED: &str = "Failed to create user";
pub const DELETE_CONFIRM: &str = "Delete this user?";

/// Create form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub username: String,
    pub email: String,
}

pub struct UsersPage {
    api: Arc<dyn ResourceApi>,
    mounted: bool,
    state: PageState<ListCache<User>>,
    query: Query,
    form: UserForm,
}

impl UsersPage {
    pub fn new(api: Arc<dyn ResourceApi>) -> Self {
        Self {
            api,
            mounted: false,
            state: PageState::Loading,
            query: Query::default(),
            form: UserForm::default(),
        }
    }

    /// Fetch the collection. Runs once per view; later calls do nothing.
    pub async fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        self.state = match fetch_all::<User>(self.api.as_ref(), ResourceKind::Users).await {
            Ok(users) => {
                info!(count = users.len(), "users loaded");
                PageState::Ready(ListCache::new(users))
            }
            Err(err) => {
                warn!(error = %err, "failed to load users");
                PageState::Failed(LoadError::new(err))
            }
        };
    }

    pub fn state(&self) -> &PageState<ListCache<User>> {
        &self.state
    }

    pub fn cache(&self) -> Option<&ListCache<User>> {
        self.state.ready()
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = Query::new(text);
    }

    /// Users whose name, username or email contain the query.
    pub fn filtered(&self) -> Vec<&User> {
        self.cache()
            .map(|cache| filter_view(cache.as_slice(), &self.query))
            .unwrap_or_default()
    }

    pub fn form(&self) -> &UserForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut UserForm {
        &mut self.form
    }

    /// Submit the create form.
    ///
    /// The new record is prepended with a locally assigned id whatever the
    /// outcome of the write; a failed write only adds an alert.
    pub async fn create(&mut self, dialogs: &mut dyn Dialogs) -> Mutation {
        let Some(cache) = self.state.ready_mut() else {
            return Mutation::NotLoaded;
        };

        let form = &self.form;
        for (value, field) in [
            (&form.name, "name"),
            (&form.username, "username"),
            (&form.email, "email"),
        ] {
            if let Err(err) = ensure_present(value, field) {
                return Mutation::Invalid(err);
            }
        }

        let request = CreateUserRequest {
            name: form.name.clone(),
            username: form.username.clone(),
            email: form.email.clone(),
        };
        let result = match to_payload(&request) {
            Ok(payload) => self
                .api
                .create(ResourceKind::Users, payload)
                .await
                .map(|_| ()),
            Err(err) => Err(err),
        };

        let id = cache.next_id();
        cache.prepend(User {
            id,
            name: request.name,
            username: request.username,
            email: request.email,
        });
        self.form = UserForm::default();

        match result {
            Ok(()) => {
                debug!(id, "user created");
                Mutation::Applied
            }
            Err(err) => {
                warn!(id, error = %err, "user create failed; keeping local record");
                dialogs.alert(CREATE_FAILED).await;
                Mutation::Failed {
                    error: WriteError::new(CREATE_FAILED, err),
                    applied: true,
                }
            }
        }
    }

    /// Edit name, username and email through three prompts. Purely local;
    /// nothing is sent to the API.
    pub async fn edit(&mut self, id: i64, dialogs: &mut dyn Dialogs) -> Mutation {
        let Some(cache) = self.state.ready_mut() else {
            return Mutation::NotLoaded;
        };
        let Some(current) = cache.find(id).cloned() else {
            return Mutation::NotFound(id);
        };

        // All three prompts are shown before the answers are checked.
        let name = dialogs.prompt("Enter new name", &current.name).await;
        let username = dialogs.prompt("Enter new username", &current.username).await;
        let email = dialogs.prompt("Enter new email", &current.email).await;

        let (Some(name), Some(username), Some(email)) = (name, username, email) else {
            return Mutation::Cancelled;
        };
        let answers = [(&name, "name"), (&username, "username"), (&email, "email")];
        if answers
            .into_iter()
            .any(|(value, field)| ensure_present(value, field).is_err())
        {
            return Mutation::Cancelled;
        }

        cache.update_where(id, |user| {
            user.name.clone_from(&name);
            user.username.clone_from(&username);
            user.email.clone_from(&email);
        });
        debug!(id, "user edited locally");
        Mutation::Applied
    }

    /// Remove a user after confirmation. Purely local.
    pub async fn delete(&mut self, id: i64, dialogs: &mut dyn Dialogs) -> Mutation {
        let Some(cache) = self.state.ready_mut() else {
            return Mutation::NotLoaded;
        };
        if !dialogs.confirm(DELETE_CONFIRM).await {
            return Mutation::Cancelled;
        }
        let removed = cache.remove(id);
        debug!(id, removed, "user deleted locally");
        Mutation::Applied
    }
}
