//! Posts view: list, search, create/update through a single form, delete,
//! and author name lookup against a separately loaded users collection.

use std::sync::Arc;

use placeholder_admin_types::PostWriteRequest;
use tracing::{debug, info, warn};

use crate::application::cache::ListCache;
use crate::application::dialogs::Dialogs;
use crate::application::error::{LoadError, WriteError};
use crate::application::filter::{Query, filter_view};
use crate::application::page::{Mutation, PageState};
use crate::application::repos::{ResourceApi, ResourceKind, fetch_all, to_payload};
use crate::domain::entities::{Post, User};
use crate::domain::error::{ValidationError, ensure_present};

pub const CREATE_FAILED: &str = "Failed to create post";
pub const UPDATE_FAILED: &str = "Failed to update post";
pub const DELETE_FAILED: &str = "Failed to delete";
pub const DELETE_CONFIRM: &str = "Delete this post?";

/// User id preselected when no users are loaded.
pub const FALLBACK_USER_ID: i64 = 1;

/// Both collections of the view. The users cache is only read here.
#[derive(Debug, Clone, Default)]
pub struct PostsData {
    pub posts: ListCache<Post>,
    pub users: ListCache<User>,
}

/// Create/edit form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostForm {
    pub user_id: i64,
    pub title: String,
}

impl Default for PostForm {
    fn default() -> Self {
        Self {
            user_id: FALLBACK_USER_ID,
            title: String::new(),
        }
    }
}

pub struct PostsPage {
    api: Arc<dyn ResourceApi>,
    mounted: bool,
    state: PageState<PostsData>,
    query: Query,
    form: PostForm,
    editing: Option<i64>,
}

impl PostsPage {
    pub fn new(api: Arc<dyn ResourceApi>) -> Self {
        Self {
            api,
            mounted: false,
            state: PageState::Loading,
            query: Query::default(),
            form: PostForm::default(),
            editing: None,
        }
    }

    /// Fetch posts and users side by side. Neither cache is populated unless
    /// both requests succeed. Runs once per view.
    pub async fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        let api = self.api.as_ref();
        let (posts, users) = tokio::join!(
            fetch_all::<Post>(api, ResourceKind::Posts),
            fetch_all::<User>(api, ResourceKind::Users),
        );

        self.state = match (posts, users) {
            (Ok(posts), Ok(users)) => {
                info!(posts = posts.len(), users = users.len(), "posts loaded");
                PageState::Ready(PostsData {
                    posts: ListCache::new(posts),
                    users: ListCache::new(users),
                })
            }
            (Err(err), _) => {
                warn!(error = %err, "failed to load posts");
                PageState::Failed(LoadError::for_resource(ResourceKind::Posts, err))
            }
            (_, Err(err)) => {
                warn!(error = %err, "failed to load users for posts");
                PageState::Failed(LoadError::for_resource(ResourceKind::Users, err))
            }
        };
        self.form = self.default_form();
    }

    pub fn state(&self) -> &PageState<PostsData> {
        &self.state
    }

    pub fn data(&self) -> Option<&PostsData> {
        self.state.ready()
    }

    pub fn posts(&self) -> Option<&ListCache<Post>> {
        self.data().map(|data| &data.posts)
    }

    pub fn users(&self) -> Option<&ListCache<User>> {
        self.data().map(|data| &data.users)
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = Query::new(text);
    }

    /// Posts whose title contains the query.
    pub fn filtered(&self) -> Vec<&Post> {
        self.posts()
            .map(|posts| filter_view(posts.as_slice(), &self.query))
            .unwrap_or_default()
    }

    /// Display name of a post's author, or `User {id}` when the id is not
    /// among the loaded users.
    pub fn user_name(&self, user_id: i64) -> String {
        self.users()
            .and_then(|users| users.find(user_id))
            .map_or_else(|| format!("User {user_id}"), |user| user.name.clone())
    }

    /// Lowest loaded user id, used to preselect the author.
    pub fn default_user_id(&self) -> i64 {
        self.users()
            .and_then(ListCache::min_id)
            .unwrap_or(FALLBACK_USER_ID)
    }

    pub fn form(&self) -> &PostForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PostForm {
        &mut self.form
    }

    /// Id of the post whose edit session is open.
    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    /// Open the edit session for a post, replacing any session already open,
    /// and copy its fields into the form.
    pub fn start_edit(&mut self, id: i64) -> bool {
        let Some(post) = self.posts().and_then(|posts| posts.find(id)) else {
            return false;
        };
        let form = PostForm {
            user_id: post.user_id,
            title: post.title.clone(),
        };
        self.editing = Some(id);
        self.form = form;
        true
    }

    /// Close the edit session and reset the form.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form = self.default_form();
    }

    /// Submit the form: update when an edit session is open, create
    /// otherwise. A failed write leaves cache, form and session untouched.
    pub async fn submit(&mut self, dialogs: &mut dyn Dialogs) -> Mutation {
        if self.state.ready().is_none() {
            return Mutation::NotLoaded;
        }
        if let Err(err) = self.validate() {
            return Mutation::Invalid(err);
        }

        match self.editing {
            Some(id) => self.update(id, dialogs).await,
            None => self.create(dialogs).await,
        }
    }

    async fn create(&mut self, dialogs: &mut dyn Dialogs) -> Mutation {
        let request = self.request();
        let result = match to_payload(&request) {
            Ok(payload) => self.api.create(ResourceKind::Posts, payload).await,
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            warn!(error = %err, "post create failed");
            dialogs.alert(CREATE_FAILED).await;
            return Mutation::Failed {
                error: WriteError::new(CREATE_FAILED, err),
                applied: false,
            };
        }

        let default_form = self.default_form();
        let Some(data) = self.state.ready_mut() else {
            return Mutation::NotLoaded;
        };
        let id = data.posts.next_id();
        data.posts.prepend(Post {
            id,
            user_id: request.user_id,
            title: request.title,
        });
        self.form = default_form;
        debug!(id, "post created");
        Mutation::Applied
    }

    async fn update(&mut self, id: i64, dialogs: &mut dyn Dialogs) -> Mutation {
        let request = self.request();
        let result = match to_payload(&request) {
            Ok(payload) => self.api.update(ResourceKind::Posts, id, payload).await,
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            warn!(id, error = %err, "post update failed");
            dialogs.alert(UPDATE_FAILED).await;
            return Mutation::Failed {
                error: WriteError::new(UPDATE_FAILED, err),
                applied: false,
            };
        }

        let default_form = self.default_form();
        let Some(data) = self.state.ready_mut() else {
            return Mutation::NotLoaded;
        };
        data.posts.update_where(id, |post| {
            post.user_id = request.user_id;
            post.title.clone_from(&request.title);
        });
        self.editing = None;
        self.form = default_form;
        debug!(id, "post updated");
        Mutation::Applied
    }

    /// Delete a post after confirmation. The record leaves the cache even if
    /// the delete call fails; the failure is only alerted.
    pub async fn delete(&mut self, id: i64, dialogs: &mut dyn Dialogs) -> Mutation {
        if self.state.ready().is_none() {
            return Mutation::NotLoaded;
        }
        if !dialogs.confirm(DELETE_CONFIRM).await {
            return Mutation::Cancelled;
        }

        let result = self.api.delete(ResourceKind::Posts, id).await;
        if let Some(data) = self.state.ready_mut() {
            data.posts.remove(id);
        }

        match result {
            Ok(()) => {
                debug!(id, "post deleted");
                Mutation::Applied
            }
            Err(err) => {
                warn!(id, error = %err, "post delete failed; removed locally");
                dialogs.alert(DELETE_FAILED).await;
                Mutation::Failed {
                    error: WriteError::new(DELETE_FAILED, err),
                    applied: true,
                }
            }
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        ensure_present(&self.form.title, "title")?;
        if self.form.user_id == 0 {
            return Err(ValidationError::missing("userId"));
        }
        Ok(())
    }

    fn request(&self) -> PostWriteRequest {
        PostWriteRequest {
            user_id: self.form.user_id,
            title: self.form.title.clone(),
        }
    }

    fn default_form(&self) -> PostForm {
        PostForm {
            user_id: self.default_user_id(),
            title: String::new(),
        }
    }
}
