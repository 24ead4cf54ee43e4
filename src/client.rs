//! The client collaborator seam.
//!
//! [`WordpressApi`] lists every operation the component forwards, with its
//! typed signature. Implementations own the XML-RPC wire format; the component
//! only decides whether a call reaches them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::config::{Credentials, HttpAuthConfig, ProxyConfig};
use crate::error::ClientResult;

/// A WordPress struct (post, term, comment, user, ...) as returned by XML-RPC.
pub type Record = Map<String, Value>;

/// Arguments of `wp.newTerm`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTerm {
    pub name: String,
    pub taxonomy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

impl NewTerm {
    pub fn new(name: impl Into<String>, taxonomy: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            taxonomy: taxonomy.into(),
            ..Self::default()
        }
    }
}

#[async_trait]
pub trait WordpressApi: Send + Sync + Sized + 'static {
    /// Build a client for `endpoint`; invoked once, after settings validation.
    fn connect(endpoint: &Url, credentials: &Credentials) -> ClientResult<Self>;

    fn set_proxy(&mut self, proxy: &ProxyConfig);

    fn set_auth(&mut self, auth: &HttpAuthConfig);

    async fn get_post(&self, post_id: i64, fields: &[String]) -> ClientResult<Record>;

    async fn get_posts(&self, filters: &Record, fields: &[String]) -> ClientResult<Vec<Record>>;

    async fn new_post(&self, title: &str, body: &str, content: &Record) -> ClientResult<i64>;

    async fn edit_post(&self, post_id: i64, content: &Record) -> ClientResult<bool>;

    async fn delete_post(&self, post_id: i64) -> ClientResult<bool>;

    async fn get_post_type(&self, post_type: &str, fields: &[String]) -> ClientResult<Record>;

    async fn get_post_types(&self, filter: &Record, fields: &[String]) -> ClientResult<Record>;

    async fn get_post_formats(&self) -> ClientResult<Record>;

    async fn get_post_status_list(&self) -> ClientResult<Record>;

    async fn get_taxonomy(&self, taxonomy: &str) -> ClientResult<Record>;

    async fn get_taxonomies(&self) -> ClientResult<Vec<Record>>;

    async fn get_term(&self, term_id: i64, taxonomy: &str) -> ClientResult<Record>;

    async fn get_terms(&self, taxonomy: &str, filter: &Record) -> ClientResult<Vec<Record>>;

    async fn new_term(&self, term: &NewTerm) -> ClientResult<i64>;

    async fn edit_term(&self, term_id: i64, taxonomy: &str, content: &Record)
    -> ClientResult<bool>;

    async fn delete_term(&self, term_id: i64, taxonomy: &str) -> ClientResult<bool>;

    async fn get_media_item(&self, item_id: i64) -> ClientResult<Record>;

    async fn get_media_library(&self, filter: &Record) -> ClientResult<Vec<Record>>;

    async fn upload_file(&self, name: &str, mime: &str, bits: &[u8]) -> ClientResult<Record>;

    /// Approved, pending, spam and total counts for a post.
    async fn get_comment_count(&self, post_id: i64) -> ClientResult<Record>;

    async fn get_comment(&self, comment_id: i64) -> ClientResult<Record>;

    async fn get_comments(&self, filter: &Record) -> ClientResult<Vec<Record>>;

    async fn new_comment(&self, post_id: i64, comment: &Record) -> ClientResult<i64>;

    async fn edit_comment(&self, comment_id: i64, comment: &Record) -> ClientResult<bool>;

    async fn delete_comment(&self, comment_id: i64) -> ClientResult<bool>;

    async fn get_comment_status_list(&self) -> ClientResult<Record>;

    async fn get_options(&self, options: &[String]) -> ClientResult<Record>;

    async fn set_options(&self, options: &Record) -> ClientResult<Record>;

    async fn get_users_blogs(&self) -> ClientResult<Vec<Record>>;

    async fn get_user(&self, user_id: i64, fields: &[String]) -> ClientResult<Record>;

    async fn get_users(&self, filters: &Record, fields: &[String]) -> ClientResult<Vec<Record>>;

    async fn get_profile(&self, fields: &[String]) -> ClientResult<Record>;

    async fn edit_profile(&self, content: &Record) -> ClientResult<bool>;

    /// Any XML-RPC method not covered above, e.g. one added by a plugin.
    async fn call_custom_method(&self, method: &str, args: &[Value]) -> ClientResult<Value>;
}
