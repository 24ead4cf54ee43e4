//! Typed forwarding methods, one per allow-listed operation.

use serde_json::{Value, json};

use super::{CallResult, Wordpress};
use crate::client::{NewTerm, Record, WordpressApi};
use crate::method::Method;

impl<C: WordpressApi> Wordpress<C> {
    /// Retrieve a post of any registered post type.
    pub async fn get_post(&self, post_id: i64, fields: &[String]) -> CallResult<Record> {
        self.forward(
            Method::GetPost,
            || vec![json!(post_id), json!(fields)],
            |client| client.get_post(post_id, fields),
        )
        .await
    }

    /// Retrieve a list of posts of any registered post type.
    pub async fn get_posts(&self, filters: &Record, fields: &[String]) -> CallResult<Vec<Record>> {
        self.forward(
            Method::GetPosts,
            || vec![json!(filters), json!(fields)],
            |client| client.get_posts(filters, fields),
        )
        .await
    }

    /// Create a post; yields its id, or `None` when a failure was caught.
    pub async fn new_post(
        &self,
        title: &str,
        body: &str,
        content: &Record,
    ) -> CallResult<Option<i64>> {
        self.forward(
            Method::NewPost,
            || vec![json!(title), json!(body), json!(content)],
            |client| async move { client.new_post(title, body, content).await.map(Some) },
        )
        .await
    }

    pub async fn edit_post(&self, post_id: i64, content: &Record) -> CallResult<bool> {
        self.forward(
            Method::EditPost,
            || vec![json!(post_id), json!(content)],
            |client| client.edit_post(post_id, content),
        )
        .await
    }

    pub async fn delete_post(&self, post_id: i64) -> CallResult<bool> {
        self.forward(
            Method::DeletePost,
            || vec![json!(post_id)],
            |client| client.delete_post(post_id),
        )
        .await
    }

    pub async fn get_post_type(&self, post_type: &str, fields: &[String]) -> CallResult<Record> {
        self.forward(
            Method::GetPostType,
            || vec![json!(post_type), json!(fields)],
            |client| client.get_post_type(post_type, fields),
        )
        .await
    }

    /// Registered post types, keyed by name.
    pub async fn get_post_types(&self, filter: &Record, fields: &[String]) -> CallResult<Record> {
        self.forward(
            Method::GetPostTypes,
            || vec![json!(filter), json!(fields)],
            |client| client.get_post_types(filter, fields),
        )
        .await
    }

    pub async fn get_post_formats(&self) -> CallResult<Record> {
        self.forward(Method::GetPostFormats, Vec::new, |client| {
            client.get_post_formats()
        })
        .await
    }

    /// Supported values of the `post_status` field.
    pub async fn get_post_status_list(&self) -> CallResult<Record> {
        self.forward(Method::GetPostStatusList, Vec::new, |client| {
            client.get_post_status_list()
        })
        .await
    }

    pub async fn get_taxonomy(&self, taxonomy: &str) -> CallResult<Record> {
        self.forward(
            Method::GetTaxonomy,
            || vec![json!(taxonomy)],
            |client| client.get_taxonomy(taxonomy),
        )
        .await
    }

    pub async fn get_taxonomies(&self) -> CallResult<Vec<Record>> {
        self.forward(Method::GetTaxonomies, Vec::new, |client| {
            client.get_taxonomies()
        })
        .await
    }

    pub async fn get_term(&self, term_id: i64, taxonomy: &str) -> CallResult<Record> {
        self.forward(
            Method::GetTerm,
            || vec![json!(term_id), json!(taxonomy)],
            |client| client.get_term(term_id, taxonomy),
        )
        .await
    }

    pub async fn get_terms(&self, taxonomy: &str, filter: &Record) -> CallResult<Vec<Record>> {
        self.forward(
            Method::GetTerms,
            || vec![json!(taxonomy), json!(filter)],
            |client| client.get_terms(taxonomy, filter),
        )
        .await
    }

    /// Create a taxonomy term; yields its id, or `None` when a failure was caught.
    pub async fn new_term(&self, term: &NewTerm) -> CallResult<Option<i64>> {
        self.forward(
            Method::NewTerm,
            || {
                vec![
                    json!(term.name),
                    json!(term.taxonomy),
                    json!(term.slug),
                    json!(term.description),
                    json!(term.parent_id),
                ]
            },
            |client| async move { client.new_term(term).await.map(Some) },
        )
        .await
    }

    pub async fn edit_term(
        &self,
        term_id: i64,
        taxonomy: &str,
        content: &Record,
    ) -> CallResult<bool> {
        self.forward(
            Method::EditTerm,
            || vec![json!(term_id), json!(taxonomy), json!(content)],
            |client| client.edit_term(term_id, taxonomy, content),
        )
        .await
    }

    pub async fn delete_term(&self, term_id: i64, taxonomy: &str) -> CallResult<bool> {
        self.forward(
            Method::DeleteTerm,
            || vec![json!(term_id), json!(taxonomy)],
            |client| client.delete_term(term_id, taxonomy),
        )
        .await
    }

    /// Retrieve a media item (attachment).
    pub async fn get_media_item(&self, item_id: i64) -> CallResult<Record> {
        self.forward(
            Method::GetMediaItem,
            || vec![json!(item_id)],
            |client| client.get_media_item(item_id),
        )
        .await
    }

    pub async fn get_media_library(&self, filter: &Record) -> CallResult<Vec<Record>> {
        self.forward(
            Method::GetMediaLibrary,
            || vec![json!(filter)],
            |client| client.get_media_library(filter),
        )
        .await
    }

    pub async fn upload_file(&self, name: &str, mime: &str, bits: &[u8]) -> CallResult<Record> {
        self.forward(
            Method::UploadFile,
            || vec![json!(name), json!(mime), json!(bits)],
            |client| client.upload_file(name, mime, bits),
        )
        .await
    }

    /// Comment counts of a post, or `None` when a failure was caught.
    pub async fn get_comment_count(&self, post_id: i64) -> CallResult<Option<Record>> {
        self.forward(
            Method::GetCommentCount,
            || vec![json!(post_id)],
            |client| async move { client.get_comment_count(post_id).await.map(Some) },
        )
        .await
    }

    pub async fn get_comment(&self, comment_id: i64) -> CallResult<Record> {
        self.forward(
            Method::GetComment,
            || vec![json!(comment_id)],
            |client| client.get_comment(comment_id),
        )
        .await
    }

    pub async fn get_comments(&self, filter: &Record) -> CallResult<Vec<Record>> {
        self.forward(
            Method::GetComments,
            || vec![json!(filter)],
            |client| client.get_comments(filter),
        )
        .await
    }

    /// Create a comment; yields its id, or `None` when a failure was caught.
    pub async fn new_comment(&self, post_id: i64, comment: &Record) -> CallResult<Option<i64>> {
        self.forward(
            Method::NewComment,
            || vec![json!(post_id), json!(comment)],
            |client| async move { client.new_comment(post_id, comment).await.map(Some) },
        )
        .await
    }

    pub async fn edit_comment(&self, comment_id: i64, comment: &Record) -> CallResult<bool> {
        self.forward(
            Method::EditComment,
            || vec![json!(comment_id), json!(comment)],
            |client| client.edit_comment(comment_id, comment),
        )
        .await
    }

    pub async fn delete_comment(&self, comment_id: i64) -> CallResult<bool> {
        self.forward(
            Method::DeleteComment,
            || vec![json!(comment_id)],
            |client| client.delete_comment(comment_id),
        )
        .await
    }

    pub async fn get_comment_status_list(&self) -> CallResult<Record> {
        self.forward(Method::GetCommentStatusList, Vec::new, |client| {
            client.get_comment_status_list()
        })
        .await
    }

    /// Retrieve blog options; an empty `options` list asks for all of them.
    pub async fn get_options(&self, options: &[String]) -> CallResult<Record> {
        self.forward(
            Method::GetOptions,
            || vec![json!(options)],
            |client| client.get_options(options),
        )
        .await
    }

    pub async fn set_options(&self, options: &Record) -> CallResult<Record> {
        self.forward(
            Method::SetOptions,
            || vec![json!(options)],
            |client| client.set_options(options),
        )
        .await
    }

    /// Blogs the configured user belongs to.
    pub async fn get_users_blogs(&self) -> CallResult<Vec<Record>> {
        self.forward(Method::GetUsersBlogs, Vec::new, |client| {
            client.get_users_blogs()
        })
        .await
    }

    pub async fn get_user(&self, user_id: i64, fields: &[String]) -> CallResult<Record> {
        self.forward(
            Method::GetUser,
            || vec![json!(user_id), json!(fields)],
            |client| client.get_user(user_id, fields),
        )
        .await
    }

    pub async fn get_users(&self, filters: &Record, fields: &[String]) -> CallResult<Vec<Record>> {
        self.forward(
            Method::GetUsers,
            || vec![json!(filters), json!(fields)],
            |client| client.get_users(filters, fields),
        )
        .await
    }

    /// Profile of the configured user.
    pub async fn get_profile(&self, fields: &[String]) -> CallResult<Record> {
        self.forward(
            Method::GetProfile,
            || vec![json!(fields)],
            |client| client.get_profile(fields),
        )
        .await
    }

    pub async fn edit_profile(&self, content: &Record) -> CallResult<bool> {
        self.forward(
            Method::EditProfile,
            || vec![json!(content)],
            |client| client.edit_profile(content),
        )
        .await
    }

    /// Call an XML-RPC method outside the typed set. Never cached.
    pub async fn call_custom_method(&self, method: &str, args: &[Value]) -> CallResult<Value> {
        self.forward(
            Method::CallCustomMethod,
            || vec![json!(method), Value::Array(args.to_vec())],
            |client| client.call_custom_method(method, args),
        )
        .await
    }
}
