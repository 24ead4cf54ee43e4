//! Name-based dispatch over the allow-list.
//!
//! Arguments arrive positionally as JSON values, in the order of the
//! XML-RPC method's parameters. Trailing optional parameters may be omitted
//! or `null`.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use super::{CallResult, Wordpress};
use crate::answer::Answer;
use crate::client::{NewTerm, Record, WordpressApi};
use crate::error::WordpressError;
use crate::method::{Method, UnknownMethod};

impl<C: WordpressApi> Wordpress<C> {
    /// Forward the operation called `name` with positional `args`.
    ///
    /// The result is the operation's value as JSON; a caught failure yields
    /// the operation's fallback (`[]` or `false`).
    ///
    /// ```ignore
    /// let post = blog.call("getPost", vec![json!(42)]).await?;
    /// ```
    pub async fn call(&self, name: &str, args: Vec<Value>) -> CallResult<Value> {
        let method: Method = name
            .parse()
            .map_err(|UnknownMethod(method)| WordpressError::MethodNotSupported { method })?;
        let mut args = Args::new(method, args);

        match method {
            Method::GetPost => {
                let post_id = args.required("post_id")?;
                let fields: Vec<String> = args.optional("fields")?;
                args.finish()?;
                encode(method, self.get_post(post_id, &fields).await?)
            }
            Method::GetPosts => {
                let filters: Record = args.optional("filters")?;
                let fields: Vec<String> = args.optional("fields")?;
                args.finish()?;
                encode(method, self.get_posts(&filters, &fields).await?)
            }
            Method::NewPost => {
                let title: String = args.required("title")?;
                let body: String = args.required("body")?;
                let content: Record = args.optional("content")?;
                args.finish()?;
                encode(method, self.new_post(&title, &body, &content).await?)
            }
            Method::EditPost => {
                let post_id = args.required("post_id")?;
                let content: Record = args.required("content")?;
                args.finish()?;
                encode(method, self.edit_post(post_id, &content).await?)
            }
            Method::DeletePost => {
                let post_id = args.required("post_id")?;
                args.finish()?;
                encode(method, self.delete_post(post_id).await?)
            }
            Method::GetPostType => {
                let post_type: String = args.required("post_type")?;
                let fields: Vec<String> = args.optional("fields")?;
                args.finish()?;
                encode(method, self.get_post_type(&post_type, &fields).await?)
            }
            Method::GetPostTypes => {
                let filter: Record = args.optional("filter")?;
                let fields: Vec<String> = args.optional("fields")?;
                args.finish()?;
                encode(method, self.get_post_types(&filter, &fields).await?)
            }
            Method::GetPostFormats => {
                args.finish()?;
                encode(method, self.get_post_formats().await?)
            }
            Method::GetPostStatusList => {
                args.finish()?;
                encode(method, self.get_post_status_list().await?)
            }
            Method::GetTaxonomy => {
                let taxonomy: String = args.required("taxonomy")?;
                args.finish()?;
                encode(method, self.get_taxonomy(&taxonomy).await?)
            }
            Method::GetTaxonomies => {
                args.finish()?;
                encode(method, self.get_taxonomies().await?)
            }
            Method::GetTerm => {
                let term_id = args.required("term_id")?;
                let taxonomy: String = args.required("taxonomy")?;
                args.finish()?;
                encode(method, self.get_term(term_id, &taxonomy).await?)
            }
            Method::GetTerms => {
                let taxonomy: String = args.required("taxonomy")?;
                let filter: Record = args.optional("filter")?;
                args.finish()?;
                encode(method, self.get_terms(&taxonomy, &filter).await?)
            }
            Method::NewTerm => {
                let term = NewTerm {
                    name: args.required("name")?,
                    taxonomy: args.required("taxonomy")?,
                    slug: args.optional("slug")?,
                    description: args.optional("description")?,
                    parent_id: args.optional("parent_id")?,
                };
                args.finish()?;
                encode(method, self.new_term(&term).await?)
            }
            Method::EditTerm => {
                let term_id = args.required("term_id")?;
                let taxonomy: String = args.required("taxonomy")?;
                let content: Record = args.required("content")?;
                args.finish()?;
                encode(method, self.edit_term(term_id, &taxonomy, &content).await?)
            }
            Method::DeleteTerm => {
                let term_id = args.required("term_id")?;
                let taxonomy: String = args.required("taxonomy")?;
                args.finish()?;
                encode(method, self.delete_term(term_id, &taxonomy).await?)
            }
            Method::GetMediaItem => {
                let item_id = args.required("item_id")?;
                args.finish()?;
                encode(method, self.get_media_item(item_id).await?)
            }
            Method::GetMediaLibrary => {
                let filter: Record = args.optional("filter")?;
                args.finish()?;
                encode(method, self.get_media_library(&filter).await?)
            }
            Method::UploadFile => {
                let name: String = args.required("name")?;
                let mime: String = args.required("mime")?;
                let bits: Bits = args.required("bits")?;
                args.finish()?;
                encode(method, self.upload_file(&name, &mime, bits.as_bytes()).await?)
            }
            Method::GetCommentCount => {
                let post_id = args.required("post_id")?;
                args.finish()?;
                encode(method, self.get_comment_count(post_id).await?)
            }
            Method::GetComment => {
                let comment_id = args.required("comment_id")?;
                args.finish()?;
                encode(method, self.get_comment(comment_id).await?)
            }
            Method::GetComments => {
                let filter: Record = args.optional("filter")?;
                args.finish()?;
                encode(method, self.get_comments(&filter).await?)
            }
            Method::NewComment => {
                let post_id = args.required("post_id")?;
                let comment: Record = args.required("comment")?;
                args.finish()?;
                encode(method, self.new_comment(post_id, &comment).await?)
            }
            Method::EditComment => {
                let comment_id = args.required("comment_id")?;
                let comment: Record = args.required("comment")?;
                args.finish()?;
                encode(method, self.edit_comment(comment_id, &comment).await?)
            }
            Method::DeleteComment => {
                let comment_id = args.required("comment_id")?;
                args.finish()?;
                encode(method, self.delete_comment(comment_id).await?)
            }
            Method::GetCommentStatusList => {
                args.finish()?;
                encode(method, self.get_comment_status_list().await?)
            }
            Method::GetOptions => {
                let options: Vec<String> = args.optional("options")?;
                args.finish()?;
                encode(method, self.get_options(&options).await?)
            }
            Method::SetOptions => {
                let options: Record = args.required("options")?;
                args.finish()?;
                encode(method, self.set_options(&options).await?)
            }
            Method::GetUsersBlogs => {
                args.finish()?;
                encode(method, self.get_users_blogs().await?)
            }
            Method::GetUser => {
                let user_id = args.required("user_id")?;
                let fields: Vec<String> = args.optional("fields")?;
                args.finish()?;
                encode(method, self.get_user(user_id, &fields).await?)
            }
            Method::GetUsers => {
                let filters: Record = args.optional("filters")?;
                let fields: Vec<String> = args.optional("fields")?;
                args.finish()?;
                encode(method, self.get_users(&filters, &fields).await?)
            }
            Method::GetProfile => {
                let fields: Vec<String> = args.optional("fields")?;
                args.finish()?;
                encode(method, self.get_profile(&fields).await?)
            }
            Method::EditProfile => {
                let content: Record = args.required("content")?;
                args.finish()?;
                encode(method, self.edit_profile(&content).await?)
            }
            Method::CallCustomMethod => {
                let name: String = args.required("method")?;
                let params: Vec<Value> = args.optional("args")?;
                args.finish()?;
                encode(method, self.call_custom_method(&name, &params).await?)
            }
        }
    }
}

/// Positional argument reader for one dynamic call.
struct Args {
    method: Method,
    values: std::vec::IntoIter<Value>,
    consumed: usize,
}

impl Args {
    fn new(method: Method, values: Vec<Value>) -> Self {
        Self {
            method,
            values: values.into_iter(),
            consumed: 0,
        }
    }

    fn next<T: DeserializeOwned>(&mut self, name: &str) -> Result<Option<T>, WordpressError> {
        let value = match self.values.next() {
            None | Some(Value::Null) => {
                self.consumed += 1;
                return Ok(None);
            }
            Some(value) => value,
        };
        self.consumed += 1;

        // An empty list stands in for an empty struct.
        let empty_list = value.as_array().is_some_and(Vec::is_empty);
        match serde_json::from_value::<T>(value) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(_) if empty_list => serde_json::from_value::<T>(Value::Object(Map::new()))
                .map(Some)
                .map_err(|err| self.invalid(name, err)),
            Err(err) => Err(self.invalid(name, err)),
        }
    }

    fn required<T: DeserializeOwned>(&mut self, name: &str) -> Result<T, WordpressError> {
        self.next(name)?.ok_or_else(|| {
            WordpressError::invalid_arguments(self.method, format!("missing argument `{name}`"))
        })
    }

    fn optional<T: DeserializeOwned + Default>(&mut self, name: &str) -> Result<T, WordpressError> {
        Ok(self.next(name)?.unwrap_or_default())
    }

    fn finish(self) -> Result<(), WordpressError> {
        let extra = self.values.len();
        if extra == 0 {
            return Ok(());
        }
        Err(WordpressError::invalid_arguments(
            self.method,
            format!(
                "expected at most {} arguments, got {}",
                self.consumed,
                self.consumed + extra
            ),
        ))
    }

    fn invalid(&self, name: &str, err: serde_json::Error) -> WordpressError {
        WordpressError::invalid_arguments(self.method, format!("argument `{name}`: {err}"))
    }
}

/// File contents given either as text or as a list of bytes.
#[derive(Deserialize)]
#[serde(untagged)]
enum Bits {
    Text(String),
    Bytes(Vec<u8>),
}

impl Bits {
    fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }
}

fn encode<T: Serialize>(method: Method, answer: Answer<T>) -> CallResult<Value> {
    if answer.is_fallback() {
        return Ok(answer.map(|_| method.fallback()));
    }
    let value = serde_json::to_value(answer.value())
        .map_err(|source| WordpressError::Encode { method, source })?;
    Ok(answer.map(|_| value))
}
