//! In-process `WordpressApi` double shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use url::Url;
use wpbridge::{
    ClientError, ClientResult, Credentials, HttpAuthConfig, NewTerm, ProxyConfig, Record,
    Wordpress, WordpressApi, WordpressSettings,
};

pub const ENDPOINT: &str = "https://blog.example.com/xmlrpc.php";

/// Host for which `connect` itself fails.
pub const REFUSING_HOST: &str = "refuse.example.com";

static CONNECTED: Mutex<Vec<String>> = Mutex::new(Vec::new());
static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wpbridge=trace")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Endpoints `FakeClient::connect` has been invoked with, across all tests.
pub fn connected_endpoints() -> Vec<String> {
    CONNECTED.lock().expect("connect log lock").clone()
}

pub fn settings() -> WordpressSettings {
    settings_for(ENDPOINT)
}

pub fn settings_for(endpoint: &str) -> WordpressSettings {
    WordpressSettings::new(endpoint, "admin", "s3cret")
}

pub fn blog() -> Wordpress<FakeClient> {
    init_tracing();
    Wordpress::new(settings()).expect("valid settings")
}

pub fn strict_blog() -> Wordpress<FakeClient> {
    init_tracing();
    let mut settings = settings();
    settings.catch_exceptions = false;
    Wordpress::new(settings).expect("valid settings")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: String,
    pub args: Value,
}

#[derive(Default)]
pub struct FakeState {
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<String, ClientError>>,
    replies: Mutex<HashMap<String, Value>>,
    invocations: AtomicUsize,
}

impl FakeState {
    /// Make every later call of `method` fail with `error`.
    pub fn fail(&self, method: &str, error: ClientError) {
        self.failures
            .lock()
            .expect("failures lock")
            .insert(method.to_string(), error);
    }

    /// Make every later call of `method` return `value`.
    pub fn reply(&self, method: &str, value: Value) {
        self.replies
            .lock()
            .expect("replies lock")
            .insert(method.to_string(), value);
    }

    pub fn recover(&self, method: &str) {
        self.failures.lock().expect("failures lock").remove(method);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|call| call.method == method).count()
    }

    /// Record the call, then either fail or decode `reply(n)`, where `n` is
    /// the 1-based number of the invocation on this client.
    fn respond<T: DeserializeOwned>(
        &self,
        method: &str,
        args: Value,
        reply: impl FnOnce(usize) -> Value,
    ) -> ClientResult<T> {
        let n = self.invocations.fetch_add(1, Ordering::SeqCst) + 1;
        self.calls.lock().expect("calls lock").push(Call {
            method: method.to_string(),
            args,
        });
        if let Some(error) = self.failures.lock().expect("failures lock").get(method) {
            return Err(error.clone());
        }
        let value = match self.replies.lock().expect("replies lock").get(method) {
            Some(value) => value.clone(),
            None => reply(n),
        };
        serde_json::from_value(value).map_err(|err| ClientError::decode(err.to_string()))
    }
}

pub struct FakeClient {
    pub endpoint: Url,
    pub credentials: Credentials,
    pub proxy: Option<ProxyConfig>,
    pub auth: Option<HttpAuthConfig>,
    state: Arc<FakeState>,
}

impl FakeClient {
    pub fn state(&self) -> &FakeState {
        &self.state
    }
}

fn record(n: usize) -> Value {
    json!({ "fetch": n })
}

fn list(n: usize) -> Value {
    json!([{ "fetch": n }])
}

#[async_trait]
impl WordpressApi for FakeClient {
    fn connect(endpoint: &Url, credentials: &Credentials) -> ClientResult<Self> {
        CONNECTED
            .lock()
            .expect("connect log lock")
            .push(endpoint.to_string());
        if endpoint.host_str() == Some(REFUSING_HOST) {
            return Err(ClientError::transport("connection refused"));
        }
        Ok(Self {
            endpoint: endpoint.clone(),
            credentials: credentials.clone(),
            proxy: None,
            auth: None,
            state: Arc::default(),
        })
    }

    fn set_proxy(&mut self, proxy: &ProxyConfig) {
        self.proxy = Some(proxy.clone());
    }

    fn set_auth(&mut self, auth: &HttpAuthConfig) {
        self.auth = Some(auth.clone());
    }

    async fn get_post(&self, post_id: i64, fields: &[String]) -> ClientResult<Record> {
        self.state.respond("getPost", json!([post_id, fields]), |n| {
            json!({ "post_id": post_id, "fetch": n })
        })
    }

    async fn get_posts(&self, filters: &Record, fields: &[String]) -> ClientResult<Vec<Record>> {
        self.state
            .respond("getPosts", json!([filters, fields]), list)
    }

    async fn new_post(&self, title: &str, body: &str, content: &Record) -> ClientResult<i64> {
        self.state
            .respond("newPost", json!([title, body, content]), |n| json!(100 + n))
    }

    async fn edit_post(&self, post_id: i64, content: &Record) -> ClientResult<bool> {
        self.state
            .respond("editPost", json!([post_id, content]), |_| json!(true))
    }

    async fn delete_post(&self, post_id: i64) -> ClientResult<bool> {
        self.state
            .respond("deletePost", json!([post_id]), |_| json!(true))
    }

    async fn get_post_type(&self, post_type: &str, fields: &[String]) -> ClientResult<Record> {
        self.state.respond("getPostType", json!([post_type, fields]), |n| {
            json!({ "name": post_type, "fetch": n })
        })
    }

    async fn get_post_types(&self, filter: &Record, fields: &[String]) -> ClientResult<Record> {
        self.state
            .respond("getPostTypes", json!([filter, fields]), record)
    }

    async fn get_post_formats(&self) -> ClientResult<Record> {
        self.state.respond("getPostFormats", json!([]), record)
    }

    async fn get_post_status_list(&self) -> ClientResult<Record> {
        self.state.respond("getPostStatusList", json!([]), |_| {
            json!({ "draft": "Draft", "publish": "Published" })
        })
    }

    async fn get_taxonomy(&self, taxonomy: &str) -> ClientResult<Record> {
        self.state.respond("getTaxonomy", json!([taxonomy]), record)
    }

    async fn get_taxonomies(&self) -> ClientResult<Vec<Record>> {
        self.state.respond("getTaxonomies", json!([]), list)
    }

    async fn get_term(&self, term_id: i64, taxonomy: &str) -> ClientResult<Record> {
        self.state
            .respond("getTerm", json!([term_id, taxonomy]), record)
    }

    async fn get_terms(&self, taxonomy: &str, filter: &Record) -> ClientResult<Vec<Record>> {
        self.state
            .respond("getTerms", json!([taxonomy, filter]), list)
    }

    async fn new_term(&self, term: &NewTerm) -> ClientResult<i64> {
        self.state
            .respond("newTerm", json!([term]), |n| json!(200 + n))
    }

    async fn edit_term(
        &self,
        term_id: i64,
        taxonomy: &str,
        content: &Record,
    ) -> ClientResult<bool> {
        self.state
            .respond("editTerm", json!([term_id, taxonomy, content]), |_| json!(true))
    }

    async fn delete_term(&self, term_id: i64, taxonomy: &str) -> ClientResult<bool> {
        self.state
            .respond("deleteTerm", json!([term_id, taxonomy]), |_| json!(true))
    }

    async fn get_media_item(&self, item_id: i64) -> ClientResult<Record> {
        self.state.respond("getMediaItem", json!([item_id]), record)
    }

    async fn get_media_library(&self, filter: &Record) -> ClientResult<Vec<Record>> {
        self.state.respond("getMediaLibrary", json!([filter]), list)
    }

    async fn upload_file(&self, name: &str, mime: &str, bits: &[u8]) -> ClientResult<Record> {
        self.state.respond("uploadFile", json!([name, mime, bits]), |_| {
            json!({ "file": name, "size": bits.len() })
        })
    }

    async fn get_comment_count(&self, post_id: i64) -> ClientResult<Record> {
        self.state.respond("getCommentCount", json!([post_id]), |n| {
            json!({ "approved": 3, "awaiting_moderation": 1, "fetch": n })
        })
    }

    async fn get_comment(&self, comment_id: i64) -> ClientResult<Record> {
        self.state.respond("getComment", json!([comment_id]), record)
    }

    async fn get_comments(&self, filter: &Record) -> ClientResult<Vec<Record>> {
        self.state.respond("getComments", json!([filter]), list)
    }

    async fn new_comment(&self, post_id: i64, comment: &Record) -> ClientResult<i64> {
        self.state
            .respond("newComment", json!([post_id, comment]), |n| json!(300 + n))
    }

    async fn edit_comment(&self, comment_id: i64, comment: &Record) -> ClientResult<bool> {
        self.state
            .respond("editComment", json!([comment_id, comment]), |_| json!(true))
    }

    async fn delete_comment(&self, comment_id: i64) -> ClientResult<bool> {
        self.state
            .respond("deleteComment", json!([comment_id]), |_| json!(true))
    }

    async fn get_comment_status_list(&self) -> ClientResult<Record> {
        self.state.respond("getCommentStatusList", json!([]), |_| {
            json!({ "approve": "Approved", "hold": "Unapproved" })
        })
    }

    async fn get_options(&self, options: &[String]) -> ClientResult<Record> {
        self.state.respond("getOptions", json!([options]), record)
    }

    async fn set_options(&self, options: &Record) -> ClientResult<Record> {
        self.state
            .respond("setOptions", json!([options]), |_| json!(options))
    }

    async fn get_users_blogs(&self) -> ClientResult<Vec<Record>> {
        self.state.respond("getUsersBlogs", json!([]), list)
    }

    async fn get_user(&self, user_id: i64, fields: &[String]) -> ClientResult<Record> {
        self.state
            .respond("getUser", json!([user_id, fields]), record)
    }

    async fn get_users(&self, filters: &Record, fields: &[String]) -> ClientResult<Vec<Record>> {
        self.state
            .respond("getUsers", json!([filters, fields]), list)
    }

    async fn get_profile(&self, fields: &[String]) -> ClientResult<Record> {
        self.state.respond("getProfile", json!([fields]), |n| {
            json!({ "username": "admin", "fetch": n })
        })
    }

    async fn edit_profile(&self, content: &Record) -> ClientResult<bool> {
        self.state
            .respond("editProfile", json!([content]), |_| json!(true))
    }

    async fn call_custom_method(&self, method: &str, args: &[Value]) -> ClientResult<Value> {
        self.state
            .respond("callCustomMethod", json!([method, args]), |n| {
                json!({ "method": method, "args": args, "fetch": n })
            })
    }
}
