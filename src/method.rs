//! The allow-list of forwarded WordPress operations.
//!
//! Every operation the component forwards is a [`Method`] variant. The wire
//! name doubles as the dynamic dispatch key, and each variant carries the
//! value returned in place of a failed call when failures are caught.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// Prefix shared by every data-retrieval operation.
const DATA_RETRIEVAL_PREFIX: &str = "get";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GetPost,
    GetPosts,
    NewPost,
    EditPost,
    DeletePost,
    GetPostType,
    GetPostTypes,
    GetPostFormats,
    GetPostStatusList,
    GetTaxonomy,
    GetTaxonomies,
    GetTerm,
    GetTerms,
    NewTerm,
    EditTerm,
    DeleteTerm,
    GetMediaItem,
    GetMediaLibrary,
    UploadFile,
    GetCommentCount,
    GetComment,
    GetComments,
    NewComment,
    EditComment,
    DeleteComment,
    GetCommentStatusList,
    GetOptions,
    SetOptions,
    GetUsersBlogs,
    GetUser,
    GetUsers,
    GetProfile,
    EditProfile,
    CallCustomMethod,
}

/// Shape of the value substituted for a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    /// An empty collection (`[]` / `{}`).
    Empty,
    /// Boolean `false`.
    False,
}

impl Method {
    pub const ALL: [Method; 34] = [
        Method::GetPost,
        Method::GetPosts,
        Method::NewPost,
        Method::EditPost,
        Method::DeletePost,
        Method::GetPostType,
        Method::GetPostTypes,
        Method::GetPostFormats,
        Method::GetPostStatusList,
        Method::GetTaxonomy,
        Method::GetTaxonomies,
        Method::GetTerm,
        Method::GetTerms,
        Method::NewTerm,
        Method::EditTerm,
        Method::DeleteTerm,
        Method::GetMediaItem,
        Method::GetMediaLibrary,
        Method::UploadFile,
        Method::GetCommentCount,
        Method::GetComment,
        Method::GetComments,
        Method::NewComment,
        Method::EditComment,
        Method::DeleteComment,
        Method::GetCommentStatusList,
        Method::GetOptions,
        Method::SetOptions,
        Method::GetUsersBlogs,
        Method::GetUser,
        Method::GetUsers,
        Method::GetProfile,
        Method::EditProfile,
        Method::CallCustomMethod,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Method::GetPost => "getPost",
            Method::GetPosts => "getPosts",
            Method::NewPost => "newPost",
            Method::EditPost => "editPost",
            Method::DeletePost => "deletePost",
            Method::GetPostType => "getPostType",
            Method::GetPostTypes => "getPostTypes",
            Method::GetPostFormats => "getPostFormats",
            Method::GetPostStatusList => "getPostStatusList",
            Method::GetTaxonomy => "getTaxonomy",
            Method::GetTaxonomies => "getTaxonomies",
            Method::GetTerm => "getTerm",
            Method::GetTerms => "getTerms",
            Method::NewTerm => "newTerm",
            Method::EditTerm => "editTerm",
            Method::DeleteTerm => "deleteTerm",
            Method::GetMediaItem => "getMediaItem",
            Method::GetMediaLibrary => "getMediaLibrary",
            Method::UploadFile => "uploadFile",
            Method::GetCommentCount => "getCommentCount",
            Method::GetComment => "getComment",
            Method::GetComments => "getComments",
            Method::NewComment => "newComment",
            Method::EditComment => "editComment",
            Method::DeleteComment => "deleteComment",
            Method::GetCommentStatusList => "getCommentStatusList",
            Method::GetOptions => "getOptions",
            Method::SetOptions => "setOptions",
            Method::GetUsersBlogs => "getUsersBlogs",
            Method::GetUser => "getUser",
            Method::GetUsers => "getUsers",
            Method::GetProfile => "getProfile",
            Method::EditProfile => "editProfile",
            Method::CallCustomMethod => "callCustomMethod",
        }
    }

    /// Data-retrieval operations are the only ones eligible for query caching.
    pub fn is_data_retrieval(self) -> bool {
        self.name().starts_with(DATA_RETRIEVAL_PREFIX)
    }

    pub fn fallback_kind(self) -> FallbackKind {
        match self {
            Method::NewPost
            | Method::EditPost
            | Method::DeletePost
            | Method::NewTerm
            | Method::EditTerm
            | Method::DeleteTerm
            | Method::GetCommentCount
            | Method::NewComment
            | Method::EditComment
            | Method::DeleteComment
            | Method::EditProfile
            | Method::CallCustomMethod => FallbackKind::False,
            _ => FallbackKind::Empty,
        }
    }

    /// JSON form of the fallback, as returned by the dynamic entry point.
    pub fn fallback(self) -> Value {
        match self.fallback_kind() {
            FallbackKind::False => Value::Bool(false),
            FallbackKind::Empty => Value::Array(Vec::new()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a name is not on the allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|method| method.name() == name)
            .ok_or_else(|| UnknownMethod(name.to_string()))
    }
}
