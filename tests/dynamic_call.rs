mod common;

use common::{blog, strict_blog};
use serde_json::{Value, json};
use wpbridge::{ClientError, Method, WordpressError};

#[tokio::test]
async fn unknown_method_is_not_supported() {
    let blog = blog();

    for name in ["getPostMeta", "GETPOST", "init", ""] {
        let err = blog
            .call(name, vec![])
            .await
            .expect_err("name is rejected");
        assert!(
            matches!(&err, WordpressError::MethodNotSupported { method } if method == name),
            "unexpected error for {name:?}: {err}"
        );
    }
    assert!(blog.client().state().calls().is_empty());
}

#[tokio::test]
async fn positional_arguments_reach_the_client() {
    let blog = blog();

    let post = blog
        .call("getPost", vec![json!(42), json!(["post_title"])])
        .await
        .expect("getPost");
    assert_eq!(post.value()["post_id"], json!(42));

    let id = blog
        .call(
            "newPost",
            vec![json!("Title"), json!("Body"), json!({"post_status": "draft"})],
        )
        .await
        .expect("newPost");
    assert_eq!(id.into_value(), json!(102));

    let calls = blog.client().state().calls();
    assert_eq!(calls[0].args, json!([42, ["post_title"]]));
    assert_eq!(calls[1].args, json!(["Title", "Body", {"post_status": "draft"}]));
}

#[tokio::test]
async fn omitted_and_null_optionals_take_defaults() {
    let blog = blog();

    blog.call("getPosts", vec![]).await.expect("getPosts");
    blog.call("getUser", vec![json!(3), Value::Null])
        .await
        .expect("getUser");
    blog.call("newTerm", vec![json!("Rust"), json!("post_tag")])
        .await
        .expect("newTerm");

    let calls = blog.client().state().calls();
    assert_eq!(calls[0].args, json!([{}, []]));
    assert_eq!(calls[1].args, json!([3, []]));
    assert_eq!(calls[2].args, json!([{"name": "Rust", "taxonomy": "post_tag"}]));
}

#[tokio::test]
async fn empty_list_is_accepted_as_empty_struct() {
    let blog = blog();

    blog.call("getComments", vec![json!([])])
        .await
        .expect("getComments");
    assert_eq!(blog.client().state().calls()[0].args, json!([{}]));
}

#[tokio::test]
async fn malformed_arguments_are_rejected() {
    let blog = blog();

    let cases = [
        ("getPost", vec![]),
        ("getPost", vec![json!("forty-two")]),
        ("deletePost", vec![json!(1), json!(2)]),
        ("editPost", vec![json!(1), json!([1, 2])]),
        ("getPostFormats", vec![json!(true)]),
    ];
    for (name, args) in cases {
        let err = blog
            .call(name, args)
            .await
            .expect_err("arguments are rejected");
        assert!(
            matches!(err, WordpressError::InvalidArguments { .. }),
            "unexpected error for {name}: {err}"
        );
    }
    assert!(blog.client().state().calls().is_empty());
}

#[tokio::test]
async fn upload_accepts_text_or_bytes() {
    let blog = blog();

    let text = blog
        .call("uploadFile", vec![json!("a.txt"), json!("text/plain"), json!("hello")])
        .await
        .expect("text upload");
    let bytes = blog
        .call(
            "uploadFile",
            vec![json!("b.bin"), json!("application/octet-stream"), json!([0, 255])],
        )
        .await
        .expect("byte upload");

    assert_eq!(text.value()["size"], json!(5));
    assert_eq!(bytes.value()["size"], json!(2));
}

#[tokio::test]
async fn custom_method_forwards_name_and_arguments() {
    let blog = blog();

    let result = blog
        .call("callCustomMethod", vec![json!("jetpack.stats"), json!([7, "day"])])
        .await
        .expect("callCustomMethod");

    assert_eq!(result.value()["method"], json!("jetpack.stats"));
    assert_eq!(result.value()["args"], json!([7, "day"]));
}

#[tokio::test]
async fn caught_failures_return_json_fallbacks() {
    let blog = blog();
    let state = blog.client().state();
    for method in Method::ALL {
        state.fail(method.name(), ClientError::transport("offline"));
    }

    let post = blog.call("getPost", vec![json!(1)]).await.expect("caught");
    assert!(post.is_fallback());
    assert_eq!(post.value(), &json!([]));

    let id = blog
        .call("newPost", vec![json!("t"), json!("b")])
        .await
        .expect("caught");
    assert_eq!(id.value(), &json!(false));

    let counts = blog
        .call("getCommentCount", vec![json!(1)])
        .await
        .expect("caught");
    assert_eq!(counts.value(), &json!(false));

    let custom = blog
        .call("callCustomMethod", vec![json!("demo.sayHello")])
        .await
        .expect("caught");
    assert_eq!(custom.value(), &json!(false));
}

#[tokio::test]
async fn uncaught_failures_propagate() {
    let blog = strict_blog();
    blog.client()
        .state()
        .fail("getTaxonomies", ClientError::fault(403, "Forbidden"));

    let err = blog
        .call("getTaxonomies", vec![])
        .await
        .expect_err("failure propagates");
    assert_eq!(
        err.client_error(),
        Some(&ClientError::fault(403, "Forbidden"))
    );
}

#[tokio::test]
async fn dynamic_calls_share_the_query_cache() {
    let blog = blog();

    let second = blog
        .cache(None, None, |blog| async move {
            blog.get_term(3, "category").await?;
            blog.call("getTerm", vec![json!(3), json!("category")]).await
        })
        .await
        .expect("scoped calls");

    assert!(second.is_cached());
    assert_eq!(second.value()["fetch"], json!(1));
    assert_eq!(blog.client().state().count("getTerm"), 1);
}
