use std::fmt;

use tracing::debug;

use crate::client::Client;
use crate::error::Result;
use crate::models::{link_fullname, Link, LinkPage, ListingResponse};

/// Sort order of a community's link listing.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sort {
    Hot,
    New,
    Top,
}

impl Sort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sort::Hot => "hot",
            Sort::New => "new",
            Sort::Top => "top",
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Client {
    /// Retrieves a listing of hot links.
    pub async fn get_hot_links(&self, subreddit: &str) -> Result<Vec<Link>> {
        self.get_links(subreddit, Sort::Hot).await
    }

    /// Retrieves a listing of new links.
    pub async fn get_new_links(&self, subreddit: &str) -> Result<Vec<Link>> {
        self.get_links(subreddit, Sort::New).await
    }

    /// Retrieves a listing of top links.
    pub async fn get_top_links(&self, subreddit: &str) -> Result<Vec<Link>> {
        self.get_links(subreddit, Sort::Top).await
    }

    pub async fn get_links(&self, subreddit: &str, sort: Sort) -> Result<Vec<Link>> {
        Ok(self.get_links_page(subreddit, sort).await?.links)
    }

    /// Fetches the first page of `/r/{subreddit}/{sort}.json`.
    ///
    /// `subreddit` goes into the path as is; the caller must make sure it is
    /// path-safe.
    pub async fn get_links_page(&self, subreddit: &str, sort: Sort) -> Result<LinkPage> {
        let url = self.endpoint(&format!("/r/{}/{}.json", subreddit, sort));
        let listing: ListingResponse = self.get_json(&url).await?;
        let page = LinkPage::from(listing);
        debug!(
            subreddit,
            %sort,
            links = page.links.len(),
            after = ?page.after,
            "decoded listing"
        );
        Ok(page)
    }

    /// Deletes a link submitted by the authenticated user. Requires the
    /// `edit` scope.
    pub async fn delete_link(&self, link_id: &str) -> Result<()> {
        self.delete_thing(&link_fullname(link_id)).await
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;

    use reqwest::StatusCode;
    use serde_json::{json, Value};
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::ClientConfig;
    use crate::error::Error;

    fn client_for(server: &MockServer) -> Client {
        Client::new(ClientConfig {
            base_url: server.uri(),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    fn envelope(children: Vec<Value>, after: Value) -> Value {
        json!({
            "kind": "Listing",
            "data": {
                "modhash": "",
                "children": children,
                "after": after,
                "before": null
            }
        })
    }

    async fn serve_listing(server: &MockServer, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[test]
    fn sort_path_segments() {
        assert_eq!(Sort::Hot.as_str(), "hot");
        assert_eq!(Sort::New.to_string(), "new");
        assert_eq!(Sort::Top.as_str(), "top");
    }

    #[tokio::test]
    async fn hot_links_for_community() {
        let server = MockServer::start().await;
        serve_listing(
            &server,
            "/r/golang/hot.json",
            envelope(
                vec![json!({ "kind": "t3", "data": { "id": "abc", "title": "Hello", "score": 42 } })],
                Value::Null,
            ),
        )
        .await;

        let links = client_for(&server).get_hot_links("golang").await.unwrap();

        let expected = vec![Link {
            id: "abc".to_string(),
            title: "Hello".to_string(),
            score: 42,
            ..Link::default()
        }];
        assert_eq!(links, expected);
    }

    #[tokio::test]
    async fn new_links_keep_server_order() {
        let server = MockServer::start().await;
        let children = ["c", "a", "b"]
            .iter()
            .map(|id| json!({ "kind": "t3", "data": { "id": id } }))
            .collect();
        serve_listing(&server, "/r/rust/new.json", envelope(children, Value::Null)).await;

        let links = client_for(&server).get_new_links("rust").await.unwrap();

        let ids: Vec<_> = links.iter().map(|link| link.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn able_to_get_links_from_resource_listing() {
        let mut filepath = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        filepath.push("src/resources/listing.json");
        let contents = fs::read_to_string(filepath)
            .expect("Should have been able to read the test resource file");

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/golang/hot.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(contents))
            .mount(&server)
            .await;

        let page = client_for(&server)
            .get_links_page("golang", Sort::Hot)
            .await
            .unwrap();

        assert_eq!(page.links.len(), 3);
        assert_eq!(page.links[1].title, "Concurrency is not Parallelism");
        assert_eq!(page.after.as_deref(), Some("t3_koo1z8"));
    }

    #[tokio::test]
    async fn empty_listing_is_not_an_error() {
        let server = MockServer::start().await;
        serve_listing(&server, "/r/quiet/hot.json", envelope(vec![], Value::Null)).await;

        let page = client_for(&server)
            .get_links_page("quiet", Sort::Hot)
            .await
            .unwrap();

        assert!(page.links.is_empty());
        assert_eq!(page.after, None);
    }

    #[tokio::test]
    async fn top_listing_exposes_after_cursor() {
        let server = MockServer::start().await;
        serve_listing(
            &server,
            "/r/golang/top.json",
            envelope(
                vec![json!({ "kind": "t3", "data": { "id": "def" } })],
                json!("t3_def"),
            ),
        )
        .await;

        let page = client_for(&server)
            .get_links_page("golang", Sort::Top)
            .await
            .unwrap();

        assert_eq!(page.after.as_deref(), Some("t3_def"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/golang/hot.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"kind\": \"Listing\", \"data\": ["))
            .mount(&server)
            .await;

        let err = client_for(&server).get_hot_links("golang").await.unwrap_err();
        assert!(matches!(err, Error::Decode { .. }), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn mistyped_children_are_a_decode_error() {
        let server = MockServer::start().await;
        serve_listing(
            &server,
            "/r/golang/hot.json",
            envelope(
                vec![
                    json!({ "kind": "t3", "data": { "id": "ok" } }),
                    json!({ "kind": "t3", "data": { "id": "bad", "score": "many" } }),
                ],
                Value::Null,
            ),
        )
        .await;

        let err = client_for(&server).get_hot_links("golang").await.unwrap_err();
        assert!(matches!(err, Error::Decode { .. }), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn missing_community_is_a_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/nope/hot.json"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found", "error": 404 })))
            .mount(&server)
            .await;

        let err = client_for(&server).get_hot_links("nope").await.unwrap_err();
        assert!(
            matches!(err, Error::HttpStatus { status, .. } if status == StatusCode::NOT_FOUND),
            "unexpected error: {err:?}"
        );
    }

    #[tokio::test]
    async fn connection_failure_is_a_transport_error() {
        let client = Client::new(ClientConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: Some(Duration::from_secs(5)),
            ..ClientConfig::default()
        })
        .unwrap();

        let err = client.get_top_links("golang").await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn listing_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/golang/new.json"))
            .and(header("authorization", "Bearer token123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![], Value::Null)))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new(ClientConfig {
            base_url: server.uri(),
            access_token: Some("token123".to_string()),
            ..ClientConfig::default()
        })
        .unwrap();

        assert!(client.get_new_links("golang").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_link_uses_link_fullname_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/del"))
            .and(body_string("id=t3_xyz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).delete_link("xyz").await.unwrap();
    }

    #[tokio::test]
    async fn delete_link_passes_authorization_failure_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/del"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).delete_link("xyz").await.unwrap_err();
        assert!(
            matches!(err, Error::Authorization { status, .. } if status == StatusCode::UNAUTHORIZED),
            "unexpected error: {err:?}"
        );
    }
}
