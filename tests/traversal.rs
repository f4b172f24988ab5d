//! End-to-end traversal over canned API bodies.
//!
//! `JsonWiki` answers `execute` with raw JSON run through the real response
//! parser, so these tests cover parsing, continuation and the namespace
//! query together with the descent itself.

use catwalk::api::client::ApiResponse;
use catwalk::api::parser::parse_api_response;
use catwalk::{
    AppError, CategoryTraverser, Page, QueryParams, QueryResponse, Title, TraversalEvent,
    WikiErrorCode, WikiRepository,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const SITEINFO: &str = "siteinfo";

struct JsonWiki {
    /// Body per listing key (`<cmtitle>|<cmcontinue>`) or `siteinfo`.
    bodies: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl JsonWiki {
    fn new() -> Self {
        let mut wiki = Self {
            bodies: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        };
        wiki.serve(
            SITEINFO,
            json!({
                "batchcomplete": true,
                "query": {
                    "namespaces": {
                        "0": {"id": 0, "case": "first-letter", "name": "", "content": true},
                        "14": {"id": 14, "case": "first-letter", "name": "Category", "canonical": "Category"}
                    }
                }
            }),
        );
        wiki
    }

    fn serve(&mut self, key: &str, body: Value) {
        self.bodies.insert(key.to_string(), body.to_string());
    }

    /// Serves one complete batch of members for `category`.
    fn category(mut self, category: &str, members: &[(&str, i64)]) -> Self {
        self.serve(&format!("Category:{}|", category), listing(members, None));
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn listing(members: &[(&str, i64)], next: Option<&str>) -> Value {
    let members: Vec<Value> = members
        .iter()
        .enumerate()
        .map(|(i, (title, ns))| json!({"pageid": 100 + i, "ns": ns, "title": title}))
        .collect();
    let mut body = json!({"query": {"categorymembers": members}});
    match next {
        Some(token) => body["continue"] = json!({"cmcontinue": token, "continue": "-||"}),
        None => body["batchcomplete"] = json!(true),
    }
    body
}

#[async_trait::async_trait]
impl WikiRepository for JsonWiki {
    async fn execute(&self, params: &QueryParams) -> Result<QueryResponse, AppError> {
        let key = if params.get("meta") == Some("siteinfo") {
            SITEINFO.to_string()
        } else {
            format!(
                "{}|{}",
                params.get("cmtitle").unwrap_or_default(),
                params.get("cmcontinue").unwrap_or_default()
            )
        };
        self.requests.lock().unwrap().push(key.clone());

        let data = self.bodies.get(&key).cloned().unwrap_or_else(|| {
            json!({"error": {"code": "invalidcategory", "info": format!("no fixture for {}", key)}})
                .to_string()
        });
        parse_api_response(ApiResponse {
            data,
            status: reqwest::StatusCode::OK,
            url: "https://wiki.example.org/w/api.php".to_string(),
        })
    }
}

type EventLog = Arc<Mutex<Vec<(TraversalEvent, String, String)>>>;

fn record(traverser: &mut CategoryTraverser) -> EventLog {
    let log: EventLog = Arc::default();
    for event in [TraversalEvent::CategoryVisited, TraversalEvent::PageVisited] {
        let log = Arc::clone(&log);
        traverser.add_callback(event, move |member, parent| {
            log.lock()
                .unwrap()
                .push((event, member.to_string(), parent.to_string()));
            Ok(())
        });
    }
    log
}

fn titles(pages: &[Page]) -> Vec<&str> {
    pages.iter().map(|p| p.title().as_str()).collect()
}

#[tokio::test]
async fn collects_pages_from_nested_categories() {
    let wiki = JsonWiki::new()
        .category("A", &[("P1", 0), ("Category:B", 14)])
        .category("B", &[("P2", 0)]);
    let mut traverser = CategoryTraverser::new(Arc::new(wiki));
    let log = record(&mut traverser);

    let pages = traverser.descend(&Page::category("A").unwrap()).await.unwrap();

    assert_eq!(titles(&pages), vec!["P1", "P2"]);
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            (TraversalEvent::PageVisited, "P1".into(), "Category:A".into()),
            (TraversalEvent::CategoryVisited, "Category:B".into(), "Category:A".into()),
            (TraversalEvent::PageVisited, "P2".into(), "Category:B".into()),
        ]
    );
}

#[tokio::test]
async fn mutual_categories_report_the_loop() {
    let wiki = JsonWiki::new()
        .category("A", &[("Category:B", 14)])
        .category("B", &[("Category:A", 14)]);
    let mut traverser = CategoryTraverser::new(Arc::new(wiki));

    let err = traverser
        .descend(&Page::category("A").unwrap())
        .await
        .unwrap_err();

    let path: Vec<&str> = err
        .loop_path()
        .expect("a category loop")
        .iter()
        .map(|p| p.title().as_str())
        .collect();
    assert_eq!(path, vec!["Category:A", "Category:B", "Category:A"]);
    assert_eq!(
        err.to_string(),
        "Category loop detected: Category:A -> Category:B -> Category:A"
    );
}

#[tokio::test]
async fn page_under_two_parents_is_reported_twice() {
    let wiki = JsonWiki::new()
        .category("A", &[("Category:B", 14), ("Category:C", 14)])
        .category("B", &[("P", 0)])
        .category("C", &[("P", 0)]);
    let mut traverser = CategoryTraverser::new(Arc::new(wiki));
    let log = record(&mut traverser);

    let pages = traverser.descend(&Page::category("A").unwrap()).await.unwrap();

    assert_eq!(titles(&pages), vec!["P", "P"]);
    let page_events: Vec<(String, String)> = log
        .lock()
        .unwrap()
        .iter()
        .filter(|(event, _, _)| *event == TraversalEvent::PageVisited)
        .map(|(_, member, parent)| (member.clone(), parent.clone()))
        .collect();
    assert_eq!(
        page_events,
        vec![
            ("P".to_string(), "Category:B".to_string()),
            ("P".to_string(), "Category:C".to_string()),
        ]
    );
}

#[tokio::test]
async fn continued_listings_are_followed() {
    let mut wiki = JsonWiki::new();
    wiki.serve("Category:A|", listing(&[("P1", 0)], Some("page|P2|200")));
    wiki.serve("Category:A|page|P2|200", listing(&[("P2", 0)], None));
    let wiki = Arc::new(wiki);
    let mut traverser = CategoryTraverser::new(wiki.clone());

    let pages = traverser.descend(&Page::category("A").unwrap()).await.unwrap();

    assert_eq!(titles(&pages), vec!["P1", "P2"]);
    assert_eq!(
        wiki.requests(),
        vec!["siteinfo", "Category:A|", "Category:A|page|P2|200"]
    );
}

#[tokio::test]
async fn namespaces_are_fetched_once_across_descents() {
    let wiki = Arc::new(
        JsonWiki::new()
            .category("A", &[("P1", 0)])
            .category("B", &[("P2", 0)]),
    );
    let mut traverser = CategoryTraverser::new(wiki.clone());

    traverser.descend(&Page::category("A").unwrap()).await.unwrap();
    traverser.descend(&Page::category("B").unwrap()).await.unwrap();

    let siteinfo_requests = wiki
        .requests()
        .iter()
        .filter(|key| key.as_str() == SITEINFO)
        .count();
    assert_eq!(siteinfo_requests, 1);
}

#[tokio::test]
async fn api_errors_abort_the_descent() {
    let wiki = JsonWiki::new().category("A", &[("Category:Missing", 14)]);
    let mut traverser = CategoryTraverser::new(Arc::new(wiki));

    let err = traverser
        .descend(&Page::category("A").unwrap())
        .await
        .unwrap_err();

    match err {
        AppError::WikiService { code, .. } => assert_eq!(code, WikiErrorCode::InvalidCategory),
        other => panic!("expected a wiki service error, got {:?}", other),
    }
}

#[tokio::test]
async fn members_listing_uses_normalized_titles() {
    let wiki = JsonWiki::new().category("Living people", &[("Ada_Lovelace", 0)]);

    let members = wiki
        .list_category_members(&Title::category("living_people").unwrap())
        .await
        .unwrap();

    assert_eq!(titles(&members), vec!["Ada Lovelace"]);
}
