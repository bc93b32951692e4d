use super::*;
use crate::config::ClientConfig;
use crate::request::{HttpMethod, MockHttpClient};
use crate::session::{MemoryStorage, SessionContext};
use serde::Deserialize;
use serde_json::json;
use std::cell::Cell;

// =========================================================
// Helpers
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Products,
    Orders,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Row {
    id: RecordId,
    #[serde(default)]
    name: String,
}

impl RecordRow for Row {
    fn id(&self) -> RecordId {
        self.id.clone()
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone()]
    }

    // orders are read-only
    fn location(&self) -> Option<(String, &'static str)> {
        match &self.id {
            RecordId::Int(n) if *n < 100 => Some((format!("{}{}/", PRODUCTS, n), "Products")),
            _ => None,
        }
    }
}

const BASE: &str = "http://api.test";
const PRODUCTS: &str = "/api/marketplace/products/";
const ORDERS: &str = "/api/marketplace/orders/";

type TestClient = ResourceClient<Rc<MockHttpClient>, MemoryStorage>;

fn client() -> (TestClient, Rc<MockHttpClient>) {
    let mock = Rc::new(MockHttpClient::new());
    let storage = MemoryStorage::new();
    storage.set("authToken", "T0");
    let client = ResourceClient::new(
        ClientConfig::new(BASE),
        mock.clone(),
        SessionContext::new(storage),
    );
    (client, mock)
}

fn path_fetcher(client: &TestClient, path: &'static str, label: &'static str) -> Fetcher<Row> {
    let client = client.clone();
    Rc::new(move || {
        let client = client.clone();
        async move { client.list_at::<Row>(path, label).await }.boxed_local()
    })
}

fn config(client: &TestClient) -> BrowserConfig<Tab, Row> {
    BrowserConfig::new("Marketplace")
        .collection(
            Tab::Products,
            "Products",
            &["ID", "Name"],
            path_fetcher(client, PRODUCTS, "Products"),
        )
        .creatable()
        .empty_message("No products yet. Create one.")
        .collection(
            Tab::Orders,
            "Orders",
            &["ID", "Name"],
            path_fetcher(client, ORDERS, "Orders"),
        )
}

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

fn ids(records: &[Row]) -> Vec<RecordId> {
    records.iter().map(Row::id).collect()
}

// =========================================================
// State machine
// =========================================================

#[test]
fn starts_idle_on_the_first_tab() {
    let state = BrowserState::<Tab, Row>::new(&[Tab::Products, Tab::Orders]).unwrap();
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.active_tab(), Tab::Products);
    assert_eq!(state.visible(), Visible::Loading);
    assert!(BrowserState::<Tab, Row>::new(&[]).is_none());
}

#[test]
fn results_from_a_superseded_load_are_dropped() {
    let mut state = BrowserState::<Tab, Row>::new(&[Tab::Products]).unwrap();
    let old = state.begin_load(&[Tab::Products]);
    let current = state.begin_load(&[Tab::Products]);

    let stale = vec![Row {
        id: RecordId::Int(99),
        name: "stale".into(),
    }];
    assert!(!state.apply(old, Tab::Products, Ok(stale)));
    assert!(state.is_loading());

    assert!(state.apply(current, Tab::Products, Ok(vec![])));
    assert_eq!(state.phase(), Phase::Ready);
    assert_eq!(state.visible(), Visible::Empty);
}

#[test]
fn results_after_unmount_are_dropped() {
    let mut state = BrowserState::<Tab, Row>::new(&[Tab::Products]).unwrap();
    let ticket = state.begin_load(&[Tab::Products]);
    state.unmount();

    assert!(!state.apply(ticket, Tab::Products, Ok(vec![])));
    assert_eq!(state.status(Tab::Products), Some(&SlotStatus::Pending));
}

#[test]
fn phase_fails_only_when_every_fetch_failed() {
    let mut state = BrowserState::<Tab, Row>::new(&[Tab::Products, Tab::Orders]).unwrap();
    let ticket = state.begin_load(&[Tab::Products, Tab::Orders]);

    state.apply(ticket, Tab::Orders, Err(ClientError::Transport("down".into())));
    assert!(state.is_loading());
    state.apply(ticket, Tab::Products, Err(ClientError::Unauthenticated));

    assert_eq!(state.phase(), Phase::Failed);
    // first failure to arrive wins the banner
    assert_eq!(state.banner(), Some("Could not reach the server: down"));
}

#[test]
fn partial_refetch_keeps_untouched_failures_on_the_banner() {
    let mut state = BrowserState::<Tab, Row>::new(&[Tab::Products, Tab::Orders]).unwrap();
    let first = state.begin_load(&[Tab::Products, Tab::Orders]);
    state.apply(first, Tab::Products, Ok(vec![]));
    state.apply(first, Tab::Orders, Err(ClientError::Transport("down".into())));
    assert_eq!(state.phase(), Phase::Ready);

    let second = state.begin_load(&[Tab::Products]);
    assert_eq!(state.banner(), Some("Could not reach the server: down"));

    state.apply(second, Tab::Products, Ok(vec![]));
    assert_eq!(state.phase(), Phase::Ready);
    assert_eq!(state.banner(), Some("Could not reach the server: down"));

    // a full reload starts with a clean banner
    let third = state.begin_load(&[Tab::Products, Tab::Orders]);
    assert_eq!(state.banner(), None);
    state.apply(third, Tab::Orders, Ok(vec![]));
    state.apply(third, Tab::Products, Ok(vec![]));
    assert_eq!(state.banner(), None);
}

#[test]
fn edit_modal_holds_a_copy() {
    let mut state = BrowserState::<Tab, Row>::new(&[Tab::Products]).unwrap();
    let ticket = state.begin_load(&[Tab::Products]);
    let row = Row {
        id: RecordId::Int(1),
        name: "Pack".into(),
    };
    state.apply(ticket, Tab::Products, Ok(vec![row.clone()]));

    assert!(!state.open_edit(&RecordId::Int(2)));
    assert_eq!(state.modal(), &ModalSlot::Closed);

    assert!(state.open_edit(&RecordId::Int(1)));
    assert_eq!(state.modal(), &ModalSlot::Edit(row.clone()));
    assert_eq!(state.records(Tab::Products), &[row]);

    state.close_modal();
    state.open_create();
    assert_eq!(state.modal(), &ModalSlot::Create);
}

// =========================================================
// Driver
// =========================================================

#[tokio::test]
async fn partial_failure_still_shows_the_other_collection() {
    let (client, mock) = client();
    mock.mock_failure(HttpMethod::Get, &url(PRODUCTS), "connection refused");
    mock.mock_json(HttpMethod::Get, &url(ORDERS), 200, json!([{"id": 1}]));
    let browser = ResourceBrowser::new(config(&client)).unwrap();

    browser.load().await;

    let state = browser.state();
    assert_eq!(state.phase(), Phase::Ready);
    assert_eq!(
        state.banner(),
        Some("Could not reach the server: connection refused")
    );
    assert!(matches!(state.visible(), Visible::Failed(_)));
    assert_eq!(ids(state.records(Tab::Orders)), vec![RecordId::Int(1)]);
    drop(state);

    browser.update(|s| s.select_tab(Tab::Orders));
    match browser.state().visible() {
        Visible::Records(rows) => assert_eq!(rows.len(), 1),
        other => panic!("expected records, got {:?}", other),
    }
}

#[tokio::test]
async fn switching_tabs_never_fetches() {
    let (client, mock) = client();
    mock.mock_json(HttpMethod::Get, &url(PRODUCTS), 200, json!([]));
    mock.mock_json(HttpMethod::Get, &url(ORDERS), 200, json!([{"id": 4}]));
    let browser = ResourceBrowser::new(config(&client)).unwrap();
    browser.load().await;
    assert_eq!(mock.request_count(), 2);

    browser.update(|s| s.select_tab(Tab::Orders));
    browser.update(|s| s.select_tab(Tab::Products));

    assert_eq!(mock.request_count(), 2);
    assert_eq!(browser.state().visible(), Visible::Empty);
    assert_eq!(
        browser.config().spec(Tab::Products).unwrap().empty_message,
        "No products yet. Create one."
    );
}

#[tokio::test]
async fn deleted_record_is_gone_after_the_refetch() {
    let (client, mock) = client();
    mock.mock_json(
        HttpMethod::Get,
        &url(PRODUCTS),
        200,
        json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]),
    );
    mock.mock_json(HttpMethod::Get, &url(PRODUCTS), 200, json!([{"id": 1, "name": "a"}]));
    mock.mock_json(HttpMethod::Get, &url(ORDERS), 200, json!([]));
    mock.mock_no_content(HttpMethod::Delete, &url("/api/marketplace/products/2/"));

    let browser = ResourceBrowser::new(config(&client)).unwrap();
    browser.load().await;
    assert_eq!(browser.state().records(Tab::Products).len(), 2);

    let removed = browser
        .remove(&client, Tab::Products, &RecordId::Int(2))
        .await
        .unwrap();

    assert!(removed);
    assert_eq!(
        ids(browser.state().records(Tab::Products)),
        vec![RecordId::Int(1)]
    );
    // delete + two refetches on top of the initial two lists
    assert_eq!(mock.request_count(), 5);
}

#[tokio::test]
async fn read_only_or_unknown_rows_are_not_deleted() {
    let (client, mock) = client();
    mock.mock_json(HttpMethod::Get, &url(PRODUCTS), 200, json!([{"id": 1}]));
    mock.mock_json(HttpMethod::Get, &url(ORDERS), 200, json!([{"id": 500}]));
    let browser = ResourceBrowser::new(config(&client)).unwrap();
    browser.load().await;

    let unknown = browser.remove(&client, Tab::Products, &RecordId::Int(9)).await;
    let read_only = browser.remove(&client, Tab::Orders, &RecordId::Int(500)).await;

    assert_eq!(unknown, Ok(false));
    assert_eq!(read_only, Ok(false));
    assert_eq!(mock.request_count(), 2);
}

#[tokio::test]
async fn mutated_policy_refetches_one_collection_and_closes_modal() {
    let (client, mock) = client();
    mock.mock_json(HttpMethod::Get, &url(PRODUCTS), 200, json!([{"id": 1}]));
    mock.mock_json(HttpMethod::Get, &url(ORDERS), 200, json!([]));
    mock.mock_json(HttpMethod::Post, &url(PRODUCTS), 201, json!({"id": 2}));

    let browser = ResourceBrowser::new(config(&client).invalidation(InvalidationPolicy::Mutated))
        .unwrap();
    browser.load().await;
    browser.update(|s| s.open_create());

    let created: crate::client::Mutation<Row> = browser
        .run_mutation(
            Tab::Products,
            client.create_at(PRODUCTS, "Products", &json!({"name": "new"})),
        )
        .await
        .unwrap();

    assert_eq!(created.into_record().unwrap().id, RecordId::Int(2));
    assert_eq!(browser.state().modal(), &ModalSlot::Closed);
    let gets = mock
        .requests
        .borrow()
        .iter()
        .filter(|r| r.method == HttpMethod::Get)
        .count();
    assert_eq!(gets, 3);
}

#[tokio::test]
async fn failed_refetch_of_one_collection_keeps_the_browser_ready() {
    let (client, mock) = client();
    mock.mock_json(HttpMethod::Get, &url(PRODUCTS), 200, json!([{"id": 1}]));
    mock.mock_failure(HttpMethod::Get, &url(PRODUCTS), "connection refused");
    mock.mock_json(HttpMethod::Get, &url(ORDERS), 200, json!([{"id": 500}]));
    mock.mock_json(HttpMethod::Post, &url(PRODUCTS), 201, json!({"id": 2}));

    let browser = ResourceBrowser::new(config(&client).invalidation(InvalidationPolicy::Mutated))
        .unwrap();
    browser.load().await;
    browser.update(|s| s.open_create());

    let created: crate::client::Mutation<Row> = browser
        .run_mutation(
            Tab::Products,
            client.create_at(PRODUCTS, "Products", &json!({"name": "new"})),
        )
        .await
        .unwrap();
    assert!(created.into_record().is_some());

    let state = browser.state();
    assert_eq!(state.phase(), Phase::Ready);
    assert_eq!(ids(state.records(Tab::Orders)), vec![RecordId::Int(500)]);
    assert_eq!(
        state.banner(),
        Some("Could not reach the server: connection refused")
    );
    assert!(matches!(
        state.status(Tab::Products),
        Some(SlotStatus::Failed(_))
    ));
}

#[tokio::test]
async fn invalidate_follows_the_policy_and_leaves_the_modal_alone() {
    let (client, mock) = client();
    mock.mock_json(HttpMethod::Get, &url(PRODUCTS), 200, json!([{"id": 1}]));
    mock.mock_json(HttpMethod::Get, &url(PRODUCTS), 200, json!([{"id": 1}, {"id": 2}]));
    mock.mock_json(HttpMethod::Get, &url(ORDERS), 200, json!([]));

    let browser = ResourceBrowser::new(config(&client).invalidation(InvalidationPolicy::Mutated))
        .unwrap();
    browser.load().await;
    browser.update(|s| s.open_create());
    browser.invalidate(Tab::Products).await;

    let state = browser.state();
    assert_eq!(
        ids(state.records(Tab::Products)),
        vec![RecordId::Int(1), RecordId::Int(2)]
    );
    assert_eq!(state.modal(), &ModalSlot::Create);
    assert_eq!(mock.request_count(), 3);
}

#[tokio::test]
async fn failed_mutation_keeps_state_and_modal() {
    let (client, mock) = client();
    mock.mock_json(HttpMethod::Get, &url(PRODUCTS), 200, json!([{"id": 1}]));
    mock.mock_json(HttpMethod::Get, &url(ORDERS), 200, json!([]));
    mock.mock_json(
        HttpMethod::Delete,
        &url("/api/marketplace/products/1/"),
        403,
        json!({"detail": "You do not have permission to perform this action."}),
    );

    let browser = ResourceBrowser::new(config(&client)).unwrap();
    browser.load().await;
    browser.update(|s| {
        s.open_edit(&RecordId::Int(1));
    });

    let err = browser
        .run_mutation(
            Tab::Products,
            client.remove_at("/api/marketplace/products/1/", "Products"),
        )
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert!(matches!(browser.state().modal(), ModalSlot::Edit(_)));
    assert_eq!(browser.state().records(Tab::Products).len(), 1);
    assert_eq!(mock.request_count(), 3);
}

#[tokio::test]
async fn listener_sees_every_change_and_unmount_freezes_state() {
    let (client, mock) = client();
    mock.mock_json(HttpMethod::Get, &url(PRODUCTS), 200, json!([]));
    mock.mock_json(HttpMethod::Get, &url(ORDERS), 200, json!([]));
    let changes = Rc::new(Cell::new(0));
    let counter = changes.clone();
    let browser = ResourceBrowser::new(config(&client))
        .unwrap()
        .with_listener(move || counter.set(counter.get() + 1));

    browser.load().await;
    // begin + one per collection
    assert_eq!(changes.get(), 3);

    browser.unmount();
    browser.load().await;
    assert_eq!(changes.get(), 3);
    assert_eq!(browser.state().phase(), Phase::Ready);
    assert_eq!(mock.request_count(), 2);
}

#[tokio::test]
async fn unauthenticated_browser_fails_without_requests() {
    let mock = Rc::new(MockHttpClient::new());
    let client = ResourceClient::new(
        ClientConfig::new(BASE),
        mock.clone(),
        SessionContext::new(MemoryStorage::new()),
    );
    let browser = ResourceBrowser::new(config(&client)).unwrap();

    browser.load().await;

    assert_eq!(browser.state().phase(), Phase::Failed);
    assert_eq!(browser.state().banner(), Some("You are not signed in"));
    assert_eq!(mock.request_count(), 0);
}
