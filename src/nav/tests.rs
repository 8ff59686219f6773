use super::*;
use crate::timeline::Pin;
use chrono::TimeZone;
use reqwest::Method;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex as StdMutex;
use tokio::sync::oneshot;

/// In-memory fetcher answering from scripted responses keyed by method and
/// path. The last response of a script is repeated for further calls.
#[derive(Default)]
struct ScriptedFetcher {
    unconfigured: bool,
    responses: StdMutex<HashMap<String, VecDeque<Result<Value, FetchError>>>>,
    calls: StdMutex<Vec<Endpoint>>,
    gates: StdMutex<HashMap<String, oneshot::Receiver<()>>>,
}

fn script_key(method: &Method, path: &str) -> String {
    format!("{} {}", method, path)
}

impl ScriptedFetcher {
    fn respond(&self, method: Method, path: &str, value: Value) {
        self.push(method, path, Ok(value));
    }

    fn fail(&self, method: Method, path: &str, status: u16) {
        self.push(method, path, Err(FetchError::status(status, "scripted failure")));
    }

    fn push(&self, method: Method, path: &str, response: Result<Value, FetchError>) {
        self.responses
            .lock()
            .unwrap()
            .entry(script_key(&method, path))
            .or_default()
            .push_back(response);
    }

    /// Hold the next call to the path until the returned sender fires.
    fn hold(&self, method: Method, path: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .unwrap()
            .insert(script_key(&method, path), rx);
        tx
    }

    fn calls_to(&self, method: Method, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.method == method && e.path == path)
            .count()
    }

    fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn last_call(&self) -> Option<Endpoint> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl Fetch for ScriptedFetcher {
    fn is_configured(&self) -> bool {
        !self.unconfigured
    }

    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, FetchError> {
        self.calls.lock().unwrap().push(endpoint.clone());
        let key = script_key(&endpoint.method, &endpoint.path);
        let response = {
            let mut responses = self.responses.lock().unwrap();
            match responses.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
                Some(queue) => queue.front().cloned().unwrap(),
                None => Err(FetchError::status(404, &format!("no script for {}", key))),
            }
        };
        let gate = self.gates.lock().unwrap().remove(&key);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        response
    }
}

#[derive(Default)]
struct RecordingSink {
    pins: StdMutex<Vec<Pin>>,
}

impl PinSink for RecordingSink {
    async fn insert_pin(&self, pin: &Pin) -> Result<(), FetchError> {
        self.pins.lock().unwrap().push(pin.clone());
        Ok(())
    }
}

fn navigator() -> Navigator<ScriptedFetcher> {
    Navigator::new(ScriptedFetcher::default())
}

fn boards_payload() -> Value {
    json!([
        { "id": "b1", "name": "Roadmap", "closed": false, "idOrganization": null },
        { "id": "b2", "name": "Archive", "closed": true, "idOrganization": null },
    ])
}

fn lists_payload(l1: &[&str], l2: &[&str]) -> Value {
    let cards = |list: &str, ids: &[&str]| -> Vec<Value> {
        ids.iter()
            .map(|id| {
                json!({
                    "id": id,
                    "name": format!("Card {}", id),
                    "idList": list,
                    "idBoard": "B1"
                })
            })
            .collect()
    };
    json!([
        { "id": "L1", "name": "Todo", "idBoard": "B1", "cards": cards("L1", l1) },
        { "id": "L2", "name": "Done", "idBoard": "B1", "cards": cards("L2", l2) },
    ])
}

fn card_payload(list: &str) -> Value {
    json!({
        "id": "C123",
        "name": "Release notes",
        "idList": list,
        "idBoard": "B1",
        "desc": "Write them",
        "due": null,
        "badges": { "checkItems": 1 }
    })
}

fn checklists_payload(state: &str) -> Value {
    json!([
        {
            "id": "CL1",
            "name": "Steps",
            "idCard": "C1",
            "checkItems": [
                { "id": "I1", "name": "Draft", "state": state, "idChecklist": "CL1" }
            ]
        }
    ])
}

fn group_ids(view: &View) -> Vec<(Option<String>, Vec<String>)> {
    view.groups()
        .iter()
        .map(|g| (g.key.clone(), g.items.iter().map(|i| i.id.clone()).collect()))
        .collect()
}

fn committed(outcome: Outcome) -> (ViewState, Arc<View>, bool) {
    match outcome {
        Outcome::Committed {
            location,
            view,
            cached,
        } => (location, view, cached),
        other => panic!("expected a committed view, got {:?}", other),
    }
}

/// Navigate and expect the view to be committed.
async fn visit(
    nav: &Navigator<ScriptedFetcher>,
    target: ViewState,
) -> (ViewState, Arc<View>, bool) {
    committed(nav.navigate(target).await.unwrap())
}

async fn checklists_view(nav: &Navigator<ScriptedFetcher>) -> Arc<View> {
    let key = ContextKey::Checklists {
        card_id: "C1".into(),
    };
    nav.cached(&key).await.unwrap()
}

#[tokio::test]
async fn cache_hit_issues_one_fetch() {
    let nav = navigator();
    nav.fetcher()
        .respond(Method::GET, "members/me/boards", boards_payload());

    let (_, first, cached) = visit(&nav, ViewState::boards(BoardFilter::Open)).await;
    assert!(!cached);
    let (_, second, cached) = visit(&nav, ViewState::boards(BoardFilter::Open)).await;
    assert!(cached);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(nav.fetcher().calls_to(Method::GET, "members/me/boards"), 1);
    assert_eq!(group_ids(&first), vec![(None, vec!["b1".to_string()])]);
}

#[tokio::test]
async fn different_filter_misses_cache() {
    let nav = navigator();
    nav.fetcher()
        .respond(Method::GET, "members/me/boards", boards_payload());

    visit(&nav, ViewState::boards(BoardFilter::Open)).await;
    visit(&nav, ViewState::boards(BoardFilter::Private)).await;
    assert_eq!(nav.fetcher().calls_to(Method::GET, "members/me/boards"), 2);
}

#[tokio::test]
async fn lists_are_cached_per_board() {
    let nav = navigator();
    nav.fetcher()
        .respond(Method::GET, "boards/A/lists", lists_payload(&["c1"], &[]));
    nav.fetcher()
        .respond(Method::GET, "boards/B/lists", lists_payload(&["c2"], &[]));

    visit(&nav, ViewState::lists("A", "Alpha")).await;
    visit(&nav, ViewState::lists("B", "Beta")).await;
    let (_, _, cached) = visit(&nav, ViewState::lists("A", "Alpha")).await;
    assert!(cached);
    assert_eq!(nav.fetcher().calls_to(Method::GET, "boards/A/lists"), 1);
    assert_eq!(nav.fetcher().calls_to(Method::GET, "boards/B/lists"), 1);
}

#[tokio::test]
async fn refresh_refetches_current_view_only() {
    let nav = navigator();
    nav.fetcher()
        .respond(Method::GET, "boards/A/lists", lists_payload(&["c1"], &[]));
    nav.fetcher()
        .respond(Method::GET, "boards/B/lists", lists_payload(&["c2"], &[]));

    visit(&nav, ViewState::lists("A", "Alpha")).await;
    let (location, _, cached) = committed(nav.refresh().await.unwrap());
    assert!(!cached);
    assert_eq!(location, ViewState::lists("A", "Alpha"));
    assert_eq!(nav.fetcher().calls_to(Method::GET, "boards/A/lists"), 2);

    visit(&nav, ViewState::lists("B", "Beta")).await;
    visit(&nav, ViewState::lists("A", "Alpha")).await;
    assert_eq!(nav.fetcher().calls_to(Method::GET, "boards/A/lists"), 2);
    assert_eq!(nav.fetcher().calls_to(Method::GET, "boards/B/lists"), 1);
}

#[tokio::test]
async fn refresh_without_view_is_ignored() {
    let nav = navigator();
    assert!(matches!(nav.refresh().await.unwrap(), Outcome::Idle));
    assert_eq!(nav.fetcher().total_calls(), 0);
}

#[tokio::test]
async fn not_configured_fetches_nothing() {
    let nav = Navigator::new(ScriptedFetcher {
        unconfigured: true,
        ..Default::default()
    });
    let error = nav.navigate(ViewState::my_cards()).await.unwrap_err();
    assert_eq!(error, NavError::NotConfigured);
    assert_eq!(nav.fetcher().total_calls(), 0);
    assert!(nav.current().await.is_none());
}

#[tokio::test]
async fn failed_fetch_leaves_state_untouched() {
    let nav = navigator();
    nav.fetcher()
        .respond(Method::GET, "members/me/boards", boards_payload());
    nav.fetcher()
        .fail(Method::GET, "members/me/organizations", 500);

    visit(&nav, ViewState::boards(BoardFilter::Starred)).await;
    let error = nav.navigate(ViewState::organizations()).await.unwrap_err();
    assert!(matches!(error, NavError::Fetch(FetchError { status: Some(500), .. })));
    assert_eq!(
        nav.current().await,
        Some(ViewState::boards(BoardFilter::Starred))
    );
    assert!(nav.cached(&ContextKey::Organizations).await.is_none());
}

#[tokio::test]
async fn stale_response_does_not_overwrite_newer_view() {
    let nav = navigator();
    nav.fetcher()
        .respond(Method::GET, "members/me/boards", boards_payload());
    nav.fetcher().respond(
        Method::GET,
        "members/me/organizations",
        json!([{ "id": "o1", "displayName": "Acme" }]),
    );
    let release = nav.fetcher().hold(Method::GET, "members/me/boards");

    let boards = nav.navigate(ViewState::boards(BoardFilter::Open));
    let organizations = async {
        let outcome = nav.navigate(ViewState::organizations()).await;
        let _ = release.send(());
        outcome
    };
    let (boards, organizations) = tokio::join!(boards, organizations);

    assert!(matches!(boards.unwrap(), Outcome::Superseded));
    let (location, view, _) = committed(organizations.unwrap());
    assert_eq!(location, ViewState::organizations());
    assert_eq!(nav.current().await, Some(ViewState::organizations()));
    assert!(Arc::ptr_eq(
        &nav.cached(&ContextKey::Organizations).await.unwrap(),
        &view
    ));
    assert!(nav
        .cached(&ContextKey::Boards {
            filter: BoardFilter::Open
        })
        .await
        .is_none());
}

#[tokio::test]
async fn earlier_refresh_resolving_later_is_discarded() {
    let nav = navigator();
    let orgs = |name: &str| json!([{ "id": "o1", "displayName": name }]);
    nav.fetcher()
        .respond(Method::GET, "members/me/organizations", orgs("initial"));
    nav.fetcher()
        .respond(Method::GET, "members/me/organizations", orgs("older"));
    nav.fetcher()
        .respond(Method::GET, "members/me/organizations", orgs("newer"));
    visit(&nav, ViewState::organizations()).await;

    let release = nav.fetcher().hold(Method::GET, "members/me/organizations");
    let first = nav.refresh();
    let second = async {
        let outcome = nav.refresh().await;
        let _ = release.send(());
        outcome
    };
    let (first, second) = tokio::join!(first, second);

    assert!(matches!(first.unwrap(), Outcome::Superseded));
    committed(second.unwrap());
    let view = nav.cached(&ContextKey::Organizations).await.unwrap();
    assert_eq!(view.groups()[0].items[0].title, "newer");
}

#[tokio::test]
async fn back_walks_the_trail() {
    let nav = navigator();
    nav.fetcher()
        .respond(Method::GET, "members/me/boards", boards_payload());
    nav.fetcher()
        .respond(Method::GET, "boards/B1/lists", lists_payload(&["C123"], &[]));
    nav.fetcher()
        .respond(Method::GET, "cards/C123", card_payload("L1"));

    visit(&nav, ViewState::boards(BoardFilter::Open)).await;
    visit(&nav, ViewState::lists("B1", "Roadmap")).await;
    visit(&nav, ViewState::card("C123")).await;

    let (location, _, cached) = committed(nav.back().await.unwrap());
    assert_eq!(location, ViewState::lists("B1", "Roadmap"));
    assert!(cached);
    let (location, _, _) = committed(nav.back().await.unwrap());
    assert_eq!(location, ViewState::boards(BoardFilter::Open));
    assert!(matches!(nav.back().await.unwrap(), Outcome::Idle));
    assert!(nav.current().await.is_none());
    assert!(matches!(nav.refresh().await.unwrap(), Outcome::Idle));
}

#[tokio::test]
async fn toggle_failure_rolls_back() {
    let nav = navigator();
    nav.fetcher()
        .respond(Method::GET, "cards/C1/checklists", checklists_payload("incomplete"));
    nav.fetcher()
        .fail(Method::PUT, "cards/C1/checkItem/I1", 503);

    visit(&nav, ViewState::checklists("C1")).await;
    let error = nav.toggle_check_item("C1", "I1").await.unwrap_err();
    assert!(matches!(error, NavError::MutationFailed { .. }));
    assert_eq!(
        nav.item_phase("C1", "I1").await,
        Some(ItemPhase::Confirmed(CheckState::Incomplete))
    );
    let view = checklists_view(&nav).await;
    assert_eq!(view.find_item("I1").unwrap().state, Some(CheckState::Incomplete));
}

#[tokio::test]
async fn toggle_success_updates_confirmed_state() {
    let nav = navigator();
    nav.fetcher()
        .respond(Method::GET, "cards/C1/checklists", checklists_payload("incomplete"));
    nav.fetcher()
        .respond(Method::PUT, "cards/C1/checkItem/I1", json!({ "id": "I1" }));

    visit(&nav, ViewState::checklists("C1")).await;
    let state = nav.toggle_check_item("C1", "I1").await.unwrap();
    assert_eq!(state, CheckState::Complete);
    assert_eq!(
        nav.fetcher().last_call().unwrap().param_value("state"),
        Some("complete")
    );
    let view = checklists_view(&nav).await;
    assert_eq!(view.find_item("I1").unwrap().state, Some(CheckState::Complete));
    assert_eq!(view.find_item("I1").unwrap().icon, Some(Icon::Checked));

    let state = nav.toggle_check_item("C1", "I1").await.unwrap();
    assert_eq!(state, CheckState::Incomplete);
    assert_eq!(
        nav.fetcher().last_call().unwrap().param_value("state"),
        Some("incomplete")
    );
}

#[tokio::test]
async fn toggle_is_pending_while_in_flight() {
    let nav = navigator();
    nav.fetcher()
        .respond(Method::GET, "cards/C1/checklists", checklists_payload("complete"));
    nav.fetcher()
        .respond(Method::PUT, "cards/C1/checkItem/I1", json!({ "id": "I1" }));
    visit(&nav, ViewState::checklists("C1")).await;

    let release = nav.fetcher().hold(Method::PUT, "cards/C1/checkItem/I1");
    let toggle = nav.toggle_check_item("C1", "I1");
    let observe = async {
        let phase = nav.item_phase("C1", "I1").await;
        let cached = checklists_view(&nav)
            .await
            .find_item("I1")
            .and_then(|i| i.state);
        let _ = release.send(());
        (phase, cached)
    };
    let (result, (phase, cached)) = tokio::join!(toggle, observe);

    assert_eq!(
        phase,
        Some(ItemPhase::Pending {
            prior: CheckState::Complete,
            target: CheckState::Incomplete
        })
    );
    assert_eq!(cached, Some(CheckState::Complete));
    assert_eq!(result.unwrap(), CheckState::Incomplete);
}

#[tokio::test]
async fn toggle_rejected_while_in_flight() {
    let nav = navigator();
    nav.fetcher()
        .respond(Method::GET, "cards/C1/checklists", checklists_payload("complete"));
    nav.fetcher()
        .respond(Method::PUT, "cards/C1/checkItem/I1", json!({ "id": "I1" }));
    visit(&nav, ViewState::checklists("C1")).await;

    let release = nav.fetcher().hold(Method::PUT, "cards/C1/checkItem/I1");
    let first = nav.toggle_check_item("C1", "I1");
    let second = async {
        let outcome = nav.toggle_check_item("C1", "I1").await;
        let phase = nav.item_phase("C1", "I1").await;
        let _ = release.send(());
        (outcome, phase)
    };
    let (first, (second, phase)) = tokio::join!(first, second);

    assert_eq!(
        second.unwrap_err(),
        NavError::MutationInFlight { id: "I1".into() }
    );
    assert_eq!(
        phase,
        Some(ItemPhase::Pending {
            prior: CheckState::Complete,
            target: CheckState::Incomplete
        })
    );
    assert_eq!(first.unwrap(), CheckState::Incomplete);
    assert_eq!(nav.fetcher().calls_to(Method::PUT, "cards/C1/checkItem/I1"), 1);
    assert_eq!(
        nav.item_phase("C1", "I1").await,
        Some(ItemPhase::Confirmed(CheckState::Incomplete))
    );
}

#[tokio::test]
async fn toggle_unknown_item() {
    let nav = navigator();
    let error = nav.toggle_check_item("C1", "I1").await.unwrap_err();
    assert_eq!(error, NavError::UnknownItem { id: "I1".into() });
    assert_eq!(nav.fetcher().total_calls(), 0);
}

async fn load_card_for_move(nav: &Navigator<ScriptedFetcher>) {
    visit(nav, ViewState::lists("B1", "Roadmap")).await;
    visit(nav, ViewState::card("C123")).await;
    visit(nav, ViewState::move_targets("C123", "B1")).await;
}

#[tokio::test]
async fn move_card_invalidates_source_views() {
    let nav = navigator();
    nav.fetcher().respond(
        Method::GET,
        "boards/B1/lists",
        lists_payload(&["C123", "C9"], &["C7"]),
    );
    nav.fetcher().respond(
        Method::GET,
        "boards/B1/lists",
        lists_payload(&["C9"], &["C7", "C123"]),
    );
    nav.fetcher()
        .respond(Method::GET, "cards/C123", card_payload("L1"));
    nav.fetcher()
        .respond(Method::GET, "cards/C123", card_payload("L2"));
    nav.fetcher()
        .respond(Method::PUT, "cards/C123", json!({ "id": "C123", "idList": "L2" }));
    load_card_for_move(&nav).await;

    let (location, view, _) = committed(nav.move_card("C123", "L2").await.unwrap());
    assert_eq!(location, ViewState::card("C123"));
    match &*view {
        View::Card(card) => assert_eq!(card.list_id, "L2"),
        other => panic!("expected card view, got {:?}", other),
    }
    assert_eq!(
        nav.fetcher().last_call().map(|e| e.method),
        Some(Method::GET)
    );
    assert_eq!(nav.fetcher().calls_to(Method::PUT, "cards/C123"), 1);
    assert!(nav
        .cached(&ContextKey::Lists { board_id: "B1".into() })
        .await
        .is_none());

    let (_, lists, cached) = visit(&nav, ViewState::lists("B1", "Roadmap")).await;
    assert!(!cached);
    assert_eq!(
        group_ids(&lists),
        vec![
            (Some("L1".to_string()), vec!["C9".to_string()]),
            (Some("L2".to_string()), vec!["C7".to_string(), "C123".to_string()]),
        ]
    );
}

#[tokio::test]
async fn move_card_completing_after_navigating_away_keeps_new_view() {
    let nav = navigator();
    nav.fetcher()
        .respond(Method::GET, "boards/B1/lists", lists_payload(&["C123"], &[]));
    nav.fetcher()
        .respond(Method::GET, "cards/C123", card_payload("L1"));
    nav.fetcher()
        .respond(Method::PUT, "cards/C123", json!({ "id": "C123", "idList": "L2" }));
    nav.fetcher().respond(
        Method::GET,
        "members/me/organizations",
        json!([{ "id": "o1", "displayName": "Acme" }]),
    );
    load_card_for_move(&nav).await;

    let release = nav.fetcher().hold(Method::PUT, "cards/C123");
    let moved = nav.move_card("C123", "L2");
    let elsewhere = async {
        let outcome = nav.navigate(ViewState::organizations()).await;
        let _ = release.send(());
        outcome
    };
    let (moved, elsewhere) = tokio::join!(moved, elsewhere);

    assert!(matches!(moved.unwrap(), Outcome::Superseded));
    committed(elsewhere.unwrap());
    assert_eq!(nav.current().await, Some(ViewState::organizations()));
    assert_eq!(nav.fetcher().calls_to(Method::GET, "cards/C123"), 1);
    assert!(nav
        .cached(&ContextKey::Card {
            card_id: "C123".into()
        })
        .await
        .is_none());
    assert!(nav
        .cached(&ContextKey::Lists {
            board_id: "B1".into()
        })
        .await
        .is_none());
}

#[tokio::test]
async fn move_card_failure_keeps_views() {
    let nav = navigator();
    nav.fetcher()
        .respond(Method::GET, "boards/B1/lists", lists_payload(&["C123"], &[]));
    nav.fetcher()
        .respond(Method::GET, "cards/C123", card_payload("L1"));
    nav.fetcher().fail(Method::PUT, "cards/C123", 400);
    load_card_for_move(&nav).await;

    let error = nav.move_card("C123", "L2").await.unwrap_err();
    assert!(matches!(error, NavError::MutationFailed { .. }));
    assert_eq!(
        nav.current().await,
        Some(ViewState::move_targets("C123", "B1"))
    );
    let lists = nav
        .cached(&ContextKey::Lists { board_id: "B1".into() })
        .await
        .unwrap();
    assert_eq!(lists.groups()[0].items[0].id, "C123");
}

#[tokio::test]
async fn move_card_rejects_foreign_list() {
    let nav = navigator();
    nav.fetcher()
        .respond(Method::GET, "boards/B1/lists", lists_payload(&["C123"], &[]));
    nav.fetcher()
        .respond(Method::GET, "cards/C123", card_payload("L1"));
    load_card_for_move(&nav).await;

    let error = nav.move_card("C123", "L99").await.unwrap_err();
    assert!(matches!(error, NavError::ForeignList { .. }));
    assert_eq!(nav.fetcher().calls_to(Method::PUT, "cards/C123"), 0);
}

fn my_cards_payload() -> Value {
    json!([
        { "id": "c1", "name": "One", "idList": "l1", "idBoard": "b1" },
        { "id": "c2", "name": "Two", "idList": "l2", "idBoard": "b2" },
        { "id": "c3", "name": "Three", "idList": "l1", "idBoard": "b1" },
        { "id": "c4", "name": "Gone", "idList": "l3", "idBoard": "b1", "closed": true },
    ])
}

#[tokio::test]
async fn my_cards_waits_for_every_list_title() {
    let nav = navigator();
    nav.fetcher()
        .respond(Method::GET, "members/me/cards", my_cards_payload());
    nav.fetcher().respond(
        Method::GET,
        "lists/l1",
        json!({ "id": "l1", "name": "Todo", "board": { "id": "b1", "name": "Roadmap" } }),
    );
    nav.fetcher().respond(
        Method::GET,
        "lists/l2",
        json!({ "id": "l2", "name": "Doing", "board": { "id": "b2", "name": "Ops" } }),
    );

    let (_, view, _) = visit(&nav, ViewState::my_cards()).await;
    let titles: Vec<&str> = view.groups().iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["Roadmap > Todo", "Ops > Doing"]);
    assert_eq!(
        group_ids(&view)[0].1,
        vec!["c1".to_string(), "c3".to_string()]
    );
    assert_eq!(nav.fetcher().calls_to(Method::GET, "lists/l3"), 0);
}

#[tokio::test]
async fn my_cards_abandoned_when_a_lookup_fails() {
    let nav = navigator();
    nav.fetcher()
        .respond(Method::GET, "members/me/cards", my_cards_payload());
    nav.fetcher().respond(
        Method::GET,
        "lists/l1",
        json!({ "id": "l1", "name": "Todo", "board": { "id": "b1", "name": "Roadmap" } }),
    );
    nav.fetcher().fail(Method::GET, "lists/l2", 502);

    let error = nav.navigate(ViewState::my_cards()).await.unwrap_err();
    assert!(matches!(
        error,
        NavError::AggregateIncomplete { expected: 2, .. }
    ));
    assert!(nav.current().await.is_none());
    assert!(nav.cached(&ContextKey::MyCards).await.is_none());
}

#[tokio::test]
async fn export_respects_due_window() {
    let nav = navigator();
    nav.fetcher().respond(
        Method::GET,
        "members/me/cards",
        json!([
            { "id": "two-days-ago", "name": "A", "due": "2024-06-13T09:00:00.000Z" },
            { "id": "three-days-ago", "name": "B", "due": "2024-06-12T09:00:00.000Z" },
            { "id": "next-year", "name": "C", "due": "2025-06-16T09:00:00.000Z" },
            { "id": "no-due", "name": "D", "due": null },
            { "id": "closed", "name": "E", "due": "2024-06-15T09:00:00.000Z", "closed": true },
        ]),
    );
    let sink = RecordingSink::default();
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

    let summary = nav.export_due_pins(&sink, now).await.unwrap();
    assert_eq!(summary.evaluated, 4);
    assert_eq!(summary.pinned, 1);
    let pins = sink.pins.lock().unwrap();
    assert_eq!(pins.len(), 1);
    assert_eq!(pins[0].id, "two-days-ago");
    assert_eq!(pins[0].layout.title, "A");
}
