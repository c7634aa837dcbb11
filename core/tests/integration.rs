//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port and drives `TodoApp`
//! over real HTTP using ureq, exactly as the browser host drives it over
//! `fetch`: execute the outgoing request, hand the outcome back, repeat.

use todo_core::app::{CONFIRM_DELETE, INVALID_LOGIN, REGISTERED, SESSION_EXPIRED, UPDATE_FAILED};
use todo_core::session::TOKEN_KEY;
use todo_core::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, MemoryStore, Outcome, RecordedDialogs, Screen, Session,
    SessionStore, TodoApp, TodoClient, Transport,
};

/// Executes requests with ureq, returning 4xx/5xx as data rather than `Err`
/// so the core decides what a status means.
struct UreqTransport {
    agent: ureq::Agent,
    requests: Vec<(HttpMethod, String)>,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            agent,
            requests: Vec::new(),
        }
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, req: &HttpRequest) -> ureq::RequestBuilder<B> {
    for (key, value) in &req.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

fn send_body(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    req: &HttpRequest,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match &req.body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: &HttpRequest) -> Outcome {
        self.requests.push((req.method, req.path.clone()));
        let result = match req.method {
            HttpMethod::Get => with_headers(self.agent.get(&req.path), req).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&req.path), req).call(),
            HttpMethod::Post => send_body(with_headers(self.agent.post(&req.path), req), req),
            HttpMethod::Put => send_body(with_headers(self.agent.put(&req.path), req), req),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Ok(HttpResponse::new(status, body))
    }
}

/// Start the mock server on a random port and return the API base URL.
fn start_server() -> String {
    start_server_with(mock_server::app())
}

fn start_server_with(router: axum::Router) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, router).await
        })
        .unwrap();
    });

    format!("http://{addr}/api")
}

fn new_app(base: &str) -> TodoApp<MemoryStore, RecordedDialogs> {
    TodoApp::new(TodoClient::new(base), MemoryStore::new(), RecordedDialogs::confirming(true))
}

fn titles(app: &TodoApp<MemoryStore, RecordedDialogs>) -> Vec<String> {
    app.rows().into_iter().map(|row| row.title).collect()
}

#[test]
fn register_login_and_full_task_lifecycle() {
    let base = start_server();
    let mut app = new_app(&base);
    let mut transport = UreqTransport::new();

    // Step 1: register alice.
    let next = app.register("alice", "pw1");
    app.run(next, &mut transport);
    assert_eq!(app.auth_message(), Some(REGISTERED));

    // Step 2: login stores the token and loads an empty list.
    let next = app.login("alice", "pw1");
    app.run(next, &mut transport);
    assert_eq!(app.screen(), Screen::SignedIn);
    assert_eq!(app.username(), Some("alice"));
    assert!(app.store().get_item(TOKEN_KEY).is_some());
    assert!(app.tasks().is_empty());

    // Step 3: add a task; one create followed by one reload.
    transport.requests.clear();
    app.set_new_task("write spec");
    let next = app.submit_new_task();
    app.run(next, &mut transport);
    assert_eq!(
        transport.requests,
        vec![
            (HttpMethod::Post, format!("{base}/todos")),
            (HttpMethod::Get, format!("{base}/todos")),
        ]
    );
    assert_eq!(titles(&app), vec!["write spec"]);
    assert_eq!(app.new_task(), "");
    let id = app.tasks()[0].id;

    // Step 4: edit and save.
    app.edit_task(id);
    app.set_draft(id, "write spec v2");
    let next = app.save_draft(id);
    app.run(next, &mut transport);
    assert_eq!(titles(&app), vec!["write spec v2"]);
    assert!(!app.rows()[0].is_editing());

    // Step 5: delete after confirmation.
    let next = app.delete_task(id);
    app.run(next, &mut transport);
    assert_eq!(app.dialogs().confirmations, vec![CONFIRM_DELETE]);
    assert!(app.tasks().is_empty());

    // Step 6: logout.
    app.logout();
    assert_eq!(app.screen(), Screen::SignedOut);
    assert!(app.store().is_empty());
}

#[test]
fn wrong_password_is_an_invalid_login() {
    let base = start_server();
    let mut app = new_app(&base);
    let mut transport = UreqTransport::new();

    let next = app.register("alice", "pw1");
    app.run(next, &mut transport);
    let next = app.login("alice", "wrong");
    app.run(next, &mut transport);

    assert_eq!(app.screen(), Screen::SignedOut);
    assert_eq!(app.auth_message(), Some(INVALID_LOGIN));
    assert!(app.store().is_empty());
}

#[test]
fn duplicate_registration_shows_server_text() {
    let base = start_server();
    let mut app = new_app(&base);
    let mut transport = UreqTransport::new();

    let next = app.register("alice", "pw1");
    app.run(next, &mut transport);
    let next = app.register("alice", "pw2");
    app.run(next, &mut transport);

    assert_eq!(app.auth_message(), Some("Username is already taken!"));
}

#[test]
fn stale_token_forces_logout() {
    let base = start_server();
    let stale = Session {
        token: "not-a-real-token".to_string(),
        username: "alice".to_string(),
    };
    let mut app = TodoApp::new(
        TodoClient::new(&base),
        MemoryStore::with_session(&stale),
        RecordedDialogs::confirming(true),
    );
    let mut transport = UreqTransport::new();

    let next = app.restore_session();
    assert_eq!(app.screen(), Screen::SignedIn);
    app.run(next, &mut transport);

    assert_eq!(app.screen(), Screen::SignedOut);
    assert_eq!(app.auth_message(), Some(SESSION_EXPIRED));
    assert!(app.store().is_empty());
}

#[test]
fn expired_token_forces_logout() {
    // Every token is already past its lifetime when it is first used.
    let base = start_server_with(mock_server::app_with_token_ttl(std::time::Duration::ZERO));
    let mut app = new_app(&base);
    let mut transport = UreqTransport::new();

    let next = app.register("alice", "pw1");
    app.run(next, &mut transport);
    let next = app.login("alice", "pw1");
    app.run(next, &mut transport);

    assert_eq!(
        transport.requests.last(),
        Some(&(HttpMethod::Get, format!("{base}/todos")))
    );
    assert_eq!(app.screen(), Screen::SignedOut);
    assert_eq!(app.auth_message(), Some(SESSION_EXPIRED));
    assert!(app.store().is_empty());
}

#[test]
fn users_only_see_and_edit_their_own_tasks() {
    let base = start_server();
    let mut transport = UreqTransport::new();

    let mut alice = new_app(&base);
    let next = alice.register("alice", "pw1");
    alice.run(next, &mut transport);
    let next = alice.login("alice", "pw1");
    alice.run(next, &mut transport);
    let next = alice.add_task("alice's task");
    alice.run(next, &mut transport);
    let alice_id = alice.tasks()[0].id;

    let mut bob = new_app(&base);
    let next = bob.register("bob", "pw2");
    bob.run(next, &mut transport);
    let next = bob.login("bob", "pw2");
    bob.run(next, &mut transport);
    assert!(bob.tasks().is_empty());

    // Bob cannot rename Alice's task; the update is refused and alerted.
    let next = bob.save_task(alice_id, "hijacked");
    bob.run(next, &mut transport);
    assert_eq!(bob.dialogs().alerts, vec![UPDATE_FAILED]);

    let next = Some(alice.load_tasks());
    alice.run(next, &mut transport);
    assert_eq!(titles(&alice), vec!["alice's task"]);
}
