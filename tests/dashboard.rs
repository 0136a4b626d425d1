//! Dashboard forms against a fake content backend over real HTTP.

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use dnd::consts::SELECTED_AREA_ZONE_ID;
use dnd::doc::TagId;
use dnd::engine::Action;
use dnd::geometry::Point;
use dnd::input::{Button, PointerKind};
use dnd::zone::{ZoneContent, ZoneId};
use serde_json::{Value, json};
use studio::api::types::ImageUpload;
use studio::api::{Backend, HttpBackend};
use studio::config::StudioConfig;
use studio::error::{ApiError, SubmitError, ValidationError};
use studio::forms::{CardForm, FeedbackForm, TextForm};
use studio::notice::Notice;

// =============================================================================
// FAKE BACKEND
// =============================================================================

#[derive(Debug, Clone)]
struct Part {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

impl Part {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

fn part<'a>(parts: &'a [Part], name: &str) -> &'a Part {
    parts.iter().find(|p| p.name == name).unwrap_or_else(|| panic!("missing part {name}"))
}

#[derive(Clone, Default)]
struct FakeServer {
    card_posts: Arc<Mutex<Vec<Vec<Part>>>>,
    feedback_posts: Arc<Mutex<Vec<Vec<Part>>>>,
    text_patches: Arc<Mutex<Vec<(String, Value)>>>,
    /// Replaces the success reply to card posts.
    card_reply: Option<(StatusCode, Value)>,
    tags_down: bool,
}

impl FakeServer {
    fn card_posts(&self) -> Vec<Vec<Part>> {
        self.card_posts.lock().unwrap().clone()
    }
}

async fn read_parts(mut multipart: Multipart) -> Vec<Part> {
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_owned();
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let data = field.bytes().await.unwrap().to_vec();
        parts.push(Part { name, file_name, content_type, data });
    }
    parts
}

async fn list_tags(State(server): State<FakeServer>) -> (StatusCode, Json<Value>) {
    if server.tags_down {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "success": false })));
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": [
                { "_id": "t1", "tagName": "Design", "slug": "design" },
                { "_id": "t2", "tagName": "Development", "slug": "development" }
            ]
        })),
    )
}

async fn list_cards() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [
            { "_id": "c1", "title": "Brand refresh", "img": "https://img.test/c1.png", "latest": true, "tag": "t2" },
            { "_id": "c2", "title": "Old site", "img": "https://img.test/c2.png", "latest": false, "tag": "t404" }
        ]
    }))
}

async fn create_card(State(server): State<FakeServer>, multipart: Multipart) -> (StatusCode, Json<Value>) {
    let parts = read_parts(multipart).await;
    server.card_posts.lock().unwrap().push(parts);
    match server.card_reply {
        Some((status, body)) => (status, Json(body)),
        None => (StatusCode::CREATED, Json(json!({ "success": true, "data": { "_id": "new" } }))),
    }
}

async fn create_feedback(State(server): State<FakeServer>, multipart: Multipart) -> Json<Value> {
    let parts = read_parts(multipart).await;
    server.feedback_posts.lock().unwrap().push(parts);
    Json(json!({ "success": true, "message": "Feedback created" }))
}

async fn list_feedback() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [{ "_id": "f1", "name": "Ada", "compnyName": "Analytical", "description": "Great", "imgFeed": "u" }]
    }))
}

async fn home_text() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "_id": "home",
            "hero": { "title": "We build" },
            "overview": { "statistics": { "projects": 120, "awards": 8 }, "heading": "h", "paragraph": "p" }
        }
    }))
}

async fn update_text(
    State(server): State<FakeServer>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    server.text_patches.lock().unwrap().push((id, body));
    Json(json!({ "success": true }))
}

async fn spawn(server: FakeServer) -> HttpBackend {
    let app = Router::new()
        .route("/api/v1/tags", get(list_tags))
        .route("/api/v1/cards", get(list_cards).post(create_card))
        .route("/api/v1/feedback", get(list_feedback).post(create_feedback))
        .route("/api/v1/text", get(home_text))
        .route("/api/v1/text/{id}", patch(update_text))
        .with_state(server);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    backend_at(&format!("http://{addr}"))
}

fn backend_at(base_url: &str) -> HttpBackend {
    let config = StudioConfig::default().with_base_url(base_url).unwrap();
    HttpBackend::new(&config).unwrap()
}

fn cover() -> ImageUpload {
    ImageUpload::new("cover.png", "image/png", vec![0x89, b'P', b'N', b'G'])
}

// =============================================================================
// CARD FORM
// =============================================================================

#[tokio::test]
async fn operator_drags_tag_and_creates_card() {
    let server = FakeServer::default();
    let backend = spawn(server.clone()).await;
    let mut form = CardForm::new();
    form.mount(&backend).await;
    assert!(form.take_notices().is_empty());
    assert_eq!(form.board().available().len(), 2);

    // Mouse down on t2, nudge past the threshold, carry it into the slot.
    let t2 = TagId::new("t2");
    let start = form.board().item_rect(&t2).unwrap().center();
    let zone = ZoneId::new(SELECTED_AREA_ZONE_ID);
    let target = form.board().zones()[0].rect.center();
    let board = form.board_mut();
    assert!(board.on_pointer_down(1, PointerKind::Mouse, Button::Primary, start, 0).is_empty());
    let moved = board.on_pointer_move(1, Point::new(start.x + 10.0, start.y), 16);
    assert!(moved.contains(&Action::DragStarted { tag_id: t2.clone() }));
    board.on_pointer_move(1, target, 32);
    assert!(board.zone_view(&zone).unwrap().highlighted);
    let dropped = board.on_pointer_up(1, target, 48);
    assert!(dropped.iter().any(|a| matches!(a, Action::Assigned(tag) if tag.id == t2)));
    assert!(matches!(
        form.board().zone_view(&zone).unwrap().content,
        ZoneContent::Occupied { ref tag } if tag.id == t2
    ));

    form.set_title("Brand refresh");
    form.set_image(cover());
    form.submit(&backend).await.unwrap();

    let posts = server.card_posts();
    assert_eq!(posts.len(), 1);
    let parts = &posts[0];
    assert_eq!(part(parts, "tag").text(), "t2");
    assert_eq!(part(parts, "title").text(), "Brand refresh");
    assert_eq!(part(parts, "latest").text(), "false");
    let img = part(parts, "img");
    assert_eq!(img.file_name.as_deref(), Some("cover.png"));
    assert_eq!(img.content_type.as_deref(), Some("image/png"));
    assert_eq!(img.data, cover().bytes);

    assert!(form.board().selected().is_none());
    assert!(matches!(form.board().zone_view(&zone).unwrap().content, ZoneContent::Empty));
    assert_eq!(form.title(), "");
    assert!(form.image().is_none());
    assert_eq!(form.take_notices(), vec![Notice::success("Card created successfully!")]);
}

#[tokio::test]
async fn empty_selection_never_reaches_the_backend() {
    let server = FakeServer::default();
    let backend = spawn(server.clone()).await;
    let mut form = CardForm::new();
    form.mount(&backend).await;
    form.set_title("Brand refresh");
    form.set_image(cover());

    let err = form.submit(&backend).await.unwrap_err();
    assert!(matches!(err, SubmitError::Validation(ValidationError::NoTagSelected)));
    assert!(server.card_posts().is_empty());
}

#[tokio::test]
async fn rejected_card_keeps_form_state() {
    let server = FakeServer {
        card_reply: Some((StatusCode::BAD_REQUEST, json!({ "success": false, "message": "Title already used" }))),
        ..FakeServer::default()
    };
    let backend = spawn(server.clone()).await;
    let mut form = CardForm::new();
    form.mount(&backend).await;
    form.drop_tag(&TagId::new("t1"), 0).unwrap();
    form.set_title("Brand refresh");
    form.set_image(cover());

    let err = form.submit(&backend).await.unwrap_err();
    assert!(matches!(err, SubmitError::Api(ApiError::Status { status: 400, .. })));
    assert_eq!(form.take_notices(), vec![Notice::error("Title already used")]);
    assert_eq!(form.board().selected().map(|t| t.id.as_str()), Some("t1"));
    assert_eq!(form.title(), "Brand refresh");
    assert_eq!(server.card_posts().len(), 1);
}

#[tokio::test]
async fn success_false_without_message_is_generic() {
    let server =
        FakeServer { card_reply: Some((StatusCode::OK, json!({ "success": false }))), ..FakeServer::default() };
    let backend = spawn(server).await;
    let mut form = CardForm::new();
    form.mount(&backend).await;
    form.drop_tag(&TagId::new("t1"), 0).unwrap();
    form.set_title("Brand refresh");
    form.set_image(cover());

    assert!(form.submit(&backend).await.is_err());
    assert_eq!(form.take_notices(), vec![Notice::error("Something went wrong")]);
}

#[tokio::test]
async fn tag_fetch_failure_leaves_empty_list() {
    let server = FakeServer { tags_down: true, ..FakeServer::default() };
    let backend = spawn(server).await;
    let mut form = CardForm::new();
    form.mount(&backend).await;
    assert!(form.board().available().is_empty());
    assert_eq!(form.take_notices(), vec![Notice::error("Failed to load tags")]);
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let backend = backend_at(&format!("http://{addr}"));

    let err = backend.list_tags().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

// =============================================================================
// OTHER FORMS
// =============================================================================

#[tokio::test]
async fn feedback_is_posted_with_backend_field_names() {
    let server = FakeServer::default();
    let backend = spawn(server.clone()).await;
    let mut form = FeedbackForm::new();
    form.name = "Ada".into();
    form.company = "Analytical Engines".into();
    form.description = "Shipped on time.".into();
    form.image = Some(ImageUpload::new("ada.jpg", "image/jpeg", vec![0xFF, 0xD8]));

    form.submit(&backend).await.unwrap();

    let posts = server.feedback_posts.lock().unwrap().clone();
    assert_eq!(posts.len(), 1);
    assert_eq!(part(&posts[0], "compnyName").text(), "Analytical Engines");
    assert_eq!(part(&posts[0], "description").text(), "Shipped on time.");
    assert_eq!(part(&posts[0], "imgFeed").file_name.as_deref(), Some("ada.jpg"));
    assert!(form.name.is_empty());
}

#[tokio::test]
async fn home_text_patch_omits_id() {
    let server = FakeServer::default();
    let backend = spawn(server.clone()).await;
    let mut form = TextForm::new();
    form.load(&backend).await.unwrap();
    form.set_field("overview.statistics.awards", "9").unwrap();
    form.save(&backend).await.unwrap();

    let patches = server.text_patches.lock().unwrap().clone();
    assert_eq!(patches.len(), 1);
    let (id, body) = &patches[0];
    assert_eq!(id, "home");
    assert!(body.get("_id").is_none());
    assert_eq!(body["overview"]["statistics"]["awards"], 9);
    assert_eq!(body["hero"]["title"], "We build");
}

#[tokio::test]
async fn portfolio_and_feedback_listings() {
    let backend = spawn(FakeServer::default()).await;

    let entries = studio::portfolio::load(&backend).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].tag_name, "Development");
    assert!(entries[0].latest);
    assert_eq!(entries[1].tag_name, "Unknown Tag");

    let feedback = backend.list_feedback().await.unwrap();
    assert_eq!(feedback[0].company, "Analytical");
}
