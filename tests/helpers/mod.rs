use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use contactnotes::domain::{Note, NoteFields};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct ServerState {
    notes: Arc<Mutex<Vec<Note>>>,
    next_id: Arc<AtomicUsize>,
    requests: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
    garbled: Arc<AtomicBool>,
}

impl ServerState {
    /// Count the request and apply any configured failure mode
    fn begin(&self) -> Result<(), StatusCode> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        Ok(())
    }
}

/// In-process stand-in for the notes API, served over real HTTP on localhost
#[allow(dead_code)]
pub struct FakeNotesServer {
    pub base_url: String,
    state: ServerState,
}

#[allow(dead_code)]
impl FakeNotesServer {
    /// Start serving `notes` on an ephemeral port
    pub fn start(notes: Vec<Note>) -> Result<Self> {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")
            .context("Failed to bind fake notes server")?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;

        let state = ServerState {
            notes: Arc::new(Mutex::new(notes)),
            next_id: Arc::new(AtomicUsize::new(1)),
            requests: Arc::new(AtomicUsize::new(0)),
            failing: Arc::new(AtomicBool::new(false)),
            garbled: Arc::new(AtomicBool::new(false)),
        };
        let app = router(state.clone());

        // The socket is already listening, so clients may connect before the
        // runtime below is up.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .expect("Failed to build runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener)
                    .expect("Failed to adopt listener");
                axum::serve(listener, app).await.expect("Fake server stopped");
            });
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            state,
        })
    }

    /// Answer every following request with 500
    pub fn fail_all_requests(&self) {
        self.state.failing.store(true, Ordering::SeqCst);
    }

    /// Answer list requests with a body missing the `data` envelope
    pub fn garble_list_responses(&self) {
        self.state.garbled.store(true, Ordering::SeqCst);
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    pub fn stored_notes(&self) -> Vec<Note> {
        self.state.notes.lock().unwrap().clone()
    }
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/v1/notes/", get(list_notes).post(create_note))
        .route("/api/v1/notes/{id}", patch(update_note).delete(delete_note))
        .with_state(state)
}

/// Serialize like the real API does, including its version key.
fn wire(note: &Note) -> Value {
    let mut value = serde_json::to_value(note).unwrap();
    value["__v"] = json!(0);
    value
}

async fn list_notes(State(state): State<ServerState>) -> Result<Json<Value>, StatusCode> {
    state.begin()?;
    if state.garbled.load(Ordering::SeqCst) {
        return Ok(Json(json!({ "notes": [] })));
    }
    let notes = state.notes.lock().unwrap();
    let data: Vec<Value> = notes.iter().map(wire).collect();
    Ok(Json(json!({ "data": data })))
}

async fn create_note(
    State(state): State<ServerState>,
    Json(fields): Json<NoteFields>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    state.begin()?;
    let note = Note {
        id: format!("{:024x}", state.next_id.fetch_add(1, Ordering::SeqCst)),
        full_name: fields.full_name,
        email: fields.email,
        phone_number: fields.phone_number,
    };
    state.notes.lock().unwrap().push(note.clone());
    Ok((StatusCode::CREATED, Json(json!({ "data": wire(&note) }))))
}

async fn update_note(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(fields): Json<NoteFields>,
) -> Result<Json<Value>, StatusCode> {
    state.begin()?;
    let mut notes = state.notes.lock().unwrap();
    let note = notes
        .iter_mut()
        .find(|n| n.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    note.full_name = fields.full_name;
    note.email = fields.email;
    note.phone_number = fields.phone_number;
    Ok(Json(json!({ "data": wire(note) })))
}

async fn delete_note(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    state.begin()?;
    let mut notes = state.notes.lock().unwrap();
    let before = notes.len();
    notes.retain(|n| n.id != id);
    if notes.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Sample notes shared across integration tests
#[allow(dead_code)]
pub mod sample_notes {
    use contactnotes::domain::Note;

    pub fn note(id: &str, full_name: &str, email: &str, phone_number: &str) -> Note {
        Note {
            id: id.to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone_number: phone_number.to_string(),
        }
    }

    pub fn ada() -> Note {
        note("1", "Ada Lovelace", "ada@example.com", "555-0100")
    }

    pub fn grace() -> Note {
        note("2", "Grace Hopper", "grace@example.com", "555-0199")
    }

    pub fn alan() -> Note {
        note("3", "Alan Turing", "alan@example.com", "555-0142")
    }
}
