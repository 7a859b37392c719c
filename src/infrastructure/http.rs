// src/infrastructure/http.rs
use crate::application::NoteRepository;
use crate::domain::{DomainError, Note, NoteFields, Operation};
use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

pub const NOTES_PATH: &str = "/api/v1/notes/";

/// `{ "data": ... }` envelope wrapping every notes API payload.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Notes collection served over HTTP.
pub struct HttpNoteRepository {
    client: Client,
    collection_url: Url,
}

impl HttpNoteRepository {
    /// `timeout` of `None` lets a request wait indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let raw = format!("{}{}", base_url.trim_end_matches('/'), NOTES_PATH);
        let collection_url = Url::parse(&raw)
            .with_context(|| format!("Invalid notes API base URL: {}", base_url))?;
        if collection_url.cannot_be_a_base() {
            anyhow::bail!("Notes API base URL cannot carry a path: {}", base_url);
        }
        debug!(%collection_url, ?timeout, "Creating HttpNoteRepository");

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            collection_url,
        })
    }

    pub fn collection_url(&self) -> &str {
        self.collection_url.as_str()
    }

    /// The id always lands in a single escaped path segment below the collection.
    fn note_url(&self, operation: Operation, id: &str) -> Result<Url, DomainError> {
        if matches!(id, "" | "." | "..") {
            return Err(DomainError::operation_failed(
                operation,
                format!("Invalid note id: {:?}", id),
            ));
        }

        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::operation_failed(operation, "Collection URL has no path"))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }
}

/// Turns transport errors and non-success statuses into the one failure kind.
fn checked(
    operation: Operation,
    result: reqwest::Result<Response>,
) -> Result<Response, DomainError> {
    result
        .and_then(Response::error_for_status)
        .map_err(|e| DomainError::operation_failed(operation, e.to_string()))
}

fn decode<T: DeserializeOwned>(operation: Operation, response: Response) -> Result<T, DomainError> {
    response
        .json::<Envelope<T>>()
        .map(|envelope| envelope.data)
        .map_err(|e| DomainError::operation_failed(operation, e.to_string()))
}

impl NoteRepository for HttpNoteRepository {
    #[instrument(level = "debug", skip(self))]
    fn list_notes(&mut self) -> Result<Vec<Note>, DomainError> {
        let response = checked(
            Operation::List,
            self.client.get(self.collection_url.clone()).send(),
        )?;
        decode(Operation::List, response)
    }

    #[instrument(level = "debug", skip(self))]
    fn create_note(&mut self, fields: &NoteFields) -> Result<Note, DomainError> {
        let response = checked(
            Operation::Create,
            self.client.post(self.collection_url.clone()).json(fields).send(),
        )?;
        decode(Operation::Create, response)
    }

    #[instrument(level = "debug", skip(self))]
    fn update_note(&mut self, id: &str, fields: &NoteFields) -> Result<Note, DomainError> {
        let url = self.note_url(Operation::Update, id)?;
        let response = checked(Operation::Update, self.client.patch(url).json(fields).send())?;
        decode(Operation::Update, response)
    }

    #[instrument(level = "debug", skip(self))]
    fn delete_note(&mut self, id: &str) -> Result<(), DomainError> {
        let url = self.note_url(Operation::Delete, id)?;
        // Any success status will do; the body is ignored.
        checked(Operation::Delete, self.client.delete(url).send())?;
        Ok(())
    }
}
