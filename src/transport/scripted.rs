//! Scripted transport for tests.
//!
//! Each locator gets a [`Script`] describing how its download behaves. Events
//! are delivered from a separate OS thread, the way a real transport would call
//! back from its own context. Every submission and event is appended to a
//! shared log so tests can check ordering.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use url::Url;

use crate::transport::{EventHandler, Transport, SUCCESS_STATUS};

/// How a scripted download behaves.
#[derive(Debug, Clone)]
pub enum Script {
    /// Deliver `body` in `chunks` progress steps, then succeed.
    Deliver { body: Vec<u8>, chunks: usize },
    /// Deliver the given progress values verbatim, then succeed with `body`.
    Progress { body: Vec<u8>, steps: Vec<u64> },
    /// Deliver `body` but finish with `status`.
    Status { body: Vec<u8>, status: u16 },
    /// Fail at the transport level.
    Fail(String),
    /// Report data at a location that does not exist, then succeed.
    VanishingData,
    /// Drop the handler without ever completing.
    Abandon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Logged {
    Submit(String),
    Progress(String, u64),
    Complete(String),
}

pub struct ScriptedTransport {
    scripts: HashMap<String, Script>,
    scratch: TempDir,
    log: Arc<Mutex<Vec<Logged>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            scratch: tempfile::tempdir().expect("scratch dir"),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn script(mut self, locator: &str, script: Script) -> Self {
        self.scripts.insert(locator.to_string(), script);
        self
    }

    pub fn log(&self) -> Vec<Logged> {
        self.log.lock().unwrap().clone()
    }

    /// Locators in the order they were submitted.
    pub fn submissions(&self) -> Vec<String> {
        self.log()
            .into_iter()
            .filter_map(|entry| match entry {
                Logged::Submit(locator) => Some(locator),
                _ => None,
            })
            .collect()
    }

    fn scratch_file(&self, locator: &str, body: &[u8]) -> PathBuf {
        let path = self
            .scratch
            .path()
            .join(format!("{}.download", self.submissions().len()));
        std::fs::write(&path, body).expect("write scratch");
        tracing::debug!("Scripted payload for {} at {}", locator, path.display());
        path
    }
}

fn chunk_steps(len: u64, chunks: usize) -> Vec<u64> {
    let chunks = chunks.max(1) as u64;
    (1..=chunks).map(|i| len * i / chunks).collect()
}

impl Transport for ScriptedTransport {
    fn submit(&self, url: &Url, handler: Arc<dyn EventHandler>) {
        let locator = url.to_string();
        let script = self
            .scripts
            .get(&locator)
            .cloned()
            .unwrap_or(Script::Deliver {
                body: locator.as_bytes().to_vec(),
                chunks: 1,
            });

        let scratch = match &script {
            Script::Deliver { body, .. }
            | Script::Progress { body, .. }
            | Script::Status { body, .. } => Some(self.scratch_file(&locator, body)),
            _ => None,
        };

        self.log.lock().unwrap().push(Logged::Submit(locator.clone()));
        let log = Arc::clone(&self.log);

        std::thread::spawn(move || {
            let progress = |written: u64, expected: u64| {
                log.lock()
                    .unwrap()
                    .push(Logged::Progress(locator.clone(), written));
                handler.on_progress(written, expected);
            };

            let completion = match script {
                Script::Deliver { body, chunks } => {
                    let len = body.len() as u64;
                    for step in chunk_steps(len, chunks) {
                        progress(step, len);
                    }
                    handler.on_data_ready(scratch.as_deref().unwrap(), SUCCESS_STATUS);
                    Ok(SUCCESS_STATUS)
                }
                Script::Progress { body, steps } => {
                    for step in steps {
                        progress(step, body.len() as u64);
                    }
                    handler.on_data_ready(scratch.as_deref().unwrap(), SUCCESS_STATUS);
                    Ok(SUCCESS_STATUS)
                }
                Script::Status { body, status } => {
                    progress(body.len() as u64, body.len() as u64);
                    handler.on_data_ready(scratch.as_deref().unwrap(), status);
                    Ok(status)
                }
                Script::Fail(message) => {
                    progress(0, 0);
                    Err(message)
                }
                Script::VanishingData => {
                    handler.on_data_ready(&PathBuf::from("/nonexistent/pkgfetch/data"), SUCCESS_STATUS);
                    Ok(SUCCESS_STATUS)
                }
                Script::Abandon => return,
            };

            log.lock().unwrap().push(Logged::Complete(locator.clone()));
            handler.on_complete(completion);
        });
    }
}
