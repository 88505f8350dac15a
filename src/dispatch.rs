//! Effect dispatcher
//!
//! Runs the effects produced by `AppState::update`. Network calls are spawned
//! on a tokio runtime and their outcome is sent back as a `Msg` over a
//! channel the UI drains every frame. Nothing here is cancelled or timed out.
//! Chat exports run on the same runtime so the UI thread never touches disk.

use crate::api::AgentApi;
use crate::config::Config;
use crate::error::ClientError;
use crate::export;
use crate::state::{Effect, Msg};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

/// Callback used to wake the UI when a result arrives
pub type Notifier = Arc<dyn Fn() + Send + Sync>;

/// Executes effects and collects their results
pub struct Dispatcher<A: AgentApi + 'static> {
    runtime: tokio::runtime::Runtime,
    api: Arc<A>,
    tx: mpsc::Sender<Msg>,
    rx: mpsc::Receiver<Msg>,
    export_dir: PathBuf,
    notifier: Option<Notifier>,
}

impl<A: AgentApi + 'static> Dispatcher<A> {
    /// Build a dispatcher with its own multi-thread runtime
    pub fn new(api: A, config: &Config) -> Result<Self, ClientError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(config.runtime.worker_threads)
            .enable_all()
            .build()
            .map_err(|e| ClientError::Runtime(e.to_string()))?;
        let (tx, rx) = mpsc::channel();

        Ok(Self {
            runtime,
            api: Arc::new(api),
            tx,
            rx,
            export_dir: config.export.dir.clone(),
            notifier: None,
        })
    }

    /// Call `notifier` whenever a result is queued
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Run every effect in order
    pub fn run_all(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.run(effect);
        }
    }

    /// Spawn one effect; its result arrives through [`Dispatcher::drain`]
    pub fn run(&self, effect: Effect) {
        tracing::debug!(effect = effect_name(&effect), "Dispatching effect");

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let notifier = self.notifier.clone();
        let export_dir = self.export_dir.clone();

        self.runtime.spawn(async move {
            let msg = match effect {
                Effect::Ask(request) => Msg::AskCompleted(api.ask(request).await),
                Effect::LoadKnowledge => Msg::KnowledgeLoaded(api.list_knowledge().await),
                Effect::SaveKnowledge(item) => {
                    Msg::KnowledgeSaved(api.create_knowledge(item).await)
                }
                Effect::CheckHealth(origin) => Msg::HealthChecked(origin, api.health().await),
                Effect::ExportChat(entries) => Msg::ExportFinished(export::write_export(
                    &export_dir,
                    &entries,
                    Utc::now(),
                )),
            };
            if tx.send(msg).is_err() {
                tracing::warn!("UI channel closed; dropping result");
                return;
            }
            if let Some(notify) = notifier {
                notify();
            }
        });
    }

    /// Every result received so far, without blocking
    pub fn drain(&self) -> Vec<Msg> {
        self.rx.try_iter().collect()
    }

    /// Wait up to `timeout` for the next result
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Msg> {
        self.rx.recv_timeout(timeout).ok()
    }
}

fn effect_name(effect: &Effect) -> &'static str {
    match effect {
        Effect::Ask(_) => "ask",
        Effect::LoadKnowledge => "load_knowledge",
        Effect::SaveKnowledge(_) => "save_knowledge",
        Effect::CheckHealth(_) => "check_health",
        Effect::ExportChat(_) => "export_chat",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        AskRequest, AskResponse, CreateAck, HealthResponse, KnowledgeItem, NewKnowledgeItem,
    };
    use crate::state::HealthCheck;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    struct EchoApi;

    #[async_trait]
    impl AgentApi for EchoApi {
        async fn ask(&self, request: AskRequest) -> Result<AskResponse, ClientError> {
            Ok(AskResponse {
                answer: format!("echo: {}", request.question),
                confidence: 1.0,
                sources: vec![],
                classification: "general".to_string(),
            })
        }

        async fn list_knowledge(&self) -> Result<Vec<KnowledgeItem>, ClientError> {
            Ok(vec![KnowledgeItem::new("A", "B", "C", "")])
        }

        async fn create_knowledge(
            &self,
            _item: NewKnowledgeItem,
        ) -> Result<CreateAck, ClientError> {
            Err(ClientError::Status {
                status: 500,
                body: String::new(),
            })
        }

        async fn health(&self) -> Result<HealthResponse, ClientError> {
            Ok(HealthResponse::default())
        }
    }

    fn dispatcher() -> Dispatcher<EchoApi> {
        Dispatcher::new(EchoApi, &Config::default()).unwrap()
    }

    #[test]
    fn test_ask_result_comes_back() {
        let dispatcher = dispatcher();
        dispatcher.run(Effect::Ask(AskRequest {
            question: "ping".to_string(),
            context: String::new(),
        }));

        match dispatcher.recv_timeout(Duration::from_secs(5)) {
            Some(Msg::AskCompleted(Ok(answer))) => assert_eq!(answer.answer, "echo: ping"),
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_errors_are_delivered_as_messages() {
        let dispatcher = dispatcher();
        dispatcher.run(Effect::SaveKnowledge(NewKnowledgeItem::default()));

        match dispatcher.recv_timeout(Duration::from_secs(5)) {
            Some(Msg::KnowledgeSaved(Err(ClientError::Status { status, .. }))) => {
                assert_eq!(status, 500)
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_export_writes_into_configured_dir() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.export.dir = dir.path().to_path_buf();
        let dispatcher = Dispatcher::new(EchoApi, &config).unwrap();

        dispatcher.run(Effect::ExportChat(vec![]));

        match dispatcher.recv_timeout(Duration::from_secs(5)) {
            Some(Msg::ExportFinished(Ok(path))) => assert!(path.starts_with(dir.path())),
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_notifier_called_per_result() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let dispatcher = dispatcher().with_notifier(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        dispatcher.run_all(vec![
            Effect::CheckHealth(HealthCheck::Background),
            Effect::LoadKnowledge,
        ]);
        assert!(dispatcher.recv_timeout(Duration::from_secs(5)).is_some());
        assert!(dispatcher.recv_timeout(Duration::from_secs(5)).is_some());

        // The notifier runs right after the send, so give it a moment
        for _ in 0..50 {
            if calls.load(Ordering::SeqCst) == 2 {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
