//! Application state management
//!
//! Holds every panel's state; `AppState::update` is the only mutation path.

use crate::api::{
    AskRequest, AskResponse, CreateAck, HealthResponse, KnowledgeItem, NewKnowledgeItem,
};
use crate::error::ClientError;
use crate::export::ExportEntry;
use crate::state::analytics::Metrics;
use crate::state::chat::ChatSession;
use crate::state::knowledge::KnowledgeCache;
use crate::state::status::StatusPanel;
use std::path::PathBuf;

/// Panel shown in the central area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    /// Conversation with the assistant
    #[default]
    Chat,
    /// Knowledge list and editor
    Knowledge,
    /// Charts and counters
    Analytics,
    /// Backend status and preferences
    Settings,
}

impl Section {
    /// All sections in navigation order
    pub const ALL: [Section; 4] = [
        Section::Chat,
        Section::Knowledge,
        Section::Analytics,
        Section::Settings,
    ];

    /// Navigation label
    pub fn label(&self) -> &'static str {
        match self {
            Section::Chat => "Chat",
            Section::Knowledge => "Knowledge Base",
            Section::Analytics => "Analytics",
            Section::Settings => "Settings",
        }
    }
}

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Operation succeeded
    Info,
    /// User input problem
    Warning,
    /// Operation failed
    Error,
}

/// Blocking message shown until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Text shown to the user
    pub text: String,
}

impl Notice {
    fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Actions that need the user to confirm first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    /// Reset the chat log
    ClearChat,
}

impl Confirm {
    /// Question shown in the dialog
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirm::ClearChat => "Are you sure you want to clear the chat?",
        }
    }
}

/// UI preferences shown on the settings panel
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Sampling temperature, 0.0 to 1.0
    pub temperature: f32,
    /// Minimum confidence, 0.0 to 1.0
    pub confidence_threshold: f32,
    /// Dark visuals
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            confidence_threshold: 0.5,
            dark_mode: true,
        }
    }
}

/// Who asked for a health check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthCheck {
    /// Startup or refresh; only updates the indicator
    Background,
    /// Manual connection test; reports a summary when done
    ConnectionTest,
}

/// Every event the application reacts to
#[derive(Debug)]
pub enum Msg {
    /// Show another panel
    SwitchSection(Section),
    /// Chat input edited
    ChatInputChanged(String),
    /// Send a chat message
    Send(String),
    /// Chat request finished
    AskCompleted(Result<AskResponse, ClientError>),
    /// Clear button pressed; asks for confirmation
    RequestClear,
    /// Export button pressed
    RequestExport,
    /// Export write finished
    ExportFinished(Result<PathBuf, ClientError>),
    /// Answer to the pending confirmation
    Confirm(bool),
    /// Notice acknowledged
    DismissNotice,
    /// Reload the knowledge list
    RefreshKnowledge,
    /// Knowledge listing finished
    KnowledgeLoaded(Result<Vec<KnowledgeItem>, ClientError>),
    /// Search box edited
    SearchChanged(String),
    /// Category filter changed
    CategoryChanged(Option<String>),
    /// Open the add-knowledge dialog
    OpenEditor,
    /// Close the add-knowledge dialog
    CloseEditor,
    /// Add-knowledge form edited
    EditDraft(NewKnowledgeItem),
    /// Save the add-knowledge form
    SaveKnowledge,
    /// Create request finished
    KnowledgeSaved(Result<CreateAck, ClientError>),
    /// Run a background health check
    CheckHealth,
    /// Run a health check and report the outcome
    TestConnection,
    /// Health check finished
    HealthChecked(HealthCheck, Result<HealthResponse, ClientError>),
    /// Temperature slider moved
    TemperatureChanged(f32),
    /// Confidence threshold slider moved
    ConfidenceThresholdChanged(f32),
    /// Dark mode toggled
    DarkModeChanged(bool),
}

/// Work requested by an update, carried out by the dispatcher
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// `POST /api/ask`
    Ask(AskRequest),
    /// `GET /api/knowledge`
    LoadKnowledge,
    /// `POST /api/knowledge`
    SaveKnowledge(NewKnowledgeItem),
    /// `GET /health`
    CheckHealth(HealthCheck),
    /// Write the export file
    ExportChat(Vec<ExportEntry>),
}

/// Main application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Visible panel
    pub section: Section,
    /// Chat log
    pub chat: ChatSession,
    /// Knowledge list
    pub knowledge: KnowledgeCache,
    /// Backend status
    pub status: StatusPanel,
    /// Analytics figures
    pub metrics: Metrics,
    /// Preferences
    pub settings: Settings,
    /// Blocking notice, if any
    pub notice: Option<Notice>,
    /// Pending confirmation, if any
    pub confirm: Option<Confirm>,
}

impl AppState {
    /// Create a new application state with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Effects to run at startup
    pub fn init(&mut self) -> Vec<Effect> {
        self.refresh_metrics();
        vec![Effect::CheckHealth(HealthCheck::Background), Effect::LoadKnowledge]
    }

    /// Whether the loading overlay is shown
    pub fn is_busy(&self) -> bool {
        self.chat.is_pending() || self.status.testing
    }

    fn refresh_metrics(&mut self) {
        self.metrics = Metrics::placeholder(self.chat.history_len());
    }

    fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notice = Some(Notice::new(level, text));
    }

    /// Apply one event and return the effects it requests
    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::SwitchSection(section) => {
                self.section = section;
                if section == Section::Analytics {
                    self.refresh_metrics();
                }
                vec![]
            }

            Msg::ChatInputChanged(input) => {
                self.chat.set_input(input);
                vec![]
            }
            Msg::Send(text) => match self.chat.begin_send(&text) {
                Some(question) => vec![Effect::Ask(AskRequest {
                    question,
                    context: String::new(),
                })],
                None => vec![],
            },
            Msg::AskCompleted(result) => {
                self.chat.complete(result);
                vec![]
            }
            Msg::RequestClear => {
                self.confirm = Some(Confirm::ClearChat);
                vec![]
            }
            Msg::Confirm(accepted) => {
                match self.confirm.take() {
                    Some(Confirm::ClearChat) if accepted => self.chat.reset(),
                    _ => {}
                }
                vec![]
            }
            Msg::RequestExport => vec![Effect::ExportChat(self.chat.export_entries())],
            Msg::ExportFinished(Ok(path)) => {
                self.notify(
                    NoticeLevel::Info,
                    format!("Chat exported to {}", path.display()),
                );
                vec![]
            }
            Msg::ExportFinished(Err(e)) => {
                tracing::error!(error = %e, "Error exporting chat");
                self.notify(NoticeLevel::Error, "Error exporting chat.");
                vec![]
            }
            Msg::DismissNotice => {
                self.notice = None;
                vec![]
            }

            Msg::RefreshKnowledge => vec![Effect::LoadKnowledge],
            Msg::KnowledgeLoaded(Ok(items)) => {
                self.knowledge.replace(items);
                vec![]
            }
            Msg::KnowledgeLoaded(Err(e)) => {
                tracing::error!(error = %e, "Error loading knowledge base");
                self.notify(NoticeLevel::Error, "Error loading the knowledge base.");
                vec![]
            }
            Msg::SearchChanged(term) => {
                self.knowledge.search = term;
                vec![]
            }
            Msg::CategoryChanged(category) => {
                self.knowledge.category = category;
                vec![]
            }
            Msg::OpenEditor => {
                self.knowledge.editor.open = true;
                vec![]
            }
            Msg::CloseEditor => {
                self.knowledge.editor.open = false;
                vec![]
            }
            Msg::EditDraft(draft) => {
                self.knowledge.editor.draft = draft;
                vec![]
            }
            Msg::SaveKnowledge => match self.knowledge.begin_save() {
                Ok(Some(item)) => vec![Effect::SaveKnowledge(item)],
                Ok(None) => vec![],
                Err(e) if e.is_validation() => {
                    tracing::debug!(error = %e, "Knowledge form incomplete");
                    self.notify(NoticeLevel::Warning, "Please fill in all fields.");
                    vec![]
                }
                Err(e) => {
                    tracing::error!(error = %e, "Error saving knowledge");
                    self.notify(
                        NoticeLevel::Error,
                        "Error saving knowledge. Please try again.",
                    );
                    vec![]
                }
            },
            Msg::KnowledgeSaved(Ok(ack)) => {
                tracing::info!(id = ?ack.id, "Knowledge item created");
                self.knowledge.finish_save(true);
                self.notify(NoticeLevel::Info, "Knowledge added successfully.");
                vec![Effect::LoadKnowledge]
            }
            Msg::KnowledgeSaved(Err(e)) => {
                tracing::error!(error = %e, "Error saving knowledge");
                self.knowledge.finish_save(false);
                self.notify(
                    NoticeLevel::Error,
                    "Error saving knowledge. Please try again.",
                );
                vec![]
            }

            Msg::CheckHealth => vec![Effect::CheckHealth(HealthCheck::Background)],
            Msg::TestConnection => {
                if self.status.testing {
                    return vec![];
                }
                self.status.testing = true;
                vec![Effect::CheckHealth(HealthCheck::ConnectionTest)]
            }
            Msg::HealthChecked(origin, result) => {
                self.status.apply_health(result);
                // A background check finishing mid-test must not end the test
                if origin == HealthCheck::ConnectionTest {
                    self.status.testing = false;
                    if self.status.all_online() {
                        self.notify(
                            NoticeLevel::Info,
                            "Connection successful. All services are online.",
                        );
                    } else {
                        self.notify(NoticeLevel::Warning, "Some services are unavailable.");
                    }
                }
                vec![]
            }

            Msg::TemperatureChanged(value) => {
                self.settings.temperature = value.clamp(0.0, 1.0);
                vec![]
            }
            Msg::ConfidenceThresholdChanged(value) => {
                self.settings.confidence_threshold = value.clamp(0.0, 1.0);
                vec![]
            }
            Msg::DarkModeChanged(dark) => {
                self.settings.dark_mode = dark;
                vec![]
            }
        }
    }
}
