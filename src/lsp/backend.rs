use std::{
    collections::HashMap,
    ffi::OsStr,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex, PoisonError, RwLock,
        atomic::{AtomicBool, Ordering},
    },
};

use serde_json::Value;
use tower_lsp::{
    Client, LanguageServer,
    jsonrpc::{Error, Result},
    lsp_types::{
        CompletionParams, CompletionResponse, DidChangeTextDocumentParams,
        DidChangeWatchedFilesParams, DidChangeWatchedFilesRegistrationOptions,
        DidCloseTextDocumentParams, DidOpenTextDocumentParams, DocumentLink, DocumentLinkParams,
        ExecuteCommandParams, FileSystemWatcher, GlobPattern, InitializeParams, InitializeResult,
        InitializedParams, MessageType, Range, Registration, ServerInfo, ShowDocumentParams, Url,
    },
};
use tracing::{debug, error, info, warn};

use super::protocol::{OpenRequest, completion_item, document_link, server_capabilities};
use crate::{
    config::{CONFIG_FILE_NAME, Config, OPEN_AT_POSITION_COMMAND, load_config},
    core::{
        LookupError, Snapshot, TranslationStore, complete, document_links,
        matcher::{line_prefix, match_completion},
        text::line_at,
    },
};

const WATCHER_REGISTRATION_ID: &str = "langkey-watch-translations";

#[derive(Debug, Clone)]
struct Document {
    text: Arc<str>,
    language_id: String,
}

/// Language server backend.
///
/// Documents are kept in memory as the editor sends them (full sync). The
/// translation snapshot lives in a shared [`TranslationStore`] and is only
/// reloaded when stale or invalidated by a watched-file event.
pub struct Backend {
    client: Client,
    store: Arc<TranslationStore>,
    config: RwLock<Config>,
    documents: RwLock<HashMap<Url, Document>>,
    /// Last lookup failure shown to the user, cleared on a successful load.
    last_error: Mutex<Option<String>>,
    dynamic_watchers: AtomicBool,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        let config = Config::default();
        Self {
            client,
            store: Arc::new(TranslationStore::new(Vec::new(), &config)),
            config: RwLock::new(config),
            documents: RwLock::new(HashMap::new()),
            last_error: Mutex::new(None),
            dynamic_watchers: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &TranslationStore {
        &self.store
    }

    fn config(&self) -> Config {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_config(&self, config: Config) {
        self.store.configure(&config);
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
    }

    /// The open document at `uri`, if its language is handled.
    fn document(&self, uri: &Url, config: &Config) -> Option<Document> {
        let documents = self.documents.read().unwrap_or_else(PoisonError::into_inner);
        documents
            .get(uri)
            .filter(|doc| config.supports_language(&doc.language_id))
            .cloned()
    }

    /// Load the current snapshot, reporting failures to the user.
    async fn snapshot(&self) -> Option<Snapshot> {
        let store = Arc::clone(&self.store);
        match tokio::task::spawn_blocking(move || store.snapshot()).await {
            Ok(Ok(snapshot)) => {
                self.last_error
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .take();
                Some(snapshot)
            }
            Ok(Err(err)) => {
                self.report(&err).await;
                None
            }
            Err(err) => {
                error!("translation load task failed: {}", err);
                None
            }
        }
    }

    /// Show a lookup failure once; repeats are only logged until a load succeeds.
    async fn report(&self, err: &LookupError) {
        let (message_type, message) = if err.is_warning() {
            warn!("{}", err);
            (MessageType::WARNING, err.to_string())
        } else {
            error!("{}", err);
            (
                MessageType::ERROR,
                format!("Error loading translation keys: {}", err),
            )
        };

        let repeated = {
            let mut last = self.last_error.lock().unwrap_or_else(PoisonError::into_inner);
            if last.as_deref() == Some(message.as_str()) {
                true
            } else {
                *last = Some(message.clone());
                false
            }
        };

        if !repeated {
            self.client.show_message(message_type, message).await;
        }
    }

    async fn reload_config(&self) {
        let Some(root) = self.store.roots().into_iter().next() else {
            return;
        };

        match load_config(&root) {
            Ok(result) => {
                info!(from_file = result.from_file(), "reloaded configuration");
                self.set_config(result.config);
            }
            Err(err) => {
                error!("{:#}", err);
                self.client
                    .show_message(MessageType::ERROR, format!("{:#}", err))
                    .await;
            }
        }
    }

    async fn register_watchers(&self) {
        if !self.dynamic_watchers.load(Ordering::Relaxed) {
            debug!("client does not support dynamic file watchers");
            return;
        }

        let config = self.config();
        let options = DidChangeWatchedFilesRegistrationOptions {
            watchers: vec![
                FileSystemWatcher {
                    glob_pattern: GlobPattern::String(config.watch_pattern),
                    kind: None,
                },
                FileSystemWatcher {
                    glob_pattern: GlobPattern::String(format!("**/{}", CONFIG_FILE_NAME)),
                    kind: None,
                },
            ],
        };
        let registration = Registration {
            id: WATCHER_REGISTRATION_ID.to_string(),
            method: "workspace/didChangeWatchedFiles".to_string(),
            register_options: serde_json::to_value(options).ok(),
        };

        if let Err(err) = self.client.register_capability(vec![registration]).await {
            warn!("failed to register file watchers: {}", err);
        }
    }

    async fn open_at(&self, request: OpenRequest) {
        let path = request.path();
        let failure = match Url::from_file_path(path) {
            Ok(_) if !path.is_file() => Some(path.display().to_string()),
            Ok(uri) => {
                let position = request.position();
                let params = ShowDocumentParams {
                    uri,
                    external: Some(false),
                    take_focus: Some(true),
                    selection: Some(Range::new(position, position)),
                };
                match self.client.show_document(params).await {
                    Ok(true) => None,
                    Ok(false) => Some(path.display().to_string()),
                    Err(err) => Some(format!("{} ({})", path.display(), err.message)),
                }
            }
            Err(()) => Some(path.display().to_string()),
        };

        if let Some(reason) = failure {
            let message = format!("Failed to open file: {}", reason);
            error!("{}", message);
            self.client.show_message(MessageType::ERROR, message).await;
        }
    }
}

#[allow(deprecated)]
fn workspace_roots(params: &InitializeParams) -> Vec<PathBuf> {
    let from_folders: Vec<PathBuf> = params
        .workspace_folders
        .iter()
        .flatten()
        .filter_map(|folder| folder.uri.to_file_path().ok())
        .collect();

    if !from_folders.is_empty() {
        return from_folders;
    }

    params
        .root_uri
        .as_ref()
        .and_then(|uri| uri.to_file_path().ok())
        .into_iter()
        .collect()
}

fn is_config_file(path: &Path) -> bool {
    path.file_name() == Some(OsStr::new(CONFIG_FILE_NAME))
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let dynamic_watchers = params
            .capabilities
            .workspace
            .as_ref()
            .and_then(|ws| ws.did_change_watched_files.as_ref())
            .and_then(|caps| caps.dynamic_registration)
            .unwrap_or(false);
        self.dynamic_watchers
            .store(dynamic_watchers, Ordering::Relaxed);

        let roots = workspace_roots(&params);
        if let Some(root) = roots.first() {
            match load_config(root) {
                Ok(result) => {
                    if let Some(path) = &result.path {
                        info!(path = %path.display(), "loaded configuration");
                    }
                    self.set_config(result.config);
                }
                Err(err) => warn!("using default configuration: {:#}", err),
            }
        }

        info!(roots = ?roots, "initializing");
        self.store.set_roots(roots);

        Ok(InitializeResult {
            capabilities: server_capabilities(),
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.register_watchers().await;
        // Warm the cache so the first completion does not pay for the load.
        self.snapshot().await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                doc.uri,
                Document {
                    text: Arc::from(doc.text),
                    language_id: doc.language_id,
                },
            );
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let Some(change) = params.content_changes.into_iter().last() else {
            return;
        };
        let mut documents = self.documents.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(doc) = documents.get_mut(&params.text_document.uri) {
            doc.text = Arc::from(change.text);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&params.text_document.uri);
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        if params.changes.is_empty() {
            return;
        }
        let config_changed = params
            .changes
            .iter()
            .filter_map(|change| change.uri.to_file_path().ok())
            .any(|path| is_config_file(&path));

        // The client's watcher registration decides which files are reported.
        if config_changed {
            self.reload_config().await;
        } else {
            debug!(changed = params.changes.len(), "translation file changed");
            self.store.invalidate();
        }
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let position = params.text_document_position.position;
        let uri = params.text_document_position.text_document.uri;
        let config = self.config();

        let Some(doc) = self.document(&uri, &config) else {
            return Ok(None);
        };
        let Some(line_text) = line_at(&doc.text, position.line as usize) else {
            return Ok(None);
        };

        let cursor = position.character as usize;
        let alternate = config.is_alternate_syntax(Path::new(uri.path()));
        let Some(matched) =
            match_completion(line_prefix(line_text, cursor), line_text, cursor, alternate)
        else {
            return Ok(None);
        };

        let Some(snapshot) = self.snapshot().await else {
            return Ok(None);
        };

        let items = complete(&matched.partial_key, &snapshot.index)
            .map(|candidate| completion_item(candidate, position.line, matched.replace_span))
            .collect();

        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn document_link(&self, params: DocumentLinkParams) -> Result<Option<Vec<DocumentLink>>> {
        let uri = params.text_document.uri;
        let config = self.config();

        let Some(doc) = self.document(&uri, &config) else {
            return Ok(None);
        };
        let Some(snapshot) = self.snapshot().await else {
            return Ok(None);
        };

        let alternate = config.is_alternate_syntax(Path::new(uri.path()));
        let links = document_links(&doc.text, alternate, &snapshot)
            .iter()
            .filter_map(document_link)
            .collect();

        Ok(Some(links))
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        if params.command != OPEN_AT_POSITION_COMMAND {
            return Err(Error::invalid_params(format!(
                "Unknown command: {}",
                params.command
            )));
        }

        let request = OpenRequest::from_arguments(params.arguments)
            .map_err(|e| Error::invalid_params(format!("Invalid arguments: {}", e)))?;
        self.open_at(request).await;

        Ok(None)
    }
}
