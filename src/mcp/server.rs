use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::{
    config::{Config, load_config},
    core::{LookupError, Snapshot, TranslationStore, complete, document_links, find_key_definition},
};

use super::types::{
    CompleteKeysParams, CompleteKeysResult, FindLinksParams, FindLinksResult, KeyItem, LinkItem,
    Location, LocateResult, LocateTranslationFileParams, LookupKeyParams, LookupKeyResult,
    Pagination,
};

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

/// A project root with its configuration and a fresh store.
struct Workspace {
    root: PathBuf,
    config: Config,
    from_file: bool,
    store: TranslationStore,
}

impl Workspace {
    fn open(project_root_path: &str) -> Result<Self, McpError> {
        let root = PathBuf::from(project_root_path);
        if !root.is_dir() {
            return Err(McpError::invalid_params(
                format!("Project root not found: {}", project_root_path),
                None,
            ));
        }

        let loaded = load_config(&root).map_err(|e| {
            McpError::internal_error(format!("Failed to load config: {:#}", e), None)
        })?;
        let from_file = loaded.from_file();
        let store = TranslationStore::new(vec![root.clone()], &loaded.config);

        Ok(Self {
            root,
            config: loaded.config,
            from_file,
            store,
        })
    }

    fn snapshot(&self) -> Result<Snapshot, McpError> {
        self.store.snapshot().map_err(lookup_error)
    }

    /// Resolve a source file inside the project root.
    ///
    /// Absolute paths are accepted only when they resolve under the root.
    fn source_path(&self, file_path: &str) -> Result<PathBuf, McpError> {
        let unreadable = |e: std::io::Error| {
            McpError::invalid_params(
                format!("Failed to read source file {}: {}", file_path, e),
                None,
            )
        };
        let root = self.root.canonicalize().map_err(unreadable)?;
        let path = self.root.join(file_path).canonicalize().map_err(unreadable)?;

        if !path.starts_with(&root) {
            return Err(McpError::invalid_params(
                format!("Source file is outside the project root: {}", file_path),
                None,
            ));
        }
        Ok(path)
    }
}

fn lookup_error(err: LookupError) -> McpError {
    McpError::internal_error(err.to_string(), None)
}

fn location(line: u32, character: u32) -> Location {
    Location {
        line: line + 1,
        column: character + 1,
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;

    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[derive(Clone)]
pub struct LangkeyMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for LangkeyMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl LangkeyMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Find the translation file used for a project
    #[tool(
        description = "Find the en.json translation file for a project. Checks the configured locations first, then searches the project (skipping node_modules)."
    )]
    pub async fn locate_translation_file(
        &self,
        params: Parameters<LocateTranslationFileParams>,
    ) -> Result<CallToolResult, McpError> {
        let workspace = Workspace::open(&params.0.project_root_path)?;

        let Some(path) = workspace.store.locate() else {
            return json_result(&LocateResult {
                found: false,
                file_path: None,
                key_count: None,
                error: None,
                config_from_file: workspace.from_file,
            });
        };

        let (key_count, error) = match workspace.store.index() {
            Ok(index) => (Some(index.len()), None),
            Err(err) => (None, Some(err.to_string())),
        };

        json_result(&LocateResult {
            found: true,
            file_path: Some(path.to_string_lossy().to_string()),
            key_count,
            error,
            config_from_file: workspace.from_file,
        })
    }

    /// List keys matching a partial key
    #[tool(
        description = "List translation keys containing a partial key (case-insensitive), in file order, with their English values. Returns paginated list."
    )]
    pub async fn complete_keys(
        &self,
        params: Parameters<CompleteKeysParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let limit = params
            .limit
            .map(|v| v as usize)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        let offset = params.offset.map(|v| v as usize).unwrap_or(0);

        let workspace = Workspace::open(&params.project_root_path)?;
        let snapshot = workspace.snapshot()?;

        let candidates = complete(params.partial_key.as_deref().unwrap_or(""), &snapshot.index);
        let total_count = candidates.clone().count();

        let items: Vec<KeyItem> = candidates
            .skip(offset)
            .take(limit)
            .map(|c| KeyItem {
                key: c.key.to_string(),
                value: c.value.unwrap_or_default().to_string(),
            })
            .collect();

        let has_more = offset + items.len() < total_count;

        json_result(&CompleteKeysResult {
            total_count,
            items,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        })
    }

    /// Look up a single key
    #[tool(
        description = "Look up a full translation key: its English value and where it is defined in the translation file."
    )]
    pub async fn lookup_key(
        &self,
        params: Parameters<LookupKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let workspace = Workspace::open(&params.project_root_path)?;
        let snapshot = workspace.snapshot()?;

        let value = snapshot.index.get(&params.key).map(str::to_string);
        let definition = value
            .as_ref()
            .and_then(|_| find_key_definition(&snapshot.source, &params.key))
            .map(|pos| location(pos.line, pos.character));

        json_result(&LookupKeyResult {
            found: value.is_some(),
            key: params.key,
            value,
            file_path: snapshot.path.to_string_lossy().to_string(),
            definition,
        })
    }

    /// Find translation calls in a source file
    #[tool(
        description = "Find Lang.t('key') calls (and $t('key') in .vue files) in a source file whose keys exist in the translation file, with the definition location of each key."
    )]
    pub async fn find_links(
        &self,
        params: Parameters<FindLinksParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let workspace = Workspace::open(&params.project_root_path)?;

        let path = workspace.source_path(&params.file_path)?;
        let source = fs::read_to_string(&path).map_err(|e| {
            McpError::invalid_params(
                format!("Failed to read source file {}: {}", params.file_path, e),
                None,
            )
        })?;

        let snapshot = workspace.snapshot()?;
        let alternate = params.alternate_syntax.unwrap_or(false)
            || workspace.config.is_alternate_syntax(Path::new(&params.file_path));

        let links: Vec<LinkItem> = document_links(&source, alternate, &snapshot)
            .into_iter()
            .map(|link| LinkItem {
                start: location(link.start.0, link.start.1),
                end: location(link.end.0, link.end.1),
                definition: location(link.target.line, link.target.character),
                key: link.key,
            })
            .collect();

        json_result(&FindLinksResult {
            file_path: path.to_string_lossy().to_string(),
            translation_file: snapshot.path.to_string_lossy().to_string(),
            total_count: links.len(),
            links,
        })
    }
}

#[tool_handler]
impl ServerHandler for LangkeyMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "langkey MCP helps AI agents write and check Lang.t('key') translation calls \
                 against a project's en.json.\n\n\
                 Available tools:\n\
                 1. locate_translation_file - Find the translation file and count its keys\n\
                 2. complete_keys - List keys matching a partial key (paginated)\n\
                 3. lookup_key - Get the value and definition location of one key\n\
                 4. find_links - List calls in a source file that resolve to a key\n\n\
                 Keys are dotted paths into the nested JSON, e.g. \"common.ok\".\n\
                 Use complete_keys before adding a Lang.t() call to reuse an existing key."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = LangkeyMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
