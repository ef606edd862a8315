//! TidyFold Language Server backend
//!
//! Keeps open documents and the current settings, and answers folding
//! range and command requests from the editor.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tidyfold_core::config::NAMESPACE;
use tidyfold_core::Settings;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::{
    ConfigurationItem, DidChangeConfigurationParams, DidChangeTextDocumentParams,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, ExecuteCommandOptions,
    ExecuteCommandParams, FoldingRange, FoldingRangeParams, FoldingRangeProviderCapability,
    InitializeParams, InitializeResult, InitializedParams, MessageType, ServerCapabilities,
    ServerInfo, TextDocumentSyncCapability, TextDocumentSyncKind, Url, WorkDoneProgressOptions,
};
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, info, warn};

use crate::handlers::{self, Document, ServerCommand};

/// LSP Backend state
pub struct Backend {
    /// LSP client for sending notifications
    client: Client,
    /// Document store for open documents
    documents: Arc<RwLock<HashMap<Url, Document>>>,
    /// Settings from initialization options and configuration changes
    settings: Arc<RwLock<Settings>>,
}

impl Backend {
    /// Create a new backend instance
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(RwLock::new(HashMap::new())),
            settings: Arc::new(RwLock::new(Settings::default())),
        }
    }

    /// Get document by URI
    async fn get_document(&self, uri: &Url) -> Option<Document> {
        let docs = self.documents.read().await;
        docs.get(uri).cloned()
    }

    /// Store a newly opened document
    async fn store_document(&self, uri: Url, document: Document) {
        let mut docs = self.documents.write().await;
        docs.insert(uri, document);
    }

    /// Replace the text of an open document, keeping its language
    async fn update_text(&self, uri: &Url, text: String) {
        let mut docs = self.documents.write().await;
        match docs.get_mut(uri) {
            Some(document) => document.text = text,
            None => warn!("Change for unknown document: {}", uri),
        }
    }

    /// Remove document from store
    async fn remove_document(&self, uri: &Url) {
        let mut docs = self.documents.write().await;
        docs.remove(uri);
    }

    async fn current_settings(&self) -> Settings {
        self.settings.read().await.clone()
    }

    async fn apply_settings(&self, settings: Settings) {
        info!(
            "Settings updated: folding {}, parent blocks {}, {} excluded elements",
            if settings.enable_custom_folding {
                "enabled"
            } else {
                "disabled"
            },
            settings.fold_parent_blocks,
            settings.excluded_folding_elements.len()
        );
        *self.settings.write().await = settings;
    }

    /// Log at debug level, mirrored to the client when debug logs are on
    async fn trace(&self, message: String) {
        debug!("{}", message);
        if self.settings.read().await.show_debug_logs {
            self.client.log_message(MessageType::LOG, message).await;
        }
    }

    /// Pull the `tidyfold` section when the client sends no settings
    async fn fetch_settings(&self) -> Option<Settings> {
        let items = vec![ConfigurationItem {
            scope_uri: None,
            section: Some(NAMESPACE.to_string()),
        }];
        match self.client.configuration(items).await {
            Ok(values) => values.first().map(Settings::from_json_value),
            Err(e) => {
                warn!("Failed to fetch configuration: {}", e);
                None
            }
        }
    }

    /// Resolve the document named by the first command argument
    async fn command_document(&self, arguments: &[Value]) -> Result<Document> {
        let uri = arguments
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| Error::invalid_params("Expected a document URI argument"))?;
        let uri = Url::parse(uri)
            .map_err(|e| Error::invalid_params(format!("Invalid document URI: {}", e)))?;

        self.get_document(&uri)
            .await
            .ok_or_else(|| Error::invalid_params(format!("Document not open: {}", uri)))
    }

    async fn run_command(&self, command: ServerCommand, arguments: &[Value]) -> Result<Value> {
        match command {
            ServerCommand::DebugFolding => {
                let document = self.command_document(arguments).await?;
                let report = handlers::debug_report(&document, &self.current_settings().await);
                let count = report["count"].as_u64().unwrap_or(0);
                self.client
                    .show_message(
                        MessageType::INFO,
                        format!("Found {} folding regions", count),
                    )
                    .await;
                Ok(report)
            }
            ServerCommand::FoldableBlocks => {
                let document = self.command_document(arguments).await?;
                let blocks = handlers::foldable_blocks(&document, &self.current_settings().await);
                self.trace(format!(
                    "Applied {} decorations",
                    blocks.as_array().map(Vec::len).unwrap_or(0)
                ))
                .await;
                Ok(blocks)
            }
            ServerCommand::ToggleHighlighting => {
                let enabled = {
                    let mut settings = self.settings.write().await;
                    settings.highlight_foldable_blocks = !settings.highlight_foldable_blocks;
                    settings.highlight_foldable_blocks
                };
                self.trace(format!("Toggled highlighting to: {}", enabled))
                    .await;
                self.client
                    .show_message(MessageType::INFO, handlers::highlighting_message(enabled))
                    .await;
                Ok(Value::Bool(enabled))
            }
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("TidyFold LSP server initializing");

        if let Some(options) = params.initialization_options.as_ref() {
            self.apply_settings(Settings::from_json_value(options)).await;
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                folding_range_provider: Some(FoldingRangeProviderCapability::Simple(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: ServerCommand::ALL
                        .iter()
                        .map(|command| command.name().to_string())
                        .collect(),
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "tidyfold-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("TidyFold LSP server initialized");
        self.client
            .log_message(MessageType::INFO, "TidyFold language server ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("TidyFold LSP server shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let item = params.text_document;
        self.trace(format!(
            "Document opened: {} ({})",
            item.uri, item.language_id
        ))
        .await;
        self.store_document(item.uri, Document::new(item.language_id, item.text))
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        debug!("Document changed: {}", params.text_document.uri);
        // Since we use FULL sync, the entire content is in the first change
        if let Some(change) = params.content_changes.into_iter().next() {
            self.update_text(&params.text_document.uri, change.text)
                .await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        debug!("Document closed: {}", params.text_document.uri);
        self.remove_document(&params.text_document.uri).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        self.trace("Configuration changed, updating settings".to_string())
            .await;

        let settings = if params.settings.is_null() {
            self.fetch_settings().await
        } else {
            Some(Settings::from_json_value(&params.settings))
        };

        if let Some(settings) = settings {
            self.apply_settings(settings).await;
        }
    }

    async fn folding_range(
        &self,
        params: FoldingRangeParams,
    ) -> Result<Option<Vec<FoldingRange>>> {
        let uri = params.text_document.uri;
        self.trace(format!("Folding range request for: {}", uri))
            .await;

        // Get document from store
        let document = match self.get_document(&uri).await {
            Some(doc) => doc,
            None => {
                warn!("Document not found for folding: {}", uri);
                return Ok(None);
            }
        };

        let settings = self.current_settings().await;
        if !settings.enable_custom_folding {
            self.trace("Custom folding is disabled in settings".to_string())
                .await;
        }

        let ranges = handlers::folding_ranges(&document, &settings);
        match &ranges {
            Some(ranges) => {
                self.trace(format!(
                    "Generated {} folding ranges for {}",
                    ranges.len(),
                    uri
                ))
                .await
            }
            None => {
                self.trace(format!(
                    "Skipping folding for {} document {}",
                    document.language_id, uri
                ))
                .await
            }
        }

        Ok(ranges)
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        debug!("Execute command request: {}", params.command);

        let command = ServerCommand::from_name(&params.command).ok_or_else(|| {
            Error::invalid_params(format!("Unknown command: {}", params.command))
        })?;

        self.run_command(command, &params.arguments).await.map(Some)
    }
}

/// Run the language server over stdio
pub async fn run_server() {
    // Initialize tracing subscriber for logging; stdout carries JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting TidyFold Language Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
