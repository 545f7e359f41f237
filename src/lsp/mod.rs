//! Wire types and method names for the LSP subset the server speaks.

pub mod types;

/// Protocol method names the server recognizes
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const SHUTDOWN: &str = "shutdown";
    pub const EXIT: &str = "exit";
    pub const DID_OPEN: &str = "textDocument/didOpen";
    pub const DID_CHANGE: &str = "textDocument/didChange";
    pub const HOVER: &str = "textDocument/hover";
    pub const DEFINITION: &str = "textDocument/definition";
    pub const CODE_ACTION: &str = "textDocument/codeAction";
    pub const COMPLETION: &str = "textDocument/completion";
    pub const PUBLISH_DIAGNOSTICS: &str = "textDocument/publishDiagnostics";
}
