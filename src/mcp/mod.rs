//! MCP protocol surface - JSON-RPC messages and the stdio server loop

pub mod messages;
pub mod server;

pub use messages::{CallToolParams, ErrorCode, RpcError, RpcRequest, RpcResponse};
pub use server::{McpServer, PROTOCOL_VERSION, SERVER_NAME};
