//! Zabbix JSON-RPC 类型定义

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub(crate) struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<String>,
}

/// `host.get` 返回行
#[derive(Debug, Deserialize)]
pub(crate) struct HostIdRow {
    pub hostid: String,
}

/// `host.delete` 返回值
#[derive(Debug, Deserialize)]
pub(crate) struct DeletedHosts {
    pub hostids: Vec<String>,
}
