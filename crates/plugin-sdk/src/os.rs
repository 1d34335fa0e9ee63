//! Typed facade over the OS plugin's evaluation surface.

use std::sync::Arc;

use ep_connector::{keys, ConnectorStore};
use ep_domain::capability::CapabilityDescriptor;
use ep_domain::error::Result;

use crate::content;
use crate::decode;
use crate::eval::EvalInvoker;
use crate::params::Params;

/// Proxy for the OS plugin resolved on one node.
///
/// Stateless beyond the identifiers fixed at construction; cheap to clone
/// and safe to share across tasks.  Build one from a discovered
/// [`CapabilityDescriptor`] (see `PluginSession::os`).
#[derive(Clone)]
pub struct OsPlugin {
    invoker: EvalInvoker,
    selector: String,
    node: String,
    instance_id: String,
}

impl OsPlugin {
    pub fn new(store: Arc<dyn ConnectorStore>, descriptor: &CapabilityDescriptor) -> Self {
        Self {
            invoker: EvalInvoker::new(store),
            selector: keys::plugin_exec(&descriptor.node, &descriptor.instance_id),
            node: descriptor.node.clone(),
            instance_id: descriptor.instance_id.clone(),
        }
    }

    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    async fn call(&self, function: &str, params: Params) -> Result<String> {
        self.invoker
            .invoke(&self.selector, function, &params.finish())
            .await
    }

    // ── Filesystem ───────────────────────────────────────────────────

    /// Check if the given directory exists on the node.
    pub async fn dir_exists(&self, dir_path: &str) -> Result<bool> {
        let params = Params::new().str("dir_path", dir_path);
        decode::boolean(&self.call("dir_exists", params).await?)
    }

    /// Create the given directory.
    pub async fn create_dir(&self, dir_path: &str) -> Result<bool> {
        let params = Params::new().str("dir_path", dir_path);
        decode::boolean(&self.call("create_dir", params).await?)
    }

    /// Remove the given directory.
    pub async fn remove_dir(&self, dir_path: &str) -> Result<bool> {
        let params = Params::new().str("dir_path", dir_path);
        decode::boolean(&self.call("remove_dir", params).await?)
    }

    /// Check if the given file exists on the node.
    pub async fn file_exists(&self, file_path: &str) -> Result<bool> {
        let params = Params::new().str("file_path", file_path);
        decode::boolean(&self.call("file_exists", params).await?)
    }

    /// Create the given file, empty.
    pub async fn create_file(&self, file_path: &str) -> Result<bool> {
        let params = Params::new().str("file_path", file_path);
        decode::boolean(&self.call("create_file", params).await?)
    }

    /// Remove the given file.
    pub async fn remove_file(&self, file_path: &str) -> Result<bool> {
        let params = Params::new().str("file_path", file_path);
        decode::boolean(&self.call("remove_file", params).await?)
    }

    /// Store `content` into `filename` under `file_path`.
    ///
    /// The bytes cross the string-only parameter channel double-encoded
    /// (see [`content`]); the remote side reverses the encoding before
    /// writing.
    pub async fn store_file(
        &self,
        content_bytes: &[u8],
        file_path: &str,
        filename: &str,
    ) -> Result<bool> {
        let params = Params::new()
            .str("file_path", file_path)
            .str("filename", filename)
            .str("content", content::encode(content_bytes));
        decode::boolean(&self.call("store_file", params).await?)
    }

    /// Read the given file, optionally with root privileges.
    pub async fn read_file(&self, file_path: &str, root: bool) -> Result<String> {
        let params = Params::new().str("file_path", file_path).boolean("root", root);
        self.call("read_file", params).await
    }

    /// Download the file at `url` into `file_path` on the node.
    pub async fn download_file(&self, url: &str, file_path: &str) -> Result<bool> {
        let params = Params::new().str("url", url).str("file_path", file_path);
        decode::boolean(&self.call("download_file", params).await?)
    }

    /// Content hash of the given file.
    pub async fn checksum(&self, file_path: &str) -> Result<String> {
        let params = Params::new().str("file_path", file_path);
        self.call("checksum", params).await
    }

    // ── Processes ────────────────────────────────────────────────────

    /// Execute a command on the node and return its output.
    ///
    /// `blocking` waits for the command to finish; `external` runs it in an
    /// external shell rather than the plugin process.
    pub async fn execute_command(
        &self,
        command: &str,
        blocking: bool,
        external: bool,
    ) -> Result<String> {
        let params = Params::new()
            .str("command", command)
            .boolean("blocking", blocking)
            .boolean("external", external);
        self.call("execute_command", params).await
    }

    /// Send SIGINT to the given PID.
    pub async fn send_sig_int(&self, pid: i32) -> Result<bool> {
        let params = Params::new().int("pid", i64::from(pid));
        decode::boolean(&self.call("send_sig_int", params).await?)
    }

    /// Send SIGKILL to the given PID.
    pub async fn send_sig_kill(&self, pid: i32) -> Result<bool> {
        let params = Params::new().int("pid", i64::from(pid));
        decode::boolean(&self.call("send_sig_kill", params).await?)
    }

    /// Check if the given PID is still running.
    pub async fn check_if_pid_exists(&self, pid: i32) -> Result<bool> {
        let params = Params::new().int("pid", i64::from(pid));
        decode::boolean(&self.call("check_if_pid_exists", params).await?)
    }

    // ── Interfaces & addresses ───────────────────────────────────────

    /// Interface type (ethernet, wireless, ...) of the named interface.
    pub async fn get_interface_type(&self, name: &str) -> Result<String> {
        let params = Params::new().str("name", name);
        self.call("get_intf_type", params).await
    }

    /// Mark the named interface available for allocation.
    pub async fn set_interface_available(&self, intf_name: &str) -> Result<bool> {
        let params = Params::new().str("intf_name", intf_name);
        decode::boolean(&self.call("set_interface_available", params).await?)
    }

    /// Mark the named interface unavailable for allocation.
    pub async fn set_interface_unavailable(&self, intf_name: &str) -> Result<bool> {
        let params = Params::new().str("intf_name", intf_name);
        // Wire name spelled as registered by the deployed plugins.
        decode::boolean(&self.call("set_interface_unaviable", params).await?)
    }

    /// Management IP address of the local node.
    pub async fn local_mgmt_address(&self) -> Result<String> {
        self.call("local_mgmt_address", Params::new()).await
    }
}
