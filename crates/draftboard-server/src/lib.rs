// Library root: HTTP API, snapshot poller, and WebSocket push server, so
// integration tests and the binary share one public API.

pub mod api;
pub mod poller;
pub mod protocol;
pub mod ws_server;
