pub const PORT: u16 = 3000;

/// Served when the request path is empty or `/`.
pub const DEFAULT_DOCUMENT: &str = "index.html";
