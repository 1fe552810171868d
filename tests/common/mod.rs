#![allow(dead_code)]

use filepicker::{Client, ClientConfig, Security};
use mockito::{Matcher, Server};

pub const FAKE_HANDLE: &str = "2HHH3";
pub const FAKE_API_KEY: &str = "APIKEY";
pub const DOWNLOAD_FILE_CONTENT: &str = "DOWNLOADTEST";
pub const FILE_NOT_FOUND_BODY: &str = "FPError 115: The file cannot be found";
pub const DUMMY_ERR_STR: &str = "dummy error";

pub fn dummy_security() -> Security {
    Security::new("P", "S")
}

/// Client whose endpoint points at the mock server.
pub fn mock_client(server: &Server) -> Client {
    let config = ClientConfig::new(FAKE_API_KEY).with_endpoint(format!("{}/api/file", server.url()));
    Client::with_config(config).unwrap()
}

/// Matches the blob's file path with or without a query string.
pub fn file_path(handle: &str) -> Matcher {
    Matcher::Regex(format!(r"^/api/file/{}(\?|$)", handle))
}

/// Matches the raw query string exactly, so parameter order is checked too.
pub fn query(base64_decode: bool, security: bool) -> Matcher {
    let mut params = Vec::new();
    if base64_decode {
        params.push("base64decode=true");
    }
    if security {
        params.push("policy=P");
        params.push("signature=S");
    }
    Matcher::Exact(params.join("&"))
}

/// Matches the blob's file path requested without any query string.
pub fn bare_path(handle: &str) -> Matcher {
    Matcher::Regex(format!(r"^/api/file/{}$", handle))
}
