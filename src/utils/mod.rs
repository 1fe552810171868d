//! Utilities: query encoding, request URL assembly and download file naming.
//!
//! These are the pure pieces of the client, kept apart from the HTTP layer:
//! - Query strings are built from ordered parameter lists (see models::QueryParams)
//! - Request URLs are `<endpoint>/<handle>[?<query>]`
//! - Download targets come from the X-File-Name header, a fallback name, or the caller's path
//!
//! Values are appended verbatim; the service expects policies and signatures exactly
//! as they were produced by the signer.

use std::path::{Path, PathBuf};

/// Response header carrying the stored file's name.
pub const FILE_NAME_HEADER: &str = "X-File-Name";

/// Joins `name=value` pairs with `&`, preserving order.
pub fn encode_query<K: AsRef<str>, V: AsRef<str>>(params: &[(K, V)]) -> String {
    params
        .iter()
        .map(|(name, value)| format!("{}={}", name.as_ref(), value.as_ref()))
        .collect::<Vec<_>>()
        .join("&")
}

/// Builds `<endpoint>/<handle>`, adding `?<query>` only when the query is non-empty.
pub fn build_url(endpoint: &str, handle: &str, query: &str) -> String {
    let mut url = format!("{}/{}", endpoint.trim_end_matches('/'), handle);
    if !query.is_empty() {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// Picks the local file name for a download.
///
/// Uses the header value when it survives sanitising, otherwise `fallback`.
pub fn resolve_file_name(header: Option<&str>, fallback: &str) -> String {
    header
        .map(sanitize_file_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Strips directories from a server-provided name and replaces control
/// characters and characters that are illegal on common filesystems.
fn sanitize_file_name(raw: &str) -> String {
    let base = raw.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(raw);
    let illegal: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
    let name: String = base
        .chars()
        .map(|c| if illegal.contains(&c) || c.is_control() { '_' } else { c })
        .collect();
    // trim spaces and dots
    name.trim().trim_matches('.').to_string()
}

/// Resolves where a download is written.
///
/// An existing directory receives `<dir>/<resolved name>`; any other path is used as is.
pub fn destination_path(path: &Path, header: Option<&str>, fallback: &str) -> PathBuf {
    if path.is_dir() {
        path.join(resolve_file_name(header, fallback))
    } else {
        path.to_path_buf()
    }
}

/// Sibling path used while a download is in flight.
pub fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_has_no_question_mark_without_params() {
        let params: Vec<(&str, String)> = Vec::new();
        let query = encode_query(&params);
        assert_eq!(query, "");
        assert_eq!(
            build_url("http://www.filepicker.io/api/file", "2HHH3", &query),
            "http://www.filepicker.io/api/file/2HHH3"
        );
    }

    #[test]
    fn url_keeps_parameter_order_and_values() {
        let query = encode_query(&[("base64decode", "true"), ("policy", "P"), ("signature", "S")]);
        assert_eq!(
            build_url("http://www.filepicker.io/api/file/", "2HHH3", &query),
            "http://www.filepicker.io/api/file/2HHH3?base64decode=true&policy=P&signature=S"
        );
    }

    #[test]
    fn header_name_wins_when_present() {
        assert_eq!(resolve_file_name(Some("document.txt"), "2HHH3"), "document.txt");
        assert_eq!(resolve_file_name(Some(""), "2HHH3"), "2HHH3");
        assert_eq!(resolve_file_name(None, "2HHH3"), "2HHH3");
    }

    #[test]
    fn header_name_is_sanitised() {
        assert_eq!(resolve_file_name(Some("../../etc/passwd"), "x"), "passwd");
        assert_eq!(resolve_file_name(Some("a:b*c.txt"), "x"), "a_b_c.txt");
        assert_eq!(resolve_file_name(Some(" .. "), "x"), "x");
        assert_eq!(resolve_file_name(Some("a\0b"), "x"), "a_b");
        assert_eq!(resolve_file_name(Some("tab\there\n"), "x"), "tab_here_");
    }

    #[test]
    fn directory_gets_resolved_name_file_path_is_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            destination_path(dir.path(), Some("document.txt"), "2HHH3"),
            dir.path().join("document.txt")
        );
        let file = dir.path().join("doc.txt");
        assert_eq!(destination_path(&file, Some("document.txt"), "2HHH3"), file);
    }

    #[test]
    fn partial_path_appends_suffix() {
        assert_eq!(partial_path(Path::new("out/dc.txt")), PathBuf::from("out/dc.txt.part"));
    }
}
