use decen_verify::Digest;

/// Name of the document every digest directory serves.
pub const DOCUMENT_NAME: &str = "index.html";

/// `<server>/data/<digest>/index.html`
pub fn document_url(server: &str, digest: &Digest) -> String {
    asset_url(server, digest, DOCUMENT_NAME)
}

/// `<server>/data/<digest>/<relative>`: where path-relative references of a
/// digest's document live on its origin.
pub fn asset_url(server: &str, digest: &Digest, relative: &str) -> String {
    format!("{}/data/{}/{}", server.trim_end_matches('/'), digest, relative)
}

/// `<server><path>` for origin-root-relative references (`path` starts with `/`).
pub fn join_origin(server: &str, path: &str) -> String {
    format!("{}{}", server.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_document_url() {
        let d = Digest::resolve("hello");
        assert_eq!(
            document_url("https://example.org/", &d),
            format!("https://example.org/data/{d}/index.html")
        );
    }

    #[test]
    fn builds_asset_and_root_urls() {
        let d = Digest::resolve("hello");
        assert_eq!(
            asset_url("https://example.org", &d, "img/a.png"),
            format!("https://example.org/data/{d}/img/a.png")
        );
        assert_eq!(join_origin("https://example.org/", "/img/a.png"), "https://example.org/img/a.png");
    }

    #[test]
    fn empty_origin_yields_bare_paths() {
        let d = Digest::resolve("hello");
        assert_eq!(join_origin("", "/a.css"), "/a.css");
        assert_eq!(asset_url("", &d, "a.css"), format!("/data/{d}/a.css"));
    }
}
