/// Returns `true` for status codes that mean "no content": 400 and above.
///
/// ```
/// use decen_fetch::core::is_error_status;
///
/// assert!(is_error_status(404));
/// assert!(is_error_status(503));
/// assert!(!is_error_status(200));
/// assert!(!is_error_status(304));
/// ```
pub fn is_error_status(status: u16) -> bool { status >= 400 }

/// Returns `true` if the HTTP status code indicates a redirect.
///
/// Redirects are followed by the transport; one surfacing here means the
/// redirect limit was hit or a `Location` was missing.
pub fn is_redirect(status: u16) -> bool { matches!(status, 301 | 302 | 303 | 307 | 308) }
