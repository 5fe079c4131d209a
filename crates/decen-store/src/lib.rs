//! On-disk contract of the content store.
//!
//! The write side (upload front end, batch ingester) creates
//! `<digest>/<digest>.<ext>` files and maintains one `index.html` link list
//! per content digest and per category digest. This crate owns the path
//! arithmetic for that layout, the append-only [`LinkIndex`] those pages are
//! made of, and the [`OriginRecord`] the mirror keeps next to cached pages.

mod error;
mod index;
mod layout;
mod origin;

pub use error::{Error, Result};
pub use index::{INDEX_HEAD, IndexEntry, LinkIndex, append_link, escape_html};
pub use layout::{INDEX_FILE, ORIGIN_FILE, StoreLayout, content_file_name};
pub use origin::OriginRecord;

use decen_verify::Digest;

/// Append the pair of entries that announce one stored file: one in the
/// content digest's index and one in its category's index.
///
/// Returns `(content_changed, category_changed)`.
pub fn announce(
    layout: &StoreLayout,
    file: &Digest,
    category: &Digest,
    ext: &str,
    title: &str,
) -> Result<(bool, bool)> {
    let file_name = content_file_name(file, ext);
    let content = append_link(
        layout.index_file(file),
        IndexEntry::content(file, &file_name, title),
    )?;
    let category = append_link(
        layout.index_file(category),
        IndexEntry::category(file, &file_name, title),
    )?;
    Ok((content, category))
}
