use std::fmt;
use std::path::Path;

use decen_fs::{AtomicWriteOptions, atomic_write};
use decen_verify::Digest;

use crate::error::{Error, Result};

/// Fixed snippet every store index page starts with.
pub const INDEX_HEAD: &str = "<link rel='stylesheet' href='../../default.css'><script src='../../default.js'></script><script src='../../ads.js'></script><div id='ads' name='ads' class='ads'></div><div id='default' name='default' class='default'></div>";

const ENTRY_TERMINATOR: &str = "<br>";

/// One line of an index page, always terminated by `<br>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexEntry(String);

impl IndexEntry {
    /// Wrap pre-rendered markup, adding the terminator if it is missing.
    pub fn raw(markup: impl Into<String>) -> Self {
        let mut markup = markup.into();
        if !markup.ends_with(ENTRY_TERMINATOR) {
            markup.push_str(ENTRY_TERMINATOR);
        }
        Self(markup)
    }

    /// Entry for the content digest's own index, linking the sibling file.
    pub fn content(file: &Digest, file_name: &str, title: &str) -> Self {
        Self(format!(
            "{}<a href=\"{}\">{}</a>{ENTRY_TERMINATOR}",
            Self::actions(file),
            escape_html(file_name),
            escape_html(title),
        ))
    }

    /// Entry for a category index, linking across to the content directory.
    pub fn category(file: &Digest, file_name: &str, title: &str) -> Self {
        let relative = format!("../{file}/{file_name}");
        Self(format!(
            "{}<a href=\"{}\">{}</a>{ENTRY_TERMINATOR}",
            Self::actions(file),
            escape_html(&relative),
            escape_html(title),
        ))
    }

    fn actions(file: &Digest) -> String {
        format!(
            "<a href=\"../../?reply={file}\">[ Reply ]</a> <a href=\"../{file}/index.html\">[ Open ]</a> "
        )
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for IndexEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Append-only, deduplicated list of index entries behind a fixed head.
///
/// An entry counts as present when its markup occurs anywhere in the rendered
/// page, head included, so text that did not split cleanly into entries still
/// blocks a second copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkIndex {
    head: String,
    entries: Vec<IndexEntry>,
}

impl Default for LinkIndex {
    fn default() -> Self { Self::new(INDEX_HEAD) }
}

impl LinkIndex {
    pub fn new(head: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            entries: Vec::new(),
        }
    }

    /// Parse a rendered page. A page that does not start with the standard
    /// [`INDEX_HEAD`] is kept whole as an opaque head.
    pub fn parse(page: &str) -> Self {
        let Some(body) = page.strip_prefix(INDEX_HEAD) else {
            return Self::new(page);
        };

        let entries = body
            .split_inclusive(ENTRY_TERMINATOR)
            .filter(|chunk| !chunk.is_empty())
            .map(|chunk| IndexEntry(chunk.to_string()))
            .collect();

        Self {
            head: INDEX_HEAD.to_string(),
            entries,
        }
    }

    /// Load from disk; a missing file is an empty index with the standard head.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if decen_fs::file_size(path)?.is_none() {
            return Ok(Self::default());
        }

        let bytes = decen_fs::atomic_read(path)?;
        let page = String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 {
            path: path.to_path_buf(),
        })?;
        Ok(Self::parse(&page))
    }

    /// Append `entry` unless an identical entry is already listed.
    pub fn append(&mut self, entry: IndexEntry) -> bool {
        if self.contains(&entry) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn contains(&self, entry: &IndexEntry) -> bool { self.render().contains(entry.as_str()) }

    pub fn entries(&self) -> &[IndexEntry] { &self.entries }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn render(&self) -> String {
        let mut page = self.head.clone();
        for entry in &self.entries {
            page.push_str(entry.as_str());
        }
        page
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            decen_fs::ensure_dir(parent)?;
        }
        atomic_write(path, self.render().as_bytes(), AtomicWriteOptions::new())?;
        Ok(())
    }
}

/// Read-then-conditionally-write append of one entry to the index at `path`.
///
/// Returns whether the file changed. Not safe against concurrent writers.
pub fn append_link(path: impl AsRef<Path>, entry: IndexEntry) -> Result<bool> {
    let path = path.as_ref();
    let mut index = LinkIndex::load(path)?;
    if !index.append(entry) {
        tracing::debug!(path = %path.display(), "index entry already present");
        return Ok(false);
    }
    index.save(path)?;
    tracing::debug!(path = %path.display(), entries = index.len(), "index entry appended");
    Ok(true)
}

/// Escape text for use inside HTML attributes and element bodies.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            c => out.push(c),
        }
    }
    out
}
