use decen_fetch::{AttemptStatus, ProbeAttempt};
use decen_mirror::{AssetRecord, AssetStatus, MirrorSummary};
use tabled::{
    Table, Tabled,
    settings::{Panel, Remove, Style, object::Rows},
};

#[derive(Debug, Clone, Default)]
pub struct Formatter {
    pub header: Option<String>,
    pub footer: Option<String>,
    pub hide_col_name: bool,
}

impl Formatter {
    pub fn header(header: impl Into<String>) -> Self {
        Self {
            header: Some(header.into()),
            ..Self::default()
        }
    }

    pub fn build<T: Tabled, I: IntoIterator<Item = T>>(self, data: I) -> Table {
        let mut table = Table::new(data);
        if self.hide_col_name {
            table.with(Remove::row(Rows::first()));
        }
        if let Some(header) = self.header {
            table.with(Panel::header(header));
        }
        if let Some(footer) = self.footer {
            table.with(Panel::footer(footer));
        }

        table.with(Style::blank());
        table
    }
}

#[derive(Tabled)]
pub struct AttemptRow {
    #[tabled(rename = "Server")]
    pub server: String,
    #[tabled(rename = "Result")]
    pub result: String,
}

impl From<&ProbeAttempt> for AttemptRow {
    fn from(attempt: &ProbeAttempt) -> Self {
        let result = match &attempt.status {
            AttemptStatus::Found { bytes } => format!("found ({bytes} bytes)"),
            AttemptStatus::Status { code } => format!("HTTP {code}"),
            AttemptStatus::Transport { reason } => format!("unreachable: {reason}"),
        };
        Self {
            server: attempt.server.to_string(),
            result,
        }
    }
}

#[derive(Tabled)]
pub struct AssetRow {
    #[tabled(rename = "Status")]
    pub status: &'static str,
    #[tabled(rename = "Size")]
    pub size: String,
    #[tabled(rename = "Source")]
    pub source: String,
    #[tabled(rename = "Local / Error")]
    pub detail: String,
}

impl From<&AssetRecord> for AssetRow {
    fn from(record: &AssetRecord) -> Self {
        let status = match record.status {
            AssetStatus::Downloaded => "downloaded",
            AssetStatus::AlreadyExists => "exists",
            AssetStatus::Failed => "failed",
        };
        let detail = match (&record.error_detail, &record.local_path) {
            (Some(error), _) => error.clone(),
            (None, Some(path)) => path.display().to_string(),
            (None, None) => String::new(),
        };
        let size = match record.status {
            AssetStatus::Failed => "-".to_string(),
            _ => record.byte_size.to_string(),
        };
        Self {
            status,
            size,
            source: record.source_url.clone(),
            detail,
        }
    }
}

#[derive(Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Downloaded")]
    pub downloaded: usize,
    #[tabled(rename = "Already existed")]
    pub already_existing: usize,
    #[tabled(rename = "Failed")]
    pub failed: usize,
    #[tabled(rename = "Bytes")]
    pub bytes_downloaded: u64,
}

impl From<&MirrorSummary> for SummaryRow {
    fn from(summary: &MirrorSummary) -> Self {
        Self {
            downloaded: summary.downloaded,
            already_existing: summary.already_existing,
            failed: summary.failed,
            bytes_downloaded: summary.bytes_downloaded,
        }
    }
}
