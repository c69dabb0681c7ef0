/// Row-level action parsed from the `data-action` / id attributes a
/// rendered fragment carries. One tagged variant per control, so the
/// dispatch boundary is a typed match instead of string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    ViewDetail(u64),
    MarkProcessing(u64),
    MarkResolved(u64),
    CopyInfo(u64),
    EditRule(u64),
    ToggleRule(u64),
    DeleteRule(u64),
    RemoveFile(usize),
}

impl ViewAction {
    /// Parse an `(action, id)` attribute pair. Unknown action names and
    /// unparseable ids yield `None`.
    pub fn parse(action: &str, id: &str) -> Option<Self> {
        if action == "remove-file" {
            return id.parse().ok().map(Self::RemoveFile);
        }
        let id: u64 = id.parse().ok()?;
        match action {
            "view-detail" => Some(Self::ViewDetail(id)),
            "mark-processing" => Some(Self::MarkProcessing(id)),
            "mark-resolved" => Some(Self::MarkResolved(id)),
            "copy-info" => Some(Self::CopyInfo(id)),
            "edit" => Some(Self::EditRule(id)),
            "toggle" => Some(Self::ToggleRule(id)),
            "delete" => Some(Self::DeleteRule(id)),
            _ => None,
        }
    }

    /// The `data-action` attribute value this action renders as.
    pub fn name(self) -> &'static str {
        match self {
            Self::ViewDetail(_) => "view-detail",
            Self::MarkProcessing(_) => "mark-processing",
            Self::MarkResolved(_) => "mark-resolved",
            Self::CopyInfo(_) => "copy-info",
            Self::EditRule(_) => "edit",
            Self::ToggleRule(_) => "toggle",
            Self::DeleteRule(_) => "delete",
            Self::RemoveFile(_) => "remove-file",
        }
    }
}

/// What a dispatched action produced for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// State was mutated and the surface re-rendered; nothing to return.
    Handled,
    /// A markup fragment, e.g. a detail modal body.
    Markup(String),
    /// Plain text destined for the clipboard.
    Clipboard(String),
}
