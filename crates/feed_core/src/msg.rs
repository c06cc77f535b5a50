#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Screen came up; load the first page unless something is already shown.
    Started,
    /// User pulled to refresh.
    RefreshRequested,
    /// User scrolled to the end of the list.
    ScrolledToBottom,
    /// User picked a topic filter; `None` means all sections.
    SectionSelected(Option<String>),
    /// Reachability as observed by the caller.
    ConnectivityChanged(bool),
    /// Engine completion with a parsed page.
    PageLoaded {
        generation: crate::Generation,
        page: crate::Page,
    },
    /// Engine completion with a failure.
    PageFailed {
        generation: crate::Generation,
        reason: crate::FailureReason,
    },
}
