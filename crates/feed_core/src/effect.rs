use crate::FetchTicket;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the page described by the ticket and report back with its generation.
    FetchPage(FetchTicket),
    /// A trigger was dropped because the device is offline.
    NotifyOffline,
}
