use crate::{Effect, EmptyState, FeedState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FeedState, msg: Msg) -> (FeedState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            if state.in_flight().is_some() || !state.items().is_empty() {
                return (state, Vec::new());
            }
            if !state.connected() {
                state.set_empty_state(Some(EmptyState::NoConnection));
                return (state, Vec::new());
            }
            start_first_page(&mut state)
        }
        Msg::RefreshRequested => {
            if !state.connected() {
                return (state, vec![Effect::NotifyOffline]);
            }
            start_first_page(&mut state)
        }
        Msg::SectionSelected(section) => {
            state.set_filter_section(section);
            if state.connected() {
                start_first_page(&mut state)
            } else {
                state.reset();
                state.set_empty_state(Some(EmptyState::NoConnection));
                Vec::new()
            }
        }
        Msg::ScrolledToBottom => {
            if state.is_loading() || state.is_exhausted() {
                return (state, Vec::new());
            }
            if !state.connected() {
                return (state, vec![Effect::NotifyOffline]);
            }
            vec![Effect::FetchPage(state.begin_fetch())]
        }
        Msg::ConnectivityChanged(connected) => {
            state.set_connected(connected);
            Vec::new()
        }
        Msg::PageLoaded { generation, page } => {
            let Some(ticket) = state.take_in_flight(generation) else {
                return (state, Vec::new());
            };
            state.mark_loading(false);
            state.apply_page(page, ticket.is_first_page());
            let empty_state = state.items().is_empty().then_some(EmptyState::NoResults);
            state.set_empty_state(empty_state);
            Vec::new()
        }
        Msg::PageFailed { generation, reason } => {
            if state.take_in_flight(generation).is_none() {
                return (state, Vec::new());
            }
            state.mark_loading(false);
            state.apply_failure(reason);
            if state.items().is_empty() {
                let empty_state = if state.connected() {
                    EmptyState::SomethingWrong
                } else {
                    EmptyState::NoConnection
                };
                state.set_empty_state(Some(empty_state));
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn start_first_page(state: &mut FeedState) -> Vec<Effect> {
    state.reset();
    vec![Effect::FetchPage(state.begin_fetch())]
}
