use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use feed_core::{Effect, Msg, QueryBuilder};
use feed_engine::{EngineEvent, EngineEvents, EngineHandle};
use feed_logging::{feed_info, feed_warn};

use crate::commands::Input;
use crate::config::FeedConfig;
use crate::render;

pub struct EffectRunner {
    engine: EngineHandle,
    queries: QueryBuilder,
}

impl EffectRunner {
    pub fn new(config: &FeedConfig, input_tx: mpsc::Sender<Input>) -> anyhow::Result<Self> {
        let queries = QueryBuilder::new(&config.base_url, config.api_key.clone())
            .context("invalid base_url in configuration")?;
        if config.https_only && !queries.is_secure() {
            anyhow::bail!(
                "base_url {} is not https; set `https_only: false` to allow it",
                queries.base_url()
            );
        }
        let engine =
            EngineHandle::new(config.fetch_settings()).context("starting fetch engine")?;
        spawn_event_loop(engine.events(), input_tx);
        Ok(Self { engine, queries })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage(ticket) => {
                    let url = self.queries.build(ticket.section.as_deref(), ticket.page);
                    feed_info!(
                        "FetchPage generation={} page={} section={:?}",
                        ticket.generation,
                        ticket.page,
                        ticket.section
                    );
                    self.engine.fetch(ticket.generation, url);
                }
                Effect::NotifyOffline => {
                    println!("{}", render::NO_CONNECTION);
                }
            }
        }
    }
}

/// Holds only the receiving side, so dropping the runner shuts the engine down.
fn spawn_event_loop(events: EngineEvents, input_tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if input_tx.send(Input::Feed(map_event(event))).is_err() {
                break;
            }
        }
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched {
            generation,
            result: Ok(page),
        } => {
            if page.skipped > 0 {
                feed_warn!(
                    "Generation {} page {} dropped {} incomplete entries",
                    generation,
                    page.page_number,
                    page.skipped
                );
            }
            Msg::PageLoaded { generation, page }
        }
        EngineEvent::PageFetched {
            generation,
            result: Err(err),
        } => {
            feed_warn!("Fetch for generation {} failed: {}", generation, err);
            Msg::PageFailed {
                generation,
                reason: err.reason(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_core::{FailureReason, Page};
    use feed_engine::FetchError;

    #[test]
    fn completions_map_to_feed_messages() {
        let page = Page::new(2, Vec::new()).with_skipped(1);
        assert_eq!(
            map_event(EngineEvent::PageFetched {
                generation: 4,
                result: Ok(page.clone()),
            }),
            Msg::PageLoaded {
                generation: 4,
                page
            }
        );
        assert_eq!(
            map_event(EngineEvent::PageFetched {
                generation: 5,
                result: Err(FetchError::NetworkFailure {
                    cause: "connection reset".into(),
                    timed_out: false,
                }),
            }),
            Msg::PageFailed {
                generation: 5,
                reason: FailureReason::Network,
            }
        );
    }

    #[test]
    fn runner_rejects_bad_base_url() {
        let (tx, _rx) = mpsc::channel();
        let config = FeedConfig {
            base_url: "content.guardianapis.com/search".to_string(),
            ..FeedConfig::default()
        };
        let err = EffectRunner::new(&config, tx).err().expect("bad url rejected");
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn runner_rejects_plain_http_base_unless_allowed() {
        let config = FeedConfig {
            base_url: "http://localhost:8080/search".to_string(),
            ..FeedConfig::default()
        };
        let (tx, _rx) = mpsc::channel();
        let err = EffectRunner::new(&config, tx).err().expect("http rejected");
        assert!(err.to_string().contains("not https"));

        let config = FeedConfig {
            https_only: false,
            ..config
        };
        let (tx, _rx) = mpsc::channel();
        assert!(EffectRunner::new(&config, tx).is_ok());
    }
}
