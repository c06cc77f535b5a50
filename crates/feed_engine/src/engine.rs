use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use feed_core::Generation;
use feed_logging::{feed_debug, feed_warn};

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::{EngineError, EngineEvent};

enum EngineCommand {
    Fetch { generation: Generation, url: String },
}

/// Runs fetches on a background tokio runtime and reports completions over a channel.
///
/// Completions carry the generation they were issued with; the engine never
/// drops or reorders them, deciding staleness is left to the feed state.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    events: EngineEvents,
}

/// Receiving half of an [`EngineHandle`].
///
/// Holding it does not keep the engine alive: once every handle is dropped
/// the engine thread exits and `recv` returns `None`.
#[derive(Clone)]
pub struct EngineEvents {
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineEvents {
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Blocks until the next completion; `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv().ok()
    }
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let fetcher = ReqwestFetcher::new(settings)?;
        Self::with_fetcher(Arc::new(fetcher))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("feed-engine")
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), command, event_tx).await;
                });
            }
            feed_debug!("Engine command channel closed");
        });

        Ok(Self {
            cmd_tx,
            events: EngineEvents {
                event_rx: Arc::new(Mutex::new(event_rx)),
            },
        })
    }

    pub fn fetch(&self, generation: Generation, url: impl Into<String>) {
        let command = EngineCommand::Fetch {
            generation,
            url: url.into(),
        };
        if self.cmd_tx.send(command).is_err() {
            feed_warn!("Engine thread is gone; dropping fetch for generation {}", generation);
        }
    }

    pub fn events(&self) -> EngineEvents {
        self.events.clone()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.events.try_recv()
    }

    pub fn recv(&self) -> Option<EngineEvent> {
        self.events.recv()
    }
}

async fn handle_command(
    fetcher: &dyn Fetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Fetch { generation, url } => {
            let result = fetcher.fetch(&url).await;
            let _ = event_tx.send(EngineEvent::PageFetched { generation, result });
        }
    }
}
