//! Single-flight chat exchange driven from the frame loop.
use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use bevy::{
    log::{debug, warn},
    prelude::*,
};

use super::{
    errors::{ChatError, ChatRejected},
    transport::ChatTransport,
};

const EXCHANGE_THREAD_NAME: &str = "chat-exchange";

/// The exchange currently owned by the bridge.
enum InFlight {
    Running(JoinHandle<Result<String, ChatError>>),
    /// The worker could not be started; reported on the next poll.
    Failed(ChatError),
}

/// Owns the transport and at most one in-flight exchange.
#[derive(Resource)]
pub struct ChatBridge {
    transport: Arc<dyn ChatTransport>,
    in_flight: Option<InFlight>,
}

impl ChatBridge {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            in_flight: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn describe(&self) -> String {
        self.transport.describe()
    }

    /// Starts an exchange on its own worker thread. Overlapping and empty sends are dropped, not queued.
    pub fn send(&mut self, text: &str) -> Result<(), ChatRejected> {
        if self.is_busy() {
            return Err(ChatRejected::Busy);
        }
        if text.is_empty() {
            return Err(ChatRejected::Empty);
        }

        let transport = Arc::clone(&self.transport);
        let message = text.to_string();
        let spawned = thread::Builder::new()
            .name(EXCHANGE_THREAD_NAME.to_string())
            .spawn(move || transport.exchange(&message));
        self.in_flight = Some(match spawned {
            Ok(handle) => InFlight::Running(handle),
            Err(err) => {
                warn!(target: "chat", "Could not start chat exchange: {}", err);
                InFlight::Failed(ChatError::transport(err.to_string()))
            }
        });
        debug!(target: "chat", "API call started");
        Ok(())
    }

    /// Checks the in-flight exchange without blocking; the bridge is idle again once this yields a result.
    pub fn poll(&mut self) -> Option<Result<String, ChatError>> {
        if let Some(InFlight::Running(handle)) = &self.in_flight {
            if !handle.is_finished() {
                return None;
            }
        }

        match self.in_flight.take()? {
            InFlight::Running(handle) => Some(handle.join().unwrap_or_else(|_| {
                Err(ChatError::transport("chat exchange worker panicked"))
            })),
            InFlight::Failed(err) => Some(Err(err)),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            mpsc, Mutex,
        },
        thread,
        time::{Duration, Instant},
    };

    /// Transport that answers only when the test releases it.
    pub(crate) struct GatedTransport {
        gate: Mutex<mpsc::Receiver<Result<String, ChatError>>>,
        pub(crate) calls: AtomicUsize,
    }

    impl GatedTransport {
        pub(crate) fn new() -> (Arc<Self>, mpsc::Sender<Result<String, ChatError>>) {
            let (sender, receiver) = mpsc::channel();
            let transport = Arc::new(Self {
                gate: Mutex::new(receiver),
                calls: AtomicUsize::new(0),
            });
            (transport, sender)
        }
    }

    impl ChatTransport for GatedTransport {
        fn exchange(&self, _message: &str) -> Result<String, ChatError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate
                .lock()
                .unwrap()
                .recv_timeout(Duration::from_secs(5))
                .unwrap_or_else(|_| Err(ChatError::transport("gate timed out")))
        }

        fn describe(&self) -> String {
            "gated".to_string()
        }
    }

    pub(crate) fn wait_for(bridge: &mut ChatBridge) -> Result<String, ChatError> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(result) = bridge.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "exchange never completed");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn second_send_while_busy_is_dropped() {
        let (transport, release) = GatedTransport::new();
        let mut bridge = ChatBridge::new(transport.clone());

        assert_eq!(bridge.send("first"), Ok(()));
        assert_eq!(bridge.send("second"), Err(ChatRejected::Busy));
        assert!(bridge.poll().is_none());

        release.send(Ok("reply".to_string())).unwrap();
        assert_eq!(wait_for(&mut bridge), Ok("reply".to_string()));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
        assert!(!bridge.is_busy());
    }

    #[test]
    fn only_empty_text_is_rejected() {
        let (transport, release) = GatedTransport::new();
        let mut bridge = ChatBridge::new(transport.clone());
        assert_eq!(bridge.send(""), Err(ChatRejected::Empty));
        assert!(!bridge.is_busy());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);

        assert_eq!(bridge.send("   "), Ok(()));
        release.send(Ok("...".to_string())).unwrap();
        assert_eq!(wait_for(&mut bridge), Ok("...".to_string()));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn exchange_runs_off_the_calling_thread() {
        struct NamedThread;

        impl ChatTransport for NamedThread {
            fn exchange(&self, _message: &str) -> Result<String, ChatError> {
                Ok(thread::current().name().unwrap_or_default().to_string())
            }

            fn describe(&self) -> String {
                "named".to_string()
            }
        }

        let mut bridge = ChatBridge::new(Arc::new(NamedThread));
        bridge.send("hello").unwrap();
        assert_eq!(wait_for(&mut bridge), Ok(EXCHANGE_THREAD_NAME.to_string()));
        assert!(!bridge.is_busy());
    }

    #[test]
    fn panicking_transport_still_frees_the_bridge() {
        struct Exploding;

        impl ChatTransport for Exploding {
            fn exchange(&self, _message: &str) -> Result<String, ChatError> {
                panic!("transport blew up");
            }

            fn describe(&self) -> String {
                "exploding".to_string()
            }
        }

        let mut bridge = ChatBridge::new(Arc::new(Exploding));
        bridge.send("hello").unwrap();
        assert!(matches!(
            wait_for(&mut bridge),
            Err(ChatError::Transport { .. })
        ));
        assert!(!bridge.is_busy());
    }

    #[test]
    fn failure_frees_the_bridge() {
        let (transport, release) = GatedTransport::new();
        let mut bridge = ChatBridge::new(transport);

        bridge.send("hello").unwrap();
        release.send(Err(ChatError::status(500, ""))).unwrap();
        assert_eq!(wait_for(&mut bridge), Err(ChatError::status(500, "")));

        assert_eq!(bridge.send("again"), Ok(()));
        release.send(Ok("done".to_string())).unwrap();
        assert_eq!(wait_for(&mut bridge), Ok("done".to_string()));
    }
}
