//! Recording command body.

use async_trait::async_trait;
use slcmd::{Arguments, Command, CommandBody, Message};
use std::sync::{Arc, Mutex};

/// One body invocation.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Call {
    pub message: Message,
    pub args: Arguments,
}

/// Command body that records every invocation. Clones share one log.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<Call>>>,
}

#[allow(dead_code)]
impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("recorder lock").clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().expect("recorder lock").len()
    }

    /// The single recorded invocation.
    pub fn only(&self) -> Call {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one invocation");
        calls.into_iter().next().expect("one call")
    }
}

#[async_trait]
impl CommandBody for Recorder {
    async fn run(&self, message: &Message, _: &Command, args: &Arguments) -> anyhow::Result<()> {
        self.calls.lock().expect("recorder lock").push(Call {
            message: message.clone(),
            args: args.clone(),
        });
        Ok(())
    }
}
