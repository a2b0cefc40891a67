//! Gateway: the main event loop connecting the poller and the dispatcher.
//!
//! One poller task feeds a bounded queue; updates are taken off it one at a
//! time, so replies leave in the order updates arrived. Each update runs in
//! its own task that the loop awaits: a panic while handling one update is
//! logged and the loop moves on.

#[cfg(test)]
mod tests;

use crate::commands;
use crate::dispatch::Dispatcher;
use anyhow::anyhow;
use pigeon_core::{config::Config, method::SetMyCommands, traits::BotApi, types::Update};
use pigeon_telegram::{Poller, PollerSettings};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Owns the API handle and the dispatcher for the lifetime of the bot.
pub struct Gateway {
    api: Arc<dyn BotApi>,
    dispatcher: Arc<Dispatcher>,
    poller: PollerSettings,
    queue_capacity: usize,
    register_commands: bool,
}

impl Gateway {
    pub fn new(api: Arc<dyn BotApi>, config: &Config) -> Self {
        Self {
            api,
            dispatcher: Arc::new(Dispatcher::new(config.dispatch.clone())),
            poller: PollerSettings::from(&config.polling),
            queue_capacity: config.polling.queue_capacity.max(1),
            register_commands: config.dispatch.commands,
        }
    }

    /// Run until `cancel` fires or polling fails for good.
    ///
    /// After cancellation, updates already queued are still handled before
    /// this returns.
    pub async fn run(self, cancel: CancellationToken) -> anyhow::Result<()> {
        info!(
            "Pigeon gateway running | reply: {} | commands: {} | offset: {}",
            self.dispatcher.reply_mode().display_name(),
            if self.register_commands { "on" } else { "off" },
            self.poller.offset,
        );

        if self.register_commands {
            self.register_commands().await;
        }

        let (tx, mut rx) = mpsc::channel::<Update>(self.queue_capacity);
        let poller = Poller::new(self.api.clone(), self.poller.clone());
        let poll_handle = tokio::spawn(poller.run(tx, cancel));

        let mut handled: u64 = 0;
        while let Some(update) = rx.recv().await {
            self.handle_update(update).await;
            handled += 1;
        }

        info!("gateway stopped after {handled} update(s)");
        match poll_handle.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(anyhow!("update polling failed: {e}")),
            Err(e) => Err(anyhow!("poller task failed: {e}")),
        }
    }

    /// Publish the command menu. Failure only costs the menu, so it is logged.
    async fn register_commands(&self) {
        let request = SetMyCommands {
            commands: commands::menu(),
        };
        match self.api.set_my_commands(&request).await {
            Ok(_) => info!("registered {} bot command(s)", request.commands.len()),
            Err(e) => warn!("failed to register bot commands: {e}"),
        }
    }

    async fn handle_update(&self, update: Update) {
        let id = update.id;
        let kind = update.kind_name();
        let api = self.api.clone();
        let dispatcher = self.dispatcher.clone();

        let task = tokio::spawn(async move { process(api.as_ref(), &dispatcher, update).await });
        if let Err(e) = task.await {
            if e.is_panic() {
                error!("update {id} ({kind}): handler panicked, skipping");
            } else {
                error!("update {id} ({kind}): handler aborted: {e}");
            }
        }
    }
}

/// Plan and execute the actions for one update. Failures are logged; the
/// remaining actions still run.
async fn process(api: &dyn BotApi, dispatcher: &Dispatcher, update: Update) {
    if let Some(from) = update.from() {
        info!(
            "update {} ({}) from {}",
            update.id,
            update.kind_name(),
            from.display_name()
        );
    }

    let actions = dispatcher.plan(&update);
    if actions.is_empty() {
        debug!("update {} ({}): nothing to do", update.id, update.kind_name());
        return;
    }

    for action in &actions {
        if let Err(e) = action.execute(api).await {
            warn!("update {}: {} failed: {e}", update.id, action.kind());
        }
    }
}
