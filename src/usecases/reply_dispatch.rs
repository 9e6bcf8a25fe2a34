use std::sync::{mpsc::Sender, Arc};

use tokio::runtime::Handle;

use crate::{
    domain::{chat_session::ReplyTicket, events::ReplyDelivery},
    usecases::{contracts::ReplyDispatcher, send_message::ReplyGenerator},
};

const REPLY_DELIVERY_FAILED: &str = "CHAT_REPLY_DELIVERY_FAILED";

/// Runs the generator on the tokio runtime and sends the result to the UI
/// thread over a channel.
pub struct TokioReplyDispatcher {
    handle: Handle,
    generator: Arc<dyn ReplyGenerator>,
    reply_tx: Sender<ReplyDelivery>,
}

impl TokioReplyDispatcher {
    pub fn new(
        handle: Handle,
        generator: Arc<dyn ReplyGenerator>,
        reply_tx: Sender<ReplyDelivery>,
    ) -> Self {
        Self {
            handle,
            generator,
            reply_tx,
        }
    }
}

impl ReplyDispatcher for TokioReplyDispatcher {
    fn dispatch(&mut self, ticket: ReplyTicket) {
        let generator = Arc::clone(&self.generator);
        let reply_tx = self.reply_tx.clone();

        self.handle.spawn(async move {
            let text = generator.reply(ticket.prompt()).await;

            if reply_tx.send(ReplyDelivery { ticket, text }).is_err() {
                tracing::warn!(
                    code = REPLY_DELIVERY_FAILED,
                    "reply generated after the chat shell closed"
                );
            }
        });
    }
}
