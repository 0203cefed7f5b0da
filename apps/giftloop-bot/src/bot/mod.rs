use crate::state::AppState;
use std::ops::ControlFlow;
use teloxide::dispatching::UpdateHandler;
use teloxide::{dptree, prelude::*, types::Update, RequestError};
use tracing::{debug, error, info};

pub mod handlers;
pub mod keyboards;
pub mod utils;

/// Routing shared by the polling dispatcher and the webhook endpoint.
pub fn schema() -> UpdateHandler<RequestError> {
    let message_handler = Update::filter_message().endpoint(handlers::command::message_handler);
    let callback_handler =
        Update::filter_callback_query().endpoint(handlers::callback::callback_handler);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_handler)
}

/// Runs one update received over HTTP through the schema.
pub async fn dispatch_update(bot: Bot, state: AppState, update: Update) {
    let update_id = update.id;
    match schema().dispatch(dptree::deps![bot, state, update]).await {
        ControlFlow::Break(Ok(())) => {}
        ControlFlow::Break(Err(e)) => error!("Handler for update {:?} failed: {}", update_id, e),
        ControlFlow::Continue(_) => debug!("Update {:?} not handled", update_id),
    }
}

pub async fn run_polling(
    bot: Bot,
    mut shutdown_signal: tokio::sync::broadcast::Receiver<()>,
    state: AppState,
) {
    info!("Starting polling dispatcher...");

    let mut dispatcher = Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .default_handler(|upd: std::sync::Arc<Update>| async move {
            debug!("Unhandled update: {:?}", upd.id);
        })
        .build();

    tokio::select! {
        _ = dispatcher.dispatch() => {
            info!("Polling dispatcher exited");
        }
        _ = shutdown_signal.recv() => {
            info!("Polling dispatcher received shutdown signal, stopping...");
        }
    }
}
