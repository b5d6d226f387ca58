use crate::config;
use crate::events::AppEvent;
use crate::sys::server;
use async_channel::Sender;
use std::io;
use std::thread::{self, JoinHandle};

/// Starts the control socket and the config watcher on a dedicated thread with its own
/// single-threaded tokio runtime. Both services only send `AppEvent`s; the wheel is never
/// touched off the GTK thread.
pub fn start_background_services(tx: Sender<AppEvent>) -> io::Result<JoinHandle<()>> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("orbit-services".into())
        .spawn(move || {
            rt.block_on(async {
                tokio::join!(
                    server::run_server(tx.clone()),
                    config::run_async_watcher(tx),
                );
            });
            log::warn!("Background services stopped");
        })
}
