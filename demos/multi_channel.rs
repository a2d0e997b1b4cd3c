//! Multi-channel demo: independent surfaces for system, chat and analytics
//!
//! Run with: cargo run --example multi_channel
//!
//! Set `RUST_LOG=toast_rs=trace` to see every publish.
//!
//! # Architecture
//!
//! ```text
//!   system ────┐                      ┌──► [system surface]
//!   chat ──────┼──► global Toaster ───┼──► [chat surface]
//!   analytics ─┤    (one registry)    ├──► [analytics surface]
//!   toast() ───┘                      └──► [default surface]
//! ```
//!
//! The analytics surface mounts late and replays what is already active.

use std::time::Duration;

use toast_rs::promise::{ErrorField, Failure};
use toast_rs::{PromiseOptions, Subscription, ToastDuration, ToastEvent, ToastInput, Toaster};

/// Prints the events of one channel
fn mount(toaster: &Toaster, channel: &'static str, replay: bool) -> Subscription {
    let render = move |event: &ToastEvent| match event {
        ToastEvent::Created(t) | ToastEvent::Updated(t) => {
            let verb = if matches!(event, ToastEvent::Created(_)) {
                "show"
            } else {
                "update"
            };
            println!(
                "[{:>9}] {:6} #{} {:?}: {} {}",
                channel,
                verb,
                t.id,
                t.kind,
                t.title.as_ref().and_then(|c| c.as_text()).unwrap_or(""),
                t.description
                    .as_ref()
                    .and_then(|c| c.as_text())
                    .map(|d| format!("({})", d))
                    .unwrap_or_default(),
            );
        }
        ToastEvent::Dismissed { id } => println!("[{:>9}] hide   #{}", channel, id),
    };

    if replay {
        toaster.subscribe_with_replay(channel, render)
    } else {
        toaster.subscribe(channel, render)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("toast_rs=info".parse()?)
                .add_directive("multi_channel=debug".parse()?),
        )
        .init();

    let toaster = toast_rs::global();
    let system = toaster.channel("system");
    let chat = toaster.channel("chat");
    let analytics = toaster.channel("analytics");

    let _default_surface = mount(toaster, "default", false);
    let _system_surface = mount(toaster, "system", false);
    let _chat_surface = mount(toaster, "chat", false);

    system.message(
        "System update available",
        ToastInput::new()
            .description("Version 2.0.1 is ready to install")
            .duration(ToastDuration::Infinite)
            .option("className", "red"),
    );

    tokio::time::sleep(Duration::from_millis(100)).await;
    let message = chat.message(
        "New message from Alice",
        ToastInput::new()
            .description("Hey, how are you?")
            .duration(ToastDuration::millis(4000)),
    );

    // Nobody renders analytics yet; the record still lands in history
    analytics.success(
        "Daily goal achieved!",
        ToastInput::new()
            .description("1,234 visitors")
            .duration(ToastDuration::millis(6000)),
    );
    let _analytics_surface = mount(toaster, "analytics", true);

    analytics.warning(
        "High bounce rate detected",
        ToastInput::new().description("65% on homepage"),
    );

    toast_rs::toast("This is a default toast");

    // Same id: updated in place, not duplicated
    chat.message(
        "New message from Alice (edited)",
        ToastInput::new().id(message.clone()),
    );

    let sync = chat.promise(
        async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Err::<u32, String>("connection reset".to_string())
        },
        Some(
            PromiseOptions::new()
                .loading("Syncing conversation...")
                .success("Conversation synced")
                .error(ErrorField::with(|f: Failure<'_, String>| {
                    format!("Sync failed: {}", f)
                })),
        ),
    )?;
    if let Some(handle) = sync {
        if let Err(e) = handle.unwrap().await {
            tracing::debug!(error = ?e.into_rejection(), "Sync outcome");
        }
    }

    chat.dismiss(Some(message));
    system.dismiss(None);
    tokio::time::sleep(Duration::from_millis(50)).await;

    println!();
    for channel in [&system, &chat, &analytics] {
        println!(
            "{}: {} active, {} in history",
            channel.name(),
            channel.toasts().len(),
            channel.history().len()
        );
    }

    Ok(())
}
