mod delegate;
mod presenter;

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use alertgate_bridge::BridgeChannels;
use alertgate_bridge::notification::{
    Notification, NotificationBehavior, NotificationContent, NotificationPriority,
};
use alertgate_handler::RESPONSE_TIMEOUT;
use log::LevelFilter;
use serde_json::Map;

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}

fn demo_notification(
    identifier: &str,
    title: &str,
    behavior: Option<NotificationBehavior>,
) -> anyhow::Result<Notification> {
    let mut data = Map::new();
    if let Some(behavior) = behavior {
        data.insert("behavior".to_string(), serde_json::to_value(behavior)?);
    }
    let content = NotificationContent {
        title: Some(title.to_string()),
        body: Some(format!("Demo notification {identifier}")),
        data,
        ..Default::default()
    };
    Ok(Notification::new(identifier, content, now_millis()))
}

async fn run_demo() -> anyhow::Result<()> {
    let config = alertgate_handler::config::load_config().await?;
    let level = config.log_level.parse().unwrap_or_else(|_| {
        log::warn!("Unknown log level {:?}, using info", config.log_level);
        LevelFilter::Info
    });
    log::set_max_level(level);

    let channels = BridgeChannels::new(config.event_buffer);
    let handler = alertgate_handler::run(
        Arc::new(channels.handler_tx),
        Arc::new(presenter::LogPresenter),
    )?;
    let app = tokio::spawn(delegate::respond_to_events(
        channels.app_rx,
        handler.clone(),
    ));

    let loud = NotificationBehavior {
        should_show_alert: true,
        should_play_sound: true,
        should_set_badge: true,
        priority: Some(NotificationPriority::High),
    };
    let notifications = [
        demo_notification("welcome", "Welcome", Some(loud))?,
        demo_notification("sync", "Background sync", Some(NotificationBehavior::suppress()))?,
        demo_notification("reminder", "Reminder", None)?,
    ];
    for notification in notifications {
        handler.notification_received(notification)?;
    }

    tokio::time::sleep(RESPONSE_TIMEOUT + Duration::from_secs(1)).await;
    handler.shutdown();
    app.await?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_demo())
}
