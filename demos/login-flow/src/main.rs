//! Walks the full session lifecycle against a running backend: restore,
//! login, profile, notifications.
//!
//! ```text
//! PREPKIT_API=http://localhost:8000/api \
//! PREPKIT_EMAIL=ada@example.edu \
//! PREPKIT_PASSWORD=hunter2 \
//! cargo run -p login-flow
//! ```

use std::time::Duration;

use prepkit::prelude::*;

#[tokio::main]
async fn main() -> Result<(), TransportError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let base_url =
        std::env::var("PREPKIT_API").unwrap_or_else(|_| "http://localhost:8000/api".into());
    let email = std::env::var("PREPKIT_EMAIL").unwrap_or_else(|_| "ada@example.edu".into());
    let password = std::env::var("PREPKIT_PASSWORD").unwrap_or_else(|_| "hunter2".into());

    let app = Prepkit::builder()
        .base_url(&base_url)
        .on_unauthorized(|| {
            println!("! authorization denied — a real UI would hard-navigate to /login");
        })
        .build()?;

    // Mirror the notification feed to stdout, the way a UI would render it.
    let mut feed = app.notifications().subscribe();
    tokio::spawn(async move {
        while feed.changed().await.is_ok() {
            let queue = feed.borrow_and_update().clone();
            let labels: Vec<String> = queue
                .iter()
                .map(|n| format!("[{:?}] {}", n.kind, n.message))
                .collect();
            println!("toasts: {labels:?}");
        }
    });

    if app.start().await {
        println!(
            "resumed stored session for {}",
            app.session().snapshot().display_name()
        );
    } else {
        println!("no stored session; logging in as {email}");
        if app.session().login(&email, &password).await {
            let name = app.session().snapshot().display_name();
            app.notifications()
                .add(NotificationSpec::new(
                    NotificationKind::Success,
                    format!("Welcome back, {name}!"),
                )
                .duration(Duration::from_secs(2)));
        } else {
            let reason = app
                .session()
                .snapshot()
                .last_error
                .unwrap_or_else(|| "Login failed".into());
            app.notifications().error(reason);
        }
    }

    // Let the welcome toast live out its auto-dismiss.
    tokio::time::sleep(Duration::from_millis(2500)).await;
    println!("active notifications at exit: {}", app.notifications().len());

    app.session().logout();
    println!("logged out; phase: {:?}", app.session().snapshot().phase());
    Ok(())
}
