use chrono::Utc;
use tracing::info;

use crate::lifecycle;
use crate::store::PasteStore;
use crate::App;

/// One-shot sweep deleting every paste whose time or view budget has closed.
/// The serving path never deletes; this runs from the CLI.
pub async fn run(mut app: App) -> anyhow::Result<()> {
    let pastes = app.store.all().await?;

    let now = Utc::now();

    let mut count = 0;
    for paste in pastes {
        if !lifecycle::is_available(&paste, now) {
            info!("deleting closed paste: {}", paste.id);
            app.store.delete(&paste.id).await?;
            count += 1;
        }
    }

    if count > 0 {
        info!("deleted {count} pastes");
    }

    Ok(())
}
