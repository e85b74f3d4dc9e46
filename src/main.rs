use anyhow::Context;
use bookrec_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load bookrec settings")?;
    bookrec_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.display_target(),
        "bookrec-app starting"
    );

    bookrec_app::serve(settings).await
}
