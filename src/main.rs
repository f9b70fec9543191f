use listplayer::{Settings, app_core::ListPlayer, logging};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?.with_args(std::env::args())?;
    logging::configure_logging(&settings)?;
    info!(sample = %settings.sample.display(), "starting");

    ListPlayer::new(settings)?.run()
}
