use hud_overlay::settings::Settings;
use hud_overlay::{app, logging};

fn main() -> anyhow::Result<()> {
    let settings = Settings::load("overlay.json")?;
    logging::init(settings.debug_logging, settings.log_file());
    tracing::info!(
        entry_point = %settings.entry_point,
        stay_resident = settings.stay_resident_on_close,
        "starting overlay"
    );

    if let Err(err) = app::run(settings) {
        tracing::error!("overlay terminated: {err:#}");
        return Err(err);
    }
    Ok(())
}
