use crate::app::AppContext;
use crate::cli::WeatherArgs;
use crate::output::{print_json, print_weather};
use crate::weather::fetch_weather;

pub fn handle_weather(ctx: &AppContext, args: &WeatherArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json, None);
    let settings = ctx.weather_settings()?;
    let snapshot = fetch_weather(&ui, &settings, args.refresh).map_err(|e| {
        anyhow::anyhow!(
            "{}\nHint: Set [weather] api_key in the config or FLIGHTLOG_WEATHER_API_KEY.",
            e
        )
    })?;
    if ui.mode.is_json() {
        return print_json(&snapshot);
    }
    print_weather(&ui, &snapshot);
    Ok(())
}
