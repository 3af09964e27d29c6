//! Thermostat Demo
//!
//! Drives the thermostat card against an in-memory host: seeds a climate
//! entity, renders the view, flips the mode and commits a setpoint, then
//! drains the command channel the way a real host would.

use anyhow::Result;
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use morel::cards::thermostat::ThermostatCard;
use morel::cards::Card;
use morel::host::ChannelHost;
use morel::morel_types::{EntityState, HvacMode, Locale, UnitSystem};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    morel::init();

    let (mut host, mut commands) = ChannelHost::new(UnitSystem::METRIC, Locale::default());
    let mut living_room = EntityState::new("climate.living_room", "heat");
    living_room.attributes = json!({
        "friendly_name": "Living Room",
        "current_temperature": 19.4,
        "temperature": 21.0,
        "min_temp": 7.0,
        "max_temp": 35.0,
        "target_temp_step": 0.5,
        "hvac_modes": ["off", "heat", "cool", "auto"],
        "hvac_action": "heating",
        "supported_features": 1,
    })
    .as_object()
    .cloned()
    .unwrap();
    host.push_state(living_room);

    let mut card = ThermostatCard::new();
    card.set_config(json!({
        "type": "custom:morel-thermostat-card",
        "entity": "climate.living_room",
        "show_temp_control": true,
        "show_mode_control": true,
        "use_action_color": true,
    }))?;
    card.sync(&host);

    if let Some(view) = card.thermostat_view(&host) {
        info!(icon = %view.icon, primary = %view.primary, "card rendered");
        if let Some(secondary) = &view.secondary {
            info!(%secondary, "state text");
        }
    }

    card.select_mode(&host, HvacMode::Cool);
    card.commit_temperature(&host, Some(22.5), None);

    while let Ok(command) = commands.try_recv() {
        info!(?command, "host received command");
    }

    Ok(())
}
