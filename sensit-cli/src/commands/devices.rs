//! Devices command.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};

use sensit_core::error::SensitResult;
use sensit_models::SensorKind;

use crate::{Context, OutputFormat};

pub async fn run(ctx: Context) -> SensitResult<()> {
    let session = super::open_session(&ctx).await?;
    let devices = session.devices();

    match ctx.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(devices)?);
        }
        OutputFormat::Text => {
            if devices.is_empty() {
                println!("No devices found.");
                return Ok(());
            }

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Device", "Activated", "Last Seen", "Mode", "Sensors"]);

            for d in devices {
                let sensors: Vec<String> = SensorKind::ALL
                    .iter()
                    .filter_map(|k| d.sensor_id(*k).map(|id| format!("{k} ({id})")))
                    .collect();
                table.add_row(vec![
                    d.id.clone(),
                    d.activation_date.format("%Y-%m-%d %H:%M").to_string(),
                    d.last_comm_date.format("%Y-%m-%d %H:%M").to_string(),
                    super::or_dash(d.mode.as_deref()),
                    sensors.join(", "),
                ]);
            }

            println!("{table}");
            println!("  {} device(s)", devices.len());
        }
    }

    Ok(())
}
