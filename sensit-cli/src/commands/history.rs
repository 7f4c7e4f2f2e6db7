//! History command - fetch and print one sensor's records.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use console::style;

use sensit_core::error::SensitResult;
use sensit_models::{DateBound, HistoryRequest, SensorKind};
use sensit_services::SensitDevice;

use crate::{Context, OutputFormat};

pub struct HistoryArgs {
    pub kind: SensorKind,
    pub device: Option<String>,
    pub last: Option<usize>,
    pub begin: Option<String>,
    pub end: Option<String>,
}

impl HistoryArgs {
    fn request(&self) -> SensitResult<HistoryRequest> {
        Ok(HistoryRequest {
            count: self.last,
            begin: self.begin.as_deref().map(str::parse::<DateBound>).transpose()?,
            end: self.end.as_deref().map(str::parse::<DateBound>).transpose()?,
        })
    }
}

pub async fn run(ctx: Context, args: HistoryArgs) -> SensitResult<()> {
    let request = args.request()?;
    let session = super::open_session(&ctx).await?;
    let device: SensitDevice = match args.device {
        Some(ref id) => session.device(id)?,
        None => session.first_device()?,
    };

    let pb = super::spinner(&format!("Fetching {} history of device {}...", args.kind, device.id()));

    if args.kind == SensorKind::Button {
        let presses = device.button(request).await;
        pb.finish_and_clear();
        let presses = presses?;
        match ctx.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&presses)?),
            OutputFormat::Text => {
                for p in &presses {
                    println!("  {} {}", style("PRESS").cyan(), p.date.to_rfc3339());
                }
                println!("  {} press(es)", presses.len());
            }
        }
        return Ok(());
    }

    let readings = device.measurements(args.kind, request).await;
    pb.finish_and_clear();
    let readings = readings?;

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&readings)?),
        OutputFormat::Text => {
            if readings.is_empty() {
                println!("No {} records in that window.", args.kind);
                return Ok(());
            }

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Date", "Mode", "Value", "Min", "Max", "Threshold"]);

            for m in &readings {
                table.add_row(vec![
                    m.date.format("%Y-%m-%d %H:%M").to_string(),
                    m.mode.to_string(),
                    format!("{:.2}", m.value),
                    super::or_dash(m.min),
                    super::or_dash(m.max),
                    super::or_dash(m.threshold),
                ]);
            }

            println!("{table}");
            println!("  {} {} reading(s)", readings.len(), args.kind);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(last: Option<usize>, begin: Option<&str>, end: Option<&str>) -> HistoryArgs {
        HistoryArgs {
            kind: SensorKind::Sound,
            device: None,
            last,
            begin: begin.map(String::from),
            end: end.map(String::from),
        }
    }

    #[test]
    fn test_request_from_flags() {
        let req = args(Some(5), Some("2015-07-01T00:00Z"), Some("device")).request().unwrap();
        assert_eq!(req.count, Some(5));
        assert!(matches!(req.begin, Some(DateBound::At(_))));
        assert_eq!(req.end, Some(DateBound::Device));
    }

    #[test]
    fn test_bad_bound_rejected() {
        assert!(args(None, Some("yesterday"), None).request().is_err());
    }
}
