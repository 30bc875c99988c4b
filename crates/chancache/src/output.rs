use std::io::IsTerminal;

use chancache_core::{ChannelConfigCache, ChannelKind, RestoreEntry};
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

const CHANNEL_REPORT_SCHEMA: &str =
    "https://schemas.3leaps.dev/chancache/cli/v1/channel-report.schema.json";
const RESTORE_PLAN_SCHEMA: &str =
    "https://schemas.3leaps.dev/chancache/cli/v1/restore-plan.schema.json";

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct ChannelRow {
    channel: usize,
    kind: ChannelKind,
    primary_len: Option<usize>,
    additional_adc_len: Option<usize>,
}

#[derive(Serialize)]
struct ChannelReport<'a> {
    schema_id: &'a str,
    analog_channels: usize,
    pwm_channels: usize,
    applied: usize,
    rejected: usize,
    occupied: usize,
    channels: Vec<ChannelRow>,
}

#[derive(Serialize)]
struct RestoreRow {
    slot: usize,
    region: String,
    len: usize,
    payload: String,
}

#[derive(Serialize)]
struct RestorePlan<'a> {
    schema_id: &'a str,
    messages: Vec<RestoreRow>,
}

fn channel_rows(cache: &ChannelConfigCache) -> Vec<ChannelRow> {
    let layout = cache.layout();
    cache
        .channel_kinds()
        .into_iter()
        .enumerate()
        .map(|(channel, kind)| ChannelRow {
            channel,
            kind,
            primary_len: layout.primary(channel).and_then(|slot| cache.len_of(slot)),
            additional_adc_len: layout
                .additional_adc(channel)
                .and_then(|slot| cache.len_of(slot)),
        })
        .collect()
}

fn len_cell(len: Option<usize>) -> String {
    len.map(|len| len.to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn print_channel_report(
    cache: &ChannelConfigCache,
    applied: usize,
    rejected: usize,
    format: OutputFormat,
) {
    let rows = channel_rows(cache);
    match format {
        OutputFormat::Json => {
            let out = ChannelReport {
                schema_id: CHANNEL_REPORT_SCHEMA,
                analog_channels: cache.layout().analog_channels,
                pwm_channels: cache.layout().pwm_channels,
                applied,
                rejected,
                occupied: cache.occupied(),
                channels: rows,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["CHANNEL", "KIND", "PRIMARY", "ADDITIONAL ADC"]);
            for row in &rows {
                table.add_row(vec![
                    row.channel.to_string(),
                    row.kind.to_string(),
                    len_cell(row.primary_len),
                    len_cell(row.additional_adc_len),
                ]);
            }
            println!("{table}");
            println!("applied={applied} rejected={rejected} occupied={}", cache.occupied());
        }
        OutputFormat::Pretty => {
            for row in &rows {
                println!(
                    "channel={} kind={} primary={} additional_adc={}",
                    row.channel,
                    row.kind,
                    len_cell(row.primary_len),
                    len_cell(row.additional_adc_len)
                );
            }
        }
    }
}

pub fn print_restore_plan(entries: &[RestoreEntry], format: OutputFormat) {
    let rows: Vec<RestoreRow> = entries
        .iter()
        .map(|entry| RestoreRow {
            slot: entry.slot,
            region: entry.region.to_string(),
            len: entry.payload.len(),
            payload: hex::encode(&entry.payload),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let out = RestorePlan {
                schema_id: RESTORE_PLAN_SCHEMA,
                messages: rows,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["SLOT", "REGION", "LEN", "PAYLOAD"]);
            for row in &rows {
                table.add_row(vec![
                    row.slot.to_string(),
                    row.region.clone(),
                    row.len.to_string(),
                    row.payload.clone(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for row in &rows {
                println!(
                    "slot={} region={} len={} payload={}",
                    row.slot, row.region, row.len, row.payload
                );
            }
        }
    }
}
