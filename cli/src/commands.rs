//! Command handlers for the interactive prompt.

use apnea_core::announce::format_time;
use apnea_core::session::SessionPhase;
use apnea_core::speech::SpeechEvent;
use apnea_core::{config, records, tables};
use apnea_types::{BreathCycle, TrainingTable};

use crate::context::CliContext;

pub async fn list_tables(_ctx: &CliContext) -> Result<(), String> {
    let loaded = tables::load_tables().map_err(|e| e.to_string())?;
    if loaded.is_empty() {
        println!(
            "no tables found in {}",
            tables::tables_dir().map_err(|e| e.to_string())?.display()
        );
        return Ok(());
    }
    for table in loaded {
        println!("{}  {} ({} cycles)", table.id, table.name, table.cycles.len());
    }
    Ok(())
}

pub async fn show_table(id: &str, _ctx: &CliContext) -> Result<(), String> {
    let table = find_table(id)?;
    println!("{} — {}", table.id, table.name);
    for (i, cycle) in table.cycles.iter().enumerate() {
        let hold = if cycle.tap_mode {
            format!("~{} (tap)", format_time(cycle.hold_time))
        } else {
            format_time(cycle.hold_time)
        };
        println!(
            "  cycle {}: breathe {}  hold {}",
            i + 1,
            format_time(cycle.breathe_time),
            hold
        );
    }
    Ok(())
}

pub async fn new_table(name: &str, cycles_spec: &str, _ctx: &CliContext) -> Result<(), String> {
    let cycles = parse_cycles_spec(cycles_spec)?;
    let table = TrainingTable {
        id: chrono::Utc::now().timestamp_millis().to_string(),
        name: name.to_string(),
        cycles,
    };
    let path = tables::save_table(&table).map_err(|e| e.to_string())?;
    println!("saved table '{}' to {}", table.name, path.display());
    Ok(())
}

pub async fn start(id: &str, ctx: &CliContext) -> Result<(), String> {
    let table = find_table(id)?;

    {
        let mut machine = ctx.machine.lock().await;
        machine.set_settings(ctx.settings.read().await.clone());
        machine.start(table.cycles.clone());
    }
    *ctx.active_table.write().await = Some(table.clone());
    ctx.driver.lock().await.start();

    println!("started '{}' ({} cycles)", table.name, table.cycles.len());
    Ok(())
}

pub async fn pause(ctx: &CliContext) -> Result<(), String> {
    ctx.machine.lock().await.pause();
    Ok(())
}

pub async fn resume(ctx: &CliContext) -> Result<(), String> {
    ctx.machine.lock().await.resume();
    Ok(())
}

pub async fn tap(ctx: &CliContext) -> Result<(), String> {
    ctx.machine.lock().await.tap_end_hold();
    Ok(())
}

pub async fn stop(save: bool, ctx: &CliContext) -> Result<(), String> {
    ctx.driver.lock().await.stop();
    ctx.machine.lock().await.stop(save);
    if !save {
        *ctx.active_table.write().await = None;
        println!("session discarded");
    }
    Ok(())
}

pub async fn status(ctx: &CliContext) -> Result<(), String> {
    let snap = ctx.machine.lock().await.snapshot();
    match snap.phase {
        SessionPhase::Idle => println!("no session running"),
        SessionPhase::Complete => {
            println!("session complete — {} cycles recorded", snap.cycle_results.len());
            for result in &snap.cycle_results {
                let mode = if result.was_tap_mode { " (tap)" } else { "" };
                println!(
                    "  cycle {}: planned {}  actual {}{}",
                    result.cycle_index + 1,
                    format_time(result.hold_time),
                    format_time(result.actual_hold_time),
                    mode
                );
            }
        }
        SessionPhase::Breathe | SessionPhase::Hold => {
            let phase = if snap.phase == SessionPhase::Breathe {
                "breathe"
            } else if snap.is_tap_mode {
                "hold (tap to end)"
            } else {
                "hold"
            };
            let state = if snap.is_running { "running" } else { "paused" };
            println!(
                "{}  cycle {}/{}  time {}  progress {:.0}%  [{}]",
                phase,
                snap.current_cycle_index + 1,
                snap.total_cycles,
                format_time(snap.time_remaining),
                snap.progress,
                state
            );
        }
    }
    Ok(())
}

pub async fn show_settings(ctx: &CliContext) -> Result<(), String> {
    let settings = ctx.settings.read().await;
    println!("countdown_start: {}", settings.countdown_start);
    println!("use_continuous_countdown: {}", settings.use_continuous_countdown);
    println!("use_specific_announcements: {}", settings.use_specific_announcements);
    println!("announce_times: {:?}", settings.announce_times);
    println!("volume: {:.2}", settings.volume);
    Ok(())
}

pub async fn set_volume(volume: f32, ctx: &CliContext) -> Result<(), String> {
    let updated = {
        let mut settings = ctx.settings.write().await;
        settings.volume = volume.clamp(0.0, 1.0);
        settings.clone()
    };
    config::save_settings(&updated).map_err(|e| e.to_string())?;
    ctx.machine.lock().await.set_settings(updated.clone());
    let _ = ctx
        .speech
        .send(SpeechEvent::SetVolume {
            volume: updated.volume,
        })
        .await;
    println!("volume set to {:.2}", updated.volume);
    Ok(())
}

pub async fn history(_ctx: &CliContext) -> Result<(), String> {
    let loaded = records::load_records().map_err(|e| e.to_string())?;
    if loaded.is_empty() {
        println!("no practice records yet");
        return Ok(());
    }
    for record in loaded {
        let best = record
            .results
            .iter()
            .map(|r| r.actual_hold_time)
            .max()
            .unwrap_or(0);
        println!(
            "{}  {} — {} cycles, best hold {}",
            record.completed_at.format("%Y-%m-%d %H:%M"),
            record.table_name,
            record.results.len(),
            format_time(best)
        );
    }
    Ok(())
}

fn find_table(id: &str) -> Result<TrainingTable, String> {
    let loaded = tables::load_tables().map_err(|e| e.to_string())?;
    loaded
        .into_iter()
        .find(|t| t.id == id || t.name == id)
        .ok_or_else(|| format!("no table named '{id}'"))
}

/// Parse a cycle spec like `90/60,75/60,60/90t` (breathe/hold seconds,
/// trailing `t` marks a tap-mode hold).
fn parse_cycles_spec(spec: &str) -> Result<Vec<BreathCycle>, String> {
    let mut cycles = Vec::new();
    for part in spec.split(',') {
        let part = part.trim();
        let (part, tap_mode) = match part.strip_suffix('t') {
            Some(stripped) => (stripped, true),
            None => (part, false),
        };
        let (breathe, hold) = part
            .split_once('/')
            .ok_or_else(|| format!("invalid cycle '{part}', expected breathe/hold"))?;
        let cycle = BreathCycle {
            breathe_time: breathe
                .parse()
                .map_err(|_| format!("invalid breathe time '{breathe}'"))?,
            hold_time: hold.parse().map_err(|_| format!("invalid hold time '{hold}'"))?,
            tap_mode,
        };
        tables::validate_cycle(&cycle)?;
        cycles.push(cycle);
    }
    if cycles.is_empty() {
        return Err("table needs at least one cycle".to_string());
    }
    Ok(cycles)
}

#[cfg(test)]
mod tests {
    use super::parse_cycles_spec;

    #[test]
    fn parses_cycle_specs_with_tap_suffix() {
        let cycles = parse_cycles_spec("90/60,75/60,60/90t").expect("valid spec");
        assert_eq!(cycles.len(), 3);
        assert_eq!(cycles[0].breathe_time, 90);
        assert_eq!(cycles[0].hold_time, 60);
        assert!(!cycles[0].tap_mode);
        assert!(cycles[2].tap_mode);
    }

    #[test]
    fn rejects_malformed_and_out_of_range_specs() {
        assert!(parse_cycles_spec("90-60").is_err());
        assert!(parse_cycles_spec("90/0").is_err());
        assert!(parse_cycles_spec("90/301").is_err());
        assert!(parse_cycles_spec("").is_err());
    }
}
