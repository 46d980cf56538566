//! Endless Wilds - headless driver
//!
//! Runs a session with a scripted autopilot standing in for the input
//! devices, logs progress, and prints a JSON summary when it stops. Useful
//! for soak tests and balance checks without a renderer.

use clap::Parser;
use endless_wilds::core::config::GameConfig;
use endless_wilds::core::error::Result;
use endless_wilds::core::types::{from_angle, Vec2};
use endless_wilds::llm::client::LlmClient;
use endless_wilds::llm::dialogue::DialogueService;
use endless_wilds::llm::persona::OfflineDialogue;
use endless_wilds::progression::shop::{PurchaseOutcome, ShopItem};
use endless_wilds::render::animation::FrameCounts;
use endless_wilds::simulation::{Session, SimulationEvent};
use endless_wilds::ui::input::{DirectionalInput, Intents};
use endless_wilds::ui::state::ModalKind;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

/// Endless Wilds headless runner
#[derive(Parser, Debug)]
#[command(name = "endless-wilds")]
#[command(about = "Run the simulation headless with a scripted player and print a summary")]
struct Args {
    /// World seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks to simulate before stopping
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,

    /// TOML file overriding the default tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log a progress line every this many ticks (0 disables)
    #[arg(long, default_value_t = 3_600)]
    report_every: u64,
}

#[derive(Serialize, Default)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    level: u32,
    score: u64,
    gold: u32,
    kills: u32,
    bosses_seen: u32,
    crates_broken: usize,
    purchases: u32,
    chunks_cached: usize,
    enemies_alive: usize,
    game_over: bool,
}

/// Display frame length the sweep timer is driven with
const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "endless_wilds=info".into()),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = match &args.config {
        Some(path) => GameConfig::load_from_toml(path)?,
        None => GameConfig::default(),
    };

    let rt = Runtime::new()?;
    let service: Arc<dyn DialogueService> = match LlmClient::from_env() {
        Ok(client) => Arc::new(client),
        Err(_) => {
            tracing::warn!("LLM_API_KEY not set - NPCs will answer with fallback lines");
            Arc::new(OfflineDialogue)
        }
    };

    let mut session = Session::new(
        config,
        FrameCounts::default(),
        seed,
        service,
        rt.handle().clone(),
    )?;
    tracing::info!(seed, ticks = args.ticks, "Endless Wilds starting");

    let mut summary = RunSummary {
        seed,
        ..Default::default()
    };
    let start = Instant::now();

    for frame in 0..args.ticks {
        let now = start + FRAME * frame as u32;
        let intents = autopilot(&mut session, frame, &mut summary);
        for event in session.frame(&intents, now) {
            tally(&mut summary, &event);
        }

        if args.report_every > 0 && frame > 0 && frame % args.report_every == 0 {
            let state = session.state();
            tracing::info!(
                tick = state.tick,
                level = state.player.level,
                hp = state.player.health,
                score = state.score,
                enemies = state.entities.enemies.len(),
                chunks = state.chunks.len(),
                "progress"
            );
        }
        if session.state().game_over {
            break;
        }
    }

    let state = session.state();
    summary.ticks = state.tick;
    summary.level = state.player.level;
    summary.score = state.score;
    summary.gold = state.player.gold;
    summary.chunks_cached = state.chunks.len();
    summary.enemies_alive = state.entities.live_count();
    summary.game_over = state.game_over;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Scripted player: wander in slow circles, swing constantly, cast and dash
/// when ready, and buy a potion from any merchant met along the way
fn autopilot(session: &mut Session, frame: u64, summary: &mut RunSummary) -> Intents {
    if let Some(ModalKind::Shop) = session.ui().modal.as_ref().map(|m| m.kind) {
        if let PurchaseOutcome::Purchased(_) = session.buy(ShopItem::Potion) {
            summary.purchases += 1;
        }
        session.close_modal();
        return Intents::idle();
    }
    if session.is_paused() {
        session.close_modal();
        return Intents::idle();
    }

    let heading = from_angle(frame as f32 * 0.002);
    let movement = DirectionalInput {
        up: heading.y < -0.3,
        down: heading.y > 0.3,
        left: heading.x < -0.3,
        right: heading.x > 0.3,
    };

    let state = session.state();
    let viewport = state.camera.viewport_size;
    let center = Vec2::new(viewport.0 / 2.0, viewport.1 / 2.0);
    let merchant_near = state
        .entities
        .nearest_npc_in_range(state.player.position)
        .is_some_and(|npc| !npc.is_persistent());

    Intents {
        movement,
        melee: frame % 20 == 0,
        cast: frame % 45 == 0,
        dash: frame % 300 == 0,
        interact: merchant_near && state.player.gold >= state.config.shop.potion_price,
        pointer: Some(center + heading * 100.0),
    }
}

fn tally(summary: &mut RunSummary, event: &SimulationEvent) {
    match event {
        SimulationEvent::EnemyKilled { .. } => summary.kills += 1,
        SimulationEvent::BossSpawned { .. } => summary.bosses_seen += 1,
        SimulationEvent::CratesBroken { count } => summary.crates_broken += count,
        _ => {}
    }
}
