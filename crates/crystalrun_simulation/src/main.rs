//! Headless симуляция CRYSTALRUN
//!
//! Запускает shooter gallery без рендера: headless host + autopilot.
//!
//! Usage: crystalrun_simulation [--config FILE] [--user NAME] [--scores FILE] [--ticks N] [--seed N]

use anyhow::{bail, Context, Result};
use crystalrun_simulation::{
    create_headless_app, run_ticks, simulation_snapshot, AutopilotPlugin, CsvScoreStore,
    GalleryConfig, GameState, HeadlessHostPlugin, HeadlessScene, MemoryScoreStore, ScoreBoard,
    ScoreStore, SimulationPlugin, SpawnScheduler,
};
use std::path::PathBuf;

#[derive(Debug, Default)]
struct RunOptions {
    config: Option<PathBuf>,
    user: Option<String>,
    scores: Option<PathBuf>,
    ticks: Option<usize>,
    seed: Option<u64>,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<RunOptions> {
    let mut options = RunOptions::default();
    let mut args = args.peekable();

    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .with_context(|| format!("Missing value for {}", flag))
        };
        match flag.as_str() {
            "--config" => options.config = Some(PathBuf::from(value()?)),
            "--user" => options.user = Some(value()?),
            "--scores" => options.scores = Some(PathBuf::from(value()?)),
            "--ticks" => {
                let raw = value()?;
                options.ticks = Some(raw.parse().with_context(|| format!("Bad --ticks '{}'", raw))?);
            }
            "--seed" => {
                let raw = value()?;
                options.seed = Some(raw.parse().with_context(|| format!("Bad --seed '{}'", raw))?);
            }
            other => bail!("Unknown argument '{}'", other),
        }
    }

    Ok(options)
}

fn main() -> Result<()> {
    let options = parse_args(std::env::args().skip(1))?;

    let mut config = match &options.config {
        Some(path) => GalleryConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GalleryConfig::default(),
    };
    if let Some(seed) = options.seed {
        config.game.seed = seed;
    }

    let store: Box<dyn ScoreStore> = match &options.scores {
        Some(path) => Box::new(
            CsvScoreStore::open(path)
                .with_context(|| format!("Failed to open score file {}", path.display()))?,
        ),
        None => Box::new(MemoryScoreStore::default()),
    };

    let ticks = options.ticks.unwrap_or(3600);
    println!(
        "Starting CRYSTALRUN headless simulation (seed: {}, ticks: {})",
        config.game.seed, ticks
    );

    let mut app = create_headless_app(config.game.seed);
    app.insert_resource(config)
        .insert_resource(ScoreBoard::new(store, options.user.clone()))
        .add_plugins((SimulationPlugin, HeadlessHostPlugin, AutopilotPlugin));

    // Startup (projectile visuals + opening crystals)
    app.update();

    for tick in 0..ticks {
        run_ticks(&mut app, 1);

        let state = app.world().resource::<GameState>();
        if tick % 600 == 0 {
            let crystals = app.world().resource::<SpawnScheduler>().active_crystal_count();
            let visuals = app.world().resource::<HeadlessScene>().len();
            println!(
                "Tick {}: score {}, ammo {}, crystals {}, visuals {}",
                tick, state.score, state.ammo, crystals, visuals
            );
        }
        if state.game_over {
            // Report set пишет GameOver в этом же тике
            println!("Game over at tick {}: {:?}", tick, state.game_over_reason);
            break;
        }
    }

    let state = app.world().resource::<GameState>();
    println!(
        "Final: score {}, ammo {}, {}s played",
        state.score,
        state.ammo,
        state.seconds_played()
    );

    if let Some(user) = &options.user {
        let best = app.world().resource::<ScoreBoard>().best_score();
        println!("Best score for {}: {}", user, best);
    }

    crystalrun_simulation::log(&simulation_snapshot(app.world()));
    println!("Simulation complete!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_all_flags() {
        let options = parse_args(args(&[
            "--config", "gallery.toml", "--user", "ana", "--ticks", "120", "--seed", "7",
        ]))
        .unwrap();

        assert_eq!(options.config, Some(PathBuf::from("gallery.toml")));
        assert_eq!(options.user.as_deref(), Some("ana"));
        assert_eq!(options.ticks, Some(120));
        assert_eq!(options.seed, Some(7));
        assert!(options.scores.is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_and_missing() {
        assert!(parse_args(args(&["--fast"])).is_err());
        assert!(parse_args(args(&["--user"])).is_err());
        assert!(parse_args(args(&["--ticks", "many"])).is_err());
    }
}
