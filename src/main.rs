use anyhow::{Context, Result};
use clap::{arg, Command};
use melodyevo::audio::FluidSynthService;
use melodyevo::config::{AppConfig, ConfigManager};
use melodyevo::engines::evaluation::{ConsoleRatingPrompt, HumanFitnessOracle, MelodyRenderer};
use melodyevo::engines::generation::{BestMelodyReporter, EvolutionConfig, EvolutionEngine};
use melodyevo::setup::{offered_chords, resolve_progression, SetupPrompt};
use melodyevo::summary::RunSummary;
use melodyevo::theory::{ChordProgression, DiatonicResolver, KeySignature};
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("melodyevo")
        .about("Evolves a melody over a chord progression from your ratings")
        .arg(
            arg!(-c --config [CONFIG] "Path to a TOML configuration file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(arg!(-k --key [KEY] "Key, e.g. C, a, \"Bb major\"").value_parser(clap::value_parser!(String)))
        .arg(
            arg!(--chords [CHORDS] "Space separated chords, one per bar, e.g. \"C G Am F\"")
                .value_parser(clap::value_parser!(String)),
        )
        .arg(arg!(--seed [SEED] "Random seed").value_parser(clap::value_parser!(u64)))
        .arg(arg!(--generations [N] "Number of generations").value_parser(clap::value_parser!(usize)))
        .arg(arg!(--population [N] "Population size").value_parser(clap::value_parser!(usize)))
        .arg(
            arg!(--"save-config" [PATH] "Write the effective configuration to a TOML file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

fn main() -> Result<()> {
    env_logger::init();
    let matches = cli().get_matches();

    let config_path = matches.get_one::<PathBuf>("config");
    let mut manager = ConfigManager::load(config_path.map(PathBuf::as_path))
        .context("Failed to load configuration")?;

    manager
        .update(|c| {
            if let Some(key) = matches.get_one::<String>("key") {
                c.melody.key = Some(key.clone());
            }
            if let Some(chords) = matches.get_one::<String>("chords") {
                c.melody.chords = chords.split_whitespace().map(str::to_string).collect();
                c.melody.number_of_bars = c.melody.chords.len();
            }
            if let Some(seed) = matches.get_one::<u64>("seed") {
                c.evolution.seed = Some(*seed);
            }
            if let Some(generations) = matches.get_one::<usize>("generations") {
                c.evolution.generations = *generations;
            }
            if let Some(population) = matches.get_one::<usize>("population") {
                c.evolution.population_size = *population;
            }
        })
        .context("Invalid command line option")?;

    if let Some(path) = matches.get_one::<PathBuf>("save-config") {
        manager
            .save_to_file(path)
            .with_context(|| format!("Failed to save configuration to {}", path.display()))?;
        log::info!("Saved configuration to {}", path.display());
    }

    run(manager.get())
}

/// Collects key and chords (from config or the prompt) before any rendering.
fn select_harmony(config: &AppConfig, resolver: &DiatonicResolver) -> Result<(KeySignature, ChordProgression)> {
    let melody = &config.melody;
    let mut prompt = SetupPrompt::stdio();

    let key = match &melody.key {
        Some(text) => text.parse::<KeySignature>()?,
        None => prompt.prompt_key()?,
    };
    let offered = offered_chords(resolver, &key, melody.drop_last_diatonic_chord);
    let progression = if melody.chords.is_empty() {
        prompt.prompt_chords(&key, &offered, melody.number_of_bars)?
    } else {
        resolve_progression(melody.chords.as_slice(), &key, &offered, melody.number_of_bars)?
    };
    Ok((key, progression))
}

fn run(config: &AppConfig) -> Result<()> {
    let resolver = DiatonicResolver::default();
    let (key, progression) = select_harmony(config, &resolver)?;
    log::info!("Key {}, progression {}", key, progression);

    let renderer = MelodyRenderer::new(
        &resolver,
        key,
        progression.clone(),
        config.melody.beats_per_bar,
        config.melody.duration_half_beats()?,
    )?;

    let work_dir = &config.audio.work_dir;
    std::fs::create_dir_all(work_dir)
        .with_context(|| format!("Failed to create work directory {}", work_dir.display()))?;

    let seed = config.evolution.seed;
    let audio = FluidSynthService::from_config(&config.audio);
    let oracle = HumanFitnessOracle::new(
        renderer.clone(),
        audio.clone(),
        ConsoleRatingPrompt::stdio(),
        work_dir,
        seed.map(|s| s.wrapping_add(1)),
    );
    let mut reporter = BestMelodyReporter::new(
        renderer.clone(),
        audio,
        work_dir,
        config.audio.play_best,
        seed.map(|s| s.wrapping_add(2)),
    );

    let engine_config = EvolutionConfig::from_settings(
        &config.evolution,
        renderer.genome_length(),
        renderer.scale_size(),
    );
    let mut engine = EvolutionEngine::new(engine_config, oracle);
    let outcome = engine.run(&mut reporter);
    log::info!("{} melodies rated", engine.oracle().evaluations());

    // Report whatever the Hall of Fame holds, even when the run was aborted
    if let Some(best) = engine.get_hall_of_fame().best() {
        println!(
            "\nBest genome {:?} with fitness {:?}",
            best.genome(),
            best.fitness()
        );
        let summary_path = work_dir.join("best.json");
        let summary = RunSummary::new(&key, &progression, best, outcome.is_ok());
        match summary.write(&summary_path) {
            Ok(()) => println!("Summary written to {}", summary_path.display()),
            Err(e) => log::warn!("Could not write {}: {}", summary_path.display(), e),
        }
    }

    outcome.context("Evolution aborted")?;
    Ok(())
}
