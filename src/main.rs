use std::{env, path::PathBuf, process, time::Instant};

use anyhow::Context;
use log::info;

use logreg_trainer::{RunConfig, RowLayout, Trainer, data, eval};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <run-config.json>", args[0]);
        process::exit(1);
    }

    if let Err(e) = run(PathBuf::from(&args[1])) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(config_path: PathBuf) -> anyhow::Result<()> {
    let config = RunConfig::load(&config_path)
        .with_context(|| format!("loading run config '{}'", config_path.display()))?;

    let layout = RowLayout::new(config.num_features);

    info!("reading train file '{}'", config.train_file.display());
    let dataset = data::load_dataset(
        &config.train_file,
        layout,
        config.num_classes.get(),
        config.num_examples.get(),
    )
    .with_context(|| format!("reading '{}'", config.train_file.display()))?;

    let trainer = Trainer::new(config.num_classes, config.training);

    let start = Instant::now();
    let model = trainer.run(&dataset).context("training failed")?;
    info!("training took {:.3?}", start.elapsed());

    if let Some(test_file) = &config.test_file {
        let acc = eval::evaluate_file(test_file, &model)
            .with_context(|| format!("evaluating '{}'", test_file.display()))?;
        info!(
            "accuracy: {:.3} ({}/{})",
            acc.ratio(),
            acc.correct,
            acc.total
        );
    }

    model
        .save(&config.model_file)
        .with_context(|| format!("writing '{}'", config.model_file.display()))?;
    info!("model written to '{}'", config.model_file.display());

    Ok(())
}
