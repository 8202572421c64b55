use hivemind::{ScenarioConfig, Scenario, Viewport, Cadence};
use hivemind::{run_2d, run_headless, bench_tick};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(about = "Force-positioned portfolio map")]
struct Args {
    /// Scenario file; relative names are looked up in `scenarios/`
    #[arg(short, long, default_value = "hive_mind.yaml")]
    file: PathBuf,

    /// Run without a window and print settled positions
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Frame length in milliseconds for headless mode
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Pace headless frames against the wall clock
    #[arg(long)]
    realtime: bool,

    /// Headless viewport width (px)
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Headless viewport height (px)
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Time engine ticks for growing node counts and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario(file: &Path) -> Result<ScenarioConfig> {
    let path = if file.is_absolute() || file.exists() {
        file.to_path_buf()
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file)
    };

    let cfg = ScenarioConfig::from_yaml_file(&path)
        .with_context(|| format!("loading scenario {}", path.display()))?;
    info!(path = %path.display(), nodes = cfg.nodes.len(), "scenario loaded");
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "hivemind=info,warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if args.bench {
        bench_tick()?;
        return Ok(());
    }

    let cfg = load_scenario(&args.file)?;

    if args.headless {
        let viewport = Viewport::new(args.width, args.height);
        let mut scenario = Scenario::build_scenario(cfg, Some(viewport))?;
        let cadence = if args.realtime {
            Cadence::Realtime { frame_ms: args.frame_ms }
        } else {
            Cadence::Simulated { frame_ms: args.frame_ms }
        };

        for (id, p) in run_headless(&mut scenario, args.frames, cadence, viewport) {
            println!("{id:>6}  x = {:8.2}  y = {:8.2}", p.x, p.y);
        }
        return Ok(());
    }

    let scenario = Scenario::build_scenario(cfg, None)?;
    run_2d(scenario);

    Ok(())
}
