use anyhow::Result;
use border_minerl_act::{ActionCodec, ActionCodecConfig, ActionLayout};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Layout {
    SingleHead,
    SplitHead,
    Flat,
}

impl From<Layout> for ActionLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::SingleHead => ActionLayout::SingleHead,
            Layout::SplitHead => ActionLayout::SplitHead,
            Layout::Flat => ActionLayout::Flat,
        }
    }
}

/// Samples random policy outputs and prints the decoded MineRL actions.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Layout of the policy outputs. Overrides the layout in `--config`.
    #[arg(long, value_enum)]
    layout: Option<Layout>,

    /// Number of actions to sample.
    #[arg(long, default_value_t = 10)]
    steps: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// YAML file of the codec configuration.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ActionCodecConfig::load(path)?,
        None => ActionCodecConfig::default(),
    };
    if let Some(layout) = args.layout {
        config = config.layout(layout.into());
    }

    let codec = ActionCodec::build(&config)?;
    let space = codec.action_space();
    for head in space.heads() {
        info!("{}: Discrete({})", head.name, head.n);
    }

    let rng = fastrand::Rng::with_seed(args.seed);
    for step in 0..args.steps {
        let raw = space.sample(&rng);
        let act = codec.decode_action(&raw)?;
        info!("Step {}: {:?}", step, raw.to_vec());
        info!("{:?}", act.active_controls());
        if act.inventory {
            info!("inventory");
        } else if act.camera_moves() {
            info!("camera {:?}", act.camera);
        }
    }

    Ok(())
}
