mod app;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ppi_explorer::layout::DEFAULT_ITERATIONS;
use ppi_explorer::ppi::{
    DEFAULT_THRESHOLD, InteractionMode, MemoryStore, NetworkConfig, NetworkSession, ProteinStore,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Interaction table (`protein1 protein2 score` per line) or a `.json` dataset.
    #[arg(long)]
    links: PathBuf,

    /// Tab-separated protein metadata: id, name, size, annotation.
    #[arg(long)]
    info: Option<PathBuf>,

    /// Protein displayed at startup.
    #[arg(long)]
    protein: Option<String>,

    /// Neighbor pairs need a raw score strictly above this to be linked.
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: u32,

    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    #[arg(long)]
    seed: Option<u64>,

    /// Print the network of `--protein` as JSON and exit.
    #[arg(long, requires = "protein")]
    export: bool,

    #[arg(long, num_args = 2, value_names = ["MID", "FINAL"], requires = "export")]
    path: Option<Vec<usize>>,
}

impl Args {
    fn network_config(&self) -> NetworkConfig {
        NetworkConfig {
            threshold: self.threshold,
            iterations: self.iterations,
            seed: self.seed,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ppi_explorer=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn export(args: &Args) -> Result<()> {
    let protein = args
        .protein
        .as_deref()
        .context("--export needs a protein to build around")?;
    let store = MemoryStore::load(&args.links, args.info.as_deref())
        .with_context(|| format!("failed to load {}", args.links.display()))?;
    info!(links = store.link_count(), "interaction store loaded");

    let store: Arc<dyn ProteinStore> = Arc::new(store);
    let mut session = NetworkSession::new(store, args.network_config());
    session
        .display_network(protein)
        .with_context(|| format!("failed to build the network of {protein}"))?;

    if let Some(path) = &args.path {
        let [mid_point, final_point] = path.as_slice() else {
            bail!("--path takes exactly two vertex indices");
        };
        session.set_mode(InteractionMode::Path);
        session.on_vertex_selected(*mid_point)?;
        session.on_vertex_selected(*final_point)?;
        session.on_path_trigger()?;
    }

    let rendered = serde_json::to_string_pretty(&session.view())?;
    println!("{rendered}");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    if args.export {
        return export(&args);
    }

    let config = args.network_config();
    let source = app::DataSource {
        links: args.links,
        info: args.info,
        initial_protein: args.protein,
    };
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ppi-explorer",
        options,
        Box::new(move |cc| Ok(Box::new(app::PpiExplorerApp::new(cc, source, config)))),
    )
    .map_err(|error| anyhow!("viewer exited with an error: {error}"))
}
