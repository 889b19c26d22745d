use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use tracing::{info, warn};

use ppi_explorer::ppi::{
    MemoryStore, NetworkConfig, NetworkData, NetworkResult, NetworkSession, ProteinStore,
    Selection, collect_network,
};

mod animation;
mod graph;
mod render_utils;
mod transform;
mod ui;

use animation::{Interpolation, Placement};
use transform::ViewTransform;

#[derive(Clone, Debug)]
pub struct DataSource {
    pub links: PathBuf,
    pub info: Option<PathBuf>,
    pub initial_protein: Option<String>,
}

pub struct PpiExplorerApp {
    source: DataSource,
    config: NetworkConfig,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<MemoryStore, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct PendingBuild {
    protein_id: String,
    restart_from_center: bool,
    rx: Receiver<NetworkResult<NetworkData>>,
}

struct SearchMatches {
    query: String,
    ids: Vec<String>,
}

struct ViewModel {
    session: NetworkSession,
    catalog: Vec<String>,
    search: String,
    search_matches: Option<SearchMatches>,
    pending: Option<PendingBuild>,
    last_error: Option<String>,
    status: Option<String>,
    transform: ViewTransform,
    interpolation: Interpolation,
    hovered: Option<usize>,
    show_matrix: bool,
}

impl PpiExplorerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, source: DataSource, config: NetworkConfig) -> Self {
        let state = Self::start_load(&source);
        Self {
            source,
            config,
            state,
        }
    }

    fn spawn_load(source: &DataSource) -> Receiver<Result<MemoryStore, String>> {
        let (tx, rx) = mpsc::channel();
        let links = source.links.clone();
        let info_path = source.info.clone();

        thread::spawn(move || {
            let result = MemoryStore::load(&links, info_path.as_deref())
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(source: &DataSource) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(source),
        }
    }
}

fn spawn_build(
    store: Arc<dyn ProteinStore>,
    protein_id: String,
    threshold: u32,
) -> Receiver<NetworkResult<NetworkData>> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let result = collect_network(store.as_ref(), &protein_id, threshold);
        let _ = tx.send(result);
    });

    rx
}

impl ViewModel {
    fn request_network(&mut self, protein_id: &str, restart_from_center: bool) {
        if self.pending.is_some() {
            return;
        }

        info!(protein = protein_id, restart_from_center, "requesting ego-network");
        self.last_error = None;
        self.status = None;
        self.pending = Some(PendingBuild {
            protein_id: protein_id.to_owned(),
            restart_from_center,
            rx: spawn_build(
                self.session.store(),
                protein_id.to_owned(),
                self.session.config().threshold,
            ),
        });
    }

    fn poll_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        match pending.rx.try_recv() {
            Ok(Ok(data)) => {
                if pending.restart_from_center {
                    self.session.reset_network();
                    self.transform.reset();
                }
                self.session.install(data, pending.restart_from_center);
                self.hovered = None;
            }
            Ok(Err(error)) => {
                warn!(protein = %pending.protein_id, %error, "network build failed");
                self.last_error = Some(error.to_string());
            }
            Err(TryRecvError::Empty) => {
                self.pending = Some(pending);
            }
            Err(TryRecvError::Disconnected) => {
                self.last_error = Some("Background network build disconnected".to_owned());
            }
        }
    }

    fn sync_layout(&mut self) {
        let Some(update) = self.session.take_layout_update() else {
            return;
        };

        let targets = self
            .session
            .network()
            .vertices()
            .iter()
            .map(|vertex| Placement {
                position: vertex.position,
                depth: vertex.depth,
            })
            .collect::<Vec<_>>();
        self.interpolation
            .retarget(&targets, update.restart_from_center);
    }

    fn select_vertex(&mut self, index: usize) {
        let name = self
            .session
            .network()
            .vertex(index)
            .map(|vertex| vertex.name.clone())
            .unwrap_or_default();

        match self.session.on_vertex_selected(index) {
            Ok(Selection::MidPoint(_)) => {
                self.status = Some(format!("Midpoint: {name}. Choose the final point."));
            }
            Ok(Selection::FinalPoint(_)) => {
                self.status = Some(format!("Final point: {name}. Ready to show the path."));
            }
            Ok(Selection::Inspected(_) | Selection::Ignored) => {}
            Err(error) => {
                self.status = Some(error.to_string());
            }
        }
    }

    fn show_path(&mut self) {
        match self.session.on_path_trigger() {
            Ok(edges) => {
                let hops = edges.len();
                self.status = Some(format!("Path shown across {hops} edges"));
                self.last_error = None;
            }
            Err(error) => {
                self.last_error = Some(error.to_string());
            }
        }
    }

    fn tick(&mut self, ctx: &Context) {
        self.poll_pending();
        self.sync_layout();

        let dt = ctx.input(|input| input.stable_dt);
        self.interpolation.tick(dt);
        if self.pending.is_some() || self.interpolation.is_moving() {
            ctx.request_repaint();
        }
    }
}

impl eframe::App for PpiExplorerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(store)) => {
                        info!(links = store.link_count(), "interaction store loaded");
                        let mut model = ViewModel::new(store, self.config);
                        if let Some(protein_id) = &self.source.initial_protein {
                            model.request_network(protein_id, false);
                        }
                        transition = Some(AppState::Ready(Box::new(model)));
                    }
                    Ok(Err(error)) => transition = Some(AppState::Error(error)),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading protein interactions...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load protein interactions");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(&self.source));
                    }
                });
            }
            AppState::Ready(model) => {
                model.tick(ctx);
                model.show(ctx);
            }
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
