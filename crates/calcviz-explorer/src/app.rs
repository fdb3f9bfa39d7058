//! Renders every explorer scene for one configuration and writes the results.

use crate::catalog;
use crate::derivative::{DerivativeExplorer, Trend};
use crate::error::ExplorerResult;
use crate::limit::{self, Approach, LimitExplorer};
use crate::motion::{MotionExample, Phase};
use calcviz_config::{Config, ConfigValidator};
use calcviz_graphs::{renderer_for, to_svg_path, PathOptions, Scene, SceneElement, SceneRenderer};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// File name of the JSON summary written next to the rendered scenes.
pub const REPORT_FILE: &str = "report.json";

/// Path data of one rendered curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveData {
    /// Scene the curve belongs to.
    pub scene: String,
    /// SVG `d` attribute.
    pub d: String,
}

/// Everything computed for a run besides the images themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Selected derivative function id.
    pub function: String,
    /// Probe position.
    pub probe: f64,
    /// Slope at the probe.
    pub slope: f64,
    /// Direction at the probe.
    pub trend: Trend,
    /// Motion time.
    pub time: f64,
    /// Motion phase.
    pub phase: Phase,
    /// Current Δx.
    pub delta_x: f64,
    /// Secant slope at Δx.
    pub secant_slope: Option<f64>,
    /// Distance from the exact slope.
    pub error: Option<f64>,
    /// Secant slopes approaching the limit.
    pub approach: Vec<Approach>,
    /// Serialized curves of every scene.
    pub curves: Vec<CurveData>,
}

/// All explorers built from one configuration.
#[derive(Debug)]
pub struct Explorer {
    config: Config,
    derivative: DerivativeExplorer,
    motion: MotionExample,
    limit: LimitExplorer,
}

impl Explorer {
    /// Validates `config` against the catalogue and builds every explorer.
    pub fn new(config: Config) -> ExplorerResult<Self> {
        ConfigValidator::validate_with_functions(&config, &catalog::ids())?;

        let derivative = DerivativeExplorer::from_config(&config)?;
        let mut motion = MotionExample::new(
            config.derivative.viewport.into(),
            PathOptions::from(&config.plot),
        );
        motion.set_time(config.derivative.time)?;
        let limit = LimitExplorer::from_config(&config)?;

        Ok(Self {
            config,
            derivative,
            motion,
            limit,
        })
    }

    /// The configuration in use.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Derivative explorer state.
    pub fn derivative_mut(&mut self) -> &mut DerivativeExplorer {
        &mut self.derivative
    }

    /// Limit explorer state.
    pub fn limit_mut(&mut self) -> &mut LimitExplorer {
        &mut self.limit
    }

    /// Motion example state.
    pub fn motion_mut(&mut self) -> &mut MotionExample {
        &mut self.motion
    }

    /// Builds every scene in output order.
    pub fn scenes(&mut self) -> Vec<Scene> {
        vec![
            self.derivative.function_scene(),
            self.derivative.derivative_scene(),
            self.motion.position_scene(),
            self.motion.velocity_scene(),
            self.limit.scene(),
        ]
    }

    /// Summary of the current state plus the path data of `scenes`.
    pub fn report(&self, scenes: &[Scene]) -> Report {
        // `None` keeps full precision.
        let precision = self.config.plot.precision.map(usize::from);
        let curves = scenes
            .iter()
            .flat_map(|scene| {
                scene.elements.iter().filter_map(move |element| match element {
                    SceneElement::Curve { path, .. } => Some(CurveData {
                        scene: scene.name.clone(),
                        d: to_svg_path(path, precision),
                    }),
                    _ => None,
                })
            })
            .collect();

        let secant = self.limit.secant();
        Report {
            function: self.derivative.function().id.to_string(),
            probe: self.derivative.probe(),
            slope: self.derivative.slope(),
            trend: self.derivative.trend(),
            time: self.motion.time(),
            phase: self.motion.phase(),
            delta_x: secant.delta_x,
            secant_slope: secant.slope(),
            error: secant.error(),
            approach: limit::approach_table(),
            curves,
        }
    }

    /// Renders every scene with the configured format and writes them, plus the
    /// report, into the output directory. Returns the written paths.
    #[instrument(skip(self), fields(directory = %self.config.output.directory.display()))]
    pub async fn run(&mut self) -> ExplorerResult<Vec<PathBuf>> {
        let renderer = renderer_for(self.config.output.format);
        let directory = self.config.output.directory.clone();
        tokio::fs::create_dir_all(&directory).await?;

        let scenes = self.scenes();
        let mut written = Vec::with_capacity(scenes.len() + 1);
        for scene in &scenes {
            written.push(write_scene(renderer.as_ref(), scene, &directory).await?);
        }

        let report = self.report(&scenes);
        let report_path = directory.join(REPORT_FILE);
        tokio::fs::write(&report_path, serde_json::to_vec_pretty(&report)?).await?;
        written.push(report_path);

        let (hits, misses) = self.derivative.memo_stats();
        info!(files = written.len(), hits, misses, "explorer run complete");
        Ok(written)
    }
}

async fn write_scene(
    renderer: &dyn SceneRenderer,
    scene: &Scene,
    directory: &std::path::Path,
) -> ExplorerResult<PathBuf> {
    let bytes = renderer.render(scene)?;
    let path = directory.join(format!("{}.{}", scene.name, renderer.extension()));
    tokio::fs::write(&path, &bytes).await?;
    debug!(path = %path.display(), bytes = bytes.len(), renderer = renderer.name(), "wrote scene");
    Ok(path)
}
