//! Scene export - command line entry point
//!
//! Reads a host scene exported as JSON, translates its lamps and world into
//! a renderer project and either prints a summary or writes the project as
//! JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use exporter_core::ExportConfig;
use exporter_renderer::Project;
use exporter_scene::HostScene;
use exporter_translators::{MAIN_ASSEMBLY, SceneTranslator};

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Host scene to translate
    scene: PathBuf,
    /// Export settings (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory `//` paths are relative to
    #[arg(short, long)]
    blend_dir: Option<PathBuf>,
    /// Write the translated project as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<ExportConfig> {
    let mut config = match &args.config {
        Some(path) => ExportConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ExportConfig::default(),
    };

    if let Some(dir) = &args.blend_dir {
        config.blend_dir = dir.clone();
    }

    config.validate()?;
    Ok(config)
}

fn print_summary(project: &Project) {
    let scene = &project.scene;
    println!("Project '{}'", project.name);
    if let Some(environment) = scene.environment() {
        println!("  environment:          {}", environment.name);
    }
    println!("  environment EDFs:     {}", scene.environment_edfs().len());
    println!("  environment shaders:  {}", scene.environment_shaders().len());
    println!("  scene colors:         {}", scene.colors().len());

    if let Some(assembly) = scene.assemblies().entity_by_name(MAIN_ASSEMBLY) {
        println!("  lights:               {}", assembly.lights().len());
        println!("  assembly colors:      {}", assembly.colors().len());
        println!("  textures:             {}", assembly.textures().len());
        println!("  texture instances:    {}", assembly.texture_instances().len());
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args)?;
    exporter_core::init_logging(config.log_filter.as_deref());
    info!("Starting scene export of {}", args.scene.display());

    let scene = HostScene::from_path(&args.scene)
        .with_context(|| format!("Failed to read scene {}", args.scene.display()))?;
    let project = SceneTranslator::new(config).translate(&scene)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &project)?;
            writer.flush()?;
            info!("Wrote project to {}", path.display());
        }
        None => print_summary(&project),
    }

    Ok(())
}
