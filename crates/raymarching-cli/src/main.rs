//! Raymarching CLI - generate GLSL raymarching shaders from scene scripts

mod demo;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use raymarching_script::{ScriptEngine, ScriptWatcher, WatchEvent};
use raymarching_sdf::{Registry, default_template, validate_template};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{Level, error, info};

#[derive(Parser)]
#[command(name = "raymarching")]
#[command(about = "Generate raymarching fragment shaders from SDF scenes", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a shader from a scene script
    Generate {
        /// Rhai scene script
        script: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Shader template (bundled template if omitted)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Print the scene name and exit
        #[arg(long)]
        scene_name_only: bool,
    },

    /// Generate the shader of the built-in demo scene
    Demo {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Shader template (bundled template if omitted)
        #[arg(short, long)]
        template: Option<PathBuf>,
    },

    /// Regenerate the shader whenever the script changes
    Watch {
        /// Rhai scene script to watch
        script: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Shader template (bundled template if omitted)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Debounce delay in milliseconds
        #[arg(long)]
        debounce_ms: Option<u64>,
    },

    /// Print the bundled shader template
    Template,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Shader text goes to stdout, so logs must not
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    match cli.command {
        Commands::Generate {
            script,
            output,
            template,
            scene_name_only,
        } => {
            run_generate(&script, output.as_deref(), template.as_deref(), scene_name_only)?;
        }
        Commands::Demo { output, template } => {
            run_demo(output.as_deref(), template.as_deref())?;
        }
        Commands::Watch {
            script,
            output,
            template,
            debounce_ms,
        } => {
            run_watch(&script, &output, template.as_deref(), debounce_ms)?;
        }
        Commands::Template => {
            print!("{}", default_template());
        }
    }

    Ok(())
}

/// The template at `path`, or the bundled one
fn load_template(path: Option<&Path>) -> Result<Cow<'static, str>> {
    let Some(path) = path else {
        return Ok(Cow::Borrowed(default_template()));
    };
    let template = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read template {}", path.display()))?;
    validate_template(&template).with_context(|| format!("Template {}", path.display()))?;
    Ok(Cow::Owned(template))
}

fn write_shader(output: Option<&Path>, shader: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, shader)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{shader}"),
    }
    Ok(())
}

fn generate(engine: &ScriptEngine, script: &Path, template: &str) -> Result<String> {
    let mut generated = engine.eval_scene_file(script)?;
    info!("Generating '{}' from {}", generated.name(), script.display());
    Ok(generated.process(template)?)
}

fn run_generate(
    script: &Path,
    output: Option<&Path>,
    template: Option<&Path>,
    scene_name_only: bool,
) -> Result<()> {
    let engine = ScriptEngine::new();
    if scene_name_only {
        let generated = engine.eval_scene_file(script)?;
        println!("{}", generated.name());
        return Ok(());
    }

    let template = load_template(template)?;
    let shader = generate(&engine, script, &template)?;
    write_shader(output, &shader)
}

fn run_demo(output: Option<&Path>, template: Option<&Path>) -> Result<()> {
    let template = load_template(template)?;
    let mut registry = Registry::new();
    let mut scene = demo::demo_scene(&mut registry)?;
    let shader = scene.process(&mut registry, &template)?;
    write_shader(output, &shader)
}

fn run_watch(
    script: &Path,
    output: &Path,
    template: Option<&Path>,
    debounce_ms: Option<u64>,
) -> Result<()> {
    let template = load_template(template)?;
    let engine = ScriptEngine::new();

    let mut watcher = ScriptWatcher::new(debounce_ms)?;
    watcher.watch(script)?;

    // A broken script should not end the session
    let regenerate = || match generate(&engine, script, &template) {
        Ok(shader) => {
            if let Err(e) = write_shader(Some(output), &shader) {
                error!("{e:#}");
            }
        }
        Err(e) => error!("{e:#}"),
    };

    regenerate();
    info!("Press Ctrl+C to stop");
    while let Some(event) = watcher.recv() {
        match event {
            WatchEvent::Modified(path) => {
                info!("Changed: {}", path.display());
                regenerate();
            }
            WatchEvent::Error(e) => error!("Watch error: {e}"),
        }
    }
    Ok(())
}
