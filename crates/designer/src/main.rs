use std::path::PathBuf;
use std::process::ExitCode;

use designer_lib::command::execute_json_batch;
use designer_lib::harness::DesignerSession;
use designer_lib::import::import_gltf;
use designer_lib::state::DesignerSettings;
use shared::GarmentType;

#[derive(Debug, Default)]
struct Args {
    script: Option<PathBuf>,
    model: Option<PathBuf>,
    garment: Option<GarmentType>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "designer=info".into()),
        )
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: designer --script <commands.json> [--model <garment.glb>] [--garment hoodie|tshirt|polo]");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), String> {
    let settings = DesignerSettings::load();
    let mut session = DesignerSession::with_settings(&settings);

    if let Some(garment) = args.garment {
        session.set_garment(garment);
    }

    if let Some(path) = &args.model {
        let mesh = import_gltf(path).map_err(|e| format!("Failed to import {}: {e}", path.display()))?;
        let bounds = session
            .load_model(session.garment, mesh)
            .map_err(|e| format!("Rejected model {}: {e}", path.display()))?;
        tracing::info!("Loaded model from {} (scale {:.4})", path.display(), bounds.scale);
    }

    let Some(path) = &args.script else {
        return Err("no --script given".to_string());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read script file {}: {e}", path.display()))?;
    let responses = execute_json_batch(&mut session, &json)?;

    let failed = responses.iter().filter(|r| !r.success).count();
    tracing::info!("Ran {} commands ({failed} failed)", responses.len());

    let out = serde_json::to_string_pretty(&responses).map_err(|e| e.to_string())?;
    println!("{out}");
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("{arg} needs a value"));
        match arg.as_str() {
            "--script" => parsed.script = Some(PathBuf::from(value()?)),
            "--model" => parsed.model = Some(PathBuf::from(value()?)),
            "--garment" => {
                let name = value()?;
                let garment = serde_json::from_value(serde_json::Value::String(name.clone()))
                    .map_err(|_| format!("unknown garment '{name}'"))?;
                parsed.garment = Some(garment);
            }
            other => return Err(format!("unknown argument '{other}'")),
        }
    }
    Ok(parsed)
}
