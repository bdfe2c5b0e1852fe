// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::{Path, PathBuf};

use serde::Serialize;
use tauri::Manager;
use tracing::{error, info, warn};

use predict_cancer::labels::{label_table, LabelInfo};
use predict_cancer::utils::{ort_init, tracing_subscriber_init};
use predict_cancer::{AppConfig, InferencePipeline, PredictionResult};

/// Outcome of the one-time model load, kept for the whole process.
struct AppState {
    model_path: PathBuf,
    pipeline: Result<InferencePipeline, String>,
}

#[derive(Debug, Serialize)]
struct ModelStatus {
    ready: bool,
    model_path: String,
    error: Option<String>,
}

#[tauri::command]
fn model_status(state: tauri::State<'_, AppState>) -> ModelStatus {
    ModelStatus {
        ready: state.pipeline.is_ok(),
        model_path: state.model_path.display().to_string(),
        error: state.pipeline.as_ref().err().cloned(),
    }
}

#[tauri::command]
fn class_labels() -> Vec<LabelInfo> {
    label_table()
}

#[tauri::command]
async fn predict(
    image: Vec<u8>,
    state: tauri::State<'_, AppState>,
) -> Result<PredictionResult, String> {
    // No model, no predictions: the page shows the startup error instead
    let pipeline = state.pipeline.as_ref().map_err(|err| err.clone())?;

    info!("Running prediction on a {} byte upload", image.len());
    pipeline.predict_image_async(image).await.map_err(|err| {
        warn!("{err}");
        err.user_message()
    })
}

fn load_pipeline(config: &AppConfig, model_path: &Path) -> Result<InferencePipeline, String> {
    InferencePipeline::load(model_path, config).map_err(|err| {
        error!("{err}");
        err.to_string()
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber_init();
    ort_init()?;

    let config = AppConfig::default();

    tauri::Builder::default()
        .setup(move |app| {
            let resource_dir = app.path_resolver().resource_dir();
            let model_path = config.resolve_model_path(resource_dir.as_deref());
            let pipeline = load_pipeline(&config, &model_path);
            app.manage(AppState {
                model_path,
                pipeline,
            });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![model_status, class_labels, predict])
        .run(tauri::generate_context!())?;

    Ok(())
}
