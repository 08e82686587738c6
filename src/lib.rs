mod color;
mod commands;
mod error;
mod logo;
mod preview;
mod qr;
mod state;


pub use error::AppError;

use state::SessionState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_opener::init())
        .manage(SessionState::new())
        .invoke_handler(tauri::generate_handler![
            commands::generate_qr,
            commands::save_qr,
            commands::validate_qr_input,
            commands::clear_qr,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
