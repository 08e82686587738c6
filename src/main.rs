// Prevents a blank Command Prompt window from appearing alongside the
// application window on Windows release builds.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    qr_studio::run();
}
