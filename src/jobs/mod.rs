pub mod emergency_watcher;
