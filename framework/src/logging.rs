/// Installs `env_logger` as the `log` backend.
///
/// `RUST_LOG` is parsed on top of the defaults, so `RUST_LOG=engine_track_editor=trace`
/// enables the per-frame output of the engine.
pub fn init_logger() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        // window system backends are very noisy on debug level
        .filter_module("winit", log::LevelFilter::Warn)
        .filter_module("calloop", log::LevelFilter::Warn)
        .filter_module("sctk", log::LevelFilter::Warn)
        .parse_default_env()
        .format_indent(Some(0))
        .init();
}
