use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

/// Wires `log` to stderr through `fern`, coloring the level tag and stamping every line
/// with a local timestamp. `verbosity` raises the floor from `Info` (the default) down
/// to `Trace`; each additional `-v` lowers it by one step.
pub fn init(verbosity: u64) {
    let level = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red)
        .debug(Color::Blue)
        .trace(Color::Magenta);

    let dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    if dispatch.apply().is_err() {
        // A logger is already installed (e.g. a prior call in the same process, as
        // happens across integration test binaries); keep the first one.
    }
}
