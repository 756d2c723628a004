use colored::Colorize;

fn level_color(level: log::Level) -> &'static str {
    match level {
        log::Level::Info => "green",
        log::Level::Warn => "yellow",
        log::Level::Error => "red",
        log::Level::Debug => "magenta",
        log::Level::Trace => "bright black",
    }
}

/// Builds the dispatch: colored lines on stderr when `console` is set, plus an
/// optional log file. Returns `None` when neither sink is wanted.
pub fn dispatch(
    level: log::LevelFilter,
    console: bool,
    log_file: Option<&str>,
) -> Result<Option<fern::Dispatch>, fern::InitError> {
    if !console && log_file.is_none() {
        return Ok(None);
    }

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%H:%M:%S]"),
                record.target(),
                record.level().to_string().color(level_color(record.level())),
                message
            ))
        })
        .level(level)
        .level_for("sqlx", log::LevelFilter::Warn);

    if console {
        dispatch = dispatch.chain(std::io::stderr());
    }
    if let Some(path) = log_file {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    Ok(Some(dispatch))
}

/// Installs the global logger. The log file is written even with the console sink off.
pub fn setup(
    level: log::LevelFilter,
    console: bool,
    log_file: Option<&str>,
) -> Result<(), fern::InitError> {
    if let Some(dispatch) = dispatch(level, console, log_file)? {
        dispatch.apply()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_to_install_without_sinks() {
        assert!(dispatch(log::LevelFilter::Info, false, None).unwrap().is_none());
    }

    #[test]
    fn file_sink_survives_disabled_console() {
        let path = std::env::temp_dir().join(format!("subs-logger-{}.log", std::process::id()));
        let path_str = path.to_string_lossy().to_string();

        let built = dispatch(log::LevelFilter::Info, false, Some(&path_str)).unwrap();

        assert!(built.is_some());
        assert!(path.exists());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn console_only_dispatch_is_built() {
        assert!(dispatch(log::LevelFilter::Debug, true, None).unwrap().is_some());
    }
}
