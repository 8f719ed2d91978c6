use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};

/// Initialize env_logger, honouring RUST_LOG (default `info`). With a log
/// file, output is appended there instead of stderr.
pub fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        writeln!(
            buf,
            "[{}] {} {}: {}",
            timestamp,
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(file) = log_file {
        let log_output = OpenOptions::new().create(true).append(true).open(file)?;
        builder.target(env_logger::Target::Pipe(Box::new(log_output)));
    }

    builder.init();
    Ok(())
}
