use std::ffi::OsString;
use std::process::ExitCode;

use mcpx_go::config::LOG_ENV;

fn main() -> ExitCode {
    // Quiet by default: stderr belongs to the wrapped tool
    env_logger::Builder::new()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(log::LevelFilter::Warn)
        .parse_env(env_logger::Env::new().filter(LOG_ENV))
        .init();

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    mcpx_go::launcher::run(args)
}
