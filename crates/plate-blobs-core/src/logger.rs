//! Logging setup for the `plate-blobs` binary and for tests.
//!
//! Detector records are tagged with the pipeline stage that produced them,
//! e.g. `[   0.004s DEBUG blobs] region 3 rejected: Area(812.0)`. Records from
//! other crates (image decoders and the like) pass at `warn` or above only.
//! With the `tracing` feature, [`init_tracing`] installs a
//! `tracing-subscriber` formatter scoped to the same crates.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

const CRATE_PREFIX: &str = "plate_blobs";
const FOREIGN_LEVEL: Level = Level::Warn;

struct StageLogger {
    level: LevelFilter,
    started: Instant,
}

impl StageLogger {
    fn allows(&self, level: Level, target: &str) -> bool {
        if level > self.level {
            return false;
        }
        target.starts_with(CRATE_PREFIX) || level <= FOREIGN_LEVEL
    }
}

impl Log for StageLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.allows(metadata.level(), metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.started.elapsed().as_secs_f64();
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:8.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            stage_tag(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Short tag for a log target.
///
/// Detector modules map to the stage they belong to; anything else keeps
/// its last path segment.
fn stage_tag(target: &str) -> &str {
    let module = target.rsplit("::").next().unwrap_or(target);
    if !target.starts_with("plate_blobs_detector") {
        return module;
    }
    match module {
        "color_mask" | "morphology" => "mask",
        "contours" | "moments" | "principal_axes" | "blobs" => "blobs",
        "orientation" => "heading",
        other => other,
    }
}

static LOGGER: OnceLock<StageLogger> = OnceLock::new();

/// Install the stage-tagged stderr logger.
///
/// `level` applies to the plate-blobs crates. Later calls are no-ops once a
/// logger is installed.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StageLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a `tracing` fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise the plate-blobs crates log at `info`
/// and everything else at `warn`. `json` switches to flattened JSON events.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,plate_blobs=info,plate_blobs_core=info,plate_blobs_detector=info")
    });
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}
