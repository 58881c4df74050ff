pub mod config;
pub mod engine;
pub mod janitor;
pub mod metrics;
pub mod orchestrator;
pub mod output;
pub mod resolver;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, OutputConfig,
    ServerConfig, StagingConfig,
};
pub use engine::{EngineConfig, EngineError, FfmpegEngine, OutputFormat, TranscodeEngine};
pub use janitor::{StagedFileRecord, SweepReport, TempFileJanitor};
pub use orchestrator::{
    ConversionError, ConversionOrchestrator, ConversionPhase, ConversionProgress,
    ConversionRequest, ConversionResult,
};
pub use output::OutputLayout;
pub use resolver::{ContentProvider, FsResolver, InputResolver, ResolvedInput, ResolverError};
