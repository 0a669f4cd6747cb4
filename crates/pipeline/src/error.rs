use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("pipeline exceeded its {0}s wall-clock limit")]
    WallClockExceeded(u64),
}
