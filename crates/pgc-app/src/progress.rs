#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStage {
    LoadingPlant,
    CheckingCache,
    LoadingCachedResult,
    CompilingPlant,
    RunningTransient,
    SavingResults,
    Completed,
}

impl RunStage {
    pub fn label(&self) -> &'static str {
        match self {
            RunStage::LoadingPlant => "loading",
            RunStage::CheckingCache => "cache",
            RunStage::LoadingCachedResult => "cache-load",
            RunStage::CompilingPlant => "compile",
            RunStage::RunningTransient => "transient",
            RunStage::SavingResults => "save",
            RunStage::Completed => "done",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransientProgress {
    pub sim_time_s: f64,
    pub t_end_s: f64,
    pub fraction_complete: f64,
    pub step: usize,
    pub total_steps: usize,
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
    pub transient: Option<TransientProgress>,
}

impl RunProgressEvent {
    pub fn stage(stage: RunStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            elapsed_wall_s,
            message,
            transient: None,
        }
    }
}
