use serde::{Deserialize, Serialize};

pub const SUMMARY_FILENAME: &str = "news_summary.md";

/// File name for a saved diagram; `index` is zero-based, the name is one-based.
pub fn diagram_filename(index: usize) -> String {
    format!("diagram_{}.png", index + 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryPhase {
    #[default]
    Idle,
    Submitting,
    Rendered,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramPhase {
    #[default]
    None,
    Extracting,
    Ready(usize),
    Empty,
    ExtractionFailed,
}

impl DiagramPhase {
    pub fn is_ready(self) -> bool {
        matches!(self, DiagramPhase::Ready(count) if count > 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionPhase {
    pub summary: SummaryPhase,
    pub diagrams: DiagramPhase,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagram_filenames_are_one_based() {
        assert_eq!(diagram_filename(0), "diagram_1.png");
        assert_eq!(diagram_filename(9), "diagram_10.png");
    }

    #[test]
    fn only_non_empty_ready_phase_allows_export() {
        assert!(DiagramPhase::Ready(2).is_ready());
        assert!(!DiagramPhase::Ready(0).is_ready());
        assert!(!DiagramPhase::Empty.is_ready());
        assert!(!DiagramPhase::ExtractionFailed.is_ready());
    }
}
