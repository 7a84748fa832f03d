pub mod assembler;
pub mod distribution;
pub mod llm_service;
pub mod prompt;
pub mod renderer;

pub use assembler::assemble_paper;
pub use distribution::plan_sections;
pub use llm_service::{check_question_count, count_question_markers, LlmService};
pub use prompt::build_prompt;
pub use renderer::{classify_line, render_paper_pdf, save_pdf, FontSource, LineKind};
