pub mod exam;
pub mod loaders;
pub mod paper;
pub mod question_type;
pub mod topics;

pub use exam::{ExamSpec, QuestionTypeConfig, TypeMarks, MIN_TOTAL_MARKS};
pub use loaders::load_topics_from_csv;
pub use paper::{GeneratedPaper, SectionBlock, SectionPlan};
pub use question_type::QuestionType;
pub use topics::TopicSet;
