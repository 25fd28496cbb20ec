pub mod model;
pub mod tokens;

pub use model::{Exercise, ExerciseRecord, Lesson, LessonError, LessonRecord};
