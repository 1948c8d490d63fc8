mod field;
mod lenient;
mod object;
mod results;

pub use field::FieldValue;
pub(crate) use object::Object;
pub use results::{
    Duration, FailedOutcome, HostStats, Play, PlayItem, PlaybookResults, Task, TaskHostOutcome,
    TaskItem,
};
