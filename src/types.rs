/// Institution short name as it appears in the dataset.
/// Examples: `MITx`, `HarvardX`
pub type Institution = String;
/// Identifier shared by every run of the same course.
/// Examples: `6.002x`, `CS50x`
pub type CourseNumber = String;
/// Course title with any wrapping quote stripped.
/// Example: `Circuits and Electronics`
pub type CourseTitle = String;
/// Single instructor name split out of the raw instructors field.
/// Example: `Anant Agarwal`
pub type InstructorName = String;
/// Subject label with any wrapping quote stripped.
/// Examples: `Science, Technology, Engineering, and Mathematics`, `Computer Science`
pub type Subject = String;
/// Composite rollup key joining institution and subject with a hyphen.
/// Example: `MITx-Computer Science`
pub type GroupKey = String;
/// Participant totals; sums never go negative.
pub type ParticipantCount = u64;
