use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    course_analyzer::report_app::run_course_report(std::env::args().skip(1))
}
