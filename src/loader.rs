//! CSV loader that turns dataset rows into a `CourseStore`.
//!
//! Loading is all-or-nothing: the first row with a wrong field count or an
//! unparseable value aborts and no store is built.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::config::LoaderConfig;
use crate::constants::loader::OFFERING_FIELD_COUNT;
use crate::data::{
    CourseOffering, Demographics, EngagementMetrics, OfferingHeader, ParticipationCounts,
};
use crate::dates::parse_launch_date;
use crate::errors::AnalyzerError;
use crate::store::CourseStore;

const FIELD_NAMES: [&str; OFFERING_FIELD_COUNT] = [
    "institution",
    "course number",
    "launch date",
    "course title",
    "instructors",
    "course subject",
    "year",
    "honor code",
    "participants",
    "audited",
    "certified",
    "percent audited",
    "percent certified",
    "percent certified of > 50% course content accessed",
    "percent played video",
    "percent posted in forum",
    "percent grade higher than zero",
    "total course hours",
    "median hours for certification",
    "median age",
    "percent male",
    "percent female",
    "percent bachelor's degree or higher",
];

/// Load every offering from the dataset file at `path`.
pub fn load_offerings(
    path: impl AsRef<Path>,
    config: &LoaderConfig,
) -> Result<CourseStore, AnalyzerError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening course dataset");
    let file = File::open(path)?;
    let store = read_offerings(file, config)?;
    info!(
        path = %path.display(),
        offerings = store.len(),
        "loaded course dataset"
    );
    Ok(store)
}

/// Read every offering from `reader`.
pub fn read_offerings<R: Read>(
    reader: R,
    config: &LoaderConfig,
) -> Result<CourseStore, AnalyzerError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(config.has_headers)
        .delimiter(config.delimiter)
        .flexible(true)
        .from_reader(reader);
    let mut offerings = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        offerings.push(parse_offering(&row)?);
    }
    debug!(rows = offerings.len(), "parsed offering rows");
    Ok(CourseStore::new(offerings))
}

/// Convert one 23-field row into an offering.
///
/// The CSV reader has already removed each field's wrapping quotes and
/// unescaped doubled quotes, so text fields are taken as decoded.
pub fn parse_offering(row: &StringRecord) -> Result<CourseOffering, AnalyzerError> {
    let line = row.position().map(|position| position.line()).unwrap_or(0);
    if row.len() != OFFERING_FIELD_COUNT {
        return Err(AnalyzerError::MalformedInput {
            line,
            reason: format!(
                "expected {OFFERING_FIELD_COUNT} fields, found {}",
                row.len()
            ),
        });
    }
    let fields = RowFields { row, line };
    let launch_raw = fields.text(2);
    let launch_date =
        parse_launch_date(launch_raw).ok_or_else(|| AnalyzerError::MalformedInput {
            line,
            reason: format!("invalid launch date '{launch_raw}'"),
        })?;

    let header = OfferingHeader {
        institution: fields.text(0).to_string(),
        number: fields.text(1).to_string(),
        launch_date,
        title: fields.text(3).to_string(),
        instructors: fields.text(4).to_string(),
        subject: fields.text(5).to_string(),
        year: fields.parse(6)?,
        honor_code: fields.parse(7)?,
    };
    let counts = ParticipationCounts {
        participants: fields.parse(8)?,
        audited: fields.parse(9)?,
        certified: fields.parse(10)?,
    };
    let engagement = EngagementMetrics {
        percent_audited: fields.parse(11)?,
        percent_certified: fields.parse(12)?,
        percent_certified_50: fields.parse(13)?,
        percent_video: fields.parse(14)?,
        percent_forum: fields.parse(15)?,
        grade_higher_zero: fields.parse(16)?,
        total_hours: fields.parse(17)?,
        median_hours_certification: fields.parse(18)?,
    };
    let demographics = Demographics {
        median_age: fields.parse(19)?,
        percent_male: fields.parse(20)?,
        percent_female: fields.parse(21)?,
        percent_degree: fields.parse(22)?,
    };
    Ok(CourseOffering::from_unquoted(
        header,
        counts,
        engagement,
        demographics,
    ))
}

struct RowFields<'a> {
    row: &'a StringRecord,
    line: u64,
}

impl RowFields<'_> {
    fn text(&self, idx: usize) -> &str {
        self.row.get(idx).unwrap_or_default()
    }

    fn parse<T: FromStr>(&self, idx: usize) -> Result<T, AnalyzerError> {
        let raw = self.text(idx).trim();
        raw.parse::<T>()
            .map_err(|_| AnalyzerError::MalformedInput {
                line: self.line,
                reason: format!("invalid {} '{raw}'", FIELD_NAMES[idx]),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Institution,Course Number,Launch Date,Course Title,Instructors,Course Subject,Year,Honor Code Certificates,Participants (Course Content Accessed),Audited (> 50% Course Content Accessed),Certified,% Audited,% Certified,% Certified of > 50% Course Content Accessed,% Played Video,% Posted in Forum,% Grade Higher Than Zero,Total Course Hours (Thousands),Median Hours for Certification,Median Age,% Male,% Female,% Bachelor's Degree or Higher";
    const ROW_MITX: &str = "MITx,6.002x,09/05/2012,Circuits and Electronics,Khurram Afridi,\"Science, Technology, Engineering, and Mathematics\",1,1,36105,5431,3003,15.04,8.32,55.29,83.2,8.17,28.97,418.94,64.45,26,88.28,11.72,60.68";
    const ROW_HARVARDX: &str = "HarvardX,CS50x,10/15/2012,\"Introduction to Computer Science, Part I\",\"David Malan, Rob Bowden\",Computer Science,1,1,169621,26000,1439,15.33,0.85,5.53,68.42,0,7.66,1034.65,57.47,25,80.86,19.14,59.71";

    #[test]
    fn reads_quoted_rows_with_embedded_commas() {
        let data = format!("{HEADER}\n{ROW_MITX}\n{ROW_HARVARDX}\n");
        let store = read_offerings(data.as_bytes(), &LoaderConfig::default()).unwrap();
        assert_eq!(store.len(), 2);

        let first = &store.offerings()[0];
        assert_eq!(first.institution, "MITx");
        assert_eq!(first.number, "6.002x");
        assert_eq!(
            first.subject,
            "Science, Technology, Engineering, and Mathematics"
        );
        assert_eq!(first.counts.participants, 36105);
        assert!((first.engagement.total_hours - 418.94).abs() < 1e-9);
        assert!((first.demographics.median_age - 26.0).abs() < 1e-9);

        let second = &store.offerings()[1];
        assert_eq!(second.title, "Introduction to Computer Science, Part I");
        assert_eq!(second.instructors, "David Malan, Rob Bowden");
        assert_eq!(
            second.launch_date,
            chrono::NaiveDate::from_ymd_opt(2012, 10, 15).unwrap()
        );
    }

    #[test]
    fn headerless_input_is_supported() {
        let config = LoaderConfig::default().with_headers(false);
        let store = read_offerings(ROW_MITX.as_bytes(), &config).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn short_rows_are_malformed() {
        let data = format!("{HEADER}\nMITx,6.002x,09/05/2012\n");
        let err = read_offerings(data.as_bytes(), &LoaderConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::MalformedInput { line: 2, ref reason }
                if reason.contains("expected 23 fields")
        ));
    }

    #[test]
    fn quote_characters_inside_quoted_fields_survive() {
        let row = ROW_MITX
            .replace(
                "Circuits and Electronics",
                "\"\"\"Hamlet\"\" Revisited\"",
            )
            .replace("Khurram Afridi", "\"Ann \"\"Doc\"\"\"");
        let config = LoaderConfig::default().with_headers(false);
        let store = read_offerings(row.as_bytes(), &config).unwrap();
        let offering = &store.offerings()[0];
        assert_eq!(offering.title, "\"Hamlet\" Revisited");
        assert_eq!(offering.instructors, "Ann \"Doc\"");
        assert_eq!(
            offering.subject,
            "Science, Technology, Engineering, and Mathematics"
        );
    }

    #[test]
    fn unparseable_numbers_abort_the_load() {
        let bad = ROW_MITX.replace(",36105,", ",lots,");
        let data = format!("{HEADER}\n{ROW_HARVARDX}\n{bad}\n");
        let err = read_offerings(data.as_bytes(), &LoaderConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::MalformedInput { line: 3, ref reason } if reason.contains("participants")
        ));
    }

    #[test]
    fn invalid_launch_dates_are_malformed() {
        let bad = ROW_MITX.replace("09/05/2012", "someday");
        let data = format!("{HEADER}\n{bad}\n");
        let err = read_offerings(data.as_bytes(), &LoaderConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::MalformedInput { ref reason, .. } if reason.contains("someday")
        ));
    }

    #[test]
    fn loads_from_file_path() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "{HEADER}").expect("write header");
        writeln!(file, "{ROW_MITX}").expect("write row");
        let store = load_offerings(file.path(), &LoaderConfig::default()).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_offerings(dir.path().join("absent.csv"), &LoaderConfig::default())
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::Io(_)));
    }
}
