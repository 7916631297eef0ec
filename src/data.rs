use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{CourseNumber, CourseTitle, Institution, Subject};
use crate::utils::strip_wrapping_quote;

/// Identity and catalog fields of one offering, as handed over by a loader.
///
/// Text fields may still carry one wrapping pair of double quotes;
/// `CourseOffering::new` strips them.
#[derive(Clone, Debug, PartialEq)]
pub struct OfferingHeader {
    /// Offering institution.
    pub institution: Institution,
    /// Course number shared across runs of the same course.
    pub number: CourseNumber,
    /// Date this run launched.
    pub launch_date: NaiveDate,
    /// Course title.
    pub title: String,
    /// Raw `", "`-delimited instructor names.
    pub instructors: String,
    /// Course subject.
    pub subject: String,
    /// Year of the run within the dataset.
    pub year: i32,
    /// 1 when the course required an honor code pledge, 0 otherwise.
    pub honor_code: u8,
}

/// Enrollment counts for one offering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipationCounts {
    /// Learners who accessed course content.
    pub participants: u64,
    /// Learners who accessed more than half the content.
    pub audited: u64,
    /// Learners who earned a certificate.
    pub certified: u64,
}

/// Engagement ratios and effort figures for one offering.
///
/// Percentages are kept on whatever scale the dataset uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    /// Percent of participants who audited.
    pub percent_audited: f64,
    /// Percent of participants who certified.
    pub percent_certified: f64,
    /// Percent certified among those who accessed more than half the content.
    pub percent_certified_50: f64,
    /// Percent who played a video.
    pub percent_video: f64,
    /// Percent who posted in the forum.
    pub percent_forum: f64,
    /// Percent with a grade above zero.
    pub grade_higher_zero: f64,
    /// Total course hours (thousands in the source dataset).
    pub total_hours: f64,
    /// Median hours spent by certified learners.
    pub median_hours_certification: f64,
}

/// Learner demographics aggregated per offering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    /// Median learner age.
    pub median_age: f64,
    /// Percent of learners who are male.
    pub percent_male: f64,
    /// Percent of learners who are female.
    pub percent_female: f64,
    /// Share of participants holding a bachelor's degree or higher.
    pub percent_degree: f64,
}

/// One dataset row: a specific run of a course at an institution.
///
/// Duplicates across institution, subject, and title are expected; no key is
/// assumed unique.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourseOffering {
    /// Offering institution.
    pub institution: Institution,
    /// Course number shared across runs of the same course.
    pub number: CourseNumber,
    /// Date this run launched.
    pub launch_date: NaiveDate,
    /// Course title without wrapping quotes.
    pub title: CourseTitle,
    /// `", "`-delimited instructor names without wrapping quotes.
    pub instructors: String,
    /// Course subject without wrapping quotes.
    pub subject: Subject,
    /// Year of the run within the dataset.
    pub year: i32,
    /// 1 when an honor code pledge was required, 0 otherwise.
    pub honor_code: u8,
    /// Enrollment counts.
    pub counts: ParticipationCounts,
    /// Engagement ratios and effort figures.
    pub engagement: EngagementMetrics,
    /// Learner demographics.
    pub demographics: Demographics,
}

impl CourseOffering {
    /// Build an offering, stripping one wrapping quote pair from title,
    /// instructors, and subject.
    pub fn new(
        header: OfferingHeader,
        counts: ParticipationCounts,
        engagement: EngagementMetrics,
        demographics: Demographics,
    ) -> Self {
        let header = OfferingHeader {
            title: strip_wrapping_quote(&header.title),
            instructors: strip_wrapping_quote(&header.instructors),
            subject: strip_wrapping_quote(&header.subject),
            ..header
        };
        Self::from_unquoted(header, counts, engagement, demographics)
    }

    /// Build an offering from text fields whose wrapping quotes were already
    /// removed, such as values decoded by a CSV reader.
    ///
    /// Title, instructors, and subject are kept verbatim, including any quote
    /// characters that belong to the text itself.
    pub fn from_unquoted(
        header: OfferingHeader,
        counts: ParticipationCounts,
        engagement: EngagementMetrics,
        demographics: Demographics,
    ) -> Self {
        Self {
            institution: header.institution,
            number: header.number,
            launch_date: header.launch_date,
            title: header.title,
            instructors: header.instructors,
            subject: header.subject,
            year: header.year,
            honor_code: header.honor_code,
            counts,
            engagement,
            demographics,
        }
    }

    /// Participant count for this offering.
    pub fn participants(&self) -> u64 {
        self.counts.participants
    }

    /// Total course hours for this offering.
    pub fn total_hours(&self) -> f64 {
        self.engagement.total_hours
    }
}
