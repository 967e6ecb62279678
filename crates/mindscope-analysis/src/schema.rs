//! Column names of the student mental-health survey.
//!
//! The survey schema is fixed; the loader only trims whitespace from
//! headers, so these constants are the post-trim spellings.

/// Unique record identifier. Deduplication key.
pub const STUDENT_ID: &str = "Student ID";

pub const AGE: &str = "Age";
pub const GENDER: &str = "Gender";
pub const MENTAL_STRESS_LEVEL: &str = "Mental Stress Level";
pub const GPA: &str = "Academic Performance (GPA)";
pub const STUDY_HOURS: &str = "Study Hours Per Week";
pub const SLEEP_DURATION: &str = "Sleep Duration (Hours per night)";
pub const PHYSICAL_EXERCISE: &str = "Physical Exercise (Hours per week)";
pub const DIET_QUALITY: &str = "Diet Quality";
pub const FINANCIAL_STRESS: &str = "Financial Stress";
pub const PEER_PRESSURE: &str = "Peer Pressure";
pub const RELATIONSHIP_STRESS: &str = "Relationship Stress";
pub const COGNITIVE_DISTORTIONS: &str = "Cognitive Distortions";
pub const SUBSTANCE_USE: &str = "Substance Use";
pub const COUNSELING_ATTENDANCE: &str = "Counseling Attendance";
pub const FAMILY_HISTORY: &str = "Family Mental Health History";
pub const MEDICAL_CONDITION: &str = "Medical Condition";
pub const SOCIAL_MEDIA_USAGE: &str = "Social Media Usage (Hours per day)";
pub const FAMILY_SUPPORT: &str = "Family Support";

// Derived columns, appended once by the feature stage.
pub const AGE_GROUP: &str = "Age Group";
pub const STRESS_CATEGORY: &str = "Stress Category";
pub const STUDY_EFFICIENCY: &str = "Study Efficiency";
pub const WELLNESS_SCORE: &str = "Wellness Score";
pub const STRESS_FACTOR_SCORE: &str = "Stress Factor Score";

/// Categorical columns filled with their mode during cleaning.
pub const CATEGORICAL_FILL_COLUMNS: [&str; 4] = [
    GENDER,
    COUNSELING_ATTENDANCE,
    FAMILY_HISTORY,
    MEDICAL_CONDITION,
];

/// Addends of the cumulative Stress Factor Score.
pub const STRESS_FACTOR_COLUMNS: [&str; 4] = [
    FINANCIAL_STRESS,
    PEER_PRESSURE,
    RELATIONSHIP_STRESS,
    COGNITIVE_DISTORTIONS,
];

/// Numeric subset the correlation matrix is computed over. Columns absent
/// from a given dataset are skipped, not errors.
pub const CORRELATION_COLUMNS: [&str; 14] = [
    MENTAL_STRESS_LEVEL,
    AGE,
    GPA,
    STUDY_HOURS,
    SOCIAL_MEDIA_USAGE,
    SLEEP_DURATION,
    PHYSICAL_EXERCISE,
    FAMILY_SUPPORT,
    FINANCIAL_STRESS,
    PEER_PRESSURE,
    RELATIONSHIP_STRESS,
    DIET_QUALITY,
    COGNITIVE_DISTORTIONS,
    SUBSTANCE_USE,
];
