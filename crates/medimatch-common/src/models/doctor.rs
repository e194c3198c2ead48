use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Presence status shown in the directory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoctorStatus {
    Online,
    Offline,
    Busy,
    Away,
}

impl DoctorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DoctorStatus::Online => "online",
            DoctorStatus::Offline => "offline",
            DoctorStatus::Busy => "busy",
            DoctorStatus::Away => "away",
        }
    }
}

impl fmt::Display for DoctorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DoctorStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(DoctorStatus::Online),
            "offline" => Ok(DoctorStatus::Offline),
            "busy" => Ok(DoctorStatus::Busy),
            "away" => Ok(DoctorStatus::Away),
            other => Err(format!("unknown doctor status '{other}'")),
        }
    }
}

/// Reported symptom severity. Severe and emergency cases weight
/// doctor experience into the match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    Emergency,
}

impl Severity {
    pub fn is_urgent(&self) -> bool {
        matches!(self, Severity::Severe | Severity::Emergency)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub university: String,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHours {
    pub start: String, // "09:00"
    pub end: String,   // "17:00"
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    #[serde(default = "default_timezone")]
    pub timezone: String,
    pub working_hours: Option<WorkingHours>,
    #[serde(default)]
    pub working_days: Vec<String>,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorMetadata {
    pub views: i64,
    pub likes: i64,
    pub success_rate: f64,
}

/// Doctor profile as served to clients. Derived fields
/// (`experience_years`, `consultation_count`) are computed from the stored
/// free-text columns when the profile is read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub experience: String,
    pub rating: f64,
    pub consultations: String,
    pub response_time: String,
    pub status: DoctorStatus,
    pub avatar: String,
    pub description: String,
    pub expertise: Vec<String>,
    pub education: Vec<Education>,
    pub languages: Vec<String>,
    pub availability: Option<Availability>,
    pub consultation_fee: f64,
    pub is_verified: bool,
    pub is_active: bool,
    pub featured: bool,
    pub metadata: DoctorMetadata,
    pub experience_years: u32,
    pub consultation_count: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Years of experience derived from the free-text experience field:
/// the first run of digits anywhere in the string, 0 if none.
pub fn experience_years(experience: &str) -> u32 {
    let digits: String = experience
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Consultation count derived from the free-text consultations field
/// (e.g. "2.4k+"): the first decimal number times 1000, 0 if none.
pub fn consultation_count(consultations: &str) -> f64 {
    let start = match consultations.find(|c: char| c.is_ascii_digit()) {
        Some(i) => i,
        None => return 0.0,
    };
    let rest = &consultations[start..];
    let mut end = 0;
    let mut seen_dot = false;
    for c in rest.chars() {
        if c.is_ascii_digit() {
            end += 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            end += 1;
        } else {
            break;
        }
    }
    // A trailing dot ("12.") still parses as 12, like parseFloat
    rest[..end]
        .trim_end_matches('.')
        .parse::<f64>()
        .map(|n| n * 1000.0)
        .unwrap_or(0.0)
}

/// Format a consultation count back into the stored display form:
/// "N+" below 1000, "X.Yk+" at or above.
pub fn format_consultations(count: f64) -> String {
    if count >= 1000.0 {
        format!("{:.1}k+", count / 1000.0)
    } else {
        format!("{count}+")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_years_simple() {
        assert_eq!(experience_years("8 years"), 8);
        assert_eq!(experience_years("12 years"), 12);
    }

    #[test]
    fn test_experience_years_digits_not_leading() {
        assert_eq!(experience_years("over 10 years"), 10);
    }

    #[test]
    fn test_experience_years_unparseable() {
        assert_eq!(experience_years("seasoned practitioner"), 0);
        assert_eq!(experience_years(""), 0);
    }

    #[test]
    fn test_consultation_count_k_notation() {
        assert_eq!(consultation_count("2.4k+"), 2400.0);
        assert_eq!(consultation_count("3.1k+"), 3100.0);
    }

    #[test]
    fn test_consultation_count_plain_number_still_scaled() {
        // The derivation always multiplies by 1000, even without a 'k'
        // suffix. Kept for compatibility with existing stored values.
        assert_eq!(consultation_count("150+"), 150_000.0);
    }

    #[test]
    fn test_consultation_count_unparseable() {
        assert_eq!(consultation_count("n/a"), 0.0);
        assert_eq!(consultation_count(""), 0.0);
    }

    #[test]
    fn test_format_consultations_below_thousand() {
        assert_eq!(format_consultations(151.0), "151+");
        assert_eq!(format_consultations(999.0), "999+");
    }

    #[test]
    fn test_format_consultations_thousand_boundary() {
        assert_eq!(format_consultations(1000.0), "1.0k+");
        assert_eq!(format_consultations(2401.0), "2.4k+");
    }

    #[test]
    fn test_status_round_trip() {
        for s in ["online", "offline", "busy", "away"] {
            let status: DoctorStatus = s.parse().unwrap();
            assert_eq!(status.as_str(), s);
        }
        assert!("unknown".parse::<DoctorStatus>().is_err());
    }

    #[test]
    fn test_severity_is_urgent() {
        assert!(!Severity::Mild.is_urgent());
        assert!(!Severity::Moderate.is_urgent());
        assert!(Severity::Severe.is_urgent());
        assert!(Severity::Emergency.is_urgent());
    }

    #[test]
    fn test_severity_deserializes_lowercase() {
        let severity: Severity = serde_json::from_str("\"emergency\"").unwrap();
        assert_eq!(severity, Severity::Emergency);
        assert!(serde_json::from_str::<Severity>("\"critical\"").is_err());
    }

    #[test]
    fn test_doctor_serializes_camel_case() {
        let doctor = Doctor {
            id: Uuid::new_v4(),
            name: "Dr. Test".to_string(),
            specialty: "Cardiology".to_string(),
            experience: "8 years".to_string(),
            rating: 4.9,
            consultations: "2.4k+".to_string(),
            response_time: "< 2 min".to_string(),
            status: DoctorStatus::Online,
            avatar: "https://example.com/a.png".to_string(),
            description: "Test".to_string(),
            expertise: vec!["Heart Disease".to_string()],
            education: vec![],
            languages: vec!["English".to_string()],
            availability: None,
            consultation_fee: 79.99,
            is_verified: true,
            is_active: true,
            featured: false,
            metadata: DoctorMetadata::default(),
            experience_years: 8,
            consultation_count: 2400.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&doctor).unwrap();
        assert_eq!(json["responseTime"], "< 2 min");
        assert_eq!(json["consultationFee"], 79.99);
        assert_eq!(json["isActive"], true);
        assert_eq!(json["experienceYears"], 8);
        assert_eq!(json["metadata"]["successRate"], 0.0);
        assert_eq!(json["status"], "online");
    }
}
