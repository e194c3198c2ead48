//! Keyword-based doctor matching.
//!
//! Scores every active doctor against a free-text symptom description using
//! a static symptom-to-specialty table plus the doctor's own expertise tags,
//! then returns the top matches. Matching is naive substring containment on
//! case-folded text; overlapping keywords accumulate credit. That behavior is
//! load-bearing for API compatibility and must not be tightened.

use medimatch_common::{Doctor, Severity};

/// Symptom keyword -> specialty. Lowercase on both sides, read-only,
/// many-to-one.
const SYMPTOM_SPECIALTY_MAP: &[(&str, &str)] = &[
    // Cardiology
    ("chest pain", "cardiology"),
    ("heart", "cardiology"),
    ("blood pressure", "cardiology"),
    ("cholesterol", "cardiology"),
    ("palpitations", "cardiology"),
    // Neurology
    ("headache", "neurology"),
    ("migraine", "neurology"),
    ("stroke", "neurology"),
    ("seizure", "neurology"),
    ("dizziness", "neurology"),
    ("memory", "neurology"),
    // Dermatology
    ("skin", "dermatology"),
    ("rash", "dermatology"),
    ("acne", "dermatology"),
    ("eczema", "dermatology"),
    ("psoriasis", "dermatology"),
    // Pediatrics
    ("child", "pediatrics"),
    ("baby", "pediatrics"),
    ("kids", "pediatrics"),
    ("vaccine", "pediatrics"),
    ("development", "pediatrics"),
    // Oncology
    ("cancer", "oncology"),
    ("tumor", "oncology"),
    ("chemotherapy", "oncology"),
    // Orthopedics
    ("bone", "orthopedics"),
    ("joint", "orthopedics"),
    ("fracture", "orthopedics"),
    ("arthritis", "orthopedics"),
    ("back pain", "orthopedics"),
];

const MAX_RECOMMENDATIONS: usize = 5;
const FALLBACK_COUNT: usize = 3;

/// Rank doctors against a symptom description.
///
/// `doctors` is the active-doctor list in store order (rating desc,
/// created_at desc); ties in match score preserve that order. Returns at
/// most five scored matches, or the first three doctors unscored when
/// nothing scores above zero.
pub fn recommend(doctors: &[Doctor], symptoms: &str, severity: Option<Severity>) -> Vec<Doctor> {
    let symptoms = symptoms.to_lowercase();

    let mut matched: Vec<(f64, &Doctor)> = doctors
        .iter()
        .map(|doctor| (match_score(doctor, &symptoms, severity), doctor))
        .filter(|(score, _)| *score > 0.0)
        .collect();

    // sort_by is stable, so equal scores keep the store ordering
    matched.sort_by(|a, b| b.0.total_cmp(&a.0));

    if matched.is_empty() {
        return doctors.iter().take(FALLBACK_COUNT).cloned().collect();
    }

    matched
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|(_, doctor)| doctor.clone())
        .collect()
}

fn match_score(doctor: &Doctor, symptoms_lower: &str, severity: Option<Severity>) -> f64 {
    let mut score = 0.0;
    let specialty = doctor.specialty.to_lowercase();

    // Specialty matching: every table hit counts, no dedup or cap
    for (keyword, target_specialty) in SYMPTOM_SPECIALTY_MAP {
        if symptoms_lower.contains(keyword) && specialty.contains(target_specialty) {
            score += 3.0;
        }
    }

    // Expertise matching
    for skill in &doctor.expertise {
        if symptoms_lower.contains(&skill.to_lowercase()) {
            score += 2.0;
        }
    }

    // Rating bonus; negative below 4
    score += (doctor.rating - 4.0) * 0.5;

    // Experience bonus for severe conditions
    if severity.is_some_and(|s| s.is_urgent()) {
        score += parse_leading_years(&doctor.experience) as f64 * 0.1;
    }

    score
}

/// Leading integer of the experience string: optional sign after leading
/// whitespace, then digits. 0 when the string does not start with a number.
fn parse_leading_years(experience: &str) -> i64 {
    let trimmed = experience.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use medimatch_common::models::doctor::{DoctorMetadata, DoctorStatus};
    use uuid::Uuid;

    fn doctor(name: &str, specialty: &str, expertise: &[&str], rating: f64, experience: &str) -> Doctor {
        Doctor {
            id: Uuid::new_v4(),
            name: name.to_string(),
            specialty: specialty.to_string(),
            experience: experience.to_string(),
            rating,
            consultations: "1.0k+".to_string(),
            response_time: "< 2 min".to_string(),
            status: DoctorStatus::Online,
            avatar: "https://example.com/a.png".to_string(),
            description: "".to_string(),
            expertise: expertise.iter().map(|s| s.to_string()).collect(),
            education: vec![],
            languages: vec![],
            availability: None,
            consultation_fee: 50.0,
            is_verified: true,
            is_active: true,
            featured: false,
            metadata: DoctorMetadata::default(),
            experience_years: 0,
            consultation_count: 0.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_score_worked_example() {
        // "headache" and "dizziness" both map to neurology (+3 each),
        // "Migraines" is not in the text (+0), rating (4.8-4)*0.5 = 0.4,
        // severe severity adds 12 * 0.1 = 1.2
        let d = doctor("Dr. A", "Neurology AI Expert", &["Migraines"], 4.8, "12 years");
        let score = match_score(
            &d,
            "i have a severe headache and dizziness",
            Some(Severity::Severe),
        );
        assert!((score - 7.6).abs() < 1e-9, "expected 7.6, got {score}");
    }

    #[test]
    fn test_keyword_hits_accumulate() {
        let d = doctor("Dr. A", "Cardiology", &[], 4.0, "5 years");
        let one = match_score(&d, "chest pain", None);
        let two = match_score(&d, "chest pain and heart trouble", None);
        assert_eq!(one, 3.0);
        assert_eq!(two, 6.0);
    }

    #[test]
    fn test_expertise_adds_two_per_hit() {
        let d = doctor(
            "Dr. A",
            "General",
            &["Blood Pressure", "Cholesterol"],
            4.0,
            "5 years",
        );
        // specialty "general" matches no table entry, so only the two
        // expertise tags count
        let score = match_score(&d, "high blood pressure and cholesterol", None);
        assert_eq!(score, 4.0);
    }

    #[test]
    fn test_rating_bonus_can_be_negative() {
        let d = doctor("Dr. A", "General", &[], 3.0, "5 years");
        let score = match_score(&d, "sore throat", None);
        assert_eq!(score, -0.5);
    }

    #[test]
    fn test_severity_bonus_only_for_urgent() {
        let d = doctor("Dr. A", "Neurology", &[], 4.0, "10 years");
        let mild = match_score(&d, "headache", Some(Severity::Mild));
        let moderate = match_score(&d, "headache", Some(Severity::Moderate));
        let severe = match_score(&d, "headache", Some(Severity::Severe));
        let emergency = match_score(&d, "headache", Some(Severity::Emergency));
        assert_eq!(mild, 3.0);
        assert_eq!(moderate, 3.0);
        assert_eq!(severe, 4.0);
        assert_eq!(emergency, 4.0);
    }

    #[test]
    fn test_case_folding_on_both_sides() {
        let d = doctor("Dr. A", "CARDIOLOGY Clinic", &["Heart Disease"], 4.0, "5 years");
        let score = match_score(&d, "HEART DISEASE and chest PAIN", None);
        // "heart" keyword (+3), "chest pain" keyword (+3), "heart disease" tag (+2)
        assert_eq!(score, 8.0);
    }

    #[test]
    fn test_returns_at_most_five() {
        let doctors: Vec<Doctor> = (0..8)
            .map(|i| doctor(&format!("Dr. {i}"), "Cardiology", &[], 4.5, "5 years"))
            .collect();
        let result = recommend(&doctors, "heart trouble", None);
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn test_ranked_by_score_descending() {
        let doctors = vec![
            doctor("Dr. Low", "General", &[], 4.2, "5 years"),
            doctor("Dr. High", "Neurology", &[], 4.2, "5 years"),
        ];
        let result = recommend(&doctors, "migraine", None);
        assert_eq!(result[0].name, "Dr. High");
        assert_eq!(result[1].name, "Dr. Low");
    }

    #[test]
    fn test_ties_preserve_store_order() {
        let doctors = vec![
            doctor("Dr. First", "Cardiology", &[], 4.5, "5 years"),
            doctor("Dr. Second", "Cardiology", &[], 4.5, "5 years"),
            doctor("Dr. Third", "Cardiology", &[], 4.5, "5 years"),
        ];
        let result = recommend(&doctors, "heart", None);
        let names: Vec<&str> = result.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Dr. First", "Dr. Second", "Dr. Third"]);
    }

    #[test]
    fn test_fallback_to_first_three_unscored() {
        // Ratings at 4.0 and no matching keywords leave every score at 0
        let doctors = vec![
            doctor("Dr. A", "General", &[], 4.0, "5 years"),
            doctor("Dr. B", "General", &[], 4.0, "5 years"),
            doctor("Dr. C", "General", &[], 4.0, "5 years"),
            doctor("Dr. D", "General", &[], 4.0, "5 years"),
        ];
        let result = recommend(&doctors, "completely unrelated complaint", None);
        let names: Vec<&str> = result.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Dr. A", "Dr. B", "Dr. C"]);
    }

    #[test]
    fn test_rating_above_four_alone_scores_positive() {
        // A doctor with no keyword match but rating above 4 still scores
        // (rating - 4) * 0.5 > 0 and is treated as a match
        let doctors = vec![doctor("Dr. A", "General", &[], 4.8, "5 years")];
        let result = recommend(&doctors, "unmatched symptoms", None);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_empty_doctor_list() {
        let result = recommend(&[], "headache", None);
        assert!(result.is_empty());
    }

    #[test]
    fn test_monotone_in_matches() {
        let base = doctor("Dr. A", "Neurology", &[], 4.0, "5 years");
        let more = doctor("Dr. B", "Neurology", &["Migraine Care"], 4.0, "5 years");
        let text = "migraine care and headache";
        assert!(match_score(&more, text, None) > match_score(&base, text, None));
    }

    #[test]
    fn test_parse_leading_years() {
        assert_eq!(parse_leading_years("12 years"), 12);
        assert_eq!(parse_leading_years("  8yrs"), 8);
        assert_eq!(parse_leading_years("over 12 years"), 0);
        assert_eq!(parse_leading_years(""), 0);
        assert_eq!(parse_leading_years("+3 years"), 3);
    }
}
